//! Grouping values by key.
//!
//! Both grouping combinators materialize their source, then yield one
//! [`Group`] per distinct key in the order the keys were first seen. Members
//! keep their source order.

use std::fmt;
use std::ops::Deref;

use super::Generator;

#[cfg(feature = "fxhash")]
type KeyIndex<K> = rustc_hash::FxHashMap<K, usize>;
#[cfg(not(feature = "fxhash"))]
type KeyIndex<K> = std::collections::HashMap<K, usize>;

/// The values sharing one grouping key.
///
/// A group is itself a collection-backed [`Generator`] (through `Deref`), so
/// every combinator and terminal operation works on it directly.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::Generator;
///
/// let groups = Generator::from_vec(vec![1, 2, 3, 4])
///     .group_by(|x| x % 2)
///     .to_vec()
///     .unwrap();
///
/// assert_eq!(*groups[0].key(), 1);
/// assert_eq!(groups[0].to_vec().unwrap(), vec![1, 3]);
/// assert_eq!(*groups[1].key(), 0);
/// assert_eq!(groups[1].to_vec().unwrap(), vec![2, 4]);
/// ```
pub struct Group<K, T> {
    key: K,
    members: Generator<T>,
}

impl<K, T: Clone + 'static> Group<K, T> {
    /// Creates a group over `members`.
    pub fn new(key: K, members: Vec<T>) -> Self {
        Self {
            key,
            members: Generator::from_vec(members),
        }
    }
}

impl<K, T> Group<K, T> {
    /// The key shared by every member.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The members as a generator.
    pub const fn members(&self) -> &Generator<T> {
        &self.members
    }

    /// Splits the group into its key and members.
    pub fn into_parts(self) -> (K, Generator<T>) {
        (self.key, self.members)
    }
}

impl<K: Clone, T> Clone for Group<K, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            members: self.members.clone(),
        }
    }
}

impl<K, T> Deref for Group<K, T> {
    type Target = Generator<T>;

    fn deref(&self) -> &Generator<T> {
        &self.members
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Group<K, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Group")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static, S: Default + 'static> Generator<T, S> {
    /// Groups values by the key `grouper` selects.
    ///
    /// Keys are compared with `==` against every key seen so far, so this
    /// costs `O(n·g)` for `n` values and `g` groups and needs nothing more
    /// than `PartialEq` from the key. See
    /// [`group_by_hashed`](Self::group_by_hashed) for hashable keys.
    ///
    /// The source is driven to completion when the result is driven.
    pub fn group_by<K, F>(&self, grouper: F) -> Generator<Group<K, T>>
    where
        K: PartialEq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            let mut buckets: Vec<(K, Vec<T>)> = Vec::new();
            source.drive(|value, _, _| {
                let key = grouper(&value);
                match buckets.iter_mut().find(|(seen, _)| *seen == key) {
                    Some((_, members)) => members.push(value),
                    None => buckets.push((key, vec![value])),
                }
                Ok(S::default())
            })?;

            for (key, members) in buckets {
                scope.yield_value(Group::new(key, members))?;
            }
            Ok(())
        })
    }

    /// Groups values by a hashable key.
    ///
    /// Produces exactly the same groups in the same order as
    /// [`group_by`](Self::group_by), with a hash index instead of a linear
    /// scan.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let words = Generator::from_vec(vec!["apple", "bean", "avocado", "beet"]);
    /// let initials: Vec<char> = words
    ///     .group_by_hashed(|word| word.chars().next())
    ///     .map(|group| group.key().unwrap_or('?'))
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(initials, vec!['a', 'b']);
    /// ```
    pub fn group_by_hashed<K, F>(&self, grouper: F) -> Generator<Group<K, T>>
    where
        K: std::hash::Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            let mut slots = KeyIndex::<K>::default();
            let mut buckets: Vec<(K, Vec<T>)> = Vec::new();
            source.drive(|value, _, _| {
                let key = grouper(&value);
                if let Some(&slot) = slots.get(&key) {
                    buckets[slot].1.push(value);
                } else {
                    slots.insert(key.clone(), buckets.len());
                    buckets.push((key, vec![value]));
                }
                Ok(S::default())
            })?;

            for (key, members) in buckets {
                scope.yield_value(Group::new(key, members))?;
            }
            Ok(())
        })
    }
}
