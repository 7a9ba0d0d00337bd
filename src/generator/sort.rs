//! Stable sorting by key, and eager evaluation.
//!
//! Keys are compared through [`SortKey`], whose comparison may fail. A failed
//! comparison aborts the drive with [`TypeError::Incomparable`] instead of
//! producing an arbitrary order.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::{Generator, GeneratorError, TypeError};

/// A key with a possibly partial total order.
///
/// Types with a total order compare infallibly. Floating point keys fail on
/// `NaN`, and dynamic values fail when their runtime kinds differ.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::SortKey;
/// use std::cmp::Ordering;
///
/// assert_eq!(2_i32.try_cmp(&10), Ok(Ordering::Less));
/// assert!(1.5_f64.try_cmp(&f64::NAN).is_err());
/// ```
pub trait SortKey: Debug {
    /// Compares `self` with `other`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Incomparable`] when the two keys have no defined
    /// order.
    fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError>;
}

macro_rules! total_sort_key {
    ($($key:ty),* $(,)?) => {
        $(
            impl SortKey for $key {
                #[inline]
                fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
                    Ok(self.cmp(other))
                }
            }
        )*
    };
}

total_sort_key!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, str, (),
);

macro_rules! float_sort_key {
    ($($float:ty),*) => {
        $(
            impl SortKey for $float {
                fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
                    self.partial_cmp(other)
                        .ok_or_else(|| TypeError::incomparable(self, other))
                }
            }
        )*
    };
}

float_sort_key!(f32, f64);

impl<K: SortKey + ?Sized> SortKey for &K {
    #[inline]
    fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
        (**self).try_cmp(*other)
    }
}

/// `None` only compares with `None`.
impl<K: SortKey> SortKey for Option<K> {
    fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
        match (self, other) {
            (None, None) => Ok(Ordering::Equal),
            (Some(left), Some(right)) => left.try_cmp(right),
            _ => Err(TypeError::incomparable(self, other)),
        }
    }
}

/// Lexicographic.
impl<A: SortKey, B: SortKey> SortKey for (A, B) {
    fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
        match self.0.try_cmp(&other.0)? {
            Ordering::Equal => self.1.try_cmp(&other.1),
            decided => Ok(decided),
        }
    }
}

#[cfg(feature = "json")]
impl SortKey for serde_json::Value {
    /// Numbers compare numerically, strings lexicographically and booleans
    /// with `false < true`. `null` equals `null`. Every other pairing,
    /// including arrays and objects, is incomparable.
    fn try_cmp(&self, other: &Self) -> Result<Ordering, TypeError> {
        use serde_json::Value;

        let ordering = match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
            (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
            (Value::Number(left), Value::Number(right)) => match (left.as_i64(), right.as_i64()) {
                (Some(left), Some(right)) => Some(left.cmp(&right)),
                _ => left
                    .as_f64()
                    .zip(right.as_f64())
                    .and_then(|(left, right)| left.partial_cmp(&right)),
            },
            _ => None,
        };
        ordering.ok_or_else(|| TypeError::incomparable(self, other))
    }
}

/// Returns the stable ascending order of `keys` as a permutation of indices.
///
/// Bottom-up merge sort; on ties the element from the left run wins.
fn stable_order<K: SortKey>(keys: &[K]) -> Result<Vec<usize>, TypeError> {
    let length = keys.len();
    let mut order: Vec<usize> = (0..length).collect();
    let mut merged = Vec::with_capacity(length);
    let mut width = 1;

    while width < length {
        merged.clear();
        for start in (0..length).step_by(2 * width) {
            let middle = (start + width).min(length);
            let end = (start + 2 * width).min(length);
            let (mut left, mut right) = (start, middle);

            while left < middle && right < end {
                if keys[order[right]].try_cmp(&keys[order[left]])? == Ordering::Less {
                    merged.push(order[right]);
                    right += 1;
                } else {
                    merged.push(order[left]);
                    left += 1;
                }
            }
            merged.extend_from_slice(&order[left..middle]);
            merged.extend_from_slice(&order[right..end]);
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }
    Ok(order)
}

impl<T: 'static, S: Default + 'static> Generator<T, S> {
    /// Sorts the values by the key `key_of` selects.
    ///
    /// The sort is stable and ascending. Each key is computed once per
    /// value. The source is materialized when the result is driven, and again
    /// on every later drive.
    ///
    /// # Errors
    ///
    /// Driving the result fails with [`TypeError::Incomparable`] if two keys
    /// that had to be compared have no defined order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let people = Generator::from_vec(vec![("eve", 31), ("bob", 25), ("amy", 31)]);
    /// let by_age = people.sort_by(|(_, age)| *age).map(|(name, _)| name);
    /// assert_eq!(by_age.to_vec().unwrap(), vec!["bob", "eve", "amy"]);
    /// ```
    pub fn sort_by<K, F>(&self, key_of: F) -> Generator<T>
    where
        K: SortKey + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        Generator::from_fn(move |scope| {
            let mut values = Vec::new();
            let mut keys = Vec::new();
            source.drive(|value, _, _| {
                keys.push(key_of(&value));
                values.push(Some(value));
                Ok(S::default())
            })?;

            let order = stable_order(&keys).inspect_err(|error| {
                tracing::debug!(%error, values = keys.len(), "sort aborted");
            })?;

            for position in order {
                if let Some(value) = values[position].take() {
                    scope.yield_value(value)?;
                }
            }
            Ok(())
        })
    }

    /// Drives the generator once and returns a collection-backed generator
    /// over the produced values.
    ///
    /// The result is independent of the source: later drives replay the
    /// stored values without running the source again.
    ///
    /// # Errors
    ///
    /// Returns the error raised while driving the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::count;
    ///
    /// let firsts = count(1).take(3).evaluated().unwrap();
    /// assert_eq!(firsts.to_vec().unwrap(), vec![1, 2, 3]);
    /// assert_eq!(firsts.to_vec().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn evaluated(&self) -> Result<Generator<T>, GeneratorError>
    where
        T: Clone,
    {
        self.to_vec().map(Generator::from_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    #[case(vec![3, 1, 2], vec![1, 2, 3])]
    #[case(vec![], vec![])]
    #[case(vec![5], vec![5])]
    #[case(vec![2, 2, 1, 9, 0, 7, 3], vec![0, 1, 2, 2, 3, 7, 9])]
    fn sorts_ascending(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        let sorted = Generator::from_vec(input).sort_by(|x| *x);
        assert_eq!(sorted.to_vec().unwrap(), expected);
    }

    #[rstest]
    fn equal_keys_keep_source_order() {
        let words = Generator::from_vec(vec!["bb", "a", "cc", "d", "ee", "f"]);
        let by_length = words.sort_by(|word| word.len());
        assert_eq!(by_length.to_vec().unwrap(), vec!["a", "d", "f", "bb", "cc", "ee"]);
    }

    #[rstest]
    fn keys_are_computed_once_per_value() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sorted = Generator::from_vec(vec![4, 3, 2, 1]).sort_by(move |x| {
            counter.set(counter.get() + 1);
            -x
        });
        assert_eq!(sorted.to_vec().unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(calls.get(), 4);
    }

    #[rstest]
    fn nan_keys_are_a_type_error() {
        let readings = Generator::from_vec(vec![0.5, f64::NAN, 0.1]);
        let error = readings.sort_by(|x| *x).to_vec().unwrap_err();
        assert!(error.is_type_error());
    }

    #[rstest]
    fn optional_keys_need_matching_presence() {
        assert_eq!(Some(1_u8).try_cmp(&Some(2)), Ok(Ordering::Less));
        assert_eq!(None::<u8>.try_cmp(&None), Ok(Ordering::Equal));
        assert_eq!(
            Some(1_u8).try_cmp(&None),
            Err(TypeError::Incomparable {
                left: "Some(1)".to_string(),
                right: "None".to_string(),
            })
        );
    }

    #[rstest]
    fn tuple_keys_compare_lexicographically() {
        let pairs = Generator::from_vec(vec![(2, 'a'), (1, 'z'), (2, 'b'), (1, 'c')]);
        let sorted = pairs.sort_by(|pair| *pair);
        assert_eq!(
            sorted.to_vec().unwrap(),
            vec![(1, 'c'), (1, 'z'), (2, 'a'), (2, 'b')]
        );
    }

    #[cfg(feature = "json")]
    #[rstest]
    fn mixed_json_keys_are_a_type_error() {
        use serde_json::json;

        let mixed = Generator::from_vec(vec![json!(1), json!("one")]);
        let error = mixed.sort_by(Clone::clone).to_vec().unwrap_err();
        assert_eq!(error.to_string(), "cannot compare String(\"one\") and Number(1)");
    }

    #[cfg(feature = "json")]
    #[rstest]
    fn json_numbers_compare_numerically() {
        use serde_json::json;

        let numbers = Generator::from_vec(vec![json!(10), json!(2.5), json!(-1)]);
        let sorted = numbers.sort_by(Clone::clone).to_vec().unwrap();
        assert_eq!(sorted, vec![json!(-1), json!(2.5), json!(10)]);
    }

    #[rstest]
    fn evaluated_runs_the_source_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let source: Generator<i32> = Generator::from_fn(move |scope| {
            counter.set(counter.get() + 1);
            scope.yield_many(vec![1, 2])
        });

        let stored = source.evaluated().unwrap();
        assert_eq!(stored.to_vec().unwrap(), vec![1, 2]);
        assert_eq!(stored.to_vec().unwrap(), vec![1, 2]);
        assert_eq!(runs.get(), 1);
    }
}
