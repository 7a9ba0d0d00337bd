//! Push-based lazy generators.
//!
//! This module provides [`Generator<T, S>`], a handle to a producing routine
//! that pushes values into a consumer on demand. Nothing is computed until a
//! terminal operation drives the generator:
//!
//! - Construction: [`Generator::from_vec`], [`Generator::from_map`],
//!   [`Generator::from_fn`], [`Generator::with_params`]
//! - Combinators: `filter`, `map`, `take`, `skip`, `take_while`,
//!   `skip_while`, `zip_with_array`, `and`, `group_by`, `sort_by`,
//!   `evaluated`, `except`
//! - Terminal operations: `to_vec`, `first`, `all`, `any`, `count`,
//!   `reduce`, `fold`
//! - Infinite sources: [`count`], [`count_by`], [`range`]
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::generator::{Generator, count};
//!
//! let odd_squares = count(1)
//!     .filter(|value: &u64| value % 2 == 1)
//!     .map(|value| value * value)
//!     .take(4);
//!
//! assert_eq!(odd_squares.to_vec().unwrap(), vec![1, 9, 25, 49]);
//! ```
//!
//! ## Custom routines
//!
//! ```rust
//! use lazyseq::generator::Generator;
//!
//! let fibonacci: Generator<u64> = Generator::from_fn(|scope| {
//!     let (mut current, mut next) = (0, 1);
//!     loop {
//!         scope.yield_value(current)?;
//!         (current, next) = (next, current + next);
//!     }
//! });
//!
//! assert_eq!(fibonacci.take(8).to_vec().unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
//! ```

mod combinators;
mod drive;
mod error;
mod factories;
mod group;
mod interop;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "serde")]
mod serialize;
mod sort;
mod terminal;

pub use drive::{Flow, Interrupt, Scope, Stop};
pub use error::{GeneratorError, IterationError, TypeError};
pub use factories::{count, count_by, range};
pub use group::Group;
pub use interop::{IntoGenerator, Materialize};
pub use sort::SortKey;

use std::fmt;
use std::rc::Rc;

use drive::Routine;

/// A lazily evaluated, re-drivable sequence of values.
///
/// `Generator<T, S>` wraps a producing routine. Every drive runs the routine
/// from the start with fresh state, so generators built from collections can
/// be consumed any number of times with identical results.
///
/// # Type Parameters
///
/// * `T` - The type of the produced values
/// * `S` - The feedback type consumers hand back to the routine through
///   [`Scope::yield_value`]. Almost always `()`.
///
/// # Thread Safety
///
/// Generators are single-threaded: they are neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::Generator;
///
/// let letters = Generator::from_vec(vec!['a', 'b', 'c']);
/// assert_eq!(letters.to_vec().unwrap(), vec!['a', 'b', 'c']);
/// assert_eq!(letters.count().unwrap(), 3);
/// ```
pub struct Generator<T, S = ()> {
    routine: Rc<Routine<T, S>>,
}

static_assertions::assert_not_impl_any!(Generator<i32>: Send, Sync);

impl<T, S> Clone for Generator<T, S> {
    fn clone(&self) -> Self {
        Self {
            routine: Rc::clone(&self.routine),
        }
    }
}

impl<T: 'static> Generator<T> {
    /// Creates a generator from a producing routine.
    ///
    /// The routine receives a [`Scope`] and emits values with
    /// [`Scope::yield_value`], propagating interrupts with `?`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let countdown: Generator<u8> = Generator::from_fn(|scope| {
    ///     for value in (1..=3).rev() {
    ///         scope.yield_value(value)?;
    ///     }
    ///     Ok(())
    /// });
    /// assert_eq!(countdown.to_vec().unwrap(), vec![3, 2, 1]);
    /// ```
    pub fn from_fn<F>(routine: F) -> Self
    where
        F: Fn(&mut Scope<'_, T>) -> Flow + 'static,
    {
        Self::from_feedback_fn(routine)
    }

    /// Creates a generator from a routine with fixed parameters.
    ///
    /// The parameters are stored once and lent to every drive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let repeated = Generator::with_params(("ab", 2), |(text, times), scope| {
    ///     for _ in 0..*times {
    ///         scope.yield_value(text.to_string())?;
    ///     }
    ///     Ok(())
    /// });
    /// assert_eq!(repeated.to_vec().unwrap(), vec!["ab", "ab"]);
    /// ```
    pub fn with_params<P, F>(params: P, routine: F) -> Self
    where
        P: 'static,
        F: Fn(&P, &mut Scope<'_, T>) -> Flow + 'static,
    {
        Self::from_fn(move |scope| routine(&params, scope))
    }

    /// Creates a generator that pulls from a fresh iterator on every drive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// let evens = Generator::from_iter_fn(|| (0..10).step_by(2));
    /// assert_eq!(evens.to_vec().unwrap(), vec![0, 2, 4, 6, 8]);
    /// assert_eq!(evens.count().unwrap(), 5);
    /// ```
    pub fn from_iter_fn<I, F>(factory: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn() -> I + 'static,
    {
        Self::from_fn(move |scope| {
            for value in factory() {
                scope.yield_value(value)?;
            }
            Ok(())
        })
    }

    /// Creates a generator that produces nothing.
    pub fn empty() -> Self {
        Self::from_fn(|_| Ok(()))
    }
}

impl<T: Clone + 'static> Generator<T> {
    /// Creates a generator over an ordered collection.
    ///
    /// Elements are yielded as clones in order; the collection itself is
    /// never consumed.
    pub fn from_vec(values: Vec<T>) -> Self {
        let values: Rc<[T]> = values.into();
        Self::from_fn(move |scope| {
            for value in values.iter() {
                scope.yield_value(value.clone())?;
            }
            Ok(())
        })
    }

    /// Creates a generator over a copy of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_vec(values.to_vec())
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Generator<(K, V)> {
    /// Creates a generator of `(key, value)` pairs from a mapping.
    ///
    /// Pairs are produced in the mapping's own enumeration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    /// use std::collections::BTreeMap;
    ///
    /// let stock = BTreeMap::from([("apple", 3), ("pear", 0)]);
    /// let pairs = Generator::from_map(stock);
    /// assert_eq!(pairs.to_vec().unwrap(), vec![("apple", 3), ("pear", 0)]);
    /// ```
    pub fn from_map<M>(map: M) -> Self
    where
        M: IntoIterator<Item = (K, V)>,
    {
        Self::from_vec(map.into_iter().collect())
    }
}

impl<T: 'static, S: 'static> Generator<T, S> {
    /// Creates a generator whose consumers return feedback of type `S`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::Generator;
    ///
    /// // Doubles the step every time the consumer answers `true`.
    /// let accelerating: Generator<u32, bool> = Generator::from_feedback_fn(|scope| {
    ///     let (mut position, mut step) = (0, 1);
    ///     while position < 20 {
    ///         if scope.yield_value(position)? {
    ///             step *= 2;
    ///         }
    ///         position += step;
    ///     }
    ///     Ok(())
    /// });
    ///
    /// let mut positions = Vec::new();
    /// accelerating
    ///     .for_each(|position, _, _| {
    ///         positions.push(position);
    ///         Ok(position >= 2)
    ///     })
    ///     .unwrap();
    /// assert_eq!(positions, vec![0, 1, 2, 4, 8, 16]);
    /// ```
    pub fn from_feedback_fn<F>(routine: F) -> Self
    where
        F: Fn(&mut Scope<'_, T, S>) -> Flow + 'static,
    {
        Self {
            routine: Rc::new(routine),
        }
    }

    /// Runs one drive, pushing every value into `consumer`.
    ///
    /// Use this inside producing routines: interrupts that belong to an
    /// enclosing drive are passed through untouched.
    ///
    /// # Errors
    ///
    /// Returns any interrupt not owned by this drive.
    pub fn drive<C>(&self, mut consumer: C) -> Flow
    where
        C: FnMut(T, usize, &Stop) -> Flow<S>,
    {
        drive::run(self.routine.as_ref(), &mut consumer)
    }

    /// Runs one drive at the top level.
    ///
    /// # Errors
    ///
    /// Returns the [`GeneratorError`] raised by the routine or the consumer.
    pub fn for_each<C>(&self, consumer: C) -> Result<(), GeneratorError>
    where
        C: FnMut(T, usize, &Stop) -> Flow<S>,
    {
        self.drive(consumer).map_err(Interrupt::into_error)
    }
}

impl<T, S> fmt::Debug for Generator<T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Generator").finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Generator<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: Clone + 'static, const N: usize> From<[T; N]> for Generator<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_vec(values.into())
    }
}

impl<T: Clone + 'static> FromIterator<T> for Generator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Self::from_vec(iterable.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::collections::BTreeMap;

    #[rstest]
    fn from_vec_is_redrivable() {
        let generator = Generator::from_vec(vec![1, 2, 3]);
        assert_eq!(generator.to_vec().unwrap(), vec![1, 2, 3]);
        assert_eq!(generator.to_vec().unwrap(), vec![1, 2, 3]);
    }

    #[rstest]
    fn from_map_yields_pairs_in_enumeration_order() {
        let map = BTreeMap::from([("b".to_string(), 2), ("a".to_string(), 1)]);
        let pairs = Generator::from_map(map).to_vec().unwrap();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[rstest]
    fn from_fn_is_lazy() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let generator: Generator<i32> = Generator::from_fn(move |scope| {
            counter.set(counter.get() + 1);
            scope.yield_value(1)?;
            Ok(())
        });
        let _mapped = generator.map(|value| value + 1);
        assert_eq!(calls.get(), 0);

        generator.to_vec().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[rstest]
    fn with_params_lends_params_to_every_drive() {
        let generator = Generator::with_params(vec![3, 4], |params, scope| {
            for value in params {
                scope.yield_value(*value)?;
            }
            Ok(())
        });
        assert_eq!(generator.to_vec().unwrap(), vec![3, 4]);
        assert_eq!(generator.to_vec().unwrap(), vec![3, 4]);
    }

    #[rstest]
    fn empty_produces_nothing() {
        assert!(Generator::<i32>::empty().to_vec().unwrap().is_empty());
    }

    #[rstest]
    fn conversions_build_collection_generators() {
        let from_array: Generator<i32> = [1, 2].into();
        let collected: Generator<i32> = (5..7).collect();
        assert_eq!(from_array.to_vec().unwrap(), vec![1, 2]);
        assert_eq!(collected.to_vec().unwrap(), vec![5, 6]);
        assert_eq!(Generator::from_slice(&[9]).to_vec().unwrap(), vec![9]);
    }

    #[rstest]
    fn debug_output_is_opaque() {
        let generator = Generator::from_vec(vec![1]);
        assert_eq!(format!("{generator:?}"), "Generator { .. }");
    }
}
