//! Terminal operations.
//!
//! Each call runs one fresh drive and returns an ordinary value. Operations
//! that can answer early (`first`, `all`, `any`) stop the drive as soon as
//! the answer is known.

use super::{Generator, GeneratorError};
use crate::selector::Truthy;

impl<T: 'static, S: Default + 'static> Generator<T, S> {
    /// Collects every value in order.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    pub fn to_vec(&self) -> Result<Vec<T>, GeneratorError> {
        let mut values = Vec::new();
        self.for_each(|value, _, _| {
            values.push(value);
            Ok(S::default())
        })?;
        Ok(values)
    }

    /// Returns the first value, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::{Generator, count};
    ///
    /// assert_eq!(count(5).skip(2).first().unwrap(), Some(7));
    /// assert_eq!(Generator::<i32>::empty().first().unwrap(), None);
    /// ```
    pub fn first(&self) -> Result<Option<T>, GeneratorError> {
        let mut first = None;
        self.for_each(|value, _, stop| {
            first = Some(value);
            stop.halt()
        })?;
        Ok(first)
    }

    /// Returns `true` if `predicate` holds for every value.
    ///
    /// Stops at the first value for which it does not.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    pub fn all<P, B>(&self, predicate: P) -> Result<bool, GeneratorError>
    where
        P: Fn(&T) -> B,
        B: Truthy,
    {
        let mut result = true;
        self.for_each(|value, _, stop| {
            if !predicate(&value).is_truthy() {
                result = false;
                return stop.halt();
            }
            Ok(S::default())
        })?;
        Ok(result)
    }

    /// Returns `true` if every value is itself truthy.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    pub fn all_truthy(&self) -> Result<bool, GeneratorError>
    where
        T: Truthy,
    {
        self.all(|value| value.is_truthy())
    }

    /// Returns `true` if `predicate` holds for some value.
    ///
    /// Stops at the first value for which it does.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::count;
    ///
    /// // Terminates although the source is infinite.
    /// assert!(count(1).any(|value: &u32| value % 7 == 0).unwrap());
    /// ```
    pub fn any<P, B>(&self, predicate: P) -> Result<bool, GeneratorError>
    where
        P: Fn(&T) -> B,
        B: Truthy,
    {
        let mut result = false;
        self.for_each(|value, _, stop| {
            if predicate(&value).is_truthy() {
                result = true;
                return stop.halt();
            }
            Ok(S::default())
        })?;
        Ok(result)
    }

    /// Returns `true` if some value is itself truthy.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    pub fn any_truthy(&self) -> Result<bool, GeneratorError>
    where
        T: Truthy,
    {
        self.any(|value| value.is_truthy())
    }

    /// Counts the values. Never stops early.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    pub fn count(&self) -> Result<usize, GeneratorError> {
        let mut total = 0;
        self.for_each(|_, _, _| {
            total += 1;
            Ok(S::default())
        })?;
        Ok(total)
    }

    /// Combines the values with `function`, seeded by the first value.
    ///
    /// The first value is not passed through `function`. Returns `None` for
    /// an empty generator.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::{Generator, range};
    ///
    /// assert_eq!(range(1, 4).reduce(|a, b| a * b).unwrap(), Some(24));
    /// assert_eq!(Generator::<i32>::empty().reduce(|a, b| a + b).unwrap(), None);
    /// ```
    pub fn reduce<F>(&self, mut function: F) -> Result<Option<T>, GeneratorError>
    where
        F: FnMut(T, T) -> T,
    {
        let mut accumulator = None;
        self.for_each(|value, _, _| {
            accumulator = Some(match accumulator.take() {
                None => value,
                Some(current) => function(current, value),
            });
            Ok(S::default())
        })?;
        Ok(accumulator)
    }

    /// Combines the values with `function`, starting from `initial`.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the routine, if any.
    ///
    /// # Panics
    ///
    /// Panics only if `function` itself panics.
    pub fn fold<A, F>(&self, initial: A, mut function: F) -> Result<A, GeneratorError>
    where
        F: FnMut(A, T) -> A,
    {
        let mut accumulator = Some(initial);
        self.for_each(|value, _, _| {
            accumulator = accumulator.take().map(|current| function(current, value));
            Ok(S::default())
        })?;
        // Every step puts the accumulator back before returning, so the slot is
        // empty only while `function` runs.
        Ok(accumulator.expect("fold accumulator is restored after every step"))
    }
}
