//! Conversions between generators and plain collections.
//!
//! [`IntoGenerator`] lets APIs such as [`Scope::yield_many`](super::Scope::yield_many)
//! and [`Generator::and`] accept either a generator or a raw collection.
//! [`Materialize`] is the reverse direction: code that may hold either a
//! vector or a generator can collect it without knowing which.

use super::{Generator, GeneratorError};

/// Anything that can be viewed as a [`Generator`].
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::{Generator, IntoGenerator};
///
/// let generator = vec![1, 2].into_generator();
/// assert_eq!(generator.to_vec().unwrap(), vec![1, 2]);
/// ```
pub trait IntoGenerator<T> {
    /// Wraps `self` as a generator. Generators are returned as is.
    fn into_generator(self) -> Generator<T>;
}

impl<T> IntoGenerator<T> for Generator<T> {
    #[inline]
    fn into_generator(self) -> Generator<T> {
        self
    }
}

impl<T> IntoGenerator<T> for &Generator<T> {
    #[inline]
    fn into_generator(self) -> Generator<T> {
        self.clone()
    }
}

impl<T: Clone + 'static> IntoGenerator<T> for Vec<T> {
    fn into_generator(self) -> Generator<T> {
        Generator::from_vec(self)
    }
}

impl<T: Clone + 'static> IntoGenerator<T> for &[T] {
    fn into_generator(self) -> Generator<T> {
        Generator::from_slice(self)
    }
}

impl<T: Clone + 'static, const N: usize> IntoGenerator<T> for [T; N] {
    fn into_generator(self) -> Generator<T> {
        Generator::from_vec(self.into())
    }
}

/// Collects a sequence into a vector, whether or not it is lazy.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::{Generator, Materialize};
///
/// fn total<M: Materialize<i32>>(values: &M) -> i32 {
///     values.materialize().unwrap().into_iter().sum()
/// }
///
/// assert_eq!(total(&vec![1, 2, 3]), 6);
/// assert_eq!(total(&Generator::from_vec(vec![4, 5])), 9);
/// ```
pub trait Materialize<T> {
    /// Returns every value of the sequence in order.
    ///
    /// # Errors
    ///
    /// Returns the error raised while driving a lazy sequence. Collections
    /// never fail.
    fn materialize(&self) -> Result<Vec<T>, GeneratorError>;
}

impl<T: Clone> Materialize<T> for Vec<T> {
    fn materialize(&self) -> Result<Vec<T>, GeneratorError> {
        Ok(self.clone())
    }
}

impl<T: Clone> Materialize<T> for [T] {
    fn materialize(&self) -> Result<Vec<T>, GeneratorError> {
        Ok(self.to_vec())
    }
}

impl<T: 'static, S: Default + 'static> Materialize<T> for Generator<T, S> {
    fn materialize(&self) -> Result<Vec<T>, GeneratorError> {
        self.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generator_into_generator_shares_the_routine() {
        let generator = Generator::from_vec(vec![1]);
        let same = (&generator).into_generator();
        assert_eq!(same.to_vec().unwrap(), vec![1]);
    }

    #[rstest]
    fn raw_collections_are_wrapped() {
        assert_eq!([1, 2].into_generator().to_vec().unwrap(), vec![1, 2]);
        let slice: &[i32] = &[3];
        assert_eq!(slice.into_generator().to_vec().unwrap(), vec![3]);
    }

    #[rstest]
    fn materialize_is_identity_for_collections() {
        let values = vec!["x", "y"];
        assert_eq!(values.materialize().unwrap(), values);
        assert_eq!(values[..1].materialize().unwrap(), vec!["x"]);
    }
}
