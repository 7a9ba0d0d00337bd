//! Error types for generator drives.
//!
//! Every failure that can reach the caller of a terminal operation is a
//! [`GeneratorError`]. The halt signal used by [`Stop`](super::Stop) is not an
//! error and never appears here, except as [`IterationError::DetachedHalt`]
//! when it escapes every drive that could absorb it.

use thiserror::Error;

/// Misbehaviour of a producing routine.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::IterationError;
///
/// assert_eq!(
///     IterationError::YieldAfterEnd.to_string(),
///     "yield after end of iteration"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IterationError {
    /// A routine tried to yield after its drive had stopped or ended.
    #[error("yield after end of iteration")]
    YieldAfterEnd,
    /// A halt signal was returned from outside the drive that issued it.
    #[error("stop signal escaped the drive that issued it")]
    DetachedHalt,
}

/// Values that cannot be used the way an operation requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Two sort keys have different runtime types or no defined order.
    #[error("cannot compare {left} and {right}")]
    Incomparable {
        /// Debug rendering of the left key.
        left: String,
        /// Debug rendering of the right key.
        right: String,
    },
    /// A dynamic value is neither an ordered collection nor a mapping.
    #[error("cannot build a generator from {found}")]
    NotIterable {
        /// Name of the offending value kind.
        found: &'static str,
    },
    /// Fixed routine parameters were not supplied as a list.
    #[error("params must be in array, found {found}")]
    ParamsNotList {
        /// Name of the offending value kind.
        found: &'static str,
    },
}

impl TypeError {
    /// Builds an [`TypeError::Incomparable`] from the two offending keys.
    pub fn incomparable<L: std::fmt::Debug + ?Sized, R: std::fmt::Debug + ?Sized>(
        left: &L,
        right: &R,
    ) -> Self {
        Self::Incomparable {
            left: format!("{left:?}"),
            right: format!("{right:?}"),
        }
    }
}

/// Unified error returned by terminal operations.
///
/// # Examples
///
/// ```rust
/// use lazyseq::generator::{GeneratorError, Generator, TypeError};
///
/// let mixed = Generator::from_vec(vec![1.0, f64::NAN]);
/// let result = mixed.sort_by(|x| *x).to_vec();
/// assert!(matches!(result, Err(GeneratorError::Type(TypeError::Incomparable { .. }))));
/// ```
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The producing routine broke the drive protocol.
    #[error(transparent)]
    Iteration(#[from] IterationError),
    /// A value had the wrong shape for the requested operation.
    #[error(transparent)]
    Type(#[from] TypeError),
    /// A producing routine failed with its own error.
    #[error("producer failed: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GeneratorError {
    /// Wraps an arbitrary error raised inside a producing routine.
    pub fn producer<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Producer(error.into())
    }

    /// Returns `true` for [`GeneratorError::Type`].
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    /// Returns `true` for [`GeneratorError::Iteration`].
    pub const fn is_iteration_error(&self) -> bool {
        matches!(self, Self::Iteration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn iteration_error_display() {
        assert_eq!(
            IterationError::YieldAfterEnd.to_string(),
            "yield after end of iteration"
        );
        assert_eq!(
            IterationError::DetachedHalt.to_string(),
            "stop signal escaped the drive that issued it"
        );
    }

    #[rstest]
    fn type_error_incomparable_uses_debug_rendering() {
        let error = TypeError::incomparable(&"a", &1);
        assert_eq!(error.to_string(), "cannot compare \"a\" and 1");
    }

    #[rstest]
    #[case(TypeError::NotIterable { found: "number" }, "cannot build a generator from number")]
    #[case(TypeError::ParamsNotList { found: "string" }, "params must be in array, found string")]
    fn type_error_display(#[case] error: TypeError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn generator_error_is_transparent_over_kinds() {
        let error = GeneratorError::from(IterationError::YieldAfterEnd);
        assert_eq!(error.to_string(), "yield after end of iteration");
        assert!(error.is_iteration_error());
        assert!(!error.is_type_error());
    }

    #[rstest]
    fn producer_error_keeps_source() {
        let error = GeneratorError::producer("disk on fire");
        assert_eq!(error.to_string(), "producer failed: disk on fire");
        let source = std::error::Error::source(&error).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("disk on fire"));
    }
}
