//! The drive protocol: continuation capabilities and the halt signal.
//!
//! A *drive* is one run of a producing routine from its start to its natural
//! end or to a halt. Values are pushed to a consumer closure; the consumer's
//! return value and any early-termination request travel back up through the
//! same call stack as an ordinary [`Result`].
//!
//! # Capabilities
//!
//! A producing routine receives a [`Scope`] exposing three capabilities:
//!
//! - [`Scope::yield_value`]: deliver one value downstream
//! - [`Scope::yield_many`]: delegate to another generator
//! - [`Scope::stop`]: end this drive early
//!
//! Consumers receive a [`Stop`] bound to the drive that invoked them.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::generator::Generator;
//!
//! let squares = Generator::from_fn(|scope| {
//!     for base in 1..=3 {
//!         scope.yield_value(base * base)?;
//!     }
//!     Ok(())
//! });
//!
//! let mut seen = Vec::new();
//! squares
//!     .for_each(|value, index, _stop| {
//!         seen.push((index, value));
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(seen, vec![(0, 1), (1, 4), (2, 9)]);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{GeneratorError, IterationError, TypeError};
use super::interop::IntoGenerator;

/// Result of a single step of the drive protocol.
///
/// `Ok` carries the consumer's feedback; `Err` carries an [`Interrupt`], which
/// is either the halt signal of some drive or a genuine failure. Propagate it
/// with `?`.
pub type Flow<R = ()> = Result<R, Interrupt>;

/// A producing routine as stored inside a generator.
pub(crate) type Routine<T, S> = dyn Fn(&mut Scope<'_, T, S>) -> Flow;

static NEXT_DRIVE_ID: AtomicU64 = AtomicU64::new(0);

/// Per-drive state shared between the drive boundary and its [`Stop`].
#[derive(Debug)]
struct DriveState {
    id: u64,
    stopped: Cell<bool>,
}

impl DriveState {
    fn new() -> Self {
        Self {
            id: NEXT_DRIVE_ID.fetch_add(1, Ordering::Relaxed),
            stopped: Cell::new(false),
        }
    }
}

/// Marks the drive stopped on every exit path, unwinding included.
struct FinishGuard(Rc<DriveState>);

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.0.stopped.set(true);
    }
}

enum Signal {
    Halt(Rc<DriveState>),
    Fail(GeneratorError),
}

/// The error half of [`Flow`].
///
/// An `Interrupt` is either the halt signal raised by [`Stop::halt`] or a
/// [`GeneratorError`]. The halt variant cannot be constructed or inspected
/// from outside this crate; it is absorbed by the drive that issued it.
pub struct Interrupt(Signal);

impl Interrupt {
    /// Creates an interrupt that fails the drive with `error`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::generator::{Generator, GeneratorError, Interrupt};
    ///
    /// let failing: Generator<i32> = Generator::from_fn(|scope| {
    ///     scope.yield_value(1)?;
    ///     Err(Interrupt::fail(GeneratorError::producer("sensor offline")))
    /// });
    ///
    /// let error = failing.to_vec().unwrap_err();
    /// assert_eq!(error.to_string(), "producer failed: sensor offline");
    /// ```
    pub fn fail(error: impl Into<GeneratorError>) -> Self {
        Self(Signal::Fail(error.into()))
    }

    /// Returns `true` if this is a halt signal rather than a failure.
    pub const fn is_halt(&self) -> bool {
        matches!(self.0, Signal::Halt(_))
    }

    /// Converts the interrupt into the error seen by a top-level caller.
    ///
    /// A halt signal that reaches this point escaped its own drive and is
    /// reported as [`IterationError::DetachedHalt`].
    pub fn into_error(self) -> GeneratorError {
        match self.0 {
            Signal::Fail(error) => error,
            Signal::Halt(owner) => {
                tracing::debug!(drive = owner.id, "halt signal escaped its drive");
                IterationError::DetachedHalt.into()
            }
        }
    }
}

impl From<GeneratorError> for Interrupt {
    fn from(error: GeneratorError) -> Self {
        Self::fail(error)
    }
}

impl From<IterationError> for Interrupt {
    fn from(error: IterationError) -> Self {
        Self::fail(error)
    }
}

impl From<TypeError> for Interrupt {
    fn from(error: TypeError) -> Self {
        Self::fail(error)
    }
}

impl fmt::Debug for Interrupt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Signal::Halt(owner) => formatter
                .debug_tuple("Interrupt::Halt")
                .field(&owner.id)
                .finish(),
            Signal::Fail(error) => formatter.debug_tuple("Interrupt::Fail").field(error).finish(),
        }
    }
}

/// Capability to end the drive that invoked a consumer.
///
/// A `Stop` is only ever lent to a consumer for the duration of one call, so
/// it always refers to a drive that is still on the stack.
pub struct Stop {
    state: Rc<DriveState>,
}

impl Stop {
    /// Ends the owning drive.
    ///
    /// The drive is marked stopped immediately; the returned signal must be
    /// propagated (usually with `return` or `?`) so the owning drive can
    /// unwind. Any later attempt to yield into that drive fails with
    /// [`IterationError::YieldAfterEnd`].
    pub fn halt<U>(&self) -> Flow<U> {
        self.state.stopped.set(true);
        tracing::trace!(drive = self.state.id, "halt requested");
        Err(Interrupt(Signal::Halt(Rc::clone(&self.state))))
    }

    /// Returns `true` once the owning drive has stopped or ended.
    pub fn is_stopped(&self) -> bool {
        self.state.stopped.get()
    }
}

impl fmt::Debug for Stop {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Stop")
            .field("drive", &self.state.id)
            .field("stopped", &self.state.stopped.get())
            .finish()
    }
}

/// The continuation capabilities handed to a producing routine.
///
/// A `Scope` lives for exactly one drive. Its index counter and stopped flag
/// are never shared with another drive of the same generator.
pub struct Scope<'a, T, S = ()> {
    consumer: &'a mut dyn FnMut(T, usize, &Stop) -> Flow<S>,
    stop: Stop,
    index: usize,
}

impl<T: 'static, S: 'static> Scope<'_, T, S> {
    /// Delivers `value` to the consumer and returns the consumer's feedback.
    ///
    /// # Errors
    ///
    /// Returns [`IterationError::YieldAfterEnd`] if this drive has already
    /// stopped, and otherwise whatever the consumer returned, including the
    /// halt signal of this or an enclosing drive.
    pub fn yield_value(&mut self, value: T) -> Flow<S> {
        if self.stop.is_stopped() {
            tracing::debug!(drive = self.stop.state.id, "yield after end of iteration");
            return Err(IterationError::YieldAfterEnd.into());
        }
        let feedback = (self.consumer)(value, self.index, &self.stop)?;
        self.index += 1;
        Ok(feedback)
    }

    /// Drives `source` to completion, forwarding each of its values through
    /// [`yield_value`](Self::yield_value).
    ///
    /// Raw collections are wrapped on the fly. The feedback of the downstream
    /// consumer is discarded.
    ///
    /// # Errors
    ///
    /// Propagates every interrupt raised while forwarding.
    pub fn yield_many<G>(&mut self, source: G) -> Flow
    where
        G: IntoGenerator<T>,
    {
        source.into_generator().drive(|value, _, _| {
            self.yield_value(value)?;
            Ok(())
        })
    }

    /// Ends this drive early.
    ///
    /// Return the result (`return scope.stop();`) so the signal reaches the
    /// drive boundary.
    pub fn stop<U>(&self) -> Flow<U> {
        self.stop.halt()
    }

    /// Number of values delivered so far in this drive.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` once this drive has stopped.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

impl<T, S> fmt::Debug for Scope<'_, T, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Scope")
            .field("drive", &self.stop.state.id)
            .field("index", &self.index)
            .field("stopped", &self.stop.is_stopped())
            .finish_non_exhaustive()
    }
}

/// Runs `routine` once against `consumer`.
///
/// The halt signal owned by this drive is absorbed; every other interrupt is
/// returned unchanged.
pub(crate) fn run<T, S>(
    routine: &Routine<T, S>,
    consumer: &mut dyn FnMut(T, usize, &Stop) -> Flow<S>,
) -> Flow {
    let state = Rc::new(DriveState::new());
    let _finish = FinishGuard(Rc::clone(&state));
    tracing::trace!(drive = state.id, "drive started");

    let mut scope = Scope {
        consumer,
        stop: Stop {
            state: Rc::clone(&state),
        },
        index: 0,
    };
    let outcome = routine(&mut scope);
    let emitted = scope.index;

    match outcome {
        Err(Interrupt(Signal::Halt(owner))) if Rc::ptr_eq(&owner, &state) => {
            tracing::trace!(drive = state.id, emitted, "drive halted");
            Ok(())
        }
        other => {
            tracing::trace!(drive = state.id, emitted, ok = other.is_ok(), "drive finished");
            other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use rstest::rstest;
    use std::cell::RefCell;

    #[rstest]
    fn yield_value_returns_consumer_feedback() {
        let replies = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&replies);
        let echo: Generator<i32, i32> = Generator::from_feedback_fn(move |scope| {
            for value in 1..=3 {
                let reply = scope.yield_value(value)?;
                recorded.borrow_mut().push(reply);
            }
            Ok(())
        });

        echo.for_each(|value, _, _| Ok(value * 10)).unwrap();
        assert_eq!(*replies.borrow(), vec![10, 20, 30]);
    }

    #[rstest]
    fn indices_restart_on_every_drive() {
        let generator = Generator::from_vec(vec!['a', 'b']);
        for _ in 0..2 {
            let mut indices = Vec::new();
            generator
                .for_each(|_, index, _| {
                    indices.push(index);
                    Ok(())
                })
                .unwrap();
            assert_eq!(indices, vec![0, 1]);
        }
    }

    #[rstest]
    fn stop_is_absorbed_by_the_owning_drive() {
        let generator = Generator::from_vec(vec![1, 2, 3]);
        let mut seen = Vec::new();
        let result = generator.for_each(|value, _, stop| {
            seen.push(value);
            if value == 2 { stop.halt() } else { Ok(()) }
        });
        assert!(result.is_ok());
        assert_eq!(seen, vec![1, 2]);
    }

    #[rstest]
    fn yield_after_swallowed_halt_is_an_iteration_error() {
        let stubborn: Generator<i32> = Generator::from_fn(|scope| {
            let _ignored = scope.yield_value(1);
            scope.yield_value(2)
        });

        let error = stubborn.for_each(|_, _, stop| stop.halt()).unwrap_err();
        assert!(matches!(
            error,
            GeneratorError::Iteration(IterationError::YieldAfterEnd)
        ));
    }

    #[rstest]
    fn routine_stop_ends_the_drive_without_error() {
        let generator: Generator<i32> = Generator::from_fn(|scope| {
            scope.yield_value(1)?;
            scope.stop::<()>()?;
            scope.yield_value(2)?;
            Ok(())
        });
        assert_eq!(generator.to_vec().unwrap(), vec![1]);
    }

    #[rstest]
    fn yield_many_forwards_collections_and_generators() {
        let tail = Generator::from_vec(vec![4, 5]);
        let spliced: Generator<i32> = Generator::from_fn(move |scope| {
            scope.yield_many(vec![1, 2])?;
            scope.yield_value(3)?;
            scope.yield_many(&tail)
        });

        let mut seen = Vec::new();
        spliced
            .for_each(|value, index, _| {
                seen.push((index, value));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
    }

    #[rstest]
    fn scope_reports_progress() {
        let generator: Generator<usize> = Generator::from_fn(|scope| {
            while scope.index() < 3 {
                let next = scope.index();
                scope.yield_value(next)?;
            }
            assert!(!scope.is_stopped());
            Ok(())
        });
        assert_eq!(generator.to_vec().unwrap(), vec![0, 1, 2]);
    }

    #[rstest]
    fn interrupt_debug_names_the_variant() {
        let failure = Interrupt::fail(IterationError::YieldAfterEnd);
        assert!(format!("{failure:?}").starts_with("Interrupt::Fail"));
        assert!(!failure.is_halt());
    }
}
