//! Guard predicates for controlling counter operations.
//!
//! Guards are pure boolean functions over a state value. They decide whether
//! an operation takes effect; a failing guard makes the operation inert.

use super::model::{CounterState, Mode};
use std::marker::PhantomData;

/// Pure predicate that determines if an operation can execute.
///
/// # Example
///
/// ```rust
/// use tally::core::{CounterState, Guard};
///
/// let nonzero = Guard::new(|s: &CounterState| s.count > 0);
///
/// assert!(!nonzero.check(&CounterState::default()));
/// ```
pub struct Guard<S> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Evaluate the predicate (pure).
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

/// Increment is allowed while below the ceiling in limited mode, and while
/// the count still fits otherwise.
pub fn can_increment() -> Guard<CounterState> {
    Guard::new(|s: &CounterState| match s.mode {
        Mode::Unlimited => s.count < u32::MAX,
        Mode::Limited => s.count < s.max_limit,
    })
}

/// Decrement is allowed while the count is positive.
pub fn can_decrement() -> Guard<CounterState> {
    Guard::new(|s: &CounterState| s.count > 0)
}
