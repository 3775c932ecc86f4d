//! One-shot loading delay.

use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};

/// Deadline that ends the loading phase.
///
/// Dropping the timer cancels it; nothing fires afterwards.
#[derive(Debug)]
pub struct LoadingTimer {
    deadline: Instant,
    sleep: Pin<Box<Sleep>>,
}

impl LoadingTimer {
    /// Start the timer. Must be called inside a tokio runtime.
    pub fn start(delay: Duration) -> Self {
        let deadline = Instant::now() + delay;
        Self {
            deadline,
            sleep: Box::pin(sleep_until(deadline)),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the deadline has passed (non-blocking).
    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Wait for the deadline.
    pub async fn elapsed(&mut self) {
        self.sleep.as_mut().await;
    }
}
