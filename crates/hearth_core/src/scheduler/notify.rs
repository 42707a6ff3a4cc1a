//! Consumed notification contract.
//!
//! The transport (chat session, webhook, …) lives outside the core; the
//! scheduler only needs a way to push one message to one destination and
//! learn whether it worked.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delivery capability consumed by the scheduler.
///
/// Implementations are expected to be cheap to call once per due reminder
/// per tick and must not block indefinitely.
pub trait Notifier {
    /// Delivers `message` to the opaque `destination`.
    fn deliver(&self, destination: &str, message: &str) -> Result<(), NotifyError>;
}

/// Failure reported by a notifier; treated as best-effort by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    message: String,
}

impl NotifyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification failed: {}", self.message)
    }
}

impl Error for NotifyError {}
