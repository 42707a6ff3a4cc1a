//! Domain model for the household coordination core.
//!
//! # Responsibility
//! - Define the canonical chore/task/reminder records.
//! - Own input validation that must reject bad data before any mutation.
//!
//! # Invariants
//! - Record identity is store-assigned; models never invent ids.
//! - `completed_by` is set if and only if `completed_at` is set.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod chore;
pub mod reminder;
pub mod task;

/// Rejection of empty or malformed caller input.
///
/// Raised before any store mutation; a failed validation never leaves a
/// partial write behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Chore/sub-chore/task description is empty or whitespace-only.
    EmptyDescription,
    /// Completion actor identifier is empty.
    EmptyActor,
    /// Reminder message is empty.
    EmptyMessage,
    /// Reminder destination is empty.
    EmptyDestination,
    /// Chore address text does not name a chore or sub-chore.
    MalformedAddress(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description cannot be empty"),
            Self::EmptyActor => write!(f, "actor cannot be empty"),
            Self::EmptyMessage => write!(f, "reminder message cannot be empty"),
            Self::EmptyDestination => write!(f, "reminder destination cannot be empty"),
            Self::MalformedAddress(raw) => write!(f, "malformed chore address `{raw}`"),
        }
    }
}

impl Error for ValidationError {}

/// Validates free-text fields that must carry content.
pub(crate) fn require_non_empty(
    value: &str,
    error: ValidationError,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}
