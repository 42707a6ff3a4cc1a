//! Reminder domain record and recurrence arithmetic.
//!
//! # Responsibility
//! - Define the recurring reminder record and its frequency vocabulary.
//! - Own the period arithmetic used both at creation and on advancement.
//!
//! # Invariants
//! - `next_run` is always advanced from its prior value, never recomputed
//!   from the current time, so delivery drift never compounds.
//! - Only daily/weekly/monthly are schedulable; a persisted row with any
//!   other frequency text fires once and is then retired.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A recurring scheduled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Store-assigned global id.
    pub id: i64,
    pub frequency: Frequency,
    /// Timestamp of the next delivery.
    pub next_run: DateTime<Utc>,
    pub message: String,
    /// Opaque channel/target identifier consumed by the notifier.
    pub destination: String,
}

/// Recurrence vocabulary for reminders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    /// Frequency text not in the recognized vocabulary. Never accepted at
    /// scheduling time; a stored row carrying it is delivered once and then
    /// retired instead of rescheduled.
    Unrecognized(String),
}

impl Frequency {
    /// Strict boundary parser used when scheduling a reminder.
    ///
    /// Returns `None` for anything outside daily/weekly/monthly; the caller
    /// maps that to an `UnsupportedFrequency` error.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Lenient reader for persisted frequency text.
    ///
    /// Unknown values are preserved as [`Frequency::Unrecognized`] so the
    /// scheduler can still deliver and then retire such rows.
    pub fn from_stored(text: &str) -> Self {
        Self::parse(text).unwrap_or_else(|| Self::Unrecognized(text.to_string()))
    }

    /// Stored text form.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Unrecognized(text) => text,
        }
    }

    /// Returns `from` plus exactly one period of this frequency.
    ///
    /// Months are calendar months (day-of-month clamped at the short end);
    /// unrecognized frequencies have no period.
    pub fn advance(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Daily => Some(from + Duration::hours(24)),
            Self::Weekly => Some(from + Duration::days(7)),
            Self::Monthly => from.checked_add_months(Months::new(1)),
            Self::Unrecognized(_) => None,
        }
    }

    /// Whether this frequency reschedules after firing.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
