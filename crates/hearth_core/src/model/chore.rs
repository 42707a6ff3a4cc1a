//! Chore and sub-chore domain records.
//!
//! # Responsibility
//! - Define the two-level chore hierarchy returned by the registry.
//! - Parse the flat `parent[.sub]` address syntax into a typed address.
//!
//! # Invariants
//! - Chore ids are globally unique; sub-chore ids are unique only within
//!   their parent (two chores may each own a sub-chore `1`).
//! - `completed_at` and `completed_by` are always set together.
//! - Address parsing splits on the **first** `.`; a chore id itself can
//!   therefore never contain a dot.

use super::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A household chore with its owned sub-chores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    /// Store-assigned id; monotonically increasing, never reused.
    pub id: i64,
    pub description: String,
    /// Set when the chore was marked done. Absent means pending.
    pub completed_at: Option<DateTime<Utc>>,
    /// Who marked the chore done. Present iff `completed_at` is present.
    pub completed_by: Option<String>,
    /// Owned children, ordered by sub-chore id. Deleted with the parent.
    pub sub_chores: Vec<SubChore>,
}

/// A child task scoped to exactly one chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubChore {
    /// Unique within the parent chore only.
    pub id: i64,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<String>,
}

impl Chore {
    /// Returns whether this chore has been marked done.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

impl SubChore {
    /// Returns whether this sub-chore has been marked done.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Typed target of a completion request.
///
/// Parsed once at the boundary from the command-surface text form
/// (`"4"` or `"4.2"`); the core never threads raw address strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoreAddress {
    /// A top-level chore.
    Chore(i64),
    /// A sub-chore addressed through its parent.
    Sub { parent: i64, sub: i64 },
}

impl ChoreAddress {
    /// Parses `"N"` or `"N.M"` address text.
    ///
    /// The text is split on the first `.`: its presence selects the
    /// sub-chore path, its absence the chore path. Ids must be positive
    /// integers.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        match trimmed.split_once('.') {
            Some((parent, sub)) => {
                let parent = parse_id(parent).ok_or_else(|| malformed(raw))?;
                let sub = parse_id(sub).ok_or_else(|| malformed(raw))?;
                Ok(Self::Sub { parent, sub })
            }
            None => {
                let id = parse_id(trimmed).ok_or_else(|| malformed(raw))?;
                Ok(Self::Chore(id))
            }
        }
    }
}

impl Display for ChoreAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chore(id) => write!(f, "{id}"),
            Self::Sub { parent, sub } => write!(f, "{parent}.{sub}"),
        }
    }
}

fn parse_id(text: &str) -> Option<i64> {
    let id = text.parse::<i64>().ok()?;
    if id <= 0 {
        return None;
    }
    Some(id)
}

fn malformed(raw: &str) -> ValidationError {
    ValidationError::MalformedAddress(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::ChoreAddress;
    use crate::model::ValidationError;

    #[test]
    fn bare_id_selects_chore_path() {
        assert_eq!(ChoreAddress::parse("7").unwrap(), ChoreAddress::Chore(7));
        assert_eq!(ChoreAddress::parse(" 12 ").unwrap(), ChoreAddress::Chore(12));
    }

    #[test]
    fn dotted_id_selects_sub_chore_path() {
        assert_eq!(
            ChoreAddress::parse("4.2").unwrap(),
            ChoreAddress::Sub { parent: 4, sub: 2 }
        );
    }

    #[test]
    fn split_happens_on_first_dot() {
        // "1.2.3" splits into parent "1" and sub "2.3"; the remainder is not
        // an integer, so the address is rejected rather than re-split.
        let err = ChoreAddress::parse("1.2.3").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedAddress(_)));
    }

    #[test]
    fn rejects_empty_nonnumeric_and_nonpositive_ids() {
        for raw in ["", "  ", "abc", "4.", ".2", "0", "-3", "2.-1", "2.0"] {
            let err = ChoreAddress::parse(raw).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedAddress(_)),
                "expected malformed address for {raw:?}"
            );
        }
    }

    #[test]
    fn display_round_trips_address_text() {
        for raw in ["5", "5.1"] {
            let addr = ChoreAddress::parse(raw).unwrap();
            assert_eq!(addr.to_string(), raw);
        }
    }
}
