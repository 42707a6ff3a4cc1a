//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for chores, tasks and
//!   reminders.
//! - Isolate SQLite query details from service/scheduler orchestration.
//!
//! # Invariants
//! - Repository writes validate caller input before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repositories never cache rows across calls; the store is the single
//!   source of truth.

use crate::db::DbError;
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod chore_repo;
pub mod reminder_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Identifies the record a `NotFound` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    Chore(i64),
    SubChore { parent: i64, sub: i64 },
    Task(i64),
    Reminder(i64),
}

impl Display for RecordRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chore(id) => write!(f, "chore {id}"),
            Self::SubChore { parent, sub } => write!(f, "sub-chore {parent}.{sub}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Reminder(id) => write!(f, "reminder {id}"),
        }
    }
}

/// Repository error surfaced verbatim to the rendering layer.
#[derive(Debug)]
pub enum RepoError {
    /// Empty/malformed input, rejected before any mutation.
    Validation(ValidationError),
    /// Referenced record does not exist.
    NotFound(RecordRef),
    /// Frequency outside the schedulable daily/weekly/monthly vocabulary.
    UnsupportedFrequency(String),
    /// Underlying persistence failure; never swallowed.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing from the connected database.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(record) => write!(f, "{record} not found"),
            Self::UnsupportedFrequency(text) => write!(
                f,
                "unsupported frequency `{text}`; use daily, weekly, or monthly"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection was bootstrapped through `db::open_db` before a
/// repository accepts it: migrated schema version plus required tables.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in required_tables {
        let exists: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
             );",
            [table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

/// Truncates to the persisted millisecond precision.
pub(crate) fn to_epoch_ms(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

/// Reads a persisted epoch-millisecond timestamp back into a `DateTime`.
pub(crate) fn from_epoch_ms(ms: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| RepoError::InvalidData(format!("timestamp `{ms}` out of range in {column}")))
}
