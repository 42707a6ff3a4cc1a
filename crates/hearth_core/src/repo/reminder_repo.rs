//! Reminder persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist recurring reminders and answer the scheduler's due-scan.
//! - Advance or retire reminders after delivery.
//!
//! # Invariants
//! - `next_run` advances by one period from its prior persisted value; the
//!   call time never enters the computation, so drift does not compound.
//! - Due scans return rows ascending by id for deterministic delivery.
//! - Advancing an id that no longer exists is a no-op success: the only
//!   caller is the tick driver, where a missing row means a racing advance
//!   already handled it.

use crate::model::reminder::{Frequency, Reminder};
use crate::model::{require_non_empty, ValidationError};
use crate::repo::{
    ensure_connection_ready, from_epoch_ms, to_epoch_ms, RepoError, RepoResult,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const REMINDER_SELECT_SQL: &str = "SELECT id, frequency, next_run, message, destination
FROM reminders";

/// Outcome of advancing a reminder after it fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// `next_run` moved forward by one period of the stored frequency.
    Rescheduled(DateTime<Utc>),
    /// Stored frequency is not recurring; the row was deleted.
    Retired,
    /// The id no longer exists; nothing to do.
    Missing,
}

/// Repository interface for reminder scheduling state.
pub trait ReminderRepository {
    /// Persists a reminder whose first delivery is one period after `now`.
    fn add_reminder(
        &self,
        frequency: Frequency,
        message: &str,
        destination: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Reminder>;
    /// Returns every reminder with `next_run <= now`, ascending by id.
    fn due_reminders(&self, now: DateTime<Utc>) -> RepoResult<Vec<Reminder>>;
    /// Returns all reminders ascending by id.
    fn list_reminders(&self) -> RepoResult<Vec<Reminder>>;
    /// Moves a fired reminder forward one period, or retires it when its
    /// stored frequency is not recurring.
    fn advance_reminder(&self, id: i64) -> RepoResult<AdvanceOutcome>;
}

/// SQLite-backed reminder store.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["reminders"])?;
        Ok(Self { conn })
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn add_reminder(
        &self,
        frequency: Frequency,
        message: &str,
        destination: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<Reminder> {
        require_non_empty(message, ValidationError::EmptyMessage)?;
        require_non_empty(destination, ValidationError::EmptyDestination)?;

        let next_run = frequency
            .advance(now)
            .ok_or_else(|| RepoError::UnsupportedFrequency(frequency.as_str().to_string()))?;
        let next_run_ms = to_epoch_ms(next_run);

        self.conn.execute(
            "INSERT INTO reminders (frequency, next_run, message, destination)
             VALUES (?1, ?2, ?3, ?4);",
            params![frequency.as_str(), next_run_ms, message, destination],
        )?;

        Ok(Reminder {
            id: self.conn.last_insert_rowid(),
            frequency,
            next_run: from_epoch_ms(next_run_ms, "reminders.next_run")?,
            message: message.to_string(),
            destination: destination.to_string(),
        })
    }

    fn due_reminders(&self, now: DateTime<Utc>) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REMINDER_SELECT_SQL}
             WHERE next_run <= ?1
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([to_epoch_ms(now)])?;
        collect_reminders(&mut rows)
    }

    fn list_reminders(&self) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        collect_reminders(&mut rows)
    }

    fn advance_reminder(&self, id: i64) -> RepoResult<AdvanceOutcome> {
        let current = self
            .conn
            .query_row(
                "SELECT frequency, next_run FROM reminders WHERE id = ?1;",
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>("frequency")?,
                        row.get::<_, i64>("next_run")?,
                    ))
                },
            )
            .optional()?;

        let Some((frequency_text, next_run_ms)) = current else {
            return Ok(AdvanceOutcome::Missing);
        };

        let frequency = Frequency::from_stored(&frequency_text);
        let prior = from_epoch_ms(next_run_ms, "reminders.next_run")?;

        match frequency.advance(prior) {
            Some(next_run) => {
                self.conn.execute(
                    "UPDATE reminders SET next_run = ?1 WHERE id = ?2;",
                    params![to_epoch_ms(next_run), id],
                )?;
                Ok(AdvanceOutcome::Rescheduled(next_run))
            }
            None => {
                self.conn
                    .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
                Ok(AdvanceOutcome::Retired)
            }
        }
    }
}

fn collect_reminders(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Reminder>> {
    let mut reminders = Vec::new();
    while let Some(row) = rows.next()? {
        reminders.push(parse_reminder_row(row)?);
    }
    Ok(reminders)
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let frequency_text: String = row.get("frequency")?;
    Ok(Reminder {
        id: row.get("id")?,
        frequency: Frequency::from_stored(&frequency_text),
        next_run: from_epoch_ms(row.get("next_run")?, "reminders.next_run")?,
        message: row.get("message")?,
        destination: row.get("destination")?,
    })
}
