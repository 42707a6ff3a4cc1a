//! Chore registry contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD plus two-level completion state over `chores` and
//!   `sub_chores`.
//! - Own the time-based pruning policy for completed chores.
//!
//! # Invariants
//! - Chore listing is deterministic: chore id ASC, then sub-chore id ASC.
//! - Completion is idempotent; re-completing overwrites timestamp and actor.
//! - Pruning cascades to sub-chores regardless of their own completion
//!   state (FK cascade, so `foreign_keys=ON` is required).

use crate::model::chore::{Chore, ChoreAddress, SubChore};
use crate::model::{require_non_empty, ValidationError};
use crate::repo::{
    ensure_connection_ready, from_epoch_ms, to_epoch_ms, RecordRef, RepoError, RepoResult,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, Row};

/// How long completed chores are kept before the scheduler prunes them.
pub const COMPLETED_RETENTION_HOURS: i64 = 72;

/// Repository interface for the chore registry.
pub trait ChoreRepository {
    /// Inserts a pending chore and returns its new id.
    fn add_chore(&self, description: &str) -> RepoResult<i64>;
    /// Inserts a sub-chore under an existing parent and returns its id,
    /// which is unique only within that parent.
    fn add_sub_chore(&self, parent_id: i64, description: &str) -> RepoResult<i64>;
    /// Returns all chores (pending and completed) with their full sub-chore
    /// sets; callers render status by checking `completed_at`.
    fn list_chores(&self) -> RepoResult<Vec<Chore>>;
    /// Marks the addressed chore or sub-chore done by `actor` at `now`.
    fn complete_chore(&self, address: ChoreAddress, actor: &str, now: DateTime<Utc>)
        -> RepoResult<()>;
    /// Deletes chores completed longer than the retention window before
    /// `now`, cascading their sub-chores. Returns the number of chores
    /// removed; nothing to prune is success.
    fn prune_completed(&self, now: DateTime<Utc>) -> RepoResult<usize>;
}

/// SQLite-backed chore registry.
pub struct SqliteChoreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChoreRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["chores", "sub_chores"])?;
        Ok(Self { conn })
    }
}

impl ChoreRepository for SqliteChoreRepository<'_> {
    fn add_chore(&self, description: &str) -> RepoResult<i64> {
        require_non_empty(description, ValidationError::EmptyDescription)?;

        self.conn.execute(
            "INSERT INTO chores (description) VALUES (?1);",
            [description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_sub_chore(&self, parent_id: i64, description: &str) -> RepoResult<i64> {
        require_non_empty(description, ValidationError::EmptyDescription)?;

        let parent_exists: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM chores WHERE id = ?1);",
            [parent_id],
            |row| row.get(0),
        )?;
        if !parent_exists {
            return Err(RepoError::NotFound(RecordRef::Chore(parent_id)));
        }

        // Single statement, so the per-parent id assignment is atomic at the
        // store level. The first sub-chore of every parent gets id 1.
        self.conn.execute(
            "INSERT INTO sub_chores (parent_id, id, description)
             SELECT ?1, COALESCE(MAX(id), 0) + 1, ?2
             FROM sub_chores
             WHERE parent_id = ?1;",
            params![parent_id, description],
        )?;

        let sub_id = self.conn.query_row(
            "SELECT id FROM sub_chores WHERE rowid = ?1;",
            [self.conn.last_insert_rowid()],
            |row| row.get(0),
        )?;
        Ok(sub_id)
    }

    fn list_chores(&self) -> RepoResult<Vec<Chore>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, completed_at, completed_by
             FROM chores
             ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut chores = Vec::new();
        while let Some(row) = rows.next()? {
            let id: i64 = row.get("id")?;
            let (completed_at, completed_by) = parse_completion(row, "chores")?;
            chores.push(Chore {
                id,
                description: row.get("description")?,
                completed_at,
                completed_by,
                sub_chores: self.load_sub_chores(id)?,
            });
        }

        Ok(chores)
    }

    fn complete_chore(
        &self,
        address: ChoreAddress,
        actor: &str,
        now: DateTime<Utc>,
    ) -> RepoResult<()> {
        require_non_empty(actor, ValidationError::EmptyActor)?;
        let completed_at = to_epoch_ms(now);

        let changed = match address {
            ChoreAddress::Chore(id) => self.conn.execute(
                "UPDATE chores SET completed_at = ?1, completed_by = ?2 WHERE id = ?3;",
                params![completed_at, actor, id],
            )?,
            ChoreAddress::Sub { parent, sub } => self.conn.execute(
                "UPDATE sub_chores
                 SET completed_at = ?1, completed_by = ?2
                 WHERE parent_id = ?3 AND id = ?4;",
                params![completed_at, actor, parent, sub],
            )?,
        };

        if changed == 0 {
            return Err(RepoError::NotFound(match address {
                ChoreAddress::Chore(id) => RecordRef::Chore(id),
                ChoreAddress::Sub { parent, sub } => RecordRef::SubChore { parent, sub },
            }));
        }

        Ok(())
    }

    fn prune_completed(&self, now: DateTime<Utc>) -> RepoResult<usize> {
        let cutoff = to_epoch_ms(now - Duration::hours(COMPLETED_RETENTION_HOURS));
        let pruned = self.conn.execute(
            "DELETE FROM chores WHERE completed_at IS NOT NULL AND completed_at < ?1;",
            [cutoff],
        )?;
        Ok(pruned)
    }
}

impl SqliteChoreRepository<'_> {
    fn load_sub_chores(&self, parent_id: i64) -> RepoResult<Vec<SubChore>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, completed_at, completed_by
             FROM sub_chores
             WHERE parent_id = ?1
             ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([parent_id])?;
        let mut sub_chores = Vec::new();
        while let Some(row) = rows.next()? {
            let (completed_at, completed_by) = parse_completion(row, "sub_chores")?;
            sub_chores.push(SubChore {
                id: row.get("id")?,
                description: row.get("description")?,
                completed_at,
                completed_by,
            });
        }

        Ok(sub_chores)
    }
}

/// Reads the completion pair, rejecting half-completed rows.
fn parse_completion(
    row: &Row<'_>,
    table: &str,
) -> RepoResult<(Option<DateTime<Utc>>, Option<String>)> {
    let completed_at_ms: Option<i64> = row.get("completed_at")?;
    let completed_by: Option<String> = row.get("completed_by")?;

    match (completed_at_ms, completed_by) {
        (Some(ms), Some(actor)) => {
            let at = from_epoch_ms(ms, &format!("{table}.completed_at"))?;
            Ok((Some(at), Some(actor)))
        }
        (None, None) => Ok((None, None)),
        _ => Err(RepoError::InvalidData(format!(
            "half-completed row in {table}: completed_at and completed_by must be set together"
        ))),
    }
}
