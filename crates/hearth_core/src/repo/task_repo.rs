//! Task list contracts and SQLite implementation.
//!
//! Tasks have no hierarchy and no completion state; removal is the whole
//! lifecycle. Removing an absent id is `NotFound` rather than a silent
//! no-op so the command surface has something to render.

use crate::model::task::Task;
use crate::model::{require_non_empty, ValidationError};
use crate::repo::{ensure_connection_ready, RecordRef, RepoError, RepoResult};
use rusqlite::Connection;

/// Repository interface for the flat task list.
pub trait TaskRepository {
    /// Inserts a task and returns its new id.
    fn add_task(&self, description: &str) -> RepoResult<i64>;
    /// Returns all tasks ordered by id.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Deletes one task; `NotFound` when the id does not exist.
    fn remove_task(&self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed task list.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["tasks"])?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn add_task(&self, description: &str) -> RepoResult<i64> {
        require_non_empty(description, ValidationError::EmptyDescription)?;

        self.conn.execute(
            "INSERT INTO tasks (description) VALUES (?1);",
            [description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, description FROM tasks ORDER BY id ASC;")?;

        let tasks = stmt
            .query_map([], |row| {
                Ok(Task {
                    id: row.get("id")?,
                    description: row.get("description")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    fn remove_task(&self, id: i64) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(RecordRef::Task(id)));
        }

        Ok(())
    }
}
