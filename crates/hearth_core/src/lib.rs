//! Core domain logic for Hearth, a household coordination bot.
//!
//! This crate owns the chore hierarchy and completion state machine, the
//! flat task list, and the recurring-reminder scheduling engine, all backed
//! by one SQLite store. Chat transport, command-text parsing and process
//! bootstrap live outside; they hand this crate typed operations and render
//! the results.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scheduler;
pub mod service;

pub use logging::init_logging;
pub use model::chore::{Chore, ChoreAddress, SubChore};
pub use model::reminder::{Frequency, Reminder};
pub use model::task::Task;
pub use model::ValidationError;
pub use repo::chore_repo::{ChoreRepository, SqliteChoreRepository, COMPLETED_RETENTION_HOURS};
pub use repo::reminder_repo::{AdvanceOutcome, ReminderRepository, SqliteReminderRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RecordRef, RepoError, RepoResult};
pub use scheduler::{Notifier, NotifyError, Scheduler, TickSummary};
pub use service::chore_service::ChoreService;
pub use service::reminder_service::ReminderService;
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
