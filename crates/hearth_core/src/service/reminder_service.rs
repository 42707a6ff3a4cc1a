//! Reminder scheduling use-case service.
//!
//! The frequency vocabulary is parsed here, strictly, so an unsupported
//! value is rejected before any mutation and the core never threads raw
//! frequency text further down.

use crate::model::reminder::{Frequency, Reminder};
use crate::repo::reminder_repo::ReminderRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::Utc;

/// Use-case wrapper over reminder scheduling.
pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Schedules a reminder; first delivery is one period from now.
    ///
    /// # Errors
    /// - `UnsupportedFrequency` unless `frequency` is daily/weekly/monthly.
    /// - `Validation` when message or destination is empty.
    pub fn schedule(
        &self,
        frequency: &str,
        message: &str,
        destination: &str,
    ) -> RepoResult<Reminder> {
        let frequency = Frequency::parse(frequency)
            .ok_or_else(|| RepoError::UnsupportedFrequency(frequency.to_string()))?;
        self.repo
            .add_reminder(frequency, message, destination, Utc::now())
    }

    /// Lists all scheduled reminders ordered by id.
    pub fn list_reminders(&self) -> RepoResult<Vec<Reminder>> {
        self.repo.list_reminders()
    }
}
