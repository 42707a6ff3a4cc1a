//! Scheduler background loop.
//!
//! # Responsibility
//! - Run one synchronous, bounded tick: due reminders out, pruning after.
//! - Drive ticks from a tokio interval task that can be cancelled between
//!   ticks via `JoinHandle::abort()`.
//!
//! # Invariants
//! - `tick` never panics on storage or delivery failure; problems are
//!   logged and counted in the returned summary.
//! - The loop awaits each tick inline, so it cannot re-enter itself;
//!   missed ticks are skipped rather than burst-replayed.

use crate::repo::chore_repo::{ChoreRepository, SqliteChoreRepository};
use crate::repo::reminder_repo::{
    AdvanceOutcome, ReminderRepository, SqliteReminderRepository,
};
use crate::repo::RepoResult;
use crate::scheduler::notify::Notifier;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Interval between scheduler ticks.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Counters for one scheduler tick; consumed by logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Reminders handed to the notifier successfully.
    pub delivered: usize,
    /// Notifier failures; the affected reminders were still advanced.
    pub delivery_failures: usize,
    /// Reminders rescheduled one period forward.
    pub advanced: usize,
    /// One-shot/unrecognized-frequency reminders removed after firing.
    pub retired: usize,
    /// Completed chores removed by the pruning pass.
    pub pruned: usize,
    /// Storage errors encountered and logged during the tick.
    pub storage_errors: usize,
}

/// Background driver owning its own store connection and notifier.
///
/// Delivery and advancement are deliberately two independent statements
/// with no transaction around them: a crash in between re-delivers the
/// reminder on the next tick. At-least-once is the accepted trade-off for
/// low-stakes household reminders.
pub struct Scheduler<N: Notifier> {
    conn: Connection,
    notifier: N,
    tick_interval: Duration,
}

impl<N: Notifier> Scheduler<N> {
    /// Creates a driver over a bootstrapped connection.
    pub fn new(conn: Connection, notifier: N) -> Self {
        Self {
            conn,
            notifier,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Overrides the tick interval (tests drive this down to milliseconds).
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Executes one tick at `now`: deliver and advance every due reminder,
    /// then prune stale completed chores.
    pub fn tick(&self, now: DateTime<Utc>) -> TickSummary {
        let mut summary = TickSummary::default();

        if let Err(err) = self.deliver_due(now, &mut summary) {
            summary.storage_errors += 1;
            error!("event=reminder_scan module=scheduler status=error error={err}");
        }

        match self.prune_chores(now) {
            Ok(pruned) => {
                summary.pruned = pruned;
                if pruned > 0 {
                    info!("event=chores_pruned module=scheduler status=ok count={pruned}");
                }
            }
            Err(err) => {
                summary.storage_errors += 1;
                error!("event=chores_pruned module=scheduler status=error error={err}");
            }
        }

        debug!(
            "event=tick module=scheduler status=ok delivered={} delivery_failures={} advanced={} retired={} pruned={} storage_errors={}",
            summary.delivered,
            summary.delivery_failures,
            summary.advanced,
            summary.retired,
            summary.pruned,
            summary.storage_errors
        );
        summary
    }

    fn deliver_due(&self, now: DateTime<Utc>, summary: &mut TickSummary) -> RepoResult<()> {
        let repo = SqliteReminderRepository::try_new(&self.conn)?;

        for reminder in repo.due_reminders(now)? {
            match self.notifier.deliver(&reminder.destination, &reminder.message) {
                Ok(()) => {
                    summary.delivered += 1;
                    info!(
                        "event=reminder_delivered module=scheduler status=ok id={} destination={}",
                        reminder.id, reminder.destination
                    );
                }
                Err(err) => {
                    // Best-effort delivery: log, count, and still advance so
                    // one broken destination cannot wedge the queue.
                    summary.delivery_failures += 1;
                    warn!(
                        "event=reminder_delivered module=scheduler status=error id={} destination={} error={err}",
                        reminder.id, reminder.destination
                    );
                }
            }

            match repo.advance_reminder(reminder.id) {
                Ok(AdvanceOutcome::Rescheduled(next_run)) => {
                    summary.advanced += 1;
                    debug!(
                        "event=reminder_advanced module=scheduler status=ok id={} next_run={next_run}",
                        reminder.id
                    );
                }
                Ok(AdvanceOutcome::Retired) => {
                    summary.retired += 1;
                    info!(
                        "event=reminder_retired module=scheduler status=ok id={} frequency={}",
                        reminder.id, reminder.frequency
                    );
                }
                Ok(AdvanceOutcome::Missing) => {
                    debug!(
                        "event=reminder_advanced module=scheduler status=skipped id={} reason=missing",
                        reminder.id
                    );
                }
                Err(err) => {
                    summary.storage_errors += 1;
                    error!(
                        "event=reminder_advanced module=scheduler status=error id={} error={err}",
                        reminder.id
                    );
                }
            }
        }

        Ok(())
    }

    fn prune_chores(&self, now: DateTime<Utc>) -> RepoResult<usize> {
        let repo = SqliteChoreRepository::try_new(&self.conn)?;
        repo.prune_completed(now)
    }
}

impl<N: Notifier + Send + 'static> Scheduler<N> {
    /// Starts the periodic loop on the current tokio runtime.
    ///
    /// The first tick fires immediately; cancellation via
    /// `JoinHandle::abort()` takes effect between ticks, which is safe
    /// because each reminder is advanced independently.
    pub fn run(self) -> JoinHandle<()> {
        info!(
            "event=scheduler_start module=scheduler status=ok tick_interval_ms={}",
            self.tick_interval.as_millis()
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                self.tick(Utc::now());
            }
        })
    }
}
