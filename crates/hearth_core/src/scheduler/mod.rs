//! Periodic reminder delivery and chore pruning.
//!
//! # Responsibility
//! - Discover due reminders once per tick, deliver them through the
//!   consumed [`Notifier`] contract, then advance or retire them.
//! - Invoke the registry's pruning policy once per tick.
//!
//! # Invariants
//! - Ticks never overlap: the next tick is not started until the previous
//!   one returns.
//! - Delivery is at-least-once: delivery and advancement are independent
//!   statements, so a crash between them re-delivers on the next tick.
//! - One broken destination never starves the rest of the queue.

pub mod notify;
pub mod runner;

pub use notify::{Notifier, NotifyError};
pub use runner::{Scheduler, TickSummary};
