//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs for the command
//!   surface.
//! - Supply wall clock time so repositories stay clock-free and testable.

pub mod chore_service;
pub mod reminder_service;
pub mod task_service;
