//! Chore registry use-case service.
//!
//! # Responsibility
//! - Provide the registry operations the command dispatcher calls.
//! - Delegate persistence to the repository contract.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - The service holds no chore state; every call is a fresh store
//!   round-trip.

use crate::model::chore::{Chore, ChoreAddress};
use crate::repo::chore_repo::ChoreRepository;
use crate::repo::RepoResult;
use chrono::Utc;

/// Use-case wrapper over the chore registry.
pub struct ChoreService<R: ChoreRepository> {
    repo: R,
}

impl<R: ChoreRepository> ChoreService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a pending chore and returns its id.
    pub fn add_chore(&self, description: &str) -> RepoResult<i64> {
        self.repo.add_chore(description)
    }

    /// Creates a sub-chore under `parent_id`; the returned id is unique
    /// only within that parent.
    pub fn add_sub_chore(&self, parent_id: i64, description: &str) -> RepoResult<i64> {
        self.repo.add_sub_chore(parent_id, description)
    }

    /// Lists all chores with their sub-chores, ordered by id.
    pub fn list_chores(&self) -> RepoResult<Vec<Chore>> {
        self.repo.list_chores()
    }

    /// Marks the addressed chore or sub-chore done by `actor` now.
    ///
    /// Idempotent: re-completing overwrites the timestamp and actor.
    pub fn complete(&self, address: ChoreAddress, actor: &str) -> RepoResult<()> {
        self.repo.complete_chore(address, actor, Utc::now())
    }

    /// Deletes chores completed beyond the retention window. Returns the
    /// number removed.
    pub fn prune_completed(&self) -> RepoResult<usize> {
        self.repo.prune_completed(Utc::now())
    }
}
