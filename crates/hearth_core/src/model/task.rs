//! Task domain record.
//!
//! Tasks are the flat sibling of chores: no hierarchy and no completion
//! state. "Done" means deleted; the lifecycle is create then delete.

use serde::{Deserialize, Serialize};

/// A one-line to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned global id.
    pub id: i64,
    pub description: String,
}
