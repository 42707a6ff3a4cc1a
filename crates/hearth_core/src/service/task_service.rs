//! Task list use-case service.

use crate::model::task::Task;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;

/// Use-case wrapper over the flat task list.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task and returns its id.
    pub fn add_task(&self, description: &str) -> RepoResult<i64> {
        self.repo.add_task(description)
    }

    /// Lists all tasks ordered by id.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks()
    }

    /// Removes a task; done and removed are the same thing here.
    pub fn remove_task(&self, id: i64) -> RepoResult<()> {
        self.repo.remove_task(id)
    }
}
