use std::sync::Arc;

use super::activity_repository::ActivityRepositoryImpl;
use crate::repository::executor::Executor;

/// Factory for creating activity module repositories
///
/// Holds nothing across transactions; every build binds the repository to the
/// given executor. Meant to be created once and shared.
#[derive(Default)]
pub struct ActivityRepoFactory {}

impl ActivityRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    /// Build an ActivityRepository with the given executor
    pub fn build_activity_repo(&self, executor: &Executor) -> Arc<ActivityRepositoryImpl> {
        Arc::new(ActivityRepositoryImpl::new(executor.clone()))
    }

    /// Build all activity repositories with the given executor
    pub fn build_all_repos(&self, executor: &Executor) -> ActivityRepositories {
        ActivityRepositories {
            activity_repository: self.build_activity_repo(executor),
            executor: executor.clone(),
        }
    }
}

/// Container for all activity module repositories and the transaction they share
pub struct ActivityRepositories {
    pub activity_repository: Arc<ActivityRepositoryImpl>,
    pub executor: Executor,
}
