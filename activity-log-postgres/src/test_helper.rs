//! Transaction-based test isolation
//!
//! Every context runs inside a transaction that is never committed, so all
//! writes disappear when the context is dropped.

use crate::config::DatabaseConfig;
use crate::postgres_repositories::PostgresRepositories;
use crate::repository::activity::ActivityRepositories;
use std::sync::Arc;

/// Activity repositories bound to one uncommitted transaction
pub struct TestContext {
    pub activity_repos: ActivityRepositories,
}

impl TestContext {
    pub fn activity_repos(&self) -> &ActivityRepositories {
        &self.activity_repos
    }
}

/// Connect with `DATABASE_URL`, migrate, and open a transactional session
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let activity_repo = &ctx.activity_repos().activity_repository;
///
///     // All changes are rolled back when ctx is dropped
///
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let repos = setup_shared_repos().await?;
    let activity_repos = repos.create_activity_repositories().await?;

    Ok(TestContext { activity_repos })
}

/// Migrated repositories for tests that need more than one transaction
pub async fn setup_shared_repos() -> Result<PostgresRepositories, Box<dyn std::error::Error + Send + Sync>> {
    let config = DatabaseConfig {
        max_connections: 1,
        ..DatabaseConfig::from_env()?
    };
    let pool = config.connect().await?;

    let repos = PostgresRepositories::new(Arc::new(pool));
    repos.migrate().await?;

    Ok(repos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_log_db::models::activity::{ActivityAction, ActivityType, NewActivityRecord};
    use crate::repository::activity::activity_repository::test_utils::load_activity;
    use activity_log_db::repository::exist_by_ids::ExistByIds;
    use activity_log_db::repository::record_activity::RecordActivity;
    use activity_log_db::RepositoryError;

    #[tokio::test]
    async fn test_transaction_rollback() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let saved_id = {
            let ctx = setup_test_context().await?;
            let activity_repo = &ctx.activity_repos().activity_repository;

            let saved = activity_repo
                .record_activity(NewActivityRecord::new(
                    ActivityType::Entry,
                    ActivityAction::Add,
                    "rollback_check",
                    "1",
                    "u1",
                ))
                .await?;

            let loaded = load_activity(&ctx.activity_repos().executor, saved.id).await?;
            assert!(loaded.is_some());
            saved.id
        };

        let ctx = setup_test_context().await?;
        let loaded = load_activity(&ctx.activity_repos().executor, saved_id).await?;
        assert!(loaded.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_consumed_transaction_rejects_statements() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.activity_repos();

        repos.executor.rollback().await?;
        assert!(repos.executor.is_consumed().await);

        let result = repos.activity_repository.exist_by_ids(&[1]).await;
        assert!(matches!(result, Err(RepositoryError::TransactionConsumed)));
        assert!(matches!(repos.executor.commit().await, Err(RepositoryError::TransactionConsumed)));

        Ok(())
    }
}
