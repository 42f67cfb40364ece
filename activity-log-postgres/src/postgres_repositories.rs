use activity_log_db::RepositoryError;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::repository::activity::{ActivityRepoFactory, ActivityRepositories};
use crate::repository::executor::Executor;

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    activity_factory: Arc<ActivityRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            activity_factory: ActivityRepoFactory::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(self.pool.as_ref()).await?;
        info!("activity schema migrated");
        Ok(())
    }

    /// Begin a transaction and build every activity repository on it.
    ///
    /// Nothing is persisted until the returned executor is committed; dropping it
    /// rolls the work back.
    pub async fn create_activity_repositories(&self) -> Result<ActivityRepositories, RepositoryError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::invalid_query(e, "BEGIN"))?;
        let executor = Executor::new(tx);

        Ok(self.activity_factory.build_all_repos(&executor))
    }
}
