use activity_log_db::models::activity::{ActivityRecordModel, NewActivityRecord, RequestContext};
use activity_log_db::repository::record_login::RecordLogin;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::Postgres;
use tracing::info;

use super::repo_impl::ActivityRepositoryImpl;

impl ActivityRepositoryImpl {
    pub(super) async fn record_login_impl(
        repo: &ActivityRepositoryImpl,
        user_id: &str,
        context: Option<&RequestContext>,
    ) -> Result<ActivityRecordModel, RepositoryError> {
        if user_id.is_empty() {
            return Err(RepositoryError::validation("user id must not be empty"));
        }

        let saved = Self::insert_impl(repo, NewActivityRecord::login(user_id, context)).await?;
        info!(user = user_id, activity_id = saved.id, "login recorded");
        Ok(saved)
    }
}

#[async_trait]
impl RecordLogin<Postgres> for ActivityRepositoryImpl {
    async fn record_login(
        &self,
        user_id: &str,
        context: Option<&RequestContext>,
    ) -> Result<ActivityRecordModel, RepositoryError> {
        Self::record_login_impl(self, user_id, context).await
    }
}
