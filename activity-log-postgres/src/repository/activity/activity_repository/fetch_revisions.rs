use activity_log_api::ResponseEnvelope;
use activity_log_db::models::activity::FeedEntry;
use activity_log_db::repository::feed_params::FeedParams;
use activity_log_db::repository::fetch_revisions::FetchRevisions;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::Postgres;

use super::feed_query::FeedScope;
use super::repo_impl::ActivityRepositoryImpl;

impl ActivityRepositoryImpl {
    pub(super) async fn fetch_revisions_impl(
        repo: &ActivityRepositoryImpl,
        collection: &str,
        item: &str,
        params: &FeedParams,
    ) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError> {
        if collection.is_empty() || item.is_empty() {
            return Err(RepositoryError::validation("collection and item must not be empty"));
        }
        Self::run_feed_query(repo, params, FeedScope::Item { collection, item }).await
    }
}

#[async_trait]
impl FetchRevisions<Postgres> for ActivityRepositoryImpl {
    async fn fetch_revisions(
        &self,
        collection: &str,
        item: &str,
        params: &FeedParams,
    ) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError> {
        Self::fetch_revisions_impl(self, collection, item, params).await
    }
}
