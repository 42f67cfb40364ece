use activity_log_api::ResponseEnvelope;
use activity_log_db::models::activity::FeedEntry;
use activity_log_db::repository::feed_params::FeedParams;
use activity_log_db::repository::fetch_feed::FetchFeed;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::{Postgres, Row};
use tracing::debug;
use validator::Validate;

use super::feed_query::{FeedQuery, FeedScope};
use super::repo_impl::{query_failed, ActivityRepositoryImpl};

impl ActivityRepositoryImpl {
    pub(super) async fn fetch_feed_impl(
        repo: &ActivityRepositoryImpl,
        params: &FeedParams,
    ) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError> {
        Self::run_feed_query(repo, params, FeedScope::Visible).await
    }

    /// Build, run and wrap a feed style listing, counting only when `meta` is set
    pub(super) async fn run_feed_query(
        repo: &ActivityRepositoryImpl,
        params: &FeedParams,
        scope: FeedScope<'_>,
    ) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError> {
        params.validate()?;
        if let Some(sort) = params.sort.as_ref().filter(|sort| !sort.is_empty()) {
            debug!(?sort, "caller sort ignored, activity is listed by id descending");
        }

        let query = FeedQuery::build(params, scope)?;
        let rows = repo.fetch_all_with(&query.select_sql, &query.binds).await?;
        let entries = repo
            .parser
            .parse_entries(&rows, &query.columns)
            .map_err(|e| query_failed(e, &query.select_sql))?;

        let total_count = if params.meta {
            let count_rows = repo.fetch_all_with(&query.count_sql, &query.binds).await?;
            let total: i64 = match count_rows.first() {
                Some(row) => row.try_get("total_count").map_err(|e| query_failed(e, &query.count_sql))?,
                None => 0,
            };
            Some(usize::try_from(total).unwrap_or_default())
        } else {
            None
        };

        Ok(repo.parser.wrap_data(entries, total_count))
    }
}

#[async_trait]
impl FetchFeed<Postgres> for ActivityRepositoryImpl {
    async fn fetch_feed(&self, params: &FeedParams) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError> {
        Self::fetch_feed_impl(self, params).await
    }
}
