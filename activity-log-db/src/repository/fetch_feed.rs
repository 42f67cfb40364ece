use activity_log_api::ResponseEnvelope;
use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::FeedEntry;
use crate::repository::feed_params::FeedParams;
use crate::repository_error::RepositoryError;

/// Newest-first activity feed
///
/// - ordering is always `id DESC`; a caller supplied sort is ignored
/// - threaded comment children are hidden: only rows with no parent, or typed `FILES`, are returned
/// - `columns` replaces the default projection without further checks
#[async_trait]
pub trait FetchFeed<DB: Database>: Send + Sync {
    async fn fetch_feed(&self, params: &FeedParams) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError>;
}
