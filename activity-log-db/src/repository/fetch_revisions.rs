use activity_log_api::ResponseEnvelope;
use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::FeedEntry;
use crate::repository::feed_params::FeedParams;
use crate::repository_error::RepositoryError;

/// Full revision history of one item, newest first
///
/// Same shaping as the feed (projection, filters, paging, `meta`) but scoped to
/// `collection` and `item`, with comment threads included.
#[async_trait]
pub trait FetchRevisions<DB: Database>: Send + Sync {
    async fn fetch_revisions(
        &self,
        collection: &str,
        item: &str,
        params: &FeedParams,
    ) -> Result<ResponseEnvelope<FeedEntry>, RepositoryError>;
}
