use activity_log_api::ResponseEnvelope;
use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::{ItemIds, LastUpdatedModel};
use crate::repository_error::RepositoryError;

/// Most recent ADD/UPDATE per `(item, user)` for a set of entry items
///
/// Rows are ordered by their latest timestamp, newest first. An item written by
/// several users appears once per user; callers wanting one answer per item take
/// the first row per item (or use [`LastUpdatedModel::latest_per_item`]).
///
/// # Example
/// ```ignore
/// let rows = repo.get_last_updated("posts", vec!["5", "6"].into(), false).await?;
/// let latest = LastUpdatedModel::latest_per_item(&rows.data);
/// ```
#[async_trait]
pub trait GetLastUpdated<DB: Database>: Send + Sync {
    async fn get_last_updated(
        &self,
        collection: &str,
        ids: ItemIds,
        meta: bool,
    ) -> Result<ResponseEnvelope<LastUpdatedModel>, RepositoryError>;
}
