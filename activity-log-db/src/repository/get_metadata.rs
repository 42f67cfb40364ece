use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::ItemMetadataModel;
use crate::repository_error::RepositoryError;

/// Creation and last-update provenance of a single item
///
/// Resolved from at most [`PROVENANCE_GROUP_LIMIT`](crate::models::activity::PROVENANCE_GROUP_LIMIT)
/// `(action, user)` groups. An item with no qualifying events yields empty provenance,
/// not an error.
#[async_trait]
pub trait GetMetadata<DB: Database>: Send + Sync {
    async fn get_metadata(&self, collection: &str, id: &str) -> Result<ItemMetadataModel, RepositoryError>;
}
