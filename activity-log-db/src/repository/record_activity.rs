use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::{ActivityRecordModel, NewActivityRecord};
use crate::repository_error::RepositoryError;

/// Append a mutation event (create, update, delete, comment, ...) to the activity log
///
/// The record is checked at the boundary: non-empty identifiers, a recognized
/// `(type, action)` pair and an existing `parent_id`. Returns the stored record
/// with its storage assigned id.
#[async_trait]
pub trait RecordActivity<DB: Database>: Send + Sync {
    async fn record_activity(&self, record: NewActivityRecord) -> Result<ActivityRecordModel, RepositoryError>;
}
