use async_trait::async_trait;
use sqlx::Database;

use crate::models::activity::{ActivityRecordModel, RequestContext};
use crate::repository_error::RepositoryError;

/// Append a login event to the activity log
///
/// Invoked synchronously by the authentication layer after a successful login.
/// The record is typed `LOGIN`/`LOGIN` against the users collection with the user
/// as both actor and item. Missing request context is stored as empty strings.
///
/// Storage failures propagate unchanged; no retry is attempted.
#[async_trait]
pub trait RecordLogin<DB: Database>: Send + Sync {
    async fn record_login(
        &self,
        user_id: &str,
        context: Option<&RequestContext>,
    ) -> Result<ActivityRecordModel, RepositoryError>;
}
