use async_trait::async_trait;
use sqlx::Database;

use crate::repository_error::RepositoryError;

/// Check which activity ids are present in the log
///
/// Used to enforce that a `parent_id` references an existing entry before a
/// threaded record is written.
///
/// # Example
/// ```ignore
/// let results = repo.exist_by_ids(&[parent_id, 999_999]).await?;
/// // [(parent_id, true), (999_999, false)]
/// ```
#[async_trait]
pub trait ExistByIds<DB: Database>: Send + Sync {
    /// Returns one `(id, exists)` pair per requested id, in request order
    async fn exist_by_ids(&self, ids: &[i64]) -> Result<Vec<(i64, bool)>, RepositoryError>;
}
