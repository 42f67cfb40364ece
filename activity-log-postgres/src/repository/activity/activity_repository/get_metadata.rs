use activity_log_db::models::activity::{
    ActionGroupModel, ActivityType, ItemMetadataModel, PROVENANCE_GROUP_LIMIT,
};
use activity_log_db::repository::get_metadata::GetMetadata;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::Postgres;
use tracing::debug;

use super::repo_impl::{query_failed, ActivityRepositoryImpl};

/// Latest event per `(action, user)`, creations first, capped at `$4` groups.
/// Only events by known users count.
const SELECT_ACTION_GROUPS: &str = r#"
    SELECT a.action, a."user", MAX(a.datetime) AS datetime
    FROM activity a
    INNER JOIN users u ON u.id = a."user"
    WHERE a.collection = $1
      AND a.item = $2
      AND a."type" = $3
      AND a.action IN ('ADD', 'UPDATE')
    GROUP BY a.action, a."user"
    ORDER BY a.action, MAX(a.datetime) DESC
    LIMIT $4
"#;

impl ActivityRepositoryImpl {
    pub(super) async fn get_metadata_impl(
        repo: &ActivityRepositoryImpl,
        collection: &str,
        id: &str,
    ) -> Result<ItemMetadataModel, RepositoryError> {
        if collection.is_empty() || id.is_empty() {
            return Err(RepositoryError::validation("collection and id must not be empty"));
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(SELECT_ACTION_GROUPS)
                .bind(collection)
                .bind(id)
                .bind(ActivityType::for_item_metadata(collection))
                .bind(PROVENANCE_GROUP_LIMIT as i64)
                .fetch_all(&mut **transaction)
                .await
                .map_err(|e| query_failed(e, SELECT_ACTION_GROUPS))?
        };

        let groups: Vec<ActionGroupModel> = repo
            .parser
            .parse_rows(&rows)
            .map_err(|e| query_failed(e, SELECT_ACTION_GROUPS))?;
        debug!(collection, item = id, groups = groups.len(), "item metadata resolved");

        Ok(ItemMetadataModel::reconcile(&groups))
    }
}

#[async_trait]
impl GetMetadata<Postgres> for ActivityRepositoryImpl {
    async fn get_metadata(&self, collection: &str, id: &str) -> Result<ItemMetadataModel, RepositoryError> {
        Self::get_metadata_impl(self, collection, id).await
    }
}
