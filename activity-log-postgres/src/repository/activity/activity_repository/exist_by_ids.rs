use activity_log_db::repository::exist_by_ids::ExistByIds;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::{Postgres, Row};

use super::repo_impl::{query_failed, ActivityRepositoryImpl};

const SELECT_EXISTING_IDS: &str = r#"SELECT id FROM activity WHERE id = ANY($1)"#;

impl ActivityRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &ActivityRepositoryImpl,
        ids: &[i64],
    ) -> Result<Vec<(i64, bool)>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(SELECT_EXISTING_IDS)
                .bind(ids)
                .fetch_all(&mut **transaction)
                .await
                .map_err(|e| query_failed(e, SELECT_EXISTING_IDS))?
        };

        let existing_ids: std::collections::HashSet<i64> = rows
            .iter()
            .map(|row| row.get("id"))
            .collect();

        Ok(ids.iter().map(|&id| (id, existing_ids.contains(&id))).collect())
    }
}

#[async_trait]
impl ExistByIds<Postgres> for ActivityRepositoryImpl {
    async fn exist_by_ids(&self, ids: &[i64]) -> Result<Vec<(i64, bool)>, RepositoryError> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
