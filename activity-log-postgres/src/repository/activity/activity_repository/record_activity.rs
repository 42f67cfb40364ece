use activity_log_db::models::activity::{ActivityRecordModel, NewActivityRecord};
use activity_log_db::repository::record_activity::RecordActivity;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use heapless::String as HeaplessString;
use sqlx::Postgres;
use tracing::debug;

use super::repo_impl::{query_failed, ActivityRepositoryImpl};
use crate::utils::{to_heapless_string, TryFromRow};

const INSERT_ACTIVITY: &str = r#"
    INSERT INTO activity ("type", action, collection, item, "user", datetime, ip, user_agent, parent_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING id, "type", action, collection, item, "user", datetime, ip, user_agent, parent_id
"#;

impl ActivityRepositoryImpl {
    /// Check and append one record; shared by every writer of the log
    pub(super) async fn insert_impl(
        repo: &ActivityRepositoryImpl,
        record: NewActivityRecord,
    ) -> Result<ActivityRecordModel, RepositoryError> {
        record.check()?;

        let collection: HeaplessString<64> = to_heapless_string(&record.collection, "collection")?;
        let ip: Option<HeaplessString<45>> = record
            .context
            .ip
            .as_deref()
            .map(|ip| to_heapless_string(ip, "ip"))
            .transpose()?;

        if let Some(parent_id) = record.parent_id {
            let exists = Self::exist_by_ids_impl(repo, &[parent_id]).await?;
            if !exists.iter().any(|&(_, found)| found) {
                return Err(RepositoryError::validation(format!(
                    "parent_id {parent_id} does not reference an existing activity"
                )));
            }
        }

        let datetime = record.datetime.unwrap_or_else(Utc::now);
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(INSERT_ACTIVITY)
                .bind(record.activity_type)
                .bind(record.action)
                .bind(collection.as_str())
                .bind(&record.item)
                .bind(&record.user)
                .bind(datetime)
                .bind(ip.as_ref().map(|ip| ip.as_str()))
                .bind(record.context.user_agent.as_deref())
                .bind(record.parent_id)
                .fetch_one(&mut **transaction)
                .await
                .map_err(|e| query_failed(e, INSERT_ACTIVITY))?
        };

        let saved = ActivityRecordModel::try_from_row(&row).map_err(|e| query_failed(e, INSERT_ACTIVITY))?;
        debug!(id = saved.id, activity_type = %saved.activity_type, action = %saved.action, "activity recorded");
        Ok(saved)
    }
}

#[async_trait]
impl RecordActivity<Postgres> for ActivityRepositoryImpl {
    async fn record_activity(&self, record: NewActivityRecord) -> Result<ActivityRecordModel, RepositoryError> {
        Self::insert_impl(self, record).await
    }
}
