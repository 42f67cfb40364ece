use activity_log_api::ResponseEnvelope;
use activity_log_db::models::activity::{ItemIds, LastUpdatedModel};
use activity_log_db::repository::get_last_updated::GetLastUpdated;
use activity_log_db::RepositoryError;
use async_trait::async_trait;
use sqlx::Postgres;
use tracing::debug;

use super::repo_impl::{query_failed, ActivityRepositoryImpl};

const SELECT_LAST_UPDATED: &str = r#"
    SELECT item, "user", MAX(datetime) AS datetime
    FROM activity
    WHERE collection = $1
      AND "type" = 'ENTRY'
      AND action IN ('ADD', 'UPDATE')
      AND item = ANY($2)
    GROUP BY item, "user"
    ORDER BY MAX(datetime) DESC, item, "user"
"#;

impl ActivityRepositoryImpl {
    pub(super) async fn get_last_updated_impl(
        repo: &ActivityRepositoryImpl,
        collection: &str,
        ids: ItemIds,
        meta: bool,
    ) -> Result<ResponseEnvelope<LastUpdatedModel>, RepositoryError> {
        if collection.is_empty() {
            return Err(RepositoryError::validation("collection must not be empty"));
        }
        if ids.is_empty() {
            return Err(RepositoryError::validation("at least one item id is required"));
        }

        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
            sqlx::query(SELECT_LAST_UPDATED)
                .bind(collection)
                .bind(ids.as_slice())
                .fetch_all(&mut **transaction)
                .await
                .map_err(|e| query_failed(e, SELECT_LAST_UPDATED))?
        };

        let data: Vec<LastUpdatedModel> = repo
            .parser
            .parse_rows(&rows)
            .map_err(|e| query_failed(e, SELECT_LAST_UPDATED))?;
        debug!(collection, requested = ids.len(), rows = data.len(), "last updated resolved");

        let total_count = meta.then_some(data.len());
        Ok(repo.parser.wrap_data(data, total_count))
    }
}

#[async_trait]
impl GetLastUpdated<Postgres> for ActivityRepositoryImpl {
    async fn get_last_updated(
        &self,
        collection: &str,
        ids: ItemIds,
        meta: bool,
    ) -> Result<ResponseEnvelope<LastUpdatedModel>, RepositoryError> {
        Self::get_last_updated_impl(self, collection, ids, meta).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{at, create_test_entry, unique_collection};
    use crate::test_helper::setup_test_context;
    use activity_log_db::models::activity::{ActivityAction, ActivityType, LastUpdatedModel, NewActivityRecord};
    use activity_log_db::repository::get_last_updated::GetLastUpdated;
    use activity_log_db::repository::record_activity::RecordActivity;
    use activity_log_db::RepositoryError;

    #[tokio::test]
    async fn test_last_updated_per_item_and_user() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.activity_repos().activity_repository;
        let collection = unique_collection("posts");

        activity_repo
            .record_activity(create_test_entry(&collection, "5", "u1", ActivityAction::Add, at(9)))
            .await?;
        activity_repo
            .record_activity(create_test_entry(&collection, "5", "u2", ActivityAction::Update, at(10)))
            .await?;
        activity_repo
            .record_activity(create_test_entry(&collection, "5", "u2", ActivityAction::Update, at(11)))
            .await?;
        activity_repo
            .record_activity(create_test_entry(&collection, "5", "u3", ActivityAction::Delete, at(12)))
            .await?;
        activity_repo
            .record_activity(create_test_entry(&collection, "6", "u1", ActivityAction::Add, at(8)))
            .await?;

        let result = activity_repo
            .get_last_updated(&collection, vec!["5", "6"].into(), true)
            .await?;

        let rows: Vec<(&str, &str)> = result.data.iter().map(|r| (r.item.as_str(), r.user.as_str())).collect();
        assert_eq!(rows, vec![("5", "u2"), ("5", "u1"), ("6", "u1")]);
        assert_eq!(result.data[0].datetime, at(11));
        assert_eq!(result.total_count(), Some(3));

        let latest = LastUpdatedModel::latest_per_item(&result.data);
        assert_eq!(latest.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_last_updated_ignores_other_types() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.activity_repos().activity_repository;
        let collection = unique_collection("posts");

        activity_repo
            .record_activity(
                NewActivityRecord::new(ActivityType::Files, ActivityAction::Add, &collection, "5", "u1").at(at(9)),
            )
            .await?;
        activity_repo
            .record_activity(
                NewActivityRecord::new(ActivityType::Comment, ActivityAction::Update, &collection, "5", "u1").at(at(10)),
            )
            .await?;

        let result = activity_repo.get_last_updated(&collection, "5".into(), false).await?;

        assert!(result.is_empty());
        assert!(result.meta.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_last_updated_requires_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let activity_repo = &ctx.activity_repos().activity_repository;

        let result = activity_repo.get_last_updated("posts", Vec::<String>::new().into(), false).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));

        Ok(())
    }
}
