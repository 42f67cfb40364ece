use activity_log_db::RepositoryError;
use sqlx::postgres::PgRow;
use tracing::warn;

use super::feed_query::{bind_values, SqlValue};
use crate::repository::activity::record_parser::RecordParser;
use crate::repository::executor::Executor;

/// Postgres gateway to the `activity` table.
///
/// Statement execution goes through the injected [`Executor`] and row shaping
/// through the [`RecordParser`]; every operation lives in its own module.
pub struct ActivityRepositoryImpl {
    pub executor: Executor,
    pub parser: RecordParser,
}

impl ActivityRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self {
            executor,
            parser: RecordParser::new(),
        }
    }

    /// Run `sql` with `binds` on the shared transaction and return every row.
    ///
    /// Failures keep the statement text.
    pub(crate) async fn fetch_all_with(&self, sql: &str, binds: &[SqlValue]) -> Result<Vec<PgRow>, RepositoryError> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or(RepositoryError::TransactionConsumed)?;
        bind_values(sqlx::query(sql), binds)
            .fetch_all(&mut **transaction)
            .await
            .map_err(|e| query_failed(e, sql))
    }
}

/// Map a driver error to an invalid-query error carrying `sql`
pub(crate) fn query_failed(err: sqlx::Error, sql: &str) -> RepositoryError {
    warn!(error = %err, query = sql, "activity query failed");
    RepositoryError::invalid_query(err, sql)
}
