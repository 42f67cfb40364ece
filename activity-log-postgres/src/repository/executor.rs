//! Transaction-scoped statement executor shared by the repositories of one unit of work.

use activity_log_db::RepositoryError;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloning an `Executor` shares the same transaction. Once committed or rolled
/// back the transaction is consumed and further statements fail with
/// [`RepositoryError::TransactionConsumed`].
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    pub async fn commit(&self) -> Result<(), RepositoryError> {
        let transaction = self.tx.lock().await.take().ok_or(RepositoryError::TransactionConsumed)?;
        transaction
            .commit()
            .await
            .map_err(|e| RepositoryError::invalid_query(e, "COMMIT"))
    }

    pub async fn rollback(&self) -> Result<(), RepositoryError> {
        let transaction = self.tx.lock().await.take().ok_or(RepositoryError::TransactionConsumed)?;
        transaction
            .rollback()
            .await
            .map_err(|e| RepositoryError::invalid_query(e, "ROLLBACK"))
    }

    pub async fn is_consumed(&self) -> bool {
        self.tx.lock().await.is_none()
    }
}
