use activity_log_db::models::activity::{ActivityAction, ActivityRecordModel, ActivityType, NewActivityRecord};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::repository::executor::Executor;
use crate::utils::TryFromRow;

static COLLECTION_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A fixed hour on the test day
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
}

/// Collection name no other test writes to
pub fn unique_collection(prefix: &str) -> String {
    let counter = COLLECTION_COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut name = format!("{prefix}_{nanos}_{counter}");
    name.truncate(64);
    name
}

pub fn create_test_entry(
    collection: &str,
    item: &str,
    user: &str,
    action: ActivityAction,
    datetime: DateTime<Utc>,
) -> NewActivityRecord {
    NewActivityRecord::new(ActivityType::Entry, action, collection, item, user).at(datetime)
}

pub async fn create_test_user(executor: &Executor, id: &str) -> Result<(), sqlx::Error> {
    let mut tx = executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or(sqlx::Error::PoolClosed)?;
    sqlx::query("INSERT INTO users (id, email) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
        .bind(id)
        .bind(format!("{id}@example.com"))
        .execute(&mut **transaction)
        .await?;
    Ok(())
}

/// Read one stored row back, bypassing the feed's visibility rules
pub async fn load_activity(executor: &Executor, id: i64) -> Result<Option<ActivityRecordModel>, sqlx::Error> {
    let mut tx = executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or(sqlx::Error::PoolClosed)?;
    let row = sqlx::query(
        r#"SELECT id, "type", action, collection, item, "user", datetime, ip, user_agent, parent_id
           FROM activity WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(&mut **transaction)
    .await?;
    row.as_ref().map(ActivityRecordModel::try_from_row).transpose()
}
