//! Normalizes raw activity rows into models and wraps result sets in the
//! response envelope.

use activity_log_api::ResponseEnvelope;
use activity_log_db::models::activity::{
    ActionGroupModel, ActivityAction, ActivityColumn, ActivityRecordModel, ActivityType, FeedEntry,
    LastUpdatedModel,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{postgres::PgRow, Row};

use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};

impl TryFromRow<PgRow> for ActivityRecordModel {
    fn try_from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ActivityRecordModel {
            id: row.try_get("id")?,
            activity_type: row.try_get("type")?,
            action: row.try_get("action")?,
            collection: get_heapless_string(row, "collection")?,
            item: row.try_get("item")?,
            user: row.try_get("user")?,
            datetime: row.try_get("datetime")?,
            ip: get_optional_heapless_string(row, "ip")?,
            user_agent: row.try_get("user_agent")?,
            parent_id: row.try_get("parent_id")?,
        })
    }
}

impl TryFromRow<PgRow> for LastUpdatedModel {
    fn try_from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(LastUpdatedModel {
            item: row.try_get("item")?,
            user: row.try_get("user")?,
            datetime: row.try_get("datetime")?,
        })
    }
}

impl TryFromRow<PgRow> for ActionGroupModel {
    fn try_from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ActionGroupModel {
            action: row.try_get("action")?,
            user: row.try_get("user")?,
            datetime: row.try_get("datetime")?,
        })
    }
}

/// Row parsing and envelope wrapping shared by every activity read
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser;

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every row into `T`
    pub fn parse_rows<T: TryFromRow<PgRow>>(&self, rows: &[PgRow]) -> Result<Vec<T>, sqlx::Error> {
        rows.iter().map(T::try_from_row).collect()
    }

    /// Parse a projected row; only `columns` are read and each keeps its storage type
    pub fn parse_entry(&self, row: &PgRow, columns: &[ActivityColumn]) -> Result<FeedEntry, sqlx::Error> {
        let mut entry = FeedEntry::new();
        for &column in columns {
            entry.insert(column, self.decode_column(row, column)?);
        }
        Ok(entry)
    }

    pub fn parse_entries(&self, rows: &[PgRow], columns: &[ActivityColumn]) -> Result<Vec<FeedEntry>, sqlx::Error> {
        rows.iter().map(|row| self.parse_entry(row, columns)).collect()
    }

    /// Wrap a result set, attaching `total_count` only when one is given
    pub fn wrap_data<T>(&self, data: Vec<T>, total_count: Option<usize>) -> ResponseEnvelope<T> {
        ResponseEnvelope::wrap(data, total_count)
    }

    fn decode_column(&self, row: &PgRow, column: ActivityColumn) -> Result<Value, sqlx::Error> {
        let name = column.as_str();
        let value = match column {
            ActivityColumn::Id => Value::from(row.try_get::<i64, _>(name)?),
            ActivityColumn::ParentId => row.try_get::<Option<i64>, _>(name)?.map_or(Value::Null, Value::from),
            ActivityColumn::Type => Value::from(row.try_get::<ActivityType, _>(name)?.as_str()),
            ActivityColumn::Action => Value::from(row.try_get::<ActivityAction, _>(name)?.as_str()),
            ActivityColumn::Datetime => {
                let datetime: DateTime<Utc> = row.try_get(name)?;
                Value::from(datetime.to_rfc3339())
            }
            ActivityColumn::Collection
            | ActivityColumn::Item
            | ActivityColumn::User
            | ActivityColumn::Ip
            | ActivityColumn::UserAgent => row.try_get::<Option<String>, _>(name)?.map_or(Value::Null, Value::from),
        };
        Ok(value)
    }
}
