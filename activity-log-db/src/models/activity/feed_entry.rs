use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::activity_column::ActivityColumn;
use super::activity_record::ActivityRecordModel;
use super::activity_type::ActivityType;

/// A feed row restricted to the projected columns.
///
/// Only the columns selected by the caller are present; a projected column whose
/// stored value is NULL is present with a `null` value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedEntry(pub Map<String, Value>);

impl FeedEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: ActivityColumn, value: Value) {
        self.0.insert(column.as_str().to_string(), value);
    }

    pub fn get(&self, column: ActivityColumn) -> Option<&Value> {
        self.0.get(column.as_str())
    }

    pub fn contains(&self, column: ActivityColumn) -> bool {
        self.0.contains_key(column.as_str())
    }

    pub fn id(&self) -> Option<i64> {
        self.get(ActivityColumn::Id).and_then(Value::as_i64)
    }

    pub fn parent_id(&self) -> Option<i64> {
        self.get(ActivityColumn::ParentId).and_then(Value::as_i64)
    }

    pub fn activity_type(&self) -> Option<ActivityType> {
        self.get(ActivityColumn::Type)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Convert back into a full record; fails when the projection omitted a required column
    pub fn to_record(&self) -> Result<ActivityRecordModel, serde_json::Error> {
        serde_json::from_value(Value::Object(self.0.clone()))
    }
}
