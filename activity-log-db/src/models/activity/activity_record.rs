use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::activity_type::{ActivityAction, ActivityType, USERS_COLLECTION};
use crate::repository_error::RepositoryError;

/// # Documentation
/// One immutable entry of the activity log.
///
/// - `id` is assigned by storage on insert and is a total order: larger ids are newer
/// - rows are never updated or deleted once written
/// - `parent_id` threads comments under another entry; `None` for top level activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecordModel {
    pub id: i64,

    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    pub action: ActivityAction,

    /// Affected collection
    pub collection: HeaplessString<64>,

    /// Identifier of the affected item, opaque to the log
    pub item: String,

    /// Acting principal
    pub user: String,

    pub datetime: DateTime<Utc>,

    pub ip: Option<HeaplessString<45>>,

    pub user_agent: Option<String>,

    pub parent_id: Option<i64>,
}

/// Bytes stored for a collection name; matches `HeaplessString<64>` and the column check
pub const COLLECTION_MAX_BYTES: usize = 64;

/// Bytes stored for a client address; matches `HeaplessString<45>` and the column check
pub const IP_MAX_BYTES: usize = 45;

fn fits_collection(value: &str) -> Result<(), ValidationError> {
    fits_bytes(value, COLLECTION_MAX_BYTES, "collection must be at most 64 bytes")
}

fn fits_ip(value: &str) -> Result<(), ValidationError> {
    fits_bytes(value, IP_MAX_BYTES, "ip must be at most 45 bytes")
}

fn fits_bytes(value: &str, max: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.len() > max {
        let mut err = ValidationError::new("max_bytes");
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

/// Request provenance passed explicitly by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RequestContext {
    #[validate(custom(function = "fits_ip"))]
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl RequestContext {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: Some(ip.into()),
            user_agent: Some(user_agent.into()),
        }
    }
}

/// An activity entry that has not been written yet
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewActivityRecord {
    pub activity_type: ActivityType,
    pub action: ActivityAction,

    #[validate(
        length(min = 1, message = "collection must not be empty"),
        custom(function = "fits_collection")
    )]
    pub collection: String,

    #[validate(length(min = 1, message = "item must not be empty"))]
    pub item: String,

    #[validate(length(min = 1, message = "user must not be empty"))]
    pub user: String,

    /// Event time; stamped with the current UTC time when `None`
    pub datetime: Option<DateTime<Utc>>,

    #[validate(nested)]
    pub context: RequestContext,

    pub parent_id: Option<i64>,
}

impl NewActivityRecord {
    pub fn new(
        activity_type: ActivityType,
        action: ActivityAction,
        collection: impl Into<String>,
        item: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            activity_type,
            action,
            collection: collection.into(),
            item: item.into(),
            user: user.into(),
            datetime: None,
            context: RequestContext::default(),
            parent_id: None,
        }
    }

    /// A login event: the user is both the actor and the affected item.
    /// Missing request provenance is stored as empty strings.
    pub fn login(user_id: &str, context: Option<&RequestContext>) -> Self {
        let context = context.cloned().unwrap_or_default();
        let mut record = Self::new(
            ActivityType::Login,
            ActivityAction::Login,
            USERS_COLLECTION,
            user_id,
            user_id,
        );
        record.context = RequestContext {
            ip: Some(context.ip.unwrap_or_default()),
            user_agent: Some(context.user_agent.unwrap_or_default()),
        };
        record
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn at(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Boundary check run before anything reaches storage
    pub fn check(&self) -> Result<(), RepositoryError> {
        self.validate()?;
        if !self.activity_type.allows(self.action) {
            return Err(RepositoryError::validation(format!(
                "Unrecognized activity combination: type {} with action {}",
                self.activity_type, self.action
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_without_context_uses_empty_provenance() {
        let record = NewActivityRecord::login("42", None);
        assert_eq!(record.activity_type, ActivityType::Login);
        assert_eq!(record.action, ActivityAction::Login);
        assert_eq!(record.collection, USERS_COLLECTION);
        assert_eq!(record.item, "42");
        assert_eq!(record.user, "42");
        assert_eq!(record.context.ip.as_deref(), Some(""));
        assert_eq!(record.context.user_agent.as_deref(), Some(""));
        assert!(record.check().is_ok());
    }

    #[test]
    fn test_login_keeps_given_context() {
        let ctx = RequestContext::new("10.0.0.7", "curl/8.4");
        let record = NewActivityRecord::login("42", Some(&ctx));
        assert_eq!(record.context, ctx);
    }

    #[test]
    fn test_check_rejects_empty_identifiers() {
        let record = NewActivityRecord::login("", None);
        assert!(matches!(record.check(), Err(RepositoryError::Validation(_))));

        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Add, "", "1", "u1");
        assert!(matches!(record.check(), Err(RepositoryError::Validation(_))));
    }

    #[test]
    fn test_check_rejects_unrecognized_pair() {
        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Login, "posts", "1", "u1");
        let err = record.check().unwrap_err();
        assert!(err.to_string().contains("type ENTRY with action LOGIN"));
    }

    #[test]
    fn test_check_rejects_oversized_ip() {
        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Add, "posts", "1", "u1")
            .with_context(RequestContext::new("x".repeat(46), "agent"));
        assert!(matches!(record.check(), Err(RepositoryError::Validation(_))));
    }

    #[test]
    fn test_limits_count_bytes_not_characters() {
        // 40 characters, 80 bytes
        let wide = "é".repeat(40);
        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Add, wide, "1", "u1");
        assert!(matches!(record.check(), Err(RepositoryError::Validation(_))));

        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Add, "é".repeat(32), "1", "u1");
        assert!(record.check().is_ok());

        let record = NewActivityRecord::new(ActivityType::Entry, ActivityAction::Add, "posts", "1", "u1")
            .with_context(RequestContext::new("é".repeat(23), "agent"));
        assert!(matches!(record.check(), Err(RepositoryError::Validation(_))));
    }

    #[test]
    fn test_record_serializes_type_field_name() {
        let record = ActivityRecordModel {
            id: 1,
            activity_type: ActivityType::Entry,
            action: ActivityAction::Add,
            collection: HeaplessString::try_from("posts").unwrap(),
            item: "5".to_string(),
            user: "u1".to_string(),
            datetime: Utc::now(),
            ip: None,
            user_agent: None,
            parent_id: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "ENTRY");
        assert!(json.get("activity_type").is_none());
    }
}
