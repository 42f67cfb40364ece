use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Collection that login events are recorded against
pub const USERS_COLLECTION: &str = "users";

/// Collection holding uploaded files; its activity is typed `FILES`
pub const FILES_COLLECTION: &str = "files";

pub const SETTINGS_COLLECTION: &str = "settings";

/// What kind of thing changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Entry,
    Files,
    Settings,
    Login,
    Comment,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Entry => "ENTRY",
            ActivityType::Files => "FILES",
            ActivityType::Settings => "SETTINGS",
            ActivityType::Login => "LOGIN",
            ActivityType::Comment => "COMMENT",
        }
    }

    /// Log type used when a mutation is recorded against `collection`
    pub fn for_collection(collection: &str) -> Self {
        match collection {
            SETTINGS_COLLECTION => ActivityType::Settings,
            FILES_COLLECTION => ActivityType::Files,
            _ => ActivityType::Entry,
        }
    }

    /// Log type scanned when resolving provenance of an item in `collection`
    pub fn for_item_metadata(collection: &str) -> Self {
        if collection == FILES_COLLECTION {
            ActivityType::Files
        } else {
            ActivityType::Entry
        }
    }

    /// Whether `(self, action)` is a combination writers may record
    ///
    /// - `LOGIN` pairs only with the `LOGIN` action and vice versa
    /// - comments are added, edited or removed, never reverted
    pub fn allows(&self, action: ActivityAction) -> bool {
        use ActivityAction::*;
        match self {
            ActivityType::Login => action == Login,
            ActivityType::Comment => matches!(action, Add | Update | Delete),
            ActivityType::Entry | ActivityType::Files | ActivityType::Settings => {
                matches!(action, Add | Update | Delete | SoftDelete | Revert)
            }
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRY" => Ok(ActivityType::Entry),
            "FILES" => Ok(ActivityType::Files),
            "SETTINGS" => Ok(ActivityType::Settings),
            "LOGIN" => Ok(ActivityType::Login),
            "COMMENT" => Ok(ActivityType::Comment),
            _ => Err(format!("Invalid ActivityType: {s}")),
        }
    }
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Add,
    Update,
    Delete,
    Login,
    SoftDelete,
    Revert,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Add => "ADD",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
            ActivityAction::Login => "LOGIN",
            ActivityAction::SoftDelete => "SOFT_DELETE",
            ActivityAction::Revert => "REVERT",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(ActivityAction::Add),
            "UPDATE" => Ok(ActivityAction::Update),
            "DELETE" => Ok(ActivityAction::Delete),
            "LOGIN" => Ok(ActivityAction::Login),
            "SOFT_DELETE" => Ok(ActivityAction::SoftDelete),
            "REVERT" => Ok(ActivityAction::Revert),
            _ => Err(format!("Invalid ActivityAction: {s}")),
        }
    }
}
