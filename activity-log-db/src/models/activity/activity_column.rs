use std::str::FromStr;

/// Columns of the activity log, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityColumn {
    Id,
    Type,
    Action,
    Collection,
    Item,
    User,
    Datetime,
    Ip,
    UserAgent,
    ParentId,
}

impl ActivityColumn {
    /// The default projection: every column of the log
    pub const ALL: [ActivityColumn; 10] = [
        ActivityColumn::Id,
        ActivityColumn::Type,
        ActivityColumn::Action,
        ActivityColumn::Collection,
        ActivityColumn::Item,
        ActivityColumn::User,
        ActivityColumn::Datetime,
        ActivityColumn::Ip,
        ActivityColumn::UserAgent,
        ActivityColumn::ParentId,
    ];

    /// Field name, identical in storage and in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityColumn::Id => "id",
            ActivityColumn::Type => "type",
            ActivityColumn::Action => "action",
            ActivityColumn::Collection => "collection",
            ActivityColumn::Item => "item",
            ActivityColumn::User => "user",
            ActivityColumn::Datetime => "datetime",
            ActivityColumn::Ip => "ip",
            ActivityColumn::UserAgent => "user_agent",
            ActivityColumn::ParentId => "parent_id",
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ActivityColumn::Collection
                | ActivityColumn::Item
                | ActivityColumn::User
                | ActivityColumn::Ip
                | ActivityColumn::UserAgent
        )
    }
}

impl std::fmt::Display for ActivityColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| format!("Unknown column '{s}'"))
    }
}
