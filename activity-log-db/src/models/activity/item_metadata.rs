use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity_type::ActivityAction;

/// Provenance policy: resolve at most one creation group and one latest-update group.
///
/// The resolver keeps only this many `(action, user)` groups. Groups are ordered by
/// action (`ADD` first) and then by newest timestamp, so with one ADD group any
/// number of updaters still resolves to the latest one. When the same action was
/// performed by more than one user (e.g. two ADD groups) a legitimate group falls
/// past the cap and is dropped.
pub const PROVENANCE_GROUP_LIMIT: usize = 2;

/// Latest event of one `(action, user)` group for a single item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroupModel {
    pub action: ActivityAction,
    pub user: String,
    pub datetime: DateTime<Utc>,
}

/// # Documentation
/// Who created an item and when, who last updated it and when.
///
/// All fields are `None` when the log holds no qualifying event for the item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadataModel {
    pub created_by: Option<String>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub updated_on: Option<DateTime<Utc>>,
}

impl ItemMetadataModel {
    /// Fold action groups, in resolver order, into provenance.
    ///
    /// Only the first [`PROVENANCE_GROUP_LIMIT`] groups are considered; a later group of
    /// the same action overwrites an earlier one. An item that was never updated is
    /// reported as updated by its creator at creation time.
    pub fn reconcile(groups: &[ActionGroupModel]) -> Self {
        let mut metadata = ItemMetadataModel::default();

        for group in groups.iter().take(PROVENANCE_GROUP_LIMIT) {
            match group.action {
                ActivityAction::Add => {
                    metadata.created_by = Some(group.user.clone());
                    metadata.created_on = Some(group.datetime);
                }
                ActivityAction::Update => {
                    metadata.updated_by = Some(group.user.clone());
                    metadata.updated_on = Some(group.datetime);
                }
                _ => {}
            }
        }

        if metadata.updated_by.is_none() && metadata.updated_on.is_none() {
            metadata.updated_by = metadata.created_by.clone();
            metadata.updated_on = metadata.created_on;
        }

        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn group(action: ActivityAction, user: &str, hour: u32) -> ActionGroupModel {
        ActionGroupModel {
            action,
            user: user.to_string(),
            datetime: at(hour),
        }
    }

    #[test]
    fn test_no_groups_yields_empty_provenance() {
        assert_eq!(ItemMetadataModel::reconcile(&[]), ItemMetadataModel::default());
    }

    #[test]
    fn test_creation_only_falls_back_to_creator() {
        let metadata = ItemMetadataModel::reconcile(&[group(ActivityAction::Add, "a", 9)]);
        assert_eq!(metadata.created_by.as_deref(), Some("a"));
        assert_eq!(metadata.updated_by, metadata.created_by);
        assert_eq!(metadata.updated_on, metadata.created_on);
        assert_eq!(metadata.updated_on, Some(at(9)));
    }

    #[test]
    fn test_reconciliation_independent_of_group_order() {
        let add = group(ActivityAction::Add, "a", 9);
        let update = group(ActivityAction::Update, "b", 11);

        let forward = ItemMetadataModel::reconcile(&[add.clone(), update.clone()]);
        let backward = ItemMetadataModel::reconcile(&[update, add]);

        assert_eq!(forward, backward);
        assert_eq!(forward.created_by.as_deref(), Some("a"));
        assert_eq!(forward.created_on, Some(at(9)));
        assert_eq!(forward.updated_by.as_deref(), Some("b"));
        assert_eq!(forward.updated_on, Some(at(11)));
    }

    #[test]
    fn test_cap_keeps_latest_updater_after_creation_group() {
        let groups = [
            group(ActivityAction::Add, "a", 9),
            group(ActivityAction::Update, "c", 12),
            group(ActivityAction::Update, "b", 11),
        ];
        let metadata = ItemMetadataModel::reconcile(&groups);
        assert_eq!(metadata.updated_by.as_deref(), Some("c"));
        assert_eq!(metadata.updated_on, Some(at(12)));
    }

    // Two users created the same item: both ADD groups fill the cap and the
    // UPDATE group is dropped, so the update is reported as the creation.
    #[test]
    fn test_cap_drops_update_when_two_creation_groups_exist() {
        let groups = [
            group(ActivityAction::Add, "u2", 10),
            group(ActivityAction::Add, "u1", 9),
            group(ActivityAction::Update, "u3", 12),
        ];
        let metadata = ItemMetadataModel::reconcile(&groups);
        assert_eq!(metadata.created_by.as_deref(), Some("u1"));
        assert_eq!(metadata.created_on, Some(at(9)));
        assert_eq!(metadata.updated_by.as_deref(), Some("u1"));
        assert_eq!(metadata.updated_on, Some(at(9)));
    }
}
