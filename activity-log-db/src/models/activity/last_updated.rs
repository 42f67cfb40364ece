use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest ADD/UPDATE of one item by one user.
///
/// An item written by several users yields one row per user. Collapsing to a single
/// row per item is left to the caller; see [`LastUpdatedModel::latest_per_item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdatedModel {
    pub item: String,
    pub user: String,
    pub datetime: DateTime<Utc>,
}

impl LastUpdatedModel {
    /// Reduce `(item, user)` rows to the newest row per item, newest first
    pub fn latest_per_item(rows: &[LastUpdatedModel]) -> Vec<LastUpdatedModel> {
        let mut latest: HashMap<&str, &LastUpdatedModel> = HashMap::new();
        for row in rows {
            latest
                .entry(row.item.as_str())
                .and_modify(|current| {
                    if row.datetime > current.datetime {
                        *current = row;
                    }
                })
                .or_insert(row);
        }

        let mut result: Vec<LastUpdatedModel> = latest.into_values().cloned().collect();
        result.sort_by(|a, b| b.datetime.cmp(&a.datetime).then_with(|| a.item.cmp(&b.item)));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(item: &str, user: &str, hour: u32) -> LastUpdatedModel {
        LastUpdatedModel {
            item: item.to_string(),
            user: user.to_string(),
            datetime: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_latest_per_item_picks_newest_writer() {
        let rows = vec![row("5", "u1", 9), row("7", "u3", 10), row("5", "u2", 11)];
        let latest = LastUpdatedModel::latest_per_item(&rows);
        assert_eq!(latest, vec![row("5", "u2", 11), row("7", "u3", 10)]);
    }

    #[test]
    fn test_latest_per_item_on_empty_input() {
        assert!(LastUpdatedModel::latest_per_item(&[]).is_empty());
    }
}
