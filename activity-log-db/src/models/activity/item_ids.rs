/// Item identifiers for batched lookups.
///
/// A single identifier converts into a one element set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIds(Vec<String>);

impl ItemIds {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ItemIds {
    fn from(id: &str) -> Self {
        ItemIds(vec![id.to_string()])
    }
}

impl From<String> for ItemIds {
    fn from(id: String) -> Self {
        ItemIds(vec![id])
    }
}

impl From<Vec<String>> for ItemIds {
    fn from(ids: Vec<String>) -> Self {
        ItemIds(ids)
    }
}

impl From<Vec<&str>> for ItemIds {
    fn from(ids: Vec<&str>) -> Self {
        ItemIds(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ItemIds {
    fn from(ids: &[&str]) -> Self {
        ItemIds(ids.iter().map(|id| id.to_string()).collect())
    }
}
