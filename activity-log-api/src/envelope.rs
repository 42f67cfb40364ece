use serde::{Deserialize, Serialize};

/// Count metadata attached to a response when the caller asks for it (`meta=1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub total_count: usize,
}

/// # Documentation
/// Response envelope shared by every read of the activity log.
///
/// Serializes as `{ "data": [...] }` or `{ "data": [...], "meta": { "total_count": n } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Vec<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl<T> ResponseEnvelope<T> {
    /// Wrap a result set, attaching count metadata only when a total is given
    pub fn wrap(data: Vec<T>, total_count: Option<usize>) -> Self {
        Self {
            data,
            meta: total_count.map(|total_count| ResponseMeta { total_count }),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn total_count(&self) -> Option<usize> {
        self.meta.map(|meta| meta.total_count)
    }
}

impl<T> Default for ResponseEnvelope<T> {
    fn default() -> Self {
        Self { data: Vec::new(), meta: None }
    }
}
