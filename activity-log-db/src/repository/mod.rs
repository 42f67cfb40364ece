pub mod exist_by_ids;
pub mod feed_params;
pub mod fetch_feed;
pub mod fetch_revisions;
pub mod get_last_updated;
pub mod get_metadata;
pub mod pagination;
pub mod record_activity;
pub mod record_login;

// Re-exports
pub use exist_by_ids::*;
pub use feed_params::*;
pub use fetch_feed::*;
pub use fetch_revisions::*;
pub use get_last_updated::*;
pub use get_metadata::*;
pub use pagination::*;
pub use record_activity::*;
pub use record_login::*;
