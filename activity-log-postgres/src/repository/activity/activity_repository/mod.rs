pub mod repo_impl;
pub mod exist_by_ids;
pub mod feed_query;
pub mod fetch_feed;
pub mod fetch_revisions;
pub mod get_last_updated;
pub mod get_metadata;
pub mod record_activity;
pub mod record_login;
#[cfg(test)]
pub mod test_utils;

pub use feed_query::{FeedQuery, FeedScope};
pub use repo_impl::ActivityRepositoryImpl;
