pub mod activity;
pub mod executor;
