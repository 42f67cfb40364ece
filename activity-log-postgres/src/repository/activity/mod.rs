pub mod activity_repository;
pub mod factory;
pub mod record_parser;

pub use activity_repository::ActivityRepositoryImpl;
pub use factory::{ActivityRepoFactory, ActivityRepositories};
pub use record_parser::RecordParser;
