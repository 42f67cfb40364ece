pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use config::DatabaseConfig;
pub use postgres_repositories::PostgresRepositories;
pub use repository::activity::activity_repository::ActivityRepositoryImpl;
pub use repository::executor::Executor;

#[cfg(test)]
pub mod test_helper;
