pub mod models;
pub mod repository;
pub mod repository_error;

pub use models::*;
pub use repository_error::RepositoryError;
