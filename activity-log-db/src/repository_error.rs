use activity_log_api::ApiError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors raised by activity log repositories
///
/// Storage failures keep the SQL text that failed so the HTTP layer can
/// surface it through the error envelope.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String, query: String },

    #[error("Transaction has been consumed")]
    TransactionConsumed,
}

impl RepositoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        RepositoryError::Validation(message.into())
    }

    pub fn invalid_query(message: impl ToString, query: impl Into<String>) -> Self {
        RepositoryError::InvalidQuery {
            message: message.to_string(),
            query: query.into(),
        }
    }

    /// The SQL text attached to a storage failure
    pub fn query(&self) -> Option<&str> {
        match self {
            RepositoryError::InvalidQuery { query, .. } => Some(query),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for RepositoryError {
    fn from(errors: ValidationErrors) -> Self {
        RepositoryError::Validation(errors.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(message) => ApiError::ValidationError(message),
            RepositoryError::InvalidQuery { message, query } => ApiError::InvalidQuery { message, query },
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_keeps_query_text_through_api_error() {
        let err = RepositoryError::invalid_query("relation \"activty\" does not exist", "SELECT * FROM activty");
        assert_eq!(err.query(), Some("SELECT * FROM activty"));

        let api: ApiError = err.into();
        assert_eq!(api.http_status_code(), 500);
        assert_eq!(api.query(), Some("SELECT * FROM activty"));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let api: ApiError = RepositoryError::validation("ids must not be empty").into();
        assert_eq!(api.http_status_code(), 400);
    }

    #[test]
    fn test_consumed_transaction_maps_to_database_error() {
        let api: ApiError = RepositoryError::TransactionConsumed.into();
        assert!(matches!(api, ApiError::DatabaseError(_)));
    }
}
