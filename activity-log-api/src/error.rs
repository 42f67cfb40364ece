use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Not found: {0}")]
    NotFound(String),
    
    #[error("Internal error: {0}")]
    InternalError(String),
    
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A statement was rejected by the store. `query` holds the SQL text that failed.
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String, query: String },
}

impl ApiError {
    /// HTTP status derived from the error category
    pub fn http_status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::InternalError(_) | ApiError::DatabaseError(_) | ApiError::InvalidQuery { .. } => 500,
        }
    }

    /// Stable machine readable code for the error envelope
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }

    /// The offending query text, when the error came from a failed statement
    pub fn query(&self) -> Option<&str> {
        match self {
            ApiError::InvalidQuery { query, .. } => Some(query.as_str()),
            _ => None,
        }
    }

    /// Whether the message may leak internals and must be redacted in production
    pub fn is_internal(&self) -> bool {
        self.http_status_code() >= 500
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
