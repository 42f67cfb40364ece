//! Translation of [`ApiError`] into the `{ "error": { code, message, query? } }` envelope
//! consumed by the HTTP layer.

use serde::Serialize;

use crate::error::ApiError;

const REDACTED_MESSAGE: &str = "Internal Server Error";

/// Settings for the error translation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHandlerSettings {
    /// Redact internal error messages
    pub production: bool,
}

impl ErrorHandlerSettings {
    /// Read `APP_ENV`; only the value `production` turns redaction on
    pub fn from_env() -> Self {
        Self::from_app_env(std::env::var("APP_ENV").ok().as_deref())
    }

    pub fn from_app_env(app_env: Option<&str>) -> Self {
        Self {
            production: matches!(app_env, Some(env) if env.eq_ignore_ascii_case("production")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub http_status_code: u16,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn from_error(err: &ApiError, settings: &ErrorHandlerSettings) -> Self {
        let message = if settings.production && err.is_internal() {
            REDACTED_MESSAGE.to_string()
        } else {
            err.to_string()
        };

        Self {
            http_status_code: err.http_status_code(),
            error: ErrorBody {
                code: err.code(),
                message,
                query: err.query().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_query() -> ApiError {
        ApiError::InvalidQuery {
            message: "column \"bogus\" does not exist".into(),
            query: "SELECT \"bogus\" FROM activity".into(),
        }
    }

    #[test]
    fn test_invalid_query_exposes_query_text() {
        let response = ErrorResponse::from_error(&invalid_query(), &ErrorHandlerSettings::default());
        assert_eq!(response.http_status_code, 500);
        assert_eq!(response.error.query.as_deref(), Some("SELECT \"bogus\" FROM activity"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"]["code"], "INVALID_QUERY");
        assert!(json.get("http_status_code").is_none());
    }

    #[test]
    fn test_production_redacts_internal_messages_only() {
        let settings = ErrorHandlerSettings::from_app_env(Some("production"));

        let internal = ErrorResponse::from_error(&invalid_query(), &settings);
        assert_eq!(internal.error.message, REDACTED_MESSAGE);
        assert!(internal.error.query.is_some());

        let validation = ErrorResponse::from_error(&ApiError::ValidationError("ids must not be empty".into()), &settings);
        assert_eq!(validation.http_status_code, 400);
        assert_eq!(validation.error.message, "Validation error: ids must not be empty");
        assert!(validation.error.query.is_none());
    }

    #[test]
    fn test_settings_from_app_env() {
        assert!(ErrorHandlerSettings::from_app_env(Some("PRODUCTION")).production);
        assert!(!ErrorHandlerSettings::from_app_env(Some("development")).production);
        assert!(!ErrorHandlerSettings::from_app_env(None).production);
    }
}
