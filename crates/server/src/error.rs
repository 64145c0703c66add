use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use instruct::InstructError;
use matcher::MatchError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use taskmatch::{LoadError, PipelineError};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Request timeout")]
    Timeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No task sheet has been loaded")]
    NoRecordSet,

    #[error("Task sheet could not be parsed: {0}")]
    Sheet(String),

    #[error(transparent)]
    Instruct(#[from] InstructError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::BadRequest(_) | ServerError::Validation(_) | ServerError::Sheet(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NoRecordSet => StatusCode::CONFLICT,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Instruct(InstructError::MissingApiKey { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Instruct(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ServerError::Instruct(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Timeout => "REQUEST_TIMEOUT",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Validation(_) => "VALIDATION_ERROR",
            ServerError::NoRecordSet => "NO_RECORD_SET",
            ServerError::Sheet(_) => "SHEET_PARSE_ERROR",
            ServerError::Instruct(InstructError::MissingApiKey { .. }) => "PROVIDER_NOT_CONFIGURED",
            ServerError::Instruct(_) => "PROVIDER_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request_failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<MatchError> for ServerError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NoRecordSet => ServerError::NoRecordSet,
            MatchError::Validation(v) => ServerError::Validation(v.to_string()),
            other => ServerError::Config(other.to_string()),
        }
    }
}

impl From<LoadError> for ServerError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Validation(v) => ServerError::Validation(v.to_string()),
            LoadError::Csv(e) => ServerError::Sheet(e.to_string()),
            LoadError::Io(e) => ServerError::Internal(format!("IO error: {e}")),
        }
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Load(e) => e.into(),
            PipelineError::Match(e) => e.into(),
            PipelineError::Config(e) => ServerError::Config(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instruct::Provider;
    use records::ValidationError;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ServerError::from(MatchError::Validation(ValidationError::EmptyRecordSet));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_no_record_set_is_conflict() {
        let err = ServerError::from(MatchError::NoRecordSet);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_provider_errors() {
        let missing = ServerError::from(InstructError::MissingApiKey {
            provider: Provider::Groq,
            env: "GROQ_API_KEY",
        });
        assert_eq!(missing.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let upstream = ServerError::from(InstructError::Status {
            provider: Provider::Gemini,
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.error_code(), "PROVIDER_ERROR");
    }
}
