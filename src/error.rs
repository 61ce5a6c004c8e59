use thiserror::Error;
use wally_types::ErrorBody;

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream wallet service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream wallet service returned {0}")]
    UpstreamStatus(u16),

    #[error("Upstream wallet service returned malformed JSON: {0}")]
    UpstreamPayload(String),

    #[error("Upstream wallet service timed out")]
    UpstreamTimeout,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request<S: Into<String>>(msg: S) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convert AppError to HTTP status codes for web responses
impl AppError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamStatus(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamPayload(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}
