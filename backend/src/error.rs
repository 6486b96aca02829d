use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Errors surfaced by the HTTP handlers. All of them map to a 500 response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Database read or write failed
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// The blocking thread pool dropped the job
    #[error("blocking task canceled")]
    Blocking(#[from] BlockingError),

    /// A handler panicked while holding the service lock
    #[error("service state poisoned")]
    Poisoned,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("{self}");
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}
