use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("URL parameter is required")]
    MissingUrl,
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Invalid request body: cannot read url of null")]
    NullBody,
    #[error(transparent)]
    Extraction(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    status: bool,
    developer: &'a str,
    message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) | ApiError::NullBody | ApiError::Extraction(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Renders `{status: false, developer, message}` with the matching status code.
    pub fn into_response_for(self, developer: &str) -> Response {
        let envelope = ErrorEnvelope {
            status: false,
            developer,
            message: self.to_string(),
        };
        (self.status_code(), Json(envelope)).into_response()
    }
}
