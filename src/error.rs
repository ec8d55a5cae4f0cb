//! Error taxonomy for the whole application.
//!
//! Every component boundary returns a typed error; only the web layer
//! converts them into wire envelopes or rendered pages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use std::{error::Error, fmt::Debug};

/// Failures from the CSV product store.
#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("product file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("product file is malformed")]
    Csv(#[from] csv::Error),

    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

/// Failures from the generative-AI provider call.
#[derive(thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed")]
    Http(#[source] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("provider returned no answer")]
    EmptyResponse,

    #[error("could not read image: {0}")]
    BadImage(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Http(err)
        }
    }
}

/// Top-level error surfaced by route handlers.
#[derive(thiserror::Error)]
pub enum AppError {
    #[error("missing required field: {field}")]
    Validation { field: &'static str },

    #[error("product store failure: {0}")]
    Storage(#[from] StoreError),

    #[error("AI provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("upload failed")]
    Upload(#[source] std::io::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API routes answer failures with the `{success:false, error}` envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        }
        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

macro_rules! debug_with_source {
    ($ty:ty) => {
        impl Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self)?;
                if let Some(source) = self.source() {
                    write!(f, " (Caused by: {})", source)?;
                }
                Ok(())
            }
        }
    };
}

debug_with_source!(StoreError);
debug_with_source!(ProviderError);
debug_with_source!(AppError);
