use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while loading the input datasets at startup.
///
/// Every variant is fatal: the dashboard refuses to start on bad input.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read CSV {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },
    #[error("{file}: line {line}: cannot parse {column} value '{value}'")]
    InvalidValue {
        file: String,
        line: u64,
        column: String,
        value: String,
    },
}

/// Errors returned by the HTTP and WebSocket handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidFilter(message) => {
                tracing::warn!(%message, "Rejected dashboard filter");
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
