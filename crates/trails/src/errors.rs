use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Trails are still loading")]
    NotReady,

    #[error("Trail not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "Trails are still loading. Please try again in a moment.",
                    "loading": true,
                }),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Trail not found" })),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
