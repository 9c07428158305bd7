//! Health check and load status handlers.

use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};

use crate::{store::TrailStore, types::StatusResponse};

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses(
        (status = 200, description = "Health check passed")
    )
)]
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Report whether trails are still loading and how many are available.
#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses(
        (status = 200, description = "Load status", body = StatusResponse)
    )
)]
pub async fn get_status(Extension(store): Extension<Arc<TrailStore>>) -> Json<StatusResponse> {
    Json(store.status().into())
}
