use axum::response::Json;
use utoipa::OpenApi;

use crate::{
    handlers,
    models::{ElevationRange, LoadState, NearbyTrail, TrackPoint, Trail, TrailSummary},
    types::{SearchResponse, SearchSort, StatusResponse, TrailListResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Trails API", description = "Lookup and proximity search over loaded GPX trails"),
    paths(
        handlers::health_check,
        handlers::get_status,
        handlers::list_trails,
        handlers::get_trail,
        handlers::search_trails,
    ),
    components(schemas(
        Trail,
        TrailSummary,
        TrackPoint,
        ElevationRange,
        NearbyTrail,
        LoadState,
        SearchSort,
        StatusResponse,
        TrailListResponse,
        SearchResponse,
    )),
    tags(
        (name = "status", description = "Service health and load progress"),
        (name = "trails", description = "Trail lookup and search"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
