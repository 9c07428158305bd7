//! Trail listing, lookup and proximity search handlers.

use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query, rejection::QueryRejection},
    response::{IntoResponse, Json, Response},
};

use crate::{
    errors::AppError,
    models::{LoadState, Trail},
    store::{self, TrailStore},
    types::{SearchQuery, SearchResponse, SearchSort, TrailListResponse},
};

fn ensure_ready(store: &TrailStore) -> Result<(), AppError> {
    match store.status().state {
        LoadState::Ready => Ok(()),
        _ => Err(AppError::NotReady),
    }
}

/// List all trails without point data.
#[utoipa::path(
    get,
    path = "/trails",
    tag = "trails",
    responses(
        (status = 200, description = "All loaded trails", body = TrailListResponse),
        (status = 503, description = "Trails are still loading")
    )
)]
pub async fn list_trails(
    Extension(store): Extension<Arc<TrailStore>>,
) -> Result<Json<TrailListResponse>, AppError> {
    ensure_ready(&store)?;
    Ok(Json(store.list_all().into()))
}

/// Get a trail with its full point sequence.
#[utoipa::path(
    get,
    path = "/route/{id}",
    tag = "trails",
    params(
        ("id" = String, Path, description = "Trail ID (GPX file name without extension)")
    ),
    responses(
        (status = 200, description = "Trail with points", body = Trail),
        (status = 404, description = "Trail not found"),
        (status = 503, description = "Trails are still loading")
    )
)]
pub async fn get_trail(
    Extension(store): Extension<Arc<TrailStore>>,
    Path(id): Path<String>,
) -> Result<Json<Arc<Trail>>, AppError> {
    ensure_ready(&store)?;
    let trail = store.get_by_id(&id).ok_or(AppError::NotFound)?;
    Ok(Json(trail))
}

/// Search trails by distance from a point.
///
/// Without both `near_lat` and `near_lng` this behaves like `/trails`. Results
/// are in store order unless `sort=distance` is given.
#[utoipa::path(
    get,
    path = "/search",
    tag = "trails",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching trails", body = SearchResponse),
        (status = 400, description = "Invalid search parameters"),
        (status = 503, description = "Trails are still loading")
    )
)]
pub async fn search_trails(
    Extension(store): Extension<Arc<TrailStore>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    ensure_ready(&store)?;
    let Query(query) = query?;

    let Some((lat, lng)) = query.origin()? else {
        let all: TrailListResponse = store.list_all().into();
        return Ok(Json(all).into_response());
    };
    let max_distance = query.max_distance()?;

    let mut results = store.search_near(lat, lng, max_distance);
    if query.sort == SearchSort::Distance {
        store::sort_by_distance(&mut results);
    }
    tracing::debug!(lat, lng, ?max_distance, hits = results.len(), "Trail search");

    Ok(Json(SearchResponse::from(results)).into_response())
}
