//! Response types for API endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{LoadState, NearbyTrail, StoreStatus, TrailSummary};

/// Trail listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TrailListResponse {
    pub trails: Vec<TrailSummary>,
    pub count: usize,
}

impl From<Vec<TrailSummary>> for TrailListResponse {
    fn from(trails: Vec<TrailSummary>) -> Self {
        Self {
            count: trails.len(),
            trails,
        }
    }
}

/// Proximity search response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub trails: Vec<NearbyTrail>,
    pub count: usize,
}

impl From<Vec<NearbyTrail>> for SearchResponse {
    fn from(trails: Vec<NearbyTrail>) -> Self {
        Self {
            count: trails.len(),
            trails,
        }
    }
}

/// Load progress of the trail store.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: LoadState,
    pub loading: bool,
    pub load_complete: bool,
    pub trails_loaded: usize,
}

impl From<StoreStatus> for StatusResponse {
    fn from(status: StoreStatus) -> Self {
        Self {
            status: status.state,
            loading: status.state != LoadState::Ready,
            load_complete: status.state == LoadState::Ready,
            trails_loaded: status.trail_count,
        }
    }
}
