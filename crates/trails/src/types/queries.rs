//! Query parameter types for API endpoints.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;

/// Trail search query parameters.
///
/// Proximity filtering applies only when both `near_lat` and `near_lng` are given.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Latitude of the search origin in degrees
    pub near_lat: Option<f64>,
    /// Longitude of the search origin in degrees
    pub near_lng: Option<f64>,
    /// Maximum distance in meters from the origin to a trail's start; absent or 0 means no limit
    pub near_distance: Option<f64>,
    /// Result ordering
    #[serde(default)]
    pub sort: SearchSort,
}

/// Search result ordering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    /// Store order, which follows file discovery order
    #[default]
    Store,
    /// Nearest start point first
    Distance,
}

impl SearchQuery {
    /// The validated search origin, if the query asks for a proximity search.
    pub fn origin(&self) -> Result<Option<(f64, f64)>, AppError> {
        let (Some(lat), Some(lng)) = (self.near_lat, self.near_lng) else {
            return Ok(None);
        };
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::InvalidInput(format!(
                "near_lat must be between -90 and 90, got {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::InvalidInput(format!(
                "near_lng must be between -180 and 180, got {lng}"
            )));
        }
        Ok(Some((lat, lng)))
    }

    /// The validated distance cap in meters.
    pub fn max_distance(&self) -> Result<Option<f64>, AppError> {
        match self.near_distance {
            Some(d) if d.is_nan() || d < 0.0 => Err(AppError::InvalidInput(format!(
                "near_distance must be a non-negative number of meters, got {d}"
            ))),
            other => Ok(other),
        }
    }
}
