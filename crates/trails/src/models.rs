use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// A single recorded position of a trail.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackPoint {
    pub lat: f64,
    pub lng: f64,
    /// Elevation in meters, when the source file recorded one.
    #[serde(rename = "ele", skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub time: Option<OffsetDateTime>,
}

impl TrackPoint {
    pub fn new(lat: f64, lng: f64, elevation: Option<f64>) -> Self {
        Self {
            lat,
            lng,
            elevation,
            time: None,
        }
    }
}

/// Elevation extremes of a trail in meters.
///
/// When `measured` is false no point carried elevation data and `min`/`max`
/// are both the `0` sentinel, not a sea-level reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct ElevationRange {
    pub min: f64,
    pub max: f64,
    pub measured: bool,
}

/// One ingested GPX file.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Trail {
    /// File name without directory or extension.
    pub id: String,
    pub name: String,
    pub description: String,
    /// First recorded point, `0.0` when the file has no points.
    pub start_lat: f64,
    pub start_lng: f64,
    /// Geohash of the start point, empty when the file has no points.
    #[serde(rename = "geohash")]
    pub bucket_key: String,
    /// Path length in meters.
    pub distance: f64,
    pub elevation: ElevationRange,
    pub points: Vec<TrackPoint>,
}

/// A [`Trail`] without its point sequence, as returned by listings and searches.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrailSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_lat: f64,
    pub start_lng: f64,
    #[serde(rename = "geohash")]
    pub bucket_key: String,
    pub distance: f64,
    pub elevation: ElevationRange,
    pub point_count: usize,
}

impl From<&Trail> for TrailSummary {
    fn from(trail: &Trail) -> Self {
        Self {
            id: trail.id.clone(),
            name: trail.name.clone(),
            description: trail.description.clone(),
            start_lat: trail.start_lat,
            start_lng: trail.start_lng,
            bucket_key: trail.bucket_key.clone(),
            distance: trail.distance,
            elevation: trail.elevation,
            point_count: trail.points.len(),
        }
    }
}

/// A search hit: the trail plus its start point's distance from the query.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearbyTrail {
    #[serde(flatten)]
    pub trail: TrailSummary,
    /// Meters from the query coordinate to the trail's start point.
    pub distance_to_start: f64,
}

/// Load lifecycle of a [`crate::store::TrailStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    NotStarted,
    Loading,
    Ready,
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadState::NotStarted => "not_started",
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// Snapshot of the store's lifecycle state and size, read under one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStatus {
    pub state: LoadState,
    pub trail_count: usize,
}
