//! Derives a [`Trail`] from a decoded GPX document.
//!
//! Extraction never fails: empty or degenerate documents produce a trail with
//! zeroed derived fields so that one odd file cannot abort a batch load.

use gpx::{Gpx, Waypoint};
use time::OffsetDateTime;

use crate::{
    geo_math::haversine_distance,
    geohash,
    models::{ElevationRange, TrackPoint, Trail},
};

/// An accumulator fed every point of a document in order.
pub trait TrackMetric {
    type Output;

    /// Called before the first point of each track segment.
    fn start_segment(&mut self) {}
    fn next_point(&mut self, point: &Waypoint);
    fn finish(&mut self) -> Self::Output;
}

/// Sum of consecutive-point distances. Points in different segments are never paired.
#[derive(Debug, Clone, Default)]
pub struct DistanceMetric {
    total_distance: f64,
    last_point: Option<(f64, f64)>,
}

impl TrackMetric for DistanceMetric {
    type Output = f64;

    fn start_segment(&mut self) {
        self.last_point = None;
    }

    fn next_point(&mut self, wpt: &Waypoint) {
        let point = wpt.point();
        let (lat, lng) = (point.y(), point.x());
        if let Some((prev_lat, prev_lng)) = self.last_point {
            self.total_distance += haversine_distance(prev_lat, prev_lng, lat, lng);
        }
        self.last_point = Some((lat, lng));
    }

    fn finish(&mut self) -> f64 {
        self.total_distance
    }
}

/// Lowest and highest elevation over points that carry one.
#[derive(Debug, Clone, Default)]
pub struct ElevationRangeMetric {
    range: Option<(f64, f64)>,
}

impl TrackMetric for ElevationRangeMetric {
    type Output = ElevationRange;

    fn next_point(&mut self, wpt: &Waypoint) {
        let Some(elevation) = wpt.elevation else {
            return;
        };
        self.range = Some(match self.range {
            Some((min, max)) => (min.min(elevation), max.max(elevation)),
            None => (elevation, elevation),
        });
    }

    fn finish(&mut self) -> ElevationRange {
        match self.range {
            Some((min, max)) => ElevationRange {
                min,
                max,
                measured: true,
            },
            None => ElevationRange::default(),
        }
    }
}

/// First point of the first non-empty segment.
#[derive(Debug, Clone, Default)]
pub struct StartPointMetric {
    start: Option<(f64, f64)>,
}

impl TrackMetric for StartPointMetric {
    type Output = Option<(f64, f64)>;

    fn next_point(&mut self, wpt: &Waypoint) {
        if self.start.is_none() {
            let point = wpt.point();
            self.start = Some((point.y(), point.x()));
        }
    }

    fn finish(&mut self) -> Option<(f64, f64)> {
        self.start
    }
}

/// Flattens every segment's points into one sequence.
#[derive(Debug, Clone, Default)]
pub struct PointCollector {
    points: Vec<TrackPoint>,
}

impl TrackMetric for PointCollector {
    type Output = Vec<TrackPoint>;

    fn next_point(&mut self, wpt: &Waypoint) {
        let point = wpt.point();
        self.points.push(TrackPoint {
            lat: point.y(),
            lng: point.x(),
            elevation: wpt.elevation,
            time: wpt.time.map(OffsetDateTime::from),
        });
    }

    fn finish(&mut self) -> Vec<TrackPoint> {
        std::mem::take(&mut self.points)
    }
}

#[derive(Debug, Clone, Default)]
struct TrailMetrics {
    distance: DistanceMetric,
    elevation: ElevationRangeMetric,
    start: StartPointMetric,
    points: PointCollector,
}

impl TrailMetrics {
    fn start_segment(&mut self) {
        self.distance.start_segment();
        self.elevation.start_segment();
        self.start.start_segment();
        self.points.start_segment();
    }

    fn next_point(&mut self, point: &Waypoint) {
        self.distance.next_point(point);
        self.elevation.next_point(point);
        self.start.next_point(point);
        self.points.next_point(point);
    }
}

/// Builds the trail stored under `id` from a decoded document.
pub fn extract(doc: &Gpx, id: impl Into<String>) -> Trail {
    let mut acc = TrailMetrics::default();

    for track in &doc.tracks {
        for segment in &track.segments {
            acc.start_segment();
            for point in &segment.points {
                acc.next_point(point);
            }
        }
    }

    let (name, description) = document_text(doc);
    let start = acc.start.finish();
    let (start_lat, start_lng) = start.unwrap_or((0.0, 0.0));
    let bucket_key = start
        .map(|(lat, lng)| geohash::encode(lat, lng))
        .unwrap_or_default();

    Trail {
        id: id.into(),
        name,
        description,
        start_lat,
        start_lng,
        bucket_key,
        distance: acc.distance.finish(),
        elevation: acc.elevation.finish(),
        points: acc.points.finish(),
    }
}

/// Metadata name/description, falling back to the first track's.
fn document_text(doc: &Gpx) -> (String, String) {
    let metadata = doc.metadata.as_ref();
    let first_track = doc.tracks.first();

    let name = metadata
        .and_then(|m| m.name.clone())
        .or_else(|| first_track.and_then(|t| t.name.clone()))
        .unwrap_or_default();
    let description = metadata
        .and_then(|m| m.description.clone())
        .or_else(|| first_track.and_then(|t| t.description.clone()))
        .unwrap_or_default();

    (name, description)
}
