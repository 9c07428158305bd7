//! Procedural track generation.

use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use trails::{geo_math::haversine_distance, models::TrackPoint};

use crate::config::BoundingBox;
use crate::terrain::ElevationGenerator;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid jitter configuration: {0}")]
    Jitter(#[from] NormalError),
}

/// Configuration for procedural track generation.
#[derive(Debug, Clone)]
pub struct TrackConfig {
    /// Target distance in meters.
    pub distance_meters: f64,
    /// Starting point (lat, lon). If None, random within bounds.
    pub start_point: Option<(f64, f64)>,
    /// Geographic bounds for the track.
    pub bounds: BoundingBox,
    /// GPS position jitter standard deviation in meters.
    pub gps_jitter_m: f64,
    /// GPS elevation jitter standard deviation in meters.
    pub elevation_jitter_m: f64,
    /// Approximate distance between track points in meters.
    pub point_spacing_m: f64,
    /// Number of track segments the path is split into.
    pub segment_count: usize,
    /// Probability (0.0 - 1.0) that a point is recorded without elevation.
    pub elevation_dropout: f64,
    /// Seconds between consecutive points; `None` writes no timestamps.
    pub sample_interval_s: Option<f64>,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5000.0,
            start_point: None,
            bounds: crate::config::Region::BOULDER,
            gps_jitter_m: 3.0,
            elevation_jitter_m: 5.0,
            point_spacing_m: 10.0,
            segment_count: 1,
            elevation_dropout: 0.0,
            sample_interval_s: Some(5.0),
        }
    }
}

/// A generated trail ready to be written as GPX.
#[derive(Debug, Clone)]
pub struct GeneratedTrack {
    pub name: String,
    pub description: String,
    pub segments: Vec<Vec<TrackPoint>>,
}

impl GeneratedTrack {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    /// Path length in meters, summed within segments only.
    pub fn distance(&self) -> f64 {
        self.segments
            .iter()
            .flat_map(|seg| seg.windows(2))
            .map(|w| haversine_distance(w[0].lat, w[0].lng, w[1].lat, w[1].lng))
            .sum()
    }
}

/// Generates synthetic GPS tracks with realistic characteristics.
pub struct ProceduralGenerator {
    config: TrackConfig,
    elevation: ElevationGenerator,
}

impl ProceduralGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            config: TrackConfig::default(),
            elevation: ElevationGenerator::boulder(seed),
        }
    }

    /// Creates a generator for a specific region.
    pub fn for_region(bounds: BoundingBox, seed: u32) -> Self {
        let elevation = match bounds.center() {
            (lat, lon) if lon > 0.0 && lat > 45.0 => ElevationGenerator::alpine(seed),
            (lat, _) if lat < 39.8 => ElevationGenerator::reno_tahoe(seed),
            _ => ElevationGenerator::boulder(seed),
        };

        Self {
            config: TrackConfig {
                bounds,
                ..Default::default()
            },
            elevation,
        }
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.config.start_point = Some((lat, lon));
        self
    }

    pub fn with_gps_jitter(mut self, meters: f64) -> Self {
        self.config.gps_jitter_m = meters;
        self
    }

    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.config.point_spacing_m = meters;
        self
    }

    pub fn with_segments(mut self, count: usize) -> Self {
        self.config.segment_count = count.max(1);
        self
    }

    pub fn with_elevation_dropout(mut self, probability: f64) -> Self {
        self.config.elevation_dropout = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_sample_interval(mut self, seconds: Option<f64>) -> Self {
        self.config.sample_interval_s = seconds;
        self
    }

    /// Generates a named track, split into the configured number of segments.
    pub fn generate(
        &self,
        name: &str,
        rng: &mut impl Rng,
    ) -> Result<GeneratedTrack, GenerateError> {
        let start = self
            .config
            .start_point
            .unwrap_or_else(|| self.config.bounds.random_point(rng));

        let path = self.generate_path(start, rng);
        let points = self.record(&path, rng)?;

        let chunk = points.len().div_ceil(self.config.segment_count).max(1);
        let segments = points.chunks(chunk).map(<[TrackPoint]>::to_vec).collect();

        Ok(GeneratedTrack {
            name: name.to_string(),
            description: format!("{:.1} km generated trail", self.config.distance_meters / 1000.0),
            segments,
        })
    }

    /// Generates a simple path (coordinates only).
    pub fn generate_path(&self, start: (f64, f64), rng: &mut impl Rng) -> Vec<(f64, f64)> {
        let mut path = vec![start];
        let mut current = start;
        let mut total_distance = 0.0;

        // Random walk with some momentum to create natural-looking paths
        let mut heading = rng.gen_range(0.0..std::f64::consts::TAU);

        while total_distance < self.config.distance_meters {
            heading += rng.gen_range(-0.3..0.3);

            let step = self.config.point_spacing_m * rng.gen_range(0.8..1.2);

            // Rough approximation: 1 degree lat ≈ 111km, lon shrinks with latitude
            let lat_delta = (step * heading.cos()) / 111_000.0;
            let lon_delta = (step * heading.sin()) / (111_000.0 * current.0.to_radians().cos());

            let (next_lat, next_lon, bounced_heading) =
                self.apply_bounds(current.0 + lat_delta, current.1 + lon_delta, heading);
            heading = bounced_heading;

            current = (next_lat, next_lon);
            path.push(current);
            total_distance += step;
        }

        path
    }

    /// Applies bounds checking with heading reversal.
    fn apply_bounds(&self, lat: f64, lon: f64, heading: f64) -> (f64, f64, f64) {
        let b = &self.config.bounds;
        let mut new_heading = heading;

        let lat = if lat < b.min_lat {
            new_heading = std::f64::consts::PI - heading;
            b.min_lat + (b.min_lat - lat).min(0.001)
        } else if lat > b.max_lat {
            new_heading = std::f64::consts::PI - heading;
            b.max_lat - (lat - b.max_lat).min(0.001)
        } else {
            lat
        };

        let lon = if lon < b.min_lon {
            new_heading = -heading;
            b.min_lon + (b.min_lon - lon).min(0.001)
        } else if lon > b.max_lon {
            new_heading = -heading;
            b.max_lon - (lon - b.max_lon).min(0.001)
        } else {
            lon
        };

        (lat, lon, new_heading)
    }

    /// Turns a path into recorded points with GPS noise, elevation and timestamps.
    fn record(
        &self,
        path: &[(f64, f64)],
        rng: &mut impl Rng,
    ) -> Result<Vec<TrackPoint>, GenerateError> {
        let jitter = Normal::new(0.0, self.config.gps_jitter_m / 111_000.0)?;
        let elev_jitter = Normal::new(0.0, self.config.elevation_jitter_m)?;
        let started = OffsetDateTime::now_utc();

        let points = path
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| {
                let elevation = if rng.r#gen::<f64>() < self.config.elevation_dropout {
                    None
                } else {
                    Some(self.elevation.elevation_at(lat, lon) + elev_jitter.sample(rng))
                };
                let time = self
                    .config
                    .sample_interval_s
                    .map(|s| started + Duration::seconds_f64(s * i as f64));

                TrackPoint {
                    lat: lat + jitter.sample(rng),
                    lng: lon + jitter.sample(rng),
                    elevation,
                    time,
                }
            })
            .collect();

        Ok(points)
    }
}
