//! Configuration types for test data generation.

use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Geographic bounding box defined by southwest and northeast corners.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south)
    pub min_lat: f64,
    /// Minimum longitude (west)
    pub min_lon: f64,
    /// Maximum latitude (north)
    pub max_lat: f64,
    /// Maximum longitude (east)
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Returns a random point within the bounding box.
    pub fn random_point(&self, rng: &mut impl rand::Rng) -> (f64, f64) {
        let lat = rng.gen_range(self.min_lat..self.max_lat);
        let lon = rng.gen_range(self.min_lon..self.max_lon);
        (lat, lon)
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Pre-defined geographic regions for test data generation.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// Reno/Tahoe area - mountain trails with significant elevation changes.
    pub const RENO_TAHOE: BoundingBox = BoundingBox::new(39.0, -120.5, 39.6, -119.5);

    /// Boulder, CO area - popular trails with varied terrain.
    pub const BOULDER: BoundingBox = BoundingBox::new(39.9, -105.5, 40.1, -105.2);

    /// Bernese Oberland - alpine hiking around Grindelwald.
    pub const BERNESE_ALPS: BoundingBox = BoundingBox::new(46.5, 7.8, 46.7, 8.1);
}

/// Configuration for the `seed` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Directory the generated `.gpx` files are written to.
    pub output_dir: PathBuf,

    /// Number of trail files to generate.
    pub trail_count: usize,

    /// Target region for track generation.
    pub region: BoundingBox,

    /// Trail length range in meters (min, max).
    pub distance_range_m: (f64, f64),

    /// Maximum number of segments a trail is split into.
    pub max_segments: usize,

    /// Probability that a point is written without elevation.
    pub elevation_dropout: f64,

    /// RNG seed for reproducible output.
    pub seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./gpx"),
            trail_count: 25,
            region: Region::BOULDER,
            distance_range_m: (1_000.0, 15_000.0),
            max_segments: 3,
            elevation_dropout: 0.05,
            seed: 12345,
        }
    }
}

impl SeedConfig {
    /// Defaults overridden by `SEED_OUTPUT_DIR`, `SEED_TRAIL_COUNT` and `SEED`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("SEED_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(count) = env::var("SEED_TRAIL_COUNT").ok().and_then(|v| v.parse().ok()) {
            config.trail_count = count;
        }
        if let Some(seed) = env::var("SEED").ok().and_then(|v| v.parse().ok()) {
            config.seed = seed;
        }
        config
    }
}
