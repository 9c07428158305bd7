//! Perlin noise-based elevation generation.

use noise::{NoiseFn, Perlin};

/// Generates realistic elevation data using Perlin noise.
///
/// Multiple octaves of noise give both large-scale features and
/// small-scale variation.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    /// Base elevation in meters (e.g., valley floor).
    base_elevation: f64,
    /// Scale factor for terrain height variation.
    height_scale: f64,
    /// Spatial frequency in cycles per degree.
    frequency: f64,
    /// Number of noise octaves for detail.
    octaves: u32,
}

impl ElevationGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1500.0,
            height_scale: 500.0,
            frequency: 20.0,
            octaves: 4,
        }
    }

    /// Sierra Nevada terrain around Lake Tahoe (~1900m).
    pub fn reno_tahoe(seed: u32) -> Self {
        Self {
            base_elevation: 1900.0,
            height_scale: 800.0,
            octaves: 5,
            ..Self::new(seed)
        }
    }

    /// Front Range foothills around Boulder (~1650m).
    pub fn boulder(seed: u32) -> Self {
        Self {
            base_elevation: 1650.0,
            height_scale: 600.0,
            ..Self::new(seed)
        }
    }

    /// Alpine valleys and ridges.
    pub fn alpine(seed: u32) -> Self {
        Self {
            base_elevation: 2000.0,
            height_scale: 1200.0,
            frequency: 30.0,
            octaves: 5,
            ..Self::new(seed)
        }
    }

    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    /// Elevation at a coordinate, via fractal Brownian motion.
    ///
    /// Always within `base_elevation ± height_scale`.
    pub fn elevation_at(&self, lat: f64, lon: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += self.perlin.get([lat * frequency, lon * frequency]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        let normalized = (total / max_amplitude).clamp(-1.0, 1.0);
        self.base_elevation + normalized * self.height_scale
    }
}
