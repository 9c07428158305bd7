//! Terrain generation utilities.
//!
//! Elevation profiles for generated trails, using Perlin noise.

mod elevation;

pub use elevation::ElevationGenerator;
