//! Test data generation for the trail server.
//!
//! Produces realistic synthetic GPX trails, with Perlin-noise terrain, GPS
//! jitter, multi-segment recordings and optional elevation dropout, for
//! manual runs of the server and for loader fixtures.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let track = ProceduralGenerator::for_region(Region::BOULDER, 42)
//!     .with_distance(8000.0)
//!     .with_segments(2)
//!     .generate("Mesa Trail", &mut rng)?;
//! std::fs::write("gpx/mesa.gpx", generate_gpx(&track))?;
//! ```

pub mod config;
pub mod gpx;
pub mod sources;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{BoundingBox, Region, SeedConfig};
    pub use crate::gpx::generate_gpx;
    pub use crate::sources::{GenerateError, GeneratedTrack, ProceduralGenerator, TrackConfig};
    pub use crate::terrain::ElevationGenerator;
}
