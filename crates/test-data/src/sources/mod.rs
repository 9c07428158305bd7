//! Track geometry sources.

mod procedural;

pub use procedural::{GenerateError, GeneratedTrack, ProceduralGenerator, TrackConfig};
