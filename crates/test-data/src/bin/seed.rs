//! Writes a directory of synthetic GPX trails for the server to load.
//!
//! Run with:
//! ```
//! SEED_OUTPUT_DIR=./gpx SEED_TRAIL_COUNT=50 cargo run -p test-data --bin seed
//! ```

use rand::{Rng, SeedableRng, rngs::StdRng};
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

const TRAIL_NAMES: &[&str] = &[
    "Ridge", "Canyon", "Meadow", "Creek", "Summit", "Lakeshore", "Pine", "Falls",
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedConfig::from_env();
    std::fs::create_dir_all(&config.output_dir)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut points_written = 0;

    for i in 0..config.trail_count {
        let (min_m, max_m) = config.distance_range_m;
        let distance = rng.gen_range(min_m..max_m);
        let segments = rng.gen_range(1..=config.max_segments.max(1));
        let name = format!(
            "{} {} Trail",
            TRAIL_NAMES[i % TRAIL_NAMES.len()],
            i / TRAIL_NAMES.len() + 1
        );

        let terrain_seed = (config.seed as u32).wrapping_add(i as u32);
        let track = ProceduralGenerator::for_region(config.region, terrain_seed)
            .with_distance(distance)
            .with_segments(segments)
            .with_elevation_dropout(config.elevation_dropout)
            .generate(&name, &mut rng)?;

        let path = config.output_dir.join(format!("trail-{i:03}.gpx"));
        std::fs::write(&path, generate_gpx(&track))?;
        points_written += track.point_count();
        tracing::debug!(path = %path.display(), points = track.point_count(), "Wrote trail");
    }

    tracing::info!("Seed completed!");
    tracing::info!("  Directory: {}", config.output_dir.display());
    tracing::info!("  Trails: {}", config.trail_count);
    tracing::info!("  Points: {}", points_written);

    Ok(())
}
