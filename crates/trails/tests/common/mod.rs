//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;

use trails::models::{ElevationRange, TrackPoint, Trail};

pub type Point = (f64, f64, Option<f64>);

/// Renders a GPX 1.1 document with one track holding the given segments.
pub fn gpx_document(name: &str, description: &str, segments: &[&[Point]]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="trails-tests" xmlns="http://www.topografix.com/GPX/1/1">
"#,
    );
    xml.push_str(&format!("  <metadata>\n    <name>{name}</name>\n"));
    if !description.is_empty() {
        xml.push_str(&format!("    <desc>{description}</desc>\n"));
    }
    xml.push_str("  </metadata>\n");
    xml.push_str("  <trk>\n");
    for segment in segments {
        xml.push_str("    <trkseg>\n");
        for (lat, lng, ele) in segment.iter() {
            xml.push_str(&format!("      <trkpt lat=\"{lat}\" lon=\"{lng}\">"));
            if let Some(ele) = ele {
                xml.push_str(&format!("<ele>{ele}</ele>"));
            }
            xml.push_str("</trkpt>\n");
        }
        xml.push_str("    </trkseg>\n");
    }
    xml.push_str("  </trk>\n</gpx>\n");
    xml
}

pub fn write_gpx(dir: &Path, file_name: &str, name: &str, segments: &[&[Point]]) {
    let xml = gpx_document(name, "", segments);
    std::fs::write(dir.join(file_name), xml).expect("Failed to write GPX fixture");
}

/// A fully populated trail whose every field is derived from `seed`,
/// so a reader can check that what it sees is internally consistent.
pub fn seeded_trail(seed: usize) -> Trail {
    let lat = (seed % 170) as f64 * 0.5 - 42.0;
    let lng = (seed % 350) as f64 * 0.5 - 87.0;
    let points: Vec<TrackPoint> = (0..=seed % 50)
        .map(|i| TrackPoint::new(lat + i as f64 * 1e-4, lng, Some(seed as f64 + i as f64)))
        .collect();

    Trail {
        id: format!("trail-{seed}"),
        name: format!("Trail {seed}"),
        description: format!("Seeded fixture {seed}"),
        start_lat: lat,
        start_lng: lng,
        bucket_key: trails::geohash::encode(lat, lng),
        distance: seed as f64 * 10.0,
        elevation: ElevationRange {
            min: seed as f64,
            max: seed as f64 + (seed % 50) as f64,
            measured: true,
        },
        points,
    }
}

/// True when `trail` is exactly what [`seeded_trail`] built for its id.
pub fn is_consistent(trail: &Trail) -> bool {
    let Some(seed) = trail
        .id
        .strip_prefix("trail-")
        .and_then(|s| s.parse::<usize>().ok())
    else {
        return false;
    };
    *trail == seeded_trail(seed)
}
