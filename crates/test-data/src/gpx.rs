//! GPX file generation from generated tracks.
//!
//! Writes GPX 1.1 XML that the trail loader ingests.

use time::format_description::well_known::Rfc3339;

use crate::sources::GeneratedTrack;

/// Generates a GPX 1.1 document for a track.
///
/// The output has:
/// - Document metadata carrying the trail name and description
/// - One `<trk>` with one `<trkseg>` per generated segment
/// - Elevation and timestamp per point only when present
pub fn generate_gpx(track: &GeneratedTrack) -> Vec<u8> {
    let mut gpx = String::new();

    // GPX 1.1 header
    gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    gpx.push('\n');
    gpx.push_str(r#"<gpx version="1.1" creator="trails-test-data""#);
    gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
    gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
    gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
    gpx.push('\n');

    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&track.name)));
    if !track.description.is_empty() {
        gpx.push_str(&format!(
            "    <desc>{}</desc>\n",
            escape_xml(&track.description)
        ));
    }
    gpx.push_str("  </metadata>\n");

    gpx.push_str("  <trk>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&track.name)));

    for segment in &track.segments {
        gpx.push_str("    <trkseg>\n");
        for point in segment {
            gpx.push_str(&format!(
                r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
                point.lat, point.lng
            ));
            gpx.push('\n');

            if let Some(ele) = point.elevation {
                gpx.push_str(&format!("        <ele>{:.2}</ele>\n", ele));
            }

            if let Some(ts) = point.time {
                let formatted = ts.format(&Rfc3339).unwrap_or_default();
                gpx.push_str(&format!("        <time>{}</time>\n", formatted));
            }

            gpx.push_str("      </trkpt>\n");
        }
        gpx.push_str("    </trkseg>\n");
    }

    gpx.push_str("  </trk>\n");
    gpx.push_str("</gpx>\n");

    gpx.into_bytes()
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
