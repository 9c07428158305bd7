//! Geohash encoding of trail start points.
//!
//! Interleaves longitude and latitude bisection bits (longitude first) and
//! packs them five at a time into the geohash base32 alphabet. Nearby
//! coordinates usually share a prefix, which makes the string usable as a
//! coarse spatial bucket.

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Characters produced by [`encode`], roughly 3.7cm x 1.9cm cells.
pub const DEFAULT_PRECISION: usize = 12;

/// Encodes a coordinate at [`DEFAULT_PRECISION`].
pub fn encode(lat: f64, lng: f64) -> String {
    encode_with_precision(lat, lng, DEFAULT_PRECISION)
}

/// Encodes a coordinate into `precision` geohash characters.
///
/// Out-of-range inputs are clamped to the valid latitude/longitude ranges.
pub fn encode_with_precision(lat: f64, lng: f64, precision: usize) -> String {
    let lat = lat.clamp(-90.0, 90.0);
    let lng = lng.clamp(-180.0, 180.0);

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lng_range = (-180.0_f64, 180.0_f64);
    let mut hash = String::with_capacity(precision);
    let mut even_bit = true;

    for _ in 0..precision {
        let mut index = 0usize;
        for _ in 0..5 {
            let (value, range) = if even_bit {
                (lng, &mut lng_range)
            } else {
                (lat, &mut lat_range)
            };
            let mid = (range.0 + range.1) / 2.0;
            index <<= 1;
            if value >= mid {
                index |= 1;
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even_bit = !even_bit;
        }
        hash.push(BASE32[index] as char);
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hash() {
        // Reference value from the geohash.org documentation.
        let hash = encode(57.64911, 10.40744);
        assert_eq!(hash.len(), DEFAULT_PRECISION);
        assert!(hash.starts_with("u4pruydqqvj"), "got {hash}");
    }

    #[test]
    fn test_origin() {
        assert_eq!(encode(0.0, 0.0), "s00000000000");
    }

    #[test]
    fn test_precision() {
        assert_eq!(encode_with_precision(51.5007, -0.1246, 5), "gcpuv");
        assert_eq!(encode_with_precision(51.5007, -0.1246, 0), "");
    }

    #[test]
    fn test_nearby_points_share_prefix() {
        let a = encode(40.0150, -105.2705);
        let b = encode(40.0151, -105.2706);
        assert_eq!(a[..6], b[..6]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(encode(95.0, 200.0), encode(90.0, 180.0));
    }
}
