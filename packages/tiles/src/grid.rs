//! Tile-to-geography mapping.

use std::f64::consts::PI;

use building_map_tiles_models::BoundingBox;

/// Converts a tile address to its WGS84 bounding box.
///
/// Longitude interpolates the tile column linearly across 360 degrees;
/// latitude is the inverse spherical-Mercator projection of the tile's top
/// (`y`) and bottom (`y + 1`) edges. Numerically stable well past zoom 22.
#[must_use]
pub fn tile_bbox(z: u8, x: u32, y: u32) -> BoundingBox {
    let n = 2_f64.powi(i32::from(z));

    let west = f64::from(x) / n * 360.0 - 180.0;
    let east = (f64::from(x) + 1.0) / n * 360.0 - 180.0;
    let north = edge_latitude(f64::from(y) / n);
    let south = edge_latitude((f64::from(y) + 1.0) / n);

    BoundingBox::new(west, south, east, north)
}

/// Latitude in degrees of a horizontal tile edge, where `frac` is the
/// fraction of the world height from the northern Mercator limit.
fn edge_latitude(frac: f64) -> f64 {
    (PI * (1.0 - 2.0 * frac)).sinh().atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Latitude of the spherical-Mercator clamp, `atan(sinh(pi))`.
    const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn zoom_zero_covers_the_world() {
        let bbox = tile_bbox(0, 0, 0);
        assert_close(bbox.west, -180.0);
        assert_close(bbox.east, 180.0);
        assert_close(bbox.north, MERCATOR_MAX_LAT);
        assert_close(bbox.south, -MERCATOR_MAX_LAT);
    }

    #[test]
    fn zoom_one_northwest_quadrant() {
        let bbox = tile_bbox(1, 0, 0);
        assert_close(bbox.west, -180.0);
        assert_close(bbox.east, 0.0);
        assert_close(bbox.south, 0.0);
        assert_close(bbox.north, MERCATOR_MAX_LAT);
    }

    #[test]
    fn bbox_is_ordered_across_zoom_levels() {
        let samples: &[(u8, u32, u32)] = &[
            (0, 0, 0),
            (10, 524, 336),
            (15, 16892, 10895),
            (16, 33784, 21790),
            (22, 2_162_176, 1_394_560),
        ];
        for &(z, x, y) in samples {
            let bbox = tile_bbox(z, x, y);
            assert!(bbox.west < bbox.east, "{z}/{x}/{y}");
            assert!(bbox.south < bbox.north, "{z}/{x}/{y}");
            assert!(bbox.north.is_finite() && bbox.south.is_finite(), "{z}/{x}/{y}");
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn adjacent_tiles_share_exact_edges() {
        let bbox = tile_bbox(15, 16892, 10895);
        assert_eq!(bbox.east, tile_bbox(15, 16893, 10895).west);
        assert_eq!(bbox.south, tile_bbox(15, 16892, 10896).north);
    }

    #[test]
    fn deeper_zoom_nests_inside_parent_tile() {
        let parent = tile_bbox(15, 16892, 10895);
        let child = tile_bbox(16, 33784, 21790);
        assert!(child.west >= parent.west && child.east <= parent.east);
        assert!(child.south >= parent.south && child.north <= parent.north);
    }
}
