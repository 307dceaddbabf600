//! Tile address parsing.

use building_map_tiles_models::TileCoord;

/// Parses a request path of the exact shape `/tiles/<z>/<x>/<y>.pbf`.
///
/// Returns `None` for anything else: wrong prefix or suffix, wrong segment
/// count, or non-numeric components. Callers treat `None` as "not a tile
/// request" and fall through to other routes. Coordinates are not checked
/// against `2^z`; out-of-range addresses resolve to an empty tile
/// downstream.
#[must_use]
pub fn parse_tile_path(path: &str) -> Option<TileCoord> {
    let rest = path.strip_prefix("/tiles/")?.strip_suffix(".pbf")?;
    let mut segments = rest.split('/');

    let z = parse_segment(segments.next()?)?;
    let x = parse_segment(segments.next()?)?;
    let y = parse_segment(segments.next()?)?;

    if segments.next().is_some() {
        return None;
    }

    Some(TileCoord::new(u8::try_from(z).ok()?, x, y))
}

/// Parses one path segment as a plain decimal integer. Signs, whitespace,
/// and empty segments are rejected.
fn parse_segment(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_valid_tile_path() {
        assert_eq!(
            parse_tile_path("/tiles/15/16892/10895.pbf"),
            Some(TileCoord::new(15, 16892, 10895))
        );
    }

    #[test]
    fn parses_zoom_zero() {
        assert_eq!(
            parse_tile_path("/tiles/0/0/0.pbf"),
            Some(TileCoord::new(0, 0, 0))
        );
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert_eq!(parse_tile_path("/tiles/abc/1/2.pbf"), None);
        assert_eq!(parse_tile_path("/tiles/1/2/x.pbf"), None);
    }

    #[test]
    fn rejects_signed_components() {
        assert_eq!(parse_tile_path("/tiles/15/-1/2.pbf"), None);
        assert_eq!(parse_tile_path("/tiles/+5/1/2.pbf"), None);
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert_eq!(parse_tile_path("/tiles/1/2.pbf"), None);
        assert_eq!(parse_tile_path("/tiles/1/2/3/4.pbf"), None);
        assert_eq!(parse_tile_path("/tiles/1//2.pbf"), None);
    }

    #[test]
    fn rejects_wrong_suffix_and_prefix() {
        assert_eq!(parse_tile_path("/tiles/1/2/3.png"), None);
        assert_eq!(parse_tile_path("/tiles/1/2/3"), None);
        assert_eq!(parse_tile_path("/tile/1/2/3.pbf"), None);
        assert_eq!(parse_tile_path("/foo"), None);
        assert_eq!(parse_tile_path("/"), None);
    }

    #[test]
    fn rejects_zoom_that_overflows_u8() {
        assert_eq!(parse_tile_path("/tiles/300/0/0.pbf"), None);
    }
}
