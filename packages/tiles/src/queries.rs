//! Raw aggregation queries against the buildings store.
//!
//! Both queries pre-filter rows with the cheap struct-typed `bbox` column
//! comparison before any exact geometry work, and bind every value as a
//! typed query parameter.

use building_map_tiles_models::{BoundingBox, BuildingStats, TileCoord};
use duckdb::Connection;

use crate::{TileError, grid};

/// Runs the MVT aggregation for one tile and returns the encoded payload.
///
/// Surviving geometries are reprojected from EPSG:4326 to EPSG:3857,
/// clipped to the tile envelope, and serialized into a single `buildings`
/// layer carrying `id`, `name`, `height`, and `class`. Zero matching rows
/// yield an empty payload.
///
/// # Errors
///
/// Returns [`TileError`] if the query fails.
pub fn tile_mvt(conn: &Connection, coord: TileCoord) -> Result<Vec<u8>, TileError> {
    let bbox = grid::tile_bbox(coord.z, coord.x, coord.y);

    let mut stmt = conn.prepare(
        "SELECT ST_AsMVT(tile, 'buildings') AS mvt
         FROM (
             SELECT
                 ST_AsMVTGeom(
                     ST_Transform(geometry, 'EPSG:4326', 'EPSG:3857', TRUE),
                     ST_Extent(ST_TileEnvelope(?, ?, ?))
                 ) AS geometry,
                 id,
                 name,
                 height,
                 class
             FROM buildings
             WHERE bbox.xmin <= ?
               AND bbox.xmax >= ?
               AND bbox.ymin <= ?
               AND bbox.ymax >= ?
         ) AS tile
         WHERE geometry IS NOT NULL",
    )?;

    let result = stmt.query_row(
        duckdb::params![
            coord.z, coord.x, coord.y, bbox.east, bbox.west, bbox.north, bbox.south,
        ],
        |row| row.get::<_, Option<Vec<u8>>>(0),
    );

    match result {
        Ok(payload) => Ok(payload.unwrap_or_default()),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Counts buildings and sums their reprojected footprint area within
/// `bbox`. A sum over zero rows coalesces to `0`, never to NULL.
///
/// # Errors
///
/// Returns [`TileError`] if the query fails.
pub fn stats_in_bbox(conn: &Connection, bbox: &BoundingBox) -> Result<BuildingStats, TileError> {
    let mut stmt = conn.prepare(
        "SELECT
             COUNT(*) AS count,
             COALESCE(SUM(ST_Area(ST_Transform(geometry, 'EPSG:4326', 'EPSG:3857', TRUE))), 0) AS area
         FROM buildings
         WHERE bbox.xmin <= ?
           AND bbox.xmax >= ?
           AND bbox.ymin <= ?
           AND bbox.ymax >= ?",
    )?;

    let (count, area) = stmt.query_row(
        duckdb::params![bbox.east, bbox.west, bbox.north, bbox.south],
        |row| Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?)),
    )?;

    Ok(BuildingStats {
        count: u64::try_from(count).unwrap_or(0),
        area,
    })
}
