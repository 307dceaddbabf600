#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The tile request pipeline: address parsing, tile-to-bbox mapping, and
//! the `DuckDB` aggregation queries that produce Mapbox Vector Tile
//! payloads and viewport statistics.
//!
//! Request-path failures never propagate: a tile that fails to generate
//! degrades to an empty payload and a failed stats query degrades to the
//! zero record, so a single bad query cannot break the map view.

pub mod grid;
pub mod path;
pub mod queries;

use std::time::Instant;

use building_map_tiles_models::{BoundingBox, BuildingStats, TileCoord};
use duckdb::Connection;

/// Errors that can occur while generating tiles or statistics.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    /// `DuckDB` error.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),
}

/// Generates the MVT payload for `coord`.
///
/// Tiles below `min_zoom` are refused up front with an empty payload:
/// densities at low zoom are too high to render meaningfully and the
/// aggregation would be enormous. Query failures are logged and degrade to
/// an empty payload as well; the result is always servable.
#[must_use]
pub fn generate_tile(conn: &Connection, coord: TileCoord, min_zoom: u8) -> Vec<u8> {
    if coord.z < min_zoom {
        return Vec::new();
    }

    let started = Instant::now();
    match queries::tile_mvt(conn, coord) {
        Ok(payload) => {
            log::debug!(
                "Tile {}/{}/{}: query={}ms size={}bytes",
                coord.z,
                coord.x,
                coord.y,
                started.elapsed().as_millis(),
                payload.len()
            );
            payload
        }
        Err(e) => {
            log::error!(
                "Failed to generate tile {}/{}/{}: {e}",
                coord.z,
                coord.x,
                coord.y
            );
            Vec::new()
        }
    }
}

/// Computes building count and total footprint area for `bbox`.
///
/// An absent bounding box (viewport not yet established) short-circuits to
/// the zero record without touching the store. Query failures are logged
/// and degrade to the zero record.
#[must_use]
pub fn query_stats(conn: &Connection, bbox: Option<&BoundingBox>) -> BuildingStats {
    let Some(bbox) = bbox else {
        return BuildingStats::default();
    };

    match queries::stats_in_bbox(conn, bbox) {
        Ok(stats) => stats,
        Err(e) => {
            log::error!("Failed to query building stats: {e}");
            BuildingStats::default()
        }
    }
}
