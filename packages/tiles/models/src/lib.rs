#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core value types for the building map tile pipeline.
//!
//! These types are shared by the tile/stats query engines and the HTTP
//! server. They are distinct from the API response types in
//! `building_map_server_models`.

use serde::{Deserialize, Serialize};

/// A slippy-map tile address in the standard `z/x/y` scheme.
///
/// Valid addresses satisfy `0 <= x, y < 2^z`, but no bounds check is
/// performed anywhere: out-of-range coordinates resolve to a bounding box
/// that intersects no stored geometry and therefore to an empty tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level.
    pub z: u8,
    /// Tile column.
    pub x: u32,
    /// Tile row.
    pub y: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// Aggregate building statistics for a bounding box.
///
/// The zero record is the degraded result for an absent viewport, an empty
/// intersection, or a failed query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingStats {
    /// Number of buildings whose stored bbox intersects the query box.
    pub count: u64,
    /// Total footprint area in square meters (EPSG:3857).
    pub area: f64,
}
