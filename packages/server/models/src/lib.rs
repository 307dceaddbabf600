#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the building map tile server.
//!
//! These types are serialized to JSON for the HTTP surface. They are
//! separate from the core pipeline types in `building_map_tiles_models` to
//! allow independent evolution of the API contract.

use std::collections::BTreeMap;

use building_map_tiles_models::{BoundingBox, BuildingStats};
use serde::{Deserialize, Serialize};

/// TileJSON discovery document describing the tile endpoint.
///
/// Keys follow the TileJSON convention verbatim (`vector_layers`, not
/// camelCase) so that MapLibre and friends can consume the document as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    /// TileJSON spec version.
    pub tilejson: String,
    /// Human-readable tileset name.
    pub name: String,
    /// Tile URL templates with `{z}/{x}/{y}` placeholders.
    pub tiles: Vec<String>,
    /// Lowest zoom level at which tiles are served non-empty.
    pub minzoom: u8,
    /// Highest zoom level advertised to clients.
    pub maxzoom: u8,
    /// Vector layers contained in each tile.
    pub vector_layers: Vec<VectorLayer>,
}

/// One vector layer entry in the TileJSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorLayer {
    /// Layer name as encoded in the tiles.
    pub id: String,
    /// Attribute names and their value types.
    pub fields: BTreeMap<String, String>,
    /// Lowest zoom this layer appears at.
    pub minzoom: u8,
    /// Highest zoom this layer appears at.
    pub maxzoom: u8,
}

/// Building statistics as returned by the stats endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiStats {
    /// Number of buildings in the queried area.
    pub count: u64,
    /// Total footprint area in square meters.
    pub area: f64,
}

impl From<BuildingStats> for ApiStats {
    fn from(stats: BuildingStats) -> Self {
        Self {
            count: stats.count,
            area: stats.area,
        }
    }
}

/// Query parameters for the stats endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsQueryParams {
    /// Bounding box as `west,south,east,north`. Falls back to the stored
    /// viewport when absent.
    pub bbox: Option<String>,
}

/// The visible map area as reported by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Northern latitude boundary.
    pub north: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Western longitude boundary.
    pub west: f64,
    /// Map zoom level at the time of the report.
    pub zoom: Option<f64>,
}

impl Viewport {
    /// The viewport as a WGS84 bounding box.
    #[must_use]
    pub const fn to_bbox(&self) -> BoundingBox {
        BoundingBox::new(self.west, self.south, self.east, self.north)
    }
}

/// Body of a viewport update posted by the map UI.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportUpdate {
    /// Reported viewport bounds; a missing value is a client error.
    pub bounds: Option<Viewport>,
    /// Map zoom at the time of the report, stored with the bounds.
    pub zoom: Option<f64>,
}

/// Response from the get-bounds endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundsResponse {
    /// The most recently reported viewport, if any.
    pub bounds: Option<Viewport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_converts_to_bbox() {
        let viewport = Viewport {
            north: 52.2,
            south: 52.0,
            east: 5.2,
            west: 5.0,
            zoom: Some(15.0),
        };
        let bbox = viewport.to_bbox();
        assert!((bbox.west - 5.0).abs() < f64::EPSILON);
        assert!((bbox.south - 52.0).abs() < f64::EPSILON);
        assert!((bbox.east - 5.2).abs() < f64::EPSILON);
        assert!((bbox.north - 52.2).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_convert_from_pipeline_record() {
        let api: ApiStats = BuildingStats {
            count: 42,
            area: 1234.5,
        }
        .into();
        assert_eq!(api.count, 42);
        assert!((api.area - 1234.5).abs() < f64::EPSILON);
    }
}
