//! HTTP handler functions for the building map tile server.

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, http::Method, web};
use building_map_server_models::{
    ApiStats, BoundsResponse, StatsQueryParams, TileJson, VectorLayer, ViewportUpdate,
};
use building_map_tiles::{generate_tile, path::parse_tile_path, query_stats};
use building_map_tiles_models::{BoundingBox, BuildingStats};

use crate::AppState;

/// Content type for Mapbox Vector Tile payloads.
const MVT_CONTENT_TYPE: &str = "application/vnd.mapbox-vector-tile";

/// Name of the single layer encoded in every tile.
const LAYER_NAME: &str = "buildings";

/// Catch-all route. Serves `GET /tiles/{z}/{x}/{y}.pbf`, answers bare
/// `OPTIONS` probes, and 404s everything else.
///
/// Tile payloads are stable for the lifetime of the store snapshot, so
/// clients may cache them for an hour. An empty payload is a well-formed
/// "no features here" result and is cached the same way.
pub async fn tile(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }

    let Some(coord) = parse_tile_path(req.path()) else {
        return HttpResponse::NotFound().finish();
    };

    if req.method() != Method::GET {
        return HttpResponse::NotFound().finish();
    }

    let pool = Arc::clone(&state.pool);
    let min_zoom = state.min_zoom;
    let payload = web::block(move || {
        let conn = pool.acquire();
        generate_tile(&conn, coord, min_zoom)
    })
    .await
    .unwrap_or_else(|e| {
        log::error!(
            "Tile worker failed for {}/{}/{}: {e}",
            coord.z,
            coord.x,
            coord.y
        );
        Vec::new()
    });

    HttpResponse::Ok()
        .content_type(MVT_CONTENT_TYPE)
        .insert_header(("Cache-Control", "public, max-age=3600"))
        .body(payload)
}

/// `GET /` and `GET /tiles.json`
///
/// TileJSON discovery document pointing at the tile route.
pub async fn tilejson(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let info = req.connection_info();
    let template = format!(
        "{}://{}/tiles/{{z}}/{{x}}/{{y}}.pbf",
        info.scheme(),
        info.host()
    );

    let fields: BTreeMap<String, String> = [
        ("id", "String"),
        ("name", "String"),
        ("height", "Number"),
        ("class", "String"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    HttpResponse::Ok().json(TileJson {
        tilejson: "2.2.0".to_string(),
        name: LAYER_NAME.to_string(),
        tiles: vec![template],
        minzoom: state.min_zoom,
        maxzoom: state.max_zoom,
        vector_layers: vec![VectorLayer {
            id: LAYER_NAME.to_string(),
            fields,
            minzoom: state.min_zoom,
            maxzoom: state.max_zoom,
        }],
    })
}

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

/// `GET /stats`
///
/// Building count and total footprint area for the `bbox` query
/// parameter, falling back to the most recently reported viewport. No
/// viewport at all yields the zero record.
pub async fn stats(
    state: web::Data<AppState>,
    params: web::Query<StatsQueryParams>,
) -> HttpResponse {
    let bbox = params.bbox.as_deref().and_then(parse_bbox).or_else(|| {
        state
            .viewport
            .lock()
            .expect("viewport mutex poisoned")
            .as_ref()
            .map(|v| v.to_bbox())
    });

    let pool = Arc::clone(&state.pool);
    let stats = web::block(move || {
        let conn = pool.acquire();
        query_stats(&conn, bbox.as_ref())
    })
    .await
    .unwrap_or_else(|e| {
        log::error!("Stats worker failed: {e}");
        BuildingStats::default()
    });

    HttpResponse::Ok().json(ApiStats::from(stats))
}

/// `POST /update-view`
///
/// Stores the viewport reported by the map UI for later stats queries.
pub async fn update_view(
    state: web::Data<AppState>,
    body: web::Json<ViewportUpdate>,
) -> HttpResponse {
    let update = body.into_inner();

    let Some(mut viewport) = update.bounds else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "message": "No bounds provided"
        }));
    };
    viewport.zoom = update.zoom;

    *state.viewport.lock().expect("viewport mutex poisoned") = Some(viewport);

    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// `GET /get-bounds`
///
/// Returns the most recently reported viewport for the stats UI to poll.
pub async fn get_bounds(state: web::Data<AppState>) -> HttpResponse {
    let bounds = *state.viewport.lock().expect("viewport mutex poisoned");
    HttpResponse::Ok().json(BoundsResponse { bounds })
}

/// Parses a bounding box string `"west,south,east,north"` into a
/// [`BoundingBox`].
fn parse_bbox(s: &str) -> Option<BoundingBox> {
    let parts: Vec<f64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 4 {
        Some(BoundingBox::new(parts[0], parts[1], parts[2], parts[3]))
    } else {
        None
    }
}
