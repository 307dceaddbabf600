#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web vector tile server for the building map.
//!
//! Serves Mapbox Vector Tiles computed on demand from a read-only
//! `DuckDB` buildings database, a TileJSON discovery document for the
//! `MapLibre` frontend, and viewport-driven aggregate statistics.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use building_map_database::DuckDbPool;
use building_map_server_models::Viewport;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Shared application state.
pub struct AppState {
    /// Pool of read-only `DuckDB` connections to the buildings database.
    pub pool: Arc<DuckDbPool>,
    /// Most recently reported map viewport, if any.
    pub viewport: Mutex<Option<Viewport>>,
    /// Tiles below this zoom are served empty.
    pub min_zoom: u8,
    /// Highest zoom advertised in the TileJSON document.
    pub max_zoom: u8,
}

/// Registers all HTTP routes.
///
/// Fixed paths are matched first; everything else falls through to the
/// tile catch-all, which serves `/tiles/{z}/{x}/{y}.pbf` and 404s the
/// rest.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::tilejson))
        .route("/tiles.json", web::get().to(handlers::tilejson))
        .route("/health", web::get().to(handlers::health))
        .route("/stats", web::get().to(handlers::stats))
        .route("/update-view", web::post().to(handlers::update_view))
        .route("/get-bounds", web::get().to(handlers::get_bounds))
        .default_service(web::route().to(handlers::tile));
}

/// Starts the building map tile server.
///
/// Opens the read-only `DuckDB` connection pool and starts the Actix-Web
/// HTTP server. The listener binds only after the pool is ready, and the
/// pool is dropped after the listener stops, so no request is ever served
/// against a severed store. This is a regular async function; the caller
/// is responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the buildings database cannot be opened.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let db_path =
        std::env::var("BUILDINGS_DB").unwrap_or_else(|_| "data/nl_buildings.duckdb".to_string());
    let pool_size: usize = std::env::var("DB_POOL_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4);
    let min_zoom: u8 = std::env::var("MIN_ZOOM")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let max_zoom: u8 = std::env::var("MAX_ZOOM")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(16);

    log::info!("Opening buildings DuckDB at {db_path}...");
    let pool = DuckDbPool::new(Path::new(&db_path), pool_size)
        .expect("Failed to open buildings DuckDB database");

    let state = web::Data::new(AppState {
        pool: Arc::new(pool),
        viewport: Mutex::new(None),
        min_zoom,
        max_zoom,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting tile server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
