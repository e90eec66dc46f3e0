//! Axum router construction.
//!
//! Assembles the REST routes and the static front-end into a single
//! [`Router`] with CORS and request tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET|POST /api/animals`, `GET /api/animals/{id}`
/// - `GET|POST /api/zookeepers`, `GET /api/zookeepers/{id}`
/// - `GET /` -- `index.html`
/// - `GET /animals` -- `animals.html`
/// - `GET /zookeepers` -- `zookeepers.html`
/// - anything else -- the matching file under the public directory, or
///   `index.html` when there is none
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = state.public_dir.clone();
    let index = public.join("index.html");

    Router::new()
        // REST API
        .route(
            "/api/animals",
            get(handlers::list_animals).post(handlers::create_animal),
        )
        .route("/api/animals/{id}", get(handlers::get_animal))
        .route(
            "/api/zookeepers",
            get(handlers::list_zookeepers).post(handlers::create_zookeeper),
        )
        .route("/api/zookeepers/{id}", get(handlers::get_zookeeper))
        // Front-end pages
        .route_service("/", ServeFile::new(&index))
        .route_service("/animals", ServeFile::new(public.join("animals.html")))
        .route_service("/zookeepers", ServeFile::new(public.join("zookeepers.html")))
        .fallback_service(ServeDir::new(&public).fallback(ServeFile::new(&index)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
