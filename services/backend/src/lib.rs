pub mod controllers;
pub mod db;
pub mod error;
pub mod models;
pub mod routers;
pub mod secrets;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routers::{health_check_route, rating_routes, root_route, song_routes};
use store::{SharedStore, SongStore};

/// Build the full service around any store implementation.
pub fn app<S: SongStore + 'static>(store: S) -> Router {
    let store: SharedStore = Arc::new(store);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .merge(song_routes())
        .merge(rating_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
