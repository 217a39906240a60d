pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod media;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{media::MediaClient, store::MovieStore};

// Headroom over the poster limit so the handler rejects oversized files
// itself instead of the body-limit layer.
const MAX_BODY_BYTES: usize = routes::MAX_POSTER_BYTES + 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: MovieStore,
    pub media: Arc<MediaClient>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::catalog))
        .route("/admin", get(routes::admin))
        .route("/api/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/api/movies/{id}", get(routes::get_movie))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(Arc::new(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
