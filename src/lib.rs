pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod rate_limit;
pub mod state;
pub mod store;
pub mod upstream;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};

use crate::handlers::{health_handler, metrics_handler, weather_handler};
use crate::observability::{request_id, track_metrics};
use crate::state::AppState;

// Router with all routes and the observability layers applied
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/weather/{location}", get(weather_handler))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
