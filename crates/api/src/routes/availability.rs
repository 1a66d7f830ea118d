use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability/config",
            get(handlers::availability::slot_config),
        )
        .route(
            "/api/availability/slots",
            get(handlers::availability::free_slots),
        )
        .route(
            "/api/availability/suggestions",
            get(handlers::availability::suggestions),
        )
}
