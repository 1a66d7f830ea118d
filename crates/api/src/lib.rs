//! # NailSync API
//!
//! The API crate provides the web server for the NailSync salon CRM. It
//! exposes the appointment availability engine over HTTP.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Load data, call the availability engine, shape responses
//! - **Middleware**: Error to HTTP response mapping
//! - **Config**: Environment based server and slot configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, Router};
use eyre::{Result, WrapErr};
use nailsync_core::availability::{SlotConfig, SuggestionCache};
use sqlx::PgPool;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Slot settings shared by every availability request
    pub slot_config: SlotConfig,

    /// Last computed booking-screen suggestions
    pub suggestions: Mutex<SuggestionCache>,
}

impl ApiState {
    pub fn new(db_pool: PgPool, slot_config: SlotConfig) -> Self {
        let suggestions = Mutex::new(SuggestionCache::new(slot_config.clone()));

        Self {
            db_pool,
            slot_config,
            suggestions,
        }
    }
}

/// Builds the application router with all routes attached to `state`
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and slot settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "Business hours {}-{}, slots of at least {} minutes",
        config.slots.business_start,
        config.slots.business_end,
        config.slots.average_service_minutes
    );

    let state = Arc::new(ApiState::new(db_pool, config.slots.clone()));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS entry")?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
                StatusCode::REQUEST_TIMEOUT
            }))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
