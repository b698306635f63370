use axum::{routing::{get, post}, Router};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{generation::GeneratorState, handlers};

/// Create the main application router with all endpoints
pub fn create_router<P: AsRef<Path>>(generator: GeneratorState, static_dir: P) -> Router {
    let static_dir = static_dir.as_ref();

    // Create CORS layer (all origins, as the frontend may be hosted elsewhere)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // The calculator entry page doubles as the not-found fallback, so both
    // "/" and the named HTML path resolve to it.
    let entry_page = ServeFile::new(static_dir.join("index.html"));
    let assets = ServeDir::new(static_dir).not_found_service(entry_page.clone());

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Forecast insight endpoint
        .route(
            "/generate-ai-observations",
            post(handlers::generate_observations),
        )
        // Static calculator UI
        .route_service("/roi-calculator.html", entry_page)
        .fallback_service(assets)
        // Add shared state
        .with_state(generator)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
