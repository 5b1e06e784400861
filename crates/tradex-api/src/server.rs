use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API application router
pub fn create_app(state: AppState) -> Router {
    let client_dir = state.config.client_dir.clone();

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/optimize", post(handlers::optimize))
        .route("/api/result", get(handlers::result))
        .route("/api/series/:kind", get(handlers::series))
        .with_state(state);

    // Built web client with client-side routing
    let app = if client_dir.is_dir() {
        let index = ServeFile::new(client_dir.join("index.html"));
        app.fallback_service(ServeDir::new(&client_dir).fallback(index))
    } else {
        app
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
