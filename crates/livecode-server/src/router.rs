//! Router assembly for the livecode HTTP server.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router.
///
/// Routes use axum 0.8 `/{param}` path syntax. Anything under `/www/` other
/// than the editor client script is served from the assets directory.
/// Program bodies are not size-capped.
pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(state.assets_dir.as_path());

    Router::new()
        .route("/", get(handlers::pages::root))
        .route("/edit/{id}", get(handlers::pages::editor))
        // Program source
        .route(
            "/program/{id}",
            get(handlers::pages::viewer_redirect).post(handlers::programs::save),
        )
        .route("/program/{id}/", get(handlers::pages::viewer))
        .route("/program/{id}/script.js", get(handlers::programs::script))
        // Project picker
        .route("/programs", get(handlers::programs::list))
        // Static assets
        .route("/www/livecode.js", get(handlers::pages::livecode_js))
        .nest_service("/www", assets)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
