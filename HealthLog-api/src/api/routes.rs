use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{health, measurements};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // HTML page and the form endpoints behind it
    let page_routes = Router::new()
        .route("/", get(measurements::index))
        .route("/add", post(measurements::add_measurement))
        .route("/delete/:id", post(measurements::delete_measurement))
        .route("/static/main.js", get(measurements::main_script));

    let api_routes = Router::new()
        .route("/api/measurements/:id/flag", post(measurements::toggle_flag))
        .route("/health", get(health::health_check));

    let app = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .with_state(state)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http());

    health::initialize_server_start_time();
    debug!("Application router ready");

    app
}
