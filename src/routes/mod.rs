use axum::{
    Router,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir};

use crate::{
    config::UploadConfig,
    response::ApiResponse,
    services::upload_service::UPLOAD_URL_PREFIX,
    state::AppState,
};

pub mod auth;
pub mod categories;
pub mod customers;
pub mod doc;
pub mod extract;
pub mod health;
pub mod params;
pub mod products;
pub mod sellers;
pub mod upload;

/// Cap on JSON request bodies. The upload route sets its own limit.
pub const JSON_BODY_LIMIT: usize = 1024 * 1024;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router(upload_config: &UploadConfig) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(sellers::router())
        .merge(customers::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .layer(RequestBodyLimitLayer::new(JSON_BODY_LIMIT))
        .merge(upload::router(upload_config))
}

/// Every route the service answers, bound to `state`. Transport layers
/// (tracing, request ids, concurrency limit, CORS) are added by the binary.
pub fn create_app(state: AppState) -> Router {
    let api_router = create_api_router(&state.upload);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_router)
        .nest_service(UPLOAD_URL_PREFIX, ServeDir::new(&state.upload.dir))
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiResponse<()> {
    ApiResponse::message_only(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
