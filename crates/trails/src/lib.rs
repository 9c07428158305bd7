pub mod config;
pub mod errors;
pub mod geo_math;
pub mod geohash;
pub mod handlers;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod request_id;
pub mod store;
pub mod types;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    config::Config,
    handlers::{get_status, get_trail, health_check, list_trails, search_trails},
    openapi::openapi_json,
    request_id::request_id_middleware,
    store::TrailStore,
};

pub fn create_router(store: Arc<TrailStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(get_status))
        .route("/trails", get(list_trails))
        .route("/route/{id}", get(get_trail))
        .route("/search", get(search_trails))
        .route("/openapi.json", get(openapi_json))
        .layer(Extension(store))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

/// Starts the background load and serves the API until the process exits.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(TrailStore::new());

    let loader = loader::spawn_loader(Arc::clone(&store), config.gpx_dir.clone());
    tokio::spawn(async move {
        match loader.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::error!("Trail loading aborted: {e}"),
            Err(e) => tracing::error!("Trail loader task failed: {e}"),
        }
    });

    let app = create_router(store);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!("Server running on http://{}", config.bind_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
