mod auth;
mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod repository;
mod service;
mod state;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};

use std::sync::Arc;

use auth::TokenVerifier;
use handlers::rest;
use repository::PgNoteStore;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::NoteService;
use state::AppState;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes API config");

    // Store creation and migration
    let mut store = PgNoteStore::new(&cfg.database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    store.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    let verifier = TokenVerifier::new(cfg.jwt_secret.as_bytes()).unwrap_or_else(|e| {
        tracing::error!("Failed to initialise token verifier: {e}");
        panic!("failed to initialise token verifier: {e}");
    });

    // Service creation
    let service = NoteService::new(Arc::new(store));
    let router = build_router(AppState::new(service, Arc::new(verifier)));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes API starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes API starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/notes", get(rest::list_notes).post(rest::create_note))
        .route("/api/notes/", get(rest::list_notes).post(rest::create_note))
        .route(
            "/api/notes/{id}",
            put(rest::update_note).delete(rest::delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes API is running").into_response()
}
