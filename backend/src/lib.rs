//! PharmaFlow - pharmaceutical inventory API
//!
//! Tracks medication batches (national code, lot, expiry, stock, price) in a
//! flat JSON file and serves CRUD, dashboard statistics and FEFO reports.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod storage;

pub use config::Config;

use services::{Authenticator, StaticCredentialAuthenticator};
use storage::JsonFileStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonFileStore>,
    pub authenticator: Arc<dyn Authenticator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(JsonFileStore::new(config.storage.data_path.clone())),
            authenticator: Arc::new(StaticCredentialAuthenticator::new(&config.auth)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // Any origin may query the API (the dashboard is hosted separately)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "PharmaFlow Inventory API v1.0"
}
