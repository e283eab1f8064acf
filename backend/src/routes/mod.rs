//! Route definitions for the PharmaFlow API

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers,
    middleware::{auth_middleware, inventory_auth_middleware},
    AppState,
};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(medication_routes(state.clone()))
        .merge(auth_routes(state))
}

/// Inventory routes (public unless the deployment requires sessions)
fn medication_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/medicamentos",
            get(handlers::list_medications).post(handlers::create_medication),
        )
        .route("/medicamentos/stats", get(handlers::get_stats))
        .route("/medicamentos/report", get(handlers::get_report))
        .route(
            "/medicamentos/:id",
            put(handlers::update_medication).delete(handlers::delete_medication),
        )
        .route_layer(middleware::from_fn_with_state(state, inventory_auth_middleware))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::login))
        .route(
            "/auth/session",
            get(handlers::current_session)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
