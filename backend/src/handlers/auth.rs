//! Authentication handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use shared::models::{Credentials, Session};

use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::auth::SessionClaims;
use crate::AppState;

/// Log in to the dashboard
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<Session>> {
    let Json(credentials) = payload?;
    let session = state.authenticator.authenticate(&credentials)?;
    tracing::info!("Session {} opened for {}", session.session_id, session.email);
    Ok(Json(session))
}

/// Claims of the current session
pub async fn current_session(session: CurrentSession) -> Json<SessionClaims> {
    Json(session.0)
}
