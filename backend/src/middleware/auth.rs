//! Authentication middleware
//!
//! Validates the bearer session token and exposes its claims to handlers.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;
use crate::services::auth::{AuthError, SessionClaims};
use crate::AppState;

/// Claims of the session that authenticated the current request
#[derive(Clone, Debug)]
pub struct CurrentSession(pub SessionClaims);

/// Reject requests without a valid session token
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return AppError::from(AuthError::MissingToken).into_response();
    };

    match state.authenticator.verify(bearer.token()) {
        Ok(claims) => {
            request.extensions_mut().insert(CurrentSession(claims));
            next.run(request).await
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Same as [`auth_middleware`], but only when the deployment requires
/// sessions on the inventory endpoints
pub async fn inventory_auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.auth.require_for_inventory {
        return next.run(request).await;
    }
    auth_middleware(State(state), bearer, request, next).await
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or(AppError::Unauthorized(AuthError::MissingToken))
    }
}
