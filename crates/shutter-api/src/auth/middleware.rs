use crate::auth::jwt_rs256::JwtServiceRs256;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shutter_core::AppError;
use std::sync::Arc;

/// State for the bearer-token middleware.
#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<JwtServiceRs256>,
}

/// Require a valid bearer token on every request that passes through.
///
/// Validated claims are attached to the request extensions for handlers
/// that want the caller identity.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return HttpAppError(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ))
        .into_response();
    };

    match auth_state.jwt.validate_token(token).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}
