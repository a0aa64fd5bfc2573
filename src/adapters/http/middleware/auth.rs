//! Authentication middleware and extractor for axum.
//!
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the caller into extensions
//! - `RequireAuth` - Extractor that requires an authenticated caller
//!
//! The middleware only talks to the `SessionValidator` port, so the same
//! router runs against the JWT validator in production and the mock in tests.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::foundation::{AuthError, AuthenticatedUser, ErrorCode};
use crate::ports::SessionValidator;

use crate::adapters::http::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the `Authorization: Bearer <token>` header.
///
/// A valid token puts the `AuthenticatedUser` into request extensions. A
/// missing header passes through untouched so unauthenticated routes such as
/// `/health` keep working; handlers that need a caller use `RequireAuth`.
/// A present but invalid token is rejected here with 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            tracing::Span::current().record("user_role", user.role.as_str());
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => auth_error_response(&e),
    }
}

fn auth_error_response(error: &AuthError) -> Response {
    let (status, message) = match error {
        AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        AuthError::ServiceUnavailable(msg) => {
            tracing::error!(error = %msg, "auth service unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    let code = if status == StatusCode::FORBIDDEN {
        ErrorCode::Forbidden
    } else if status == StatusCode::UNAUTHORIZED {
        ErrorCode::Unauthorized
    } else {
        ErrorCode::InternalError
    };

    (status, axum::Json(ErrorResponse::new(code, message))).into_response()
}

/// Extractor that requires an authenticated caller.
///
/// Fails with 401 when `auth_middleware` did not inject a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid bearer token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                axum::Json(ErrorResponse::new(
                    ErrorCode::Unauthorized,
                    "Authentication required",
                )),
            )
                .into_response(),
        }
    }
}
