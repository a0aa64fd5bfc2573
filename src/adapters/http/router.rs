//! Assembles the REST API: resource routes, auth, and the tower-http stack.

use axum::extract::Request;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::accesos::{acceso_routes, access_routes};
use super::clases::clase_routes;
use super::health::health;
use super::middleware::auth_middleware;
use super::reservas::reserva_routes;
use super::rutinas::rutina_routes;
use super::socios::socio_routes;
use super::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Resource routes without the outer middleware stack.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/api/socios", socio_routes())
        .nest("/api/clases", clase_routes())
        .nest("/api/reservas", reserva_routes())
        .nest("/api/access", access_routes())
        .nest("/api/accesos", acceso_routes())
        .nest("/api/rutinas", rutina_routes())
}

/// The complete application.
///
/// Layers, outermost first: request id, tracing, request-id propagation,
/// CORS, timeout, bearer authentication.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
            user_role = tracing::field::Empty,
        )
    });

    Router::new()
        .route("/health", get(health))
        .merge(api_routes())
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(trace)
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

/// CORS for the console. `*` allows any origin; an empty list allows none.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::{
        InMemoryAccessLogRepository, InMemoryAccessTokenRepository, InMemoryMemberRepository,
        InMemoryRosterRepository, InMemoryRoutineRepository,
    };
    use crate::adapters::qr::PngQrRenderer;
    use crate::domain::foundation::GymClock;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryMemberRepository::new()),
            Arc::new(InMemoryRosterRepository::new()),
            Arc::new(InMemoryAccessTokenRepository::new()),
            Arc::new(InMemoryAccessLogRepository::new()),
            Arc::new(InMemoryRoutineRepository::new()),
            Arc::new(PngQrRenderer::default()),
            Arc::new(MockSessionValidator::new()),
            GymClock::utc(),
        )
    }

    #[tokio::test]
    async fn health_needs_no_token_and_gets_a_request_id() {
        let app = build_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn api_routes_require_a_token() {
        let app = build_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/api/clases").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = build_router(state(), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/api/nada").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
