//! Error responses for the REST API.
//!
//! Every failure leaves the service as `{ "error": CODE, "message": ..., "details"? }`.
//!
//! | Code | HTTP Status |
//! |------|-------------|
//! | *_NOT_FOUND, TOKEN_INVALID | 404 |
//! | CAPACITY_FULL, CLASS_CANCELLED, MEMBER_INACTIVE, DUPLICATE_RESERVATION | 409 |
//! | DOCUMENTO_TAKEN, TOKEN_ALREADY_ISSUED | 409 |
//! | INVALID_STATE_TRANSITION, VALIDATION_FAILED | 400 |
//! | MEMBERSHIP_EXPIRED, MEMBERSHIP_SUSPENDED, FORBIDDEN | 403 |
//! | UNAUTHORIZED | 401 |
//! | DATABASE_ERROR, INTERNAL_ERROR | 500 |
//!
//! Door verdicts are not errors: denied entries are a normal `200` body.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::access::AccessError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::membership::MemberError;
use crate::domain::routine::RoutineError;
use crate::domain::scheduling::SchedulingError;

/// Wire shape of every error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: code.as_str().to_string(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }
}

/// Maps a taxonomy code to its HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MemberNotFound
        | ErrorCode::ClassNotFound
        | ErrorCode::ReservationNotFound
        | ErrorCode::RoutineNotFound
        | ErrorCode::ExerciseNotFound
        | ErrorCode::TokenInvalid => StatusCode::NOT_FOUND,

        ErrorCode::CapacityFull
        | ErrorCode::ClassCancelled
        | ErrorCode::MemberInactive
        | ErrorCode::DuplicateReservation
        | ErrorCode::DocumentoTaken
        | ErrorCode::TokenAlreadyIssued => StatusCode::CONFLICT,

        ErrorCode::InvalidStateTransition | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,

        ErrorCode::MembershipExpired | ErrorCode::MembershipSuspended | ErrorCode::Forbidden => {
            StatusCode::FORBIDDEN
        }

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A failed request, ready to be rendered.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorCode::Forbidden, "Not allowed to perform this action")
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }

    fn field_error(code: ErrorCode, message: String, field: Option<&str>) -> Self {
        let err = Self::new(code, message);
        match field {
            Some(field) => err.with_detail("field", field),
            None => err,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }

        let body = ErrorResponse {
            error: self.code.as_str().to_string(),
            message: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code,
            message: err.message,
            details: err.details.into_iter().collect(),
        }
    }
}

impl From<MemberError> for ApiError {
    fn from(err: MemberError) -> Self {
        let field = match &err {
            MemberError::ValidationFailed { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self::field_error(err.code(), err.message(), field.as_deref())
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        let field = match &err {
            SchedulingError::ValidationFailed { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self::field_error(err.code(), err.message(), field.as_deref())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        let field = match &err {
            AccessError::ValidationFailed { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self::field_error(err.code(), err.message(), field.as_deref())
    }
}

impl From<RoutineError> for ApiError {
    fn from(err: RoutineError) -> Self {
        let field = match &err {
            RoutineError::ValidationFailed { field, .. } => Some(field.clone()),
            _ => None,
        };
        Self::field_error(err.code(), err.message(), field.as_deref())
    }
}

/// Parses a path or query identifier, naming the field on failure.
pub fn parse_id<T: FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.parse::<T>()
        .map_err(|_| ApiError::validation(field, format!("'{}' is not a valid id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ClassId, MemberId};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn booking_rejections_are_conflicts() {
        for code in [
            ErrorCode::CapacityFull,
            ErrorCode::ClassCancelled,
            ErrorCode::MemberInactive,
            ErrorCode::DuplicateReservation,
        ] {
            assert_eq!(status_for(code), StatusCode::CONFLICT, "{}", code);
        }
    }

    #[test]
    fn terminal_reservation_change_is_bad_request() {
        assert_eq!(status_for(ErrorCode::InvalidStateTransition), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_are_server_errors() {
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn class_missing_in_storage_is_not_found() {
        let class_id = ClassId::new();
        let port_err = DomainError::new(ErrorCode::ClassNotFound, "gone")
            .with_detail("class_id", class_id.to_string());

        let err: ApiError = SchedulingError::from(port_err).into();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn capacity_full_renders_code_and_message() {
        let err: ApiError = SchedulingError::CapacityFull {
            class_id: ClassId::new(),
            capacity: 12,
        }
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body_json(response).await;
        assert_eq!(json["error"], "CAPACITY_FULL");
        assert!(json["message"].as_str().unwrap().contains("12"));
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn validation_errors_carry_the_field() {
        let err: ApiError = MemberError::validation("documento", "cannot be empty").into();

        let json = body_json(err.into_response()).await;
        assert_eq!(json["error"], "VALIDATION_FAILED");
        assert_eq!(json["details"]["field"], "documento");
    }

    #[test]
    fn parse_id_reports_field() {
        let err = parse_id::<MemberId>("not-a-uuid", "socio_id").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details["field"], "socio_id");

        let id = MemberId::new();
        assert_eq!(parse_id::<MemberId>(&id.to_string(), "socio_id").unwrap(), id);
    }
}
