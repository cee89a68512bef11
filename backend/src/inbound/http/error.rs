//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes. Service-layer failures, storage errors included, map to
//! 500; only adapter-local validation (400) and a missing session user
//! (401) produce client-error statuses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Storage | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Collapse unknown failures into the fixed generic payload.
///
/// Recognised application errors (`storage`, validation, auth) pass their
/// summary through; anything tagged `internal_error` is replaced wholesale
/// so implementation details never leak to clients.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code, ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = &error.trace_id {
            redacted = redacted.with_trace_id(id.clone());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code, error = %self.message, "request failed");
        } else {
            debug!(code = ?self.code, error = %self.message, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ErrorCode::Storage, StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_mapping_is_exhaustive(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        assert_eq!(status_for(code), expected);
    }

    #[rstest]
    fn storage_errors_keep_their_summary() {
        let err = Error::storage("saved item storage failed: timeout");
        let redacted = redact_if_internal(&err);
        assert_eq!(redacted, err);
    }

    #[rstest]
    fn internal_errors_are_redacted_but_keep_trace_id() {
        let err = Error::internal("pool exhausted on shard 7").with_trace_id("abc");
        let redacted = redact_if_internal(&err);

        assert_eq!(redacted.code, ErrorCode::InternalError);
        assert_eq!(redacted.message, "Internal server error");
        assert_eq!(redacted.trace_id.as_deref(), Some("abc"));
    }

    #[actix_web::test]
    async fn error_response_serializes_payload_and_header() {
        let err = Error::storage("boom").with_trace_id("trace-123");
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("trace-123")
        );

        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: Error = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(payload.code, ErrorCode::Storage);
        assert_eq!(payload.message, "boom");
    }

    #[actix_web::test]
    async fn internal_error_response_is_generic() {
        let err = Error::internal("secret stack trace");
        let response = err.error_response();

        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: Error = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(payload.code, ErrorCode::InternalError);
        assert_eq!(payload.message, "Internal server error");
    }
}
