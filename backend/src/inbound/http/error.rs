//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into the JSON envelope and status codes clients expect.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::DependencyUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Tests for HTTP error mapping.

    use actix_web::body::to_bytes;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::*;

    const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

    #[fixture]
    fn internal_error() -> Error {
        Error::internal("database password rejected")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "secret": "x" }))
    }

    async fn body_of(error: &Error) -> (StatusCode, Option<String>, Value) {
        let response = ResponseError::error_response(error);
        let status = response.status();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        let body = serde_json::from_slice(&bytes).expect("error JSON decodes");
        (status, header, body)
    }

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(
        Error::dependency_unavailable("store down", "timeout"),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(ResponseError::status_code(&err), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_errors_are_redacted(internal_error: Error) {
        let (status, header, body) = body_of(&internal_error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header.as_deref(), Some(TRACE_ID));
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["traceId"], TRACE_ID);
        assert!(body.get("details").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn dependency_errors_keep_their_details() {
        let err =
            Error::dependency_unavailable("failed to load location history", "connection refused");
        let (status, header, body) = body_of(&err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(header.is_none());
        assert_eq!(body["error"], "failed to load location history");
        assert_eq!(body["details"], "connection refused");
        assert_eq!(body["code"], "dependency_unavailable");
    }
}
