//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their serialised shape and live in the inbound
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or a required field is missing.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The location store or broker failed.
    #[schema(rename = "dependency_unavailable")]
    DependencyUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "userName is required")]
    error: String,
    /// Underlying cause for dependency failures, or field context for
    /// validation failures.
    details: Option<serde_json::Value>,
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::LocationPoint`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LocationPoint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LocationPointSchema {
    /// Latitude in degrees.
    #[schema(example = -33.45)]
    latitude: f64,
    /// Longitude in degrees.
    #[schema(example = -70.66)]
    longitude: f64,
    /// ISO-8601 observation time.
    #[schema(format = "date-time", example = "2024-01-01T00:02:00Z")]
    timestamp: String,
    /// Reporting device.
    #[schema(rename = "deviceId", example = "phone-1")]
    device_id: String,
    /// Owning user.
    #[schema(rename = "userName", example = "ana")]
    user_name: String,
}
