//! Location ingestion HTTP handler.
//!
//! ```text
//! POST /api/publish-location
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{PublishLocationRequest, PublishLocationResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_rfc3339_timestamp};

/// Location report sent by a device.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishLocationBody {
    /// Required; zero is a valid value.
    #[schema(example = -33.45)]
    pub latitude: Option<f64>,
    /// Required; zero is a valid value.
    #[schema(example = -70.66)]
    pub longitude: Option<f64>,
    /// RFC 3339 observation time; defaults to the server clock.
    #[schema(format = "date-time", example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<String>,
    /// Reporting device; a configured default is used when absent.
    #[schema(example = "phone-1")]
    pub device_id: Option<String>,
    /// Owner of the report. Without it the report is published but not stored.
    #[schema(example = "ana")]
    pub user_name: Option<String>,
}

/// Publish acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishLocationResponseBody {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Human-readable outcome.
    #[schema(example = "Location published and device shadow updated")]
    pub message: String,
}

impl From<PublishLocationResponse> for PublishLocationResponseBody {
    fn from(value: PublishLocationResponse) -> Self {
        Self {
            success: value.success,
            message: value.message,
        }
    }
}

fn parse_publish_request(body: PublishLocationBody) -> ApiResult<PublishLocationRequest> {
    Ok(PublishLocationRequest {
        latitude: body.latitude,
        longitude: body.longitude,
        timestamp: parse_optional_rfc3339_timestamp(body.timestamp, FieldName::new("timestamp"))?,
        device_id: body.device_id,
        user_name: body.user_name,
    })
}

/// Publish a location report to the broker and update the device shadow.
#[utoipa::path(
    post,
    path = "/api/publish-location",
    request_body = PublishLocationBody,
    responses(
        (status = 200, description = "Location published", body = PublishLocationResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Broker failure", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "publishLocation"
)]
#[post("/publish-location")]
pub async fn publish_location(
    state: web::Data<HttpState>,
    payload: web::Json<PublishLocationBody>,
) -> ApiResult<web::Json<PublishLocationResponseBody>> {
    let request = parse_publish_request(payload.into_inner())?;
    let response = state.publish.publish_location(request).await?;
    Ok(web::Json(response.into()))
}
