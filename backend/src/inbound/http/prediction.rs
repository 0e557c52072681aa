//! Route prediction HTTP handler.
//!
//! ```text
//! GET /api/predict-route?userName=ana&steps=5
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::LocationPoint;
use crate::domain::ports::PredictRouteRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, LocationPointSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_count, require_text};

/// Query parameters for the prediction endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PredictRouteParams {
    /// User whose recent history drives the forecast.
    #[param(required = true, example = "ana")]
    pub user_name: Option<String>,
    /// Number of points to forecast (1 to 100).
    #[param(value_type = Option<u32>, example = 5)]
    pub steps: Option<String>,
}

/// Forecast a user's next positions by linear extrapolation.
///
/// An empty array means fewer than two timed points are recorded.
#[utoipa::path(
    get,
    path = "/api/predict-route",
    params(PredictRouteParams),
    responses(
        (
            status = 200,
            description = "Forecast points in generated order",
            body = [LocationPointSchema]
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Location store failure", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "predictRoute"
)]
#[get("/predict-route")]
pub async fn predict_route(
    state: web::Data<HttpState>,
    params: web::Query<PredictRouteParams>,
) -> ApiResult<web::Json<Vec<LocationPoint>>> {
    let PredictRouteParams { user_name, steps } = params.into_inner();
    let request = PredictRouteRequest {
        user_name: require_text(user_name, FieldName::new("userName"))?,
        steps: parse_optional_count(steps, FieldName::new("steps"))?,
    };
    let forecast = state.prediction.predict_route(request).await?;
    Ok(web::Json(forecast))
}
