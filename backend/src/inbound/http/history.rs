//! Location history HTTP handler.
//!
//! ```text
//! GET /api/location-history?userName=ana&limit=10&order=desc
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::HistoryRequest;
use crate::domain::{HistoryOrder, LocationPoint};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, LocationPointSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_order_error, parse_optional_count, require_text,
};

/// Query parameters for the history endpoint.
///
/// Values arrive as text so malformed input is reported in the error
/// envelope rather than by the extractor.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LocationHistoryParams {
    /// User whose points are returned.
    #[param(required = true, example = "ana")]
    pub user_name: Option<String>,
    /// Maximum number of points, applied after sorting.
    #[param(value_type = Option<u32>, example = 10)]
    pub limit: Option<String>,
    /// `asc` or `desc` (default).
    #[param(example = "desc")]
    pub order: Option<String>,
}

fn parse_history_request(params: LocationHistoryParams) -> ApiResult<HistoryRequest> {
    let order_field = FieldName::new("order");
    let order = match params.order {
        Some(raw) => raw
            .parse::<HistoryOrder>()
            .map_err(|_| invalid_order_error(order_field, &raw))?,
        None => HistoryOrder::default(),
    };
    Ok(HistoryRequest {
        user_name: require_text(params.user_name, FieldName::new("userName"))?,
        limit: parse_optional_count(params.limit, FieldName::new("limit"))?,
        order,
    })
}

/// Return a user's recorded points, most recent first unless `order=asc`.
#[utoipa::path(
    get,
    path = "/api/location-history",
    params(LocationHistoryParams),
    responses(
        (status = 200, description = "Ordered location points", body = [LocationPointSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Location store failure", body = ErrorSchema)
    ),
    tags = ["locations"],
    operation_id = "getLocationHistory"
)]
#[get("/location-history")]
pub async fn location_history(
    state: web::Data<HttpState>,
    params: web::Query<LocationHistoryParams>,
) -> ApiResult<web::Json<Vec<LocationPoint>>> {
    let request = parse_history_request(params.into_inner())?;
    let points = state.history.select_history(request).await?;
    Ok(web::Json(points))
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
