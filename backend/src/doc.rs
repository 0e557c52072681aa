//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! schema wrappers that describe domain types without coupling them to
//! utoipa. The document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::publish::{PublishLocationBody, PublishLocationResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, LocationPointSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "geotracker API",
        description = "Location ingestion, history and linear route forecasts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::history::location_history,
        crate::inbound::http::prediction::predict_route,
        crate::inbound::http::publish::publish_location,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LocationPointSchema,
        PublishLocationBody,
        PublishLocationResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "locations", description = "Location history, forecasts and ingestion"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
