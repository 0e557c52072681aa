//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{LocationHistoryQuery, LocationPublishCommand, RoutePredictionQuery};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{api_scope, json_config};

/// Build state from individual ports, leaving the rest as fixtures.
pub fn state_with(
    history: Option<Arc<dyn LocationHistoryQuery>>,
    prediction: Option<Arc<dyn RoutePredictionQuery>>,
    publish: Option<Arc<dyn LocationPublishCommand>>,
) -> HttpState {
    let defaults = HttpState::default();
    HttpState::new(
        history.unwrap_or(defaults.history),
        prediction.unwrap_or(defaults.prediction),
        publish.unwrap_or(defaults.publish),
    )
}

/// App exposing the `/api` routes over `state`, wrapped in [`Trace`].
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(api_scope())
}
