//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod history;
pub mod prediction;
pub mod publish;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;
pub use validation::json_config;

/// Scope mounting the location endpoints under `/api`.
///
/// Handlers expect [`state::HttpState`] and [`json_config`] as app data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use geotracker::inbound::http::{api_scope, json_config, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .app_data(json_config())
///     .service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(history::location_history)
        .service(prediction::predict_route)
        .service(publish::publish_location)
}
