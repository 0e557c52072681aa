//! Orchestrator probes.
//!
//! ```text
//! GET /health/ready   200 once the listener is bound, 503 before
//! GET /health/live    200 until draining starts, 503 after
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde_json::json;

/// Which probe is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Accepting traffic.
    Ready,
    /// Not draining.
    Live,
}

/// Readiness and liveness flags shared between the server and its workers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    draining: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            draining: AtomicBool::new(false),
        }
    }
}

impl HealthState {
    /// Not ready and not draining.
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail the liveness probe so traffic drains before shutdown.
    pub fn mark_unhealthy(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Whether `probe` currently passes.
    pub fn passes(&self, probe: Probe) -> bool {
        match probe {
            Probe::Ready => self.ready.load(Ordering::Acquire),
            Probe::Live => !self.draining.load(Ordering::Acquire),
        }
    }
}

fn answer(state: &HealthState, probe: Probe) -> HttpResponse {
    let mut builder = if state.passes(probe) {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    let status = if state.passes(probe) { "ok" } else { "unavailable" };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({ "status": status }))
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Listener bound and accepting traffic"),
        (status = 503, description = "Still starting")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    answer(&state, Probe::Ready)
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is serving"),
        (status = 503, description = "Draining before shutdown")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    answer(&state, Probe::Live)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    async fn call(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Value) {
        let app =
            actix_test::init_service(App::new().app_data(state).service(ready).service(live))
                .await;
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    fn fresh_state_is_live_but_not_ready() {
        let state = HealthState::new();
        assert!(!state.passes(Probe::Ready));
        assert!(state.passes(Probe::Live));
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_mark_ready() {
        let state = web::Data::new(HealthState::new());
        let (status, body) = call(state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");

        state.mark_ready();
        let (status, body) = call(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_once_draining() {
        let state = web::Data::new(HealthState::new());
        assert_eq!(call(state.clone(), "/health/live").await.0, StatusCode::OK);
        state.mark_unhealthy();
        assert_eq!(
            call(state, "/health/live").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
