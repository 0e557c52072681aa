//! Outbound HTTP adapters exercised against a local stand-in service.
//!
//! A small Actix server records what the adapters send and replies with
//! canned bodies, so the wire contract is checked over a real socket.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use geotracker::domain::UserName;
use geotracker::domain::ports::{
    LocationBroker, LocationBrokerError, LocationStore, LocationStoreError, PublishedLocation,
};
use geotracker::outbound::broker::{HttpBrokerSettings, HttpLocationBroker};
use geotracker::outbound::store::{HttpLocationStore, HttpStoreSettings};
use rstest::rstest;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    query: String,
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct StandIn {
    status: u16,
    reply: Value,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl StandIn {
    fn new(status: u16, reply: Value) -> Self {
        Self {
            status,
            reply,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.log.lock().expect("log lock").clone()
    }
}

async fn record(
    req: HttpRequest,
    body: web::Json<Value>,
    stand_in: web::Data<StandIn>,
) -> HttpResponse {
    stand_in.log.lock().expect("log lock").push(Recorded {
        path: req.path().to_owned(),
        query: req.query_string().to_owned(),
        authorization: req
            .headers()
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: body.into_inner(),
    });
    let status = actix_web::http::StatusCode::from_u16(stand_in.status).expect("valid status");
    HttpResponse::build(status).json(stand_in.reply.clone())
}

async fn spawn_stand_in(stand_in: StandIn) -> (String, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let data = web::Data::new(stand_in);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::post().to(record))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{addr}"), handle)
}

fn store_settings(base_url: String) -> HttpStoreSettings {
    HttpStoreSettings {
        base_url,
        table: "GPS_Locations".to_owned(),
        scan_limit: 50,
        token: Some("store-token".to_owned()),
        timeout: Duration::from_secs(5),
    }
}

fn broker_settings(base_url: String) -> HttpBrokerSettings {
    HttpBrokerSettings {
        base_url,
        topic: "gps-location".to_owned(),
        thing_name: "GPS".to_owned(),
        token: None,
        timeout: Duration::from_secs(5),
    }
}

fn report() -> PublishedLocation {
    PublishedLocation {
        latitude: 1.5,
        longitude: 2.5,
        timestamp: "2024-01-01T00:00:00Z".to_owned(),
        device_id: "phone-1".to_owned(),
        user_name: Some("ana".to_owned()),
    }
}

#[actix_web::test]
async fn store_scans_by_user_and_decodes_items() {
    let stand_in = StandIn::new(
        200,
        json!({
            "items": [
                {
                    "latitude": 1.0,
                    "longitude": 2.0,
                    "timestamp": "2024-01-01T00:00:00Z",
                    "deviceId": "phone-1",
                    "userName": "ana",
                }
            ]
        }),
    );
    let (base_url, handle) = spawn_stand_in(stand_in.clone()).await;
    let store = HttpLocationStore::new(store_settings(base_url)).expect("store builds");

    let ana = UserName::new("ana").expect("valid user");
    let points = store.find_by_user(&ana).await.expect("scan succeeds");
    handle.stop(true).await;

    assert_eq!(points.len(), 1);
    assert_eq!(points[0].device_id(), "phone-1");

    let recorded = stand_in.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].path, "/tables/GPS_Locations/scan");
    assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer store-token"));
    assert_eq!(recorded[0].body, json!({ "filter": { "userName": "ana" }, "limit": 50 }));
}

#[rstest]
#[case::bad_gateway(502, true)]
#[case::bad_request(400, false)]
#[actix_web::test]
async fn store_maps_failure_statuses(#[case] status: u16, #[case] is_connection: bool) {
    let (base_url, handle) = spawn_stand_in(StandIn::new(status, json!({ "message": "no" }))).await;
    let store = HttpLocationStore::new(store_settings(base_url)).expect("store builds");

    let ana = UserName::new("ana").expect("valid user");
    let err = store.find_by_user(&ana).await.expect_err("scan fails");
    handle.stop(true).await;

    assert_eq!(
        matches!(err, LocationStoreError::Connection { .. }),
        is_connection,
        "unexpected error variant: {err:?}"
    );
}

#[actix_web::test]
async fn broker_publishes_report_and_shadow() {
    let stand_in = StandIn::new(200, json!({}));
    let (base_url, handle) = spawn_stand_in(stand_in.clone()).await;
    let broker = HttpLocationBroker::new(broker_settings(base_url)).expect("broker builds");

    broker.publish(&report()).await.expect("publish succeeds");
    broker.update_shadow(&report()).await.expect("shadow succeeds");
    handle.stop(true).await;

    let recorded = stand_in.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].path, "/topics/gps-location");
    assert_eq!(recorded[0].query, "qos=0");
    assert!(recorded[0].authorization.is_none());
    assert_eq!(
        recorded[0].body,
        json!({
            "latitude": 1.5,
            "longitude": 2.5,
            "timestamp": "2024-01-01T00:00:00Z",
            "deviceId": "phone-1",
            "userName": "ana",
        })
    );
    assert_eq!(recorded[1].path, "/things/GPS/shadow");
    assert_eq!(recorded[1].body["state"]["reported"]["deviceId"], "phone-1");
    assert!(recorded[1].body["state"]["reported"].get("userName").is_none());
}

#[actix_web::test]
async fn broker_reports_rejections() {
    let (base_url, handle) =
        spawn_stand_in(StandIn::new(403, json!({ "message": "denied" }))).await;
    let broker = HttpLocationBroker::new(broker_settings(base_url)).expect("broker builds");

    let err = broker.publish(&report()).await.expect_err("publish fails");
    handle.stop(true).await;

    assert!(matches!(err, LocationBrokerError::Rejected { .. }), "got {err:?}");
}
