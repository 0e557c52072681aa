//! Reqwest-backed location store adapter.
//!
//! Owns transport details only: the scan request body, bearer auth, timeout
//! and status mapping, and JSON decoding into domain points.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ScanFilterDto, ScanRequestDto, ScanResponseDto};
use crate::domain::ports::{LocationStore, LocationStoreError};
use crate::domain::{LocationPoint, UserName};
use crate::outbound::http_support::{
    HttpAdapterError, build_client, endpoint, parse_base_url, status_message, with_token,
};

/// Connection settings for [`HttpLocationStore`].
#[derive(Debug, Clone)]
pub struct HttpStoreSettings {
    /// Store base URL.
    pub base_url: String,
    /// Table holding location records.
    pub table: String,
    /// Maximum records returned by one scan.
    pub scan_limit: usize,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Location store reached over HTTP.
pub struct HttpLocationStore {
    client: Client,
    scan_url: Url,
    scan_limit: usize,
    token: Option<String>,
}

impl HttpLocationStore {
    /// Build an adapter posting scans to `{base_url}/tables/{table}/scan`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(settings: HttpStoreSettings) -> Result<Self, HttpAdapterError> {
        let base = parse_base_url(&settings.base_url)?;
        let scan_url = endpoint(&base, &["tables", settings.table.as_str(), "scan"])?;
        Ok(Self {
            client: build_client(settings.timeout)?,
            scan_url,
            scan_limit: settings.scan_limit,
            token: settings.token,
        })
    }
}

#[async_trait]
impl LocationStore for HttpLocationStore {
    async fn find_by_user(
        &self,
        user_name: &UserName,
    ) -> Result<Vec<LocationPoint>, LocationStoreError> {
        let body = ScanRequestDto {
            filter: ScanFilterDto {
                user_name: user_name.as_str(),
            },
            limit: self.scan_limit,
        };
        let request = self
            .client
            .post(self.scan_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body);
        let response = with_token(request, self.token.as_deref())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        let points = parse_points(bytes.as_ref())?;
        debug!(user_name = %user_name, count = points.len(), "store scan returned");
        Ok(points)
    }
}

fn parse_points(body: &[u8]) -> Result<Vec<LocationPoint>, LocationStoreError> {
    let decoded: ScanResponseDto = serde_json::from_slice(body).map_err(|error| {
        LocationStoreError::decode(format!("invalid scan JSON payload: {error}"))
    })?;
    decoded
        .into_domain_points()
        .map_err(LocationStoreError::decode)
}

fn map_transport_error(error: reqwest::Error) -> LocationStoreError {
    LocationStoreError::connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> LocationStoreError {
    let message = status_message(status, body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT | StatusCode::BAD_GATEWAY => {
            LocationStoreError::connection(message)
        }
        _ => LocationStoreError::query(message),
    }
}
