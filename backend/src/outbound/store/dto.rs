//! DTOs for the location store scan contract.
//!
//! Requests are encoded from these types and responses decoded into them
//! before mapping to domain points in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::LocationPoint;

#[derive(Debug, Serialize)]
pub(super) struct ScanRequestDto<'a> {
    pub(super) filter: ScanFilterDto<'a>,
    pub(super) limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ScanFilterDto<'a> {
    pub(super) user_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ScanResponseDto {
    #[serde(default)]
    pub(super) items: Vec<LocationRecordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LocationRecordDto {
    pub(super) latitude: Option<f64>,
    pub(super) longitude: Option<f64>,
    #[serde(default)]
    pub(super) timestamp: String,
    #[serde(default)]
    pub(super) device_id: String,
    pub(super) user_name: String,
}

impl ScanResponseDto {
    pub(super) fn into_domain_points(self) -> Result<Vec<LocationPoint>, String> {
        self.items
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_domain_point(index))
            .collect()
    }
}

impl LocationRecordDto {
    fn into_domain_point(self, index: usize) -> Result<LocationPoint, String> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(format!("item {index} missing coordinates"));
        };
        Ok(LocationPoint::new(
            latitude,
            longitude,
            self.timestamp,
            self.device_id,
            self.user_name,
        ))
    }
}
