//! Shared validation helpers for inbound HTTP adapters.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidNumber,
    InvalidOrder,
    InvalidTimestamp,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidOrder => "invalid_order",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: Option<&str>) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "value": value, "code": code.as_str() }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("{name} is required"), ErrorCode::MissingField, None)
}

pub(crate) fn invalid_order_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be asc or desc"),
        ErrorCode::InvalidOrder,
        Some(value),
    )
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be an RFC 3339 timestamp"),
        ErrorCode::InvalidTimestamp,
        Some(value),
    )
}

/// Require a non-blank string parameter.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Parse an optional non-negative integer parameter.
pub(crate) fn parse_optional_count(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<usize>, Error> {
    value
        .map(|raw| {
            raw.trim().parse::<usize>().map_err(|_| {
                let name = field.as_str();
                field_error(
                    field,
                    format!("{name} must be a non-negative integer"),
                    ErrorCode::InvalidNumber,
                    Some(&raw),
                )
            })
        })
        .transpose()
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, &raw))
        })
        .transpose()
}

/// JSON extractor configuration rendering body errors as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("request body must be a JSON location report")
        .with_details(json!({
            "code": ErrorCode::InvalidBody.as_str(),
            "reason": err.to_string(),
        }))
        .into()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn blank_text_is_missing(#[case] value: Option<&str>) {
        let err = require_text(value.map(str::to_owned), FieldName::new("userName"))
            .expect_err("blank rejected");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(err.message(), "userName is required");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }

    #[rstest]
    #[case(Some("10"), Some(10))]
    #[case(Some(" 3 "), Some(3))]
    #[case(None, None)]
    fn counts_parse(#[case] raw: Option<&str>, #[case] expected: Option<usize>) {
        let parsed = parse_optional_count(raw.map(str::to_owned), FieldName::new("limit"))
            .expect("valid count");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("ten")]
    #[case("1.5")]
    fn invalid_counts_are_rejected(#[case] raw: &str) {
        let err = parse_optional_count(Some(raw.to_owned()), FieldName::new("limit"))
            .expect_err("invalid count");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "limit");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn timestamps_must_be_rfc3339() {
        let ok = parse_optional_rfc3339_timestamp(
            Some("2024-01-01T01:00:00+01:00".to_owned()),
            FieldName::new("timestamp"),
        )
        .expect("valid timestamp");
        assert_eq!(ok.map(|t| t.to_rfc3339()), Some("2024-01-01T00:00:00+00:00".to_owned()));

        let err = parse_optional_rfc3339_timestamp(
            Some("yesterday".to_owned()),
            FieldName::new("timestamp"),
        )
        .expect_err("invalid timestamp");
        assert_eq!(err.details().expect("details")["code"], "invalid_timestamp");
    }
}
