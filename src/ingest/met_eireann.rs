/// Met Éireann open-data warnings feed client.
///
/// Handles fetching and normalizing the national warnings feed:
///   https://www.met.ie/Open_Data/json/warning_IRELAND.json
///
/// The feed has been published in two shapes over time: a bare JSON array
/// of flat warning objects, and a GeoJSON-like object whose `features`
/// each carry a `properties` sub-object. Both are detected structurally
/// and mapped onto the canonical `Warning`. See `fixtures.rs` for annotated
/// examples of each.

use crate::model::{FeedError, Warning};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

pub const WARNINGS_URL: &str = "https://www.met.ie/Open_Data/json/warning_IRELAND.json";

// ---------------------------------------------------------------------------
// Shape detection
// ---------------------------------------------------------------------------

/// Outer container of a feed payload.
#[derive(Debug, PartialEq)]
pub enum FeedShape<'a> {
    /// `[ {...}, {...} ]`
    WarningList(&'a [Value]),
    /// `{ "features": [ { "properties": {...} }, ... ] }`
    FeatureCollection(&'a [Value]),
    /// null, scalars, or objects without `features`.
    Unrecognized,
}

impl<'a> FeedShape<'a> {
    pub fn detect(payload: &'a Value) -> Self {
        match payload {
            Value::Array(records) => FeedShape::WarningList(records),
            Value::Object(obj) => match obj.get("features") {
                Some(Value::Array(features)) => FeedShape::FeatureCollection(features),
                _ => FeedShape::Unrecognized,
            },
            _ => FeedShape::Unrecognized,
        }
    }

    fn records(&self) -> &'a [Value] {
        match *self {
            FeedShape::WarningList(records) | FeedShape::FeatureCollection(records) => records,
            FeedShape::Unrecognized => &[],
        }
    }
}

/// A single record, tagged by which field layout it uses.
#[derive(Debug, PartialEq)]
pub enum RawRecord<'a> {
    /// Fields at the top level; `capId`, `updated` and `expiry` present.
    Flat(&'a Map<String, Value>),
    /// Fields under `properties`; `expires` instead of `expiry`, no
    /// `capId` or `updated`.
    Nested(&'a Map<String, Value>),
}

impl<'a> RawRecord<'a> {
    /// Returns `None` for anything that is not a JSON object.
    pub fn detect(record: &'a Value) -> Option<Self> {
        let obj = record.as_object()?;
        match obj.get("properties") {
            Some(Value::Object(props)) => Some(RawRecord::Nested(props)),
            _ => Some(RawRecord::Flat(obj)),
        }
    }

    /// Maps the record's fields onto a `Warning`. Never fails: missing or
    /// oddly typed fields become absent.
    pub fn into_warning(self) -> Warning {
        match self {
            RawRecord::Flat(f) => Warning {
                id: text(f, "id").unwrap_or_default(),
                secondary_id: text(f, "capId"),
                warning_type: text(f, "type"),
                level: text(f, "level"),
                issued: text(f, "issued"),
                updated: text(f, "updated"),
                onset: text(f, "onset"),
                expires: text(f, "expiry"),
                headline: text(f, "headline"),
                description: text(f, "description"),
                instruction: text(f, "instruction"),
                region_codes: codes(f, "regions"),
                severity: text(f, "severity"),
                certainty: text(f, "certainty"),
                urgency: text(f, "urgency"),
                status: status(f),
            },
            RawRecord::Nested(p) => Warning {
                id: text(p, "id").unwrap_or_default(),
                secondary_id: None,
                warning_type: text(p, "type"),
                level: text(p, "level"),
                issued: text(p, "issued"),
                updated: None,
                onset: text(p, "onset"),
                expires: text(p, "expires"),
                headline: text(p, "headline"),
                description: text(p, "description"),
                instruction: text(p, "instruction"),
                region_codes: codes(p, "regions"),
                severity: text(p, "severity"),
                certainty: text(p, "certainty"),
                urgency: text(p, "urgency"),
                status: status(p),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

/// Strings pass through; numbers become their decimal text (ids are
/// occasionally numeric). Everything else is treated as absent.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn codes(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(String::from))
            .collect(),
        Some(Value::String(single)) => vec![single.clone()],
        _ => Vec::new(),
    }
}

fn status(fields: &Map<String, Value>) -> String {
    text(fields, "status").map(|s| s.to_lowercase()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalizes a whole decoded payload into canonical warnings, in feed order.
///
/// Never fails. Unrecognized containers yield an empty list, and records
/// that are not objects are skipped without affecting the rest.
pub fn normalize_payload(payload: &Value) -> Vec<Warning> {
    let shape = FeedShape::detect(payload);
    if shape == FeedShape::Unrecognized && !payload.is_null() {
        debug!(source = "met.ie", "unrecognized payload container, treating as empty");
    }

    let mut warnings = Vec::new();
    for (index, record) in shape.records().iter().enumerate() {
        match RawRecord::detect(record) {
            Some(raw) => warnings.push(raw.into_warning()),
            None => debug!(source = "met.ie", index, "skipping non-object warning record"),
        }
    }
    warnings
}

/// Decodes a response body. An empty body is an absent payload (`null`);
/// anything else must be JSON.
pub fn decode_body(body: &str) -> Result<Value, FeedError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| FeedError::InvalidBody(format!("JSON deserialization failed: {}", e)))
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetches and decodes the feed with a per-request timeout.
///
/// # Errors
/// - `FeedError::Timeout`: no complete response within `timeout`.
/// - `FeedError::Transport`: connection or protocol failure.
/// - `FeedError::HttpStatus`: any non-2xx response.
/// - `FeedError::InvalidBody`: the body was not JSON.
pub fn fetch_feed(
    client: &reqwest::blocking::Client,
    url: &str,
    timeout: Duration,
) -> Result<Value, FeedError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .timeout(timeout)
        .send()?;

    if !response.status().is_success() {
        return Err(FeedError::HttpStatus(response.status().as_u16()));
    }

    let body = response.text()?;
    decode_body(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
