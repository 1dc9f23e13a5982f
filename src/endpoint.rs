/// HTTP endpoint for querying the published warnings
///
/// Provides a small JSON API over the `SnapshotStore` so dashboards and
/// scripts can read the current sensors without talking to the feed.
///
/// Endpoints:
/// - GET  /health  - Service health plus fetch status
/// - GET  /snapshot - The raw aggregated snapshot
/// - GET  /sensors - All three sensors
/// - GET  /sensors/{sensor} - One sensor
/// - POST /refresh - Queue a manual refresh (202)

use crate::daemon::RefreshHandle;
use crate::monitor::SnapshotStore;
use crate::scope::AreaFilter;
use crate::sensors::{ActiveWarningsSensor, CountSensor, HighestLevelSensor, SensorSet};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tiny_http::{Method, Server};
use tracing::{debug, info, warn};

const AVAILABLE_ENDPOINTS: [&str; 7] = [
    "GET /health",
    "GET /snapshot",
    "GET /sensors",
    "GET /sensors/active_warnings_count",
    "GET /sensors/highest_warning_level",
    "GET /sensors/active_warnings",
    "POST /refresh",
];

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Failed to start HTTP server on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Everything a request handler can read or trigger.
#[derive(Clone)]
pub struct EndpointState {
    pub store: Arc<SnapshotStore>,
    pub filter: Arc<AreaFilter>,
    pub refresh: RefreshHandle,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Resolves one request to a status code and JSON body. Query strings are
/// ignored.
pub fn route(method: &Method, url: &str, state: &EndpointState) -> (u16, Value) {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/health") => handle_health(state),
        (Method::Get, "/snapshot") => match state.store.latest() {
            Some(snapshot) => (200, to_json(&*snapshot)),
            None => not_ready(),
        },
        (Method::Get, p) if p == "/sensors" || p.starts_with("/sensors/") => {
            handle_sensors(p.trim_start_matches("/sensors").trim_start_matches('/'), state)
        }
        (Method::Post, "/refresh") => {
            if state.refresh.request_refresh() {
                (202, json!({ "status": "queued" }))
            } else {
                (503, json!({ "error": "Refresh loop is not running" }))
            }
        }
        _ => (
            404,
            json!({
                "error": "Not found",
                "available_endpoints": AVAILABLE_ENDPOINTS
            }),
        ),
    }
}

fn handle_health(state: &EndpointState) -> (u16, Value) {
    let status = state.store.status();
    (
        200,
        json!({
            "status": "ok",
            "service": "warnmon_service",
            "version": env!("CARGO_PKG_VERSION"),
            "area_type": state.filter.area_type(),
            "last_update_success": status.last_update_success(),
            "update": status,
        }),
    )
}

fn handle_sensors(name: &str, state: &EndpointState) -> (u16, Value) {
    let Some(snapshot) = state.store.latest() else {
        return not_ready();
    };
    let last_updated = state.store.status().last_success;
    let filter = state.filter.as_ref();

    match name {
        "" => (200, to_json(&SensorSet::new(&snapshot, filter, last_updated))),
        "active_warnings_count" => (200, to_json(&CountSensor::new(&snapshot, filter, last_updated))),
        "highest_warning_level" => {
            (200, to_json(&HighestLevelSensor::new(&snapshot, filter, last_updated)))
        }
        "active_warnings" => {
            (200, to_json(&ActiveWarningsSensor::new(&snapshot, filter, last_updated)))
        }
        other => (
            404,
            json!({
                "error": format!("Unknown sensor: {}", other),
                "available_endpoints": AVAILABLE_ENDPOINTS
            }),
        ),
    }
}

fn not_ready() -> (u16, Value) {
    (503, json!({ "error": "No warnings data published yet" }))
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Binds the listener on all interfaces. Port 0 picks a free port.
pub fn bind(port: u16) -> Result<Server, EndpointError> {
    Server::http(format!("0.0.0.0:{}", port)).map_err(|source| EndpointError::Bind { port, source })
}

/// Serves requests until the server is dropped or unblocked.
pub fn serve(server: &Server, state: &EndpointState) {
    for request in server.incoming_requests() {
        let (status, body) = route(request.method(), request.url(), state);
        debug!(method = %request.method(), url = request.url(), status, "endpoint request");

        if let Err(e) = request.respond(create_response(status, &body)) {
            warn!("Failed to send response: {}", e);
        }
    }
}

/// Start HTTP endpoint server on the specified port (blocks)
pub fn start_endpoint_server(port: u16, state: EndpointState) -> Result<(), EndpointError> {
    let server = bind(port)?;
    info!(port, "HTTP endpoint listening");
    serve(&server, &state);
    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: &Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(json).unwrap_or_else(|_| "{}".to_string());
    let response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code));

    match tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
