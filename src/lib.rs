/// warnmon_service: Met Éireann weather warnings monitoring service.
///
/// # Module structure
///
/// ```text
/// warnmon_service
/// ├── model       — shared data types (Warning, WarningLevel, WarningSnapshot, errors)
/// ├── areas       — county / region catalog and EIxx area code mapping
/// ├── scope       — area scope and the AreaFilter used by pipeline and sensors
/// ├── config      — service configuration loader (warnmon.toml)
/// ├── ingest
/// │   ├── met_eireann — feed fetch, shape detection, normalization
/// │   └── fixtures (test only) — representative feed payloads
/// ├── analysis
/// │   └── aggregate   — folds filtered warnings into a WarningSnapshot
/// ├── monitor     — published snapshot store and update status
/// ├── daemon      — fetch cycle coordinator (validation, timer, manual refresh)
/// ├── sensors     — count / highest level / active warnings views
/// ├── endpoint    — JSON HTTP API over the published sensors
/// └── logging     — tracing subscriber setup
/// ```

/// Public modules
pub mod analysis;
pub mod areas;
pub mod config;
pub mod daemon;
pub mod endpoint;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod monitor;
pub mod scope;
pub mod sensors;
