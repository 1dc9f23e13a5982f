/// Presentation views over a published `WarningSnapshot`.
///
/// Three sensors are derived from each snapshot:
/// - `CountSensor`: the number of active warnings
/// - `HighestLevelSensor`: the most severe active level, with colour and icon
/// - `ActiveWarningsSensor`: per-warning detail for every active warning
///
/// Each sensor carries a name and unique id derived from the area scope, so
/// several differently scoped services can run side by side without their
/// entities colliding. All views are plain `Serialize` structs; the
/// endpoint renders them as JSON.

use crate::model::{Warning, WarningSnapshot};
use crate::scope::{AreaFilter, MonitoredAreas};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const ID_PREFIX: &str = "met_eireann_warnings";

const NO_LEVEL_ICON: &str = "mdi:weather-sunny";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorIdentity {
    pub name: String,
    pub unique_id: String,
    pub icon: &'static str,
}

impl SensorIdentity {
    fn new(base_name: &str, base_id: &str, icon: &'static str, filter: &AreaFilter) -> Self {
        let suffix = filter.display_suffix();
        Self {
            name: format!("{}{}", base_name, suffix),
            unique_id: format!("{}_{}{}", ID_PREFIX, base_id, id_suffix(&suffix)),
            icon,
        }
    }
}

/// " (2 Regions)" → "_2_regions"
fn id_suffix(display_suffix: &str) -> String {
    display_suffix
        .to_lowercase()
        .replace(' ', "_")
        .replace(['(', ')'], "")
}

// ---------------------------------------------------------------------------
// Shared attributes
// ---------------------------------------------------------------------------

/// `monitored_regions` or `monitored_counties`, omitted for the whole country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitoredKeys {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitored_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitored_counties: Option<Vec<String>>,
}

impl MonitoredKeys {
    fn from_filter(filter: &AreaFilter) -> Self {
        match filter.monitored() {
            MonitoredAreas::Everywhere => Self::default(),
            MonitoredAreas::Regions(keys) => Self {
                monitored_regions: Some(keys.iter().cloned().collect()),
                monitored_counties: None,
            },
            MonitoredAreas::Counties(keys) => Self {
                monitored_regions: None,
                monitored_counties: Some(keys.iter().cloned().collect()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Active warnings count
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountAttributes {
    pub warning_types: Vec<String>,
    /// County names for the affected codes that resolve.
    pub regions_affected: Vec<String>,
    pub region_codes_affected: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub area_type: &'static str,
    #[serde(flatten)]
    pub monitored: MonitoredKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSensor {
    #[serde(flatten)]
    pub identity: SensorIdentity,
    pub state: usize,
    pub attributes: CountAttributes,
}

impl CountSensor {
    pub fn new(
        snapshot: &WarningSnapshot,
        filter: &AreaFilter,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            identity: SensorIdentity::new(
                "Met Éireann Active Warnings Count",
                "active_warnings_count",
                "mdi:weather-cloudy-alert",
                filter,
            ),
            state: snapshot.active_count,
            attributes: CountAttributes {
                warning_types: snapshot.warning_types.iter().cloned().collect(),
                regions_affected: filter.resolve_county_names(&snapshot.regions_affected),
                region_codes_affected: snapshot.regions_affected.iter().cloned().collect(),
                last_updated,
                area_type: filter.area_type(),
                monitored: MonitoredKeys::from_filter(filter),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Highest warning level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighestLevelAttributes {
    pub active_warnings_count: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub area_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(flatten)]
    pub monitored: MonitoredKeys,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighestLevelSensor {
    #[serde(flatten)]
    pub identity: SensorIdentity,
    /// "Red", "Orange", "Yellow" or "None".
    pub state: String,
    pub attributes: HighestLevelAttributes,
}

impl HighestLevelSensor {
    pub fn new(
        snapshot: &WarningSnapshot,
        filter: &AreaFilter,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        let level = snapshot.highest_level;
        let icon = level.map(|l| l.icon()).unwrap_or(NO_LEVEL_ICON);

        Self {
            identity: SensorIdentity::new(
                "Met Éireann Highest Warning Level",
                "highest_warning_level",
                icon,
                filter,
            ),
            state: level.map(|l| l.title()).unwrap_or("None").to_string(),
            attributes: HighestLevelAttributes {
                active_warnings_count: snapshot.active_count,
                last_updated,
                area_type: filter.area_type(),
                color: level.map(|l| l.color()),
                priority: level.map(|l| l.priority()),
                monitored: MonitoredKeys::from_filter(filter),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Active warnings detail
// ---------------------------------------------------------------------------

/// One active warning as exposed to consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningDetail {
    pub id: String,
    pub cap_id: Option<String>,
    #[serde(rename = "type")]
    pub warning_type: Option<String>,
    pub level: Option<String>,
    pub issued: Option<String>,
    pub updated: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
    /// Resolved county names.
    pub regions: Vec<String>,
    pub region_codes: Vec<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub status: String,
}

impl WarningDetail {
    fn new(warning: &Warning, filter: &AreaFilter) -> Self {
        Self {
            id: warning.id.clone(),
            cap_id: warning.secondary_id.clone(),
            warning_type: warning.warning_type.clone(),
            level: warning.level.clone(),
            issued: warning.issued.clone(),
            updated: warning.updated.clone(),
            headline: warning.headline.clone(),
            description: warning.description.clone(),
            instruction: warning.instruction.clone(),
            onset: warning.onset.clone(),
            expires: warning.expires.clone(),
            regions: filter.resolve_county_names(&warning.region_codes),
            region_codes: warning.region_codes.clone(),
            severity: warning.severity.clone(),
            certainty: warning.certainty.clone(),
            urgency: warning.urgency.clone(),
            status: warning.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWarningsAttributes {
    pub active_warnings_count: usize,
    pub total_warnings: usize,
    pub warning_types: Vec<String>,
    pub regions_affected: Vec<String>,
    pub region_codes_affected: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub area_type: &'static str,
    #[serde(flatten)]
    pub monitored: MonitoredKeys,
    pub warnings: Vec<WarningDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWarningsSensor {
    #[serde(flatten)]
    pub identity: SensorIdentity,
    pub state: String,
    pub attributes: ActiveWarningsAttributes,
}

impl ActiveWarningsSensor {
    pub fn new(
        snapshot: &WarningSnapshot,
        filter: &AreaFilter,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        let warnings: Vec<WarningDetail> = snapshot
            .active_warnings()
            .map(|w| WarningDetail::new(w, filter))
            .collect();

        Self {
            identity: SensorIdentity::new(
                "Met Éireann Active Warnings",
                "active_warnings",
                "mdi:format-list-bulleted",
                filter,
            ),
            state: summary_text(warnings.len()),
            attributes: ActiveWarningsAttributes {
                active_warnings_count: warnings.len(),
                total_warnings: snapshot.warnings.len(),
                warning_types: snapshot.warning_types.iter().cloned().collect(),
                regions_affected: filter.resolve_county_names(&snapshot.regions_affected),
                region_codes_affected: snapshot.regions_affected.iter().cloned().collect(),
                last_updated,
                area_type: filter.area_type(),
                monitored: MonitoredKeys::from_filter(filter),
                warnings,
            },
        }
    }
}

fn summary_text(count: usize) -> String {
    match count {
        0 => "No active warnings".to_string(),
        1 => "1 active warning".to_string(),
        n => format!("{} active warnings", n),
    }
}

// ---------------------------------------------------------------------------
// All sensors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSet {
    pub active_warnings_count: CountSensor,
    pub highest_warning_level: HighestLevelSensor,
    pub active_warnings: ActiveWarningsSensor,
}

impl SensorSet {
    pub fn new(
        snapshot: &WarningSnapshot,
        filter: &AreaFilter,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            active_warnings_count: CountSensor::new(snapshot, filter, last_updated),
            highest_warning_level: HighestLevelSensor::new(snapshot, filter, last_updated),
            active_warnings: ActiveWarningsSensor::new(snapshot, filter, last_updated),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
