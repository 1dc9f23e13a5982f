/// Core data types for the Met Éireann warnings monitor.
///
/// This module defines the shared domain model imported by all other modules:
/// the canonical `Warning`, the typed `WarningLevel`, the aggregated
/// `WarningSnapshot`, and the error enums. It contains no I/O.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

/// Lowercased provider status values that mark a warning as in effect.
pub const ACTIVE_STATUSES: [&str; 3] = ["warning", "actual", "active"];

// ---------------------------------------------------------------------------
// Warning levels
// ---------------------------------------------------------------------------

/// Met Éireann colour-coded warning level, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Yellow,
    Orange,
    Red,
}

impl WarningLevel {
    /// Parses a provider level label, ignoring case. Padded or otherwise
    /// unrecognized labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "red" => Some(WarningLevel::Red),
            "orange" => Some(WarningLevel::Orange),
            "yellow" => Some(WarningLevel::Yellow),
            _ => None,
        }
    }

    /// Lowercase key as used by the feed.
    pub fn key(&self) -> &'static str {
        match self {
            WarningLevel::Red => "red",
            WarningLevel::Orange => "orange",
            WarningLevel::Yellow => "yellow",
        }
    }

    /// Title-cased label for display ("Red", "Orange", "Yellow").
    pub fn title(&self) -> &'static str {
        match self {
            WarningLevel::Red => "Red",
            WarningLevel::Orange => "Orange",
            WarningLevel::Yellow => "Yellow",
        }
    }

    /// Numeric priority: red 3, orange 2, yellow 1.
    pub fn priority(&self) -> u8 {
        match self {
            WarningLevel::Red => 3,
            WarningLevel::Orange => 2,
            WarningLevel::Yellow => 1,
        }
    }

    /// Hex colour used when rendering this level.
    pub fn color(&self) -> &'static str {
        match self {
            WarningLevel::Red => "#d32f2f",
            WarningLevel::Orange => "#f57c00",
            WarningLevel::Yellow => "#fbc02d",
        }
    }

    /// Material Design icon name for this level.
    pub fn icon(&self) -> &'static str {
        match self {
            WarningLevel::Red => "mdi:alert-octagon",
            WarningLevel::Orange => "mdi:alert",
            WarningLevel::Yellow => "mdi:alert-outline",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ---------------------------------------------------------------------------
// Warning
// ---------------------------------------------------------------------------

/// A single weather warning, normalized from either feed shape.
///
/// Timestamps and free text are carried exactly as the provider sent them;
/// nothing here is parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Warning {
    pub id: String,
    pub secondary_id: Option<String>, // CAP id, flat shape only
    #[serde(rename = "type")]
    pub warning_type: Option<String>, // "wind", "rain", "snow-ice", ...
    pub level: Option<String>,        // raw label, see `level_kind`
    pub issued: Option<String>,
    pub updated: Option<String>,
    pub onset: Option<String>,
    pub expires: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub region_codes: Vec<String>, // provider codes, e.g. "EI07"
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub status: String, // lowercased, "" when absent
}

impl Warning {
    /// True when `status` is one of `ACTIVE_STATUSES`.
    pub fn is_active(&self) -> bool {
        ACTIVE_STATUSES.contains(&self.status.as_str())
    }

    /// The recognized level, if the raw label is red, orange or yellow.
    pub fn level_kind(&self) -> Option<WarningLevel> {
        self.level.as_deref().and_then(WarningLevel::from_label)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Aggregated result of one fetch cycle. Rebuilt from scratch every cycle
/// and published as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WarningSnapshot {
    /// Every warning that passed the area filter, active or not.
    pub warnings: Vec<Warning>,
    pub active_count: usize,
    pub highest_level: Option<WarningLevel>,
    pub warning_types: BTreeSet<String>,
    /// Raw provider codes of active warnings, resolvable or not.
    pub regions_affected: BTreeSet<String>,
}

impl WarningSnapshot {
    /// Iterator over the warnings counted in `active_count`.
    pub fn active_warnings(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(|w| w.is_active())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching the warnings feed. All of them are
/// recoverable: the coordinator records them and keeps the previous snapshot.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request did not complete within the configured timeout.
    #[error("Timeout communicating with Met Éireann API")]
    Timeout,
    /// Connection, TLS or protocol failure.
    #[error("Error communicating with Met Éireann API: {0}")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx HTTP response.
    #[error("Error communicating with API: HTTP {0}")]
    HttpStatus(u16),
    /// The body was not JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
    /// Setup-time validation failed.
    #[error("Cannot connect to warnings feed: {0}")]
    CannotConnect(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else if let Some(status) = err.status() {
            FeedError::HttpStatus(status.as_u16())
        } else {
            FeedError::Transport(err)
        }
    }
}

/// Errors raised while loading or validating `warnmon.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("polling interval must be between {min} and {max} minutes, got {value}")]
    IntervalOutOfRange { value: u64, min: u64, max: u64 },
    #[error("{name} must be between 1 and 300 seconds, got {value}")]
    TimeoutOutOfRange { name: &'static str, value: u64 },
    #[error("Please select at least one {0}")]
    EmptySelection(&'static str),
    #[error("Unknown region key: {0}")]
    UnknownRegion(String),
    #[error("Unknown county key: {0}")]
    UnknownCounty(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn warning_with(status: &str, level: Option<&str>) -> Warning {
        Warning {
            status: status.to_string(),
            level: level.map(String::from),
            ..Warning::default()
        }
    }

    #[test]
    fn test_level_ordering_matches_priority() {
        assert!(WarningLevel::Red > WarningLevel::Orange);
        assert!(WarningLevel::Orange > WarningLevel::Yellow);
        assert_eq!(WarningLevel::Red.priority(), 3);
        assert_eq!(WarningLevel::Orange.priority(), 2);
        assert_eq!(WarningLevel::Yellow.priority(), 1);
    }

    #[test]
    fn test_level_from_label_is_case_insensitive() {
        assert_eq!(WarningLevel::from_label("RED"), Some(WarningLevel::Red));
        assert_eq!(WarningLevel::from_label("Orange"), Some(WarningLevel::Orange));
        assert_eq!(WarningLevel::from_label(" Orange "), None);
        assert_eq!(WarningLevel::from_label("yellow"), Some(WarningLevel::Yellow));
        assert_eq!(WarningLevel::from_label("green"), None);
        assert_eq!(WarningLevel::from_label(""), None);
    }

    #[test]
    fn test_level_display_metadata() {
        assert_eq!(WarningLevel::Red.color(), "#d32f2f");
        assert_eq!(WarningLevel::Orange.icon(), "mdi:alert");
        assert_eq!(WarningLevel::Yellow.title(), "Yellow");
        assert_eq!(WarningLevel::Orange.to_string(), "orange");
    }

    #[test]
    fn test_active_statuses() {
        assert!(warning_with("warning", None).is_active());
        assert!(warning_with("actual", None).is_active());
        assert!(warning_with("active", None).is_active());
        assert!(!warning_with("", None).is_active());
        assert!(!warning_with("expired", None).is_active());
        // status is lowercased at normalization time, not here
        assert!(!warning_with("Warning", None).is_active());
    }

    #[test]
    fn test_unrecognized_level_is_preserved_but_untyped() {
        let w = warning_with("warning", Some("purple"));
        assert_eq!(w.level.as_deref(), Some("purple"));
        assert_eq!(w.level_kind(), None);
    }

    #[test]
    fn test_default_snapshot_is_zeroed() {
        let snapshot = WarningSnapshot::default();
        assert!(snapshot.warnings.is_empty());
        assert_eq!(snapshot.active_count, 0);
        assert_eq!(snapshot.highest_level, None);
        assert!(snapshot.warning_types.is_empty());
        assert!(snapshot.regions_affected.is_empty());
    }

    #[test]
    fn test_snapshot_serializes_level_lowercase() {
        let snapshot = WarningSnapshot {
            highest_level: Some(WarningLevel::Orange),
            ..WarningSnapshot::default()
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["highest_level"], "orange");
        assert_eq!(json["active_count"], 0);
    }

    #[test]
    fn test_feed_error_messages() {
        assert_eq!(
            FeedError::HttpStatus(503).to_string(),
            "Error communicating with API: HTTP 503"
        );
        assert!(FeedError::Timeout.to_string().contains("Timeout"));
    }
}
