/// Service configuration loader - parses warnmon.toml
///
/// Separates the feed location, polling cadence and area selection from
/// code, so the monitored area can be changed without recompiling the
/// service. Every section is optional; an empty file monitors the whole of
/// Ireland every 30 minutes with no HTTP endpoint.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::areas;
use crate::ingest::met_eireann::WARNINGS_URL;
use crate::model::ConfigError;
use crate::scope::AreaScope;

pub const DEFAULT_CONFIG_PATH: &str = "warnmon.toml";

pub const MIN_INTERVAL_MINUTES: u64 = 10;
pub const MAX_INTERVAL_MINUTES: u64 = 120;

// ---------------------------------------------------------------------------
// TOML structures
// ---------------------------------------------------------------------------

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub feed: FeedConfig,
    pub polling: PollingConfig,
    pub area: AreaConfig,
    pub endpoint: Option<EndpointConfig>,
}

/// Upstream feed location and request timeouts.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub url: String,
    /// Timeout for scheduled and manual refreshes.
    pub refresh_timeout_secs: u64,
    /// Timeout for the one-off setup check.
    pub validation_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: WARNINGS_URL.to_string(),
            refresh_timeout_secs: 30,
            validation_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PollingConfig {
    pub interval_minutes: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_minutes: 30 }
    }
}

/// Area selection as offered by the setup flow.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    #[default]
    WholeIreland,
    Regions,
    Counties,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AreaConfig {
    pub area_type: AreaType,
    pub selected_regions: Vec<String>,
    pub selected_counties: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub port: u16,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads and validates configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents)
}

/// Parses and validates configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

impl ServiceConfig {
    /// Enforces the same constraints as the interactive setup: a bounded
    /// poll interval, and at least one known key for region/county modes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let interval = self.polling.interval_minutes;
        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&interval) {
            return Err(ConfigError::IntervalOutOfRange {
                value: interval,
                min: MIN_INTERVAL_MINUTES,
                max: MAX_INTERVAL_MINUTES,
            });
        }

        for (name, value) in [
            ("refresh_timeout_secs", self.feed.refresh_timeout_secs),
            ("validation_timeout_secs", self.feed.validation_timeout_secs),
        ] {
            if !(1..=300).contains(&value) {
                return Err(ConfigError::TimeoutOutOfRange { name, value });
            }
        }

        match self.area.area_type {
            AreaType::WholeIreland => {}
            AreaType::Regions => {
                if self.area.selected_regions.is_empty() {
                    return Err(ConfigError::EmptySelection("region"));
                }
                let known = areas::all_regions();
                if let Some(unknown) = self
                    .area
                    .selected_regions
                    .iter()
                    .find(|key| !known.iter().any(|(k, _)| *k == key.as_str()))
                {
                    return Err(ConfigError::UnknownRegion(unknown.clone()));
                }
            }
            AreaType::Counties => {
                if self.area.selected_counties.is_empty() {
                    return Err(ConfigError::EmptySelection("county"));
                }
                let known = areas::all_counties();
                if let Some(unknown) = self
                    .area
                    .selected_counties
                    .iter()
                    .find(|key| !known.iter().any(|(k, _)| *k == key.as_str()))
                {
                    return Err(ConfigError::UnknownCounty(unknown.clone()));
                }
            }
        }

        Ok(())
    }

    /// Builds the area scope. Selections belonging to the other mode are
    /// ignored.
    pub fn area_scope(&self) -> AreaScope {
        match self.area.area_type {
            AreaType::WholeIreland => AreaScope::WholeCountry,
            AreaType::Regions => AreaScope::ByRegion(key_set(&self.area.selected_regions)),
            AreaType::Counties => AreaScope::ByCounty(key_set(&self.area.selected_counties)),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling.interval_minutes * 60)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.refresh_timeout_secs)
    }

    pub fn validation_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.validation_timeout_secs)
    }
}

fn key_set(keys: &[String]) -> BTreeSet<String> {
    keys.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").expect("empty config is valid");
        assert_eq!(config.feed.url, WARNINGS_URL);
        assert_eq!(config.polling.interval_minutes, 30);
        assert_eq!(config.refresh_timeout(), Duration::from_secs(30));
        assert_eq!(config.validation_timeout(), Duration::from_secs(10));
        assert_eq!(config.area.area_type, AreaType::WholeIreland);
        assert_eq!(config.area_scope(), AreaScope::WholeCountry);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let config = parse_config(
            r#"
            [feed]
            url = "http://127.0.0.1:9000/warnings.json"
            refresh_timeout_secs = 20
            validation_timeout_secs = 5

            [polling]
            interval_minutes = 15

            [area]
            area_type = "counties"
            selected_counties = ["cork", "kerry"]

            [endpoint]
            port = 8080
            "#,
        )
        .expect("full config should parse");

        assert_eq!(config.feed.url, "http://127.0.0.1:9000/warnings.json");
        assert_eq!(config.poll_interval(), Duration::from_secs(15 * 60));
        assert_eq!(config.endpoint, Some(EndpointConfig { port: 8080 }));
        match config.area_scope() {
            AreaScope::ByCounty(keys) => {
                assert!(keys.contains("cork") && keys.contains("kerry"));
                assert_eq!(keys.len(), 2);
            }
            other => panic!("expected county scope, got {:?}", other),
        }
    }

    #[test]
    fn test_interval_bounds_are_inclusive() {
        assert!(parse_config("[polling]\ninterval_minutes = 10").is_ok());
        assert!(parse_config("[polling]\ninterval_minutes = 120").is_ok());
        assert!(matches!(
            parse_config("[polling]\ninterval_minutes = 9"),
            Err(ConfigError::IntervalOutOfRange { value: 9, .. })
        ));
        assert!(matches!(
            parse_config("[polling]\ninterval_minutes = 121"),
            Err(ConfigError::IntervalOutOfRange { value: 121, .. })
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = parse_config("[feed]\nrefresh_timeout_secs = 0");
        assert!(matches!(
            result,
            Err(ConfigError::TimeoutOutOfRange { name: "refresh_timeout_secs", value: 0 })
        ));
    }

    #[test]
    fn test_region_mode_requires_selection() {
        let result = parse_config("[area]\narea_type = \"regions\"");
        assert!(matches!(result, Err(ConfigError::EmptySelection("region"))));
    }

    #[test]
    fn test_county_mode_requires_selection() {
        let result = parse_config("[area]\narea_type = \"counties\"\nselected_counties = []");
        assert!(matches!(result, Err(ConfigError::EmptySelection("county"))));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result = parse_config("[area]\narea_type = \"regions\"\nselected_regions = [\"wessex\"]");
        assert!(matches!(result, Err(ConfigError::UnknownRegion(ref key)) if key == "wessex"));

        let result = parse_config("[area]\narea_type = \"counties\"\nselected_counties = [\"antrim\"]");
        assert!(matches!(result, Err(ConfigError::UnknownCounty(ref key)) if key == "antrim"));
    }

    #[test]
    fn test_every_catalog_key_is_accepted() {
        let quoted = |pairs: Vec<(&str, &str)>| {
            pairs.iter().map(|(key, _)| format!("\"{}\"", key)).collect::<Vec<_>>().join(", ")
        };
        let regions = format!(
            "[area]\narea_type = \"regions\"\nselected_regions = [{}]",
            quoted(areas::all_regions())
        );
        assert!(parse_config(&regions).is_ok());

        let counties = format!(
            "[area]\narea_type = \"counties\"\nselected_counties = [{}]",
            quoted(areas::all_counties())
        );
        assert!(parse_config(&counties).is_ok());
    }

    #[test]
    fn test_unknown_area_type_is_parse_error() {
        let result = parse_config("[area]\narea_type = \"planet\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_other_mode_selection_is_ignored() {
        let config = parse_config(
            "[area]\narea_type = \"regions\"\nselected_regions = [\"munster\"]\nselected_counties = [\"dublin\"]",
        )
        .unwrap();
        let expected: BTreeSet<String> = ["munster".to_string()].into_iter().collect();
        assert_eq!(config.area_scope(), AreaScope::ByRegion(expected));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_config("does-not-exist.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_repository_config_file_is_valid() {
        let config = load_config(DEFAULT_CONFIG_PATH).expect("warnmon.toml should load");
        assert!(config.poll_interval() >= Duration::from_secs(MIN_INTERVAL_MINUTES * 60));
    }
}
