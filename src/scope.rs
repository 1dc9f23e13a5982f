/// Area scope and filtering.
///
/// `AreaScope` is the user's geographic selection: the whole country, a set
/// of provinces, or a set of counties. `AreaFilter` wraps it as the one
/// service that both the fetch pipeline and the presentation layer use, for
/// inclusion decisions and for scope-derived names.

use crate::areas;
use crate::model::Warning;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Geographic selection, fixed at setup time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AreaScope {
    #[default]
    WholeCountry,
    /// Region keys from `areas::REGIONS`.
    ByRegion(BTreeSet<String>),
    /// County keys from `areas::COUNTIES`.
    ByCounty(BTreeSet<String>),
}

impl AreaScope {
    /// Decides whether a warning falls inside this scope.
    ///
    /// Region and county modes resolve each provider code through the area
    /// catalog; codes that do not resolve are ignored, so a warning whose
    /// codes are all unknown is excluded. An empty selection matches nothing.
    pub fn includes(&self, warning: &Warning) -> bool {
        match self {
            AreaScope::WholeCountry => true,
            AreaScope::ByRegion(selected) => resolved_counties(warning)
                .filter_map(areas::region_of_county)
                .any(|region| selected.contains(region)),
            AreaScope::ByCounty(selected) => {
                resolved_counties(warning).any(|county| selected.contains(county))
            }
        }
    }

    /// Config-surface label: "whole_ireland", "regions" or "counties".
    pub fn area_type(&self) -> &'static str {
        match self {
            AreaScope::WholeCountry => "whole_ireland",
            AreaScope::ByRegion(_) => "regions",
            AreaScope::ByCounty(_) => "counties",
        }
    }
}

fn resolved_counties(warning: &Warning) -> impl Iterator<Item = &'static str> + '_ {
    warning
        .region_codes
        .iter()
        .filter_map(|code| areas::county_for_code(code))
}

// ---------------------------------------------------------------------------
// Filter service
// ---------------------------------------------------------------------------

/// Which keys a scope monitors, for display attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitoredAreas<'a> {
    Everywhere,
    Regions(&'a BTreeSet<String>),
    Counties(&'a BTreeSet<String>),
}

/// The area filter shared by the pipeline and the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct AreaFilter {
    scope: AreaScope,
}

impl AreaFilter {
    pub fn new(scope: AreaScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &AreaScope {
        &self.scope
    }

    pub fn includes(&self, warning: &Warning) -> bool {
        self.scope.includes(warning)
    }

    /// Keeps the in-scope warnings, preserving feed order.
    pub fn retain(&self, mut warnings: Vec<Warning>) -> Vec<Warning> {
        warnings.retain(|w| self.scope.includes(w));
        warnings
    }

    pub fn area_type(&self) -> &'static str {
        self.scope.area_type()
    }

    pub fn monitored(&self) -> MonitoredAreas<'_> {
        match &self.scope {
            AreaScope::WholeCountry => MonitoredAreas::Everywhere,
            AreaScope::ByRegion(keys) => MonitoredAreas::Regions(keys),
            AreaScope::ByCounty(keys) => MonitoredAreas::Counties(keys),
        }
    }

    /// Suffix appended to entity names: " (Ireland)", " (Leinster)",
    /// " (2 Regions)", " (Cork)", " (3 Counties)".
    pub fn display_suffix(&self) -> String {
        match &self.scope {
            AreaScope::WholeCountry => " (Ireland)".to_string(),
            AreaScope::ByRegion(keys) => single_or_count(keys, areas::region_name, "Regions"),
            AreaScope::ByCounty(keys) => single_or_count(keys, areas::county_name, "Counties"),
        }
    }

    /// County display names for the codes that resolve, in input order.
    /// Unresolvable codes are skipped.
    pub fn resolve_county_names<'a, I>(&self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        codes
            .into_iter()
            .filter_map(|code| areas::county_for_code(code))
            .map(|county| areas::county_name(county).unwrap_or(county).to_string())
            .collect()
    }
}

fn single_or_count(
    keys: &BTreeSet<String>,
    name_of: fn(&str) -> Option<&'static str>,
    plural: &str,
) -> String {
    if keys.len() == 1 {
        let key = keys.iter().next().map(String::as_str).unwrap_or_default();
        let name = name_of(key).map(String::from).unwrap_or_else(|| title_case(key));
        format!(" ({})", name)
    } else {
        format!(" ({} {})", keys.len(), plural)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
