/// Snapshot aggregation.
///
/// `aggregate` folds the area-filtered warnings of one fetch cycle into a
/// `WarningSnapshot`: the full warning list plus the active count, the
/// highest active level, and the sets of hazard types and area codes
/// touched by active warnings.
///
/// The tests at the bottom also run the full normalize → filter →
/// aggregate pipeline over the shared fixtures.

use crate::model::{Warning, WarningSnapshot};

/// Builds a snapshot in a single pass over `warnings`.
///
/// Every warning is kept in `warnings`. Only active ones (see
/// `Warning::is_active`) feed the count, type set, area set and highest
/// level. The level only ever moves upward, so the result does not depend
/// on input order.
pub fn aggregate(warnings: Vec<Warning>) -> WarningSnapshot {
    let mut snapshot = WarningSnapshot::default();

    for warning in warnings {
        if warning.is_active() {
            snapshot.active_count += 1;

            if let Some(kind) = warning.warning_type.as_deref().filter(|t| !t.is_empty()) {
                snapshot.warning_types.insert(kind.to_string());
            }

            snapshot
                .regions_affected
                .extend(warning.region_codes.iter().cloned());

            if let Some(level) = warning.level_kind() {
                if snapshot.highest_level.is_none_or(|current| level > current) {
                    snapshot.highest_level = Some(level);
                }
            }
        }

        snapshot.warnings.push(warning);
    }

    snapshot
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;
    use crate::ingest::met_eireann::{decode_body, normalize_payload};
    use crate::model::WarningLevel;
    use crate::scope::{AreaFilter, AreaScope};
    use std::collections::BTreeSet;

    fn active(level: &str, kind: &str, codes: &[&str]) -> Warning {
        Warning {
            id: format!("{}-{}", level, kind),
            warning_type: Some(kind.to_string()),
            level: Some(level.to_string()),
            region_codes: codes.iter().map(|s| s.to_string()).collect(),
            status: "warning".to_string(),
            ..Warning::default()
        }
    }

    fn with_status(mut w: Warning, status: &str) -> Warning {
        w.status = status.to_string();
        w
    }

    #[test]
    fn test_empty_input_yields_zeroed_snapshot() {
        assert_eq!(aggregate(Vec::new()), WarningSnapshot::default());
    }

    #[test]
    fn test_orange_beats_yellow() {
        let snapshot = aggregate(vec![
            active("yellow", "Rain", &["EI07"]),
            active("orange", "Wind", &["EI04"]),
        ]);
        assert_eq!(snapshot.highest_level, Some(WarningLevel::Orange));
        assert_eq!(snapshot.active_count, 2);
    }

    #[test]
    fn test_red_anywhere_wins_regardless_of_order() {
        let base = vec![
            active("yellow", "Rain", &["EI07"]),
            active("orange", "Wind", &["EI04"]),
            active("red", "Wind", &["EI11"]),
        ];
        let orders: [[usize; 3]; 4] = [[0, 1, 2], [2, 1, 0], [1, 2, 0], [0, 2, 1]];
        for order in orders {
            let input: Vec<_> = order.iter().map(|&i| base[i].clone()).collect();
            assert_eq!(
                aggregate(input).highest_level,
                Some(WarningLevel::Red),
                "order {:?} should still give red",
                order
            );
        }
    }

    #[test]
    fn test_level_is_case_insensitive() {
        let snapshot = aggregate(vec![active("ORANGE", "Wind", &[])]);
        assert_eq!(snapshot.highest_level, Some(WarningLevel::Orange));
    }

    #[test]
    fn test_inactive_warnings_are_kept_but_not_counted() {
        let snapshot = aggregate(vec![
            with_status(active("red", "Wind", &["EI07"]), "expired"),
            with_status(active("orange", "Rain", &["EI04"]), ""),
            with_status(active("yellow", "Fog", &["EI11"]), "Warning"), // not lowercased
        ]);
        assert_eq!(snapshot.warnings.len(), 3);
        assert_eq!(snapshot.active_count, 0);
        assert_eq!(snapshot.highest_level, None);
        assert!(snapshot.warning_types.is_empty());
        assert!(snapshot.regions_affected.is_empty());
    }

    #[test]
    fn test_unrecognized_level_counts_but_sets_no_level() {
        let snapshot = aggregate(vec![active("purple", "Wind", &["EI07"])]);
        assert_eq!(snapshot.active_count, 1);
        assert_eq!(snapshot.highest_level, None);
        assert!(snapshot.warning_types.contains("Wind"));
    }

    #[test]
    fn test_padded_level_label_sets_no_level() {
        let payload = decode_body(r#"[{"level": " red ", "status": "warning"}]"#).unwrap();
        let snapshot = aggregate(normalize_payload(&payload));
        assert_eq!(snapshot.active_count, 1);
        assert_eq!(snapshot.highest_level, None);
    }

    #[test]
    fn test_empty_type_is_not_recorded() {
        let mut w = active("yellow", "", &["EI07"]);
        assert!(aggregate(vec![w.clone()]).warning_types.is_empty());
        w.warning_type = None;
        assert!(aggregate(vec![w]).warning_types.is_empty());
    }

    #[test]
    fn test_types_and_regions_are_unioned() {
        let snapshot = aggregate(vec![
            active("yellow", "Rain", &["EI07", "EI31"]),
            active("yellow", "Rain", &["EI31", "EI12"]),
            active("orange", "Wind", &["ZZ99"]),
        ]);
        let types: Vec<_> = snapshot.warning_types.iter().map(String::as_str).collect();
        assert_eq!(types, vec!["Rain", "Wind"]);
        let codes: Vec<_> = snapshot.regions_affected.iter().map(String::as_str).collect();
        assert_eq!(codes, vec!["EI07", "EI12", "EI31", "ZZ99"]);
    }

    #[test]
    fn test_warning_order_is_preserved() {
        let snapshot = aggregate(vec![
            active("red", "A", &[]),
            with_status(active("red", "B", &[]), "draft"),
            active("red", "C", &[]),
        ]);
        let ids: Vec<_> = snapshot.warnings.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["red-A", "red-B", "red-C"]);
        assert_eq!(snapshot.active_warnings().count(), 2);
    }

    // --- Pipeline integration -----------------------------------------------

    fn run_pipeline(json: &str, scope: AreaScope) -> WarningSnapshot {
        let payload = decode_body(json).expect("fixture should decode");
        let filter = AreaFilter::new(scope);
        aggregate(filter.retain(normalize_payload(&payload)))
    }

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pipeline_whole_country_national_mix() {
        let snapshot = run_pipeline(fixture_national_mix_json(), AreaScope::WholeCountry);
        assert_eq!(snapshot.warnings.len(), 4, "inactive warnings stay in the list");
        assert_eq!(snapshot.active_count, 3);
        assert_eq!(snapshot.highest_level, Some(WarningLevel::Red));
        assert!(snapshot.regions_affected.contains("ZZ99"), "unknown codes kept raw");
        assert!(!snapshot.regions_affected.contains("EI06"), "expired warning excluded");
        assert!(!snapshot.warning_types.contains("Snow-Ice"));
    }

    #[test]
    fn test_pipeline_leinster_only_sees_dublin_rain() {
        let snapshot = run_pipeline(
            fixture_national_mix_json(),
            AreaScope::ByRegion(keys(&["leinster"])),
        );
        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.warnings[0].id, "w-yellow-rain");
        assert_eq!(snapshot.highest_level, Some(WarningLevel::Yellow));
    }

    #[test]
    fn test_pipeline_donegal_sees_only_inactive_warning() {
        let snapshot = run_pipeline(
            fixture_national_mix_json(),
            AreaScope::ByCounty(keys(&["donegal"])),
        );
        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.active_count, 0);
        assert_eq!(snapshot.highest_level, None);
    }

    #[test]
    fn test_pipeline_nested_shape_by_county() {
        let snapshot = run_pipeline(
            fixture_feature_collection_json(),
            AreaScope::ByCounty(keys(&["waterford"])),
        );
        assert_eq!(snapshot.active_count, 1);
        assert_eq!(snapshot.highest_level, Some(WarningLevel::Orange));
        assert!(snapshot.regions_affected.contains("EI27"));
    }
}
