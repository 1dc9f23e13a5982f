/// Test fixtures: representative JSON payloads from the Met Éireann
/// warnings feed.
///
/// These fixtures are structurally faithful but trimmed to the fields the
/// normalizer reads, plus a few extras it must ignore.
///
/// Flat shape (current feed):
///   [ { id, capId, type, level, issued, updated, onset, expiry,
///       headline, description, instruction, regions[], severity,
///       certainty, urgency, status } ]
///
/// Nested shape (older GeoJSON-like feed):
///   { features: [ { properties: { id, type, level, issued, onset,
///       expires, headline, description, instruction, regions[],
///       severity, certainty, urgency, status } } ] }
///
/// Note: `status` arrives title-cased ("Warning", "Actual") and `regions`
/// holds provider codes such as "EI07", not county names.

/// One orange wind warning for Cork, Kerry and Clare in the flat shape.
#[cfg(test)]
pub(crate) fn fixture_flat_wind_warning_json() -> &'static str {
    r##"[
      {
        "id": "4d3a7f80-1c52-4a1e-9a44-8b6d7b2f3c10",
        "capId": "2.49.0.1.372.0.250118093000.N_Norm_Obs_01",
        "type": "Wind",
        "level": "Orange",
        "issued": "2025-01-18T09:30:00+00:00",
        "updated": "2025-01-18T10:00:00+00:00",
        "onset": "2025-01-19T03:00:00+00:00",
        "expiry": "2025-01-19T15:00:00+00:00",
        "headline": "Status Orange - Wind Warning for Cork, Kerry, Clare",
        "description": "Southwest winds veering westerly will reach mean speeds of 65 to 80km/h with gusts of 110 to 130km/h.",
        "instruction": "Fallen trees, power outages and wave overtopping are possible.",
        "regions": ["EI04", "EI11", "EI03"],
        "severity": "Severe",
        "certainty": "Likely",
        "urgency": "Expected",
        "status": "Warning",
        "colour": "#f57c00"
      }
    ]"##
}

/// Mixed-level national picture in the flat shape:
/// - red wind for Galway + Mayo (Connacht), active
/// - yellow rain for Dublin (Leinster), active
/// - orange snow-ice for Donegal (Ulster), status "Expired" (inactive)
/// - yellow fog with an unknown area code only, active
#[cfg(test)]
pub(crate) fn fixture_national_mix_json() -> &'static str {
    r#"[
      {
        "id": "w-red-wind",
        "capId": "cap-1",
        "type": "Wind",
        "level": "Red",
        "regions": ["EI10", "EI20"],
        "status": "Warning"
      },
      {
        "id": "w-yellow-rain",
        "capId": "cap-2",
        "type": "Rain",
        "level": "Yellow",
        "regions": ["EI07"],
        "status": "Warning"
      },
      {
        "id": "w-orange-snow",
        "capId": "cap-3",
        "type": "Snow-Ice",
        "level": "Orange",
        "regions": ["EI06"],
        "status": "Expired"
      },
      {
        "id": "w-yellow-fog",
        "capId": "cap-4",
        "type": "Fog",
        "level": "Yellow",
        "regions": ["ZZ99"],
        "status": "Warning"
      }
    ]"#
}

/// Two warnings in the nested feature-collection shape.
#[cfg(test)]
pub(crate) fn fixture_feature_collection_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "geometry": null,
          "properties": {
            "id": "rain-2025-0042",
            "type": "Rain",
            "level": "Yellow",
            "issued": "2025-02-01T11:00:00+00:00",
            "onset": "2025-02-01T18:00:00+00:00",
            "expires": "2025-02-02T06:00:00+00:00",
            "headline": "Status Yellow - Rainfall Warning for Galway, Mayo",
            "description": "Heavy rain at times with a risk of localised flooding.",
            "instruction": "",
            "regions": ["EI10", "EI20"],
            "severity": "Moderate",
            "certainty": "Likely",
            "urgency": "Future",
            "status": "Actual"
          }
        },
        {
          "type": "Feature",
          "geometry": null,
          "properties": {
            "id": "wind-2025-0043",
            "type": "Wind",
            "level": "Orange",
            "expires": "2025-02-02T12:00:00+00:00",
            "regions": ["EI27"],
            "status": "Actual"
          }
        }
      ]
    }"#
}

/// Valid records interleaved with values that are not objects.
#[cfg(test)]
pub(crate) fn fixture_mixed_garbage_records_json() -> &'static str {
    r#"[
      { "id": "first", "status": "Warning" },
      "not a record",
      42,
      null,
      ["nested", "array"],
      { "id": "second", "status": "Warning" }
    ]"#
}
