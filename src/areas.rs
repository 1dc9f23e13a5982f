/// Area catalog for the Met Éireann warnings feed.
///
/// Defines the counties and provinces (regions) of the Republic of Ireland,
/// region membership, and the mapping from Met Éireann's `EIxx` area codes
/// to county keys. This is the single source of truth for area keys; other
/// modules should look areas up here rather than hardcoding them.
///
/// Every lookup is total: unknown keys yield `None` or an empty result.

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Region (province) key → display name.
pub static REGIONS: &[(&str, &str)] = &[
    ("connacht", "Connacht"),
    ("leinster", "Leinster"),
    ("munster", "Munster"),
    ("ulster", "Ulster"), // the three Ulster counties in the Republic
];

/// County key → display name, grouped by province.
pub static COUNTIES: &[(&str, &str)] = &[
    // Connacht
    ("galway", "Galway"),
    ("mayo", "Mayo"),
    ("roscommon", "Roscommon"),
    ("sligo", "Sligo"),
    ("leitrim", "Leitrim"),
    // Leinster
    ("dublin", "Dublin"),
    ("wicklow", "Wicklow"),
    ("wexford", "Wexford"),
    ("carlow", "Carlow"),
    ("kilkenny", "Kilkenny"),
    ("laois", "Laois"),
    ("longford", "Longford"),
    ("louth", "Louth"),
    ("meath", "Meath"),
    ("offaly", "Offaly"),
    ("westmeath", "Westmeath"),
    ("kildare", "Kildare"),
    // Munster
    ("cork", "Cork"),
    ("kerry", "Kerry"),
    ("limerick", "Limerick"),
    ("tipperary", "Tipperary"),
    ("waterford", "Waterford"),
    ("clare", "Clare"),
    // Ulster
    ("cavan", "Cavan"),
    ("donegal", "Donegal"),
    ("monaghan", "Monaghan"),
];

/// Region key → member county keys. Partitions `COUNTIES`.
pub static REGION_TO_COUNTIES: &[(&str, &[&str])] = &[
    ("connacht", &["galway", "mayo", "roscommon", "sligo", "leitrim"]),
    (
        "leinster",
        &[
            "dublin", "wicklow", "wexford", "carlow", "kilkenny", "laois", "longford", "louth",
            "meath", "offaly", "westmeath", "kildare",
        ],
    ),
    ("munster", &["cork", "kerry", "limerick", "tipperary", "waterford", "clare"]),
    ("ulster", &["cavan", "donegal", "monaghan"]),
];

/// Met Éireann area code → county key.
///
/// Codes follow the feed's numbering; gaps (EI05, EI08, EI09, EI17, EI28)
/// are not used for Republic counties.
pub static PROVIDER_CODES: &[(&str, &str)] = &[
    ("EI01", "carlow"),
    ("EI02", "cavan"),
    ("EI03", "clare"),
    ("EI04", "cork"),
    ("EI06", "donegal"),
    ("EI07", "dublin"),
    ("EI10", "galway"),
    ("EI11", "kerry"),
    ("EI12", "kildare"),
    ("EI13", "kilkenny"),
    ("EI14", "leitrim"),
    ("EI15", "laois"),
    ("EI16", "limerick"),
    ("EI18", "longford"),
    ("EI19", "louth"),
    ("EI20", "mayo"),
    ("EI21", "meath"),
    ("EI22", "monaghan"),
    ("EI23", "offaly"),
    ("EI24", "roscommon"),
    ("EI25", "sligo"),
    ("EI26", "tipperary"),
    ("EI27", "waterford"),
    ("EI29", "westmeath"),
    ("EI30", "wexford"),
    ("EI31", "wicklow"),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Display name for a county key.
pub fn county_name(county: &str) -> Option<&'static str> {
    COUNTIES.iter().find(|(key, _)| *key == county).map(|(_, name)| *name)
}

/// Display name for a region key.
pub fn region_name(region: &str) -> Option<&'static str> {
    REGIONS.iter().find(|(key, _)| *key == region).map(|(_, name)| *name)
}

/// Resolves a provider area code (e.g. "EI07") to its county key.
pub fn county_for_code(code: &str) -> Option<&'static str> {
    PROVIDER_CODES.iter().find(|(c, _)| *c == code).map(|(_, county)| *county)
}

/// The region a county belongs to (inverse of `REGION_TO_COUNTIES`).
pub fn region_of_county(county: &str) -> Option<&'static str> {
    REGION_TO_COUNTIES
        .iter()
        .find(|(_, members)| members.contains(&county))
        .map(|(region, _)| *region)
}

/// All counties as (key, display name), in catalog order.
pub fn all_counties() -> Vec<(&'static str, &'static str)> {
    COUNTIES.to_vec()
}

/// All regions as (key, display name), in catalog order.
pub fn all_regions() -> Vec<(&'static str, &'static str)> {
    REGIONS.to_vec()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
