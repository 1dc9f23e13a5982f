/// Upstream data sources.
///
/// - `met_eireann` — warnings feed: fetch, decode, shape detection, normalization
/// - `fixtures` (test only) — representative feed payloads

pub mod met_eireann;

#[cfg(test)]
pub(crate) mod fixtures;
