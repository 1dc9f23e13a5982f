/// Data analysis for the warnings monitor.
///
/// Submodules:
/// - `aggregate` — folds filtered warnings into a `WarningSnapshot`.

pub mod aggregate;
