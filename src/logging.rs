/// Tracing subscriber setup.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to every
/// target (e.g. "info", or "warnmon_service=debug").

use tracing_subscriber::EnvFilter;

pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
