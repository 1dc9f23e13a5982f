//! Met Éireann Warnings Monitoring Service - Main Daemon
//!
//! A server-side daemon that continuously:
//! 1. Polls the Met Éireann national warnings feed
//! 2. Normalizes and filters warnings to the configured counties or regions
//! 3. Publishes count, highest-level and detail sensors
//! 4. Optionally serves them over a JSON HTTP endpoint
//!
//! Usage:
//!   cargo run --release                       # Start daemon without HTTP endpoint
//!   cargo run --release -- --endpoint 8080    # Start with HTTP endpoint on port 8080
//!   cargo run --release -- --once             # Single refresh, print sensors, exit
//!
//! Environment:
//!   WARNMON_CONFIG - path to the TOML config (default: warnmon.toml)
//!   RUST_LOG       - tracing filter, overrides --log-level

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;
use warnmon_service::config::{self, DEFAULT_CONFIG_PATH};
use warnmon_service::daemon::{self, Daemon, DaemonConfig};
use warnmon_service::endpoint::{self, EndpointState};
use warnmon_service::logging;
use warnmon_service::monitor::SnapshotStore;
use warnmon_service::scope::AreaFilter;
use warnmon_service::sensors::SensorSet;

#[derive(Parser, Debug)]
#[command(name = "warnmon")]
#[command(about = "Monitor Met Éireann weather warnings for selected Irish counties or regions")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, env = "WARNMON_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Serve the JSON endpoint on this port (overrides [endpoint].port)
    #[arg(long)]
    endpoint: Option<u16>,

    /// Run a single refresh, print the sensors as JSON, and exit
    #[arg(long)]
    once: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();
    logging::init(&args.log_level);

    println!("⚠️  Met Éireann Warnings Monitor");
    println!("================================\n");

    let service_config = match config::load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("\n❌ Configuration error: {}\n", e);
            std::process::exit(1);
        }
    };

    let filter = Arc::new(AreaFilter::new(service_config.area_scope()));
    let store = Arc::new(SnapshotStore::new());
    let daemon = match Daemon::with_config(
        DaemonConfig::from(&service_config),
        Arc::clone(&filter),
        Arc::clone(&store),
    ) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("\n❌ Failed to create HTTP client: {}\n", e);
            std::process::exit(1);
        }
    };

    println!("📡 Validating warnings feed...");
    if let Err(e) = daemon.validate_feed() {
        error!(url = %daemon.config().feed_url, "feed validation failed");
        eprintln!("\n❌ {}\n", e);
        std::process::exit(1);
    }
    println!("✓ Feed reachable\n");

    // Initial refresh; a failure here is recorded and retried on schedule.
    if let Err(e) = daemon.refresh() {
        if args.once {
            eprintln!("\n❌ Refresh failed: {}\n", e);
            std::process::exit(1);
        }
    }

    if args.once {
        let Some(snapshot) = store.latest() else {
            std::process::exit(1);
        };
        let sensors = SensorSet::new(&snapshot, &filter, store.status().last_success);
        match serde_json::to_string_pretty(&sensors) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to render sensors: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let (refresh_handle, commands) = daemon::command_channel();

    // Start HTTP endpoint if requested (in background thread)
    let endpoint_port = args
        .endpoint
        .or(service_config.endpoint.as_ref().map(|e| e.port));
    if let Some(port) = endpoint_port {
        println!("🚀 Starting HTTP endpoint server...");
        let state = EndpointState {
            store: Arc::clone(&store),
            filter: Arc::clone(&filter),
            refresh: refresh_handle.clone(),
        };
        // Spawn endpoint server in background thread
        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, state) {
                error!(port, "endpoint server stopped");
                eprintln!("❌ Endpoint server error: {}", e);
                eprintln!("   Continuing without HTTP endpoint\n");
            }
        });
        println!("   Endpoint running on http://0.0.0.0:{}\n", port);
    }

    println!("🔄 Starting continuous monitoring loop...");
    println!("   Poll interval: {} minutes", service_config.polling.interval_minutes);
    println!("   Monitoring: {}", filter.display_suffix().trim());
    println!("   Press Ctrl+C to stop\n");

    // Keep a sender alive for the lifetime of the loop.
    let _refresh_handle = refresh_handle;
    daemon.run(commands);
}
