/// Fetch cycle coordinator for the warnings service
///
/// This module implements the loop that:
/// 1. Validates that the feed is reachable before the service starts
/// 2. Fetches the feed on a fixed interval
/// 3. Runs normalize → filter → aggregate on each payload
/// 4. Publishes the result to the shared `SnapshotStore`
/// 5. Serves manual refresh requests arriving over a command channel
///
/// Failures never stop the loop. They are recorded in the store and the
/// last-known-good snapshot stays published until the next success.

use crate::analysis::aggregate::aggregate;
use crate::config::ServiceConfig;
use crate::ingest::met_eireann::{self, WARNINGS_URL};
use crate::model::{FeedError, WarningSnapshot};
use crate::monitor::SnapshotStore;
use crate::scope::AreaFilter;
use serde_json::Value;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Daemon configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DaemonConfig {
    pub feed_url: String,

    /// Time between scheduled refreshes (default: 30 minutes)
    pub poll_interval: Duration,

    /// Request timeout for scheduled and manual refreshes (default: 30s)
    pub refresh_timeout: Duration,

    /// Request timeout for the startup check (default: 10s)
    pub validation_timeout: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            feed_url: WARNINGS_URL.to_string(),
            poll_interval: Duration::from_secs(30 * 60),
            refresh_timeout: Duration::from_secs(30),
            validation_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&ServiceConfig> for DaemonConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            feed_url: config.feed.url.clone(),
            poll_interval: config.poll_interval(),
            refresh_timeout: config.refresh_timeout(),
            validation_timeout: config.validation_timeout(),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Shutdown,
}

/// Cloneable sender side of the daemon's command channel.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: Sender<Command>,
}

impl RefreshHandle {
    /// Queues a manual refresh. Returns false once the loop has stopped.
    pub fn request_refresh(&self) -> bool {
        self.tx.send(Command::Refresh).is_ok()
    }

    pub fn shutdown(&self) -> bool {
        self.tx.send(Command::Shutdown).is_ok()
    }
}

pub fn command_channel() -> (RefreshHandle, Receiver<Command>) {
    let (tx, rx) = mpsc::channel();
    (RefreshHandle { tx }, rx)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Runs normalize → filter → aggregate over one decoded payload.
pub fn process_payload(filter: &AreaFilter, payload: &Value) -> WarningSnapshot {
    aggregate(filter.retain(met_eireann::normalize_payload(payload)))
}

// ---------------------------------------------------------------------------
// Daemon State
// ---------------------------------------------------------------------------

pub struct Daemon {
    config: DaemonConfig,
    filter: Arc<AreaFilter>,
    store: Arc<SnapshotStore>,
    client: reqwest::blocking::Client,
    refresh_lock: Mutex<()>,
}

impl Daemon {
    /// Create a daemon with default configuration and a fresh store
    pub fn new(filter: AreaFilter) -> Result<Self, FeedError> {
        Self::with_config(
            DaemonConfig::default(),
            Arc::new(filter),
            Arc::new(SnapshotStore::new()),
        )
    }

    /// Create a daemon that shares its filter and store with other consumers
    pub fn with_config(
        config: DaemonConfig,
        filter: Arc<AreaFilter>,
        store: Arc<SnapshotStore>,
    ) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("warnmon_service/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            filter,
            store,
            client,
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    pub fn filter(&self) -> Arc<AreaFilter> {
        Arc::clone(&self.filter)
    }

    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// One GET with the validation timeout. Any failure, including a
    /// non-JSON body, is reported as `FeedError::CannotConnect`.
    pub fn validate_feed(&self) -> Result<(), FeedError> {
        met_eireann::fetch_feed(&self.client, &self.config.feed_url, self.config.validation_timeout)
            .map(|_| ())
            .map_err(|e| FeedError::CannotConnect(e.to_string()))?;

        info!(source = "met.ie", url = %self.config.feed_url, "feed validated");
        Ok(())
    }

    /// Runs one full cycle and publishes the result.
    ///
    /// Concurrent callers are serialized; a second caller waits for the
    /// first cycle to finish and then runs its own.
    pub fn refresh(&self) -> Result<Arc<WarningSnapshot>, FeedError> {
        let _guard = self
            .refresh_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let started = Instant::now();

        let payload =
            match met_eireann::fetch_feed(&self.client, &self.config.feed_url, self.config.refresh_timeout) {
                Ok(payload) => payload,
                Err(e) => {
                    self.store.record_failure(&e);
                    return Err(e);
                }
            };

        let snapshot = process_payload(&self.filter, &payload);
        info!(
            source = "met.ie",
            filtered = snapshot.warnings.len(),
            active = snapshot.active_count,
            highest = snapshot.highest_level.map(|l| l.key()).unwrap_or("none"),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "refresh complete"
        );

        Ok(self.store.publish(snapshot))
    }

    /// Main daemon loop. Returns on `Command::Shutdown` or when every
    /// `RefreshHandle` has been dropped. A refresh requested before the
    /// shutdown still runs.
    ///
    /// The first scheduled refresh happens one interval after the loop
    /// starts; callers that want data immediately call `refresh()` first.
    pub fn run(&self, commands: Receiver<Command>) {
        info!(
            interval_secs = self.config.poll_interval.as_secs(),
            area_type = self.filter.area_type(),
            "starting refresh loop"
        );

        let mut deadline = Instant::now() + self.config.poll_interval;
        let mut stopping = false;

        while !stopping {
            let wait = deadline.saturating_duration_since(Instant::now());
            match commands.recv_timeout(wait) {
                Ok(Command::Refresh) => {
                    debug!("manual refresh requested");
                    // Requests that queued up behind this one share its cycle.
                    // A shutdown queued behind it stops the loop after the cycle.
                    loop {
                        match commands.try_recv() {
                            Ok(Command::Refresh) => continue,
                            Ok(Command::Shutdown) => {
                                stopping = true;
                                break;
                            }
                            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => debug!("scheduled refresh due"),
                Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            }

            // Failures are already recorded in the store.
            let _ = self.refresh();
            deadline = Instant::now() + self.config.poll_interval;
        }

        info!("refresh loop stopped");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
