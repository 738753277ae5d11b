//! Time-gated cache for the remote weather record.
//!
//! The remote service is slow and unreliable relative to the local tick
//! cadence, so the loop never waits on it: the cache refreshes at most
//! once per interval, hard-bounds every fetch with a timeout, and keeps
//! serving the last good record (stale-while-revalidate) when a refresh
//! fails.

use std::time::Duration;

use tokio::time::{Instant, timeout};
use tracing::{debug, warn};

use skylark_types::WeatherRecord;

use crate::error::FetchError;
use crate::traits::WeatherClient;

/// Diagnostic hook invoked on swallowed fetch failures.
pub type FetchErrorHook = Box<dyn Fn(&FetchError) + Send + Sync>;

/// Default time between refresh attempts.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Default hard bound on a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Holds the last successfully fetched weather record and decides when a
/// refresh is due.
///
/// Fetch failures are contained here: they are logged, optionally reported
/// through a diagnostic hook, and never returned to the caller. A failed
/// refresh leaves both the record and the fetch stamp untouched, so the
/// next tick past the interval tries again.
pub struct WeatherCache {
    refresh_interval: Duration,
    fetch_timeout: Duration,
    record: Option<WeatherRecord>,
    last_fetch: Option<Instant>,
    error_hook: Option<FetchErrorHook>,
}

impl std::fmt::Debug for WeatherCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCache")
            .field("refresh_interval", &self.refresh_interval)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("record", &self.record)
            .field("last_fetch", &self.last_fetch)
            .finish()
    }
}

impl WeatherCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new(refresh_interval: Duration, fetch_timeout: Duration) -> Self {
        Self {
            refresh_interval,
            fetch_timeout,
            record: None,
            last_fetch: None,
            error_hook: None,
        }
    }

    /// Install a diagnostic hook called with every swallowed fetch error.
    #[must_use]
    pub fn with_error_hook(mut self, hook: FetchErrorHook) -> Self {
        self.error_hook = Some(hook);
        self
    }

    /// Whether a refresh attempt is due at `now`.
    ///
    /// True when no record has ever been fetched, or the refresh interval
    /// has elapsed since the last successful fetch.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        match (&self.record, self.last_fetch) {
            (None, _) | (_, None) => true,
            (Some(_), Some(at)) => now.duration_since(at) >= self.refresh_interval,
        }
    }

    /// Refresh the record if due, then return the current record.
    ///
    /// Best-effort and bounded: the fetch is raced against the configured
    /// timeout, and any failure (network, parse, or elapsed timeout) is
    /// swallowed, leaving the previous record in place.
    pub async fn maybe_refresh(
        &mut self,
        now: Instant,
        client: &dyn WeatherClient,
        city: &str,
    ) -> Option<&WeatherRecord> {
        if self.is_due(now) {
            match timeout(self.fetch_timeout, client.fetch(city)).await {
                Ok(Ok(record)) => {
                    debug!(city, description = %record.description, "weather cache refreshed");
                    self.record = Some(record);
                    self.last_fetch = Some(now);
                }
                Ok(Err(err)) => self.note_failure(city, &err),
                Err(_elapsed) => {
                    self.note_failure(city, &FetchError::Timeout(self.fetch_timeout));
                }
            }
        }
        self.record.as_ref()
    }

    fn note_failure(&self, city: &str, err: &FetchError) {
        warn!(city, error = %err, "weather fetch failed, serving cached record");
        if let Some(hook) = &self.error_hook {
            hook(err);
        }
    }

    /// The last good record, if any fetch has ever succeeded.
    #[must_use]
    pub fn record(&self) -> Option<&WeatherRecord> {
        self.record.as_ref()
    }

    /// The record to put on the wire: last good value, or the offline stub
    /// before any success.
    #[must_use]
    pub fn snapshot(&self, city: &str) -> WeatherRecord {
        self.record
            .clone()
            .unwrap_or_else(|| WeatherRecord::offline_stub(city))
    }

    /// Instant of the last successful fetch.
    #[must_use]
    pub fn last_fetch(&self) -> Option<Instant> {
        self.last_fetch
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL, DEFAULT_FETCH_TIMEOUT)
    }
}
