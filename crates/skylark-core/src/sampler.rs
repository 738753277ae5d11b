//! The sampling and inference loop.
//!
//! One logical thread of control: each tick acquires the local sensors,
//! updates the light history, classifies and stabilizes the time of day,
//! refreshes the weather cache when due, and hands the combined payload to
//! every configured sink. All mutable state (history, latched phase,
//! cache) is owned here and only ever touched between the defined steps of
//! a tick.

use std::time::Duration;

use time::OffsetDateTime;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use skylark_types::{CombinedPayload, LocalConditions, WeatherRecord};

use crate::cache::WeatherCache;
use crate::classify::{TrendClassifier, TrendThresholds};
use crate::history::LuxHistory;
use crate::stability::StabilityFilter;
use crate::stats;
use crate::traits::{OutputSink, SensorPort, WeatherClient};

/// Construction-time parameters for the loop.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// City reported in payloads and used for weather fetches.
    pub city: String,
    /// Sleep between ticks. The default 1.2 s keeps the emission channel
    /// from being overwhelmed and gives the sensor driver settle time.
    pub tick_interval: Duration,
    /// Sleep after a failed climate read before retrying the tick.
    pub sensor_backoff: Duration,
    /// Light history window size.
    pub history_capacity: usize,
    /// Whether to compute the payload's stats block.
    pub stats: bool,
    /// Trailing window for the moving average inside the stats block.
    pub moving_average_window: usize,
    /// Classifier thresholds.
    pub thresholds: TrendThresholds,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            city: "Nairobi".to_string(),
            tick_interval: Duration::from_millis(1200),
            sensor_backoff: Duration::from_secs(1),
            history_capacity: crate::history::DEFAULT_CAPACITY,
            stats: true,
            moving_average_window: 10,
            thresholds: TrendThresholds::default(),
        }
    }
}

/// Remote weather capability: a client plus its staleness-gated cache.
pub struct RemoteWeather {
    /// Client used for refresh attempts.
    pub client: Box<dyn WeatherClient>,
    /// Cache the loop consults every tick.
    pub cache: WeatherCache,
}

/// What a single tick produced.
#[derive(Debug)]
pub enum TickOutcome {
    /// The tick ran to completion and the payload went to every sink.
    Emitted(CombinedPayload),
    /// The climate read failed; nothing was emitted and the loop should
    /// back off before the next attempt.
    SensorUnavailable,
}

/// The sampling loop.
///
/// Construct with a sensor port, an optional remote weather capability,
/// and any set of output sinks; call [`run`](Self::run) to sample until
/// cancelled, or [`tick`](Self::tick) directly to drive it from a test.
pub struct SampleLoop {
    config: LoopConfig,
    sensor: Box<dyn SensorPort>,
    remote: Option<RemoteWeather>,
    sinks: Vec<Box<dyn OutputSink>>,
    history: LuxHistory,
    classifier: TrendClassifier,
    filter: StabilityFilter,
    consecutive_sensor_failures: u32,
}

impl SampleLoop {
    /// Build a loop from its collaborators.
    #[must_use]
    pub fn new(
        config: LoopConfig,
        sensor: Box<dyn SensorPort>,
        remote: Option<RemoteWeather>,
        sinks: Vec<Box<dyn OutputSink>>,
    ) -> Self {
        let history = LuxHistory::new(config.history_capacity);
        let classifier = TrendClassifier::new(config.thresholds);
        Self {
            config,
            sensor,
            remote,
            sinks,
            history,
            classifier,
            filter: StabilityFilter::new(),
            consecutive_sensor_failures: 0,
        }
    }

    /// Sample until the token is cancelled.
    ///
    /// Cancellation is cooperative and checked between ticks, never
    /// mid-tick, so a shutdown cannot leave a sensor transaction half
    /// done.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            city = %self.config.city,
            tick = ?self.config.tick_interval,
            remote = self.remote.is_some(),
            sinks = self.sinks.len(),
            "sample loop started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let delay = match self.tick().await {
                TickOutcome::Emitted(_) => self.config.tick_interval,
                TickOutcome::SensorUnavailable => self.config.sensor_backoff,
            };

            tokio::select! {
                () = cancel.cancelled() => break,
                () = sleep(delay) => {}
            }
        }

        info!("sample loop stopped");
    }

    /// Run one iteration.
    ///
    /// A failed climate read skips everything for this tick, including the
    /// cache-refresh timing check, so sustained sensor failure also pauses
    /// weather refreshes.
    pub async fn tick(&mut self) -> TickOutcome {
        let climate = match self.sensor.read_climate().await {
            Ok(climate) => {
                if self.consecutive_sensor_failures > 0 {
                    debug!(
                        failures = self.consecutive_sensor_failures,
                        "climate sensor recovered"
                    );
                    self.consecutive_sensor_failures = 0;
                }
                climate
            }
            Err(e) => {
                self.consecutive_sensor_failures += 1;
                if self.consecutive_sensor_failures <= 3 {
                    warn!(
                        error = %e,
                        attempt = self.consecutive_sensor_failures,
                        "climate read failed, skipping tick"
                    );
                } else if self.consecutive_sensor_failures == 4 {
                    error!(
                        error = %e,
                        "climate read failed 4 times, will continue retrying silently"
                    );
                }
                return TickOutcome::SensorUnavailable;
            }
        };

        let lux = self.sensor.read_light().await;
        self.history.push(lux);

        let raw = self.classifier.classify(&self.history);
        let phase = self.filter.update(raw);

        let stats = if self.config.stats {
            stats::summarize(&self.history.snapshot(), self.config.moving_average_window)
        } else {
            None
        };

        let api = match &mut self.remote {
            Some(RemoteWeather { client, cache }) => {
                cache
                    .maybe_refresh(Instant::now(), client.as_ref(), &self.config.city)
                    .await;
                Some(cache.snapshot(&self.config.city))
            }
            None => Some(WeatherRecord::offline_stub(&self.config.city)),
        };

        let payload = CombinedPayload {
            timestamp: OffsetDateTime::now_utc().unix_timestamp(),
            local: LocalConditions {
                temperature_c: Some(climate.temperature_c),
                humidity_percent: Some(climate.humidity_pct),
                light_lux: lux,
                time_of_day: phase,
            },
            api,
            stats,
        };

        for sink in &self.sinks {
            sink.emit(&payload).await;
        }
        debug!(lux = %lux, raw = %raw, phase = %phase, "tick emitted");

        TickOutcome::Emitted(payload)
    }

    /// The latched phase after the most recent tick.
    #[must_use]
    pub fn phase(&self) -> skylark_types::DayPhase {
        self.filter.phase()
    }

    /// Read-only view of the light history.
    #[must_use]
    pub fn history(&self) -> &LuxHistory {
        &self.history
    }
}
