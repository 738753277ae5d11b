//! Mock collaborators for testing.
//!
//! These implement the capability traits without hardware or a network:
//!
//! - [`MockSensor`]: scripted light values and climate failure injection
//! - [`MockWeatherClient`]: scripted fetch results with optional latency
//! - [`MemorySink`]: records every emitted payload for inspection

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use skylark_types::{ClimateReading, CombinedPayload, WeatherRecord};

use crate::error::{FetchError, SensorError};
use crate::traits::{OutputSink, SensorPort, WeatherClient};

/// A scripted sensor port for tests.
///
/// Light reads pop from a queued script and fall back to a fixed value
/// once the script is exhausted. Climate reads can be made to fail a set
/// number of times before succeeding again.
#[derive(Debug)]
pub struct MockSensor {
    climate: Mutex<ClimateReading>,
    lux: Mutex<f32>,
    lux_script: Mutex<VecDeque<f32>>,
    remaining_climate_failures: AtomicU32,
    climate_reads: AtomicU32,
}

impl MockSensor {
    /// Create a mock with mild indoor defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            climate: Mutex::new(ClimateReading {
                temperature_c: 22.5,
                humidity_pct: 48.0,
            }),
            lux: Mutex::new(400.0),
            lux_script: Mutex::new(VecDeque::new()),
            remaining_climate_failures: AtomicU32::new(0),
            climate_reads: AtomicU32::new(0),
        }
    }

    /// Set the climate reading returned by successful reads.
    pub fn set_climate(&self, temperature_c: f32, humidity_pct: f32) {
        *self.climate.lock().unwrap() = ClimateReading {
            temperature_c,
            humidity_pct,
        };
    }

    /// Set the fallback light value.
    pub fn set_lux(&self, lux: f32) {
        *self.lux.lock().unwrap() = lux;
    }

    /// Queue light values to return, one per read, before the fallback.
    pub fn queue_lux(&self, values: impl IntoIterator<Item = f32>) {
        self.lux_script.lock().unwrap().extend(values);
    }

    /// Make the next `count` climate reads fail.
    pub fn fail_climate(&self, count: u32) {
        self.remaining_climate_failures
            .store(count, Ordering::Relaxed);
    }

    /// Total climate read attempts, including failures.
    #[must_use]
    pub fn climate_reads(&self) -> u32 {
        self.climate_reads.load(Ordering::Relaxed)
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SensorPort for MockSensor {
    async fn read_climate(&self) -> Result<ClimateReading, SensorError> {
        self.climate_reads.fetch_add(1, Ordering::Relaxed);

        let remaining = self.remaining_climate_failures.load(Ordering::Relaxed);
        if remaining > 0 {
            self.remaining_climate_failures
                .store(remaining - 1, Ordering::Relaxed);
            return Err(SensorError::Unavailable("mock climate failure".to_string()));
        }
        Ok(*self.climate.lock().unwrap())
    }

    async fn read_light(&self) -> f32 {
        if let Some(next) = self.lux_script.lock().unwrap().pop_front() {
            return next;
        }
        *self.lux.lock().unwrap()
    }
}

/// A scripted weather client for tests.
///
/// Each `fetch` pops the next queued result; an empty queue is reported as
/// a network failure so tests never hang on missing scripts.
pub struct MockWeatherClient {
    responses: Mutex<VecDeque<Result<WeatherRecord, FetchError>>>,
    calls: AtomicU32,
    latency: Duration,
}

impl MockWeatherClient {
    /// Create a client with an empty script and no latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicU32::new(0),
            latency: Duration::ZERO,
        }
    }

    /// Delay every fetch by `latency` (tokio time, so paused-clock tests
    /// can race it against the cache's timeout).
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue a successful fetch result.
    pub fn push_ok(&self, record: WeatherRecord) {
        self.responses.lock().unwrap().push_back(Ok(record));
    }

    /// Queue a failed fetch result.
    pub fn push_err(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Number of fetch attempts made so far.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for MockWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherClient for MockWeatherClient {
    async fn fetch(&self, _city: &str) -> Result<WeatherRecord, FetchError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FetchError::Network("mock response queue empty".to_string()))
            })
    }
}

/// Sink that records every payload it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    payloads: Mutex<Vec<CombinedPayload>>,
}

impl MemorySink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of everything emitted so far.
    #[must_use]
    pub fn payloads(&self) -> Vec<CombinedPayload> {
        self.payloads.lock().unwrap().clone()
    }

    /// Number of payloads received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    /// Whether nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn emit(&self, payload: &CombinedPayload) {
        self.payloads.lock().unwrap().push(payload.clone());
    }
}
