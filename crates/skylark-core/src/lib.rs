//! Sampling and inference loop for the Skylark environmental station.
//!
//! This crate contains everything between the sensor wires and the output
//! channel:
//!
//! - **Sampling loop**: acquire sensors, classify, merge remote data, emit
//! - **Light history**: fixed-capacity sliding window of recent samples
//! - **Classification**: trend-based day/night inference with hysteresis
//! - **Weather cache**: staleness-gated, stale-while-revalidate remote data
//! - **Statistics**: descriptive summary of the light window
//! - **Collaborators**: sensor port, weather client, and output sink traits
//!   with HTTP, stdout, JSONL, simulated, and mock implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use skylark_core::{LoopConfig, SampleLoop, SimulatedSensor, StdoutSink};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let station = SampleLoop::new(
//!         LoopConfig::default(),
//!         Box::new(SimulatedSensor::new()),
//!         None,
//!         vec![Box::new(StdoutSink::new())],
//!     );
//!     station.run(CancellationToken::new()).await;
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod error;
pub mod history;
pub mod mock;
pub mod sampler;
pub mod sensor;
pub mod sink;
pub mod stability;
pub mod stats;
pub mod traits;
pub mod weather;

pub use cache::{DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_INTERVAL, WeatherCache};
pub use classify::{MIN_SAMPLES, TrendClassifier, TrendThresholds};
pub use error::{FetchError, SensorError};
pub use history::{DEFAULT_CAPACITY, LuxHistory};
pub use sampler::{LoopConfig, RemoteWeather, SampleLoop, TickOutcome};
pub use sensor::SimulatedSensor;
pub use sink::{HttpPushSink, JsonlSink, StdoutSink};
pub use stability::StabilityFilter;
pub use traits::{OutputSink, SensorPort, WeatherClient};
pub use weather::{DEFAULT_ENDPOINT, HttpWeatherClient};
