//! Trait abstractions for the station's external collaborators.
//!
//! The sampling loop talks to the outside world through three narrow
//! capability interfaces: [`SensorPort`] for the local sensors,
//! [`WeatherClient`] for the remote weather service, and [`OutputSink`]
//! for wherever the combined payload ends up. Each has an in-repo mock so
//! the loop can be exercised without hardware or a network.

use async_trait::async_trait;

use skylark_types::{ClimateReading, CombinedPayload, WeatherRecord};

use crate::error::{FetchError, SensorError};

/// Capability interface over the local sensor hardware.
///
/// The underlying bus protocol (register addressing, trigger delays) is
/// the implementation's concern; the loop only sees readings or failures.
///
/// # Example
///
/// ```ignore
/// use skylark_core::SensorPort;
///
/// async fn sample<S: SensorPort>(sensor: &S) {
///     match sensor.read_climate().await {
///         Ok(climate) => println!("{:.1} °C", climate.temperature_c),
///         Err(e) => eprintln!("skipping tick: {e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait SensorPort: Send + Sync {
    /// Read temperature and humidity.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] when the driver cannot produce a reading
    /// this cycle; the caller is expected to back off and retry.
    async fn read_climate(&self) -> Result<ClimateReading, SensorError>;

    /// Read the current light level.
    ///
    /// Light acquisition is modeled as infallible: the ADC always yields a
    /// value, however noisy.
    async fn read_light(&self) -> f32;
}

/// Capability interface over the remote weather service.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch the current weather record for a city.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, timeout, or a response
    /// that does not match the expected shape.
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError>;
}

/// Destination for emitted payloads.
///
/// Sinks own their failures: a transient emission problem is logged (or
/// retried) inside the sink and must never surface into the sampling loop.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Short name used in loop diagnostics.
    fn name(&self) -> &'static str;

    /// Deliver one combined payload.
    async fn emit(&self, payload: &CombinedPayload);
}

// Shared handles work wherever the traits are expected, so tests can keep
// a handle on a collaborator they have already given to the loop.

#[async_trait]
impl<T: SensorPort + ?Sized> SensorPort for std::sync::Arc<T> {
    async fn read_climate(&self) -> Result<ClimateReading, SensorError> {
        (**self).read_climate().await
    }

    async fn read_light(&self) -> f32 {
        (**self).read_light().await
    }
}

#[async_trait]
impl<T: WeatherClient + ?Sized> WeatherClient for std::sync::Arc<T> {
    async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        (**self).fetch(city).await
    }
}

#[async_trait]
impl<T: OutputSink + ?Sized> OutputSink for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn emit(&self, payload: &CombinedPayload) {
        (**self).emit(payload).await
    }
}
