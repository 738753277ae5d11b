//! Simulated sensor port.
//!
//! Generates a plausible diurnal light curve plus climate drift so the
//! full station can run on any development machine. The curve is a raised
//! cosine over a configurable (compressed) day length: darkest at the
//! start of the cycle, brightest halfway through.

use std::f32::consts::TAU;
use std::time::Instant;

use async_trait::async_trait;

use skylark_types::{ClimateReading, round1, round2};

use crate::error::SensorError;
use crate::traits::SensorPort;

/// Sensor port implementation that needs no hardware.
///
/// An optional dropout probability injects climate-read failures, which is
/// handy for watching the loop's backoff behavior from the terminal.
#[derive(Debug)]
pub struct SimulatedSensor {
    started: Instant,
    day_length_secs: f32,
    peak_lux: f32,
    noise_lux: f32,
    base_temperature_c: f32,
    base_humidity_pct: f32,
    dropout: f32,
}

impl SimulatedSensor {
    /// Create a simulator with a 10-minute compressed day.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            day_length_secs: 600.0,
            peak_lux: 800.0,
            noise_lux: 15.0,
            base_temperature_c: 22.0,
            base_humidity_pct: 55.0,
            dropout: 0.0,
        }
    }

    /// Length of one simulated day, in seconds.
    #[must_use]
    pub fn with_day_length_secs(mut self, secs: f32) -> Self {
        self.day_length_secs = secs.max(1.0);
        self
    }

    /// Peak light level at simulated noon.
    #[must_use]
    pub fn with_peak_lux(mut self, lux: f32) -> Self {
        self.peak_lux = lux;
        self
    }

    /// Probability (0.0-1.0) that a climate read fails.
    #[must_use]
    pub fn with_dropout(mut self, probability: f32) -> Self {
        self.dropout = probability.clamp(0.0, 1.0);
        self
    }

    /// Phase angle of the current simulated day, 0 at midnight.
    fn phase(&self) -> f32 {
        let elapsed = self.started.elapsed().as_secs_f32();
        (elapsed / self.day_length_secs).fract() * TAU
    }

    fn noise(amplitude: f32) -> f32 {
        (rand::random::<f32>() - 0.5) * 2.0 * amplitude
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SensorPort for SimulatedSensor {
    async fn read_climate(&self) -> Result<ClimateReading, SensorError> {
        if self.dropout > 0.0 && rand::random::<f32>() < self.dropout {
            return Err(SensorError::Unavailable(
                "simulated climate dropout".to_string(),
            ));
        }
        let swing = self.phase().sin();
        Ok(ClimateReading {
            temperature_c: round2(self.base_temperature_c + 3.0 * swing + Self::noise(0.1)),
            humidity_pct: round2(
                (self.base_humidity_pct - 8.0 * swing + Self::noise(0.5)).clamp(0.0, 100.0),
            ),
        })
    }

    async fn read_light(&self) -> f32 {
        // Raised cosine: 0 at simulated midnight, peak at simulated noon.
        let curve = 0.5 * (1.0 - self.phase().cos());
        let lux = self.peak_lux * curve + Self::noise(self.noise_lux);
        round1(lux.clamp(0.0, self.peak_lux))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn readings_stay_in_plausible_ranges() {
        let sensor = SimulatedSensor::new();
        for _ in 0..50 {
            let lux = sensor.read_light().await;
            assert!((0.0..=800.0).contains(&lux));

            let climate = sensor.read_climate().await.unwrap();
            assert!((10.0..=35.0).contains(&climate.temperature_c));
            assert!((0.0..=100.0).contains(&climate.humidity_pct));
        }
    }

    #[tokio::test]
    async fn full_dropout_always_fails() {
        let sensor = SimulatedSensor::new().with_dropout(1.0);
        assert!(sensor.read_climate().await.is_err());
        // Light stays available regardless of climate dropout
        let _ = sensor.read_light().await;
    }
}
