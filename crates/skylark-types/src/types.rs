//! Core types for Skylark station data.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw time-of-day label produced by the light-trend classifier.
///
/// This is the transient, per-tick output: transitional labels
/// (`ApproachingDay`, `ApproachingNight`, `Stable`) describe the light
/// trend without committing to a phase. The latched phase lives in
/// [`DayPhase`].
///
/// # Display vs Serialization
///
/// **Note:** `Display` returns human-readable labels ("Approaching Day"),
/// while serde serialization uses the variant names ("ApproachingDay").
///
/// ```
/// use skylark_types::TimeOfDay;
///
/// assert_eq!(format!("{}", TimeOfDay::ApproachingNight), "Approaching Night");
/// assert!(TimeOfDay::Night.is_confirmed());
/// assert!(!TimeOfDay::Stable.is_confirmed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeOfDay {
    /// Not enough signal to classify.
    Unknown,
    /// Bright and still brightening.
    Day,
    /// Dark and still darkening.
    Night,
    /// Light rising but not yet above the day threshold.
    ApproachingDay,
    /// Light falling but not yet below the night threshold.
    ApproachingNight,
    /// No significant trend in either direction.
    Stable,
}

impl TimeOfDay {
    /// Whether this label is a confirmed phase (exactly `Day` or `Night`).
    ///
    /// Only confirmed labels are allowed to overwrite the latched
    /// [`DayPhase`]; every other label passes through the previous phase.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TimeOfDay::Day | TimeOfDay::Night)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Unknown => write!(f, "Unknown"),
            TimeOfDay::Day => write!(f, "Day"),
            TimeOfDay::Night => write!(f, "Night"),
            TimeOfDay::ApproachingDay => write!(f, "Approaching Day"),
            TimeOfDay::ApproachingNight => write!(f, "Approaching Night"),
            TimeOfDay::Stable => write!(f, "Stable"),
        }
    }
}

/// Latched day/night phase, stabilized across noisy raw labels.
///
/// Starts as `Unknown` and only ever changes when the classifier emits a
/// confirmed `Day` or `Night`. This is the value that reaches the wire
/// payload as `time_of_day`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DayPhase {
    /// No confirmed phase observed yet.
    #[default]
    Unknown,
    /// Last confirmed phase was daytime.
    Day,
    /// Last confirmed phase was nighttime.
    Night,
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayPhase::Unknown => write!(f, "Unknown"),
            DayPhase::Day => write!(f, "Day"),
            DayPhase::Night => write!(f, "Night"),
        }
    }
}

/// A successful temperature/humidity read from the local climate sensor.
///
/// A failed read is modeled as an error from the sensor port, never as a
/// reading with absent fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimateReading {
    /// Temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity percentage (0-100).
    pub humidity_pct: f32,
}

/// Remote weather-service record.
///
/// The measurement fields are nullable as a unit: a record is either a
/// complete successful fetch or the explicit offline stub produced by
/// [`WeatherRecord::offline_stub`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherRecord {
    /// City the record describes.
    pub city: String,
    /// Reported temperature in degrees Celsius, rounded to one decimal.
    pub temperature_c: Option<f32>,
    /// Reported temperature in degrees Fahrenheit, rounded to one decimal.
    pub temperature_f: Option<f32>,
    /// Reported relative humidity percentage.
    pub humidity_percent: Option<f32>,
    /// Local sunrise time, zero-padded "HH:MM".
    pub sunrise: Option<String>,
    /// Local sunset time, zero-padded "HH:MM".
    pub sunset: Option<String>,
    /// Weather description ("scattered clouds"), or the stub marker.
    pub description: String,
}

/// Description marker carried by the offline stub record.
pub const OFFLINE_STUB_DESCRIPTION: &str = "offline_stub";

impl WeatherRecord {
    /// Placeholder record served before any fetch has succeeded, or when
    /// the station runs without a remote weather capability.
    ///
    /// ```
    /// use skylark_types::WeatherRecord;
    ///
    /// let stub = WeatherRecord::offline_stub("Nairobi");
    /// assert_eq!(stub.city, "Nairobi");
    /// assert_eq!(stub.temperature_c, None);
    /// assert_eq!(stub.description, "offline_stub");
    /// ```
    #[must_use]
    pub fn offline_stub(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            temperature_c: None,
            temperature_f: None,
            humidity_percent: None,
            sunrise: None,
            sunset: None,
            description: OFFLINE_STUB_DESCRIPTION.to_string(),
        }
    }

    /// Whether this record is the offline stub rather than real data.
    #[must_use]
    pub fn is_offline_stub(&self) -> bool {
        self.description == OFFLINE_STUB_DESCRIPTION
    }
}

/// Local sensor block of the combined payload.
///
/// Temperature and humidity are optional on the wire even though a tick
/// with a failed climate read emits nothing at all: downstream consumers
/// of the payload schema treat them as nullable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocalConditions {
    /// Locally measured temperature in degrees Celsius.
    pub temperature_c: Option<f32>,
    /// Locally measured relative humidity percentage.
    pub humidity_percent: Option<f32>,
    /// Light level, a locally scaled proxy derived from raw ADC counts.
    pub light_lux: f32,
    /// Latched time-of-day phase.
    pub time_of_day: DayPhase,
}

/// Descriptive statistics over the recent light history window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LightStats {
    /// Arithmetic mean.
    pub mean: f32,
    /// Median (robust to spikes).
    pub median: f32,
    /// Smallest sample in the window.
    pub min: f32,
    /// Largest sample in the window.
    pub max: f32,
    /// `max - min`.
    pub range: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    /// Trailing moving average.
    pub moving_average: f32,
}

/// One emitted reading: local sensors merged with the cached remote record.
///
/// Freshly constructed every tick and handed to the output sinks; never
/// retained by the loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombinedPayload {
    /// Unix timestamp (seconds) of the tick that produced this payload.
    pub timestamp: i64,
    /// Local sensor block.
    pub local: LocalConditions,
    /// Remote weather record, or `null` when no remote data exists.
    pub api: Option<WeatherRecord>,
    /// Light statistics, omitted when the stats capability is off.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub stats: Option<LightStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_labels() {
        assert!(TimeOfDay::Day.is_confirmed());
        assert!(TimeOfDay::Night.is_confirmed());
        assert!(!TimeOfDay::Unknown.is_confirmed());
        assert!(!TimeOfDay::ApproachingDay.is_confirmed());
        assert!(!TimeOfDay::ApproachingNight.is_confirmed());
        assert!(!TimeOfDay::Stable.is_confirmed());
    }

    #[test]
    fn day_phase_defaults_to_unknown() {
        assert_eq!(DayPhase::default(), DayPhase::Unknown);
    }

    #[test]
    fn time_of_day_display_labels() {
        assert_eq!(TimeOfDay::ApproachingDay.to_string(), "Approaching Day");
        assert_eq!(TimeOfDay::Stable.to_string(), "Stable");
        assert_eq!(DayPhase::Night.to_string(), "Night");
    }

    #[test]
    fn offline_stub_has_empty_measurements() {
        let stub = WeatherRecord::offline_stub("Nairobi");
        assert_eq!(stub.city, "Nairobi");
        assert_eq!(stub.temperature_c, None);
        assert_eq!(stub.temperature_f, None);
        assert_eq!(stub.humidity_percent, None);
        assert_eq!(stub.sunrise, None);
        assert_eq!(stub.sunset, None);
        assert!(stub.is_offline_stub());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        fn sample_payload() -> CombinedPayload {
            CombinedPayload {
                timestamp: 1_726_000_000,
                local: LocalConditions {
                    temperature_c: Some(23.41),
                    humidity_percent: Some(48.2),
                    light_lux: 612.5,
                    time_of_day: DayPhase::Day,
                },
                api: Some(WeatherRecord {
                    city: "Nairobi".to_string(),
                    temperature_c: Some(21.3),
                    temperature_f: Some(70.3),
                    humidity_percent: Some(62.0),
                    sunrise: Some("06:24".to_string()),
                    sunset: Some("18:31".to_string()),
                    description: "scattered clouds".to_string(),
                }),
                stats: Some(LightStats {
                    mean: 590.0,
                    median: 601.0,
                    min: 540.0,
                    max: 640.0,
                    range: 100.0,
                    std_dev: 25.1,
                    moving_average: 610.2,
                }),
            }
        }

        #[test]
        fn payload_round_trip() {
            let payload = sample_payload();
            let json = serde_json::to_string(&payload).unwrap();
            let back: CombinedPayload = serde_json::from_str(&json).unwrap();
            assert_eq!(back, payload);
        }

        #[test]
        fn payload_wire_field_names() {
            let json = serde_json::to_value(sample_payload()).unwrap();
            let local = &json["local"];
            assert!(local.get("temperature_c").is_some());
            assert!(local.get("humidity_percent").is_some());
            assert!(local.get("light_lux").is_some());
            assert_eq!(local["time_of_day"], "Day");
            assert_eq!(json["api"]["sunrise"], "06:24");
        }

        #[test]
        fn missing_stats_key_is_omitted_and_reads_back_as_none() {
            let mut payload = sample_payload();
            payload.stats = None;
            let json = serde_json::to_string(&payload).unwrap();
            assert!(!json.contains("\"stats\""));
            let back: CombinedPayload = serde_json::from_str(&json).unwrap();
            assert_eq!(back.stats, None);
        }

        #[test]
        fn absent_api_serializes_as_null() {
            let mut payload = sample_payload();
            payload.api = None;
            let json = serde_json::to_value(&payload).unwrap();
            assert!(json["api"].is_null());
        }
    }
}
