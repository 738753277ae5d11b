//! Platform-agnostic types for the Skylark environmental station.
//!
//! This crate provides the shared data model used by the sampling loop
//! (skylark-core) and the station binary (skylark-station).
//!
//! # Features
//!
//! - Local sensor reading and combined payload structures
//! - Time-of-day classification labels
//! - Remote weather record with an explicit offline stub
//! - Kelvin and wall-clock conversions for the weather service fields
//!
//! # Example
//!
//! ```
//! use skylark_types::{DayPhase, TimeOfDay, WeatherRecord};
//!
//! let stub = WeatherRecord::offline_stub("Nairobi");
//! assert!(stub.is_offline_stub());
//! assert_eq!(DayPhase::default(), DayPhase::Unknown);
//! assert!(TimeOfDay::Day.is_confirmed());
//! ```

pub mod clock;
pub mod convert;
pub mod types;

pub use clock::ClockTime;
pub use convert::{convert_temp, round1, round2};
pub use types::{
    ClimateReading, CombinedPayload, DayPhase, LightStats, LocalConditions, TimeOfDay,
    WeatherRecord,
};
