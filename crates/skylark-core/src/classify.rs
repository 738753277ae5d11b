//! Trend-based time-of-day classification.
//!
//! The classifier compares the average light level of the older half of
//! the history window against the newer half. The direction and size of
//! that delta, combined with the absolute level of the newer half, map to
//! a raw [`TimeOfDay`] label. The raw label is deliberately jumpy; the
//! [`StabilityFilter`](crate::StabilityFilter) latches it downstream.

use skylark_types::TimeOfDay;

use crate::history::LuxHistory;

/// Minimum samples before the trend is worth reading.
pub const MIN_SAMPLES: usize = 10;

/// Decision thresholds for the trend classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendThresholds {
    /// Newer-half average above this is bright enough for daytime.
    pub day: f32,
    /// Newer-half average below this is dark enough for nighttime.
    pub night: f32,
    /// Deltas within `±epsilon` count as no trend.
    pub epsilon: f32,
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self {
            day: 300.0,
            night: 100.0,
            epsilon: 10.0,
        }
    }
}

/// Pure classifier mapping a light history to a raw [`TimeOfDay`] label.
///
/// Same input always yields the same output; the classifier itself holds
/// no state beyond its thresholds.
///
/// # Example
///
/// ```
/// use skylark_core::{LuxHistory, TrendClassifier};
/// use skylark_types::TimeOfDay;
///
/// let classifier = TrendClassifier::default();
/// let mut history = LuxHistory::new(60);
/// for _ in 0..30 {
///     history.push(0.0);
/// }
/// for _ in 0..30 {
///     history.push(500.0);
/// }
/// assert_eq!(classifier.classify(&history), TimeOfDay::Day);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendClassifier {
    thresholds: TrendThresholds,
}

impl TrendClassifier {
    /// Create a classifier with explicit thresholds.
    #[must_use]
    pub fn new(thresholds: TrendThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> TrendThresholds {
        self.thresholds
    }

    /// Classify the current light history.
    ///
    /// Decision order, first match wins:
    /// 1. newer half bright and rising → `Day`
    /// 2. newer half dark and falling → `Night`
    /// 3. falling → `ApproachingNight`
    /// 4. rising → `ApproachingDay`
    /// 5. otherwise → `Stable`
    #[must_use]
    pub fn classify(&self, history: &LuxHistory) -> TimeOfDay {
        let len = history.len();
        if len < MIN_SAMPLES {
            return TimeOfDay::Unknown;
        }

        let mid = len / 2;
        if mid == 0 {
            return TimeOfDay::Unknown;
        }

        let mut first_sum = 0.0f64;
        let mut second_sum = 0.0f64;
        for (i, v) in history.values().enumerate() {
            if i < mid {
                first_sum += f64::from(v);
            } else {
                second_sum += f64::from(v);
            }
        }
        let first_avg = first_sum / mid as f64;
        let second_avg = second_sum / (len - mid) as f64;
        let delta = second_avg - first_avg;

        let day = f64::from(self.thresholds.day);
        let night = f64::from(self.thresholds.night);
        let epsilon = f64::from(self.thresholds.epsilon);

        if second_avg > day && delta > epsilon {
            TimeOfDay::Day
        } else if second_avg < night && delta < -epsilon {
            TimeOfDay::Night
        } else if delta < -epsilon {
            TimeOfDay::ApproachingNight
        } else if delta > epsilon {
            TimeOfDay::ApproachingDay
        } else {
            TimeOfDay::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(segments: &[(f32, usize)]) -> LuxHistory {
        let total: usize = segments.iter().map(|(_, n)| n).sum();
        let mut history = LuxHistory::new(total.max(1));
        for (value, count) in segments {
            for _ in 0..*count {
                history.push(*value);
            }
        }
        history
    }

    #[test]
    fn short_history_is_unknown_regardless_of_content() {
        let classifier = TrendClassifier::default();
        for len in 0..MIN_SAMPLES {
            let history = history_of(&[(5000.0, len)]);
            assert_eq!(
                classifier.classify(&history),
                TimeOfDay::Unknown,
                "len {len}"
            );
        }
    }

    #[test]
    fn flat_history_is_stable() {
        let classifier = TrendClassifier::default();
        let history = history_of(&[(100.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Stable);
    }

    #[test]
    fn step_up_past_day_threshold_is_day() {
        let classifier = TrendClassifier::default();
        let history = history_of(&[(0.0, 30), (500.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Day);
    }

    #[test]
    fn step_down_below_night_threshold_is_night() {
        let classifier = TrendClassifier::default();
        let history = history_of(&[(500.0, 30), (0.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Night);
    }

    #[test]
    fn step_down_above_night_threshold_is_approaching_night() {
        let classifier = TrendClassifier::default();
        // Falls hard, but the newer half still averages above the night
        // threshold, so the phase is not yet confirmed.
        let history = history_of(&[(500.0, 30), (150.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::ApproachingNight);
    }

    #[test]
    fn modest_rise_below_day_threshold_is_approaching_day() {
        let classifier = TrendClassifier::default();
        let history = history_of(&[(100.0, 30), (200.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::ApproachingDay);
    }

    #[test]
    fn bright_but_flat_is_stable_not_day() {
        // The day rule needs a rising trend, not just brightness.
        let classifier = TrendClassifier::default();
        let history = history_of(&[(600.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Stable);
    }

    #[test]
    fn deltas_within_epsilon_are_stable() {
        let classifier = TrendClassifier::new(TrendThresholds {
            day: 300.0,
            night: 100.0,
            epsilon: 10.0,
        });
        let history = history_of(&[(200.0, 30), (209.0, 30)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Stable);
    }

    #[test]
    fn odd_length_puts_extra_sample_in_newer_half() {
        let classifier = TrendClassifier::default();
        // 11 samples: mid = 5, newer half has 6. A step at index 5 means
        // the newer half is entirely bright.
        let history = history_of(&[(0.0, 5), (500.0, 6)]);
        assert_eq!(classifier.classify(&history), TimeOfDay::Day);
    }

    #[test]
    fn classification_is_pure() {
        let classifier = TrendClassifier::default();
        let history = history_of(&[(0.0, 30), (500.0, 30)]);
        let first = classifier.classify(&history);
        let second = classifier.classify(&history);
        assert_eq!(first, second);
    }
}
