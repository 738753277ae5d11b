//! Hysteresis over the raw classifier output.

use skylark_types::{DayPhase, TimeOfDay};

/// Latches the last confirmed day/night phase across noisy raw labels.
///
/// Only an exact `Day` or `Night` from the classifier overwrites the
/// latched phase; transitional and uncertain labels pass the previous
/// phase through unchanged. This keeps a passing cloud from flapping the
/// reported time of day.
///
/// Owned by the sampling loop and passed the raw label each tick, never
/// held as process-global state.
///
/// # Example
///
/// ```
/// use skylark_core::StabilityFilter;
/// use skylark_types::{DayPhase, TimeOfDay};
///
/// let mut filter = StabilityFilter::new();
/// assert_eq!(filter.update(TimeOfDay::Stable), DayPhase::Unknown);
/// assert_eq!(filter.update(TimeOfDay::Day), DayPhase::Day);
/// assert_eq!(filter.update(TimeOfDay::ApproachingNight), DayPhase::Day);
/// assert_eq!(filter.update(TimeOfDay::Night), DayPhase::Night);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityFilter {
    phase: DayPhase,
}

impl StabilityFilter {
    /// Create a filter with no confirmed phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw label and return the (possibly updated) latched phase.
    pub fn update(&mut self, raw: TimeOfDay) -> DayPhase {
        match raw {
            TimeOfDay::Day => self.phase = DayPhase::Day,
            TimeOfDay::Night => self.phase = DayPhase::Night,
            _ => {}
        }
        self.phase
    }

    /// The current latched phase without feeding a new label.
    #[must_use]
    pub fn phase(&self) -> DayPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown() {
        let filter = StabilityFilter::new();
        assert_eq!(filter.phase(), DayPhase::Unknown);
    }

    #[test]
    fn transitional_labels_never_overwrite_a_confirmed_phase() {
        let mut filter = StabilityFilter::new();
        let inputs = [
            TimeOfDay::Day,
            TimeOfDay::Stable,
            TimeOfDay::Stable,
            TimeOfDay::Night,
        ];
        let outputs: Vec<DayPhase> = inputs.into_iter().map(|l| filter.update(l)).collect();
        assert_eq!(
            outputs,
            vec![DayPhase::Day, DayPhase::Day, DayPhase::Day, DayPhase::Night]
        );
    }

    #[test]
    fn unknown_and_approaching_pass_through() {
        let mut filter = StabilityFilter::new();
        filter.update(TimeOfDay::Night);
        assert_eq!(filter.update(TimeOfDay::Unknown), DayPhase::Night);
        assert_eq!(filter.update(TimeOfDay::ApproachingDay), DayPhase::Night);
        assert_eq!(filter.update(TimeOfDay::ApproachingNight), DayPhase::Night);
    }

    #[test]
    fn stays_unknown_until_first_confirmation() {
        let mut filter = StabilityFilter::new();
        assert_eq!(filter.update(TimeOfDay::Stable), DayPhase::Unknown);
        assert_eq!(filter.update(TimeOfDay::ApproachingDay), DayPhase::Unknown);
        assert_eq!(filter.update(TimeOfDay::Day), DayPhase::Day);
    }
}
