//! Fixed-capacity sliding window of recent light samples.

use std::collections::VecDeque;

/// Default window size: sixty samples, one minute of history at the
/// default tick cadence.
pub const DEFAULT_CAPACITY: usize = 60;

/// FIFO ring of recent light samples.
///
/// Feeds both the trend classifier and the descriptive statistics. The
/// length never exceeds the capacity: pushing onto a full window evicts
/// the oldest sample first.
///
/// # Example
///
/// ```
/// use skylark_core::LuxHistory;
///
/// let mut history = LuxHistory::new(3);
/// for v in [1.0, 2.0, 3.0, 4.0] {
///     history.push(v);
/// }
/// assert_eq!(history.snapshot(), vec![2.0, 3.0, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct LuxHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl LuxHistory {
    /// Create an empty window holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rejects that
    /// before a loop is ever constructed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, evicting the oldest when the window is full.
    pub fn push(&mut self, value: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples oldest-first.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Contiguous copy of the window, oldest-first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f32> {
        self.values().collect()
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples the window can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LuxHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut history = LuxHistory::new(10);
        for v in 0..5 {
            history.push(v as f32);
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.snapshot(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn overflow_evicts_oldest_first() {
        let capacity = 8;
        let mut history = LuxHistory::new(capacity);
        for v in 0..(capacity + 5) {
            history.push(v as f32);
        }
        assert_eq!(history.len(), capacity);
        let expected: Vec<f32> = (5..capacity + 5).map(|v| v as f32).collect();
        assert_eq!(history.snapshot(), expected);
    }

    #[test]
    fn default_capacity_is_sixty() {
        let history = LuxHistory::default();
        assert_eq!(history.capacity(), 60);
        assert!(history.is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn zero_capacity_panics() {
        let _ = LuxHistory::new(0);
    }

    proptest! {
        #[test]
        fn length_never_exceeds_capacity(
            capacity in 1usize..64,
            values in proptest::collection::vec(-1000.0f32..1000.0, 0..200),
        ) {
            let mut history = LuxHistory::new(capacity);
            for v in &values {
                history.push(*v);
                prop_assert!(history.len() <= capacity);
            }
        }

        #[test]
        fn window_is_always_the_most_recent_suffix(
            capacity in 1usize..64,
            values in proptest::collection::vec(-1000.0f32..1000.0, 1..200),
        ) {
            let mut history = LuxHistory::new(capacity);
            for v in &values {
                history.push(*v);
            }
            let keep = values.len().min(capacity);
            prop_assert_eq!(history.snapshot(), values[values.len() - keep..].to_vec());
        }
    }
}
