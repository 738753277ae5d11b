//! Error types for skylark-core.
//!
//! Steady-state errors are recoverable by design: a failed climate read
//! skips the current tick after a short backoff, and a failed weather fetch
//! leaves the cache serving its last good record. Neither is ever allowed
//! to abort the sampling loop.

use std::time::Duration;

use thiserror::Error;

/// Errors from the local sensor port.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SensorError {
    /// The driver could not produce a reading this cycle.
    ///
    /// Recoverable: the loop sleeps its failure backoff and retries the
    /// tick from the top.
    #[error("sensor unavailable: {0}")]
    Unavailable(String),

    /// The sensor returned fewer bytes than a full measurement frame.
    #[error("incomplete sensor frame: expected {expected} bytes, got {actual}")]
    IncompleteFrame {
        /// Bytes a full frame requires.
        expected: usize,
        /// Bytes actually received.
        actual: usize,
    },
}

/// Errors from the remote weather client.
///
/// All variants are treated identically by the cache: the fetch is counted
/// as failed, the previous record keeps being served, and nothing
/// propagates to the sampling loop.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure (DNS, TCP, TLS, HTTP status).
    #[error("weather request failed: {0}")]
    Network(String),

    /// The request exceeded its hard time bound.
    #[error("weather request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body did not have the expected shape.
    #[error("failed to parse weather response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest does not expose the configured timeout on the error
            FetchError::Timeout(Duration::ZERO)
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_error_display() {
        let err = SensorError::Unavailable("bus stuck".to_string());
        assert_eq!(err.to_string(), "sensor unavailable: bus stuck");

        let err = SensorError::IncompleteFrame {
            expected: 6,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 6 bytes"));
    }

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("timed out"));

        let err = FetchError::Parse("missing field `main`".to_string());
        assert!(err.to_string().contains("missing field"));
    }
}
