//! Output sinks for the combined payload.
//!
//! Every sink swallows its own failures: a full disk or an unreachable
//! endpoint is logged and dropped, never surfaced into the sampling loop.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, warn};

use skylark_types::CombinedPayload;

use crate::traits::OutputSink;

/// Streams one JSON object per line to stdout.
///
/// This is the station's serial stream: downstream dashboards read the
/// process output line by line.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    /// Create a stdout sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputSink for StdoutSink {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn emit(&self, payload: &CombinedPayload) {
        match serde_json::to_string(payload) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "failed to serialize payload for stdout"),
        }
    }
}

/// Appends JSON lines to a dated file under a log directory.
///
/// Files are named `weather_YYYY-MM-DD.jsonl`, so each UTC day gets its
/// own file and old days can be archived or deleted wholesale.
#[derive(Debug)]
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    /// Create the sink, ensuring the log directory exists.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be
    /// created; a sink that could never write anywhere is a configuration
    /// problem, not a transient one.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn current_path(&self) -> PathBuf {
        let date = OffsetDateTime::now_utc().date();
        self.dir.join(format!(
            "weather_{:04}-{:02}-{:02}.jsonl",
            date.year(),
            u8::from(date.month()),
            date.day()
        ))
    }
}

#[async_trait]
impl OutputSink for JsonlSink {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    async fn emit(&self, payload: &CombinedPayload) {
        let line = match serde_json::to_string(payload) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to serialize payload for jsonl log");
                return;
            }
        };

        let path = self.current_path();
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| writeln!(file, "{line}"));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to append payload to jsonl log");
        }
    }
}

/// POSTs each payload to an HTTP endpoint, failing silently.
///
/// Modeled on a Node-RED style dashboard ingest: delivery is best-effort
/// and a down dashboard must not disturb sampling.
#[derive(Debug, Clone)]
pub struct HttpPushSink {
    http: reqwest::Client,
    url: String,
}

impl HttpPushSink {
    /// Build a push sink with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying client construction error.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl OutputSink for HttpPushSink {
    fn name(&self) -> &'static str {
        "http-push"
    }

    async fn emit(&self, payload: &CombinedPayload) {
        let result = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);
        match result {
            Ok(_) => debug!(url = %self.url, "payload pushed"),
            Err(e) => warn!(url = %self.url, error = %e, "payload push failed, dropping"),
        }
    }
}
