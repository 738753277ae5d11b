//! Skylark station binary.
//!
//! Wires the sampling loop to its collaborators based on configuration:
//! the simulated sensor port, an optional remote weather client, and any
//! combination of stdout, JSONL-file, and HTTP-push sinks.
//!
//! Run with: `cargo run -p skylark-station`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skylark_core::{
    HttpPushSink, HttpWeatherClient, JsonlSink, OutputSink, RemoteWeather, SampleLoop,
    SimulatedSensor, StdoutSink, WeatherCache,
};

mod config;

use config::Config;

/// Skylark environmental station: sample, classify, merge, emit.
#[derive(Parser, Debug)]
#[command(name = "skylark-station")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured city.
    #[arg(long)]
    city: Option<String>,

    /// Run without the remote weather capability even when configured.
    #[arg(long)]
    offline: bool,

    /// Simulated climate-read dropout probability (0.0-1.0), for
    /// exercising the loop's backoff behavior.
    #[arg(long, default_value_t = 0.0)]
    dropout: f32,

    /// Write a default configuration file to the given path and exit.
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Payloads go to stdout; diagnostics stay on stderr so the serial
    // stream remains machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = args.init_config {
        Config::default().save(&path)?;
        info!(path = %path.display(), "wrote default configuration");
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(city) = args.city {
        config.station.city = city;
    }
    if args.offline {
        config.weather.enabled = false;
    }
    config.validate()?;

    let sensor = SimulatedSensor::new().with_dropout(args.dropout);

    let remote = if config.weather.enabled {
        let fetch_timeout = Duration::from_secs(config.weather.fetch_timeout_secs);
        let client = HttpWeatherClient::new(
            config.weather.endpoint.clone(),
            config.weather.api_key.clone(),
            fetch_timeout,
        )
        .context("failed to build weather client")?;
        Some(RemoteWeather {
            client: Box::new(client),
            cache: WeatherCache::new(
                Duration::from_secs(config.weather.refresh_interval_secs),
                fetch_timeout,
            ),
        })
    } else {
        info!("remote weather disabled, payloads will carry the offline stub");
        None
    };

    let mut sinks: Vec<Box<dyn OutputSink>> = Vec::new();
    if config.output.stdout {
        sinks.push(Box::new(StdoutSink::new()));
    }
    if let Some(dir) = &config.output.jsonl_dir {
        let sink = JsonlSink::new(dir)
            .with_context(|| format!("failed to prepare jsonl log directory {}", dir.display()))?;
        sinks.push(Box::new(sink));
    }
    if let Some(url) = &config.output.push_url {
        let sink = HttpPushSink::new(
            url.clone(),
            Duration::from_secs(config.output.push_timeout_secs),
        )
        .context("failed to build push sink")?;
        sinks.push(Box::new(sink));
    }

    let station = SampleLoop::new(config.loop_config(), Box::new(sensor), remote, sinks);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            signal_cancel.cancel();
        }
    });

    station.run(cancel).await;
    Ok(())
}
