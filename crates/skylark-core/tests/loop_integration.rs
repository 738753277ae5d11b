//! Integration tests for the sampling loop.
//!
//! These drive [`SampleLoop::tick`] directly against the mock
//! collaborators under a paused tokio clock, so refresh gating and backoff
//! behavior are deterministic.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::advance;

use skylark_core::mock::{MemorySink, MockSensor, MockWeatherClient};
use skylark_core::{
    FetchError, LoopConfig, RemoteWeather, SampleLoop, TickOutcome, WeatherCache,
};
use skylark_types::{DayPhase, WeatherRecord};

fn test_config() -> LoopConfig {
    LoopConfig {
        city: "Nairobi".to_string(),
        ..LoopConfig::default()
    }
}

fn weather_record(description: &str) -> WeatherRecord {
    WeatherRecord {
        temperature_c: Some(21.3),
        temperature_f: Some(70.3),
        humidity_percent: Some(62.0),
        sunrise: Some("06:24".to_string()),
        sunset: Some("18:31".to_string()),
        description: description.to_string(),
        ..WeatherRecord::offline_stub("Nairobi")
    }
}

struct Harness {
    station: SampleLoop,
    sensor: Arc<MockSensor>,
    client: Arc<MockWeatherClient>,
    sink: Arc<MemorySink>,
}

fn harness(config: LoopConfig, with_remote: bool) -> Harness {
    let sensor = Arc::new(MockSensor::new());
    let client = Arc::new(MockWeatherClient::new());
    let sink = Arc::new(MemorySink::new());

    let remote = with_remote.then(|| RemoteWeather {
        client: Box::new(Arc::clone(&client)) as Box<dyn skylark_core::WeatherClient>,
        cache: WeatherCache::default(),
    });

    let station = SampleLoop::new(
        config,
        Box::new(Arc::clone(&sensor)),
        remote,
        vec![Box::new(Arc::clone(&sink))],
    );

    Harness {
        station,
        sensor,
        client,
        sink,
    }
}

#[tokio::test(start_paused = true)]
async fn tick_emits_local_readings_to_every_sink() {
    let mut h = harness(test_config(), true);
    h.sensor.set_climate(23.41, 48.2);
    h.sensor.set_lux(612.5);
    h.client.push_ok(weather_record("scattered clouds"));

    let outcome = h.station.tick().await;
    assert!(matches!(outcome, TickOutcome::Emitted(_)));

    let payloads = h.sink.payloads();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload.local.temperature_c, Some(23.41));
    assert_eq!(payload.local.humidity_percent, Some(48.2));
    assert_eq!(payload.local.light_lux, 612.5);
    assert_eq!(payload.api.as_ref().unwrap().description, "scattered clouds");
    assert!(payload.stats.is_some());
}

#[tokio::test(start_paused = true)]
async fn sensor_failure_skips_the_whole_tick() {
    let mut h = harness(test_config(), true);
    h.sensor.fail_climate(2);

    assert!(matches!(
        h.station.tick().await,
        TickOutcome::SensorUnavailable
    ));
    assert!(matches!(
        h.station.tick().await,
        TickOutcome::SensorUnavailable
    ));

    // Nothing emitted, no history grown, and the weather refresh timing
    // check never ran.
    assert!(h.sink.is_empty());
    assert!(h.station.history().is_empty());
    assert_eq!(h.client.calls(), 0);

    // Recovery resumes the full tick, including the first fetch.
    h.client.push_ok(weather_record("clear sky"));
    assert!(matches!(h.station.tick().await, TickOutcome::Emitted(_)));
    assert_eq!(h.sink.len(), 1);
    assert_eq!(h.station.history().len(), 1);
    assert_eq!(h.client.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn fetch_failure_still_emits_with_stub_api() {
    let mut h = harness(test_config(), true);
    h.client
        .push_err(FetchError::Network("connection refused".to_string()));

    let outcome = h.station.tick().await;
    assert!(matches!(outcome, TickOutcome::Emitted(_)));

    let payload = &h.sink.payloads()[0];
    let api = payload.api.as_ref().unwrap();
    assert!(api.is_offline_stub());
    assert_eq!(api.city, "Nairobi");
    // Local data is unaffected by the remote failure
    assert_eq!(payload.local.temperature_c, Some(22.5));
}

#[tokio::test(start_paused = true)]
async fn stale_record_is_served_between_refreshes_and_after_failures() {
    let mut h = harness(test_config(), true);
    h.client.push_ok(weather_record("clear sky"));

    h.station.tick().await;
    assert_eq!(h.client.calls(), 1);

    // Within the refresh interval the cached record is reused without a
    // new fetch.
    advance(Duration::from_secs(30)).await;
    h.station.tick().await;
    assert_eq!(h.client.calls(), 1);
    assert_eq!(
        h.sink.payloads()[1].api.as_ref().unwrap().description,
        "clear sky"
    );

    // Past the interval a failing refresh keeps serving the stale record.
    h.client
        .push_err(FetchError::Timeout(Duration::from_secs(10)));
    advance(Duration::from_secs(31)).await;
    h.station.tick().await;
    assert_eq!(h.client.calls(), 2);
    assert_eq!(
        h.sink.payloads()[2].api.as_ref().unwrap().description,
        "clear sky"
    );
}

#[tokio::test(start_paused = true)]
async fn offline_station_emits_the_stub_every_tick() {
    let mut h = harness(test_config(), false);

    h.station.tick().await;
    h.station.tick().await;

    for payload in h.sink.payloads() {
        let api = payload.api.unwrap();
        assert!(api.is_offline_stub());
        assert_eq!(api.city, "Nairobi");
    }
    assert_eq!(h.client.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn phase_latches_day_and_survives_transitional_labels() {
    let config = LoopConfig {
        stats: false,
        ..test_config()
    };
    let mut h = harness(config, false);

    // Thirty dark samples then thirty bright ones: the step crosses the
    // day threshold and confirms Day.
    h.sensor.queue_lux(std::iter::repeat_n(0.0, 30));
    h.sensor.queue_lux(std::iter::repeat_n(500.0, 30));
    for _ in 0..60 {
        h.station.tick().await;
    }
    assert_eq!(h.station.phase(), DayPhase::Day);

    // A steady bright plateau classifies as Stable, which must not unlatch
    // the confirmed phase.
    h.sensor.set_lux(500.0);
    for _ in 0..20 {
        h.station.tick().await;
    }
    assert_eq!(h.station.phase(), DayPhase::Day);

    let payloads = h.sink.payloads();
    assert_eq!(payloads.last().unwrap().local.time_of_day, DayPhase::Day);
}

#[tokio::test(start_paused = true)]
async fn stats_block_respects_the_capability_flag() {
    let mut h = harness(
        LoopConfig {
            stats: false,
            ..test_config()
        },
        false,
    );
    h.station.tick().await;
    assert!(h.sink.payloads()[0].stats.is_none());

    let mut h = harness(test_config(), false);
    h.sensor.queue_lux([10.0, 20.0, 30.0]);
    h.station.tick().await;
    h.station.tick().await;
    h.station.tick().await;

    let stats = h.sink.payloads()[2].stats.unwrap();
    assert_eq!(stats.mean, 20.0);
    assert_eq!(stats.median, 20.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 30.0);
    assert_eq!(stats.range, 20.0);
}

#[tokio::test(start_paused = true)]
async fn history_window_stays_bounded_across_many_ticks() {
    let mut h = harness(
        LoopConfig {
            history_capacity: 16,
            stats: false,
            ..test_config()
        },
        false,
    );

    for _ in 0..50 {
        h.station.tick().await;
    }
    assert_eq!(h.station.history().len(), 16);
}
