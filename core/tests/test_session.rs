// tests/test_session.rs
use biketime_core::corners::default_corners;
use biketime_core::course::CourseConfig;
use biketime_core::grid::PowerModulation;
use biketime_core::metrics::{weather_cache_hit_total, weather_cache_miss_total, Metrics};
use biketime_core::models::{Profile, TrackPoint};
use biketime_core::session::{model_session, SessionInputs};
use biketime_core::weather::{StaticWeatherProvider, WeatherClient, WeatherSummary};
use chrono::{TimeZone, Utc};

const DEG_PER_10M: f64 = 10.0 / 111_194.93;

fn northbound(n: usize) -> Vec<TrackPoint> {
    (0..n)
        .map(|i| TrackPoint {
            lat: 59.91 + i as f64 * DEG_PER_10M * 5.0,
            lon: 10.75,
            altitude_m: 50.0 + i as f64 * 0.2,
        })
        .collect()
}

#[test]
fn session_with_static_weather() {
    let points = northbound(20);
    let profile = Profile::default();
    let summary = WeatherSummary {
        wind_speed_ms: 3.0,
        wind_dir_deg: 180.0,
        temperature_c: 12.0,
        pressure_hpa: 1008.0,
        humidity_pct: Some(70.0),
    };
    let provider = StaticWeatherProvider {
        summary: Some(summary),
    };
    let corners = default_corners();
    let metrics = Metrics::new();

    let out = model_session(
        SessionInputs {
            start_time: Utc.with_ymd_and_hms(2017, 6, 10, 9, 0, 0).unwrap(),
            points: &points,
            profile: &profile,
            weather: Some(&provider),
            corners: &corners,
            modulation: PowerModulation::default(),
            config: CourseConfig::default(),
            duration_hint_secs: 1200,
        },
        &metrics,
    )
    .expect("model_session feilet");

    let used = out.weather_used.expect("vær skulle vært tilgjengelig");
    assert_eq!(used.pressure_hpa, 1008.0);
    assert_eq!(out.course.corners.len(), 20);
    assert!(out.distance_km > 0.9 && out.distance_km < 1.1, "{}", out.distance_km);
    assert!(out.total_time_s > 0.0);
    assert!(out.mean_v_kmh > 10.0 && out.mean_v_kmh < 60.0);
}

#[test]
fn session_falls_back_to_calm_weather() {
    // Tilbyder uten data: kjeden faller tilbake til statisk vindstille
    let points = northbound(10);
    let profile = Profile::default();
    let provider = StaticWeatherProvider { summary: None };
    let corners: Vec<biketime_core::Corner> = Vec::new();
    let metrics = Metrics::new();

    let out = model_session(
        SessionInputs {
            start_time: Utc.with_ymd_and_hms(2017, 6, 10, 9, 0, 0).unwrap(),
            points: &points,
            profile: &profile,
            weather: Some(&provider),
            corners: &corners,
            modulation: PowerModulation::default(),
            config: CourseConfig::default(),
            duration_hint_secs: 600,
        },
        &metrics,
    )
    .expect("model_session feilet");

    let used = out.weather_used.expect("fallback skulle gitt vær");
    assert_eq!(used.wind_speed_ms, 0.0);
    assert!(out.course.corners.is_empty());
}

#[test]
fn weather_client_caches_per_position_and_time() {
    let summary = WeatherSummary {
        wind_speed_ms: 2.0,
        wind_dir_deg: 90.0,
        temperature_c: 17.5,
        pressure_hpa: 1012.0,
        humidity_pct: None,
    };
    let client = WeatherClient::new(StaticWeatherProvider {
        summary: Some(summary),
    });
    let metrics = Metrics::new();
    let t = Utc.with_ymd_and_hms(2017, 6, 10, 9, 0, 0).unwrap();

    let first = client.get_weather(t, 59.91, 10.75, 60, &metrics);
    assert!(first.is_some());
    assert_eq!(weather_cache_miss_total(&metrics).get(), 1);
    assert_eq!(weather_cache_hit_total(&metrics).get(), 0);

    let second = client.get_weather(t, 59.91, 10.75, 60, &metrics);
    assert!(second.is_some());
    assert_eq!(weather_cache_hit_total(&metrics).get(), 1);

    // Annen posisjon er egen nøkkel
    let elsewhere = client.get_weather(t, 60.39, 5.32, 60, &metrics);
    assert!(elsewhere.is_some());
    assert_eq!(weather_cache_miss_total(&metrics).get(), 2);
}
