// core/src/session.rs
use chrono::{DateTime, Utc};

use crate::corners::{run_corners, Corner};
use crate::course::{apply_grid, load_course, CourseConfig};
use crate::errors::ModelError;
use crate::grid::{PowerModulation, VelocityGrid};
use crate::metrics::Metrics;
use crate::models::{Course, Profile, TrackPoint};
use crate::weather::{StaticWeatherProvider, WeatherClient, WeatherProvider, WeatherSummary};
use crate::weather_api::OpenMeteoClient;

pub struct SessionInputs<'a> {
    pub start_time: DateTime<Utc>,
    /// Rå kurvepunkter; vær slås opp ved første punkt.
    pub points: &'a [TrackPoint],
    pub profile: &'a Profile,
    /// Overstyr værtilbyder (prod: Open-Meteo, test: StaticWeatherProvider).
    pub weather: Option<&'a dyn WeatherProvider>,
    pub corners: &'a [Corner],
    pub modulation: PowerModulation,
    pub config: CourseConfig,
    /// Omtrentlig varighet (sek) til væroppslaget.
    pub duration_hint_secs: u32,
}

#[derive(Debug, Clone)]
pub struct SessionOutputs {
    pub course: Course,
    /// Faktisk brukt vær (None hvis alle kilder feilet).
    pub weather_used: Option<WeatherSummary>,
    pub distance_km: f64,
    pub total_time_s: f64,
    pub mean_v_kmh: f64,
}

/// Modellerer en hel økt: vær med fallback-kjede, kurveprosessering,
/// grid-oppslag og corner-sweep.
pub fn model_session(inputs: SessionInputs, metrics: &Metrics) -> Result<SessionOutputs, ModelError> {
    let first = inputs
        .points
        .first()
        .ok_or_else(|| ModelError::MalformedTrack {
            reason: "tom kurve".into(),
        })?;

    // 1) Eksplisitt tilbyder hvis satt, ellers Open-Meteo bak cache
    let weather_opt = match inputs.weather {
        Some(provider) => provider.get_weather_for_session(
            inputs.start_time,
            first.lat,
            first.lon,
            inputs.duration_hint_secs,
        ),
        None => {
            let client = WeatherClient::new(OpenMeteoClient::new());
            client.get_weather(
                inputs.start_time,
                first.lat,
                first.lon,
                inputs.duration_hint_secs,
                metrics,
            )
        }
    }
    // 2) Fallback til statisk vindstille standardvær
    .or_else(|| {
        let static_w = StaticWeatherProvider {
            summary: Some(WeatherSummary {
                wind_speed_ms: 0.0,
                wind_dir_deg: 0.0,
                temperature_c: 20.0,
                pressure_hpa: 1013.0,
                humidity_pct: None,
            }),
        };
        static_w.get_weather_for_session(
            inputs.start_time,
            first.lat,
            first.lon,
            inputs.duration_hint_secs,
        )
    });

    let weather = weather_opt
        .map(WeatherSummary::to_weather)
        .unwrap_or_default();

    let grid = VelocityGrid::build(inputs.profile, &weather, inputs.modulation)?;
    let mut points = load_course(inputs.points, &inputs.config)?;
    apply_grid(&mut points, &grid)?;
    let mut course = Course {
        points,
        corners: Vec::new(),
    };
    run_corners(
        &mut course,
        inputs.profile,
        &weather,
        inputs.corners,
        inputs.modulation,
    )?;

    let distance_km = course.distance_km();
    let total_time_s = course.total_time_s();
    let mean_v_kmh = course.mean_v_kmh();
    Ok(SessionOutputs {
        course,
        weather_used: weather_opt,
        distance_km,
        total_time_s,
        mean_v_kmh,
    })
}
