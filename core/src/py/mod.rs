// core/src/py/mod.rs
//
// Python-bindinger. Inngangen er tolerant JSON slik at eldre
// CSV/JSON-eksporter med avvikende feltnavn kan sendes rett inn.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::corners::{default_corners, run_corners};
use crate::course::{model_course, CourseConfig};
use crate::grid::PowerModulation;
use crate::models::{Course, Profile, TrackPoint, Weather};

#[derive(Debug, Deserialize)]
struct PointInTol {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lng")]
    lon: f64,
    #[serde(alias = "altitude", alias = "alt")]
    altitude_m: f64,
}

// Tolerant profil-inngang: bare avvik fra default-riggen trenger å
// sendes med, og gamle feltnavn aksepteres.
#[derive(Debug, Deserialize, Clone, Default)]
struct ProfileInTol {
    #[serde(default, alias = "power", alias = "Power")]
    power_w: Option<f64>,
    #[serde(default, alias = "mr", alias = "weight_kg")]
    rider_mass_kg: Option<f64>,
    #[serde(default, alias = "mb")]
    bike_mass_kg: Option<f64>,
    #[serde(default, alias = "Cd")]
    cd: Option<f64>,
    #[serde(default, alias = "A")]
    frontal_area_m2: Option<f64>,
    #[serde(default, alias = "Crr")]
    crr: Option<f64>,
}

impl ProfileInTol {
    fn overlay(self) -> Profile {
        let mut p = Profile::default();
        if let Some(v) = self.power_w {
            p.power_w = v;
        }
        if let Some(v) = self.rider_mass_kg {
            p.rider_mass_kg = v;
        }
        if let Some(v) = self.bike_mass_kg {
            p.bike_mass_kg = v;
        }
        if let Some(v) = self.cd {
            p.cd = v;
        }
        if let Some(v) = self.frontal_area_m2 {
            p.frontal_area_m2 = v;
        }
        if let Some(v) = self.crr {
            p.crr = v;
        }
        p
    }
}

#[derive(Debug, Deserialize)]
struct ModelCourseIn {
    samples: Vec<PointInTol>,
    #[serde(default)]
    profile: Option<ProfileInTol>,
    #[serde(default)]
    weather: Option<Weather>,
    /// Kjør corner-sweepen også (20 ekstra grid-bygg).
    #[serde(default)]
    corners: bool,
    #[serde(default)]
    window: Option<usize>,
}

fn parse_payload(payload: &str) -> PyResult<ModelCourseIn> {
    let mut de = serde_json::Deserializer::from_str(payload);
    serde_path_to_error::deserialize(&mut de).map_err(|e| {
        PyValueError::new_err(format!("ugyldig payload ved {}: {}", e.path(), e.inner()))
    })
}

/// Stasjonær hastighet (m/s) for én stigning/kurs. Profil og vær som
/// JSON-strenger, eller None for defaults.
#[pyfunction]
#[pyo3(signature = (power_w, grade, bearing_deg, profile_json=None, weather_json=None))]
pub fn solve_speed(
    power_w: f64,
    grade: f64,
    bearing_deg: f64,
    profile_json: Option<&str>,
    weather_json: Option<&str>,
) -> PyResult<f64> {
    let profile = match profile_json {
        Some(s) => serde_json::from_str::<ProfileInTol>(s)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .overlay(),
        None => Profile::default(),
    };
    let weather: Weather = match weather_json {
        Some(s) => serde_json::from_str(s).map_err(|e| PyValueError::new_err(e.to_string()))?,
        None => Weather::default(),
    };
    crate::physics::solve_speed(&profile, &weather, grade, bearing_deg, power_w)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Full kurvemodellering fra JSON-payload; returnerer beriket kurve
/// pluss totaler som JSON.
#[pyfunction]
pub fn model_course_json(payload: &str) -> PyResult<String> {
    let input = parse_payload(payload)?;
    let profile = input.profile.unwrap_or_default().overlay();
    let weather = input.weather.unwrap_or_default();
    let cfg = CourseConfig {
        window: input.window.unwrap_or(5),
        ..CourseConfig::default()
    };
    let points: Vec<TrackPoint> = input
        .samples
        .iter()
        .map(|p| TrackPoint {
            lat: p.lat,
            lon: p.lon,
            altitude_m: p.altitude_m,
        })
        .collect();

    let mut course = model_course(&points, &profile, &weather, PowerModulation::default(), &cfg)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    if input.corners {
        run_corners(
            &mut course,
            &profile,
            &weather,
            &default_corners(),
            PowerModulation::default(),
        )
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    }
    Ok(render_course(&course).to_string())
}

fn render_course(course: &Course) -> Value {
    json!({
        "distance_km": course.distance_km(),
        "total_time_s": course.total_time_s(),
        "mean_v_kmh": course.mean_v_kmh(),
        "points": course.points.iter().map(|p| json!({
            "lat": p.lat,
            "lon": p.lon,
            "altitude_m": p.altitude_m,
            "step_m": p.step_m,
            "model_dist_km": p.model_dist_km,
            "slope_pct": p.slope_pct,
            "heading_deg": p.heading_deg,
            "grade_bin": p.grade_bin.name(),
            "heading_bin_deg": p.heading_bin_deg,
            "model_v_kmh": p.model_v_kmh,
            "model_t_s": p.model_t_s,
        })).collect::<Vec<_>>(),
        "corners": course.corners.iter().map(|c| json!({
            "name": c.name,
            "v_kmh": c.v_kmh,
        })).collect::<Vec<_>>(),
    })
}
