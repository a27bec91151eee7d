use serde::{Deserialize, Serialize};

use crate::grid::GradeBin;

/// Rått kurvepunkt fra fil eller API (WGS84).
#[derive(Debug, Clone, Copy)]
pub struct TrackPoint {
    pub lat: f64,        // grader
    pub lon: f64,        // grader
    pub altitude_m: f64, // meter
}

/// Beriket kurvepunkt etter binning og modellkjøring.
#[derive(Debug, Clone)]
pub struct CoursePoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: f64,
    /// Steglengde fra forrige punkt (m). Første punkt har 0.
    pub step_m: f64,
    /// Kumulativ modelldistanse (km).
    pub model_dist_km: f64,
    /// Glattet stigning i prosent.
    pub slope_pct: f64,
    /// Glattet kompasskurs, med klokka fra nord.
    pub heading_deg: f64,
    pub grade_bin: GradeBin,
    pub heading_bin_deg: f64,
    /// Modellhastighet fra grid-oppslag (km/t).
    pub model_v_kmh: f64,
    /// Modelltid for steget (sek).
    pub model_t_s: f64,
}

/// Én hastighetskolonne per corner-scenario, i sweep-rekkefølge.
#[derive(Debug, Clone)]
pub struct CornerColumn {
    pub name: String,
    pub v_kmh: Vec<f64>,
}

/// Modellert kurve: beriket punktsekvens pluss scenario-kolonner.
#[derive(Debug, Clone, Default)]
pub struct Course {
    pub points: Vec<CoursePoint>,
    pub corners: Vec<CornerColumn>,
}

impl Course {
    pub fn distance_km(&self) -> f64 {
        self.points.last().map(|p| p.model_dist_km).unwrap_or(0.0)
    }

    pub fn total_time_s(&self) -> f64 {
        self.points.iter().map(|p| p.model_t_s).sum()
    }

    pub fn mean_v_kmh(&self) -> f64 {
        let t = self.total_time_s();
        if t > 0.0 {
            self.distance_km() / t * 3600.0
        } else {
            0.0
        }
    }
}

/// Rytter + sykkel + hjul for ett scenario. Uforanderlig per kjøring;
/// corners lager justerte kopier i stedet for å mutere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub power_w: f64,
    pub rider_mass_kg: f64,
    /// Sykkelmasse uten hjul.
    pub bike_mass_kg: f64,
    pub front_wheel_mass_kg: f64,
    pub rear_wheel_mass_kg: f64,
    pub frontal_area_m2: f64,
    /// Cd for rytter + ramme.
    pub cd: f64,
    /// Dragkoeffisient per hjul.
    pub cx_front: f64,
    pub cx_rear: f64,
    pub wheel_dia_front_m: f64,
    pub wheel_dia_rear_m: f64,
    /// Andel av bakhjulet i le bak rammen.
    pub rear_shelter: f64,
    pub crr: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            power_w: 286.0,
            rider_mass_kg: 74.0,
            bike_mass_kg: 8.0,
            front_wheel_mass_kg: 1.264,
            rear_wheel_mass_kg: 1.364,
            frontal_area_m2: 0.5,
            cd: 0.48,
            cx_front: 0.0491,
            cx_rear: 0.0491,
            wheel_dia_front_m: 0.337 * 2.0,
            wheel_dia_rear_m: 0.337 * 2.0,
            rear_shelter: 0.25,
            crr: 0.005,
        }
    }
}

impl Profile {
    /// Total masse (kg) = rytter + sykkel + begge hjul.
    #[inline]
    pub fn total_mass_kg(&self) -> f64 {
        self.rider_mass_kg + self.bike_mass_kg + self.front_wheel_mass_kg + self.rear_wheel_mass_kg
    }
}

/// Værparametre for ett scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weather {
    pub wind_ms: f64,
    /// Retningen vinden kommer FRA, grader med klokka fra nord.
    pub wind_dir_deg: f64,
    pub air_temp_c: f64,
    pub air_pressure_hpa: f64,
    #[serde(default)]
    pub dewpoint_c: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            wind_ms: 0.0,
            wind_dir_deg: 0.0,
            air_temp_c: 15.0,
            air_pressure_hpa: 1013.0,
            dewpoint_c: None,
            humidity_pct: None,
        }
    }
}

impl Weather {
    /// Vindkomponent langs kjøreretningen (m/s). Positiv = motvind.
    /// cos(0)=1 gir full motvind, cos(180)=-1 full medvind.
    pub fn headwind_component(&self, bearing_deg: f64) -> f64 {
        self.wind_ms * ((self.wind_dir_deg - bearing_deg) * std::f64::consts::PI / 180.0).cos()
    }
}
