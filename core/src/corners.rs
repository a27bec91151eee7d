// core/src/corners.rs
use crate::errors::ModelError;
use crate::grid::{PowerModulation, VelocityGrid};
use crate::models::{CornerColumn, Course, Profile, Weather};

/// Én navngitt parameterforstyrrelse rundt basismodellen. Eksplisitt
/// konfigurasjon som sendes inn, ikke modulkonstanter.
#[derive(Debug, Clone)]
pub struct Corner {
    pub name: String,
    pub power_scale: f64,
    /// Skalerer ryttermassen alene, ikke sykkel og hjul.
    pub mass_scale: f64,
    /// Skalerer Cd for rytter + ramme.
    pub drag_scale: f64,
    /// Absolutt vind for scenarioet (basisscenarioene kjøres i vindstille).
    pub wind_ms: f64,
    pub wind_dir_deg: f64,
    pub pressure_scale: f64,
    pub temp_shift_c: f64,
    pub humidity_scale: f64,
}

impl Corner {
    fn neutral(name: &str) -> Corner {
        Corner {
            name: name.to_string(),
            power_scale: 1.0,
            mass_scale: 1.0,
            drag_scale: 1.0,
            wind_ms: 0.0,
            wind_dir_deg: 0.0,
            pressure_scale: 1.0,
            temp_shift_c: 0.0,
            humidity_scale: 1.0,
        }
    }

    /// Basisprofil og -vær → forstyrret scenario.
    pub fn apply(&self, profile: &Profile, weather: &Weather) -> (Profile, Weather) {
        let mut p = profile.clone();
        p.power_w *= self.power_scale;
        p.rider_mass_kg *= self.mass_scale;
        p.cd *= self.drag_scale;

        let mut w = *weather;
        w.wind_ms = self.wind_ms;
        w.wind_dir_deg = self.wind_dir_deg;
        w.air_pressure_hpa *= self.pressure_scale;
        w.air_temp_c += self.temp_shift_c;
        w.humidity_pct = w.humidity_pct.map(|h| h * self.humidity_scale);
        (p, w)
    }
}

/// Standardsettet på 20 scenarioer: kraft/masse/drag ±10 %, 5 m/s vind
/// fra 8 kompassretninger, trykk ±10 %, temperatur ±5 °C, fukt ±10 %.
pub fn default_corners() -> Vec<Corner> {
    let mut out = Vec::with_capacity(20);
    out.push(Corner { power_scale: 0.9, ..Corner::neutral("Pd") });
    out.push(Corner { power_scale: 1.1, ..Corner::neutral("Pu") });
    out.push(Corner { mass_scale: 0.9, ..Corner::neutral("Md") });
    out.push(Corner { mass_scale: 1.1, ..Corner::neutral("Mu") });
    out.push(Corner { drag_scale: 0.9, ..Corner::neutral("Dd") });
    out.push(Corner { drag_scale: 1.1, ..Corner::neutral("Du") });
    for dir in [0, 45, 90, 135, 180, 225, 270, 315] {
        out.push(Corner {
            wind_ms: 5.0,
            wind_dir_deg: dir as f64,
            ..Corner::neutral(&format!("W{dir}"))
        });
    }
    out.push(Corner { pressure_scale: 0.9, ..Corner::neutral("Prd") });
    out.push(Corner { pressure_scale: 1.1, ..Corner::neutral("Pru") });
    out.push(Corner { temp_shift_c: -5.0, ..Corner::neutral("Td") });
    out.push(Corner { temp_shift_c: 5.0, ..Corner::neutral("Tu") });
    out.push(Corner { humidity_scale: 0.9, ..Corner::neutral("Hd") });
    out.push(Corner { humidity_scale: 1.1, ..Corner::neutral("Hu") });
    out
}

/// Kjører hele sweepen: bygger grid på nytt per scenario og legger én
/// hastighetskolonne per corner på kurven. Kolonnene committes først
/// når alle scenarioene har lyktes.
pub fn run_corners(
    course: &mut Course,
    profile: &Profile,
    weather: &Weather,
    corners: &[Corner],
    modulation: PowerModulation,
) -> Result<(), ModelError> {
    let mut cols = Vec::with_capacity(corners.len());
    for corner in corners {
        let (p, w) = corner.apply(profile, weather);
        let grid = VelocityGrid::build(&p, &w, modulation)?;
        let mut v_kmh = Vec::with_capacity(course.points.len());
        for pt in &course.points {
            v_kmh.push(grid.lookup(pt.heading_bin_deg, pt.grade_bin)? * 3.6);
        }
        cols.push(CornerColumn {
            name: corner.name.clone(),
            v_kmh,
        });
    }
    course.corners = cols;
    Ok(())
}

/// Ønsket avvik fra basisscenarioet for hva-hvis-interpolasjon.
/// Relative felter er brøker (0.05 = +5 %), temperatur er absolutt skift.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjustment {
    pub d_power: f64,
    pub d_mass: f64,
    pub d_drag: f64,
    /// Vindstyrke i mph (slik kildedataene oppgir den).
    pub wind_mph: f64,
    /// Rundes til nærmeste 45°-scenario.
    pub wind_dir_deg: f64,
    pub d_pressure: f64,
    pub d_temp_c: f64,
    pub d_humidity: f64,
}

fn corner_column<'a>(course: &'a Course, name: &str) -> Result<&'a [f64], ModelError> {
    course
        .corners
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.v_kmh.as_slice())
        .ok_or_else(|| ModelError::MalformedTrack {
            reason: format!("mangler corner-kolonne {name}"),
        })
}

/// Interpolerer per-punkt-hastighet lineært fra corner-deltaene,
/// proporsjonalt med ønsket avvik. Corner-spredningen er 10 %, derav
/// faktoren 10 på de relative avvikene; vindscenarioene er 5 m/s, derav
/// delingen på 5; temperaturscenarioene er ±5 °C.
pub fn interp_velocity(course: &Course, adj: &Adjustment) -> Result<Vec<f64>, ModelError> {
    let pd = corner_column(course, "Pd")?;
    let pu = corner_column(course, "Pu")?;
    let md = corner_column(course, "Md")?;
    let mu = corner_column(course, "Mu")?;
    let dd = corner_column(course, "Dd")?;
    let du = corner_column(course, "Du")?;
    let prd = corner_column(course, "Prd")?;
    let pru = corner_column(course, "Pru")?;
    let td = corner_column(course, "Td")?;
    let tu = corner_column(course, "Tu")?;
    let hd = corner_column(course, "Hd")?;
    let hu = corner_column(course, "Hu")?;

    let dirn = ((adj.wind_dir_deg.rem_euclid(360.0) / 45.0).round() as i32 % 8) * 45;
    let wind = corner_column(course, &format!("W{dirn}"))?;

    let mut out = Vec::with_capacity(course.points.len());
    for (i, p) in course.points.iter().enumerate() {
        let v = p.model_v_kmh;
        let d_p = 10.0 * adj.d_power.min(0.0) * (v - pd[i])
            + 10.0 * adj.d_power.max(0.0) * (pu[i] - v);
        let d_m = 10.0 * adj.d_mass.min(0.0) * (v - md[i])
            + 10.0 * adj.d_mass.max(0.0) * (mu[i] - v);
        let d_d = 10.0 * adj.d_drag.min(0.0) * (v - dd[i])
            + 10.0 * adj.d_drag.max(0.0) * (du[i] - v);
        let d_w = adj.wind_mph * (1609.0 / 3600.0) / 5.0 * (wind[i] - v);
        let d_pr = 10.0 * adj.d_pressure.min(0.0) * (v - prd[i])
            + 10.0 * adj.d_pressure.max(0.0) * (pru[i] - v);
        let d_t = (adj.d_temp_c / 5.0).min(0.0) * (v - td[i])
            + (adj.d_temp_c / 5.0).max(0.0) * (tu[i] - v);
        let d_h = 10.0 * adj.d_humidity.min(0.0) * (v - hd[i])
            + 10.0 * adj.d_humidity.max(0.0) * (hu[i] - v);
        out.push(v + d_p + d_m + d_d + d_w + d_pr + d_t + d_h);
    }
    Ok(out)
}

/// Justert tid per steg (sek) med samme stillstandsregel som basistiden.
pub fn adjusted_time_s(course: &Course, adj: &Adjustment) -> Result<Vec<f64>, ModelError> {
    let v = interp_velocity(course, adj)?;
    Ok(course
        .points
        .iter()
        .zip(v)
        .map(|(p, v_kmh)| {
            if p.step_m == 0.0 {
                0.0
            } else {
                p.step_m / v_kmh * 3.6
            }
        })
        .collect())
}
