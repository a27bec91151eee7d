// core/src/course.rs
use crate::errors::ModelError;
use crate::grid::{GradeBin, PowerModulation, VelocityGrid};
use crate::models::{Course, CoursePoint, Profile, TrackPoint, Weather};
use crate::smoothing::{backfill, rolling_mean};

/// Justerbare parametre for kurveprosesseringen.
#[derive(Debug, Clone, Copy)]
pub struct CourseConfig {
    /// Vindu for rullende snitt av høyde, steg og posisjon.
    pub window: usize,
    /// Under denne snittsteglengden (m) settes stigningen til 0,
    /// ellers blåser divisjonen opp rundt stillestående punkter.
    pub min_step_m: f64,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            window: 5,
            min_step_m: 1.0,
        }
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Storsirkelavstand i meter (haversine).
fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_M * 2.0 * a.sqrt().asin()
}

/// Kompasskurs fra en 2D-retningsvektor: mod(90 − vinkel(Δlon + i·Δlat), 360).
fn compass_heading_deg(d_lon: f64, d_lat: f64) -> f64 {
    (90.0 - d_lat.atan2(d_lon).to_degrees()).rem_euclid(360.0)
}

/// Bygger den berikede punktsekvensen fra rå (lat, lon, høyde)-punkter:
/// steglengder, kumulativ distanse, glattet stigning og kurs, og binner.
/// Modellhastighet og -tid fylles av apply_grid.
pub fn load_course(points: &[TrackPoint], cfg: &CourseConfig) -> Result<Vec<CoursePoint>, ModelError> {
    if cfg.window < 2 {
        return Err(ModelError::MalformedTrack {
            reason: format!("glattevindu må være minst 2, fikk {}", cfg.window),
        });
    }
    if points.len() < cfg.window {
        return Err(ModelError::MalformedTrack {
            reason: format!(
                "for få punkter: {} < glattevindu {}",
                points.len(),
                cfg.window
            ),
        });
    }
    for (i, p) in points.iter().enumerate() {
        if !p.lat.is_finite() || !p.lon.is_finite() || !p.altitude_m.is_finite() {
            return Err(ModelError::MalformedTrack {
                reason: format!("ikke-endelige felter i punkt {i}"),
            });
        }
    }

    let n = points.len();
    let mut step = vec![0.0; n];
    for i in 1..n {
        step[i] = haversine_m(
            points[i - 1].lat,
            points[i - 1].lon,
            points[i].lat,
            points[i].lon,
        );
    }

    let alts: Vec<f64> = points.iter().map(|p| p.altitude_m).collect();
    let lats: Vec<f64> = points.iter().map(|p| p.lat).collect();
    let lons: Vec<f64> = points.iter().map(|p| p.lon).collect();

    let alt_rm = rolling_mean(&alts, cfg.window);
    let step_rm = rolling_mean(&step, cfg.window);
    let lat_rm = rolling_mean(&lats, cfg.window);
    let lon_rm = rolling_mean(&lons, cfg.window);

    // Stigning i prosent fra differansen av rullende snitt. Nesten
    // stillestående strekk tvinges til 0 uavhengig av høydedifferansen.
    let mut slope: Vec<Option<f64>> = vec![None; n];
    for i in 0..n {
        let d_alt = match (i.checked_sub(1).and_then(|j| alt_rm[j]), alt_rm[i]) {
            (Some(a0), Some(a1)) => Some(a1 - a0),
            _ => None,
        };
        slope[i] = match (d_alt, step_rm[i]) {
            (_, Some(s)) if s < cfg.min_step_m => Some(0.0),
            (Some(d), Some(s)) => Some(d / s * 100.0),
            _ => None,
        };
    }
    let slope = backfill(slope).ok_or_else(|| ModelError::MalformedTrack {
        reason: "for få punkter til stigningsglatting".into(),
    })?;

    let mut heading: Vec<Option<f64>> = vec![None; n];
    for i in 1..n {
        if let (Some(lo0), Some(lo1), Some(la0), Some(la1)) =
            (lon_rm[i - 1], lon_rm[i], lat_rm[i - 1], lat_rm[i])
        {
            heading[i] = Some(compass_heading_deg(lo1 - lo0, la1 - la0));
        }
    }
    let heading = backfill(heading).ok_or_else(|| ModelError::MalformedTrack {
        reason: "for få punkter til kursglatting".into(),
    })?;

    let mut out = Vec::with_capacity(n);
    let mut cum_m = 0.0;
    for i in 0..n {
        cum_m += step[i];
        out.push(CoursePoint {
            lat: points[i].lat,
            lon: points[i].lon,
            altitude_m: points[i].altitude_m,
            step_m: step[i],
            model_dist_km: cum_m / 1000.0,
            slope_pct: slope[i],
            heading_deg: heading[i],
            grade_bin: GradeBin::from_slope_pct(slope[i]),
            heading_bin_deg: VelocityGrid::heading_bin(heading[i]),
            model_v_kmh: 0.0,
            model_t_s: 0.0,
        });
    }
    Ok(out)
}

/// Slår opp modellhastighet for hvert punkt og setter modelltid per steg.
/// Feiler før noe skrives; et punkt utenfor tabellen forkaster hele kjøringen.
pub fn apply_grid(points: &mut [CoursePoint], grid: &VelocityGrid) -> Result<(), ModelError> {
    let mut v_kmh = Vec::with_capacity(points.len());
    for p in points.iter() {
        v_kmh.push(grid.lookup(p.heading_bin_deg, p.grade_bin)? * 3.6);
    }
    for (p, v) in points.iter_mut().zip(v_kmh) {
        p.model_v_kmh = v;
        // stillestående punkt: steg 0 gir tid 0, ikke divisjon på null
        p.model_t_s = if p.step_m == 0.0 { 0.0 } else { p.step_m / v * 3.6 };
    }
    Ok(())
}

/// Full modellering i ett kall: bygg grid, last kurve, slå opp hastigheter.
pub fn model_course(
    points: &[TrackPoint],
    profile: &Profile,
    weather: &Weather,
    modulation: PowerModulation,
    cfg: &CourseConfig,
) -> Result<Course, ModelError> {
    let grid = VelocityGrid::build(profile, weather, modulation)?;
    let mut pts = load_course(points, cfg)?;
    apply_grid(&mut pts, &grid)?;
    Ok(Course {
        points: pts,
        corners: Vec::new(),
    })
}
