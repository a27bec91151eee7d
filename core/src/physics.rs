// core/src/physics.rs
use std::f64::consts::PI;

use crate::errors::ModelError;
use crate::models::{Profile, Weather};

pub const G: f64 = 9.81; // gravitasjon (m/s²)
const R_DRY: f64 = 287.05; // gasskonstant tørr luft, J/(kg·K)
const R_VAPOR: f64 = 461.495; // gasskonstant vanndamp, J/(kg·K)

/// Terskel for "reell nok" rot fra kubikkløseren.
const IM_TOL: f64 = 1e-3;

/// Metningstrykk for vanndamp over vann (Pa), Tetens-form.
#[inline]
fn saturation_vapor_pressure_pa(temp_c: f64) -> f64 {
    610.94 * ((17.625 * temp_c) / (temp_c + 243.04)).exp()
}

/// Lufttetthet (kg/m³) fra trykk, temperatur og fukt.
/// Duggpunkt vinner over relativ fuktighet hvis begge er satt;
/// uten noen av dem regnes tørr luft.
pub fn air_density(weather: &Weather) -> f64 {
    let t_k = weather.air_temp_c + 273.15;
    let p_pa = weather.air_pressure_hpa * 100.0;

    let e = if let Some(dp) = weather.dewpoint_c {
        saturation_vapor_pressure_pa(dp)
    } else if let Some(rh) = weather.humidity_pct {
        (rh / 100.0).clamp(0.0, 1.0) * saturation_vapor_pressure_pa(weather.air_temp_c)
    } else {
        0.0
    };

    let pd = (p_pa - e).max(0.0);
    pd / (R_DRY * t_k) + e / (R_VAPOR * t_k)
}

/// Sigmoid for kraftjustering i bakker: 1/(1+exp(-a·x)) + b.
/// a og b er valgt empirisk; x er stigning i prosent.
#[inline]
pub fn sigmoid(x: f64, a: f64, b: f64) -> f64 {
    1.0 / (1.0 + (-a * x).exp()) + b
}

/// Samlet aerodynamisk dragkoeffisient: kropp + begge hjul,
/// bakhjulet redusert med le-andelen bak rammen.
fn drag_coef(profile: &Profile, rho: f64) -> f64 {
    rho / 8.0
        * (4.0 * profile.frontal_area_m2 * profile.cd
            + PI * (profile.cx_front * profile.wheel_dia_front_m.powi(2)
                + profile.cx_rear * profile.wheel_dia_rear_m.powi(2) * (1.0 - profile.rear_shelter)))
}

/// Mekanisk last: rulling + klatring, dekomponert via atan(grade).
fn mech_coef(profile: &Profile, grade: f64) -> f64 {
    let theta = grade.atan();
    profile.total_mass_kg() * G * (profile.crr * theta.cos() + theta.sin())
}

/// Løser stasjonær hastighet (m/s) for gitt stigning og kurs.
///
/// Kraftbalansen Power = Drag·(v+Ahw)³ + Mech·v gir kubikken
/// Drag·v³ + 3·Drag·Ahw·v² + (3·Drag·Ahw² + Mech)·v + Drag·Ahw³ − Power = 0
/// der Ahw er tilsynelatende motvind. Vi tar maks reelle rot blant røtter
/// med |imaginærdel| < 1e-3. Null og negativ kraft er gyldige innganger,
/// og en negativ rot (rytteren kommer ikke framover) returneres som den er.
pub fn solve_speed(
    profile: &Profile,
    weather: &Weather,
    grade: f64,
    bearing_deg: f64,
    power_w: f64,
) -> Result<f64, ModelError> {
    let rho = air_density(weather);
    let drag = drag_coef(profile, rho);
    let mech = mech_coef(profile, grade);
    let ahw = weather.headwind_component(bearing_deg);

    let roots = cubic_roots(
        drag,
        3.0 * drag * ahw,
        3.0 * drag * ahw * ahw + mech,
        drag * ahw.powi(3) - power_w,
    );

    roots
        .into_iter()
        .filter(|(_, im)| im.abs() < IM_TOL)
        .map(|(re, _)| re)
        .max_by(|a, b| a.total_cmp(b))
        .ok_or(ModelError::NoValidRoot { grade, bearing_deg })
}

/// Alle røtter av a·x³ + b·x² + c·x + d som (re, im)-par.
/// Forsvinner ledende koeffisient reduseres graden, som en numerisk
/// rotfinner ville gjort.
fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<(f64, f64)> {
    if a.abs() < 1e-12 {
        return quadratic_roots(b, c, d);
    }

    // Deprimert form t³ + p·t + q med x = t − b/(3a)
    let shift = b / (3.0 * a);
    let p = (3.0 * a * c - b * b) / (3.0 * a * a);
    let q = (2.0 * b.powi(3) - 9.0 * a * b * c + 27.0 * a * a * d) / (27.0 * a.powi(3));
    let inner = q * q / 4.0 + p.powi(3) / 27.0;

    let mut out = Vec::with_capacity(3);
    if inner > 0.0 {
        // én reell rot pluss komplekskonjugert par (Cardano)
        let s = inner.sqrt();
        let u = (-q / 2.0 + s).cbrt();
        let w = (-q / 2.0 - s).cbrt();
        out.push((u + w - shift, 0.0));
        let re = -(u + w) / 2.0 - shift;
        let im = 3.0_f64.sqrt() / 2.0 * (u - w);
        out.push((re, im));
        out.push((re, -im));
    } else if p.abs() < 1e-12 {
        // inner <= 0 og p ≈ 0 tvinger q ≈ 0: trippelrot
        let t = (-q).cbrt();
        for _ in 0..3 {
            out.push((t - shift, 0.0));
        }
    } else {
        // tre reelle røtter, trigonometrisk form (p < 0 her)
        let m = 2.0 * (-p / 3.0).sqrt();
        let phi = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos() / 3.0;
        for k in 0..3 {
            let t = m * (phi - 2.0 * PI * k as f64 / 3.0).cos();
            out.push((t - shift, 0.0));
        }
    }
    out
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<(f64, f64)> {
    if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            return Vec::new();
        }
        return vec![(-c / b, 0.0)];
    }
    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        let s = disc.sqrt();
        vec![((-b + s) / (2.0 * a), 0.0), ((-b - s) / (2.0 * a), 0.0)]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a);
        vec![(re, im), (re, -im)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_three_real_roots() {
        // (x-1)(x-2)(x-3) = x³ - 6x² + 11x - 6
        let mut roots: Vec<f64> = cubic_roots(1.0, -6.0, 11.0, -6.0)
            .into_iter()
            .map(|(re, _)| re)
            .collect();
        roots.sort_by(|a, b| a.total_cmp(b));
        assert!((roots[0] - 1.0).abs() < 1e-9);
        assert!((roots[1] - 2.0).abs() < 1e-9);
        assert!((roots[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn cubic_one_real_root() {
        // x³ + x + 1 har én reell rot nær -0.6823
        let roots = cubic_roots(1.0, 0.0, 1.0, 1.0);
        let real: Vec<f64> = roots
            .iter()
            .filter(|(_, im)| im.abs() < 1e-9)
            .map(|(re, _)| *re)
            .collect();
        assert_eq!(real.len(), 1);
        assert!((real[0] + 0.6823278).abs() < 1e-6);
    }

    #[test]
    fn cubic_degenerate_leading_zero() {
        // 0·x³ + x² - 1 = 0 => ±1
        let mut roots: Vec<f64> = cubic_roots(0.0, 1.0, 0.0, -1.0)
            .into_iter()
            .map(|(re, _)| re)
            .collect();
        roots.sort_by(|a, b| a.total_cmp(b));
        assert!((roots[0] + 1.0).abs() < 1e-9);
        assert!((roots[1] - 1.0).abs() < 1e-9);
    }
}
