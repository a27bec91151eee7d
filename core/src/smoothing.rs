/// Rullende snitt med bakoverskuende vindu. Posisjoner uten fullt vindu
/// blir None, på samme måte som et rolling mean over tidsserier.
pub fn rolling_mean(xs: &[f64], win: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(xs.len());
    let mut sum = 0.0;
    for i in 0..xs.len() {
        sum += xs[i];
        if i >= win {
            sum -= xs[i - win];
        }
        if i + 1 >= win {
            out.push(Some(sum / win as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Bakoverfyll: hver manglende verdi tar neste gyldige verdi etter seg.
/// Hull helt på slutten fylles forover fra siste gyldige.
/// Returnerer None hvis serien ikke inneholder noen gyldig verdi.
pub fn backfill(xs: Vec<Option<f64>>) -> Option<Vec<f64>> {
    let n = xs.len();
    let mut out = xs;
    for i in (0..n.saturating_sub(1)).rev() {
        if out[i].is_none() {
            out[i] = out[i + 1];
        }
    }
    for i in 1..n {
        if out[i].is_none() {
            out[i] = out[i - 1];
        }
    }
    out.into_iter().collect()
}
