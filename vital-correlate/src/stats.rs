//! Pearson coefficient and its two-tailed p-value via `statrs`.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson correlation coefficient over paired samples.
///
/// Returns None for degenerate input: fewer than 2 pairs, mismatched
/// lengths, or zero variance in either sample (a constant series has no
/// defined correlation — reporting 0.0 would be indistinguishable from a
/// real null result).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = cov / (var_x.sqrt() * var_y.sqrt());
    if !r.is_finite() {
        return None;
    }
    // Floating-point rounding can push |r| fractionally past 1.
    Some(r.clamp(-1.0, 1.0))
}

/// Two-tailed p-value for a Pearson coefficient under the standard
/// t-distribution approximation with n − 2 degrees of freedom.
///
/// Degenerate inputs (n < 3, |r| = 1) fall back conservatively:
/// n < 3 → 1.0 (no evidence), |r| = 1 → 0.0 (t diverges).
pub fn two_tailed_p(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return 0.0;
    }
    let t = r.abs() * (df / denom).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => {
            let p = 2.0 * (1.0 - dist.cdf(t));
            p.clamp(0.0, 1.0)
        }
        // df is positive here, but guard like any other distribution call.
        Err(_) => 1.0,
    }
}
