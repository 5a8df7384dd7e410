//! Recency-weighted least-squares trend fitting over observed days.

use vital_core::models::AlignedSeries;

/// A fitted linear trend over a series' observed day indices.
#[derive(Debug, Clone, Copy)]
pub struct TrendFit {
    /// Value change per day.
    pub slope: f64,
    /// Fitted value at day index 0.
    pub intercept: f64,
    /// Weighted standard deviation of the residuals.
    pub residual_std: f64,
    /// Weighted coefficient of determination, in [0, 1].
    pub r_squared: f64,
    /// Observed points used in the fit.
    pub n: usize,
}

impl TrendFit {
    /// Fitted value at a day index (may extrapolate past the window).
    pub fn value_at(&self, day_index: f64) -> f64 {
        self.intercept + self.slope * day_index
    }

    /// Volatility relative to the fitted level: residual_std normalized by
    /// the magnitude of the series' fitted mean. 0 for a perfect fit.
    pub fn relative_volatility(&self, mean: f64) -> f64 {
        if mean.abs() < f64::EPSILON {
            return if self.residual_std > 0.0 { 1.0 } else { 0.0 };
        }
        (self.residual_std / mean.abs()).min(1.0)
    }
}

/// Fit a recency-weighted linear trend. Newer days get exponentially more
/// weight (half-life in days). None when fewer than `min_points` days are
/// observed or the fit is degenerate.
pub fn fit_trend(
    series: &AlignedSeries,
    half_life_days: f64,
    min_points: usize,
) -> Option<TrendFit> {
    let observed: Vec<(usize, f64)> = series.observed().collect();
    let n = observed.len();
    if n < min_points.max(2) {
        return None;
    }

    let last_index = observed[n - 1].0 as f64;
    let half_life = half_life_days.max(1.0);
    let weight = |i: usize| -> f64 {
        let age = last_index - i as f64;
        (-age / half_life * std::f64::consts::LN_2).exp()
    };

    let w_sum: f64 = observed.iter().map(|&(i, _)| weight(i)).sum();
    let mean_x: f64 = observed.iter().map(|&(i, _)| weight(i) * i as f64).sum::<f64>() / w_sum;
    let mean_y: f64 = observed.iter().map(|&(i, v)| weight(i) * v).sum::<f64>() / w_sum;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for &(i, v) in &observed {
        let w = weight(i);
        let dx = i as f64 - mean_x;
        let dy = v - mean_y;
        sxx += w * dx * dx;
        sxy += w * dx * dy;
        syy += w * dy * dy;
    }
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = observed
        .iter()
        .map(|&(i, v)| {
            let fitted = intercept + slope * i as f64;
            weight(i) * (v - fitted).powi(2)
        })
        .sum();
    let residual_std = (ss_res / w_sum).sqrt();
    let r_squared = if syy > 0.0 {
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(TrendFit {
        slope,
        intercept,
        residual_std,
        r_squared,
        n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vital_core::models::{Score, VariableFamily};
    use vital_core::DateWindow;

    fn series(points: Vec<Option<f64>>) -> AlignedSeries {
        let start: NaiveDate = "2026-03-01".parse().unwrap();
        let end = start + chrono::Duration::days(points.len() as i64 - 1);
        let quality = points.iter().filter(|p| p.is_some()).count() as f64 / points.len() as f64;
        AlignedSeries {
            user_id: "u".into(),
            variable: "wearable.sleep_score".into(),
            family: VariableFamily::Wearable,
            window: DateWindow::new(start, end).unwrap(),
            data_quality: Score::new(quality),
            points,
        }
    }

    #[test]
    fn exact_linear_data_fits_exactly() {
        let s = series((0..10).map(|i| Some(50.0 + 2.0 * f64::from(i))).collect());
        let fit = fit_trend(&s, 14.0, 5).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 50.0).abs() < 1e-9);
        assert!(fit.residual_std < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn too_few_points_yields_none() {
        let s = series(vec![Some(1.0), Some(2.0), None, None, None, None]);
        assert!(fit_trend(&s, 14.0, 5).is_none());
    }

    #[test]
    fn noisy_data_has_positive_residual_std() {
        let s = series(vec![
            Some(70.0), Some(85.0), Some(62.0), Some(90.0), Some(68.0),
            Some(88.0), Some(64.0), Some(92.0), Some(71.0), Some(83.0),
        ]);
        let fit = fit_trend(&s, 14.0, 5).unwrap();
        assert!(fit.residual_std > 5.0);
        assert!(fit.r_squared < 0.5);
    }
}
