//! Sales forecasting: ordinary least squares blended with the mean.
//!
//! A pure regression overreacts to short noisy windows, so every projected
//! point is averaged 50/50 with the historical mean, clamped at zero and
//! capped at 3x the mean (21x for a 7-day sum). Below 4 data points the
//! regression is unreliable and the flat average is used throughout.

use chrono::Duration;

use crate::db::queries::DailySales;

/// Single-point forecasts for tomorrow and the next seven days combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    pub tomorrow: f64,
    pub next_7: f64,
}

impl Forecast {
    pub const ZERO: Forecast = Forecast {
        tomorrow: 0.0,
        next_7: 0.0,
    };
}

struct LineFit {
    slope: f64,
    intercept: f64,
}

/// Closed-form least squares over x = 0..n-1. None below 4 points or when
/// the denominator degenerates (guarded even though x = 0..n-1 cannot
/// produce it).
fn fit(values: &[f64]) -> Option<LineFit> {
    let n = values.len();
    if n < 4 {
        return None;
    }

    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;
    Some(LineFit { slope, intercept })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Blend one regression point with the mean, clamp at zero, cap at 3x mean.
/// No cap applies when the baseline is zero; the blend is already >= 0.
fn blended_point(fit: &LineFit, avg: f64, x: f64) -> f64 {
    let blended = 0.5 * (fit.intercept + fit.slope * x) + 0.5 * avg;
    let blended = blended.max(0.0);
    if avg > 0.0 {
        blended.min(3.0 * avg)
    } else {
        blended
    }
}

/// Forecast tomorrow's sales and the next-7-day total from a daily history.
pub fn forecast(values: &[f64]) -> Forecast {
    if values.is_empty() {
        return Forecast::ZERO;
    }

    let avg = mean(values);
    let Some(line) = fit(values) else {
        return Forecast {
            tomorrow: avg,
            next_7: avg * 7.0,
        };
    };

    let n = values.len() as f64;
    let tomorrow = blended_point(&line, avg, n);

    let regression_week: f64 = (0..7)
        .map(|offset| line.intercept + line.slope * (n + offset as f64))
        .sum();
    let mut next_7 = (0.5 * regression_week + 0.5 * avg * 7.0).max(0.0);
    if avg > 0.0 {
        next_7 = next_7.min(21.0 * avg);
    }

    Forecast { tomorrow, next_7 }
}

/// Per-day forecast series: the same regression/blend/cap applied at each
/// offset independently, not a split of the 7-day total.
pub fn forecast_series(values: &[f64], days_ahead: usize) -> Vec<f64> {
    if values.is_empty() {
        return vec![0.0; days_ahead];
    }

    let avg = mean(values);
    let Some(line) = fit(values) else {
        return vec![avg; days_ahead];
    };

    let n = values.len() as f64;
    (0..days_ahead)
        .map(|offset| blended_point(&line, avg, n + offset as f64))
        .collect()
}

/// Extract the fit input from a daily series. Gaps are skipped by default,
/// compressing the time axis; with `zero_fill_gaps` missing calendar days
/// between the first and last point become explicit zeros.
pub fn input_values(series: &[DailySales], zero_fill_gaps: bool) -> Vec<f64> {
    if !zero_fill_gaps || series.len() < 2 {
        return series.iter().map(|d| d.total).collect();
    }

    let mut values = Vec::new();
    let mut expected = series[0].date;
    for point in series {
        while expected < point.date {
            values.push(0.0);
            expected = expected + Duration::days(1);
        }
        values.push(point.total);
        expected = point.date + Duration::days(1);
    }
    values
}
