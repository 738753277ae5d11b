//! Descriptive statistics over light samples.
//!
//! Pure functions over an ordered slice of samples. Every function returns
//! `None` on empty input instead of a computed number; there is no silent
//! division by zero anywhere in this module. Accumulation happens in f64
//! to keep sixty-sample sums well-conditioned.

use skylark_types::LightStats;

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|v| f64::from(*v)).sum();
    Some((sum / values.len() as f64) as f32)
}

/// Median, sort-based; an even-length input averages the two middle
/// elements.
#[must_use]
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Population variance.
#[must_use]
pub fn population_variance(values: &[f32]) -> Option<f32> {
    let mu = f64::from(mean(values)?);
    let sum: f64 = values
        .iter()
        .map(|v| {
            let diff = f64::from(*v) - mu;
            diff * diff
        })
        .sum();
    Some((sum / values.len() as f64) as f32)
}

/// Population standard deviation.
#[must_use]
pub fn population_std_dev(values: &[f32]) -> Option<f32> {
    population_variance(values).map(f32::sqrt)
}

/// Minimum, maximum, and their difference.
#[must_use]
pub fn min_max_range(values: &[f32]) -> Option<(f32, f32, f32)> {
    let first = *values.first()?;
    let (min, max) = values[1..]
        .iter()
        .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    Some((min, max, max - min))
}

/// Mean of the trailing `window` samples, or of everything when fewer
/// exist. A zero window yields `None`.
#[must_use]
pub fn moving_average(values: &[f32], window: usize) -> Option<f32> {
    if window == 0 {
        return None;
    }
    let start = values.len().saturating_sub(window);
    mean(&values[start..])
}

/// Pearson correlation coefficient between two series.
///
/// The series are aligned on their shortest common suffix. Returns `None`
/// when fewer than two aligned points exist or either variance term is
/// zero (a constant series has no defined correlation).
#[must_use]
pub fn pearson_correlation(xs: &[f32], ys: &[f32]) -> Option<f32> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let xs = &xs[xs.len() - n..];
    let ys = &ys[ys.len() - n..];

    let mx = f64::from(mean(xs)?);
    let my = f64::from(mean(ys)?);

    let mut num = 0.0f64;
    let mut dx = 0.0f64;
    let mut dy = 0.0f64;
    for (x, y) in xs.iter().zip(ys) {
        let a = f64::from(*x) - mx;
        let b = f64::from(*y) - my;
        num += a * b;
        dx += a * a;
        dy += b * b;
    }

    if dx == 0.0 || dy == 0.0 {
        return None;
    }
    Some((num / (dx * dy).sqrt()) as f32)
}

/// Package the full summary for the payload's `stats` block.
///
/// `None` when the window is empty or `moving_average_window` is zero.
#[must_use]
pub fn summarize(values: &[f32], moving_average_window: usize) -> Option<LightStats> {
    let (min, max, range) = min_max_range(values)?;
    Some(LightStats {
        mean: mean(values)?,
        median: median(values)?,
        min,
        max,
        range,
        std_dev: population_std_dev(values)?,
        moving_average: moving_average(values, moving_average_window)?,
    })
}
