//! Rolling z-score of a spread series.
//!
//! z[i] = (spread[i] - rolling_mean) / rolling_std over the trailing
//! `window` observations (inclusive). Sample standard deviation (ddof = 1).
//! Warmup: the first (window - 1) positions are NaN, as is any position
//! where the rolling standard deviation is zero or undefined. NaN is the
//! signal-suppression value: it satisfies no threshold comparison.

/// Window size = ceil(lookback), clamped to >= 1.
pub fn window_size(lookback: f64) -> usize {
    lookback.ceil().max(1.0) as usize
}

pub fn compute_zscores(lookback: f64, spreads: &[f64]) -> Vec<f64> {
    let window = window_size(lookback);
    let warmup = window.saturating_sub(1);
    let mut zscores = Vec::with_capacity(spreads.len());

    for i in 0..spreads.len() {
        // Sample stddev over a single observation is undefined.
        if i < warmup || window < 2 {
            zscores.push(f64::NAN);
            continue;
        }

        let slice = &spreads[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .map(|s| {
                let diff = s - mean;
                diff * diff
            })
            .sum::<f64>()
            / (window - 1) as f64;
        let std = variance.sqrt();

        if std == 0.0 {
            zscores.push(f64::NAN);
        } else {
            zscores.push((spreads[i] - mean) / std);
        }
    }

    zscores
}
