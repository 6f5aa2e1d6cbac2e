//! Spread model: the mean-reverting quantity being traded.

/// spread = dep_price - indep_price * hedge_ratio
pub fn spread(indep_price: f64, dep_price: f64, hedge_ratio: f64) -> f64 {
    dep_price - indep_price * hedge_ratio
}

/// Spread at every date, for two positionally aligned price series.
pub fn spread_series(indep: &[f64], dep: &[f64], hedge_ratio: f64) -> Vec<f64> {
    indep
        .iter()
        .zip(dep)
        .map(|(&i, &d)| spread(i, d, hedge_ratio))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_basic() {
        // 120 - 40 * 2.5 = 20
        assert!((spread(40.0, 120.0, 2.5) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spread_negative() {
        assert!((spread(50.0, 40.0, 1.0) - (-10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn spread_unit_hedge_ratio_equal_prices() {
        assert!((spread(100.0, 100.0, 1.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spread_series_pairs_elements() {
        let s = spread_series(&[10.0, 20.0, 30.0], &[15.0, 25.0, 35.0], 1.0);
        assert_eq!(s, vec![5.0, 5.0, 5.0]);
    }
}
