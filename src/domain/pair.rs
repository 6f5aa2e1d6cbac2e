//! Cointegrated pair identity and upstream cointegration parameters.

use std::fmt;

/// Ordered pair of ticker ids identifying a tradable relationship.
///
/// The independent ticker is scaled by the hedge ratio; the dependent
/// ticker is the one the spread is quoted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub indep: String,
    pub dep: String,
}

impl PairKey {
    pub fn new(indep: impl Into<String>, dep: impl Into<String>) -> Self {
        Self {
            indep: indep.into(),
            dep: dep.into(),
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.indep, self.dep)
    }
}

/// Per-pair parameters supplied by an upstream cointegration component.
///
/// `lookback` is a real value; it is rounded up to an integer window
/// size before the rolling statistics are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CointegrationResult {
    pub hedge_ratio: f64,
    pub lookback: f64,
    pub spreads: Vec<f64>,
}
