//! Normalization rules for the `limit` query parameter of the history endpoint.

use serde::Serialize;

/// Number of history rows to return, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryLimit(u32);

impl HistoryLimit {
    pub const DEFAULT: u32 = 10;
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;

    /// Normalizes a raw query value.
    ///
    /// Absent, blank or non-finite input yields the default. Finite numbers are
    /// clamped to the allowed range and truncated toward zero. Malformed input
    /// is never rejected.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .map_or_else(Self::default, Self::clamped)
    }

    /// Clamps a number into range. NaN and infinities yield the default.
    pub fn clamped(n: f64) -> Self {
        if !n.is_finite() {
            return Self::default();
        }
        let bounded = n.clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        Self(bounded.trunc() as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<HistoryLimit> for u32 {
    fn from(limit: HistoryLimit) -> Self {
        limit.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(raw: Option<&str>) -> u32 {
        HistoryLimit::from_query(raw).get()
    }

    #[test]
    fn absent_defaults_to_ten() {
        assert_eq!(limit(None), 10);
        assert_eq!(limit(Some("")), 10);
        assert_eq!(limit(Some("   ")), 10);
    }

    #[test]
    fn non_numeric_defaults_to_ten() {
        assert_eq!(limit(Some("abc")), 10);
        assert_eq!(limit(Some("12abc")), 10);
        assert_eq!(limit(Some("NaN")), 10);
        assert_eq!(limit(Some("inf")), 10);
        assert_eq!(limit(Some("-Infinity")), 10);
    }

    #[test]
    fn in_range_values_pass_through() {
        for n in 1..=50 {
            assert_eq!(limit(Some(&n.to_string())), n);
        }
    }

    #[test]
    fn out_of_range_values_clamp_to_nearest_bound() {
        assert_eq!(limit(Some("999")), 50);
        assert_eq!(limit(Some("51")), 50);
        assert_eq!(limit(Some("1e3")), 50);
        assert_eq!(limit(Some("0")), 1);
        assert_eq!(limit(Some("-5")), 1);
    }

    #[test]
    fn clamped_rejects_non_finite_numbers() {
        assert_eq!(HistoryLimit::clamped(f64::NAN).get(), 10);
        assert_eq!(HistoryLimit::clamped(f64::INFINITY).get(), 10);
        assert_eq!(HistoryLimit::clamped(f64::NEG_INFINITY).get(), 10);
        assert_eq!(HistoryLimit::clamped(7.0).get(), 7);
    }

    #[test]
    fn fractions_truncate_after_clamping() {
        assert_eq!(limit(Some("3.7")), 3);
        assert_eq!(limit(Some("0.5")), 1);
        assert_eq!(limit(Some("50.9")), 50);
    }
}
