//! Response-time samples and the budgets they are held to.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CheckError;

/// Millisecond samples in recording order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTimes {
    samples: Vec<f64>,
}

impl ResponseTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, millis: f64) {
        self.samples.push(millis);
    }

    pub fn push_duration(&mut self, elapsed: Duration) {
        self.push(elapsed.as_secs_f64() * 1000.0);
    }

    /// Runs `f`, recording how long it took.
    pub fn measure<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.push_duration(start.elapsed());
        out
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.samples.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    pub fn summary(&self) -> Option<Summary> {
        Summary::of_sorted(&self.sorted())
    }

    /// Summary with the single fastest and single slowest sample removed.
    /// `None` with fewer than three samples.
    pub fn trimmed(&self) -> Option<Summary> {
        let sorted = self.sorted();
        if sorted.len() < 3 {
            return None;
        }
        Summary::of_sorted(&sorted[1..sorted.len() - 1])
    }

    /// Summarizes the samples and holds them to `budget`.
    ///
    /// Warn-level limits are logged and reported but never fail the check.
    pub fn check(&self, budget: &Budget) -> Result<Report, CheckError> {
        let summary = self.summary().ok_or(CheckError::EmptySample)?;
        let trimmed = self.trimmed();

        let warnings = budget.warn.evaluate(&summary, trimmed.as_ref());
        for warning in &warnings {
            warn!(%warning, "response time above warning level");
        }

        let violations = budget.limits().evaluate(&summary, trimmed.as_ref());
        if violations.is_empty() {
            debug!(count = summary.count, average = summary.average, max = summary.max, "within budget");
            return Ok(Report {
                summary,
                trimmed,
                warnings,
            });
        }
        for violation in &violations {
            warn!(%violation, "response time budget exceeded");
        }
        Err(CheckError::BudgetExceeded(violations))
    }
}

impl FromIterator<f64> for ResponseTimes {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        ResponseTimes {
            samples: iter.into_iter().collect(),
        }
    }
}

impl Extend<f64> for ResponseTimes {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        self.samples.extend(iter);
    }
}

/// Aggregate of a non-empty [`ResponseTimes`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    /// Upper median: the sample at index `count / 2` in sorted order.
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    fn of_sorted(sorted: &[f64]) -> Option<Summary> {
        let (&min, &max) = (sorted.first()?, sorted.last()?);
        let total: f64 = sorted.iter().sum();
        Some(Summary {
            count: sorted.len(),
            total,
            average: total / sorted.len() as f64,
            median: sorted[sorted.len() / 2],
            min,
            max,
        })
    }

    /// Ratio of the slowest to the fastest sample; `None` when the fastest is 0.
    pub fn spread(&self) -> Option<f64> {
        (self.min > 0.0).then(|| self.max / self.min)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} avg={:.1}ms median={:.1}ms min={:.1}ms max={:.1}ms total={:.1}ms",
            self.count, self.average, self.median, self.min, self.max, self.total
        )?;
        if let Some(spread) = self.spread() {
            write!(f, " spread={spread:.2}")?;
        }
        Ok(())
    }
}

/// Outcome of a passing [`ResponseTimes::check`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: Summary,
    pub trimmed: Option<Summary>,
    pub warnings: Vec<BudgetViolation>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        if let Some(trimmed) = &self.trimmed {
            write!(f, "\ntrimmed: {trimmed}")?;
        }
        for warning in &self.warnings {
            write!(f, "\nwarning: {warning}")?;
        }
        Ok(())
    }
}

/// Strict upper limits on a [`Summary`]. Unset limits are not checked.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub max_average: Option<f64>,
    pub max_single: Option<f64>,
    pub max_total: Option<f64>,
    pub max_spread: Option<f64>,
    /// Applies to the trimmed summary; skipped below three samples.
    pub max_trimmed_spread: Option<f64>,
}

impl Limits {
    /// Lists every limit reached or exceeded.
    pub fn evaluate(&self, summary: &Summary, trimmed: Option<&Summary>) -> Vec<BudgetViolation> {
        let mut violations = Vec::new();
        let mut check = |metric, limit: Option<f64>, actual: f64| {
            if let Some(limit) = limit {
                if actual >= limit {
                    violations.push(BudgetViolation {
                        metric,
                        limit,
                        actual,
                    });
                }
            }
        };
        check(Metric::Average, self.max_average, summary.average);
        check(Metric::Single, self.max_single, summary.max);
        check(Metric::Total, self.max_total, summary.total);
        if let Some(spread) = summary.spread() {
            check(Metric::Spread, self.max_spread, spread);
        }
        if let Some(spread) = trimmed.and_then(Summary::spread) {
            check(Metric::TrimmedSpread, self.max_trimmed_spread, spread);
        }
        violations
    }
}

/// Failing limits plus a warn-only level.
///
/// ```toml
/// max_average = 6000.0
/// max_trimmed_spread = 4.0
/// warn = { max_single = 8000.0, max_trimmed_spread = 2.0 }
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Budget {
    pub max_average: Option<f64>,
    pub max_single: Option<f64>,
    pub max_total: Option<f64>,
    pub max_spread: Option<f64>,
    pub max_trimmed_spread: Option<f64>,
    pub warn: Limits,
}

impl Budget {
    pub fn single(limit: f64) -> Self {
        Budget {
            max_single: Some(limit),
            ..Budget::default()
        }
    }

    /// The failing level.
    pub fn limits(&self) -> Limits {
        Limits {
            max_average: self.max_average,
            max_single: self.max_single,
            max_total: self.max_total,
            max_spread: self.max_spread,
            max_trimmed_spread: self.max_trimmed_spread,
        }
    }

    pub fn evaluate(&self, summary: &Summary, trimmed: Option<&Summary>) -> Vec<BudgetViolation> {
        self.limits().evaluate(summary, trimmed)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    Average,
    Single,
    Total,
    Spread,
    TrimmedSpread,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Metric::Average => "average",
            Metric::Single => "slowest",
            Metric::Total => "total",
            Metric::Spread => "spread",
            Metric::TrimmedSpread => "trimmed spread",
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BudgetViolation {
    pub metric: Metric,
    pub limit: f64,
    pub actual: f64,
}

impl fmt::Display for BudgetViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.metric {
            metric @ (Metric::Spread | Metric::TrimmedSpread) => {
                write!(f, "{metric} {:.2} is not below {:.2}", self.actual, self.limit)
            }
            metric => write!(f, "{metric} {:.1}ms is not below {:.1}ms", self.actual, self.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_empty_is_none() {
        assert!(ResponseTimes::new().summary().is_none());
        assert!(ResponseTimes::new().trimmed().is_none());
        assert!(matches!(
            ResponseTimes::new().check(&Budget::single(500.0)),
            Err(CheckError::EmptySample)
        ));
    }

    #[test]
    fn test_summary() {
        let times: ResponseTimes = [120.0, 80.0, 100.0, 300.0].into_iter().collect();
        let summary = times.summary().unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, 600.0);
        assert_eq!(summary.average, 150.0);
        assert_eq!(summary.median, 120.0);
        assert_eq!(summary.min, 80.0);
        assert_eq!(summary.max, 300.0);
        assert_eq!(summary.spread(), Some(3.75));
    }

    #[test]
    fn test_median_of_odd_count() {
        let times: ResponseTimes = [900.0, 400.0, 1300.0, 500.0, 700.0].into_iter().collect();
        assert_eq!(times.summary().unwrap().median, 700.0);
    }

    #[test]
    fn test_trimmed_drops_fastest_and_slowest() {
        let times: ResponseTimes = [900.0, 400.0, 1300.0, 500.0, 700.0].into_iter().collect();
        let trimmed = times.trimmed().unwrap();
        assert_eq!(trimmed.count, 3);
        assert_eq!(trimmed.min, 500.0);
        assert_eq!(trimmed.max, 900.0);
        assert_eq!(trimmed.average, 700.0);
        assert_eq!(trimmed.spread(), Some(1.8));
    }

    #[test]
    fn test_trimmed_needs_three_samples() {
        let times: ResponseTimes = [100.0, 200.0].into_iter().collect();
        assert!(times.trimmed().is_none());
        let times: ResponseTimes = [100.0, 200.0, 300.0].into_iter().collect();
        assert_eq!(times.trimmed().unwrap().count, 1);
    }

    #[test]
    fn test_spread_undefined_for_zero_min() {
        let times: ResponseTimes = [0.0, 10.0].into_iter().collect();
        assert_eq!(times.summary().unwrap().spread(), None);
    }

    #[test]
    fn test_limits_are_strict() {
        let times: ResponseTimes = [500.0].into_iter().collect();
        let err = times.check(&Budget::single(500.0)).unwrap_err();
        match err {
            CheckError::BudgetExceeded(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].metric, Metric::Single);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(times.check(&Budget::single(500.5)).is_ok());
    }

    #[test]
    fn test_every_violation_reported() {
        let budget = Budget {
            max_average: Some(1000.0),
            max_single: Some(1500.0),
            max_spread: Some(3.0),
            ..Budget::default()
        };
        let times: ResponseTimes = [200.0, 1600.0, 1400.0].into_iter().collect();
        let summary = times.summary().unwrap();
        let metrics: Vec<Metric> = budget
            .evaluate(&summary, times.trimmed().as_ref())
            .iter()
            .map(|v| v.metric)
            .collect();
        assert_eq!(metrics, vec![Metric::Average, Metric::Single, Metric::Spread]);
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let budget = Budget {
            max_average: Some(6000.0),
            max_trimmed_spread: Some(4.0),
            warn: Limits {
                max_single: Some(8000.0),
                max_trimmed_spread: Some(2.0),
                ..Limits::default()
            },
            ..Budget::default()
        };
        // Trimmed to [1000, 1500, 2500]: spread 2.5.
        let times: ResponseTimes = [900.0, 1000.0, 1500.0, 2500.0, 8200.0].into_iter().collect();
        let report = times.check(&budget).unwrap();
        let metrics: Vec<Metric> = report.warnings.iter().map(|w| w.metric).collect();
        assert_eq!(metrics, vec![Metric::Single, Metric::TrimmedSpread]);
        assert!(report.to_string().contains("warning: trimmed spread 2.50 is not below 2.00"));
    }

    #[test]
    fn test_trimmed_spread_fails_past_hard_limit() {
        let budget = Budget {
            max_trimmed_spread: Some(4.0),
            ..Budget::default()
        };
        let times: ResponseTimes = [100.0, 500.0, 800.0, 2500.0, 3000.0].into_iter().collect();
        match times.check(&budget) {
            Err(CheckError::BudgetExceeded(violations)) => {
                assert_eq!(violations[0].metric, Metric::TrimmedSpread);
                assert_eq!(violations[0].actual, 5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_measure_records_sample() {
        let mut times = ResponseTimes::new();
        let out = times.measure(|| 7);
        assert_eq!(out, 7);
        assert_eq!(times.len(), 1);
        assert!(times.samples()[0] >= 0.0);
    }

    #[test]
    fn test_violation_message() {
        let violation = BudgetViolation {
            metric: Metric::Average,
            limit: 500.0,
            actual: 612.34,
        };
        assert_eq!(violation.to_string(), "average 612.3ms is not below 500.0ms");
    }
}
