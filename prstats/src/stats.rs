use prstats_common::{PrStatsError, Result};

use crate::config::{PERCENTILE_METHOD, STD_DEV_DENOMINATOR};

/// How a percentile rank is turned into a value of the sorted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentileMethod {
    /// Rank `p/100 * (n - 1)`, interpolating linearly between its neighbours.
    Linear,
    /// Element at index `ceil(p/100 * n) - 1`.
    NearestRank,
}

impl PercentileMethod {
    /// Value at rank `p` (clamped to `0..=100`) of an ascending, non-empty slice.
    pub fn value_at(&self, sorted: &[i64], p: f64) -> f64 {
        let p = p.clamp(0.0, 100.0);
        let n = sorted.len();
        match self {
            PercentileMethod::Linear => {
                // Multiply before dividing so integral ranks stay exact.
                let rank = p * (n - 1) as f64 / 100.0;
                let lo = rank.floor() as usize;
                let hi = (rank.ceil() as usize).min(n - 1);
                let frac = rank - lo as f64;
                sorted[lo] as f64 + (sorted[hi] - sorted[lo]) as f64 * frac
            }
            PercentileMethod::NearestRank => {
                let idx = ((p * n as f64 / 100.0).ceil() as usize).saturating_sub(1);
                sorted[idx.min(n - 1)] as f64
            }
        }
    }
}

/// Divisor used for the variance behind `standard_deviation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdDevDenominator {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1`; a single value has zero deviation.
    Sample,
}

impl StdDevDenominator {
    fn divisor(&self, n: usize) -> Option<f64> {
        match self {
            StdDevDenominator::Population => Some(n as f64),
            StdDevDenominator::Sample if n > 1 => Some((n - 1) as f64),
            StdDevDenominator::Sample => None,
        }
    }
}

/// Descriptive statistics over a non-empty sample of day counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Ascending copy of the sample.
    sorted: Vec<i64>,
    mean: f64,
    median: f64,
    standard_deviation: f64,
    percentile_method: PercentileMethod,
}

impl Stats {
    /// Summarise `sample` using the workspace's standard conventions.
    pub fn new(sample: &[i64]) -> Result<Self> {
        Self::with_conventions(sample, PERCENTILE_METHOD, STD_DEV_DENOMINATOR)
    }

    pub fn with_conventions(
        sample: &[i64],
        percentile_method: PercentileMethod,
        denominator: StdDevDenominator,
    ) -> Result<Self> {
        if sample.is_empty() {
            return Err(PrStatsError::EmptySample);
        }
        let mut sorted = sample.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let mean = sorted.iter().sum::<i64>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
        };
        let squared_error: f64 = sorted.iter().map(|&x| (x as f64 - mean).powi(2)).sum();
        let standard_deviation = denominator
            .divisor(n)
            .map_or(0.0, |d| (squared_error / d).sqrt());

        Ok(Self {
            sorted,
            mean,
            median,
            standard_deviation,
            percentile_method,
        })
    }

    pub fn count(&self) -> usize {
        self.sorted.len()
    }

    pub fn min(&self) -> i64 {
        self.sorted[0]
    }

    pub fn max(&self) -> i64 {
        self.sorted[self.sorted.len() - 1]
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    /// Whole days at or below which `p` percent of the sample falls.
    pub fn value_from_percentile(&self, p: u32) -> i64 {
        self.percentile_method.value_at(&self.sorted, p as f64).floor() as i64
    }

    /// Percentage of the sample merged within `value` days.
    pub fn percentile_from_value(&self, value: i64) -> Result<u32> {
        percentile_from_value(&self.sorted, value)
    }
}

/// Percentage (0–100) of an ascending slice that is `<= value`.
///
/// Rounded up, never truncated: one or more values at or below `value` yield at
/// least 1%, and only a `value` at or above the maximum yields 100%.
pub fn percentile_from_value(sorted: &[i64], value: i64) -> Result<u32> {
    if sorted.is_empty() {
        return Err(PrStatsError::EmptySample);
    }
    let n = sorted.len();
    let at_or_below = sorted.partition_point(|&x| x <= value);
    Ok(((at_or_below * 100 + n - 1) / n) as u32)
}
