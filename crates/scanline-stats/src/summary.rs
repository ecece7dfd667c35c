//! Summary statistics for error aggregates

use serde::{Deserialize, Serialize};

/// Count/mean/std/min/max aggregate over a numeric series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator, NaN for count < 2)
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data, ignoring non-finite values
    pub fn from_data(data: &[f64]) -> Self {
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if finite.is_empty() {
            return Self {
                count: 0,
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let ss: f64 = finite.iter().map(|x| (x - mean) * (x - mean)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            min,
            max,
            mean,
            std_dev,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
        assert!((stats.range() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of [2, 4, 4, 4, 5, 5, 7, 9] is 32/7.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SummaryStats::from_data(&data);
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let stats = SummaryStats::from_data(&[3.5]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 3.5);
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let data = [1.0, 2.0, f64::NAN, 4.0, 5.0];
        let stats = SummaryStats::from_data(&data);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_empty_input() {
        let stats = SummaryStats::from_data(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
    }
}
