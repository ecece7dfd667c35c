//! Paired t-test

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::{StatsError, StatsResult, TestResult};

/// Two-sided paired t-test between two related samples.
///
/// t = mean(d) / (sd(d) / sqrt(n)) with sample standard deviation and
/// n - 1 degrees of freedom. A zero-variance difference series follows IEEE
/// arithmetic: a nonzero mean yields an infinite statistic with p = 0, an
/// all-zero series yields NaN for both.
pub fn paired_t(x: &[f64], y: &[f64]) -> StatsResult<TestResult> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(StatsError::TooFewSamples { needed: 2, got: n });
    }

    let an = n as f64;
    let d: Vec<f64> = x.iter().zip(y).map(|(a, b)| a - b).collect();
    let mean = d.iter().sum::<f64>() / an;
    let var = d.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (an - 1.0);
    let se = (var / an).sqrt();

    let statistic = mean / se;
    let p_value = if statistic.is_nan() {
        f64::NAN
    } else if statistic.is_infinite() {
        0.0
    } else {
        let dist = StudentsT::new(0.0, 1.0, an - 1.0)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;
        (2.0 * (1.0 - dist.cdf(statistic.abs()))).clamp(0.0, 1.0)
    };

    Ok(TestResult { statistic, p_value })
}
