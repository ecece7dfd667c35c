//! Shapiro-Wilk normality test
//!
//! Implements Royston's AS R94 approximation, valid for 3 <= n <= 5000:
//! Blom scores from the standard normal inverse CDF, polynomial-corrected
//! weights for the two extreme order statistics, and the three p-value
//! regimes (exact arcsine form at n = 3, a log-gamma transform for
//! 4 <= n <= 11, a lognormal transform for n >= 12).

use statrs::distribution::{ContinuousCDF, Normal};

use crate::{StatsError, StatsResult, TestResult};

/// Upper sample-size limit of the AS R94 approximation
pub const SHAPIRO_MAX_SAMPLES: usize = 5000;

// Royston's polynomial coefficients, lowest order first.
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

// Reported when W is too far from 1 for the small-sample transform.
const SMALL_P: f64 = 1e-99;

fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Test the null hypothesis that `data` was drawn from a normal distribution.
///
/// Returns the W statistic and its p-value. Errors on fewer than 3 samples,
/// more than [`SHAPIRO_MAX_SAMPLES`], or a degenerate (constant) sample.
pub fn shapiro_wilk(data: &[f64]) -> StatsResult<TestResult> {
    let n = data.len();
    if n < 3 {
        return Err(StatsError::TooFewSamples { needed: 3, got: n });
    }
    if n > SHAPIRO_MAX_SAMPLES {
        return Err(StatsError::TooManySamples {
            limit: SHAPIRO_MAX_SAMPLES,
            got: n,
        });
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let range = x[n - 1] - x[0];
    if range <= 0.0 || !range.is_finite() {
        return Err(StatsError::ZeroRange);
    }

    let normal = Normal::standard();
    let an = n as f64;
    let half = n / 2;

    // Weights for the lower half of the order statistics. By antisymmetry the
    // upper half mirrors them with opposite sign; the middle weight of an odd
    // sample is zero.
    let mut a = vec![0.0f64; half];
    if n == 3 {
        a[0] = std::f64::consts::FRAC_1_SQRT_2;
    } else {
        let an25 = an + 0.25;
        let mut summ2 = 0.0;
        for (i, slot) in a.iter_mut().enumerate() {
            *slot = normal.inverse_cdf((i as f64 + 1.0 - 0.375) / an25);
            summ2 += *slot * *slot;
        }
        summ2 *= 2.0;
        let ssumm2 = summ2.sqrt();
        let rsn = 1.0 / an.sqrt();
        let a1 = poly(&C1, rsn) - a[0] / ssumm2;

        let (i1, fac) = if n > 5 {
            let a2 = -a[1] / ssumm2 + poly(&C2, rsn);
            let fac = ((summ2 - 2.0 * a[0] * a[0] - 2.0 * a[1] * a[1])
                / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
                .sqrt();
            a[1] = a2;
            (2, fac)
        } else {
            let fac = ((summ2 - 2.0 * a[0] * a[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
            (1, fac)
        };
        a[0] = a1;
        // Remaining scores are negative; flip them into positive weights.
        for slot in a.iter_mut().skip(i1) {
            *slot = -*slot / fac;
        }
    }

    // W = (sum a_i (x_(n+1-i) - x_(i)))^2 / (sum a^2 * sum (x - mean)^2)
    let mean = x.iter().sum::<f64>() / an;
    let mut num = 0.0;
    let mut ssa = 0.0;
    for (k, &w) in a.iter().enumerate() {
        num += w * (x[n - 1 - k] - x[k]);
        ssa += 2.0 * w * w;
    }
    let ssx: f64 = x.iter().map(|v| (v - mean) * (v - mean)).sum();
    let w_stat = ((num * num) / (ssa * ssx)).min(1.0);

    let p_value = if n == 3 {
        let pi6 = 6.0 / std::f64::consts::PI;
        let stqr = 0.75f64.sqrt().asin();
        (pi6 * (w_stat.sqrt().asin() - stqr)).clamp(0.0, 1.0)
    } else {
        let y = (1.0 - w_stat).ln();
        let (m, s, y) = if n <= 11 {
            let gamma = poly(&G, an);
            if y >= gamma {
                // W too far from 1 for the transform to be defined.
                return Ok(TestResult {
                    statistic: w_stat,
                    p_value: SMALL_P,
                });
            }
            (poly(&C3, an), poly(&C4, an).exp(), -(gamma - y).ln())
        } else {
            let log_n = an.ln();
            (poly(&C5, log_n), poly(&C6, log_n).exp(), y)
        };
        (1.0 - normal.cdf((y - m) / s)).clamp(0.0, 1.0)
    };

    Ok(TestResult {
        statistic: w_stat,
        p_value,
    })
}
