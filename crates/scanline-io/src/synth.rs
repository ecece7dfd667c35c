//! Synthetic method-estimate generation
//!
//! Stands in for real plane-detection output when none is supplied. The
//! generated table has one row per (config, method) pair with mean errors
//! drawn uniformly from the documented placeholder ranges; a fixed seed makes
//! the table reproducible.

use crate::survey::MethodEstimate;

/// The plane-detection methods the comparison covers
pub const METHOD_NAMES: [&str; 3] = ["DSE_Antes", "DSE_Depois", "RANSAC"];

/// Placeholder mean dip error range, degrees
const DIP_ERROR_RANGE: (f64, f64) = (5.0, 30.0);
/// Placeholder mean dip-direction error range, degrees
const DIP_DIR_ERROR_RANGE: (f64, f64) = (0.0, 150.0);

/// Build a synthetic estimate table covering every (config, method) pair.
///
/// `configs` must already be lower-cased (see
/// [`crate::survey::distinct_configs`]); rows come out config-major in the
/// given order.
pub fn synthetic_estimates(configs: &[String], seed: u64) -> Vec<MethodEstimate> {
    let mut rng = SimpleRng::new(seed);
    let mut estimates = Vec::with_capacity(configs.len() * METHOD_NAMES.len());

    for config in configs {
        for method in METHOD_NAMES {
            estimates.push(MethodEstimate {
                config: config.clone(),
                method: method.to_string(),
                mean_dip_error: rng.uniform(DIP_ERROR_RANGE.0, DIP_ERROR_RANGE.1),
                mean_dip_dir_error: rng.uniform(DIP_DIR_ERROR_RANGE.0, DIP_DIR_ERROR_RANGE.1),
            });
        }
    }

    estimates
}

/// Splitmix-style PRNG, deterministic under a fixed seed
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E3779B97F4A7C15),
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_every_pair() {
        let configs = vec!["a".to_string(), "b".to_string()];
        let estimates = synthetic_estimates(&configs, 7);
        assert_eq!(estimates.len(), 6);
        assert_eq!(estimates[0].config, "a");
        assert_eq!(estimates[0].method, "DSE_Antes");
        assert_eq!(estimates[5].config, "b");
        assert_eq!(estimates[5].method, "RANSAC");
    }

    #[test]
    fn test_values_within_placeholder_ranges() {
        let configs = vec!["a".to_string(); 5];
        for e in synthetic_estimates(&configs, 11) {
            assert!(e.mean_dip_error >= 5.0 && e.mean_dip_error < 30.0);
            assert!(e.mean_dip_dir_error >= 0.0 && e.mean_dip_dir_error < 150.0);
        }
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let configs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            synthetic_estimates(&configs, 42),
            synthetic_estimates(&configs, 42)
        );
    }
}
