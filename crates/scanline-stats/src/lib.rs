//! scanline-stats - Statistical tests for survey comparison
//!
//! This crate provides the hypothesis tests the comparison pipeline selects
//! between, plus the summary aggregates used by the exports:
//!
//! - **Shapiro-Wilk**: normality test (AS R94), gates the test selection
//! - **Paired t-test**: parametric test for normally distributed differences
//! - **Wilcoxon signed-rank**: nonparametric fallback
//! - **SummaryStats**: count/mean/std/min/max aggregates
//!
//! Every test returns `Result<TestResult, StatsError>` so callers inspect an
//! explicit success-with-value or failed-with-reason outcome instead of
//! catching panics or sentinel values.

pub mod shapiro;
pub mod summary;
pub mod ttest;
pub mod wilcoxon;

pub use shapiro::*;
pub use summary::*;
pub use ttest::*;
pub use wilcoxon::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a completed hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test statistic (W, t, or T depending on the test)
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Reasons a test can fail to run
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Too few samples: need at least {needed}, got {got}")]
    TooFewSamples { needed: usize, got: usize },

    #[error("Too many samples: limit {limit}, got {got}")]
    TooManySamples { limit: usize, got: usize },

    #[error("Paired inputs differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Sample range is zero or not finite")]
    ZeroRange,

    #[error("All paired differences are zero")]
    AllZeroDifferences,

    #[error("Distribution setup failed: {0}")]
    Distribution(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
