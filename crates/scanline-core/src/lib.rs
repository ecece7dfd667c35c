//! scanline-core - Comparison engine for discontinuity surveys
//!
//! Joins manual field measurements against automated plane-detection
//! estimates, computes per-row orientation error metrics, runs
//! normality-gated significance tests per (plane, method) group, and writes
//! the spreadsheet/CSV exports and (behind the `plots` feature) the PNG
//! plots.
//!
//! # Pipeline
//!
//! - [`compare`]: build the comparison table and log the statistical summary
//! - [`summarize`]: the per-group test reports `compare` logs, as data
//! - [`export_results`]: spreadsheet + grouped CSV
//! - [`render_plots`]: best-effort error and orientation plots

pub mod compare;
pub mod error;
pub mod export;
pub mod plot;
pub mod row;

pub use compare::*;
pub use error::*;
pub use export::*;
pub use plot::*;
pub use row::*;
