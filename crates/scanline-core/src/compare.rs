//! Field vs. method comparison and per-group significance testing

use scanline_io::plane_code::PLANE_IDS;
use scanline_io::survey::{FieldMeasurement, MethodEstimate};
use scanline_stats::{paired_t, shapiro_wilk, wilcoxon_signed_rank, TestResult};
use tracing::info;

use crate::error::{CompareError, CompareResult};
use crate::row::ComparisonRow;

/// Tuning knobs for the statistical summary
#[derive(Clone, Copy, Debug)]
pub struct CompareConfig {
    /// Significance threshold for the normality gate
    pub alpha: f64,
    /// Minimum group size before any test is attempted
    pub min_group: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            min_group: 3,
        }
    }
}

/// Which test produced (or failed to produce) a group's result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestKind {
    PairedT,
    Wilcoxon,
    WilcoxonFailed,
}

impl TestKind {
    pub fn label(&self) -> &'static str {
        match self {
            TestKind::PairedT => "paired t",
            TestKind::Wilcoxon => "Wilcoxon",
            TestKind::WilcoxonFailed => "Wilcoxon (failed)",
        }
    }
}

/// Outcome for one (plane, method) group
#[derive(Clone, Debug, PartialEq)]
pub enum TestReport {
    /// Fewer than `min_group` rows; no test attempted
    Insufficient,
    /// A test ran (or its failure was recorded as NaN under
    /// [`TestKind::WilcoxonFailed`])
    Tested {
        kind: TestKind,
        statistic: f64,
        p_value: f64,
    },
}

/// Per-method entry of a plane's summary
#[derive(Clone, Debug, PartialEq)]
pub struct MethodTest {
    pub method: String,
    pub n: usize,
    pub report: TestReport,
}

/// Summary of one plane group, methods in first-appearance order
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSummary {
    pub plane: i8,
    pub entries: usize,
    pub methods: Vec<MethodTest>,
}

/// Build the comparison table and log the per-group statistical summary.
///
/// Fails with [`CompareError::EmptyInput`] when either table is empty and
/// with [`CompareError::NoComparableData`] when no (config, plane, method)
/// combination has matching field readings.
pub fn compare(
    field: &[FieldMeasurement],
    estimates: &[MethodEstimate],
) -> CompareResult<Vec<ComparisonRow>> {
    let rows = build_rows(field, estimates)?;
    log_summary(&summarize(&rows, &CompareConfig::default()));
    Ok(rows)
}

fn build_rows(
    field: &[FieldMeasurement],
    estimates: &[MethodEstimate],
) -> CompareResult<Vec<ComparisonRow>> {
    if field.is_empty() || estimates.is_empty() {
        return Err(CompareError::EmptyInput);
    }

    let mut rows = Vec::new();

    for var in distinct(field.iter().map(|m| &m.var)) {
        let config_rows: Vec<&FieldMeasurement> =
            field.iter().filter(|m| &m.var == var).collect();

        // Config matching is case-insensitive: the estimate table keys on
        // the lower-cased identifier.
        let lower = var.to_lowercase();
        let subset: Vec<&MethodEstimate> =
            estimates.iter().filter(|e| e.config == lower).collect();

        for method in distinct(subset.iter().map(|e| &e.method)) {
            let method_rows: Vec<&&MethodEstimate> =
                subset.iter().filter(|e| &e.method == method).collect();

            // The estimate table has no plane dimension, so the method-side
            // means cover the whole (config, method) subset while the
            // field-side means below are plane-filtered. Preserved as-is.
            let dip_method = mean(method_rows.iter().map(|e| e.mean_dip_error));
            let dip_dir_method = mean(method_rows.iter().map(|e| e.mean_dip_dir_error));

            for plane in PLANE_IDS {
                let selection: Vec<&&FieldMeasurement> =
                    config_rows.iter().filter(|m| m.plane == plane).collect();
                if selection.is_empty() {
                    continue;
                }

                rows.push(ComparisonRow {
                    config: var.clone(),
                    plane,
                    method: method.clone(),
                    dip_field: mean(selection.iter().map(|m| m.dip)),
                    dip_dir_field: mean(selection.iter().map(|m| m.dip_dir)),
                    dip_method,
                    dip_dir_method,
                    n_measurements: selection.len(),
                    dip_error: 0.0,
                    dip_dir_error: 0.0,
                });
            }
        }
    }

    if rows.is_empty() {
        return Err(CompareError::NoComparableData);
    }

    for row in &mut rows {
        row.dip_error = (row.dip_field - row.dip_method).abs();
        row.dip_dir_error = (row.dip_dir_field - row.dip_dir_method).abs();
    }

    Ok(rows)
}

/// Run the normality-gated significance tests per (plane, method) group.
///
/// Groups are visited in first-appearance order. A Shapiro-Wilk failure
/// forces the nonparametric branch (p treated as 0); a Wilcoxon failure is
/// recorded as NaN under its own label, never propagated.
pub fn summarize(rows: &[ComparisonRow], config: &CompareConfig) -> Vec<PlaneSummary> {
    let mut summaries = Vec::new();

    for plane in distinct(rows.iter().map(|r| &r.plane)) {
        let group: Vec<&ComparisonRow> = rows.iter().filter(|r| r.plane == *plane).collect();

        let mut methods = Vec::new();
        for method in distinct(group.iter().map(|r| &r.method)) {
            let md: Vec<&&ComparisonRow> =
                group.iter().filter(|r| &r.method == method).collect();

            let report = if md.len() < config.min_group {
                TestReport::Insufficient
            } else {
                let field_side: Vec<f64> = md.iter().map(|r| r.dip_field).collect();
                let method_side: Vec<f64> = md.iter().map(|r| r.dip_method).collect();
                let diffs: Vec<f64> = field_side
                    .iter()
                    .zip(&method_side)
                    .map(|(a, b)| a - b)
                    .collect();

                let p_norm = shapiro_wilk(&diffs).map(|r| r.p_value).unwrap_or(0.0);

                let (kind, result) = if p_norm > config.alpha {
                    match paired_t(&field_side, &method_side) {
                        Ok(r) => (TestKind::PairedT, r),
                        Err(_) => (TestKind::PairedT, undefined()),
                    }
                } else {
                    match wilcoxon_signed_rank(&field_side, &method_side) {
                        Ok(r) => (TestKind::Wilcoxon, r),
                        Err(_) => (TestKind::WilcoxonFailed, undefined()),
                    }
                };

                TestReport::Tested {
                    kind,
                    statistic: result.statistic,
                    p_value: result.p_value,
                }
            };

            methods.push(MethodTest {
                method: method.clone(),
                n: md.len(),
                report,
            });
        }

        summaries.push(PlaneSummary {
            plane: *plane,
            entries: group.len(),
            methods,
        });
    }

    summaries
}

fn log_summary(summaries: &[PlaneSummary]) {
    info!("=== Statistical summary (per plane/method) ===");
    for summary in summaries {
        info!("Plane {}: {} entries", summary.plane, summary.entries);
        for test in &summary.methods {
            match &test.report {
                TestReport::Insufficient => {
                    info!(
                        "  {}: n={} (insufficient for robust testing)",
                        test.method, test.n
                    );
                }
                TestReport::Tested { kind, p_value, .. } => {
                    info!(
                        "  {}: {}, p={:.4} (n={})",
                        test.method,
                        kind.label(),
                        p_value,
                        test.n
                    );
                }
            }
        }
    }
}

fn undefined() -> TestResult {
    TestResult {
        statistic: f64::NAN,
        p_value: f64::NAN,
    }
}

/// Distinct values in first-seen order
fn distinct<'a, T: PartialEq>(values: impl Iterator<Item = &'a T>) -> Vec<&'a T> {
    let mut seen: Vec<&T> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(var: &str, dip_dir: f64, dip: f64, plane: i8) -> FieldMeasurement {
        FieldMeasurement {
            var: var.to_string(),
            dip_dir,
            dip,
            plane,
        }
    }

    fn estimate(config: &str, method: &str, dip_err: f64, dip_dir_err: f64) -> MethodEstimate {
        MethodEstimate {
            config: config.to_string(),
            method: method.to_string(),
            mean_dip_error: dip_err,
            mean_dip_dir_error: dip_dir_err,
        }
    }

    fn worked_example() -> (Vec<FieldMeasurement>, Vec<MethodEstimate>) {
        let field = vec![
            reading("A", 120.0, 30.0, 1),
            reading("A", 125.0, 28.0, 1),
            reading("B", 200.0, 60.0, 4),
        ];
        let estimates = vec![
            estimate("a", "M1", 10.0, 20.0),
            estimate("b", "M1", 15.0, 25.0),
        ];
        (field, estimates)
    }

    #[test]
    fn test_worked_example() {
        let (field, estimates) = worked_example();
        let rows = compare(&field, &estimates).unwrap();

        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].config, "A");
        assert_eq!(rows[0].plane, 1);
        assert_eq!(rows[0].method, "M1");
        assert_eq!(rows[0].n_measurements, 2);
        assert!((rows[0].dip_field - 29.0).abs() < 1e-12);
        assert!((rows[0].dip_dir_field - 122.5).abs() < 1e-12);
        assert!((rows[0].dip_method - 10.0).abs() < 1e-12);
        assert!((rows[0].dip_error - 19.0).abs() < 1e-12);

        assert_eq!(rows[1].config, "B");
        assert_eq!(rows[1].plane, 4);
        assert_eq!(rows[1].n_measurements, 1);
        assert!((rows[1].dip_field - 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_fail() {
        let (field, estimates) = worked_example();
        assert_eq!(compare(&[], &estimates).unwrap_err(), CompareError::EmptyInput);
        assert_eq!(compare(&field, &[]).unwrap_err(), CompareError::EmptyInput);
    }

    #[test]
    fn test_no_intersection_fails() {
        let field = vec![reading("A", 120.0, 30.0, 1)];
        let estimates = vec![estimate("zz", "M1", 10.0, 20.0)];
        assert_eq!(
            compare(&field, &estimates).unwrap_err(),
            CompareError::NoComparableData
        );
    }

    #[test]
    fn test_unclassified_readings_never_match() {
        // plane 0 is outside the fixed plane set.
        let field = vec![reading("A", 120.0, 30.0, 0)];
        let estimates = vec![estimate("a", "M1", 10.0, 20.0)];
        assert_eq!(
            compare(&field, &estimates).unwrap_err(),
            CompareError::NoComparableData
        );
    }

    #[test]
    fn test_config_matching_is_case_insensitive() {
        let field = vec![reading("SiteA", 120.0, 30.0, 2)];
        let estimates = vec![estimate("sitea", "M1", 10.0, 20.0)];
        let rows = compare(&field, &estimates).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].config, "SiteA");
    }

    #[test]
    fn test_errors_are_nonnegative_and_counts_positive() {
        let (field, estimates) = worked_example();
        for row in compare(&field, &estimates).unwrap() {
            assert!(row.n_measurements >= 1);
            assert!(row.dip_error >= 0.0);
            assert!(row.dip_dir_error >= 0.0);
        }
    }

    #[test]
    fn test_compare_is_idempotent() {
        let (field, estimates) = worked_example();
        let first = compare(&field, &estimates).unwrap();
        let second = compare(&field, &estimates).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_method_side_mean_covers_whole_subset() {
        // Two estimate rows for the same (config, method): the method-side
        // value is their mean in every emitted row, regardless of plane.
        let field = vec![
            reading("A", 100.0, 30.0, 1),
            reading("A", 110.0, 50.0, 2),
        ];
        let estimates = vec![
            estimate("a", "M1", 10.0, 40.0),
            estimate("a", "M1", 20.0, 60.0),
        ];
        let rows = compare(&field, &estimates).unwrap();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!((row.dip_method - 15.0).abs() < 1e-12);
            assert!((row.dip_dir_method - 50.0).abs() < 1e-12);
        }
    }

    fn rows_for_summary(n: usize, dip_values: &[f64], dip_method: f64) -> Vec<ComparisonRow> {
        (0..n)
            .map(|i| ComparisonRow {
                config: format!("c{i}"),
                plane: 1,
                method: "M1".to_string(),
                dip_field: dip_values[i],
                dip_dir_field: 100.0,
                dip_method,
                dip_dir_method: 50.0,
                n_measurements: 1,
                dip_error: (dip_values[i] - dip_method).abs(),
                dip_dir_error: 50.0,
            })
            .collect()
    }

    #[test]
    fn test_small_group_is_insufficient() {
        let rows = rows_for_summary(2, &[30.0, 35.0], 10.0);
        let summaries = summarize(&rows, &CompareConfig::default());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].plane, 1);
        assert_eq!(summaries[0].methods.len(), 1);
        assert_eq!(summaries[0].methods[0].n, 2);
        assert_eq!(summaries[0].methods[0].report, TestReport::Insufficient);
    }

    #[test]
    fn test_normal_differences_take_paired_t() {
        // Spread-out differences pass the normality gate.
        let rows = rows_for_summary(5, &[28.0, 31.0, 29.5, 30.5, 27.0], 10.0);
        let summaries = summarize(&rows, &CompareConfig::default());
        match &summaries[0].methods[0].report {
            TestReport::Tested { kind, p_value, .. } => {
                assert_eq!(*kind, TestKind::PairedT);
                assert!(*p_value < 0.05);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_constant_zero_differences_report_undefined() {
        // dip_field == dip_method everywhere: Shapiro cannot run (zero
        // range, p treated as 0) and Wilcoxon sees all-zero differences.
        let rows = rows_for_summary(4, &[10.0, 10.0, 10.0, 10.0], 10.0);
        let summaries = summarize(&rows, &CompareConfig::default());
        match &summaries[0].methods[0].report {
            TestReport::Tested {
                kind,
                statistic,
                p_value,
            } => {
                assert_eq!(*kind, TestKind::WilcoxonFailed);
                assert!(statistic.is_nan());
                assert!(p_value.is_nan());
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_constant_nonzero_differences_fall_back_to_wilcoxon() {
        // Zero-variance but nonzero differences: the normality gate fails,
        // the rank test still runs.
        let rows = rows_for_summary(4, &[25.0, 25.0, 25.0, 25.0], 10.0);
        let summaries = summarize(&rows, &CompareConfig::default());
        match &summaries[0].methods[0].report {
            TestReport::Tested { kind, p_value, .. } => {
                assert_eq!(*kind, TestKind::Wilcoxon);
                assert!(p_value.is_finite());
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_summary_groups_follow_first_appearance_order() {
        let mut rows = rows_for_summary(3, &[30.0, 31.0, 32.0], 10.0);
        let mut plane4 = rows_for_summary(3, &[60.0, 61.0, 62.0], 20.0);
        for row in &mut plane4 {
            row.plane = 4;
        }
        // Plane 4 appears first in the table.
        plane4.append(&mut rows);
        let summaries = summarize(&plane4, &CompareConfig::default());
        assert_eq!(summaries[0].plane, 4);
        assert_eq!(summaries[1].plane, 1);
    }
}
