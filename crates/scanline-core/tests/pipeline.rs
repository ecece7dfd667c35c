//! End-to-end flow over a minimal survey file

use std::io::Write;

use scanline_core::{compare, export_results, SUMMARY_NAME, WORKBOOK_NAME};
use scanline_io::load_inputs;

#[test]
fn minimal_survey_flow() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"VAR,Dip_dir,dip,plano\nA,120,30,1\nA,125,28,1\nB,200,60,4\n")
        .unwrap();

    let inputs = load_inputs(file.path().to_str().unwrap(), None, 42).unwrap();
    let rows = compare(&inputs.field, &inputs.estimates).unwrap();

    // Two configs, three synthetic methods each; config A matches plane 1,
    // config B plane 4.
    assert_eq!(rows.len(), 6);
    assert!(rows
        .iter()
        .all(|r| r.n_measurements >= 1 && r.dip_error >= 0.0 && r.dip_dir_error >= 0.0));
    let plane_1 = rows.iter().find(|r| r.plane == 1).unwrap();
    assert_eq!(plane_1.n_measurements, 2);
    assert!((plane_1.dip_field - 29.0).abs() < 1e-12);

    let dir = tempfile::tempdir().unwrap();
    let (workbook, summary) = export_results(&rows, dir.path()).unwrap();
    assert!(workbook.ends_with(WORKBOOK_NAME) && workbook.exists());
    assert!(summary.ends_with(SUMMARY_NAME) && summary.exists());
}

#[test]
fn same_seed_same_rows() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"VAR,Dip_dir,dip,plano\nA,120,30,1\nB,200,60,4\n")
        .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let first = load_inputs(&path, None, 7).unwrap();
    let second = load_inputs(&path, None, 7).unwrap();
    assert_eq!(
        compare(&first.field, &first.estimates).unwrap(),
        compare(&second.field, &second.estimates).unwrap()
    );
}
