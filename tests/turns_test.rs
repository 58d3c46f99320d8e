use rfcoil::prelude::*;

fn model(diameter: f64, length: f64, wire: f64, frequency: f64) -> CoilModel {
    CoilModel::new(CoilGeometry::new(diameter, 10.0, length, wire, frequency, 0))
}

#[test]
fn test_inversion_matches_forward_calculation() {
    let mut m = model(100.0, 100.0, 2.0, 10.0);
    let found = m.solve_for_inductance(12.0).unwrap();
    let forward = CoilModel::new(m.geometry().with_turns(found.turns));
    assert!((forward.result().l_eff_s - 12.0).abs() < 1e-6);
    assert_eq!(forward.result(), m.result());
    assert!(found.iters > 0);
    assert!(found.fn_evals >= found.iters);
}

#[test]
fn test_inversion_failures_carry_codes() {
    let cases = [
        (model(10.0, 20.0, 5.0, 10.0), 1.0, 7),
        (model(400.0, 200.0, 4.0, 3.5), 40.0, 8),
        (model(100.0, 100.0, 2.0, 10.0), 0.5, 5),
        (model(100.0, 100.0, 2.0, 30.0), 20.0, 6),
    ];
    for (mut m, target, code) in cases {
        let err = m.solve_for_inductance(target).unwrap_err();
        assert_eq!(err.code(), code);
        assert_eq!(m.result().error_code, code);
        assert_eq!(m.result().error_msg, err.to_string());
    }
}

#[test]
fn test_scan_lines() {
    let tables = CoilTables::shared();
    let base = CoilGeometry::new(100.0, 10.0, 100.0, 2.0, 10.0, 0);
    let mut lines = Vec::new();
    for length in [60.0, 100.0, 140.0] {
        let mut m = CoilModel::with_tables(CoilGeometry { length, ..base }, tables.clone());
        let _ = m.solve_for_inductance(12.0);
        lines.push(csv_line(m.result(), LengthUnit::Centimeter));
    }
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(line.contains("rfcoil calc --diameter=100.000"));
    }
}
