use rfcoil::prelude::*;
use std::thread;

fn rel(calc: f64, exemplar: f64) -> f64 {
    ((calc - exemplar) / exemplar).abs()
}

fn small_coil() -> CoilGeometry {
    CoilGeometryBuilder::new()
        .diameter(100.0)
        .length(100.0)
        .wire_diameter(2.0)
        .build()
}

#[test]
fn test_default_coil() {
    // D = 400 mm, N = 10, l = 200 mm, d = 4 mm, f = 10 MHz: the coil is past
    // its self-resonance at 10 MHz, so the effective inductance is negative
    let model = CoilModel::new(CoilGeometry::default());
    let r = model.result();
    assert_eq!(r.error_code, 0, "{}", r.error_msg);
    assert!(rel(r.l_s, 43.4408) < 1e-4);
    assert!(rel(r.f_res, 6.7215) < 1e-4);
    assert!(r.l_eff_s < 0.0);
    assert_eq!(r.error_msg, "");
}

#[test]
fn test_small_coil() {
    let model = CoilModel::new(small_coil());
    let r = model.result();
    assert!(r.is_ok());
    assert!(rel(r.l_eff_s, 7.357802863094789) < 1e-5);
    assert!(rel(r.f_res, 31.899872392470744) < 1e-5);
    assert!(r.f_res > r.frequency);
    assert!(r.l_eff_s > r.l_s);
    assert_eq!(model.f_res().map(|f| Scale::Mega.scale(f)), Some(r.f_res));
}

#[test]
fn test_overlapping_turns() {
    let model = CoilModel::new(CoilGeometryBuilder::new().turns(51.0).build());
    let r = model.result();
    assert_eq!(r.error_code, 4);
    assert!(r.error_msg.contains("pitch"));
    assert_eq!(r.l_eff_s, 0.0);
    assert_eq!(r.f_res, 0.0);
    assert!(model.effective().is_none());
    assert!(model.f_res().is_none());
}

#[test]
fn test_lumped_reproduces_terminal_impedance() {
    let model = CoilModel::new(small_coil());
    let eff = model.effective().unwrap();
    let lumped = model.lumped().unwrap();
    let z_eff = eff.z();
    let z_lumped = lumped.z(Scale::Mega.unscale(model.geometry().frequency));
    assert!(rel(z_lumped.re, z_eff.re) < 1e-6);
    assert!(rel(z_lumped.im, z_eff.im) < 1e-9);
    assert_eq!(lumped.l_s, model.winding().unwrap().l_s);
}

#[test]
fn test_degraded_record_keeps_upstream_results() {
    let model = CoilModel::new(
        CoilGeometryBuilder::new()
            .turns(10.0)
            .wire_diameter(0.1)
            .frequency(10.0)
            .build(),
    );
    let r = model.result();
    assert_eq!(r.error_code, 2);
    assert!(!r.error_msg.is_empty());
    assert!(r.l_s > 0.0);
    assert!(r.phi > 0.0);
    assert_eq!(model.stage_errors(), &[CoilError::NoLumpedEquivalent]);
}

#[test]
fn test_concurrent_models() {
    let serial: Vec<f64> = (8..16)
        .map(|n| CoilModel::new(small_coil().with_turns(n as f64)).result().l_eff_s)
        .collect();
    let parallel: Vec<f64> = thread::scope(|s| {
        let handles: Vec<_> = (8..16)
            .map(|n| s.spawn(move || CoilModel::new(small_coil().with_turns(n as f64)).result().l_eff_s))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}

#[test]
fn test_custom_tables() {
    let mut platings = standard_platings();
    platings.push(Plating::new("brass", 70.0, 1.0));
    let tables = std::sync::Arc::new(CoilTables::new(ProximityTable::medhurst(), platings));
    let g = CoilGeometry { plating: 4, ..small_coil() };
    let brass = CoilModel::with_tables(g, tables);
    let copper = CoilModel::new(small_coil());
    assert!(brass.result().is_ok());
    assert!(brass.result().q_eff < copper.result().q_eff);
    // same geometry, same inductance
    assert!(rel(brass.result().l_s, copper.result().l_s) < 1e-12);
}

#[test]
fn test_json_record() {
    let model = CoilModel::new(small_coil());
    let json = serde_json::to_value(model.result()).unwrap();
    assert_eq!(json["error_code"], 0);
    assert_eq!(json["diameter"], 100.0);
    assert!(json["l_eff_s"].as_f64().unwrap() > 7.0);
}

#[test]
fn test_steep_helix_has_no_guided_mode() {
    // D = 10 mm, N = 3, l = 100 mm: pitch angle above 45°
    let model = CoilModel::new(CoilGeometry::new(10.0, 3.0, 100.0, 1.0, 10.0, 0));
    let r = model.result();
    assert_eq!(r.error_code, 1, "{}", r.error_msg);
    assert!(r.psi > 45.0);
    assert!(r.l_s > 0.0);
    assert!((r.l_s - 0.0608).abs() < 1e-3);
    assert!(r.phi > 0.0);
    for zeroed in [r.tau, r.beta, r.z_c, r.l_eff_s, r.x_eff_s, r.q_eff, r.r_s, r.c_p, r.f_res] {
        assert_eq!(zeroed, 0.0);
    }
    assert!(model.winding().is_some());
    assert!(model.distributed().is_none());
    assert!(model.effective().is_none());
    assert!(model.lumped().is_none());
    assert!(model.f_res().is_none());

    let errors = model.stage_errors();
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], CoilError::DispersionUnsolvable(_)));
    assert_eq!(errors[1], CoilError::NoLumpedEquivalent);
    assert!(matches!(errors[2], CoilError::ResonanceUnsolvable(_)));
    assert!(matches!(model.error(), Some(CoilError::DispersionUnsolvable(_))));
    assert!(summary(&model).contains("However, all shown results are usable."));
}
