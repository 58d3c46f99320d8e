//! Turns count for a target effective inductance.
//!
//! Inductance is not monotonic in the turns count near the geometric limits, so
//! the bracket is chosen heuristically: start at a pitch of two wire diameters
//! and search towards either the tightest winding or five turns, whichever side
//! the target lies on. The heuristic can miss; the miss is reported as
//! [`CoilError::BracketFailure`].

use crate::{
    coil::{CoilGeometry, CoilModel, CoilTables},
    error::CoilError,
    scale::Scale,
    solve::{Brent, SingleDimFn},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Fewest turns the search considers
pub const MIN_TURNS: f64 = 5.0;

/// Starting pitch in wire diameters
pub const SEED_PITCH_FACTOR: f64 = 2.0;

/// Tightest pitch in wire diameters
pub const MAX_TURNS_PITCH_FACTOR: f64 = 1.05;

/// Outcome of a successful inversion
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnsResult {
    pub turns: f64,
    /// Effective series inductance reached (µH)
    pub l_eff_s: f64,
    /// Self-resonant frequency (MHz)
    pub f_res: f64,
    pub iters: usize,
    pub fn_evals: usize,
}

#[derive(Clone, Debug)]
pub struct TurnsInverter {
    /// Target effective inductance (µH)
    target: f64,
    tol: Option<f64>,
    max_iters: Option<usize>,
}

impl TurnsInverter {
    pub fn new(target: f64) -> Self {
        TurnsInverter {
            target,
            tol: None,
            max_iters: None,
        }
    }

    /// Absolute tolerance on the turns count
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tol = Some(tol);
        self
    }

    pub fn max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = Some(max_iters);
        self
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Runs the inversion on `model`'s geometry, whose turns count is ignored.
    ///
    /// On success the model is left calculated at the solution. On failure the
    /// model keeps its last calculation and its record carries the error.
    pub fn solve(&self, model: &mut CoilModel) -> Result<TurnsResult, CoilError> {
        let geometry = *model.geometry();
        let target = self.target;

        let n_start = geometry.length / (SEED_PITCH_FACTOR * geometry.wire_diameter);
        model.set_turns(n_start);
        if let Some(error) = input_error(model) {
            warn!(code = error.code(), "{}", error);
            return Err(error);
        }
        if !(n_start >= MIN_TURNS) {
            return fail(model, CoilError::InsufficientLength);
        }

        let l_start = model.result().l_eff_s;
        if l_start < 0.0 {
            return fail(model, CoilError::OutOfAlgorithmRange);
        }

        let n_end = if l_start > target {
            MIN_TURNS
        } else {
            geometry.length / (MAX_TURNS_PITCH_FACTOR * geometry.wire_diameter)
        };
        info!(target, n_start, l_start, n_end, "inverting for turns");

        let tables = model.tables().clone();
        let objective = {
            let tables = tables.clone();
            SingleDimFn::new(move |turns: f64| {
                target - inductance_at(&tables, geometry.with_turns(turns))
            })
        };
        let mut brent = Brent::new(objective);
        let root = match brent.solve(n_start, n_end, self.tol, self.max_iters) {
            Ok(root) => root,
            Err(e) => {
                let end = CoilModel::with_tables(geometry.with_turns(n_end), tables);
                let error = input_error(&end).unwrap_or(CoilError::BracketFailure(e));
                return fail(model, error);
            }
        };

        model.set_turns(root.root);
        if let Some(error) = model.error() {
            let error = error.clone();
            warn!(turns = root.root, "solution does not calculate cleanly: {}", error);
            return Err(error);
        }
        let f_res = model.result().f_res;
        if f_res < geometry.frequency {
            return fail(model, CoilError::ResonanceBelowDesignFrequency);
        }

        info!(
            turns = root.root,
            iters = root.iters,
            converged = root.converged,
            bracket = root.final_bracket_size,
            "turns found"
        );
        Ok(TurnsResult {
            turns: root.root,
            l_eff_s: model.result().l_eff_s,
            f_res,
            iters: root.iters,
            fn_evals: root.fn_evals,
        })
    }
}

/// Effective inductance (µH), zero when the pipeline could not produce one
fn inductance_at(tables: &Arc<CoilTables>, geometry: CoilGeometry) -> f64 {
    let model = CoilModel::with_tables(geometry, tables.clone());
    match model.effective() {
        Some(eff) => Scale::Micro.scale(eff.l_eff_s),
        None => 0.0,
    }
}

/// Input error of the model's last calculation; these take precedence over
/// inversion failures
fn input_error(model: &CoilModel) -> Option<CoilError> {
    match model.error() {
        Some(error @ CoilError::InvalidGeometry(_)) => Some(error.clone()),
        _ => None,
    }
}

fn fail(model: &mut CoilModel, error: CoilError) -> Result<TurnsResult, CoilError> {
    warn!(code = error.code(), "{}", error);
    model.record_failure(error.clone());
    Err(error)
}

#[cfg(test)]
mod turns_tests {
    use super::*;

    fn model(diameter: f64, length: f64, wire: f64, frequency: f64) -> CoilModel {
        CoilModel::new(CoilGeometry::new(diameter, 10.0, length, wire, frequency, 0))
    }

    #[test]
    fn test_round_trip() {
        let mut m = model(100.0, 100.0, 2.0, 10.0);
        let result = m.solve_for_inductance(12.0).unwrap();
        assert!((result.turns - 12.906049).abs() < 1e-4);
        assert!((result.l_eff_s - 12.0).abs() < 1e-6);
        assert!(result.f_res > 10.0);
        assert_eq!(m.geometry().turns, result.turns);
        assert_eq!(m.result().error_code, 0);
    }

    #[test]
    fn test_known_turns_recovered() {
        let mut m = model(100.0, 100.0, 2.0, 10.0);
        let target = m.result().l_eff_s;
        let result = m.solve_for_inductance(target).unwrap();
        assert!((result.turns - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_insufficient_length() {
        // l/2d = 2 turns
        let mut m = model(10.0, 20.0, 5.0, 10.0);
        assert_eq!(m.solve_for_inductance(1.0), Err(CoilError::InsufficientLength));
        assert_eq!(m.result().error_code, 7);
    }

    #[test]
    fn test_input_error_is_not_a_bracket_failure() {
        let mut m = CoilModel::new(CoilGeometry::new(100.0, 10.0, 100.0, 2.0, 10.0, 9));
        let err = m.solve_for_inductance(12.0).unwrap_err();
        assert!(matches!(err, CoilError::InvalidGeometry(_)));
        assert_eq!(m.result().error_code, 4);
        assert!(m.result().error_msg.contains("plating index 9"));

        let mut m = model(100.0, 100.0, 2.0, -10.0);
        let err = m.solve_for_inductance(12.0).unwrap_err();
        assert_eq!(err.code(), 4);
        assert_eq!(m.result().error_code, 4);
        assert!(m.result().error_msg.contains("frequency"));

        // negative length is an input error, not a short coil
        let mut m = model(100.0, -100.0, 2.0, 10.0);
        assert_eq!(m.solve_for_inductance(12.0).unwrap_err().code(), 4);
    }

    #[test]
    fn test_out_of_algorithm_range() {
        let mut m = model(400.0, 200.0, 4.0, 3.5);
        assert_eq!(m.solve_for_inductance(40.0), Err(CoilError::OutOfAlgorithmRange));
        assert_eq!(m.result().error_code, 8);
        assert_eq!(m.geometry().turns, 25.0);
    }

    #[test]
    fn test_target_out_of_reach() {
        let mut m = model(100.0, 100.0, 2.0, 10.0);
        let err = m.solve_for_inductance(0.5).unwrap_err();
        assert!(matches!(err, CoilError::BracketFailure(_)));
        assert!(err.to_string().starts_with("Target inductance could not be bracketed"));
        assert_eq!(m.result().error_code, 5);
    }

    #[test]
    fn test_resonance_below_design_frequency() {
        let mut m = model(100.0, 100.0, 2.0, 30.0);
        assert_eq!(
            m.solve_for_inductance(20.0),
            Err(CoilError::ResonanceBelowDesignFrequency)
        );
        assert_eq!(m.result().error_code, 6);
        assert!((m.geometry().turns - 24.504).abs() < 1e-2);
        assert!(m.result().f_res < 30.0);
    }

    #[test]
    fn test_builder_options() {
        let inverter = TurnsInverter::new(12.0).tolerance(1e-6).max_iters(50);
        assert_eq!(inverter.target(), 12.0);
        let mut m = model(100.0, 100.0, 2.0, 10.0);
        let result = inverter.solve(&mut m).unwrap();
        assert!((result.turns - 12.906049).abs() < 1e-5);
    }
}
