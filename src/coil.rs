//! Single-layer helical air-core coil at RF.
//!
//! A [`CoilModel`] runs the whole pipeline once on construction:
//! proximity factor, geometric corrections, AC resistance and geometric
//! inductance, the sheath-helix dispersion solve at the design frequency, the
//! effective and lumped equivalent circuits and the self-resonance search.
//! Stage failures degrade the [`CoilResult`] record instead of aborting.

pub mod circuit;
pub mod correction;
pub mod dispersion;
pub mod proximity;
pub mod resonance;
pub mod turns;

use crate::{
    error::CoilError,
    plating::{Plating, standard_platings},
    scale::Scale,
};
use circuit::{
    EffectiveCircuit, LumpedCircuit, ac_resistance, derive_effective, derive_lumped,
    geometric_inductance, skin_depth,
};
use correction::CorrectionFactors;
use dispersion::{DistributedSolution, HelixContext, TauBracket, solve_dispersion};
use proximity::ProximityTable;
use resonance::find_self_resonance;
use serde::Serialize;
use std::{
    f64::consts::PI,
    sync::{Arc, LazyLock},
};
use tracing::{debug, warn};
use turns::{TurnsInverter, TurnsResult};

/// Coil geometry and design frequency.
///
/// Lengths in millimeters, frequency in megahertz. The turns count need not be
/// integral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CoilGeometry {
    /// Mean coil diameter D (mm)
    pub diameter: f64,
    /// Number of turns N
    pub turns: f64,
    /// Coil length l (mm)
    pub length: f64,
    /// Wire diameter d (mm)
    pub wire_diameter: f64,
    /// Design frequency f (MHz)
    pub frequency: f64,
    /// Index into the plating table
    pub plating: usize,
}

impl CoilGeometry {
    pub fn new(
        diameter: f64,
        turns: f64,
        length: f64,
        wire_diameter: f64,
        frequency: f64,
        plating: usize,
    ) -> Self {
        CoilGeometry {
            diameter,
            turns,
            length,
            wire_diameter,
            frequency,
            plating,
        }
    }

    /// Same coil wound with `turns` turns
    pub fn with_turns(&self, turns: f64) -> Self {
        CoilGeometry { turns, ..*self }
    }

    /// Winding pitch (mm)
    pub fn pitch(&self) -> f64 {
        self.length / self.turns
    }
}

impl Default for CoilGeometry {
    fn default() -> Self {
        CoilGeometryBuilder::default().build()
    }
}

pub struct CoilGeometryBuilder {
    diameter: f64,
    turns: f64,
    length: f64,
    wire_diameter: f64,
    frequency: f64,
    plating: usize,
}

impl CoilGeometryBuilder {
    pub fn new() -> Self {
        CoilGeometryBuilder::default()
    }

    pub fn diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn turns(mut self, turns: f64) -> Self {
        self.turns = turns;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn wire_diameter(mut self, wire_diameter: f64) -> Self {
        self.wire_diameter = wire_diameter;
        self
    }

    pub fn frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn plating(mut self, plating: usize) -> Self {
        self.plating = plating;
        self
    }

    /// No validation here; out-of-domain input shows up as an error-coded result
    pub fn build(self) -> CoilGeometry {
        CoilGeometry {
            diameter: self.diameter,
            turns: self.turns,
            length: self.length,
            wire_diameter: self.wire_diameter,
            frequency: self.frequency,
            plating: self.plating,
        }
    }
}

impl Default for CoilGeometryBuilder {
    fn default() -> Self {
        Self {
            diameter: 400.0,
            turns: 10.0,
            length: 200.0,
            wire_diameter: 4.0,
            frequency: 10.0,
            plating: 0,
        }
    }
}

/// Static data the model reads: the proximity table and the plating materials
#[derive(Clone, Debug, PartialEq)]
pub struct CoilTables {
    pub proximity: ProximityTable,
    pub platings: Vec<Plating>,
}

static STANDARD_TABLES: LazyLock<Arc<CoilTables>> =
    LazyLock::new(|| Arc::new(CoilTables::standard()));

impl CoilTables {
    pub fn new(proximity: ProximityTable, platings: Vec<Plating>) -> Self {
        CoilTables {
            proximity,
            platings,
        }
    }

    /// Medhurst's table and the built-in platings
    pub fn standard() -> Self {
        CoilTables::new(ProximityTable::medhurst(), standard_platings())
    }

    /// Process-wide handle to [`CoilTables::standard`]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&STANDARD_TABLES)
    }
}

/// Frequency-independent quantities of the winding, SI units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Winding {
    /// Pitch (m)
    pub pitch: f64,
    pub corrections: CorrectionFactors,
    /// Physical conductor length (m)
    pub l_w_phys: f64,
    /// Skin depth at the design frequency (m)
    pub skin_depth: f64,
    /// Resistivity (Ω·m)
    pub rho: f64,
    pub mu_r: f64,
    /// Effective series AC resistance at the design frequency (Ω)
    pub r_eff_s: f64,
    /// Geometric series inductance (H)
    pub l_s: f64,
    pub helix: HelixContext,
}

/// Flat result record.
///
/// Lengths in mm, skin depth in µm, resistivity in nΩ·m, inductance in µH,
/// capacitance in pF, angles in degrees, frequencies in MHz. Fields of stages
/// that did not complete are zero; `error_code` is non-zero whenever any stage
/// failed and names the most upstream failure (a failed resonance search
/// outranks a missing lumped circuit).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CoilResult {
    pub diameter: f64,
    pub turns: f64,
    pub length: f64,
    pub wire_diameter: f64,
    pub frequency: f64,
    pub plating: usize,

    pub p: f64,
    pub phi: f64,
    pub d_eff: f64,
    pub k_l: f64,
    pub k_s: f64,
    pub k_m: f64,
    pub l_w_phys: f64,
    pub l_w_eff: f64,
    pub delta_i: f64,
    pub rho: f64,
    pub mu_r_w: f64,
    pub r_eff_s: f64,
    pub l_s: f64,
    pub psi: f64,

    pub tau: f64,
    pub beta: f64,
    pub z_c: f64,
    pub l_eff_s: f64,
    pub x_eff_s: f64,
    pub q_eff: f64,

    pub r_s: f64,
    pub c_p: f64,
    pub f_res: f64,

    pub error_code: u8,
    pub error_msg: String,
}

impl CoilResult {
    /// Record holding only the inputs
    pub fn new(geometry: &CoilGeometry) -> Self {
        CoilResult {
            diameter: geometry.diameter,
            turns: geometry.turns,
            length: geometry.length,
            wire_diameter: geometry.wire_diameter,
            frequency: geometry.frequency,
            plating: geometry.plating,
            ..Default::default()
        }
    }

    /// Record of a calculation that failed outright
    pub fn from_error(geometry: &CoilGeometry, error: &CoilError) -> Self {
        let mut result = CoilResult::new(geometry);
        result.set_error(error);
        result
    }

    pub fn set_error(&mut self, error: &CoilError) {
        self.error_code = error.code();
        self.error_msg = error.to_string();
    }

    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }

    fn fill_winding(&mut self, w: &Winding) {
        let c = &w.corrections;
        self.p = Scale::Milli.scale(w.pitch);
        self.phi = c.phi;
        self.d_eff = Scale::Milli.scale(c.d_eff);
        self.k_l = c.k_l;
        self.k_s = c.k_s;
        self.k_m = c.k_m;
        self.l_w_phys = Scale::Milli.scale(w.l_w_phys);
        self.l_w_eff = Scale::Milli.scale(w.helix.l_w_eff);
        self.delta_i = Scale::Micro.scale(w.skin_depth);
        self.rho = Scale::Nano.scale(w.rho);
        self.mu_r_w = w.mu_r;
        self.r_eff_s = w.r_eff_s;
        self.l_s = Scale::Micro.scale(w.l_s);
        self.psi = w.helix.psi.to_degrees();
    }

    fn fill_effective(&mut self, sol: &DistributedSolution, eff: &EffectiveCircuit) {
        self.tau = sol.tau;
        self.beta = sol.beta;
        self.z_c = sol.z_c;
        self.l_eff_s = Scale::Micro.scale(eff.l_eff_s);
        self.x_eff_s = eff.x_eff_s;
        self.q_eff = eff.q_eff;
    }

    fn fill_lumped(&mut self, lumped: &LumpedCircuit) {
        self.r_s = lumped.r_s;
        self.c_p = Scale::Pico.scale(lumped.c_p);
    }
}

/// One coil calculation and all of its intermediate results
#[derive(Clone, Debug)]
pub struct CoilModel {
    geometry: CoilGeometry,
    tables: Arc<CoilTables>,
    winding: Option<Winding>,
    distributed: Option<DistributedSolution>,
    effective: Option<EffectiveCircuit>,
    lumped: Option<LumpedCircuit>,
    f_res: Option<f64>,
    result: CoilResult,
    errors: Vec<CoilError>,
    reported: Option<CoilError>,
}

impl CoilModel {
    /// Calculates `geometry` with the built-in tables
    pub fn new(geometry: CoilGeometry) -> Self {
        CoilModel::with_tables(geometry, CoilTables::shared())
    }

    pub fn with_tables(geometry: CoilGeometry, tables: Arc<CoilTables>) -> Self {
        let mut model = CoilModel {
            geometry,
            tables,
            winding: None,
            distributed: None,
            effective: None,
            lumped: None,
            f_res: None,
            result: CoilResult::new(&geometry),
            errors: Vec::new(),
            reported: None,
        };
        model.calculate();
        model
    }

    /// Rewinds the coil with `turns` turns and recalculates
    pub fn set_turns(&mut self, turns: f64) {
        self.geometry = self.geometry.with_turns(turns);
        self.calculate();
    }

    /// Finds the turns count giving an effective inductance of `target` µH and
    /// leaves the model calculated at that count
    pub fn solve_for_inductance(&mut self, target: f64) -> Result<TurnsResult, CoilError> {
        TurnsInverter::new(target).solve(self)
    }

    pub fn geometry(&self) -> &CoilGeometry {
        &self.geometry
    }

    pub fn tables(&self) -> &Arc<CoilTables> {
        &self.tables
    }

    pub fn plating(&self) -> Option<&Plating> {
        self.tables.platings.get(self.geometry.plating)
    }

    pub fn winding(&self) -> Option<&Winding> {
        self.winding.as_ref()
    }

    pub fn corrections(&self) -> Option<&CorrectionFactors> {
        self.winding.as_ref().map(|w| &w.corrections)
    }

    pub fn distributed(&self) -> Option<&DistributedSolution> {
        self.distributed.as_ref()
    }

    pub fn effective(&self) -> Option<&EffectiveCircuit> {
        self.effective.as_ref()
    }

    pub fn lumped(&self) -> Option<&LumpedCircuit> {
        self.lumped.as_ref()
    }

    /// Self-resonant frequency (Hz)
    pub fn f_res(&self) -> Option<f64> {
        self.f_res
    }

    pub fn result(&self) -> &CoilResult {
        &self.result
    }

    /// Every stage failure of the last calculation, upstream first
    pub fn stage_errors(&self) -> &[CoilError] {
        &self.errors
    }

    /// The error reported in the result record
    pub fn error(&self) -> Option<&CoilError> {
        self.reported.as_ref()
    }

    /// Marks the record with a failure of an operation built on this model
    pub(crate) fn record_failure(&mut self, error: CoilError) {
        self.result.set_error(&error);
        self.reported = Some(error);
    }

    /// The record keeps the most upstream failure, except that a failed
    /// resonance search replaces a missing lumped circuit
    fn stage_failed(&mut self, error: CoilError) {
        warn!(code = error.code(), "{}", error);
        let replaces = matches!(
            (&self.reported, &error),
            (None, _) | (Some(CoilError::NoLumpedEquivalent), CoilError::ResonanceUnsolvable(_))
        );
        if replaces {
            self.result.set_error(&error);
            self.reported = Some(error.clone());
        }
        self.errors.push(error);
    }

    fn calculate(&mut self) {
        self.winding = None;
        self.distributed = None;
        self.effective = None;
        self.lumped = None;
        self.f_res = None;
        self.errors.clear();
        self.reported = None;
        self.result = CoilResult::new(&self.geometry);

        let winding = match self.wind() {
            Ok(winding) => winding,
            Err(error) => {
                self.stage_failed(error);
                return;
            }
        };
        self.result.fill_winding(&winding);
        self.winding = Some(winding);

        let frequency = Scale::Mega.unscale(self.geometry.frequency);
        match solve_dispersion(&winding.helix, frequency, TauBracket::DesignFrequency) {
            Ok(sol) => {
                let eff = derive_effective(
                    &sol,
                    &winding.corrections,
                    self.geometry.turns,
                    winding.helix.length,
                    winding.r_eff_s,
                );
                debug!(tau = sol.tau, beta = sol.beta, z_c = sol.z_c, l_eff_s = eff.l_eff_s, "effective circuit");
                self.result.fill_effective(&sol, &eff);
                self.distributed = Some(sol);
                self.effective = Some(eff);
            }
            Err(e) => self.stage_failed(CoilError::DispersionUnsolvable(e)),
        }

        let lumped = match &self.effective {
            Some(eff) => derive_lumped(eff, winding.l_s),
            None => Err(CoilError::NoLumpedEquivalent),
        };
        match lumped {
            Ok(lumped) => {
                debug!(r_s = lumped.r_s, c_p = lumped.c_p, q_l = lumped.q_l, "lumped circuit");
                self.result.fill_lumped(&lumped);
                self.lumped = Some(lumped);
            }
            Err(error) => self.stage_failed(error),
        }

        match find_self_resonance(&winding.helix) {
            Ok(f_res) => {
                self.result.f_res = Scale::Mega.scale(f_res);
                self.f_res = Some(f_res);
            }
            Err(e) => self.stage_failed(CoilError::ResonanceUnsolvable(e)),
        }
    }

    /// Geometry stage, everything before the dispersion solve
    fn wind(&self) -> Result<Winding, CoilError> {
        let g = &self.geometry;
        let inputs = [
            ("diameter", g.diameter),
            ("turns", g.turns),
            ("length", g.length),
            ("wire diameter", g.wire_diameter),
            ("frequency", g.frequency),
        ];
        for (name, val) in inputs {
            if !(val.is_finite() && val > 0.0) {
                return Err(invalid(format!("{} must be finite and positive, got {}", name, val)));
            }
        }
        let plating = match self.tables.platings.get(g.plating) {
            Some(plating) => plating,
            None => {
                return Err(invalid(format!(
                    "plating index {} out of range, {} materials available",
                    g.plating,
                    self.tables.platings.len()
                )));
            }
        };

        let n = g.turns;
        let diameter = Scale::Milli.unscale(g.diameter);
        let length = Scale::Milli.unscale(g.length);
        let wire = Scale::Milli.unscale(g.wire_diameter);
        let pitch = length / n;
        if !(pitch > wire) {
            return Err(invalid(format!(
                "pitch {:.3} mm does not exceed wire diameter {} mm",
                g.pitch(),
                g.wire_diameter
            )));
        }

        let phi = self.tables.proximity.lookup(length, diameter, pitch, wire);
        let corrections = CorrectionFactors::compute(phi, diameter, length, pitch, wire, n);
        if !corrections.is_finite() || !(corrections.d_eff > 0.0) {
            return Err(invalid(format!("degenerate correction factors {:?}", corrections)));
        }
        let d_eff = corrections.d_eff;
        debug!(phi, d_eff, k_l = corrections.k_l, k_s = corrections.k_s, k_m = corrections.k_m, "corrections");

        let l_w_phys = ((n * PI * diameter).powi(2) + length.powi(2)).sqrt();
        let l_w_eff = ((n * PI * d_eff).powi(2) + length.powi(2)).sqrt();

        let frequency = Scale::Mega.unscale(g.frequency);
        let rho = plating.resistivity();
        let delta = skin_depth(rho, frequency, plating.mu_r);
        if !(delta < wire) {
            return Err(invalid(format!(
                "skin depth {:.3} mm not smaller than wire diameter {} mm",
                Scale::Milli.scale(delta),
                g.wire_diameter
            )));
        }

        let r_eff_s = ac_resistance(rho, l_w_eff, wire, delta, phi, n);
        let l_s = geometric_inductance(&corrections, n, length);
        let psi = (pitch / (PI * d_eff)).atan();
        if ![r_eff_s, l_s, psi].iter().all(|v| v.is_finite()) {
            return Err(invalid("non-finite resistance or inductance".to_string()));
        }

        Ok(Winding {
            pitch,
            corrections,
            l_w_phys,
            skin_depth: delta,
            rho,
            mu_r: plating.mu_r,
            r_eff_s,
            l_s,
            helix: HelixContext {
                radius: d_eff / 2.0,
                psi,
                length,
                l_w_eff,
            },
        })
    }
}

fn invalid(msg: String) -> CoilError {
    CoilError::InvalidGeometry(msg)
}
