//! Equivalent circuits of the coil at the design frequency.
//!
//! The effective circuit is the series R + jX seen at the terminals as given by
//! the distributed model. The lumped circuit reproduces it with the
//! frequency-independent geometric inductance `L_s`, a series resistance `R_s`
//! and a parallel stray capacitance `C_p`.

use crate::{
    coil::{correction::CorrectionFactors, dispersion::DistributedSolution},
    consts::MU_0,
    error::CoilError,
};
use num::complex::Complex64;
use std::f64::consts::PI;

/// Skin depth (m) for resistivity `rho` (Ω·m) at `freq` (Hz)
#[inline]
pub fn skin_depth(rho: f64, freq: f64, mu_r: f64) -> f64 {
    (rho / (PI * freq * MU_0 * mu_r)).sqrt()
}

/// Effective series AC resistance (Ω) including skin and proximity effect.
///
/// The outermost turns see only one neighbour, hence the `(N-1)/N` factor.
pub fn ac_resistance(rho: f64, l_w_eff: f64, wire: f64, delta: f64, phi: f64, turns: f64) -> f64 {
    let mut r = rho * l_w_eff / (PI * (wire * delta - delta * delta)) * phi;
    if turns > 1.0 {
        r *= (turns - 1.0) / turns;
    }
    r
}

/// Frequency-independent series inductance (H) from the corrected
/// current-sheet formula
pub fn geometric_inductance(corrections: &CorrectionFactors, turns: f64, length: f64) -> f64 {
    let CorrectionFactors {
        d_eff, k_l, k_s, k_m, ..
    } = *corrections;
    let sheet = PI * (d_eff * turns).powi(2) / (4.0 * length) * k_l;
    MU_0 * (sheet - d_eff * turns * (k_s + k_m) / 2.0)
}

/// Series equivalent at the design frequency from the distributed model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveCircuit {
    pub omega: f64,
    /// Effective series inductance (H)
    pub l_eff_s: f64,
    /// Effective series reactance (Ω)
    pub x_eff_s: f64,
    /// Effective series AC resistance (Ω)
    pub r_eff_s: f64,
    /// Unloaded quality factor
    pub q_eff: f64,
}

impl EffectiveCircuit {
    /// Terminal impedance `R_eff_s + jX_eff_s`
    pub fn z(&self) -> Complex64 {
        Complex64::new(self.r_eff_s, self.x_eff_s)
    }
}

/// Series R-L branch with a parallel stray capacitance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumpedCircuit {
    /// Series inductance (H)
    pub l_s: f64,
    /// Series resistance (Ω)
    pub r_s: f64,
    /// Parallel capacitance (F)
    pub c_p: f64,
    /// Quality factor of the series branch
    pub q_l: f64,
}

impl LumpedCircuit {
    /// Impedance `(R_s + jωL_s) ∥ 1/(jωC_p)` at `freq` (Hz)
    pub fn z(&self, freq: f64) -> Complex64 {
        let omega = 2.0 * PI * freq;
        let series = Complex64::new(self.r_s, omega * self.l_s);
        let shunt = Complex64::new(0.0, -1.0 / (omega * self.c_p));
        series * shunt / (series + shunt)
    }
}

/// Effective circuit from the distributed solution:
/// `L_eff_s = Z_c/ω·tan(βl)·k_L - μ0·D_eff·N·(k_s+k_m)/2`
pub fn derive_effective(
    sol: &DistributedSolution,
    corrections: &CorrectionFactors,
    turns: f64,
    length: f64,
    r_eff_s: f64,
) -> EffectiveCircuit {
    let omega = 2.0 * PI * sol.frequency;
    let l_eff_s = sol.z_c / omega * (sol.beta * length).tan() * corrections.k_l
        - MU_0 * corrections.d_eff * turns * (corrections.k_s + corrections.k_m) / 2.0;
    let x_eff_s = omega * l_eff_s;
    EffectiveCircuit {
        omega,
        l_eff_s,
        x_eff_s,
        r_eff_s,
        q_eff: x_eff_s / r_eff_s,
    }
}

/// Lumped circuit reproducing `effective` with the geometric inductance `l_s` (H).
///
/// Equating the parallel resistances of both circuits gives
/// `Q_L² - 2P·Q_L + 1 = 0` with `P = R_p/(2X_Ls)`; the larger root is used.
/// The parallel reactance left over is assigned to `C_p`.
pub fn derive_lumped(effective: &EffectiveCircuit, l_s: f64) -> Result<LumpedCircuit, CoilError> {
    let EffectiveCircuit {
        omega,
        x_eff_s,
        r_eff_s,
        q_eff,
        ..
    } = *effective;

    let r_p = (q_eff * q_eff + 1.0) * r_eff_s;
    let x_l_s = omega * l_s;
    let p = r_p / (2.0 * x_l_s);
    if !p.is_finite() || p * p < 1.0 {
        return Err(CoilError::NoLumpedEquivalent);
    }
    let q_l = p + (p * p - 1.0).sqrt();
    let r_s = x_l_s / q_l;

    let x_eff_p = (q_eff * q_eff + 1.0) / (q_eff * q_eff) * x_eff_s;
    let x_l_p = (q_l * q_l + 1.0) / (q_l * q_l) * x_l_s;
    let x_c_p = x_eff_p * x_l_p / (x_l_p - x_eff_p);
    let c_p = -1.0 / (omega * x_c_p);
    if !r_s.is_finite() || !c_p.is_finite() {
        return Err(CoilError::NoLumpedEquivalent);
    }

    Ok(LumpedCircuit { l_s, r_s, c_p, q_l })
}
