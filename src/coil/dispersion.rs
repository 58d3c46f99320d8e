//! Sheath-helix (n = 0 mode) dispersion relation.
//!
//! For a helix of radius `a` and pitch angle `ψ`, the radial propagation
//! constant `τ` at free-space wavenumber `k0` is the root of
//!
//! ```text
//! F(τ) = K1(τa)·I1(τa) / (K0(τa)·I0(τa)) - (τ·tanψ / k0)²
//! ```
//!
//! Bessel products are evaluated with the exponentially scaled functions, which
//! cancel exactly in every product used here.

use crate::{
    consts::wavenumber,
    error::SolverError,
    solve::{Brent, SingleDimFn},
    special::{bessel_i0e, bessel_i1e, bessel_k0e, bessel_k1e, cot},
};
use tracing::trace;

/// Per-calculation helix parameters shared by the dispersion and resonance stages
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixContext {
    /// Effective radius D_eff/2 (m)
    pub radius: f64,
    /// Pitch angle (rad)
    pub psi: f64,
    /// Axial coil length (m)
    pub length: f64,
    /// Effective conductor length (m)
    pub l_w_eff: f64,
}

/// Which bracket the τ search starts from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TauBracket {
    /// `[k0, k0·cot²ψ]`
    DesignFrequency,
    /// `[k0·cot²ψ - k0², k0]`
    ResonanceSweep,
}

impl TauBracket {
    pub fn endpoints(&self, k0: f64, psi: f64) -> (f64, f64) {
        let cot2 = cot(psi).powi(2);
        match self {
            TauBracket::DesignFrequency => (k0, k0 * cot2),
            TauBracket::ResonanceSweep => (k0 * cot2 - k0 * k0, k0),
        }
    }
}

/// Solution of the dispersion relation at one frequency
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistributedSolution {
    /// Frequency (Hz)
    pub frequency: f64,
    pub k0: f64,
    /// Radial propagation constant (1/m)
    pub tau: f64,
    /// Phase constant (rad/m)
    pub beta: f64,
    /// Characteristic impedance (Ω)
    pub z_c: f64,
}

/// Residual of the dispersion relation
pub fn dispersion(tau: f64, k0: f64, radius: f64, psi: f64) -> f64 {
    let x = tau * radius;
    let ratio = (bessel_k1e(x) * bessel_i1e(x)) / (bessel_k0e(x) * bessel_i0e(x));
    ratio - (tau / k0 * psi.tan()).powi(2)
}

/// Solves for τ at `frequency` (Hz) and derives β and Z_c
pub fn solve_dispersion(
    helix: &HelixContext,
    frequency: f64,
    bracket: TauBracket,
) -> Result<DistributedSolution, SolverError> {
    let k0 = wavenumber(frequency);
    let (radius, psi) = (helix.radius, helix.psi);
    let (tau_1, tau_2) = bracket.endpoints(k0, psi);

    let mut brent = Brent::new(SingleDimFn::new(move |tau: f64| {
        dispersion(tau, k0, radius, psi)
    }));
    let result = brent.find_root(tau_1, tau_2)?;

    let tau = result.root;
    let x = tau * radius;
    let beta = (k0 * k0 + tau * tau).sqrt();
    let z_c = 60.0 * beta / k0 * bessel_i0e(x) * bessel_k0e(x);
    trace!(frequency, tau, beta, z_c, iters = result.iters, "dispersion solved");

    if !z_c.is_finite() {
        return Err(SolverError::FunctionEvaluationError);
    }
    Ok(DistributedSolution {
        frequency,
        k0,
        tau,
        beta,
        z_c,
    })
}

#[cfg(test)]
mod dispersion_tests {
    use super::*;
    use std::f64::consts::PI;

    // D = 100 mm, N = 10, l = 100 mm, d = 2 mm
    fn helix() -> HelixContext {
        HelixContext {
            radius: 0.09990692517849119 / 2.0,
            psi: 1.8248630620396016_f64.to_radians(),
            length: 0.1,
            l_w_eff: 3.140261249910775,
        }
    }

    #[test]
    fn test_bracket_endpoints() {
        let psi = PI / 4.0;
        let (lo, hi) = TauBracket::DesignFrequency.endpoints(2.0, psi);
        assert_eq!(lo, 2.0);
        assert!((hi - 2.0).abs() < 1e-12);
        let (lo, hi) = TauBracket::ResonanceSweep.endpoints(0.5, psi);
        assert!((lo - 0.25).abs() < 1e-12);
        assert_eq!(hi, 0.5);
    }

    #[test]
    fn test_design_frequency_solution() {
        let sol = solve_dispersion(&helix(), 10e6, TauBracket::DesignFrequency).unwrap();
        assert!((sol.beta - 3.280685809245096).abs() / 3.280685809245096 < 1e-6);
        assert!((sol.z_c - 1840.1041257795189).abs() / 1840.1041257795189 < 1e-5);
        assert!(dispersion(sol.tau, sol.k0, helix().radius, helix().psi).abs() < 1e-8);
        assert!(sol.beta > sol.k0);
    }

    #[test]
    fn test_scaled_bessel_stays_finite() {
        // large τa, where unscaled I0 and I1 overflow
        let h = helix();
        let tau = 1000.0 / h.radius;
        assert!(dispersion(tau, wavenumber(1e6), h.radius, h.psi).is_finite());
    }

    #[test]
    fn test_unbracketed_root_fails() {
        let mut h = helix();
        // K1·I1/(K0·I0) < 1 = tan²ψ, negative at both ends of the bracket
        h.psi = PI / 4.0;
        let result = solve_dispersion(&h, 10e6, TauBracket::DesignFrequency);
        assert!(matches!(
            result,
            Err(SolverError::SameSignError) | Err(SolverError::InvalidBracket)
        ));
    }
}
