use crate::{
    coil::dispersion::{HelixContext, TauBracket, solve_dispersion},
    consts::C_0,
    error::SolverError,
};
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, trace};

/// Midpoint iterations after the two seed evaluations
pub const RESONANCE_ITERATIONS: usize = 40;

/// βl - π/2 at `frequency` (Hz)
fn quarter_wave_residual(helix: &HelixContext, frequency: f64) -> Result<f64, SolverError> {
    let sol = solve_dispersion(helix, frequency, TauBracket::ResonanceSweep)?;
    Ok(sol.beta * helix.length - FRAC_PI_2)
}

/// Self-resonant frequency (Hz).
///
/// Seeds at `c0/(40·l_w_eff)` and a hundred times that, then always evaluates the
/// midpoint, which replaces whichever end has a residual of the same sign.
/// Runs exactly [`RESONANCE_ITERATIONS`] times and returns the last midpoint.
/// Any failed dispersion solve along the way fails the search.
pub fn find_self_resonance(helix: &HelixContext) -> Result<f64, SolverError> {
    let mut x1 = C_0 / helix.l_w_eff / 40.0;
    let mut x2 = 100.0 * x1;
    let mut fx1 = quarter_wave_residual(helix, x1)?;
    let mut fx2 = quarter_wave_residual(helix, x2)?;
    trace!(x1, fx1, x2, fx2, "resonance seeds");

    let mut x = x2;
    for iter in 0..RESONANCE_ITERATIONS {
        x = 0.5 * (x1 + x2);
        let fx = quarter_wave_residual(helix, x)?;
        if fx * fx1 > 0.0 {
            fx1 = fx;
            x1 = x;
        } else {
            fx2 = fx;
            x2 = x;
        }
        trace!(iter, x, fx, fx2, "resonance step");
    }
    debug!(f_res = x, "self-resonance found");
    Ok(x)
}
