use std::f64::consts::PI;

/// Correction factors for one geometry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrectionFactors {
    /// Proximity factor Φ
    pub phi: f64,
    /// Effective current-sheet diameter (m)
    pub d_eff: f64,
    /// Shape factor
    pub k_l: f64,
    /// Self-inductance correction
    pub k_s: f64,
    /// Mutual-inductance correction
    pub k_m: f64,
}

impl CorrectionFactors {
    /// `diameter`, `length`, `pitch` and `wire` in meters
    pub fn compute(phi: f64, diameter: f64, length: f64, pitch: f64, wire: f64, turns: f64) -> Self {
        let d_eff = effective_diameter(diameter, wire, phi);
        CorrectionFactors {
            phi,
            d_eff,
            k_l: shape_factor(length, d_eff),
            k_s: self_correction(pitch, wire),
            k_m: mutual_correction(turns),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.phi, self.d_eff, self.k_l, self.k_s, self.k_m]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Effective current-sheet diameter, `D - d(1 - 1/√Φ)`
#[inline]
pub fn effective_diameter(diameter: f64, wire: f64, phi: f64) -> f64 {
    diameter - wire * (1.0 - 1.0 / phi.sqrt())
}

#[inline]
fn rational(x2: f64) -> f64 {
    (1.0 + 0.383901 * x2 + 0.017108 * x2 * x2) / (1.0 + 0.258952 * x2)
}

/// Shape factor k_L.
///
/// Short coils (`length <= d_eff`) use the series in l/D_eff, long coils the
/// asymptotic expansion in D_eff/l.
pub fn shape_factor(length: f64, d_eff: f64) -> f64 {
    if length <= d_eff {
        let x = length / d_eff;
        let x2 = x * x;
        let series = rational(x2) * ((4.0 / x).ln() - 0.5) + 0.093842 * x2 + 0.002029 * x2 * x2
            - 0.000801 * x2 * x2 * x2;
        series * 2.0 / PI * x
    } else {
        let y = d_eff / length;
        rational(y * y) - 4.0 / (3.0 * PI) * y
    }
}

/// Self-inductance correction for the round wire, `5/4 - ln(2p/d)`
#[inline]
pub fn self_correction(pitch: f64, wire: f64) -> f64 {
    1.25 - (2.0 * pitch / wire).ln()
}

/// Mutual-inductance correction, asymptotic in 1/N
pub fn mutual_correction(turns: f64) -> f64 {
    let ln_2pi = (2.0 * PI).ln();
    let c9 = -ln_2pi + 1.5 + 0.33084236 + 1.0 / 120.0 - 1.0 / 504.0 + 0.0011925;
    let n = turns;
    ln_2pi - 1.5 - n.ln() / (6.0 * n) - 0.33084236 / n - 1.0 / (120.0 * n.powi(3))
        + 1.0 / (504.0 * n.powi(5))
        - 0.0011925 / n.powi(7)
        + c9 / n.powi(9)
}
