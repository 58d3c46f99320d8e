use std::f64::consts::PI;

/// Speed of light in vacuum (m/s)
pub const C_0: f64 = 299_792_458.0;

/// Vacuum permeability (H/m)
pub const MU_0: f64 = PI * 4e-7;

/// Free-space wavenumber for a frequency in Hz
#[inline]
pub fn wavenumber(freq: f64) -> f64 {
    2.0 * PI * freq / C_0
}

#[cfg(test)]
mod consts_tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn mu_0_value() {
        assert!(approx_eq!(f64, MU_0, 1.2566370614359173e-6, ulps = 2));
    }

    #[test]
    fn wavenumber_at_one_wavelength() {
        // 1 m wavelength -> k0 = 2π
        let k0 = wavenumber(C_0);
        assert!(approx_eq!(f64, k0, 2.0 * PI, ulps = 2));
    }
}
