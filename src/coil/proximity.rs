//! Proximity-effect correction factor Φ after Medhurst's measurements.
//!
//! The table is indexed by coil length over diameter (rows) and winding pitch
//! over wire diameter (columns). Both headers end in an effective infinity, so
//! any ratio at or beyond the last tabulated value reads the last row/column.

use ndarray::prelude::*;
use simple_error::{SimpleError, bail};

/// Medhurst l/D header
const L_D_HEADER: [f64; 12] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 2.0, 4.0, 6.0, 8.0, 10.0, 1e31];

/// Medhurst p/d header
const P_D_HEADER: [f64; 11] = [1.0, 1.111, 1.25, 1.429, 1.667, 2.0, 2.5, 3.333, 5.0, 10.0, 1e31];

/// Medhurst Φ, rows l/D, columns p/d
const MEDHURST: [[f64; 11]; 12] = [
    [5.31, 3.73, 2.74, 2.12, 1.74, 1.44, 1.20, 1.16, 1.07, 1.02, 1.00],
    [5.45, 3.84, 2.83, 2.20, 1.77, 1.48, 1.29, 1.19, 1.08, 1.02, 1.00],
    [5.65, 3.99, 2.97, 2.28, 1.83, 1.54, 1.33, 1.21, 1.08, 1.03, 1.00],
    [5.80, 4.11, 3.10, 2.38, 1.89, 1.60, 1.38, 1.22, 1.10, 1.03, 1.00],
    [5.80, 4.17, 3.20, 2.44, 1.92, 1.64, 1.42, 1.23, 1.10, 1.03, 1.00],
    [5.55, 4.10, 3.17, 2.47, 1.94, 1.67, 1.45, 1.24, 1.10, 1.03, 1.00],
    [4.10, 3.36, 2.74, 2.32, 1.98, 1.74, 1.50, 1.28, 1.13, 1.04, 1.00],
    [3.54, 3.05, 2.60, 2.27, 2.01, 1.78, 1.54, 1.32, 1.15, 1.04, 1.00],
    [3.31, 2.92, 2.60, 2.29, 2.03, 1.80, 1.56, 1.34, 1.16, 1.04, 1.00],
    [3.20, 2.90, 2.62, 2.34, 2.08, 1.81, 1.57, 1.34, 1.165, 1.04, 1.00],
    [3.23, 2.93, 2.65, 2.27, 2.10, 1.83, 1.58, 1.35, 1.17, 1.04, 1.00],
    [3.41, 3.11, 2.815, 2.51, 2.22, 1.93, 1.65, 1.395, 1.19, 1.05, 1.00],
];

/// Position of a value between two neighbouring header entries
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderSpan {
    pub lo: usize,
    pub hi: usize,
    /// Fraction of the way from `lo` to `hi`, in [0, 1]
    pub weight: f64,
}

impl HeaderSpan {
    /// Brackets `value` in the sorted `header`.
    ///
    /// Values at or beyond the last entry clamp to it, values below the first
    /// entry (or NaN) clamp to the first.
    pub fn locate(header: ArrayView1<f64>, value: f64) -> Self {
        let last = header.len() - 1;
        if value >= header[last] {
            return HeaderSpan {
                lo: last,
                hi: last,
                weight: 0.0,
            };
        }
        if !(value >= header[0]) {
            return HeaderSpan {
                lo: 0,
                hi: 0,
                weight: 0.0,
            };
        }
        let mut hi = 1;
        while value >= header[hi] {
            hi += 1;
        }
        let lo = hi - 1;
        let weight = (value - header[lo]) / (header[hi] - header[lo]);
        HeaderSpan {
            lo,
            hi,
            weight: weight.clamp(0.0, 1.0),
        }
    }
}

/// Two-dimensional correction-factor table with linear interpolation on both axes
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityTable {
    l_d: Array1<f64>,
    p_d: Array1<f64>,
    phi: Array2<f64>,
}

impl ProximityTable {
    pub fn new(l_d: Array1<f64>, p_d: Array1<f64>, phi: Array2<f64>) -> Result<Self, SimpleError> {
        if l_d.len() < 2 || p_d.len() < 2 {
            bail!("proximity table headers need at least two entries");
        }
        if phi.dim() != (l_d.len(), p_d.len()) {
            bail!(
                "proximity table is {:?}, headers call for ({}, {})",
                phi.dim(),
                l_d.len(),
                p_d.len()
            );
        }
        for header in [&l_d, &p_d] {
            if header.windows(2).into_iter().any(|w| !(w[1] > w[0])) {
                bail!("proximity table headers must be strictly increasing");
            }
        }
        if phi.iter().any(|v| !v.is_finite()) {
            bail!("proximity table entries must be finite");
        }
        Ok(ProximityTable { l_d, p_d, phi })
    }

    /// Medhurst's empirical table
    pub fn medhurst() -> Self {
        ProximityTable {
            l_d: Array1::from_vec(L_D_HEADER.to_vec()),
            p_d: Array1::from_vec(P_D_HEADER.to_vec()),
            phi: arr2(&MEDHURST),
        }
    }

    pub fn l_d_header(&self) -> ArrayView1<f64> {
        self.l_d.view()
    }

    pub fn p_d_header(&self) -> ArrayView1<f64> {
        self.p_d.view()
    }

    pub fn table(&self) -> ArrayView2<f64> {
        self.phi.view()
    }

    /// Φ for coil length `l`, diameter `diameter`, pitch `p` and wire diameter `d`
    pub fn lookup(&self, l: f64, diameter: f64, p: f64, d: f64) -> f64 {
        self.interpolate(l / diameter, p / d)
    }

    /// Φ at the ratios l/D and p/d.
    ///
    /// Interpolates along p/d on both bracketing l/D rows, then between the rows.
    pub fn interpolate(&self, l_d: f64, p_d: f64) -> f64 {
        let row = HeaderSpan::locate(self.l_d.view(), l_d);
        let col = HeaderSpan::locate(self.p_d.view(), p_d);

        let along = |r: usize| {
            let lo = self.phi[[r, col.lo]];
            lo + col.weight * (self.phi[[r, col.hi]] - lo)
        };
        let phi_lo = along(row.lo);
        let phi_hi = along(row.hi);
        phi_lo + row.weight * (phi_hi - phi_lo)
    }
}

impl Default for ProximityTable {
    fn default() -> Self {
        Self::medhurst()
    }
}

#[cfg(test)]
mod proximity_tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_locate() {
        let header = array![0.0, 1.0, 2.0, 10.0];
        assert_eq!(
            HeaderSpan::locate(header.view(), 1.5),
            HeaderSpan {
                lo: 1,
                hi: 2,
                weight: 0.5
            }
        );
        assert_eq!(HeaderSpan::locate(header.view(), 10.0).lo, 3);
        assert_eq!(HeaderSpan::locate(header.view(), 1e40).hi, 3);
        assert_eq!(HeaderSpan::locate(header.view(), -1.0).lo, 0);
        assert_eq!(HeaderSpan::locate(header.view(), f64::NAN).weight, 0.0);
    }

    #[test]
    fn test_grid_points_exact() {
        let table = ProximityTable::medhurst();
        for (i, &l_d) in L_D_HEADER.iter().enumerate() {
            for (j, &p_d) in P_D_HEADER.iter().enumerate() {
                assert_eq!(table.interpolate(l_d, p_d), MEDHURST[i][j]);
            }
        }
    }

    #[test]
    fn test_between_grid_points() {
        let table = ProximityTable::medhurst();
        assert!(approx_eq!(f64, table.interpolate(0.5, 5.0), 1.09, epsilon = 1e-12));
        assert!(approx_eq!(
            f64,
            table.interpolate(0.3, 1.2),
            3.2651079136690653,
            epsilon = 1e-12
        ));
        // l = 200 mm, D = 400 mm, p = 20 mm, d = 4 mm
        assert!(approx_eq!(f64, table.lookup(0.2, 0.4, 0.02, 0.004), 1.09, epsilon = 1e-12));
    }

    #[test]
    fn test_clamp_beyond_last_header() {
        let table = ProximityTable::medhurst();
        let last = table.interpolate(1e31, 3.0);
        assert_eq!(table.interpolate(1e35, 3.0), last);
        assert_eq!(table.interpolate(f64::INFINITY, 3.0), last);
        assert_eq!(table.interpolate(1e31, 1e31), 1.0);
        assert_eq!(table.interpolate(1e33, 2.0), 1.93);
        // between 10 and effective infinity, practically the l/D = 10 row
        assert!(approx_eq!(f64, table.interpolate(50.0, 2.0), 1.83, epsilon = 1e-12));
    }

    #[test]
    fn test_phi_at_least_one() {
        let table = ProximityTable::medhurst();
        for l_d in [0.0, 0.1, 0.75, 3.0, 9.0, 100.0] {
            for p_d in [1.0, 1.05, 1.9, 4.0, 7.5, 1e3] {
                assert!(table.interpolate(l_d, p_d) >= 1.0);
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        let ok = ProximityTable::new(
            array![0.0, 1.0],
            array![1.0, 2.0, 3.0],
            array![[2.0, 1.5, 1.0], [2.5, 1.6, 1.0]],
        );
        assert!(ok.is_ok());
        assert!(
            ProximityTable::new(array![0.0, 1.0], array![1.0, 2.0], array![[1.0, 1.0]]).is_err()
        );
        assert!(
            ProximityTable::new(
                array![1.0, 0.0],
                array![1.0, 2.0],
                array![[1.0, 1.0], [1.0, 1.0]]
            )
            .is_err()
        );
    }
}
