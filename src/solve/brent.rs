use crate::{error::SolverError, solve::ObjFn};
use std::fmt;

/// Result of Brent's method root finding
#[derive(Debug, Clone)]
pub struct BrentResult {
    pub root: f64,
    pub froot: f64,
    pub fn_evals: usize,
    pub iters: usize,
    pub converged: bool,
    pub final_bracket_size: f64,
}

#[derive(Clone)]
pub struct Brent {
    root: f64,
    froot: f64,
    f: Box<dyn ObjFn>,
    iters: usize,
    converged: bool,
}

impl Brent {
    pub const DEFAULT_TOL: f64 = 1e-12;
    pub const DEFAULT_MAX_ITERS: usize = 100;

    pub fn new<F>(f: F) -> Self
    where
        F: ObjFn + 'static,
    {
        Brent {
            root: 0.0,
            froot: 0.0,
            f: Box::new(f),
            iters: 0,
            converged: false,
        }
    }

    fn eval(&self, x: f64) -> Result<f64, SolverError> {
        let fx = self.f.call(x);
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(SolverError::FunctionEvaluationError)
        }
    }

    /// Brent's method for finding roots of a function
    ///
    /// Combines bisection with inverse quadratic interpolation and the secant
    /// method. The bracket endpoints may be given in either order.
    ///
    /// # Arguments
    /// * `a` - One bracket boundary (f(a) and f(b) must have opposite signs)
    /// * `b` - Other bracket boundary
    /// * `tol` - Absolute convergence tolerance on x (default: 1e-12)
    /// * `max_iters` - Maximum iterations (default: 100)
    ///
    /// # Errors
    /// * `InvalidBracket` if a == b or either endpoint is not finite
    /// * `InvalidTolerance` if tolerance <= 0
    /// * `FunctionEvaluationError` if f returns NaN or infinity
    /// * `SameSignError` if f(a) and f(b) have the same sign
    /// * `MaxIterationsExceeded` if convergence not reached
    pub fn solve(
        &mut self,
        a: f64,
        b: f64,
        tol: Option<f64>,
        max_iters: Option<usize>,
    ) -> Result<BrentResult, SolverError> {
        self.converged = false;
        self.iters = 0;
        let tol = tol.unwrap_or(Self::DEFAULT_TOL);
        let max_iter = max_iters.unwrap_or(Self::DEFAULT_MAX_ITERS);

        if !a.is_finite() || !b.is_finite() || a == b {
            return Err(SolverError::InvalidBracket);
        }
        if !(tol > 0.0) {
            return Err(SolverError::InvalidTolerance);
        }

        let mut a = a;
        let mut b = b;
        let mut fa = self.eval(a)?;
        let mut fb = self.eval(b)?;
        let mut evaluations = 2;

        if fa * fb > 0.0 {
            return Err(SolverError::SameSignError);
        }
        if fa == 0.0 {
            return Ok(self.finish(a, fa, evaluations, 0.0));
        }
        if fb == 0.0 {
            return Ok(self.finish(b, fb, evaluations, 0.0));
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        while self.iters < max_iter {
            self.iters += 1;

            // Keep the root between b and c
            if fb * fc > 0.0 {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // b is the best estimate so far
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tol;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol1 || fb == 0.0 {
                return Ok(self.finish(b, fb, evaluations, (c - b).abs()));
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();
                let min1 = 3.0 * xm * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    // Interpolation failed, bisect
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
            fb = self.eval(b)?;
            evaluations += 1;
        }

        Err(SolverError::MaxIterationsExceeded)
    }

    fn finish(&mut self, root: f64, froot: f64, fn_evals: usize, bracket: f64) -> BrentResult {
        self.root = root;
        self.froot = froot;
        self.converged = true;
        BrentResult {
            root,
            froot,
            fn_evals,
            iters: self.iters,
            converged: true,
            final_bracket_size: bracket,
        }
    }

    /// Convenience function with default parameters
    pub fn find_root(&mut self, a: f64, b: f64) -> Result<BrentResult, SolverError> {
        self.solve(a, b, None, None)
    }
}

impl fmt::Debug for Brent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Brent( root: {}, froot: {}, iters: {}, converged: {})",
            self.root, self.froot, self.iters, self.converged
        )
    }
}

#[cfg(test)]
mod brent_tests {
    use super::*;
    use crate::solve::SingleDimFn;
    use float_cmp::{F64Margin, approx_eq};

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-10,
        ulps: 10,
    };

    #[test]
    fn test_quadratic_root() {
        // f(x) = x^2 - 2, root at x = √2 ≈ 1.414
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x * x - 2.0));

        let result = brent.find_root(1.0, 2.0).unwrap();

        assert!(approx_eq!(f64, result.root, 2_f64.sqrt(), MARGIN));
        assert!(result.froot.abs() < 1e-10);
        assert!(result.converged);
        assert!(result.final_bracket_size < 1e-10);
        assert!(format!("{:?}", brent).contains("converged: true"));
    }

    #[test]
    fn test_cubic_root() {
        // f(x) = x^3 - x - 1, root ≈ 1.324717957
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x.powi(3) - x - 1.0));

        let result = brent.find_root(1.0, 2.0).unwrap();

        assert!((result.root - 1.324717957).abs() < 1e-8);
        assert!(result.froot.abs() < 1e-10);
    }

    #[test]
    fn test_transcendental() {
        // f(x) = cos(x) - x, root ≈ 0.739085133
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x.cos() - x));

        let result = brent.find_root(0.0, 1.0).unwrap();

        assert!((result.root - 0.739085133).abs() < 1e-8);
        assert!(result.froot.abs() < 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x * x - 2.0));

        let result = brent.find_root(2.0, 1.0).unwrap();

        assert!(approx_eq!(f64, result.root, 2_f64.sqrt(), MARGIN));
    }

    #[test]
    fn test_root_at_boundary() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x - 1.0));

        let result = brent.find_root(1.0, 3.0).unwrap();

        assert_eq!(result.root, 1.0);
        assert_eq!(result.iters, 0);
        assert_eq!(result.fn_evals, 2);
    }

    #[test]
    fn test_custom_tolerance() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x.exp() - 3.0));

        let result = brent.solve(0.0, 2.0, Some(1e-4), Some(50)).unwrap();

        assert!((result.root - 3_f64.ln()).abs() < 1e-4);
    }

    #[test]
    fn test_steep_function() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| (x - 0.3).powi(3) * 1e6));

        let result = brent.find_root(-1.0, 2.0).unwrap();

        assert!((result.root - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_same_sign_error() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x * x + 1.0));

        let result = brent.find_root(-1.0, 1.0);

        assert!(matches!(result, Err(SolverError::SameSignError)));
    }

    #[test]
    fn test_invalid_bracket() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x));

        assert!(matches!(
            brent.find_root(1.0, 1.0),
            Err(SolverError::InvalidBracket)
        ));
        assert!(matches!(
            brent.find_root(f64::NAN, 1.0),
            Err(SolverError::InvalidBracket)
        ));
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x));

        assert!(matches!(
            brent.solve(-1.0, 1.0, Some(0.0), None),
            Err(SolverError::InvalidTolerance)
        ));
        assert!(matches!(
            brent.solve(-1.0, 1.0, Some(-1e-6), None),
            Err(SolverError::InvalidTolerance)
        ));
    }

    #[test]
    fn test_function_evaluation_error() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x.ln()));

        let result = brent.find_root(-1.0, 2.0);

        assert!(matches!(result, Err(SolverError::FunctionEvaluationError)));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let mut brent = Brent::new(SingleDimFn::new(|x: f64| x.powi(3) - x - 1.0));

        let result = brent.solve(1.0, 2.0, Some(1e-15), Some(2));

        assert!(matches!(result, Err(SolverError::MaxIterationsExceeded)));
    }
}
