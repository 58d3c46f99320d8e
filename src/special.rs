// Polynomial approximations, Abramowitz & Stegun 9.8.1-9.8.8

// ============================================================================
// Coefficients
// ============================================================================

mod i0 {
    /// |x| < 3.75, polynomial in (x/3.75)^2
    pub const SMALL: [f64; 7] = [
        1.0, 3.5156229, 3.0899424, 1.2067492, 0.2659732, 0.0360768, 0.0045813,
    ];

    /// |x| >= 3.75, polynomial in 3.75/|x|, times e^|x|/sqrt(|x|)
    pub const LARGE: [f64; 9] = [
        0.39894228,
        0.01328592,
        0.00225319,
        -0.00157565,
        0.00916281,
        -0.02057706,
        0.02635537,
        -0.01647633,
        0.00392377,
    ];
}

mod i1 {
    /// |x| < 3.75, polynomial in (x/3.75)^2, times x
    pub const SMALL: [f64; 7] = [
        0.5, 0.87890594, 0.51498869, 0.15084934, 0.02658733, 0.00301532, 0.00032411,
    ];

    /// |x| >= 3.75, polynomial in 3.75/|x|, times e^|x|/sqrt(|x|)
    pub const LARGE: [f64; 9] = [
        0.39894228,
        -0.03988024,
        -0.00362018,
        0.00163801,
        -0.01031555,
        0.02282967,
        -0.02895312,
        0.01787654,
        -0.00420059,
    ];
}

mod k0 {
    /// 0 < x <= 2, polynomial in x^2/4, plus -ln(x/2)·I0(x)
    pub const SMALL: [f64; 7] = [
        -0.57721566,
        0.42278420,
        0.23069756,
        0.03488590,
        0.00262698,
        0.00010750,
        0.0000074,
    ];

    /// x > 2, polynomial in 2/x, times e^-x/sqrt(x)
    pub const LARGE: [f64; 7] = [
        1.25331414,
        -0.07832358,
        0.02189568,
        -0.01062446,
        0.00587872,
        -0.00251540,
        0.00053208,
    ];
}

mod k1 {
    /// 0 < x <= 2, polynomial in x^2/4 divided by x, plus ln(x/2)·I1(x)
    pub const SMALL: [f64; 7] = [
        1.0,
        0.15443144,
        -0.67278579,
        -0.18156897,
        -0.01919402,
        -0.00110404,
        -0.00004686,
    ];

    /// x > 2, polynomial in 2/x, times e^-x/sqrt(x)
    pub const LARGE: [f64; 7] = [
        1.25331414,
        0.23498619,
        -0.03655620,
        0.01504268,
        -0.00780353,
        0.00325614,
        -0.00068245,
    ];
}

const I_SWITCH: f64 = 3.75;
const K_SWITCH: f64 = 2.0;

#[inline]
fn horner(y: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * y + c)
}

// ============================================================================
// First kind
// ============================================================================

/// Modified Bessel function of the first kind, order 0
pub fn bessel_i0(x: f64) -> f64 {
    let ax = x.abs();
    if ax < I_SWITCH {
        horner((x / I_SWITCH).powi(2), &i0::SMALL)
    } else {
        bessel_i0e(x) * ax.exp()
    }
}

/// Exponentially scaled I0: `I0(x)·e^{-|x|}`
pub fn bessel_i0e(x: f64) -> f64 {
    let ax = x.abs();
    if ax < I_SWITCH {
        bessel_i0(x) * (-ax).exp()
    } else {
        horner(I_SWITCH / ax, &i0::LARGE) / ax.sqrt()
    }
}

/// Modified Bessel function of the first kind, order 1
pub fn bessel_i1(x: f64) -> f64 {
    let ax = x.abs();
    if ax < I_SWITCH {
        x * horner((x / I_SWITCH).powi(2), &i1::SMALL)
    } else {
        bessel_i1e(x) * ax.exp()
    }
}

/// Exponentially scaled I1: `I1(x)·e^{-|x|}`
pub fn bessel_i1e(x: f64) -> f64 {
    let ax = x.abs();
    if ax < I_SWITCH {
        bessel_i1(x) * (-ax).exp()
    } else {
        (horner(I_SWITCH / ax, &i1::LARGE) / ax.sqrt()).copysign(x)
    }
}

// ============================================================================
// Second kind
// ============================================================================

/// Modified Bessel function of the second kind, order 0; NaN for `x <= 0`
pub fn bessel_k0(x: f64) -> f64 {
    if !(x > 0.0) {
        return f64::NAN;
    }
    if x <= K_SWITCH {
        -(x / 2.0).ln() * bessel_i0(x) + horner(x * x / 4.0, &k0::SMALL)
    } else {
        bessel_k0e(x) * (-x).exp()
    }
}

/// Exponentially scaled K0: `K0(x)·e^{x}`
pub fn bessel_k0e(x: f64) -> f64 {
    if !(x > 0.0) {
        return f64::NAN;
    }
    if x <= K_SWITCH {
        bessel_k0(x) * x.exp()
    } else {
        horner(K_SWITCH / x, &k0::LARGE) / x.sqrt()
    }
}

/// Modified Bessel function of the second kind, order 1
pub fn bessel_k1(x: f64) -> f64 {
    if !(x > 0.0) {
        return f64::NAN;
    }
    if x <= K_SWITCH {
        (x / 2.0).ln() * bessel_i1(x) + horner(x * x / 4.0, &k1::SMALL) / x
    } else {
        bessel_k1e(x) * (-x).exp()
    }
}

/// Exponentially scaled K1: `K1(x)·e^{x}`
pub fn bessel_k1e(x: f64) -> f64 {
    if !(x > 0.0) {
        return f64::NAN;
    }
    if x <= K_SWITCH {
        bessel_k1(x) * x.exp()
    } else {
        horner(K_SWITCH / x, &k1::LARGE) / x.sqrt()
    }
}

/// Cotangent
#[inline]
pub fn cot(x: f64) -> f64 {
    x.cos() / x.sin()
}
