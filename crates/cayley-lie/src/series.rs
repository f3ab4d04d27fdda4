//! Series-guarded coefficient functions.
//!
//! The exp/log maps of every group in this crate are built from a small set of
//! analytic functions of the rotation angle that have a removable singularity
//! at zero, e.g. `sin(x)/x` or `(1 - cos(x))/x^2`. Evaluating the closed form
//! at small angles divides 0 by 0, so each coefficient is packaged as a pair:
//! the exact closed form away from zero and a matched Taylor polynomial near
//! zero, switching at [`SeriesCoeff::SWITCH_THRESHOLD`].
//!
//! A single threshold serves every coefficient: at `|x| = 1e-2` the truncation
//! error of the 4th-order Taylor polynomials (~x^6) and the cancellation error
//! of the closed forms (worst for the x^4-normalized coefficient, ~1e-8 in
//! `f64`) both sit well below 1e-6, so the branches agree at the switch point
//! (see the continuity tests).

use nalgebra::RealField;

/// Convert an `f64` constant into the generic scalar type.
#[inline]
pub(crate) fn cst<T: RealField + Copy>(value: f64) -> T {
    nalgebra::convert(value)
}

/// A named analytic coefficient with a removable singularity at zero.
///
/// Each variant packages a closed-form evaluator, a Taylor-series evaluator
/// and the switch threshold between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesCoeff {
    /// `sin(x)/x`
    SinXOverX,
    /// `(1 - cos(x))/x^2`
    OneMinusCosXOverX2,
    /// `(x - sin(x))/x^3`
    XMinusSinXOverX3,
    /// `(x^2/2 + cos(x) - 1)/x^4`
    X2Over2PlusCosXMinusOneOverX4,
    /// `atan(x)/x`
    AtanXOverX,
    /// `tan(x/4)/x`
    TanXOver4OverX,
    /// `(1 - (x/2)·cot(x/2))/x^2`, the curvature coefficient of the inverse
    /// left Jacobian `V⁻¹ = I - Ω/2 + coeff·Ω²`.
    OneMinusHalfXCotHalfXOverX2,
}

impl SeriesCoeff {
    /// Switch point between the closed form and the Taylor fallback.
    pub const SWITCH_THRESHOLD: f64 = 1.0e-2;

    /// The switch threshold in the scalar type `T`.
    #[inline]
    pub fn threshold<T: RealField + Copy>(&self) -> T {
        cst(Self::SWITCH_THRESHOLD)
    }

    /// Exact closed-form value. Divides by zero at `x = 0`.
    pub fn closed_form<T: RealField + Copy>(&self, x: T) -> T {
        let one = T::one();
        let x2 = x * x;
        match self {
            Self::SinXOverX => x.sin() / x,
            Self::OneMinusCosXOverX2 => (one - x.cos()) / x2,
            Self::XMinusSinXOverX3 => (x - x.sin()) / (x2 * x),
            Self::X2Over2PlusCosXMinusOneOverX4 => {
                (x2 * cst(0.5) + x.cos() - one) / (x2 * x2)
            }
            Self::AtanXOverX => x.atan() / x,
            Self::TanXOver4OverX => (x * cst(0.25)).tan() / x,
            Self::OneMinusHalfXCotHalfXOverX2 => {
                // (x/2)·cot(x/2) = x·sin(x) / (2·(1 - cos(x)))
                (one - x * x.sin() / ((one - x.cos()) * cst(2.0))) / x2
            }
        }
    }

    /// Matched 4th-order Taylor polynomial about `x = 0`.
    pub fn taylor<T: RealField + Copy>(&self, x: T) -> T {
        let x2 = x * x;
        let poly = |c0: f64, c1: f64, c2: f64| cst::<T>(c0) + x2 * (cst::<T>(c1) + x2 * cst::<T>(c2));
        match self {
            Self::SinXOverX => poly(1.0, -1.0 / 6.0, 1.0 / 120.0),
            Self::OneMinusCosXOverX2 => poly(1.0 / 2.0, -1.0 / 24.0, 1.0 / 720.0),
            Self::XMinusSinXOverX3 => poly(1.0 / 6.0, -1.0 / 120.0, 1.0 / 5040.0),
            Self::X2Over2PlusCosXMinusOneOverX4 => poly(1.0 / 24.0, -1.0 / 720.0, 1.0 / 40320.0),
            Self::AtanXOverX => poly(1.0, -1.0 / 3.0, 1.0 / 5.0),
            Self::TanXOver4OverX => poly(1.0 / 4.0, 1.0 / 192.0, 1.0 / 7680.0),
            Self::OneMinusHalfXCotHalfXOverX2 => poly(1.0 / 12.0, 1.0 / 720.0, 1.0 / 30240.0),
        }
    }

    /// Evaluate the coefficient, selecting the branch by `|x|`.
    #[inline]
    pub fn eval<T: RealField + Copy>(&self, x: T) -> T {
        if x.abs() < self.threshold() {
            self.taylor(x)
        } else {
            self.closed_form(x)
        }
    }
}
