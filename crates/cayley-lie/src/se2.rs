//! Special Euclidean group SE(2) for planar rigid motion.
//!
//! An element is a planar rotation plus a translation. The tangent space is
//! the 3-dimensional planar-motion algebra; its bracket is computed through
//! the generic matrix-commutator path of the [`Tangent`] contract.

use std::ops::{Add, Mul, Neg};

use nalgebra::{Matrix2, Matrix3, RealField, SVector, Vector2};
use rand::Rng;

use crate::error::LieError;
use crate::series::{cst, SeriesCoeff};
use crate::so2::SO2;
use crate::traits::{LieGroup, Tangent};

/// A tangent of SE(2): linear velocity and angular rate.
#[derive(Debug, Clone, Copy)]
pub struct SE2Tangent<T> {
    /// Linear part.
    pub v: Vector2<T>,
    /// Angular part.
    pub theta: T,
}

impl<T: RealField + Copy> SE2Tangent<T> {
    /// Create from the linear and angular parts.
    pub fn new(vx: T, vy: T, theta: T) -> Self {
        Self {
            v: Vector2::new(vx, vy),
            theta,
        }
    }
}

impl<T: RealField + Copy> Add for SE2Tangent<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            v: self.v + rhs.v,
            theta: self.theta + rhs.theta,
        }
    }
}

impl<T: RealField + Copy> Neg for SE2Tangent<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            v: -self.v,
            theta: -self.theta,
        }
    }
}

impl<T: RealField + Copy> Mul<T> for SE2Tangent<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self {
            v: self.v * rhs,
            theta: self.theta * rhs,
        }
    }
}

impl<T: RealField + Copy> Tangent<T> for SE2Tangent<T> {
    const DOF: usize = 3;

    type Matrix = Matrix3<T>;
    type Ad = Matrix3<T>;

    fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    fn wedge(&self) -> Matrix3<T> {
        let z = T::zero();
        Matrix3::new(
            z, -self.theta, self.v.x, //
            self.theta, z, self.v.y, //
            z, z, z,
        )
    }

    fn vee(mat: &Matrix3<T>) -> Self {
        Self {
            v: Vector2::new(mat[(0, 2)], mat[(1, 2)]),
            theta: mat[(1, 0)],
        }
    }

    fn ad(&self) -> Result<Matrix3<T>, LieError> {
        Err(LieError::NotSupported("se(2) tangent adjoint"))
    }
}

/// A planar rigid transformation: rotation plus translation.
#[derive(Debug, Clone, Copy)]
pub struct SE2<T> {
    /// Rotation part.
    pub r: SO2<T>,
    /// Translation part.
    pub t: Vector2<T>,
}

impl<T: RealField + Copy> SE2<T> {
    /// Create from a rotation and translation.
    pub fn new(r: SO2<T>, t: Vector2<T>) -> Self {
        Self { r, t }
    }

    /// Create from the translation `(x, y)` and angle.
    pub fn from_xy_angle(x: T, y: T, theta: T) -> Self {
        Self {
            r: SO2::from_angle(theta),
            t: Vector2::new(x, y),
        }
    }

    /// Recover the element from a 3x3 homogeneous matrix.
    pub fn from_matrix(mat: &Matrix3<T>) -> Self {
        Self {
            r: SO2::from_angle(mat[(1, 0)].atan2(mat[(0, 0)])),
            t: Vector2::new(mat[(0, 2)], mat[(1, 2)]),
        }
    }

    /// A random transformation with angle uniform in `[-pi, pi)` and
    /// translation uniform in the unit square.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();
        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        Self {
            r: SO2::from_random(),
            t: Vector2::new(cst(r1), cst(r2)),
        }
    }

    /// Apply the transformation to a point.
    pub fn transform(&self, p: &Vector2<T>) -> Vector2<T> {
        self.r.rotate(p) + self.t
    }

    // V and V⁻¹ share these coefficients; both branches of each come from
    // the series table
    fn exp_coeffs(theta: T) -> (T, T) {
        let a = SeriesCoeff::SinXOverX.eval(theta);
        let b = theta * SeriesCoeff::OneMinusCosXOverX2.eval(theta);
        (a, b)
    }
}

impl<T: RealField + Copy> LieGroup<T> for SE2<T> {
    const PARAMS: usize = 3;

    type Tangent = SE2Tangent<T>;
    type Ad = Matrix3<T>;
    type Matrix = Matrix3<T>;
    type Params = SVector<T, 3>;

    fn identity() -> Self {
        Self {
            r: SO2::identity(),
            t: Vector2::zeros(),
        }
    }

    fn compose(&self, rhs: &Self) -> Self {
        Self {
            r: self.r.compose(&rhs.r),
            t: self.r.rotate(&rhs.t) + self.t,
        }
    }

    fn inverse(&self) -> Self {
        let r_inv = self.r.inverse();
        Self {
            r: r_inv,
            t: r_inv.rotate(&(-self.t)),
        }
    }

    fn exp(tangent: SE2Tangent<T>) -> Self {
        let theta = tangent.theta;
        let (a, b) = Self::exp_coeffs(theta);
        let v_mat = Matrix2::new(a, -b, b, a);
        Self {
            r: SO2::from_angle(theta),
            t: v_mat * tangent.v,
        }
    }

    fn log(&self) -> SE2Tangent<T> {
        let theta = self.r.theta;
        let (a, b) = Self::exp_coeffs(theta);
        let v_inv = Matrix2::new(a, b, -b, a) / (a * a + b * b);
        SE2Tangent {
            v: v_inv * self.t,
            theta,
        }
    }

    fn adjoint(&self) -> Result<Matrix3<T>, LieError> {
        let m = self.r.matrix();
        Ok(Matrix3::new(
            m[(0, 0)], m[(0, 1)], self.t.y, //
            m[(1, 0)], m[(1, 1)], -self.t.x, //
            T::zero(), T::zero(), T::one(),
        ))
    }

    fn matrix(&self) -> Matrix3<T> {
        let m = self.r.matrix();
        Matrix3::new(
            m[(0, 0)], m[(0, 1)], self.t.x, //
            m[(1, 0)], m[(1, 1)], self.t.y, //
            T::zero(), T::zero(), T::one(),
        )
    }

    fn params(&self) -> SVector<T, 3> {
        SVector::<T, 3>::from_row_slice(&[self.t.x, self.t.y, self.r.theta])
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self::from_xy_angle(params[0], params[1], params[2]))
    }
}

impl<T: RealField + Copy> Mul for SE2<T> {
    type Output = SE2<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<T: RealField + Copy> Mul<Vector2<T>> for SE2<T> {
    type Output = Vector2<T>;

    fn mul(self, rhs: Vector2<T>) -> Self::Output {
        self.transform(&rhs)
    }
}
