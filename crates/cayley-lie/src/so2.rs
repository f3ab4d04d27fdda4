//! Special Orthogonal group SO(2) for planar rotations.
//!
//! The group is abelian and its own parameterization already is the rotation
//! angle, so `exp` and `log` are identity maps between the 1-dimensional
//! algebra and the group coordinate.

use std::ops::{Add, Mul, Neg};

use nalgebra::{Matrix1, Matrix2, RealField, SVector, Vector2};
use rand::Rng;

use crate::error::LieError;
use crate::series::cst;
use crate::traits::{LieGroup, Tangent};

/// A tangent of SO(2): the angular rate.
#[derive(Debug, Clone, Copy)]
pub struct SO2Tangent<T> {
    /// Angular rate.
    pub theta: T,
}

impl<T: RealField + Copy> SO2Tangent<T> {
    /// Create from the angular rate.
    pub fn new(theta: T) -> Self {
        Self { theta }
    }
}

impl<T: RealField + Copy> Add for SO2Tangent<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.theta + rhs.theta)
    }
}

impl<T: RealField + Copy> Neg for SO2Tangent<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.theta)
    }
}

impl<T: RealField + Copy> Mul<T> for SO2Tangent<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.theta * rhs)
    }
}

impl<T: RealField + Copy> Tangent<T> for SO2Tangent<T> {
    const DOF: usize = 1;

    type Matrix = Matrix2<T>;
    type Ad = Matrix1<T>;

    fn zero() -> Self {
        Self::new(T::zero())
    }

    fn wedge(&self) -> Matrix2<T> {
        Matrix2::new(T::zero(), -self.theta, self.theta, T::zero())
    }

    fn vee(mat: &Matrix2<T>) -> Self {
        Self::new(mat[(1, 0)])
    }

    // abelian
    fn bracket(&self, _rhs: &Self) -> Self {
        Self::new(T::zero())
    }

    fn ad(&self) -> Result<Matrix1<T>, LieError> {
        Ok(Matrix1::zeros())
    }
}

/// A planar rotation, stored as its angle in radians.
#[derive(Debug, Clone, Copy)]
pub struct SO2<T> {
    /// Rotation angle in radians.
    pub theta: T,
}

impl<T: RealField + Copy> SO2<T> {
    /// Create a rotation from an angle in radians.
    pub fn from_angle(theta: T) -> Self {
        Self { theta }
    }

    /// Recover the angle from a 2x2 rotation matrix.
    pub fn from_matrix(mat: &Matrix2<T>) -> Self {
        Self {
            theta: mat[(1, 0)].atan2(mat[(0, 0)]),
        }
    }

    /// A rotation with angle uniform in `[-pi, pi)`.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();
        let r: f64 = rng.random();
        Self {
            theta: cst((2.0 * r - 1.0) * std::f64::consts::PI),
        }
    }

    /// Rotate a point.
    pub fn rotate(&self, v: &Vector2<T>) -> Vector2<T> {
        self.matrix() * v
    }
}

impl<T: RealField + Copy> LieGroup<T> for SO2<T> {
    const PARAMS: usize = 1;

    type Tangent = SO2Tangent<T>;
    type Ad = Matrix1<T>;
    type Matrix = Matrix2<T>;
    type Params = SVector<T, 1>;

    fn identity() -> Self {
        Self { theta: T::zero() }
    }

    fn compose(&self, rhs: &Self) -> Self {
        Self {
            theta: self.theta + rhs.theta,
        }
    }

    fn inverse(&self) -> Self {
        Self { theta: -self.theta }
    }

    fn exp(tangent: SO2Tangent<T>) -> Self {
        Self {
            theta: tangent.theta,
        }
    }

    fn log(&self) -> SO2Tangent<T> {
        SO2Tangent::new(self.theta)
    }

    fn adjoint(&self) -> Result<Matrix1<T>, LieError> {
        Ok(Matrix1::identity())
    }

    fn matrix(&self) -> Matrix2<T> {
        let (s, c) = (self.theta.sin(), self.theta.cos());
        Matrix2::new(c, -s, s, c)
    }

    fn params(&self) -> SVector<T, 1> {
        SVector::<T, 1>::new(self.theta)
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self { theta: params[0] })
    }
}

impl<T: RealField + Copy> Mul for SO2<T> {
    type Output = SO2<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<T: RealField + Copy> Mul<Vector2<T>> for SO2<T> {
    type Output = Vector2<T>;

    fn mul(self, rhs: Vector2<T>) -> Self::Output {
        self.rotate(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_identity() {
        let g = SO2::<f64>::identity();
        assert_relative_eq!(g.theta, 0.0, epsilon = EPSILON);

        let h = SO2::from_angle(0.7);
        let left = SO2::identity() * h;
        let right = h * SO2::identity();
        assert_relative_eq!(left.theta, h.theta, epsilon = EPSILON);
        assert_relative_eq!(right.theta, h.theta, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_inverse() {
        let g = SO2::from_angle(0.4f64);
        let result = g * g.inverse();
        assert_relative_eq!(result.theta, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_exp_log_are_identity_maps() {
        let theta = 1.3f64;
        let g = SO2::exp(SO2Tangent::new(theta));
        assert_relative_eq!(g.theta, theta, epsilon = EPSILON);
        assert_relative_eq!(g.log().theta, theta, epsilon = EPSILON);
    }

    #[test]
    fn test_matrix() {
        let g = SO2::from_angle(std::f64::consts::FRAC_PI_4);
        let m = g.matrix();

        // orthogonal with unit determinant
        let should_be_identity = m.transpose() * m;
        assert_relative_eq!(should_be_identity[(0, 0)], 1.0, epsilon = EPSILON);
        assert_relative_eq!(should_be_identity[(1, 0)], 0.0, epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = EPSILON);

        let recovered = SO2::from_matrix(&m);
        assert_relative_eq!(recovered.theta, g.theta, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate() {
        let g = SO2::from_angle(std::f64::consts::FRAC_PI_2);
        let p = g * Vector2::new(1.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(p.y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_wedge_vee_roundtrip() {
        let tangent = SO2Tangent::new(0.37f64);
        let mat = tangent.wedge();
        assert_relative_eq!(mat[(0, 1)], -0.37, epsilon = EPSILON);
        assert_relative_eq!(SO2Tangent::vee(&mat).theta, 0.37, epsilon = EPSILON);
    }

    #[test]
    fn test_bracket_is_zero() {
        let a = SO2Tangent::new(0.5f64);
        let b = SO2Tangent::new(-1.2f64);
        assert_relative_eq!(a.bracket(&b).theta, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_adjoint_is_identity() {
        let g = SO2::from_angle(0.9f64);
        let adj = g.adjoint().unwrap();
        assert_relative_eq!(adj[(0, 0)], 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_try_from_params() {
        let g = SO2::<f64>::try_from_params(&[0.25]).unwrap();
        assert_relative_eq!(g.theta, 0.25, epsilon = EPSILON);

        let err = SO2::<f64>::try_from_params(&[0.1, 0.2]).unwrap_err();
        assert_eq!(
            err,
            LieError::InvalidParameterCount {
                expected: 1,
                got: 2
            }
        );
    }

    #[test]
    fn test_from_random() {
        for _ in 0..10 {
            let g = SO2::<f64>::from_random();
            assert!(g.theta >= -std::f64::consts::PI && g.theta < std::f64::consts::PI);
        }
    }
}
