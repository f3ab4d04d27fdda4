//! Special Orthogonal group SO(3): spatial rotation in three
//! parameterizations sharing one algebra.
//!
//! The algebra so(3) is the space of angular velocities, represented here as
//! plain `Vector3<T>` with the cross product as closed-form bracket. Three
//! group realizations implement the same contract against it:
//!
//! - [`SO3Quat`] — unit quaternion (4 parameters). The workhorse.
//! - [`SO3Mrp`] — modified Rodrigues parameters (3 parameters), the
//!   stereographic projection `sigma = v/(1 + w)` of the quaternion.
//! - [`SO3EulerB321`] — 3-2-1 (yaw, pitch, roll) Euler angles, composed
//!   through the quaternion form.
//!
//! Conversions between the representations are explicit functions
//! (`from_quat`, `to_quat`, ...), never coercions; they are the principal way
//! downstream code reads or writes a specific representation.

use std::ops::Mul;

use nalgebra::{Matrix3, Quaternion, RealField, SVector, Vector3};
use rand::Rng;

use crate::error::LieError;
use crate::series::{cst, SeriesCoeff};
use crate::traits::{LieGroup, Tangent};

/// The so(3) algebra on `Vector3`: the tangent vector is the angular
/// velocity.
impl<T: RealField + Copy> Tangent<T> for Vector3<T> {
    const DOF: usize = 3;

    type Matrix = Matrix3<T>;
    type Ad = Matrix3<T>;

    fn zero() -> Self {
        Vector3::zeros()
    }

    fn wedge(&self) -> Matrix3<T> {
        let z = T::zero();
        Matrix3::new(
            z, -self.z, self.y, //
            self.z, z, -self.x, //
            -self.y, self.x, z,
        )
    }

    fn vee(mat: &Matrix3<T>) -> Self {
        Vector3::new(mat[(2, 1)], mat[(0, 2)], mat[(1, 0)])
    }

    // closed form: the commutator of skew matrices is the cross product
    fn bracket(&self, rhs: &Self) -> Self {
        self.cross(rhs)
    }

    fn ad(&self) -> Result<Matrix3<T>, LieError> {
        Ok(self.wedge())
    }
}

/// A rotation representation usable as the rotation slot of larger groups.
///
/// Implemented by all three SO(3) flavors; the extended pose group is generic
/// over it.
pub trait Rotation3<T: RealField + Copy>:
    LieGroup<T, Tangent = Vector3<T>, Matrix = Matrix3<T>, Ad = Matrix3<T>>
{
    /// Apply the rotation to a vector.
    fn rotate(&self, v: &Vector3<T>) -> Vector3<T>;

    /// Build the element from a 3x3 rotation matrix.
    fn from_rotation_matrix(mat: &Matrix3<T>) -> Self;

    /// Write the parameter vector into `out`, which must have length
    /// `PARAMS`.
    fn write_params(&self, out: &mut [T]);
}

/// Left Jacobian of SO(3): `I + C1·hat(w) + C2·hat(w)^2` with the
/// series-guarded coefficients `C1 = (1-cos t)/t^2`, `C2 = (t-sin t)/t^3`.
pub fn left_jacobian<T: RealField + Copy>(omega: &Vector3<T>) -> Matrix3<T> {
    let theta = omega.norm();
    let skew = omega.wedge();
    Matrix3::identity()
        + skew * SeriesCoeff::OneMinusCosXOverX2.eval(theta)
        + skew * skew * SeriesCoeff::XMinusSinXOverX3.eval(theta)
}

/// Right Jacobian of SO(3): the left Jacobian of `-omega`.
pub fn right_jacobian<T: RealField + Copy>(omega: &Vector3<T>) -> Matrix3<T> {
    let theta = omega.norm();
    let skew = omega.wedge();
    Matrix3::identity() - skew * SeriesCoeff::OneMinusCosXOverX2.eval(theta)
        + skew * skew * SeriesCoeff::XMinusSinXOverX3.eval(theta)
}

/// A 3D rotation stored as a quaternion.
///
/// The quaternion is expected to have unit norm; repeated composition drifts
/// off the unit sphere and renormalization is the caller's responsibility
/// (see [`SO3Quat::normalize`]). `q` and `-q` represent the same rotation.
#[derive(Debug, Clone, Copy)]
pub struct SO3Quat<T> {
    /// The quaternion, `w + x·i + y·j + z·k`.
    pub q: Quaternion<T>,
}

impl<T: RealField + Copy> SO3Quat<T> {
    /// Create from a quaternion. Expected to be normalized.
    pub fn from_quat(q: Quaternion<T>) -> Self {
        Self { q }
    }

    /// Create from `(w, x, y, z)` components. Expected to be normalized.
    pub fn from_wxyz(w: T, x: T, y: T, z: T) -> Self {
        Self {
            q: Quaternion::new(w, x, y, z),
        }
    }

    /// The underlying quaternion.
    pub fn to_quat(&self) -> Quaternion<T> {
        self.q
    }

    /// Build from a 3x3 rotation matrix (Shepperd's method: branch on the
    /// largest of trace and diagonal entries for conditioning).
    pub fn from_matrix(mat: &Matrix3<T>) -> Self {
        let one = T::one();
        let quarter = cst::<T>(0.25);
        let trace = mat.trace();
        let q = if trace > T::zero() {
            let s = (trace + one).sqrt() * cst(2.0);
            Quaternion::new(
                s * quarter,
                (mat[(2, 1)] - mat[(1, 2)]) / s,
                (mat[(0, 2)] - mat[(2, 0)]) / s,
                (mat[(1, 0)] - mat[(0, 1)]) / s,
            )
        } else if mat[(0, 0)] > mat[(1, 1)] && mat[(0, 0)] > mat[(2, 2)] {
            let s = (one + mat[(0, 0)] - mat[(1, 1)] - mat[(2, 2)]).sqrt() * cst(2.0);
            Quaternion::new(
                (mat[(2, 1)] - mat[(1, 2)]) / s,
                s * quarter,
                (mat[(0, 1)] + mat[(1, 0)]) / s,
                (mat[(0, 2)] + mat[(2, 0)]) / s,
            )
        } else if mat[(1, 1)] > mat[(2, 2)] {
            let s = (one + mat[(1, 1)] - mat[(0, 0)] - mat[(2, 2)]).sqrt() * cst(2.0);
            Quaternion::new(
                (mat[(0, 2)] - mat[(2, 0)]) / s,
                (mat[(0, 1)] + mat[(1, 0)]) / s,
                s * quarter,
                (mat[(1, 2)] + mat[(2, 1)]) / s,
            )
        } else {
            let s = (one + mat[(2, 2)] - mat[(0, 0)] - mat[(1, 1)]).sqrt() * cst(2.0);
            Quaternion::new(
                (mat[(1, 0)] - mat[(0, 1)]) / s,
                (mat[(0, 2)] + mat[(2, 0)]) / s,
                (mat[(1, 2)] + mat[(2, 1)]) / s,
                s * quarter,
            )
        };
        Self { q }
    }

    /// A uniformly random rotation (Shoemake's method).
    pub fn from_random() -> Self {
        let mut rng = rand::rng();

        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        let two_pi = 2.0 * std::f64::consts::PI;
        let one_minus_r1_sqrt = (1.0 - r1).sqrt();
        let r1_sqrt = r1.sqrt();

        let w = one_minus_r1_sqrt * (two_pi * r2).cos();
        let x = one_minus_r1_sqrt * (two_pi * r2).sin();
        let y = r1_sqrt * (two_pi * r3).cos();
        let z = r1_sqrt * (two_pi * r3).sin();

        Self::from_wxyz(cst(w), cst(x), cst(y), cst(z))
    }

    /// Return the rotation with its quaternion scaled back to unit norm.
    pub fn normalize(&self) -> Self {
        let q = self.q;
        let n = (q.w * q.w + q.i * q.i + q.j * q.j + q.k * q.k).sqrt();
        Self {
            q: Quaternion::new(q.w / n, q.i / n, q.j / n, q.k / n),
        }
    }

    /// Convert to modified Rodrigues parameters.
    pub fn to_mrp(&self) -> SO3Mrp<T> {
        SO3Mrp::from_quat(self)
    }

    /// Convert to 3-2-1 Euler angles.
    pub fn to_euler_b321(&self) -> SO3EulerB321<T> {
        SO3EulerB321::from_quat(self)
    }
}

impl<T: RealField + Copy> LieGroup<T> for SO3Quat<T> {
    const PARAMS: usize = 4;

    type Tangent = Vector3<T>;
    type Ad = Matrix3<T>;
    type Matrix = Matrix3<T>;
    type Params = SVector<T, 4>;

    fn identity() -> Self {
        Self::from_wxyz(T::one(), T::zero(), T::zero(), T::zero())
    }

    // Hamilton product
    fn compose(&self, rhs: &Self) -> Self {
        let (a, b) = (self.q, rhs.q);
        Self {
            q: Quaternion::new(
                a.w * b.w - a.i * b.i - a.j * b.j - a.k * b.k,
                a.w * b.i + a.i * b.w + a.j * b.k - a.k * b.j,
                a.w * b.j - a.i * b.k + a.j * b.w + a.k * b.i,
                a.w * b.k + a.i * b.j - a.j * b.i + a.k * b.w,
            ),
        }
    }

    // conjugate; the inverse for unit quaternions
    fn inverse(&self) -> Self {
        Self {
            q: Quaternion::new(self.q.w, -self.q.i, -self.q.j, -self.q.k),
        }
    }

    fn exp(omega: Vector3<T>) -> Self {
        let theta = omega.norm();
        let half = theta * cst(0.5);
        // sin(t/2)/t = sinc(t/2)/2
        let k = SeriesCoeff::SinXOverX.eval(half) * cst(0.5);
        let xyz = omega * k;
        Self::from_wxyz(half.cos(), xyz.x, xyz.y, xyz.z)
    }

    fn log(&self) -> Vector3<T> {
        let mut w = self.q.w;
        let mut vec = Vector3::new(self.q.i, self.q.j, self.q.k);

        // q and -q are the same rotation; canonicalize to w >= 0 so the
        // recovered angle is the short one
        if w < T::zero() {
            w = -w;
            vec = -vec;
        }

        let n = vec.norm();
        let scale = if n < SeriesCoeff::AtanXOverX.threshold() {
            // 2·atan2(n, w)/n expanded about n = 0
            (cst::<T>(2.0) / w) * (T::one() - n * n / (w * w * cst(3.0)))
        } else {
            cst::<T>(2.0) * n.atan2(w) / n
        };
        vec * scale
    }

    fn adjoint(&self) -> Result<Matrix3<T>, LieError> {
        Ok(self.matrix())
    }

    fn matrix(&self) -> Matrix3<T> {
        let (w, x, y, z) = (self.q.w, self.q.i, self.q.j, self.q.k);
        let one = T::one();
        let two = cst::<T>(2.0);
        Matrix3::new(
            one - two * (y * y + z * z),
            two * (x * y - w * z),
            two * (x * z + w * y),
            two * (x * y + w * z),
            one - two * (x * x + z * z),
            two * (y * z - w * x),
            two * (x * z - w * y),
            two * (y * z + w * x),
            one - two * (x * x + y * y),
        )
    }

    fn params(&self) -> SVector<T, 4> {
        SVector::<T, 4>::from_row_slice(&[self.q.w, self.q.i, self.q.j, self.q.k])
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self::from_wxyz(params[0], params[1], params[2], params[3]))
    }
}

impl<T: RealField + Copy> Rotation3<T> for SO3Quat<T> {
    fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        let qv = Vector3::new(self.q.i, self.q.j, self.q.k);
        let t = qv.cross(v) * cst::<T>(2.0);
        v + t * self.q.w + qv.cross(&t)
    }

    fn from_rotation_matrix(mat: &Matrix3<T>) -> Self {
        Self::from_matrix(mat)
    }

    fn write_params(&self, out: &mut [T]) {
        out[0] = self.q.w;
        out[1] = self.q.i;
        out[2] = self.q.j;
        out[3] = self.q.k;
    }
}

impl<T: RealField + Copy> Mul for SO3Quat<T> {
    type Output = SO3Quat<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<T: RealField + Copy> Mul<Vector3<T>> for SO3Quat<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.rotate(&rhs)
    }
}

/// A 3D rotation stored as modified Rodrigues parameters,
/// `sigma = v/(1 + w)` for a unit quaternion `(w, v)`.
///
/// The parameterization is singular at a full-turn rotation (the composition
/// denominator vanishes); no shadow-set switching is performed, which is fine
/// for the intended small-angle envelope (attitude work near hover).
#[derive(Debug, Clone, Copy)]
pub struct SO3Mrp<T> {
    /// The MRP coordinates.
    pub m: Vector3<T>,
}

impl<T: RealField + Copy> SO3Mrp<T> {
    /// Create from MRP coordinates.
    pub fn from_vector(m: Vector3<T>) -> Self {
        Self { m }
    }

    /// Project a quaternion onto MRP coordinates. The quaternion sign is
    /// canonicalized to `w >= 0` first, which keeps `|m| <= 1`.
    pub fn from_quat(quat: &SO3Quat<T>) -> Self {
        let q = quat.q;
        let (w, vec) = if q.w < T::zero() {
            (-q.w, Vector3::new(-q.i, -q.j, -q.k))
        } else {
            (q.w, Vector3::new(q.i, q.j, q.k))
        };
        Self {
            m: vec / (T::one() + w),
        }
    }

    /// Lift the MRP coordinates back to the quaternion.
    pub fn to_quat(&self) -> SO3Quat<T> {
        let one = T::one();
        let n2 = self.m.norm_squared();
        let s = one / (one + n2);
        let vec = self.m * (cst::<T>(2.0) * s);
        SO3Quat::from_wxyz((one - n2) * s, vec.x, vec.y, vec.z)
    }

    /// A uniformly random rotation.
    pub fn from_random() -> Self {
        Self::from_quat(&SO3Quat::from_random())
    }
}

impl<T: RealField + Copy> LieGroup<T> for SO3Mrp<T> {
    const PARAMS: usize = 3;

    type Tangent = Vector3<T>;
    type Ad = Matrix3<T>;
    type Matrix = Matrix3<T>;
    type Params = SVector<T, 3>;

    fn identity() -> Self {
        Self { m: Vector3::zeros() }
    }

    fn compose(&self, rhs: &Self) -> Self {
        let one = T::one();
        let two = cst::<T>(2.0);
        let (a, b) = (self.m, rhs.m);
        let na = a.norm_squared();
        let nb = b.norm_squared();
        let num = b * (one - na) + a * (one - nb) + a.cross(&b) * two;
        let den = one + na * nb - a.dot(&b) * two;
        Self { m: num / den }
    }

    fn inverse(&self) -> Self {
        Self { m: -self.m }
    }

    fn exp(omega: Vector3<T>) -> Self {
        let theta = omega.norm();
        Self {
            m: omega * SeriesCoeff::TanXOver4OverX.eval(theta),
        }
    }

    fn log(&self) -> Vector3<T> {
        let n = self.m.norm();
        self.m * (SeriesCoeff::AtanXOverX.eval(n) * cst(4.0))
    }

    fn adjoint(&self) -> Result<Matrix3<T>, LieError> {
        Ok(self.matrix())
    }

    fn matrix(&self) -> Matrix3<T> {
        let one = T::one();
        let n2 = self.m.norm_squared();
        let skew = self.m.wedge();
        let denom = (one + n2) * (one + n2);
        Matrix3::<T>::identity()
            + (skew * (cst::<T>(4.0) * (one - n2)) + skew * skew * cst::<T>(8.0)) / denom
    }

    fn params(&self) -> SVector<T, 3> {
        self.m
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self {
            m: Vector3::new(params[0], params[1], params[2]),
        })
    }
}

impl<T: RealField + Copy> Rotation3<T> for SO3Mrp<T> {
    fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        self.matrix() * v
    }

    fn from_rotation_matrix(mat: &Matrix3<T>) -> Self {
        Self::from_quat(&SO3Quat::from_matrix(mat))
    }

    fn write_params(&self, out: &mut [T]) {
        out[0] = self.m.x;
        out[1] = self.m.y;
        out[2] = self.m.z;
    }
}

impl<T: RealField + Copy> Mul for SO3Mrp<T> {
    type Output = SO3Mrp<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<T: RealField + Copy> Mul<Vector3<T>> for SO3Mrp<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.rotate(&rhs)
    }
}

/// A 3D rotation stored as 3-2-1 (yaw, pitch, roll) Euler angles.
///
/// The angles themselves have no closed-form composition; `compose`,
/// `inverse`, `exp` and `log` go through the quaternion form and back. The
/// extraction is degenerate at pitch = ±pi/2 (gimbal lock), where the
/// standard branch is picked.
#[derive(Debug, Clone, Copy)]
pub struct SO3EulerB321<T> {
    /// Rotation about the z axis, applied first.
    pub yaw: T,
    /// Rotation about the intermediate y axis.
    pub pitch: T,
    /// Rotation about the body x axis, applied last.
    pub roll: T,
}

impl<T: RealField + Copy> SO3EulerB321<T> {
    /// Create from yaw, pitch and roll in radians.
    pub fn new(yaw: T, pitch: T, roll: T) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Build the quaternion `qz(yaw)·qy(pitch)·qx(roll)`.
    pub fn to_quat(&self) -> SO3Quat<T> {
        let half = cst::<T>(0.5);
        let (sy, cy) = (self.yaw * half).sin_cos();
        let (sp, cp) = (self.pitch * half).sin_cos();
        let (sr, cr) = (self.roll * half).sin_cos();
        SO3Quat::from_wxyz(
            cy * cp * cr + sy * sp * sr,
            cy * cp * sr - sy * sp * cr,
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
        )
    }

    /// Extract 3-2-1 angles from a quaternion.
    pub fn from_quat(quat: &SO3Quat<T>) -> Self {
        let one = T::one();
        let two = cst::<T>(2.0);
        let (w, x, y, z) = (quat.q.w, quat.q.i, quat.q.j, quat.q.k);
        let sin_pitch = (two * (w * y - z * x)).clamp(-one, one);
        Self {
            yaw: (two * (w * z + x * y)).atan2(one - two * (y * y + z * z)),
            pitch: sin_pitch.asin(),
            roll: (two * (w * x + y * z)).atan2(one - two * (x * x + y * y)),
        }
    }

    /// A uniformly random rotation.
    pub fn from_random() -> Self {
        Self::from_quat(&SO3Quat::from_random())
    }
}

impl<T: RealField + Copy> LieGroup<T> for SO3EulerB321<T> {
    const PARAMS: usize = 3;

    type Tangent = Vector3<T>;
    type Ad = Matrix3<T>;
    type Matrix = Matrix3<T>;
    type Params = SVector<T, 3>;

    fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    fn compose(&self, rhs: &Self) -> Self {
        Self::from_quat(&self.to_quat().compose(&rhs.to_quat()))
    }

    fn inverse(&self) -> Self {
        Self::from_quat(&self.to_quat().inverse())
    }

    fn exp(omega: Vector3<T>) -> Self {
        Self::from_quat(&SO3Quat::exp(omega))
    }

    fn log(&self) -> Vector3<T> {
        self.to_quat().log()
    }

    fn adjoint(&self) -> Result<Matrix3<T>, LieError> {
        Ok(self.matrix())
    }

    fn matrix(&self) -> Matrix3<T> {
        self.to_quat().matrix()
    }

    fn params(&self) -> SVector<T, 3> {
        SVector::<T, 3>::from_row_slice(&[self.yaw, self.pitch, self.roll])
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self::new(params[0], params[1], params[2]))
    }
}

impl<T: RealField + Copy> Rotation3<T> for SO3EulerB321<T> {
    fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        self.to_quat().rotate(v)
    }

    fn from_rotation_matrix(mat: &Matrix3<T>) -> Self {
        Self::from_quat(&SO3Quat::from_matrix(mat))
    }

    fn write_params(&self, out: &mut [T]) {
        out[0] = self.yaw;
        out[1] = self.pitch;
        out[2] = self.roll;
    }
}

impl<T: RealField + Copy> Mul for SO3EulerB321<T> {
    type Output = SO3EulerB321<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl<T: RealField + Copy> Mul<Vector3<T>> for SO3EulerB321<T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.rotate(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    fn assert_mat3_eq(a: &Matrix3<f64>, b: &Matrix3<f64>, eps: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(a[(i, j)], b[(i, j)], epsilon = eps);
            }
        }
    }

    #[test]
    fn test_identity() {
        let q = SO3Quat::<f64>::identity();
        assert_relative_eq!(q.q.w, 1.0, epsilon = EPSILON);
        assert_relative_eq!(q.q.i, 0.0, epsilon = EPSILON);

        let g = SO3Quat::from_random();
        let left = SO3Quat::identity() * g;
        let right = g * SO3Quat::identity();
        assert_mat3_eq(&left.matrix(), &g.matrix(), EPSILON);
        assert_mat3_eq(&right.matrix(), &g.matrix(), EPSILON);
    }

    #[test]
    fn test_exp_zero_is_identity() {
        let q = SO3Quat::<f64>::exp(Vector3::zeros());
        assert_relative_eq!(q.q.w, 1.0, epsilon = EPSILON);
        assert_relative_eq!(q.q.i, 0.0, epsilon = EPSILON);

        let m = SO3Mrp::<f64>::exp(Vector3::zeros());
        assert_relative_eq!(m.m.norm(), 0.0, epsilon = EPSILON);

        let e = SO3EulerB321::<f64>::exp(Vector3::zeros());
        assert_relative_eq!(e.yaw, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_exp_log_roundtrip_quat() {
        let cases = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-0.5, 0.3, -0.2),
            Vector3::new(1e-5, -2e-5, 3e-5), // below the series threshold
            Vector3::new(2.0, -1.0, 0.5),
        ];
        for v in cases {
            let g = SO3Quat::<f64>::exp(v);
            let log = g.log();
            assert_relative_eq!(log.x, v.x, epsilon = 1e-8);
            assert_relative_eq!(log.y, v.y, epsilon = 1e-8);
            assert_relative_eq!(log.z, v.z, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_exp_log_roundtrip_mrp() {
        let cases = [
            Vector3::new(0.1, 0.2, 0.3),
            Vector3::new(-0.5, 0.3, -0.2),
            Vector3::new(1e-5, 2e-5, -1e-5),
        ];
        for v in cases {
            let g = SO3Mrp::<f64>::exp(v);
            let log = g.log();
            assert_relative_eq!(log.x, v.x, epsilon = 1e-8);
            assert_relative_eq!(log.y, v.y, epsilon = 1e-8);
            assert_relative_eq!(log.z, v.z, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_exp_log_roundtrip_euler() {
        let v = Vector3::new(0.2, -0.1, 0.4);
        let g = SO3EulerB321::<f64>::exp(v);
        let log = g.log();
        assert_relative_eq!(log.x, v.x, epsilon = 1e-8);
        assert_relative_eq!(log.y, v.y, epsilon = 1e-8);
        assert_relative_eq!(log.z, v.z, epsilon = 1e-8);
    }

    #[test]
    fn test_compose_matches_matrix_product() {
        let a = SO3Quat::<f64>::exp(Vector3::new(0.3, -0.2, 0.5));
        let b = SO3Quat::<f64>::exp(Vector3::new(-0.1, 0.4, 0.2));
        assert_mat3_eq(&(a * b).matrix(), &(a.matrix() * b.matrix()), EPSILON);

        let am = a.to_mrp();
        let bm = b.to_mrp();
        assert_mat3_eq(&(am * bm).matrix(), &(am.matrix() * bm.matrix()), EPSILON);

        let ae = a.to_euler_b321();
        let be = b.to_euler_b321();
        assert_mat3_eq(&(ae * be).matrix(), &(ae.matrix() * be.matrix()), EPSILON);
    }

    #[test]
    fn test_associativity() {
        let g1 = SO3Quat::<f64>::from_random();
        let g2 = SO3Quat::<f64>::from_random();
        let g3 = SO3Quat::<f64>::from_random();
        let left = (g1 * g2) * g3;
        let right = g1 * (g2 * g3);
        assert_mat3_eq(&left.matrix(), &right.matrix(), 1e-8);
    }

    #[test]
    fn test_inverse() {
        let g = SO3Quat::<f64>::exp(Vector3::new(0.5, -0.2, 0.1));
        let result = g * g.inverse();
        assert_mat3_eq(&result.matrix(), &Matrix3::identity(), EPSILON);

        let m = SO3Mrp::<f64>::exp(Vector3::new(0.5, -0.2, 0.1));
        assert_mat3_eq(&(m * m.inverse()).matrix(), &Matrix3::identity(), EPSILON);

        let e = SO3EulerB321::<f64>::new(0.4, -0.3, 0.8);
        assert_mat3_eq(&(e * e.inverse()).matrix(), &Matrix3::identity(), EPSILON);
    }

    #[test]
    fn test_wedge_vee_roundtrip() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let mat = v.wedge();
        assert_relative_eq!(mat[(0, 1)], -3.0, epsilon = EPSILON);
        assert_relative_eq!(mat[(1, 0)], 3.0, epsilon = EPSILON);
        assert_relative_eq!(mat[(0, 2)], 2.0, epsilon = EPSILON);
        let back = <Vector3<f64> as Tangent<f64>>::vee(&mat);
        assert_relative_eq!((back - v).norm(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_bracket_is_cross_product() {
        let a = Vector3::new(0.3, -0.1, 0.7);
        let b = Vector3::new(-0.2, 0.5, 0.1);
        let bracket = a.bracket(&b);
        let cross = a.cross(&b);
        assert_relative_eq!((bracket - cross).norm(), 0.0, epsilon = EPSILON);

        // and must agree with the generic commutator path
        let wa = a.wedge();
        let wb = b.wedge();
        let generic = <Vector3<f64> as Tangent<f64>>::vee(&(wa * wb - wb * wa));
        assert_relative_eq!((bracket - generic).norm(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_jacobi_identity() {
        let a = Vector3::new(0.3, -0.1, 0.7);
        let b = Vector3::new(-0.2, 0.5, 0.1);
        let c = Vector3::new(0.9, 0.4, -0.6);
        let total = a.bracket(&b.bracket(&c)) + b.bracket(&c.bracket(&a)) + c.bracket(&a.bracket(&b));
        assert_relative_eq!(total.norm(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_ad_matches_bracket() {
        let a = Vector3::new(0.3, -0.1, 0.7);
        let b = Vector3::new(-0.2, 0.5, 0.1);
        let ad = a.ad().unwrap();
        assert_relative_eq!((ad * b - a.bracket(&b)).norm(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_adjoint_is_rotation_matrix() {
        let g = SO3Quat::<f64>::exp(Vector3::new(0.1, 0.2, 0.3));
        let adj = g.adjoint().unwrap();
        assert_mat3_eq(&adj, &g.matrix(), EPSILON);

        // g·exp(a)·g^-1 == exp(Ad_g·a)
        let a = Vector3::new(0.05, -0.03, 0.08);
        let lhs = g * SO3Quat::exp(a) * g.inverse();
        let rhs = SO3Quat::exp(adj * a);
        assert_mat3_eq(&lhs.matrix(), &rhs.matrix(), 1e-8);
    }

    #[test]
    fn test_matrix_orthogonality() {
        let g = SO3Quat::<f64>::from_random();
        let r = g.matrix();
        assert_mat3_eq(&(r.transpose() * r), &Matrix3::identity(), 1e-8);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_from_matrix_roundtrip() {
        for v in [
            Vector3::new(0.3, -0.2, 0.5),
            Vector3::new(3.0, 0.1, -0.2), // large angle exercises the branch cases
            Vector3::new(0.0, 3.1, 0.0),
            Vector3::new(0.0, 0.0, -3.0),
        ] {
            let g = SO3Quat::<f64>::exp(v);
            let recovered = SO3Quat::from_matrix(&g.matrix());
            assert_mat3_eq(&recovered.matrix(), &g.matrix(), 1e-8);
        }
    }

    #[test]
    fn test_cross_representation_consistency() {
        let g = SO3Quat::<f64>::exp(Vector3::new(0.4, -0.3, 0.6));

        // quat -> euler -> quat reproduces the rotation matrix
        let via_euler = g.to_euler_b321().to_quat();
        assert_mat3_eq(&via_euler.matrix(), &g.matrix(), 1e-9);

        // quat -> mrp -> quat reproduces the rotation matrix
        let via_mrp = g.to_mrp().to_quat();
        assert_mat3_eq(&via_mrp.matrix(), &g.matrix(), 1e-9);
    }

    #[test]
    fn test_rotations_agree_across_representations() {
        let omega = Vector3::new(0.3, 0.2, -0.4);
        let v = Vector3::new(1.0, -2.0, 0.5);

        let by_quat = SO3Quat::<f64>::exp(omega).rotate(&v);
        let by_mrp = SO3Mrp::<f64>::exp(omega).rotate(&v);
        let by_euler = SO3EulerB321::<f64>::exp(omega).rotate(&v);

        assert_relative_eq!((by_quat - by_mrp).norm(), 0.0, epsilon = 1e-9);
        assert_relative_eq!((by_quat - by_euler).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_matches_matrix() {
        let g = SO3Quat::<f64>::from_random();
        let v = Vector3::new(0.7, -1.2, 2.1);
        let direct = g.rotate(&v);
        let by_matrix = g.matrix() * v;
        assert_relative_eq!((direct - by_matrix).norm(), 0.0, epsilon = 1e-8);
        assert_relative_eq!(direct.norm(), v.norm(), epsilon = 1e-8);
    }

    #[test]
    fn test_left_right_jacobian() {
        let v = Vector3::new(0.1, 0.2, 0.3);
        let jl = left_jacobian(&v);
        let jr = right_jacobian(&v);

        // J(w)·w = w for either Jacobian since hat(w)·w = 0
        assert_relative_eq!((jl * v - v).norm(), 0.0, epsilon = EPSILON);
        assert_relative_eq!((jr * v - v).norm(), 0.0, epsilon = EPSILON);

        // Jl(w) = Jr(w)^T
        assert_mat3_eq(&jl, &jr.transpose(), EPSILON);

        // series-guarded at small angles
        let tiny = Vector3::new(1e-8, -1e-8, 1e-8);
        let jl_tiny = left_jacobian(&tiny);
        assert_mat3_eq(&jl_tiny, &Matrix3::identity(), 1e-7);
    }

    #[test]
    fn test_left_jacobian_relates_exp_products() {
        // exp(w + dw) ≈ exp(Jl(w)·dw) · exp(w) to first order
        let w = Vector3::new(0.3, -0.2, 0.5);
        let dw = Vector3::new(1e-6, 2e-6, -1e-6);
        let lhs = SO3Quat::<f64>::exp(w + dw);
        let rhs = SO3Quat::exp(left_jacobian(&w) * dw) * SO3Quat::exp(w);
        assert_mat3_eq(&lhs.matrix(), &rhs.matrix(), 1e-10);
    }

    #[test]
    fn test_unit_norm_after_ops() {
        let g1 = SO3Quat::<f64>::from_random();
        let g2 = SO3Quat::<f64>::from_random();
        let composed = g1 * g2;
        let q = composed.q;
        let n = (q.w * q.w + q.i * q.i + q.j * q.j + q.k * q.k).sqrt();
        assert_relative_eq!(n, 1.0, epsilon = 1e-8);

        let renorm = composed.normalize();
        let qn = renorm.q;
        let n2 = (qn.w * qn.w + qn.i * qn.i + qn.j * qn.j + qn.k * qn.k).sqrt();
        assert_relative_eq!(n2, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mrp_inverse_is_negation() {
        let m = SO3Mrp::<f64>::exp(Vector3::new(0.2, -0.4, 0.1));
        let inv = m.inverse();
        assert_relative_eq!((inv.m + m.m).norm(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_euler_gimbal_lock_clamped() {
        // pitch exactly +pi/2; asin input must be clamped, not NaN
        let e = SO3EulerB321::<f64>::new(0.3, std::f64::consts::FRAC_PI_2, 0.0);
        let back = SO3EulerB321::from_quat(&e.to_quat());
        assert!(back.pitch.is_finite());
        assert_relative_eq!(back.pitch, std::f64::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_try_from_params() {
        let g = SO3Quat::<f64>::try_from_params(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        assert_relative_eq!(g.q.w, 1.0, epsilon = EPSILON);

        let err = SO3Quat::<f64>::try_from_params(&[1.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            LieError::InvalidParameterCount {
                expected: 4,
                got: 2
            }
        );

        let err = SO3Mrp::<f64>::try_from_params(&[0.1; 4]).unwrap_err();
        assert_eq!(
            err,
            LieError::InvalidParameterCount {
                expected: 3,
                got: 4
            }
        );
    }
}
