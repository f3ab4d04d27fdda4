//! Extended pose group SE(2,3): position, velocity and rotation jointly.
//!
//! The element embeds as the 5x5 matrix `[[R, v, p], [0, I2]]` and is the
//! state of strapdown inertial navigation. The group is generic over the
//! rotation representation ([`Rotation3`]); [`SE23Quat`] and [`SE23Mrp`] are
//! the concrete flavors.
//!
//! The tangent decomposes into three channels `(rho, nu, omega)`: the
//! position channel, the velocity channel and the angular-velocity channel,
//! ordered like the group's `(p, v, R)` parameters.

use std::ops::{Add, Mul, Neg};

use nalgebra::{Matrix3, RealField, SMatrix, SVector, Vector3};

use crate::error::LieError;
use crate::series::{cst, SeriesCoeff};
use crate::so3::{self, Rotation3, SO3Mrp, SO3Quat};
use crate::traits::{LieGroup, Tangent};

/// A tangent of SE(2,3): position-rate, velocity-rate and angular-velocity
/// channels.
#[derive(Debug, Clone, Copy)]
pub struct SE23Tangent<T> {
    /// Position channel.
    pub rho: Vector3<T>,
    /// Velocity channel.
    pub nu: Vector3<T>,
    /// Angular-velocity channel.
    pub omega: Vector3<T>,
}

impl<T: RealField + Copy> SE23Tangent<T> {
    /// Create from the three channels.
    pub fn new(rho: Vector3<T>, nu: Vector3<T>, omega: Vector3<T>) -> Self {
        Self { rho, nu, omega }
    }

    /// The tangent's ordered parameter vector `(rho, nu, omega)`.
    pub fn params(&self) -> SVector<T, 9> {
        let mut out = SVector::<T, 9>::zeros();
        out.fixed_rows_mut::<3>(0).copy_from(&self.rho);
        out.fixed_rows_mut::<3>(3).copy_from(&self.nu);
        out.fixed_rows_mut::<3>(6).copy_from(&self.omega);
        out
    }
}

impl<T: RealField + Copy> Add for SE23Tangent<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            rho: self.rho + rhs.rho,
            nu: self.nu + rhs.nu,
            omega: self.omega + rhs.omega,
        }
    }
}

impl<T: RealField + Copy> Neg for SE23Tangent<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            rho: -self.rho,
            nu: -self.nu,
            omega: -self.omega,
        }
    }
}

impl<T: RealField + Copy> Mul<T> for SE23Tangent<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self {
            rho: self.rho * rhs,
            nu: self.nu * rhs,
            omega: self.omega * rhs,
        }
    }
}

impl<T: RealField + Copy> Tangent<T> for SE23Tangent<T> {
    const DOF: usize = 9;

    type Matrix = SMatrix<T, 5, 5>;
    type Ad = SMatrix<T, 9, 9>;

    fn zero() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros(), Vector3::zeros())
    }

    fn wedge(&self) -> SMatrix<T, 5, 5> {
        let mut mat = SMatrix::<T, 5, 5>::zeros();
        mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.omega.wedge());
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.nu);
        mat.fixed_view_mut::<3, 1>(0, 4).copy_from(&self.rho);
        mat
    }

    fn vee(mat: &SMatrix<T, 5, 5>) -> Self {
        Self {
            rho: Vector3::new(mat[(0, 4)], mat[(1, 4)], mat[(2, 4)]),
            nu: Vector3::new(mat[(0, 3)], mat[(1, 3)], mat[(2, 3)]),
            omega: Vector3::new(mat[(2, 1)], mat[(0, 2)], mat[(1, 0)]),
        }
    }

    fn ad(&self) -> Result<SMatrix<T, 9, 9>, LieError> {
        let mut mat = SMatrix::<T, 9, 9>::zeros();
        let omega_x = self.omega.wedge();
        mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&omega_x);
        mat.fixed_view_mut::<3, 3>(3, 3).copy_from(&omega_x);
        mat.fixed_view_mut::<3, 3>(6, 6).copy_from(&omega_x);
        mat.fixed_view_mut::<3, 3>(0, 6).copy_from(&self.rho.wedge());
        mat.fixed_view_mut::<3, 3>(3, 6).copy_from(&self.nu.wedge());
        Ok(mat)
    }
}

/// An extended pose: position, velocity and rotation, generic over the
/// rotation representation.
#[derive(Debug, Clone, Copy)]
pub struct SE23<T, R> {
    /// Position.
    pub p: Vector3<T>,
    /// Velocity.
    pub v: Vector3<T>,
    /// Rotation.
    pub r: R,
}

/// Extended pose with the rotation stored as a quaternion (10 parameters).
pub type SE23Quat<T> = SE23<T, SO3Quat<T>>;

/// Extended pose with the rotation stored as MRPs (9 parameters).
pub type SE23Mrp<T> = SE23<T, SO3Mrp<T>>;

impl<T: RealField + Copy, R: Rotation3<T>> SE23<T, R> {
    /// Create from position, velocity and rotation.
    pub fn new(p: Vector3<T>, v: Vector3<T>, r: R) -> Self {
        Self { p, v, r }
    }

    /// The identity element: zero position, zero velocity, identity
    /// rotation.
    pub fn identity() -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros(), R::identity())
    }

    /// Semidirect product: translation and velocity transform under the
    /// left element's rotation.
    pub fn compose(&self, rhs: &Self) -> Self {
        Self {
            p: self.p + self.r.rotate(&rhs.p),
            v: self.v + self.r.rotate(&rhs.v),
            r: self.r.compose(&rhs.r),
        }
    }

    /// Group inverse.
    pub fn inverse(&self) -> Self {
        let r_inv = self.r.inverse();
        Self {
            p: -r_inv.rotate(&self.p),
            v: -r_inv.rotate(&self.v),
            r: r_inv,
        }
    }

    /// Exponential map. The rotation block is the SO(3) exponential; the
    /// position and velocity channels go through the left Jacobian
    /// `V = I + C1·hat(w) + C2·hat(w)^2`.
    pub fn exp(tangent: SE23Tangent<T>) -> Self {
        let v_mat = so3::left_jacobian(&tangent.omega);
        Self {
            p: v_mat * tangent.rho,
            v: v_mat * tangent.nu,
            r: R::exp(tangent.omega),
        }
    }

    /// Logarithm map, inverting [`exp`](SE23::exp) through
    /// `V⁻¹ = I - hat(w)/2 + c·hat(w)^2` with the series-guarded curvature
    /// coefficient.
    pub fn log(&self) -> SE23Tangent<T> {
        let omega = self.r.log();
        let theta = omega.norm();
        let skew = omega.wedge();
        let v_inv = Matrix3::<T>::identity() - skew * cst::<T>(0.5)
            + skew * skew * SeriesCoeff::OneMinusHalfXCotHalfXOverX2.eval(theta);
        SE23Tangent {
            rho: v_inv * self.p,
            nu: v_inv * self.v,
            omega,
        }
    }

    /// The 5x5 matrix embedding `[[R, v, p], [0, I2]]`.
    pub fn matrix(&self) -> SMatrix<T, 5, 5> {
        let mut mat = SMatrix::<T, 5, 5>::identity();
        mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.r.matrix());
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.v);
        mat.fixed_view_mut::<3, 1>(0, 4).copy_from(&self.p);
        mat
    }

    /// Recover the element from its 5x5 embedding.
    pub fn from_matrix(mat: &SMatrix<T, 5, 5>) -> Self {
        let rot = mat.fixed_view::<3, 3>(0, 0).into_owned();
        Self {
            p: Vector3::new(mat[(0, 4)], mat[(1, 4)], mat[(2, 4)]),
            v: Vector3::new(mat[(0, 3)], mat[(1, 3)], mat[(2, 3)]),
            r: R::from_rotation_matrix(&rot),
        }
    }
}

// The two concrete flavors differ only in the rotation parameter block, so
// the contract impls delegate to the generic methods and assemble the
// (p, v, rotation) parameter vector.

impl<T: RealField + Copy> LieGroup<T> for SE23Quat<T> {
    const PARAMS: usize = 10;

    type Tangent = SE23Tangent<T>;
    type Ad = SMatrix<T, 9, 9>;
    type Matrix = SMatrix<T, 5, 5>;
    type Params = SVector<T, 10>;

    fn identity() -> Self {
        SE23::identity()
    }

    fn compose(&self, rhs: &Self) -> Self {
        SE23::compose(self, rhs)
    }

    fn inverse(&self) -> Self {
        SE23::inverse(self)
    }

    fn exp(tangent: SE23Tangent<T>) -> Self {
        SE23::exp(tangent)
    }

    fn log(&self) -> SE23Tangent<T> {
        SE23::log(self)
    }

    fn adjoint(&self) -> Result<SMatrix<T, 9, 9>, LieError> {
        Err(LieError::NotSupported("SE_2(3) group adjoint"))
    }

    fn matrix(&self) -> SMatrix<T, 5, 5> {
        SE23::matrix(self)
    }

    fn params(&self) -> SVector<T, 10> {
        let mut out = SVector::<T, 10>::zeros();
        out.fixed_rows_mut::<3>(0).copy_from(&self.p);
        out.fixed_rows_mut::<3>(3).copy_from(&self.v);
        self.r.write_params(&mut out.as_mut_slice()[6..10]);
        out
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self {
            p: Vector3::new(params[0], params[1], params[2]),
            v: Vector3::new(params[3], params[4], params[5]),
            r: SO3Quat::try_from_params(&params[6..])?,
        })
    }
}

impl<T: RealField + Copy> LieGroup<T> for SE23Mrp<T> {
    const PARAMS: usize = 9;

    type Tangent = SE23Tangent<T>;
    type Ad = SMatrix<T, 9, 9>;
    type Matrix = SMatrix<T, 5, 5>;
    type Params = SVector<T, 9>;

    fn identity() -> Self {
        SE23::identity()
    }

    fn compose(&self, rhs: &Self) -> Self {
        SE23::compose(self, rhs)
    }

    fn inverse(&self) -> Self {
        SE23::inverse(self)
    }

    fn exp(tangent: SE23Tangent<T>) -> Self {
        SE23::exp(tangent)
    }

    fn log(&self) -> SE23Tangent<T> {
        SE23::log(self)
    }

    fn adjoint(&self) -> Result<SMatrix<T, 9, 9>, LieError> {
        Err(LieError::NotSupported("SE_2(3) group adjoint"))
    }

    fn matrix(&self) -> SMatrix<T, 5, 5> {
        SE23::matrix(self)
    }

    fn params(&self) -> SVector<T, 9> {
        let mut out = SVector::<T, 9>::zeros();
        out.fixed_rows_mut::<3>(0).copy_from(&self.p);
        out.fixed_rows_mut::<3>(3).copy_from(&self.v);
        self.r.write_params(&mut out.as_mut_slice()[6..9]);
        out
    }

    fn try_from_params(params: &[T]) -> Result<Self, LieError> {
        if params.len() != Self::PARAMS {
            return Err(LieError::InvalidParameterCount {
                expected: Self::PARAMS,
                got: params.len(),
            });
        }
        Ok(Self {
            p: Vector3::new(params[0], params[1], params[2]),
            v: Vector3::new(params[3], params[4], params[5]),
            r: SO3Mrp::try_from_params(&params[6..])?,
        })
    }
}

impl<T: RealField + Copy, R: Rotation3<T>> Mul for SE23<T, R> {
    type Output = SE23<T, R>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}
