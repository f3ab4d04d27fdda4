//! Mixed-exponential propagation of the strapdown INS state.
//!
//! Given a pose+velocity state and two scaled tangent increments — the body
//! kinematics `l` (specific force and angular rate over the step) and the
//! external disturbance `r` (gravity over the step) — the state is advanced
//! by composing the two one-parameter flows with a coupling matrix `B` that
//! injects the velocity-to-position cross term. The disturbance's
//! contribution to position then correctly scales with the square of the
//! time step instead of linearly.

use cayley_lie::se23::{SE23Quat, SE23Tangent};
use cayley_lie::series::SeriesCoeff;
use cayley_lie::so3::SO3Quat;
use cayley_lie::{LieGroup, Tangent};
use nalgebra::{Matrix2, Matrix3x2, RealField, Vector3};

#[inline]
fn cst<T: RealField + Copy>(value: f64) -> T {
    nalgebra::convert(value)
}

/// The N(v, B) block of the mixed exponential.
///
/// `A` stacks the generator's velocity channel (column 0) and position
/// channel (column 1) as a 3x2 block; the result is
/// `A + A·B/2 + hat(w)·A·(C1·I + C2·B) + hat(w)²·A·(C2·I + C3·B)` with the
/// series-guarded coefficients `C1 = (1-cos t)/t²`, `C2 = (t-sin t)/t³`,
/// `C3 = (t²/2 + cos t - 1)/t⁴` of the rotation angle.
pub fn coupling_term<T: RealField + Copy>(
    xi: &SE23Tangent<T>,
    b: &Matrix2<T>,
) -> Matrix3x2<T> {
    let theta = xi.omega.norm();
    let omega = xi.omega.wedge();
    let a = Matrix3x2::from_columns(&[xi.nu, xi.rho]);

    let c1 = SeriesCoeff::OneMinusCosXOverX2.eval(theta);
    let c2 = SeriesCoeff::XMinusSinXOverX3.eval(theta);
    let c3 = SeriesCoeff::X2Over2PlusCosXMinusOneOverX4.eval(theta);
    let i2 = Matrix2::<T>::identity();

    a + a * b * cst::<T>(0.5)
        + omega * a * (i2 * c1 + b * c2)
        + omega * omega * a * (i2 * c2 + b * c3)
}

/// Advance a pose+velocity state under the body increment `l` and the
/// disturbance increment `r`, coupled through `B`.
///
/// The rotation composes as `R1 = exp(r.omega)·R0·exp(l.omega)`; the
/// velocity/position block composes as
/// `P1 = (Rr·R0)·N(l, B) + (Rr·P0 + N(r, -B))·(I + B)` with
/// `P0 = [v0 | p0]`.
pub fn exp_mixed<T: RealField + Copy>(
    x0: &SE23Quat<T>,
    l: &SE23Tangent<T>,
    r: &SE23Tangent<T>,
    b: &Matrix2<T>,
) -> SE23Quat<T> {
    let p0 = Matrix3x2::from_columns(&[x0.v, x0.p]);
    let pl = coupling_term(l, b);
    let nb = -*b;
    let pr = coupling_term(r, &nb);

    let rl = SO3Quat::exp(l.omega);
    let rr = SO3Quat::exp(r.omega);
    let rr0 = rr.compose(&x0.r);
    let r1 = rr0.compose(&rl);

    let i2 = Matrix2::<T>::identity();
    let p1 = rr0.matrix() * pl + (rr.matrix() * p0 + pr) * (i2 + b);

    SE23Quat::new(p1.column(1).into_owned(), p1.column(0).into_owned(), r1)
}

/// One strapdown integration step.
///
/// Builds the body increment from the accelerometer specific force and the
/// gyro angular rate (both body-frame), the disturbance increment from
/// gravity along world -z, and the kinematic coupling `B = [[0, dt], [0, 0]]`,
/// then applies [`exp_mixed`]. The rotation quaternion is not renormalized
/// here; after long step chains that is the caller's responsibility.
pub fn propagate<T: RealField + Copy>(
    x0: &SE23Quat<T>,
    accel_b: &Vector3<T>,
    omega_b: &Vector3<T>,
    gravity: T,
    dt: T,
) -> SE23Quat<T> {
    let l = SE23Tangent::new(Vector3::zeros(), accel_b * dt, omega_b * dt);
    let r = SE23Tangent::new(
        Vector3::zeros(),
        Vector3::new(T::zero(), T::zero(), -gravity * dt),
        Vector3::zeros(),
    );
    let b = Matrix2::new(T::zero(), dt, T::zero(), T::zero());
    exp_mixed(x0, &l, &r, &b)
}
