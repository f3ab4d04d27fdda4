//! The operation contract shared by every concrete algebra and group.
//!
//! A Lie algebra element ([`Tangent`]) is a vector-space value with a wedge
//! embedding into a matrix representation and a bilinear, antisymmetric
//! bracket. A Lie group element ([`LieGroup`]) composes, inverts, and maps to
//! and from its algebra through `exp`/`log`.
//!
//! Mixing elements of different concrete groups is a compile-time error in
//! this design: every representation is its own type and conversions between
//! them are explicit functions, never coercions.

use std::ops::{Add, Mul, Neg};

use nalgebra::RealField;

use crate::error::LieError;

/// A Lie algebra element: a tangent vector such as an angular velocity or a
/// twist.
///
/// Vector-space structure comes from the `Add`/`Neg`/`Mul<T>` bounds. The
/// provided [`bracket`](Tangent::bracket) computes the matrix commutator of
/// the wedge embeddings and maps the result back through `vee`; algebras with
/// a cheaper closed form (so(3): the cross product) override it.
pub trait Tangent<T: RealField + Copy>:
    Copy + Add<Output = Self> + Neg<Output = Self> + Mul<T, Output = Self>
{
    /// Degrees of freedom of the algebra.
    const DOF: usize;

    /// Matrix representation produced by [`wedge`](Tangent::wedge).
    type Matrix: Copy
        + Add<Output = Self::Matrix>
        + std::ops::Sub<Output = Self::Matrix>
        + Mul<Output = Self::Matrix>;

    /// Matrix of the adjoint operator `ad`.
    type Ad;

    /// The zero element.
    fn zero() -> Self;

    /// Embed the parameter vector into the algebra's matrix representation.
    fn wedge(&self) -> Self::Matrix;

    /// Recover the parameter vector from a matrix representation. Inverse of
    /// [`wedge`](Tangent::wedge).
    fn vee(mat: &Self::Matrix) -> Self;

    /// The Lie bracket `[a, b]`.
    fn bracket(&self, rhs: &Self) -> Self {
        let a = self.wedge();
        let b = rhs.wedge();
        Self::vee(&(a * b - b * a))
    }

    /// The adjoint operator of the algebra, `ad(a)·b = [a, b]`.
    ///
    /// Returns [`LieError::NotSupported`] for representations where it is
    /// intentionally unimplemented.
    fn ad(&self) -> Result<Self::Ad, LieError>;
}

/// A Lie group element: a finite transformation such as a rotation or pose.
///
/// The contract: `exp(zero) == identity()`, `log(identity()) == zero`,
/// composition is associative with `identity()` as two-sided unit, and
/// `compose(g, inverse(g)) == identity()`.
pub trait LieGroup<T: RealField + Copy>: Copy {
    /// Number of parameters in the group's coordinate vector.
    const PARAMS: usize;

    /// The associated algebra element type.
    type Tangent: Tangent<T>;

    /// Matrix of the group adjoint.
    type Ad;

    /// Homogeneous matrix embedding of the group.
    type Matrix;

    /// Ordered parameter vector.
    type Params;

    /// The unique element with `compose(identity(), g) == g` for all `g`.
    fn identity() -> Self;

    /// Group product. Associative, not generally commutative.
    fn compose(&self, rhs: &Self) -> Self;

    /// Group inverse.
    fn inverse(&self) -> Self;

    /// Exponential map, algebra → group.
    fn exp(tangent: Self::Tangent) -> Self;

    /// Logarithm map, group → algebra. Partial inverse of
    /// [`exp`](LieGroup::exp); multivalued at rotation-angle singularities.
    fn log(&self) -> Self::Tangent;

    /// The group adjoint, satisfying `g·exp(a)·g⁻¹ = exp(adjoint(g)·a)`.
    ///
    /// Returns [`LieError::NotSupported`] for representations where it is
    /// intentionally unimplemented.
    fn adjoint(&self) -> Result<Self::Ad, LieError>;

    /// Matrix embedding of the element.
    fn matrix(&self) -> Self::Matrix;

    /// The element's ordered parameter vector.
    fn params(&self) -> Self::Params;

    /// Build an element from a parameter slice, checking its length.
    fn try_from_params(params: &[T]) -> Result<Self, LieError>;
}
