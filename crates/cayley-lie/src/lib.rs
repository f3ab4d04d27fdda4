#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Cayley Lie Groups
//!
//! This crate provides Lie groups and Lie algebras used in robotics and
//! aerospace for representing rigid-body rotation and pose, with closed-form
//! group operations whose small-angle singularities are guarded by matched
//! Taylor series.
//!
//! ## Supported groups
//!
//! - **SO(2)**: planar rotation
//! - **SO(3)**: spatial rotation, in three parameterizations sharing one
//!   algebra — unit quaternion, modified Rodrigues parameters, and 3-2-1
//!   Euler angles
//! - **SE(2)**: planar rigid motion
//! - **SE(2,3)**: extended pose (position, velocity, rotation), the state of
//!   strapdown inertial navigation
//!
//! Everything is generic over the scalar type `T: nalgebra::RealField`, so
//! the same operations evaluate over `f32`, `f64` or a deferred-evaluation
//! scalar backend.
//!
//! ## Example
//!
//! ```rust
//! use cayley_lie::so3::SO3Quat;
//! use cayley_lie::LieGroup;
//! use nalgebra::Vector3;
//!
//! // a rotation of 90 degrees about z
//! let rotation = SO3Quat::<f64>::exp(Vector3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
//!
//! // group operations compose, invert and map back to the algebra
//! let twice = rotation.compose(&rotation);
//! let recovered = twice.log();
//! assert!((recovered.z - std::f64::consts::PI).abs() < 1e-12);
//! ```

/// Error types for group and algebra operations.
pub mod error;

/// Special Euclidean group SE(2) for planar rigid motion.
pub mod se2;

/// Extended pose group SE(2,3) for position, velocity and rotation.
pub mod se23;

/// Series-guarded coefficient functions with removable singularities.
pub mod series;

/// Special Orthogonal group SO(2) for planar rotation.
pub mod so2;

/// Special Orthogonal group SO(3) for spatial rotation.
pub mod so3;

/// The abstract Lie algebra / Lie group operation contract.
pub mod traits;

pub use error::LieError;
pub use traits::{LieGroup, Tangent};
