#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Cayley Navigation
//!
//! Strapdown inertial-navigation propagation built on the extended pose
//! group of [`cayley_lie`].
//!
//! A navigation state (position, velocity, rotation) evolves under two
//! simultaneous flows: the body kinematics measured by the IMU (specific
//! force and angular rate) and a constant world-frame disturbance (gravity).
//! The [mixed exponential](strapdown::exp_mixed) advances the state under
//! both at once with second-order accuracy, avoiding the error accumulation
//! of first-order integration of velocity followed by position.

/// The mixed-exponential propagation step.
pub mod strapdown;

pub use strapdown::{coupling_term, exp_mixed, propagate};
