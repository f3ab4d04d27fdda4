/// An error type for Lie group and algebra operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LieError {
    /// Error when a parameter slice has the wrong length for its group.
    #[error("Expected {expected} parameters, got {got}")]
    InvalidParameterCount {
        /// The parameter count declared by the group or algebra.
        expected: usize,
        /// The length of the slice that was supplied.
        got: usize,
    },

    /// Error when an operation is intentionally unimplemented for a
    /// representation.
    #[error("Operation not supported: {0}")]
    NotSupported(&'static str),
}
