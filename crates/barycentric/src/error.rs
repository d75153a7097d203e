//! Error type shared by every geometric operation in the crate.
//!
//! All operations validate their inputs at their own boundary and report the
//! first problem to the caller; nothing is silently recovered.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BaryError>;

/// Errors raised by corner placement, conversion, projection, and lattice building.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BaryError {
    /// Corner count below 2, zero-sum weights, non-finite weights, ...
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
    /// Projection endpoints coincide; the line through them is undefined.
    #[error("degenerate segment: endpoints coincide")]
    DegenerateSegment,
    /// Coordinates (or coordinates and corners) disagree on the corner count.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

impl BaryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }
}
