use thiserror::Error;

/// Error type shared by every linfit crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinfitError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Index out of bounds: index {index} for axis {axis} with size {size}")]
    IndexOutOfBounds {
        index: usize,
        axis: usize,
        size: usize,
    },

    #[error("Invalid axis: {axis} for tensor with {ndim} dimensions")]
    InvalidAxis { axis: usize, ndim: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Model is not yet fitted")]
    NotFitted,

    #[error("Empty tensor")]
    EmptyTensor,
}

pub type LinfitResult<T> = Result<T, LinfitError>;
