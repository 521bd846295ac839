use crate::error::{LinfitError, LinfitResult};
use serde::{Deserialize, Serialize};

/// Dimensions of a tensor. Vectors are `[n]`, matrices `[rows, cols]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Size along a specific axis.
    pub fn dim(&self, axis: usize) -> LinfitResult<usize> {
        self.dims.get(axis).copied().ok_or(LinfitError::InvalidAxis {
            axis,
            ndim: self.ndim(),
        })
    }

    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }

    /// `(rows, cols)` of a matrix shape.
    pub fn matrix_dims(&self) -> LinfitResult<(usize, usize)> {
        if self.ndim() != 2 {
            return Err(LinfitError::DimensionMismatch(format!(
                "expected a 2D shape, got {}",
                self
            )));
        }
        Ok((self.dims[0], self.dims[1]))
    }

    pub fn transposed(&self) -> LinfitResult<Shape> {
        let (rows, cols) = self.matrix_dims()?;
        Ok(Shape::new(vec![cols, rows]))
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape::new(dims)
    }
}
