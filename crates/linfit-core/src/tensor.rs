use crate::dtype::Float;
use crate::error::{LinfitError, LinfitResult};
use crate::shape::Shape;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Dense 1-D or 2-D array of scalars.
///
/// Stores data in a flat contiguous `Vec<T>` with row-major (C-order) layout.
/// Vectors have shape `[n]`; design matrices have shape `[samples, features]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Tensor<T: Float> {
    data: Vec<T>,
    shape: Shape,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl<T: Float> Tensor<T> {
    /// Create a tensor from raw data and shape.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> LinfitResult<Self> {
        let s = Shape::new(shape);
        if data.len() != s.numel() {
            return Err(LinfitError::ShapeMismatch {
                expected: s.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Tensor { data, shape: s })
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let s = Shape::new(shape);
        Tensor {
            data: vec![T::ZERO; s.numel()],
            shape: s,
        }
    }

    pub fn ones(shape: Vec<usize>) -> Self {
        let s = Shape::new(shape);
        Tensor {
            data: vec![T::ONE; s.numel()],
            shape: s,
        }
    }

    /// Create a 1-D tensor from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Tensor {
            data: data.to_vec(),
            shape: Shape::new(vec![data.len()]),
        }
    }

    /// Create a 2-D tensor from rows. All rows must have the same length.
    pub fn from_vec2d(data: &[Vec<T>]) -> LinfitResult<Self> {
        if data.is_empty() {
            return Ok(Tensor::zeros(vec![0, 0]));
        }
        let rows = data.len();
        let cols = data[0].len();
        for row in data {
            if row.len() != cols {
                return Err(LinfitError::InvalidOperation(
                    "All rows must have the same number of columns".to_string(),
                ));
            }
        }
        let flat: Vec<T> = data.iter().flat_map(|r| r.iter().copied()).collect();
        Tensor::new(flat, vec![rows, cols])
    }

    /// Uniform samples in `[0, 1)`. A fixed `seed` makes the draw reproducible.
    pub fn rand(shape: Vec<usize>, seed: Option<u64>) -> Self {
        let s = Shape::new(shape);
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let data: Vec<T> = (0..s.numel())
            .map(|_| T::from_f64(rand::Rng::gen::<f64>(&mut rng)))
            .collect();
        Tensor { data, shape: s }
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_vec(&self) -> Vec<usize> {
        self.shape.to_vec()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Multi-dimensional indexing.
    pub fn get(&self, indices: &[usize]) -> LinfitResult<T> {
        if indices.len() != self.ndim() {
            return Err(LinfitError::DimensionMismatch(format!(
                "Expected {} indices, got {}",
                self.ndim(),
                indices.len()
            )));
        }
        let mut offset = 0;
        let mut stride = 1;
        for (axis, &idx) in indices.iter().enumerate().rev() {
            let size = self.shape.dim(axis)?;
            if idx >= size {
                return Err(LinfitError::IndexOutOfBounds {
                    index: idx,
                    axis,
                    size,
                });
            }
            offset += idx * stride;
            stride *= size;
        }
        Ok(self.data[offset])
    }

    /// Borrow row `i` of a 2-D tensor.
    pub fn row(&self, i: usize) -> LinfitResult<&[T]> {
        let (rows, cols) = self.shape.matrix_dims()?;
        if i >= rows {
            return Err(LinfitError::IndexOutOfBounds {
                index: i,
                axis: 0,
                size: rows,
            });
        }
        Ok(&self.data[i * cols..(i + 1) * cols])
    }

    // ─── Shape Manipulation ─────────────────────────────────────────────────

    /// Reshape the tensor (data remains the same, only shape changes).
    pub fn reshape(&self, new_shape: Vec<usize>) -> LinfitResult<Tensor<T>> {
        let ns = Shape::new(new_shape);
        if self.numel() != ns.numel() {
            return Err(LinfitError::ShapeMismatch {
                expected: ns.to_vec(),
                got: self.shape_vec(),
            });
        }
        Ok(Tensor {
            data: self.data.clone(),
            shape: ns,
        })
    }

    /// View a 1-D tensor as a single-column matrix; 2-D tensors pass through.
    pub fn to_column_matrix(&self) -> LinfitResult<Tensor<T>> {
        match self.ndim() {
            1 => self.reshape(vec![self.numel(), 1]),
            2 => Ok(self.clone()),
            _ => Err(LinfitError::DimensionMismatch(format!(
                "expected a 1D or 2D tensor, got shape {}",
                self.shape
            ))),
        }
    }

    /// Matrix transpose.
    pub fn t(&self) -> LinfitResult<Tensor<T>> {
        let (rows, cols) = self.shape.matrix_dims()?;
        let mut data = vec![T::ZERO; self.numel()];
        for i in 0..rows {
            for j in 0..cols {
                data[j * rows + i] = self.data[i * cols + j];
            }
        }
        Ok(Tensor {
            data,
            shape: self.shape.transposed()?,
        })
    }

    /// Concatenate matrices along axis 0 (stack rows) or axis 1 (stack columns).
    pub fn concatenate(tensors: &[&Tensor<T>], axis: usize) -> LinfitResult<Tensor<T>> {
        let first = tensors.first().ok_or(LinfitError::EmptyTensor)?;
        let (rows, cols) = first.shape.matrix_dims()?;
        if axis > 1 {
            return Err(LinfitError::InvalidAxis { axis, ndim: 2 });
        }

        for t in &tensors[1..] {
            let (r, c) = t.shape.matrix_dims()?;
            if (axis == 0 && c != cols) || (axis == 1 && r != rows) {
                return Err(LinfitError::ShapeMismatch {
                    expected: first.shape_vec(),
                    got: t.shape_vec(),
                });
            }
        }

        if axis == 0 {
            let mut data = Vec::new();
            let mut total_rows = 0usize;
            for t in tensors {
                data.extend_from_slice(&t.data);
                total_rows += t.shape.dim(0)?;
            }
            return Tensor::new(data, vec![total_rows, cols]);
        }

        let mut total_cols = 0usize;
        for t in tensors {
            total_cols += t.shape.dim(1)?;
        }
        let mut data = Vec::with_capacity(rows * total_cols);
        for i in 0..rows {
            for t in tensors {
                data.extend_from_slice(t.row(i)?);
            }
        }
        Tensor::new(data, vec![rows, total_cols])
    }

    /// Copy columns `start..end` of a 2-D tensor. An empty range gives a
    /// `[rows, 0]` tensor.
    pub fn slice_cols(&self, start: usize, end: usize) -> LinfitResult<Tensor<T>> {
        let (rows, cols) = self.shape.matrix_dims()?;
        if start > end || end > cols {
            return Err(LinfitError::IndexOutOfBounds {
                index: end,
                axis: 1,
                size: cols,
            });
        }
        let mut data = Vec::with_capacity(rows * (end - start));
        for i in 0..rows {
            data.extend_from_slice(&self.data[i * cols + start..i * cols + end]);
        }
        Tensor::new(data, vec![rows, end - start])
    }

    // ─── Element-wise Operations ────────────────────────────────────────────

    pub fn apply<F: Fn(T) -> T>(&self, f: F) -> Tensor<T> {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    pub fn add_scalar(&self, s: T) -> Tensor<T> { self.apply(|x| x + s) }
    pub fn mul_scalar(&self, s: T) -> Tensor<T> { self.apply(|x| x * s) }

    fn zip_with<F: Fn(T, T) -> T>(&self, other: &Tensor<T>, op: F) -> LinfitResult<Tensor<T>> {
        if self.shape != other.shape {
            return Err(LinfitError::ShapeMismatch {
                expected: self.shape_vec(),
                got: other.shape_vec(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Tensor {
            data,
            shape: self.shape.clone(),
        })
    }

    pub fn sub(&self, other: &Tensor<T>) -> LinfitResult<Tensor<T>> {
        self.zip_with(other, |a, b| a - b)
    }

    // ─── Matrix Multiply ────────────────────────────────────────────────────

    /// Matrix product of two 2-D tensors.
    pub fn matmul(&self, other: &Tensor<T>) -> LinfitResult<Tensor<T>> {
        let (m, k) = self.shape.matrix_dims()?;
        let (k2, n) = other.shape.matrix_dims()?;
        if k != k2 {
            return Err(LinfitError::DimensionMismatch(format!(
                "matmul: inner dimensions must match, got {} and {}",
                k, k2
            )));
        }

        let mut data = vec![T::ZERO; m * n];
        for i in 0..m {
            for p in 0..k {
                let a = self.data[i * k + p];
                for j in 0..n {
                    data[i * n + j] += a * other.data[p * n + j];
                }
            }
        }
        Tensor::new(data, vec![m, n])
    }

    /// Matrix–vector product: `[m, k] · [k] → [m]`.
    pub fn matvec(&self, v: &Tensor<T>) -> LinfitResult<Tensor<T>> {
        let (m, k) = self.shape.matrix_dims()?;
        if v.ndim() != 1 || v.numel() != k {
            return Err(LinfitError::DimensionMismatch(format!(
                "matvec: matrix has {} columns but vector has shape {}",
                k, v.shape
            )));
        }
        let data = (0..m)
            .map(|i| {
                self.data[i * k..(i + 1) * k]
                    .iter()
                    .zip(v.data.iter())
                    .map(|(&a, &b)| a * b)
                    .sum()
            })
            .collect();
        Tensor::new(data, vec![m])
    }
}
