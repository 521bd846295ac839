use linfit_core::{Float, LinfitError, LinfitResult, Tensor};

/// Upper bound on cyclic Jacobi sweeps. Convergence is quadratic, so
/// well-formed inputs finish in well under a dozen.
const MAX_SWEEPS: usize = 100;

/// Eigendecomposition of a symmetric matrix: A = V · diag(λ) · Vᵀ
pub struct SymmetricEigen<T: Float> {
    /// Eigenvalues, sorted descending.
    pub values: Tensor<T>,
    /// Eigenvectors as columns, in the order of `values`.
    pub vectors: Tensor<T>,
}

/// Eigendecomposition of a real symmetric matrix by cyclic Jacobi rotations.
///
/// Works in `f64` regardless of `T`. Fails if `a` is not square or not
/// symmetric.
pub fn symmetric_eigen<T: Float>(a: &Tensor<T>) -> LinfitResult<SymmetricEigen<T>> {
    let (n, m) = a.shape().matrix_dims()?;
    if n != m {
        return Err(LinfitError::InvalidOperation(
            "symmetric_eigen requires a square matrix".into(),
        ));
    }

    let mut w: Vec<f64> = a.data().iter().map(|v| v.to_f64()).collect();
    let scale: f64 = w.iter().map(|v| v * v).sum();
    for i in 0..n {
        for j in (i + 1)..n {
            let diff = (w[i * n + j] - w[j * n + i]).abs();
            if diff > 1e-10 * scale.sqrt().max(1.0) {
                return Err(LinfitError::InvalidOperation(format!(
                    "symmetric_eigen requires a symmetric matrix; entries ({}, {}) differ by {}",
                    i, j, diff
                )));
            }
        }
    }

    let mut v = vec![0.0f64; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                off += w[i * n + j] * w[i * n + j];
            }
        }
        if off <= f64::EPSILON * f64::EPSILON * scale {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = w[p * n + q];
                if apq == 0.0 {
                    continue;
                }
                let app = w[p * n + p];
                let aqq = w[q * n + q];

                // Smaller root of t² + 2θt − 1 = 0 zeroes w[p][q].
                let theta = (aqq - app) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = w[k * n + p];
                    let akq = w[k * n + q];
                    w[k * n + p] = c * akp - s * akq;
                    w[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = w[p * n + k];
                    let aqk = w[q * n + k];
                    w[p * n + k] = c * apk - s * aqk;
                    w[q * n + k] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[k * n + p];
                    let vkq = v[k * n + q];
                    v[k * n + p] = c * vkp - s * vkq;
                    v[k * n + q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| w[j * n + j].total_cmp(&w[i * n + i]));

    let values: Vec<T> = order.iter().map(|&i| T::from_f64(w[i * n + i])).collect();
    let mut vectors = Vec::with_capacity(n * n);
    for row in 0..n {
        for &col in &order {
            vectors.push(T::from_f64(v[row * n + col]));
        }
    }

    Ok(SymmetricEigen {
        values: Tensor::new(values, vec![n])?,
        vectors: Tensor::new(vectors, vec![n, n])?,
    })
}
