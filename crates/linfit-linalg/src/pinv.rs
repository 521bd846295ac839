use linfit_core::{Float, LinfitResult, Tensor};

use crate::decomposition::symmetric_eigen;

/// Magnitude at or below which an eigenvalue of an `n × n` matrix counts as
/// zero: `max|λ| · n · ε`, with `ε` the machine epsilon of `T`.
pub fn rank_cutoff<T: Float>(max_abs: f64, n: usize) -> f64 {
    max_abs * n as f64 * T::EPSILON.to_f64()
}

/// Moore–Penrose pseudo-inverse of a symmetric matrix, with its numerical rank.
///
/// `A⁺ = V · diag(1/λᵢ for |λᵢ| > cutoff, else 0) · Vᵀ`
pub fn pinv_symmetric<T: Float>(a: &Tensor<T>) -> LinfitResult<(Tensor<T>, usize)> {
    let eig = symmetric_eigen(a)?;
    let n = eig.values.numel();
    let values: Vec<f64> = eig.values.data().iter().map(|v| v.to_f64()).collect();
    let cutoff = rank_cutoff::<T>(values.iter().fold(0.0f64, |m, v| m.max(v.abs())), n);

    let mut out = vec![0.0f64; n * n];
    let mut rank = 0;
    for (k, &lambda) in values.iter().enumerate() {
        if lambda.abs() <= cutoff {
            continue;
        }
        rank += 1;
        let inv = 1.0 / lambda;
        for i in 0..n {
            let vik = eig.vectors.get(&[i, k])?.to_f64();
            for j in 0..n {
                out[i * n + j] += vik * inv * eig.vectors.get(&[j, k])?.to_f64();
            }
        }
    }

    let data = out.into_iter().map(T::from_f64).collect();
    Ok((Tensor::new(data, vec![n, n])?, rank))
}

/// Pseudo-inverse of an arbitrary matrix: `A⁺ = (AᵀA)⁺ Aᵀ`.
pub fn pinv<T: Float>(a: &Tensor<T>) -> LinfitResult<Tensor<T>> {
    let at = a.t()?;
    let (ata_pinv, _) = pinv_symmetric(&at.matmul(a)?)?;
    ata_pinv.matmul(&at)
}

/// Singular values of `A` (descending), from the eigenvalues of `AᵀA`.
pub fn singular_values<T: Float>(a: &Tensor<T>) -> LinfitResult<Tensor<T>> {
    let eig = symmetric_eigen(&a.t()?.matmul(a)?)?;
    Ok(eig.values.apply(|v| if v > T::ZERO { v.sqrt() } else { T::ZERO }))
}

/// Numerical rank of `A`, using the same cutoff as [`pinv`].
pub fn matrix_rank<T: Float>(a: &Tensor<T>) -> LinfitResult<usize> {
    let (_, rank) = pinv_symmetric(&a.t()?.matmul(a)?)?;
    Ok(rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pinv_full_rank() {
        let a: Tensor<f64> = Tensor::from_vec2d(&[
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
        ]).unwrap();

        let a_pinv = pinv(&a).unwrap();
        assert_eq!(a_pinv.shape_vec(), vec![2, 3]);

        // A⁺ A = I (2x2)
        let id = a_pinv.matmul(&a).unwrap();
        assert_abs_diff_eq!(id.get(&[0, 0]).unwrap(), 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(id.get(&[0, 1]).unwrap(), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(id.get(&[1, 0]).unwrap(), 0.0, epsilon = 1e-8);
        assert_abs_diff_eq!(id.get(&[1, 1]).unwrap(), 1.0, epsilon = 1e-8);
        assert_eq!(matrix_rank(&a).unwrap(), 2);
    }

    #[test]
    fn test_pinv_singular() {
        // [[1, 1], [1, 1]] has pseudo-inverse [[0.25, 0.25], [0.25, 0.25]]
        let a: Tensor<f64> = Tensor::ones(vec![2, 2]);
        let (a_pinv, rank) = pinv_symmetric(&a).unwrap();
        assert_eq!(rank, 1);
        for &v in a_pinv.data() {
            assert_abs_diff_eq!(v, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pinv_zero_matrix() {
        let a: Tensor<f64> = Tensor::zeros(vec![3, 3]);
        let (a_pinv, rank) = pinv_symmetric(&a).unwrap();
        assert_eq!(rank, 0);
        assert!(a_pinv.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_graded_matrix_keeps_full_rank() {
        // XᵀX for x = [1e6, ..., 5e6] with a bias column. The eigenvalues are
        // about 5.5e13 and 0.91; both are real directions.
        let a: Tensor<f64> = Tensor::from_vec2d(&[
            vec![5.0, 1.5e7],
            vec![1.5e7, 5.5e13],
        ]).unwrap();
        let (a_pinv, rank) = pinv_symmetric(&a).unwrap();
        assert_eq!(rank, 2);

        // A⁺ A = I
        let id = a_pinv.matmul(&a).unwrap();
        assert_abs_diff_eq!(id.get(&[0, 0]).unwrap(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(id.get(&[1, 1]).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rank_cutoff_follows_precision() {
        assert_eq!(rank_cutoff::<f64>(2.0, 3), 6.0 * f64::EPSILON);
        assert!(rank_cutoff::<f32>(2.0, 3) > rank_cutoff::<f64>(2.0, 3));
    }

    #[test]
    fn test_singular_values() {
        let a: Tensor<f64> = Tensor::from_vec2d(&[
            vec![3.0, 0.0],
            vec![0.0, 4.0],
        ]).unwrap();
        let s = singular_values(&a).unwrap();
        assert_abs_diff_eq!(s.data()[0], 4.0, epsilon = 1e-10);
        assert_abs_diff_eq!(s.data()[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rank_of_collinear_columns() {
        let a: Tensor<f64> = Tensor::from_vec2d(&[
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 1.0],
            vec![3.0, 6.0, 2.0],
            vec![4.0, 8.0, 5.0],
        ]).unwrap();
        assert_eq!(matrix_rank(&a).unwrap(), 2);
    }
}
