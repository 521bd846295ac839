use linfit_core::{Float, LinfitError, LinfitResult, Tensor};
use linfit_linalg::pinv_symmetric;
use log::warn;

use crate::method::{FitStrategy, LEAST_SQUARES};
use crate::regression::{LinearFit, LinearParams};

/// Closed-form fit by the normal equation: `w = (XᵀX)⁺ Xᵀy`.
///
/// The pseudo-inverse keeps the solution defined when `XᵀX` is singular,
/// e.g. with collinear features or a full set of one-hot columns next to the
/// intercept; the minimum-norm solution is returned in that case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeastSquares;

impl<T: Float> FitStrategy<T> for LeastSquares {
    fn name(&self) -> &'static str {
        LEAST_SQUARES
    }

    fn fit(&self, x: &Tensor<T>, y: &Tensor<T>) -> LinfitResult<LinearFit<T>> {
        let (n, dim) = x.shape().matrix_dims()?;
        if y.numel() != n {
            return Err(LinfitError::ShapeMismatch {
                expected: vec![n],
                got: y.shape_vec(),
            });
        }

        let xt = x.t()?;
        let (xtx_pinv, rank) = pinv_symmetric(&xt.matmul(x)?)?;
        if rank < dim {
            warn!(
                "normal equations are rank deficient (rank {} of {}); using the minimum-norm solution",
                rank, dim
            );
        }
        let w = xtx_pinv.matvec(&xt.matvec(y)?)?;

        Ok(LinearFit {
            params: LinearParams::from_weights(&w)?,
            history: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::LinearRegressor;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bias_augmented_input() {
        // y = 1 + 2x
        let x: Tensor<f64> = Tensor::new(
            vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0],
            vec![3, 2],
        ).unwrap();
        let y: Tensor<f64> = Tensor::from_slice(&[3.0, 5.0, 7.0]);
        let fit = LeastSquares.fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.params.intercept, 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(fit.params.coefficients.data()[0], 2.0, epsilon = 1e-8);
        assert!(fit.history.is_none());
    }

    #[test]
    fn test_redundant_one_hot_columns() {
        let _ = env_logger::builder().is_test(true).try_init();

        // [is_a, is_b, size] with is_a + is_b = 1, duplicating the intercept.
        // y = 10 * is_b + 2 * size + 1
        let x: Tensor<f64> = Tensor::from_vec2d(&[
            vec![1.0, 0.0, 1.0],
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 5.0],
        ]).unwrap();
        let y: Tensor<f64> = Tensor::from_slice(&[3.0, 15.0, 7.0, 19.0, 11.0]);

        let mut model = LinearRegressor::new();
        model.fit(&x, &y, &LeastSquares).unwrap();
        let pred = model.predict(&x).unwrap();
        for i in 0..5 {
            assert_abs_diff_eq!(pred.data()[i], y.data()[i], epsilon = 1e-6);
        }

        let w = model.coefficients().unwrap();
        assert_abs_diff_eq!(w.data()[1] - w.data()[0], 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(w.data()[2], 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_large_valued_feature() {
        // y = 2x + 3 with x in the millions squares to a condition number
        // near 1e14 in XᵀX; the intercept direction must survive the cutoff.
        let x: Tensor<f64> = Tensor::from_slice(&[1e6, 2e6, 3e6, 4e6, 5e6]);
        let y = x.mul_scalar(2.0).add_scalar(3.0);

        let mut model = LinearRegressor::new();
        model.fit(&x, &y, &LeastSquares).unwrap();
        assert_abs_diff_eq!(model.intercept().unwrap(), 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(model.coefficients().unwrap().data()[0], 2.0, epsilon = 1e-12);

        let pred = model.predict(&x).unwrap();
        for i in 0..5 {
            assert_abs_diff_eq!(pred.data()[i], y.data()[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_no_features_fits_the_mean() {
        let x: Tensor<f64> = Tensor::zeros(vec![3, 0]);
        let y: Tensor<f64> = Tensor::from_slice(&[1.0, 2.0, 3.0]);
        let mut model = LinearRegressor::new();
        model.fit(&x, &y, &LeastSquares).unwrap();
        assert_abs_diff_eq!(model.intercept().unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(model.coefficients().unwrap().numel(), 0);
    }

    #[test]
    fn test_f32() {
        let x: Tensor<f32> = Tensor::from_slice(&[0.0, 1.0, 2.0, 3.0]);
        let y: Tensor<f32> = Tensor::from_slice(&[-1.0, 0.5, 2.0, 3.5]);
        let mut model = LinearRegressor::new();
        model.fit(&x, &y, &LeastSquares).unwrap();
        assert_abs_diff_eq!(model.intercept().unwrap(), -1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(model.coefficients().unwrap().data()[0], 1.5, epsilon = 1e-4);
    }
}
