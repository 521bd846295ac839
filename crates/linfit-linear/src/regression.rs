use linfit_core::{Float, LinfitError, LinfitResult, Tensor};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::method::{FitMethod, FitStrategy};

/// Fitted parameters of `y = x · coefficients + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct LinearParams<T: Float> {
    pub intercept: T,
    /// One coefficient per feature, shape `[p]`.
    pub coefficients: Tensor<T>,
}

impl<T: Float> LinearParams<T> {
    /// Split a bias-first weight vector `[b, w₁, …, w_p]`.
    pub fn from_weights(weights: &Tensor<T>) -> LinfitResult<Self> {
        if weights.ndim() != 1 {
            return Err(LinfitError::DimensionMismatch(format!(
                "weights must be 1D, got shape {}",
                weights.shape()
            )));
        }
        let (intercept, coefficients) = weights
            .data()
            .split_first()
            .ok_or(LinfitError::EmptyTensor)?;
        Ok(LinearParams {
            intercept: *intercept,
            coefficients: Tensor::from_slice(coefficients),
        })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.numel()
    }

    /// Predict from raw features (no bias column).
    ///
    /// A 1-D `x` is a single feature and needs exactly one coefficient.
    pub fn predict(&self, x: &Tensor<T>) -> LinfitResult<Tensor<T>> {
        match x.ndim() {
            1 => {
                if self.n_features() != 1 {
                    return Err(LinfitError::DimensionMismatch(format!(
                        "1D input needs a single-feature model, this one has {} coefficients",
                        self.n_features()
                    )));
                }
                let w = self.coefficients.data()[0];
                Ok(x.mul_scalar(w).add_scalar(self.intercept))
            }
            2 => Ok(x.matvec(&self.coefficients)?.add_scalar(self.intercept)),
            _ => Err(LinfitError::DimensionMismatch(format!(
                "expected 1D or 2D input, got shape {}",
                x.shape()
            ))),
        }
    }
}

/// Per-iteration record of a gradient-descent run, taken before each update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct TrainingHistory<T: Float> {
    /// Mean squared error at each iteration.
    pub losses: Vec<T>,
    /// Parameters at each iteration.
    pub params: Vec<LinearParams<T>>,
}

/// Result of one fit: the parameters, plus the history for iterative methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct LinearFit<T: Float> {
    pub params: LinearParams<T>,
    pub history: Option<TrainingHistory<T>>,
}

/// Ordinary least squares linear regression.
///
/// Holds no parameters until [`fit`](Self::fit) is called; every call
/// replaces the previous fit.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressor<T: Float> {
    fitted: Option<LinearFit<T>>,
}

impl<T: Float> LinearRegressor<T> {
    pub fn new() -> Self {
        LinearRegressor { fitted: None }
    }

    /// Fit with the given strategy.
    ///
    /// `x` is `[n, p]`, or `[n]` for a single feature. A column of ones is
    /// prepended before dispatching to the strategy.
    pub fn fit<S>(&mut self, x: &Tensor<T>, y: &Tensor<T>, strategy: &S) -> LinfitResult<()>
    where
        S: FitStrategy<T> + ?Sized,
    {
        let x = x.to_column_matrix()?;
        let (n, p) = x.shape().matrix_dims()?;
        if y.ndim() != 1 || y.numel() != n {
            return Err(LinfitError::ShapeMismatch {
                expected: vec![n],
                got: y.shape_vec(),
            });
        }

        let ones = Tensor::ones(vec![n, 1]);
        let x_aug = Tensor::concatenate(&[&ones, &x], 1)?;

        debug!(
            "fitting linear regression on {} samples, {} features with {}",
            n,
            p,
            strategy.name()
        );
        self.fitted = Some(strategy.fit(&x_aug, y)?);
        Ok(())
    }

    /// Fit with a method chosen by name, `"least_squares"` or
    /// `"gradient_descent"`. Unknown names fail before any work is done.
    pub fn fit_with(
        &mut self,
        x: &Tensor<T>,
        y: &Tensor<T>,
        method: &str,
        learning_rate: T,
        iterations: usize,
    ) -> LinfitResult<()> {
        let method = FitMethod::from_name(method, learning_rate, iterations)?;
        self.fit(x, y, &method)
    }

    /// Predict from raw features. Fails with [`LinfitError::NotFitted`]
    /// before the first fit.
    pub fn predict(&self, x: &Tensor<T>) -> LinfitResult<Tensor<T>> {
        self.params().ok_or(LinfitError::NotFitted)?.predict(x)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn params(&self) -> Option<&LinearParams<T>> {
        self.fitted.as_ref().map(|f| &f.params)
    }

    pub fn intercept(&self) -> Option<T> {
        self.params().map(|p| p.intercept)
    }

    pub fn coefficients(&self) -> Option<&Tensor<T>> {
        self.params().map(|p| &p.coefficients)
    }

    /// Training history of the last fit, if it was iterative.
    pub fn history(&self) -> Option<&TrainingHistory<T>> {
        self.fitted.as_ref().and_then(|f| f.history.as_ref())
    }
}
