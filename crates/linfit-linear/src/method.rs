use linfit_core::{Float, LinfitError, LinfitResult, Tensor};
use std::str::FromStr;

use crate::gradient_descent::GradientDescent;
use crate::least_squares::LeastSquares;
use crate::regression::LinearFit;

pub const LEAST_SQUARES: &str = "least_squares";
pub const GRADIENT_DESCENT: &str = "gradient_descent";

/// A way of computing linear-model parameters from training data.
pub trait FitStrategy<T: Float> {
    /// Name used in logs and by [`FitMethod::from_name`].
    fn name(&self) -> &'static str;

    /// Fit on a bias-augmented design matrix `x` (`[n, p + 1]`, column 0 all
    /// ones) and a target `y` of length `n`.
    fn fit(&self, x: &Tensor<T>, y: &Tensor<T>) -> LinfitResult<LinearFit<T>>;
}

/// The fitting strategies a [`LinearRegressor`](crate::LinearRegressor) can dispatch to.
#[derive(Debug, Clone, PartialEq)]
pub enum FitMethod<T: Float> {
    LeastSquares,
    GradientDescent(GradientDescent<T>),
}

impl<T: Float> FitMethod<T> {
    /// Resolve a method by name: `"least_squares"` or `"gradient_descent"`.
    ///
    /// `learning_rate` and `iterations` only apply to gradient descent.
    pub fn from_name(name: &str, learning_rate: T, iterations: usize) -> LinfitResult<Self> {
        match name {
            LEAST_SQUARES => Ok(FitMethod::LeastSquares),
            GRADIENT_DESCENT => Ok(FitMethod::GradientDescent(GradientDescent::new(
                learning_rate,
                iterations,
            ))),
            other => Err(LinfitError::InvalidArgument(format!(
                "Method {} not available for training linear regression",
                other
            ))),
        }
    }
}

impl<T: Float> FromStr for FitMethod<T> {
    type Err = LinfitError;

    /// Parse with the default gradient-descent settings.
    fn from_str(s: &str) -> LinfitResult<Self> {
        let defaults = GradientDescent::<T>::default();
        FitMethod::from_name(s, defaults.learning_rate, defaults.iterations)
    }
}

impl<T: Float> FitStrategy<T> for FitMethod<T> {
    fn name(&self) -> &'static str {
        match self {
            FitMethod::LeastSquares => LEAST_SQUARES,
            FitMethod::GradientDescent(gd) => gd.name(),
        }
    }

    fn fit(&self, x: &Tensor<T>, y: &Tensor<T>) -> LinfitResult<LinearFit<T>> {
        match self {
            FitMethod::LeastSquares => FitStrategy::<T>::fit(&LeastSquares, x, y),
            FitMethod::GradientDescent(gd) => gd.fit(x, y),
        }
    }
}
