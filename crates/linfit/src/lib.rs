//! # linfit
//!
//! Ordinary linear regression built from first principles.
//!
//! ## Modules
//!
//! - **core**: `Tensor`, `Shape`, the `Float` scalar trait and `LinfitError`
//! - **linalg**: Jacobi eigendecomposition, Moore–Penrose pseudo-inverse, matrix rank
//! - **linear**: `LinearRegressor` with least-squares and gradient-descent fitting
//! - **metrics**: R², RMSE, MAE and `evaluate_regression`
//! - **preprocessing**: mixed-type `Value` cells and one-hot encoding
//!
//! ```no_run
//! use linfit::core::Tensor;
//! use linfit::linear::{FitMethod, LinearRegressor};
//! use linfit::metrics::evaluate_regression;
//!
//! let x = Tensor::from_slice(&[1.0, 2.0, 3.0]);
//! let y = Tensor::from_slice(&[2.0, 4.0, 6.0]);
//!
//! let mut model = LinearRegressor::new();
//! model.fit(&x, &y, &FitMethod::LeastSquares)?;
//! let report = evaluate_regression(&y, &model.predict(&x)?);
//! println!("{}", report);
//! # Ok::<(), linfit::core::LinfitError>(())
//! ```

/// Tensor, scalar and error types.
pub use linfit_core as core;

/// Linear algebra operations.
pub use linfit_linalg as linalg;

/// Linear regression.
pub use linfit_linear as linear;

/// Evaluation metrics.
pub use linfit_metrics as metrics;

/// Categorical encoding.
pub use linfit_preprocessing as preprocessing;
