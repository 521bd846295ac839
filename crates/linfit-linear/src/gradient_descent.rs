use linfit_core::{Float, LinfitError, LinfitResult, Tensor};
use log::info;

use crate::method::{FitStrategy, GRADIENT_DESCENT};
use crate::regression::{LinearFit, LinearParams, TrainingHistory};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_ITERATIONS: usize = 1000;
pub const DEFAULT_LOG_EVERY: usize = 100_000;

/// Initial parameters are drawn uniformly from `[0, INIT_SCALE)`.
const INIT_SCALE: f64 = 0.01;

/// Batch gradient descent on the mean squared error.
///
/// Runs exactly `iterations` full-dataset steps; there is no convergence
/// check. Each step applies `w ← w − (α/n) · Xᵀ(Xw − y)` to the bias-first
/// weight vector.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescent<T: Float> {
    pub learning_rate: T,
    pub iterations: usize,
    /// Log the loss every `log_every` iterations; `0` turns progress logging off.
    pub log_every: usize,
    /// Seed for the random initial parameters. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl<T: Float> GradientDescent<T> {
    pub fn new(learning_rate: T, iterations: usize) -> Self {
        GradientDescent {
            learning_rate,
            iterations,
            log_every: DEFAULT_LOG_EVERY,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}

impl<T: Float> Default for GradientDescent<T> {
    fn default() -> Self {
        GradientDescent::new(T::from_f64(DEFAULT_LEARNING_RATE), DEFAULT_ITERATIONS)
    }
}

impl<T: Float> FitStrategy<T> for GradientDescent<T> {
    fn name(&self) -> &'static str {
        GRADIENT_DESCENT
    }

    fn fit(&self, x: &Tensor<T>, y: &Tensor<T>) -> LinfitResult<LinearFit<T>> {
        let (n, dim) = x.shape().matrix_dims()?;
        if y.ndim() != 1 || y.numel() != n {
            return Err(LinfitError::ShapeMismatch {
                expected: vec![n],
                got: y.shape_vec(),
            });
        }

        let features = x.slice_cols(1, dim)?;
        let xt = x.t()?;
        let step = self.learning_rate / T::from_usize(n);

        let init = Tensor::rand(vec![dim], self.seed).mul_scalar(T::from_f64(INIT_SCALE));
        let mut params = LinearParams::from_weights(&init)?;

        let mut losses = Vec::with_capacity(self.iterations);
        let mut snapshots = Vec::with_capacity(self.iterations);

        for iteration in 0..self.iterations {
            let error = params.predict(&features)?.sub(y)?;
            let loss = error.data().iter().map(|&e| e * e).sum::<T>() / T::from_usize(n);
            losses.push(loss);
            snapshots.push(params.clone());

            if self.log_every > 0 && iteration % self.log_every == 0 {
                info!("iteration {}: mse = {}", iteration, loss);
            }

            let gradient = xt.matvec(&error)?.mul_scalar(step);
            let (db, dw) = gradient
                .data()
                .split_first()
                .ok_or(LinfitError::EmptyTensor)?;
            params.intercept -= *db;
            params.coefficients = params.coefficients.sub(&Tensor::from_slice(dw))?;
        }

        Ok(LinearFit {
            params,
            history: Some(TrainingHistory {
                losses,
                params: snapshots,
            }),
        })
    }
}
