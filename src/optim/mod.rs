//! Gradient-descent optimizers shared by every learner.
//!
//! This module provides:
//! - `GradientDescent`: full-batch descent with an absolute loss-delta stopping rule
//! - `StochasticGradientDescent`: epoch-based mini-batch descent, typically with a
//!   relative cost-change stopping rule
//! - `train`: the same loop driven by three plain functions instead of an [`Objective`]
//! - Observers (`Silent`, `LogObserver`, `History`, or any closure) called once per
//!   iteration with the iteration index, the loss and the current weights
//!
//! # Examples
//!
//! ```rust
//! use descent::{train, Matrix, Tolerance, TrainConfig, Vector};
//! use ndarray::array;
//!
//! let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
//! let y = array![2.0, 3.0, 4.0];
//! let config = TrainConfig::new()
//!     .learning_rate(0.1)
//!     .max_iterations(5000)
//!     .tolerance(Tolerance::Absolute(1e-12));
//!
//! let fit = train(
//!     &x,
//!     &y,
//!     |x: &Matrix, w: &Vector| x.dot(w),
//!     |x: &Matrix, y: &Vector, w: &Vector| (x.dot(w) - y).mapv(|r| r * r).mean().unwrap_or(0.0),
//!     |x: &Matrix, y: &Vector, w: &Vector| x.t().dot(&(x.dot(w) - y)) * (2.0 / x.nrows() as f64),
//!     &config,
//! )
//! .unwrap();
//!
//! assert!((fit.weights[0] - 1.0).abs() < 1e-3);
//! assert!((fit.weights[1] - 1.0).abs() < 1e-3);
//! ```

mod config;
mod gradient_descent;
mod observer;
mod stochastic;

pub use config::{Tolerance, TrainConfig};
pub use gradient_descent::GradientDescent;
pub use observer::{History, LogObserver, Observer, Silent};
pub use stochastic::StochasticGradientDescent;

use ndarray::{Array, Dimension};

use crate::error::{Error, Result};
use crate::objective::{check_weights, FnObjective, LinearMap, Objective};
use crate::Matrix;

/// Outcome of a training run.
#[derive(Clone, Debug)]
pub struct Fit<D: Dimension> {
    pub weights: Array<f64, D>,
    /// Update steps (batch) or epochs (stochastic) performed.
    pub iterations: usize,
    /// Loss at the returned weights.
    pub loss: f64,
    /// `false` when the run stopped at the iteration cap.
    pub converged: bool,
}

impl<D: LinearMap> Fit<D> {
    pub fn predict<O>(&self, objective: &O, x: &Matrix) -> Result<Array<f64, D>>
    where
        O: Objective<D> + ?Sized,
    {
        check_weights(x, &self.weights)?;
        Ok(objective.predict(x, &self.weights))
    }
}

/// Trains zero-initialized weights with three plain functions.
///
/// Runs [`StochasticGradientDescent`] when `config.batch_size` is set and
/// [`GradientDescent`] otherwise.
pub fn train<D, P, L, G>(
    features: &Matrix,
    targets: &Array<f64, D>,
    predict_fn: P,
    loss_fn: L,
    gradient_fn: G,
    config: &TrainConfig,
) -> Result<Fit<D>>
where
    D: LinearMap,
    P: Fn(&Matrix, &Array<f64, D>) -> Array<f64, D>,
    L: Fn(&Matrix, &Array<f64, D>, &Array<f64, D>) -> f64,
    G: Fn(&Matrix, &Array<f64, D>, &Array<f64, D>) -> Array<f64, D>,
{
    let objective = FnObjective::new(predict_fn, loss_fn, gradient_fn);
    if config.batch_size.is_some() {
        StochasticGradientDescent::new(config.clone()).train(features, targets, &objective)
    } else {
        GradientDescent::new(config.clone()).train(features, targets, &objective)
    }
}

fn check_gradient<D: Dimension>(weights: &Array<f64, D>, gradient: &Array<f64, D>) -> Result<()> {
    if weights.shape() != gradient.shape() {
        return Err(Error::ShapeMismatch {
            what: "gradient elements",
            expected: weights.len(),
            found: gradient.len(),
        });
    }
    Ok(())
}
