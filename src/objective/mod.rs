//! Differentiable objectives minimized by the optimizers in [`crate::optim`].
//!
//! An objective bundles the three functions a linear learner needs:
//! - `predict`: the linear map `X·W`, optionally followed by a link function
//! - `loss`: a non-negative scalar measuring prediction error
//! - `gradient`: the analytic gradient of `loss` with respect to `W`
//!
//! Weights and targets share a dimensionality through [`LinearMap`]: vector
//! weights pair with a target column (`Ix1`), matrix weights with one target
//! column per output (`Ix2`).
//!
//! Provided objectives:
//! - [`SquaredError`]: mean squared error for regression
//! - [`LogLoss`]: sigmoid + cross-entropy, binary or one-vs-rest
//! - [`SoftmaxCrossEntropy`]: softmax + cross-entropy for one-hot targets
//! - [`Hinge`]: L2-regularized hinge loss for ±1 targets
//!
//! # Examples
//!
//! ```rust
//! use descent::{Objective, SquaredError};
//! use ndarray::array;
//!
//! let x = array![[1.0, 2.0], [3.0, 4.0]];
//! let y = array![3.0, 7.0];
//! let w = array![1.0, 1.0];
//!
//! assert_eq!(SquaredError.loss(&x, &y, &w), 0.0);
//! assert_eq!(SquaredError.predict(&x, &w), y);
//! ```

mod hinge;
mod log_loss;
mod softmax;
mod squared_error;

pub use hinge::Hinge;
pub use log_loss::LogLoss;
pub use softmax::SoftmaxCrossEntropy;
pub use squared_error::SquaredError;

use ndarray::{Array, Array1, Array2, Axis, Ix1, Ix2, RemoveAxis};

use crate::error::{ensure_len, Error, Result};
use crate::Matrix;

/// Predictions are clamped to `[EPSILON, 1 - EPSILON]` before taking logs.
pub(crate) const EPSILON: f64 = 1e-15;

/// Shape glue between a feature matrix and weights of dimensionality `Self`.
pub trait LinearMap: RemoveAxis {
    /// `X · W`
    fn forward(x: &Matrix, w: &Array<f64, Self>) -> Array<f64, Self>;

    /// `Xᵀ · delta`, shaped like the weights.
    fn backward(x: &Matrix, delta: &Array<f64, Self>) -> Array<f64, Self>;

    /// All-zero weights with one row per feature and one column per target column.
    fn zero_weights(n_features: usize, targets: &Array<f64, Self>) -> Array<f64, Self>;
}

impl LinearMap for Ix1 {
    fn forward(x: &Matrix, w: &Array1<f64>) -> Array1<f64> {
        x.dot(w)
    }

    fn backward(x: &Matrix, delta: &Array1<f64>) -> Array1<f64> {
        x.t().dot(delta)
    }

    fn zero_weights(n_features: usize, _targets: &Array1<f64>) -> Array1<f64> {
        Array1::zeros(n_features)
    }
}

impl LinearMap for Ix2 {
    fn forward(x: &Matrix, w: &Array2<f64>) -> Array2<f64> {
        x.dot(w)
    }

    fn backward(x: &Matrix, delta: &Array2<f64>) -> Array2<f64> {
        x.t().dot(delta)
    }

    fn zero_weights(n_features: usize, targets: &Array2<f64>) -> Array2<f64> {
        Array2::zeros((n_features, targets.ncols()))
    }
}

/// A prediction function, its loss, and the loss gradient.
pub trait Objective<D: LinearMap> {
    fn predict(&self, x: &Matrix, w: &Array<f64, D>) -> Array<f64, D>;

    fn loss(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> f64;

    fn gradient(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> Array<f64, D>;
}

/// An [`Objective`] assembled from three closures.
pub struct FnObjective<P, L, G> {
    predict_fn: P,
    loss_fn: L,
    gradient_fn: G,
}

impl<P, L, G> FnObjective<P, L, G> {
    pub fn new(predict_fn: P, loss_fn: L, gradient_fn: G) -> Self {
        Self {
            predict_fn,
            loss_fn,
            gradient_fn,
        }
    }
}

impl<D, P, L, G> Objective<D> for FnObjective<P, L, G>
where
    D: LinearMap,
    P: Fn(&Matrix, &Array<f64, D>) -> Array<f64, D>,
    L: Fn(&Matrix, &Array<f64, D>, &Array<f64, D>) -> f64,
    G: Fn(&Matrix, &Array<f64, D>, &Array<f64, D>) -> Array<f64, D>,
{
    fn predict(&self, x: &Matrix, w: &Array<f64, D>) -> Array<f64, D> {
        (self.predict_fn)(x, w)
    }

    fn loss(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> f64 {
        (self.loss_fn)(x, y, w)
    }

    fn gradient(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> Array<f64, D> {
        (self.gradient_fn)(x, y, w)
    }
}

/// Checks that features are non-empty and that targets have one row per example.
pub fn check_inputs<D: LinearMap>(x: &Matrix, y: &Array<f64, D>) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(Error::EmptyInput("features"));
    }
    if y.is_empty() {
        return Err(Error::EmptyInput("targets"));
    }
    ensure_len("target rows", x.nrows(), y.len_of(Axis(0)))
}

/// Checks that `w` has one row per feature column of `x`.
pub fn check_weights<D: LinearMap>(x: &Matrix, w: &Array<f64, D>) -> Result<()> {
    ensure_len("weight rows", x.ncols(), w.len_of(Axis(0)))
}
