use ndarray::Array;

use super::{LinearMap, Objective};
use crate::Matrix;

/// Mean squared error: `Σ(XW − Y)² / N`, gradient `2·Xᵀ(XW − Y) / N`.
///
/// With a single target column the loss is the plain mean of squared residuals.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquaredError;

impl<D: LinearMap> Objective<D> for SquaredError {
    fn predict(&self, x: &Matrix, w: &Array<f64, D>) -> Array<f64, D> {
        D::forward(x, w)
    }

    fn loss(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> f64 {
        let residual = D::forward(x, w) - y;
        residual.mapv(|r| r * r).sum() / x.nrows() as f64
    }

    fn gradient(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> Array<f64, D> {
        let residual = D::forward(x, w) - y;
        D::backward(x, &residual) * (2.0 / x.nrows() as f64)
    }
}
