use ndarray::{Array, Zip};

use super::{LinearMap, Objective, EPSILON};
use crate::Matrix;

/// Sigmoid link with binary cross-entropy, applied independently to every
/// output column.
///
/// With vector weights this is binary logistic regression; with matrix
/// weights and one-hot targets it is the one-vs-rest multi-class model.
/// Predictions are clamped away from 0 and 1 before taking logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogLoss;

impl LogLoss {
    pub fn sigmoid(z: f64) -> f64 {
        if z > 500.0 {
            1.0
        } else if z < -500.0 {
            0.0
        } else {
            1.0 / (1.0 + (-z).exp())
        }
    }
}

impl<D: LinearMap> Objective<D> for LogLoss {
    fn predict(&self, x: &Matrix, w: &Array<f64, D>) -> Array<f64, D> {
        D::forward(x, w).mapv_into(Self::sigmoid)
    }

    fn loss(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> f64 {
        let predictions = self.predict(x, w);
        let total = Zip::from(&predictions).and(y).fold(0.0, |acc, &p, &t| {
            let p = p.clamp(EPSILON, 1.0 - EPSILON);
            acc - t * p.ln() - (1.0 - t) * (1.0 - p).ln()
        });
        total / x.nrows() as f64
    }

    fn gradient(&self, x: &Matrix, y: &Array<f64, D>, w: &Array<f64, D>) -> Array<f64, D> {
        let error = self.predict(x, w) - y;
        D::backward(x, &error) / x.nrows() as f64
    }
}
