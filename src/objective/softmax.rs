use ndarray::{Array2, Zip};

use super::{LinearMap, Objective, EPSILON};
use crate::Matrix;

/// Softmax over each row followed by categorical cross-entropy.
///
/// Targets are one-hot rows. Loss `−Σ y·ln p / N`, gradient `Xᵀ(P − Y) / N`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftmaxCrossEntropy;

impl SoftmaxCrossEntropy {
    /// Row-wise softmax, shifted by the row maximum so `exp` never overflows.
    pub fn softmax_rows(mut z: Matrix) -> Matrix {
        for mut row in z.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
            row.mapv_inplace(|v| (v - max).exp());
            let sum = row.sum();
            row /= sum;
        }
        z
    }

    /// Mean categorical cross-entropy `−Σ y·ln p / N` of probability rows against one-hot rows.
    pub fn cross_entropy(targets: &Matrix, probabilities: &Matrix) -> f64 {
        let total = Zip::from(probabilities)
            .and(targets)
            .fold(0.0, |acc, &p, &t| acc - t * p.max(EPSILON).ln());
        total / targets.nrows() as f64
    }
}

impl Objective<ndarray::Ix2> for SoftmaxCrossEntropy {
    fn predict(&self, x: &Matrix, w: &Array2<f64>) -> Array2<f64> {
        Self::softmax_rows(<ndarray::Ix2 as LinearMap>::forward(x, w))
    }

    fn loss(&self, x: &Matrix, y: &Array2<f64>, w: &Array2<f64>) -> f64 {
        Self::cross_entropy(y, &self.predict(x, w))
    }

    fn gradient(&self, x: &Matrix, y: &Array2<f64>, w: &Array2<f64>) -> Array2<f64> {
        let error = self.predict(x, w) - y;
        x.t().dot(&error) / x.nrows() as f64
    }
}
