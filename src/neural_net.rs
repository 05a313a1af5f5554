//! Forward pass of a small classifier network: one sigmoid hidden layer and
//! a softmax output layer, each with a bias row.
//!
//! Only inference is provided. Weights come from [`TwoLayerNetwork::new`] or
//! a seeded random draw.

use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{ensure_len, Error, Result};
use crate::objective::{LogLoss, SoftmaxCrossEntropy};
use crate::preprocessing::{add_intercept, argmax_rows};
use crate::{Matrix, Vector};

#[derive(Clone, Debug)]
pub struct TwoLayerNetwork {
    /// `(n_features + 1) × n_hidden`, bias in row 0.
    hidden: Matrix,
    /// `(n_hidden + 1) × n_classes`, bias in row 0.
    output: Matrix,
}

impl TwoLayerNetwork {
    pub fn new(hidden: Matrix, output: Matrix) -> Result<Self> {
        if hidden.nrows() < 2 || hidden.ncols() == 0 {
            return Err(Error::EmptyInput("hidden layer weights"));
        }
        if output.ncols() < 2 {
            return Err(Error::InvalidConfig(format!(
                "output layer needs at least two classes, got {}",
                output.ncols()
            )));
        }
        ensure_len("output layer rows", hidden.ncols() + 1, output.nrows())?;
        Ok(Self { hidden, output })
    }

    /// Gaussian weights scaled by `1/√fan_in`, reproducible for a given seed.
    pub fn random(n_features: usize, n_hidden: usize, n_classes: usize, seed: u64) -> Result<Self> {
        if n_features == 0 || n_hidden == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer sizes must be positive, got {n_features} features and {n_hidden} hidden units"
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let hidden = Matrix::random_using((n_features + 1, n_hidden), scaled_normal(n_features + 1)?, &mut rng);
        let output = Matrix::random_using((n_hidden + 1, n_classes), scaled_normal(n_hidden + 1)?, &mut rng);
        Self::new(hidden, output)
    }

    pub fn n_features(&self) -> usize {
        self.hidden.nrows() - 1
    }

    pub fn n_classes(&self) -> usize {
        self.output.ncols()
    }

    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden
    }

    pub fn output_weights(&self) -> &Matrix {
        &self.output
    }

    /// Class probabilities, one row per example; rows sum to 1.
    pub fn forward(&self, x: &Matrix) -> Result<Matrix> {
        ensure_len("feature columns", self.n_features(), x.ncols())?;

        let activations = add_intercept(x).dot(&self.hidden).mapv_into(LogLoss::sigmoid);
        let scores = add_intercept(&activations).dot(&self.output);
        Ok(SoftmaxCrossEntropy::softmax_rows(scores))
    }

    /// Mean cross-entropy of the forward pass against one-hot targets.
    pub fn loss(&self, x: &Matrix, targets: &Matrix) -> Result<f64> {
        ensure_len("target rows", x.nrows(), targets.nrows())?;
        ensure_len("target columns", self.n_classes(), targets.ncols())?;
        let probabilities = self.forward(x)?;
        Ok(SoftmaxCrossEntropy::cross_entropy(targets, &probabilities))
    }

    /// Most probable class index per row.
    pub fn classify(&self, x: &Matrix) -> Result<Vector> {
        Ok(argmax_rows(&self.forward(x)?))
    }

    pub fn score(&self, x: &Matrix, labels: &Vector) -> Result<f64> {
        let predictions = self.classify(x)?;
        crate::metrics::accuracy_score(labels, &predictions)
    }
}

fn scaled_normal(fan_in: usize) -> Result<Normal<f64>> {
    Normal::new(0.0, 1.0 / (fan_in as f64).sqrt())
        .map_err(|e| Error::InvalidConfig(format!("weight distribution: {e}")))
}
