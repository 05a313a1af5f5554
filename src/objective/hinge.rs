use ndarray::{ArrayView1, Ix1};

use super::{LinearMap, Objective};
use crate::error::{Error, Result};
use crate::optim::TrainConfig;
use crate::{Matrix, Vector};

/// L2-regularized hinge loss for targets in {−1, +1}.
///
/// Cost: `0.5·‖w‖² + C·mean(max(0, 1 − y·(x·w)))`. The sub-gradient of one
/// example is `w` when its margin `y·(x·w) ≥ 1` holds and `w − C·y·x`
/// otherwise; [`Objective::gradient`] averages these over the rows it is
/// given, so a single row and a full batch go through the same code.
#[derive(Clone, Copy, Debug)]
pub struct Hinge {
    regularization_strength: f64,
}

impl Hinge {
    pub fn new(regularization_strength: f64) -> Self {
        Self {
            regularization_strength,
        }
    }

    pub fn from_config(config: &TrainConfig) -> Result<Self> {
        match config.regularization_strength {
            Some(c) if c > 0.0 => Ok(Self::new(c)),
            Some(c) => Err(Error::InvalidConfig(format!(
                "regularization strength must be positive, got {c}"
            ))),
            None => Err(Error::InvalidConfig(
                "hinge loss requires a regularization strength".to_string(),
            )),
        }
    }

    pub fn regularization_strength(&self) -> f64 {
        self.regularization_strength
    }

    /// `y·(X·w)` for every row.
    pub fn margins(x: &Matrix, y: &Vector, w: &Vector) -> Vector {
        y * &x.dot(w)
    }

    /// Penalty `C·max(0, 1 − y·(x·w))` a single example adds to the cost.
    pub fn penalty(&self, row: ArrayView1<f64>, target: f64, w: &Vector) -> f64 {
        self.regularization_strength * (1.0 - target * row.dot(w)).max(0.0)
    }

    /// Sub-gradient contributed by a single example.
    pub fn per_example_subgradient(&self, row: ArrayView1<f64>, target: f64, w: &Vector) -> Vector {
        if target * row.dot(w) >= 1.0 {
            w.clone()
        } else {
            w - &(&row * (self.regularization_strength * target))
        }
    }
}

impl Objective<Ix1> for Hinge {
    fn predict(&self, x: &Matrix, w: &Vector) -> Vector {
        <Ix1 as LinearMap>::forward(x, w)
    }

    fn loss(&self, x: &Matrix, y: &Vector, w: &Vector) -> f64 {
        let hinge = Self::margins(x, y, w).mapv(|m| (1.0 - m).max(0.0));
        0.5 * w.dot(w) + self.regularization_strength * hinge.sum() / x.nrows() as f64
    }

    fn gradient(&self, x: &Matrix, y: &Vector, w: &Vector) -> Vector {
        let n_samples = x.nrows() as f64;
        let margins = Self::margins(x, y, w);

        // Every row contributes w; violated rows also subtract C·y·x.
        let mut violations = Vector::zeros(w.len());
        for ((row, &target), &margin) in x.rows().into_iter().zip(y.iter()).zip(margins.iter()) {
            if margin < 1.0 {
                violations.scaled_add(target, &row);
            }
        }

        w - &(violations * (self.regularization_strength / n_samples))
    }
}
