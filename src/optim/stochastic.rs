use log::{debug, info, warn};
use ndarray::{Array, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{check_gradient, Fit, Observer, Silent, TrainConfig};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, LinearMap, Objective};
use crate::Matrix;

/// Epoch-based (mini-batch) gradient descent.
///
/// Each epoch walks the rows in batches of `batch_size`, stepping opposite
/// the gradient averaged over each batch, then recomputes the full-dataset
/// cost and checks the tolerance against the previous epoch. Without a batch
/// size every epoch is a single step over all rows; `batch_size(1)` updates
/// after every example.
#[derive(Clone, Debug, Default)]
pub struct StochasticGradientDescent {
    config: TrainConfig,
}

impl StochasticGradientDescent {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn train<D, O>(&self, x: &Matrix, y: &Array<f64, D>, objective: &O) -> Result<Fit<D>>
    where
        D: LinearMap,
        O: Objective<D> + ?Sized,
    {
        self.train_with_observer(x, y, objective, &mut Silent)
    }

    pub fn train_with_observer<D, O, B>(
        &self,
        x: &Matrix,
        y: &Array<f64, D>,
        objective: &O,
        observer: &mut B,
    ) -> Result<Fit<D>>
    where
        D: LinearMap,
        O: Objective<D> + ?Sized,
        B: Observer<D> + ?Sized,
    {
        self.config.validate()?;
        check_inputs(x, y)?;

        let n_samples = x.nrows();
        let batch_size = self.config.batch_size.unwrap_or(n_samples).min(n_samples);
        let full_batch = batch_size == n_samples;
        let learning_rate = self.config.learning_rate;
        let max_epochs = self.config.max_iterations;

        let mut rng = self.config.shuffle.map(StdRng::seed_from_u64);
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut weights = D::zero_weights(x.ncols(), y);

        let mut loss = objective.loss(x, y, &weights);
        debug!(
            "stochastic descent: {} samples, {} features, batch size {}, lr = {}, initial cost = {}",
            n_samples,
            x.ncols(),
            batch_size,
            learning_rate,
            loss
        );

        let mut previous: Option<f64> = None;
        for epoch in 0..max_epochs {
            if let Some(rng) = rng.as_mut() {
                order.shuffle(rng);
            }

            if full_batch {
                let gradient = objective.gradient(x, y, &weights);
                check_gradient(&weights, &gradient)?;
                weights.scaled_add(-learning_rate, &gradient);
            } else {
                for batch in order.chunks(batch_size) {
                    let x_batch = x.select(Axis(0), batch);
                    let y_batch = y.select(Axis(0), batch);
                    let gradient = objective.gradient(&x_batch, &y_batch, &weights);
                    check_gradient(&weights, &gradient)?;
                    weights.scaled_add(-learning_rate, &gradient);
                }
            }

            loss = objective.loss(x, y, &weights);
            if !loss.is_finite() {
                warn!("cost became {loss} at epoch {epoch}");
                return Err(Error::Diverged {
                    iteration: epoch,
                    loss,
                });
            }

            observer.on_iteration(epoch, loss, &weights);

            if let Some(previous) = previous {
                if self.config.tolerance.converged(previous, loss) {
                    info!("converged after {} epochs, cost = {loss:.6}", epoch + 1);
                    return Ok(Fit {
                        weights,
                        iterations: epoch + 1,
                        loss,
                        converged: true,
                    });
                }
            }
            previous = Some(loss);
        }

        info!("stopped at the epoch cap ({max_epochs}), cost = {loss:.6}");
        Ok(Fit {
            weights,
            iterations: max_epochs,
            loss,
            converged: false,
        })
    }
}
