use log::{debug, info, warn};
use ndarray::Array;

use super::{check_gradient, Fit, Observer, Silent, TrainConfig};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, LinearMap, Objective};
use crate::Matrix;

/// Full-batch gradient descent.
///
/// Starting from zero weights, every iteration computes the loss, stops if it
/// moved less than the tolerance since the previous iteration, and otherwise
/// steps `learning_rate × gradient` downhill. Reaching `max_iterations`
/// returns the current weights with `converged == false`.
#[derive(Clone, Debug, Default)]
pub struct GradientDescent {
    config: TrainConfig,
}

impl GradientDescent {
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

        let learning_rate = self.config.learning_rate;
        let max_iterations = self.config.max_iterations;
        let mut weights = D::zero_weights(x.ncols(), y);
        debug!(
            "gradient descent: {} samples, {} features, weights {:?}, lr = {}, max_iterations = {}",
            x.nrows(),
            x.ncols(),
            weights.shape(),
            learning_rate,
            max_iterations
        );

        let mut previous: Option<f64> = None;
        for iteration in 0..max_iterations {
            let loss = objective.loss(x, y, &weights);
            if !loss.is_finite() {
                warn!("loss became {loss} at iteration {iteration}");
                return Err(Error::Diverged { iteration, loss });
            }

            observer.on_iteration(iteration, loss, &weights);

            if let Some(previous) = previous {
                if self.config.tolerance.converged(previous, loss) {
                    info!("converged after {iteration} iterations, loss = {loss:.6}");
                    return Ok(Fit {
                        weights,
                        iterations: iteration,
                        loss,
                        converged: true,
                    });
                }
            }

            let gradient = objective.gradient(x, y, &weights);
            check_gradient(&weights, &gradient)?;
            weights.scaled_add(-learning_rate, &gradient);
            previous = Some(loss);
        }

        let loss = objective.loss(x, y, &weights);
        if !loss.is_finite() {
            warn!("loss became {loss} after the last iteration");
            return Err(Error::Diverged {
                iteration: max_iterations,
                loss,
            });
        }
        info!("stopped at the iteration cap ({max_iterations}), loss = {loss:.6}");

        Ok(Fit {
            weights,
            iterations: max_iterations,
            loss,
            converged: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{LogLoss, SquaredError};
    use crate::optim::{History, Tolerance};
    use crate::Vector;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_zero_learning_rate_keeps_zero_weights() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 7.0]];
        let y = array![1.0, 2.0, 3.0];
        let config = TrainConfig::new()
            .learning_rate(0.0)
            .max_iterations(50)
            .tolerance(Tolerance::Absolute(0.0));

        let fit = GradientDescent::new(config).train(&x, &y, &SquaredError).unwrap();
        assert_eq!(fit.weights, Vector::zeros(2));
        assert_eq!(fit.iterations, 50);
        assert!(!fit.converged);

        let y2 = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
        let config = TrainConfig::new().learning_rate(0.0).max_iterations(5);
        let fit = GradientDescent::new(config).train(&x, &y2, &LogLoss).unwrap();
        assert_eq!(fit.weights, Matrix::zeros((2, 2)));
    }

    #[test]
    fn test_linear_regression_row_sums() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let y = array![6.0, 15.0, 24.0];
        let config = TrainConfig::new()
            .learning_rate(0.01)
            .max_iterations(20_000)
            .tolerance(Tolerance::Absolute(1e-14));

        let fit = GradientDescent::new(config).train(&x, &y, &SquaredError).unwrap();

        assert!(fit.converged);
        assert!(fit.loss < 1e-6);
        assert_abs_diff_eq!(fit.weights, array![1.0, 1.0, 1.0], epsilon = 1e-3);
        assert_abs_diff_eq!(SquaredError.predict(&x, &fit.weights), y, epsilon = 1e-3);
    }

    #[test]
    fn test_loss_never_increases() {
        let x = array![[1.0, 0.5], [1.0, 1.5], [1.0, 2.5], [1.0, 3.0]];
        let y = array![1.0, 2.0, 2.9, 4.2];
        let config = TrainConfig::new()
            .learning_rate(0.05)
            .max_iterations(200)
            .tolerance(Tolerance::Absolute(0.0));

        let mut history = History::new();
        let fit = GradientDescent::new(config)
            .train_with_observer(&x, &y, &SquaredError, &mut history)
            .unwrap();

        let losses = history.losses();
        assert_eq!(losses.len(), 200);
        for pair in losses.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert!(fit.loss <= SquaredError.loss(&x, &y, &Vector::zeros(2)));
    }

    #[test]
    fn test_stops_once_tolerance_met() {
        let x = array![[1.0], [2.0]];
        let y = array![2.0, 4.0];
        let config = TrainConfig::new()
            .learning_rate(0.1)
            .max_iterations(1000)
            .tolerance(Tolerance::Absolute(1e-6));

        let mut history = History::new();
        let fit = GradientDescent::new(config)
            .train_with_observer(&x, &y, &SquaredError, &mut history)
            .unwrap();

        assert!(fit.converged);
        assert!(fit.iterations < 1000);
        let losses = history.losses();
        let n = losses.len();
        assert!((losses[n - 2] - losses[n - 1]).abs() < 1e-6);
        for pair in losses[..n - 1].windows(2) {
            assert!((pair[0] - pair[1]).abs() >= 1e-6);
        }
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 0.0];
        let config = TrainConfig::new()
            .learning_rate(0.1)
            .max_iterations(10)
            .tolerance(Tolerance::Absolute(0.0));

        let mut seen = Vec::new();
        let mut observer = |i: usize, _loss: f64, w: &Vector| seen.push((i, w.len()));
        GradientDescent::new(config)
            .train_with_observer(&x, &y, &LogLoss, &mut observer)
            .unwrap();

        assert_eq!(seen.len(), 10);
        assert_eq!(seen[0], (0, 1));
        assert_eq!(seen[9], (9, 1));
    }

    #[test]
    fn test_divergence_is_an_error() {
        let x = array![[10.0, 20.0], [30.0, 40.0]];
        let y = array![1.0, 2.0];
        let config = TrainConfig::new()
            .learning_rate(10.0)
            .max_iterations(1000)
            .tolerance(Tolerance::Absolute(0.0));

        let result = GradientDescent::new(config).train(&x, &y, &SquaredError);
        assert!(matches!(result, Err(Error::Diverged { .. })));
    }

    #[test]
    fn test_shape_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];
        let result = GradientDescent::default().train(&x, &y, &SquaredError);
        assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_invalid_config() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let config = TrainConfig::new().learning_rate(-0.1);
        let result = GradientDescent::new(config).train(&x, &y, &SquaredError);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
