use ndarray::Ix1;

use super::{check_n_features, design_matrix, split_intercept};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, SquaredError};
use crate::optim::{GradientDescent, Observer, Silent, Tolerance, TrainConfig};
use crate::{Matrix, Vector};

#[derive(Clone, Debug)]
pub struct LinearRegression {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    pub n_iterations: Option<usize>,
    pub converged: Option<bool>,
    fit_intercept: bool,
    config: TrainConfig,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            n_iterations: None,
            converged: None,
            fit_intercept: true,
            config: TrainConfig::new()
                .learning_rate(0.01)
                .max_iterations(1000)
                .tolerance(Tolerance::Absolute(1e-6)),
        }
    }

    pub fn with_intercept(fit_intercept: bool) -> Self {
        Self::new().fit_intercept(fit_intercept)
    }

    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = Tolerance::Absolute(tolerance);
        self
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        self.fit_with_observer(x, y, &mut Silent)
    }

    pub fn fit_with_observer<B>(&mut self, x: &Matrix, y: &Vector, observer: &mut B) -> Result<()>
    where
        B: Observer<Ix1> + ?Sized,
    {
        check_inputs(x, y)?;

        let design = design_matrix(x, self.fit_intercept);
        let fit = GradientDescent::new(self.config.clone()).train_with_observer(
            &design,
            y,
            &SquaredError,
            observer,
        )?;

        let (coeffs, intercept) = split_intercept(fit.weights, self.fit_intercept);
        self.coefficients = Some(coeffs);
        self.intercept = Some(intercept);
        self.n_iterations = Some(fit.iterations);
        self.converged = Some(fit.converged);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);
        check_n_features(x, coeffs.len())?;

        Ok(x.dot(coeffs) + intercept)
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::History;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_linear_regression_simple() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = LinearRegression::new().learning_rate(0.05).max_iterations(20_000).tolerance(1e-14);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        assert_abs_diff_eq!(predictions, y, epsilon = 1e-4);
        assert_eq!(model.converged, Some(true));
    }

    #[test]
    fn test_linear_regression_without_intercept() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = LinearRegression::with_intercept(false).tolerance(1e-14);
        model.fit(&x, &y).unwrap();

        let coeffs = model.coefficients.as_ref().unwrap();
        assert_abs_diff_eq!(coeffs[0], 2.0, epsilon = 1e-6);
        assert_eq!(model.intercept.unwrap(), 0.0);
    }

    #[test]
    fn test_row_sums_without_intercept() {
        let x = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let y = array![6.0, 15.0, 24.0];

        let mut model = LinearRegression::with_intercept(false)
            .learning_rate(0.01)
            .max_iterations(20_000)
            .tolerance(1e-14);
        model.fit(&x, &y).unwrap();

        assert_abs_diff_eq!(*model.coefficients.as_ref().unwrap(), array![1.0, 1.0, 1.0], epsilon = 1e-3);
        let mse = crate::metrics::mean_squared_error(&y, &model.predict(&x).unwrap()).unwrap();
        assert!(mse < 1e-6);
    }

    #[test]
    fn test_linear_regression_multivariate() {
        let x = array![[1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [4.0, 5.0]];
        let y = array![5.0, 8.0, 11.0, 14.0];

        let mut model = LinearRegression::new().learning_rate(0.02).max_iterations(20_000);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        let score = model.score(&x, &y).unwrap();

        assert!(score > 0.95);
        for (pred, actual) in predictions.iter().zip(y.iter()) {
            assert!((pred - actual).abs() < 0.1);
        }
    }

    #[test]
    fn test_loss_history_is_reported() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut history = History::new();
        let mut model = LinearRegression::new().max_iterations(25).tolerance(0.0);
        model.fit_with_observer(&x, &y, &mut history).unwrap();

        assert_eq!(history.len(), 25);
        assert!(history.losses()[24] < history.losses()[0]);
        assert_eq!(model.n_iterations, Some(25));
        assert_eq!(model.converged, Some(false));
    }

    #[test]
    fn test_predict_without_fit() {
        let x = array![[1.0], [2.0]];
        let model = LinearRegression::new();

        assert!(matches!(model.predict(&x), Err(Error::NotFitted)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut model = LinearRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert!(matches!(
            model.predict(&array![[1.0, 2.0]]),
            Err(Error::ShapeMismatch { expected: 1, found: 2, .. })
        ));
    }
}
