use ndarray::Ix1;

use super::{check_n_features, design_matrix, split_intercept};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, LogLoss};
use crate::optim::{GradientDescent, Observer, Silent, Tolerance, TrainConfig};
use crate::{Matrix, Vector};

#[derive(Clone, Debug)]
pub struct LogisticRegression {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    pub n_iterations: Option<usize>,
    pub converged: Option<bool>,
    fit_intercept: bool,
    config: TrainConfig,
}

impl LogisticRegression {
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

    pub fn with_params(learning_rate: f64, max_iterations: usize, fit_intercept: bool) -> Self {
        Self::new()
            .learning_rate(learning_rate)
            .max_iterations(max_iterations)
            .fit_intercept(fit_intercept)
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
        self.validate_labels(y)?;

        let design = design_matrix(x, self.fit_intercept);
        let fit = GradientDescent::new(self.config.clone()).train_with_observer(
            &design,
            y,
            &LogLoss,
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
        let probabilities = self.predict_proba(x)?;
        let predictions = probabilities.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 });
        Ok(predictions)
    }

    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);
        check_n_features(x, coeffs.len())?;

        let linear_combination = x.dot(coeffs) + intercept;
        Ok(linear_combination.mapv_into(LogLoss::sigmoid))
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy_score(y, &predictions)
    }

    fn validate_labels(&self, y: &Vector) -> Result<()> {
        if y.iter().any(|&label| label != 0.0 && label != 1.0) {
            return Err(Error::InvalidLabels(
                "labels must be 0 or 1 for binary classification".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}
