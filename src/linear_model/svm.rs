use ndarray::Ix1;

use super::{check_n_features, design_matrix, split_intercept};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, Hinge};
use crate::optim::{Observer, Silent, StochasticGradientDescent, Tolerance, TrainConfig};
use crate::{Matrix, Vector};

/// Linear support vector classifier.
///
/// Minimises `½‖w‖² + C · mean(max(0, 1 − y · x·w))` with per-example
/// sub-gradient steps by default. Each epoch ends with a full cost check and
/// training stops once the cost changes by less than the given fraction.
/// Labels must be `-1` or `+1`.
#[derive(Clone, Debug)]
pub struct LinearSVC {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    pub n_epochs: Option<usize>,
    pub converged: Option<bool>,
    fit_intercept: bool,
    config: TrainConfig,
}

impl LinearSVC {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            n_epochs: None,
            converged: None,
            fit_intercept: true,
            config: TrainConfig::new()
                .learning_rate(1e-6)
                .max_iterations(5000)
                .tolerance(Tolerance::Relative(0.01))
                .regularization_strength(10_000.0)
                .batch_size(1),
        }
    }

    /// Regularization strength `C`. Larger values punish margin violations harder.
    pub fn c(mut self, c: f64) -> Self {
        self.config.regularization_strength = Some(c);
        self
    }

    pub fn fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn max_epochs(mut self, max_epochs: usize) -> Self {
        self.config.max_iterations = max_epochs;
        self
    }

    /// Fraction of the previous cost below which a change counts as converged.
    pub fn cost_threshold(mut self, fraction: f64) -> Self {
        self.config.tolerance = Tolerance::Relative(fraction);
        self
    }

    /// Rows per update; `usize::MAX` or anything at least the sample count means full batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = Some(batch_size);
        self
    }

    pub fn shuffle(mut self, seed: u64) -> Self {
        self.config.shuffle = Some(seed);
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
        let hinge = Hinge::from_config(&self.config)?;

        let design = design_matrix(x, self.fit_intercept);
        let fit = StochasticGradientDescent::new(self.config.clone()).train_with_observer(
            &design,
            y,
            &hinge,
            observer,
        )?;

        let (coeffs, intercept) = split_intercept(fit.weights, self.fit_intercept);
        self.coefficients = Some(coeffs);
        self.intercept = Some(intercept);
        self.n_epochs = Some(fit.iterations);
        self.converged = Some(fit.converged);
        Ok(())
    }

    /// Signed distance-like score `x·w + b` per row.
    pub fn decision_function(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);
        check_n_features(x, coeffs.len())?;

        Ok(x.dot(coeffs) + intercept)
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let decision = self.decision_function(x)?;
        Ok(decision.mapv(|d| if d >= 0.0 { 1.0 } else { -1.0 }))
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy_score(y, &predictions)
    }

    fn validate_labels(&self, y: &Vector) -> Result<()> {
        if y.iter().any(|&label| label != -1.0 && label != 1.0) {
            return Err(Error::InvalidLabels(
                "labels must be -1 or 1 for SVM classification".to_string(),
            ));
        }
        if !y.iter().any(|&label| label == 1.0) || !y.iter().any(|&label| label == -1.0) {
            return Err(Error::InvalidLabels(
                "both classes must be present".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LinearSVC {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::History;
    use ndarray::array;

    fn separable() -> (Matrix, Vector) {
        let x = array![[1.0, 2.0], [2.0, 3.0], [3.0, 3.0], [-1.0, -1.0], [-2.0, -1.0], [-3.0, -2.0]];
        let y = array![1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        (x, y)
    }

    #[test]
    fn test_linear_svc_separable() {
        let (x, y) = separable();

        let mut svm = LinearSVC::new();
        svm.fit(&x, &y).unwrap();

        assert_eq!(svm.predict(&x).unwrap(), y);
        assert_eq!(svm.score(&x, &y).unwrap(), 1.0);
        assert_eq!(svm.converged, Some(true));

        let margins = svm.decision_function(&x).unwrap() * &y;
        assert!(margins.iter().all(|&m| m > 0.0));
    }

    #[test]
    fn test_linear_svc_full_batch() {
        let (x, y) = separable();

        let mut svm = LinearSVC::new()
            .c(100.0)
            .learning_rate(1e-4)
            .batch_size(usize::MAX);
        svm.fit(&x, &y).unwrap();

        assert_eq!(svm.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_linear_svc_observer_sees_epochs() {
        let (x, y) = separable();

        let mut history = History::new();
        let mut svm = LinearSVC::new();
        svm.fit_with_observer(&x, &y, &mut history).unwrap();

        assert_eq!(Some(history.len()), svm.n_epochs);
    }

    #[test]
    fn test_linear_svc_invalid_labels() {
        let x = array![[1.0], [2.0]];
        let mut svm = LinearSVC::new();

        assert!(matches!(svm.fit(&x, &array![0.0, 1.0]), Err(Error::InvalidLabels(_))));
        assert!(matches!(svm.fit(&x, &array![1.0, 1.0]), Err(Error::InvalidLabels(_))));
    }

    #[test]
    fn test_linear_svc_invalid_c() {
        let (x, y) = separable();
        let mut svm = LinearSVC::new().c(-1.0);
        assert!(matches!(svm.fit(&x, &y), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_linear_svc_predict_without_fit() {
        let svm = LinearSVC::new();
        assert!(matches!(svm.predict(&array![[1.0]]), Err(Error::NotFitted)));
    }

    #[test]
    fn test_linear_svc_dimension_mismatch() {
        let (x, y) = separable();
        let mut svm = LinearSVC::new();
        svm.fit(&x, &y).unwrap();

        assert!(matches!(
            svm.predict(&array![[1.0, 2.0, 3.0]]),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
