use ndarray::{s, Ix2};

use super::{check_n_features, design_matrix};
use crate::error::{Error, Result};
use crate::objective::{check_inputs, LinearMap, LogLoss, Objective, SoftmaxCrossEntropy};
use crate::optim::{GradientDescent, Observer, Silent, Tolerance, TrainConfig};
use crate::preprocessing::{argmax_rows, class_index, one_hot};
use crate::{Matrix, Vector};

/// How class scores are turned into probabilities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Link {
    /// Independent sigmoid per class (one-vs-rest). Rows need not sum to 1.
    #[default]
    Sigmoid,
    /// Softmax across classes.
    Softmax,
}

/// Multi-class logistic regression over class indices `0..n_classes`.
///
/// Weights form a matrix with one column per class; `predict` returns the
/// index of the highest-scoring column.
#[derive(Clone, Debug)]
pub struct MultinomialRegression {
    pub coefficients: Option<Matrix>,
    pub intercepts: Option<Vector>,
    pub n_iterations: Option<usize>,
    pub converged: Option<bool>,
    link: Link,
    fit_intercept: bool,
    config: TrainConfig,
}

impl MultinomialRegression {
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercepts: None,
            n_iterations: None,
            converged: None,
            link: Link::Sigmoid,
            fit_intercept: true,
            config: TrainConfig::new()
                .learning_rate(0.01)
                .max_iterations(1000)
                .tolerance(Tolerance::Absolute(1e-6)),
        }
    }

    pub fn link(mut self, link: Link) -> Self {
        self.link = link;
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

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = Tolerance::Absolute(tolerance);
        self
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.coefficients.as_ref().map(|c| c.ncols())
    }

    /// Fits on class indices; the number of classes is the largest index plus one.
    pub fn fit(&mut self, x: &Matrix, labels: &Vector) -> Result<()> {
        self.fit_with_observer(x, labels, &mut Silent)
    }

    pub fn fit_with_observer<B>(&mut self, x: &Matrix, labels: &Vector, observer: &mut B) -> Result<()>
    where
        B: Observer<Ix2> + ?Sized,
    {
        let n_classes = count_classes(labels)?;
        let targets = one_hot(labels, n_classes)?;
        self.fit_one_hot_with_observer(x, &targets, observer)
    }

    /// Fits on one-hot targets, one column per class.
    pub fn fit_one_hot(&mut self, x: &Matrix, targets: &Matrix) -> Result<()> {
        self.fit_one_hot_with_observer(x, targets, &mut Silent)
    }

    pub fn fit_one_hot_with_observer<B>(&mut self, x: &Matrix, targets: &Matrix, observer: &mut B) -> Result<()>
    where
        B: Observer<Ix2> + ?Sized,
    {
        check_inputs(x, targets)?;

        let design = design_matrix(x, self.fit_intercept);
        let objective = self.objective();
        let fit = GradientDescent::new(self.config.clone()).train_with_observer(
            &design,
            targets,
            objective,
            observer,
        )?;

        let (coeffs, intercepts) = if self.fit_intercept {
            (fit.weights.slice(s![1.., ..]).to_owned(), fit.weights.row(0).to_owned())
        } else {
            let n_classes = fit.weights.ncols();
            (fit.weights, Vector::zeros(n_classes))
        };
        self.coefficients = Some(coeffs);
        self.intercepts = Some(intercepts);
        self.n_iterations = Some(fit.iterations);
        self.converged = Some(fit.converged);
        Ok(())
    }

    /// Class probabilities, one column per class.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Matrix> {
        let coeffs = self.coefficients.as_ref().ok_or(Error::NotFitted)?;
        let intercepts = self.intercepts.as_ref().ok_or(Error::NotFitted)?;
        check_n_features(x, coeffs.nrows())?;

        let scores = <Ix2 as LinearMap>::forward(x, coeffs) + intercepts;
        Ok(match self.link {
            Link::Sigmoid => scores.mapv_into(LogLoss::sigmoid),
            Link::Softmax => SoftmaxCrossEntropy::softmax_rows(scores),
        })
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        Ok(argmax_rows(&self.predict_proba(x)?))
    }

    pub fn score(&self, x: &Matrix, labels: &Vector) -> Result<f64> {
        let n_classes = self.n_classes().ok_or(Error::NotFitted)?;
        for &label in labels.iter() {
            class_index(label, n_classes)?;
        }
        let predictions = self.predict(x)?;
        crate::metrics::accuracy_score(labels, &predictions)
    }

    fn objective(&self) -> &'static dyn Objective<Ix2> {
        match self.link {
            Link::Sigmoid => &LogLoss,
            Link::Softmax => &SoftmaxCrossEntropy,
        }
    }
}

/// Largest class index plus one. Every label must be a non-negative integer
/// below the number of samples.
fn count_classes(labels: &Vector) -> Result<usize> {
    let n_samples = labels.len();
    let mut largest = 0;
    for &label in labels.iter() {
        if !label.is_finite() || label < 0.0 || label.fract() != 0.0 {
            return Err(Error::InvalidLabels(format!(
                "expected a non-negative integer class index, got {label}"
            )));
        }
        if label >= n_samples as f64 {
            return Err(Error::InvalidLabels(format!(
                "class index {label} is not below the sample count {n_samples}"
            )));
        }
        largest = largest.max(label as usize);
    }

    let n_classes = largest + 1;
    if n_classes < 2 {
        return Err(Error::InvalidLabels("need at least two classes".to_string()));
    }
    Ok(n_classes)
}

impl Default for MultinomialRegression {
    fn default() -> Self {
        Self::new()
    }
}
