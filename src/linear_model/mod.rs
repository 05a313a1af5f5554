//! Linear models for regression and classification, all trained by gradient descent.
//!
//! This module provides:
//! - `LinearRegression`: least squares regression
//! - `LogisticRegression`: logistic regression for binary classification
//! - `MultinomialRegression`: one-vs-rest or softmax classification over K classes
//! - `LinearSVC`: linear support vector classifier trained on the hinge loss
//!
//! # Examples
//!
//! ## Linear Regression
//! ```rust
//! use descent::LinearRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0]];
//! let y = array![2.0, 4.0, 6.0];
//!
//! let mut model = LinearRegression::new().learning_rate(0.05).max_iterations(5000);
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! assert_eq!(predictions.len(), 3);
//! ```
//!
//! ## Logistic Regression
//! ```rust
//! use descent::LogisticRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut model = LogisticRegression::new().learning_rate(0.1);
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! let probabilities = model.predict_proba(&x).unwrap();
//! assert_eq!(predictions, y);
//! assert!(probabilities[3] > 0.5);
//! ```
//!
//! ## Linear SVC
//! ```rust
//! use descent::LinearSVC;
//! use ndarray::array;
//!
//! let x = array![[2.0, 2.0], [3.0, 1.0], [-2.0, -1.0], [-1.5, -3.0]];
//! let y = array![1.0, 1.0, -1.0, -1.0];
//!
//! let mut svm = LinearSVC::new();
//! svm.fit(&x, &y).unwrap();
//! assert_eq!(svm.predict(&x).unwrap(), y);
//! ```

mod linear_regression;
mod logistic_regression;
mod multinomial;
mod svm;

pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;
pub use multinomial::{Link, MultinomialRegression};
pub use svm::LinearSVC;

use std::borrow::Cow;

use ndarray::s;

use crate::error::{Error, Result};
use crate::preprocessing::add_intercept;
use crate::{Matrix, Vector};

fn design_matrix(x: &Matrix, fit_intercept: bool) -> Cow<'_, Matrix> {
    if fit_intercept {
        Cow::Owned(add_intercept(x))
    } else {
        Cow::Borrowed(x)
    }
}

/// Splits trained weights into coefficients and the leading intercept weight.
fn split_intercept(weights: Vector, fit_intercept: bool) -> (Vector, f64) {
    if fit_intercept {
        (weights.slice(s![1..]).to_owned(), weights[0])
    } else {
        (weights, 0.0)
    }
}

fn check_n_features(x: &Matrix, n_features: usize) -> Result<()> {
    if x.ncols() != n_features {
        return Err(Error::ShapeMismatch {
            what: "feature columns",
            expected: n_features,
            found: x.ncols(),
        });
    }
    Ok(())
}
