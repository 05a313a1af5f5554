//! Classic linear learners trained by gradient descent over `ndarray` arrays.
//!
//! Every model in [`linear_model`] is a thin wrapper around one generic
//! optimizer in [`optim`], parametrized by an [`objective::Objective`]
//! (prediction, loss and gradient).

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod neural_net;
pub mod objective;
pub mod optim;
pub mod preprocessing;
pub mod synthetic;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use linear_model::{LinearRegression, LinearSVC, Link, LogisticRegression, MultinomialRegression};
pub use objective::{FnObjective, Hinge, LinearMap, LogLoss, Objective, SoftmaxCrossEntropy, SquaredError};
pub use optim::{
    train, Fit, GradientDescent, History, LogObserver, Observer, Silent, StochasticGradientDescent,
    Tolerance, TrainConfig,
};
pub use neural_net::TwoLayerNetwork;
pub use preprocessing::MinMaxScaler;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
