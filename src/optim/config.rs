use crate::error::{Error, Result};

/// Rule deciding when two consecutive losses are close enough to stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tolerance {
    /// Stop when `|previous − current| < t`.
    Absolute(f64),
    /// Stop when `|previous − current| < fraction × previous`.
    Relative(f64),
}

impl Tolerance {
    pub fn converged(&self, previous: f64, current: f64) -> bool {
        let delta = (previous - current).abs();
        match *self {
            Self::Absolute(t) => delta < t,
            Self::Relative(fraction) => delta < fraction * previous,
        }
    }

    fn value(&self) -> f64 {
        match *self {
            Self::Absolute(t) | Self::Relative(t) => t,
        }
    }
}

/// Hyperparameters of a training run.
#[derive(Clone, Debug)]
pub struct TrainConfig {
    pub learning_rate: f64,
    /// Iteration cap for batch descent, epoch cap for stochastic descent.
    pub max_iterations: usize,
    pub tolerance: Tolerance,
    /// Only read by objectives that need one, such as [`crate::Hinge`].
    pub regularization_strength: Option<f64>,
    /// Rows per update in stochastic descent. `None` uses the whole dataset.
    pub batch_size: Option<usize>,
    /// Seed for reshuffling rows every epoch in stochastic descent.
    pub shuffle: Option<u64>,
}

impl TrainConfig {
    pub fn new() -> Self {
        Self {
            learning_rate: 0.001,
            max_iterations: 1000,
            tolerance: Tolerance::Absolute(0.001),
            regularization_strength: None,
            batch_size: None,
            shuffle: None,
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn regularization_strength(mut self, regularization_strength: f64) -> Self {
        self.regularization_strength = Some(regularization_strength);
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn shuffle(mut self, seed: u64) -> Self {
        self.shuffle = Some(seed);
        self
    }

    /// A zero learning rate is accepted and leaves the weights untouched.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and non-negative, got {}",
                self.learning_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig("max_iterations must be at least 1".to_string()));
        }
        let tolerance = self.tolerance.value();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {tolerance}"
            )));
        }
        if let Some(c) = self.regularization_strength {
            if !c.is_finite() || c <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "regularization strength must be positive, got {c}"
                )));
            }
        }
        if self.batch_size == Some(0) {
            return Err(Error::InvalidConfig("batch_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_tolerance() {
        let tol = Tolerance::Absolute(0.1);
        assert!(tol.converged(1.0, 0.95));
        assert!(tol.converged(0.95, 1.0));
        assert!(!tol.converged(1.0, 0.8));
    }

    #[test]
    fn test_relative_tolerance() {
        let tol = Tolerance::Relative(0.01);
        assert!(tol.converged(100.0, 99.5));
        assert!(!tol.converged(100.0, 98.0));
        assert!(!tol.converged(f64::INFINITY, 5.0));
    }

    #[test]
    fn test_builder() {
        let config = TrainConfig::new()
            .learning_rate(0.5)
            .max_iterations(10)
            .tolerance(Tolerance::Relative(0.01))
            .regularization_strength(100.0)
            .batch_size(4)
            .shuffle(7);

        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.tolerance, Tolerance::Relative(0.01));
        assert_eq!(config.regularization_strength, Some(100.0));
        assert_eq!(config.batch_size, Some(4));
        assert_eq!(config.shuffle, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(TrainConfig::new().learning_rate(-1.0).validate().is_err());
        assert!(TrainConfig::new().learning_rate(f64::NAN).validate().is_err());
        assert!(TrainConfig::new().max_iterations(0).validate().is_err());
        assert!(TrainConfig::new().tolerance(Tolerance::Absolute(-1.0)).validate().is_err());
        assert!(TrainConfig::new().regularization_strength(0.0).validate().is_err());
        assert!(TrainConfig::new().batch_size(0).validate().is_err());
    }

    #[test]
    fn test_zero_learning_rate_is_valid() {
        assert!(TrainConfig::new().learning_rate(0.0).validate().is_ok());
    }
}
