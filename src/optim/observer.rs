use log::info;
use ndarray::{Array, Dimension};

/// Receives the state of a training run once per iteration (or epoch).
pub trait Observer<D: Dimension> {
    fn on_iteration(&mut self, iteration: usize, loss: f64, weights: &Array<f64, D>);
}

impl<D, F> Observer<D> for F
where
    D: Dimension,
    F: FnMut(usize, f64, &Array<f64, D>),
{
    fn on_iteration(&mut self, iteration: usize, loss: f64, weights: &Array<f64, D>) {
        self(iteration, loss, weights)
    }
}

/// Ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl<D: Dimension> Observer<D> for Silent {
    fn on_iteration(&mut self, _iteration: usize, _loss: f64, _weights: &Array<f64, D>) {}
}

/// Logs the loss at `info` level every `every` iterations.
#[derive(Clone, Copy, Debug)]
pub struct LogObserver {
    every: usize,
}

impl LogObserver {
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1) }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<D: Dimension> Observer<D> for LogObserver {
    fn on_iteration(&mut self, iteration: usize, loss: f64, _weights: &Array<f64, D>) {
        if iteration % self.every == 0 {
            info!("iteration {iteration}: loss = {loss:.6}");
        }
    }
}

/// Records every observed loss.
#[derive(Clone, Debug, Default)]
pub struct History {
    losses: Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn losses(&self) -> &[f64] {
        &self.losses
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }
}

impl<D: Dimension> Observer<D> for History {
    fn on_iteration(&mut self, _iteration: usize, loss: f64, _weights: &Array<f64, D>) {
        self.losses.push(loss);
    }
}
