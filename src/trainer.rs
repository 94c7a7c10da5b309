//! Utilities for training neural networks.
//!
//! `Network::learn` performs exactly one gradient descent step over a batch.
//! A `Trainer` is the caller that repeats it, one epoch at a time, until a
//! `StopCondition` holds.

use crate::data::DataPoint;
use crate::error::Result;
use crate::network::Network;

use std::time::{Duration, Instant};
use tracing::info;

/// A builder for training networks.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    logging: Logging,
    stop_condition: StopCondition,
}

/// The outcome of a finished training run.
#[derive(Debug)]
pub struct TrainingReport {
    pub network: Network,
    /// Number of calls made to `Network::learn`.
    pub epochs: usize,
    /// Mean example cost of the last epoch, measured before its update.
    pub final_cost: f64,
    pub elapsed: Duration,
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * Stops after 1000 epochs.
    /// * Logs on training completion.
    pub fn new(network: Network) -> Self {
        Trainer {
            network,
            logging: Logging::Completion,
            stop_condition: StopCondition::Iterations(1000),
        }
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition<C>(mut self, condition: C) -> Self
    where
        C: Into<StopCondition>,
    {
        self.stop_condition = condition.into();
        self
    }

    /// Trains the network using the provided labelled data.
    ///
    /// Each epoch is one call to `Network::learn` over all of `examples`.
    ///
    /// Returns:
    ///   The trained network with some statistics, or the first error
    ///   reported by the network. The network is only modified by epochs
    ///   that succeeded.
    pub fn train(mut self, examples: &[DataPoint]) -> Result<TrainingReport> {
        let start_time = Instant::now();
        let mut epoch = 0;
        let mut training_error = 0.0;
        while !self.stop_condition.should_stop(epoch, training_error, start_time) {
            training_error = self.network.learn(examples)?;
            epoch += 1;
            self.logging.iteration(epoch, training_error);
        }
        let elapsed = start_time.elapsed();
        self.logging.completion(epoch, training_error, elapsed);
        Ok(TrainingReport {
            network: self.network,
            epochs: epoch,
            final_cost: training_error,
            elapsed,
        })
    }
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug)]
pub enum Logging {
    /// No logs will be emitted
    Silent,
    /// A summary will be emitted at completion
    Completion,
    /// A summary will be emitted after every `n` epochs
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `epoch` of training.
    fn iteration(&self, epoch: usize, training_error: f64) {
        if let Logging::Iterations(freq) = *self {
            if freq > 0 && epoch % freq == 0 {
                info!(epoch, cost = training_error, "training");
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(&self, epochs: usize, training_error: f64, elapsed: Duration) {
        if let Logging::Silent = *self {
            return;
        }
        info!(
            epochs,
            cost = training_error,
            elapsed_ms = elapsed.as_millis() as u64,
            "training finished"
        );
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug)]
pub enum StopCondition {
    /// Stops after the provided number of epochs
    Iterations(usize),
    /// Stops when the training error drops below the provided threshold
    ///
    /// At least one epoch is always run. Training also stops once the error
    /// is no longer finite, since a diverged network never gets back below
    /// the threshold.
    ErrorThreshold(f64),
    /// Stops after the provided duration
    Duration(Duration),
}

impl From<Duration> for StopCondition {
    fn from(duration: Duration) -> StopCondition {
        StopCondition::Duration(duration)
    }
}

impl StopCondition {
    /// Returns true if training is complete.
    fn should_stop(&self, epoch: usize, training_error: f64, start_time: Instant) -> bool {
        match *self {
            StopCondition::Iterations(epochs) => epoch >= epochs,
            StopCondition::ErrorThreshold(threshold) => {
                epoch > 0 && (training_error < threshold || !training_error.is_finite())
            }
            StopCondition::Duration(duration) => start_time.elapsed() > duration,
        }
    }
}
