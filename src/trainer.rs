//! Utilities for training neural networks over a dataset.

use crate::error::{check_learning_rate, check_len, Error, Result};
use crate::feed_forward::Network;

use std::time::{Duration, Instant};
use tracing::info;

/// Makes a model trainable one example at a time.
pub trait Trainable {
    /// Width of the inputs the model accepts.
    fn input_len(&self) -> usize;

    /// Width of the outputs the model produces.
    fn output_len(&self) -> usize;

    /// Performs one gradient descent step on `input` and `expected`. Returns
    /// the mean square error of the prediction made before the step.
    fn train_example(&mut self, input: &[f64], expected: &[f64], rate: f64) -> Result<f64>;
}

impl Trainable for Network {
    fn input_len(&self) -> usize {
        Network::input_len(self)
    }

    fn output_len(&self) -> usize {
        Network::output_len(self)
    }

    fn train_example(&mut self, input: &[f64], expected: &[f64], rate: f64) -> Result<f64> {
        self.train(input, expected, rate)?;
        Ok(mean_square_error(self.output(), expected))
    }
}

/// A builder for training models.
#[derive(Debug)]
pub struct Trainer<T: Trainable> {
    model: T,
    learning_rate: f64,
    logging: Logging,
    stop_condition: StopCondition,
}

impl<T: Trainable> Trainer<T> {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * A learning rate of 0.1.
    /// * Stops after 1000 training iterations.
    /// * Logs on training completion.
    pub fn new(model: T) -> Self {
        Trainer {
            model,
            learning_rate: 0.1,
            logging: Logging::Completion,
            stop_condition: StopCondition::Iterations(1000),
        }
    }

    /// Sets the learning rate to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition<C>(mut self, condition: C) -> Self
        where C: Into<StopCondition>
    {
        self.stop_condition = condition.into();
        self
    }

    /// Trains the model using the provided labelled data.
    ///
    /// The provided `examples` should be a list of labelled data, where each
    /// element takes the form `(model input, expected output)`. Every
    /// iteration applies one update per example, in order.
    ///
    /// Returns:
    ///   The trained model, or an error if invalid training parameters were
    ///   provided. Nothing is trained unless every example is valid.
    pub fn train<I, O>(mut self, examples: &[(I, O)]) -> Result<T>
        where I: AsRef<[f64]>,
              O: AsRef<[f64]>
    {
        self.validate(examples)?;

        let start_time = Instant::now();
        let mut iteration = 0;
        let mut training_error;
        loop {
            training_error = 0.0;
            for &(ref input, ref expected) in examples {
                training_error += self.model.train_example(input.as_ref(),
                                                           expected.as_ref(),
                                                           self.learning_rate)?;
            }
            training_error /= examples.len() as f64;
            iteration += 1;

            self.logging.iteration(iteration, training_error);
            if self.stop_condition.should_stop(iteration, training_error, start_time) {
                break;
            }
        }
        self.logging.completion(iteration, training_error, start_time);
        Ok(self.model)
    }

    /// Verifies that all provided inputs to the `Trainer` are valid, returning
    /// an error if something is wrong.
    fn validate<I, O>(&self, examples: &[(I, O)]) -> Result<()>
        where I: AsRef<[f64]>,
              O: AsRef<[f64]>
    {
        check_learning_rate(self.learning_rate)?;
        if examples.is_empty() {
            return Err(Error::InvalidArgument("no training examples".into()));
        }
        for &(ref input, ref output) in examples {
            check_len("inputs", self.model.input_len(), input.as_ref().len())?;
            check_len("targets", self.model.output_len(), output.as_ref().len())?;
        }
        Ok(())
    }
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No events will be emitted
    Silent,
    /// A summary will be emitted at completion
    Completion,
    /// A summary will be emitted after every `n` training iterations
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `iteration` of training.
    fn iteration(&self, iteration: usize, training_error: f64) {
        if let Logging::Iterations(freq) = *self {
            if freq > 0 && iteration % freq == 0 {
                info!(iteration, mse = training_error, "training progress");
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(&self, iterations: usize, training_error: f64, start_time: Instant) {
        if let Logging::Silent = *self {
            return;
        }
        info!(iterations,
              elapsed_ms = start_time.elapsed().as_millis() as u64,
              mse = training_error,
              "training complete");
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StopCondition {
    /// Stops after the provided number of training iterations
    Iterations(usize),
    /// Stops when the training error drops below the provided threshold
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
    fn should_stop(&self, iteration: usize, training_error: f64, start_time: Instant) -> bool {
        match *self {
            StopCondition::Iterations(iterations) => iteration >= iterations,
            StopCondition::ErrorThreshold(threshold) => training_error < threshold,
            StopCondition::Duration(duration) => start_time.elapsed() > duration,
        }
    }
}

/// Computes the mean squared error between `actual` and `expected`.
pub fn mean_square_error(actual: &[f64], expected: &[f64]) -> f64 {
    assert_eq!(actual.len(), expected.len());
    let mut error = 0.0;
    for (&a, e) in actual.iter().zip(expected) {
        error += (a - e) * (a - e);
    }
    error / (actual.len() as f64)
}
