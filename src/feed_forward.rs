//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network) trained by
//! single-sample backpropagation.
//!
//! # Example
//!
//! Let's train a simple neural network to compute the XOR function:
//!
//! ```
//! # use ann::feed_forward::Network;
//! # use ann::random::WeightSource;
//! // A small deterministic generator for the initial weights.
//! struct Lcg(u64);
//!
//! impl WeightSource for Lcg {
//!     fn next_weight(&mut self) -> f64 {
//!         self.0 = self.0
//!             .wrapping_mul(6364136223846793005)
//!             .wrapping_add(1442695040888963407);
//!         (self.0 >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
//!     }
//! }
//!
//! // Create examples of the XOR function
//! let examples = [([0.0, 0.0], [0.0]),
//!                 ([0.0, 1.0], [1.0]),
//!                 ([1.0, 0.0], [1.0]),
//!                 ([1.0, 1.0], [0.0])];
//!
//! // Train a network on those examples, one sample at a time
//! let mut network = Network::with_source(&[2, 3, 1], &mut Lcg(7)).unwrap();
//! for _ in 0..5000 {
//!     for &(ref input, ref expected) in &examples {
//!         network.train(input, expected, 0.5).unwrap();
//!     }
//! }
//!
//! // And verify the network correctly computes XOR!
//! for &(ref input, ref expected) in &examples {
//!     let output = network.predict(input).unwrap();
//!     assert!((output[0] - expected[0]).abs() < 0.1);
//! }
//! ```

use crate::error::{check_learning_rate, check_len, Error, Result};
use crate::layer::Layer;
use crate::random::{Uniform, WeightSource};

use tracing::{debug, trace};

/// Bounds of the uniform distribution used by `Network::new`.
pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (-1.0, 1.0);

/// A Feedforward neural network
///
/// The network owns its layers in order from input to output. A layer's
/// predecessor is the layer before it in `layers` and its successor is the
/// one after, so the chain is acyclic by construction.
#[derive(Clone, Debug)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a new, untrained neural network with weights drawn uniformly
    /// from `DEFAULT_WEIGHT_RANGE`.
    ///
    /// Arguments:
    ///  * `layer_sizes` - the number of neurons in each layer, from input to
    ///                    output. Must contain at least 2 elements, none of
    ///                    them zero.
    pub fn new(layer_sizes: &[usize]) -> Result<Self> {
        let (low, high) = DEFAULT_WEIGHT_RANGE;
        Network::with_source(layer_sizes, &mut Uniform::thread(low, high)?)
    }

    /// Creates a new, untrained neural network, drawing every initial weight
    /// from `source`.
    ///
    /// Layers are built from input to output and each layer's weights are
    /// drawn row by row, so a deterministic source yields a deterministic
    /// network.
    pub fn with_source<S>(layer_sizes: &[usize], source: &mut S) -> Result<Self>
        where S: WeightSource + ?Sized
    {
        if layer_sizes.len() < 2 {
            return Err(Error::Construction(format!(
                "need at least 2 layer sizes, got {}",
                layer_sizes.len()
            )));
        }
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(Error::Construction(format!("layer {} has no neurons", index)));
        }

        let mut layers: Vec<Layer> = Vec::with_capacity(layer_sizes.len());
        for &size in layer_sizes {
            let layer = Layer::new(size, layers.last(), source)?;
            layers.push(layer);
        }
        debug!(sizes = ?layer_sizes, "built network");
        Ok(Network { layers })
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.input_layer().output_count()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.output_layer().output_count()
    }

    /// Returns every layer, from input to output.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the output layer's activations from the most recent forward
    /// pass.
    pub fn output(&self) -> &[f64] {
        self.output_layer().outputs()
    }

    /// Feeds the provided `inputs` through the network, returning the output
    /// layer's activations.
    ///
    /// Every layer's outputs hold this pass's activations afterwards.
    pub fn predict(&mut self, inputs: &[f64]) -> Result<&[f64]> {
        check_len("inputs", self.input_len(), inputs.len())?;
        self.feed_forward(inputs);
        Ok(self.output())
    }

    /// Performs one stochastic gradient descent step on a single example.
    ///
    /// Runs a forward pass on `inputs`, sets the output deltas from
    /// `targets`, then updates the output layer and walks back through the
    /// hidden layers, computing each one's deltas and updating it before
    /// moving on to its predecessor.
    ///
    /// After returning, `output()` still holds the prediction made before the
    /// update.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64], learning_rate: f64) -> Result<()> {
        check_len("inputs", self.input_len(), inputs.len())?;
        check_len("targets", self.output_len(), targets.len())?;
        check_learning_rate(learning_rate)?;
        trace!(learning_rate, "training step");

        self.feed_forward(inputs);
        self.feed_backwards(targets, learning_rate);
        Ok(())
    }

    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Forward pass over already validated `inputs`.
    fn feed_forward(&mut self, inputs: &[f64]) {
        self.layers[0].load_inputs(inputs);
        for i in 1..self.layers.len() {
            let (prev, layer) = with_predecessor(&mut self.layers, i);
            layer.compute_outputs(prev);
        }
    }

    /// Backward pass over already validated `targets`.
    fn feed_backwards(&mut self, targets: &[f64], learning_rate: f64) {
        let last = self.layers.len() - 1;
        let (prev, output) = with_predecessor(&mut self.layers, last);
        output.compute_output_deltas(targets);
        output.update(prev, learning_rate);
        for i in (1..last).rev() {
            let (layer, next) = with_successor(&mut self.layers, i);
            layer.compute_deltas(next);
            let (prev, layer) = with_predecessor(&mut self.layers, i);
            layer.update(prev, learning_rate);
        }
    }
}

/// Borrows layer `index` mutably along with its predecessor.
fn with_predecessor(layers: &mut [Layer], index: usize) -> (&Layer, &mut Layer) {
    let (before, after) = layers.split_at_mut(index);
    (&before[index - 1], &mut after[0])
}

/// Borrows layer `index` mutably along with its successor.
fn with_successor(layers: &mut [Layer], index: usize) -> (&mut Layer, &Layer) {
    let (before, after) = layers.split_at_mut(index + 1);
    (&mut before[index], &after[0])
}
