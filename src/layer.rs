use crate::activator::{sigmoid, sigmoid_prime};
use crate::error::{Error, Result};
use crate::matrix::{self, Mat};
use crate::random::WeightSource;

use itertools::multizip;

/// A single, fully connected layer of a feedforward network.
///
/// A layer owns its activations, biases, incoming weights and deltas. It
/// never owns its neighbours: the network passes the predecessor or successor
/// in explicitly whenever an operation needs to read from it.
///
/// The input layer has no predecessor, so it carries no weights, biases or
/// deltas. Its `outputs` are the network inputs of the most recent pass.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Activations after the sigmoid, or the raw inputs for the input layer.
    outputs: Vec<f64>,
    /// One bias per neuron.
    biases: Vec<f64>,
    /// Incoming weights, `input_count × output_count`. Has no rows for the
    /// input layer.
    weights: Mat,
    /// Backpropagated error signal, one per neuron.
    deltas: Vec<f64>,
}

impl Layer {
    /// Initializes a new, untrained layer of `output_count` neurons.
    ///
    /// When `predecessor` is given, a weight matrix of
    /// `predecessor.output_count() × output_count` entries is drawn from
    /// `source` and the biases and deltas start at zero. Without one, the
    /// layer is an input layer.
    ///
    /// Fails with `Error::Construction` if `output_count` is zero or any
    /// buffer cannot be allocated; no partial layer is returned.
    pub fn new<S>(output_count: usize,
                  predecessor: Option<&Layer>,
                  source: &mut S)
                  -> Result<Self>
        where S: WeightSource + ?Sized
    {
        if output_count == 0 {
            return Err(Error::Construction("a layer needs at least one neuron".into()));
        }
        let outputs = matrix::zeros(output_count)?;
        match predecessor {
            None => Ok(Layer {
                outputs,
                biases: Vec::new(),
                weights: Mat::random(source, 0, output_count)?,
                deltas: Vec::new(),
            }),
            Some(prev) => Ok(Layer {
                outputs,
                biases: matrix::zeros(output_count)?,
                weights: Mat::random(source, prev.output_count(), output_count)?,
                deltas: matrix::zeros(output_count)?,
            }),
        }
    }

    /// Returns the number of neurons in the preceding layer, or zero for the
    /// input layer.
    pub fn input_count(&self) -> usize {
        self.weights.rows()
    }

    /// Returns the number of neurons in this layer.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_input(&self) -> bool {
        self.input_count() == 0
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn biases(&self) -> Option<&[f64]> {
        if self.is_input() { None } else { Some(&self.biases[..]) }
    }

    pub fn deltas(&self) -> Option<&[f64]> {
        if self.is_input() { None } else { Some(&self.deltas[..]) }
    }

    pub fn weights(&self) -> Option<&Mat> {
        if self.is_input() { None } else { Some(&self.weights) }
    }

    /// Stores the network inputs as this input layer's outputs.
    pub(crate) fn load_inputs(&mut self, inputs: &[f64]) {
        assert!(self.is_input(), "only the input layer takes raw inputs");
        self.outputs.copy_from_slice(inputs);
    }

    /// Feeds the `predecessor`'s outputs forward through the layer.
    ///
    /// For each neuron `j`, computes
    /// `sigmoid(biases[j] + Σ_i weights[i][j] * predecessor.outputs[i])`.
    pub fn compute_outputs(&mut self, predecessor: &Layer) {
        assert!(!self.is_input(), "the input layer has no incoming weights");
        assert_eq!(predecessor.output_count(), self.input_count());
        let weights = &self.weights;
        for (j, (y, &b)) in self.outputs.iter_mut().zip(&self.biases).enumerate() {
            let mut sum = 0.0;
            for (i, &x) in predecessor.outputs.iter().enumerate() {
                sum += weights[(i, j)] * x;
            }
            *y = sigmoid(sum + b);
        }
    }

    /// Sets the deltas of an output layer from the expected `targets`.
    ///
    /// `deltas[k] = sigmoid'(outputs[k]) * (targets[k] - outputs[k])`
    pub fn compute_output_deltas(&mut self, targets: &[f64]) {
        assert!(!self.is_input(), "the input layer has no deltas");
        assert_eq!(targets.len(), self.output_count());
        for (d, &y, &t) in multizip((self.deltas.iter_mut(), self.outputs.iter(), targets.iter())) {
            *d = sigmoid_prime(y) * (t - y);
        }
    }

    /// Propagates the `successor`'s deltas back onto this hidden layer.
    ///
    /// `deltas[i] = sigmoid'(outputs[i]) * Σ_j successor.weights[i][j] * successor.deltas[j]`
    pub fn compute_deltas(&mut self, successor: &Layer) {
        assert!(!self.is_input(), "the input layer has no deltas");
        assert_eq!(successor.input_count(), self.output_count());
        for (i, (d, &y)) in self.deltas.iter_mut().zip(&self.outputs).enumerate() {
            let mut sum = 0.0;
            for (&w, &e) in successor.weights.row(i).iter().zip(&successor.deltas) {
                sum += w * e;
            }
            *d = sum * sigmoid_prime(y);
        }
    }

    /// Moves the weights and biases along the current deltas.
    ///
    /// `weights[i][j] += rate * predecessor.outputs[i] * deltas[j]` and
    /// `biases[j] += rate * deltas[j]`. The deltas must already be computed.
    pub fn update(&mut self, predecessor: &Layer, rate: f64) {
        assert!(!self.is_input(), "the input layer has no weights to update");
        assert_eq!(predecessor.output_count(), self.input_count());
        for (i, &x) in predecessor.outputs.iter().enumerate() {
            for (w, &d) in self.weights.row_mut(i).iter_mut().zip(&self.deltas) {
                *w += rate * x * d;
            }
        }
        for (b, &d) in self.biases.iter_mut().zip(&self.deltas) {
            *b += rate * d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Constant(f64);

    impl WeightSource for Constant {
        fn next_weight(&mut self) -> f64 {
            self.0
        }
    }

    /// Builds an input layer, a hidden layer and an output layer with every
    /// weight set to `w`.
    fn chain(sizes: [usize; 3], w: f64) -> (Layer, Layer, Layer) {
        let mut source = Constant(w);
        let input = Layer::new(sizes[0], None, &mut source).unwrap();
        let hidden = Layer::new(sizes[1], Some(&input), &mut source).unwrap();
        let output = Layer::new(sizes[2], Some(&hidden), &mut source).unwrap();
        (input, hidden, output)
    }

    #[test]
    fn input_layer_has_no_parameters() {
        let (input, _, _) = chain([3, 2, 1], 0.5);
        assert!(input.is_input());
        assert_eq!(input.input_count(), 0);
        assert_eq!(input.output_count(), 3);
        assert!(input.weights().is_none());
        assert!(input.biases().is_none());
        assert!(input.deltas().is_none());
    }

    #[test]
    fn shapes_follow_predecessor() {
        let (_, hidden, output) = chain([3, 4, 2], 0.5);
        assert_eq!(hidden.input_count(), 3);
        assert_eq!(hidden.output_count(), 4);
        let weights = hidden.weights().unwrap();
        assert_eq!((weights.rows(), weights.cols()), (3, 4));
        assert_eq!(hidden.biases().unwrap(), &[0.0; 4]);
        assert_eq!(hidden.deltas().unwrap(), &[0.0; 4]);
        assert_eq!(output.input_count(), 4);
        assert_eq!(output.outputs(), &[0.0; 2]);
    }

    #[test]
    fn zero_neurons_is_rejected() {
        let mut source = Constant(0.5);
        match Layer::new(0, None, &mut source) {
            Err(Error::Construction(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn forward_pass() {
        let (mut input, mut hidden, mut output) = chain([2, 2, 1], 0.5);
        input.load_inputs(&[1.0, 0.0]);
        hidden.compute_outputs(&input);
        let h = sigmoid(0.5);
        assert_relative_eq!(hidden.outputs()[0], h);
        assert_relative_eq!(hidden.outputs()[1], h);
        output.compute_outputs(&hidden);
        assert_relative_eq!(output.outputs()[0], sigmoid(0.5 * h + 0.5 * h));
    }

    #[test]
    fn backward_pass_by_hand() {
        let rate = 0.1;
        let (mut input, mut hidden, mut output) = chain([2, 2, 1], 0.5);
        input.load_inputs(&[1.0, 0.0]);
        hidden.compute_outputs(&input);
        output.compute_outputs(&hidden);

        let h = hidden.outputs()[0];
        let o = output.outputs()[0];
        output.compute_output_deltas(&[1.0]);
        let d_out = o * (1.0 - o) * (1.0 - o);
        assert_relative_eq!(output.deltas().unwrap()[0], d_out);

        output.update(&hidden, rate);
        let w_out = 0.5 + rate * h * d_out;
        assert_relative_eq!(output.weights().unwrap()[(0, 0)], w_out);
        assert_relative_eq!(output.weights().unwrap()[(1, 0)], w_out);
        assert_relative_eq!(output.biases().unwrap()[0], rate * d_out);

        // The hidden deltas read the output layer's freshly updated weights.
        hidden.compute_deltas(&output);
        let d_hidden = w_out * d_out * h * (1.0 - h);
        assert_relative_eq!(hidden.deltas().unwrap()[0], d_hidden);
        assert_relative_eq!(hidden.deltas().unwrap()[1], d_hidden);

        hidden.update(&input, rate);
        let weights = hidden.weights().unwrap();
        assert_relative_eq!(weights[(0, 0)], 0.5 + rate * d_hidden);
        assert_relative_eq!(weights[(0, 1)], 0.5 + rate * d_hidden);
        // The second input was zero, so its weights do not move.
        assert_relative_eq!(weights[(1, 0)], 0.5);
        assert_relative_eq!(weights[(1, 1)], 0.5);
        assert_relative_eq!(hidden.biases().unwrap()[1], rate * d_hidden);
    }

    #[test]
    #[should_panic]
    fn mismatched_predecessor_panics() {
        let (input, _, mut output) = chain([3, 2, 1], 0.5);
        output.compute_outputs(&input);
    }
}
