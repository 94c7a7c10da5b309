use crate::activator::Activator;
use crate::error::{check_len, Error, Result};
use crate::matrix::Mat;
use crate::utils::ZeroOut;

use rand::distributions::Uniform;
use rand::Rng;

/// A single fully connected layer of the neural network.
///
/// Besides its parameters, a layer remembers the inputs, weighted inputs and
/// outputs of its most recent forward pass, and accumulates the cost gradient
/// of every weight and bias until the owning network applies them.
#[derive(Clone, Debug)]
pub struct Layer {
    /// The activation function to be used for every neuron in the layer.
    activator: Activator,
    /// The layer weights, one row per input neuron.
    weights: Mat,
    biases: Vec<f64>,

    inputs: Vec<f64>,
    weighted_inputs: Vec<f64>,
    outputs: Vec<f64>,

    weight_gradients: Mat,
    bias_gradients: Vec<f64>,
}

impl Layer {
    /// Initializes a new, untrained layer.
    ///
    /// Arguments:
    ///
    ///  * `activator` - the activation function to be used for this layer's
    ///                  output.
    ///  * `inputs` - the number of inputs to this layer.
    ///  * `outputs` - the number of outputs from this layer.
    ///  * `rng` - the source of the initial weights and biases.
    pub fn new<R>(activator: Activator, inputs: usize, outputs: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if inputs == 0 || outputs == 0 {
            return Err(Error::InvalidConfig(format!(
                "a layer needs at least one input and one output, got {}x{}",
                inputs, outputs
            )));
        }
        let mut layer = Layer {
            activator,
            weights: Mat::zeros(inputs, outputs),
            biases: vec![0.0; outputs],
            inputs: vec![0.0; inputs],
            weighted_inputs: vec![0.0; outputs],
            outputs: vec![0.0; outputs],
            weight_gradients: Mat::zeros(inputs, outputs),
            bias_gradients: vec![0.0; outputs],
        };
        layer.randomize(rng);
        Ok(layer)
    }

    /// Redraws every weight and bias uniformly from `[-1, 1)`.
    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let range = Uniform::new(-1.0, 1.0);
        self.weights = Mat::random(&range, rng, self.input_len(), self.output_len());
        for b in &mut self.biases {
            *b = rng.sample(&range);
        }
    }

    /// Returns the number of inputs to this layer.
    pub fn input_len(&self) -> usize {
        self.weights.rows()
    }

    /// Returns the number of outputs from this layer.
    pub fn output_len(&self) -> usize {
        self.weights.cols()
    }

    pub fn activator(&self) -> Activator {
        self.activator
    }

    pub fn weights(&self) -> &Mat {
        &self.weights
    }

    /// The weights in row-major order, `weights_mut()[j * output_len() + i]`
    /// being the connection from input `j` to output `i`.
    pub fn weights_mut(&mut self) -> &mut [f64] {
        self.weights.as_mut_slice()
    }

    /// Replaces the weight matrix. The new matrix must have the layer's
    /// current shape.
    pub fn set_weights(&mut self, weights: Mat) -> Result<()> {
        if (weights.rows(), weights.cols()) != (self.input_len(), self.output_len()) {
            return Err(Error::InvalidConfig(format!(
                "a {}x{} layer cannot take {}x{} weights",
                self.input_len(),
                self.output_len(),
                weights.rows(),
                weights.cols()
            )));
        }
        self.weights = weights;
        Ok(())
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn biases_mut(&mut self) -> &mut [f64] {
        &mut self.biases
    }

    /// The inputs of the most recent forward pass.
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// The pre-activation values of the most recent forward pass.
    pub fn weighted_inputs(&self) -> &[f64] {
        &self.weighted_inputs
    }

    /// The outputs of the most recent forward pass.
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn weight_gradients(&self) -> &Mat {
        &self.weight_gradients
    }

    pub fn bias_gradients(&self) -> &[f64] {
        &self.bias_gradients
    }

    /// Feeds the provided `inputs` forward through the layer.
    ///
    /// The returned slice borrows the layer's cached outputs, which stay valid
    /// until the next forward pass.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<&[f64]> {
        check_len(self.input_len(), inputs.len())?;
        self.inputs.copy_from_slice(inputs);
        for i in 0..self.output_len() {
            let mut sum = self.biases[i];
            for (j, x) in self.inputs.iter().enumerate() {
                sum += x * self.weights[(j, i)];
            }
            self.weighted_inputs[i] = sum;
            self.outputs[i] = self.activator.f(sum);
        }
        Ok(&self.outputs)
    }

    /// Accumulates the cost gradients for this layer's weights and biases,
    /// given the node values of its output neurons.
    ///
    /// Uses the inputs cached by the last call to `forward`.
    pub fn update_gradients(&mut self, node_values: &[f64]) -> Result<()> {
        check_len(self.output_len(), node_values.len())?;
        for (j, x) in self.inputs.iter().enumerate() {
            for (i, node) in node_values.iter().enumerate() {
                self.weight_gradients[(j, i)] += x * node;
            }
        }
        for (grad, node) in self.bias_gradients.iter_mut().zip(node_values) {
            *grad += node;
        }
        Ok(())
    }

    /// Applies and resets the accumulated gradients, scaling by the gradient
    /// descent `rate`.
    pub fn apply_gradients(&mut self, rate: f64) {
        for (b, grad) in self.biases.iter_mut().zip(&self.bias_gradients) {
            *b -= rate * grad;
        }
        self.weights.apply_delta(rate, &self.weight_gradients);
        self.clear_gradients();
    }

    /// Discards any accumulated gradients.
    pub fn clear_gradients(&mut self) {
        self.bias_gradients.zero_out();
        self.weight_gradients.zero_out();
    }

    /// Checks that every buffer agrees with the weight matrix's shape.
    pub(crate) fn check_shape(&self) -> Result<()> {
        let (inputs, outputs) = (self.input_len(), self.output_len());
        let consistent = inputs > 0
            && outputs > 0
            && self.inputs.len() == inputs
            && self.biases.len() == outputs
            && self.weighted_inputs.len() == outputs
            && self.outputs.len() == outputs
            && self.bias_gradients.len() == outputs
            && (self.weight_gradients.rows(), self.weight_gradients.cols()) == (inputs, outputs);
        if consistent {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!(
                "layer buffers disagree with its {}x{} weights",
                inputs, outputs
            )))
        }
    }
}
