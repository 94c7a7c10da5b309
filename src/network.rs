//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network) trained with
//! backpropagation.
//!
//! # Example
//!
//! Let's train a simple neural network to compute the XOR function:
//!
//! ```
//! # use perceptron::{Activator, DataPoint, Network};
//! // Create examples of the XOR function
//! let examples = [DataPoint::new([0.0, 0.0], [0.0]),
//!                 DataPoint::new([0.0, 1.0], [1.0]),
//!                 DataPoint::new([1.0, 0.0], [1.0]),
//!                 DataPoint::new([1.0, 1.0], [0.0])];
//!
//! let mut network = Network::seeded(&[2, 3, 1], 0.5, Activator::Sigmoid, 7).unwrap();
//! let before = network.learn(&examples).unwrap();
//! for _ in 0..2000 {
//!     network.learn(&examples).unwrap();
//! }
//! let after = network.learn(&examples).unwrap();
//! assert!(after < before);
//! ```

use crate::activator::Activator;
use crate::data::DataPoint;
use crate::error::{check_len, Error, Result};
use crate::layer::Layer;
use crate::matrix::Mat;
use crate::utils::{Back, Front};
use crate::view::Snapshot;

use itertools::multizip;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// A Feedforward neural network
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    learn_rate: f64,
    /// Bumped by every operation that changes what an observer would see.
    generation: u64,
}

impl Network {
    /// Creates a new, untrained neural network.
    ///
    /// Arguments:
    ///  * `layer_sizes` - the number of neurons in each layer, input layer
    ///                    first. Must contain at least 2 elements.
    ///  * `learn_rate` - the gradient descent step size, in `(0, 1]`.
    ///  * `activator` - the activation function to use for each neuron.
    ///  * `rng` - the source of the initial weights and biases.
    pub fn new<R>(
        layer_sizes: &[usize],
        learn_rate: f64,
        activator: Activator,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        validate_layer_sizes(layer_sizes)?;
        validate_learn_rate(learn_rate)?;
        let mut layers = Vec::with_capacity(layer_sizes.len() - 1);
        for sizes in layer_sizes.windows(2) {
            layers.push(Layer::new(activator, sizes[0], sizes[1], rng)?);
        }
        Ok(Network {
            layers,
            learn_rate,
            generation: 0,
        })
    }

    /// Like `new`, drawing the initial parameters from a `StdRng` seeded with
    /// `seed`.
    pub fn seeded(
        layer_sizes: &[usize],
        learn_rate: f64,
        activator: Activator,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Network::new(layer_sizes, learn_rate, activator, &mut rng)
    }

    /// Assembles a network from already built layers.
    ///
    /// The layers must chain (each layer's output length is the next layer's
    /// input length) and share a single activator. Gradients the layers
    /// accumulated beforehand are discarded.
    pub fn from_layers(mut layers: Vec<Layer>, learn_rate: f64) -> Result<Self> {
        validate_learn_rate(learn_rate)?;
        let first = layers
            .first()
            .ok_or_else(|| Error::InvalidConfig("a network needs at least one layer".into()))?;
        for layer in &layers {
            layer.check_shape()?;
        }
        for (k, pair) in layers.windows(2).enumerate() {
            if pair[0].output_len() != pair[1].input_len() {
                return Err(Error::InvalidConfig(format!(
                    "layer {} has {} outputs but layer {} has {} inputs",
                    k,
                    pair[0].output_len(),
                    k + 1,
                    pair[1].input_len()
                )));
            }
        }
        if layers.iter().any(|l| l.activator() != first.activator()) {
            return Err(Error::InvalidConfig(
                "all layers must share one activator".into(),
            ));
        }
        for layer in &mut layers {
            layer.clear_gradients();
        }
        Ok(Network {
            layers,
            learn_rate,
            generation: 0,
        })
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.layers.front().input_len()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.layers.back().output_len()
    }

    /// Returns the number of neurons in each layer, input layer first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![self.input_len()];
        sizes.extend(self.layers.iter().map(Layer::output_len));
        sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn learn_rate(&self) -> f64 {
        self.learn_rate
    }

    pub fn activator(&self) -> Activator {
        self.layers.front().activator()
    }

    /// A counter that increases whenever the network's observable state
    /// changes. Renderers compare it against the last value they drew.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The weight matrix of every layer.
    pub fn weights(&self) -> Vec<&Mat> {
        self.layers.iter().map(Layer::weights).collect()
    }

    /// The bias vector of every layer.
    pub fn biases(&self) -> Vec<&[f64]> {
        self.layers.iter().map(Layer::biases).collect()
    }

    /// The input of the most recent forward pass.
    pub fn inputs(&self) -> &[f64] {
        self.layers.front().inputs()
    }

    /// The output of the most recent forward pass.
    pub fn outputs(&self) -> &[f64] {
        self.layers.back().outputs()
    }

    /// Captures the current state for display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(self)
    }

    /// Feeds the provided `input` through the network, returning a copy of
    /// the output layer.
    pub fn input(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        let outputs = self.feed_forward(input)?.to_vec();
        self.generation += 1;
        Ok(outputs)
    }

    /// Feeds an all-zero input through the network so the cached state shown
    /// to observers is neutral.
    pub fn reset_display_state(&mut self) -> Result<()> {
        let zeros = vec![0.0; self.input_len()];
        self.input(&zeros).map(|_| ())
    }

    /// Runs one training pass over `data_points`: accumulates the cost
    /// gradient of every example, then takes a single gradient descent step.
    ///
    /// Returns the mean cost of the batch, measured before the update. Every
    /// example is checked against the network's shape before anything is
    /// touched, so a failed call leaves the network unchanged.
    pub fn learn(&mut self, data_points: &[DataPoint]) -> Result<f64> {
        for point in data_points {
            check_len(self.input_len(), point.input.len())?;
            check_len(self.output_len(), point.expected_output.len())?;
        }
        if data_points.is_empty() {
            return Ok(0.0);
        }

        let mut total_cost = 0.0;
        for point in data_points {
            total_cost += self.update_all_gradients(point)?;
        }
        for layer in &mut self.layers {
            layer.apply_gradients(self.learn_rate);
        }
        self.generation += 1;

        let mean_cost = total_cost / data_points.len() as f64;
        debug!(
            batch = data_points.len(),
            cost = mean_cost,
            generation = self.generation,
            "applied gradient step"
        );
        if !mean_cost.is_finite() {
            warn!(cost = mean_cost, "training cost is no longer finite");
        }
        Ok(mean_cost)
    }

    /// Feeds the provided `input` through every layer, returning the output
    /// layer's cached outputs.
    fn feed_forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        check_len(self.input_len(), input.len())?;
        let (first, rest) = self.layers.split_at_mut(1);
        let mut outputs = first[0].forward(input)?;
        for layer in rest {
            outputs = layer.forward(outputs)?;
        }
        Ok(outputs)
    }

    /// Runs `point` forward, then feeds the error back through the network,
    /// accumulating gradients in every layer. Returns the example's cost.
    fn update_all_gradients(&mut self, point: &DataPoint) -> Result<f64> {
        self.feed_forward(&point.input)?;

        let activator = self.activator();
        let output_layer = self.layers.back();
        let example_cost = cost(output_layer.outputs(), &point.expected_output)?;
        let mut node_values = output_node_values(
            activator,
            output_layer,
            &point.expected_output,
        );
        self.layers.mut_back().update_gradients(&node_values)?;

        for i in (0..self.layers.len() - 1).rev() {
            node_values = hidden_node_values(
                activator,
                &self.layers[i],
                &self.layers[i + 1],
                &node_values,
            );
            self.layers[i].update_gradients(&node_values)?;
        }
        Ok(example_cost)
    }
}

/// The cost of a single prediction: the summed squared error between
/// `actual` and `expected`.
pub fn cost(actual: &[f64], expected: &[f64]) -> Result<f64> {
    check_len(actual.len(), expected.len())?;
    Ok(actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e) * (a - e))
        .sum())
}

/// Node values of the output layer: the cost derivative with respect to each
/// output, times the activation derivative at its weighted input.
fn output_node_values(activator: Activator, layer: &Layer, expected: &[f64]) -> Vec<f64> {
    multizip((layer.outputs(), expected, layer.weighted_inputs()))
        .map(|(a, e, z)| 2.0 * (a - e) * activator.derivative(*z))
        .collect()
}

/// Node values of a hidden `layer`, given the node values of the layer that
/// consumes its outputs.
fn hidden_node_values(
    activator: Activator,
    layer: &Layer,
    next: &Layer,
    next_node_values: &[f64],
) -> Vec<f64> {
    layer
        .weighted_inputs()
        .iter()
        .enumerate()
        .map(|(i, z)| {
            let propagated: f64 = next
                .weights()
                .row(i)
                .iter()
                .zip(next_node_values)
                .map(|(w, node)| w * node)
                .sum();
            propagated * activator.derivative(*z)
        })
        .collect()
}

pub(crate) fn validate_layer_sizes(layer_sizes: &[usize]) -> Result<()> {
    if layer_sizes.len() < 2 {
        return Err(Error::InvalidConfig(format!(
            "a network needs at least 2 layer sizes, got {}",
            layer_sizes.len()
        )));
    }
    if let Some(k) = layer_sizes.iter().position(|&size| size == 0) {
        return Err(Error::InvalidConfig(format!("layer {} is empty", k)));
    }
    Ok(())
}

pub(crate) fn validate_learn_rate(learn_rate: f64) -> Result<()> {
    if learn_rate > 0.0 && learn_rate <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "learn rate must be in (0, 1], got {}",
            learn_rate
        )))
    }
}
