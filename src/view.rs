//! Read-only views of a network for display.
//!
//! A renderer draws one node per neuron plus one bias node per layer, and one
//! edge per weight. Edges are colored by the sign of their value and stroked
//! in proportion to its magnitude, capped at 1.

use crate::network::Network;

/// The state of a network at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The network generation the snapshot was taken at.
    pub generation: u64,
    /// Per layer: input index, then output index.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// Per layer: output index.
    pub biases: Vec<Vec<f64>>,
    /// The input of the most recent forward pass.
    pub inputs: Vec<f64>,
    /// The output of the most recent forward pass.
    pub outputs: Vec<f64>,
}

/// Where an edge starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Neuron(usize),
    Bias,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// One drawable connection between a node and a neuron of the next column.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    /// Index of the layer owning the parameter.
    pub layer: usize,
    pub from: Source,
    pub to: usize,
    pub value: f64,
    pub polarity: Polarity,
    /// `min(|value|, 1)`
    pub strength: f64,
}

impl Edge {
    fn new(layer: usize, from: Source, to: usize, value: f64) -> Self {
        Edge {
            layer,
            from,
            to,
            value,
            polarity: if value < 0.0 {
                Polarity::Negative
            } else {
                Polarity::Positive
            },
            strength: value.abs().min(1.0),
        }
    }
}

impl Snapshot {
    pub fn of(network: &Network) -> Self {
        Snapshot {
            generation: network.generation(),
            weights: network.weights().iter().map(|w| w.to_rows()).collect(),
            biases: network.biases().iter().map(|b| b.to_vec()).collect(),
            inputs: network.inputs().to_vec(),
            outputs: network.outputs().to_vec(),
        }
    }

    /// Number of neurons in each column, input column first. Bias nodes are
    /// not counted.
    pub fn neuron_counts(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = self.weights.iter().map(|w| w.len()).collect();
        if let Some(last) = self.biases.last() {
            counts.push(last.len());
        }
        counts
    }

    /// Every weight and bias as a drawable edge, layer by layer, bias edges
    /// first.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (layer, (weights, biases)) in self.weights.iter().zip(&self.biases).enumerate() {
            for (to, &bias) in biases.iter().enumerate() {
                edges.push(Edge::new(layer, Source::Bias, to, bias));
            }
            for (from, row) in weights.iter().enumerate() {
                for (to, &weight) in row.iter().enumerate() {
                    edges.push(Edge::new(layer, Source::Neuron(from), to, weight));
                }
            }
        }
        edges
    }
}
