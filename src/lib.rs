//! A multilayer perceptron with hand-written forward propagation and
//! backpropagation.
//!
//! The numeric core is `Layer` and `Network`. Around it sit a JSON
//! configuration (`config`), a training data loader (`data`), an epoch driver
//! (`trainer`) and a read-only view for renderers (`view`).

#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod config;
pub mod data;
pub mod error;
pub mod layer;
pub mod matrix;
pub mod network;
pub mod trainer;
pub mod view;

mod utils;

pub use crate::activator::Activator;
pub use crate::config::NetworkConfig;
pub use crate::data::DataPoint;
pub use crate::error::{Error, Result};
pub use crate::layer::Layer;
pub use crate::matrix::Mat;
pub use crate::network::Network;
pub use crate::trainer::{Logging, StopCondition, Trainer, TrainingReport};
pub use crate::view::Snapshot;
