//! Configuration of a network and its training run.
//!
//! Configurations are read from JSON. Every field is optional and falls back
//! to the defaults below:
//!
//! ```json
//! {
//!   "layer_sizes": [2, 2],
//!   "learn_rate": 0.001,
//!   "epochs": 1000,
//!   "activator": "sigmoid",
//!   "seed": null,
//!   "inputs": [0, 0]
//! }
//! ```

use crate::activator::Activator;
use crate::error::{Error, Result};
use crate::network::{validate_layer_sizes, validate_learn_rate, Network};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// Everything needed to build a network and drive its training.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Number of neurons per layer, input layer first.
    pub layer_sizes: Vec<usize>,
    pub learn_rate: f64,
    /// How many times `Network::learn` is called on the training set.
    pub epochs: usize,
    pub activator: Activator,
    /// Seed for the initial weights. Drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Ad-hoc input fed through the network after training. Defaults to all
    /// zeros when empty.
    pub inputs: Vec<f64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            layer_sizes: vec![2, 2],
            learn_rate: 0.001,
            epochs: 1000,
            activator: Activator::Sigmoid,
            seed: None,
            inputs: Vec::new(),
        }
    }
}

impl NetworkConfig {
    /// Checks every field, reporting the first problem as `InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        validate_layer_sizes(&self.layer_sizes)?;
        validate_learn_rate(self.learn_rate)?;
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be positive".into()));
        }
        if !self.inputs.is_empty() && self.inputs.len() != self.layer_sizes[0] {
            return Err(Error::InvalidConfig(format!(
                "{} inputs given for an input layer of {}",
                self.inputs.len(),
                self.layer_sizes[0]
            )));
        }
        Ok(())
    }

    /// The ad-hoc input vector, or zeros for every input neuron when none
    /// was configured.
    pub fn input_vector(&self) -> Vec<f64> {
        if self.inputs.is_empty() {
            vec![0.0; self.layer_sizes.first().copied().unwrap_or(0)]
        } else {
            self.inputs.clone()
        }
    }

    /// Validates the configuration and builds an untrained network from it.
    pub fn build_network(&self) -> Result<Network> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::new(&self.layer_sizes, self.learn_rate, self.activator, &mut rng)
    }
}

/// Parses and validates a configuration from its JSON text.
pub fn parse_config(json: &str) -> Result<NetworkConfig> {
    let config: NetworkConfig =
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rejected(json: &str) -> bool {
        matches!(parse_config(json), Err(Error::InvalidConfig(_)))
    }

    #[test]
    fn defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, NetworkConfig::default());
        assert_eq!(config.input_vector(), vec![0.0, 0.0]);
    }

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"{
                "layer_sizes": [3, 4, 1],
                "learn_rate": 0.25,
                "epochs": 10,
                "activator": { "leaky_relu": 0.05 },
                "seed": 12,
                "inputs": [1, 0.5, -1]
            }"#,
        )
        .unwrap();
        assert_eq!(config.layer_sizes, vec![3, 4, 1]);
        assert_eq!(config.activator, Activator::LeakyReLU(0.05));
        assert_eq!(config.seed, Some(12));
        assert_eq!(config.input_vector(), vec![1.0, 0.5, -1.0]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(rejected(r#"{ "layer_sizes": [3] }"#));
        assert!(rejected(r#"{ "layer_sizes": [3, 0, 1] }"#));
        assert!(rejected(r#"{ "learn_rate": 0 }"#));
        assert!(rejected(r#"{ "learn_rate": 1.01 }"#));
        assert!(rejected(r#"{ "epochs": 0 }"#));
        assert!(rejected(r#"{ "inputs": [1, 2, 3] }"#));
        assert!(rejected(r#"{ "layer_sizes": [-1, 2] }"#));
        assert!(rejected(r#"{ "layers": [2, 2] }"#));
        assert!(rejected("not json"));
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let config = NetworkConfig {
            layer_sizes: vec![2, 3, 1],
            seed: Some(99),
            ..NetworkConfig::default()
        };
        let a = config.build_network().unwrap();
        let b = config.build_network().unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.biases(), b.biases());
        assert_eq!(a.layer_sizes(), vec![2, 3, 1]);
        assert_eq!(a.learn_rate(), 0.001);
    }

    #[test]
    fn build_validates_first() {
        let config = NetworkConfig {
            epochs: 0,
            ..NetworkConfig::default()
        };
        assert!(matches!(config.build_network(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{ "layer_sizes": [4, 2], "epochs": 3 }"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.layer_sizes, vec![4, 2]);
        assert_eq!(config.epochs, 3);
    }
}
