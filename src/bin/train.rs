use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use perceptron::config::load_config;
use perceptron::data::load_training_data;
use perceptron::{Logging, NetworkConfig, StopCondition, Trainer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Trains a perceptron on a JSON training set and runs the configured input
/// through it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Network configuration (JSON). Defaults are used when omitted.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Training data: a JSON array of { "input": [..], "expectedOutput": [..] }
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,
    /// Overrides the configured number of epochs
    #[arg(short, long)]
    epochs: Option<usize>,
    /// Overrides the configured learn rate
    #[arg(short, long)]
    learn_rate: Option<f64>,
    /// Overrides the configured weight seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Log the training cost every N epochs
    #[arg(long, value_name = "N")]
    log_every: Option<usize>,
    /// Print the final network state as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => NetworkConfig::default(),
    };
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    if let Some(learn_rate) = cli.learn_rate {
        config.learn_rate = learn_rate;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let data = load_training_data(&cli.data)
        .with_context(|| format!("loading training data {}", cli.data.display()))?;
    let network = config.build_network()?;
    info!(
        layers = ?network.layer_sizes(),
        learn_rate = network.learn_rate(),
        examples = data.len(),
        "network ready"
    );

    let logging = match cli.log_every {
        Some(n) => Logging::Iterations(n),
        None => Logging::Completion,
    };
    let report = Trainer::new(network)
        .stop_condition(StopCondition::Iterations(config.epochs))
        .logging(logging)
        .train(&data)?;

    let mut network = report.network;
    let input = config.input_vector();
    let output = network.input(&input)?;
    println!("{:?} -> {:?}", input, output);

    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&network.snapshot())?);
    }
    Ok(())
}
