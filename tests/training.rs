use perceptron::data::parse_training_data;
use perceptron::network::cost;
use perceptron::{Activator, DataPoint, Error, Layer, Network, StopCondition, Trainer};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const XOR: &str = r#"[
    { "input": [0, 0], "expectedOutput": [0] },
    { "input": [0, 1], "expectedOutput": [1] },
    { "input": [1, 0], "expectedOutput": [1] },
    { "input": [1, 1], "expectedOutput": [0] }
]"#;

fn total_error(network: &mut Network, data: &[DataPoint]) -> f64 {
    data.iter()
        .map(|p| cost(&network.input(&p.input).unwrap(), &p.expected_output).unwrap())
        .sum()
}

#[test]
fn zero_weights_output_sigmoid_of_zero() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut layers = vec![
        Layer::new(Activator::Sigmoid, 2, 2, &mut rng).unwrap(),
        Layer::new(Activator::Sigmoid, 2, 1, &mut rng).unwrap(),
    ];
    for layer in &mut layers {
        layer.weights_mut().fill(0.0);
        for b in layer.biases_mut() {
            *b = 0.0;
        }
    }
    let mut network = Network::from_layers(layers, 0.1).unwrap();
    assert_eq!(network.input(&[0.0, 0.0]).unwrap(), vec![0.5]);
    assert_eq!(network.input(&[3.0, -7.0]).unwrap(), vec![0.5]);
}

#[test]
fn xor_from_json_improves() {
    let data = parse_training_data(XOR).unwrap();
    let mut network = Network::seeded(&[2, 2, 1], 0.5, Activator::Sigmoid, 42).unwrap();
    let before = total_error(&mut network, &data);

    let report = Trainer::new(network)
        .stop_condition(StopCondition::Iterations(500))
        .train(&data)
        .unwrap();
    let mut network = report.network;
    assert_eq!(report.epochs, 500);

    let after = total_error(&mut network, &data);
    assert!(after < before, "{} >= {}", after, before);
}

#[test]
fn single_layer_network_rejected() {
    assert!(matches!(
        Network::seeded(&[3], 0.1, Activator::Sigmoid, 0),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn wrong_input_length_rejected_without_changes() {
    let mut network = Network::seeded(&[3, 4, 2], 0.1, Activator::TanH, 0).unwrap();
    let before = network.snapshot();
    assert!(matches!(
        network.input(&[1.0]),
        Err(Error::ShapeMismatch { expected: 3, actual: 1 })
    ));
    assert!(matches!(
        network.learn(&[DataPoint::new([1.0, 2.0], [0.0, 0.0])]),
        Err(Error::ShapeMismatch { expected: 3, actual: 2 })
    ));
    assert_eq!(network.snapshot(), before);
}

#[test]
fn snapshot_follows_training() {
    let data = parse_training_data(XOR).unwrap();
    let mut network = Network::seeded(&[2, 3, 1], 0.5, Activator::Sigmoid, 9).unwrap();
    let before = network.snapshot();
    network.learn(&data).unwrap();
    let after = network.snapshot();

    assert!(after.generation > before.generation);
    assert_ne!(after.weights, before.weights);
    assert_eq!(after.neuron_counts(), vec![2, 3, 1]);
    assert_eq!(after.edges().len(), (2 * 3 + 3) + (3 + 1));
}

proptest! {
    #[test]
    fn fresh_parameters_in_unit_range(seed in any::<u64>(), a in 1usize..6, b in 1usize..6, c in 1usize..6) {
        let network = Network::seeded(&[a, b, c], 0.1, Activator::Sigmoid, seed).unwrap();
        for layer in network.layers() {
            prop_assert!(layer.weights().iter().all(|w| (-1.0..1.0).contains(w)));
            prop_assert!(layer.biases().iter().all(|b| (-1.0..1.0).contains(b)));
        }
    }

    #[test]
    fn shapes_survive_training(seed in any::<u64>(), sizes in prop::collection::vec(1usize..5, 2..5)) {
        let mut network = Network::seeded(&sizes, 0.1, Activator::Sigmoid, seed).unwrap();
        let point = DataPoint::new(vec![0.5; sizes[0]], vec![1.0; *sizes.last().unwrap()]);
        for _ in 0..3 {
            network.learn(&[point.clone()]).unwrap();
            let weights = network.weights();
            prop_assert_eq!(weights.len(), sizes.len() - 1);
            for (l, w) in weights.iter().enumerate() {
                prop_assert_eq!(w.rows(), sizes[l]);
                prop_assert_eq!(w.cols(), sizes[l + 1]);
            }
        }
    }
}
