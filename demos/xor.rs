use perceptron::{Activator, DataPoint, Logging, Network, StopCondition, Trainer};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Points near the unit circle, labelled by whether they lie in the first or
/// third quadrant.
fn generate_data(rng: &mut StdRng, num_samples: usize) -> Vec<DataPoint> {
    let radians = Uniform::new(0.0, 2.0 * std::f64::consts::PI);
    let noise = Uniform::new(-0.1, 0.1);

    let mut data = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let theta = radians.sample(rng);
        let point = [theta.cos() + noise.sample(rng), theta.sin() + noise.sample(rng)];
        let class = if point[0] * point[1] > 0.0 {
            [1.0, 0.0]
        } else {
            [0.0, 1.0]
        };
        data.push(DataPoint::new(point, class));
    }
    data
}

fn score(set_name: &str, test_data: &[DataPoint], network: &mut Network) -> perceptron::Result<()> {
    let mut num_correct = 0;
    for point in test_data {
        let output = network.input(&point.input)?;
        let class = if output[0] > output[1] { 0 } else { 1 };
        if point.expected_output[class] == 1.0 {
            num_correct += 1;
        }
    }
    println!("{} set results: {} of {} correct", set_name, num_correct, test_data.len());
    Ok(())
}

fn main() -> perceptron::Result<()> {
    tracing_subscriber::fmt::init();

    let xor = [
        DataPoint::new([0.0, 0.0], [0.0]),
        DataPoint::new([0.0, 1.0], [1.0]),
        DataPoint::new([1.0, 0.0], [1.0]),
        DataPoint::new([1.0, 1.0], [0.0]),
    ];
    let network = Network::seeded(&[2, 3, 1], 0.5, Activator::Sigmoid, 7)?;
    let report = Trainer::new(network)
        .stop_condition(StopCondition::Iterations(5000))
        .logging(Logging::Iterations(1000))
        .train(&xor)?;
    let mut network = report.network;
    for point in &xor {
        println!("{:?} -> {:?}", point.input, network.input(&point.input)?);
    }
    network.reset_display_state()?;

    let mut rng = StdRng::seed_from_u64(2024);
    let training_data = generate_data(&mut rng, 200);
    let network = Network::seeded(&[2, 5, 5, 2], 0.05, Activator::Sigmoid, 7)?;
    let report = Trainer::new(network)
        .stop_condition(StopCondition::Iterations(2000))
        .logging(Logging::Iterations(500))
        .train(&training_data)?;
    let mut network = report.network;

    println!();
    score("Training", &training_data, &mut network)?;
    score("Test", &generate_data(&mut rng, 100), &mut network)?;
    Ok(())
}
