use ann::trainer::{Logging, StopCondition, Trainer};
use ann::Network;

use rand::distributions::{IndependentSample, Normal, Range};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Input = [f64; 2];
type Output = [f64; 2];

/// Samples noisy points on the unit circle, labelled by whether they fall in
/// the first/third or second/fourth quadrants.
fn generate_data(num_samples: usize) -> Vec<(Input, Output)> {
    let mut rng = rand::thread_rng();
    let radians = Range::new(0.0, 2.0 * std::f64::consts::PI);
    let noise = Normal::new(0.0, 0.1);

    let mut data = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let theta = radians.ind_sample(&mut rng);
        let dx = noise.ind_sample(&mut rng);
        let dy = noise.ind_sample(&mut rng);
        let point = [theta.cos() + dx, theta.sin() + dy];
        let class = if point[0] * point[1] > 0.0 {
            [1.0, 0.0]
        } else {
            [0.0, 1.0]
        };
        data.push((point, class));
    }
    data
}

fn score(set_name: &str, network: &mut Network, test_data: &[(Input, Output)]) -> ann::Result<()> {
    let mut num_correct = 0;
    for &(input, expected) in test_data {
        let output = network.predict(&input)?;
        let class = if output[0] > output[1] { 0 } else { 1 };
        if expected[class] == 1.0 {
            num_correct += 1;
        }
    }
    info!(set = set_name, correct = num_correct, total = test_data.len(), "scored");
    Ok(())
}

fn main() -> ann::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let training_data = generate_data(10_000);
    let mut network = Trainer::new(Network::new(&[2, 5, 5, 2])?)
        .learning_rate(0.3)
        .stop_condition(StopCondition::Iterations(100))
        .logging(Logging::Iterations(10))
        .train(&training_data)?;

    score("training", &mut network, &training_data)?;
    score("test", &mut network, &generate_data(1_000))?;
    Ok(())
}
