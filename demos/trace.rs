//! Prints the full step trace of a single training iteration as pretty JSON
//! — the exact wire format the studio's renderer consumes.

use traceprop::{Activation, EngineConfig, TrainingEngine};

fn main() {
    let mut engine = TrainingEngine::with_seed(
        EngineConfig {
            input_size: 2,
            hidden_layers: 1,
            neurons_per_layer: 2,
            activation: Activation::Sigmoid,
            learning_rate: 0.5,
        },
        42,
    )
    .expect("config is valid");

    let outcome = engine.train_on_example(&[1.0, 0.5], 1.0).expect("input is well-shaped");

    println!(
        "output = {:.6}, error = {:.6}, loss = {:.6}, {} steps\n",
        outcome.output,
        outcome.error,
        outcome.loss,
        outcome.steps.len()
    );
    println!("{}", serde_json::to_string_pretty(&outcome.steps).expect("steps serialize"));
}
