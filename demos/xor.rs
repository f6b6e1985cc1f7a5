use traceprop::{Activation, EngineConfig, TrainingEngine};

fn main() {
    let mut engine = TrainingEngine::new(EngineConfig {
        input_size: 2,
        hidden_layers: 1,
        neurons_per_layer: 4,
        activation: Activation::Sigmoid,
        learning_rate: 0.5,
    })
    .expect("config is valid");

    let examples: [(&[f64; 2], f64); 4] = [
        (&[1.0, 0.0], 1.0),
        (&[1.0, 1.0], 0.0),
        (&[0.0, 1.0], 1.0),
        (&[0.0, 0.0], 0.0),
    ];

    let epochs = 10000;
    for epoch in 0..epochs {
        let mut total_loss = 0.0;
        for (input, target) in &examples {
            let outcome = engine.train_on_example(*input, *target).expect("input is well-shaped");
            total_loss += outcome.loss;
        }
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: mean loss = {:.6}", total_loss / examples.len() as f64);
        }
    }

    println!();
    for (input, target) in &examples {
        let output = engine.forward(*input).expect("input is well-shaped");
        println!("Input: {:?} -> Output: {:.4} (target {})", input, output, target);
    }
    println!(
        "One training step emits {} trace steps for this topology.",
        engine.steps().len()
    );
}
