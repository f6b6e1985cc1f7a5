use traceprop::{Activation, EngineConfig, HalfMse, Step, TrainingEngine};

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn pinned_2_2_1(learning_rate: f64) -> TrainingEngine {
    let mut engine = TrainingEngine::with_seed(
        EngineConfig {
            input_size: 2,
            hidden_layers: 1,
            neurons_per_layer: 2,
            activation: Activation::Sigmoid,
            learning_rate,
        },
        0,
    )
    .unwrap();
    engine
        .set_parameters(
            vec![vec![vec![0.5, -0.3], vec![0.2, 0.4]], vec![vec![0.6, -0.2]]],
            vec![vec![0.1, -0.1], vec![0.05]],
        )
        .unwrap();
    engine
}

/// Worked example: topology [2, 2, 1], pinned parameters, sigmoid, input
/// [1.0, 0.5], target 1.0. Every intermediate quantity is checked against
/// the closed-form arithmetic.
#[test]
fn worked_example_forward() {
    let mut engine = pinned_2_2_1(0.5);
    let output = engine.forward(&[1.0, 0.5]).unwrap();

    // Hidden pre-activations and activations.
    let z0 = 0.5 * 1.0 + (-0.3) * 0.5 + 0.1; // 0.45
    let z1 = 0.2 * 1.0 + 0.4 * 0.5 - 0.1; // 0.30
    let a0 = sigmoid(z0); // ≈ 0.6106
    let a1 = sigmoid(z1); // ≈ 0.5744
    assert!((a0 - 0.6106).abs() < 1e-4);
    assert!((a1 - 0.5744).abs() < 1e-4);

    // Output.
    let z_out = 0.6 * a0 - 0.2 * a1 + 0.05;
    assert!((output - sigmoid(z_out)).abs() < 1e-12);

    let neurons: Vec<&Step> = engine
        .steps()
        .iter()
        .filter(|s| s.kind() == "forward_neuron")
        .collect();
    assert_eq!(neurons.len(), 3);
    match neurons[0] {
        Step::ForwardNeuron { z, activation, bias, terms, .. } => {
            assert!((z - z0).abs() < 1e-12);
            assert!((activation - a0).abs() < 1e-12);
            assert_eq!(*bias, 0.1);
            assert_eq!(terms.len(), 2);
            assert_eq!(terms[0].weight, 0.5);
            assert_eq!(terms[1].input, 0.5);
        }
        other => panic!("unexpected step {}", other.kind()),
    }
    match neurons[1] {
        Step::ForwardNeuron { z, activation, .. } => {
            assert!((z - z1).abs() < 1e-12);
            assert!((activation - a1).abs() < 1e-12);
        }
        other => panic!("unexpected step {}", other.kind()),
    }
}

#[test]
fn worked_example_backward() {
    let mut engine = pinned_2_2_1(0.5);
    let outcome = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap();

    let a0 = sigmoid(0.45);
    let a1 = sigmoid(0.30);
    let z_out = 0.6 * a0 - 0.2 * a1 + 0.05;
    let output = sigmoid(z_out);
    let error = output - 1.0;

    assert!((outcome.output - output).abs() < 1e-12);
    assert!((outcome.error - error).abs() < 1e-12);
    assert!((outcome.loss - 0.5 * error * error).abs() < 1e-12);

    // Output delta: error × σ'(z_out), with σ' taken from the evaluated output.
    let delta_out = error * output * (1.0 - output);
    let first_delta = outcome
        .steps
        .iter()
        .find_map(|s| match s {
            Step::BackwardDelta { layer, neuron, delta, .. } => Some((*layer, *neuron, *delta)),
            _ => None,
        })
        .unwrap();
    assert_eq!((first_delta.0, first_delta.1), (1, 0));
    assert!((first_delta.2 - delta_out).abs() < 1e-12);

    // Hidden deltas: δ_j = δ_out × w_out[j] × σ'(z_j), against the
    // pre-update output weights.
    let hidden: Vec<f64> = outcome
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::BackwardDelta { layer: 0, delta, .. } => Some(*delta),
            _ => None,
        })
        .collect();
    assert!((hidden[0] - delta_out * 0.6 * a0 * (1.0 - a0)).abs() < 1e-12);
    assert!((hidden[1] - delta_out * (-0.2) * a1 * (1.0 - a1)).abs() < 1e-12);

    // Output-layer weight updates move toward reducing the loss: the target
    // exceeds the output, the gradients on weights[1] are delta_out × a_j < 0,
    // so both weights must grow.
    assert!(engine.weight(1, 0, 0) > 0.6);
    assert!(engine.weight(1, 0, 1) > -0.2);
    assert!((engine.weight(1, 0, 0) - (0.6 - 0.5 * delta_out * a0)).abs() < 1e-12);
    assert!((engine.weight(1, 0, 1) - (-0.2 - 0.5 * delta_out * a1)).abs() < 1e-12);

    // Bias updates happen (no step emitted for them).
    assert!((engine.bias(1, 0) - (0.05 - 0.5 * delta_out)).abs() < 1e-12);
}

/// Every gradient recorded in the weight_update steps is checked against a
/// central finite difference of the loss on a frozen copy of the parameters.
#[test]
fn recorded_gradients_match_finite_differences() {
    let input = [1.0, 0.5];
    let target = 1.0;
    let h = 1e-6;

    let weights = vec![vec![vec![0.5, -0.3], vec![0.2, 0.4]], vec![vec![0.6, -0.2]]];
    let biases = vec![vec![0.1, -0.1], vec![0.05]];

    let mut engine = pinned_2_2_1(0.5);
    let outcome = engine.train_on_example(&input, target).unwrap();

    let loss_at = |weights: &Vec<Vec<Vec<f64>>>| -> f64 {
        let mut probe = pinned_2_2_1(0.5);
        probe.set_parameters(weights.clone(), biases.clone()).unwrap();
        let output = probe.forward(&input).unwrap();
        HalfMse::loss(output, target)
    };

    for step in &outcome.steps {
        if let Step::WeightUpdate { layer, dest, src, gradient, .. } = step {
            let mut plus = weights.clone();
            plus[*layer][*dest][*src] += h;
            let mut minus = weights.clone();
            minus[*layer][*dest][*src] -= h;
            let numeric = (loss_at(&plus) - loss_at(&minus)) / (2.0 * h);
            assert!(
                (gradient - numeric).abs() < 1e-6,
                "gradient mismatch at [{layer}][{dest}][{src}]: analytic {gradient}, numeric {numeric}"
            );
        }
    }
}

/// Repeated training on a single example drives the loss toward zero.
#[test]
fn single_example_training_converges() {
    let mut engine = TrainingEngine::with_seed(
        EngineConfig {
            input_size: 2,
            hidden_layers: 1,
            neurons_per_layer: 3,
            activation: Activation::Sigmoid,
            learning_rate: 0.5,
        },
        42,
    )
    .unwrap();

    let first = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap().loss;
    let mut last = first;
    for _ in 0..2000 {
        last = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap().loss;
    }
    assert!(last < first);
    assert!(last < 0.01, "loss failed to converge: {last}");
}

/// The outcome's steps are the same sequence the engine retains.
#[test]
fn outcome_steps_mirror_engine_trace() {
    let mut engine = pinned_2_2_1(0.5);
    let outcome = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap();
    assert_eq!(outcome.steps.as_slice(), engine.steps());

    // A second call regenerates the sequence from scratch.
    let again = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap();
    assert_eq!(again.steps.len(), outcome.steps.len());
    assert_ne!(again.steps, outcome.steps);
}

/// The full trace serializes with the documented kind tags, in order.
#[test]
fn trace_wire_format_is_stable() {
    let mut engine = pinned_2_2_1(0.5);
    let outcome = engine.train_on_example(&[1.0, 0.5], 1.0).unwrap();

    let json = serde_json::to_string(&outcome.steps).unwrap();
    let decoded: Vec<Step> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, outcome.steps);

    // Floats must survive the round trip bit for bit, including values with
    // no short decimal form (z = 0.45 here), so a replayed trace reconstructs
    // the exact arithmetic.
    let zs: Vec<u64> = outcome
        .steps
        .iter()
        .filter_map(|s| match s {
            Step::ForwardNeuron { z, .. } => Some(z.to_bits()),
            _ => None,
        })
        .collect();
    let decoded_zs: Vec<u64> = decoded
        .iter()
        .filter_map(|s| match s {
            Step::ForwardNeuron { z, .. } => Some(z.to_bits()),
            _ => None,
        })
        .collect();
    assert_eq!(zs, decoded_zs);

    let kinds: Vec<&str> = outcome.steps.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "input",
            "forward_neuron",
            "forward_neuron",
            "forward_layer_complete",
            "forward_neuron",
            "forward_layer_complete",
            "loss",
            "backward_delta",
            "backward_delta",
            "backward_delta",
            "weight_update",
            "weight_update",
            "weight_update",
            "weight_update",
            "weight_update",
            "weight_update",
            "complete",
        ]
    );
}
