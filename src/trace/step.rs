use serde::{Serialize, Deserialize};

/// One term of a neuron's weighted sum: `weight × input`.
///
/// `source` is the index of the source neuron in the previous layer and
/// `input` its activation, so a renderer can rebuild the sum edge by edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTerm {
    pub source: usize,
    pub weight: f64,
    pub input: f64,
}

/// One upstream contribution to a hidden neuron's delta:
/// `delta × weight`, where `neuron` indexes the next layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaTerm {
    pub neuron: usize,
    pub delta: f64,
    pub weight: f64,
}

/// One discrete pedagogical step of a training iteration.
///
/// Steps are emitted in the exact order the quantities are computed and each
/// variant carries every operand needed to reconstruct its arithmetic without
/// re-running the network. Serialized form is internally tagged on `kind`
/// with snake_case tags — the stable wire format the studio renders.
///
/// Layer indexing: `layer` on forward steps is the absolute layer index
/// (1 = first hidden layer); on backward steps it is the layer-transition
/// index (`layer` = weights feeding layer `layer + 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// The raw input vector, copied verbatim.
    Input { values: Vec<f64> },

    /// One neuron's weighted sum and activation:
    /// `z = bias + Σ terms[i].weight × terms[i].input`, `activation = f(z)`.
    ForwardNeuron {
        layer: usize,
        neuron: usize,
        bias: f64,
        terms: Vec<EdgeTerm>,
        z: f64,
        activation: f64,
    },

    /// All neurons of `layer` are done; `activations` is the full vector.
    ForwardLayerComplete { layer: usize, activations: Vec<f64> },

    /// Loss at the output: `error = output - target`, `loss = 0.5·error²`.
    Loss { output: f64, target: f64, error: f64, loss: f64 },

    /// One neuron's backpropagated error signal:
    /// `delta = error_signal × derivative`. For the output neuron
    /// `error_signal` is `output - target` and `upstream` is empty; for a
    /// hidden neuron `error_signal = Σ upstream[k].delta × upstream[k].weight`.
    BackwardDelta {
        layer: usize,
        neuron: usize,
        upstream: Vec<DeltaTerm>,
        error_signal: f64,
        derivative: f64,
        delta: f64,
    },

    /// One weight's gradient-descent update:
    /// `new_weight = old_weight - learning_rate × gradient`,
    /// `applied_delta = new_weight - old_weight`.
    WeightUpdate {
        layer: usize,
        dest: usize,
        src: usize,
        old_weight: f64,
        new_weight: f64,
        gradient: f64,
        applied_delta: f64,
    },

    /// End of the training step; full nested snapshots of the weights after
    /// the update and as they were before it.
    Complete {
        weights: Vec<Vec<Vec<f64>>>,
        previous_weights: Vec<Vec<Vec<f64>>>,
    },
}

impl Step {
    /// The wire-format discriminant for this step.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Input { .. } => "input",
            Step::ForwardNeuron { .. } => "forward_neuron",
            Step::ForwardLayerComplete { .. } => "forward_layer_complete",
            Step::Loss { .. } => "loss",
            Step::BackwardDelta { .. } => "backward_delta",
            Step::WeightUpdate { .. } => "weight_update",
            Step::Complete { .. } => "complete",
        }
    }
}

/// Result of one full training iteration, as returned by
/// `TrainingEngine::train_on_example`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOutcome {
    pub output: f64,
    pub loss: f64,
    pub error: f64,
    pub steps: Vec<Step>,
}

/// Result of the backward pass alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackwardOutcome {
    pub output: f64,
    pub loss: f64,
    pub error: f64,
}
