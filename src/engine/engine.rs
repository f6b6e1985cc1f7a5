use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::activation::Activation;
use crate::engine::config::EngineConfig;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::trace::{Step, TrainOutcome, BackwardOutcome};

/// The training-step engine: a feedforward network that, on every training
/// iteration, records an ordered trace of each micro-operation it performs.
///
/// Owned state, no globals; every instance is independently constructible.
/// Single-threaded by contract — `train_on_example` runs to completion
/// synchronously and the step trace is fully materialized before it returns,
/// so a playback consumer needs no synchronization beyond not mutating it.
pub struct TrainingEngine {
    pub(super) layers: Vec<usize>,
    pub(super) activation: Activation,
    pub(super) learning_rate: f64,

    /// `weights[l]` maps layer `l` to layer `l+1`: shape `layers[l+1] × layers[l]`.
    pub(super) weights: Vec<Matrix>,
    /// `biases[l][j]` for destination neuron `j` of layer `l+1`.
    pub(super) biases: Vec<Vec<f64>>,
    /// Deep snapshot taken at the start of every backward pass; at
    /// construction it matches the fresh draw so weight deltas read zero.
    pub(super) previous_weights: Vec<Matrix>,

    /// Post-activation values per layer; `activations[0]` is the raw input.
    pub(super) activations: Vec<Vec<f64>>,
    /// Weighted sums per layer; empty for layer 0 (no weighted sum there).
    pub(super) pre_activations: Vec<Vec<f64>>,

    /// `deltas[l][j]`: error signal for destination neuron `j` of transition `l`.
    pub(super) deltas: Vec<Vec<f64>>,
    pub(super) weight_gradients: Vec<Matrix>,
    pub(super) bias_gradients: Vec<Vec<f64>>,

    /// The step trace of the most recent training call, regenerated wholesale
    /// each time.
    pub(super) steps: Vec<Step>,
    /// Set by `forward`, cleared on (re)initialization; guards `backward`.
    pub(super) forward_ready: bool,
}

impl TrainingEngine {
    /// Builds an engine with freshly drawn Xavier-uniform weights and biases
    /// uniform in `[-0.1, 0.1]`.
    pub fn new(config: EngineConfig) -> Result<TrainingEngine> {
        Self::build(config, &mut rand::thread_rng())
    }

    /// Like [`new`](Self::new) but with a seeded RNG, for reproducible runs.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<TrainingEngine> {
        Self::build(config, &mut StdRng::seed_from_u64(seed))
    }

    fn build<R: Rng>(config: EngineConfig, rng: &mut R) -> Result<TrainingEngine> {
        config.validate()?;
        let layers = config.layer_sizes();
        let (weights, biases) = draw_parameters(&layers, rng);
        let transitions = layers.len() - 1;

        Ok(TrainingEngine {
            previous_weights: weights.clone(),
            weights,
            biases,
            activation: config.activation,
            learning_rate: config.learning_rate,
            activations: vec![Vec::new(); layers.len()],
            pre_activations: vec![Vec::new(); layers.len()],
            deltas: vec![Vec::new(); transitions],
            weight_gradients: Vec::new(),
            bias_gradients: Vec::new(),
            steps: Vec::new(),
            forward_ready: false,
            layers,
        })
    }

    /// Re-randomizes all weights and biases with the construction procedure.
    ///
    /// The previous-weight snapshot is reset to the fresh draw, so every
    /// weight delta reads zero until the next backward pass. Traces from the
    /// old parameters are cleared.
    pub fn reinitialize(&mut self) {
        self.reinitialize_from(&mut rand::thread_rng());
    }

    /// Seeded variant of [`reinitialize`](Self::reinitialize).
    pub fn reinitialize_with_seed(&mut self, seed: u64) {
        self.reinitialize_from(&mut StdRng::seed_from_u64(seed));
    }

    fn reinitialize_from<R: Rng>(&mut self, rng: &mut R) {
        let (weights, biases) = draw_parameters(&self.layers, rng);
        self.previous_weights = weights.clone();
        self.weights = weights;
        self.biases = biases;
        self.clear_traces();
    }

    fn clear_traces(&mut self) {
        self.activations = vec![Vec::new(); self.layers.len()];
        self.pre_activations = vec![Vec::new(); self.layers.len()];
        self.deltas = vec![Vec::new(); self.layers.len() - 1];
        self.weight_gradients = Vec::new();
        self.bias_gradients = Vec::new();
        self.steps = Vec::new();
        self.forward_ready = false;
    }

    /// Replaces all weights and biases with explicit values, shape-checked
    /// against the topology. The previous-weight snapshot is reset to the
    /// loaded values. Used to pin parameters for worked examples and tests.
    pub fn set_parameters(&mut self, weights: Vec<Vec<Vec<f64>>>, biases: Vec<Vec<f64>>) -> Result<()> {
        let transitions = self.layers.len() - 1;
        if weights.len() != transitions || biases.len() != transitions {
            return Err(Error::InvalidConfig(format!(
                "expected {transitions} layer transitions, got {} weight and {} bias groups",
                weights.len(),
                biases.len()
            )));
        }
        for l in 0..transitions {
            let (fan_out, fan_in) = (self.layers[l + 1], self.layers[l]);
            if weights[l].len() != fan_out || weights[l].iter().any(|row| row.len() != fan_in) {
                return Err(Error::InvalidConfig(format!(
                    "weights[{l}] must be {fan_out}x{fan_in}"
                )));
            }
            if biases[l].len() != fan_out {
                return Err(Error::InvalidConfig(format!(
                    "biases[{l}] must have {fan_out} entries"
                )));
            }
        }

        self.weights = weights.into_iter().map(Matrix::from_rows).collect();
        self.previous_weights = self.weights.clone();
        self.biases = biases;
        self.clear_traces();
        Ok(())
    }

    /// One full training iteration: forward pass, then backward pass with an
    /// immediate gradient-descent update. The returned steps are a copy of
    /// the engine-owned trace, rebuilt from scratch on every call.
    pub fn train_on_example(&mut self, input: &[f64], target: f64) -> Result<TrainOutcome> {
        self.forward(input)?;
        let BackwardOutcome { output, loss, error } = self.backward(target)?;
        Ok(TrainOutcome { output, loss, error, steps: self.steps.clone() })
    }

    // ── Query surface ───────────────────────────────────────────────────

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layers
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Changes the learning rate between training calls; no reconstruction.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {learning_rate}"
            )));
        }
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// The step trace of the most recent training call.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn weight(&self, layer: usize, dest: usize, src: usize) -> f64 {
        self.weights[layer].get(dest, src)
    }

    pub fn bias(&self, layer: usize, dest: usize) -> f64 {
        self.biases[layer][dest]
    }

    /// How much a weight moved in the last backward pass:
    /// `current - previous`. Indices outside the topology yield `0.0` so the
    /// renderer can probe edges unconditionally.
    pub fn weight_delta(&self, layer: usize, dest: usize, src: usize) -> f64 {
        match (self.weights.get(layer), self.previous_weights.get(layer)) {
            (Some(current), Some(previous))
                if dest < current.rows() && src < current.cols() =>
            {
                current.get(dest, src) - previous.get(dest, src)
            }
            _ => 0.0,
        }
    }
}

/// Draws one full parameter set for `layers`: Xavier-uniform weights per
/// transition, biases uniform in `[-0.1, 0.1]`.
fn draw_parameters<R: Rng>(layers: &[usize], rng: &mut R) -> (Vec<Matrix>, Vec<Vec<f64>>) {
    let transitions = layers.len() - 1;
    let mut weights = Vec::with_capacity(transitions);
    let mut biases = Vec::with_capacity(transitions);
    for l in 0..transitions {
        weights.push(Matrix::xavier_uniform(layers[l + 1], layers[l], rng));
        biases.push(Matrix::uniform(1, layers[l + 1], -0.1, 0.1, rng).row(0).to_vec());
    }
    (weights, biases)
}
