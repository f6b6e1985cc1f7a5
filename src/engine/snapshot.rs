use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::engine::engine::TrainingEngine;
use crate::math::matrix::Matrix;

/// Read-only view of the engine for the rendering layer.
///
/// Everything is deep-copied into plain nested `Vec`s: no alias into engine
/// state escapes, so a consumer cannot corrupt the engine, and the whole
/// thing serializes directly to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub layers: Vec<usize>,
    pub activation: Activation,
    pub learning_rate: f64,
    pub weights: Vec<Vec<Vec<f64>>>,
    pub biases: Vec<Vec<f64>>,
    pub previous_weights: Vec<Vec<Vec<f64>>>,
    pub activations: Vec<Vec<f64>>,
    pub pre_activations: Vec<Vec<f64>>,
    pub deltas: Vec<Vec<f64>>,
    pub weight_gradients: Vec<Vec<Vec<f64>>>,
    pub bias_gradients: Vec<Vec<f64>>,
}

impl TrainingEngine {
    /// Deep-copies the engine's displayable state.
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            layers: self.layers.clone(),
            activation: self.activation,
            learning_rate: self.learning_rate,
            weights: self.weights.iter().map(Matrix::to_rows).collect(),
            biases: self.biases.clone(),
            previous_weights: self.previous_weights.iter().map(Matrix::to_rows).collect(),
            activations: self.activations.clone(),
            pre_activations: self.pre_activations.clone(),
            deltas: self.deltas.clone(),
            weight_gradients: self.weight_gradients.iter().map(Matrix::to_rows).collect(),
            bias_gradients: self.bias_gradients.clone(),
        }
    }
}
