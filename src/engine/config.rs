use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::error::{Error, Result};

/// Construction-time configuration for a [`TrainingEngine`](super::TrainingEngine).
///
/// The topology it describes is `[input_size, neurons_per_layer × hidden_layers, 1]`
/// — the output layer is always a single sigmoid neuron (binary
/// classification head) and is not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub input_size: usize,
    pub hidden_layers: usize,
    pub neurons_per_layer: usize,
    pub activation: Activation,
    pub learning_rate: f64,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 {
            return Err(Error::InvalidConfig("input_size must be at least 1".into()));
        }
        if self.neurons_per_layer == 0 {
            return Err(Error::InvalidConfig("neurons_per_layer must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Expands the configuration into the ordered layer-size sequence.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut layers = Vec::with_capacity(self.hidden_layers + 2);
        layers.push(self.input_size);
        layers.extend(std::iter::repeat(self.neurons_per_layer).take(self.hidden_layers));
        layers.push(1);
        layers
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            input_size: 2,
            hidden_layers: 1,
            neurons_per_layer: 4,
            activation: Activation::Sigmoid,
            learning_rate: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_sizes_expand_hidden_layers() {
        let config = EngineConfig {
            input_size: 3,
            hidden_layers: 2,
            neurons_per_layer: 5,
            ..EngineConfig::default()
        };
        assert_eq!(config.layer_sizes(), vec![3, 5, 5, 1]);
    }

    #[test]
    fn zero_hidden_layers_is_legal() {
        let config = EngineConfig { hidden_layers: 0, ..EngineConfig::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.layer_sizes(), vec![2, 1]);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let config = EngineConfig { input_size: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EngineConfig { neurons_per_layer: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EngineConfig { learning_rate: 0.0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = EngineConfig { learning_rate: f64::NAN, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
