use serde::{Serialize, Deserialize};

/// Hidden-layer nonlinearity, applied uniformly to every hidden layer.
///
/// The output neuron is always logistic-sigmoid regardless of this setting
/// (single-output binary classification head); the engine hardcodes that in
/// its forward and backward passes rather than through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    Tanh,
}

impl Activation {
    /// Element-wise activation `f(z)`.
    ///
    /// Sigmoid clamps its argument to `[-500, 500]` before exponentiation so
    /// extreme pre-activations saturate instead of overflowing the exp.
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(z),
            Activation::ReLU => if z > 0.0 { z } else { 0.0 },
            Activation::Tanh => z.tanh(),
        }
    }

    /// Derivative `f'(z)`, reusing the already-evaluated `output = f(z)`
    /// where the closed form allows it instead of recomputing from `z`:
    /// sigmoid `output·(1-output)`, tanh `1 - output²`. ReLU keys off the
    /// sign of `z` itself.
    pub fn derivative(self, z: f64, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => output * (1.0 - output),
            Activation::ReLU => if z > 0.0 { 1.0 } else { 0.0 },
            Activation::Tanh => 1.0 - output * output,
        }
    }
}

/// Logistic sigmoid with the input clamped to `[-500, 500]`.
///
/// Exposed standalone because the output layer applies it unconditionally.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-500.0, 500.0);
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn sigmoid_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPS);
        assert!((sigmoid(0.45) - 0.610_639).abs() < 1e-6);
        // Clamped tails saturate without producing NaN or infinity.
        assert_eq!(sigmoid(1e9), 1.0);
        assert!(sigmoid(-1e9) < 1e-200);
        assert!(sigmoid(-1e9) >= 0.0);
    }

    #[test]
    fn relu_and_tanh_values() {
        assert_eq!(Activation::ReLU.apply(3.5), 3.5);
        assert_eq!(Activation::ReLU.apply(-2.0), 0.0);
        assert_eq!(Activation::ReLU.apply(0.0), 0.0);
        assert!((Activation::Tanh.apply(0.5) - 0.5_f64.tanh()).abs() < EPS);
    }

    #[test]
    fn derivatives_match_closed_forms() {
        let z = 0.3;
        let s = Activation::Sigmoid.apply(z);
        assert!((Activation::Sigmoid.derivative(z, s) - s * (1.0 - s)).abs() < EPS);

        let t = Activation::Tanh.apply(z);
        assert!((Activation::Tanh.derivative(z, t) - (1.0 - t * t)).abs() < EPS);

        assert_eq!(Activation::ReLU.derivative(1.0, 1.0), 1.0);
        assert_eq!(Activation::ReLU.derivative(-1.0, 0.0), 0.0);
        assert_eq!(Activation::ReLU.derivative(0.0, 0.0), 0.0);
    }

    #[test]
    fn serde_tags_are_lowercase() {
        assert_eq!(serde_json::to_string(&Activation::Sigmoid).unwrap(), "\"sigmoid\"");
        assert_eq!(serde_json::to_string(&Activation::ReLU).unwrap(), "\"relu\"");
        assert_eq!(serde_json::to_string(&Activation::Tanh).unwrap(), "\"tanh\"");
        let back: Activation = serde_json::from_str("\"relu\"").unwrap();
        assert_eq!(back, Activation::ReLU);
    }
}
