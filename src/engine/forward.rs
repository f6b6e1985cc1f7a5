use crate::activation::sigmoid;
use crate::engine::engine::TrainingEngine;
use crate::error::{Error, Result};
use crate::trace::{Step, EdgeTerm};

impl TrainingEngine {
    /// Forward pass: computes layer-by-layer activations for `input` and
    /// returns the single sigmoid output.
    ///
    /// Rebuilds the activation and pre-activation buffers wholesale and
    /// regenerates the step trace: one `input` step, then per non-input
    /// layer one `forward_neuron` step per neuron in increasing index order
    /// followed by one `forward_layer_complete` step. Each `forward_neuron`
    /// step carries every `weight × activation` operand so the weighted sum
    /// can be reconstructed term by term.
    ///
    /// Hidden layers apply the configured activation; the output layer is
    /// always sigmoid.
    pub fn forward(&mut self, input: &[f64]) -> Result<f64> {
        if input.len() != self.layers[0] {
            return Err(Error::InvalidInputShape {
                expected: self.layers[0],
                got: input.len(),
            });
        }

        self.steps.clear();
        self.activations = vec![Vec::new(); self.layers.len()];
        self.pre_activations = vec![Vec::new(); self.layers.len()];
        self.activations[0] = input.to_vec();
        self.steps.push(Step::Input { values: input.to_vec() });

        let last = self.layers.len() - 1;
        for l in 1..=last {
            let t = l - 1; // transition feeding layer l
            let mut zs = Vec::with_capacity(self.layers[l]);
            let mut acts = Vec::with_capacity(self.layers[l]);

            for j in 0..self.layers[l] {
                let bias = self.biases[t][j];
                let mut z = bias;
                let mut terms = Vec::with_capacity(self.layers[l - 1]);
                for i in 0..self.layers[l - 1] {
                    let weight = self.weights[t].get(j, i);
                    let prev = self.activations[l - 1][i];
                    z += weight * prev;
                    terms.push(EdgeTerm { source: i, weight, input: prev });
                }

                // The output head is always sigmoid, whatever the hidden
                // layers use.
                let activation = if l == last {
                    sigmoid(z)
                } else {
                    self.activation.apply(z)
                };

                zs.push(z);
                acts.push(activation);
                self.steps.push(Step::ForwardNeuron {
                    layer: l,
                    neuron: j,
                    bias,
                    terms,
                    z,
                    activation,
                });
            }

            self.pre_activations[l] = zs;
            self.activations[l] = acts.clone();
            self.steps.push(Step::ForwardLayerComplete { layer: l, activations: acts });
        }

        self.forward_ready = true;
        Ok(self.activations[last][0])
    }
}
