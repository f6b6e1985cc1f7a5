use crate::engine::engine::TrainingEngine;
use crate::error::{Error, Result};
use crate::loss::HalfMse;
use crate::math::matrix::Matrix;
use crate::trace::{Step, DeltaTerm, BackwardOutcome};

impl TrainingEngine {
    /// Backward pass against `target`: computes the loss, backpropagates
    /// per-neuron deltas, and applies the gradient-descent update in place.
    ///
    /// Requires a prior [`forward`](Self::forward) call (its stored
    /// activations and pre-activations are the inputs here); calling it
    /// without one is an error rather than silent garbage.
    ///
    /// Trace emission order: one `loss` step, one `backward_delta` per
    /// non-input neuron (output first, then hidden layers from last to
    /// first), one `weight_update` per weight in `(transition, dest, src)`
    /// order, and a final `complete` step with full before/after weight
    /// snapshots. Bias updates are applied but emit no step of their own —
    /// biases are not drawn as edges in the visualization.
    pub fn backward(&mut self, target: f64) -> Result<BackwardOutcome> {
        if !self.forward_ready {
            return Err(Error::BackwardBeforeForward);
        }

        let last = self.layers.len() - 1;
        let transitions = last;

        // Snapshot the weights before any mutation; weight deltas for
        // display are measured against this.
        self.previous_weights = self.weights.clone();

        let output = self.activations[last][0];
        let error = HalfMse::error(output, target);
        let loss = HalfMse::loss(output, target);
        self.steps.push(Step::Loss { output, target, error, loss });

        self.deltas = (0..transitions).map(|l| vec![0.0; self.layers[l + 1]]).collect();
        self.weight_gradients = (0..transitions)
            .map(|l| Matrix::zeros(self.layers[l + 1], self.layers[l]))
            .collect();
        self.bias_gradients = (0..transitions).map(|l| vec![0.0; self.layers[l + 1]]).collect();

        // Output delta. The output head is always sigmoid, so its derivative
        // comes straight from the already-evaluated output.
        let output_derivative = output * (1.0 - output);
        let output_delta = error * output_derivative;
        self.deltas[transitions - 1][0] = output_delta;
        self.steps.push(Step::BackwardDelta {
            layer: transitions - 1,
            neuron: 0,
            upstream: Vec::new(),
            error_signal: error,
            derivative: output_derivative,
            delta: output_delta,
        });

        // Hidden deltas, last hidden layer back to first. Transition `t`
        // feeds hidden layer `t + 1`; its deltas pull from transition `t + 1`.
        for t in (0..transitions - 1).rev() {
            for j in 0..self.layers[t + 1] {
                let mut upstream = Vec::with_capacity(self.layers[t + 2]);
                let mut error_signal = 0.0;
                for k in 0..self.layers[t + 2] {
                    let delta_next = self.deltas[t + 1][k];
                    let weight_next = self.weights[t + 1].get(k, j);
                    error_signal += delta_next * weight_next;
                    upstream.push(DeltaTerm { neuron: k, delta: delta_next, weight: weight_next });
                }

                let z = self.pre_activations[t + 1][j];
                let a = self.activations[t + 1][j];
                let derivative = self.activation.derivative(z, a);
                let delta = error_signal * derivative;
                self.deltas[t][j] = delta;
                self.steps.push(Step::BackwardDelta {
                    layer: t,
                    neuron: j,
                    upstream,
                    error_signal,
                    derivative,
                    delta,
                });
            }
        }

        // Weight updates, applied immediately. Gradients depend only on the
        // deltas and the forward activations recorded above, so update order
        // cannot affect them.
        let lr = self.learning_rate;
        for t in 0..transitions {
            for j in 0..self.layers[t + 1] {
                let delta = self.deltas[t][j];
                for i in 0..self.layers[t] {
                    let gradient = delta * self.activations[t][i];
                    let old_weight = self.weights[t].get(j, i);
                    let new_weight = old_weight - lr * gradient;
                    self.weights[t].set(j, i, new_weight);
                    self.weight_gradients[t].set(j, i, gradient);
                    self.steps.push(Step::WeightUpdate {
                        layer: t,
                        dest: j,
                        src: i,
                        old_weight,
                        new_weight,
                        gradient,
                        applied_delta: new_weight - old_weight,
                    });
                }

                // Bias gradient is the delta itself; updated without a step.
                self.bias_gradients[t][j] = delta;
                self.biases[t][j] -= lr * delta;
            }
        }

        self.steps.push(Step::Complete {
            weights: self.weights.iter().map(Matrix::to_rows).collect(),
            previous_weights: self.previous_weights.iter().map(Matrix::to_rows).collect(),
        });

        Ok(BackwardOutcome { output, loss, error })
    }
}
