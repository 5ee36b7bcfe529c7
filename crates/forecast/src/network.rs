//! Small fully-connected regression network.
//!
//! Architecture is fixed by the trainer (two ReLU hidden layers, one linear
//! output unit). Training is plain backpropagation with mini-batch gradient
//! descent on mean squared error; all randomness flows through the seeded
//! RNG the caller supplies, so a fixed seed reproduces weights exactly.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One dense layer: `weights[neuron][input]` plus one bias per neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl DenseLayer {
    /// Xavier-uniform initialization from the caller's RNG.
    fn new(inputs: usize, neurons: usize, rng: &mut StdRng) -> Self {
        let bound = (6.0 / (inputs + neurons) as f64).sqrt();
        let weights = (0..neurons)
            .map(|_| (0..inputs).map(|_| rng.gen_range(-bound..bound)).collect())
            .collect();
        Self {
            weights,
            biases: vec![0.0; neurons],
        }
    }

    fn pre_activations(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(w, b)| w.iter().zip(input).map(|(wi, xi)| wi * xi).sum::<f64>() + b)
            .collect()
    }
}

fn relu(z: f64) -> f64 {
    if z > 0.0 { z } else { 0.0 }
}

fn relu_derivative(z: f64) -> f64 {
    if z > 0.0 { 1.0 } else { 0.0 }
}

/// Feed-forward regressor with ReLU hidden layers and a single linear output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

impl Network {
    /// `sizes` lists layer widths input-first, e.g. `[2, 8, 4, 1]`.
    /// The final size must be 1 (scalar regression).
    pub fn new(sizes: &[usize], rng: &mut StdRng) -> Self {
        debug_assert!(sizes.len() >= 2 && *sizes.last().unwrap_or(&0) == 1);
        let layers = sizes
            .windows(2)
            .map(|w| DenseLayer::new(w[0], w[1], rng))
            .collect();
        Self { layers }
    }

    /// Forward pass; returns the scalar (scaled-space) prediction.
    pub fn forward(&self, input: &[f64]) -> f64 {
        let mut activation = input.to_vec();
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            let zs = layer.pre_activations(&activation);
            activation = if i == last {
                zs
            } else {
                zs.into_iter().map(relu).collect()
            };
        }
        activation[0]
    }

    /// Forward pass caching activations and pre-activations for backprop.
    fn forward_cache(&self, input: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let mut activations = vec![input.to_vec()];
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            let zs = layer.pre_activations(activations.last().unwrap_or(&Vec::new()));
            let a = if i == last {
                zs.clone()
            } else {
                zs.iter().copied().map(relu).collect()
            };
            pre_activations.push(zs);
            activations.push(a);
        }
        (activations, pre_activations)
    }

    /// One gradient-descent step over a mini-batch, minimizing ½(ŷ − y)².
    /// Gradients are averaged over the batch.
    pub fn train_batch(&mut self, batch: &[(&[f64], f64)], learning_rate: f64) {
        if batch.is_empty() {
            return;
        }

        // Accumulators shaped like the layers.
        let mut grad_w: Vec<Vec<Vec<f64>>> = self
            .layers
            .iter()
            .map(|l| l.weights.iter().map(|w| vec![0.0; w.len()]).collect())
            .collect();
        let mut grad_b: Vec<Vec<f64>> = self
            .layers
            .iter()
            .map(|l| vec![0.0; l.biases.len()])
            .collect();

        for (input, target) in batch {
            let (activations, pre_activations) = self.forward_cache(input);

            // Output layer is linear: δ = ŷ − y.
            let mut delta = vec![activations[self.layers.len()][0] - target];

            for l in (0..self.layers.len()).rev() {
                for (j, d) in delta.iter().enumerate() {
                    grad_b[l][j] += d;
                    for (i, a) in activations[l].iter().enumerate() {
                        grad_w[l][j][i] += d * a;
                    }
                }

                if l == 0 {
                    break;
                }

                // Propagate through the ReLU of the previous layer.
                let prev_width = self.layers[l - 1].biases.len();
                let mut prev_delta = vec![0.0; prev_width];
                for (i, pd) in prev_delta.iter_mut().enumerate() {
                    let upstream: f64 = delta
                        .iter()
                        .enumerate()
                        .map(|(j, d)| d * self.layers[l].weights[j][i])
                        .sum();
                    *pd = upstream * relu_derivative(pre_activations[l - 1][i]);
                }
                delta = prev_delta;
            }
        }

        let step = learning_rate / batch.len() as f64;
        for (layer, (gw, gb)) in self.layers.iter_mut().zip(grad_w.iter().zip(&grad_b)) {
            for (w_row, g_row) in layer.weights.iter_mut().zip(gw) {
                for (w, g) in w_row.iter_mut().zip(g_row) {
                    *w -= step * g;
                }
            }
            for (b, g) in layer.biases.iter_mut().zip(gb) {
                *b -= step * g;
            }
        }
    }

    /// Mean squared error over a dataset (scaled space).
    pub fn mse(&self, data: &[(&[f64], f64)]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        data.iter()
            .map(|(x, y)| {
                let d = self.forward(x) - y;
                d * d
            })
            .sum::<f64>()
            / data.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn same_seed_reproduces_identical_weights() {
        let a = Network::new(&[2, 8, 4, 1], &mut seeded(7));
        let b = Network::new(&[2, 8, 4, 1], &mut seeded(7));
        assert_eq!(a, b);
        assert_eq!(a.forward(&[0.3, -0.8]), b.forward(&[0.3, -0.8]));
    }

    #[test]
    fn training_reduces_mse_on_a_learnable_target() {
        // y = 2x₀ − x₁, expressible with ReLU + linear output.
        let samples: Vec<(Vec<f64>, f64)> = (0..32)
            .map(|i| {
                let x0 = (i as f64) / 16.0 - 1.0;
                let x1 = ((i * 7) % 32) as f64 / 16.0 - 1.0;
                (vec![x0, x1], 2.0 * x0 - x1)
            })
            .collect();
        let data: Vec<(&[f64], f64)> = samples.iter().map(|(x, y)| (x.as_slice(), *y)).collect();

        let mut net = Network::new(&[2, 8, 4, 1], &mut seeded(42));
        let before = net.mse(&data);
        for _ in 0..300 {
            for chunk in data.chunks(8) {
                net.train_batch(chunk, 0.05);
            }
        }
        let after = net.mse(&data);
        assert!(after < before, "mse did not improve: {before} -> {after}");
        assert!(after < before * 0.5);
    }

    #[test]
    fn serde_round_trip_preserves_forward_output() {
        let net = Network::new(&[2, 8, 4, 1], &mut seeded(3));
        let json = serde_json::to_string(&net).unwrap();
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(net.forward(&[0.5, 0.5]), back.forward(&[0.5, 0.5]));
    }
}
