use rand::Rng;

use crate::matrix::Matrix;

/// Number of sensor inputs (diagonal-left, forward, diagonal-right).
pub const SENSOR_INPUTS: usize = 3;
/// Number of outputs (acceleration, turning).
pub const CONTROL_OUTPUTS: usize = 2;

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// One candidate controller: a fixed-topology feedforward net plus the
/// fitness it earned in the current generation.
///
/// Layer transitions: input (3) -> hidden_1 (N) -> ... -> hidden_H (N) ->
/// output (2). One weight matrix and one scalar bias per transition, so
/// `weights.len() == biases.len() == hidden_layer_count + 1`. Biases are
/// scalars broadcast over the destination layer, not per-neuron vectors.
#[derive(Clone, Debug)]
pub struct NeuralNetwork {
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<f32>,
    /// Working storage for the forward pass, one 1xN row per hidden layer.
    hidden: Vec<Vec<f32>>,
    pub fitness: f32,
}

impl NeuralNetwork {
    /// Build a network with independent uniform random weights and biases
    /// in [-1, 1].
    ///
    /// RNG draw order is fixed for reproducibility: each weight matrix in
    /// layer order, filled row-major, then the biases in layer order.
    pub fn init<R: Rng>(hidden_layer_count: usize, neurons_per_layer: usize, rng: &mut R) -> Self {
        assert!(hidden_layer_count >= 1, "need at least one hidden layer, got {hidden_layer_count}");
        assert!(neurons_per_layer >= 1, "need at least one neuron per layer, got {neurons_per_layer}");

        let mut weights = Vec::with_capacity(hidden_layer_count + 1);
        weights.push(Matrix::zeros(SENSOR_INPUTS, neurons_per_layer));
        for _ in 1..hidden_layer_count {
            weights.push(Matrix::zeros(neurons_per_layer, neurons_per_layer));
        }
        weights.push(Matrix::zeros(neurons_per_layer, CONTROL_OUTPUTS));

        for m in &mut weights {
            m.fill_uniform(rng);
        }
        let biases = (0..weights.len()).map(|_| rng.gen_range(-1.0..1.0)).collect();

        Self {
            weights,
            biases,
            hidden: vec![vec![0.0; neurons_per_layer]; hidden_layer_count],
            fitness: 0.0,
        }
    }

    /// Assemble a network from already-validated weights and biases, e.g.
    /// when restoring a checkpoint. Shapes must match the declared topology;
    /// callers are expected to have checked them.
    pub(crate) fn from_parts(
        weights: Vec<Matrix>,
        biases: Vec<f32>,
        hidden_layer_count: usize,
        neurons_per_layer: usize,
    ) -> Self {
        assert_eq!(weights.len(), hidden_layer_count + 1, "weight matrix count does not match topology");
        assert_eq!(biases.len(), weights.len(), "bias count does not match weight matrix count");
        Self {
            weights,
            biases,
            hidden: vec![vec![0.0; neurons_per_layer]; hidden_layer_count],
            fitness: 0.0,
        }
    }

    /// Deep copy of weights and biases with freshly zeroed activation
    /// buffers. The copy shares no storage with the source, so elites can
    /// be carried into the next generation and mutated independently.
    pub fn copy_and_init(&self, hidden_layer_count: usize, neurons_per_layer: usize) -> Self {
        Self {
            weights: self.weights.clone(),
            biases: self.biases.clone(),
            hidden: vec![vec![0.0; neurons_per_layer]; hidden_layer_count],
            fitness: 0.0,
        }
    }

    /// Forward pass over the three sensor readings.
    ///
    /// Every layer is `tanh(previous * W + bias)`. The output pair is then
    /// squashed to `(sigmoid(out[0]), tanh(out[1]))`: acceleration cannot be
    /// negative, turning is symmetric. Deterministic; only the activation
    /// buffers are overwritten, never the weights.
    pub fn evaluate(&mut self, sensor_a: f32, sensor_b: f32, sensor_c: f32) -> (f32, f32) {
        let input = [sensor_a.tanh(), sensor_b.tanh(), sensor_c.tanh()];

        let mut layer = self.weights[0].mul_row(&input);
        activate(&mut layer, self.biases[0]);
        self.hidden[0] = layer;

        for i in 1..self.hidden.len() {
            let mut layer = self.weights[i].mul_row(&self.hidden[i - 1]);
            activate(&mut layer, self.biases[i]);
            self.hidden[i] = layer;
        }

        let last = self.hidden.len() - 1;
        let mut output = self.weights[last + 1].mul_row(&self.hidden[last]);
        activate(&mut output, self.biases[last + 1]);

        (sigmoid(output[0]), output[1].tanh())
    }

    /// Number of layer transitions (weight matrices / biases).
    pub fn layer_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[f32] {
        &self.biases
    }
}

/// Broadcast the scalar bias, then tanh elementwise.
fn activate(layer: &mut [f32], bias: f32) {
    for v in layer.iter_mut() {
        *v = (*v + bias).tanh();
    }
}
