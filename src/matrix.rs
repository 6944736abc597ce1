use rand::Rng;
use serde::{Deserialize, Serialize};

/// Row-major f32 matrix. Small fixed shapes only (sensor count x neuron
/// counts), so everything is plain loops over a flat buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "matrix dimensions must be positive, got {rows}x{cols}");
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> f32 {
        assert!(r < self.rows && c < self.cols, "index ({r},{c}) out of bounds for {}x{} matrix", self.rows, self.cols);
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, value: f32) {
        assert!(r < self.rows && c < self.cols, "index ({r},{c}) out of bounds for {}x{} matrix", self.rows, self.cols);
        self.data[r * self.cols + c] = value;
    }

    /// Fill every entry with an independent uniform draw from [-1, 1),
    /// row-major order.
    pub fn fill_uniform<R: Rng>(&mut self, rng: &mut R) {
        for w in &mut self.data {
            *w = rng.gen_range(-1.0..1.0);
        }
    }

    /// Row-vector times matrix: `input` is 1 x rows, result is 1 x cols.
    /// The shape check is a hard precondition, not a recoverable error.
    pub fn mul_row(&self, input: &[f32]) -> Vec<f32> {
        assert_eq!(
            input.len(),
            self.rows,
            "row vector of length {} cannot multiply a {}x{} matrix",
            input.len(),
            self.rows,
            self.cols
        );
        let mut out = vec![0.0f32; self.cols];
        for (i, &x) in input.iter().enumerate() {
            for (j, o) in out.iter_mut().enumerate() {
                *o += x * self.data[i * self.cols + j];
            }
        }
        out
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }
}
