use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matrix::Matrix;
use crate::network::{CONTROL_OUTPUTS, NeuralNetwork, SENSOR_INPUTS};

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("checkpoint encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("checkpoint shape mismatch: {0}")]
    ShapeMismatch(String),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CheckpointMeta {
    pub generation: u32,
    pub fitness: f32,
    pub saved_at: String,
}

/// Serializable form of a network: topology plus the weight/bias values.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetworkModel {
    pub hidden_layer_count: usize,
    pub neurons_per_layer: usize,
    pub weights: Vec<Matrix>,
    pub biases: Vec<f32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Checkpoint {
    pub meta: CheckpointMeta,
    pub model: NetworkModel,
}

impl NetworkModel {
    pub fn from_network(net: &NeuralNetwork, hidden_layer_count: usize, neurons_per_layer: usize) -> Self {
        Self {
            hidden_layer_count,
            neurons_per_layer,
            weights: net.weights().to_vec(),
            biases: net.biases().to_vec(),
        }
    }

    /// Rebuild a runnable network, verifying every matrix shape first so a
    /// corrupted checkpoint can never reach a multiply.
    pub fn into_network(self) -> Result<NeuralNetwork, CheckpointError> {
        let transitions = self.hidden_layer_count + 1;
        if self.hidden_layer_count < 1 || self.neurons_per_layer < 1 {
            return Err(CheckpointError::ShapeMismatch(format!(
                "topology {}x{} is not a valid network",
                self.hidden_layer_count, self.neurons_per_layer
            )));
        }
        if self.weights.len() != transitions || self.biases.len() != transitions {
            return Err(CheckpointError::ShapeMismatch(format!(
                "expected {transitions} weight matrices and biases, got {} and {}",
                self.weights.len(),
                self.biases.len()
            )));
        }
        for (k, m) in self.weights.iter().enumerate() {
            let rows = if k == 0 { SENSOR_INPUTS } else { self.neurons_per_layer };
            let cols = if k == transitions - 1 { CONTROL_OUTPUTS } else { self.neurons_per_layer };
            if m.rows() != rows || m.cols() != cols {
                return Err(CheckpointError::ShapeMismatch(format!(
                    "weight matrix {k} is {}x{}, expected {rows}x{cols}",
                    m.rows(),
                    m.cols()
                )));
            }
        }
        Ok(NeuralNetwork::from_parts(
            self.weights,
            self.biases,
            self.hidden_layer_count,
            self.neurons_per_layer,
        ))
    }
}

impl Checkpoint {
    pub fn new(model: NetworkModel, generation: u32, fitness: f32) -> Self {
        Self {
            meta: CheckpointMeta {
                generation,
                fitness,
                saved_at: Utc::now().to_rfc3339(),
            },
            model,
        }
    }
}

pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
    let json = serde_json::to_string_pretty(checkpoint)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_checkpoint(path: &Path) -> Result<Option<Checkpoint>, CheckpointError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}
