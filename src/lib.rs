//! Genetic-algorithm training of small feedforward networks that drive a
//! vehicle from three distance sensors.
//!
//! The core is two pieces: [`network::NeuralNetwork`], one candidate
//! controller, and [`population::PopulationManager`], which walks the
//! population through evaluation and breeds each next generation via
//! elitism, fitness-weighted crossover and clamped mutation. The
//! environment (here the demo [`track`]) talks to the core only through
//! sensor inputs, `(acceleration, turning)` outputs, and one fitness report
//! per terminated run.

pub mod checkpoint;
pub mod config;
pub mod db;
pub mod matrix;
pub mod network;
pub mod population;
pub mod track;
pub mod training;

pub use config::{ConfigError, EvolutionConfig};
pub use network::NeuralNetwork;
pub use population::{Advance, PopulationManager};
