use thiserror::Error;

/// Knobs for the genetic controller. Mirrors the tuning surface exposed to
/// the operator: population size, network topology, and breeding counts.
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub hidden_layer_count: usize,
    pub neurons_per_layer: usize,
    /// Per-matrix chance of mutation during repopulation, in [0, 1].
    pub mutation_rate: f32,
    /// How many top genomes are copied unchanged and seed the gene pool.
    pub best_agent_selection: usize,
    /// How many bottom genomes still get a fitness-weighted shot at breeding.
    pub worst_agent_selection: usize,
    /// How many crossover children to produce per generation.
    pub number_to_crossover: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("population size must be at least 1")]
    EmptyPopulation,
    #[error("hidden layer count must be at least 1")]
    NoHiddenLayers,
    #[error("neurons per layer must be at least 1")]
    NoNeurons,
    #[error("mutation rate {0} outside [0, 1]")]
    MutationRateOutOfRange(f32),
    #[error("best selection must be at least 1 so the gene pool has a fallback")]
    NoBestSelection,
    #[error("best selection {best} exceeds population size {population}")]
    BestExceedsPopulation { best: usize, population: usize },
    #[error("worst selection {worst} exceeds population size {population}")]
    WorstExceedsPopulation { worst: usize, population: usize },
    #[error("best selection {best} plus crossover {crossover} exceeds population size {population}")]
    SelectionOverflow {
        best: usize,
        crossover: usize,
        population: usize,
    },
}

impl EvolutionConfig {
    /// Fail-fast validation at population-creation time. Invalid values are
    /// reported, never silently clamped at this boundary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.hidden_layer_count == 0 {
            return Err(ConfigError::NoHiddenLayers);
        }
        if self.neurons_per_layer == 0 {
            return Err(ConfigError::NoNeurons);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.best_agent_selection == 0 {
            return Err(ConfigError::NoBestSelection);
        }
        if self.best_agent_selection > self.population_size {
            return Err(ConfigError::BestExceedsPopulation {
                best: self.best_agent_selection,
                population: self.population_size,
            });
        }
        if self.worst_agent_selection > self.population_size {
            return Err(ConfigError::WorstExceedsPopulation {
                worst: self.worst_agent_selection,
                population: self.population_size,
            });
        }
        if self.best_agent_selection + self.number_to_crossover > self.population_size {
            return Err(ConfigError::SelectionOverflow {
                best: self.best_agent_selection,
                crossover: self.number_to_crossover,
                population: self.population_size,
            });
        }
        Ok(())
    }
}

impl Default for EvolutionConfig {
    /// Default tuning: 85 vehicles, 5.5% mutation, 8 best / 3 worst
    /// selected, 39 children per generation.
    fn default() -> Self {
        Self {
            population_size: 85,
            hidden_layer_count: 1,
            neurons_per_layer: 10,
            mutation_rate: 0.055,
            best_agent_selection: 8,
            worst_agent_selection: 3,
            number_to_crossover: 39,
        }
    }
}
