//! Generation driver: wires the demo track to the genetic controller and
//! persists the best genome of every generation.

use std::path::Path;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rusqlite::Connection;

use crate::checkpoint::{self, Checkpoint, NetworkModel};
use crate::config::{ConfigError, EvolutionConfig};
use crate::db::{self, BestRecord};
use crate::population::{Advance, PopulationManager};
use crate::track::Vehicle;

/// Hard cap on ticks per agent run, so a genome that never terminates on its
/// own (e.g. circling at the success boundary) still yields.
const MAX_TICKS_PER_RUN: usize = 20_000;

pub struct TrainingReport {
    pub generations: u32,
    pub best_fitness: f32,
}

/// Run the evolutionary loop for `generations` full population cycles.
/// Resumes from the best genome in the run database when one is stored;
/// every new overall best is written both to the database and to a JSON
/// checkpoint at `checkpoint_path`.
pub fn run(
    config: EvolutionConfig,
    generations: u32,
    seed: u64,
    db_path: &str,
    checkpoint_path: &Path,
) -> Result<TrainingReport, ConfigError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let conn = match db::init_db(db_path) {
        Ok(conn) => Some(conn),
        Err(e) => {
            warn!("run database unavailable ({e}), continuing without persistence");
            None
        }
    };
    let mut population = match &conn {
        Some(conn) => PopulationManager::from_best_or_random(config, conn, &mut rng)?,
        None => PopulationManager::new(config, &mut rng)?,
    };

    let hidden = population.config().hidden_layer_count;
    let neurons = population.config().neurons_per_layer;
    let pop_size = population.config().population_size;

    let mut vehicle = Vehicle::new();
    let mut overall_best = f32::NEG_INFINITY;

    while population.generation() < generations {
        let mut generation_best: Option<(f32, NetworkModel)> = None;
        let mut fitness_sum = 0.0;
        let generation = population.generation();

        for _ in 0..pop_size {
            let fitness = drive_one_genome(&mut population, &mut vehicle);
            fitness_sum += fitness;

            if generation_best.as_ref().map_or(true, |(best, _)| fitness > *best) {
                let model = NetworkModel::from_network(population.active_network(), hidden, neurons);
                generation_best = Some((fitness, model));
            }

            // Either transition rebinds the vehicle to a fresh run.
            if let Advance::NewGeneration { generation } =
                population.record_fitness_and_advance(fitness, &mut rng)
            {
                log::debug!("generation {generation} active");
            }
            vehicle.reset();
        }

        let (best_fitness, best_model) = generation_best.expect("population is never empty");
        info!(
            "gen {:>4} | best {:>9.2} | avg {:>9.2}",
            generation,
            best_fitness,
            fitness_sum / pop_size as f32
        );

        if best_fitness > overall_best {
            overall_best = best_fitness;
            let ckpt = Checkpoint::new(best_model.clone(), generation, best_fitness);
            if let Err(e) = checkpoint::save_checkpoint(checkpoint_path, &ckpt) {
                warn!("could not write checkpoint for generation {generation}: {e}");
            }
            if let Some(conn) = &conn {
                persist_best(conn, generation, best_fitness, best_model);
            }
        }
    }

    Ok(TrainingReport {
        generations,
        best_fitness: overall_best,
    })
}

/// Tick the vehicle under the active genome until its run ends, returning
/// the fitness earned.
fn drive_one_genome(population: &mut PopulationManager, vehicle: &mut Vehicle) -> f32 {
    for _ in 0..MAX_TICKS_PER_RUN {
        let (a, b, c) = vehicle.sensors();
        let (acceleration, turning) = population.evaluate_active(a, b, c);
        if vehicle.step(acceleration, turning).is_some() {
            break;
        }
    }
    vehicle.fitness()
}

fn persist_best(conn: &Connection, generation: u32, fitness: f32, model: NetworkModel) {
    let record = BestRecord {
        generation,
        fitness,
        model,
    };
    if let Err(e) = db::insert_best(conn, &record) {
        warn!("could not persist generation {generation} best: {e}");
    }
}
