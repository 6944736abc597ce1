use log::{debug, info, warn};
use rand::Rng;
use rusqlite::Connection;

use crate::config::{ConfigError, EvolutionConfig};
use crate::db;
use crate::matrix::Matrix;
use crate::network::NeuralNetwork;

/// Cap on rejection-sampling attempts when looking for two distinct parents.
const DISTINCT_PARENT_RETRIES: usize = 100;
/// Per-matrix mutation chance applied to clones of a stored best genome, so
/// a resumed run does not start from an identical population.
const SEED_CLONE_MUTATION_RATE: f32 = 1.0;

/// What happened after a fitness report: either the next genome in the same
/// generation became active, or the population was rebred and evaluation
/// restarted at genome 0. The environment rebinds its agent accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextGenome { index: usize },
    NewGeneration { generation: u32 },
}

/// Drives the evaluate-all-then-breed cycle over a fixed-size population of
/// networks. Single-threaded and tick-driven: the environment evaluates the
/// active genome, reports a fitness exactly once when the agent's run ends,
/// and is told which genome to bind next.
pub struct PopulationManager {
    config: EvolutionConfig,
    genomes: Vec<NeuralNetwork>,
    current_genome: usize,
    generation: u32,
    /// Weighted multiset of parent indices, rebuilt every repopulation.
    gene_pool: Vec<usize>,
}

impl PopulationManager {
    /// Validate the config and allocate `population_size` independently
    /// randomized networks. Genome 0 starts active.
    pub fn new<R: Rng>(config: EvolutionConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let genomes = (0..config.population_size)
            .map(|_| NeuralNetwork::init(config.hidden_layer_count, config.neurons_per_layer, rng))
            .collect();
        Ok(Self {
            config,
            genomes,
            current_genome: 0,
            generation: 0,
            gene_pool: Vec::new(),
        })
    }

    /// Start from the best genome stored in the run database when one is
    /// usable, otherwise from scratch. Slot 0 keeps the stored weights;
    /// every other slot is a perturbed clone of it. A missing, unreadable,
    /// or topology-mismatched record is recoverable and falls back to a
    /// random population.
    pub fn from_best_or_random<R: Rng>(
        config: EvolutionConfig,
        conn: &Connection,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let record = match db::get_best_record(conn) {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!("no stored genomes, starting from a random population");
                return Self::new(config, rng);
            }
            Err(e) => {
                warn!("could not read stored best ({e}), starting from a random population");
                return Self::new(config, rng);
            }
        };

        if record.model.hidden_layer_count != config.hidden_layer_count
            || record.model.neurons_per_layer != config.neurons_per_layer
        {
            warn!(
                "stored best is {}x{} but the run wants {}x{}, starting from a random population",
                record.model.hidden_layer_count,
                record.model.neurons_per_layer,
                config.hidden_layer_count,
                config.neurons_per_layer
            );
            return Self::new(config, rng);
        }

        let best = match record.model.into_network() {
            Ok(net) => net,
            Err(e) => {
                warn!("stored best unusable ({e}), starting from a random population");
                return Self::new(config, rng);
            }
        };
        info!(
            "seeding population from stored best (generation {}, fitness {:.2})",
            record.generation, record.fitness
        );

        let mut genomes = Vec::with_capacity(config.population_size);
        genomes.push(best);
        while genomes.len() < config.population_size {
            let mut clone =
                genomes[0].copy_and_init(config.hidden_layer_count, config.neurons_per_layer);
            mutate_network(&mut clone, SEED_CLONE_MUTATION_RATE, rng);
            genomes.push(clone);
        }

        Ok(Self {
            config,
            genomes,
            current_genome: 0,
            generation: 0,
            gene_pool: Vec::new(),
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Index of the genome the environment is currently driving.
    pub fn current_genome(&self) -> usize {
        self.current_genome
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn genomes(&self) -> &[NeuralNetwork] {
        &self.genomes
    }

    /// Forward pass of the active genome against the current sensor readings.
    pub fn evaluate_active(&mut self, sensor_a: f32, sensor_b: f32, sensor_c: f32) -> (f32, f32) {
        let idx = self.current_genome;
        self.genomes[idx].evaluate(sensor_a, sensor_b, sensor_c)
    }

    pub fn active_network(&self) -> &NeuralNetwork {
        &self.genomes[self.current_genome]
    }

    /// Record the terminated agent's fitness and move on: to the next genome
    /// within the generation, or through a full rebreed back to genome 0.
    /// Called exactly once per agent termination, in genome order.
    pub fn record_fitness_and_advance<R: Rng>(&mut self, fitness: f32, rng: &mut R) -> Advance {
        self.genomes[self.current_genome].fitness = fitness;

        if self.current_genome < self.config.population_size - 1 {
            self.current_genome += 1;
            Advance::NextGenome {
                index: self.current_genome,
            }
        } else {
            self.repopulate(rng);
            self.current_genome = 0;
            Advance::NewGeneration {
                generation: self.generation,
            }
        }
    }

    /// Breed the next generation from the current fitness values.
    ///
    /// Elites are deep-copied in first, then crossover children bred from a
    /// fitness-weighted gene pool, then every placed genome gets a mutation
    /// chance, and any remaining slots are filled with fresh random networks.
    /// The counts are clamped here so the new population is always exactly
    /// `population_size` long, whatever the configuration says.
    fn repopulate<R: Rng>(&mut self, rng: &mut R) {
        let size = self.config.population_size;
        let hidden = self.config.hidden_layer_count;
        let neurons = self.config.neurons_per_layer;

        // Descending fitness; total_cmp keeps the order total even for NaN,
        // and the stable sort preserves tie order for reproducibility.
        self.genomes.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let best_count = self.config.best_agent_selection.min(size);
        let worst_count = self.config.worst_agent_selection.min(size);

        let mut next: Vec<NeuralNetwork> = Vec::with_capacity(size);
        for i in 0..best_count {
            next.push(self.genomes[i].copy_and_init(hidden, neurons));
        }

        self.rebuild_gene_pool(best_count, worst_count);

        let crossover_target = self
            .config
            .number_to_crossover
            .min(size - next.len());
        let mut produced = 0;
        while produced < crossover_target {
            let (pa, pb) = self.pick_parents(best_count, rng);
            let (child_a, child_b) = self.crossover_pair(pa, pb, rng);
            next.push(child_a);
            produced += 1;
            if produced < crossover_target {
                next.push(child_b);
                produced += 1;
            }
        }

        for genome in &mut next {
            mutate_network(genome, self.config.mutation_rate, rng);
        }

        while next.len() < size {
            next.push(NeuralNetwork::init(hidden, neurons, rng));
        }

        debug!(
            "generation {} bred: {} elites, {} children, {} fresh",
            self.generation + 1,
            best_count,
            produced,
            size - best_count - produced
        );

        self.genomes = next;
        self.gene_pool.clear();
        self.generation += 1;
    }

    /// Each selected genome enters the pool `round(fitness * 10)` times, so
    /// breeding odds scale with fitness. The bottom genomes get the same
    /// treatment with their own (typically small) fitness. Negative fitness
    /// contributes nothing.
    fn rebuild_gene_pool(&mut self, best_count: usize, worst_count: usize) {
        self.gene_pool.clear();
        let size = self.genomes.len();
        let selected = (0..best_count).chain(size - worst_count..size);
        for i in selected {
            let repeats = (self.genomes[i].fitness * 10.0).round().max(0.0) as usize;
            for _ in 0..repeats {
                self.gene_pool.push(i);
            }
        }
    }

    /// Sample two parent indices, preferring distinct ones. An empty pool
    /// (every selected fitness rounded to zero) falls back to uniform draws
    /// over the elite block; exhausting the retry budget falls back to the
    /// last sampled pair even if it is a self-pair.
    fn pick_parents<R: Rng>(&self, best_count: usize, rng: &mut R) -> (usize, usize) {
        if self.gene_pool.is_empty() {
            return (
                rng.gen_range(0..best_count),
                rng.gen_range(0..best_count),
            );
        }
        let mut a = self.gene_pool[0];
        let mut b = a;
        for _ in 0..DISTINCT_PARENT_RETRIES {
            a = self.gene_pool[rng.gen_range(0..self.gene_pool.len())];
            b = self.gene_pool[rng.gen_range(0..self.gene_pool.len())];
            if a != b {
                break;
            }
        }
        (a, b)
    }

    /// Breed two children from the genomes at `pa`/`pb`. Each weight matrix
    /// slot and each bias slot is kept or swapped on one independent fair
    /// coin flip, so a child's slot always equals exactly one parent's slot,
    /// never a blend. Children own all of their matrices.
    fn crossover_pair<R: Rng>(&self, pa: usize, pb: usize, rng: &mut R) -> (NeuralNetwork, NeuralNetwork) {
        let hidden = self.config.hidden_layer_count;
        let neurons = self.config.neurons_per_layer;
        let parent_a = &self.genomes[pa];
        let parent_b = &self.genomes[pb];

        let mut child_a = parent_a.copy_and_init(hidden, neurons);
        let mut child_b = parent_b.copy_and_init(hidden, neurons);

        for k in 0..child_a.weights.len() {
            if !rng.gen_bool(0.5) {
                child_a.weights[k] = parent_b.weights[k].clone();
                child_b.weights[k] = parent_a.weights[k].clone();
            }
        }
        for k in 0..child_a.biases.len() {
            if !rng.gen_bool(0.5) {
                child_a.biases[k] = parent_b.biases[k];
                child_b.biases[k] = parent_a.biases[k];
            }
        }

        (child_a, child_b)
    }
}

/// With probability `rate` per weight matrix, swap in a mutated copy.
fn mutate_network<R: Rng>(net: &mut NeuralNetwork, rate: f32, rng: &mut R) {
    for m in &mut net.weights {
        if rng.r#gen::<f32>() < rate {
            *m = mutate_matrix(m, rng);
        }
    }
}

/// Perturb between 1 and rows*cols/7 entries of an owned copy. Positions are
/// drawn independently, so the same entry may be hit more than once; every
/// perturbed value is re-clamped to [-1, 1].
fn mutate_matrix<R: Rng>(m: &Matrix, rng: &mut R) -> Matrix {
    let mut out = m.clone();
    let cap = ((m.rows() * m.cols()) / 7).max(1);
    let count = rng.gen_range(1..=cap);
    for _ in 0..count {
        let r = rng.gen_range(0..m.rows());
        let c = rng.gen_range(0..m.cols());
        let value = out.get(r, c) + rng.gen_range(-1.0..1.0);
        out.set(r, c, value.clamp(-1.0, 1.0));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(size: usize, best: usize, worst: usize, crossover: usize, rate: f32) -> EvolutionConfig {
        EvolutionConfig {
            population_size: size,
            hidden_layer_count: 1,
            neurons_per_layer: 2,
            mutation_rate: rate,
            best_agent_selection: best,
            worst_agent_selection: worst,
            number_to_crossover: crossover,
        }
    }

    fn manager(cfg: EvolutionConfig, seed: u64) -> (PopulationManager, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let pm = PopulationManager::new(cfg, &mut rng).expect("valid config");
        (pm, rng)
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = PopulationManager::new(config(4, 3, 0, 2, 0.1), &mut rng);
        assert!(err.is_err());
    }

    #[test]
    fn new_starts_at_genome_zero_generation_zero() {
        let (pm, _) = manager(config(4, 1, 1, 2, 0.0), 1);
        assert_eq!(pm.current_genome(), 0);
        assert_eq!(pm.generation(), 0);
        assert_eq!(pm.genomes().len(), 4);
    }

    #[test]
    fn advance_walks_the_population_then_rebreeds() {
        let (mut pm, mut rng) = manager(config(3, 1, 1, 2, 0.0), 2);

        assert_eq!(
            pm.record_fitness_and_advance(1.0, &mut rng),
            Advance::NextGenome { index: 1 }
        );
        assert_eq!(
            pm.record_fitness_and_advance(2.0, &mut rng),
            Advance::NextGenome { index: 2 }
        );
        assert_eq!(
            pm.record_fitness_and_advance(3.0, &mut rng),
            Advance::NewGeneration { generation: 1 }
        );
        assert_eq!(pm.current_genome(), 0);
        assert_eq!(pm.generation(), 1);
    }

    #[test]
    fn repopulation_always_restores_population_size() {
        // Counts that undershoot: 1 elite + 1 child leaves 6 slots to fill.
        let (mut pm, mut rng) = manager(config(8, 1, 1, 1, 0.2), 3);
        for i in 0..8 {
            pm.record_fitness_and_advance(i as f32, &mut rng);
        }
        assert_eq!(pm.genomes().len(), 8);

        // Counts that exactly cover the population.
        let (mut pm, mut rng) = manager(config(4, 2, 1, 2, 0.2), 4);
        for i in 0..4 {
            pm.record_fitness_and_advance(i as f32, &mut rng);
        }
        assert_eq!(pm.genomes().len(), 4);
    }

    #[test]
    fn repopulation_resets_all_fitness() {
        let (mut pm, mut rng) = manager(config(4, 1, 1, 2, 0.0), 5);
        for f in [10.0, 1.0, 5.0, 2.0] {
            pm.record_fitness_and_advance(f, &mut rng);
        }
        assert_eq!(pm.genomes().len(), 4);
        for g in pm.genomes() {
            assert_eq!(g.fitness, 0.0);
        }
    }

    #[test]
    fn sort_is_descending_and_stable_on_ties() {
        let (mut pm, _) = manager(config(5, 1, 1, 2, 0.0), 6);
        for (i, f) in [3.0, 7.0, 3.0, 9.0, 7.0].iter().enumerate() {
            pm.genomes[i].fitness = *f;
        }
        pm.genomes.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        let sorted: Vec<f32> = pm.genomes.iter().map(|g| g.fitness).collect();
        for pair in sorted.windows(2) {
            assert!(pair[0] >= pair[1], "not descending: {sorted:?}");
        }
    }

    #[test]
    fn elite_is_bit_identical_with_zero_mutation_rate() {
        let (mut pm, mut rng) = manager(config(4, 1, 1, 2, 0.0), 7);
        let snapshots: Vec<_> = pm.genomes().iter().map(|g| g.weights().to_vec()).collect();
        let biases: Vec<_> = pm.genomes().iter().map(|g| g.biases().to_vec()).collect();

        // Genome 0 is the best; it must survive as slot 0 untouched.
        for f in [10.0, 1.0, 5.0, 2.0] {
            pm.record_fitness_and_advance(f, &mut rng);
        }
        assert_eq!(pm.genomes()[0].weights(), &snapshots[0][..]);
        assert_eq!(pm.genomes()[0].biases(), &biases[0][..]);
        assert_eq!(pm.genomes()[0].fitness, 0.0);
    }

    #[test]
    fn crossover_children_take_whole_slots_from_one_parent() {
        let (pm, mut rng) = manager(config(4, 2, 0, 2, 0.0), 8);
        for _ in 0..50 {
            let (child_a, child_b) = pm.crossover_pair(0, 1, &mut rng);
            for k in 0..child_a.weights().len() {
                let a = &child_a.weights()[k];
                let b = &child_b.weights()[k];
                let pa = &pm.genomes()[0].weights()[k];
                let pb = &pm.genomes()[1].weights()[k];
                assert!(
                    (a == pa && b == pb) || (a == pb && b == pa),
                    "weight slot {k} is not a clean swap"
                );
            }
            for k in 0..child_a.biases().len() {
                let a = child_a.biases()[k];
                let b = child_b.biases()[k];
                let pa = pm.genomes()[0].biases()[k];
                let pb = pm.genomes()[1].biases()[k];
                assert!(
                    (a == pa && b == pb) || (a == pb && b == pa),
                    "bias slot {k} is not a clean swap"
                );
            }
        }
    }

    #[test]
    fn crossover_children_own_their_matrices() {
        let (pm, mut rng) = manager(config(4, 2, 0, 2, 0.0), 9);
        let (mut child_a, _) = pm.crossover_pair(0, 1, &mut rng);
        child_a.weights[0].set(0, 0, 0.5);
        assert_ne!(pm.genomes()[0].weights()[0].get(0, 0), 0.5);
        assert_ne!(pm.genomes()[1].weights()[0].get(0, 0), 0.5);
    }

    #[test]
    fn empty_gene_pool_falls_back_to_elites() {
        // All fitness zero: every round(fitness*10) is 0, pool stays empty.
        let (mut pm, mut rng) = manager(config(6, 2, 2, 4, 0.1), 10);
        for _ in 0..6 {
            pm.record_fitness_and_advance(0.0, &mut rng);
        }
        assert_eq!(pm.genomes().len(), 6);
        assert_eq!(pm.generation(), 1);
    }

    #[test]
    fn negative_fitness_never_enters_the_gene_pool() {
        let (mut pm, _) = manager(config(4, 2, 2, 0, 0.0), 11);
        for (i, f) in [-5.0, -1.0, 2.0, 0.4].iter().enumerate() {
            pm.genomes[i].fitness = *f;
        }
        pm.genomes.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        pm.rebuild_gene_pool(2, 2);
        // 2.0 -> 20 repeats of index 0, 0.4 -> 4 repeats of index 1; the two
        // negative genomes (also re-selected as worst) contribute nothing.
        assert_eq!(pm.gene_pool.iter().filter(|&&i| i == 0).count(), 20);
        assert_eq!(pm.gene_pool.iter().filter(|&&i| i == 1).count(), 4);
        assert_eq!(pm.gene_pool.len(), 24);
    }

    #[test]
    fn worst_selection_reads_the_tail_of_the_sorted_population() {
        let (mut pm, _) = manager(config(5, 1, 2, 0, 0.0), 12);
        for (i, f) in [4.0, 8.0, 0.5, 2.0, 1.0].iter().enumerate() {
            pm.genomes[i].fitness = *f;
        }
        pm.genomes.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        pm.rebuild_gene_pool(1, 2);
        // Best: 8.0 at index 0 (80 repeats). Worst two: 1.0 at index 3 (10)
        // and 0.5 at index 4 (5).
        assert_eq!(pm.gene_pool.iter().filter(|&&i| i == 0).count(), 80);
        assert_eq!(pm.gene_pool.iter().filter(|&&i| i == 3).count(), 10);
        assert_eq!(pm.gene_pool.iter().filter(|&&i| i == 4).count(), 5);
    }

    #[test]
    fn duplicate_parent_fallback_when_pool_has_one_index() {
        let (mut pm, mut rng) = manager(config(4, 1, 0, 2, 0.0), 13);
        pm.gene_pool = vec![2; 30];
        let (a, b) = pm.pick_parents(1, &mut rng);
        assert_eq!((a, b), (2, 2));
    }

    #[test]
    fn mutation_on_1x1_matrix_stays_clamped() {
        let mut rng = StdRng::seed_from_u64(14);
        for start in [-1.0f32, -0.4, 0.0, 0.9, 1.0] {
            let mut m = Matrix::zeros(1, 1);
            m.set(0, 0, start);
            for _ in 0..200 {
                m = mutate_matrix(&m, &mut rng);
                let v = m.get(0, 0);
                assert!((-1.0..=1.0).contains(&v), "mutated value {v} escaped [-1, 1]");
            }
        }
    }

    #[test]
    fn zero_mutation_rate_never_touches_weights() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut net = NeuralNetwork::init(2, 4, &mut rng);
        let before = net.weights().to_vec();
        mutate_network(&mut net, 0.0, &mut rng);
        assert_eq!(net.weights(), &before[..]);
    }

    #[test]
    fn full_mutation_rate_mutates_and_stays_clamped() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut net = NeuralNetwork::init(1, 8, &mut rng);
        let before = net.weights().to_vec();
        mutate_network(&mut net, 1.0, &mut rng);
        // At rate 1 every matrix gets at least one perturbation draw.
        assert_ne!(net.weights(), &before[..]);
        for m in net.weights() {
            for &w in m.values() {
                assert!((-1.0..=1.0).contains(&w));
            }
        }
    }

    #[test]
    fn four_genome_population_with_single_elite() {
        // Population 4, 1 hidden layer, 2 neurons; fitness 10/1/5/2 in
        // creation order; bestCount=1, worstCount=1, crossover=2, no mutation.
        let (mut pm, mut rng) = manager(config(4, 1, 1, 2, 0.0), 17);
        let best_weights = pm.genomes()[0].weights().to_vec();
        for f in [10.0, 1.0, 5.0, 2.0] {
            pm.record_fitness_and_advance(f, &mut rng);
        }

        assert_eq!(pm.genomes().len(), 4);
        assert_eq!(pm.generation(), 1);
        let elite = &pm.genomes()[0];
        assert_eq!(elite.layer_count(), 2);
        assert_eq!(elite.weights(), &best_weights[..]);
        for (m, old) in elite.weights().iter().zip(&best_weights) {
            assert_eq!((m.rows(), m.cols()), (old.rows(), old.cols()));
        }
    }

    #[test]
    fn seeds_from_stored_best_when_topology_matches() {
        use crate::checkpoint::NetworkModel;

        let conn = db::init_db(":memory:").expect("open");
        let mut rng = StdRng::seed_from_u64(40);
        let source = NeuralNetwork::init(1, 2, &mut rng);
        let record = db::BestRecord {
            generation: 3,
            fitness: 88.0,
            model: NetworkModel::from_network(&source, 1, 2),
        };
        db::insert_best(&conn, &record).expect("insert");

        let pm = PopulationManager::from_best_or_random(config(4, 1, 1, 2, 0.1), &conn, &mut rng)
            .expect("valid config");
        assert_eq!(pm.genomes().len(), 4);
        assert_eq!(pm.current_genome(), 0);
        assert_eq!(pm.generation(), 0);
        assert_eq!(pm.genomes()[0].weights(), source.weights());
        assert_eq!(pm.genomes()[0].biases(), source.biases());
        // The clones are perturbed copies, not duplicates of the best.
        assert_ne!(pm.genomes()[1].weights(), source.weights());
    }

    #[test]
    fn empty_database_falls_back_to_a_random_population() {
        let conn = db::init_db(":memory:").expect("open");
        let mut rng = StdRng::seed_from_u64(41);
        let pm = PopulationManager::from_best_or_random(config(5, 1, 1, 2, 0.1), &conn, &mut rng)
            .expect("valid config");
        assert_eq!(pm.genomes().len(), 5);
        assert_eq!(pm.generation(), 0);
    }

    #[test]
    fn mismatched_stored_topology_falls_back_to_a_random_population() {
        use crate::checkpoint::NetworkModel;

        let conn = db::init_db(":memory:").expect("open");
        let mut rng = StdRng::seed_from_u64(42);
        let stored = NeuralNetwork::init(2, 5, &mut rng);
        let record = db::BestRecord {
            generation: 9,
            fitness: 120.0,
            model: NetworkModel::from_network(&stored, 2, 5),
        };
        db::insert_best(&conn, &record).expect("insert");

        // The run wants a 1x2 topology; the stored 2x5 best cannot be used.
        let pm = PopulationManager::from_best_or_random(config(4, 1, 1, 2, 0.1), &conn, &mut rng)
            .expect("valid config");
        assert_eq!(pm.genomes().len(), 4);
        for g in pm.genomes() {
            assert_eq!(g.layer_count(), 2);
            assert_eq!((g.weights()[0].rows(), g.weights()[0].cols()), (3, 2));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_run() {
        let run = |seed: u64| {
            let (mut pm, mut rng) = manager(config(6, 2, 1, 3, 0.3), seed);
            for generation in 0..3 {
                for i in 0..6 {
                    pm.record_fitness_and_advance((generation * 6 + i) as f32 * 0.7, &mut rng);
                }
            }
            pm.genomes().iter().map(|g| g.weights().to_vec()).collect::<Vec<_>>()
        };
        assert_eq!(run(21), run(21));
    }
}
