//! Evolution driver: the offspring loop around a [`Population`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::schema::{
    EvolutionConfig, EvolutionHistory, EvolutionProgress, EvolutionResult, EvolutionStats,
    StopReason,
};

use super::organism::{Candidate, Organism};
use super::{Dna, EvolutionError, Population};

/// Runs steady-state evolution.
///
/// Each iteration asks the population for a child DNA, turns it into an
/// organism with `spawn`, evaluates it and offers it back. A `spawn` error
/// ends the run with that error.
pub struct EvolutionEngine<O, F> {
    config: EvolutionConfig,
    population: Population<O>,
    spawn: F,
    history: EvolutionHistory,
    iteration: usize,
    stagnation_count: usize,
    evaluations: u64,
    initial_best_fitness: f64,
    cancelled: Arc<AtomicBool>,
}

impl<O, F> EvolutionEngine<O, F>
where
    O: Organism,
    F: FnMut(Dna) -> Result<O, EvolutionError>,
{
    /// Create an engine whose initial population is random DNA of the
    /// configured shape.
    pub fn new(config: EvolutionConfig, mut spawn: F) -> Result<Self, EvolutionError> {
        config.validate_shape()?;

        let mut rng = rng_for(&config);
        let organisms = (0..config.population_size)
            .map(|_| spawn(Dna::random(config.strand_length, config.strands, &mut rng)))
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(config, organisms, spawn, rng)
    }

    /// Create an engine from explicit initial organisms.
    ///
    /// The population size and DNA shape come from `organisms`; the
    /// corresponding config fields are ignored. The remaining fields are
    /// validated as in [`EvolutionEngine::new`].
    pub fn with_population(
        config: EvolutionConfig,
        organisms: Vec<O>,
        spawn: F,
    ) -> Result<Self, EvolutionError> {
        let rng = rng_for(&config);
        Self::build(config, organisms, spawn, rng)
    }

    fn build(
        config: EvolutionConfig,
        organisms: Vec<O>,
        spawn: F,
        rng: StdRng,
    ) -> Result<Self, EvolutionError> {
        config.validate_parameters()?;

        let population = Population::with_rng(organisms, config.mutation_rate, rng)?
            .with_max_parent_redraws(config.max_parent_redraws);
        let evaluations = population.len() as u64;
        let initial_best_fitness = population.best().fitness();

        info!(
            "Initial population of {} evaluated: best {:.3}, worst {:.3}",
            population.len(),
            initial_best_fitness,
            population.worst().fitness()
        );

        Ok(Self {
            config,
            population,
            spawn,
            history: EvolutionHistory::default(),
            iteration: 0,
            stagnation_count: 0,
            evaluations,
            initial_best_fitness,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn population(&self) -> &Population<O> {
        &self.population
    }

    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Produce, evaluate and offer one child.
    pub fn step(&mut self) -> Result<EvolutionProgress, EvolutionError> {
        let child = self.population.generate_child_dna()?;
        let candidate = Candidate::evaluated((self.spawn)(child)?);
        let child_fitness = candidate.fitness();
        let admission = self.population.add_candidate(candidate)?;

        self.iteration += 1;
        self.evaluations += 1;
        if admission.is_accepted() {
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }

        let progress = self.progress(admission.is_accepted(), child_fitness);
        self.history.record(&progress);

        debug!(
            "Iteration {}: max fitness {:.3}, min fitness {:.3}, fitness range {:.3}",
            progress.iteration, progress.best_fitness, progress.worst_fitness, progress.fitness_range
        );
        Ok(progress)
    }

    /// Current progress, describing the latest child.
    fn progress(&self, accepted: bool, child_fitness: f64) -> EvolutionProgress {
        EvolutionProgress {
            iteration: self.iteration,
            max_iterations: self.config.max_iterations,
            accepted,
            child_fitness,
            best_fitness: self.population.best().fitness(),
            worst_fitness: self.population.worst().fitness(),
            avg_fitness: self.population.mean_fitness(),
            fitness_range: self.population.fitness_range(),
            stagnation_count: self.stagnation_count,
        }
    }

    /// Check whether the budget is spent or the run was cancelled.
    fn should_stop(&self) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }
        if self.iteration >= self.config.max_iterations {
            return Some(StopReason::MaxIterations);
        }
        None
    }

    /// Check the termination criteria that depend on the latest offer.
    fn is_finished(&self) -> Option<StopReason> {
        if let Some(target) = self.config.target_fitness
            && self.population.best().fitness() >= target
        {
            return Some(StopReason::TargetReached);
        }

        if let Some(limit) = self.config.fitness_range_limit
            && self.population.fitness_range() < limit
        {
            return Some(StopReason::Converged);
        }

        if let Some(limit) = self.config.stagnation_limit
            && self.stagnation_count >= limit
        {
            return Some(StopReason::Stagnation);
        }

        None
    }

    /// Run evolution with progress callback.
    pub fn run_with_callback<C>(&mut self, mut callback: C) -> Result<EvolutionResult, EvolutionError>
    where
        C: FnMut(&EvolutionProgress),
    {
        let start_time = Instant::now();

        let stop_reason = loop {
            if let Some(reason) = self.should_stop() {
                break reason;
            }

            let progress = self.step()?;
            callback(&progress);

            if let Some(reason) = self.is_finished() {
                break reason;
            }
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        let population = &self.population;

        info!(
            "Stopped after {} iterations ({:?}): best {:.3}, range {:.3}",
            self.iteration,
            stop_reason,
            population.best().fitness(),
            population.fitness_range()
        );

        Ok(EvolutionResult {
            best: population.best().to_snapshot(),
            population: population.snapshot(),
            stats: EvolutionStats {
                iterations: self.iteration,
                accepted: population.accepted(),
                total_evaluations: self.evaluations,
                initial_best_fitness: self.initial_best_fitness,
                best_fitness: population.best().fitness(),
                final_avg_fitness: population.mean_fitness(),
                final_fitness_range: population.fitness_range(),
                elapsed_seconds: elapsed,
                stop_reason,
            },
            history: self.history.clone(),
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}

fn rng_for(config: &EvolutionConfig) -> StdRng {
    let seed = config.random_seed.unwrap_or_else(rand::random);
    StdRng::seed_from_u64(seed)
}
