//! Evolve DNA toward a target point and report convergence.

use steady_ga::{
    compute::evolution::{Dna, EvolutionEngine, Organism},
    schema::EvolutionConfig,
};
use std::time::Instant;

const TARGET: f64 = 0.75;

/// Negative squared distance of every gene to `TARGET`.
struct Sphere(Dna);

impl Organism for Sphere {
    fn dna(&self) -> &Dna {
        &self.0
    }

    fn evaluate(&self) -> f64 {
        -self.0.genes().iter().map(|g| (g - TARGET).powi(2)).sum::<f64>()
    }
}

fn main() {
    env_logger::init();

    println!("=== Steady-State Sphere ===\n");

    for mutation_rate in [0.0, 0.01, 0.05, 0.2] {
        let config = EvolutionConfig {
            strand_length: 2,
            strands: 10,
            population_size: 50,
            mutation_rate,
            max_iterations: 20_000,
            fitness_range_limit: Some(1e-4),
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = match EvolutionEngine::new(config, |dna| Ok(Sphere(dna))) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };
        let result = match engine.run() {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {}", e);
                return;
            }
        };
        let elapsed = start.elapsed();

        println!("Mutation rate {}:", mutation_rate);
        println!("  Stopped:        {:?}", result.stats.stop_reason);
        println!("  Iterations:     {}", result.stats.iterations);
        println!("  Accepted:       {}", result.stats.accepted);
        println!("  Best fitness:   {:.6}", result.stats.best_fitness);
        println!("  Fitness range:  {:.6}", result.stats.final_fitness_range);
        println!("  Diversity:      {:.4}", engine.population().diversity());
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!();
    }
}
