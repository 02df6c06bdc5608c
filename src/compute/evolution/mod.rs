//! Steady-state genetic algorithm over real-valued DNA.
//!
//! # Overview
//!
//! - **DNA** (`dna`): strands of genes in `[0, 1]`, uniform crossover and
//!   clamped uniform mutation
//! - **Organisms** (`organism`): the [`Organism`] trait a domain implements to
//!   score a DNA, and [`Candidate`] pairing an organism with its fitness
//! - **Population** (`population`): a fixed-capacity pool kept sorted
//!   ascending by fitness; each offer replaces the worst member only if it
//!   strictly beats it
//! - **Driver** (`driver`): [`EvolutionEngine`] runs the offspring loop and
//!   decides when to stop
//! - **Export** (`export`): JSON dumps of the final genes for plotting
//!
//! # Example
//!
//! ```rust
//! use steady_ga::compute::evolution::{Dna, EvolutionEngine, Organism};
//! use steady_ga::schema::EvolutionConfig;
//!
//! struct Sum(Dna);
//!
//! impl Organism for Sum {
//!     fn dna(&self) -> &Dna {
//!         &self.0
//!     }
//!
//!     fn evaluate(&self) -> f64 {
//!         self.0.genes().iter().sum()
//!     }
//! }
//!
//! let config = EvolutionConfig {
//!     strands: 4,
//!     population_size: 10,
//!     max_iterations: 200,
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config, |dna| Ok(Sum(dna))).unwrap();
//! let result = engine.run().unwrap();
//! assert!(result.best.fitness >= result.stats.initial_best_fitness);
//! ```

mod dna;
mod driver;
mod export;
mod organism;
mod population;

pub use dna::{Dna, crossover, mutate};
pub use driver::EvolutionEngine;
pub use export::{ExportedMember, PopulationExport, load_population_export};
pub use organism::{Candidate, Organism, UNEVALUATED};
pub use population::{
    Admission, CandidateId, DEFAULT_MAX_PARENT_REDRAWS, DEFAULT_MUTATION_RATE, Member, Population,
};

/// Error type for evolution operations.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error(
        "Gene ({strand}, {gene}) is outside a DNA of {strands} strands x {strand_length} genes"
    )]
    IndexOutOfRange {
        strand: usize,
        gene: usize,
        strands: usize,
        strand_length: usize,
    },

    #[error("Rank {rank} is outside a population of {len}")]
    RankOutOfRange { rank: usize, len: usize },

    #[error("DNA shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Expected {expected} genes, found {found}")]
    GeneCountMismatch { expected: usize, found: usize },

    #[error("Gene {index} has value {value}, outside [0, 1]")]
    GeneOutOfBounds { index: usize, value: f64 },

    #[error("Initial candidate {index} has NaN fitness")]
    NanFitness { index: usize },

    #[error("Insufficient population: {0}")]
    InsufficientPopulation(String),

    #[error("Mutation rate {0} must be within [0, 1]")]
    InvalidMutationRate(f64),

    #[error("Invalid evolution config: {0}")]
    InvalidConfig(#[from] crate::schema::ConfigError),
}
