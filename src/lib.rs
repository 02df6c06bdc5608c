//! Steady GA - Steady-state genetic algorithm over real-valued DNA.
//!
//! Candidates are encoded as strands of genes in `[0, 1]`. A fixed-size
//! population is kept sorted by fitness; each iteration breeds one child by
//! uniform crossover and clamped uniform mutation, and the child replaces the
//! worst member only if it scores strictly higher.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration and report types for evolution runs
//! - `compute`: The evolution engine and domain fitness bindings
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use steady_ga::{
//!     compute::economy::{BuildPlan, Empire, GameSnapshot},
//!     compute::EvolutionEngine,
//!     schema::OptimizerConfig,
//! };
//!
//! let scan = GameSnapshot::load("scan.json").unwrap();
//! let empire = Arc::new(Empire::from_snapshot(&scan, "Fez").unwrap());
//!
//! let config = OptimizerConfig::default().evolution;
//! let mut engine = EvolutionEngine::new(config, |dna| {
//!     BuildPlan::new(dna, Arc::clone(&empire))
//! })
//! .unwrap();
//!
//! let result = engine.run().unwrap();
//! println!("Best plan produces {} ships", result.best.fitness);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{Candidate, Dna, EvolutionEngine, EvolutionError, Organism, Population};
pub use schema::{EvolutionConfig, EvolutionResult, OptimizerConfig, StopReason};
