//! Compute module - Evolution engine and domain fitness bindings.

pub mod economy;
pub mod evolution;

pub use evolution::{Candidate, Dna, EvolutionEngine, EvolutionError, Organism, Population};
