//! Progress and result types reported by an evolution run.

use serde::{Deserialize, Serialize};

/// Snapshot of a population member for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    /// Population-assigned identifier.
    pub id: u64,
    /// Fitness score.
    pub fitness: f64,
    /// Generation at which the member was admitted (0 = initial).
    pub generation: u64,
    /// Genes per strand.
    pub strand_length: usize,
    /// Number of strands.
    pub strands: usize,
    /// Genes in flat order.
    pub genes: Vec<f64>,
}

/// Per-iteration progress handed to callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Offspring generated so far.
    pub iteration: usize,
    /// Iteration budget.
    pub max_iterations: usize,
    /// Whether the latest offspring was admitted.
    pub accepted: bool,
    /// Fitness of the latest offspring.
    pub child_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Average fitness of the population.
    pub avg_fitness: f64,
    /// `best_fitness - worst_fitness`.
    pub fitness_range: f64,
    /// Consecutive rejected offspring.
    pub stagnation_count: usize,
}

/// Evolution history for plotting, one entry per iteration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    pub best_fitness: Vec<f64>,
    pub worst_fitness: Vec<f64>,
    pub avg_fitness: Vec<f64>,
    pub fitness_range: Vec<f64>,
}

impl EvolutionHistory {
    pub fn record(&mut self, progress: &EvolutionProgress) {
        self.best_fitness.push(progress.best_fitness);
        self.worst_fitness.push(progress.worst_fitness);
        self.avg_fitness.push(progress.avg_fitness);
        self.fitness_range.push(progress.fitness_range);
    }

    pub fn len(&self) -> usize {
        self.best_fitness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best_fitness.is_empty()
    }
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best member at the end of the run.
    pub best: CandidateSnapshot,
    /// Every member at the end of the run, worst first.
    pub population: Vec<CandidateSnapshot>,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Offspring generated.
    pub iterations: usize,
    /// Offspring admitted into the population.
    pub accepted: u64,
    /// Total fitness evaluations, including the initial population.
    pub total_evaluations: u64,
    /// Best fitness of the initial population.
    pub initial_best_fitness: f64,
    /// Best fitness at the end.
    pub best_fitness: f64,
    /// Average fitness of the final population.
    pub final_avg_fitness: f64,
    /// `best - worst` at the end.
    pub final_fitness_range: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Iteration budget exhausted.
    MaxIterations,
    /// Fitness range dropped below the configured limit.
    Converged,
    /// Reached target fitness.
    TargetReached,
    /// Too many consecutive rejected offspring.
    Stagnation,
    /// Cancelled through the engine's handle.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_record() {
        let mut history = EvolutionHistory::default();
        assert!(history.is_empty());

        history.record(&EvolutionProgress {
            iteration: 1,
            max_iterations: 10,
            accepted: true,
            child_fitness: 2.0,
            best_fitness: 3.0,
            worst_fitness: 1.0,
            avg_fitness: 2.0,
            fitness_range: 2.0,
            stagnation_count: 0,
        });

        assert_eq!(history.len(), 1);
        assert_eq!(history.fitness_range, vec![2.0]);
    }

    #[test]
    fn test_stop_reason_serialization() {
        let json = serde_json::to_string(&StopReason::Converged).unwrap();
        let parsed: StopReason = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StopReason::Converged);
    }
}
