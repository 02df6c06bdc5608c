//! Configuration types for evolution runs and the build optimizer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for one steady-state evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Genes per strand.
    #[serde(default = "default_strand_length")]
    pub strand_length: usize,
    /// Number of strands in each DNA.
    #[serde(default = "default_strands")]
    pub strands: usize,
    /// Number of members kept in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Magnitude bound for per-gene uniform mutation (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Maximum number of offspring to generate.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Stop once `best - worst` fitness falls below this value.
    #[serde(default)]
    pub fitness_range_limit: Option<f64>,
    /// Stop once the best fitness reaches this value.
    #[serde(default)]
    pub target_fitness: Option<f64>,
    /// Stop after this many consecutive rejected offspring.
    #[serde(default)]
    pub stagnation_limit: Option<usize>,
    /// Second-parent redraws allowed before selection fails.
    #[serde(default = "default_max_parent_redraws")]
    pub max_parent_redraws: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            strand_length: default_strand_length(),
            strands: default_strands(),
            population_size: default_population_size(),
            mutation_rate: default_mutation_rate(),
            max_iterations: default_max_iterations(),
            fitness_range_limit: None,
            target_fitness: None,
            stagnation_limit: None,
            max_parent_redraws: default_max_parent_redraws(),
            random_seed: None,
        }
    }
}

fn default_strand_length() -> usize {
    1
}
fn default_strands() -> usize {
    20
}
fn default_population_size() -> usize {
    100
}
fn default_mutation_rate() -> f64 {
    0.01
}
fn default_max_iterations() -> usize {
    1000
}
fn default_optimizer_evolution() -> EvolutionConfig {
    EvolutionConfig {
        fitness_range_limit: Some(10.0),
        ..Default::default()
    }
}
fn default_max_parent_redraws() -> usize {
    64
}

impl EvolutionConfig {
    /// Total genes per DNA.
    #[inline]
    pub fn gene_count(&self) -> usize {
        self.strand_length * self.strands
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_shape()?;
        self.validate_parameters()
    }

    /// Validate the DNA shape and population size used to build a random
    /// initial population.
    pub fn validate_shape(&self) -> Result<(), ConfigError> {
        if self.strand_length == 0 || self.strands == 0 {
            return Err(ConfigError::InvalidShape);
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        Ok(())
    }

    /// Validate the run parameters that apply to any initial population.
    pub fn validate_parameters(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if let Some(limit) = self.fitness_range_limit
            && !(limit.is_finite() && limit >= 0.0)
        {
            return Err(ConfigError::InvalidRangeLimit(limit));
        }
        Ok(())
    }
}

/// Settings for the `build-optimizer` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Evolution parameters. Each strand is one simulated day.
    #[serde(default = "default_optimizer_evolution")]
    pub evolution: EvolutionConfig,
    /// Saved game scan (JSON).
    pub scan_path: PathBuf,
    /// Alias of the player whose build is optimized.
    pub player: String,
    /// Where to write the final population, if anywhere.
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            evolution: default_optimizer_evolution(),
            scan_path: PathBuf::from("scan.json"),
            player: String::from("Player"),
            export_path: Some(PathBuf::from("population.json")),
        }
    }
}

impl OptimizerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evolution.validate()?;
        if self.player.is_empty() {
            return Err(ConfigError::MissingPlayer);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Strand length and strand count must be non-zero")]
    InvalidShape,
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Mutation rate {0} must be within [0, 1]")]
    InvalidMutationRate(f64),
    #[error("Fitness range limit {0} must be finite and non-negative")]
    InvalidRangeLimit(f64),
    #[error("Player alias must not be empty")]
    MissingPlayer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
        assert!(OptimizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let config = EvolutionConfig {
            population_size: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationTooSmall)
        ));

        let config = EvolutionConfig {
            strands: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidShape)));

        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMutationRate(_))
        ));

        let config = EvolutionConfig {
            fitness_range_limit: Some(-1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: EvolutionConfig = serde_json::from_str(r#"{"strands": 5}"#).unwrap();
        assert_eq!(config.strands, 5);
        assert_eq!(config.strand_length, 1);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.fitness_range_limit, None);
        assert_eq!(config.gene_count(), 5);

        let config: OptimizerConfig =
            serde_json::from_str(r#"{"scan_path": "scan.json", "player": "Fez"}"#).unwrap();
        assert_eq!(config.player, "Fez");
        assert_eq!(config.evolution.strands, 20);
        assert_eq!(config.evolution.fitness_range_limit, Some(10.0));
        assert!(config.export_path.is_none());

        assert_eq!(
            OptimizerConfig::default().evolution.fitness_range_limit,
            Some(10.0)
        );
    }

    #[test]
    fn test_shape_and_parameters_validated_separately() {
        let config = EvolutionConfig {
            strands: 0,
            population_size: 0,
            ..Default::default()
        };
        assert!(config.validate_shape().is_err());
        assert!(config.validate_parameters().is_ok());

        let config = EvolutionConfig {
            fitness_range_limit: Some(f64::NAN),
            ..Default::default()
        };
        assert!(config.validate_shape().is_ok());
        assert!(matches!(
            config.validate_parameters(),
            Err(ConfigError::InvalidRangeLimit(_))
        ));
    }
}
