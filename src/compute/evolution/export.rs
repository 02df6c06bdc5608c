//! Population export for plotting gene values across strand positions.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Organism, Population};

/// Exported population (JSON format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationExport {
    /// Genes per strand.
    pub strand_length: usize,
    /// Number of strands.
    pub strands: usize,
    /// Offspring offered when the export was taken.
    pub generation: u64,
    /// Members ranked from worst to best.
    pub members: Vec<ExportedMember>,
}

/// One exported member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedMember {
    pub id: u64,
    pub fitness: f64,
    pub generation: u64,
    pub genes: Vec<f64>,
}

impl PopulationExport {
    /// Capture every member of a population.
    pub fn from_population<O: Organism, R>(population: &Population<O, R>) -> Self {
        let (strand_length, strands) = population.shape();
        let members = population
            .members()
            .iter()
            .map(|m| ExportedMember {
                id: m.id().0,
                fitness: m.fitness(),
                generation: m.generation(),
                genes: m.dna().genes().to_vec(),
            })
            .collect();

        Self {
            strand_length,
            strands,
            generation: population.generation(),
            members,
        }
    }

    /// Per-member `(flat position, gene value)` series, worst member first.
    pub fn gene_series(&self) -> Vec<Vec<(usize, f64)>> {
        self.members
            .iter()
            .map(|m| m.genes.iter().copied().enumerate().collect())
            .collect()
    }

    /// Values of gene `gene_index` across strands, one series per member.
    ///
    /// With one gene per strand this is the per-strand curve of each member.
    pub fn strand_series(&self, gene_index: usize) -> Vec<Vec<f64>> {
        if gene_index >= self.strand_length {
            return Vec::new();
        }

        self.members
            .iter()
            .map(|m| {
                m.genes
                    .iter()
                    .skip(gene_index)
                    .step_by(self.strand_length)
                    .copied()
                    .collect()
            })
            .collect()
    }

    /// Write as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

/// Load a population export from file.
pub fn load_population_export<P: AsRef<Path>>(path: P) -> io::Result<PopulationExport> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
