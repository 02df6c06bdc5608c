//! The evaluation contract between the engine and a problem domain.

use super::Dna;

/// Fitness assigned to a candidate that has not been evaluated yet.
pub const UNEVALUATED: f64 = 0.0;

/// A domain object carrying DNA that can score itself.
///
/// The engine never inspects how fitness is produced; it only orders
/// candidates by the returned value. Higher is better.
pub trait Organism {
    /// The encoding this organism was built from.
    fn dna(&self) -> &Dna;

    /// Compute fitness from the organism's DNA.
    fn evaluate(&self) -> f64;
}

/// An organism paired with its most recent fitness.
#[derive(Debug, Clone)]
pub struct Candidate<O> {
    organism: O,
    fitness: f64,
}

impl<O: Organism> Candidate<O> {
    /// Wrap an organism without evaluating it.
    pub fn new(organism: O) -> Self {
        Self {
            organism,
            fitness: UNEVALUATED,
        }
    }

    /// Wrap an organism and evaluate it once.
    pub fn evaluated(organism: O) -> Self {
        let fitness = organism.evaluate();
        Self { organism, fitness }
    }

    /// Wrap an organism whose fitness was computed elsewhere.
    pub fn with_fitness(organism: O, fitness: f64) -> Self {
        Self { organism, fitness }
    }

    /// Re-run the evaluation and store the result.
    pub fn evaluate(&mut self) -> f64 {
        self.fitness = self.organism.evaluate();
        self.fitness
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Overwrite the stored fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    #[inline]
    pub fn dna(&self) -> &Dna {
        self.organism.dna()
    }

    #[inline]
    pub fn organism(&self) -> &O {
        &self.organism
    }

    pub fn into_organism(self) -> O {
        self.organism
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mean(Dna);

    impl Organism for Mean {
        fn dna(&self) -> &Dna {
            &self.0
        }

        fn evaluate(&self) -> f64 {
            self.0.genes().iter().sum::<f64>() / self.0.len() as f64
        }
    }

    #[test]
    fn test_new_is_unevaluated() {
        let dna = Dna::from_genes(1, 2, vec![0.2, 0.4]).unwrap();
        let candidate = Candidate::new(Mean(dna));
        assert_eq!(candidate.fitness(), UNEVALUATED);
    }

    #[test]
    fn test_evaluate_updates_fitness() {
        let dna = Dna::from_genes(1, 2, vec![0.2, 0.4]).unwrap();
        let mut candidate = Candidate::new(Mean(dna));

        let fitness = candidate.evaluate();
        assert!((fitness - 0.3).abs() < 1e-12);
        assert_eq!(candidate.fitness(), fitness);
        assert!((Candidate::evaluated(Mean(candidate.dna().clone())).fitness() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_with_fitness_skips_evaluation() {
        let dna = Dna::from_genes(1, 1, vec![0.9]).unwrap();
        let mut candidate = Candidate::with_fitness(Mean(dna), 5.0);
        assert_eq!(candidate.fitness(), 5.0);

        candidate.set_fitness(1.5);
        assert_eq!(candidate.fitness(), 1.5);
    }
}
