//! DNA encoding and the genetic operators that act on it.
//!
//! A [`Dna`] is a flat vector of genes in `[0, 1]`, grouped into equal-length
//! strands. Gene `(strand, gene)` lives at `strand * strand_length + gene`.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;

use super::EvolutionError;

/// Real-valued candidate encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dna {
    strand_length: usize,
    strands: usize,
    genes: Vec<f64>,
}

impl Dna {
    /// Create DNA with every gene drawn uniformly from `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(strand_length: usize, strands: usize, rng: &mut R) -> Self {
        let unit = Uniform::new_inclusive(0.0, 1.0);
        let genes = (0..strand_length * strands)
            .map(|_| unit.sample(rng))
            .collect();

        Self {
            strand_length,
            strands,
            genes,
        }
    }

    /// Create DNA from explicit gene values.
    ///
    /// The gene count must equal `strand_length * strands` and every value
    /// must be finite and inside `[0, 1]`.
    pub fn from_genes(
        strand_length: usize,
        strands: usize,
        genes: Vec<f64>,
    ) -> Result<Self, EvolutionError> {
        if genes.len() != strand_length * strands {
            return Err(EvolutionError::GeneCountMismatch {
                expected: strand_length * strands,
                found: genes.len(),
            });
        }
        if let Some((index, &value)) = genes
            .iter()
            .enumerate()
            .find(|(_, g)| !(0.0..=1.0).contains(*g))
        {
            return Err(EvolutionError::GeneOutOfBounds { index, value });
        }

        Ok(Self {
            strand_length,
            strands,
            genes,
        })
    }

    /// Genes per strand.
    #[inline]
    pub fn strand_length(&self) -> usize {
        self.strand_length
    }

    /// Number of strands.
    #[inline]
    pub fn strands(&self) -> usize {
        self.strands
    }

    /// `(strand_length, strands)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.strand_length, self.strands)
    }

    /// Total gene count.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// All genes in flat order.
    #[inline]
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Read one gene by strand and position within the strand.
    pub fn get(&self, strand_index: usize, gene_index: usize) -> Result<f64, EvolutionError> {
        if strand_index >= self.strands || gene_index >= self.strand_length {
            return Err(EvolutionError::IndexOutOfRange {
                strand: strand_index,
                gene: gene_index,
                strands: self.strands,
                strand_length: self.strand_length,
            });
        }
        Ok(self.genes[strand_index * self.strand_length + gene_index])
    }

    /// All genes of one strand.
    pub fn strand(&self, strand_index: usize) -> Result<&[f64], EvolutionError> {
        if strand_index >= self.strands {
            return Err(EvolutionError::IndexOutOfRange {
                strand: strand_index,
                gene: 0,
                strands: self.strands,
                strand_length: self.strand_length,
            });
        }
        let start = strand_index * self.strand_length;
        Ok(&self.genes[start..start + self.strand_length])
    }

    /// Mean absolute gene difference to another DNA of the same shape.
    pub fn distance(&self, other: &Dna) -> Result<f64, EvolutionError> {
        other.check_shape(self.shape())?;
        if self.genes.is_empty() {
            return Ok(0.0);
        }

        let total: f64 = self
            .genes
            .iter()
            .zip(&other.genes)
            .map(|(a, b)| (a - b).abs())
            .sum();
        Ok(total / self.genes.len() as f64)
    }

    /// Fail with `ShapeMismatch` unless this DNA has the given shape.
    pub(crate) fn check_shape(&self, shape: (usize, usize)) -> Result<(), EvolutionError> {
        if self.shape() == shape {
            Ok(())
        } else {
            Err(EvolutionError::ShapeMismatch {
                expected: shape,
                found: self.shape(),
            })
        }
    }
}

/// Uniform crossover: each gene is copied from `parent1` when a fresh draw
/// exceeds 0.5, otherwise from `parent2`.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Dna,
    parent2: &Dna,
    rng: &mut R,
) -> Result<Dna, EvolutionError> {
    parent2.check_shape(parent1.shape())?;

    let genes = parent1
        .genes
        .iter()
        .zip(&parent2.genes)
        .map(|(&g1, &g2)| if rng.r#gen::<f64>() > 0.5 { g1 } else { g2 })
        .collect();

    Ok(Dna {
        strand_length: parent1.strand_length,
        strands: parent1.strands,
        genes,
    })
}

/// Perturb every gene by a uniform draw from `[-rate, +rate]`, saturating at
/// the `[0, 1]` bounds.
///
/// A rate of zero leaves the DNA untouched and draws nothing.
pub fn mutate<R: Rng + ?Sized>(dna: &mut Dna, rate: f64, rng: &mut R) {
    if rate <= 0.0 {
        return;
    }

    let noise = Uniform::new_inclusive(-rate, rate);
    for gene in &mut dna.genes {
        *gene = (*gene + noise.sample(rng)).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_random_dna_shape_and_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let dna = Dna::random(3, 4, &mut rng);

        assert_eq!(dna.shape(), (3, 4));
        assert_eq!(dna.len(), 12);
        assert!(dna.genes().iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_get_flat_index() {
        let dna = Dna::from_genes(2, 3, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();

        assert_eq!(dna.get(0, 0).unwrap(), 0.0);
        assert_eq!(dna.get(1, 1).unwrap(), 0.3);
        assert_eq!(dna.get(2, 0).unwrap(), 0.4);
        assert_eq!(dna.strand(2).unwrap(), &[0.4, 0.5]);
    }

    #[test]
    fn test_get_out_of_range() {
        let dna = Dna::from_genes(2, 3, vec![0.5; 6]).unwrap();

        assert!(matches!(
            dna.get(3, 0),
            Err(EvolutionError::IndexOutOfRange { strand: 3, .. })
        ));
        assert!(matches!(
            dna.get(0, 2),
            Err(EvolutionError::IndexOutOfRange { gene: 2, .. })
        ));
        assert!(dna.strand(3).is_err());
    }

    #[test]
    fn test_from_genes_validation() {
        assert!(matches!(
            Dna::from_genes(2, 2, vec![0.5; 3]),
            Err(EvolutionError::GeneCountMismatch {
                expected: 4,
                found: 3
            })
        ));
        assert!(matches!(
            Dna::from_genes(1, 2, vec![0.5, 1.5]),
            Err(EvolutionError::GeneOutOfBounds { index: 1, .. })
        ));
        assert!(Dna::from_genes(1, 1, vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_crossover_forced_parent1() {
        // A constant u64::MAX stream always draws just below 1.0.
        let mut rng = StepRng::new(u64::MAX, 0);
        let p1 = Dna::from_genes(1, 3, vec![0.1, 0.2, 0.3]).unwrap();
        let p2 = Dna::from_genes(1, 3, vec![0.9, 0.8, 0.7]).unwrap();

        let child = crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(child, p1);
    }

    #[test]
    fn test_crossover_forced_parent2() {
        let mut rng = StepRng::new(0, 0);
        let p1 = Dna::from_genes(1, 3, vec![0.1, 0.2, 0.3]).unwrap();
        let p2 = Dna::from_genes(1, 3, vec![0.9, 0.8, 0.7]).unwrap();

        let child = crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(child, p2);
    }

    #[test]
    fn test_crossover_genes_come_from_parents() {
        let mut rng = StdRng::seed_from_u64(7);
        let p1 = Dna::from_genes(2, 4, vec![0.0; 8]).unwrap();
        let p2 = Dna::from_genes(2, 4, vec![1.0; 8]).unwrap();

        let child = crossover(&p1, &p2, &mut rng).unwrap();
        assert!(child.genes().iter().all(|&g| g == 0.0 || g == 1.0));
    }

    #[test]
    fn test_crossover_shape_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let p1 = Dna::from_genes(1, 3, vec![0.5; 3]).unwrap();
        let p2 = Dna::from_genes(3, 1, vec![0.5; 3]).unwrap();

        assert!(matches!(
            crossover(&p1, &p2, &mut rng),
            Err(EvolutionError::ShapeMismatch {
                expected: (1, 3),
                found: (3, 1)
            })
        ));
    }

    #[test]
    fn test_mutation_clamps_at_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut high = Dna::from_genes(1, 64, vec![1.0; 64]).unwrap();
        let mut low = Dna::from_genes(1, 64, vec![0.0; 64]).unwrap();

        for _ in 0..50 {
            mutate(&mut high, 0.01, &mut rng);
            mutate(&mut low, 0.01, &mut rng);
            assert!(high.genes().iter().all(|&g| g <= 1.0));
            assert!(low.genes().iter().all(|&g| g >= 0.0));
        }
    }

    #[test]
    fn test_mutation_zero_rate_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = Dna::random(2, 5, &mut rng);
        let mut dna = original.clone();

        mutate(&mut dna, 0.0, &mut rng);
        assert_eq!(dna, original);
    }

    #[test]
    fn test_mutation_respects_magnitude() {
        let mut rng = StdRng::seed_from_u64(11);
        let original = Dna::from_genes(1, 100, vec![0.5; 100]).unwrap();
        let mut dna = original.clone();

        mutate(&mut dna, 0.05, &mut rng);
        assert!(
            dna.genes()
                .iter()
                .all(|g| (g - 0.5).abs() <= 0.05 + f64::EPSILON)
        );
    }

    #[test]
    fn test_distance() {
        let a = Dna::from_genes(1, 2, vec![0.0, 1.0]).unwrap();
        let b = Dna::from_genes(1, 2, vec![0.5, 0.5]).unwrap();

        assert!((a.distance(&a).unwrap()).abs() < 1e-12);
        assert!((a.distance(&b).unwrap() - 0.5).abs() < 1e-12);
    }
}
