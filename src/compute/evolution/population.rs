//! Fixed-capacity, fitness-ordered population with steady-state replacement.

use std::cmp::Ordering;

use log::{debug, warn};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::CandidateSnapshot;

use super::dna::{self, Dna};
use super::organism::{Candidate, Organism};
use super::EvolutionError;

/// Default magnitude bound for per-gene mutation.
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;

/// Default number of second-parent redraws before giving up.
pub const DEFAULT_MAX_PARENT_REDRAWS: usize = 64;

/// Stable handle assigned to every member when it enters the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u64);

/// A candidate held by the population.
#[derive(Debug, Clone)]
pub struct Member<O> {
    id: CandidateId,
    generation: u64,
    candidate: Candidate<O>,
}

impl<O: Organism> Member<O> {
    #[inline]
    pub fn id(&self) -> CandidateId {
        self.id
    }

    /// Population generation at which this member was admitted.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.candidate.fitness()
    }

    #[inline]
    pub fn dna(&self) -> &Dna {
        self.candidate.dna()
    }

    #[inline]
    pub fn organism(&self) -> &O {
        self.candidate.organism()
    }

    pub fn candidate(&self) -> &Candidate<O> {
        &self.candidate
    }

    /// Convert to snapshot for serialization.
    pub fn to_snapshot(&self) -> CandidateSnapshot {
        let dna = self.dna();
        CandidateSnapshot {
            id: self.id.0,
            fitness: self.fitness(),
            generation: self.generation,
            strand_length: dna.strand_length(),
            strands: dna.strands(),
            genes: dna.genes().to_vec(),
        }
    }
}

/// Outcome of offering a candidate to the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The candidate replaced the previous worst member.
    Accepted {
        id: CandidateId,
        evicted: CandidateId,
    },
    /// The candidate did not beat the worst member and was dropped.
    Rejected,
}

impl Admission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Steady-state population.
///
/// Members are kept sorted ascending by fitness: index 0 is the worst, the
/// last index the best. The member count is fixed at construction.
pub struct Population<O, R = StdRng> {
    members: Vec<Member<O>>,
    shape: (usize, usize),
    mutation_rate: f64,
    max_parent_redraws: usize,
    generation: u64,
    accepted: u64,
    next_id: u64,
    rng: R,
}

impl<O: Organism> Population<O, StdRng> {
    /// Evaluate the organisms once and build a population seeded from entropy.
    pub fn new(organisms: Vec<O>, mutation_rate: f64) -> Result<Self, EvolutionError> {
        Self::with_rng(organisms, mutation_rate, StdRng::from_entropy())
    }

    /// Same as [`Population::new`] with a reproducible random stream.
    pub fn seeded(organisms: Vec<O>, mutation_rate: f64, seed: u64) -> Result<Self, EvolutionError> {
        Self::with_rng(organisms, mutation_rate, StdRng::seed_from_u64(seed))
    }
}

impl<O: Organism, R: Rng> Population<O, R> {
    /// Evaluate the organisms once and build a population drawing from `rng`.
    pub fn with_rng(organisms: Vec<O>, mutation_rate: f64, rng: R) -> Result<Self, EvolutionError> {
        let candidates = organisms.into_iter().map(Candidate::evaluated).collect();
        Self::from_candidates(candidates, mutation_rate, rng)
    }

    /// Build a population from candidates whose fitness is already known.
    pub fn from_candidates(
        candidates: Vec<Candidate<O>>,
        mutation_rate: f64,
        rng: R,
    ) -> Result<Self, EvolutionError> {
        if candidates.len() < 2 {
            return Err(EvolutionError::InsufficientPopulation(format!(
                "need at least 2 initial candidates, got {}",
                candidates.len()
            )));
        }
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(EvolutionError::InvalidMutationRate(mutation_rate));
        }

        let shape = candidates[0].dna().shape();
        for candidate in &candidates {
            candidate.dna().check_shape(shape)?;
        }
        if let Some(index) = candidates.iter().position(|c| c.fitness().is_nan()) {
            return Err(EvolutionError::NanFitness { index });
        }

        let mut members: Vec<Member<O>> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| Member {
                id: CandidateId(i as u64),
                generation: 0,
                candidate,
            })
            .collect();
        members.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));

        let next_id = members.len() as u64;
        Ok(Self {
            members,
            shape,
            mutation_rate,
            max_parent_redraws: DEFAULT_MAX_PARENT_REDRAWS,
            generation: 0,
            accepted: 0,
            next_id,
            rng,
        })
    }

    /// Set how many times the second parent may be redrawn.
    pub fn with_max_parent_redraws(mut self, redraws: usize) -> Self {
        self.max_parent_redraws = redraws;
        self
    }

    /// Pick two distinct parents uniformly at random, returning their ranks.
    ///
    /// Draws are with replacement; the second parent is redrawn while it is
    /// the same member as the first.
    pub fn select_parents(&mut self) -> Result<(usize, usize), EvolutionError> {
        let len = self.members.len();
        let first = self.rng.gen_range(0..len);
        let mut second = self.rng.gen_range(0..len);

        let mut redraws = 0;
        while self.members[second].id == self.members[first].id {
            if redraws >= self.max_parent_redraws {
                warn!(
                    "No distinct second parent after {} redraws (population {})",
                    redraws, len
                );
                return Err(EvolutionError::InsufficientPopulation(format!(
                    "no distinct second parent after {redraws} redraws"
                )));
            }
            second = self.rng.gen_range(0..len);
            redraws += 1;
        }

        Ok((first, second))
    }

    /// Cross the members at ranks `first` and `second`, then mutate the child.
    pub fn breed(&mut self, first: usize, second: usize) -> Result<Dna, EvolutionError> {
        let len = self.members.len();
        let parent1 = self
            .members
            .get(first)
            .ok_or(EvolutionError::RankOutOfRange { rank: first, len })?;
        let parent2 = self
            .members
            .get(second)
            .ok_or(EvolutionError::RankOutOfRange { rank: second, len })?;

        let mut child = dna::crossover(parent1.dna(), parent2.dna(), &mut self.rng)?;
        dna::mutate(&mut child, self.mutation_rate, &mut self.rng);
        Ok(child)
    }

    /// Select two parents and produce a mutated child DNA.
    ///
    /// The pool itself is left untouched.
    pub fn generate_child_dna(&mut self) -> Result<Dna, EvolutionError> {
        let (first, second) = self.select_parents()?;
        self.breed(first, second)
    }

    /// Offer an evaluated candidate.
    ///
    /// It replaces the current worst member only when its fitness is strictly
    /// greater; ties and NaN are rejected. Every offer advances the
    /// generation counter.
    pub fn add_candidate(&mut self, candidate: Candidate<O>) -> Result<Admission, EvolutionError> {
        candidate.dna().check_shape(self.shape)?;
        self.generation += 1;

        let fitness = candidate.fitness();
        if fitness.is_nan() {
            warn!("Rejected offer {} with NaN fitness", self.generation);
            return Ok(Admission::Rejected);
        }
        if fitness.partial_cmp(&self.members[0].fitness()) != Some(Ordering::Greater) {
            return Ok(Admission::Rejected);
        }

        let evicted = self.members.remove(0).id;
        let id = CandidateId(self.next_id);
        self.next_id += 1;

        // Equal-fitness incumbents stay ahead of the newcomer.
        let position = self
            .members
            .partition_point(|m| m.fitness().total_cmp(&fitness).is_lt());
        self.members.insert(
            position,
            Member {
                id,
                generation: self.generation,
                candidate,
            },
        );
        self.accepted += 1;

        debug!(
            "Generation {}: admitted {:?} (fitness {}) at rank {}, evicted {:?}",
            self.generation, id, fitness, position, evicted
        );
        Ok(Admission::Accepted { id, evicted })
    }
}

impl<O: Organism, R> Population<O, R> {
    /// Current worst member.
    #[inline]
    pub fn worst(&self) -> &Member<O> {
        &self.members[0]
    }

    /// Current best member.
    #[inline]
    pub fn best(&self) -> &Member<O> {
        &self.members[self.members.len() - 1]
    }

    /// All members ranked from worst to best.
    #[inline]
    pub fn members(&self) -> &[Member<O>] {
        &self.members
    }

    /// Member at a rank, 0 being the worst.
    pub fn member(&self, rank: usize) -> Option<&Member<O>> {
        self.members.get(rank)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Fixed member count.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    /// `(strand_length, strands)` shared by every member.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    #[inline]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Number of candidates offered so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of offers that were admitted.
    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// `best - worst`, used as a convergence signal.
    pub fn fitness_range(&self) -> f64 {
        self.best().fitness() - self.worst().fitness()
    }

    pub fn mean_fitness(&self) -> f64 {
        self.members.iter().map(|m| m.fitness()).sum::<f64>() / self.members.len() as f64
    }

    /// Mean pairwise DNA distance.
    pub fn diversity(&self) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;

        for (i, a) in self.members.iter().enumerate() {
            for b in &self.members[i + 1..] {
                if let Ok(d) = a.dna().distance(b.dna()) {
                    total += d;
                    count += 1;
                }
            }
        }

        if count > 0 { total / count as f64 } else { 0.0 }
    }

    /// Read-only iteration over every member's DNA, worst first.
    pub fn dna_iter(&self) -> impl Iterator<Item = &Dna> {
        self.members.iter().map(|m| m.dna())
    }

    /// Snapshots of every member, worst first.
    pub fn snapshot(&self) -> Vec<CandidateSnapshot> {
        self.members.iter().map(Member::to_snapshot).collect()
    }
}
