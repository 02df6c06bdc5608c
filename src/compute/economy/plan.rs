//! Daily economy/industry spending plans scored by ships produced.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::compute::evolution::{Dna, EvolutionError, Organism};

use super::empire::{Empire, Infrastructure};

/// Outcome of one simulated production cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: usize,
    /// Share of the day's cash assigned to economy.
    pub economy_share: f64,
    pub cash: i64,
    pub economy_budget: i64,
    pub industry_budget: i64,
    pub economy_bought: i64,
    pub industry_bought: i64,
    pub total_economy: i64,
    pub total_industry: i64,
    pub ship_production: i64,
}

/// A spending plan: gene 0 of strand `d` is the fraction of day `d`'s cash
/// spent on economy, the rest goes to industry.
///
/// Day 0 spends the player's current cash; later days spend that day's
/// income. Fitness is the ship production summed over all days. Genes
/// after the first in each strand are ignored.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    dna: Dna,
    empire: Arc<Empire>,
}

impl BuildPlan {
    /// Fails with `IndexOutOfRange` if the strands carry no gene.
    pub fn new(dna: Dna, empire: Arc<Empire>) -> Result<Self, EvolutionError> {
        if dna.strand_length() == 0 {
            return Err(EvolutionError::IndexOutOfRange {
                strand: 0,
                gene: 0,
                strands: dna.strands(),
                strand_length: 0,
            });
        }
        Ok(Self { dna, empire })
    }

    pub fn empire(&self) -> &Empire {
        &self.empire
    }

    /// Play the plan out on a copy of the empire.
    pub fn simulate(&self) -> Vec<DayReport> {
        let mut empire = (*self.empire).clone();
        let mut reports = Vec::with_capacity(self.dna.strands());

        for (day, genes) in self.dna.genes().chunks(self.dna.strand_length()).enumerate() {
            if day > 0 {
                empire.cash = empire.income();
            }
            let cash = empire.cash;
            let economy_share = genes[0];

            let economy_budget = (economy_share * cash as f64) as i64;
            let industry_budget = (cash - economy_budget).max(0);

            let economy_bought = empire.buy_cheapest(Infrastructure::Economy, economy_budget);
            let industry_bought = empire.buy_cheapest(Infrastructure::Industry, industry_budget);

            reports.push(DayReport {
                day,
                economy_share,
                cash,
                economy_budget,
                industry_budget,
                economy_bought,
                industry_bought,
                total_economy: empire.total_economy,
                total_industry: empire.total_industry,
                ship_production: empire.ship_production(),
            });
        }

        reports
    }
}

impl Organism for BuildPlan {
    fn dna(&self) -> &Dna {
        &self.dna
    }

    fn evaluate(&self) -> f64 {
        self.simulate()
            .iter()
            .map(|day| day.ship_production)
            .sum::<i64>() as f64
    }
}
