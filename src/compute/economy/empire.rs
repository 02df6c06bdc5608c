//! A player's economy: owned stars, tech levels and purchase rules.

use serde::{Deserialize, Serialize};

use super::EconomyError;
use super::scan::{GameSnapshot, ResearchScan, StarScan, TechScan};

/// Base cost multiplier for infrastructure upgrades.
const COST_BASE: f64 = 500.0;

/// Resource bonus per terraforming level.
const TERRAFORMING_BONUS: i64 = 5;

/// Infrastructure that can be bought on a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Infrastructure {
    Economy,
    Industry,
    Science,
    WarpGate,
}

impl Infrastructure {
    /// Relative price of one level.
    pub fn cost_scalar(self) -> f64 {
        match self {
            Self::Economy => 1.0,
            Self::Industry => 2.0,
            Self::Science => 8.0,
            Self::WarpGate => 20.0,
        }
    }
}

/// A technology level and its research progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Research {
    pub level: i64,
    pub base_level_cost: i64,
    pub progress: i64,
}

impl Research {
    /// Research points needed to reach the next level.
    pub fn next_level_cost(&self) -> i64 {
        self.level * self.base_level_cost
    }
}

impl From<&ResearchScan> for Research {
    fn from(scan: &ResearchScan) -> Self {
        Self {
            level: scan.level,
            base_level_cost: scan.brr,
            progress: scan.research,
        }
    }
}

/// Tech levels that affect the economy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tech {
    pub scanning: Research,
    pub hyperspace_range: Research,
    pub terraforming: Research,
    pub weapons: Research,
    pub banking: Research,
    pub manufacturing: Research,
}

impl Tech {
    /// Ships produced per industry level per production cycle.
    pub fn industry_rate(&self) -> i64 {
        self.manufacturing.level + 5
    }

    /// Extra resources added to every star.
    pub fn terraforming_delta(&self) -> i64 {
        self.terraforming.level * TERRAFORMING_BONUS
    }

    /// Flat income from banking.
    pub fn banking_income(&self) -> i64 {
        self.banking.level * 75
    }
}

impl From<&TechScan> for Tech {
    fn from(scan: &TechScan) -> Self {
        Self {
            scanning: (&scan.scanning).into(),
            hyperspace_range: (&scan.propulsion).into(),
            terraforming: (&scan.terraforming).into(),
            weapons: (&scan.weapons).into(),
            banking: (&scan.banking).into(),
            manufacturing: (&scan.manufacturing).into(),
        }
    }
}

/// A star owned by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    pub name: String,
    pub resources: i64,
    pub economy: i64,
    pub industry: i64,
    pub science: i64,
    pub warp_gate: bool,
}

impl Star {
    /// Current level of an infrastructure kind (warp gate is 0 or 1).
    pub fn level(&self, kind: Infrastructure) -> i64 {
        match kind {
            Infrastructure::Economy => self.economy,
            Infrastructure::Industry => self.industry,
            Infrastructure::Science => self.science,
            Infrastructure::WarpGate => i64::from(self.warp_gate),
        }
    }

    /// Price of the next level, never below 1.
    pub fn cost(&self, kind: Infrastructure, terraforming_delta: i64) -> i64 {
        let resources = (self.resources + terraforming_delta).max(1) as f64;
        let level = self.level(kind) as f64;
        let cost = kind.cost_scalar() * (level + 1.0) * (COST_BASE / resources);
        (cost as i64).max(1)
    }

    fn upgrade(&mut self, kind: Infrastructure) {
        match kind {
            Infrastructure::Economy => self.economy += 1,
            Infrastructure::Industry => self.industry += 1,
            Infrastructure::Science => self.science += 1,
            Infrastructure::WarpGate => self.warp_gate = true,
        }
    }
}

impl From<&StarScan> for Star {
    fn from(scan: &StarScan) -> Self {
        Self {
            name: scan.name.clone(),
            resources: scan.resources,
            economy: scan.economy,
            industry: scan.industry,
            science: scan.science,
            warp_gate: scan.warp_gate,
        }
    }
}

/// Economic state of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empire {
    pub name: String,
    pub uid: i64,
    pub tech: Tech,
    pub stars: Vec<Star>,
    pub total_economy: i64,
    pub total_industry: i64,
    pub total_science: i64,
    pub total_strength: i64,
    pub cash: i64,
}

impl Empire {
    /// Extract a player's empire from a scan.
    pub fn from_snapshot(snapshot: &GameSnapshot, alias: &str) -> Result<Self, EconomyError> {
        let player = snapshot
            .player(alias)
            .ok_or_else(|| EconomyError::PlayerNotFound(alias.to_string()))?;

        let stars: Vec<Star> = snapshot.stars_owned_by(player.uid).map(Star::from).collect();
        if stars.is_empty() {
            return Err(EconomyError::NoOwnedStars(alias.to_string()));
        }

        Ok(Self {
            name: player.alias.clone(),
            uid: player.uid,
            tech: Tech::from(&player.tech),
            stars,
            total_economy: player.total_economy,
            total_industry: player.total_industry,
            total_science: player.total_science,
            total_strength: player.total_strength,
            cash: player.cash,
        })
    }

    /// Cash earned per production cycle.
    pub fn income(&self) -> i64 {
        self.total_economy * 10 + self.tech.banking_income()
    }

    /// Ships built per production cycle.
    pub fn ship_production(&self) -> i64 {
        self.tech.industry_rate() * self.total_industry
    }

    /// Index and price of the star where `kind` is cheapest.
    ///
    /// Ties go to the first star in scan order. Stars that already have a
    /// warp gate are skipped for [`Infrastructure::WarpGate`].
    pub fn cheapest(&self, kind: Infrastructure) -> Option<(usize, i64)> {
        let delta = self.tech.terraforming_delta();
        self.stars
            .iter()
            .enumerate()
            .filter(|(_, star)| !(kind == Infrastructure::WarpGate && star.warp_gate))
            .map(|(i, star)| (i, star.cost(kind, delta)))
            .min_by_key(|&(_, cost)| cost)
    }

    /// Repeatedly buy the cheapest level of `kind` while `budget` covers it.
    ///
    /// Returns the number of levels bought. Spending is deducted from
    /// `cash`.
    pub fn buy_cheapest(&mut self, kind: Infrastructure, budget: i64) -> i64 {
        let mut remaining = budget;
        let mut bought = 0;

        while let Some((index, cost)) = self.cheapest(kind) {
            if remaining <= 0 || remaining < cost {
                break;
            }
            remaining -= cost;
            self.cash -= cost;
            self.stars[index].upgrade(kind);
            bought += 1;

            match kind {
                Infrastructure::Economy => self.total_economy += 1,
                Infrastructure::Industry => self.total_industry += 1,
                Infrastructure::Science => self.total_science += 1,
                Infrastructure::WarpGate => {}
            }
        }

        bought
    }

    /// Fleet strength adjusted for the weapons gap against an enemy.
    ///
    /// `None` when the enemy has no weapons research.
    pub fn effective_strength(&self, enemy_weapons: i64) -> Option<f64> {
        let x = self.tech.weapons.level as f64;
        let y = enemy_weapons as f64;
        let denominator = 2.0 * y * y + 2.0 * y;
        if denominator <= 0.0 {
            return None;
        }

        let per_ship = (x * y + x + y + 1.0) / denominator;
        Some(per_ship * self.total_strength as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::economy::scan::tests::SAMPLE_SCAN;

    fn fez() -> Empire {
        let scan = GameSnapshot::from_json(SAMPLE_SCAN).unwrap();
        Empire::from_snapshot(&scan, "Fez").unwrap()
    }

    #[test]
    fn test_from_snapshot() {
        let empire = fez();

        assert_eq!(empire.uid, 1);
        assert_eq!(empire.stars.len(), 2);
        assert_eq!(empire.stars[0].name, "Alpha");
        assert_eq!(empire.tech.terraforming_delta(), 5);
        assert_eq!(empire.tech.industry_rate(), 6);
    }

    #[test]
    fn test_missing_player_or_stars() {
        let scan = GameSnapshot::from_json(SAMPLE_SCAN).unwrap();

        assert!(matches!(
            Empire::from_snapshot(&scan, "Nobody"),
            Err(EconomyError::PlayerNotFound(_))
        ));

        let mut scan = scan;
        scan.scanning_data.stars.retain(|_, s| s.owner != 1);
        assert!(matches!(
            Empire::from_snapshot(&scan, "Fez"),
            Err(EconomyError::NoOwnedStars(_))
        ));
    }

    #[test]
    fn test_costs() {
        let empire = fez();
        let delta = empire.tech.terraforming_delta();

        // Alpha: 500 / (45 + 5) = 10 per unit.
        assert_eq!(empire.stars[0].cost(Infrastructure::Economy, delta), 40);
        assert_eq!(empire.stars[0].cost(Infrastructure::Industry, delta), 80);
        assert_eq!(empire.stars[0].cost(Infrastructure::Science, delta), 160);
        // Beta: 500 / (20 + 5) = 20 per unit.
        assert_eq!(empire.stars[1].cost(Infrastructure::Economy, delta), 60);
        assert_eq!(empire.cheapest(Infrastructure::Economy), Some((0, 40)));
    }

    #[test]
    fn test_cost_never_zero() {
        let star = Star {
            name: "Rich".to_string(),
            resources: 10_000,
            economy: 0,
            industry: 0,
            science: 0,
            warp_gate: false,
        };
        assert_eq!(star.cost(Infrastructure::Economy, 0), 1);

        let barren = Star {
            resources: -50,
            ..star
        };
        assert_eq!(barren.cost(Infrastructure::Economy, 0), 500);
    }

    #[test]
    fn test_income_and_production() {
        let empire = fez();

        assert_eq!(empire.income(), 5 * 10 + 75);
        assert_eq!(empire.ship_production(), 6 * 5);
    }

    #[test]
    fn test_buy_cheapest() {
        let mut empire = fez();

        // Alpha 40, Alpha 50, then a 60/60 tie that Alpha wins.
        let bought = empire.buy_cheapest(Infrastructure::Economy, 150);
        assert_eq!(bought, 3);
        assert_eq!(empire.total_economy, 8);
        assert_eq!(empire.cash, 500 - 150);
        assert_eq!(empire.stars[0].economy, 6);
        assert_eq!(empire.stars[1].economy, 2);

        assert_eq!(empire.buy_cheapest(Infrastructure::Industry, 79), 0);
        assert_eq!(empire.buy_cheapest(Infrastructure::Industry, 0), 0);
    }

    #[test]
    fn test_buy_warp_gates_stops_when_all_built() {
        let mut empire = fez();

        let bought = empire.buy_cheapest(Infrastructure::WarpGate, 100_000);
        assert_eq!(bought, 2);
        assert!(empire.stars.iter().all(|s| s.warp_gate));
        assert!(empire.cheapest(Infrastructure::WarpGate).is_none());
    }

    #[test]
    fn test_effective_strength() {
        let empire = fez();

        // x = 2, y = 1: (2 + 2 + 1 + 1) / 4 = 1.5 per ship.
        let strength = empire.effective_strength(1).unwrap();
        assert!((strength - 150.0).abs() < 1e-9);
        assert!(empire.effective_strength(0).is_none());
    }
}
