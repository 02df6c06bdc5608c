//! Saved game scans in the game's JSON format.
//!
//! Field names follow the scan payload, which uses short keys for stars
//! (`n`, `nr`, `e`, `i`, `s`, `ga`, `puid`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::EconomyError;

/// Top-level scan payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub scanning_data: ScanningData,
}

/// Players and stars visible in a scan, keyed by their game id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanningData {
    #[serde(default)]
    pub players: BTreeMap<String, PlayerScan>,
    #[serde(default)]
    pub stars: BTreeMap<String, StarScan>,
}

/// One player as reported by the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScan {
    pub alias: String,
    pub uid: i64,
    #[serde(default)]
    pub tech: TechScan,
    #[serde(default)]
    pub total_economy: i64,
    #[serde(default)]
    pub total_industry: i64,
    #[serde(default)]
    pub total_science: i64,
    #[serde(default)]
    pub total_strength: i64,
    #[serde(default)]
    pub cash: i64,
}

/// Research levels per technology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechScan {
    #[serde(default)]
    pub scanning: ResearchScan,
    #[serde(default)]
    pub propulsion: ResearchScan,
    #[serde(default)]
    pub terraforming: ResearchScan,
    #[serde(default)]
    pub weapons: ResearchScan,
    #[serde(default)]
    pub banking: ResearchScan,
    #[serde(default)]
    pub manufacturing: ResearchScan,
}

/// State of one technology.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchScan {
    /// Research points needed per level.
    #[serde(default)]
    pub brr: i64,
    #[serde(default)]
    pub level: i64,
    /// Points accumulated toward the next level.
    #[serde(default)]
    pub research: i64,
}

/// One star as reported by the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarScan {
    /// Name.
    #[serde(rename = "n")]
    pub name: String,
    /// Natural resources.
    #[serde(rename = "nr", default)]
    pub resources: i64,
    #[serde(rename = "e", default)]
    pub economy: i64,
    #[serde(rename = "i", default)]
    pub industry: i64,
    #[serde(rename = "s", default)]
    pub science: i64,
    #[serde(rename = "ga", default, deserialize_with = "flag")]
    pub warp_gate: bool,
    /// Owning player uid, -1 when unowned.
    #[serde(rename = "puid", default = "unowned")]
    pub owner: i64,
}

fn unowned() -> i64 {
    -1
}

/// Accept both `true`/`false` and `0`/`1` flags.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

impl GameSnapshot {
    /// Parse a scan from JSON text.
    pub fn from_json(json: &str) -> Result<Self, EconomyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a scan saved on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EconomyError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Find a player by alias.
    pub fn player(&self, alias: &str) -> Option<&PlayerScan> {
        self.scanning_data
            .players
            .values()
            .find(|p| p.alias == alias)
    }

    /// Stars owned by a player uid.
    pub fn stars_owned_by(&self, uid: i64) -> impl Iterator<Item = &StarScan> {
        self.scanning_data
            .stars
            .values()
            .filter(move |s| s.owner == uid)
    }
}
