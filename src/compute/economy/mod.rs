//! Build-order optimization for a star-empire economy game.
//!
//! A saved scan ([`GameSnapshot`]) is reduced to one player's [`Empire`];
//! each [`BuildPlan`] splits daily cash between economy and industry and is
//! scored by the ships it produces. Scans are read from disk.

mod empire;
mod plan;
mod scan;

pub use empire::{Empire, Infrastructure, Research, Star, Tech};
pub use plan::{BuildPlan, DayReport};
pub use scan::{GameSnapshot, PlayerScan, ResearchScan, ScanningData, StarScan, TechScan};

/// Error type for loading game state.
#[derive(Debug, thiserror::Error)]
pub enum EconomyError {
    #[error("No player found with alias {0}")]
    PlayerNotFound(String),

    #[error("Player {0} owns no stars")]
    NoOwnedStars(String),

    #[error("Failed to read scan: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scan: {0}")]
    Parse(#[from] serde_json::Error),
}
