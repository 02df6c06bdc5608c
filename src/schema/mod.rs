//! Schema module - Configuration and report types for evolution runs.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
