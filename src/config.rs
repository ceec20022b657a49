//! Engine configuration.
//!
//! Hosts describe the grid they want in JSON and get back a seeded,
//! ready-to-step [`MargolusGrid`]. Every field has a default, so `{}` yields
//! the 160x120 falling-sand setup.
//!
//! ```json
//! {
//!   "width": 64,
//!   "height": 48,
//!   "fill_probability": 0.2,
//!   "seed": 7,
//!   "threads": 4,
//!   "rules": [
//!     { "input": [1, 1, 0, 0], "output": [0, 0, 1, 1], "mirror": true }
//!   ]
//! }
//! ```

use serde::Deserialize;
use tracing::info;

use crate::automaton::rules::RuleTable;
use crate::automaton::seeding::{DEFAULT_FILL_PROBABILITY, DEFAULT_SEED};
use crate::automaton::ParallelStepper;
use crate::error::Result;
use crate::state::MargolusGrid;

/// Grid size, initial fill, worker count and rule set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: i32,
    pub height: i32,
    /// Chance that a cell starts as 1. Zero leaves the grid empty.
    pub fill_probability: f64,
    pub seed: u64,
    /// Workers for [`ParallelStepper`]; 0 and 1 both mean one.
    pub threads: usize,
    /// Falls back to the sand rules when absent.
    pub rules: Option<RuleTable>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
            fill_probability: DEFAULT_FILL_PROBABILITY,
            seed: DEFAULT_SEED,
            threads: 1,
            rules: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the grid and seed it.
    pub fn build(&self) -> Result<MargolusGrid> {
        let rules = self.rules.clone().unwrap_or_else(RuleTable::sand);
        let mut grid = MargolusGrid::with_rules(self.width, self.height, rules)?;
        if self.fill_probability > 0.0 {
            grid.randomize(self.fill_probability, self.seed);
        }
        info!(
            width = self.width,
            height = self.height,
            threads = self.threads,
            "engine configured"
        );
        Ok(grid)
    }

    pub fn stepper(&self) -> Result<ParallelStepper> {
        ParallelStepper::new(self.threads)
    }
}
