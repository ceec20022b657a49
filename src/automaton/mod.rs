//! Core automaton logic and grid operations.
//!
//! This module contains the rule matching, grid access, stepping and
//! reseeding logic. The FFI layer in `ffi/` calls into these.

pub mod grid;
pub mod parallel;
pub mod region;
pub mod rules;
pub mod sand;
pub mod seeding;
pub mod stepping;

pub use grid::wrap;
pub use parallel::ParallelStepper;
pub use rules::{instantiate, matches, mirror, Block, Rewrite, Rule, RuleMatch, RuleTable, Slot};
pub use seeding::{seed_cells, DEFAULT_FILL_PROBABILITY, DEFAULT_SEED};
pub use stepping::{step_grid, StepStats};
