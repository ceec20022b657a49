//! Margolus Automata - block cellular automata on a torus
//!
//! A 2-D grid of small-integer cells is cut each generation into 2x2
//! blocks, and every block is rewritten by the first matching rule of an
//! ordered [`RuleTable`]. The partition shifts diagonally by one cell every
//! step, so information crosses block borders over time. The crate ships the
//! falling-sand rules and exposes a C ABI for hosts that draw the grid and
//! feed it input.
//!
//! ```
//! use margolus_automata::{MargolusGrid, sand};
//!
//! let mut grid = MargolusGrid::new(4, 4)?;
//! grid.set(0, 0, sand::SAND);
//! grid.set(1, 0, sand::SAND);
//! grid.step();
//! assert_eq!(grid.block_at(0, 0), [0, 0, sand::SAND, sand::SAND]);
//! # Ok::<(), margolus_automata::EngineError>(())
//! ```

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod state;


pub use automaton::{sand, ParallelStepper, Rewrite, Rule, RuleMatch, RuleTable, Slot, StepStats};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use state::{Cell, MargolusGrid, Phase};
