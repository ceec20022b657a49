//! The falling-sand rule set.
//!
//! Four states: empty space, loose sand, immovable ground and a source that
//! keeps emitting sand into the cell below it. All rules are mirror-symmetric
//! so sand slides both left and right.

use super::rules::{Rule, RuleTable, Slot};
use crate::state::Cell;

pub const EMPTY: Cell = 0;
pub const SAND: Cell = 1;
pub const GROUND: Cell = 2;
pub const SOURCE: Cell = 3;

/// Number of states the sand rules use.
pub const STATES: Cell = 4;

const ANY: Slot = Slot::Any;
const E: Slot = Slot::Is(EMPTY);
const S: Slot = Slot::Is(SAND);
const SRC: Slot = Slot::Is(SOURCE);

pub const SAND_RULES: [Rule; 4] = [
    // a pair of grains drops as a unit
    Rule::new([S, S, E, E], [E, E, S, S], true),
    // a grain over empty space falls straight down
    Rule::new([S, ANY, E, ANY], [E, ANY, S, ANY], true),
    // a blocked grain slides diagonally into the empty corner
    Rule::new([S, E, ANY, E], [E, E, ANY, S], true),
    // a source fills the empty cell beneath it
    Rule::new([SRC, ANY, E, ANY], [SRC, ANY, S, ANY], true),
];

impl RuleTable {
    pub fn sand() -> Self {
        SAND_RULES.into_iter().collect()
    }
}
