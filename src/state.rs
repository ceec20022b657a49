//! Core state structure and helper methods.

use std::sync::Arc;

use crate::automaton::rules::RuleTable;

/// A cell value. Opaque to the engine; meaning comes from the rule set.
pub type Cell = u8;

/// Which of the two block partitions the next step uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Blocks anchored at even coordinates, starting at (0, 0).
    #[default]
    Even,
    /// Blocks anchored at (1, 1), wrapping across the far edges.
    Odd,
}

impl Phase {
    /// Diagonal offset of the block anchors.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Phase::Even => 0,
            Phase::Odd => 1,
        }
    }

    #[inline]
    pub fn flipped(self) -> Phase {
        match self {
            Phase::Even => Phase::Odd,
            Phase::Odd => Phase::Even,
        }
    }

    pub fn is_odd(self) -> bool {
        self == Phase::Odd
    }
}

impl From<bool> for Phase {
    fn from(odd: bool) -> Self {
        if odd {
            Phase::Odd
        } else {
            Phase::Even
        }
    }
}

/// A toroidal Margolus grid and the rule table that drives it.
#[derive(Clone, Debug)]
pub struct MargolusGrid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<Cell>, // row-major, current generation
    pub(crate) next: Vec<Cell>,  // scratch buffer swapped in by step()
    pub(crate) phase: Phase,
    pub(crate) generation: u64,
    pub(crate) rules: Arc<RuleTable>,
}

impl MargolusGrid {
    /// Linear index of an in-range coordinate.
    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Force the partition used by the next step.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Number of steps taken since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Current generation, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
