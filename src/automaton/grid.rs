//! Grid construction and toroidal cell access.
//!
//! Every coordinate is valid: `x` and `y` are normalized into `[0, W)` and
//! `[0, H)` with Euclidean remainder, so `-1` is the last column or row.
//! There are no bounds errors to report on a torus.

use std::sync::Arc;

use tracing::{info, warn};

use super::rules::RuleTable;
use crate::error::{EngineError, Result};
use crate::state::{Cell, MargolusGrid, Phase};

/// Map any integer coordinate onto `[0, extent)`.
#[inline]
pub fn wrap(coord: i32, extent: usize) -> usize {
    (coord as i64).rem_euclid(extent as i64) as usize
}

impl MargolusGrid {
    /// Create an empty grid driven by the falling-sand rules.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::with_rules(width, height, RuleTable::sand())
    }

    /// Create an empty grid driven by `rules`.
    ///
    /// Odd dimensions are accepted, but the block that straddles the seam
    /// then overlaps its neighbour; keeping both sides even is up to the caller.
    pub fn with_rules(width: i32, height: i32, rules: impl Into<Arc<RuleTable>>) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        if width % 2 != 0 || height % 2 != 0 {
            warn!(width, height, "odd grid dimensions, seam blocks will overlap");
        }

        let rules = rules.into();
        let size = width as usize * height as usize;
        info!(width, height, rules = rules.len(), "created margolus grid");

        Ok(MargolusGrid {
            width: width as usize,
            height: height as usize,
            cells: vec![0; size],
            next: vec![0; size],
            phase: Phase::Even,
            generation: 0,
            rules,
        })
    }

    /// Linear index of any coordinate, after wrapping.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> usize {
        self.index(wrap(x, self.width), wrap(y, self.height))
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells[self.index_of(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: Cell) {
        let idx = self.index_of(x, y);
        self.cells[idx] = value;
    }

    /// Advance a cell to the next of `states` values, wrapping to 0.
    /// A zero `states` leaves the cell alone.
    pub fn cycle_cell(&mut self, x: i32, y: i32, states: Cell) {
        if states == 0 {
            return;
        }
        let idx = self.index_of(x, y);
        let v = self.cells[idx] as u16;
        self.cells[idx] = ((v + 1) % states as u16) as Cell;
    }

    /// Set every cell to 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        info!(generation = self.generation, "cleared grid");
    }

    /// Every cell as `(x, y, state)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % width, i / width, c))
    }

    /// Count of cells currently holding `value`.
    pub fn count(&self, value: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}
