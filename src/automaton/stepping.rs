//! Margolus stepping.
//!
//! Each generation the grid is cut into 2x2 blocks anchored at
//! `(bx + o, by + o)` for even `bx`, `by`, where `o` is the phase offset.
//! Blocks are read from the current generation, rewritten through the rule
//! table and written into the scratch buffer, which is then swapped in.
//! Reads never see a partially written generation.

use tracing::debug;

use super::rules::{Block, RuleTable};
use crate::state::{Cell, MargolusGrid, Phase};

/// Summary of one generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepStats {
    /// Generation reached by the step.
    pub generation: u64,
    /// Partition the step used.
    pub phase: Phase,
    /// Blocks visited.
    pub blocks: usize,
    /// Blocks some rule matched and that were written back.
    pub rewritten: usize,
}

/// A block's output, ready to be written into the next generation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BlockWrite {
    pub indices: [usize; 4],
    pub values: Block,
    pub matched: bool,
}

/// Linear indices of the block anchored at `(x0, y0)`, wrapping the +1 edges.
#[inline]
pub(crate) fn block_indices(width: usize, height: usize, x0: usize, y0: usize) -> [usize; 4] {
    let x1 = (x0 + 1) % width;
    let y1 = (y0 + 1) % height;
    [
        y0 * width + x0,
        y0 * width + x1,
        y1 * width + x0,
        y1 * width + x1,
    ]
}

/// Top-left row of every block row under `phase`, in processing order.
pub(crate) fn block_rows(height: usize, phase: Phase) -> impl Iterator<Item = usize> {
    let offset = phase.offset();
    (0..height).step_by(2).map(move |by| (by + offset) % height)
}

/// Rewrite every block whose top row is `y0`.
pub(crate) fn rewrite_row(
    cells: &[Cell],
    width: usize,
    height: usize,
    rules: &RuleTable,
    y0: usize,
    phase: Phase,
) -> Vec<BlockWrite> {
    let offset = phase.offset();
    (0..width)
        .step_by(2)
        .map(|bx| {
            let x0 = (bx + offset) % width;
            let indices = block_indices(width, height, x0, y0);
            let rewrite = rules.apply(indices.map(|i| cells[i]));
            BlockWrite {
                indices,
                values: rewrite.block,
                matched: rewrite.matched.is_some(),
            }
        })
        .collect()
}

/// Write rewritten rows into the scratch buffer, swap it in and advance.
///
/// Only blocks some rule matched are written; the rest keep the copy of the
/// current generation. On odd-sized grids the seam blocks overlap, so a
/// matched block that shares a cell with one already written this step is
/// dropped. Rows are applied in order, so the outcome does not depend on how
/// the rows were computed.
pub(crate) fn commit_rows<I>(grid: &mut MargolusGrid, rows: I) -> StepStats
where
    I: IntoIterator<Item = Vec<BlockWrite>>,
{
    let phase = grid.phase;
    grid.next.copy_from_slice(&grid.cells);

    let overlapping = grid.width % 2 == 1 || grid.height % 2 == 1;
    let mut claimed = if overlapping {
        vec![false; grid.cells.len()]
    } else {
        Vec::new()
    };

    let mut blocks = 0;
    let mut rewritten = 0;
    for row in rows {
        for write in row {
            blocks += 1;
            if !write.matched {
                continue;
            }
            if overlapping {
                if write.indices.iter().any(|&idx| claimed[idx]) {
                    continue;
                }
                for &idx in &write.indices {
                    claimed[idx] = true;
                }
            }
            for (&idx, value) in write.indices.iter().zip(write.values) {
                grid.next[idx] = value;
            }
            rewritten += 1;
        }
    }

    std::mem::swap(&mut grid.cells, &mut grid.next);
    grid.phase = phase.flipped();
    grid.generation += 1;

    debug!(
        generation = grid.generation,
        phase = ?phase,
        blocks,
        rewritten,
        "margolus step"
    );

    StepStats {
        generation: grid.generation,
        phase,
        blocks,
        rewritten,
    }
}

/// Advance `grid` by one generation on the calling thread.
pub fn step_grid(grid: &mut MargolusGrid) -> StepStats {
    let phase = grid.phase;
    let rows: Vec<Vec<BlockWrite>> = block_rows(grid.height, phase)
        .map(|y0| rewrite_row(&grid.cells, grid.width, grid.height, &grid.rules, y0, phase))
        .collect();
    commit_rows(grid, rows)
}

impl MargolusGrid {
    /// Advance one generation and flip the phase.
    pub fn step(&mut self) -> StepStats {
        step_grid(self)
    }

    /// Advance `n` generations. Returns the stats of the last step, if any.
    pub fn step_n(&mut self, n: u64) -> Option<StepStats> {
        (0..n).map(|_| self.step()).last()
    }

    /// The four cells of the block anchored at `(x, y)`, wrapping as needed.
    pub fn block_at(&self, x: i32, y: i32) -> Block {
        let x0 = super::grid::wrap(x, self.width);
        let y0 = super::grid::wrap(y, self.height);
        block_indices(self.width, self.height, x0, y0).map(|i| self.cells[i])
    }
}
