//! Multi-threaded stepping on a dedicated rayon pool.
//!
//! Blocks only read the immutable current generation, so every block row can
//! be rewritten independently. Rows are
//! computed on the pool, then written back in row order on the calling
//! thread. The result is bit-identical to [`MargolusGrid::step`].
//!
//! The stepper borrows the grid mutably for the whole call, so painting
//! cannot interleave with a step in progress.

use rayon::prelude::*;
use tracing::warn;

use super::stepping::{block_rows, commit_rows, rewrite_row, BlockWrite, StepStats};
use crate::error::{EngineError, Result};
use crate::state::MargolusGrid;

pub struct ParallelStepper {
    /// Rayon thread pool (1 thread minimum, configurable).
    pub thread_pool: rayon::ThreadPool,
}

impl ParallelStepper {
    /// Create a stepper with `num_threads` workers. 0 means 1.
    ///
    /// Falls back to a single worker if the requested pool cannot be built.
    pub fn new(num_threads: usize) -> Result<Self> {
        let num_threads = num_threads.max(1);
        let thread_pool = match build_pool(num_threads) {
            Ok(pool) => pool,
            Err(e) => {
                warn!(num_threads, error = %e, "thread pool build failed, using one thread");
                build_pool(1)?
            }
        };
        Ok(ParallelStepper { thread_pool })
    }

    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Advance `grid` by one generation.
    pub fn step(&self, grid: &mut MargolusGrid) -> StepStats {
        let phase = grid.phase;
        let row_starts: Vec<usize> = block_rows(grid.height, phase).collect();

        let rows: Vec<Vec<BlockWrite>> = {
            let cells = &grid.cells;
            let rules = &*grid.rules;
            let (width, height) = (grid.width, grid.height);
            self.thread_pool.install(|| {
                row_starts
                    .par_iter()
                    .map(|&y0| rewrite_row(cells, width, height, rules, y0, phase))
                    .collect()
            })
        };

        commit_rows(grid, rows)
    }

    /// Advance `grid` by `n` generations.
    pub fn step_n(&self, grid: &mut MargolusGrid, n: u64) -> Option<StepStats> {
        (0..n).map(|_| self.step(grid)).last()
    }
}

fn build_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| EngineError::ThreadPool(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::sand::{GROUND, SOURCE};

    fn busy_grid() -> MargolusGrid {
        let mut grid = MargolusGrid::new(64, 48).unwrap();
        grid.randomize(0.3, 42);
        for x in 0..64 {
            grid.set(x, 40, GROUND);
        }
        grid.set(10, 2, SOURCE);
        grid.set(50, 5, SOURCE);
        grid
    }

    #[test]
    fn test_create_stepper() {
        let stepper = ParallelStepper::new(0).unwrap();
        assert_eq!(stepper.num_threads(), 1);

        let stepper = ParallelStepper::new(3).unwrap();
        assert_eq!(stepper.num_threads(), 3);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut serial = busy_grid();
        let mut parallel = busy_grid();
        let stepper = ParallelStepper::new(4).unwrap();

        for _ in 0..50 {
            let a = serial.step();
            let b = stepper.step(&mut parallel);
            assert_eq!(a, b);
            assert_eq!(serial.cells(), parallel.cells());
        }
        assert_eq!(serial.phase(), parallel.phase());
        assert_eq!(serial.generation(), parallel.generation());
    }

    #[test]
    fn test_parallel_matches_serial_odd_dimensions() {
        let mut serial = MargolusGrid::new(9, 7).unwrap();
        serial.randomize(0.5, 5);
        let mut parallel = serial.clone();
        let stepper = ParallelStepper::new(2).unwrap();

        serial.step_n(11);
        stepper.step_n(&mut parallel, 11);
        assert_eq!(serial.cells(), parallel.cells());
    }
}
