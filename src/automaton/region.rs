//! Region extraction and import operations.
//!
//! A region is `width x height` cells whose top-left corner is `(x, y)`.
//! Coordinates wrap like every other grid access, so a region may straddle
//! an edge. Buffers are row-major: x changes fastest.

use crate::error::{EngineError, Result};
use crate::state::{Cell, MargolusGrid};

fn region_len(width: usize, height: usize, buf_len: usize) -> Result<usize> {
    // a saturated product is larger than any buffer
    let needed = width.saturating_mul(height);
    if buf_len < needed {
        return Err(EngineError::RegionBufferTooSmall {
            needed,
            got: buf_len,
        });
    }
    Ok(needed)
}

impl MargolusGrid {
    /// Linear indices of a region in buffer order.
    ///
    /// The origin is wrapped once; offsets then stay in `usize`, so regions
    /// wider or taller than the grid just revisit cells.
    fn region_indices(
        &self,
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        let ox = super::grid::wrap(x, self.width);
        let oy = super::grid::wrap(y, self.height);
        (0..height).flat_map(move |dy| {
            let row = (oy + dy % self.height) % self.height;
            (0..width).map(move |dx| self.index((ox + dx % self.width) % self.width, row))
        })
    }

    /// Copy a region into `out_buf`. Returns the number of cells written.
    pub fn extract_region(
        &self,
        out_buf: &mut [Cell],
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    ) -> Result<usize> {
        let needed = region_len(width, height, out_buf.len())?;

        for (slot, idx) in out_buf.iter_mut().zip(self.region_indices(x, y, width, height)) {
            *slot = self.cells[idx];
        }

        Ok(needed)
    }

    /// Write a region from `in_buf`. Values are stored as given.
    /// Returns the number of cells read.
    pub fn import_region(
        &mut self,
        in_buf: &[Cell],
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    ) -> Result<usize> {
        let needed = region_len(width, height, in_buf.len())?;

        let indices: Vec<usize> = self.region_indices(x, y, width, height).collect();
        for (idx, &value) in indices.into_iter().zip(in_buf) {
            self.cells[idx] = value;
        }

        Ok(needed)
    }

    /// The whole current generation as an owned row-major buffer.
    pub fn snapshot(&self) -> Vec<Cell> {
        self.cells.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_region_basic() {
        let mut grid = MargolusGrid::new(8, 8).unwrap();
        grid.set(2, 2, 1);
        grid.set(3, 2, 2);
        grid.set(2, 3, 3);

        let mut buffer = vec![0u8; 16];
        let written = grid.extract_region(&mut buffer, 2, 2, 4, 4).unwrap();

        assert_eq!(written, 16);
        assert_eq!(buffer[0], 1); // (2,2)
        assert_eq!(buffer[1], 2); // (3,2)
        assert_eq!(buffer[4], 3); // (2,3)
        assert_eq!(buffer.iter().filter(|&&c| c != 0).count(), 3);
    }

    #[test]
    fn test_extract_region_wraps_edges() {
        let mut grid = MargolusGrid::new(4, 4).unwrap();
        grid.set(3, 3, 1);
        grid.set(0, 0, 2);

        let mut buffer = vec![0u8; 4];
        grid.extract_region(&mut buffer, -1, -1, 2, 2).unwrap();

        assert_eq!(buffer, vec![1, 0, 0, 2]);
    }

    #[test]
    fn test_extract_full_grid_matches_snapshot() {
        let mut grid = MargolusGrid::new(6, 4).unwrap();
        grid.randomize(0.4, 9);

        let mut buffer = vec![0u8; 24];
        grid.extract_region(&mut buffer, 0, 0, 6, 4).unwrap();
        assert_eq!(buffer, grid.snapshot());
    }

    #[test]
    fn test_buffer_too_small() {
        let grid = MargolusGrid::new(4, 4).unwrap();
        let mut buffer = vec![0u8; 3];
        let err = grid.extract_region(&mut buffer, 0, 0, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            EngineError::RegionBufferTooSmall { needed: 4, got: 3 }
        ));
    }

    #[test]
    fn test_oversized_region_is_rejected() {
        let mut grid = MargolusGrid::new(4, 4).unwrap();
        let mut buffer = vec![0u8; 16];

        let err = grid
            .extract_region(&mut buffer, 0, 0, usize::MAX, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::RegionBufferTooSmall {
                needed: usize::MAX,
                got: 16
            }
        ));
        assert!(grid.import_region(&buffer, 0, 0, 3, usize::MAX).is_err());
    }

    #[test]
    fn test_region_wider_than_grid_wraps() {
        let mut grid = MargolusGrid::new(4, 2).unwrap();
        grid.set(0, 0, 1);
        grid.set(3, 1, 2);

        let mut buffer = vec![0u8; 27];
        grid.extract_region(&mut buffer, i32::MIN, i32::MAX, 9, 3).unwrap();

        // i32::MIN wraps to column 0, i32::MAX to row 1
        let mut expected = vec![0u8; 27];
        for dy in 0..3 {
            for dx in 0..9 {
                expected[dy * 9 + dx] = grid.get(dx as i32, 1 + dy as i32);
            }
        }
        assert_eq!(buffer, expected);
        assert_eq!(buffer[3], 2);
        assert_eq!(buffer[9], 1);
        assert_eq!(buffer[13], 1);
    }

    #[test]
    fn test_empty_region() {
        let mut grid = MargolusGrid::new(4, 4).unwrap();
        let mut buffer = Vec::new();
        assert_eq!(grid.extract_region(&mut buffer, 1, 1, 0, 3).unwrap(), 0);
        assert_eq!(grid.import_region(&buffer, 1, 1, 3, 0).unwrap(), 0);
    }

    #[test]
    fn test_import_region_keeps_values() {
        let mut grid = MargolusGrid::new(8, 8).unwrap();
        let buffer = vec![0, 1, 2, 3, 9, 0];

        let read = grid.import_region(&buffer, 6, 7, 3, 2).unwrap();

        assert_eq!(read, 6);
        assert_eq!(grid.get(7, 7), 1);
        assert_eq!(grid.get(0, 7), 2); // wrapped past the right edge
        assert_eq!(grid.get(6, 0), 3); // wrapped past the bottom edge
        assert_eq!(grid.get(7, 0), 9);
    }

    #[test]
    fn test_extract_import_symmetry() {
        let mut source = MargolusGrid::new(8, 8).unwrap();
        source.randomize(0.5, 3);

        let mut buffer = vec![0u8; 20];
        source.extract_region(&mut buffer, 5, 6, 5, 4).unwrap();

        let mut target = MargolusGrid::new(8, 8).unwrap();
        target.import_region(&buffer, 5, 6, 5, 4).unwrap();

        for dy in 0..4 {
            for dx in 0..5 {
                assert_eq!(source.get(5 + dx, 6 + dy), target.get(5 + dx, 6 + dy));
            }
        }
    }
}
