//! Cell access, reseeding, and stepping.

use crate::state::{Cell, MargolusGrid, Phase};

/// Gets a cell. Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
///
/// # Returns
/// The cell state, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mg_get_cell(ptr: *const MargolusGrid, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).get(x, y)
}

/// Sets a cell. Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_set_cell(ptr: *mut MargolusGrid, x: i32, y: i32, state: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).set(x, y, state as Cell);
}

/// Advances a cell to `(value + 1) % states`.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_cycle_cell(ptr: *mut MargolusGrid, x: i32, y: i32, states: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).cycle_cell(x, y, states);
}

/// Sets every cell to 0.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_clear(ptr: *mut MargolusGrid) {
    if ptr.is_null() {
        return;
    }
    (*ptr).clear();
}

/// Reseeds the grid deterministically from `seed`.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_randomize(ptr: *mut MargolusGrid, fill_probability: f64, seed: u64) {
    if ptr.is_null() {
        return;
    }
    (*ptr).randomize(fill_probability, seed);
}

/// Advances the automaton by one generation.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
///
/// # Returns
/// Number of blocks a rule rewrote, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mg_step(ptr: *mut MargolusGrid) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).step().rewritten as u32
}

/// Gets the partition the next step will use: 0 even, 1 odd.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
///
/// # Returns
/// The phase, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mg_get_phase(ptr: *const MargolusGrid) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).phase().offset() as u8
}

/// Forces the partition for the next step. Any non-zero value means odd.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_set_phase(ptr: *mut MargolusGrid, odd: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).set_phase(Phase::from(odd != 0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_set_and_get_cell() {
        unsafe {
            let grid = lifecycle::mg_create(8, 8);

            mg_set_cell(grid, 0, 0, 2);
            assert_eq!(mg_get_cell(grid, 0, 0), 2);

            // wraps rather than ignoring out-of-range coordinates
            mg_set_cell(grid, -1, 8, 3);
            assert_eq!(mg_get_cell(grid, 7, 0), 3);

            lifecycle::mg_destroy(grid);
        }
    }

    #[test]
    fn test_step() {
        unsafe {
            let grid = lifecycle::mg_create(4, 4);
            mg_set_cell(grid, 0, 0, 1);
            mg_set_cell(grid, 1, 0, 1);

            assert_eq!(mg_get_phase(grid), 0);
            assert_eq!(mg_step(grid), 1);

            assert_eq!(lifecycle::mg_get_generation(grid), 1);
            assert_eq!(mg_get_phase(grid), 1);
            assert_eq!(mg_get_cell(grid, 0, 1), 1);
            assert_eq!(mg_get_cell(grid, 1, 1), 1);
            assert_eq!(mg_get_cell(grid, 0, 0), 0);

            lifecycle::mg_destroy(grid);
        }
    }

    #[test]
    fn test_phase_override() {
        unsafe {
            let grid = lifecycle::mg_create(4, 4);
            mg_set_phase(grid, 7);
            assert_eq!(mg_get_phase(grid), 1);
            mg_set_phase(grid, 0);
            assert_eq!(mg_get_phase(grid), 0);
            lifecycle::mg_destroy(grid);
        }
    }

    #[test]
    fn test_clear_randomize_cycle() {
        unsafe {
            let grid = lifecycle::mg_create(8, 8);

            mg_randomize(grid, 1.0, 1);
            assert_eq!(mg_get_cell(grid, 3, 3), 1);

            mg_cycle_cell(grid, 3, 3, 4);
            assert_eq!(mg_get_cell(grid, 3, 3), 2);

            mg_clear(grid);
            assert_eq!((*grid).count(0), 64);

            lifecycle::mg_destroy(grid);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            mg_set_cell(ptr::null_mut(), 0, 0, 1); // Should not crash
            assert_eq!(mg_get_cell(ptr::null(), 0, 0), 0);
            assert_eq!(mg_step(ptr::null_mut()), 0);
            mg_clear(ptr::null_mut());
            mg_randomize(ptr::null_mut(), 0.5, 1);
            mg_cycle_cell(ptr::null_mut(), 0, 0, 4);
            mg_set_phase(ptr::null_mut(), 1);
            assert_eq!(mg_get_phase(ptr::null()), 0);
        }
    }
}
