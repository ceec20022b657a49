//! Region extraction and import FFI functions.

use crate::state::MargolusGrid;

/// Copies a `width x height` region starting at `(x, y)` into `out_buf`.
///
/// # Layout
/// Row-major, x changes fastest. Coordinates wrap around the torus.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
/// - `out_buf` must point to at least `width * height` writable bytes
///
/// # Returns
/// Number of bytes written, or 0 on error (including a `width * height`
/// that overflows `usize`).
#[no_mangle]
pub unsafe extern "C" fn mg_extract_region(
    ptr: *const MargolusGrid,
    out_buf: *mut u8,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let (width, height) = (width as usize, height as usize);
    let Some(len) = width.checked_mul(height) else {
        return 0;
    };
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    (*ptr)
        .extract_region(buf_slice, x, y, width, height)
        .map_or(0, |n| n as u64)
}

/// Writes a `width x height` region starting at `(x, y)` from `in_buf`.
///
/// # Layout
/// Row-major, matching `mg_extract_region`. Values are stored unchanged.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
/// - `in_buf` must point to at least `width * height` readable bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn mg_import_region(
    ptr: *mut MargolusGrid,
    in_buf: *const u8,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let (width, height) = (width as usize, height as usize);
    let Some(len) = width.checked_mul(height) else {
        return 0;
    };
    let buf_slice = std::slice::from_raw_parts(in_buf, len);
    (*ptr)
        .import_region(buf_slice, x, y, width, height)
        .map_or(0, |n| n as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{grid, lifecycle};
    use std::ptr;

    #[test]
    fn test_extract_region() {
        unsafe {
            let state = lifecycle::mg_create(8, 8);
            grid::mg_set_cell(state, 2, 2, 1);
            grid::mg_set_cell(state, 3, 2, 3);

            let mut buffer = vec![0u8; 16];
            let written = mg_extract_region(state, buffer.as_mut_ptr(), 2, 2, 4, 4);

            assert_eq!(written, 16);
            assert_eq!(buffer[0], 1);
            assert_eq!(buffer[1], 3);

            lifecycle::mg_destroy(state);
        }
    }

    #[test]
    fn test_import_region() {
        unsafe {
            let state = lifecycle::mg_create(4, 4);
            let buffer = [2u8, 0, 0, 3];

            let read = mg_import_region(state, buffer.as_ptr(), 3, 3, 2, 2);

            assert_eq!(read, 4);
            assert_eq!(grid::mg_get_cell(state, 3, 3), 2);
            assert_eq!(grid::mg_get_cell(state, 0, 0), 3);

            lifecycle::mg_destroy(state);
        }
    }

    #[test]
    fn test_extract_region_wider_than_grid() {
        unsafe {
            let state = lifecycle::mg_create(4, 4);
            grid::mg_set_cell(state, 1, 0, 2);

            let mut buffer = vec![0u8; 6];
            let written = mg_extract_region(state, buffer.as_mut_ptr(), i32::MIN + 1, 0, 6, 1);

            assert_eq!(written, 6);
            assert_eq!(buffer, vec![2, 0, 0, 0, 2, 0]);

            lifecycle::mg_destroy(state);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut buffer = [0u8; 4];
            assert_eq!(
                mg_extract_region(ptr::null(), buffer.as_mut_ptr(), 0, 0, 2, 2),
                0
            );
            assert_eq!(mg_import_region(ptr::null_mut(), buffer.as_ptr(), 0, 0, 2, 2), 0);

            let state = lifecycle::mg_create(4, 4);
            assert_eq!(mg_extract_region(state, ptr::null_mut(), 0, 0, 2, 2), 0);
            assert_eq!(mg_import_region(state, ptr::null(), 0, 0, 2, 2), 0);
            lifecycle::mg_destroy(state);
        }
    }
}
