//! Grid creation, destruction, and generation queries.

use crate::state::MargolusGrid;

/// Creates a sand grid and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new grid, or null if either dimension is not positive.
///
/// # Safety
/// The returned pointer must eventually be freed with `mg_destroy()`.
#[no_mangle]
pub extern "C" fn mg_create(width: i32, height: i32) -> *mut MargolusGrid {
    match MargolusGrid::new(width, height) {
        Ok(grid) => Box::into_raw(Box::new(grid)),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Destroys a grid and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `mg_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn mg_destroy(ptr: *mut MargolusGrid) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the generation counter.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn mg_get_generation(ptr: *const MargolusGrid) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation()
}

/// Grid width in cells, or 0 for null.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_width(ptr: *const MargolusGrid) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).width() as u32
}

/// Grid height in cells, or 0 for null.
///
/// # Safety
/// - `ptr` must be a valid grid pointer, or null
#[no_mangle]
pub unsafe extern "C" fn mg_height(ptr: *const MargolusGrid) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).height() as u32
}
