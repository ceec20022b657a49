//! C FFI layer for host applications.
//!
//! This module exports C ABI functions for renderers and input layers
//! written in other languages (C, LuaJIT FFI, ...). All functions are marked
//! with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin
//! wrappers that handle null checks, pointer safety, and C-to-Rust
//! conversions. The host must not call into one grid from two threads at once.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{
    mg_clear, mg_cycle_cell, mg_get_cell, mg_get_phase, mg_randomize, mg_set_cell, mg_set_phase,
    mg_step,
};
pub use lifecycle::{mg_create, mg_destroy, mg_get_generation, mg_height, mg_width};
pub use region::{mg_extract_region, mg_import_region};
