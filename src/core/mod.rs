//! Core - math helpers plus the crate-wide macros (safety, logging)
//!
//! Declared first in `lib.rs` with `#[macro_use]` so every later module can
//! use `fast!`, `engine_log!` and `engine_warn!` without imports.

#[macro_use]
pub mod utils;
pub mod math;

pub use utils::console_enabled;
