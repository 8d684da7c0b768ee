//! Zero-Cost Safety Macros
//!
//! Debug builds keep normal bounds-checked indexing (panics point at the bad
//! index); release builds use unchecked access. Only used on hot inner loops
//! where the index was produced by the same data structure that owns the
//! slice (the fluid neighbor grid).
//!
//! Usage:
//! ```rust
//! use physica_engine::fast;
//!
//! let cell_start = vec![0usize, 2, 2, 5];
//! let sorted = vec![4usize, 1, 0, 3, 2];
//!
//! // Read: fast!(slice, [index])
//! let start = *fast!(cell_start, [2]);
//! assert_eq!(start, 2);
//!
//! // Sub-slice: fast!(slice, [a..b])
//! let members = fast!(sorted, [start..cell_start[3]]);
//! assert_eq!(members, &[0, 3, 2]);
//!
//! // Write: fast!(slice, [index] = value)
//! let mut counts = vec![0u32; 4];
//! fast!(counts, [1] = 7);
//! assert_eq!(counts[1], 7);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: normal indexing with bounds checks
/// - Release: `get_unchecked` / `get_unchecked_mut`
///
/// The read arm takes anything `SliceIndex` accepts, so `fast!(s, [a..b])`
/// yields a sub-slice.
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index]) - also accepts a range, yielding a sub-slice
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
