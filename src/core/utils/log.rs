//! Console logging
//!
//! On wasm32 messages go to the browser console through `web_sys::console`.
//! Native builds (tests, tools) have no console to talk to: the macros still
//! type-check their format arguments but emit nothing.

/// Whether engine messages reach a console on this target.
pub fn console_enabled() -> bool {
    cfg!(target_arch = "wasm32")
}

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub fn write_log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub fn write_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

/// Log an informational engine message (`format!` syntax).
#[macro_export]
macro_rules! engine_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            $crate::core::utils::log::write_log(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a warning (`format!` syntax).
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            $crate::core::utils::log::write_warn(&format!($($arg)*));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
