//! Status macros used across the workspace.
//!
//! They forward to `tracing` under dedicated targets so the terminal formatter
//! can pick a symbol per kind of message. Library code that only needs plain
//! diagnostics should use `tracing::debug!` directly.

pub const TARGET_INFO: &str = "penscan::info";
pub const TARGET_SUCCESS: &str = "penscan::success";
pub const TARGET_WARN: &str = "penscan::warn";
pub const TARGET_ERROR: &str = "penscan::error";
pub const TARGET_PRINT: &str = "penscan::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::TARGET_INFO, $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::TARGET_SUCCESS, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: $crate::log::TARGET_WARN, $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: $crate::log::TARGET_ERROR, $($arg)*)
    };
}
