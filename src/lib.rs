//! ULVA cladding take-off: reads piping isometric PDFs, counts straights and
//! fittings, and prices the insulation cladding into an Excel workbook.

/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("estimate", "Reading {}", name);
/// log_status!("workbook", "Saved {}", path);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `ulva_mto::estimate` instead of `ulva_mto::core::estimate`
pub use self::core::*;
pub use self::utils::*;
