/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("trim", "Falling back to literal trim for {}", charset);
/// log_status!("config", "Ignoring {}", path.display());
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
pub mod output;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `sundry::trim` instead of `sundry::core::trim`
pub use self::core::*;
pub use self::utils::*;
