//! LinkvarsErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code next to its human-readable message.
pub trait LinkvarsErrorCode {
    /// Returns the error code string (e.g., "GRAPH_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const LINK_ERROR: &str = "LINK_ERROR";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
