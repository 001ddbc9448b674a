//! Error handling for the linked-variables engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod link_error;

pub use config_error::ConfigError;
pub use error_code::LinkvarsErrorCode;
pub use graph_error::GraphError;
pub use link_error::LinkError;
