//! linkvars-core: shared foundation of the linked-variables engine.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable code
//! - Config: TOML + environment resolution with validation
//! - Tracing: `EnvFilter`-driven subscriber setup and span field names
//! - Types: Fx collections and small-vector aliases
//! - Constants: engine defaults and distance weights

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;
