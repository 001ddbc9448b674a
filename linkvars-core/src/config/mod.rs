//! Configuration system for the linked-variables engine.
//! TOML-based, 3-layer resolution: overrides > env > project > defaults.

pub mod cache_config;
pub mod engine_config;
pub mod linkvars_config;

pub use cache_config::CacheConfig;
pub use engine_config::EngineConfig;
pub use linkvars_config::{ConfigOverrides, LinkvarsConfig};
