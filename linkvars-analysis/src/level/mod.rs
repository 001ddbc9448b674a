//! Link levels and delay causes.

pub mod delay;
pub mod link_level;

pub use delay::DelayCauses;
pub use link_level::LinkLevel;
