//! Edge weights of the two Dijkstra passes.
//!
//! Each weight dominates any realistic sum of weaker ones, so the length
//! of a shortest path tells its weakest level. The low pass makes delays
//! cheap: a node reachable through a delay-only path is reported delayed.
//! The high pass makes delays expensive, so resolved paths win.

use linkvars_core::constants::{
    HIGH_ASSIGNED, HIGH_COMMON_HC, HIGH_DELAYED, HIGH_DEPENDENT, HIGH_STATICALLY_ASSIGNED,
    LOW_ASSIGNED, LOW_COMMON_HC, LOW_DELAYED, LOW_DEPENDENT, LOW_STATICALLY_ASSIGNED,
};

use crate::level::LinkLevel;

/// Independent edges never enter a graph; they weigh "unreachable".
pub fn low_weight(level: &LinkLevel) -> u64 {
    match level {
        LinkLevel::StaticallyAssigned => LOW_STATICALLY_ASSIGNED,
        LinkLevel::Delayed(_) => LOW_DELAYED,
        LinkLevel::Assigned => LOW_ASSIGNED,
        LinkLevel::Dependent(_) => LOW_DEPENDENT,
        LinkLevel::CommonHc(_) => LOW_COMMON_HC,
        LinkLevel::Independent => u64::MAX,
    }
}

pub fn high_weight(level: &LinkLevel) -> u64 {
    match level {
        LinkLevel::StaticallyAssigned => HIGH_STATICALLY_ASSIGNED,
        LinkLevel::Assigned => HIGH_ASSIGNED,
        LinkLevel::Dependent(_) => HIGH_DEPENDENT,
        LinkLevel::CommonHc(_) => HIGH_COMMON_HC,
        LinkLevel::Delayed(_) => HIGH_DELAYED,
        LinkLevel::Independent => u64::MAX,
    }
}

/// Low-pass distance of a path whose weakest link is a delay.
pub fn is_delay_distance(distance: u64) -> bool {
    (LOW_DELAYED..LOW_ASSIGNED).contains(&distance)
}
