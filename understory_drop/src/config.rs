// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for a drag session.

use core::time::Duration;

use crate::types::Border;

/// Name of the notification emitted on a committed drop.
pub const DROPPED_EVENT: &str = "pmpd-dropped";

/// What a hit test that finds no eligible element does to the current candidate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MissPolicy {
    /// Keep the last candidate marked; only a positive hit changes it.
    #[default]
    KeepLast,
    /// Unmark and forget the candidate.
    ClearOnMiss,
}

/// Visual and timing parameters of a drag session.
///
/// ```
/// use core::time::Duration;
/// use understory_drop::config::{DragConfig, MissPolicy};
///
/// let config = DragConfig::default()
///     .with_debounce(Duration::from_millis(40))
///     .with_miss_policy(MissPolicy::ClearOnMiss);
/// assert_eq!(config.drag_z_index, 1000);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragConfig {
    /// Quiet period after the last pointer move before a hit test runs.
    pub debounce: Duration,
    /// Subject opacity while dragging.
    pub drag_opacity: f64,
    /// Subject stacking order while dragging.
    pub drag_z_index: i32,
    /// Border applied to the current drop candidate.
    pub hover_marker: Border,
    /// Behavior when a hit test finds nothing.
    pub miss_policy: MissPolicy,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(25),
            drag_opacity: 0.1,
            drag_z_index: 1000,
            hover_marker: Border::HOVER,
            miss_policy: MissPolicy::KeepLast,
        }
    }
}

impl DragConfig {
    /// Set the hit-test quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the subject opacity while dragging. Clamped to `0.0..=1.0`.
    pub fn with_drag_opacity(mut self, opacity: f64) -> Self {
        self.drag_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the subject stacking order while dragging.
    pub fn with_drag_z_index(mut self, z: i32) -> Self {
        self.drag_z_index = z;
        self
    }

    /// Set the candidate marker.
    pub fn with_hover_marker(mut self, marker: Border) -> Self {
        self.hover_marker = marker;
        self
    }

    /// Set the miss policy.
    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(DragConfig::default().with_drag_opacity(1.5).drag_opacity, 1.0);
        assert_eq!(DragConfig::default().with_drag_opacity(-0.2).drag_opacity, 0.0);
        assert_eq!(DragConfig::default().with_drag_opacity(0.4).drag_opacity, 0.4);
    }

    #[test]
    fn setters_leave_other_fields_alone() {
        let marker = Border {
            width: 2.0,
            color: [0, 0x80, 0xff, 0xff],
        };
        let config = DragConfig::default()
            .with_drag_z_index(42)
            .with_hover_marker(marker);
        assert_eq!(config.drag_z_index, 42);
        assert_eq!(config.hover_marker, marker);
        assert_eq!(config.debounce, Duration::from_millis(25));
        assert_eq!(config.drag_opacity, 0.1);
        assert_eq!(config.miss_policy, MissPolicy::KeepLast);
    }
}
