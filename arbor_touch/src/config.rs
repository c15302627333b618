// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture thresholds.

/// Timing and distance thresholds for recognizing a touch drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchDragConfig {
    /// How long a finger must rest before a drag starts, in milliseconds.
    pub delay_ms: u64,
    /// Largest movement, in the same units as touch positions, that still
    /// counts as resting when the delay elapses.
    pub distance_threshold: f64,
    /// Moving farther than `distance_threshold * scroll_factor` while pending
    /// turns the gesture into a scroll.
    pub scroll_factor: f64,
}

impl Default for TouchDragConfig {
    fn default() -> Self {
        Self {
            delay_ms: 150,
            distance_threshold: 10.0,
            scroll_factor: 2.0,
        }
    }
}

impl TouchDragConfig {
    /// Sets the press delay.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the resting distance threshold.
    #[must_use]
    pub fn with_distance_threshold(mut self, distance: f64) -> Self {
        self.distance_threshold = distance;
        self
    }

    /// Sets the scroll factor.
    #[must_use]
    pub fn with_scroll_factor(mut self, factor: f64) -> Self {
        self.scroll_factor = factor;
        self
    }

    pub(crate) fn rest_radius_sq(&self) -> f64 {
        self.distance_threshold * self.distance_threshold
    }

    pub(crate) fn scroll_radius_sq(&self) -> f64 {
        let r = self.distance_threshold * self.scroll_factor;
        r * r
    }
}
