// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input and the synthetic pointer output it is translated into.

use kurbo::Point;
use smallvec::SmallVec;

/// One finger on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Platform touch identifier, stable for the lifetime of the finger.
    pub id: u64,
    /// Position in the host's coordinate space.
    pub pos: Point,
}

impl TouchPoint {
    /// Creates a touch point.
    #[must_use]
    pub const fn new(id: u64, pos: Point) -> Self {
        Self { id, pos }
    }
}

/// Finds the element under a position.
///
/// Implemented for any `FnMut(Point) -> Option<T>`.
pub trait HitTest<T> {
    /// Returns the element under `pos`, if any.
    fn hit_test(&mut self, pos: Point) -> Option<T>;
}

impl<T, F: FnMut(Point) -> Option<T>> HitTest<T> for F {
    fn hit_test(&mut self, pos: Point) -> Option<T> {
        self(pos)
    }
}

/// An event for the host to act on.
#[derive(Clone, Debug, PartialEq)]
pub enum TouchDragEvent<T> {
    /// The drag began on `source`; the host's drag-start callback.
    DragStart {
        /// The element the adapter is attached to.
        source: T,
    },
    /// Synthetic pointer-down on the source element.
    PointerDown {
        /// The element the adapter is attached to.
        target: T,
        /// Where the finger rests.
        pos: Point,
    },
    /// Synthetic pointer-move, addressed to whatever is under the finger.
    PointerMove {
        /// Hit-test result at `pos`.
        target: Option<T>,
        /// Current finger position.
        pos: Point,
    },
    /// Synthetic pointer-up at the last known finger position.
    PointerUp {
        /// Hit-test result at `pos`.
        target: Option<T>,
        /// Last finger position.
        pos: Point,
    },
    /// The drag finished; the host's drag-end callback.
    DragEnd {
        /// The element the adapter is attached to.
        source: T,
    },
}

/// What a single input produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchResponse<T> {
    /// Events to dispatch, in order.
    pub events: SmallVec<[TouchDragEvent<T>; 2]>,
    /// The host should suppress the platform's default touch handling
    /// (scrolling) for this input.
    pub prevent_default: bool,
}

impl<T> Default for TouchResponse<T> {
    fn default() -> Self {
        Self {
            events: SmallVec::new(),
            prevent_default: false,
        }
    }
}

impl<T> TouchResponse<T> {
    /// Returns `true` if the input produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.prevent_default
    }

    pub(crate) fn push(&mut self, event: TouchDragEvent<T>) {
        self.events.push(event);
    }
}
