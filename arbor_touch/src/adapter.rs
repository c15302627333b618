// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The press-and-hold drag recognizer.
//!
//! ## Usage
//!
//! 1) Forward the platform's touch start/move/end/cancel events with a
//!    millisecond timestamp.
//! 2) While [`TouchDragAdapter::deadline`] is `Some`, arrange for
//!    [`TouchDragAdapter::on_timer`] to be called at that time.
//! 3) Dispatch the returned events to the pointer-driven drag-and-drop code,
//!    and suppress default touch handling when asked to.

use kurbo::Point;

use crate::config::TouchDragConfig;
use crate::event::{HitTest, TouchDragEvent, TouchPoint, TouchResponse};

/// Where the adapter is in a gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TouchPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A finger is down and the press delay has not elapsed.
    Pending,
    /// Touch input is being translated into pointer events.
    Dragging,
    /// A drag is ending with a synthetic pointer-up.
    ///
    /// The adapter passes through this phase while it emits the drop and is
    /// back in [`Idle`](Self::Idle) by the time the handler returns.
    Dropped,
    /// The gesture turned out not to be a drag; waiting for the finger to lift.
    Cancelled,
}

/// Turns a single-finger press-and-hold into pointer drag events for one element.
#[derive(Clone, Debug)]
pub struct TouchDragAdapter<T> {
    source: T,
    config: TouchDragConfig,
    phase: TouchPhase,
    touch: Option<u64>,
    start: Point,
    last: Point,
    pressed_at: u64,
}

impl<T: Clone> TouchDragAdapter<T> {
    /// Attaches to `source`, the element that may be dragged.
    pub fn new(source: T, config: TouchDragConfig) -> Self {
        Self {
            source,
            config,
            phase: TouchPhase::Idle,
            touch: None,
            start: Point::ZERO,
            last: Point::ZERO,
            pressed_at: 0,
        }
    }

    /// The element this adapter is attached to.
    #[must_use]
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    /// Returns `true` while touch input is being translated.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == TouchPhase::Dragging
    }

    /// When [`on_timer`](Self::on_timer) is due, while a press is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        (self.phase == TouchPhase::Pending)
            .then(|| self.pressed_at.saturating_add(self.config.delay_ms))
    }

    fn enter(&mut self, phase: TouchPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "touch drag phase");
        self.phase = phase;
    }

    /// Handles a touch start. `touches` is every finger currently on the surface.
    pub fn on_touch_start(&mut self, touches: &[TouchPoint], now: u64) -> TouchResponse<T> {
        match self.phase {
            TouchPhase::Pending if touches.len() > 1 => {
                // A second finger means pinch or scroll, not a drag.
                self.enter(TouchPhase::Cancelled);
            }
            TouchPhase::Pending | TouchPhase::Dragging => {}
            TouchPhase::Cancelled if self.touch.is_some() => {}
            TouchPhase::Idle | TouchPhase::Dropped | TouchPhase::Cancelled => {
                if let [touch] = touches {
                    self.touch = Some(touch.id);
                    self.start = touch.pos;
                    self.last = touch.pos;
                    self.pressed_at = now;
                    self.enter(TouchPhase::Pending);
                }
            }
        }
        TouchResponse::default()
    }

    /// Handles the press delay elapsing.
    ///
    /// Calling this early, or outside the pending phase, does nothing.
    pub fn on_timer(&mut self, now: u64) -> TouchResponse<T> {
        let mut response = TouchResponse::default();
        if self.deadline().is_none_or(|due| now < due) {
            return response;
        }
        if (self.last - self.start).hypot2() < self.config.rest_radius_sq() {
            self.enter(TouchPhase::Dragging);
            response.push(TouchDragEvent::DragStart {
                source: self.source.clone(),
            });
            response.push(TouchDragEvent::PointerDown {
                target: self.source.clone(),
                pos: self.last,
            });
            response.prevent_default = true;
        } else {
            self.enter(TouchPhase::Cancelled);
        }
        response
    }

    /// Handles a touch move. `touches` are the fingers that moved.
    ///
    /// A move that arrives after the deadline first settles the press, as if
    /// the timer had fired.
    pub fn on_touch_move(
        &mut self,
        touches: &[TouchPoint],
        hit: &mut impl HitTest<T>,
        now: u64,
    ) -> TouchResponse<T> {
        let Some(touch) = self.tracked(touches) else {
            return TouchResponse::default();
        };
        let mut response = self.on_timer(now);
        match self.phase {
            TouchPhase::Pending => {
                self.last = touch.pos;
                if (self.last - self.start).hypot2() > self.config.scroll_radius_sq() {
                    self.enter(TouchPhase::Cancelled);
                }
            }
            TouchPhase::Dragging => {
                self.last = touch.pos;
                response.push(TouchDragEvent::PointerMove {
                    target: hit.hit_test(touch.pos),
                    pos: touch.pos,
                });
                response.prevent_default = true;
            }
            TouchPhase::Idle | TouchPhase::Dropped | TouchPhase::Cancelled => {}
        }
        response
    }

    /// Handles a touch end. `touches` are the fingers that lifted.
    pub fn on_touch_end(
        &mut self,
        touches: &[TouchPoint],
        hit: &mut impl HitTest<T>,
    ) -> TouchResponse<T> {
        if self.tracked(touches).is_none() {
            return TouchResponse::default();
        }
        self.touch = None;
        match self.phase {
            TouchPhase::Dragging => self.finish(hit),
            TouchPhase::Pending | TouchPhase::Cancelled => {
                self.enter(TouchPhase::Idle);
                TouchResponse::default()
            }
            TouchPhase::Idle | TouchPhase::Dropped => TouchResponse::default(),
        }
    }

    /// Handles a touch cancel. A drag in progress still ends with a drop.
    pub fn on_touch_cancel(
        &mut self,
        touches: &[TouchPoint],
        hit: &mut impl HitTest<T>,
    ) -> TouchResponse<T> {
        self.on_touch_end(touches, hit)
    }

    /// Abandons any gesture and returns to idle, as when the element is
    /// detached. A drag in progress reports [`TouchDragEvent::DragEnd`] without
    /// a pointer-up.
    pub fn reset(&mut self) -> TouchResponse<T> {
        let mut response = TouchResponse::default();
        if self.phase == TouchPhase::Dragging {
            response.push(TouchDragEvent::DragEnd {
                source: self.source.clone(),
            });
        }
        self.touch = None;
        self.enter(TouchPhase::Idle);
        response
    }

    fn finish(&mut self, hit: &mut impl HitTest<T>) -> TouchResponse<T> {
        let mut response = TouchResponse::default();
        response.push(TouchDragEvent::PointerUp {
            target: hit.hit_test(self.last),
            pos: self.last,
        });
        response.push(TouchDragEvent::DragEnd {
            source: self.source.clone(),
        });
        response.prevent_default = true;
        self.enter(TouchPhase::Dropped);
        self.touch = None;
        self.enter(TouchPhase::Idle);
        response
    }

    fn tracked(&self, touches: &[TouchPoint]) -> Option<TouchPoint> {
        let id = self.touch?;
        touches.iter().find(|t| t.id == id).copied()
    }
}
