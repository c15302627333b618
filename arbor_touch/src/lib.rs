// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_touch --heading-base-level=0

//! Arbor Touch: press-and-hold touch drags, translated into pointer events.
//!
//! Drag-and-drop code written against pointer events usually has no touch
//! branch. [`TouchDragAdapter`] sits in front of it: it watches a single
//! finger on one element and, once the finger has rested long enough, emits
//! the same pointer-down / pointer-move / pointer-up sequence a mouse drag
//! would produce. Anything else (a quick swipe, a second finger, a tap) is
//! left to the platform as an ordinary scroll or click.
//!
//! The phases are `Idle → Pending → Dragging → (Dropped | Cancelled) → Idle`.
//!
//! - **Configuration** ([`TouchDragConfig`]): press delay (150 ms), resting
//!   distance (10 units) and the multiple of it that counts as scrolling (2x).
//! - **Input** ([`TouchPoint`]): identifier plus position, with a millisecond
//!   timestamp passed alongside.
//! - **Output** ([`TouchResponse`], [`TouchDragEvent`]): events to dispatch and
//!   whether to suppress default touch scrolling.
//! - **Hit testing** ([`HitTest`]): supplied by the host per call, so the
//!   adapter never holds scene state.
//!
//! The adapter has no opinion on whether a drop is valid; that belongs to the
//! drag-and-drop code it feeds.
//!
//! ## Example
//!
//! ```rust
//! use arbor_touch::{TouchDragAdapter, TouchDragConfig, TouchDragEvent, TouchPhase, TouchPoint};
//! use kurbo::Point;
//!
//! let mut drag = TouchDragAdapter::new("note-42", TouchDragConfig::default());
//! let mut rows = |p: Point| (p.y > 100.0).then_some("folder-7");
//!
//! drag.on_touch_start(&[TouchPoint::new(1, Point::new(10.0, 10.0))], 0);
//! assert_eq!(drag.deadline(), Some(150));
//!
//! // The finger rested; the host's timer fires.
//! let started = drag.on_timer(150);
//! assert_eq!(started.events[0], TouchDragEvent::DragStart { source: "note-42" });
//!
//! let moved = drag.on_touch_move(&[TouchPoint::new(1, Point::new(10.0, 120.0))], &mut rows, 300);
//! assert!(moved.prevent_default);
//!
//! let dropped = drag.on_touch_end(&[TouchPoint::new(1, Point::new(10.0, 120.0))], &mut rows);
//! assert_eq!(
//!     dropped.events[0],
//!     TouchDragEvent::PointerUp { target: Some("folder-7"), pos: Point::new(10.0, 120.0) }
//! );
//! assert_eq!(drag.phase(), TouchPhase::Idle);
//! ```
//!
//! ## Timers
//!
//! The adapter does not own a clock. Whenever [`TouchDragAdapter::deadline`]
//! returns `Some`, the host schedules a call to [`TouchDragAdapter::on_timer`].
//! A touch move that arrives after the deadline settles the press on its own.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std`. Enable `std` (the default) or `libm` for Kurbo's
//! float math.

#![no_std]

mod adapter;
mod config;
mod event;

pub use adapter::{TouchDragAdapter, TouchPhase};
pub use config::TouchDragConfig;
pub use event::{HitTest, TouchDragEvent, TouchPoint, TouchResponse};
