// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_outline --heading-base-level=0

//! Arbor Outline: an editable, virtualization-ready tree of documents.
//!
//! This crate turns a caller-owned hierarchy of records into the rows of a
//! sidebar outline, and validates the edits a user makes to it. It models the
//! tree as a combination of:
//!
//! - **Records** ([`Record`]): the caller's data, read but never mutated.
//! - **Enrichment** ([`Outline`], [`OutlineConfig`]): one pass that assigns
//!   each record its level, parent, openness and drag/drop capabilities, and
//!   numbers the visible ones in pre-order.
//! - **Flattening** ([`Outline::visible`], [`VisibleRows`]): the ordered list of
//!   visible rows that a virtualized list renders.
//! - **Moves** ([`MoveTarget`], [`MovePlan`]): validation of drag-and-drop and
//!   keyboard moves, including cycle prevention.
//! - **Interaction state** ([`TreeState`]): open/closed, the single selection,
//!   inline rename, active drag and outstanding lazy loads.
//! - **Controller** ([`TreeController`], [`TreeHandlers`]): boolean calls with
//!   change callbacks for embedders that persist data elsewhere.
//! - **In-memory store** ([`SimpleNode`], [`SimpleTree`]): for embedders that
//!   do not.
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_outline::{MoveTarget, Outline, OutlineConfig, SimpleNode, SimpleTree, TreeState};
//!
//! let mut docs = SimpleTree::new(vec![
//!     SimpleNode::folder(1_u32, "Projects", vec![SimpleNode::new(2, "Roadmap")]),
//!     SimpleNode::new(3, "Scratch"),
//! ]);
//! let config = OutlineConfig::new();
//! let mut state = TreeState::new();
//!
//! // Only top-level records are visible while "Projects" is closed.
//! let outline = Outline::from_forest(docs.roots(), &config, &state);
//! let rows: Vec<u32> = outline.visible().map(|n| *n.id()).collect();
//! assert_eq!(rows, [1, 3]);
//!
//! // Drop "Scratch" into "Projects"; the drop target is revealed.
//! state.drag_start(&outline, &[3]).unwrap();
//! let dropped = state.drop_on(&outline, &MoveTarget::child_of(1)).unwrap();
//! assert!(docs.apply_move(&dropped.plan));
//!
//! let outline = Outline::from_forest(docs.roots(), &config, &state);
//! let rows: Vec<(u32, usize)> = outline.visible().map(|n| (*n.id(), n.level())).collect();
//! assert_eq!(rows, [(1, 0), (2, 1), (3, 1)]);
//! ```
//!
//! ## Rebuilding
//!
//! An [`Outline`] is an immutable snapshot that borrows the records. After any
//! change to the records or to the [`TreeState`], build a new one. Building is
//! a single `O(n)` pass; flattening is `O(visible)`.
//!
//! ## Lazy Children
//!
//! A record whose children are not known yet (its children accessor yields
//! `None`) can be marked lazy with [`OutlineConfig::with_lazy`]. Opening it
//! issues a [`LoadTicket`]; the result is handed back through
//! [`TreeState::finish_load`], which discards it if the node was closed or
//! reloaded in the meantime.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. The default `std` feature only
//! forwards to `tracing`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod flatten;
mod lazy;
mod moves;
mod node;
mod outline;
mod record;
mod resolver;
mod simple;
mod state;

pub use config::OutlineConfig;
pub use controller::{TreeController, TreeHandlers};
pub use flatten::{Row, RowFlags, Visible, VisibleRows};
pub use lazy::{LoadResolution, LoadTicket, LoadTracker};
pub use moves::{DropPosition, MovePlan, MoveRejection, MoveTarget};
pub use node::{NodeFlags, NodeIdx, OutlineNode};
pub use outline::Outline;
pub use record::Record;
pub use resolver::{ChildrenAccessor, Resolver};
pub use simple::{SimpleNode, SimpleTree};
pub use state::{Dropped, EditSession, Rename, StateRejection, Toggled, TreeState};
