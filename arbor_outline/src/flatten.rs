// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening: the ordered sequence of visible nodes that drives a virtualized
//! list.
//!
//! Flattening is a pure projection of an [`Outline`]. Calling it twice on the
//! same outline yields the same sequence, and position `i` in that sequence is
//! the node whose [`row_index`](OutlineNode::row_index) is `i`.

use alloc::vec::Vec;

use crate::node::{NodeIdx, OutlineNode};
use crate::outline::Outline;
use crate::record::Record;
use crate::state::TreeState;

bitflags::bitflags! {
    /// Per-row interaction flags handed to a renderer.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RowFlags: u8 {
        /// The node is expanded.
        const OPEN     = 0b0000_0001;
        /// The node is the tree-wide selection.
        const SELECTED = 0b0000_0010;
        /// The node is being renamed inline.
        const EDITING  = 0b0000_0100;
        /// The node is part of the active drag.
        const DRAGGING = 0b0000_1000;
        /// A lazy child load is outstanding.
        const LOADING  = 0b0001_0000;
        /// The node has a toggle affordance.
        const EXPANDABLE = 0b0010_0000;
    }
}

/// Lazy pre-order walk over visible nodes.
///
/// Descends into a node only when it is open, or when it is a hidden root.
#[derive(Debug)]
pub struct Visible<'o, 'a, R: Record> {
    outline: &'o Outline<'a, R>,
    stack: Vec<NodeIdx>,
}

impl<'o, 'a, R: Record> Visible<'o, 'a, R> {
    fn next_index(&mut self) -> Option<NodeIdx> {
        while let Some(idx) = self.stack.pop() {
            let node = &self.outline[idx];
            if node.is_hidden_root() || (node.is_visible() && node.is_open()) {
                if let Some(children) = node.children() {
                    self.stack.extend(children.iter().rev().copied());
                }
            }
            if node.is_visible() {
                return Some(idx);
            }
        }
        None
    }
}

impl<'o, 'a, R: Record> Iterator for Visible<'o, 'a, R> {
    type Item = &'o OutlineNode<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        let outline = self.outline;
        self.next_index().map(|idx| &outline[idx])
    }
}

/// A materialized, random-access visible sequence.
#[derive(Debug)]
pub struct VisibleRows<'o, 'a, R: Record> {
    outline: &'o Outline<'a, R>,
    rows: Vec<NodeIdx>,
}

impl<'a, R: Record> Outline<'a, R> {
    /// Walks the visible nodes in row order.
    pub fn visible(&self) -> Visible<'_, 'a, R> {
        Visible {
            outline: self,
            stack: self.roots().iter().rev().copied().collect(),
        }
    }

    /// Collects the visible nodes for random access by row.
    #[must_use]
    pub fn flatten(&self) -> VisibleRows<'_, 'a, R> {
        let mut rows = Vec::with_capacity(self.visible_len());
        let mut walk = self.visible();
        while let Some(idx) = walk.next_index() {
            rows.push(idx);
        }
        VisibleRows {
            outline: self,
            rows,
        }
    }
}

impl<'o, 'a, R: Record> VisibleRows<'o, 'a, R> {
    /// Number of visible rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Arena index of the node at `row`.
    #[must_use]
    pub fn index(&self, row: usize) -> Option<NodeIdx> {
        self.rows.get(row).copied()
    }

    /// The node at `row`.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&'o OutlineNode<'a, R>> {
        self.index(row).map(|idx| &self.outline[idx])
    }

    /// Row of the node with `id`, if it is visible.
    #[must_use]
    pub fn row_of(&self, id: &R::Id) -> Option<usize> {
        self.outline.get(id).and_then(OutlineNode::row_index)
    }

    /// Iterates the visible nodes in row order.
    pub fn iter(&self) -> impl Iterator<Item = &'o OutlineNode<'a, R>> + '_ {
        self.rows.iter().map(|&idx| &self.outline[idx])
    }

    /// The renderer's view of `row`, decorated with interaction state.
    #[must_use]
    pub fn row(&self, row: usize, state: &TreeState<R::Id>) -> Option<Row<'o, 'a, R>> {
        self.get(row).map(|node| Row::new(node, state))
    }

    /// Renderer views for every visible row.
    pub fn rows<'s>(
        &'s self,
        state: &'s TreeState<R::Id>,
    ) -> impl Iterator<Item = Row<'o, 'a, R>> + 's {
        self.iter().map(move |node| Row::new(node, state))
    }
}

/// One visible row as seen by a renderer.
#[derive(Debug)]
pub struct Row<'o, 'a, R: Record> {
    node: &'o OutlineNode<'a, R>,
    flags: RowFlags,
}

impl<'o, 'a, R: Record> Clone for Row<'o, 'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'o, 'a, R: Record> Copy for Row<'o, 'a, R> {}

impl<'o, 'a, R: Record> Row<'o, 'a, R> {
    fn new(node: &'o OutlineNode<'a, R>, state: &TreeState<R::Id>) -> Self {
        let id = node.id();
        let mut flags = RowFlags::empty();
        flags.set(RowFlags::OPEN, node.is_open());
        flags.set(RowFlags::SELECTED, state.is_selected(id));
        flags.set(RowFlags::EDITING, state.is_editing(id));
        flags.set(RowFlags::DRAGGING, state.is_dragging(id));
        flags.set(RowFlags::LOADING, node.is_loading());
        flags.set(RowFlags::EXPANDABLE, node.is_expandable());
        Self { node, flags }
    }

    /// The underlying enriched node.
    #[must_use]
    pub fn node(&self) -> &'o OutlineNode<'a, R> {
        self.node
    }

    /// Record identifier.
    #[must_use]
    pub fn id(&self) -> &'o R::Id {
        self.node.id()
    }

    /// The record itself.
    #[must_use]
    pub fn model(&self) -> &'a R {
        self.node.model()
    }

    /// Depth, for indentation.
    #[must_use]
    pub fn level(&self) -> usize {
        self.node.level()
    }

    /// Row position; maps to a pixel offset in the virtualized list.
    #[must_use]
    pub fn row_index(&self) -> usize {
        self.node.row_index().unwrap_or_default()
    }

    /// Interaction flags.
    #[must_use]
    pub fn flags(&self) -> RowFlags {
        self.flags
    }

    /// Returns `true` if the row is expanded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.flags.contains(RowFlags::OPEN)
    }

    /// Returns `true` if the row is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.flags.contains(RowFlags::SELECTED)
    }

    /// Returns `true` if the row is being renamed.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.flags.contains(RowFlags::EDITING)
    }

    /// Returns `true` if the row is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.flags.contains(RowFlags::DRAGGING)
    }
}
