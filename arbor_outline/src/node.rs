// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enriched nodes: the derived, read-only view of one record.

use alloc::vec::Vec;

use crate::record::Record;

/// Position of a node inside one [`Outline`](crate::Outline)'s arena.
///
/// Indices follow pre-order (document order), so comparing two indices from
/// the same outline compares their document positions. An index is only
/// meaningful for the outline that produced it; rebuilding discards it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(u32);

impl NodeIdx {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "outlines hold far fewer than u32::MAX nodes"
    )]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Flags computed for a node during enrichment.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Children are shown when the node itself is visible.
        const OPEN      = 0b0000_0001;
        /// The node may be dragged.
        const DRAGGABLE = 0b0000_0010;
        /// The node accepts drops as a parent.
        const DROPPABLE = 0b0000_0100;
        /// Children are unresolved and can be loaded on demand.
        const LAZY      = 0b0000_1000;
        /// A child load is outstanding.
        const LOADING   = 0b0001_0000;
        /// Structural root that never receives a row.
        const HIDDEN_ROOT = 0b0010_0000;
    }
}

/// One enriched node.
///
/// Nodes are immutable snapshots. Any change to the records or to open state
/// requires building a new [`Outline`](crate::Outline).
#[derive(Debug)]
pub struct OutlineNode<'a, R: Record> {
    pub(crate) id: R::Id,
    pub(crate) model: &'a R,
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) children: Option<Vec<NodeIdx>>,
    pub(crate) sibling_index: usize,
    pub(crate) flags: NodeFlags,
    pub(crate) row_index: Option<usize>,
}

impl<'a, R: Record> OutlineNode<'a, R> {
    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> &R::Id {
        &self.id
    }

    /// Returns the record this node was built from.
    #[must_use]
    pub fn model(&self) -> &'a R {
        self.model
    }

    /// Depth from the top of the outline, starting at `0`.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Enclosing node, or `None` at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    /// Ordered children, or `None` if the record has no resolved children.
    #[must_use]
    pub fn children(&self) -> Option<&[NodeIdx]> {
        self.children.as_deref()
    }

    /// Position among the parent's children (or among the top-level nodes).
    #[must_use]
    pub fn sibling_index(&self) -> usize {
        self.sibling_index
    }

    /// Returns the computed flags.
    #[must_use]
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Returns `true` if the node's children are shown when it is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.flags.contains(NodeFlags::OPEN)
    }

    /// Returns `true` if the node may be dragged.
    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.flags.contains(NodeFlags::DRAGGABLE)
    }

    /// Returns `true` if the node accepts drops as a parent.
    #[must_use]
    pub fn is_droppable(&self) -> bool {
        self.flags.contains(NodeFlags::DROPPABLE)
    }

    /// Returns `true` while a lazy child load is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.flags.contains(NodeFlags::LOADING)
    }

    /// Returns `true` for a root that is excluded from row numbering.
    #[must_use]
    pub fn is_hidden_root(&self) -> bool {
        self.flags.contains(NodeFlags::HIDDEN_ROOT)
    }

    /// Returns `true` if the node can be toggled: it has children, or children
    /// that can still be loaded.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        match &self.children {
            Some(children) => !children.is_empty(),
            None => self.flags.contains(NodeFlags::LAZY),
        }
    }

    /// Returns `true` if the node has no toggle affordance.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.is_expandable()
    }

    /// Position in the visible row sequence, or `None` when hidden.
    #[must_use]
    pub fn row_index(&self) -> Option<usize> {
        self.row_index
    }

    /// Returns `true` if the node currently occupies a row.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.row_index.is_some()
    }
}
