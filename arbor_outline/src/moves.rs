// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move/reparent validation.
//!
//! [`Outline::plan_move`] checks a proposed structural edit against the current
//! snapshot and, if it is valid, returns a [`MovePlan`] describing exactly what
//! the owner of the records should change. Nothing is mutated here; a rejected
//! move is an ordinary value, not a panic.
//!
//! Checks run in this order:
//!
//! 1. every dragged node exists and is draggable;
//! 2. the destination parent accepts drops;
//! 3. the destination is not one of the dragged nodes;
//! 4. the destination is not inside a dragged subtree.

use core::fmt;

use smallvec::SmallVec;

use crate::node::NodeIdx;
use crate::outline::Outline;
use crate::record::Record;

/// Where to drop relative to a reference node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Immediately before the reference node, under the same parent.
    Before,
    /// Immediately after the reference node, under the same parent.
    After,
    /// As the last child of the reference node.
    Child,
}

/// Destination of a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveTarget<Id> {
    /// Insert under `parent` at `index` of its current child list.
    ///
    /// `None` is the top level: the forest, or the single root's children.
    /// Indices past the end append.
    Parent {
        /// New parent, or `None` for the top level.
        parent: Option<Id>,
        /// Insertion index in the parent's current children.
        index: usize,
    },
    /// Insert relative to an existing node.
    Relative {
        /// Reference node.
        target: Id,
        /// Placement relative to `target`.
        position: DropPosition,
    },
}

impl<Id> MoveTarget<Id> {
    /// Drop as the last child of `target`.
    pub fn child_of(target: Id) -> Self {
        Self::Relative {
            target,
            position: DropPosition::Child,
        }
    }

    /// Drop immediately before `target`.
    pub fn before(target: Id) -> Self {
        Self::Relative {
            target,
            position: DropPosition::Before,
        }
    }

    /// Drop immediately after `target`.
    pub fn after(target: Id) -> Self {
        Self::Relative {
            target,
            position: DropPosition::After,
        }
    }

    /// Drop under `parent` at `index`.
    pub fn at(parent: Option<Id>, index: usize) -> Self {
        Self::Parent { parent, index }
    }
}

/// A validated move, ready to be applied to the records.
///
/// Dragged ids are in document order. Nodes nested under another dragged node
/// are omitted because they move with their ancestor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePlan<Id> {
    /// Nodes to move, as one contiguous block, in document order.
    pub dragged: SmallVec<[Id; 4]>,
    /// New parent, or `None` for the forest's top level.
    pub parent: Option<Id>,
    /// Insertion index in the parent's child list before anything is removed.
    pub index: usize,
    /// Sibling to insert before once the dragged nodes are removed; `None` appends.
    pub anchor: Option<Id>,
    /// Closed nodes, outermost first, that must be opened to reveal the drop.
    pub reveal: SmallVec<[Id; 4]>,
}

/// Why a move was refused.
#[derive(Clone, PartialEq, Eq)]
pub enum MoveRejection<Id> {
    /// The dragged set was empty.
    NothingDragged,
    /// An id is not part of the outline.
    UnknownNode(Id),
    /// A dragged node is not draggable.
    NotDraggable(Id),
    /// The destination parent does not accept drops; `None` is the top level.
    NotDroppable(Option<Id>),
    /// The destination is one of the dragged nodes.
    SelfTarget(Id),
    /// The destination lies inside a dragged subtree.
    Cycle {
        /// The dragged ancestor.
        dragged: Id,
        /// The destination parent.
        target: Id,
    },
}

impl<Id: fmt::Debug> fmt::Debug for MoveRejection<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveRejection({self})")
    }
}

impl<Id: fmt::Debug> fmt::Display for MoveRejection<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingDragged => f.write_str("no nodes were dragged"),
            Self::UnknownNode(id) => write!(f, "node {id:?} is not in the outline"),
            Self::NotDraggable(id) => write!(f, "node {id:?} is not draggable"),
            Self::NotDroppable(Some(id)) => write!(f, "node {id:?} does not accept drops"),
            Self::NotDroppable(None) => f.write_str("the top level does not accept drops"),
            Self::SelfTarget(id) => write!(f, "node {id:?} cannot be dropped onto itself"),
            Self::Cycle { dragged, target } => write!(
                f,
                "moving {dragged:?} under its descendant {target:?} would create a cycle"
            ),
        }
    }
}

impl<Id: fmt::Debug> core::error::Error for MoveRejection<Id> {}

impl<'a, R: Record> Outline<'a, R> {
    /// Validates moving `dragged` to `target`.
    ///
    /// ```
    /// use arbor_outline::{MoveRejection, MoveTarget, Outline, OutlineConfig, SimpleNode, TreeState};
    ///
    /// let data = vec![
    ///     SimpleNode::folder("a", "A", vec![SimpleNode::new("a1", "A1")]),
    ///     SimpleNode::new("b", "B"),
    /// ];
    /// let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());
    ///
    /// let plan = outline.plan_move(&["b"], &MoveTarget::child_of("a")).unwrap();
    /// assert_eq!(plan.parent, Some("a"));
    /// assert_eq!(plan.index, 1);
    ///
    /// assert_eq!(
    ///     outline.plan_move(&["a"], &MoveTarget::child_of("a1")),
    ///     Err(MoveRejection::Cycle { dragged: "a", target: "a1" })
    /// );
    /// ```
    pub fn plan_move(
        &self,
        dragged: &[R::Id],
        target: &MoveTarget<R::Id>,
    ) -> Result<MovePlan<R::Id>, MoveRejection<R::Id>> {
        if dragged.is_empty() {
            return Err(MoveRejection::NothingDragged);
        }

        let mut sources: SmallVec<[NodeIdx; 4]> = SmallVec::new();
        for id in dragged {
            let idx = self.require(id)?;
            if !self[idx].is_draggable() {
                return Err(MoveRejection::NotDraggable(id.clone()));
            }
            if !sources.contains(&idx) {
                sources.push(idx);
            }
        }

        let (container, index, reference) = self.resolve_target(target)?;

        match container {
            Some(parent) if !self[parent].is_droppable() => {
                return Err(MoveRejection::NotDroppable(Some(self[parent].id().clone())));
            }
            None if self.root().is_some() => return Err(MoveRejection::NotDroppable(None)),
            _ => {}
        }

        if let Some(reference) = reference {
            if sources.contains(&reference) {
                return Err(MoveRejection::SelfTarget(self[reference].id().clone()));
            }
        }

        if let Some(parent) = container {
            let chain = core::iter::once(parent).chain(self.ancestors(parent));
            for ancestor in chain {
                if sources.contains(&ancestor) {
                    return Err(MoveRejection::Cycle {
                        dragged: self[ancestor].id().clone(),
                        target: self[parent].id().clone(),
                    });
                }
            }
        }

        // Document order; nested picks travel with their dragged ancestor.
        sources.sort_unstable();
        let nested: SmallVec<[NodeIdx; 4]> = sources
            .iter()
            .copied()
            .filter(|&s| sources.iter().any(|&o| self.is_ancestor_of(o, s)))
            .collect();
        sources.retain(|s| !nested.contains(s));

        let siblings = self.siblings(container);
        let anchor = siblings
            .iter()
            .skip(index)
            .find(|&&s| !sources.contains(&s))
            .map(|&s| self[s].id().clone());

        let mut reveal: SmallVec<[R::Id; 4]> = container
            .into_iter()
            .chain(container.into_iter().flat_map(|c| self.ancestors(c)))
            .filter(|&n| !self[n].is_open() && !self[n].is_hidden_root())
            .map(|n| self[n].id().clone())
            .collect();
        reveal.reverse();

        Ok(MovePlan {
            dragged: sources.iter().map(|&s| self[s].id().clone()).collect(),
            parent: container.map(|c| self[c].id().clone()),
            index,
            anchor,
            reveal,
        })
    }

    fn require(&self, id: &R::Id) -> Result<NodeIdx, MoveRejection<R::Id>> {
        self.index_of(id)
            .ok_or_else(|| MoveRejection::UnknownNode(id.clone()))
    }

    fn siblings(&self, container: Option<NodeIdx>) -> &[NodeIdx] {
        match container {
            Some(parent) => self[parent].children().unwrap_or(&[]),
            None => self.roots(),
        }
    }

    /// Resolves a target to (parent, insertion index, node that must not be dragged).
    fn resolve_target(
        &self,
        target: &MoveTarget<R::Id>,
    ) -> Result<(Option<NodeIdx>, usize, Option<NodeIdx>), MoveRejection<R::Id>> {
        match target {
            MoveTarget::Relative { target, position } => {
                let reference = self.require(target)?;
                let node = &self[reference];
                let (container, index) = match position {
                    DropPosition::Child => {
                        (Some(reference), node.children().map_or(0, <[_]>::len))
                    }
                    DropPosition::Before => (node.parent(), node.sibling_index()),
                    DropPosition::After => (node.parent(), node.sibling_index() + 1),
                };
                Ok((container, index, Some(reference)))
            }
            MoveTarget::Parent { parent, index } => {
                let container = match parent {
                    Some(id) => Some(self.require(id)?),
                    None => self.root(),
                };
                let index = (*index).min(self.siblings(container).len());
                Ok((container, index, container))
            }
        }
    }
}
