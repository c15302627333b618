// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made record type and an in-memory nested store.
//!
//! [`SimpleTree`] is for embedders that do not keep their documents anywhere
//! else: it applies the plans and renames produced by [`TreeState`](crate::TreeState)
//! directly to owned [`SimpleNode`]s.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::moves::MovePlan;
use crate::record::Record;

/// A named record with optional children and arbitrary boolean fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleNode<Id> {
    /// Identifier.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// `None` until the children are known; `Some(vec![])` for an empty folder.
    pub children: Option<Vec<Self>>,
    /// Named boolean fields, read by field resolvers.
    pub flags: Vec<(String, bool)>,
}

impl<Id> SimpleNode<Id> {
    /// A node with no children field.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: None,
            flags: Vec::new(),
        }
    }

    /// A node with a resolved child list.
    pub fn folder(id: Id, name: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(id, name)
        }
    }

    /// Sets a named boolean field.
    #[must_use]
    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        match self.flags.iter_mut().find(|(n, _)| n.as_str() == name) {
            Some(entry) => entry.1 = value,
            None => self.flags.push((String::from(name), value)),
        }
        self
    }
}

impl<Id: PartialEq> SimpleNode<Id> {
    /// Finds `id` in this subtree, including this node.
    #[must_use]
    pub fn find(&self, id: &Id) -> Option<&Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.as_deref().and_then(|c| find_in(c, id))
    }
}

impl<Id: Clone + Eq + Hash + Debug> Record for SimpleNode<Id> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id.clone()
    }

    fn label(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn flag(&self, field: &str) -> Option<bool> {
        self.flags
            .iter()
            .find(|(name, _)| name.as_str() == field)
            .map(|&(_, value)| value)
    }

    fn children_field(&self, field: &str) -> Option<&[Self]> {
        if field == "children" {
            self.children.as_deref()
        } else {
            None
        }
    }
}

fn find_in<'t, Id: PartialEq>(nodes: &'t [SimpleNode<Id>], id: &Id) -> Option<&'t SimpleNode<Id>> {
    nodes.iter().find_map(|node| node.find(id))
}

fn find_in_mut<'t, Id: PartialEq>(
    nodes: &'t mut [SimpleNode<Id>],
    id: &Id,
) -> Option<&'t mut SimpleNode<Id>> {
    for node in nodes {
        if &node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_in<Id: PartialEq>(nodes: &mut Vec<SimpleNode<Id>>, id: &Id) -> Option<SimpleNode<Id>> {
    if let Some(pos) = nodes.iter().position(|n| &n.id == id) {
        return Some(nodes.remove(pos));
    }
    nodes
        .iter_mut()
        .find_map(|n| n.children.as_mut().and_then(|c| remove_in(c, id)))
}

/// An owned forest of [`SimpleNode`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleTree<Id> {
    roots: Vec<SimpleNode<Id>>,
}

impl<Id: PartialEq> SimpleTree<Id> {
    /// Wraps a forest.
    #[must_use]
    pub fn new(roots: Vec<SimpleNode<Id>>) -> Self {
        Self { roots }
    }

    /// Top-level records, ready for [`Outline::from_forest`](crate::Outline::from_forest).
    #[must_use]
    pub fn roots(&self) -> &[SimpleNode<Id>] {
        &self.roots
    }

    /// Gives the forest back.
    #[must_use]
    pub fn into_roots(self) -> Vec<SimpleNode<Id>> {
        self.roots
    }

    /// Finds a node anywhere in the forest.
    #[must_use]
    pub fn find(&self, id: &Id) -> Option<&SimpleNode<Id>> {
        find_in(&self.roots, id)
    }

    /// Finds a node anywhere in the forest, mutably.
    pub fn find_mut(&mut self, id: &Id) -> Option<&mut SimpleNode<Id>> {
        find_in_mut(&mut self.roots, id)
    }

    fn list_mut(&mut self, parent: Option<&Id>) -> Option<&mut Vec<SimpleNode<Id>>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self
                .find_mut(id)
                .map(|node| node.children.get_or_insert_with(Vec::new)),
        }
    }

    /// Ids of the children of `parent`, or of the top level for `None`.
    #[must_use]
    pub fn children_ids(&self, parent: Option<&Id>) -> Option<Vec<Id>>
    where
        Id: Clone,
    {
        let list = match parent {
            None => &self.roots[..],
            Some(id) => self.find(id)?.children.as_deref()?,
        };
        Some(list.iter().map(|n| n.id.clone()).collect())
    }

    /// Applies a validated move.
    ///
    /// The dragged nodes are removed and reinserted as one block before the
    /// plan's anchor, or at the end of the destination. Returns `false` and
    /// leaves the forest untouched if the plan does not fit this forest, for
    /// instance because it was computed against an older snapshot.
    pub fn apply_move(&mut self, plan: &MovePlan<Id>) -> bool {
        let parent = plan.parent.as_ref();
        let fits = parent.is_none_or(|p| self.find(p).is_some())
            && plan.dragged.iter().all(|id| {
                self.find(id)
                    .is_some_and(|node| parent.is_none_or(|p| node.find(p).is_none()))
            })
            && plan
                .anchor
                .as_ref()
                .is_none_or(|a| !plan.dragged.contains(a));
        if !fits {
            return false;
        }

        let moved: Vec<_> = plan
            .dragged
            .iter()
            .filter_map(|id| remove_in(&mut self.roots, id))
            .collect();
        let Some(list) = self.list_mut(parent) else {
            return false;
        };
        let at = plan
            .anchor
            .as_ref()
            .and_then(|a| list.iter().position(|n| &n.id == a))
            .unwrap_or(list.len());
        let tail = list.split_off(at);
        list.extend(moved);
        list.extend(tail);
        true
    }

    /// Renames a node. Returns `false` if it does not exist.
    pub fn rename(&mut self, id: &Id, name: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                node.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Replaces a node's children, typically with a finished lazy load.
    ///
    /// Children already present whose ids are not in `children`, such as
    /// nodes dropped in while the load was outstanding, are kept after the
    /// new ones.
    pub fn set_children(&mut self, id: &Id, mut children: Vec<SimpleNode<Id>>) -> bool {
        match self.find_mut(id) {
            Some(node) => {
                if let Some(previous) = node.children.take() {
                    let kept: Vec<_> = previous
                        .into_iter()
                        .filter(|old| children.iter().all(|new| new.id != old.id))
                        .collect();
                    children.extend(kept);
                }
                node.children = Some(children);
                true
            }
            None => false,
        }
    }

    /// Inserts `node` under `parent` at `index`, clamped to the end.
    pub fn create(&mut self, parent: Option<&Id>, index: usize, node: SimpleNode<Id>) -> bool {
        if self.find(&node.id).is_some() {
            return false;
        }
        let Some(list) = self.list_mut(parent) else {
            return false;
        };
        let at = index.min(list.len());
        list.insert(at, node);
        true
    }

    /// Removes a node and its subtree.
    pub fn remove(&mut self, id: &Id) -> Option<SimpleNode<Id>> {
        remove_in(&mut self.roots, id)
    }
}
