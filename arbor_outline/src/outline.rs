// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enrichment: building an [`Outline`] from caller records.

use alloc::vec::Vec;
use core::ops::Index;

use hashbrown::HashMap;

use crate::config::{Compiled, OutlineConfig};
use crate::node::{NodeFlags, NodeIdx, OutlineNode};
use crate::record::Record;
use crate::state::TreeState;

/// An enriched, immutable snapshot of a record tree.
///
/// Nodes live in a flat arena in pre-order, keyed by record id. Parent links
/// are arena indices, so upward walks never keep anything alive.
///
/// Building is always a full pass, `O(n)` in the reachable records. Rebuild
/// after any change to the records or to the [`TreeState`] open set.
#[derive(Debug)]
pub struct Outline<'a, R: Record> {
    nodes: Vec<OutlineNode<'a, R>>,
    roots: Vec<NodeIdx>,
    by_id: HashMap<R::Id, NodeIdx>,
    visible_len: usize,
    rooted: bool,
}

struct Frame<'a, R> {
    record: &'a R,
    parent: Option<NodeIdx>,
    level: usize,
    visible: bool,
    hidden_root: bool,
}

impl<'a, R: Record> Outline<'a, R> {
    /// Enriches a forest of top-level records held by an implicit, hidden root.
    ///
    /// Top-level records sit at level `0` and are always candidates for a row.
    #[must_use]
    pub fn from_forest(
        records: &'a [R],
        config: &OutlineConfig<R>,
        state: &TreeState<R::Id>,
    ) -> Self {
        let frames = records.iter().rev().map(|record| Frame {
            record,
            parent: None,
            level: 0,
            visible: true,
            hidden_root: false,
        });
        Self::build(frames.collect(), false, config, state)
    }

    /// Enriches a tree with a single root record.
    ///
    /// With [`OutlineConfig::hide_root`] set, the root never receives a row and
    /// its children are shown regardless of the root's own openness.
    #[must_use]
    pub fn from_root(root: &'a R, config: &OutlineConfig<R>, state: &TreeState<R::Id>) -> Self {
        let frame = Frame {
            record: root,
            parent: None,
            level: 0,
            visible: true,
            hidden_root: config.hides_root(),
        };
        Self::build(alloc::vec![frame], true, config, state)
    }

    fn build(
        mut stack: Vec<Frame<'a, R>>,
        rooted: bool,
        config: &OutlineConfig<R>,
        state: &TreeState<R::Id>,
    ) -> Self {
        let compiled = config.compile();
        let mut outline = Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
            visible_len: 0,
            rooted,
        };

        while let Some(frame) = stack.pop() {
            let id = frame.record.id();
            if outline.by_id.contains_key(&id) {
                tracing::debug!(?id, "duplicate record id, skipping its subtree");
                continue;
            }
            let idx = NodeIdx::new(outline.nodes.len());
            let children = (compiled.children)(frame.record);
            let mut flags =
                Self::flags_for(&compiled, frame.record, &id, children.is_none(), state);
            flags.set(NodeFlags::HIDDEN_ROOT, frame.hidden_root);

            let row_index = (frame.visible && !frame.hidden_root).then(|| {
                outline.visible_len += 1;
                outline.visible_len - 1
            });
            let descend_visible =
                frame.hidden_root || (row_index.is_some() && flags.contains(NodeFlags::OPEN));

            let sibling_index = match frame.parent {
                Some(parent) => {
                    let siblings = outline.nodes[parent.index()]
                        .children
                        .get_or_insert_with(Vec::new);
                    siblings.push(idx);
                    siblings.len() - 1
                }
                None => {
                    outline.roots.push(idx);
                    outline.roots.len() - 1
                }
            };

            if let Some(kids) = children {
                stack.extend(kids.iter().rev().map(|record| Frame {
                    record,
                    parent: Some(idx),
                    level: frame.level + 1,
                    visible: descend_visible,
                    hidden_root: false,
                }));
            }

            outline.by_id.insert(id.clone(), idx);
            outline.nodes.push(OutlineNode {
                id,
                model: frame.record,
                level: frame.level,
                parent: frame.parent,
                children: children.map(|kids| Vec::with_capacity(kids.len())),
                sibling_index,
                flags,
                row_index,
            });
        }

        tracing::trace!(
            nodes = outline.nodes.len(),
            rows = outline.visible_len,
            "enriched outline"
        );
        outline
    }

    fn flags_for(
        compiled: &Compiled<'_, R>,
        record: &R,
        id: &R::Id,
        unresolved: bool,
        state: &TreeState<R::Id>,
    ) -> NodeFlags {
        let open = state
            .open_override(id)
            .unwrap_or_else(|| (compiled.open)(record));
        let loads = state.loads();
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::OPEN, open);
        flags.set(NodeFlags::DRAGGABLE, (compiled.draggable)(record));
        flags.set(NodeFlags::DROPPABLE, (compiled.droppable)(record));
        flags.set(
            NodeFlags::LAZY,
            unresolved && !loads.has_failed(id) && (compiled.lazy)(record),
        );
        flags.set(NodeFlags::LOADING, loads.is_loading(id));
        flags
    }

    /// Number of enriched nodes, visible or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no records were reachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes that received a row index.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible_len
    }

    /// Top-level nodes: the forest records, or the single root.
    #[must_use]
    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    /// The single root when built with [`Outline::from_root`].
    #[must_use]
    pub fn root(&self) -> Option<NodeIdx> {
        if self.rooted {
            self.roots.first().copied()
        } else {
            None
        }
    }

    /// Looks up a node by record id.
    #[must_use]
    pub fn get(&self, id: &R::Id) -> Option<&OutlineNode<'a, R>> {
        self.index_of(id).map(|idx| &self.nodes[idx.index()])
    }

    /// Looks up a node's arena index by record id.
    #[must_use]
    pub fn index_of(&self, id: &R::Id) -> Option<NodeIdx> {
        self.by_id.get(id).copied()
    }

    /// Returns the node at `idx`, if it belongs to this outline.
    #[must_use]
    pub fn node(&self, idx: NodeIdx) -> Option<&OutlineNode<'a, R>> {
        self.nodes.get(idx.index())
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> core::slice::Iter<'_, OutlineNode<'a, R>> {
        self.nodes.iter()
    }

    /// Walks from `idx`'s parent up to the top level.
    pub fn ancestors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        core::iter::successors(self.nodes[idx.index()].parent, |p| {
            self.nodes[p.index()].parent
        })
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeIdx, node: NodeIdx) -> bool {
        // Ancestors always precede their descendants in the arena.
        ancestor < node && self.ancestors(node).any(|a| a == ancestor)
    }

    /// Every descendant of `idx` in pre-order.
    ///
    /// Subtrees are contiguous in the arena, so this is a slice scan.
    pub fn descendants(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
        let level = self.nodes[idx.index()].level;
        (idx.index() + 1..self.nodes.len())
            .take_while(move |&i| self.nodes[i].level > level)
            .map(NodeIdx::new)
    }
}

impl<'a, R: Record> Index<NodeIdx> for Outline<'a, R> {
    type Output = OutlineNode<'a, R>;

    /// # Panics
    ///
    /// Panics if `idx` was not produced by this outline.
    fn index(&self, idx: NodeIdx) -> &Self::Output {
        &self.nodes[idx.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Resolver, SimpleNode};
    use alloc::vec;
    use alloc::vec::Vec;

    fn sample() -> Vec<SimpleNode<&'static str>> {
        vec![
            SimpleNode::folder(
                "a",
                "A",
                vec![SimpleNode::new("a1", "A1"), SimpleNode::new("a2", "A2")],
            )
            .with_flag("open", true),
            SimpleNode::folder("b", "B", vec![SimpleNode::new("b1", "B1")]),
        ]
    }

    fn rows(outline: &Outline<'_, SimpleNode<&'static str>>) -> Vec<(&'static str, Option<usize>)> {
        outline.iter().map(|n| (*n.id(), n.row_index())).collect()
    }

    #[test]
    fn rows_are_numbered_in_pre_order_below_open_parents() {
        let data = sample();
        let config = OutlineConfig::new().with_open("open");
        let outline = Outline::from_forest(&data, &config, &TreeState::new());

        assert_eq!(
            rows(&outline),
            vec![
                ("a", Some(0)),
                ("a1", Some(1)),
                ("a2", Some(2)),
                ("b", Some(3)),
                ("b1", None),
            ]
        );
        assert_eq!(outline.visible_len(), 4);
        assert_eq!(outline.get(&"b1").map(OutlineNode::level), Some(1));
    }

    #[test]
    fn hidden_root_descends_even_when_closed() {
        let root = SimpleNode::folder("root", "Root", sample());
        let config = OutlineConfig::new().with_open("open");
        let outline = Outline::from_root(&root, &config, &TreeState::new());

        let root_node = &outline[outline.root().unwrap()];
        assert!(root_node.is_hidden_root());
        assert!(!root_node.is_open());
        assert_eq!(root_node.row_index(), None);
        assert_eq!(outline.get(&"a").and_then(OutlineNode::row_index), Some(0));
        assert_eq!(outline.get(&"a").map(OutlineNode::level), Some(1));
    }

    #[test]
    fn visible_root_gates_its_children() {
        let root = SimpleNode::folder("root", "Root", sample());
        let config = OutlineConfig::new().with_open("open").hide_root(false);
        let outline = Outline::from_root(&root, &config, &TreeState::new());

        assert_eq!(outline.visible_len(), 1);
        assert_eq!(outline.get(&"root").and_then(OutlineNode::row_index), Some(0));
        assert_eq!(outline.get(&"a").and_then(OutlineNode::row_index), None);
    }

    #[test]
    fn empty_children_are_leaves_and_missing_children_are_unresolved() {
        let data = vec![
            SimpleNode::folder("empty", "Empty", Vec::new()),
            SimpleNode::new("plain", "Plain"),
            SimpleNode::new("lazy", "Lazy").with_flag("hasChildren", true),
        ];
        let config = OutlineConfig::new().with_lazy("hasChildren");
        let outline = Outline::from_forest(&data, &config, &TreeState::new());

        let empty = outline.get(&"empty").unwrap();
        assert_eq!(empty.children(), Some(&[][..]));
        assert!(empty.is_leaf());
        assert!(outline.get(&"plain").unwrap().children().is_none());
        assert!(outline.get(&"plain").unwrap().is_leaf());
        assert!(outline.get(&"lazy").unwrap().is_expandable());
    }

    #[test]
    fn duplicate_ids_keep_the_first_occurrence() {
        let data = vec![
            SimpleNode::new("x", "first"),
            SimpleNode::folder("x", "second", vec![SimpleNode::new("y", "Y")]),
        ];
        let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());

        assert_eq!(outline.len(), 1);
        assert_eq!(outline.get(&"x").unwrap().model().name, "first");
        assert!(outline.get(&"y").is_none());
    }

    #[test]
    fn ancestry_queries() {
        let data = sample();
        let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());
        let a = outline.index_of(&"a").unwrap();
        let a2 = outline.index_of(&"a2").unwrap();
        let b = outline.index_of(&"b").unwrap();

        assert!(outline.is_ancestor_of(a, a2));
        assert!(!outline.is_ancestor_of(a2, a));
        assert!(!outline.is_ancestor_of(b, a2));
        assert_eq!(outline.ancestors(a2).collect::<Vec<_>>(), vec![a]);
        assert_eq!(outline.descendants(a).count(), 2);
        assert_eq!(outline.descendants(b).count(), 1);
        assert_eq!(outline[a2].sibling_index(), 1);
    }

    #[test]
    fn default_open_numbers_children_without_overrides() {
        let data = sample();
        let config = OutlineConfig::new().open_by_default(true);
        let outline = Outline::from_forest(&data, &config, &TreeState::new());

        assert!(outline.iter().filter(|n| n.is_expandable()).all(OutlineNode::is_open));
        assert_eq!(outline.visible_len(), 5);
        assert_eq!(outline.get(&"b1").and_then(OutlineNode::row_index), Some(4));
    }

    #[test]
    fn missing_open_field_falls_back_to_default() {
        let data = vec![
            SimpleNode::folder("shut", "Shut", vec![SimpleNode::new("s1", "S1")])
                .with_flag("expanded", false),
            SimpleNode::folder("unset", "Unset", vec![SimpleNode::new("u1", "U1")]),
        ];
        let config = OutlineConfig::new()
            .with_open(Resolver::field("expanded"))
            .open_by_default(true);
        let outline = Outline::from_forest(&data, &config, &TreeState::new());

        assert!(!outline.get(&"shut").unwrap().is_open());
        assert!(outline.get(&"unset").unwrap().is_open());
        assert_eq!(
            rows(&outline),
            vec![
                ("shut", Some(0)),
                ("s1", None),
                ("unset", Some(1)),
                ("u1", Some(2)),
            ]
        );

        let closed = OutlineConfig::new().with_open(Resolver::field("expanded"));
        let outline = Outline::from_forest(&data, &closed, &TreeState::new());
        assert_eq!(outline.visible_len(), 2);
    }
}
