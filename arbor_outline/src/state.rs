// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tree interaction state: open/closed, selection, inline rename, drag,
//! and outstanding lazy loads.
//!
//! Open state is per node. Selection and editing are tree-wide singletons: at
//! most one node is selected and at most one is being renamed. Every
//! transition that needs to know about the tree takes the current
//! [`Outline`] snapshot; none of them touch the records.
//!
//! ```
//! use arbor_outline::{Outline, OutlineConfig, SimpleNode, TreeState};
//!
//! let data = vec![SimpleNode::folder(1_u32, "Inbox", vec![SimpleNode::new(2, "Draft")])];
//! let config = OutlineConfig::new();
//! let mut state = TreeState::new();
//!
//! let outline = Outline::from_forest(&data, &config, &state);
//! assert_eq!(outline.visible_len(), 1);
//! state.toggle(&outline, &1).unwrap();
//!
//! let outline = Outline::from_forest(&data, &config, &state);
//! assert_eq!(outline.visible_len(), 2);
//! ```

use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::lazy::{LoadResolution, LoadTicket, LoadTracker};
use crate::moves::{MovePlan, MoveRejection, MoveTarget};
use crate::node::{NodeFlags, OutlineNode};
use crate::outline::Outline;
use crate::record::Record;

/// Why an interaction was refused.
#[derive(Clone, PartialEq, Eq)]
pub enum StateRejection<Id> {
    /// The id is not part of the outline.
    UnknownNode(Id),
    /// The node has no children to show or load.
    Leaf(Id),
    /// A drag was started with no nodes.
    NothingDragged,
    /// A dragged node is not draggable.
    NotDraggable(Id),
    /// Submit was called with no rename in progress.
    NotEditing,
    /// The submitted name was empty; the old name stays.
    EmptyName(Id),
    /// The submitted name equals the current one.
    UnchangedName(Id),
}

impl<Id: fmt::Debug> fmt::Debug for StateRejection<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateRejection({self})")
    }
}

impl<Id: fmt::Debug> fmt::Display for StateRejection<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "node {id:?} is not in the outline"),
            Self::Leaf(id) => write!(f, "node {id:?} has no children to toggle"),
            Self::NothingDragged => f.write_str("no nodes were dragged"),
            Self::NotDraggable(id) => write!(f, "node {id:?} is not draggable"),
            Self::NotEditing => f.write_str("no rename in progress"),
            Self::EmptyName(id) => write!(f, "empty name for node {id:?}"),
            Self::UnchangedName(id) => write!(f, "name of node {id:?} is unchanged"),
        }
    }
}

impl<Id: fmt::Debug> core::error::Error for StateRejection<Id> {}

/// Result of an open/close transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggled<Id> {
    /// Openness after the transition.
    pub open: bool,
    /// Set when opening a node whose children still have to be loaded.
    pub load: Option<LoadTicket<Id>>,
}

/// A drop that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped<Id> {
    /// The move for the owner of the records to apply.
    pub plan: MovePlan<Id>,
    /// Loads started for unresolved lazy nodes the drop revealed.
    ///
    /// Nodes moved in before a load finishes must survive the loaded children.
    pub loads: SmallVec<[LoadTicket<Id>; 1]>,
}

/// An inline rename in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession<Id> {
    id: Id,
    original: Option<String>,
}

impl<Id> EditSession<Id> {
    /// The node being renamed.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// The label when editing started.
    #[must_use]
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }
}

/// A committed rename, for the owner of the records to persist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rename<Id> {
    /// Renamed node.
    pub id: Id,
    /// New name, trimmed.
    pub name: String,
}

/// Interaction state for one tree, kept across rebuilds.
#[derive(Clone, Debug)]
pub struct TreeState<Id> {
    open: HashMap<Id, bool>,
    selected: Option<Id>,
    editing: Option<EditSession<Id>>,
    dragging: SmallVec<[Id; 4]>,
    loads: LoadTracker<Id>,
    revision: u64,
}

impl<Id> Default for TreeState<Id> {
    fn default() -> Self {
        Self {
            open: HashMap::new(),
            selected: None,
            editing: None,
            dragging: SmallVec::new(),
            loads: LoadTracker::default(),
            revision: 0,
        }
    }
}

impl<Id: Clone + Eq + Hash + fmt::Debug> TreeState<Id> {
    /// Creates an empty state: nothing toggled, selected, edited or dragged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped whenever a transition changes something.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Session openness recorded for `id`, if it was ever toggled.
    #[must_use]
    pub fn open_override(&self, id: &Id) -> Option<bool> {
        self.open.get(id).copied()
    }

    /// Outstanding and failed child loads.
    #[must_use]
    pub fn loads(&self) -> &LoadTracker<Id> {
        &self.loads
    }

    fn write_open(&mut self, id: &Id, open: bool) -> bool {
        if !open {
            self.loads.cancel(id);
        }
        let previous = self.open.insert(id.clone(), open);
        let changed = previous != Some(open);
        if changed {
            self.bump();
        }
        changed
    }

    fn require<'o, 'a, R: Record<Id = Id>>(
        outline: &'o Outline<'a, R>,
        id: &Id,
    ) -> Result<&'o OutlineNode<'a, R>, StateRejection<Id>> {
        outline
            .get(id)
            .ok_or_else(|| StateRejection::UnknownNode(id.clone()))
    }

    /// Flips a node between expanded and collapsed.
    ///
    /// Descendants keep their own openness, so collapsing and re-expanding
    /// restores exactly the rows that were visible before.
    ///
    /// A lazy node that is already open but has neither children nor a load
    /// in flight (for example because it is open by default) stays open and
    /// starts its load instead of collapsing.
    pub fn toggle<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
    ) -> Result<Toggled<Id>, StateRejection<Id>> {
        let node = Self::require(outline, id)?;
        let open = !node.is_open() || self.awaits_load(node);
        self.set_open(outline, id, open)
    }

    fn awaits_load<R: Record<Id = Id>>(&self, node: &OutlineNode<'_, R>) -> bool {
        node.is_open()
            && node.children().is_none()
            && node.flags().contains(NodeFlags::LAZY)
            && !self.loads.is_loading(node.id())
    }

    /// Starts loads for visible lazy nodes that are open without children.
    ///
    /// Nodes can end up in that state through the open resolver or
    /// [`OutlineConfig::open_by_default`](crate::OutlineConfig::open_by_default);
    /// call this after building an outline to fetch their children.
    pub fn start_pending_loads<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
    ) -> SmallVec<[LoadTicket<Id>; 1]> {
        let pending: SmallVec<[Id; 1]> = outline
            .iter()
            .filter(|&node| {
                (node.is_visible() || node.is_hidden_root()) && self.awaits_load(node)
            })
            .map(|node| node.id().clone())
            .collect();
        if !pending.is_empty() {
            self.bump();
        }
        pending.into_iter().map(|id| self.loads.begin(id)).collect()
    }

    /// Expands or collapses a node.
    ///
    /// Opening a node with unresolved lazy children starts a load; closing a
    /// node forgets its outstanding load.
    pub fn set_open<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
        open: bool,
    ) -> Result<Toggled<Id>, StateRejection<Id>> {
        let node = Self::require(outline, id)?;
        if node.is_leaf() {
            return Err(StateRejection::Leaf(id.clone()));
        }
        self.write_open(id, open);
        let needs_load = open && node.children().is_none() && !self.loads.is_loading(id);
        let load = needs_load.then(|| {
            self.bump();
            self.loads.begin(id.clone())
        });
        Ok(Toggled { open, load })
    }

    /// Expands `id`. Shorthand for [`set_open`](Self::set_open) with `true`.
    pub fn open<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
    ) -> Result<Toggled<Id>, StateRejection<Id>> {
        self.set_open(outline, id, true)
    }

    /// Collapses `id`. Shorthand for [`set_open`](Self::set_open) with `false`.
    pub fn close<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
    ) -> Result<Toggled<Id>, StateRejection<Id>> {
        self.set_open(outline, id, false)
    }

    /// Opens every closed ancestor of `id`. Returns `true` if anything changed.
    pub fn reveal<R: Record<Id = Id>>(&mut self, outline: &Outline<'_, R>, id: &Id) -> bool {
        let Some(idx) = outline.index_of(id) else {
            return false;
        };
        let mut changed = false;
        for ancestor in outline.ancestors(idx) {
            let node = &outline[ancestor];
            if !node.is_open() && !node.is_hidden_root() {
                changed |= self.write_open(node.id(), true);
            }
        }
        changed
    }

    /// Expands every node whose children are already resolved.
    pub fn open_all<R: Record<Id = Id>>(&mut self, outline: &Outline<'_, R>) {
        for node in outline.iter() {
            if node.children().is_some_and(|c| !c.is_empty()) {
                self.write_open(node.id(), true);
            }
        }
    }

    /// Collapses every node.
    pub fn close_all<R: Record<Id = Id>>(&mut self, outline: &Outline<'_, R>) {
        for node in outline.iter() {
            if node.is_expandable() {
                self.write_open(node.id(), false);
            }
        }
    }

    /// Opens the nodes a validated move asked to reveal.
    ///
    /// Revealed lazy nodes whose children are unresolved start loading, the
    /// same as when they are opened by hand; their tickets are returned.
    pub fn apply_reveal<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        plan: &MovePlan<Id>,
    ) -> SmallVec<[LoadTicket<Id>; 1]> {
        let mut loads = SmallVec::new();
        for id in &plan.reveal {
            match self.set_open(outline, id, true) {
                Ok(toggled) => loads.extend(toggled.load),
                Err(_) => {
                    self.write_open(id, true);
                }
            }
        }
        loads
    }

    /// Settles a lazy load.
    ///
    /// The result is applied only if the ticket is still current and the node is
    /// still open. A failure collapses the node and makes it non-expandable
    /// until a new load is started.
    pub fn finish_load<T, E>(
        &mut self,
        ticket: &LoadTicket<Id>,
        result: Result<T, E>,
    ) -> LoadResolution<T> {
        let id = ticket.id();
        if self.open_override(id) != Some(true) {
            self.loads.cancel(id);
            return LoadResolution::Stale;
        }
        let resolution = self.loads.finish(ticket, result);
        match resolution {
            LoadResolution::Failed => {
                self.write_open(id, false);
            }
            LoadResolution::Apply(_) => self.bump(),
            LoadResolution::Stale => {}
        }
        resolution
    }

    /// Makes `id` the only selected node. Returns `true` if the selection changed.
    pub fn select<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
    ) -> Result<bool, StateRejection<Id>> {
        Self::require(outline, id)?;
        if self.selected.as_ref() == Some(id) {
            return Ok(false);
        }
        self.selected = Some(id.clone());
        self.bump();
        Ok(true)
    }

    /// Clears the selection, returning the previously selected id.
    pub fn deselect(&mut self) -> Option<Id> {
        let previous = self.selected.take();
        if previous.is_some() {
            self.bump();
        }
        previous
    }

    /// The selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Id> {
        self.selected.as_ref()
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Starts renaming `id`, discarding any other rename in progress.
    pub fn edit<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        id: &Id,
    ) -> Result<(), StateRejection<Id>> {
        let node = Self::require(outline, id)?;
        self.editing = Some(EditSession {
            id: id.clone(),
            original: node.model().label().map(String::from),
        });
        self.bump();
        Ok(())
    }

    /// Ends the rename and returns the new name if it should be committed.
    ///
    /// Empty (or whitespace-only) and unchanged names are rejected. Either way
    /// the node leaves the editing state.
    pub fn submit(&mut self, value: &str) -> Result<Rename<Id>, StateRejection<Id>> {
        let session = self.editing.take().ok_or(StateRejection::NotEditing)?;
        self.bump();
        let name = value.trim();
        if name.is_empty() {
            return Err(StateRejection::EmptyName(session.id));
        }
        if session.original.as_deref() == Some(name) {
            return Err(StateRejection::UnchangedName(session.id));
        }
        Ok(Rename {
            id: session.id,
            name: String::from(name),
        })
    }

    /// Abandons the rename in progress, returning the node it was for.
    pub fn reset(&mut self) -> Option<Id> {
        let session = self.editing.take()?;
        self.bump();
        Some(session.id)
    }

    /// The rename in progress, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&EditSession<Id>> {
        self.editing.as_ref()
    }

    /// Returns `true` if `id` is being renamed.
    #[must_use]
    pub fn is_editing(&self, id: &Id) -> bool {
        self.editing.as_ref().is_some_and(|s| &s.id == id)
    }

    /// Starts dragging `ids`. Every node must exist and be draggable.
    pub fn drag_start<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        ids: &[Id],
    ) -> Result<(), StateRejection<Id>> {
        if ids.is_empty() {
            return Err(StateRejection::NothingDragged);
        }
        for id in ids {
            if !Self::require(outline, id)?.is_draggable() {
                return Err(StateRejection::NotDraggable(id.clone()));
            }
        }
        self.dragging.clear();
        for id in ids {
            if !self.dragging.contains(id) {
                self.dragging.push(id.clone());
            }
        }
        self.bump();
        Ok(())
    }

    /// Ends the drag by dropping on `target`.
    ///
    /// The drag ends whether or not the move is valid. On success the plan's
    /// reveal list is opened and the plan is returned for the owner to apply,
    /// together with any lazy loads the reveal started.
    pub fn drop_on<R: Record<Id = Id>>(
        &mut self,
        outline: &Outline<'_, R>,
        target: &MoveTarget<Id>,
    ) -> Result<Dropped<Id>, MoveRejection<Id>> {
        let dragged = core::mem::take(&mut self.dragging);
        self.bump();
        let plan = outline.plan_move(&dragged, target)?;
        let loads = self.apply_reveal(outline, &plan);
        Ok(Dropped { plan, loads })
    }

    /// Ends the drag without moving anything. Returns `false` if no drag was active.
    pub fn cancel_drag(&mut self) -> bool {
        if self.dragging.is_empty() {
            return false;
        }
        self.dragging.clear();
        self.bump();
        true
    }

    /// Nodes in the active drag.
    #[must_use]
    pub fn dragging(&self) -> &[Id] {
        &self.dragging
    }

    /// Returns `true` if `id` is part of the active drag.
    #[must_use]
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.dragging.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutlineConfig, SimpleNode};
    use alloc::vec;
    use alloc::vec::Vec;

    type Node = SimpleNode<u32>;

    fn data() -> Vec<Node> {
        vec![
            SimpleNode::folder(
                1,
                "one",
                vec![
                    SimpleNode::folder(2, "two", vec![SimpleNode::new(3, "three")]),
                    SimpleNode::new(4, "four"),
                ],
            ),
            SimpleNode::new(5, "five"),
            SimpleNode::new(6, "lazy").with_flag("lazy", true),
        ]
    }

    fn visible(data: &[Node], config: &OutlineConfig<Node>, state: &TreeState<u32>) -> Vec<u32> {
        Outline::from_forest(data, config, state)
            .visible()
            .map(|n| *n.id())
            .collect()
    }

    #[test]
    fn toggle_closed_keeps_descendant_openness() {
        let data = data();
        let config = OutlineConfig::new();
        let mut state = TreeState::new();

        let outline = Outline::from_forest(&data, &config, &state);
        state.toggle(&outline, &1).unwrap();
        let outline = Outline::from_forest(&data, &config, &state);
        state.toggle(&outline, &2).unwrap();
        assert_eq!(visible(&data, &config, &state), vec![1, 2, 3, 4, 5, 6]);

        let outline = Outline::from_forest(&data, &config, &state);
        assert!(!state.toggle(&outline, &1).unwrap().open);
        assert_eq!(visible(&data, &config, &state), vec![1, 5, 6]);
        assert_eq!(state.open_override(&2), Some(true));

        let outline = Outline::from_forest(&data, &config, &state);
        state.toggle(&outline, &1).unwrap();
        assert_eq!(visible(&data, &config, &state), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let data = data();
        let config = OutlineConfig::new();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        assert!(state.open(&outline, &1).unwrap().open);
        let revision = state.revision();
        state.open(&outline, &1).unwrap();
        assert_eq!(state.revision(), revision);
        assert!(!state.close(&outline, &1).unwrap().open);
        assert_eq!(visible(&data, &config, &state), vec![1, 5, 6]);
    }

    #[test]
    fn leaves_and_unknown_nodes_do_not_toggle() {
        let data = data();
        let config = OutlineConfig::new();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        assert_eq!(state.toggle(&outline, &5), Err(StateRejection::Leaf(5)));
        assert_eq!(state.toggle(&outline, &99), Err(StateRejection::UnknownNode(99)));
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn selection_is_a_singleton() {
        let data = data();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());

        assert_eq!(state.select(&outline, &1), Ok(true));
        assert_eq!(state.select(&outline, &5), Ok(true));
        assert_eq!(state.select(&outline, &5), Ok(false));
        assert!(!state.is_selected(&1));
        assert_eq!(state.selected(), Some(&5));
        assert_eq!(state.deselect(), Some(5));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn rename_rejects_empty_and_unchanged_names() {
        let data = data();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());

        state.edit(&outline, &4).unwrap();
        assert_eq!(state.editing().and_then(EditSession::original), Some("four"));
        assert_eq!(state.submit("   "), Err(StateRejection::EmptyName(4)));
        assert!(state.editing().is_none());

        state.edit(&outline, &4).unwrap();
        assert_eq!(state.submit("four"), Err(StateRejection::UnchangedName(4)));

        state.edit(&outline, &4).unwrap();
        assert_eq!(
            state.submit(" Four "),
            Ok(Rename {
                id: 4,
                name: "Four".into()
            })
        );
        assert_eq!(state.submit("again"), Err(StateRejection::NotEditing));
    }

    #[test]
    fn editing_is_a_singleton_and_reset_discards() {
        let data = data();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &OutlineConfig::new(), &TreeState::new());

        state.edit(&outline, &4).unwrap();
        state.edit(&outline, &5).unwrap();
        assert!(!state.is_editing(&4));
        assert!(state.is_editing(&5));
        assert_eq!(state.reset(), Some(5));
        assert_eq!(state.reset(), None);
    }

    #[test]
    fn drag_ends_on_drop_and_cancel() {
        let data = data();
        let config = OutlineConfig::new();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        state.drag_start(&outline, &[5]).unwrap();
        assert!(state.is_dragging(&5));
        assert!(state.cancel_drag());
        assert!(!state.cancel_drag());

        state.drag_start(&outline, &[1]).unwrap();
        let rejected = state.drop_on(&outline, &MoveTarget::child_of(3));
        assert!(matches!(rejected, Err(MoveRejection::Cycle { .. })));
        assert!(state.dragging().is_empty());

        state.drag_start(&outline, &[5]).unwrap();
        let dropped = state.drop_on(&outline, &MoveTarget::child_of(2)).unwrap();
        assert_eq!(dropped.plan.reveal.as_slice(), &[1, 2]);
        assert!(dropped.loads.is_empty());
        assert_eq!(state.open_override(&1), Some(true));
        assert_eq!(state.open_override(&2), Some(true));
    }

    #[test]
    fn lazy_load_is_discarded_after_collapse() {
        let data = data();
        let config = OutlineConfig::new().with_lazy("lazy");
        let mut state = TreeState::new();

        let outline = Outline::from_forest(&data, &config, &state);
        let ticket = state.toggle(&outline, &6).unwrap().load.unwrap();
        let outline = Outline::from_forest(&data, &config, &state);
        assert!(outline.get(&6).unwrap().is_loading());

        state.toggle(&outline, &6).unwrap();
        assert_eq!(
            state.finish_load(&ticket, Ok::<_, ()>(vec![7_u32])),
            LoadResolution::Stale
        );
    }

    #[test]
    fn failed_lazy_load_collapses_and_disables_the_node() {
        let data = data();
        let config = OutlineConfig::new().with_lazy("lazy");
        let mut state = TreeState::new();

        let outline = Outline::from_forest(&data, &config, &state);
        let ticket = state.toggle(&outline, &6).unwrap().load.unwrap();
        assert_eq!(
            state.finish_load(&ticket, Err::<(), _>("timeout")),
            LoadResolution::Failed
        );
        assert_eq!(state.open_override(&6), Some(false));

        let outline = Outline::from_forest(&data, &config, &state);
        assert!(outline.get(&6).unwrap().is_leaf());
    }

    #[test]
    fn reveal_opens_closed_ancestors() {
        let data = data();
        let config = OutlineConfig::new();
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        assert!(state.reveal(&outline, &3));
        assert_eq!(visible(&data, &config, &state), vec![1, 2, 3, 4, 5, 6]);

        let outline = Outline::from_forest(&data, &config, &state);
        assert!(!state.reveal(&outline, &3));
        state.close_all(&outline);
        assert_eq!(visible(&data, &config, &state), vec![1, 5, 6]);
        state.open_all(&outline);
        assert_eq!(visible(&data, &config, &state), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn drop_into_closed_lazy_folder_starts_its_load() {
        let data = data();
        let config = OutlineConfig::new().with_lazy("lazy");
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        state.drag_start(&outline, &[5]).unwrap();
        let dropped = state.drop_on(&outline, &MoveTarget::child_of(6)).unwrap();
        assert_eq!(dropped.plan.reveal.as_slice(), &[6]);
        assert_eq!(dropped.loads.len(), 1);
        assert_eq!(dropped.loads[0].id(), &6);
        assert_eq!(state.open_override(&6), Some(true));
        assert!(state.loads().is_loading(&6));
    }

    #[test]
    fn default_open_lazy_node_loads_on_first_toggle() {
        let data = data();
        let config = OutlineConfig::new().with_lazy("lazy").open_by_default(true);
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);
        let lazy = outline.get(&6).unwrap();
        assert!(lazy.is_open());
        assert!(!lazy.is_loading());

        let toggled = state.toggle(&outline, &6).unwrap();
        assert!(toggled.open);
        assert_eq!(toggled.load.as_ref().map(LoadTicket::id), Some(&6));

        let outline = Outline::from_forest(&data, &config, &state);
        assert!(outline.get(&6).unwrap().is_loading());
        assert!(!state.toggle(&outline, &6).unwrap().open);
    }

    #[test]
    fn pending_loads_start_for_open_lazy_nodes() {
        let data = data();
        let config = OutlineConfig::new().with_lazy("lazy").open_by_default(true);
        let mut state = TreeState::new();
        let outline = Outline::from_forest(&data, &config, &state);

        let tickets = state.start_pending_loads(&outline);
        assert_eq!(tickets.iter().map(|t| *t.id()).collect::<Vec<_>>(), vec![6]);
        let revision = state.revision();

        let outline = Outline::from_forest(&data, &config, &state);
        assert!(outline.get(&6).unwrap().is_loading());
        assert!(state.start_pending_loads(&outline).is_empty());
        assert_eq!(state.revision(), revision);
    }
}
