// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedder-facing controller: boolean interaction calls plus change callbacks.

use crate::config::OutlineConfig;
use crate::lazy::{LoadResolution, LoadTicket};
use crate::moves::{MovePlan, MoveTarget};
use crate::outline::Outline;
use crate::record::Record;
use crate::state::{Rename, TreeState};

/// Callbacks fired after an interaction is accepted.
///
/// The controller never mutates records. Moves, renames and finished loads
/// are reported here for the owner of the data to persist, after which the
/// embedder rebuilds its [`Outline`]. Every method defaults to a no-op.
pub trait TreeHandlers<Id> {
    /// A move was validated. Apply it, then rebuild.
    fn on_move(&mut self, _plan: &MovePlan<Id>) {}

    /// A rename was committed.
    fn on_rename(&mut self, _rename: &Rename<Id>) {}

    /// A node was expanded or collapsed.
    fn on_toggle(&mut self, _id: &Id, _open: bool) {}

    /// A node was selected.
    fn on_select(&mut self, _id: &Id) {}

    /// A lazy node was opened and needs its children.
    ///
    /// Start the fetch and hand its outcome to [`TreeController::finish_load`]
    /// together with this ticket.
    fn on_load_children(&mut self, _ticket: &LoadTicket<Id>) {}
}

impl<Id> TreeHandlers<Id> for () {}

/// Owns the configuration, interaction state and handlers for one tree.
///
/// Every interaction returns `true` when it was accepted, in which case the
/// matching handler has already been called. Rejections are logged at debug
/// level and leave the handlers untouched.
#[derive(Debug)]
pub struct TreeController<R: Record, H> {
    config: OutlineConfig<R>,
    state: TreeState<R::Id>,
    handlers: H,
}

impl<R: Record, H: TreeHandlers<R::Id>> TreeController<R, H> {
    /// Creates a controller with fresh interaction state.
    pub fn new(config: OutlineConfig<R>, handlers: H) -> Self {
        Self {
            config,
            state: TreeState::new(),
            handlers,
        }
    }

    /// The enrichment configuration.
    #[must_use]
    pub fn config(&self) -> &OutlineConfig<R> {
        &self.config
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &TreeState<R::Id> {
        &self.state
    }

    /// Direct access to the interaction state, for the structured APIs.
    pub fn state_mut(&mut self) -> &mut TreeState<R::Id> {
        &mut self.state
    }

    /// The handlers.
    #[must_use]
    pub fn handlers(&self) -> &H {
        &self.handlers
    }

    /// The handlers, mutably.
    pub fn handlers_mut(&mut self) -> &mut H {
        &mut self.handlers
    }

    /// Enriches a forest with the current configuration and state.
    #[must_use]
    pub fn outline<'a>(&self, records: &'a [R]) -> Outline<'a, R> {
        Outline::from_forest(records, &self.config, &self.state)
    }

    /// Enriches a single-root tree with the current configuration and state.
    #[must_use]
    pub fn outline_rooted<'a>(&self, root: &'a R) -> Outline<'a, R> {
        Outline::from_root(root, &self.config, &self.state)
    }

    /// Expands or collapses `id`, requesting its children if they are lazy.
    pub fn toggle(&mut self, outline: &Outline<'_, R>, id: &R::Id) -> bool {
        match self.state.toggle(outline, id) {
            Ok(toggled) => {
                self.handlers.on_toggle(id, toggled.open);
                if let Some(ticket) = &toggled.load {
                    self.handlers.on_load_children(ticket);
                }
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "toggle rejected");
                false
            }
        }
    }

    /// Selects `id`.
    pub fn select(&mut self, outline: &Outline<'_, R>, id: &R::Id) -> bool {
        match self.state.select(outline, id) {
            Ok(_) => {
                self.handlers.on_select(id);
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "select rejected");
                false
            }
        }
    }

    /// Starts renaming `id`.
    pub fn edit(&mut self, outline: &Outline<'_, R>, id: &R::Id) -> bool {
        match self.state.edit(outline, id) {
            Ok(()) => true,
            Err(rejection) => {
                tracing::debug!(%rejection, "edit rejected");
                false
            }
        }
    }

    /// Commits the rename in progress.
    pub fn submit(&mut self, value: &str) -> bool {
        match self.state.submit(value) {
            Ok(rename) => {
                self.handlers.on_rename(&rename);
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "rename rejected");
                false
            }
        }
    }

    /// Abandons the rename in progress.
    pub fn reset(&mut self) -> bool {
        self.state.reset().is_some()
    }

    /// Starts dragging `ids`.
    pub fn drag_start(&mut self, outline: &Outline<'_, R>, ids: &[R::Id]) -> bool {
        match self.state.drag_start(outline, ids) {
            Ok(()) => true,
            Err(rejection) => {
                tracing::debug!(%rejection, "drag rejected");
                false
            }
        }
    }

    /// Drops the active drag on `target`.
    ///
    /// Revealing an unresolved lazy destination requests its children after
    /// the move is reported.
    pub fn drop_on(&mut self, outline: &Outline<'_, R>, target: &MoveTarget<R::Id>) -> bool {
        match self.state.drop_on(outline, target) {
            Ok(dropped) => {
                self.handlers.on_move(&dropped.plan);
                for ticket in &dropped.loads {
                    self.handlers.on_load_children(ticket);
                }
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "drop rejected");
                false
            }
        }
    }

    /// Ends the active drag without moving anything.
    pub fn cancel_drag(&mut self) -> bool {
        self.state.cancel_drag()
    }

    /// Moves `ids` directly, without a drag gesture.
    pub fn move_nodes(
        &mut self,
        outline: &Outline<'_, R>,
        ids: &[R::Id],
        target: &MoveTarget<R::Id>,
    ) -> bool {
        match outline.plan_move(ids, target) {
            Ok(plan) => {
                let loads = self.state.apply_reveal(outline, &plan);
                self.handlers.on_move(&plan);
                for ticket in &loads {
                    self.handlers.on_load_children(ticket);
                }
                true
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "move rejected");
                false
            }
        }
    }

    /// Requests children for visible lazy nodes that are open without any.
    ///
    /// Call after building an outline in which nodes may start open, such as
    /// with [`OutlineConfig::open_by_default`]. Returns the number of loads
    /// started.
    pub fn load_open_nodes(&mut self, outline: &Outline<'_, R>) -> usize {
        let loads = self.state.start_pending_loads(outline);
        for ticket in &loads {
            self.handlers.on_load_children(ticket);
        }
        loads.len()
    }

    /// Settles a lazy load started through [`TreeHandlers::on_load_children`].
    ///
    /// On [`LoadResolution::Apply`] the caller inserts the children into its
    /// records and rebuilds.
    pub fn finish_load<T, E>(
        &mut self,
        ticket: &LoadTicket<R::Id>,
        result: Result<T, E>,
    ) -> LoadResolution<T> {
        let resolution = self.state.finish_load(ticket, result);
        match &resolution {
            LoadResolution::Stale => tracing::debug!(id = ?ticket.id(), "discarded stale load"),
            LoadResolution::Failed => tracing::debug!(id = ?ticket.id(), "child load failed"),
            LoadResolution::Apply(_) => {}
        }
        resolution
    }
}
