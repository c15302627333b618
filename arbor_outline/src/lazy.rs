// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for on-demand child loads.
//!
//! A load is identified by a [`LoadTicket`] carrying a generation number.
//! Starting a new load for the same node, or closing the node, makes older
//! tickets stale; a stale result is discarded instead of being applied. The
//! in-flight operation itself is never cancelled, only ignored.

use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Handle for one outstanding child load.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadTicket<Id> {
    id: Id,
    generation: u64,
}

impl<Id> LoadTicket<Id> {
    /// The node whose children are being loaded.
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Generation this ticket was issued at.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What to do with a finished load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadResolution<T> {
    /// The result is current: insert these children, then rebuild.
    Apply(T),
    /// The node was closed or reloaded meanwhile; drop the result.
    Stale,
    /// The load failed; the node is now collapsed and not expandable.
    Failed,
}

/// Tracks outstanding and failed child loads per node.
#[derive(Debug, Clone)]
pub struct LoadTracker<Id> {
    pending: HashMap<Id, u64>,
    failed: HashSet<Id>,
    generation: u64,
}

impl<Id> Default for LoadTracker<Id> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            failed: HashSet::new(),
            generation: 0,
        }
    }
}

impl<Id: Clone + Eq + Hash> LoadTracker<Id> {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a load for `id`, superseding any earlier one, and clears a
    /// previous failure.
    pub fn begin(&mut self, id: Id) -> LoadTicket<Id> {
        self.generation = self.generation.wrapping_add(1);
        self.failed.remove(&id);
        self.pending.insert(id.clone(), self.generation);
        LoadTicket {
            id,
            generation: self.generation,
        }
    }

    /// Forgets the outstanding load for `id`, making its ticket stale.
    pub fn cancel(&mut self, id: &Id) -> bool {
        self.pending.remove(id).is_some()
    }

    /// Returns `true` while a load for `id` is outstanding.
    #[must_use]
    pub fn is_loading(&self, id: &Id) -> bool {
        self.pending.contains_key(id)
    }

    /// Returns `true` if the last load for `id` failed.
    #[must_use]
    pub fn has_failed(&self, id: &Id) -> bool {
        self.failed.contains(id)
    }

    /// Returns `true` if `ticket` is the newest outstanding load for its node.
    #[must_use]
    pub fn is_current(&self, ticket: &LoadTicket<Id>) -> bool {
        self.pending.get(&ticket.id) == Some(&ticket.generation)
    }

    /// Settles a load. Stale tickets leave the tracker untouched.
    pub(crate) fn finish<T, E>(
        &mut self,
        ticket: &LoadTicket<Id>,
        result: Result<T, E>,
    ) -> LoadResolution<T> {
        if !self.is_current(ticket) {
            return LoadResolution::Stale;
        }
        self.pending.remove(&ticket.id);
        match result {
            Ok(children) => LoadResolution::Apply(children),
            Err(_) => {
                self.failed.insert(ticket.id.clone());
                LoadResolution::Failed
            }
        }
    }
}
