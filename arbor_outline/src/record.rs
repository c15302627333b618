// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only contract between an outline and the caller's records.

use core::fmt::Debug;
use core::hash::Hash;

/// A caller-owned record that an [`Outline`](crate::Outline) can read.
///
/// The outline never mutates records. It reads an identifier, and optionally a
/// display label and named fields so that [`Resolver::Field`](crate::Resolver::Field)
/// and [`ChildrenAccessor::Field`](crate::ChildrenAccessor::Field) can be used
/// instead of closures.
///
/// Named-field lookups return `None` when the record has no such field. The
/// outline then falls back to the resolver's default rather than failing.
pub trait Record {
    /// Identifier type. Must be unique within one tree and stable across rebuilds.
    type Id: Clone + Eq + Hash + Debug;

    /// Returns this record's identifier.
    fn id(&self) -> Self::Id;

    /// Returns the current display name, used as the baseline for inline rename.
    fn label(&self) -> Option<&str> {
        None
    }

    /// Looks up a boolean field by name.
    fn flag(&self, _field: &str) -> Option<bool> {
        None
    }

    /// Looks up a child sequence by field name.
    ///
    /// `None` means the record has no such field, or its children are not
    /// resolved yet. `Some(&[])` is a resolved, empty child list.
    fn children_field(&self, _field: &str) -> Option<&[Self]>
    where
        Self: Sized,
    {
        None
    }
}
