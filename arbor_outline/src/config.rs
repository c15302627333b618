// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enrichment configuration.

use alloc::boxed::Box;

use crate::record::Record;
use crate::resolver::{ChildrenAccessor, ChildrenFn, Predicate, Resolver};

/// How an [`Outline`](crate::Outline) reads children and per-record flags.
///
/// Every setting has a default, so `OutlineConfig::default()` already works for
/// records that expose a `children` field:
///
/// | Setting | Default | Fallback for a missing field |
/// |---|---|---|
/// | children | field `"children"` | no children |
/// | open | `open_by_default` | `open_by_default` |
/// | draggable | `true` | `true` |
/// | droppable | `true` | `true` |
/// | lazy | `false` | `false` |
/// | `hide_root` | `true` | n/a |
///
/// ```
/// use arbor_outline::{OutlineConfig, Resolver, SimpleNode};
///
/// let config = OutlineConfig::<SimpleNode<u32>>::new()
///     .with_open("isOpen")
///     .with_droppable(Resolver::from_fn(|n: &SimpleNode<u32>| n.children.is_some()))
///     .open_by_default(false);
/// assert!(config.hides_root());
/// ```
#[derive(Debug)]
pub struct OutlineConfig<R> {
    children: ChildrenAccessor<R>,
    open: Option<Resolver<R>>,
    draggable: Resolver<R>,
    droppable: Resolver<R>,
    lazy: Resolver<R>,
    open_by_default: bool,
    hide_root: bool,
}

impl<R> Default for OutlineConfig<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> OutlineConfig<R> {
    /// Creates a configuration with the documented defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: ChildrenAccessor::default(),
            open: None,
            draggable: Resolver::Const(true),
            droppable: Resolver::Const(true),
            lazy: Resolver::Const(false),
            open_by_default: false,
            hide_root: true,
        }
    }

    /// Sets how children are resolved.
    #[must_use]
    pub fn with_children(mut self, children: impl Into<ChildrenAccessor<R>>) -> Self {
        self.children = children.into();
        self
    }

    /// Sets the openness predicate. Session toggles still take precedence.
    #[must_use]
    pub fn with_open(mut self, open: impl Into<Resolver<R>>) -> Self {
        self.open = Some(open.into());
        self
    }

    /// Sets the drag-source eligibility predicate.
    #[must_use]
    pub fn with_draggable(mut self, draggable: impl Into<Resolver<R>>) -> Self {
        self.draggable = draggable.into();
        self
    }

    /// Sets the drop-target eligibility predicate.
    #[must_use]
    pub fn with_droppable(mut self, droppable: impl Into<Resolver<R>>) -> Self {
        self.droppable = droppable.into();
        self
    }

    /// Marks records whose unresolved children should be loaded on demand.
    ///
    /// Only consulted when the children accessor returns `None`.
    #[must_use]
    pub fn with_lazy(mut self, lazy: impl Into<Resolver<R>>) -> Self {
        self.lazy = lazy.into();
        self
    }

    /// Openness used when no open predicate is set, or its field is missing.
    #[must_use]
    pub fn open_by_default(mut self, open: bool) -> Self {
        self.open_by_default = open;
        self
    }

    /// Whether a single root record is excluded from row numbering.
    ///
    /// Only applies to [`Outline::from_root`](crate::Outline::from_root); the
    /// implicit root of a forest is always hidden.
    #[must_use]
    pub fn hide_root(mut self, hide: bool) -> Self {
        self.hide_root = hide;
        self
    }

    /// Returns the default openness.
    #[must_use]
    pub fn is_open_by_default(&self) -> bool {
        self.open_by_default
    }

    /// Returns `true` if a single root record is hidden.
    #[must_use]
    pub fn hides_root(&self) -> bool {
        self.hide_root
    }
}

impl<R> From<&'static str> for ChildrenAccessor<R> {
    fn from(name: &'static str) -> Self {
        Self::field(name)
    }
}

/// The configuration folded into plain callables for one enrichment pass.
pub(crate) struct Compiled<'c, R> {
    pub(crate) children: ChildrenFn<'c, R>,
    pub(crate) open: Predicate<'c, R>,
    pub(crate) draggable: Predicate<'c, R>,
    pub(crate) droppable: Predicate<'c, R>,
    pub(crate) lazy: Predicate<'c, R>,
}

impl<R: Record> OutlineConfig<R> {
    pub(crate) fn compile(&self) -> Compiled<'_, R> {
        let open = match &self.open {
            Some(resolver) => resolver.compile(self.open_by_default),
            None => {
                let open = self.open_by_default;
                Box::new(move |_: &R| open)
            }
        };
        Compiled {
            children: self.children.compile(),
            open,
            draggable: self.draggable.compile(true),
            droppable: self.droppable.compile(true),
            lazy: self.lazy.compile(false),
        }
    }
}
