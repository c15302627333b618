// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolvers: per-record predicates and child accessors supplied either as a
//! closure or as a named field.
//!
//! A resolver is compiled once per enrichment pass into a single boxed callable,
//! so the per-node loop never branches on how the caller configured it.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use crate::record::Record;

/// A boolean predicate over a record.
///
/// ```
/// use arbor_outline::{Resolver, SimpleNode};
///
/// let by_field: Resolver<SimpleNode<u32>> = Resolver::field("isOpen");
/// let by_fn = Resolver::from_fn(|n: &SimpleNode<u32>| n.name.starts_with('_'));
/// let always: Resolver<SimpleNode<u32>> = true.into();
/// # let _ = (by_field, by_fn, always);
/// ```
pub enum Resolver<R> {
    /// The same value for every record.
    Const(bool),
    /// Read a boolean field via [`Record::flag`]. Missing fields yield the default.
    Field(Cow<'static, str>),
    /// Evaluate a caller-supplied function.
    Fn(Box<dyn Fn(&R) -> bool>),
}

impl<R> Resolver<R> {
    /// Creates a field-name resolver.
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field(name.into())
    }

    /// Creates a function resolver.
    pub fn from_fn(f: impl Fn(&R) -> bool + 'static) -> Self {
        Self::Fn(Box::new(f))
    }
}

impl<R> From<bool> for Resolver<R> {
    fn from(value: bool) -> Self {
        Self::Const(value)
    }
}

impl<R> From<&'static str> for Resolver<R> {
    fn from(name: &'static str) -> Self {
        Self::Field(Cow::Borrowed(name))
    }
}

impl<R> fmt::Debug for Resolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

pub(crate) type Predicate<'c, R> = Box<dyn Fn(&R) -> bool + 'c>;

impl<R: Record> Resolver<R> {
    /// Folds the variant into one callable. `default` covers missing fields.
    pub(crate) fn compile(&self, default: bool) -> Predicate<'_, R> {
        match self {
            Self::Const(v) => {
                let v = *v;
                Box::new(move |_: &R| v)
            }
            Self::Field(name) => Box::new(move |r: &R| r.flag(name).unwrap_or(default)),
            Self::Fn(f) => Box::new(move |r: &R| f(r)),
        }
    }
}

/// Resolves the ordered children of a record.
///
/// Returning `None` means "no children capability" or "not resolved yet";
/// returning an empty slice means a resolved leaf.
pub enum ChildrenAccessor<R> {
    /// Read a child sequence via [`Record::children_field`].
    Field(Cow<'static, str>),
    /// Evaluate a caller-supplied function.
    Fn(Box<dyn for<'r> Fn(&'r R) -> Option<&'r [R]>>),
}

impl<R> ChildrenAccessor<R> {
    /// Creates a field-name accessor.
    pub fn field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Field(name.into())
    }

    /// Creates a function accessor.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: for<'r> Fn(&'r R) -> Option<&'r [R]> + 'static,
    {
        Self::Fn(Box::new(f))
    }
}

impl<R> Default for ChildrenAccessor<R> {
    fn default() -> Self {
        Self::Field(Cow::Borrowed("children"))
    }
}

impl<R> fmt::Debug for ChildrenAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

pub(crate) type ChildrenFn<'c, R> = Box<dyn for<'r> Fn(&'r R) -> Option<&'r [R]> + 'c>;

// Pins the higher-ranked signature so closures returning borrows infer cleanly.
fn children_fn<'c, R, F>(f: F) -> ChildrenFn<'c, R>
where
    F: for<'r> Fn(&'r R) -> Option<&'r [R]> + 'c,
{
    Box::new(f)
}

impl<R: Record> ChildrenAccessor<R> {
    pub(crate) fn compile(&self) -> ChildrenFn<'_, R> {
        match self {
            Self::Field(name) => children_fn(move |r: &R| r.children_field(name)),
            Self::Fn(f) => children_fn(move |r: &R| f(r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimpleNode;
    use alloc::vec;

    #[test]
    fn field_resolver_reads_flag_and_falls_back() {
        let node = SimpleNode::new(1_u32, "a").with_flag("pinned", true);
        let pinned: Resolver<SimpleNode<u32>> = Resolver::field("pinned");
        let missing: Resolver<SimpleNode<u32>> = Resolver::field("nope");

        assert!(pinned.compile(false)(&node));
        assert!(!missing.compile(false)(&node));
        assert!(missing.compile(true)(&node));
    }

    #[test]
    fn fn_and_const_resolvers_ignore_default() {
        let node = SimpleNode::new(7_u32, "seven");
        let odd = Resolver::from_fn(|n: &SimpleNode<u32>| n.id % 2 == 1);
        let never: Resolver<SimpleNode<u32>> = false.into();

        assert!(odd.compile(false)(&node));
        assert!(!never.compile(true)(&node));
    }

    #[test]
    fn children_accessor_by_field_and_fn() {
        let folder = SimpleNode::folder(1_u32, "f", vec![SimpleNode::new(2, "x")]);
        let leaf = SimpleNode::new(3_u32, "y");

        let by_field = ChildrenAccessor::<SimpleNode<u32>>::default();
        let get = by_field.compile();
        assert_eq!(get(&folder).map(<[_]>::len), Some(1));
        assert!(get(&leaf).is_none());

        let wrong_field = ChildrenAccessor::<SimpleNode<u32>>::field("kids");
        assert!(wrong_field.compile()(&folder).is_none());

        let by_fn = ChildrenAccessor::from_fn(|n: &SimpleNode<u32>| n.children.as_deref());
        assert_eq!(by_fn.compile()(&folder).map(<[_]>::len), Some(1));
    }
}
