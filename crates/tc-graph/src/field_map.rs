//! Type-erased, name-keyed snapshot.
//!
//! # Design
//!
//! Each field is stored as a `Box<dyn FieldValue>` in an `FxHashMap` keyed by
//! the field name.  Useful when the set of fields is open-ended (tests,
//! tooling, prototyping); production content defines a concrete struct and
//! implements [`Snapshot`] for it instead.
//!
//! # Usage
//!
//! ```rust
//! use tc_graph::{FieldMap, Snapshot, SnapshotBuilder};
//!
//! let mut b = FieldMap::builder();
//! b.set("ball_speed", 1.5_f64);
//! let snap = b.finish();
//! assert_eq!(snap.get::<f64>("ball_speed"), Some(&1.5));
//! assert_eq!(snap.get::<i64>("ball_speed"), None);
//! ```

use std::any::Any;

use rustc_hash::FxHashMap;

use crate::{Snapshot, SnapshotBuilder};

// ── Trait object ──────────────────────────────────────────────────────────────

/// Type-erased field value.
///
/// Sealed: only [`TypedField<T>`] implements it.
pub trait FieldValue: Send + Sync + 'static + sealed::Sealed {
    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

/// A `T` wrapped so it can be stored as `Box<dyn FieldValue>`.
pub struct TypedField<T: Send + Sync + 'static>(pub T);

impl<T: Send + Sync + 'static> sealed::Sealed for TypedField<T> {}

impl<T: Send + Sync + 'static> FieldValue for TypedField<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ── FieldMap ──────────────────────────────────────────────────────────────────

/// Immutable snapshot of named, heterogeneously typed fields.
#[derive(Default)]
pub struct FieldMap {
    fields: FxHashMap<&'static str, Box<dyn FieldValue>>,
}

impl FieldMap {
    /// Field `name` as a `T`.  `None` if absent or of another type.
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Option<&T> {
        self.fields
            .get(name)
            .and_then(|v| v.as_any().downcast_ref::<TypedField<T>>())
            .map(|v| &v.0)
    }

    /// `true` if a field called `name` exists, whatever its type.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in ascending order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.fields.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Snapshot for FieldMap {
    type Builder = FieldMapBuilder;

    fn builder() -> FieldMapBuilder {
        FieldMapBuilder::default()
    }
}

// ── FieldMapBuilder ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FieldMapBuilder {
    fields: FxHashMap<&'static str, Box<dyn FieldValue>>,
}

impl FieldMapBuilder {
    /// Set field `name`, replacing any earlier value.
    pub fn set<T: Send + Sync + 'static>(&mut self, name: &'static str, value: T) {
        self.fields.insert(name, Box::new(TypedField(value)));
    }
}

impl SnapshotBuilder for FieldMapBuilder {
    type Snapshot = FieldMap;

    fn finish(self) -> FieldMap {
        FieldMap { fields: self.fields }
    }
}
