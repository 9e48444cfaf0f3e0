//! Snapshot assembly: the builder traits and the connector registry.
//!
//! A connector pairs one snapshot field with one producer's output.  After
//! every unit has settled, [`Graph::build_snapshot`][crate::Graph::build_snapshot]
//! starts a fresh builder, applies the connectors in registration order, and
//! consumes the builder with [`SnapshotBuilder::finish`].  Since `finish`
//! takes the builder by value, it cannot be written to afterwards.

use crate::slot::{AnySlot, typed};

/// An immutable per-tick aggregate of calculator outputs.
pub trait Snapshot: Sized + 'static {
    type Builder: SnapshotBuilder<Snapshot = Self>;

    /// A builder with every field at its default.
    fn builder() -> Self::Builder;
}

/// Mutable staging area for one [`Snapshot`].
pub trait SnapshotBuilder: 'static {
    type Snapshot;

    fn finish(self) -> Self::Snapshot;
}

// ── Connectors ────────────────────────────────────────────────────────────────

type Apply<B> = Box<dyn Fn(&mut B, &dyn AnySlot)>;

/// One `{ field, producer }` entry of the connector registry.
pub(crate) struct Connector<B> {
    pub(crate) field: &'static str,
    pub(crate) slot:  usize,
    apply:            Apply<B>,
}

impl<B: 'static> Connector<B> {
    pub(crate) fn new<T, F>(field: &'static str, slot: usize, setter: F) -> Self
    where
        T: Clone + 'static,
        F: Fn(&mut B, T) + 'static,
    {
        let apply = move |builder: &mut B, slot: &dyn AnySlot| {
            if let Some(slot) = typed::<T>(slot) {
                setter(builder, slot.current.clone());
            }
        };
        Self { field, slot, apply: Box::new(apply) }
    }

    #[inline]
    pub(crate) fn apply(&self, builder: &mut B, slot: &dyn AnySlot) {
        (self.apply)(builder, slot);
    }
}

/// Introspection record for one connector.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ConnectorInfo {
    pub field:    &'static str,
    pub producer: &'static str,
}
