//! Output handles, input bindings, and the per-registration [`Wiring`] recorder.
//!
//! An [`Output<T>`] is what registration hands back: a typed handle to the
//! producer's slot.  A consumer turns it into a [`Binding<T>`] inside its
//! registration closure with [`Wiring::bind`], and reads it every tick with
//! [`TickContext::input`][crate::TickContext::input].  Bindings are fixed once
//! the closure returns.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

// ── Output ────────────────────────────────────────────────────────────────────

/// Read-only handle to one calculator's output.
pub struct Output<T> {
    pub(crate) slot: usize,
    _marker:         PhantomData<fn() -> T>,
}

impl<T> Output<T> {
    pub(crate) fn new(slot: usize) -> Self {
        Self { slot, _marker: PhantomData }
    }

    /// Index of the underlying slot (allocation order, not run order).
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Output<T> {}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Output(slot {})", self.slot)
    }
}

// ── Binding ───────────────────────────────────────────────────────────────────

/// A consumer's input, bound to a producer's [`Output`] at construction.
pub struct Binding<T> {
    pub(crate) slot: usize,
    _marker:         PhantomData<fn() -> T>,
}

impl<T> Binding<T> {
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Binding<T> {}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding(slot {})", self.slot)
    }
}

// ── Reservation ───────────────────────────────────────────────────────────────

/// An output slot allocated before its producer is registered.
///
/// Binding to [`output`][Self::output] before calling
/// [`GraphBuilder::register_reserved`][crate::GraphBuilder::register_reserved]
/// creates a binding that points *forward* in the run order.
#[must_use = "a reservation must be fulfilled with register_reserved"]
pub struct Reservation<T> {
    pub(crate) output: Output<T>,
    pub(crate) name:   &'static str,
}

impl<T> Reservation<T> {
    #[inline]
    pub fn output(&self) -> Output<T> {
        self.output
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// One input edge recorded during registration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct BindingRecord {
    pub(crate) slot:       usize,
    /// `false` if the slot does not exist or holds another type.
    pub(crate) type_known: bool,
}

/// Records the bindings a calculator makes while it is being constructed.
pub struct Wiring<'a> {
    slot_types: &'a [TypeId],
    records:    Vec<BindingRecord>,
}

impl<'a> Wiring<'a> {
    pub(crate) fn new(slot_types: &'a [TypeId]) -> Self {
        Self { slot_types, records: Vec::new() }
    }

    /// Bind to `output` as an input of the calculator being constructed.
    pub fn bind<T: 'static>(&mut self, output: &Output<T>) -> Binding<T> {
        let type_known = self.slot_types.get(output.slot) == Some(&TypeId::of::<T>());
        self.records.push(BindingRecord { slot: output.slot, type_known });
        Binding { slot: output.slot, _marker: PhantomData }
    }

    /// Number of bindings made so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_records(self) -> Vec<BindingRecord> {
        self.records
    }
}
