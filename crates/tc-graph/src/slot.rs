//! Type-erased output storage, one slot per calculator.
//!
//! Each slot keeps the producer's current value, its declared idle value,
//! and a `fresh` flag cleared at the start of every tick.  A binding read
//! sees `current` only once the producer has settled this tick (ran, was
//! skipped, or failed); before that it sees `idle`.

use std::any::{Any, TypeId};

// ── Trait object ──────────────────────────────────────────────────────────────

pub(crate) trait AnySlot: 'static + sealed::Sealed {
    /// Mark the slot stale; called for every slot before the first unit runs.
    fn begin_tick(&mut self);

    /// Replace `current` with the idle value and mark the slot fresh.
    fn settle_idle(&mut self);

    /// Keep `current` as is but mark the slot fresh and failed.
    fn settle_failed(&mut self);

    fn is_fresh(&self) -> bool;

    fn is_failed(&self) -> bool;

    fn value_type(&self) -> TypeId;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete slot ─────────────────────────────────────────────────────────────

pub(crate) struct TypedSlot<T: Clone + 'static> {
    pub(crate) current: T,
    pub(crate) idle:    T,
    fresh:              bool,
    failed:             bool,
}

impl<T: Clone + 'static> TypedSlot<T> {
    pub(crate) fn new(idle: T) -> Self {
        Self { current: idle.clone(), idle, fresh: false, failed: false }
    }

    /// The value a binding observes right now.
    #[inline]
    pub(crate) fn read(&self) -> &T {
        if self.fresh { &self.current } else { &self.idle }
    }

    /// Store a freshly computed value.
    pub(crate) fn settle(&mut self, value: T) {
        self.current = value;
        self.fresh = true;
        self.failed = false;
    }
}

impl<T: Clone + 'static> sealed::Sealed for TypedSlot<T> {}

impl<T: Clone + 'static> AnySlot for TypedSlot<T> {
    fn begin_tick(&mut self) {
        self.fresh = false;
        self.failed = false;
    }

    fn settle_idle(&mut self) {
        self.current = self.idle.clone();
        self.fresh = true;
        self.failed = false;
    }

    fn settle_failed(&mut self) {
        self.fresh = true;
        self.failed = true;
    }

    fn is_fresh(&self) -> bool {
        self.fresh
    }

    fn is_failed(&self) -> bool {
        self.failed
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Downcast helper shared by the executor, the tick context, and connectors.
#[inline]
pub(crate) fn typed<T: Clone + 'static>(slot: &dyn AnySlot) -> Option<&TypedSlot<T>> {
    slot.as_any().downcast_ref::<TypedSlot<T>>()
}

#[inline]
pub(crate) fn typed_mut<T: Clone + 'static>(slot: &mut dyn AnySlot) -> Option<&mut TypedSlot<T>> {
    slot.as_any_mut().downcast_mut::<TypedSlot<T>>()
}
