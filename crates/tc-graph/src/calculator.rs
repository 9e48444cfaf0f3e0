//! The `Calculator` trait and the per-tick context it computes from.

use tc_config::{TunableChange, TunableTable};
use tc_core::Tick;

use crate::slot::{AnySlot, typed};
use crate::{Binding, CalcError, CalcResult};

// ── TickContext ───────────────────────────────────────────────────────────────

/// Read-only view handed to every calculator for one tick.
///
/// `W` is the world-state record, `S` the snapshot type.  `previous` is the
/// snapshot published at the end of the prior tick (`None` on the first).
pub struct TickContext<'a, W, S> {
    pub tick:     Tick,
    pub world:    &'a W,
    pub previous: Option<&'a S>,
    pub tunables: &'a TunableTable,
    slots:        &'a [Box<dyn AnySlot>],
}

impl<'a, W, S> TickContext<'a, W, S> {
    pub(crate) fn new(
        tick:     Tick,
        world:    &'a W,
        previous: Option<&'a S>,
        tunables: &'a TunableTable,
        slots:    &'a [Box<dyn AnySlot>],
    ) -> Self {
        Self { tick, world, previous, tunables, slots }
    }

    /// Current value of a bound input.
    ///
    /// Returns the producer's value for this tick if it has already settled
    /// this tick, otherwise its idle value.
    pub fn input<T: Clone + 'static>(&self, binding: &Binding<T>) -> CalcResult<&'a T> {
        self.slots
            .get(binding.slot)
            .and_then(|slot| typed::<T>(slot.as_ref()))
            .map(|slot| slot.read())
            .ok_or(CalcError::MissingInput { slot: binding.slot })
    }
}

// ── Calculator ────────────────────────────────────────────────────────────────

/// One unit of per-tick analysis.
///
/// # Lifecycle
///
/// ```text
/// start ─► [ needs_to_run ? compute : reset ]* ─► stop
/// ```
///
/// `start` and `stop` are called once each.  Every tick, `compute` runs if
/// `needs_to_run` is `true`; otherwise `reset` runs and the unit's output
/// becomes [`idle`][Self::idle].
///
/// # Failure
///
/// An `Err` from `compute` (or a panic) is logged by the executor; the
/// unit's output keeps its last good value and the other units still run.
///
/// # Example
///
/// ```rust
/// use tc_graph::{Binding, CalcResult, Calculator, TickContext};
///
/// struct Doubled {
///     input: Binding<i64>,
/// }
///
/// impl<W, S> Calculator<W, S> for Doubled {
///     type Output = i64;
///
///     fn compute(&mut self, ctx: &TickContext<'_, W, S>) -> CalcResult<i64> {
///         Ok(ctx.input(&self.input)? * 2)
///     }
/// }
/// ```
pub trait Calculator<W, S>: 'static {
    type Output: Clone + Default + 'static;

    /// Type tag used in logs and execution reports.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Called once when the owning team context becomes active.
    fn start(&mut self, _tunables: &TunableTable) {}

    fn needs_to_run(&self, _ctx: &TickContext<'_, W, S>) -> bool {
        true
    }

    fn compute(&mut self, ctx: &TickContext<'_, W, S>) -> CalcResult<Self::Output>;

    /// The output published whenever the unit is skipped.
    fn idle(&self) -> Self::Output {
        Self::Output::default()
    }

    /// Clear private state.  Called on every skipped tick.
    fn reset(&mut self) {}

    /// Called once at shutdown.
    fn stop(&mut self) {}

    /// Called after the tick driver applied tunable changes, before the next
    /// `compute`.
    fn on_tunables_changed(&mut self, _changes: &[TunableChange]) {}
}

/// Last path segment of `T`'s type name, generics included.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}
