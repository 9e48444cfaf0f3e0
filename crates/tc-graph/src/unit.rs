//! Type erasure for registered calculators.

use tc_config::{TunableChange, TunableTable};

use crate::slot::{AnySlot, typed_mut};
use crate::wiring::BindingRecord;
use crate::{CalcResult, Calculator, TickContext};

/// Object-safe face of a [`Calculator`] whose output type has been erased.
pub(crate) trait ErasedUnit<W, S> {
    fn name(&self) -> &'static str;

    fn start(&mut self, tunables: &TunableTable);

    /// Run `compute` if needed, else `reset`.  `Ok(true)` means a value is
    /// pending for [`commit`][Self::commit].
    fn step(&mut self, ctx: &TickContext<'_, W, S>) -> CalcResult<bool>;

    /// Move the pending value into the unit's slot.
    fn commit(&mut self, slot: &mut dyn AnySlot);

    /// Drop any pending value after a failure.
    fn discard(&mut self);

    fn stop(&mut self);

    fn on_tunables_changed(&mut self, changes: &[TunableChange]);
}

pub(crate) struct UnitCell<C, O> {
    calc:    C,
    pending: Option<O>,
}

impl<C, O> UnitCell<C, O> {
    pub(crate) fn new(calc: C) -> Self {
        Self { calc, pending: None }
    }
}

impl<W, S, C> ErasedUnit<W, S> for UnitCell<C, <C as Calculator<W, S>>::Output>
where
    C: Calculator<W, S>,
{
    fn name(&self) -> &'static str {
        self.calc.name()
    }

    fn start(&mut self, tunables: &TunableTable) {
        self.calc.start(tunables);
    }

    fn step(&mut self, ctx: &TickContext<'_, W, S>) -> CalcResult<bool> {
        if self.calc.needs_to_run(ctx) {
            self.pending = Some(self.calc.compute(ctx)?);
            Ok(true)
        } else {
            self.calc.reset();
            Ok(false)
        }
    }

    fn commit(&mut self, slot: &mut dyn AnySlot) {
        if let (Some(value), Some(slot)) = (self.pending.take(), typed_mut::<C::Output>(slot)) {
            slot.settle(value);
        }
    }

    fn discard(&mut self) {
        self.pending = None;
    }

    fn stop(&mut self) {
        self.calc.stop();
    }

    fn on_tunables_changed(&mut self, changes: &[TunableChange]) {
        self.calc.on_tunables_changed(changes);
    }
}

/// A registered unit in run order.
pub(crate) struct UnitEntry<W, S> {
    pub(crate) name:   &'static str,
    pub(crate) cell:   Box<dyn ErasedUnit<W, S>>,
    pub(crate) slot:   usize,
    pub(crate) inputs: Vec<BindingRecord>,
}
