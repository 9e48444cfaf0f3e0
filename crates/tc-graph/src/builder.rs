//! Fluent construction of a [`Graph`] plus the wiring-order validator.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, error, info, warn};

use crate::slot::{AnySlot, TypedSlot};
use crate::snapshot::Connector;
use crate::unit::{UnitCell, UnitEntry};
use crate::{
    Calculator, FieldMap, FieldMapBuilder, Graph, GraphError, GraphResult, Output, Reservation,
    Snapshot, Wiring,
};

// ── WiringViolation ───────────────────────────────────────────────────────────

/// A binding whose producer does not run strictly before its consumer.
///
/// Such a consumer always reads the producer's idle value.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct WiringViolation {
    pub consumer:     &'static str,
    pub consumer_pos: usize,
    pub producer:     &'static str,
    pub producer_pos: usize,
}

impl fmt::Display for WiringViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}) binds {} (#{}), which does not run before it",
            self.consumer, self.consumer_pos, self.producer, self.producer_pos
        )
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Graph<W, S>`].
///
/// Registration order is run order.  A calculator may only bind outputs that
/// were handed out before it, so in the common case the order is correct by
/// construction.  [`reserve`][Self::reserve] is the one way to bind ahead;
/// [`build`][Self::build] rejects any binding that ends up pointing forward.
///
/// # Example
///
/// ```rust,ignore
/// let mut b = GraphBuilder::<WorldFrame, FieldMap>::new();
/// let dist = b.register(|_| BotToBallDistanceCalc::default());
/// let poss = b.register(|w| BallPossessionCalc::new(w.bind(&dist)));
/// b.connect_field("possession", &poss);
/// let mut graph = b.build()?;
/// ```
pub struct GraphBuilder<W, S: Snapshot> {
    units:      Vec<UnitEntry<W, S>>,
    slots:      Vec<Option<Box<dyn AnySlot>>>,
    slot_types: Vec<TypeId>,
    slot_names: Vec<&'static str>,
    slot_owner: Vec<Option<usize>>,
    connectors: Vec<Connector<S::Builder>>,
    /// `(user, slot)` pairs that referenced a foreign or mistyped slot.
    foreign:    Vec<(&'static str, usize)>,
    _world:     PhantomData<fn(&W)>,
}

impl<W, S: Snapshot> Default for GraphBuilder<W, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, S: Snapshot> GraphBuilder<W, S> {
    pub fn new() -> Self {
        Self {
            units:      Vec::new(),
            slots:      Vec::new(),
            slot_types: Vec::new(),
            slot_names: Vec::new(),
            slot_owner: Vec::new(),
            connectors: Vec::new(),
            foreign:    Vec::new(),
            _world:     PhantomData,
        }
    }

    /// Append a calculator.
    ///
    /// `make` receives the [`Wiring`] recorder and returns the calculator,
    /// binding any earlier outputs it reads.  Returns the new unit's output.
    pub fn register<C, F>(&mut self, make: F) -> Output<C::Output>
    where
        C: Calculator<W, S>,
        F: FnOnce(&mut Wiring<'_>) -> C,
    {
        let slot = self.alloc_slot(TypeId::of::<C::Output>(), "<unregistered>");
        self.attach(slot, make)
    }

    /// Allocate an output slot whose producer will be registered later.
    pub fn reserve<T: Clone + Default + 'static>(&mut self, name: &'static str) -> Reservation<T> {
        let slot = self.alloc_slot(TypeId::of::<T>(), name);
        Reservation { output: Output::new(slot), name }
    }

    /// Register the producer of a reserved slot at the current position.
    pub fn register_reserved<C, F>(
        &mut self,
        reservation: Reservation<C::Output>,
        make:        F,
    ) -> Output<C::Output>
    where
        C: Calculator<W, S>,
        F: FnOnce(&mut Wiring<'_>) -> C,
    {
        let slot = reservation.output.slot;
        let owned_here = matches!(self.slot_owner.get(slot), Some(None))
            && self.slot_types.get(slot) == Some(&TypeId::of::<C::Output>());
        if !owned_here {
            self.foreign.push((reservation.name, slot));
            return self.register(make);
        }
        self.attach(slot, make)
    }

    /// Copy `output` into snapshot field `field` with `setter` on every
    /// [`Graph::build_snapshot`].
    pub fn connect<T, F>(&mut self, field: &'static str, output: &Output<T>, setter: F) -> &mut Self
    where
        T: Clone + 'static,
        F: Fn(&mut S::Builder, T) + 'static,
    {
        if self.slot_types.get(output.slot) != Some(&TypeId::of::<T>()) {
            self.foreign.push((field, output.slot));
        }
        self.connectors.push(Connector::new(field, output.slot, setter));
        self
    }

    /// Number of units registered so far.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Every binding whose producer does not run before its consumer.
    ///
    /// Bindings to still-unregistered reservations are not reported here;
    /// [`build`][Self::build] rejects those separately.
    pub fn violations(&self) -> Vec<WiringViolation> {
        let mut out = Vec::new();
        for (pos, unit) in self.units.iter().enumerate() {
            for input in &unit.inputs {
                if let Some(&Some(producer_pos)) = self.slot_owner.get(input.slot) {
                    if producer_pos >= pos {
                        out.push(WiringViolation {
                            consumer: unit.name,
                            consumer_pos: pos,
                            producer: self.slot_names[input.slot],
                            producer_pos,
                        });
                    }
                }
            }
        }
        out
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// - [`GraphError::OutOfOrderBinding`] for the first forward binding.
    /// - Every error [`build_unvalidated`][Self::build_unvalidated] returns.
    pub fn build(self) -> GraphResult<Graph<W, S>> {
        self.check_structure()?;
        let violations = self.violations();
        if let Some(first) = violations.first().copied() {
            for v in &violations {
                error!(violation = %v, "wiring order violation");
            }
            return Err(GraphError::OutOfOrderBinding(first));
        }
        self.finish()
    }

    /// Build without rejecting forward bindings.
    ///
    /// Each violation is logged at `warn` level; the affected consumers will
    /// read idle values on every tick.
    ///
    /// # Errors
    ///
    /// Unfulfilled reservations, foreign or mistyped outputs, and duplicate
    /// connectors are still fatal.
    pub fn build_unvalidated(self) -> GraphResult<Graph<W, S>> {
        self.check_structure()?;
        for v in self.violations() {
            warn!(violation = %v, "building graph with out-of-order binding");
        }
        self.finish()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn alloc_slot(&mut self, ty: TypeId, name: &'static str) -> usize {
        let slot = self.slots.len();
        self.slots.push(None);
        self.slot_types.push(ty);
        self.slot_names.push(name);
        self.slot_owner.push(None);
        slot
    }

    fn attach<C, F>(&mut self, slot: usize, make: F) -> Output<C::Output>
    where
        C: Calculator<W, S>,
        F: FnOnce(&mut Wiring<'_>) -> C,
    {
        let mut wiring = Wiring::new(&self.slot_types);
        let calc = make(&mut wiring);
        let inputs = wiring.into_records();

        let name = calc.name();
        let pos = self.units.len();
        self.slots[slot] = Some(Box::new(TypedSlot::new(calc.idle())));
        self.slot_names[slot] = name;
        self.slot_owner[slot] = Some(pos);
        debug!(unit = name, position = pos, inputs = inputs.len(), "calculator registered");

        self.units.push(UnitEntry {
            name,
            cell: Box::new(UnitCell::<C, C::Output>::new(calc)),
            slot,
            inputs,
        });
        Output::new(slot)
    }

    fn check_structure(&self) -> GraphResult<()> {
        if let Some(&(user, slot)) = self.foreign.first() {
            return Err(GraphError::UnknownOutput { user, slot });
        }

        if let Some(slot) = self.slot_owner.iter().position(Option::is_none) {
            return Err(GraphError::UnfulfilledReservation { name: self.slot_names[slot] });
        }

        for unit in &self.units {
            if let Some(bad) = unit.inputs.iter().find(|r| !r.type_known) {
                return Err(GraphError::UnknownOutput { user: unit.name, slot: bad.slot });
            }
        }

        let mut fields: Vec<&'static str> = self.connectors.iter().map(|c| c.field).collect();
        fields.sort_unstable();
        if let Some(pair) = fields.windows(2).find(|w| w[0] == w[1]) {
            return Err(GraphError::DuplicateConnector { field: pair[0] });
        }

        Ok(())
    }

    fn finish(self) -> GraphResult<Graph<W, S>> {
        let slots: Vec<Box<dyn AnySlot>> = self
            .slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(GraphError::UnfulfilledReservation { name: "<unknown>" })?;

        info!(
            units      = self.units.len(),
            connectors = self.connectors.len(),
            "calculator graph built"
        );
        Ok(Graph::new(self.units, slots, self.slot_names, self.connectors))
    }
}

// ── FieldMap convenience ──────────────────────────────────────────────────────

impl<W> GraphBuilder<W, FieldMap> {
    /// Connect `output` to the [`FieldMap`] field `field`.
    pub fn connect_field<T>(&mut self, field: &'static str, output: &Output<T>) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.connect(field, output, move |b: &mut FieldMapBuilder, v: T| b.set(field, v))
    }
}
