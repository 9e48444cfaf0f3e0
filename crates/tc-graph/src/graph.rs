//! The `Graph` executor and its tick loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tc_config::{TunableChange, TunableTable};
use tc_core::Tick;
use tracing::{debug, error, info, trace};

use crate::slot::{AnySlot, typed};
use crate::snapshot::Connector;
use crate::unit::UnitEntry;
use crate::{
    ConnectorInfo, ExecutionRecord, ExecutionReport, GraphError, GraphResult, GraphStats, Output,
    Snapshot, SnapshotBuilder, TickContext,
};

/// One input edge, for introspection.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BindingEdge {
    pub consumer: &'static str,
    pub producer: &'static str,
    /// The producer runs at or after the consumer.
    pub forward:  bool,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Ordered calculator units plus the current/previous snapshot pair.
///
/// Per tick:
///
/// 1. [`run_tick`][Self::run_tick]: every unit, in registration order, either
///    computes (`needs_to_run` true) or resets to its idle output.  Failures
///    and panics are isolated per unit.
/// 2. [`build_snapshot`][Self::build_snapshot]: connectors copy outputs into
///    a fresh snapshot, which becomes the current one; the old current one
///    becomes the previous one and is what `TickContext::previous` shows on
///    the next tick.  The pair rotates once per `run_tick`; building again
///    in the same tick only replaces the current snapshot.
///
/// Create via [`GraphBuilder`][crate::GraphBuilder].
pub struct Graph<W, S: Snapshot> {
    units:      Vec<UnitEntry<W, S>>,
    slots:      Vec<Box<dyn AnySlot>>,
    slot_names: Vec<&'static str>,
    connectors: Vec<Connector<S::Builder>>,
    edges:      Vec<BindingEdge>,
    current:    Option<Arc<S>>,
    previous:   Option<Arc<S>>,
    /// `run_tick` has run since the last `build_snapshot`.
    rotate:     bool,
    tick:       Tick,
    started:    bool,
    stopped:    bool,
    stats:      GraphStats,
}

impl<W, S: Snapshot> Graph<W, S> {
    pub(crate) fn new(
        units:      Vec<UnitEntry<W, S>>,
        slots:      Vec<Box<dyn AnySlot>>,
        slot_names: Vec<&'static str>,
        connectors: Vec<Connector<S::Builder>>,
    ) -> Self {
        let position: Vec<usize> = {
            let mut pos = vec![usize::MAX; slots.len()];
            for (i, u) in units.iter().enumerate() {
                pos[u.slot] = i;
            }
            pos
        };
        let edges = units
            .iter()
            .enumerate()
            .flat_map(|(i, u)| {
                let position = &position;
                let slot_names = &slot_names;
                u.inputs.iter().map(move |r| BindingEdge {
                    consumer: u.name,
                    producer: slot_names[r.slot],
                    forward:  position[r.slot] >= i,
                })
            })
            .collect();

        let stats = GraphStats::new(units.len());
        Self {
            units,
            slots,
            slot_names,
            connectors,
            edges,
            current: None,
            previous: None,
            rotate: false,
            tick: Tick::ZERO,
            started: false,
            stopped: false,
            stats,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Call `start` on every unit, in order.  A second call does nothing.
    pub fn start(&mut self, tunables: &TunableTable) -> GraphResult<()> {
        if self.stopped {
            return Err(GraphError::Stopped);
        }
        if self.started {
            debug!("graph already started");
            return Ok(());
        }
        for unit in &mut self.units {
            unit.cell.start(tunables);
        }
        self.started = true;
        info!(units = self.units.len(), "calculator graph started");
        Ok(())
    }

    /// Call `stop` on every unit, in order.  Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        for unit in &mut self.units {
            unit.cell.stop();
        }
        self.stopped = true;
        info!(ticks = self.stats.ticks, failures = self.stats.total_failures(), "calculator graph stopped");
    }

    /// Forward applied tunable changes to every unit.
    pub fn notify_tunables_changed(&mut self, changes: &[TunableChange]) {
        if changes.is_empty() {
            return;
        }
        for unit in &mut self.units {
            unit.cell.on_tunables_changed(changes);
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run every unit once against `world`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotStarted`] before [`start`][Self::start];
    /// [`GraphError::Stopped`] after [`stop`][Self::stop].  Calculator
    /// failures are not errors; they show up in the returned report.
    pub fn run_tick(&mut self, world: &W, tunables: &TunableTable) -> GraphResult<ExecutionReport> {
        if self.stopped {
            return Err(GraphError::Stopped);
        }
        if !self.started {
            return Err(GraphError::NotStarted);
        }

        let tick = self.tick;
        for slot in &mut self.slots {
            slot.begin_tick();
        }

        let previous = self.current.clone();
        let mut records = Vec::with_capacity(self.units.len());

        for unit in &mut self.units {
            let ctx = TickContext::new(tick, world, previous.as_deref(), tunables, &self.slots);
            let started = Instant::now();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| unit.cell.step(&ctx)));
            let elapsed = started.elapsed();

            let slot = &mut self.slots[unit.slot];
            let (ran, failed) = match outcome {
                Ok(Ok(true)) => {
                    unit.cell.commit(slot.as_mut());
                    (true, false)
                }
                Ok(Ok(false)) => {
                    slot.settle_idle();
                    (false, false)
                }
                Ok(Err(err)) => {
                    unit.cell.discard();
                    slot.settle_failed();
                    error!(unit = unit.name, %tick, error = %err, "calculator failed; keeping last output");
                    (true, true)
                }
                Err(payload) => {
                    unit.cell.discard();
                    slot.settle_failed();
                    error!(
                        unit  = unit.name,
                        %tick,
                        panic = %panic_message(payload.as_ref()),
                        "calculator panicked; keeping last output"
                    );
                    (true, true)
                }
            };
            records.push(ExecutionRecord { name: unit.name, ran, failed, elapsed });
        }

        let report = ExecutionReport { tick, records };
        self.stats.record(&report);
        self.tick = tick.next();
        self.rotate = true;
        trace!(
            %tick,
            ran    = report.ran_count(),
            failed = report.failed_count(),
            "graph tick complete"
        );
        Ok(report)
    }

    /// Assemble and publish the snapshot from the units' current outputs.
    ///
    /// The first build after a [`run_tick`][Self::run_tick] moves the current
    /// snapshot to previous; later builds in the same tick overwrite current.
    pub fn build_snapshot(&mut self) -> Arc<S> {
        let mut builder = S::builder();
        for connector in &self.connectors {
            if let Some(slot) = self.slots.get(connector.slot) {
                connector.apply(&mut builder, slot.as_ref());
            }
        }
        let snapshot = Arc::new(builder.finish());
        let replaced = self.current.replace(Arc::clone(&snapshot));
        if self.rotate {
            self.previous = replaced;
            self.rotate = false;
        }
        snapshot
    }

    /// [`run_tick`][Self::run_tick] followed by
    /// [`build_snapshot`][Self::build_snapshot].
    pub fn tick(&mut self, world: &W, tunables: &TunableTable) -> GraphResult<(Arc<S>, ExecutionReport)> {
        let report = self.run_tick(world, tunables)?;
        Ok((self.build_snapshot(), report))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Option<&Arc<S>> {
        self.current.as_ref()
    }

    /// Snapshot published before the latest one.
    pub fn previous_snapshot(&self) -> Option<&Arc<S>> {
        self.previous.as_ref()
    }

    /// Current value held by `output`'s slot.
    pub fn output<T: Clone + 'static>(&self, output: &Output<T>) -> Option<&T> {
        self.slots
            .get(output.slot)
            .and_then(|s| typed::<T>(s.as_ref()))
            .map(|s| &s.current)
    }

    /// `true` if `output`'s producer failed during the last tick.
    pub fn failed<T>(&self, output: &Output<T>) -> bool {
        self.slots.get(output.slot).is_some_and(|s| s.is_failed())
    }

    /// Tick that the next `run_tick` will execute.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Unit names in run order.
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every recorded binding, grouped by consumer in run order.
    pub fn bindings(&self) -> &[BindingEdge] {
        &self.edges
    }

    /// Connectors in application order.
    pub fn connectors(&self) -> Vec<ConnectorInfo> {
        self.connectors
            .iter()
            .map(|c| ConnectorInfo { field: c.field, producer: self.slot_names[c.slot] })
            .collect()
    }

    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
