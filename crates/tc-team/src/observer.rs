//! Tick observer trait for logging, recording, and test probes.

use tc_behavior::BotCommand;
use tc_core::Tick;
use tc_graph::ExecutionReport;

use crate::TickOutput;

/// Callbacks invoked by [`TeamAi`][crate::TeamAi] at fixed points of every
/// tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: failure counter
///
/// ```rust
/// use tc_core::Tick;
/// use tc_graph::ExecutionReport;
/// use tc_team::TickObserver;
///
/// #[derive(Default)]
/// struct Failures(usize);
///
/// impl<S> TickObserver<S> for Failures {
///     fn on_snapshot(&mut self, _tick: Tick, _snapshot: &S, report: &ExecutionReport) {
///         self.0 += report.failed_count();
///     }
/// }
/// ```
pub trait TickObserver<S> {
    /// Called at the very start of each tick, before tunables are polled.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the graph has run and the snapshot is published.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &S, _report: &ExecutionReport) {}

    /// Called with every command of the tick, after all behaviors updated.
    fn on_commands(&mut self, _tick: Tick, _commands: &[BotCommand]) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _output: &TickOutput<S>) {}

    /// Called once after [`TeamAi::run`][crate::TeamAi::run] returns.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`TickObserver`] that does nothing.
pub struct NoopObserver;

impl<S> TickObserver<S> for NoopObserver {}
