//! Execution metadata: per-tick report and running totals.
//!
//! Informational only; nothing in the graph reads it back.

use std::time::Duration;

use tc_core::Tick;

/// What happened to one unit during one tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExecutionRecord {
    pub name:    &'static str,
    /// `compute` was invoked (even if it then failed).
    pub ran:     bool,
    pub failed:  bool,
    pub elapsed: Duration,
}

/// One record per unit, in run order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExecutionReport {
    pub tick:    Tick,
    pub records: Vec<ExecutionRecord>,
}

impl ExecutionReport {
    /// Record for the unit called `name`.
    pub fn get(&self, name: &str) -> Option<&ExecutionRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn ran_count(&self) -> usize {
        self.records.iter().filter(|r| r.ran).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| r.failed).count()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.records.iter().map(|r| r.elapsed).sum()
    }
}

/// Totals accumulated over every tick since the graph was built.
#[derive(Clone, Debug, Default)]
pub struct GraphStats {
    pub ticks:    u64,
    /// Indexed by run position.
    pub runs:     Vec<u64>,
    pub failures: Vec<u64>,
    pub elapsed:  Vec<Duration>,
}

impl GraphStats {
    pub(crate) fn new(unit_count: usize) -> Self {
        Self {
            ticks:    0,
            runs:     vec![0; unit_count],
            failures: vec![0; unit_count],
            elapsed:  vec![Duration::ZERO; unit_count],
        }
    }

    pub(crate) fn record(&mut self, report: &ExecutionReport) {
        self.ticks += 1;
        for (i, r) in report.records.iter().enumerate() {
            if r.ran {
                self.runs[i] += 1;
                self.elapsed[i] += r.elapsed;
            }
            if r.failed {
                self.failures[i] += 1;
            }
        }
    }

    pub fn total_failures(&self) -> u64 {
        self.failures.iter().sum()
    }
}
