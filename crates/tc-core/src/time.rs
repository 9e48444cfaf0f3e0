//! Controller time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter, one per
//! world frame handed to the controller.  The mapping to frame timestamps is
//! held in `FrameClock`:
//!
//!   timestamp_ns = start_ns + tick * tick_duration_ns
//!
//! Decision logic compares ticks, never wall-clock time, so two runs over the
//! same world frames are identical regardless of how fast the host is.

use std::fmt;

use crate::{Geometry, TeamColor};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute controller tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Converts between tick counts and frame timestamps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Timestamp (nanoseconds) of tick 0.
    pub start_ns: u64,
    /// Nominal spacing of world frames in nanoseconds.  Default: 16 ms.
    pub tick_duration_ns: u64,
    /// The current tick, advanced by `FrameClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl FrameClock {
    pub fn new(start_ns: u64, tick_duration_ns: u64) -> Self {
        Self { start_ns, tick_duration_ns, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Nominal frame timestamp of `current_tick`.
    #[inline]
    pub fn current_ns(&self) -> u64 {
        self.start_ns + self.current_tick.0 * self.tick_duration_ns
    }

    /// How many ticks span `secs` seconds?  Rounds up.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if self.tick_duration_ns == 0 {
            return 0;
        }
        (secs * 1e9 / self.tick_duration_ns as f64).ceil().max(0.0) as u64
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.current_ns() / 1_000_000;
        write!(f, "{} ({} ms)", self.current_tick, ms)
    }
}

// ── TeamConfig ────────────────────────────────────────────────────────────────

/// Team-context configuration, fixed before the tick loop starts.
///
/// Constructed once by the bootstrapping code and handed to the team driver;
/// nothing in the tick loop mutates it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamConfig {
    /// Our color.  Selects team-specific tunable overrides.
    pub team_color: TeamColor,

    /// Field dimensions.
    pub geometry: Geometry,

    /// Nominal nanoseconds per tick.  Default: 16 ms (~60 Hz vision).
    pub tick_duration_ns: u64,

    /// Total ticks to run in batch mode (`TeamAi::run`).
    pub total_ticks: u64,

    /// Master seed for synthetic world generation in demos and tests.
    pub seed: u64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            team_color:       TeamColor::Yellow,
            geometry:         Geometry::default(),
            tick_duration_ns: 16_000_000,
            total_ticks:      0,
            seed:             0,
        }
    }
}

impl TeamConfig {
    /// The tick at which a batch run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `FrameClock` pre-configured for this run.
    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(0, self.tick_duration_ns)
    }
}
