//! The per-tick world-state record consumed by the controller.
//!
//! A `WorldFrame` is produced by the (external) tracking layer and is
//! immutable once handed to the tick driver.  Bots are stored in `BTreeMap`s
//! so every iteration over them is in ascending `BotId` order.

use std::collections::BTreeMap;

use crate::{BotId, Tick, Vec2};

/// Referee-derived game state, reduced to what decision logic distinguishes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Robots must not move.
    #[default]
    Halt,
    /// Robots keep distance to the ball.
    Stop,
    /// Normal play.
    Running,
    /// A robot places the ball; `ours` is `true` if we place it.
    BallPlacement { ours: bool },
    /// Free kick about to be taken; `ours` is `true` if we take it.
    FreeKick { ours: bool },
}

impl GameState {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, GameState::Running)
    }

    /// `true` for states in which robots must not touch the ball.
    #[inline]
    pub fn is_stopped(self) -> bool {
        matches!(self, GameState::Halt | GameState::Stop)
    }

    #[inline]
    pub fn is_ball_placement(self) -> bool {
        matches!(self, GameState::BallPlacement { .. })
    }
}

/// A tracked robot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedBot {
    pub id: BotId,
    pub pos: Vec2,
    /// Velocity in m/s.
    pub vel: Vec2,
    /// Heading in radians.
    pub orientation: f64,
    /// Barrier sensor reports the ball at the dribbler.  Opponent bots never
    /// report this; it is inferred from distance for them.
    pub ball_contact: bool,
}

impl TrackedBot {
    pub fn new(id: BotId, pos: Vec2) -> Self {
        Self { id, pos, vel: Vec2::ZERO, orientation: 0.0, ball_contact: false }
    }
}

/// The tracked ball.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedBall {
    pub pos: Vec2,
    /// Velocity in m/s.
    pub vel: Vec2,
}

impl TrackedBall {
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// One frame of world state, as seen from our team's perspective.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldFrame {
    /// Tick this frame belongs to.
    pub tick: Tick,
    /// Capture timestamp in nanoseconds.
    pub timestamp_ns: u64,
    /// Our robots, keyed by id.
    pub our_bots: BTreeMap<BotId, TrackedBot>,
    /// Opponent robots, keyed by id.
    pub their_bots: BTreeMap<BotId, TrackedBot>,
    pub ball: TrackedBall,
    pub game_state: GameState,
    /// Our keeper, as announced by the referee.
    pub keeper_id: Option<BotId>,
    /// Timestamp of the most recent detected kick, if any.
    pub last_kick_ns: Option<u64>,
}

impl WorldFrame {
    /// An empty frame at `tick`.
    pub fn empty(tick: Tick) -> Self {
        Self { tick, ..Self::default() }
    }

    /// Our keeper, if one is announced *and* currently visible.
    pub fn keeper(&self) -> Option<&TrackedBot> {
        self.keeper_id.and_then(|id| self.our_bots.get(&id))
    }

    #[inline]
    pub fn our_bot(&self, id: BotId) -> Option<&TrackedBot> {
        self.our_bots.get(&id)
    }

    /// Add or replace one of our bots (builder-style, for fixtures).
    pub fn with_our_bot(mut self, bot: TrackedBot) -> Self {
        self.our_bots.insert(bot.id, bot);
        self
    }

    /// Add or replace an opponent bot (builder-style, for fixtures).
    pub fn with_their_bot(mut self, bot: TrackedBot) -> Self {
        self.their_bots.insert(bot.id, bot);
        self
    }
}
