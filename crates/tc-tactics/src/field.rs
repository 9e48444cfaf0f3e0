//! `TacticalField`, the per-tick tactical snapshot, and its field types.

use std::collections::BTreeMap;

use tc_behavior::Role;
use tc_core::{BotId, Tick, Vec2};
use tc_graph::{Snapshot, SnapshotBuilder};

// ── Field types ───────────────────────────────────────────────────────────────

/// Distance of one bot to the ball, in mm.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotDistance {
    pub bot:  BotId,
    pub dist: f64,
}

/// Bot-to-ball distances per team, each sorted ascending (ties by `BotId`).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallDistances {
    pub ours:   Vec<BotDistance>,
    pub theirs: Vec<BotDistance>,
}

impl BallDistances {
    pub fn closest_ours(&self) -> Option<&BotDistance> {
        self.ours.first()
    }

    pub fn closest_theirs(&self) -> Option<&BotDistance> {
        self.theirs.first()
    }

    /// Distance of our bot `bot`, if visible.
    pub fn ours_of(&self, bot: BotId) -> Option<f64> {
        self.ours.iter().find(|d| d.bot == bot).map(|d| d.dist)
    }
}

/// The most recent ball touch.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastTouch {
    pub bot:  BotId,
    pub ours: bool,
    pub tick: Tick,
}

/// Which bots touch the ball this tick.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallContact {
    pub touching_ours:   Vec<BotId>,
    pub touching_theirs: Vec<BotId>,
    /// Carried over from the previous snapshot while nobody touches the ball.
    pub last_touch:      Option<LastTouch>,
}

impl BallContact {
    #[inline]
    pub fn opponent_touching(&self) -> bool {
        !self.touching_theirs.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Possession {
    #[default]
    Free,
    Ours,
    Theirs,
    Contested,
}

/// Which side of the game the team currently plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Responsibility {
    #[default]
    Undefined,
    Offense,
    Defense,
}

/// What the keeper should be doing, in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeeperState {
    #[default]
    Normal,
    InterceptBall,
    GoOut,
    MoveToPenaltyArea,
    Stopped,
}

impl KeeperState {
    pub fn as_str(self) -> &'static str {
        match self {
            KeeperState::Normal => "Normal",
            KeeperState::InterceptBall => "InterceptBall",
            KeeperState::GoOut => "GoOut",
            KeeperState::MoveToPenaltyArea => "MoveToPenaltyArea",
            KeeperState::Stopped => "Stopped",
        }
    }
}

/// A close fight for the ball between our handling bot and opponents.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkirmishInfo {
    pub active:  bool,
    /// Opponents within the skirmish radius, closest first.
    pub enemies: Vec<BotId>,
    pub center:  Vec2,
}

#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkirmishStrategy {
    #[default]
    None,
    /// Keep the ball at the dribbler and turn away.
    Dribble,
    /// Outnumbered: shield the ball and call a supporter.
    RipFree { supporter: Option<BotId> },
}

/// What the ball-handling bot does with the ball.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffensiveAction {
    GoalShot { target: Vec2 },
    Pass { receiver: BotId, target: Vec2 },
    Dribble { target: Vec2 },
    Protect,
}

impl OffensiveAction {
    /// Kick target, for actions that kick.
    pub fn kick_target(&self) -> Option<Vec2> {
        match *self {
            OffensiveAction::GoalShot { target } | OffensiveAction::Pass { target, .. } => Some(target),
            OffensiveAction::Dribble { .. } | OffensiveAction::Protect => None,
        }
    }
}

// ── TacticalField ─────────────────────────────────────────────────────────────

/// Immutable tactical analysis of one tick.
///
/// Every field is written by exactly one calculator through a connector;
/// fields without a connector keep their default.  Published behind an
/// `Arc`, so nothing changes it after the graph builds it.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TacticalField {
    pub ball_distances:    BallDistances,
    pub ball_contact:      BallContact,
    pub possession:        Possession,
    pub responsibility:    Responsibility,
    pub keeper_state:      KeeperState,
    pub ball_handling_bot: Option<BotId>,
    pub skirmish:          SkirmishInfo,
    pub skirmish_strategy: SkirmishStrategy,
    pub offensive_actions: BTreeMap<BotId, OffensiveAction>,
    pub desired_roles:     BTreeMap<BotId, Role>,
}

impl TacticalField {
    pub fn offensive_action(&self, bot: BotId) -> Option<&OffensiveAction> {
        self.offensive_actions.get(&bot)
    }
}

/// Staging area for one [`TacticalField`].
#[derive(Default)]
pub struct TacticalFieldBuilder {
    field: TacticalField,
}

impl TacticalFieldBuilder {
    pub fn ball_distances(&mut self, v: BallDistances) {
        self.field.ball_distances = v;
    }

    pub fn ball_contact(&mut self, v: BallContact) {
        self.field.ball_contact = v;
    }

    pub fn possession(&mut self, v: Possession) {
        self.field.possession = v;
    }

    pub fn responsibility(&mut self, v: Responsibility) {
        self.field.responsibility = v;
    }

    pub fn keeper_state(&mut self, v: KeeperState) {
        self.field.keeper_state = v;
    }

    pub fn ball_handling_bot(&mut self, v: Option<BotId>) {
        self.field.ball_handling_bot = v;
    }

    pub fn skirmish(&mut self, v: SkirmishInfo) {
        self.field.skirmish = v;
    }

    pub fn skirmish_strategy(&mut self, v: SkirmishStrategy) {
        self.field.skirmish_strategy = v;
    }

    pub fn offensive_actions(&mut self, v: BTreeMap<BotId, OffensiveAction>) {
        self.field.offensive_actions = v;
    }

    pub fn desired_roles(&mut self, v: BTreeMap<BotId, Role>) {
        self.field.desired_roles = v;
    }
}

impl SnapshotBuilder for TacticalFieldBuilder {
    type Snapshot = TacticalField;

    fn finish(self) -> TacticalField {
        self.field
    }
}

impl Snapshot for TacticalField {
    type Builder = TacticalFieldBuilder;

    fn builder() -> TacticalFieldBuilder {
        TacticalFieldBuilder::default()
    }
}
