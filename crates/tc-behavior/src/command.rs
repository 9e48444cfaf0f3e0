//! Target commands: what a behavior asks of its robot each tick.

use tc_core::{BotId, TrackedBot, Vec2};

/// Desired pose and velocity.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveTarget {
    pub pos:         Vec2,
    /// Radians, field frame.
    pub orientation: f64,
    pub vel:         Vec2,
}

/// A requested kick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KickIntent {
    pub target: Vec2,
    /// Ball speed at release, m/s.
    pub speed:  f64,
    pub chip:   bool,
}

/// Everything the dispatch layer needs for one robot for one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotCommand {
    pub bot:     BotId,
    pub target:  MoveTarget,
    pub kick:    Option<KickIntent>,
    pub dribble: bool,
}

impl BotCommand {
    /// Drive to `pos`, facing `orientation`, and stop there.
    pub fn move_to(bot: BotId, pos: Vec2, orientation: f64) -> Self {
        Self {
            bot,
            target:  MoveTarget { pos, orientation, vel: Vec2::ZERO },
            kick:    None,
            dribble: false,
        }
    }

    /// Stay where `bot` currently is.
    pub fn hold(bot: &TrackedBot) -> Self {
        Self::move_to(bot.id, bot.pos, bot.orientation)
    }

    /// Face `look_at` from `pos`.
    pub fn move_facing(bot: BotId, pos: Vec2, look_at: Vec2) -> Self {
        Self::move_to(bot, pos, (look_at - pos).angle())
    }

    pub fn with_kick(mut self, kick: KickIntent) -> Self {
        self.kick = Some(kick);
        self
    }

    pub fn with_dribble(mut self, on: bool) -> Self {
        self.dribble = on;
        self
    }
}
