//! Supporters: every field bot that is neither keeper nor attacker.

use tc_behavior::{BehaviorInput, BehaviorResult, BotCommand, FsmBehavior, Role, RoleContext, StateId};
use tc_core::{BotId, Vec2};
use tc_fsm::{NoopState, StateMachine};

use crate::field::SkirmishStrategy;
use crate::tunables::SUPPORT_DEPTH;
use crate::TacticalField;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum SupportState {
    Position,
}

impl StateId for SupportState {
    fn name(self) -> &'static str {
        "Position"
    }
}

pub type SupportBehavior = FsmBehavior<TacticalField, SupportState, (), ()>;

type Ctx = RoleContext<TacticalField, ()>;

/// Hang back `support.depth` behind the ball in one of three lanes chosen by
/// bot id.  A supporter called into a skirmish moves next to the ball.
fn emit(_state: SupportState, c: &Ctx) -> Option<BotCommand> {
    let g = &c.input.geometry;
    let ball = c.input.world.ball.pos;

    if c.input.snapshot.skirmish_strategy == (SkirmishStrategy::RipFree { supporter: Some(c.bot) }) {
        let pos = ball.step_towards(g.our_goal_center(), 2.0 * g.bot_radius + g.ball_radius);
        return Some(BotCommand::move_facing(c.bot, pos, ball));
    }

    let half_len = g.field_length / 2.0 - g.bot_radius;
    let half_wid = g.field_width / 2.0 - g.bot_radius;
    let min_x = -half_len + g.penalty_area_depth + g.bot_radius;
    let lane = (c.bot.index() % 3) as f64 - 1.0;

    let x = (ball.x - c.input.tunables.get(&SUPPORT_DEPTH)).clamp(min_x, half_len);
    let y = (-ball.y / 2.0 + lane * g.field_width / 4.0).clamp(-half_wid, half_wid);
    Some(BotCommand::move_facing(c.bot, Vec2::new(x, y), ball))
}

/// A fresh supporter for `bot`.
pub fn support(bot: BotId, input: &BehaviorInput<TacticalField>) -> BehaviorResult<SupportBehavior> {
    let mut sm = StateMachine::new("support");
    sm.add_state(SupportState::Position, NoopState);
    sm.set_initial(SupportState::Position)?;
    Ok(FsmBehavior::new(Role::Support, bot, sm, (), input, emit))
}
