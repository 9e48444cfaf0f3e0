//! The keeper: follows the state decided by `KeeperStateCalc`.
//!
//! Every state is entered through a global transition.  The first one sends
//! the keeper to Stopped whenever the game is not running; the others follow
//! the snapshot's `keeper_state` while it is.

use tc_behavior::{BehaviorInput, BehaviorResult, BotCommand, FsmBehavior, Role, RoleContext, StateId};
use tc_core::{BotId, Vec2};
use tc_fsm::{NoopState, StateMachine, Trigger};

use crate::calc::goal_line_crossing;
use crate::field::KeeperState;
use crate::tunables::KEEPER_GOAL_DISTANCE;
use crate::TacticalField;

const ALL_STATES: [KeeperState; 5] = [
    KeeperState::Normal,
    KeeperState::InterceptBall,
    KeeperState::GoOut,
    KeeperState::MoveToPenaltyArea,
    KeeperState::Stopped,
];

impl StateId for KeeperState {
    fn name(self) -> &'static str {
        self.as_str()
    }
}

pub type KeeperBehavior = FsmBehavior<TacticalField, KeeperState, (), ()>;

type Ctx = RoleContext<TacticalField, ()>;

fn emit(state: KeeperState, c: &Ctx) -> Option<BotCommand> {
    let me = c.me()?;
    let g = &c.input.geometry;
    let ball = &c.input.world.ball;
    let goal = g.our_goal_center();

    let pos = match state {
        KeeperState::Normal => {
            let pos = goal.step_towards(ball.pos, c.input.tunables.get(&KEEPER_GOAL_DISTANCE));
            g.clamp_to_our_penalty_area(pos, g.bot_radius)
        }
        KeeperState::InterceptBall => {
            let half_goal = g.goal_width / 2.0;
            let y = goal_line_crossing(g, ball).map_or(0.0, |p| p.y.clamp(-half_goal, half_goal));
            Vec2::new(goal.x + g.bot_radius, y)
        }
        KeeperState::GoOut => {
            let pos = ball.pos.step_towards(goal, 2.0 * g.bot_radius);
            g.clamp_to_our_penalty_area(pos, g.bot_radius)
        }
        KeeperState::MoveToPenaltyArea => g.clamp_to_our_penalty_area(me.pos, g.bot_radius),
        KeeperState::Stopped => goal + Vec2::new(2.0 * g.bot_radius, 0.0),
    };
    Some(BotCommand::move_facing(c.bot, pos, ball.pos))
}

/// A fresh keeper for `bot`, starting in Normal.
pub fn keeper(bot: BotId, input: &BehaviorInput<TacticalField>) -> BehaviorResult<KeeperBehavior> {
    let mut sm = StateMachine::new("keeper");
    for state in ALL_STATES {
        sm.add_state(state, NoopState);
    }

    sm.add_global_transition(
        Trigger::guard(|c: &Ctx| !c.input.world.game_state.is_running()),
        KeeperState::Stopped,
    );
    for state in ALL_STATES {
        sm.add_global_transition(
            Trigger::guard(move |c: &Ctx| {
                c.input.world.game_state.is_running() && c.input.snapshot.keeper_state == state
            }),
            state,
        );
    }
    sm.set_initial(KeeperState::Normal)?;

    Ok(FsmBehavior::new(Role::Keeper, bot, sm, (), input, emit))
}
