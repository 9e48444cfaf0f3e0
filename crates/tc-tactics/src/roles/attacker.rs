//! The attacker: the bot that deals with the ball on offense.
//!
//! | From             | Trigger                              | To               |
//! |------------------|--------------------------------------|------------------|
//! | any (global)     | opponent touches the ball            | Protect          |
//! | Protect          | ball free and action is not Protect  | ApproachBallLine |
//! | ApproachBallLine | ball moving towards us               | Receive          |
//! | ApproachBallLine | action is Protect                    | Protect          |
//! | ApproachBallLine | close to ball with a kick action     | Kick             |
//! | Kick             | `BallKicked` event                   | ApproachBallLine |
//! | Kick             | kick timeout                         | ApproachBallLine |
//! | Receive          | ball no longer coming                | ApproachBallLine |
//!
//! A bot that already handled the ball on the previous tick and is mid-kick
//! ignores the opponent-touch override, so a contested kick is not aborted
//! into Protect and back every other tick.

use tc_behavior::{
    BehaviorInput, BehaviorResult, BotCommand, FsmBehavior, KickIntent, Role, RoleContext,
    StateId,
};
use tc_core::{BotId, Vec2};
use tc_fsm::{FnState, NoopState, StateMachine, Trigger};

use crate::field::OffensiveAction;
use crate::tunables::{
    ALLOW_CHIP, APPROACH_DIST, KICKED_SPEED, KICK_DIST, KICK_TIMEOUT_TICKS, PASS_SPEED,
    RECEIVE_SPEED, SHOT_SPEED,
};
use crate::TacticalField;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum AttackerState {
    Protect,
    ApproachBallLine,
    Kick,
    Receive,
}

impl StateId for AttackerState {
    fn name(self) -> &'static str {
        match self {
            AttackerState::Protect => "Protect",
            AttackerState::ApproachBallLine => "ApproachBallLine",
            AttackerState::Kick => "Kick",
            AttackerState::Receive => "Receive",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AttackerEvent {
    BallKicked,
}

/// Attacker-local data.
#[derive(Copy, Clone, Debug, Default)]
pub struct AttackerData {
    /// Updates spent in the current Kick state.
    pub kick_ticks: i64,
    pub kicking:    bool,
}

pub type AttackerBehavior = FsmBehavior<TacticalField, AttackerState, AttackerEvent, AttackerData>;

type Ctx = RoleContext<TacticalField, AttackerData>;

// ── Guards ────────────────────────────────────────────────────────────────────

fn my_action(c: &Ctx) -> Option<&OffensiveAction> {
    c.input.snapshot.offensive_action(c.bot)
}

fn handled_last_tick(c: &Ctx) -> bool {
    c.input.previous.as_ref().is_some_and(|p| p.ball_handling_bot == Some(c.bot))
}

fn opponent_takes_ball(c: &Ctx) -> bool {
    c.input.snapshot.ball_contact.opponent_touching() && !(c.data.kicking && handled_last_tick(c))
}

fn wants_protect(c: &Ctx) -> bool {
    matches!(my_action(c), Some(OffensiveAction::Protect))
}

fn ball_coming_at_me(c: &Ctx) -> bool {
    let ball = &c.input.world.ball;
    c.me().is_some_and(|me| {
        ball.speed() > c.input.tunables.get(&RECEIVE_SPEED) && ball.vel.dot(me.pos - ball.pos) > 0.0
    })
}

fn ready_to_kick(c: &Ctx) -> bool {
    let kick_dist = c.input.tunables.get(&KICK_DIST);
    my_action(c).and_then(OffensiveAction::kick_target).is_some()
        && c.me().is_some_and(|me| me.pos.distance_to(c.input.world.ball.pos) <= kick_dist)
}

fn kick_timed_out(c: &Ctx) -> bool {
    c.data.kick_ticks > c.input.tunables.get(&KICK_TIMEOUT_TICKS)
}

fn events(state: AttackerState, c: &Ctx) -> Option<AttackerEvent> {
    let kicked = c.input.world.ball.speed() > c.input.tunables.get(&KICKED_SPEED);
    (state == AttackerState::Kick && kicked).then_some(AttackerEvent::BallKicked)
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Where the ball should go: the kick or dribble target, else their goal.
fn ball_target(c: &Ctx) -> Vec2 {
    match my_action(c) {
        Some(OffensiveAction::GoalShot { target })
        | Some(OffensiveAction::Pass { target, .. })
        | Some(OffensiveAction::Dribble { target }) => *target,
        Some(OffensiveAction::Protect) | None => c.input.geometry.their_goal_center(),
    }
}

fn emit(state: AttackerState, c: &Ctx) -> Option<BotCommand> {
    let me = c.me()?;
    let geometry = &c.input.geometry;
    let ball = &c.input.world.ball;
    let tunables = &c.input.tunables;

    match state {
        AttackerState::Protect => {
            let threat = c
                .input
                .snapshot
                .ball_distances
                .closest_theirs()
                .and_then(|d| c.input.world.their_bots.get(&d.bot))
                .map_or(geometry.our_goal_center(), |b| b.pos);
            let pos = ball.pos.step_towards(threat, geometry.bot_radius + geometry.ball_radius);
            Some(BotCommand::move_facing(c.bot, pos, ball.pos).with_dribble(true))
        }
        AttackerState::ApproachBallLine => {
            let target = ball_target(c);
            let pos = ball.pos.step_towards(target, -tunables.get(&APPROACH_DIST));
            Some(BotCommand::move_facing(c.bot, pos, target))
        }
        AttackerState::Kick => {
            let action = my_action(c)?;
            let target = action.kick_target()?;
            let pass = matches!(action, OffensiveAction::Pass { .. });
            let kick = KickIntent {
                target,
                speed: tunables.get(if pass { &PASS_SPEED } else { &SHOT_SPEED }),
                chip:  pass && tunables.get(&ALLOW_CHIP),
            };
            Some(BotCommand::move_facing(c.bot, ball.pos, target).with_kick(kick).with_dribble(true))
        }
        AttackerState::Receive => {
            let dir = ball.vel.normalized();
            let pos = ball.pos + dir * (me.pos - ball.pos).dot(dir);
            Some(BotCommand::move_facing(c.bot, pos, ball.pos).with_dribble(true))
        }
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// A fresh attacker for `bot`, starting in ApproachBallLine.
pub fn attacker(bot: BotId, input: &BehaviorInput<TacticalField>) -> BehaviorResult<AttackerBehavior> {
    use AttackerState::*;

    let mut sm = StateMachine::new("attacker");
    sm.add_state(Protect, NoopState)
        .add_state(ApproachBallLine, NoopState)
        .add_state(
            Kick,
            FnState::new()
                .entry(|c: &mut Ctx| {
                    c.data.kicking = true;
                    c.data.kick_ticks = 0;
                })
                .update(|c: &mut Ctx| c.data.kick_ticks += 1)
                .exit(|c: &mut Ctx| c.data.kicking = false),
        )
        .add_state(Receive, NoopState);

    sm.add_global_transition(Trigger::guard(opponent_takes_ball), Protect)
        .add_transition(
            Protect,
            Trigger::guard(|c: &Ctx| !opponent_takes_ball(c) && !wants_protect(c)),
            ApproachBallLine,
        )
        .add_transition(ApproachBallLine, Trigger::guard(ball_coming_at_me), Receive)
        .add_transition(ApproachBallLine, Trigger::guard(wants_protect), Protect)
        .add_transition(ApproachBallLine, Trigger::guard(ready_to_kick), Kick)
        .add_transition(Kick, Trigger::event(AttackerEvent::BallKicked), ApproachBallLine)
        .add_transition(Kick, Trigger::guard(kick_timed_out), ApproachBallLine)
        .add_transition(
            Receive,
            Trigger::guard(|c: &Ctx| !ball_coming_at_me(c)),
            ApproachBallLine,
        );
    sm.set_initial(ApproachBallLine)?;

    Ok(FsmBehavior::new(Role::Attacker, bot, sm, AttackerData::default(), input, emit).with_events(events))
}
