//! `KeeperStateCalc`: what our keeper should be doing this tick.

use tc_core::{Geometry, TrackedBall, Vec2, WorldFrame};
use tc_graph::{Binding, CalcResult, Calculator};

use super::Ctx;
use crate::field::{BallDistances, KeeperState};
use crate::tunables::{
    KEEPER_DANGER_ZONE, KEEPER_FOE_BALL_DIST, KEEPER_GOAL_OFFSET, KEEPER_INTERCEPT_SPEED,
};
use crate::TacticalField;

/// Point where the ball's straight-line path crosses our goal line, if it is
/// heading that way at all.
pub fn goal_line_crossing(geometry: &Geometry, ball: &TrackedBall) -> Option<Vec2> {
    let goal_x = geometry.our_goal_center().x;
    if ball.vel.x >= 0.0 || ball.pos.x <= goal_x {
        return None;
    }
    let t = (goal_x - ball.pos.x) / ball.vel.x;
    Some(Vec2::new(goal_x, ball.pos.y + ball.vel.y * t))
}

/// Decides the keeper state, in priority order:
///
/// ```text
/// Stopped           game halted, stopped, or in ball placement
/// InterceptBall     ball moving at our goal faster than intercept_speed
/// GoOut             opponent at the ball near our penalty area
/// MoveToPenaltyArea keeper outside its penalty area
/// Normal            otherwise
/// ```
///
/// Skipped while no keeper is visible.  An interception in progress is held
/// down to half the intercept speed, read from the previous snapshot.
pub struct KeeperStateCalc {
    geometry:  Geometry,
    distances: Binding<BallDistances>,
}

impl KeeperStateCalc {
    pub fn new(geometry: Geometry, distances: Binding<BallDistances>) -> Self {
        Self { geometry, distances }
    }

    fn ball_on_goal(&self, ball: &TrackedBall, min_speed: f64, goal_offset: f64) -> bool {
        ball.speed() > min_speed
            && goal_line_crossing(&self.geometry, ball)
                .is_some_and(|p| p.y.abs() <= self.geometry.goal_width / 2.0 + goal_offset)
    }
}

impl Calculator<WorldFrame, TacticalField> for KeeperStateCalc {
    type Output = KeeperState;

    fn needs_to_run(&self, ctx: &Ctx<'_>) -> bool {
        ctx.world.keeper().is_some()
    }

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<KeeperState> {
        let world = ctx.world;
        let Some(keeper) = world.keeper() else {
            return Ok(KeeperState::Normal);
        };
        if world.game_state.is_stopped() || world.game_state.is_ball_placement() {
            return Ok(KeeperState::Stopped);
        }

        let intercepting = ctx.previous.is_some_and(|p| p.keeper_state == KeeperState::InterceptBall);
        let mut min_speed = ctx.tunables.get(&KEEPER_INTERCEPT_SPEED);
        if intercepting {
            min_speed /= 2.0;
        }
        if self.ball_on_goal(&world.ball, min_speed, ctx.tunables.get(&KEEPER_GOAL_OFFSET)) {
            return Ok(KeeperState::InterceptBall);
        }

        let d = ctx.input(&self.distances)?;
        let foe_at_ball = d
            .closest_theirs()
            .is_some_and(|t| t.dist < ctx.tunables.get(&KEEPER_FOE_BALL_DIST));
        let ball_near_area = self
            .geometry
            .in_our_penalty_area(world.ball.pos, ctx.tunables.get(&KEEPER_DANGER_ZONE));
        if foe_at_ball && ball_near_area {
            return Ok(KeeperState::GoOut);
        }

        if !self.geometry.in_our_penalty_area(keeper.pos, 0.0) {
            return Ok(KeeperState::MoveToPenaltyArea);
        }
        Ok(KeeperState::Normal)
    }
}
