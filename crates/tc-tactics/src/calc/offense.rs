//! `OffensiveActionCalc`: what the ball-handling bot does with the ball.

use std::collections::BTreeMap;

use tc_core::{BotId, Geometry, TrackedBot, WorldFrame};
use tc_graph::{Binding, CalcResult, Calculator};

use super::Ctx;
use crate::field::{BallDistances, OffensiveAction, SkirmishStrategy};
use crate::tunables::{DRIBBLE_STEP, PASS_FREE_RADIUS, SHOT_RANGE};
use crate::TacticalField;

/// One action per ball-handling bot, only while the game is running.
///
/// ```text
/// RipFree skirmish        → Protect
/// Dribble skirmish        → Dribble towards their goal
/// within shot_range       → GoalShot at their goal centre
/// free bot closer to goal → Pass to it
/// otherwise               → Dribble towards their goal
/// ```
pub struct OffensiveActionCalc {
    geometry:  Geometry,
    handling:  Binding<Option<BotId>>,
    distances: Binding<BallDistances>,
    strategy:  Binding<SkirmishStrategy>,
}

impl OffensiveActionCalc {
    pub fn new(
        geometry:  Geometry,
        handling:  Binding<Option<BotId>>,
        distances: Binding<BallDistances>,
        strategy:  Binding<SkirmishStrategy>,
    ) -> Self {
        Self { geometry, handling, distances, strategy }
    }

    /// Our field bot closest to their goal that is nearer to it than
    /// `handler` and has no opponent within `free_radius`.
    fn best_receiver<'w>(
        &self,
        world:       &'w WorldFrame,
        handler:     &TrackedBot,
        free_radius: f64,
    ) -> Option<&'w TrackedBot> {
        let goal = self.geometry.their_goal_center();
        let handler_dist = handler.pos.distance_to(goal);
        world
            .our_bots
            .values()
            .filter(|b| b.id != handler.id && Some(b.id) != world.keeper_id)
            .filter(|b| b.pos.distance_to(goal) < handler_dist)
            .filter(|b| world.their_bots.values().all(|t| t.pos.distance_to(b.pos) > free_radius))
            .min_by(|a, b| a.pos.distance_to(goal).total_cmp(&b.pos.distance_to(goal)))
    }
}

impl Calculator<WorldFrame, TacticalField> for OffensiveActionCalc {
    type Output = BTreeMap<BotId, OffensiveAction>;

    fn needs_to_run(&self, ctx: &Ctx<'_>) -> bool {
        ctx.world.game_state.is_running()
    }

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<BTreeMap<BotId, OffensiveAction>> {
        let mut actions = BTreeMap::new();
        let Some(handler_id) = *ctx.input(&self.handling)? else {
            return Ok(actions);
        };
        let world = ctx.world;
        let (Some(handler), Some(_)) =
            (world.our_bot(handler_id), ctx.input(&self.distances)?.ours_of(handler_id))
        else {
            return Ok(actions);
        };

        let goal = self.geometry.their_goal_center();
        let dribble = OffensiveAction::Dribble {
            target: world.ball.pos.step_towards(goal, ctx.tunables.get(&DRIBBLE_STEP)),
        };
        let action = match ctx.input(&self.strategy)? {
            SkirmishStrategy::RipFree { .. } => OffensiveAction::Protect,
            SkirmishStrategy::Dribble => dribble,
            SkirmishStrategy::None if handler.pos.distance_to(goal) <= ctx.tunables.get(&SHOT_RANGE) => {
                OffensiveAction::GoalShot { target: goal }
            }
            SkirmishStrategy::None => self
                .best_receiver(world, handler, ctx.tunables.get(&PASS_FREE_RADIUS))
                .map_or(dribble, |r| OffensiveAction::Pass { receiver: r.id, target: r.pos }),
        };
        actions.insert(handler_id, action);
        Ok(actions)
    }
}
