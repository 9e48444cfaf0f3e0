//! Skirmish detection and the strategy to get out of one.

use tc_core::{BotId, WorldFrame};
use tc_graph::{Binding, CalcResult, Calculator};

use super::Ctx;
use crate::field::{BallDistances, SkirmishInfo, SkirmishStrategy};
use crate::tunables::SKIRMISH_RADIUS;
use crate::TacticalField;

// ── SkirmishDetectorCalc ──────────────────────────────────────────────────────

/// A skirmish is on when our closest bot and at least one opponent are both
/// within `skirmish.radius` of the ball.
pub struct SkirmishDetectorCalc {
    distances: Binding<BallDistances>,
}

impl SkirmishDetectorCalc {
    pub fn new(distances: Binding<BallDistances>) -> Self {
        Self { distances }
    }
}

impl Calculator<WorldFrame, TacticalField> for SkirmishDetectorCalc {
    type Output = SkirmishInfo;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<SkirmishInfo> {
        let d = ctx.input(&self.distances)?;
        let radius = ctx.tunables.get(&SKIRMISH_RADIUS);
        let ours_close = d.closest_ours().is_some_and(|o| o.dist <= radius);
        let enemies: Vec<BotId> =
            d.theirs.iter().take_while(|t| t.dist <= radius).map(|t| t.bot).collect();
        if !ours_close || enemies.is_empty() {
            return Ok(SkirmishInfo::default());
        }
        Ok(SkirmishInfo { active: true, enemies, center: ctx.world.ball.pos })
    }
}

// ── SkirmishStrategyCalc ──────────────────────────────────────────────────────

/// How the ball-handling bot deals with an active skirmish.
///
/// Against a single opponent it dribbles; when outnumbered it shields the
/// ball and names the closest free field bot as supporter.  Published as its
/// own output so downstream units bind to it instead of the detector.
pub struct SkirmishStrategyCalc {
    distances: Binding<BallDistances>,
    handling:  Binding<Option<BotId>>,
    skirmish:  Binding<SkirmishInfo>,
}

impl SkirmishStrategyCalc {
    pub fn new(
        distances: Binding<BallDistances>,
        handling:  Binding<Option<BotId>>,
        skirmish:  Binding<SkirmishInfo>,
    ) -> Self {
        Self { distances, handling, skirmish }
    }
}

impl Calculator<WorldFrame, TacticalField> for SkirmishStrategyCalc {
    type Output = SkirmishStrategy;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<SkirmishStrategy> {
        let info = ctx.input(&self.skirmish)?;
        let Some(handler) = *ctx.input(&self.handling)? else {
            return Ok(SkirmishStrategy::None);
        };
        if !info.active {
            return Ok(SkirmishStrategy::None);
        }
        if info.enemies.len() < 2 {
            return Ok(SkirmishStrategy::Dribble);
        }

        let keeper = ctx.world.keeper_id;
        let supporter = ctx
            .input(&self.distances)?
            .ours
            .iter()
            .map(|bd| bd.bot)
            .find(|&bot| bot != handler && Some(bot) != keeper);
        Ok(SkirmishStrategy::RipFree { supporter })
    }
}
