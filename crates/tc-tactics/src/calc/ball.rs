//! Ball-centric calculators: distances, contact, possession, responsibility,
//! and the ball-handling bot.

use tc_core::{BotId, Geometry, TrackedBot, Vec2, WorldFrame};
use tc_graph::{Binding, CalcResult, Calculator};
use tracing::debug;

use super::Ctx;
use crate::field::{
    BallContact, BallDistances, BotDistance, LastTouch, Possession, Responsibility,
};
use crate::tunables::{
    CONTACT_MARGIN, HANDLING_STICKY_MARGIN, POSSESSION_GAIN_DIST, POSSESSION_LOSE_DIST,
    RESPONSIBILITY_BIAS,
};
use crate::TacticalField;

// ── BotToBallDistanceCalc ─────────────────────────────────────────────────────

/// Distance of every visible bot to the ball.
#[derive(Default)]
pub struct BotToBallDistanceCalc;

fn sorted_distances<'a>(bots: impl Iterator<Item = &'a TrackedBot>, ball: Vec2) -> Vec<BotDistance> {
    let mut out: Vec<BotDistance> = bots
        .map(|b| BotDistance { bot: b.id, dist: b.pos.distance_to(ball) })
        .collect();
    out.sort_by(|a, b| a.dist.total_cmp(&b.dist).then(a.bot.cmp(&b.bot)));
    out
}

impl Calculator<WorldFrame, TacticalField> for BotToBallDistanceCalc {
    type Output = BallDistances;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<BallDistances> {
        let ball = ctx.world.ball.pos;
        Ok(BallDistances {
            ours:   sorted_distances(ctx.world.our_bots.values(), ball),
            theirs: sorted_distances(ctx.world.their_bots.values(), ball),
        })
    }
}

// ── BotBallContactCalc ────────────────────────────────────────────────────────

/// Bots touching the ball, and the last bot that did.
///
/// Our bots count as touching if their barrier reports contact or they are
/// within reach; opponents only by distance.  While nobody touches the ball
/// the last touch is carried over from the previous snapshot.
pub struct BotBallContactCalc {
    geometry:  Geometry,
    distances: Binding<BallDistances>,
}

impl BotBallContactCalc {
    pub fn new(geometry: Geometry, distances: Binding<BallDistances>) -> Self {
        Self { geometry, distances }
    }
}

impl Calculator<WorldFrame, TacticalField> for BotBallContactCalc {
    type Output = BallContact;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<BallContact> {
        let d = ctx.input(&self.distances)?;
        let reach =
            self.geometry.bot_radius + self.geometry.ball_radius + ctx.tunables.get(&CONTACT_MARGIN);

        let touching_ours: Vec<BotId> = d
            .ours
            .iter()
            .filter(|bd| {
                bd.dist <= reach || ctx.world.our_bot(bd.bot).is_some_and(|b| b.ball_contact)
            })
            .map(|bd| bd.bot)
            .collect();
        let touching_theirs: Vec<BotId> =
            d.theirs.iter().filter(|bd| bd.dist <= reach).map(|bd| bd.bot).collect();

        let last_touch = touching_ours
            .first()
            .map(|&bot| LastTouch { bot, ours: true, tick: ctx.tick })
            .or_else(|| {
                touching_theirs.first().map(|&bot| LastTouch { bot, ours: false, tick: ctx.tick })
            })
            .or_else(|| ctx.previous.and_then(|p| p.ball_contact.last_touch));

        Ok(BallContact { touching_ours, touching_theirs, last_touch })
    }
}

// ── BallPossessionCalc ────────────────────────────────────────────────────────

/// Who has the ball, with hysteresis.
///
/// A side gains possession when its closest bot comes within
/// `possession_gain_dist` and keeps it until that bot is farther than
/// `possession_lose_dist`.
pub struct BallPossessionCalc {
    distances: Binding<BallDistances>,
    ours:      bool,
    theirs:    bool,
}

impl BallPossessionCalc {
    pub fn new(distances: Binding<BallDistances>) -> Self {
        Self { distances, ours: false, theirs: false }
    }
}

impl Calculator<WorldFrame, TacticalField> for BallPossessionCalc {
    type Output = Possession;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<Possession> {
        let d = ctx.input(&self.distances)?;
        let gain = ctx.tunables.get(&POSSESSION_GAIN_DIST);
        let lose = ctx.tunables.get(&POSSESSION_LOSE_DIST);
        let holds = |held: bool, closest: Option<&BotDistance>| {
            closest.is_some_and(|c| c.dist <= if held { lose } else { gain })
        };

        self.ours = holds(self.ours, d.closest_ours());
        self.theirs = holds(self.theirs, d.closest_theirs());

        Ok(match (self.ours, self.theirs) {
            (true, true) => Possession::Contested,
            (true, false) => Possession::Ours,
            (false, true) => Possession::Theirs,
            (false, false) => Possession::Free,
        })
    }

    fn reset(&mut self) {
        self.ours = false;
        self.theirs = false;
    }
}

// ── BallResponsibilityCalc ────────────────────────────────────────────────────

/// Offense when our closest bot is not clearly farther from the ball than
/// theirs.
pub struct BallResponsibilityCalc {
    distances: Binding<BallDistances>,
}

impl BallResponsibilityCalc {
    pub fn new(distances: Binding<BallDistances>) -> Self {
        Self { distances }
    }
}

impl Calculator<WorldFrame, TacticalField> for BallResponsibilityCalc {
    type Output = Responsibility;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<Responsibility> {
        let d = ctx.input(&self.distances)?;
        let bias = ctx.tunables.get(&RESPONSIBILITY_BIAS);
        Ok(match (d.closest_ours(), d.closest_theirs()) {
            (None, _) => Responsibility::Undefined,
            (Some(_), None) => Responsibility::Offense,
            (Some(o), Some(t)) if o.dist <= t.dist * bias => Responsibility::Offense,
            (Some(_), Some(_)) => Responsibility::Defense,
        })
    }
}

// ── BallHandlingBotCalc ───────────────────────────────────────────────────────

/// The field bot that deals with the ball while we are on offense.
///
/// The keeper is never chosen.  The previous handling bot stays in charge
/// unless another bot is closer by more than `handling_sticky_margin`.
pub struct BallHandlingBotCalc {
    distances:      Binding<BallDistances>,
    responsibility: Binding<Responsibility>,
}

impl BallHandlingBotCalc {
    pub fn new(distances: Binding<BallDistances>, responsibility: Binding<Responsibility>) -> Self {
        Self { distances, responsibility }
    }
}

impl Calculator<WorldFrame, TacticalField> for BallHandlingBotCalc {
    type Output = Option<BotId>;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<Option<BotId>> {
        if *ctx.input(&self.responsibility)? != Responsibility::Offense {
            return Ok(None);
        }
        let d = ctx.input(&self.distances)?;
        let keeper = ctx.world.keeper_id;
        let Some(best) = d.ours.iter().find(|bd| Some(bd.bot) != keeper) else {
            return Ok(None);
        };

        let margin = ctx.tunables.get(&HANDLING_STICKY_MARGIN);
        let sticky = ctx
            .previous
            .and_then(|p| p.ball_handling_bot)
            .filter(|&bot| Some(bot) != keeper)
            .and_then(|bot| d.ours_of(bot).map(|dist| (bot, dist)));
        let chosen = match sticky {
            Some((bot, dist)) if dist <= best.dist + margin => bot,
            _ => best.bot,
        };
        if let Some(prev) = sticky.map(|(bot, _)| bot).filter(|&bot| bot != chosen) {
            debug!(tick = %ctx.tick, from = %prev, to = %chosen, "ball-handling bot changed");
        }
        Ok(Some(chosen))
    }
}
