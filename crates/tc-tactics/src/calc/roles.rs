//! `DesiredRolesCalc`: role per bot for the team driver to assign.

use std::collections::BTreeMap;

use tc_behavior::Role;
use tc_core::{BotId, WorldFrame};
use tc_graph::{Binding, CalcResult, Calculator};

use super::Ctx;
use crate::TacticalField;

/// Keeper for the announced keeper, Attacker for the ball-handling bot (or,
/// without one, the field bot closest to the ball), Support for the rest.
pub struct DesiredRolesCalc {
    handling: Binding<Option<BotId>>,
}

impl DesiredRolesCalc {
    pub fn new(handling: Binding<Option<BotId>>) -> Self {
        Self { handling }
    }
}

impl Calculator<WorldFrame, TacticalField> for DesiredRolesCalc {
    type Output = BTreeMap<BotId, Role>;

    fn compute(&mut self, ctx: &Ctx<'_>) -> CalcResult<BTreeMap<BotId, Role>> {
        let world = ctx.world;
        let keeper = world.keeper_id.filter(|id| world.our_bots.contains_key(id));
        let ball = world.ball.pos;

        let handling = *ctx.input(&self.handling)?;
        let attacker = handling.or_else(|| {
            world
                .our_bots
                .values()
                .filter(|b| Some(b.id) != keeper)
                .min_by(|a, b| a.pos.distance_to(ball).total_cmp(&b.pos.distance_to(ball)))
                .map(|b| b.id)
        });

        Ok(world
            .our_bots
            .keys()
            .map(|&id| {
                let role = if Some(id) == keeper {
                    Role::Keeper
                } else if Some(id) == attacker {
                    Role::Attacker
                } else {
                    Role::Support
                };
                (id, role)
            })
            .collect())
    }
}
