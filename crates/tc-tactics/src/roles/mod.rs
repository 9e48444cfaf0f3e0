//! Role behaviors and the playbook that hands them out.

mod attacker;
mod keeper;
mod support;

use std::collections::BTreeMap;

use tc_behavior::{Behavior, BehaviorInput, BehaviorResult, Playbook, Role};
use tc_core::BotId;

use crate::TacticalField;

pub use attacker::{AttackerBehavior, AttackerData, AttackerEvent, AttackerState, attacker};
pub use keeper::{KeeperBehavior, keeper};
pub use support::{SupportBehavior, SupportState, support};

/// Roles from the snapshot's `desired_roles`; one behavior type per role.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardPlaybook;

impl Playbook<TacticalField> for StandardPlaybook {
    fn desired_roles(&self, snapshot: &TacticalField) -> BTreeMap<BotId, Role> {
        snapshot.desired_roles.clone()
    }

    fn make_behavior(
        &self,
        role:  Role,
        bot:   BotId,
        input: &BehaviorInput<TacticalField>,
    ) -> BehaviorResult<Box<dyn Behavior<TacticalField>>> {
        let behavior: Box<dyn Behavior<TacticalField>> = match role {
            Role::Keeper => Box::new(keeper(bot, input)?),
            Role::Attacker => Box::new(attacker(bot, input)?),
            Role::Support => Box::new(support(bot, input)?),
        };
        Ok(behavior)
    }
}
