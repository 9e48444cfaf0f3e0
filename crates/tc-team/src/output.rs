//! What one tick of a team context produces.

use std::collections::BTreeMap;
use std::sync::Arc;

use tc_behavior::{BotCommand, Role};
use tc_core::{BotId, Tick};
use tc_graph::ExecutionReport;

/// Role and active state of one bot's behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BehaviorState {
    pub role:  Role,
    pub state: &'static str,
}

/// Everything the downstream dispatch and observability layers get for one
/// tick.
#[derive(Clone, Debug)]
pub struct TickOutput<S> {
    pub tick:            Tick,
    pub snapshot:        Arc<S>,
    /// One command per visible bot with a role, in ascending `BotId` order.
    pub commands:        Vec<BotCommand>,
    pub executions:      ExecutionReport,
    pub behavior_states: BTreeMap<BotId, BehaviorState>,
}

impl<S> TickOutput<S> {
    pub fn command_for(&self, bot: BotId) -> Option<&BotCommand> {
        self.commands.iter().find(|c| c.bot == bot)
    }
}
