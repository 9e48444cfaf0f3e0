//! A behavior that keeps its bot where it is.

use tc_core::BotId;

use crate::{Behavior, BehaviorError, BehaviorInput, BehaviorResult, BotCommand, Role};

/// A [`Behavior`] that always emits a hold-position command.
///
/// Useful as a placeholder in tests and for bots whose role has no content.
pub struct NoopBehavior {
    pub bot:  BotId,
    pub role: Role,
}

impl NoopBehavior {
    pub fn new(bot: BotId, role: Role) -> Self {
        Self { bot, role }
    }
}

impl<S> Behavior<S> for NoopBehavior {
    fn role(&self) -> Role {
        self.role
    }

    fn bot(&self) -> BotId {
        self.bot
    }

    fn update(&mut self, input: &BehaviorInput<S>) -> BehaviorResult<BotCommand> {
        input
            .our_bot(self.bot)
            .map(BotCommand::hold)
            .ok_or(BehaviorError::BotMissing(self.bot))
    }

    fn state_name(&self) -> &'static str {
        "Hold"
    }
}
