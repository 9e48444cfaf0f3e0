//! The `Behavior` trait: one running role or skill bound to one bot.

use tc_core::BotId;

use crate::{BehaviorInput, BehaviorResult, BotCommand, Role};

/// A behavior instance.
///
/// Created when a bot is assigned a role and dropped when the assignment
/// changes.  Each tick the team driver calls [`update`][Self::update] once,
/// in ascending `BotId` order, and forwards the returned command.
///
/// Implementations must be deterministic: the same sequence of inputs must
/// produce the same sequence of commands.  No wall-clock reads, no global
/// mutable state.
pub trait Behavior<S>: 'static {
    fn role(&self) -> Role;

    fn bot(&self) -> BotId;

    /// Called once, before the first `update`.
    fn start(&mut self, _input: &BehaviorInput<S>) -> BehaviorResult<()> {
        Ok(())
    }

    /// Advance at most one transition and emit this tick's command.
    fn update(&mut self, input: &BehaviorInput<S>) -> BehaviorResult<BotCommand>;

    /// Name of the active state, for logs and tick output.
    fn state_name(&self) -> &'static str;
}
