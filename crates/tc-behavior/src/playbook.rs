//! The `Playbook` trait: which roles exist this tick and how to fill them.

use std::collections::BTreeMap;

use tc_core::BotId;

use crate::{Behavior, BehaviorInput, BehaviorResult, Role};

/// Maps a snapshot to a role assignment and roles to behavior instances.
///
/// The team driver asks for [`desired_roles`][Self::desired_roles] once per
/// tick and calls [`make_behavior`][Self::make_behavior] only for bots whose
/// role changed.
pub trait Playbook<S>: 'static {
    /// Role per bot, derived from this tick's snapshot.
    fn desired_roles(&self, snapshot: &S) -> BTreeMap<BotId, Role>;

    /// A fresh behavior instance for `bot` in `role`.
    fn make_behavior(
        &self,
        role:  Role,
        bot:   BotId,
        input: &BehaviorInput<S>,
    ) -> BehaviorResult<Box<dyn Behavior<S>>>;
}
