//! `FsmBehavior`: the pattern every concrete role follows.
//!
//! A role is a [`StateMachine`] wired once at construction, a block of
//! behavior-local data `D`, and an `emit` function that maps the active
//! state to this tick's command.  The machine's context is a
//! [`RoleContext`], which owns a clone of the current [`BehaviorInput`], so
//! guards and actions read the snapshot, the previous snapshot, and the
//! world without borrowing from the team driver.
//!
//! ```text
//! update(input):
//!   ctx.input ← input
//!   events(state, ctx)  → maybe trigger_event
//!   machine.update(ctx) → at most one transition
//!   emit(state, ctx)    → BotCommand (hold position if None)
//! ```

use std::fmt::Debug;

use tc_core::{BotId, TrackedBot};
use tc_fsm::{FsmError, StateMachine};
use tracing::debug;

use crate::{Behavior, BehaviorError, BehaviorInput, BehaviorResult, BotCommand, Role};

/// State identifiers usable by [`FsmBehavior`].
pub trait StateId: Copy + Ord + Debug + 'static {
    fn name(self) -> &'static str;
}

/// Context the state machine of one role runs against.
pub struct RoleContext<S, D> {
    pub bot:   BotId,
    pub input: BehaviorInput<S>,
    /// Behavior-local data: targets, timers, counters.
    pub data:  D,
}

impl<S, D> RoleContext<S, D> {
    /// Our own tracked bot this tick.
    #[inline]
    pub fn me(&self) -> Option<&TrackedBot> {
        self.input.our_bot(self.bot)
    }
}

/// Maps the active state to a command.  `None` means "hold position".
pub type Emit<St, S, D> = fn(St, &RoleContext<S, D>) -> Option<BotCommand>;

/// Derives an event from the active state and context, raised before the
/// machine updates.
pub type EventSource<St, E, S, D> = fn(St, &RoleContext<S, D>) -> Option<E>;

/// A [`Behavior`] driven by a [`StateMachine`].
pub struct FsmBehavior<S, St, E, D> {
    role:    Role,
    machine: StateMachine<St, E, RoleContext<S, D>>,
    ctx:     RoleContext<S, D>,
    emit:    Emit<St, S, D>,
    events:  Option<EventSource<St, E, S, D>>,
}

impl<S, St, E, D> FsmBehavior<S, St, E, D>
where
    S: 'static,
    St: StateId,
    E: PartialEq + Debug + 'static,
    D: 'static,
{
    pub fn new(
        role:    Role,
        bot:     BotId,
        machine: StateMachine<St, E, RoleContext<S, D>>,
        data:    D,
        input:   &BehaviorInput<S>,
        emit:    Emit<St, S, D>,
    ) -> Self {
        Self {
            role,
            machine,
            ctx: RoleContext { bot, input: input.clone(), data },
            emit,
            events: None,
        }
    }

    /// Raise events derived from the context before every update.
    pub fn with_events(mut self, source: EventSource<St, E, S, D>) -> Self {
        self.events = Some(source);
        self
    }

    pub fn current(&self) -> Option<St> {
        self.machine.current()
    }

    pub fn data(&self) -> &D {
        &self.ctx.data
    }

    pub fn machine(&self) -> &StateMachine<St, E, RoleContext<S, D>> {
        &self.machine
    }
}

impl<S, St, E, D> Behavior<S> for FsmBehavior<S, St, E, D>
where
    S: 'static,
    St: StateId,
    E: PartialEq + Debug + 'static,
    D: 'static,
{
    fn role(&self) -> Role {
        self.role
    }

    fn bot(&self) -> BotId {
        self.ctx.bot
    }

    fn start(&mut self, input: &BehaviorInput<S>) -> BehaviorResult<()> {
        self.ctx.input = input.clone();
        self.machine.start(&mut self.ctx)?;
        Ok(())
    }

    fn update(&mut self, input: &BehaviorInput<S>) -> BehaviorResult<BotCommand> {
        self.ctx.input = input.clone();
        let me = self
            .ctx
            .me()
            .cloned()
            .ok_or(BehaviorError::BotMissing(self.ctx.bot))?;

        if let (Some(source), Some(state)) = (self.events, self.machine.current()) {
            if let Some(event) = source(state, &self.ctx) {
                self.machine.trigger_event(event);
            }
        }

        if let Some(change) = self.machine.update(&mut self.ctx)? {
            debug!(
                bot  = %self.ctx.bot,
                role = %self.role,
                from = change.from.name(),
                to   = change.to.name(),
                kind = ?change.kind,
                "behavior state change"
            );
        }

        let state = self
            .machine
            .current()
            .ok_or(FsmError::NoInitialState { machine: self.machine.name() })?;
        Ok((self.emit)(state, &self.ctx).unwrap_or_else(|| BotCommand::hold(&me)))
    }

    fn state_name(&self) -> &'static str {
        self.machine.current().map_or("Unstarted", StateId::name)
    }
}
