//! `StateMachine`: states, transition tables, and the update step.

use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::trace;

use crate::{FsmError, FsmResult, State};

// ── Triggers and transitions ──────────────────────────────────────────────────

type Guard<C> = Box<dyn Fn(&C) -> bool>;

/// What makes a transition fire.
pub enum Trigger<E, C> {
    /// The pending event equals `E`.
    Event(E),
    /// The guard returns `true`.
    Guard(Guard<C>),
    /// The pending event equals `E` and the guard returns `true`.
    EventIf(E, Guard<C>),
}

impl<E, C> Trigger<E, C> {
    pub fn event(event: E) -> Self {
        Trigger::Event(event)
    }

    pub fn guard(f: impl Fn(&C) -> bool + 'static) -> Self {
        Trigger::Guard(Box::new(f))
    }

    pub fn event_if(event: E, f: impl Fn(&C) -> bool + 'static) -> Self {
        Trigger::EventIf(event, Box::new(f))
    }
}

impl<E: PartialEq, C> Trigger<E, C> {
    fn matches(&self, pending: Option<&E>, ctx: &C) -> bool {
        match self {
            Trigger::Event(e) => pending == Some(e),
            Trigger::Guard(g) => g(ctx),
            Trigger::EventIf(e, g) => pending == Some(e) && g(ctx),
        }
    }
}

struct Transition<S, E, C> {
    trigger: Trigger<E, C>,
    to:      S,
}

/// Which table a fired transition came from.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TransitionKind {
    Global,
    Local,
}

/// Result of an update that changed state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StateChange<S> {
    pub from: S,
    pub to:   S,
    pub kind: TransitionKind,
}

// ── StateMachine ──────────────────────────────────────────────────────────────

/// A discrete-event automaton over state ids `S`, event tokens `E`, and a
/// context `C` that actions mutate and guards read.
///
/// # Update step
///
/// ```text
/// not started: enter the initial state, drop any pending event, stop
/// event ← take pending event
/// ① global transitions, in registration order, skipping those that target
///   the current state; first match fires
/// ② otherwise: current state's on_update, then its transitions in
///   registration order; first match fires
/// fire: old.on_exit → switch → new.on_entry
/// ```
///
/// At most one transition fires per update.  An event raised with
/// [`trigger_event`][Self::trigger_event] is visible to exactly the next
/// update; a later event raised before that update replaces it.
pub struct StateMachine<S, E, C> {
    name:           &'static str,
    states:         BTreeMap<S, Box<dyn State<C>>>,
    transitions:    BTreeMap<S, Vec<Transition<S, E, C>>>,
    global:         Vec<Transition<S, E, C>>,
    initial:        Option<S>,
    current:        Option<S>,
    previous:       Option<S>,
    pending:        Option<E>,
    ticks_in_state: u64,
}

impl<S, E, C> StateMachine<S, E, C>
where
    S: Copy + Ord + Debug + 'static,
    E: PartialEq + Debug + 'static,
    C: 'static,
{
    /// An empty machine.  `name` appears in logs and errors.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            states:         BTreeMap::new(),
            transitions:    BTreeMap::new(),
            global:         Vec::new(),
            initial:        None,
            current:        None,
            previous:       None,
            pending:        None,
            ticks_in_state: 0,
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register the handler for `id`, replacing any earlier one.
    pub fn add_state(&mut self, id: S, state: impl State<C>) -> &mut Self {
        self.states.insert(id, Box::new(state));
        self
    }

    /// Fix the initial state.  Must be called exactly once.
    pub fn set_initial(&mut self, id: S) -> FsmResult<()> {
        if let Some(existing) = self.initial {
            return Err(FsmError::InitialAlreadySet {
                machine: self.name,
                state:   format!("{existing:?}"),
            });
        }
        self.initial = Some(id);
        Ok(())
    }

    /// Append a transition out of `from`.
    pub fn add_transition(&mut self, from: S, trigger: Trigger<E, C>, to: S) -> &mut Self {
        self.transitions.entry(from).or_default().push(Transition { trigger, to });
        self
    }

    /// Append a transition that is evaluated from every state, before the
    /// current state's own transitions.
    pub fn add_global_transition(&mut self, trigger: Trigger<E, C>, to: S) -> &mut Self {
        self.global.push(Transition { trigger, to });
        self
    }

    // ── Runtime ───────────────────────────────────────────────────────────

    /// Raise `event` for the next update.
    pub fn trigger_event(&mut self, event: E) {
        self.pending = Some(event);
    }

    /// Enter the initial state.
    ///
    /// Checks that the initial state and every transition destination have
    /// a handler.  Calling `start` on a started machine does nothing.
    pub fn start(&mut self, ctx: &mut C) -> FsmResult<()> {
        if self.current.is_some() {
            return Ok(());
        }
        let initial = self.initial.ok_or(FsmError::NoInitialState { machine: self.name })?;
        self.check_handlers(initial)?;

        self.current = Some(initial);
        self.ticks_in_state = 0;
        if let Some(state) = self.states.get_mut(&initial) {
            state.on_entry(ctx);
        }
        trace!(machine = self.name, state = ?initial, "state machine started");
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Returns the state change, if a transition fired.  On an unstarted
    /// machine this enters the initial state and does nothing else: the
    /// initial entry is that tick's one entry action, and any pending event
    /// is dropped.
    pub fn update(&mut self, ctx: &mut C) -> FsmResult<Option<StateChange<S>>> {
        let Some(current) = self.current else {
            self.start(ctx)?;
            self.pending = None;
            return Ok(None);
        };
        let event = self.pending.take();

        let global_hit = {
            let view: &C = ctx;
            self.global
                .iter()
                .find(|t| t.to != current && t.trigger.matches(event.as_ref(), view))
                .map(|t| t.to)
        };
        if let Some(to) = global_hit {
            return self.fire(current, to, TransitionKind::Global, ctx).map(Some);
        }

        if let Some(state) = self.states.get_mut(&current) {
            state.on_update(ctx);
        }

        let local_hit = {
            let view: &C = ctx;
            self.transitions
                .get(&current)
                .and_then(|ts| ts.iter().find(|t| t.trigger.matches(event.as_ref(), view)))
                .map(|t| t.to)
        };
        if let Some(to) = local_hit {
            return self.fire(current, to, TransitionKind::Local, ctx).map(Some);
        }

        self.ticks_in_state += 1;
        Ok(None)
    }

    /// Forget the current state.  The next update re-enters the initial
    /// state; no exit action runs.
    pub fn reset(&mut self) {
        self.current = None;
        self.previous = None;
        self.pending = None;
        self.ticks_in_state = 0;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Active state; `None` before the first start/update.
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// State active before the latest transition.
    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// Completed updates since the current state was entered.
    pub fn ticks_in_state(&self) -> u64 {
        self.ticks_in_state
    }

    pub fn pending_event(&self) -> Option<&E> {
        self.pending.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn fire(
        &mut self,
        from: S,
        to:   S,
        kind: TransitionKind,
        ctx:  &mut C,
    ) -> FsmResult<StateChange<S>> {
        if !self.states.contains_key(&to) {
            return Err(self.unknown(to));
        }
        if let Some(state) = self.states.get_mut(&from) {
            state.on_exit(ctx);
        }
        self.previous = Some(from);
        self.current = Some(to);
        self.ticks_in_state = 0;
        if let Some(state) = self.states.get_mut(&to) {
            state.on_entry(ctx);
        }
        trace!(machine = self.name, ?from, ?to, ?kind, "transition fired");
        Ok(StateChange { from, to, kind })
    }

    fn check_handlers(&self, initial: S) -> FsmResult<()> {
        if !self.states.contains_key(&initial) {
            return Err(self.unknown(initial));
        }
        let destinations = self
            .transitions
            .iter()
            .flat_map(|(from, ts)| std::iter::once(*from).chain(ts.iter().map(|t| t.to)))
            .chain(self.global.iter().map(|t| t.to));
        for id in destinations {
            if !self.states.contains_key(&id) {
                return Err(self.unknown(id));
            }
        }
        Ok(())
    }

    fn unknown(&self, state: S) -> FsmError {
        FsmError::UnknownState { machine: self.name, state: format!("{state:?}") }
    }
}
