//! Unit tests for tc-fsm.

#[cfg(test)]
mod helpers {
    use crate::{FnState, StateMachine};

    #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
    pub enum Phase {
        Idle,
        Active,
        Kick,
        Approach,
        Protect,
    }

    #[derive(Copy, Clone, PartialEq, Eq, Debug)]
    pub enum Ev {
        Go,
        Halt,
    }

    #[derive(Default)]
    pub struct Probe {
        pub ball_close:   bool,
        pub ball_moving:  bool,
        pub opp_touching: bool,
        /// Position label stamped into the log.
        pub step:         usize,
        pub log:          Vec<(&'static str, Phase, usize)>,
    }

    /// A state that logs entry, update, and exit with the current step.
    pub fn logged(phase: Phase) -> FnState<Probe> {
        FnState::new()
            .entry(move |c: &mut Probe| {
                let step = c.step;
                c.log.push(("entry", phase, step));
            })
            .update(move |c: &mut Probe| {
                let step = c.step;
                c.log.push(("update", phase, step));
            })
            .exit(move |c: &mut Probe| {
                let step = c.step;
                c.log.push(("exit", phase, step));
            })
    }

    pub fn machine(phases: &[Phase]) -> StateMachine<Phase, Ev, Probe> {
        let mut sm = StateMachine::new("test");
        for &p in phases {
            sm.add_state(p, logged(p));
        }
        sm
    }

    pub fn count(log: &[(&'static str, Phase, usize)], kind: &str) -> usize {
        log.iter().filter(|(k, _, _)| *k == kind).count()
    }
}

#[cfg(test)]
mod transition_tests {
    use super::helpers::{Phase, Probe, count, machine};
    use crate::{TransitionKind, Trigger};

    #[test]
    fn guard_driven_idle_active_sequence() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::guard(|c: &Probe| c.ball_close), Phase::Active)
            .add_transition(Phase::Active, Trigger::guard(|c: &Probe| !c.ball_close), Phase::Idle);
        sm.set_initial(Phase::Idle).unwrap();

        let mut ctx = Probe { step: 1, ..Probe::default() };
        sm.start(&mut ctx).unwrap();
        let mut seq = vec![sm.current().unwrap()];
        for (i, close) in [true, true, true, false, false].into_iter().enumerate() {
            ctx.step = i + 2;
            ctx.ball_close = close;
            sm.update(&mut ctx).unwrap();
            seq.push(sm.current().unwrap());
        }

        use Phase::{Active, Idle};
        assert_eq!(seq, [Idle, Active, Active, Active, Idle, Idle]);

        let entries: Vec<_> = ctx
            .log
            .iter()
            .filter(|(k, _, _)| *k == "entry")
            .map(|&(_, p, step)| (p, step))
            .collect();
        // Initial entry at start, then one per transition.
        assert_eq!(entries, [(Idle, 1), (Active, 2), (Idle, 5)]);
    }

    #[test]
    fn global_transition_beats_local() {
        let mut sm = machine(&[Phase::Kick, Phase::Approach, Phase::Protect]);
        sm.add_transition(Phase::Kick, Trigger::guard(|c: &Probe| c.ball_moving), Phase::Approach)
            .add_global_transition(Trigger::guard(|c: &Probe| c.opp_touching), Phase::Protect);
        sm.set_initial(Phase::Kick).unwrap();

        let mut ctx = Probe { ball_moving: true, opp_touching: true, ..Probe::default() };
        sm.start(&mut ctx).unwrap();
        let change = sm.update(&mut ctx).unwrap().unwrap();

        assert_eq!(sm.current(), Some(Phase::Protect));
        assert_eq!((change.from, change.to, change.kind), (Phase::Kick, Phase::Protect, TransitionKind::Global));
        // The current state's update action does not run when a global fires.
        assert_eq!(count(&ctx.log, "update"), 0);
    }

    #[test]
    fn global_transition_to_current_state_does_not_fire() {
        let mut sm = machine(&[Phase::Kick, Phase::Protect]);
        sm.add_global_transition(Trigger::guard(|c: &Probe| c.opp_touching), Phase::Protect);
        sm.set_initial(Phase::Kick).unwrap();

        let mut ctx = Probe { opp_touching: true, ..Probe::default() };
        sm.start(&mut ctx).unwrap();
        assert!(sm.update(&mut ctx).unwrap().is_some());
        for _ in 0..3 {
            assert!(sm.update(&mut ctx).unwrap().is_none());
        }
        assert_eq!(sm.current(), Some(Phase::Protect));
        assert_eq!(sm.ticks_in_state(), 3);
        assert_eq!(count(&ctx.log, "entry"), 2);
        assert_eq!(count(&ctx.log, "update"), 3);
    }

    #[test]
    fn at_most_one_transition_per_update() {
        let mut sm = machine(&[Phase::Idle, Phase::Active, Phase::Kick]);
        sm.add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Active)
            .add_transition(Phase::Active, Trigger::guard(|_: &Probe| true), Phase::Kick);
        sm.set_initial(Phase::Idle).unwrap();

        let mut ctx = Probe::default();
        sm.start(&mut ctx).unwrap();
        ctx.log.clear();

        let change = sm.update(&mut ctx).unwrap().unwrap();
        assert_eq!((change.from, change.to), (Phase::Idle, Phase::Active));
        assert_eq!(count(&ctx.log, "exit"), 1);
        assert_eq!(count(&ctx.log, "entry"), 1);
        assert_eq!(sm.previous(), Some(Phase::Idle));

        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Kick));
    }

    #[test]
    fn first_matching_transition_wins() {
        let mut sm = machine(&[Phase::Idle, Phase::Active, Phase::Kick]);
        sm.add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Kick)
            .add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();
        sm.start(&mut ctx).unwrap();
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Kick));
    }

    #[test]
    fn exit_runs_before_entry() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::guard(|c: &Probe| c.ball_close), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();
        sm.start(&mut ctx).unwrap();
        ctx.ball_close = true;
        sm.update(&mut ctx).unwrap();

        let tail: Vec<_> = ctx.log.iter().map(|&(k, p, _)| (k, p)).collect();
        assert_eq!(
            tail,
            [
                ("entry", Phase::Idle),
                ("update", Phase::Idle),
                ("exit", Phase::Idle),
                ("entry", Phase::Active),
            ]
        );
    }
}

#[cfg(test)]
mod event_tests {
    use super::helpers::{Ev, Phase, Probe, machine};
    use crate::Trigger;

    #[test]
    fn event_fires_on_next_update_only() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::event(Ev::Go), Phase::Active)
            .add_transition(Phase::Active, Trigger::event(Ev::Halt), Phase::Idle);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();

        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));

        sm.trigger_event(Ev::Go);
        assert_eq!(sm.pending_event(), Some(&Ev::Go));
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Active));
        assert_eq!(sm.pending_event(), None);
    }

    #[test]
    fn unmatched_event_is_not_carried_over() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::event(Ev::Go), Phase::Active)
            .add_transition(Phase::Active, Trigger::event(Ev::Halt), Phase::Idle);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();

        // Halt means nothing in Idle and is dropped.
        sm.trigger_event(Ev::Halt);
        sm.update(&mut ctx).unwrap();
        sm.trigger_event(Ev::Go);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Active));
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Active));
    }

    #[test]
    fn latest_event_replaces_earlier_one() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::event(Ev::Go), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();

        sm.trigger_event(Ev::Go);
        sm.trigger_event(Ev::Halt);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));
    }

    #[test]
    fn event_if_needs_event_and_guard() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::event_if(Ev::Go, |c: &Probe| c.ball_close), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();
        sm.start(&mut ctx).unwrap();

        sm.trigger_event(Ev::Go);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));

        ctx.ball_close = true;
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));

        sm.trigger_event(Ev::Go);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Active));
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::helpers::{Ev, Phase, Probe, count, machine};
    use crate::{FsmError, Trigger};

    #[test]
    fn update_without_initial_is_an_error() {
        let mut sm = machine(&[Phase::Idle]);
        let err = sm.update(&mut Probe::default()).unwrap_err();
        assert_eq!(err, FsmError::NoInitialState { machine: "test" });
    }

    #[test]
    fn initial_can_only_be_set_once() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.set_initial(Phase::Idle).unwrap();
        assert!(matches!(sm.set_initial(Phase::Active), Err(FsmError::InitialAlreadySet { .. })));
    }

    #[test]
    fn destination_without_handler_is_an_error() {
        let mut sm = machine(&[Phase::Idle]);
        sm.add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Protect);
        sm.set_initial(Phase::Idle).unwrap();
        let err = sm.start(&mut Probe::default()).unwrap_err();
        assert_eq!(err, FsmError::UnknownState { machine: "test", state: "Protect".into() });
    }

    #[test]
    fn lazy_start_on_first_update() {
        let mut sm = machine(&[Phase::Idle]);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();
        assert!(!sm.is_started());
        assert!(sm.update(&mut ctx).unwrap().is_none());
        assert!(sm.is_started());
        assert_eq!(count(&ctx.log, "entry"), 1);
        assert_eq!(count(&ctx.log, "update"), 0);

        sm.update(&mut ctx).unwrap();
        assert_eq!(count(&ctx.log, "update"), 1);
    }

    #[test]
    fn lazy_start_does_not_also_transition() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();

        assert!(sm.update(&mut ctx).unwrap().is_none());
        assert_eq!(sm.current(), Some(Phase::Idle));
        let entries: Vec<_> = ctx.log.iter().map(|&(k, p, _)| (k, p)).collect();
        assert_eq!(entries, [("entry", Phase::Idle)]);

        let change = sm.update(&mut ctx).unwrap().unwrap();
        assert_eq!((change.from, change.to), (Phase::Idle, Phase::Active));
        assert_eq!(count(&ctx.log, "entry"), 2);
    }

    #[test]
    fn lazy_start_drops_pending_event() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::event(Ev::Go), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();

        sm.trigger_event(Ev::Go);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.pending_event(), None);
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));
    }

    #[test]
    fn reset_reenters_initial() {
        let mut sm = machine(&[Phase::Idle, Phase::Active]);
        sm.add_transition(Phase::Idle, Trigger::guard(|_: &Probe| true), Phase::Active);
        sm.set_initial(Phase::Idle).unwrap();
        let mut ctx = Probe::default();
        sm.start(&mut ctx).unwrap();
        sm.update(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Active));

        sm.reset();
        assert_eq!(sm.current(), None);
        sm.start(&mut ctx).unwrap();
        assert_eq!(sm.current(), Some(Phase::Idle));
        assert_eq!(count(&ctx.log, "entry"), 3);
    }
}
