//! Unit tests for tc-tactics.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use tc_behavior::BehaviorInput;
    use tc_config::TunableTable;
    use tc_core::{BotId, GameState, Geometry, TeamColor, Tick, TrackedBot, Vec2, WorldFrame};

    use crate::{TacticalField, TacticalGraph, standard_graph};

    pub fn bot(id: u8, x: f64, y: f64) -> TrackedBot {
        TrackedBot::new(BotId(id), Vec2::new(x, y))
    }

    /// A running-game frame with the ball at rest at `(x, y)`.
    pub fn world(x: f64, y: f64) -> WorldFrame {
        let mut w = WorldFrame::empty(Tick::ZERO);
        w.ball.pos = Vec2::new(x, y);
        w.game_state = GameState::Running;
        w
    }

    pub fn graph() -> TacticalGraph {
        let mut g = standard_graph(&Geometry::default()).unwrap();
        g.start(&TunableTable::new()).unwrap();
        g
    }

    pub fn run(g: &mut TacticalGraph, w: &WorldFrame) -> Arc<TacticalField> {
        g.tick(w, &TunableTable::new()).unwrap().0
    }

    pub fn input(
        world:    WorldFrame,
        snapshot: TacticalField,
        previous: Option<TacticalField>,
    ) -> BehaviorInput<TacticalField> {
        BehaviorInput {
            tick:     world.tick,
            team:     TeamColor::Blue,
            geometry: Arc::new(Geometry::default()),
            world:    Arc::new(world),
            snapshot: Arc::new(snapshot),
            previous: previous.map(Arc::new),
            tunables: Arc::new(TunableTable::new()),
        }
    }
}

// ── Graph wiring ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod wiring_tests {
    use tc_core::Geometry;

    use super::helpers::graph;
    use crate::standard_builder;

    #[test]
    fn standard_wiring_is_in_order() {
        let (builder, _) = standard_builder(&Geometry::default());
        assert!(builder.violations().is_empty());
        assert_eq!(builder.len(), 10);
    }

    #[test]
    fn every_field_has_one_connector() {
        let g = graph();
        let connectors = g.connectors();
        assert_eq!(connectors.len(), 10);
        let mut fields: Vec<_> = connectors.iter().map(|c| c.field).collect();
        fields.sort_unstable();
        fields.dedup();
        assert_eq!(fields.len(), 10);
        assert_eq!(g.unit_names()[0], "BotToBallDistanceCalc");
        assert_eq!(g.unit_names()[9], "DesiredRolesCalc");
    }
}

// ── Ball calculators ──────────────────────────────────────────────────────────

#[cfg(test)]
mod ball_tests {
    use tc_core::BotId;

    use super::helpers::{bot, graph, run, world};
    use crate::{Possession, Responsibility};

    #[test]
    fn distances_sorted_per_team() {
        let w = world(0.0, 0.0)
            .with_our_bot(bot(1, 800.0, 0.0))
            .with_our_bot(bot(2, 300.0, 0.0))
            .with_their_bot(bot(1, 0.0, 500.0));
        let snap = run(&mut graph(), &w);
        let ours: Vec<_> = snap.ball_distances.ours.iter().map(|d| d.bot).collect();
        assert_eq!(ours, vec![BotId(2), BotId(1)]);
        assert_eq!(snap.ball_distances.closest_theirs().map(|d| d.dist), Some(500.0));
        assert_eq!(snap.ball_distances.ours_of(BotId(1)), Some(800.0));
    }

    #[test]
    fn contact_and_last_touch_carry_over() {
        let mut g = graph();
        let snap = run(&mut g, &world(0.0, 0.0).with_our_bot(bot(1, 100.0, 0.0)));
        assert_eq!(snap.ball_contact.touching_ours, vec![BotId(1)]);
        let touch = snap.ball_contact.last_touch.unwrap();
        assert!(touch.ours);

        // Nobody near the ball: last touch comes from the previous snapshot.
        let snap = run(&mut g, &world(0.0, 0.0).with_our_bot(bot(1, 1_000.0, 0.0)));
        assert!(snap.ball_contact.touching_ours.is_empty());
        assert_eq!(snap.ball_contact.last_touch, Some(touch));
    }

    #[test]
    fn barrier_counts_as_contact() {
        let mut b = bot(3, 500.0, 0.0);
        b.ball_contact = true;
        let snap = run(&mut graph(), &world(0.0, 0.0).with_our_bot(b));
        assert_eq!(snap.ball_contact.touching_ours, vec![BotId(3)]);
    }

    #[test]
    fn possession_has_hysteresis() {
        let mut g = graph();
        let at = |d: f64| world(0.0, 0.0).with_our_bot(bot(1, d, 0.0));
        assert_eq!(run(&mut g, &at(140.0)).possession, Possession::Ours);
        assert_eq!(run(&mut g, &at(200.0)).possession, Possession::Ours);
        assert_eq!(run(&mut g, &at(300.0)).possession, Possession::Free);
        assert_eq!(run(&mut g, &at(200.0)).possession, Possession::Free);
    }

    #[test]
    fn possession_contested() {
        let w = world(0.0, 0.0).with_our_bot(bot(1, 100.0, 0.0)).with_their_bot(bot(1, -100.0, 0.0));
        assert_eq!(run(&mut graph(), &w).possession, Possession::Contested);
    }

    #[test]
    fn responsibility_uses_bias() {
        let w = world(0.0, 0.0).with_our_bot(bot(1, 1_000.0, 0.0)).with_their_bot(bot(1, 500.0, 0.0));
        assert_eq!(run(&mut graph(), &w).responsibility, Responsibility::Defense);

        let w = world(0.0, 0.0).with_our_bot(bot(1, 550.0, 0.0)).with_their_bot(bot(1, 500.0, 0.0));
        assert_eq!(run(&mut graph(), &w).responsibility, Responsibility::Offense);

        assert_eq!(run(&mut graph(), &world(0.0, 0.0)).responsibility, Responsibility::Undefined);
    }

    #[test]
    fn handling_bot_is_sticky_and_never_keeper() {
        let mut g = graph();
        let at = |d1: f64, d2: f64| {
            let mut w = world(0.0, 0.0)
                .with_our_bot(bot(0, 100.0, 0.0))
                .with_our_bot(bot(1, d1, 0.0))
                .with_our_bot(bot(2, d2, 0.0));
            w.keeper_id = Some(BotId(0));
            w
        };
        assert_eq!(run(&mut g, &at(500.0, 700.0)).ball_handling_bot, Some(BotId(1)));
        // Bot 2 is closer, but not by more than the sticky margin.
        assert_eq!(run(&mut g, &at(800.0, 600.0)).ball_handling_bot, Some(BotId(1)));
        assert_eq!(run(&mut g, &at(1_200.0, 600.0)).ball_handling_bot, Some(BotId(2)));
    }

    #[test]
    fn no_handling_bot_on_defense() {
        let w = world(0.0, 0.0).with_our_bot(bot(1, 2_000.0, 0.0)).with_their_bot(bot(1, 100.0, 0.0));
        assert_eq!(run(&mut graph(), &w).ball_handling_bot, None);
    }
}

// ── Keeper ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod keeper_calc_tests {
    use tc_config::TunableTable;
    use tc_core::{BotId, GameState, Vec2, WorldFrame};

    use super::helpers::{bot, graph, run, world};
    use crate::KeeperState;

    fn with_keeper(mut w: WorldFrame, x: f64) -> WorldFrame {
        w = w.with_our_bot(bot(0, x, 0.0));
        w.keeper_id = Some(BotId(0));
        w
    }

    #[test]
    fn skipped_without_keeper() {
        let mut g = graph();
        let (snap, report) = g.tick(&world(0.0, 0.0), &TunableTable::new()).unwrap();
        assert!(!report.get("KeeperStateCalc").unwrap().ran);
        assert_eq!(snap.keeper_state, KeeperState::Normal);
    }

    #[test]
    fn stopped_game() {
        let mut w = with_keeper(world(0.0, 0.0), -4_300.0);
        w.game_state = GameState::Stop;
        assert_eq!(run(&mut graph(), &w).keeper_state, KeeperState::Stopped);
    }

    #[test]
    fn intercepts_ball_on_goal_and_holds_it() {
        let mut g = graph();
        let mut w = with_keeper(world(-2_000.0, 0.0), -4_300.0);
        w.ball.vel = Vec2::new(-3.0, 0.0);
        assert_eq!(run(&mut g, &w).keeper_state, KeeperState::InterceptBall);

        // Slower than the intercept speed, but above half of it.
        w.ball.vel = Vec2::new(-0.4, 0.0);
        assert_eq!(run(&mut g, &w).keeper_state, KeeperState::InterceptBall);
        assert_eq!(run(&mut graph(), &w).keeper_state, KeeperState::Normal);
    }

    #[test]
    fn ball_wide_of_goal_is_not_intercepted() {
        let mut w = with_keeper(world(-2_000.0, 0.0), -4_300.0);
        w.ball.vel = Vec2::new(-3.0, 3.0);
        assert_eq!(run(&mut graph(), &w).keeper_state, KeeperState::Normal);
    }

    #[test]
    fn goes_out_against_foe_at_ball() {
        let w = with_keeper(world(-3_350.0, 0.0), -4_300.0).with_their_bot(bot(1, -3_300.0, 0.0));
        assert_eq!(run(&mut graph(), &w).keeper_state, KeeperState::GoOut);
    }

    #[test]
    fn returns_to_penalty_area() {
        let w = with_keeper(world(0.0, 0.0), -3_000.0);
        assert_eq!(run(&mut graph(), &w).keeper_state, KeeperState::MoveToPenaltyArea);
    }
}

// ── Skirmish and offense ──────────────────────────────────────────────────────

#[cfg(test)]
mod offense_tests {
    use tc_config::TunableTable;
    use tc_core::{BotId, GameState, Vec2};

    use super::helpers::{bot, graph, run, world};
    use crate::{OffensiveAction, SkirmishStrategy};

    #[test]
    fn outnumbered_skirmish_rips_free() {
        let w = world(0.0, 0.0)
            .with_our_bot(bot(1, 200.0, 0.0))
            .with_our_bot(bot(2, 2_000.0, 0.0))
            .with_their_bot(bot(1, -300.0, 0.0))
            .with_their_bot(bot(2, 0.0, 350.0));
        let snap = run(&mut graph(), &w);
        assert!(snap.skirmish.active);
        assert_eq!(snap.skirmish.enemies, vec![BotId(1), BotId(2)]);
        assert_eq!(snap.skirmish_strategy, SkirmishStrategy::RipFree { supporter: Some(BotId(2)) });
        assert_eq!(snap.offensive_action(BotId(1)), Some(&OffensiveAction::Protect));
    }

    #[test]
    fn single_enemy_skirmish_dribbles() {
        let w = world(0.0, 0.0).with_our_bot(bot(1, 200.0, 0.0)).with_their_bot(bot(1, -300.0, 0.0));
        let snap = run(&mut graph(), &w);
        assert_eq!(snap.skirmish_strategy, SkirmishStrategy::Dribble);
        assert_eq!(
            snap.offensive_action(BotId(1)),
            Some(&OffensiveAction::Dribble { target: Vec2::new(500.0, 0.0) })
        );
    }

    #[test]
    fn shoots_in_range() {
        let w = world(3_000.0, 0.0).with_our_bot(bot(1, 2_900.0, 0.0));
        let snap = run(&mut graph(), &w);
        assert_eq!(
            snap.offensive_action(BotId(1)),
            Some(&OffensiveAction::GoalShot { target: Vec2::new(4_500.0, 0.0) })
        );
    }

    #[test]
    fn passes_to_free_bot_nearer_goal() {
        let w = world(-2_000.0, 0.0)
            .with_our_bot(bot(1, -2_100.0, 0.0))
            .with_our_bot(bot(2, 1_000.0, 500.0));
        let snap = run(&mut graph(), &w);
        assert_eq!(
            snap.offensive_action(BotId(1)),
            Some(&OffensiveAction::Pass { receiver: BotId(2), target: Vec2::new(1_000.0, 500.0) })
        );
    }

    #[test]
    fn marked_receiver_is_not_passed_to() {
        let w = world(-2_000.0, 0.0)
            .with_our_bot(bot(1, -2_100.0, 0.0))
            .with_our_bot(bot(2, 1_000.0, 500.0))
            .with_their_bot(bot(1, 1_200.0, 500.0));
        let snap = run(&mut graph(), &w);
        assert!(matches!(snap.offensive_action(BotId(1)), Some(OffensiveAction::Dribble { .. })));
    }

    #[test]
    fn skipped_unless_running() {
        let mut w = world(3_000.0, 0.0).with_our_bot(bot(1, 2_900.0, 0.0));
        w.game_state = GameState::Halt;
        let (snap, report) = graph().tick(&w, &TunableTable::new()).unwrap();
        assert!(snap.offensive_actions.is_empty());
        assert!(!report.get("OffensiveActionCalc").unwrap().ran);
    }
}

// ── Roles ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod desired_roles_tests {
    use tc_behavior::Role;
    use tc_core::BotId;

    use super::helpers::{bot, graph, run, world};

    #[test]
    fn keeper_attacker_support() {
        let mut w = world(-2_000.0, 0.0)
            .with_our_bot(bot(0, -4_300.0, 0.0))
            .with_our_bot(bot(1, -2_100.0, 0.0))
            .with_our_bot(bot(2, 1_000.0, 500.0));
        w.keeper_id = Some(BotId(0));
        let roles = run(&mut graph(), &w).desired_roles.clone();
        assert_eq!(roles.get(&BotId(0)), Some(&Role::Keeper));
        assert_eq!(roles.get(&BotId(1)), Some(&Role::Attacker));
        assert_eq!(roles.get(&BotId(2)), Some(&Role::Support));
    }

    #[test]
    fn attacker_chosen_on_defense_too() {
        let w = world(0.0, 0.0)
            .with_our_bot(bot(1, 2_000.0, 0.0))
            .with_our_bot(bot(2, 3_000.0, 0.0))
            .with_their_bot(bot(1, 100.0, 0.0));
        let roles = run(&mut graph(), &w).desired_roles.clone();
        assert_eq!(roles.get(&BotId(1)), Some(&Role::Attacker));
        assert_eq!(roles.get(&BotId(2)), Some(&Role::Support));
    }
}

#[cfg(test)]
mod attacker_tests {
    use std::collections::BTreeMap;

    use tc_behavior::Behavior;
    use tc_core::{BotId, Vec2};

    use super::helpers::{bot, input, world};
    use crate::roles::{AttackerState, attacker};
    use crate::{OffensiveAction, TacticalField};

    fn shot_field() -> TacticalField {
        TacticalField {
            offensive_actions: BTreeMap::from([(
                BotId(1),
                OffensiveAction::GoalShot { target: Vec2::new(4_500.0, 0.0) },
            )]),
            ..TacticalField::default()
        }
    }

    fn contested(field: &TacticalField) -> TacticalField {
        let mut f = field.clone();
        f.ball_contact.touching_theirs = vec![BotId(5)];
        f
    }

    fn handled_by_me() -> TacticalField {
        TacticalField { ball_handling_bot: Some(BotId(1)), ..TacticalField::default() }
    }

    #[test]
    fn approaches_then_kicks() {
        let first = input(world(0.0, 0.0).with_our_bot(bot(1, -500.0, 0.0)), shot_field(), None);
        let mut b = attacker(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        let cmd = b.update(&first).unwrap();
        assert_eq!(b.current(), Some(AttackerState::ApproachBallLine));
        assert_eq!(cmd.target.pos, Vec2::new(-250.0, 0.0));
        assert!(cmd.kick.is_none());

        let close = input(world(0.0, 0.0).with_our_bot(bot(1, -200.0, 0.0)), shot_field(), None);
        let cmd = b.update(&close).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Kick));
        let kick = cmd.kick.unwrap();
        assert_eq!(kick.target, Vec2::new(4_500.0, 0.0));
        assert_eq!(kick.speed, 6.0);
        assert!(!kick.chip);
        assert!(b.data().kicking);
    }

    #[test]
    fn opponent_touch_during_own_kick_does_not_flap() {
        let w = || world(0.0, 0.0).with_our_bot(bot(1, -200.0, 0.0));
        let first = input(w(), shot_field(), None);
        let mut b = attacker(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        b.update(&first).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Kick));

        // We handled the ball last tick and are kicking: stay.
        b.update(&input(w(), contested(&shot_field()), Some(handled_by_me()))).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Kick));

        // Nobody handled it last tick: the override wins.
        b.update(&input(w(), contested(&shot_field()), None)).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Protect));
        assert!(!b.data().kicking);
    }

    #[test]
    fn global_protect_beats_local_kick_transition() {
        // Close enough to kick, but an opponent touches the ball.
        let first =
            input(world(0.0, 0.0).with_our_bot(bot(1, -200.0, 0.0)), contested(&shot_field()), None);
        let mut b = attacker(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        let cmd = b.update(&first).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Protect));
        assert!(cmd.dribble);
    }

    #[test]
    fn ball_kicked_event_ends_kick() {
        let w = world(0.0, 0.0).with_our_bot(bot(1, -200.0, 0.0));
        let first = input(w.clone(), shot_field(), None);
        let mut b = attacker(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        b.update(&first).unwrap();
        assert_eq!(b.current(), Some(AttackerState::Kick));

        let mut kicked = w;
        kicked.ball.vel = Vec2::new(4.0, 0.0);
        b.update(&input(kicked, shot_field(), None)).unwrap();
        assert_eq!(b.current(), Some(AttackerState::ApproachBallLine));
    }
}

#[cfg(test)]
mod keeper_behavior_tests {
    use tc_behavior::{Behavior, Playbook, Role};
    use tc_core::{BotId, GameState};

    use super::helpers::{bot, input, world};
    use crate::{KeeperState, StandardPlaybook, TacticalField};

    fn field(state: KeeperState) -> TacticalField {
        TacticalField { keeper_state: state, ..TacticalField::default() }
    }

    #[test]
    fn follows_field_and_stops_outside_running_play() {
        let w = world(-2_000.0, 0.0).with_our_bot(bot(0, -4_300.0, 0.0));
        let first = input(w.clone(), field(KeeperState::Normal), None);
        let mut b = StandardPlaybook.make_behavior(Role::Keeper, BotId(0), &first).unwrap();
        assert_eq!(b.state_name(), "Unstarted");
        b.start(&first).unwrap();
        b.update(&first).unwrap();
        assert_eq!(b.state_name(), "Normal");

        let cmd = b.update(&input(w.clone(), field(KeeperState::InterceptBall), None)).unwrap();
        assert_eq!(b.state_name(), "InterceptBall");
        assert_eq!(cmd.target.pos.x, -4_500.0 + 90.0);

        let mut stopped = w.clone();
        stopped.game_state = GameState::BallPlacement { ours: false };
        b.update(&input(stopped.clone(), field(KeeperState::InterceptBall), None)).unwrap();
        assert_eq!(b.state_name(), "Stopped");
        // Still not running: no flapping back to the field's state.
        b.update(&input(stopped, field(KeeperState::InterceptBall), None)).unwrap();
        assert_eq!(b.state_name(), "Stopped");

        b.update(&input(w, field(KeeperState::Normal), None)).unwrap();
        assert_eq!(b.state_name(), "Normal");
    }

    #[test]
    fn playbook_hands_out_roles() {
        let first = input(world(0.0, 0.0).with_our_bot(bot(3, 0.0, 0.0)), TacticalField::default(), None);
        for role in [Role::Keeper, Role::Attacker, Role::Support] {
            let b = StandardPlaybook.make_behavior(role, BotId(3), &first).unwrap();
            assert_eq!(b.role(), role);
            assert_eq!(b.bot(), BotId(3));
        }
    }
}

#[cfg(test)]
mod support_tests {
    use tc_behavior::Behavior;
    use tc_core::BotId;

    use super::helpers::{bot, input, world};
    use crate::roles::support;
    use crate::{SkirmishStrategy, TacticalField};

    #[test]
    fn hangs_back_behind_ball() {
        let first = input(world(1_000.0, 0.0).with_our_bot(bot(1, 0.0, 0.0)), TacticalField::default(), None);
        let mut b = support(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        let cmd = b.update(&first).unwrap();
        assert_eq!(cmd.target.pos.x, 1_000.0 - 1_500.0);
        assert_eq!(b.state_name(), "Position");
    }

    #[test]
    fn called_supporter_joins_skirmish() {
        let field = TacticalField {
            skirmish_strategy: SkirmishStrategy::RipFree { supporter: Some(BotId(1)) },
            ..TacticalField::default()
        };
        let first = input(world(1_000.0, 0.0).with_our_bot(bot(1, 0.0, 0.0)), field, None);
        let mut b = support(BotId(1), &first).unwrap();
        b.start(&first).unwrap();
        let cmd = b.update(&first).unwrap();
        assert!(cmd.target.pos.distance_to(first.world.ball.pos) < 300.0);
    }
}
