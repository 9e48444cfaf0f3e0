//! Unit tests for tc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BotId, TeamColor};

    #[test]
    fn ordering() {
        assert!(BotId(0) < BotId(1));
        assert!(BotId(11) > BotId(3));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(BotId::INVALID.0, u8::MAX);
        assert!(!BotId::INVALID.is_valid());
        assert!(BotId(0).is_valid());
        assert_eq!(BotId::default(), BotId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(BotId(7).to_string(), "BotId(7)");
        assert_eq!(TeamColor::Blue.to_string(), "blue");
    }

    #[test]
    fn team_color_parse_and_opponent() {
        assert_eq!("Yellow".parse::<TeamColor>().unwrap(), TeamColor::Yellow);
        assert_eq!(" blue ".parse::<TeamColor>().unwrap(), TeamColor::Blue);
        assert!("green".parse::<TeamColor>().is_err());
        assert_eq!(TeamColor::Yellow.opponent(), TeamColor::Blue);
    }
}

#[cfg(test)]
mod geo {
    use crate::{Geometry, Vec2};

    #[test]
    fn distance_and_length() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-9);
        assert!((b.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let n = Vec2::new(10.0, 0.0).normalized();
        assert!((n.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn step_towards_moves_exact_distance() {
        let p = Vec2::new(0.0, 0.0).step_towards(Vec2::new(100.0, 0.0), 30.0);
        assert!((p.x - 30.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn segment_distance() {
        let p = Vec2::new(5.0, 5.0);
        let d = p.distance_to_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
        // Beyond the end point: distance to the end point.
        let q = Vec2::new(13.0, 4.0);
        let d = q.distance_to_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn penalty_area_membership() {
        let g = Geometry::default();
        assert!(g.in_our_penalty_area(Vec2::new(-4_200.0, 0.0), 0.0));
        assert!(!g.in_our_penalty_area(Vec2::new(0.0, 0.0), 0.0));
        // Just outside, but within the margin.
        assert!(!g.in_our_penalty_area(Vec2::new(-3_450.0, 0.0), 0.0));
        assert!(g.in_our_penalty_area(Vec2::new(-3_450.0, 0.0), 100.0));
    }

    #[test]
    fn clamp_to_penalty_area_lands_inside() {
        let g = Geometry::default();
        let p = g.clamp_to_our_penalty_area(Vec2::new(0.0, 2_000.0), 100.0);
        assert!(g.in_our_penalty_area(p, 0.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{FrameClock, TeamConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = FrameClock::new(1_000, 16_000_000);
        assert_eq!(clock.current_ns(), 1_000);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert_eq!(clock.current_ns(), 1_000 + 32_000_000);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = FrameClock::new(0, 16_000_000);
        assert_eq!(clock.ticks_for_secs(1.0), 63); // 62.5 → 63
        assert_eq!(clock.ticks_for_secs(0.0), 0);
    }

    #[test]
    fn config_end_tick_and_clock() {
        let cfg = TeamConfig { total_ticks: 50, ..TeamConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(50));
        assert_eq!(cfg.make_clock().tick_duration_ns, cfg.tick_duration_ns);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(42).to_string(), "T42");
    }
}

#[cfg(test)]
mod world {
    use crate::{BotId, GameState, TrackedBot, Vec2, WorldFrame, Tick};

    #[test]
    fn keeper_requires_visibility() {
        let mut frame = WorldFrame::empty(Tick(0));
        frame.keeper_id = Some(BotId(0));
        assert!(frame.keeper().is_none());
        let frame = frame.with_our_bot(TrackedBot::new(BotId(0), Vec2::new(-4_000.0, 0.0)));
        assert_eq!(frame.keeper().map(|b| b.id), Some(BotId(0)));
    }

    #[test]
    fn bots_iterate_in_id_order() {
        let frame = WorldFrame::empty(Tick(0))
            .with_our_bot(TrackedBot::new(BotId(5), Vec2::ZERO))
            .with_our_bot(TrackedBot::new(BotId(1), Vec2::ZERO))
            .with_our_bot(TrackedBot::new(BotId(3), Vec2::ZERO));
        let ids: Vec<_> = frame.our_bots.keys().copied().collect();
        assert_eq!(ids, vec![BotId(1), BotId(3), BotId(5)]);
    }

    #[test]
    fn game_state_predicates() {
        assert!(GameState::Running.is_running());
        assert!(GameState::Halt.is_stopped());
        assert!(GameState::Stop.is_stopped());
        assert!(!GameState::Running.is_stopped());
        assert!(GameState::BallPlacement { ours: true }.is_ball_placement());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0u32..1_000), b.gen_range(0u32..1_000));
        }
    }

    #[test]
    fn jitter_within_amplitude() {
        let mut r = SimRng::new(1);
        for _ in 0..100 {
            let j = r.jitter(5.0);
            assert!((-5.0..=5.0).contains(&j));
        }
        assert_eq!(r.jitter(0.0), 0.0);
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::new(3);
        let mut b = SimRng::new(4);
        let xs: Vec<u32> = (0..8).map(|_| a.gen_range(0..u32::MAX)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.gen_range(0..u32::MAX)).collect();
        assert_ne!(xs, ys);
    }
}
