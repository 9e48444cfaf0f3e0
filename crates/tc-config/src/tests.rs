//! Unit tests for tc-config.

#[cfg(test)]
mod tunable_tests {
    use crate::{ConfigError, Tunable, TunableTable, TunableValue};

    const DIST: Tunable<f64> = Tunable::new("attacker", "switch_to_kick_dist", 2_000.0);
    const ENABLED: Tunable<bool> = Tunable::new("keeper", "allow_chip", true);

    #[test]
    fn empty_table_falls_back_to_default() {
        let table = TunableTable::new();
        assert_eq!(table.get(&DIST), 2_000.0);
        assert!(table.get(&ENABLED));
    }

    #[test]
    fn wrong_type_in_table_falls_back_to_default() {
        let mut table = TunableTable::new();
        table.insert(DIST.key(), TunableValue::Bool(false));
        assert_eq!(table.get(&DIST), 2_000.0);
    }

    #[test]
    fn key_display() {
        assert_eq!(DIST.key().to_string(), "attacker.switch_to_kick_dist");
    }

    #[test]
    fn parse_like_follows_variant() {
        assert_eq!(TunableValue::Float(0.0).parse_like(" 1.5 ").unwrap(), TunableValue::Float(1.5));
        assert_eq!(TunableValue::Int(0).parse_like("42").unwrap(), TunableValue::Int(42));
        assert_eq!(TunableValue::Bool(true).parse_like("false").unwrap(), TunableValue::Bool(false));
        assert!(matches!(TunableValue::Int(0).parse_like("4.2"), Err(ConfigError::Parse(_))));
    }
}

#[cfg(test)]
mod registry_tests {
    use tc_core::TeamColor;

    use crate::{
        ConfigError, OverrideScope, Tunable, TunableRegistry, TunableValue,
    };

    const DIST: Tunable<f64> = Tunable::new("attacker", "switch_to_kick_dist", 2_000.0);
    const MARGIN: Tunable<f64> = Tunable::new("keeper", "penalty_margin", 100.0);

    fn registry() -> TunableRegistry {
        let mut r = TunableRegistry::new();
        r.register(&DIST);
        r.register(&MARGIN);
        r
    }

    #[test]
    fn resolution_order() {
        let mut r = registry();
        let key = DIST.key();
        assert_eq!(r.resolve(TeamColor::Blue, &key), Some(TunableValue::Float(2_000.0)));

        r.set_override(OverrideScope::Default, key, TunableValue::Float(1_500.0)).unwrap();
        assert_eq!(r.resolve(TeamColor::Blue, &key), Some(TunableValue::Float(1_500.0)));

        r.set_override(OverrideScope::Team(TeamColor::Blue), key, TunableValue::Float(1_000.0))
            .unwrap();
        assert_eq!(r.resolve(TeamColor::Blue, &key), Some(TunableValue::Float(1_000.0)));
        assert_eq!(r.resolve(TeamColor::Yellow, &key), Some(TunableValue::Float(1_500.0)));
    }

    #[test]
    fn unknown_key_rejected() {
        let mut r = TunableRegistry::new();
        let err = r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(1.0));
        assert!(matches!(err, Err(ConfigError::UnknownKey { .. })));
    }

    #[test]
    fn type_mismatch_rejected() {
        let mut r = registry();
        let err = r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Int(3));
        assert!(matches!(err, Err(ConfigError::TypeMismatch { expected: "float", got: "int", .. })));
    }

    #[test]
    fn view_sees_changes_only_after_poll() {
        let mut r = registry();
        let mut view = r.subscribe(TeamColor::Yellow);
        let before = view.table().clone();

        r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(1_234.0)).unwrap();
        assert_eq!(view.get(&DIST), 2_000.0);

        let changes = view.poll();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, DIST.key());
        assert_eq!(view.get(&DIST), 1_234.0);
        // A table handed out earlier is untouched.
        assert_eq!(before.get(&DIST), 2_000.0);
    }

    #[test]
    fn other_team_override_does_not_notify() {
        let mut r = registry();
        let mut yellow = r.subscribe(TeamColor::Yellow);
        let mut blue = r.subscribe(TeamColor::Blue);

        r.set_override(OverrideScope::Team(TeamColor::Blue), MARGIN.key(), TunableValue::Float(50.0))
            .unwrap();
        assert!(yellow.poll().is_empty());
        assert_eq!(blue.poll().len(), 1);
        assert_eq!(blue.get(&MARGIN), 50.0);
        assert_eq!(yellow.get(&MARGIN), 100.0);
    }

    #[test]
    fn shadowed_default_override_does_not_notify() {
        let mut r = registry();
        r.set_override(OverrideScope::Team(TeamColor::Blue), DIST.key(), TunableValue::Float(900.0))
            .unwrap();
        let mut blue = r.subscribe(TeamColor::Blue);
        r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(1_100.0)).unwrap();
        assert!(blue.poll().is_empty());
        assert_eq!(blue.get(&DIST), 900.0);
    }

    #[test]
    fn clear_override_restores_default() {
        let mut r = registry();
        let mut view = r.subscribe(TeamColor::Blue);
        r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(10.0)).unwrap();
        assert!(r.clear_override(OverrideScope::Default, DIST.key()));
        assert!(!r.clear_override(OverrideScope::Default, DIST.key()));

        let changes = view.poll();
        assert_eq!(changes.len(), 2);
        assert_eq!(view.get(&DIST), 2_000.0);
    }

    #[test]
    fn dropped_view_is_pruned() {
        let mut r = registry();
        drop(r.subscribe(TeamColor::Yellow));
        // Sending to a dropped receiver must not fail the override.
        r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(1.0)).unwrap();
        r.set_override(OverrideScope::Default, DIST.key(), TunableValue::Float(2.0)).unwrap();
        assert_eq!(r.subscriber_count(), 0);
    }

    #[test]
    fn resubscribing_does_not_accumulate_dead_views() {
        let mut r = registry();
        let mut kept = r.subscribe(TeamColor::Blue);
        for _ in 0..10 {
            drop(r.subscribe(TeamColor::Yellow));
        }
        // Only the live view and the latest dropped one remain.
        assert_eq!(r.subscriber_count(), 2);

        // A Blue-only change prunes the dead Yellow view too.
        r.set_override(OverrideScope::Team(TeamColor::Blue), DIST.key(), TunableValue::Float(5.0))
            .unwrap();
        assert_eq!(r.subscriber_count(), 1);
        assert_eq!(kept.poll().len(), 1);
    }
}

#[cfg(test)]
mod loader_tests {
    use std::io::Write;

    use tc_core::TeamColor;
    use tempfile::TempDir;

    use crate::{
        ConfigError, Tunable, TunableRegistry, load_overrides_csv, load_overrides_reader,
    };

    const DIST: Tunable<f64> = Tunable::new("attacker", "switch_to_kick_dist", 2_000.0);
    const MAX_TRIES: Tunable<i64> = Tunable::new("attacker", "max_tries", 3);

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn registry() -> TunableRegistry {
        let mut r = TunableRegistry::new();
        r.register(&DIST);
        r.register(&MAX_TRIES);
        r
    }

    #[test]
    fn loads_scoped_rows_from_file() {
        let dir = tmp();
        let path = dir.path().join("overrides.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "subsystem,name,team,value").unwrap();
        writeln!(f, "attacker,switch_to_kick_dist,,1800").unwrap();
        writeln!(f, "attacker,switch_to_kick_dist,blue,1200").unwrap();
        writeln!(f, "attacker,max_tries,default,5").unwrap();
        drop(f);

        let mut r = registry();
        let n = load_overrides_csv(&path, &mut r).unwrap();
        assert_eq!(n, 3);

        let yellow = r.table_for(TeamColor::Yellow);
        let blue = r.table_for(TeamColor::Blue);
        assert_eq!(yellow.get(&DIST), 1_800.0);
        assert_eq!(blue.get(&DIST), 1_200.0);
        assert_eq!(blue.get(&MAX_TRIES), 5);
    }

    #[test]
    fn unknown_key_is_error() {
        let csv = "subsystem,name,team,value\nnope,missing,,1\n";
        let mut r = registry();
        assert!(matches!(
            load_overrides_reader(csv.as_bytes(), &mut r),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn bad_team_is_error() {
        let csv = "subsystem,name,team,value\nattacker,max_tries,green,1\n";
        let mut r = registry();
        assert!(matches!(load_overrides_reader(csv.as_bytes(), &mut r), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn bad_value_is_error() {
        let csv = "subsystem,name,team,value\nattacker,max_tries,,many\n";
        let mut r = registry();
        assert!(matches!(load_overrides_reader(csv.as_bytes(), &mut r), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tmp();
        let mut r = registry();
        assert!(matches!(
            load_overrides_csv(&dir.path().join("absent.csv"), &mut r),
            Err(ConfigError::Io(_))
        ));
    }
}
