//! `TunableRegistry` (owned by the configuration side) and `TunableView`
//! (owned by a team context).

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tc_core::TeamColor;
use tracing::{debug, info};

use crate::{ConfigError, ConfigResult, Tunable, TunableKey, TunableTable, TunableType, TunableValue};

/// Which team contexts an override applies to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum OverrideScope {
    /// Every team context, unless a team override exists.
    Default,
    /// Only the context playing as this color.
    Team(TeamColor),
}

/// A change in the resolved value of one tunable, as seen by one team.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TunableChange {
    pub key:   TunableKey,
    pub value: TunableValue,
}

struct Subscriber {
    team: TeamColor,
    tx:   Sender<TunableChange>,
    /// Dead once the view is dropped.
    live: Weak<()>,
}

/// Registered tunables, their defaults, and any overrides.
///
/// Owned by whatever loads and edits configuration.  Team contexts never
/// touch it after subscribing; they receive changes over their channel.
#[derive(Default)]
pub struct TunableRegistry {
    defaults:    BTreeMap<TunableKey, TunableValue>,
    overrides:   BTreeMap<(OverrideScope, TunableKey), TunableValue>,
    subscribers: Vec<Subscriber>,
}

impl TunableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tunable` with its declared default.
    ///
    /// Registering the same key twice keeps the first default.
    pub fn register<T: TunableType>(&mut self, tunable: &Tunable<T>) {
        self.defaults
            .entry(tunable.key())
            .or_insert_with(|| tunable.default_value().into_value());
    }

    /// `true` if `key` was registered.
    pub fn contains(&self, key: &TunableKey) -> bool {
        self.defaults.contains_key(key)
    }

    /// Look up a registered key by its string parts.
    pub fn find_key(&self, subsystem: &str, name: &str) -> Option<TunableKey> {
        self.defaults
            .keys()
            .find(|k| k.subsystem == subsystem && k.name == name)
            .copied()
    }

    /// Registered default of `key`.
    pub fn default_of(&self, key: &TunableKey) -> Option<TunableValue> {
        self.defaults.get(key).copied()
    }

    /// Number of registered tunables.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    // ── Overrides ─────────────────────────────────────────────────────────

    /// Override `key` for `scope` and notify subscribers whose resolved value
    /// changed.
    pub fn set_override(
        &mut self,
        scope: OverrideScope,
        key:   TunableKey,
        value: TunableValue,
    ) -> ConfigResult<()> {
        let default = self.defaults.get(&key).copied().ok_or_else(|| ConfigError::UnknownKey {
            subsystem: key.subsystem.to_owned(),
            name:      key.name.to_owned(),
        })?;
        if !default.same_type(value) {
            return Err(ConfigError::TypeMismatch {
                key,
                expected: default.type_name(),
                got:      value.type_name(),
            });
        }

        let before = self.resolve_all_teams(&key);
        self.overrides.insert((scope, key), value);
        debug!(%key, %value, ?scope, "tunable override set");
        self.notify_changed(key, before);
        Ok(())
    }

    /// Remove an override.  Returns `true` if one existed.
    pub fn clear_override(&mut self, scope: OverrideScope, key: TunableKey) -> bool {
        let before = self.resolve_all_teams(&key);
        let existed = self.overrides.remove(&(scope, key)).is_some();
        if existed {
            self.notify_changed(key, before);
        }
        existed
    }

    // ── Resolution ────────────────────────────────────────────────────────

    /// Resolved value of `key` for `team`.
    pub fn resolve(&self, team: TeamColor, key: &TunableKey) -> Option<TunableValue> {
        self.overrides
            .get(&(OverrideScope::Team(team), *key))
            .or_else(|| self.overrides.get(&(OverrideScope::Default, *key)))
            .or_else(|| self.defaults.get(key))
            .copied()
    }

    /// Full resolved table for `team`.
    pub fn table_for(&self, team: TeamColor) -> TunableTable {
        let mut table = TunableTable::new();
        for key in self.defaults.keys() {
            if let Some(v) = self.resolve(team, key) {
                table.insert(*key, v);
            }
        }
        table
    }

    /// Subscribe a team context.  The returned view starts with the current
    /// resolved table and receives every later change for `team`.
    pub fn subscribe(&mut self, team: TeamColor) -> TunableView {
        self.subscribers.retain(|sub| sub.live.strong_count() > 0);
        let (tx, rx) = mpsc::channel();
        let live = Arc::new(());
        self.subscribers.push(Subscriber { team, tx, live: Arc::downgrade(&live) });
        info!(%team, tunables = self.defaults.len(), "tunable view subscribed");
        TunableView { team, table: Arc::new(self.table_for(team)), rx, _live: live }
    }

    /// Views that have subscribed and not yet been found dropped.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn resolve_all_teams(&self, key: &TunableKey) -> [Option<TunableValue>; 2] {
        [
            self.resolve(TeamColor::Yellow, key),
            self.resolve(TeamColor::Blue, key),
        ]
    }

    /// Send the new resolved value to every subscriber whose team saw a
    /// change.  Subscribers whose view was dropped are forgotten.
    fn notify_changed(&mut self, key: TunableKey, before: [Option<TunableValue>; 2]) {
        let after = self.resolve_all_teams(&key);
        let mut changed: Vec<(TeamColor, TunableValue)> = Vec::with_capacity(2);
        for (i, team) in [TeamColor::Yellow, TeamColor::Blue].into_iter().enumerate() {
            if before[i] != after[i] {
                if let Some(value) = after[i] {
                    changed.push((team, value));
                }
            }
        }
        if changed.is_empty() {
            return;
        }
        self.subscribers.retain(|sub| {
            match changed.iter().find(|(team, _)| *team == sub.team) {
                Some(&(_, value)) => sub.tx.send(TunableChange { key, value }).is_ok(),
                None => sub.live.strong_count() > 0,
            }
        });
    }
}

// ── TunableView ───────────────────────────────────────────────────────────────

/// A team context's read side of the tunables.
///
/// Holds an immutable [`TunableTable`] that only changes when
/// [`poll`][Self::poll] applies pending notifications.
pub struct TunableView {
    team:  TeamColor,
    table: Arc<TunableTable>,
    rx:    Receiver<TunableChange>,
    _live: Arc<()>,
}

impl TunableView {
    /// A view with a fixed table and no registry behind it.
    ///
    /// Useful in tests and for contexts that never reload configuration.
    pub fn detached(team: TeamColor, table: TunableTable) -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { team, table: Arc::new(table), rx, _live: Arc::new(()) }
    }

    #[inline]
    pub fn team(&self) -> TeamColor {
        self.team
    }

    /// The current table.  Cheap to clone and share for one tick.
    #[inline]
    pub fn table(&self) -> &Arc<TunableTable> {
        &self.table
    }

    /// Shorthand for `self.table().get(tunable)`.
    #[inline]
    pub fn get<T: TunableType>(&self, tunable: &Tunable<T>) -> T {
        self.table.get(tunable)
    }

    /// Apply every pending change and return them in arrival order.
    ///
    /// Tables already handed out keep their old values; the view swaps in a
    /// new `Arc` only when at least one change arrived.
    pub fn poll(&mut self) -> Vec<TunableChange> {
        let mut applied = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(change) => applied.push(change),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if !applied.is_empty() {
            let table = Arc::make_mut(&mut self.table);
            for change in &applied {
                table.insert(change.key, change.value);
            }
            debug!(team = %self.team, count = applied.len(), "tunable changes applied");
        }
        applied
    }
}
