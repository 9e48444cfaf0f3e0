//! Tunable keys, values, typed declarations, and resolved tables.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use crate::{ConfigError, ConfigResult};

// ── TunableKey ────────────────────────────────────────────────────────────────

/// Identity of one tunable: the subsystem that owns it plus its name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TunableKey {
    pub subsystem: &'static str,
    pub name:      &'static str,
}

impl fmt::Display for TunableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.subsystem, self.name)
    }
}

// ── TunableValue ──────────────────────────────────────────────────────────────

/// A dynamically typed tunable value.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum TunableValue {
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl TunableValue {
    pub fn type_name(self) -> &'static str {
        match self {
            TunableValue::Float(_) => "float",
            TunableValue::Int(_) => "int",
            TunableValue::Bool(_) => "bool",
        }
    }

    /// `true` if both values carry the same variant.
    #[inline]
    pub fn same_type(self, other: TunableValue) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }

    /// Parse `raw` into the same variant as `self`.
    pub fn parse_like(self, raw: &str) -> ConfigResult<TunableValue> {
        let raw = raw.trim();
        let parsed = match self {
            TunableValue::Float(_) => raw.parse::<f64>().ok().map(TunableValue::Float),
            TunableValue::Int(_) => raw.parse::<i64>().ok().map(TunableValue::Int),
            TunableValue::Bool(_) => raw.parse::<bool>().ok().map(TunableValue::Bool),
        };
        parsed.ok_or_else(|| {
            ConfigError::Parse(format!("invalid {} value {raw:?}", self.type_name()))
        })
    }
}

impl fmt::Display for TunableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunableValue::Float(v) => write!(f, "{v}"),
            TunableValue::Int(v) => write!(f, "{v}"),
            TunableValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

// ── Typed declarations ────────────────────────────────────────────────────────

/// Rust types that can be stored as a [`TunableValue`].
pub trait TunableType: Copy + 'static {
    fn into_value(self) -> TunableValue;
    fn from_value(value: TunableValue) -> Option<Self>;
}

impl TunableType for f64 {
    fn into_value(self) -> TunableValue {
        TunableValue::Float(self)
    }
    fn from_value(value: TunableValue) -> Option<Self> {
        match value {
            TunableValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl TunableType for i64 {
    fn into_value(self) -> TunableValue {
        TunableValue::Int(self)
    }
    fn from_value(value: TunableValue) -> Option<Self> {
        match value {
            TunableValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl TunableType for bool {
    fn into_value(self) -> TunableValue {
        TunableValue::Bool(self)
    }
    fn from_value(value: TunableValue) -> Option<Self> {
        match value {
            TunableValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

/// A statically declared tunable with its default.
///
/// Declared as a `const` next to the code that reads it:
///
/// ```rust
/// use tc_config::Tunable;
///
/// const SWITCH_TO_KICK_DIST: Tunable<f64> =
///     Tunable::new("attacker", "switch_to_kick_dist", 2_000.0);
/// assert_eq!(SWITCH_TO_KICK_DIST.default_value(), 2_000.0);
/// ```
pub struct Tunable<T: TunableType> {
    key:     TunableKey,
    default: T,
    _marker: PhantomData<fn() -> T>,
}

impl<T: TunableType> Tunable<T> {
    pub const fn new(subsystem: &'static str, name: &'static str, default: T) -> Self {
        Self { key: TunableKey { subsystem, name }, default, _marker: PhantomData }
    }

    #[inline]
    pub fn key(&self) -> TunableKey {
        self.key
    }

    #[inline]
    pub fn default_value(&self) -> T {
        self.default
    }
}

// ── TunableTable ──────────────────────────────────────────────────────────────

/// Resolved tunable values for one team context.
///
/// A table is immutable once shared; the tick driver publishes a fresh
/// `Arc<TunableTable>` when changes arrive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TunableTable {
    values: BTreeMap<TunableKey, TunableValue>,
}

impl TunableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `tunable`, falling back to its declared default when
    /// the key is absent or holds a value of another type.
    pub fn get<T: TunableType>(&self, tunable: &Tunable<T>) -> T {
        self.values
            .get(&tunable.key)
            .and_then(|v| T::from_value(*v))
            .unwrap_or(tunable.default)
    }

    /// Raw lookup by key.
    pub fn value(&self, key: &TunableKey) -> Option<TunableValue> {
        self.values.get(key).copied()
    }

    pub(crate) fn insert(&mut self, key: TunableKey, value: TunableValue) {
        self.values.insert(key, value);
    }

    /// Iterate all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&TunableKey, &TunableValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
