//! `tc-config`: tunable parameters for calculators and behaviors.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`tunable`]   | `TunableKey`, `TunableValue`, `Tunable<T>`, `TunableTable`    |
//! | [`registry`]  | `TunableRegistry`, `OverrideScope`, `TunableView`, `TunableChange` |
//! | [`loader`]    | `load_overrides_csv`, `load_overrides_reader`                 |
//! | [`error`]     | `ConfigError`, `ConfigResult<T>`                              |
//!
//! # Resolution order
//!
//! ```text
//! value(team, key) = team override  (OverrideScope::Team(team))
//!                 ?? default override (OverrideScope::Default)
//!                 ?? registered default
//! ```
//!
//! # Change notification
//!
//! The registry never shares mutable state with the tick loop.  Each team
//! context holds a [`TunableView`]: an immutable table plus the receiving end
//! of a channel.  The registry sends a [`TunableChange`] whenever an
//! override alters the value a subscriber resolves; the view applies pending
//! changes only when [`TunableView::poll`] is called, which the tick driver
//! does once, before the first calculator of a tick runs.

pub mod error;
pub mod loader;
pub mod registry;
pub mod tunable;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_overrides_csv, load_overrides_reader};
pub use registry::{OverrideScope, TunableChange, TunableRegistry, TunableView};
pub use tunable::{Tunable, TunableKey, TunableTable, TunableType, TunableValue};
