//! `tc-tactics`: soccer content for the team controller.
//!
//! Everything here is built on the generic pieces of `tc-graph`, `tc-fsm`,
//! and `tc-behavior`; nothing in those crates knows about this one.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`field`]     | `TacticalField` snapshot, its builder and field types          |
//! | [`calc`]      | The tactical calculators                                       |
//! | [`wiring`]    | `standard_graph`, `standard_builder`, `StandardOutputs`        |
//! | [`roles`]     | Attacker, keeper, and support behaviors; `StandardPlaybook`    |
//! | [`tunables`]  | Tunable parameters and `register_all`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `TacticalField` and its types.|
//!
//! # Quick-start
//!
//! ```rust
//! use tc_config::TunableTable;
//! use tc_core::{Geometry, Tick, WorldFrame};
//! use tc_tactics::standard_graph;
//!
//! let mut graph = standard_graph(&Geometry::default()).unwrap();
//! let tunables = TunableTable::new();
//! graph.start(&tunables).unwrap();
//! let (snapshot, report) = graph.tick(&WorldFrame::empty(Tick(0)), &tunables).unwrap();
//! assert!(snapshot.ball_handling_bot.is_none());
//! assert_eq!(report.failed_count(), 0);
//! ```

pub mod calc;
pub mod field;
pub mod roles;
pub mod tunables;
pub mod wiring;

#[cfg(test)]
mod tests;

pub use field::{
    BallContact, BallDistances, BotDistance, KeeperState, LastTouch, OffensiveAction, Possession,
    Responsibility, SkirmishInfo, SkirmishStrategy, TacticalField, TacticalFieldBuilder,
};
pub use roles::StandardPlaybook;
pub use wiring::{StandardOutputs, TacticalGraph, TacticalGraphBuilder, standard_builder, standard_graph};
