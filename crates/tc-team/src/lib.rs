//! `tc-team`: tick driver for one team context.
//!
//! # Tick flow
//!
//! ```text
//! for each world frame:
//!   ① Tunables : TunableView::poll; changes forwarded to the graph.
//!   ② Graph    : every calculator in registration order, then the
//!                immutable snapshot is published.
//!   ③ Roles    : Playbook::desired_roles; changed roles get a fresh
//!                behavior, vanished bots lose theirs.
//!   ④ Commands : Behavior::update per bot in ascending BotId order; a
//!                failing behavior yields a hold-position command.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`team`]     | `TeamAi`, the tick loop and role assignment           |
//! | [`builder`]  | `TeamAiBuilder`, `standard()`                         |
//! | [`observer`] | `TickObserver` hooks, `NoopObserver`                  |
//! | [`output`]   | `TickOutput`, `BehaviorState`                         |
//! | [`error`]    | `TeamError`, `TeamResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust
//! use tc_config::TunableRegistry;
//! use tc_core::{TeamConfig, Tick, WorldFrame};
//! use tc_team::NoopObserver;
//!
//! let config = TeamConfig { total_ticks: 10, ..TeamConfig::default() };
//! let mut registry = TunableRegistry::new();
//! let mut team = tc_team::standard(config, &mut registry).unwrap();
//! team.run(WorldFrame::empty, &mut NoopObserver).unwrap();
//! assert_eq!(team.current_tick(), Tick(10));
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod output;
pub mod team;


pub use builder::{TeamAiBuilder, standard};
pub use error::{TeamError, TeamResult};
pub use observer::{NoopObserver, TickObserver};
pub use output::{BehaviorState, TickOutput};
pub use team::TeamAi;
