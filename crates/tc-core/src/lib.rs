//! `tc-core`: foundational types for the team controller.
//!
//! This crate is a dependency of every other `tc-*` crate.  It intentionally
//! has no `tc-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BotId`, `TeamColor`                                  |
//! | [`geo`]         | `Vec2`, `Geometry` (field dimensions)                 |
//! | [`time`]        | `Tick`, `FrameClock`, `TeamConfig`                    |
//! | [`world`]       | `WorldFrame`, `TrackedBot`, `TrackedBall`, `GameState`|
//! | [`rng`]         | `SimRng` (seeded, for synthetic world generation)     |
//! | [`error`]       | `TcError`, `TcResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TcError, TcResult};
pub use geo::{Geometry, Vec2};
pub use ids::{BotId, TeamColor};
pub use rng::SimRng;
pub use time::{FrameClock, TeamConfig, Tick};
pub use world::{GameState, TrackedBall, TrackedBot, WorldFrame};
