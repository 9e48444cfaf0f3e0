//! `tc-behavior`: behaviors bound to single bots and the commands they emit.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                              |
//! |--------------|-----------------------------------------------------------------------|
//! | [`command`]  | `BotCommand`, `MoveTarget`, `KickIntent`                              |
//! | [`role`]     | `Role`                                                                |
//! | [`input`]    | `BehaviorInput<S>`: shared per-tick view (world, snapshots, tunables) |
//! | [`model`]    | `Behavior<S>` trait                                                   |
//! | [`machine`]  | `FsmBehavior`, `RoleContext`, `StateId`: the state-machine pattern    |
//! | [`noop`]     | `NoopBehavior`: holds position                                        |
//! | [`playbook`] | `Playbook<S>`: role assignment and behavior construction              |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                                  |
//!
//! # Design notes
//!
//! A behavior never holds a mutable reference to the snapshot.  The team
//! driver builds one [`BehaviorInput`] per tick from shared `Arc`s and hands
//! every behavior a reference; behaviors that keep state between ticks keep
//! it in their own fields.

pub mod command;
pub mod error;
pub mod input;
pub mod machine;
pub mod model;
pub mod noop;
pub mod playbook;
pub mod role;


pub use command::{BotCommand, KickIntent, MoveTarget};
pub use error::{BehaviorError, BehaviorResult};
pub use input::BehaviorInput;
pub use machine::{Emit, EventSource, FsmBehavior, RoleContext, StateId};
pub use model::Behavior;
pub use noop::NoopBehavior;
pub use playbook::Playbook;
pub use role::Role;
