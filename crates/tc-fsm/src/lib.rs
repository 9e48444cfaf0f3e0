//! `tc-fsm`: the state-machine engine every role and skill is built from.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`state`]    | `State` trait (`on_entry`/`on_update`/`on_exit`), `NoopState`, `FnState` |
//! | [`machine`]  | `StateMachine`, `Trigger`, `StateChange`, `TransitionKind`     |
//! | [`error`]    | `FsmError`, `FsmResult<T>`                                     |
//!
//! # Example
//!
//! ```rust
//! use tc_fsm::{FnState, StateMachine, Trigger};
//!
//! #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
//! enum Phase { Idle, Active }
//!
//! struct Ctx { ball_close: bool }
//!
//! let mut sm = StateMachine::<Phase, (), Ctx>::new("demo");
//! sm.add_state(Phase::Idle, FnState::new())
//!   .add_state(Phase::Active, FnState::new())
//!   .add_transition(Phase::Idle, Trigger::guard(|c: &Ctx| c.ball_close), Phase::Active)
//!   .add_transition(Phase::Active, Trigger::guard(|c: &Ctx| !c.ball_close), Phase::Idle);
//! sm.set_initial(Phase::Idle).unwrap();
//!
//! let mut ctx = Ctx { ball_close: true };
//! sm.start(&mut ctx).unwrap();
//! sm.update(&mut ctx).unwrap();
//! assert_eq!(sm.current(), Some(Phase::Active));
//! ```

pub mod error;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{FsmError, FsmResult};
pub use machine::{StateChange, StateMachine, TransitionKind, Trigger};
pub use state::{FnState, NoopState, State};
