//! `tc-graph`: the per-tick calculator graph.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`calculator`]  | `Calculator` trait, `TickContext`                           |
//! | [`wiring`]      | `Output<T>`, `Binding<T>`, `Reservation<T>`, `Wiring`       |
//! | [`builder`]     | `GraphBuilder`, `WiringViolation` (ordering validator)      |
//! | [`graph`]       | `Graph` executor, `BindingEdge`                             |
//! | [`snapshot`]    | `Snapshot` / `SnapshotBuilder` traits, `ConnectorInfo`      |
//! | [`field_map`]   | `FieldMap`, a name-keyed type-erased snapshot               |
//! | [`report`]      | `ExecutionRecord`, `ExecutionReport`, `GraphStats`          |
//! | [`error`]       | `GraphError`, `CalcError`, result aliases                   |
//!
//! # Ordering
//!
//! There is no scheduler.  Units run in registration order, and a binding
//! reads its producer's value for the current tick only if the producer ran
//! earlier in the same tick; otherwise it reads the producer's idle value.
//!
//! ```text
//! register A            slot 0   ─┐
//! register B(bind A)    slot 1    │  run order = registration order
//! register C(bind B)    slot 2   ─┘
//!
//! tick:  A.compute → B reads A (fresh) → C reads B (fresh)
//! ```
//!
//! [`GraphBuilder::build`] rejects any binding whose producer does not run
//! before its consumer.  [`GraphBuilder::build_unvalidated`] logs the same
//! violations and builds anyway.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize` on `ExecutionRecord` and `ExecutionReport`.    |

pub mod builder;
pub mod calculator;
pub mod error;
pub mod field_map;
pub mod graph;
pub mod report;
pub mod snapshot;
pub mod wiring;

mod slot;
mod unit;


pub use builder::{GraphBuilder, WiringViolation};
pub use calculator::{Calculator, TickContext};
pub use error::{CalcError, CalcResult, GraphError, GraphResult};
pub use field_map::{FieldMap, FieldMapBuilder, FieldValue, TypedField};
pub use graph::{BindingEdge, Graph};
pub use report::{ExecutionRecord, ExecutionReport, GraphStats};
pub use snapshot::{ConnectorInfo, Snapshot, SnapshotBuilder};
pub use wiring::{Binding, Output, Reservation, Wiring};
