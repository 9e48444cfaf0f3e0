//! Tactical calculators over [`WorldFrame`] producing [`TacticalField`].
//!
//! Registration order used by [`standard_graph`][crate::standard_graph],
//! with the outputs each unit binds to:
//!
//! | #  | Unit                     | Binds to                                   |
//! |----|--------------------------|--------------------------------------------|
//! | 1  | `BotToBallDistanceCalc`  | none                                       |
//! | 2  | `BotBallContactCalc`     | 1                                          |
//! | 3  | `BallPossessionCalc`     | 1                                          |
//! | 4  | `BallResponsibilityCalc` | 1                                          |
//! | 5  | `KeeperStateCalc`        | 1                                          |
//! | 6  | `BallHandlingBotCalc`    | 1, 4                                       |
//! | 7  | `SkirmishDetectorCalc`   | 1                                          |
//! | 8  | `SkirmishStrategyCalc`   | 1, 6, 7                                    |
//! | 9  | `OffensiveActionCalc`    | 1, 6, 8                                    |
//! | 10 | `DesiredRolesCalc`       | 6                                          |

mod ball;
mod keeper;
mod offense;
mod roles;
mod skirmish;

use tc_core::WorldFrame;
use tc_graph::TickContext;

use crate::TacticalField;

pub use ball::{
    BallHandlingBotCalc, BallPossessionCalc, BallResponsibilityCalc, BotBallContactCalc,
    BotToBallDistanceCalc,
};
pub use keeper::{KeeperStateCalc, goal_line_crossing};
pub use offense::OffensiveActionCalc;
pub use roles::DesiredRolesCalc;
pub use skirmish::{SkirmishDetectorCalc, SkirmishStrategyCalc};

/// Context every tactical calculator computes from.
pub type Ctx<'a> = TickContext<'a, WorldFrame, TacticalField>;
