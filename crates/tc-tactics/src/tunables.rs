//! Tunable parameters read by the tactical calculators and role behaviors.
//!
//! Distances are in mm, speeds in m/s.  Every value is read from the
//! per-tick [`TunableTable`][tc_config::TunableTable], so overrides take
//! effect on the tick after they are set.

use tc_config::{Tunable, TunableRegistry};

// ── ball ──────────────────────────────────────────────────────────────────────

/// Extra gap between bot hull and ball still counted as contact.
pub const CONTACT_MARGIN: Tunable<f64> = Tunable::new("ball", "contact_margin", 30.0);

/// Closest bot within this distance gains possession.
pub const POSSESSION_GAIN_DIST: Tunable<f64> = Tunable::new("ball", "possession_gain_dist", 150.0);

/// A possessing bot keeps possession until it is farther than this.
pub const POSSESSION_LOSE_DIST: Tunable<f64> = Tunable::new("ball", "possession_lose_dist", 250.0);

/// Offense if our closest distance is at most `bias × their closest`.
pub const RESPONSIBILITY_BIAS: Tunable<f64> = Tunable::new("ball", "responsibility_bias", 1.2);

/// The previous handling bot keeps the ball unless another bot is closer by
/// more than this.
pub const HANDLING_STICKY_MARGIN: Tunable<f64> = Tunable::new("ball", "handling_sticky_margin", 300.0);

// ── skirmish ──────────────────────────────────────────────────────────────────

pub const SKIRMISH_RADIUS: Tunable<f64> = Tunable::new("skirmish", "radius", 400.0);

// ── keeper ────────────────────────────────────────────────────────────────────

/// Ball speed above which a ball heading for our goal is intercepted.
pub const KEEPER_INTERCEPT_SPEED: Tunable<f64> = Tunable::new("keeper", "intercept_speed", 0.5);

/// Margin beside the goal posts still treated as "on goal".
pub const KEEPER_GOAL_OFFSET: Tunable<f64> = Tunable::new("keeper", "goal_offset", 180.0);

/// Zone around the penalty area in which an opponent with the ball makes the
/// keeper go out.
pub const KEEPER_DANGER_ZONE: Tunable<f64> = Tunable::new("keeper", "danger_zone", 360.0);

/// Opponent distance to the ball at which the keeper assumes it has it.
pub const KEEPER_FOE_BALL_DIST: Tunable<f64> = Tunable::new("keeper", "foe_ball_dist", 450.0);

/// Distance of the keeper from the goal centre in the normal state.
pub const KEEPER_GOAL_DISTANCE: Tunable<f64> = Tunable::new("keeper", "goal_distance", 500.0);

// ── offense ───────────────────────────────────────────────────────────────────

/// Handling bot shoots at the goal from within this distance.
pub const SHOT_RANGE: Tunable<f64> = Tunable::new("offense", "shot_range", 3_000.0);

/// A receiver is free if no opponent is within this distance of it.
pub const PASS_FREE_RADIUS: Tunable<f64> = Tunable::new("offense", "pass_free_radius", 500.0);

/// How far ahead a dribble target is placed.
pub const DRIBBLE_STEP: Tunable<f64> = Tunable::new("offense", "dribble_step", 500.0);

pub const ALLOW_CHIP: Tunable<bool> = Tunable::new("offense", "allow_chip", false);

// ── attacker ──────────────────────────────────────────────────────────────────

/// Distance behind the ball the attacker lines up at before kicking.
pub const APPROACH_DIST: Tunable<f64> = Tunable::new("attacker", "approach_dist", 250.0);

/// Start kicking once this close to the ball.
pub const KICK_DIST: Tunable<f64> = Tunable::new("attacker", "kick_dist", 300.0);

pub const SHOT_SPEED: Tunable<f64> = Tunable::new("attacker", "shot_speed", 6.0);

pub const PASS_SPEED: Tunable<f64> = Tunable::new("attacker", "pass_speed", 3.0);

/// Ball speed at which the attacker considers the ball kicked.
pub const KICKED_SPEED: Tunable<f64> = Tunable::new("attacker", "kicked_speed", 1.5);

/// Ball speed towards the attacker at which it switches to receiving.
pub const RECEIVE_SPEED: Tunable<f64> = Tunable::new("attacker", "receive_speed", 1.0);

/// Give up a kick that did not happen within this many ticks.
pub const KICK_TIMEOUT_TICKS: Tunable<i64> = Tunable::new("attacker", "kick_timeout_ticks", 60);

// ── support ───────────────────────────────────────────────────────────────────

/// How far behind the ball supporters position themselves.
pub const SUPPORT_DEPTH: Tunable<f64> = Tunable::new("support", "depth", 1_500.0);

/// Every tunable of this crate.
pub fn register_all(registry: &mut TunableRegistry) {
    for t in &[
        CONTACT_MARGIN,
        POSSESSION_GAIN_DIST,
        POSSESSION_LOSE_DIST,
        RESPONSIBILITY_BIAS,
        HANDLING_STICKY_MARGIN,
        SKIRMISH_RADIUS,
        KEEPER_INTERCEPT_SPEED,
        KEEPER_GOAL_OFFSET,
        KEEPER_DANGER_ZONE,
        KEEPER_FOE_BALL_DIST,
        KEEPER_GOAL_DISTANCE,
        SHOT_RANGE,
        PASS_FREE_RADIUS,
        DRIBBLE_STEP,
        APPROACH_DIST,
        KICK_DIST,
        SHOT_SPEED,
        PASS_SPEED,
        KICKED_SPEED,
        RECEIVE_SPEED,
        SUPPORT_DEPTH,
    ] {
        registry.register(t);
    }
    registry.register(&ALLOW_CHIP);
    registry.register(&KICK_TIMEOUT_TICKS);
}
