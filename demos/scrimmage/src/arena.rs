//! A toy arena that turns team commands into the next world frame.
//!
//! Bots drive straight at their target with a speed cap, opponents chase
//! the ball with a little noise, and the ball rolls with constant
//! deceleration.  A ball that leaves the field is put back on the halfway
//! line after a short stop.  There are no collisions; a bot that gets within
//! reach of the ball and asks for a kick sends it towards the kick target.

use std::collections::BTreeMap;

use tc_behavior::BotCommand;
use tc_core::{BotId, GameState, Geometry, SimRng, Tick, TrackedBot, Vec2, WorldFrame};

/// mm/s.
const BOT_SPEED: f64 = 2_500.0;
const THEIR_SPEED: f64 = 1_500.0;
/// m/s².
const BALL_DECEL: f64 = 0.4;
/// Ticks of `Stop` after the ball leaves the field.
const STOP_TICKS: u64 = 30;

pub struct Arena {
    geometry:   Geometry,
    dt:         f64,
    rng:        SimRng,
    frame:      WorldFrame,
    stop_until: Option<Tick>,
    kicks:      u64,
    restarts:   u64,
}

impl Arena {
    /// Six bots a side in a rough kick-off formation.
    pub fn new(geometry: Geometry, tick_duration_ns: u64, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut frame = WorldFrame::empty(Tick::ZERO);
        let half = geometry.field_length / 2.0;

        frame.our_bots.insert(BotId(0), TrackedBot::new(BotId(0), Vec2::new(-half + 200.0, 0.0)));
        frame.their_bots.insert(BotId(0), TrackedBot::new(BotId(0), Vec2::new(half - 200.0, 0.0)));
        for i in 1..6u8 {
            let y = (f64::from(i) - 3.0) * 1_000.0;
            let ours = Vec2::new(-1_500.0 + rng.jitter(300.0), y + rng.jitter(200.0));
            let theirs = Vec2::new(1_500.0 + rng.jitter(300.0), y + rng.jitter(200.0));
            frame.our_bots.insert(BotId(i), TrackedBot::new(BotId(i), ours));
            frame.their_bots.insert(BotId(i), TrackedBot::new(BotId(i), theirs));
        }
        frame.keeper_id = Some(BotId(0));
        frame.game_state = GameState::Running;

        Self {
            geometry,
            dt: tick_duration_ns as f64 / 1e9,
            rng,
            frame,
            stop_until: None,
            kicks: 0,
            restarts: 0,
        }
    }

    /// The frame the team should see at `tick`.
    pub fn frame(&mut self, tick: Tick) -> WorldFrame {
        self.frame.tick = tick;
        self.frame.timestamp_ns = (tick.0 as f64 * self.dt * 1e9) as u64;
        if let Some(until) = self.stop_until {
            if tick >= until {
                self.stop_until = None;
                self.frame.game_state = GameState::Running;
            }
        }
        self.frame.clone()
    }

    /// Advance one tick, moving our bots as `commands` ask.
    pub fn step(&mut self, commands: &[BotCommand]) {
        let targets: BTreeMap<BotId, &BotCommand> = commands.iter().map(|c| (c.bot, c)).collect();
        let reach = self.geometry.bot_radius + self.geometry.ball_radius + 20.0;
        let ball = self.frame.ball.pos;

        for bot in self.frame.our_bots.values_mut() {
            let Some(cmd) = targets.get(&bot.id) else { continue };
            let to = cmd.target.pos;
            let step = (BOT_SPEED * self.dt).min(bot.pos.distance_to(to));
            let next = if step > 0.0 { bot.pos.step_towards(to, step) } else { bot.pos };
            bot.vel = (next - bot.pos) * (1.0 / self.dt);
            bot.pos = next;
            bot.orientation = cmd.target.orientation;
            bot.ball_contact = bot.pos.distance_to(ball) <= reach;

            if let Some(kick) = cmd.kick {
                if bot.ball_contact && self.frame.game_state.is_running() {
                    let dir = (kick.target - ball).normalized();
                    self.frame.ball.vel = dir * kick.speed;
                    self.frame.last_kick_ns = Some(self.frame.timestamp_ns);
                    self.kicks += 1;
                }
            }
        }

        for bot in self.frame.their_bots.values_mut() {
            let noise = Vec2::new(self.rng.jitter(400.0), self.rng.jitter(400.0));
            let to = ball + noise;
            let step = (THEIR_SPEED * self.dt).min(bot.pos.distance_to(to));
            if step > 0.0 {
                bot.pos = bot.pos.step_towards(to, step);
            }
        }

        self.roll_ball();
    }

    fn roll_ball(&mut self) {
        let ball = &mut self.frame.ball;
        let speed = ball.speed();
        if speed > 0.0 {
            let slower = (speed - BALL_DECEL * self.dt).max(0.0);
            ball.vel = ball.vel * (slower / speed);
            // m/s to mm per tick.
            ball.pos = ball.pos + ball.vel * (1_000.0 * self.dt);
        }

        if !self.geometry.in_field(ball.pos, 0.0) && self.stop_until.is_none() {
            // Restart somewhere on the halfway line.
            ball.pos = Vec2::new(0.0, self.rng.gen_range(-1_000.0..=1_000.0));
            ball.vel = Vec2::ZERO;
            self.frame.game_state = GameState::Stop;
            self.stop_until = Some(self.frame.tick + STOP_TICKS);
            self.restarts += 1;
        }
    }

    pub fn kicks(&self) -> u64 {
        self.kicks
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }
}
