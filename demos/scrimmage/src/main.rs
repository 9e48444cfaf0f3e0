//! scrimmage: the standard team controller against a toy arena.
//!
//! Runs one team context (yellow) for a fixed number of ticks, feeding each
//! tick's commands back into a synthetic world, and prints a JSON summary.
//!
//! ```text
//! RUST_LOG=tc_team=info cargo run -p scrimmage -- [overrides.csv]
//! ```
//!
//! The optional CSV uses the `subsystem,name,team,value` layout read by
//! `tc_config::load_overrides_csv`.

mod arena;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tc_behavior::{BotCommand, Role};
use tc_config::{TunableRegistry, load_overrides_csv};
use tc_core::{BotId, TeamColor, TeamConfig, Tick};
use tc_graph::ExecutionReport;
use tc_tactics::TacticalField;
use tc_team::{TickObserver, TickOutput};

use arena::Arena;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64 = 42;
const TICK_DURATION_NS: u64 = 16_000_000; // ~60 Hz vision
const TOTAL_TICKS:      u64 = 3_600;      // one minute of play

// ── Summary observer ──────────────────────────────────────────────────────────

#[derive(Default, Serialize)]
struct Summary {
    ticks:               u64,
    final_tick:          u64,
    elapsed_ms:          f64,
    commands:            u64,
    kick_requests:       u64,
    kicks:               u64,
    restarts:            u64,
    calculator_failures: u64,
    role_changes:        u64,
    /// Ticks spent in each `role/state`.
    state_ticks:         BTreeMap<String, u64>,
    final_roles:         BTreeMap<String, String>,
}

#[derive(Default)]
struct SummaryObserver {
    summary: Summary,
    roles:   BTreeMap<BotId, Role>,
}

impl TickObserver<TacticalField> for SummaryObserver {
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &TacticalField, report: &ExecutionReport) {
        self.summary.calculator_failures += report.failed_count() as u64;
    }

    fn on_commands(&mut self, _tick: Tick, commands: &[BotCommand]) {
        self.summary.commands += commands.len() as u64;
        self.summary.kick_requests += commands.iter().filter(|c| c.kick.is_some()).count() as u64;
    }

    fn on_tick_end(&mut self, output: &TickOutput<TacticalField>) {
        self.summary.ticks += 1;
        for (bot, state) in &output.behavior_states {
            if self.roles.insert(*bot, state.role) != Some(state.role) {
                self.summary.role_changes += 1;
            }
            let key = format!("{}/{}", state.role, state.state);
            *self.summary.state_ticks.entry(key).or_default() += 1;
        }
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.summary.final_tick = final_tick.0;
        self.summary.final_roles = self
            .roles
            .iter()
            .map(|(bot, role)| (bot.to_string(), role.to_string()))
            .collect();
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = TeamConfig {
        team_color:       TeamColor::Yellow,
        tick_duration_ns: TICK_DURATION_NS,
        total_ticks:      TOTAL_TICKS,
        seed:             SEED,
        ..TeamConfig::default()
    };

    // 1. Tunables: register defaults, then apply any overrides file.
    let mut registry = TunableRegistry::new();
    tc_tactics::tunables::register_all(&mut registry);
    if let Some(path) = std::env::args().nth(1) {
        let applied = load_overrides_csv(Path::new(&path), &mut registry)?;
        info!(%path, applied, "tunable overrides loaded");
    }

    // 2. Team context and arena.
    let mut team = tc_team::standard(config.clone(), &mut registry)?;
    let mut arena = Arena::new(config.geometry.clone(), config.tick_duration_ns, config.seed);
    info!(team = %config.team_color, units = team.graph().len(), ticks = config.total_ticks, "scrimmage starting");

    // 3. Closed loop: the arena reacts to each tick's commands.
    let mut observer = SummaryObserver::default();
    let t0 = Instant::now();
    while team.current_tick() < config.end_tick() {
        let world = arena.frame(team.current_tick());
        let output = team.tick_with(world, &mut observer)?;
        arena.step(&output.commands);
    }
    observer.on_run_end(team.current_tick());
    team.stop();

    // 4. Summary.
    let mut summary = observer.summary;
    summary.elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    summary.kicks = arena.kicks();
    summary.restarts = arena.restarts();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
