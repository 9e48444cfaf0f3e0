//! The `TeamAi` struct and its tick loop.

use std::collections::BTreeMap;
use std::sync::Arc;

use tc_behavior::{Behavior, BehaviorInput, BotCommand, Playbook, Role};
use tc_config::TunableView;
use tc_core::{BotId, FrameClock, Geometry, TeamConfig, Tick, WorldFrame};
use tc_graph::{Graph, Snapshot};
use tracing::{debug, error, info, warn};

use crate::{BehaviorState, TeamError, TeamResult, TickObserver, TickOutput};

// ── Assignment ────────────────────────────────────────────────────────────────

/// One bot's running behavior and the role it was created for.
struct Assignment<S> {
    role:     Role,
    behavior: Box<dyn Behavior<S>>,
}

// ── TeamAi ────────────────────────────────────────────────────────────────────

/// The decision core of one team.
///
/// `TeamAi<S, P>` owns the calculator graph, the team's tunable view, and one
/// behavior per assigned bot.  Each call to [`tick`][Self::tick] runs:
///
/// 1. **Tunables**: apply pending changes and forward them to the graph.
/// 2. **Graph**: run every calculator and publish the snapshot.
/// 3. **Roles**: ask the playbook for this tick's roles; bots whose role
///    changed get a fresh behavior, bots that vanished lose theirs.
/// 4. **Behaviors**: update each assigned, visible bot in ascending `BotId`
///    order and collect one command per bot.
///
/// Create via [`TeamAiBuilder`][crate::TeamAiBuilder].
pub struct TeamAi<S: Snapshot, P: Playbook<S>> {
    config:      TeamConfig,
    geometry:    Arc<Geometry>,
    clock:       FrameClock,
    graph:       Graph<WorldFrame, S>,
    tunables:    TunableView,
    playbook:    P,
    assignments: BTreeMap<BotId, Assignment<S>>,
    started:     bool,
    stopped:     bool,
}

impl<S: Snapshot, P: Playbook<S>> TeamAi<S, P> {
    pub(crate) fn new(
        config:   TeamConfig,
        graph:    Graph<WorldFrame, S>,
        tunables: TunableView,
        playbook: P,
    ) -> Self {
        Self {
            geometry: Arc::new(config.geometry.clone()),
            clock: config.make_clock(),
            config,
            graph,
            tunables,
            playbook,
            assignments: BTreeMap::new(),
            started: false,
            stopped: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start the graph against the current tunables.  A second call does
    /// nothing.
    pub fn start(&mut self) -> TeamResult<()> {
        if self.stopped {
            return Err(TeamError::Stopped);
        }
        if self.started {
            return Ok(());
        }
        self.tunables.poll();
        self.graph.start(self.tunables.table())?;
        self.started = true;
        info!(team = %self.config.team_color, units = self.graph.len(), "team context started");
        Ok(())
    }

    /// Stop the graph and drop every behavior.  Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.graph.stop();
        self.assignments.clear();
        self.stopped = true;
        info!(team = %self.config.team_color, tick = %self.clock.current_tick, "team context stopped");
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run one tick against `world` without callbacks.
    pub fn tick(&mut self, world: WorldFrame) -> TeamResult<TickOutput<S>> {
        self.tick_with(world, &mut crate::NoopObserver)
    }

    /// Run one tick against `world`, calling `observer` at every step.
    pub fn tick_with<O: TickObserver<S>>(
        &mut self,
        world:    WorldFrame,
        observer: &mut O,
    ) -> TeamResult<TickOutput<S>> {
        if self.stopped {
            return Err(TeamError::Stopped);
        }
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: tunables ─────────────────────────────────────────────
        let changes = self.tunables.poll();
        if !changes.is_empty() {
            info!(team = %self.config.team_color, %now, count = changes.len(), "tunables changed");
            self.graph.notify_tunables_changed(&changes);
        }
        let tunables = Arc::clone(self.tunables.table());

        // ── Phase 2: graph ────────────────────────────────────────────────
        let world = Arc::new(world);
        let (snapshot, executions) = self.graph.tick(&world, &tunables)?;
        observer.on_snapshot(now, &snapshot, &executions);

        let input = BehaviorInput {
            tick:     now,
            team:     self.config.team_color,
            geometry: Arc::clone(&self.geometry),
            world:    Arc::clone(&world),
            snapshot: Arc::clone(&snapshot),
            previous: self.graph.previous_snapshot().cloned(),
            tunables,
        };

        // ── Phase 3: roles ────────────────────────────────────────────────
        let roles = self.playbook.desired_roles(&snapshot);
        self.assign_roles(&roles, &input);

        // ── Phase 4: behaviors ────────────────────────────────────────────
        let mut commands = Vec::with_capacity(roles.len());
        let mut behavior_states = BTreeMap::new();
        for (&bot, &role) in &roles {
            let Some(tracked) = world.our_bot(bot) else {
                continue;
            };
            let command = match self.assignments.get_mut(&bot) {
                Some(assignment) => {
                    let command = match assignment.behavior.update(&input) {
                        Ok(command) => command,
                        Err(err) => {
                            error!(%bot, %role, %now, error = %err, "behavior failed; holding position");
                            BotCommand::hold(tracked)
                        }
                    };
                    behavior_states.insert(bot, BehaviorState {
                        role,
                        state: assignment.behavior.state_name(),
                    });
                    command
                }
                None => BotCommand::hold(tracked),
            };
            commands.push(command);
        }
        observer.on_commands(now, &commands);

        let output = TickOutput { tick: now, snapshot, commands, executions, behavior_states };
        observer.on_tick_end(&output);
        self.clock.advance();
        Ok(output)
    }

    /// Run from the current tick to `config.end_tick()`, drawing one world
    /// frame per tick from `source`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<F, O>(&mut self, mut source: F, observer: &mut O) -> TeamResult<()>
    where
        F: FnMut(Tick) -> WorldFrame,
        O: TickObserver<S>,
    {
        while self.clock.current_tick < self.config.end_tick() {
            let world = source(self.clock.current_tick);
            self.tick_with(world, observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<F, O>(&mut self, n: u64, mut source: F, observer: &mut O) -> TeamResult<()>
    where
        F: FnMut(Tick) -> WorldFrame,
        O: TickObserver<S>,
    {
        for _ in 0..n {
            let world = source(self.clock.current_tick);
            self.tick_with(world, observer)?;
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The role each bot currently has a behavior for.
    pub fn roles(&self) -> BTreeMap<BotId, Role> {
        self.assignments.iter().map(|(&bot, a)| (bot, a.role)).collect()
    }

    pub fn graph(&self) -> &Graph<WorldFrame, S> {
        &self.graph
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn tunables(&self) -> &TunableView {
        &self.tunables
    }

    /// The tick the next call to [`tick`][Self::tick] will run.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    // ── Role assignment ───────────────────────────────────────────────────

    fn assign_roles(&mut self, roles: &BTreeMap<BotId, Role>, input: &BehaviorInput<S>) {
        self.assignments.retain(|bot, assignment| {
            let keep = roles.get(bot) == Some(&assignment.role) && input.world.our_bot(*bot).is_some();
            if !keep {
                debug!(%bot, role = %assignment.role, "behavior dropped");
            }
            keep
        });

        for (&bot, &role) in roles {
            if self.assignments.contains_key(&bot) {
                continue;
            }
            if input.world.our_bot(bot).is_none() {
                warn!(%bot, %role, "role assigned to a bot that is not visible");
                continue;
            }
            let behavior = self
                .playbook
                .make_behavior(role, bot, input)
                .and_then(|mut behavior| behavior.start(input).map(|()| behavior));
            match behavior {
                Ok(behavior) => {
                    info!(%bot, %role, tick = %input.tick, state = behavior.state_name(), "role assigned");
                    self.assignments.insert(bot, Assignment { role, behavior });
                }
                Err(err) => {
                    error!(%bot, %role, tick = %input.tick, error = %err, "could not create behavior");
                }
            }
        }
    }
}

impl<S: Snapshot, P: Playbook<S>> Drop for TeamAi<S, P> {
    fn drop(&mut self) {
        if self.started {
            self.stop();
        }
    }
}
