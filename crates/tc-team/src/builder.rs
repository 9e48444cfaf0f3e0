//! Fluent builder for constructing a [`TeamAi`].

use tc_behavior::Playbook;
use tc_config::{TunableRegistry, TunableTable, TunableView};
use tc_core::{TeamConfig, WorldFrame};
use tc_graph::{Graph, Snapshot};
use tc_tactics::{StandardPlaybook, TacticalField, standard_graph};

use crate::{TeamAi, TeamError, TeamResult};

/// Fluent builder for [`TeamAi<S, P>`].
///
/// # Required inputs
///
/// - [`TeamConfig`]: team color, geometry, tick duration, …
/// - `Graph<WorldFrame, S>`: from [`tc_graph::GraphBuilder`] or
///   [`tc_tactics::standard_graph`]
/// - `P: Playbook<S>`: role assignment and behavior construction
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                          |
/// |-----------------|--------------------------------------------------|
/// | `.tunables(v)`  | Detached view over an empty table (all defaults) |
///
/// # Example
///
/// ```rust
/// use tc_config::TunableRegistry;
/// use tc_core::{TeamConfig, Tick, WorldFrame};
/// use tc_tactics::{StandardPlaybook, standard_graph};
/// use tc_team::TeamAiBuilder;
///
/// let config = TeamConfig::default();
/// let mut registry = TunableRegistry::new();
/// tc_tactics::tunables::register_all(&mut registry);
/// let view = registry.subscribe(config.team_color);
///
/// let graph = standard_graph(&config.geometry).unwrap();
/// let mut team = TeamAiBuilder::new(config, graph, StandardPlaybook)
///     .tunables(view)
///     .build()
///     .unwrap();
/// team.start().unwrap();
/// let output = team.tick(WorldFrame::empty(Tick(0))).unwrap();
/// assert!(output.commands.is_empty());
/// ```
pub struct TeamAiBuilder<S: Snapshot, P: Playbook<S>> {
    config:   TeamConfig,
    graph:    Graph<WorldFrame, S>,
    playbook: P,
    tunables: Option<TunableView>,
}

impl<S: Snapshot, P: Playbook<S>> TeamAiBuilder<S, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: TeamConfig, graph: Graph<WorldFrame, S>, playbook: P) -> Self {
        Self { config, graph, playbook, tunables: None }
    }

    /// Supply the team's tunable view, usually from
    /// [`TunableRegistry::subscribe`].
    ///
    /// If not called, every tunable reads its registered default and no
    /// change is ever delivered.
    pub fn tunables(mut self, view: TunableView) -> Self {
        self.tunables = Some(view);
        self
    }

    /// Validate inputs and return a [`TeamAi`] that still needs
    /// [`start`][TeamAi::start].
    pub fn build(self) -> TeamResult<TeamAi<S, P>> {
        let team = self.config.team_color;
        let tunables = match self.tunables {
            Some(view) if view.team() != team => {
                return Err(TeamError::TeamMismatch { team, view: view.team() });
            }
            Some(view) => view,
            None => TunableView::detached(team, TunableTable::new()),
        };
        Ok(TeamAi::new(self.config, self.graph, tunables, self.playbook))
    }
}

/// A started team context running the standard tactical graph and playbook.
///
/// Registers the standard tunables with `registry` and subscribes the new
/// context to it, so later overrides on `registry` reach this team.
pub fn standard(
    config:   TeamConfig,
    registry: &mut TunableRegistry,
) -> TeamResult<TeamAi<TacticalField, StandardPlaybook>> {
    tc_tactics::tunables::register_all(registry);
    let view = registry.subscribe(config.team_color);
    let graph = standard_graph(&config.geometry)?;
    let mut team = TeamAiBuilder::new(config, graph, StandardPlaybook)
        .tunables(view)
        .build()?;
    team.start()?;
    Ok(team)
}
