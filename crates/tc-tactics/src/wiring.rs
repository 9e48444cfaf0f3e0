//! The standard tactical graph: every calculator of this crate, registered
//! in dependency order, with one connector per [`TacticalField`] field.

use std::collections::BTreeMap;

use tc_behavior::Role;
use tc_core::{BotId, Geometry, WorldFrame};
use tc_graph::{Graph, GraphBuilder, GraphResult, Output};

use crate::calc::{
    BallHandlingBotCalc, BallPossessionCalc, BallResponsibilityCalc, BotBallContactCalc,
    BotToBallDistanceCalc, DesiredRolesCalc, KeeperStateCalc, OffensiveActionCalc,
    SkirmishDetectorCalc, SkirmishStrategyCalc,
};
use crate::field::{
    BallContact, BallDistances, KeeperState, OffensiveAction, Possession, Responsibility,
    SkirmishInfo, SkirmishStrategy, TacticalFieldBuilder,
};
use crate::TacticalField;

pub type TacticalGraph = Graph<WorldFrame, TacticalField>;
pub type TacticalGraphBuilder = GraphBuilder<WorldFrame, TacticalField>;

/// Output handles of the standard units, for extending the graph.
#[derive(Copy, Clone, Debug)]
pub struct StandardOutputs {
    pub distances:         Output<BallDistances>,
    pub contact:           Output<BallContact>,
    pub possession:        Output<Possession>,
    pub responsibility:    Output<Responsibility>,
    pub keeper_state:      Output<KeeperState>,
    pub ball_handling_bot: Output<Option<BotId>>,
    pub skirmish:          Output<SkirmishInfo>,
    pub skirmish_strategy: Output<SkirmishStrategy>,
    pub offensive_actions: Output<BTreeMap<BotId, OffensiveAction>>,
    pub desired_roles:     Output<BTreeMap<BotId, Role>>,
}

/// A builder holding the standard units and connectors.
///
/// Further units may be registered after these before calling `build`.
pub fn standard_builder(geometry: &Geometry) -> (TacticalGraphBuilder, StandardOutputs) {
    let mut b = TacticalGraphBuilder::new();

    let distances = b.register(|_| BotToBallDistanceCalc);
    let contact = b.register(|w| BotBallContactCalc::new(geometry.clone(), w.bind(&distances)));
    let possession = b.register(|w| BallPossessionCalc::new(w.bind(&distances)));
    let responsibility = b.register(|w| BallResponsibilityCalc::new(w.bind(&distances)));
    let keeper_state = b.register(|w| KeeperStateCalc::new(geometry.clone(), w.bind(&distances)));
    let ball_handling_bot = b.register(|w| {
        BallHandlingBotCalc::new(w.bind(&distances), w.bind(&responsibility))
    });
    let skirmish = b.register(|w| SkirmishDetectorCalc::new(w.bind(&distances)));
    let skirmish_strategy = b.register(|w| {
        SkirmishStrategyCalc::new(w.bind(&distances), w.bind(&ball_handling_bot), w.bind(&skirmish))
    });
    let offensive_actions = b.register(|w| {
        OffensiveActionCalc::new(
            geometry.clone(),
            w.bind(&ball_handling_bot),
            w.bind(&distances),
            w.bind(&skirmish_strategy),
        )
    });
    let desired_roles = b.register(|w| DesiredRolesCalc::new(w.bind(&ball_handling_bot)));

    b.connect("ball_distances", &distances, TacticalFieldBuilder::ball_distances)
        .connect("ball_contact", &contact, TacticalFieldBuilder::ball_contact)
        .connect("possession", &possession, TacticalFieldBuilder::possession)
        .connect("responsibility", &responsibility, TacticalFieldBuilder::responsibility)
        .connect("keeper_state", &keeper_state, TacticalFieldBuilder::keeper_state)
        .connect("ball_handling_bot", &ball_handling_bot, TacticalFieldBuilder::ball_handling_bot)
        .connect("skirmish", &skirmish, TacticalFieldBuilder::skirmish)
        .connect("skirmish_strategy", &skirmish_strategy, TacticalFieldBuilder::skirmish_strategy)
        .connect("offensive_actions", &offensive_actions, TacticalFieldBuilder::offensive_actions)
        .connect("desired_roles", &desired_roles, TacticalFieldBuilder::desired_roles);

    let outputs = StandardOutputs {
        distances,
        contact,
        possession,
        responsibility,
        keeper_state,
        ball_handling_bot,
        skirmish,
        skirmish_strategy,
        offensive_actions,
        desired_roles,
    };
    (b, outputs)
}

/// The standard graph, validated.
pub fn standard_graph(geometry: &Geometry) -> GraphResult<TacticalGraph> {
    let (builder, _) = standard_builder(geometry);
    builder.build()
}
