//! Per-tick input shared by every behavior of one team.

use std::sync::Arc;

use tc_config::TunableTable;
use tc_core::{BotId, Geometry, TeamColor, Tick, TrackedBot, WorldFrame};

/// Everything a behavior may read during one tick.
///
/// All fields are shared handles, so cloning an input is cheap and a
/// behavior may keep one in its context between ticks.  `previous` is the
/// snapshot published one tick earlier; guards compare against it to
/// suppress flapping.
pub struct BehaviorInput<S> {
    pub tick:     Tick,
    pub team:     TeamColor,
    pub geometry: Arc<Geometry>,
    pub world:    Arc<WorldFrame>,
    pub snapshot: Arc<S>,
    pub previous: Option<Arc<S>>,
    pub tunables: Arc<TunableTable>,
}

impl<S> Clone for BehaviorInput<S> {
    fn clone(&self) -> Self {
        Self {
            tick:     self.tick,
            team:     self.team,
            geometry: Arc::clone(&self.geometry),
            world:    Arc::clone(&self.world),
            snapshot: Arc::clone(&self.snapshot),
            previous: self.previous.clone(),
            tunables: Arc::clone(&self.tunables),
        }
    }
}

impl<S> BehaviorInput<S> {
    /// Our tracked bot `id`, if visible this tick.
    #[inline]
    pub fn our_bot(&self, id: BotId) -> Option<&TrackedBot> {
        self.world.our_bot(id)
    }
}
