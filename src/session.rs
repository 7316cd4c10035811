//! Game session: the level/progress state machine
//!
//! Owns the catalog, the persisted progress record, and the world of the
//! currently running attempt. The host shell feeds frames in through
//! `frame` and reacts to the events that come back; terminal outcomes
//! mutate progress here before the UI hears about them.

use crate::levels::{self, Level};
use crate::progress::Progress;
use crate::sim::{GameEvent, TickInput, World, tick};

/// What kind of run the current world belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    /// A catalog level attempt
    Campaign(u32),
    /// The free-play gauntlet (does not touch progress)
    Gauntlet,
}

/// Session state spanning level attempts
pub struct GameSession {
    levels: Vec<Level>,
    pub progress: Progress,
    pub world: Option<World>,
    current: Option<RunKind>,
}

impl GameSession {
    /// Create a session with persisted progress
    pub fn new() -> Self {
        Self::with_progress(Progress::load())
    }

    /// Create a session with an explicit progress record
    pub fn with_progress(progress: Progress) -> Self {
        Self {
            levels: levels::catalog(),
            progress,
            world: None,
            current: None,
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Start a catalog level
    ///
    /// Rejected (returns false, world untouched) when the id is unknown
    /// or still locked.
    pub fn start_level(&mut self, id: u32) -> bool {
        let Some(level) = levels::find(&self.levels, id) else {
            log::warn!("start_level({id}): unknown level");
            return false;
        };
        if !self.progress.is_unlocked(id) {
            log::info!("start_level({id}): level is locked");
            return false;
        }
        log::info!("Starting level {id}: {}", level.name);
        self.world = Some(level.map.build());
        self.current = Some(RunKind::Campaign(id));
        true
    }

    /// Start the free-play gauntlet
    pub fn start_game(&mut self, seed: u64) {
        log::info!("Starting gauntlet with seed {seed}");
        self.world = Some(levels::gauntlet(seed).build());
        self.current = Some(RunKind::Gauntlet);
    }

    /// Whether a world is currently live
    pub fn is_running(&self) -> bool {
        self.world.is_some()
    }

    /// Advance the current world by one frame
    ///
    /// Terminal win events mutate and persist progress before being
    /// passed on; a finished world is torn down so the shell falls back
    /// to its menus.
    pub fn frame(&mut self, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
        let Some(world) = &mut self.world else {
            return Vec::new();
        };

        let mut events = tick(world, input, now_ms);

        let mut i = 0;
        while i < events.len() {
            match events[i] {
                GameEvent::BossDefeated | GameEvent::ExitReached => {
                    if let Some(RunKind::Campaign(id)) = self.current {
                        self.progress.complete_level(id);
                        self.progress.save();
                        log::info!("Level {id} complete");
                        i += 1;
                        events.insert(i, GameEvent::LevelComplete(id));
                    }
                }
                GameEvent::PlayerDied => {
                    log::info!("Player died, run over");
                }
                _ => {}
            }
            i += 1;
        }

        if self.world.as_ref().is_some_and(|w| w.is_over()) {
            self.world = None;
            self.current = None;
        }

        events
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
