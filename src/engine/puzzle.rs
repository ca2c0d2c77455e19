use bevy::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::{LevelCatalog, LevelDefinition};
use crate::config::GameConfig;
use crate::engine::messages::{CarryAction, LevelSummary};
use crate::error::LevelError;
use crate::layout::{self, LevelLayout};
use crate::logging::TimingSpan;
use crate::placement::{
    attempt_place, detach_if_present, is_level_complete, CompletionLatch, PlacementOutcome,
    PlacementSpot, SpotId, SpotRegistry,
};
use crate::player::PlayerBody;
use crate::signals::{GameSignal, SignalBus};
use crate::tags::{HeldSlot, TagId, TagStore};
use crate::teleporter::Teleporter;
use crate::timer::LevelTimer;

/// The level currently built in the engine
#[derive(Debug, Clone)]
pub struct LevelInstance {
    /// 1-based catalog index
    pub level_index: usize,
    pub name: String,
    pub seed: u64,
    pub layout: LevelLayout,
    /// Registry id of `layout.spots[i]`
    pub spot_ids: Vec<SpotId>,
    /// Store id of `layout.tags[i]`
    pub tag_ids: Vec<TagId>,
}

impl LevelInstance {
    pub fn summary(&self) -> LevelSummary {
        LevelSummary {
            level_index: self.level_index,
            name: self.name.clone(),
            seed: self.seed,
            floors: self.layout.floors.len(),
            teleporters: self.layout.teleporters.len(),
            spots: self.spot_ids.len(),
            prefilled: self.layout.spots.iter().filter(|s| s.prefilled).count(),
        }
    }
}

/// Owns every piece of level state: the catalog, the spot registry, the tag
/// store, the held slot, the teleporters, the player body and the signal bus.
/// Frame-phase work goes through [`PuzzleEngine::frame_update`], physics-phase
/// work through [`PuzzleEngine::fixed_update`].
pub struct PuzzleEngine {
    pub config: GameConfig,
    catalog: LevelCatalog,
    registry: SpotRegistry,
    tags: TagStore,
    held: HeldSlot,
    teleporters: Vec<Teleporter>,
    player: Option<PlayerBody>,
    level: Option<LevelInstance>,
    generations: u64,
    scene_revision: u64,
    latch: CompletionLatch,
    timer: LevelTimer,
    signals: SignalBus,
}

impl Default for PuzzleEngine {
    fn default() -> Self {
        Self::new(GameConfig::default(), LevelCatalog::default())
    }
}

impl PuzzleEngine {
    pub fn new(config: GameConfig, catalog: LevelCatalog) -> Self {
        Self {
            config,
            catalog,
            registry: SpotRegistry::new(),
            tags: TagStore::new(),
            held: HeldSlot::default(),
            teleporters: Vec::new(),
            player: None,
            level: None,
            generations: 0,
            scene_revision: 0,
            latch: CompletionLatch::default(),
            timer: LevelTimer::default(),
            signals: SignalBus::default(),
        }
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &SpotRegistry {
        &self.registry
    }

    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    pub fn teleporters(&self) -> &[Teleporter] {
        &self.teleporters
    }

    pub fn current_level(&self) -> Option<&LevelInstance> {
        self.level.as_ref()
    }

    pub fn held_tag(&self) -> Option<TagId> {
        self.held.holder()
    }

    /// Bumped on every teardown and rebuild, so scene mirrors know when to
    /// respawn
    pub fn scene_revision(&self) -> u64 {
        self.scene_revision
    }

    pub fn player(&self) -> Option<&PlayerBody> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerBody> {
        self.player.as_mut()
    }

    pub fn spawn_player(&mut self, position: Vec3) {
        self.player = Some(PlayerBody::new(position));
    }

    /// Report where locomotion moved the player
    pub fn sync_player_pose(&mut self, position: Vec3, yaw: f32) {
        match self.player.as_mut() {
            Some(player) => {
                player.position = position;
                player.yaw = yaw;
            }
            None => warn!("player pose reported before the player was spawned"),
        }
    }

    // ---------------------------------------------------------------
    // Level lifecycle
    // ---------------------------------------------------------------

    /// Build level `level_index` (1-based). An out-of-range index is rejected
    /// before the running level is touched.
    pub fn generate_level(&mut self, level_index: usize) -> Result<&LevelInstance, LevelError> {
        let def = self.catalog.get(level_index)?.clone();
        let _timing = TimingSpan::new("generate_level");
        self.teardown();

        let seed = layout::generation_seed(self.config.seed, level_index, self.generations);
        self.generations += 1;
        let mut rng = layout::layout_rng(seed);
        let built = layout::generate(&def, &self.config.layout, &mut rng);

        self.build(level_index, &def, seed, built);
        self.relocate_player_to_spawn();

        self.latch.reset();
        self.emit(GameSignal::LevelStarted { level_index });

        let level = self.level.as_ref().ok_or(LevelError::NoLevelLoaded)?;
        info!(
            level = level_index,
            name = %level.name,
            spots = level.spot_ids.len(),
            teleporters = level.layout.teleporters.len(),
            "level generated"
        );
        Ok(level)
    }

    pub fn restart_current_level(&mut self) -> Result<&LevelInstance, LevelError> {
        let index = self
            .level
            .as_ref()
            .map(|l| l.level_index)
            .ok_or(LevelError::NoLevelLoaded)?;
        self.generate_level(index)
    }

    /// Drop all level state. Safe to call with nothing loaded.
    pub fn teardown(&mut self) {
        let had_level = self.level.take().is_some();
        let removed = self.registry.clear();
        self.tags.clear();
        self.held.clear();
        self.teleporters.clear();
        if had_level || removed > 0 {
            self.scene_revision += 1;
            debug!(removed_spots = removed, "level torn down");
        }
    }

    fn build(&mut self, level_index: usize, def: &LevelDefinition, seed: u64, built: LevelLayout) {
        self.teleporters = built
            .teleporters
            .iter()
            .map(|t| Teleporter::new(t.name.clone(), t.link, t.position, &self.config.teleporter))
            .collect();

        let mut spot_ids = Vec::with_capacity(built.spots.len());
        for placement in &built.spots {
            let id = self.registry.allocate_id();
            self.registry.register(PlacementSpot::new(
                id,
                placement.name.clone(),
                placement.floor,
                placement.expected_tag.clone(),
                placement.prefilled,
                placement.position,
            ));
            spot_ids.push(id);
        }

        let tag_ids = built
            .tags
            .iter()
            .map(|spawn| {
                if spawn.prefilled {
                    self.tags
                        .spawn_prefilled(spawn.text.clone(), spawn.floor, spawn.position)
                } else {
                    self.tags
                        .spawn_loose(spawn.text.clone(), spawn.floor, spawn.position)
                }
            })
            .collect();

        self.level = Some(LevelInstance {
            level_index,
            name: def.name.clone(),
            seed,
            layout: built,
            spot_ids,
            tag_ids,
        });
        self.scene_revision += 1;
    }

    fn relocate_player_to_spawn(&mut self) {
        let spawn = self.config.layout.player_spawn();
        match self.player.as_mut() {
            Some(player) => player.relocate(spawn),
            None => warn!("no player to move to the level spawn point"),
        }
    }

    // ---------------------------------------------------------------
    // Placement
    // ---------------------------------------------------------------

    /// Snap `tag` into the nearest eligible spot around `position`
    pub fn attempt_place_tag(&mut self, tag: TagId, position: Vec3) -> bool {
        let outcome = attempt_place(
            &mut self.registry,
            &mut self.tags,
            tag,
            position,
            &self.config.placement,
        );
        match outcome {
            PlacementOutcome::Placed { snap_position, .. } => {
                if self.held.release(tag) {
                    self.set_tag_held(tag, false);
                }
                self.emit(GameSignal::PlacementEffect {
                    position: snap_position,
                });
                self.emit(GameSignal::TagPlaced { tag });
                self.evaluate_completion();
                true
            }
            PlacementOutcome::Rejected(reason) => {
                debug!(%tag, %reason, "placement rejected");
                false
            }
        }
    }

    /// Free the spot holding `tag`, if any
    pub fn detach_tag(&mut self, tag: TagId) -> bool {
        if detach_if_present(&mut self.registry, &mut self.tags, tag).is_none() {
            return false;
        }
        self.evaluate_completion();
        true
    }

    /// False while no level is loaded
    pub fn is_level_complete(&self) -> bool {
        self.level.is_some() && is_level_complete(&self.registry)
    }

    fn evaluate_completion(&mut self) {
        let complete = self.is_level_complete();
        if !self.latch.observe(complete) {
            return;
        }
        let level_index = self.level.as_ref().map_or(0, |l| l.level_index);
        let elapsed_secs = self.timer.elapsed();
        info!(level = level_index, elapsed_secs, "level complete");
        self.emit(GameSignal::LevelCompleted {
            level_index,
            elapsed_secs,
        });
    }

    pub fn elapsed_time(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn timer(&self) -> &LevelTimer {
        &self.timer
    }

    // ---------------------------------------------------------------
    // Carry
    // ---------------------------------------------------------------

    /// Pick `tag` up: it must be loose, within pickup range of the player and
    /// the held slot must be free. Picking a placed tag takes it out of its
    /// spot.
    pub fn try_pick_up(&mut self, tag: TagId) -> bool {
        let Some(player) = self.player.as_ref() else {
            warn!(%tag, "pickup requested without a player");
            return false;
        };
        let Some(instance) = self.tags.get(tag) else {
            return false;
        };
        if instance.is_prefilled()
            || instance.position.distance(player.position) > self.config.carry.pickup_range
        {
            return false;
        }
        if !self.held.try_acquire(tag) {
            return false;
        }

        self.detach_tag(tag);
        self.set_tag_held(tag, true);
        debug!(%tag, "tag picked up");
        self.emit(GameSignal::TagPickedUp { tag });
        true
    }

    /// Release the held tag where it is and try to place it there.
    /// `None` when nothing is held.
    pub fn drop_held(&mut self) -> Option<(TagId, bool)> {
        let tag = self.held.clear()?;
        self.set_tag_held(tag, false);
        let position = self.tags.get(tag).map(|t| t.position)?;
        let placed = self.attempt_place_tag(tag, position);
        Some((tag, placed))
    }

    /// One press of the carry key: drop the held tag, or pick up the nearest
    /// tag in range
    pub fn toggle_carry(&mut self) -> CarryAction {
        if let Some((tag, placed)) = self.drop_held() {
            return CarryAction::Dropped { tag, placed };
        }
        let Some(from) = self.player.as_ref().map(|p| p.position) else {
            warn!("carry requested without a player");
            return CarryAction::Nothing;
        };
        let nearest = self
            .tags
            .nearest_pickable(from, self.config.carry.pickup_range);
        match nearest {
            Some(tag) if self.try_pick_up(tag) => CarryAction::PickedUp(tag),
            _ => CarryAction::Nothing,
        }
    }

    fn set_tag_held(&mut self, tag: TagId, held: bool) {
        if let Some(instance) = self.tags.get_mut(tag) {
            instance.set_held(held);
        }
    }

    // ---------------------------------------------------------------
    // Teleporters and stepping
    // ---------------------------------------------------------------

    /// Activation edge from input. Returns true if a pad queued a teleport.
    pub fn request_activation(&mut self) -> bool {
        let Some(player) = self.player.as_ref() else {
            warn!("teleporter activation without a player");
            return false;
        };
        let position = player.position;
        let mut queued = false;
        for pad in &mut self.teleporters {
            pad.track_overlap(position);
            queued |= pad.activate();
        }
        queued
    }

    /// Frame phase: advance the level timer
    pub fn frame_update(&mut self, dt: f32) {
        self.timer.tick(dt);
    }

    /// Physics phase: held-tag following, trigger overlap, queued teleports
    /// and cooldowns
    pub fn fixed_update(&mut self, dt: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };

        if let Some(tag) = self.held.holder() {
            if let Some(instance) = self.tags.get_mut(tag) {
                let t = (self.config.carry.follow_speed * dt).clamp(0.0, 1.0);
                let target = player.local_to_world(self.config.carry.hold_offset());
                instance.position = instance.position.lerp(target, t);
                instance.rotation = instance.rotation.slerp(player.rotation(), t);
            }
        }

        let mut teleported = Vec::new();
        for pad in &mut self.teleporters {
            pad.track_overlap(player.position);
            let from = player.position;
            if let Some(to) = pad.fixed_step(dt, player) {
                teleported.push(GameSignal::PlayerTeleported { from, to });
            }
        }
        for signal in teleported {
            self.emit(signal);
        }
    }

    // ---------------------------------------------------------------
    // Signals
    // ---------------------------------------------------------------

    fn emit(&mut self, signal: GameSignal) {
        self.timer.observe(&signal);
        self.signals.emit(signal);
    }

    pub fn drain_signals(&mut self) -> Vec<GameSignal> {
        self.signals.drain()
    }
}
