use bevy::prelude::*;
use std::sync::{Arc, RwLock};

use crate::catalog::LevelCatalog;
use crate::config::GameConfig;
use crate::engine::messages::{PuzzleCommand, PuzzleReply};
use crate::engine::puzzle::{LevelInstance, PuzzleEngine};
use crate::placement::SpotId;
use crate::signals::GameSignal;
use crate::tags::TagId;
use crate::teleporter::indicator::IndicatorMotion;
use crate::teleporter::TeleportDirection;

/// Wires the engine into a Bevy app. Input is not included, see
/// [`crate::engine::input::PuzzleInputPlugin`].
#[derive(Default)]
pub struct PuzzlePlugin {
    pub config: GameConfig,
    pub catalog: LevelCatalog,
    /// Level built on startup, if any
    pub start_level: Option<usize>,
}

impl Plugin for PuzzlePlugin {
    fn build(&self, app: &mut App) {
        let engine = PuzzleEngine::new(self.config.clone(), self.catalog.clone());

        app.insert_resource(EngineResource(Arc::new(RwLock::new(engine))))
            .add_event::<PuzzleCommand>()
            .add_event::<PuzzleReply>()
            .add_event::<GameSignal>()
            .add_systems(Startup, spawn_player_avatar)
            .add_systems(
                Update,
                (
                    sync_player_avatar,
                    handle_commands,
                    engine_frame_system,
                    forward_signals,
                    sync_level_scene,
                    sync_tag_transforms,
                    animate_indicators,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, engine_fixed_system);

        if let Some(level) = self.start_level {
            app.add_systems(PostStartup, move |mut commands: EventWriter<PuzzleCommand>| {
                commands.send(PuzzleCommand::GenerateLevel(level));
            });
        }
    }
}

#[derive(Resource)]
pub struct EngineResource(pub Arc<RwLock<PuzzleEngine>>);

// =====================================================
// Scene components
// =====================================================

/// Everything spawned for the current level; despawned on rebuild
#[derive(Component, Debug)]
pub struct LevelEntity;

#[derive(Component, Debug)]
pub struct PlayerAvatar;

/// Floor slab or wall
#[derive(Component, Debug, Clone, Copy)]
pub struct SolidBlock {
    pub size: Vec3,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct TeleporterPad {
    pub index: usize,
    pub direction: TeleportDirection,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct TeleporterIndicator {
    pub direction: TeleportDirection,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SpotMarker(pub SpotId);

#[derive(Component, Debug, Clone)]
pub struct TagMarker {
    pub id: TagId,
    pub text: String,
    pub prefilled: bool,
}

// =====================================================
// Systems
// =====================================================

fn spawn_player_avatar(mut commands: Commands, engine_res: Res<EngineResource>) {
    let Ok(mut engine) = engine_res.0.write() else {
        return;
    };
    let spawn = engine.config.layout.player_spawn();
    engine.spawn_player(spawn);
    commands.spawn((
        PlayerAvatar,
        Name::new("Player"),
        Transform::from_translation(spawn),
    ));
}

/// Kernel relocations (spawn reset, teleport) win over the avatar transform
/// and locomotion resumes once applied; otherwise the avatar's pose is
/// reported to the engine.
fn sync_player_avatar(
    engine_res: Res<EngineResource>,
    mut avatar: Query<&mut Transform, With<PlayerAvatar>>,
) {
    let Ok(mut engine) = engine_res.0.write() else {
        return;
    };
    let Ok(mut transform) = avatar.get_single_mut() else {
        return;
    };
    let Some(player) = engine.player_mut() else {
        return;
    };

    if !player.locomotion_enabled() {
        transform.translation = player.position;
        player.resume_locomotion();
        return;
    }
    let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    engine.sync_player_pose(transform.translation, yaw);
}

fn handle_commands(
    engine_res: Res<EngineResource>,
    mut commands: EventReader<PuzzleCommand>,
    mut replies: EventWriter<PuzzleReply>,
) {
    let Ok(mut engine) = engine_res.0.write() else {
        return;
    };
    for command in commands.read() {
        let reply = match command {
            PuzzleCommand::GenerateLevel(index) => level_reply(engine.generate_level(*index)),
            PuzzleCommand::RestartCurrentLevel => level_reply(engine.restart_current_level()),
            PuzzleCommand::AttemptPlaceTag { tag, position } => PuzzleReply::Placement {
                tag: *tag,
                placed: engine.attempt_place_tag(*tag, *position),
            },
            PuzzleCommand::DetachTag(tag) => PuzzleReply::Detached {
                tag: *tag,
                detached: engine.detach_tag(*tag),
            },
            PuzzleCommand::Activate => {
                engine.request_activation();
                continue;
            }
            PuzzleCommand::ToggleCarry => PuzzleReply::Carry(engine.toggle_carry()),
        };
        replies.send(reply);
    }
}

fn level_reply(
    result: Result<&LevelInstance, crate::error::LevelError>,
) -> PuzzleReply {
    match result {
        Ok(level) => PuzzleReply::LevelGenerated(level.summary()),
        Err(err) => {
            warn!("level request rejected: {err}");
            PuzzleReply::LevelRejected(err)
        }
    }
}

fn engine_frame_system(time: Res<Time>, engine_res: Res<EngineResource>) {
    if let Ok(mut engine) = engine_res.0.write() {
        engine.frame_update(time.delta_secs());
    }
}

fn engine_fixed_system(time: Res<Time>, engine_res: Res<EngineResource>) {
    if let Ok(mut engine) = engine_res.0.write() {
        engine.fixed_update(time.delta_secs());
    }
}

fn forward_signals(engine_res: Res<EngineResource>, mut signals: EventWriter<GameSignal>) {
    let Ok(mut engine) = engine_res.0.write() else {
        return;
    };
    for signal in engine.drain_signals() {
        match &signal {
            GameSignal::LevelStarted { level_index } => info!("Level {level_index} started"),
            GameSignal::LevelCompleted {
                level_index,
                elapsed_secs,
            } => info!("Level {level_index} completed in {elapsed_secs:.2}s"),
            _ => {}
        }
        signals.send(signal);
    }
}

/// Respawn level entities whenever the engine rebuilt or tore down its level
fn sync_level_scene(
    mut commands: Commands,
    engine_res: Res<EngineResource>,
    existing: Query<Entity, With<LevelEntity>>,
    mut revision: Local<u64>,
) {
    let Ok(engine) = engine_res.0.read() else {
        return;
    };
    if engine.scene_revision() == *revision {
        return;
    }
    *revision = engine.scene_revision();

    for entity in existing.iter() {
        commands.entity(entity).despawn_recursive();
    }
    if let Some(level) = engine.current_level() {
        spawn_level(&mut commands, level);
    }
}

fn spawn_level(commands: &mut Commands, level: &LevelInstance) {
    let layout = &level.layout;

    for floor in &layout.floors {
        commands.spawn((
            LevelEntity,
            Name::new(floor.name.clone()),
            SolidBlock { size: floor.size },
            Transform::from_translation(floor.center),
        ));
    }
    for wall in &layout.walls {
        commands.spawn((
            LevelEntity,
            Name::new(wall.name.clone()),
            SolidBlock { size: wall.size },
            Transform::from_translation(wall.center),
        ));
    }
    for (index, pad) in layout.teleporters.iter().enumerate() {
        let direction = pad.link.direction;
        commands.spawn((
            LevelEntity,
            Name::new(pad.name.clone()),
            TeleporterPad { index, direction },
            Transform::from_translation(pad.position),
        ));
        let motion = IndicatorMotion::above_pad(pad.position, direction);
        commands.spawn((
            LevelEntity,
            Name::new(format!("{}_Indicator", pad.name)),
            TeleporterIndicator { direction },
            motion,
            Transform::from_translation(motion.rest),
        ));
    }
    for (spot, id) in layout.spots.iter().zip(&level.spot_ids) {
        commands.spawn((
            LevelEntity,
            Name::new(spot.name.clone()),
            SpotMarker(*id),
            Transform::from_translation(spot.position),
        ));
    }
    for (spawn, id) in layout.tags.iter().zip(&level.tag_ids) {
        commands.spawn((
            LevelEntity,
            Name::new(format!("Tag_{}", spawn.text)),
            TagMarker {
                id: *id,
                text: spawn.text.clone(),
                prefilled: spawn.prefilled,
            },
            Transform::from_translation(spawn.position),
        ));
    }

    info!(
        "Spawned level {} ({}): {} floors, {} spots",
        level.level_index,
        level.name,
        layout.floors.len(),
        layout.spots.len()
    );
}

fn sync_tag_transforms(
    engine_res: Res<EngineResource>,
    mut tags: Query<(&TagMarker, &mut Transform)>,
) {
    let Ok(engine) = engine_res.0.read() else {
        return;
    };
    for (marker, mut transform) in tags.iter_mut() {
        if let Some(tag) = engine.tags().get(marker.id) {
            transform.translation = tag.position;
            transform.rotation = tag.rotation;
        }
    }
}

fn animate_indicators(time: Res<Time>, mut indicators: Query<(&IndicatorMotion, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (motion, mut transform) in indicators.iter_mut() {
        transform.translation = motion.position_at(t);
        transform.rotation = motion.rotation_at(t);
    }
}
