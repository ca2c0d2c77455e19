//! Headless Bevy app tests: commands in, replies/signals/entities out

use bevy::ecs::event::Events;
use bevy::prelude::*;

use html_tower::catalog::{FloorDimensions, LevelCatalog, LevelDefinition, TagGroup};
use html_tower::config::GameConfig;
use html_tower::engine::plugin::{LevelEntity, TagMarker};
use html_tower::engine::{EngineResource, PlayerAvatar, PuzzleCommand, PuzzlePlugin, PuzzleReply};
use html_tower::error::LevelError;
use html_tower::signals::GameSignal;

// ============================================================
// Helpers
// ============================================================

fn app_with(plugin: PuzzlePlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(plugin);
    app.update();
    app
}

fn default_app() -> App {
    app_with(PuzzlePlugin::default())
}

fn drain<E: Event + Clone>(app: &App) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).cloned().collect()
}

fn level_names(app: &mut App) -> Vec<String> {
    let mut query = app
        .world_mut()
        .query_filtered::<&Name, With<LevelEntity>>();
    query
        .iter(app.world())
        .map(|n| n.as_str().to_string())
        .collect()
}

fn send(app: &mut App, command: PuzzleCommand) {
    app.world_mut().send_event(command);
    app.update();
}

// ============================================================
// Tests
// ============================================================

#[test]
fn test_generate_command_spawns_named_scene() {
    let mut app = default_app();
    send(&mut app, PuzzleCommand::GenerateLevel(9));

    let replies = drain::<PuzzleReply>(&app);
    let summary = match replies.as_slice() {
        [PuzzleReply::LevelGenerated(summary)] => summary.clone(),
        other => panic!("unexpected replies: {other:?}"),
    };
    assert_eq!(summary.level_index, 9);
    assert_eq!(summary.floors, 4);
    assert_eq!(summary.teleporters, 6);

    let names = level_names(&mut app);
    for expected in [
        "Floor_0",
        "Floor_3",
        "Wall_0_North",
        "Wall_3_West",
        "Teleporter_Up_0",
        "Teleporter_Down_3",
        "TagSpot_0_1",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}");
    }

    let signals = drain::<GameSignal>(&app);
    assert!(signals.contains(&GameSignal::LevelStarted { level_index: 9 }));
}

#[test]
fn test_invalid_level_is_rejected_without_teardown() {
    let mut app = default_app();
    send(&mut app, PuzzleCommand::GenerateLevel(1));
    let before = level_names(&mut app).len();

    send(&mut app, PuzzleCommand::GenerateLevel(42));
    let replies = drain::<PuzzleReply>(&app);
    assert!(replies.contains(&PuzzleReply::LevelRejected(
        LevelError::InvalidLevelIndex {
            index: 42,
            available: 10
        }
    )));
    assert_eq!(level_names(&mut app).len(), before);
}

#[test]
fn test_regeneration_replaces_entities() {
    let mut app = default_app();
    send(&mut app, PuzzleCommand::GenerateLevel(10));
    send(&mut app, PuzzleCommand::GenerateLevel(1));

    let expected = LevelCatalog::default().get(1).unwrap().spot_count();
    let mut tags = app.world_mut().query::<&TagMarker>();
    assert_eq!(tags.iter(app.world()).count(), expected);
    assert!(!level_names(&mut app).iter().any(|n| n == "Floor_1"));
}

#[test]
fn test_restart_without_level_replies_error() {
    let mut app = default_app();
    send(&mut app, PuzzleCommand::RestartCurrentLevel);
    assert!(drain::<PuzzleReply>(&app).contains(&PuzzleReply::LevelRejected(LevelError::NoLevelLoaded)));
}

#[test]
fn test_start_level_builds_on_startup() {
    let mut app = app_with(PuzzlePlugin {
        start_level: Some(2),
        ..default()
    });
    app.update();
    let engine = app.world().resource::<EngineResource>().0.clone();
    let level = engine.read().unwrap().current_level().map(|l| l.level_index);
    assert_eq!(level, Some(2));
}

#[test]
fn test_place_command_completes_level() {
    let catalog = LevelCatalog::new(vec![LevelDefinition {
        name: "hello".into(),
        floor_count: 1,
        floor_dimensions: FloorDimensions::default(),
        floor_height: 10.0,
        tag_groups: vec![TagGroup::new(0, &["<h1>", "Hello World"], &[0])],
    }])
    .unwrap();
    let mut app = app_with(PuzzlePlugin {
        config: GameConfig::default(),
        catalog,
        start_level: None,
    });
    send(&mut app, PuzzleCommand::GenerateLevel(1));

    let engine = app.world().resource::<EngineResource>().0.clone();
    let (tag, target) = {
        let engine = engine.read().unwrap();
        let tag = engine
            .tags()
            .iter()
            .find(|t| !t.is_prefilled())
            .map(|t| t.id())
            .unwrap();
        (tag, engine.registry().all_spots()[1].position)
    };

    send(&mut app, PuzzleCommand::AttemptPlaceTag { tag, position: target });
    assert!(drain::<PuzzleReply>(&app).contains(&PuzzleReply::Placement { tag, placed: true }));
    let signals = drain::<GameSignal>(&app);
    assert!(signals.contains(&GameSignal::TagPlaced { tag }));
    assert!(signals
        .iter()
        .any(|s| matches!(s, GameSignal::LevelCompleted { level_index: 1, .. })));

    // Scene mirror follows the snapped tag
    app.update();
    let mut tags = app.world_mut().query::<(&TagMarker, &Transform)>();
    let snapped = tags
        .iter(app.world())
        .find(|(marker, _)| marker.id == tag)
        .map(|(_, t)| t.translation)
        .unwrap();
    assert!((snapped - (target + Vec3::Y * 0.2)).length() < 1e-4);

    send(&mut app, PuzzleCommand::DetachTag(tag));
    assert!(drain::<PuzzleReply>(&app).contains(&PuzzleReply::Detached { tag, detached: true }));
    assert!(!engine.read().unwrap().is_level_complete());
}

#[test]
fn test_player_avatar_follows_spawn_reset() {
    let mut app = default_app();
    let avatar = {
        let mut q = app.world_mut().query_filtered::<Entity, With<PlayerAvatar>>();
        q.single(app.world())
    };
    app.world_mut()
        .entity_mut(avatar)
        .insert(Transform::from_xyz(7.0, 1.0, 7.0));
    app.update();

    send(&mut app, PuzzleCommand::GenerateLevel(1));
    app.update();
    let position = app.world().entity(avatar).get::<Transform>().unwrap().translation;
    assert_eq!(position, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_plugin_config_drives_engine() {
    let mut config = GameConfig::default();
    config.layout.player_spawn = [2.0, 1.0, -3.0];
    config.placement.snap_distance = 1.25;
    let mut app = app_with(PuzzlePlugin {
        config,
        catalog: LevelCatalog::default(),
        start_level: None,
    });

    let engine = app.world().resource::<EngineResource>().0.clone();
    assert!((engine.read().unwrap().config.placement.snap_distance - 1.25).abs() < f32::EPSILON);

    let mut q = app.world_mut().query_filtered::<&Transform, With<PlayerAvatar>>();
    let spawn = q.single(app.world()).translation;
    assert_eq!(spawn, Vec3::new(2.0, 1.0, -3.0));
}

#[test]
fn test_teleport_moves_avatar_and_resumes_locomotion() {
    let catalog = LevelCatalog::new(vec![LevelDefinition {
        name: "two floors".into(),
        floor_count: 2,
        floor_dimensions: FloorDimensions::default(),
        floor_height: 10.0,
        tag_groups: vec![TagGroup::new(0, &["<p>", "</p>"], &[0])],
    }])
    .unwrap();
    let mut app = app_with(PuzzlePlugin {
        config: GameConfig::default(),
        catalog,
        start_level: None,
    });
    send(&mut app, PuzzleCommand::GenerateLevel(1));
    app.update();

    let engine = app.world().resource::<EngineResource>().0.clone();
    let pad = engine.read().unwrap().teleporters()[0].position;
    let standing = Vec3::new(pad.x, 1.0, pad.z);
    let avatar = {
        let mut q = app.world_mut().query_filtered::<Entity, With<PlayerAvatar>>();
        q.single(app.world())
    };
    app.world_mut()
        .entity_mut(avatar)
        .insert(Transform::from_translation(standing));
    app.update();

    {
        let mut engine = engine.write().unwrap();
        engine.fixed_update(0.02);
        assert!(engine.request_activation());
        engine.fixed_update(0.02);
        assert!(!engine.player().unwrap().locomotion_enabled());
    }

    app.update();
    let landed = app.world().entity(avatar).get::<Transform>().unwrap().translation;
    assert_eq!(landed, Vec3::new(standing.x, 11.0, standing.z));
    assert!(engine.read().unwrap().player().unwrap().locomotion_enabled());
}
