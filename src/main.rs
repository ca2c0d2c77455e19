use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;

use html_tower::catalog::LevelCatalog;
use html_tower::config::GameConfig;
use html_tower::engine::{PuzzleInputPlugin, PuzzlePlugin};
use html_tower::logging::LoggingPlugin;
use html_tower::visualization::VisualizationPlugin;

/// Usage: `html-tower [config.json]`. The config may name a catalog file.
fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let catalog = match &config.catalog_path {
        Some(path) => LevelCatalog::load(path)
            .with_context(|| format!("loading level catalog {}", path.display()))?,
        None => LevelCatalog::default(),
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "HTML Tower".into(),
                        resolution: (1280., 720.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::log::LogPlugin>(),
        )
        // Logging
        .add_plugins(LoggingPlugin::default())
        // Puzzle kernel
        .add_plugins(PuzzlePlugin {
            config,
            catalog,
            start_level: Some(1),
        })
        .add_plugins(PuzzleInputPlugin)
        // Visualization
        .add_plugins(VisualizationPlugin)
        // Startup
        .add_systems(Startup, setup)
        .run();

    Ok(())
}

fn setup(mut commands: Commands) {
    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 25.0, -35.0).looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::Y),
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.5, 0.5, 0.0)),
    ));

    info!("HTML Tower initialized");
    info!("Keys: WASD walk, arrows turn, C pick up/drop, E teleport, R restart, 1-0 select level");
}
