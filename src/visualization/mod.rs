//! Level visualization.
//!
//! Gives the scene entities spawned by the engine plugin their meshes and
//! materials, and draws the level timer. Headless apps leave this plugin out.

use bevy::prelude::*;

use crate::constants::FLOOR_THICKNESS;
use crate::engine::plugin::{
    EngineResource, PlayerAvatar, SolidBlock, SpotMarker, TagMarker, TeleporterIndicator,
    TeleporterPad,
};
use crate::teleporter::TeleportDirection;

pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_timer_text).add_systems(
            Update,
            (
                dress_blocks,
                dress_pads,
                dress_indicators,
                dress_spots,
                dress_tags,
                dress_player,
                update_timer_text,
            ),
        );
    }
}

#[derive(Component)]
pub struct TimerText;

const TAG_SIZE: Vec3 = Vec3::new(1.6, 0.6, 1.0);
const SPOT_SIZE: Vec3 = Vec3::new(1.8, 0.05, 1.2);
const PAD_SIZE: Vec3 = Vec3::new(2.0, 0.1, 2.0);

fn pad_color(direction: TeleportDirection) -> Color {
    match direction {
        TeleportDirection::Up => Color::srgb(0.2, 0.8, 0.2),
        TeleportDirection::Down => Color::srgb(0.2, 0.2, 0.8),
    }
}

fn tag_color(prefilled: bool) -> Color {
    if prefilled {
        Color::srgb(0.55, 0.55, 0.6)
    } else {
        Color::srgb(0.9, 0.8, 0.1)
    }
}

/// Floors read as slabs, anything thicker as a wall
fn block_color(size: Vec3) -> Color {
    if size.y <= FLOOR_THICKNESS {
        Color::srgb(0.6, 0.6, 0.6)
    } else {
        Color::srgb(0.3, 0.3, 0.35)
    }
}

fn material(materials: &mut Assets<StandardMaterial>, color: Color) -> MeshMaterial3d<StandardMaterial> {
    MeshMaterial3d(materials.add(StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.8,
        ..default()
    }))
}

fn dress_blocks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<(Entity, &SolidBlock), Added<SolidBlock>>,
) {
    for (entity, block) in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(block.size))),
            material(&mut materials, block_color(block.size)),
        ));
    }
}

fn dress_pads(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<(Entity, &TeleporterPad), Added<TeleporterPad>>,
) {
    for (entity, pad) in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(PAD_SIZE))),
            material(&mut materials, pad_color(pad.direction)),
        ));
    }
}

fn dress_indicators(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<(Entity, &TeleporterIndicator), Added<TeleporterIndicator>>,
) {
    for (entity, indicator) in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cone {
                radius: 0.4,
                height: 0.8,
            })),
            material(&mut materials, pad_color(indicator.direction)),
        ));
    }
}

fn dress_spots(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<Entity, Added<SpotMarker>>,
) {
    for entity in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(SPOT_SIZE))),
            material(&mut materials, Color::srgb(0.4, 0.8, 0.9)),
        ));
    }
}

fn dress_tags(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<(Entity, &TagMarker), Added<TagMarker>>,
) {
    for (entity, tag) in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::from_size(TAG_SIZE))),
            material(&mut materials, tag_color(tag.prefilled)),
        ));
    }
}

fn dress_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    added: Query<Entity, Added<PlayerAvatar>>,
) {
    for entity in added.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
            material(&mut materials, Color::srgb(0.8, 0.3, 0.2)),
        ));
    }
}

fn spawn_timer_text(mut commands: Commands) {
    commands.spawn((
        TimerText,
        Text::new("00:00.00"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn update_timer_text(engine_res: Res<EngineResource>, mut texts: Query<&mut Text, With<TimerText>>) {
    let Ok(engine) = engine_res.0.read() else {
        return;
    };
    let display = engine.timer().display();
    for mut text in texts.iter_mut() {
        if text.0 != display {
            text.0 = display.clone();
        }
    }
}
