//! Keyboard bindings. Kept out of [`super::PuzzlePlugin`] so headless apps
//! need no input resources.

use bevy::prelude::*;

use crate::engine::messages::PuzzleCommand;
use crate::engine::plugin::{EngineResource, PlayerAvatar};

const WALK_SPEED: f32 = 6.0;
const TURN_SPEED: f32 = 2.5;

const LEVEL_KEYS: [(KeyCode, usize); 10] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
    (KeyCode::Digit6, 6),
    (KeyCode::Digit7, 7),
    (KeyCode::Digit8, 8),
    (KeyCode::Digit9, 9),
    (KeyCode::Digit0, 10),
];

pub struct PuzzleInputPlugin;

impl Plugin for PuzzleInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (keyboard_commands, walk_player));
    }
}

/// E activates a teleporter, C picks up or drops, R restarts, digits pick a
/// level
fn keyboard_commands(keys: Res<ButtonInput<KeyCode>>, mut commands: EventWriter<PuzzleCommand>) {
    if keys.just_pressed(KeyCode::KeyE) {
        commands.send(PuzzleCommand::Activate);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        commands.send(PuzzleCommand::ToggleCarry);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.send(PuzzleCommand::RestartCurrentLevel);
    }
    for (key, level) in LEVEL_KEYS {
        if keys.just_pressed(key) {
            commands.send(PuzzleCommand::GenerateLevel(level));
        }
    }
}

/// WASD walks relative to facing, arrow keys turn. Frozen while the engine
/// has locomotion switched off for a relocation.
fn walk_player(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    engine_res: Option<Res<EngineResource>>,
    mut avatar: Query<&mut Transform, With<PlayerAvatar>>,
) {
    if let Some(engine_res) = engine_res {
        let Ok(engine) = engine_res.0.read() else {
            return;
        };
        if engine.player().is_some_and(|p| !p.locomotion_enabled()) {
            return;
        }
    }
    let Ok(mut transform) = avatar.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    let mut turn = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        turn -= 1.0;
    }
    transform.rotate_y(turn * TURN_SPEED * dt);

    let mut local = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        local.z += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        local.z -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        local.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        local.x -= 1.0;
    }
    if local != Vec3::ZERO {
        let step = transform.rotation * local.normalize() * WALK_SPEED * dt;
        transform.translation += step;
    }
}
