//! The player as seen by the kernel: a position, a facing and a locomotion
//! flag. A kernel relocation switches locomotion off; it stays off until the
//! scene has applied the new position and calls
//! [`PlayerBody::resume_locomotion`].

use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    pub position: Vec3,
    /// Rotation about +Y in radians; 0 faces +Z
    pub yaw: f32,
    locomotion_enabled: bool,
    relocations: u32,
}

impl PlayerBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            locomotion_enabled: true,
            relocations: 0,
        }
    }

    pub fn locomotion_enabled(&self) -> bool {
        self.locomotion_enabled
    }

    /// Number of kernel-driven position writes (spawn resets and teleports)
    pub fn relocations(&self) -> u32 {
        self.relocations
    }

    /// Kernel-driven position write; locomotion is disabled until resumed
    pub fn relocate(&mut self, position: Vec3) {
        self.locomotion_enabled = false;
        self.position = position;
        self.relocations += 1;
    }

    pub fn resume_locomotion(&mut self) {
        self.locomotion_enabled = true;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Transform a local offset (x right, y up, z forward) into world space
    pub fn local_to_world(&self, offset: Vec3) -> Vec3 {
        self.position + self.rotation() * offset
    }
}
