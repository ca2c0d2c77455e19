//! Safe-spawn sampling for loose tags.
//!
//! A loose tag must land at least `clearance` away (horizontally) from every
//! teleporter pad on its floor, so it never blocks a pad. Sampling is
//! rejection-based with a bounded number of draws; when the draws run out the
//! sampler sweeps a grid over the spawn area and takes the point farthest from
//! all pads, so it always terminates.

use bevy::prelude::*;
use rand::Rng;
use tracing::warn;

use crate::catalog::FloorDimensions;
use crate::config::LayoutConfig;

/// Rectangle (in XZ) where loose tags may appear, at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub min: Vec2,
    pub max: Vec2,
    pub y: f32,
}

impl SpawnArea {
    /// Area used by the generator: away from the side walls, from a quarter of
    /// the depth behind centre up to the spot wall
    pub fn for_floor(dims: FloorDimensions, floor_y: f32, config: &LayoutConfig) -> Self {
        let x_range = dims.half_width() - config.spawn_safe_zone;
        let z_min = -(dims.depth / 4.0);
        let z_max = dims.half_depth() - config.spawn_safe_zone;
        Self::new(
            Vec2::new(-x_range, z_min),
            Vec2::new(x_range, z_max),
            floor_y + config.loose_tag_lift,
        )
    }

    /// Inverted bounds collapse to their midpoint
    pub fn new(a: Vec2, b: Vec2, y: f32) -> Self {
        let (min_x, max_x) = if a.x <= b.x { (a.x, b.x) } else { mid(a.x, b.x) };
        let (min_z, max_z) = if a.y <= b.y { (a.y, b.y) } else { mid(a.y, b.y) };
        Self {
            min: Vec2::new(min_x, min_z),
            max: Vec2::new(max_x, max_z),
            y,
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            uniform(rng, self.min.x, self.max.x),
            uniform(rng, self.min.y, self.max.y),
        )
    }

    fn lift(&self, p: Vec2) -> Vec3 {
        Vec3::new(p.x, self.y, p.y)
    }
}

fn mid(a: f32, b: f32) -> (f32, f32) {
    let m = (a + b) / 2.0;
    (m, m)
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Horizontal (XZ) distance, ignoring height
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Result of one sampling run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSample {
    pub position: Vec3,
    /// Random draws consumed
    pub attempts: u32,
    /// True when the grid sweep produced the position
    pub fell_back: bool,
}

#[derive(Debug, Clone)]
pub struct SafeSpawnSampler {
    pub area: SpawnArea,
    /// Pad positions on the same floor (only XZ matters)
    pub pads: Vec<Vec3>,
    pub clearance: f32,
    pub max_attempts: u32,
    pub sweep_steps: u32,
}

impl SafeSpawnSampler {
    pub fn new(area: SpawnArea, pads: Vec<Vec3>, config: &LayoutConfig) -> Self {
        Self {
            area,
            pads,
            clearance: config.teleporter_clearance,
            max_attempts: config.max_spawn_attempts.max(1),
            sweep_steps: config.spawn_sweep_steps.max(2),
        }
    }

    /// Distance from `point` to the nearest pad (infinite with no pads)
    pub fn pad_distance(&self, point: Vec3) -> f32 {
        self.pads
            .iter()
            .map(|pad| horizontal_distance(point, *pad))
            .fold(f32::INFINITY, f32::min)
    }

    pub fn is_safe(&self, point: Vec3) -> bool {
        self.pad_distance(point) >= self.clearance
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSample {
        for attempt in 1..=self.max_attempts {
            let candidate = self.area.lift(self.area.draw(rng));
            if self.is_safe(candidate) {
                return SpawnSample {
                    position: candidate,
                    attempts: attempt,
                    fell_back: false,
                };
            }
        }

        let position = self.sweep();
        if !self.is_safe(position) {
            warn!(
                ?position,
                clearance = self.clearance,
                "no spawn point clears every teleporter; using the farthest one"
            );
        }
        SpawnSample {
            position,
            attempts: self.max_attempts,
            fell_back: true,
        }
    }

    /// Grid point with the largest pad distance (first one wins on ties)
    fn sweep(&self) -> Vec3 {
        let steps = self.sweep_steps;
        let span = self.area.max - self.area.min;
        let mut best = self.area.lift(self.area.min);
        let mut best_distance = f32::NEG_INFINITY;
        for ix in 0..steps {
            for iz in 0..steps {
                let t = Vec2::new(ix as f32, iz as f32) / (steps - 1) as f32;
                let point = self.area.lift(self.area.min + span * t);
                let distance = self.pad_distance(point);
                if distance > best_distance {
                    best = point;
                    best_distance = distance;
                }
            }
        }
        best
    }
}
