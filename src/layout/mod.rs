//! Level layout generator.
//!
//! Turns a [`LevelDefinition`] into placements: one floor slab and four walls
//! per floor, the teleporter pads linking floors, one spot per tag and one
//! tag instance per spot. Generation is pure; the engine turns the result
//! into registry entries and tag instances.
//!
//! Coordinates: floors stack along +Y, spot rows run along the +Z (north)
//! wall, teleporter pads sit along the -Z (south) wall so loose tags and pads
//! never share the spot row.

pub mod spawn;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sha3::{Digest, Sha3_256};
use tracing::debug;

use crate::catalog::LevelDefinition;
use crate::config::LayoutConfig;
use crate::teleporter::{TeleportDirection, TeleporterLink};
use spawn::{SafeSpawnSampler, SpawnArea};

pub type LayoutRng = Xoshiro256PlusPlus;

/// Seed for one generation of one level.
///
/// Mixing in the generation counter makes a restart reshuffle loose tags while
/// keeping whole sessions reproducible from the base seed.
pub fn generation_seed(base_seed: u64, level_index: usize, generation: u64) -> u64 {
    let mut hasher = Sha3_256::new();
    hasher.update(base_seed.to_le_bytes());
    hasher.update((level_index as u64).to_le_bytes());
    hasher.update(generation.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

pub fn layout_rng(seed: u64) -> LayoutRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    North,
    South,
    East,
    West,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [
        WallSide::North,
        WallSide::South,
        WallSide::East,
        WallSide::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallSide::North => "North",
            WallSide::South => "South",
            WallSide::East => "East",
            WallSide::West => "West",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlacement {
    pub floor: u32,
    pub name: String,
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallPlacement {
    pub floor: u32,
    pub side: WallSide,
    pub name: String,
    pub center: Vec3,
    pub size: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeleporterPlacement {
    pub name: String,
    pub link: TeleporterLink,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpotPlacement {
    pub floor: u32,
    pub group: usize,
    pub index: usize,
    pub name: String,
    pub expected_tag: String,
    pub prefilled: bool,
    pub position: Vec3,
}

/// Where one tag instance starts
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpawn {
    pub text: String,
    pub prefilled: bool,
    pub floor: u32,
    /// Index into [`LevelLayout::spots`] of the spot this tag belongs to
    pub spot: usize,
    pub position: Vec3,
    /// Random draws used (0 for prefilled tags)
    pub spawn_attempts: u32,
    pub fell_back: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelLayout {
    pub floors: Vec<FloorPlacement>,
    pub walls: Vec<WallPlacement>,
    pub teleporters: Vec<TeleporterPlacement>,
    pub spots: Vec<SpotPlacement>,
    pub tags: Vec<TagSpawn>,
}

impl LevelLayout {
    pub fn teleporters_on(&self, floor: u32) -> impl Iterator<Item = &TeleporterPlacement> {
        self.teleporters
            .iter()
            .filter(move |t| t.link.source_floor == floor)
    }

    /// Random draws spent placing loose tags
    pub fn spawn_attempts(&self) -> u32 {
        self.tags.iter().map(|t| t.spawn_attempts).sum()
    }

    /// Loose tags that ended up at the grid-sweep fallback point
    pub fn spawn_fallbacks(&self) -> usize {
        self.tags.iter().filter(|t| t.fell_back).count()
    }
}

pub fn floor_placement(def: &LevelDefinition, floor: u32, config: &LayoutConfig) -> FloorPlacement {
    let dims = def.floor_dimensions;
    FloorPlacement {
        floor,
        name: format!("Floor_{floor}"),
        center: Vec3::new(0.0, def.floor_y(floor), 0.0),
        size: Vec3::new(dims.width, config.floor_thickness, dims.depth),
    }
}

/// North/south walls span the full width, east/west the full depth
pub fn wall_placements(def: &LevelDefinition, floor: u32, config: &LayoutConfig) -> Vec<WallPlacement> {
    let dims = def.floor_dimensions;
    let y = def.floor_y(floor);
    let (hw, hd) = (dims.half_width(), dims.half_depth());
    WallSide::ALL
        .iter()
        .map(|&side| {
            let (center, size) = match side {
                WallSide::North => (
                    Vec3::new(0.0, y, hd),
                    Vec3::new(dims.width, config.wall_height, config.wall_thickness),
                ),
                WallSide::South => (
                    Vec3::new(0.0, y, -hd),
                    Vec3::new(dims.width, config.wall_height, config.wall_thickness),
                ),
                WallSide::East => (
                    Vec3::new(hw, y, 0.0),
                    Vec3::new(config.wall_thickness, config.wall_height, dims.depth),
                ),
                WallSide::West => (
                    Vec3::new(-hw, y, 0.0),
                    Vec3::new(config.wall_thickness, config.wall_height, dims.depth),
                ),
            };
            WallPlacement {
                floor,
                side,
                name: format!("Wall_{floor}_{}", side.as_str()),
                center,
                size,
            }
        })
        .collect()
}

/// Up pad unless top floor, down pad unless bottom floor; a lone pad is
/// centred, a pair is split left (up) and right (down) by the spacing.
pub fn teleporter_placements(
    def: &LevelDefinition,
    floor: u32,
    config: &LayoutConfig,
) -> Vec<TeleporterPlacement> {
    let needs_up = floor + 1 < def.floor_count;
    let needs_down = floor > 0;
    let y = def.floor_y(floor) + config.teleporter_pad_lift;
    let z = -(def.floor_dimensions.half_depth() - config.teleporter_wall_offset);
    let half_gap = config.teleporter_spacing / 2.0;

    let pads: Vec<(TeleportDirection, f32)> = match (needs_up, needs_down) {
        (true, false) => vec![(TeleportDirection::Up, 0.0)],
        (false, true) => vec![(TeleportDirection::Down, 0.0)],
        (true, true) => vec![
            (TeleportDirection::Up, -half_gap),
            (TeleportDirection::Down, half_gap),
        ],
        (false, false) => Vec::new(),
    };

    pads.into_iter()
        .map(|(direction, x)| {
            let target_floor = match direction {
                TeleportDirection::Up => floor + 1,
                TeleportDirection::Down => floor - 1,
            };
            TeleporterPlacement {
                name: format!("Teleporter_{}_{floor}", direction.as_str()),
                link: TeleporterLink {
                    source_floor: floor,
                    target_height: def.floor_y(target_floor),
                    direction,
                },
                position: Vec3::new(x, y, z),
            }
        })
        .collect()
}

/// Spot row for a group: centred on x = 0 along the north wall
pub fn spot_positions(def: &LevelDefinition, floor: u32, count: usize, config: &LayoutConfig) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let y = def.floor_y(floor) + config.spot_height;
    let z = def.floor_dimensions.half_depth() - config.spot_wall_inset;
    let start_x = -((count - 1) as f32 * config.tag_spacing) / 2.0;
    (0..count)
        .map(|i| Vec3::new(start_x + i as f32 * config.tag_spacing, y, z))
        .collect()
}

/// Build the full layout for one level
pub fn generate(def: &LevelDefinition, config: &LayoutConfig, rng: &mut LayoutRng) -> LevelLayout {
    let mut layout = LevelLayout::default();

    for floor in 0..def.floor_count {
        layout.floors.push(floor_placement(def, floor, config));
        layout.walls.extend(wall_placements(def, floor, config));
        layout.teleporters.extend(teleporter_placements(def, floor, config));
    }

    for (group_idx, group) in def.tag_groups.iter().enumerate() {
        let floor = group.floor_number;
        let pads: Vec<Vec3> = layout.teleporters_on(floor).map(|t| t.position).collect();
        let area = SpawnArea::for_floor(def.floor_dimensions, def.floor_y(floor), config);
        let sampler = SafeSpawnSampler::new(area, pads, config);

        for (index, (text, position)) in group
            .tags
            .iter()
            .zip(spot_positions(def, floor, group.tags.len(), config))
            .enumerate()
        {
            let prefilled = group.is_prefilled(index);
            let spot = layout.spots.len();
            layout.spots.push(SpotPlacement {
                floor,
                group: group_idx,
                index,
                name: format!("TagSpot_{floor}_{index}"),
                expected_tag: text.clone(),
                prefilled,
                position,
            });

            let tag = if prefilled {
                TagSpawn {
                    text: text.clone(),
                    prefilled,
                    floor,
                    spot,
                    position: position + Vec3::Y * config.prefilled_tag_lift,
                    spawn_attempts: 0,
                    fell_back: false,
                }
            } else {
                let sample = sampler.sample(rng);
                TagSpawn {
                    text: text.clone(),
                    prefilled,
                    floor,
                    spot,
                    position: sample.position,
                    spawn_attempts: sample.attempts,
                    fell_back: sample.fell_back,
                }
            };
            layout.tags.push(tag);
        }
    }

    debug!(
        name = %def.name,
        floors = layout.floors.len(),
        teleporters = layout.teleporters.len(),
        spots = layout.spots.len(),
        spawn_attempts = layout.spawn_attempts(),
        spawn_fallbacks = layout.spawn_fallbacks(),
        "layout generated"
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FloorDimensions, LevelCatalog, TagGroup};
    use crate::constants::FLOOR_HEIGHT;
    use spawn::horizontal_distance;

    fn three_floors() -> LevelDefinition {
        LevelDefinition {
            name: "stack".into(),
            floor_count: 3,
            floor_dimensions: FloorDimensions::new(50.0, 40.0),
            floor_height: FLOOR_HEIGHT,
            tag_groups: vec![
                TagGroup::new(0, &["<p>", "a", "</p>"], &[1]),
                TagGroup::new(2, &["<b>", "b", "</b>", "<br>"], &[1, 3]),
            ],
        }
    }

    #[test]
    fn test_generation_seed_is_stable_and_distinct() {
        assert_eq!(generation_seed(42, 1, 0), generation_seed(42, 1, 0));
        assert_ne!(generation_seed(42, 1, 0), generation_seed(42, 1, 1));
        assert_ne!(generation_seed(42, 1, 0), generation_seed(42, 2, 0));
    }

    #[test]
    fn test_floor_and_wall_geometry() {
        let def = three_floors();
        let config = LayoutConfig::default();
        let floor = floor_placement(&def, 2, &config);
        assert_eq!(floor.name, "Floor_2");
        assert_eq!(floor.center, Vec3::new(0.0, 20.0, 0.0));
        assert_eq!(floor.size, Vec3::new(50.0, 0.5, 40.0));

        let walls = wall_placements(&def, 1, &config);
        assert_eq!(walls.len(), 4);
        let north = walls.iter().find(|w| w.side == WallSide::North).unwrap();
        assert_eq!(north.center, Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(north.size.x, 50.0);
        assert_eq!(north.name, "Wall_1_North");
        let east = walls.iter().find(|w| w.side == WallSide::East).unwrap();
        assert_eq!(east.center, Vec3::new(25.0, 10.0, 0.0));
        assert_eq!(east.size.z, 40.0);
    }

    #[test]
    fn test_teleporter_rule() {
        let def = three_floors();
        let config = LayoutConfig::default();

        let bottom = teleporter_placements(&def, 0, &config);
        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].link.direction, TeleportDirection::Up);
        assert_eq!(bottom[0].position.x, 0.0);
        assert_eq!(bottom[0].position.z, -18.0);
        assert!((bottom[0].link.target_height - 10.0).abs() < f32::EPSILON);

        let middle = teleporter_placements(&def, 1, &config);
        assert_eq!(middle.len(), 2);
        assert_eq!(middle[0].link.direction, TeleportDirection::Up);
        assert_eq!(middle[0].position.x, -4.0);
        assert_eq!(middle[1].link.direction, TeleportDirection::Down);
        assert_eq!(middle[1].position.x, 4.0);
        assert!((middle[1].link.target_height - 0.0).abs() < f32::EPSILON);
        assert_eq!(middle[1].name, "Teleporter_Down_1");

        let top = teleporter_placements(&def, 2, &config);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].link.direction, TeleportDirection::Down);
    }

    #[test]
    fn test_single_floor_has_no_teleporters() {
        let catalog = LevelCatalog::default();
        let def = catalog.get(1).unwrap();
        assert!(teleporter_placements(def, 0, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_spot_row_is_centred() {
        let def = three_floors();
        let spots = spot_positions(&def, 0, 3, &LayoutConfig::default());
        assert_eq!(spots[0], Vec3::new(-4.0, 0.3, 18.0));
        assert_eq!(spots[1], Vec3::new(0.0, 0.3, 18.0));
        assert_eq!(spots[2], Vec3::new(4.0, 0.3, 18.0));
        assert!(spot_positions(&def, 0, 0, &LayoutConfig::default()).is_empty());
    }

    #[test]
    fn test_generate_counts_and_prefills() {
        let def = three_floors();
        let config = LayoutConfig::default();
        let layout = generate(&def, &config, &mut layout_rng(5));
        assert_eq!(layout.floors.len(), 3);
        assert_eq!(layout.walls.len(), 12);
        assert_eq!(layout.teleporters.len(), 4);
        assert_eq!(layout.spots.len(), 7);
        assert_eq!(layout.tags.len(), 7);
        assert_eq!(layout.spots.iter().filter(|s| s.prefilled).count(), 3);

        for tag in layout.tags.iter().filter(|t| t.prefilled) {
            let spot = &layout.spots[tag.spot];
            assert_eq!(tag.text, spot.expected_tag);
            assert!((tag.position - (spot.position + Vec3::Y * 0.31)).length() < 1e-5);
        }
    }

    #[test]
    fn test_loose_tags_stay_on_their_floor_and_clear_pads() {
        let def = three_floors();
        let config = LayoutConfig::default();
        let layout = generate(&def, &config, &mut layout_rng(11));
        for tag in layout.tags.iter().filter(|t| !t.prefilled) {
            assert!((tag.position.y - (def.floor_y(tag.floor) + 0.5)).abs() < 1e-5);
            for pad in layout.teleporters_on(tag.floor) {
                assert!(horizontal_distance(tag.position, pad.position) >= config.teleporter_clearance);
            }
        }
    }

    #[test]
    fn test_spawn_counters() {
        let def = three_floors();
        let config = LayoutConfig::default();
        let layout = generate(&def, &config, &mut layout_rng(3));
        let loose = layout.tags.iter().filter(|t| !t.prefilled).count();
        assert_eq!(loose, 4);
        assert!(layout.spawn_attempts() >= loose as u32);
        assert!(layout
            .tags
            .iter()
            .filter(|t| t.prefilled)
            .all(|t| t.spawn_attempts == 0 && !t.fell_back));

        // Clearance larger than any floor: every loose tag uses the sweep
        let blocked = LayoutConfig {
            teleporter_clearance: 1000.0,
            ..LayoutConfig::default()
        };
        let layout = generate(&def, &blocked, &mut layout_rng(3));
        assert_eq!(layout.spawn_fallbacks(), loose);
        assert_eq!(layout.spawn_attempts(), loose as u32 * blocked.max_spawn_attempts);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let def = three_floors();
        let config = LayoutConfig::default();
        let a = generate(&def, &config, &mut layout_rng(77));
        let b = generate(&def, &config, &mut layout_rng(77));
        assert_eq!(a, b);
    }
}
