//! Level catalog: the author-specified table of puzzle levels.
//!
//! Levels are fixed data. The built-in table lives in [`levels`]; an editor
//! can supply a replacement catalog as JSON or RON, which is validated before
//! use so the layout generator never sees an out-of-range floor or prefill.

pub mod levels;

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{FLOOR_DEPTH, FLOOR_HEIGHT, FLOOR_WIDTH};
use crate::error::{CatalogError, LevelError};

/// Floor footprint: width along X, depth along Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorDimensions {
    pub width: f32,
    pub depth: f32,
}

impl Default for FloorDimensions {
    fn default() -> Self {
        Self {
            width: FLOOR_WIDTH,
            depth: FLOOR_DEPTH,
        }
    }
}

impl FloorDimensions {
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f32 {
        self.depth / 2.0
    }
}

/// The tag sequence laid out on one floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagGroup {
    pub floor_number: u32,
    /// Order defines the left-to-right spot order
    pub tags: Vec<String>,
    /// Indices into `tags` that start correctly placed and locked
    #[serde(default)]
    pub prefilled_indices: BTreeSet<usize>,
}

impl TagGroup {
    pub fn new(floor_number: u32, tags: &[&str], prefilled: &[usize]) -> Self {
        Self {
            floor_number,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            prefilled_indices: prefilled.iter().copied().collect(),
        }
    }

    pub fn is_prefilled(&self, index: usize) -> bool {
        self.prefilled_indices.contains(&index)
    }
}

/// One playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub floor_count: u32,
    #[serde(default)]
    pub floor_dimensions: FloorDimensions,
    #[serde(default = "default_floor_height")]
    pub floor_height: f32,
    pub tag_groups: Vec<TagGroup>,
}

fn default_floor_height() -> f32 {
    FLOOR_HEIGHT
}

impl LevelDefinition {
    /// Total spots the level will register
    pub fn spot_count(&self) -> usize {
        self.tag_groups.iter().map(|g| g.tags.len()).sum()
    }

    /// Spots that start occupied
    pub fn prefilled_count(&self) -> usize {
        self.tag_groups.iter().map(|g| g.prefilled_indices.len()).sum()
    }

    pub fn floor_y(&self, floor: u32) -> f32 {
        floor as f32 * self.floor_height
    }

    /// Check the data-model invariants; `level` is the 1-based catalog index
    pub fn validate(&self, level: usize) -> Result<(), CatalogError> {
        if self.floor_count == 0 {
            return Err(CatalogError::NoFloors { level });
        }
        let dims = self.floor_dimensions;
        if !(dims.width > 0.0 && dims.depth > 0.0) {
            return Err(CatalogError::BadDimensions {
                level,
                width: dims.width,
                depth: dims.depth,
            });
        }
        if !(self.floor_height > 0.0) {
            return Err(CatalogError::BadFloorHeight {
                level,
                height: self.floor_height,
            });
        }
        for (group_idx, group) in self.tag_groups.iter().enumerate() {
            if group.floor_number >= self.floor_count {
                return Err(CatalogError::FloorOutOfRange {
                    level,
                    group: group_idx,
                    floor: group.floor_number,
                    floor_count: self.floor_count,
                });
            }
            if let Some(&index) = group
                .prefilled_indices
                .iter()
                .find(|&&i| i >= group.tags.len())
            {
                return Err(CatalogError::PrefillOutOfRange {
                    level,
                    group: group_idx,
                    index,
                    len: group.tags.len(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered table of levels, addressed 1-based
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub levels: Vec<LevelDefinition>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self {
            levels: levels::default_levels(),
        }
    }
}

impl LevelCatalog {
    /// Build a catalog, rejecting data that breaks the level invariants
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, CatalogError> {
        let catalog = Self { levels };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Look up a level by its 1-based index
    pub fn get(&self, level_index: usize) -> Result<&LevelDefinition, LevelError> {
        if level_index == 0 || level_index > self.levels.len() {
            return Err(LevelError::InvalidLevelIndex {
                index: level_index,
                available: self.levels.len(),
            });
        }
        Ok(&self.levels[level_index - 1])
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i + 1)?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_ron(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self = ron::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog file; the format follows the extension (`.json` or `.ron`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("ron") => Self::from_ron(&text),
            other => Err(CatalogError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
