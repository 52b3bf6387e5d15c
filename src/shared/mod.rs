//! Shared components, resources, events, and states for Sproutvale.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit offset one step in this direction (Bevy y-up).
    pub fn offset(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, 1.0),
            Facing::Down => Vec2::new(0.0, -1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    Axe,
    WateringCan,
}

/// The ordered tool catalog, cycled by the tool-switch key.
pub const TOOL_ORDER: [ToolKind; 3] = [ToolKind::Hoe, ToolKind::Axe, ToolKind::WateringCan];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedKind {
    Corn,
    Tomato,
}

/// The ordered seed catalog, cycled by the seed-switch key.
pub const SEED_ORDER: [SeedKind; 2] = [SeedKind::Corn, SeedKind::Tomato];

impl SeedKind {
    /// Growth added per growth tick.
    pub fn growth_rate(self) -> f32 {
        match self {
            SeedKind::Corn => 1.0,
            SeedKind::Tomato => 0.7,
        }
    }

    /// Number of frames in this crop's growth animation.
    /// A plant is ripe once its age reaches `stage_count - 1`.
    pub fn stage_count(self) -> usize {
        match self {
            SeedKind::Corn => 4,
            SeedKind::Tomato => 5,
        }
    }
}

/// The player's displayed animation mode. Together with `Facing` this forms
/// the composite status that selects an animation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimMode {
    Idle,
    Walk,
    Tool(ToolKind),
}

// ═══════════════════════════════════════════════════════════════════════
// SOIL CELL MARKERS
// ═══════════════════════════════════════════════════════════════════════

/// Marker set for one soil cell. Multiple markers coexist — this is set
/// semantics over four flags, packed into a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellFlags(u8);

impl CellFlags {
    pub const FARMABLE: CellFlags = CellFlags(1 << 0);
    pub const TILLED: CellFlags = CellFlags(1 << 1);
    pub const WATERED: CellFlags = CellFlags(1 << 2);
    pub const PLANTED: CellFlags = CellFlags(1 << 3);

    pub const fn empty() -> Self {
        CellFlags(0)
    }

    pub fn contains(self, other: CellFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CellFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: CellFlags) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SKY & DAY CYCLE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weather {
    pub raining: bool,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayCounter {
    pub day: u32,
}

impl Default for DayCounter {
    fn default() -> Self {
        Self { day: 1 }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COLLISION & WORLD EXTENT
// ═══════════════════════════════════════════════════════════════════════

/// Grid cells the player cannot walk through. Written by the soil domain
/// when a plant grows past the seedling stage, read by player movement.
#[derive(Resource, Debug, Clone, Default)]
pub struct SolidCells {
    pub cells: HashSet<(usize, usize)>,
}

/// World extent in pixels, derived from the loaded farm map.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// FARM MAP
// ═══════════════════════════════════════════════════════════════════════

/// A rectangle of farmable tiles, in grid coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// The loaded farm layout: grid dimensions plus the farmable fields.
/// Populated by the world domain during Loading; the soil grid is built
/// from it exactly once.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FarmMap {
    pub width: usize,
    pub height: usize,
    pub fields: Vec<FieldRect>,
}

impl FarmMap {
    /// Every farmable cell, clipped to the grid.
    pub fn farmable_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for field in &self.fields {
            for row in field.y..(field.y + field.h).min(self.height) {
                for col in field.x..(field.x + field.w).min(self.width) {
                    cells.push((col, row));
                }
            }
        }
        cells
    }
}

impl Default for FarmMap {
    /// Fallback layout: one central field, used when the RON map fails to
    /// parse.
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            fields: vec![FieldRect { x: 4, y: 3, w: 12, h: 8 }],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// A completed tool use, resolved against the soil at `point`.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub point: Vec2,
}

/// A completed seed use: plant `seed` at `point` if the cell allows it.
#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub seed: SeedKind,
    pub point: Vec2,
}

/// The player went to sleep; the day is over.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent;

/// Tilled-cell topology changed — every soil tile sprite must be
/// regenerated, since neighbor adjacency can change any cell's variant.
#[derive(Event, Debug, Clone)]
pub struct SoilChangedEvent;

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 64.0;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const PLAYER_SPEED: f32 = 200.0;
/// Animation frames advanced per second of elapsed time.
pub const ANIM_FPS: f32 = 4.0;

pub const TOOL_USE_SECS: f32 = 0.35;
pub const TOOL_SWITCH_SECS: f32 = 0.2;
pub const SEED_USE_SECS: f32 = 0.35;
pub const SEED_SWITCH_SECS: f32 = 0.2;

/// Probability that a fresh day starts rainy.
pub const RAIN_CHANCE: f64 = 0.3;

// Depth layers, bottom to top.
pub const Z_GROUND: f32 = 0.0;
pub const Z_SOIL: f32 = 1.0;
pub const Z_SOIL_WATER: f32 = 2.0;
pub const Z_RAIN_FLOOR: f32 = 3.0;
pub const Z_GROUND_PLANT: f32 = 4.0;
pub const Z_MAIN: f32 = 5.0;
pub const Z_RAIN_DROPS: f32 = 9.0;

// ═══════════════════════════════════════════════════════════════════════
// GRID HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Convert a world-space point to a grid cell, or None if it falls outside.
pub fn point_to_cell(point: Vec2, width: usize, height: usize) -> Option<(usize, usize)> {
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let col = (point.x / TILE_SIZE) as usize;
    let row = (point.y / TILE_SIZE) as usize;
    if col >= width || row >= height {
        return None;
    }
    Some((col, row))
}

/// Centre of a grid cell in world space.
pub fn cell_to_world(col: usize, row: usize) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}
