//! Per-tile crop state and growth.

use bevy::prelude::*;

use crate::shared::*;

/// A crop growing on one soil cell. The cell is referenced by position
/// only — the grid owns the cell, the plant just asks whether it is
/// watered each growth tick.
#[derive(Component, Debug, Clone)]
pub struct Plant {
    pub seed: SeedKind,
    pub cell: (usize, usize),
    /// Continuous growth accumulator, 0.0 at planting.
    pub age: f32,
    /// Last frame of the growth animation; age clamps here.
    pub max_age: f32,
    pub growth_rate: f32,
    pub harvestable: bool,
}

impl Plant {
    pub fn new(seed: SeedKind, cell: (usize, usize)) -> Self {
        Self {
            seed,
            cell,
            age: 0.0,
            max_age: (seed.stage_count() - 1) as f32,
            growth_rate: seed.growth_rate(),
            harvestable: false,
        }
    }

    /// One growth tick. Advances only if the owning cell was watered;
    /// clamps at `max_age` and flips `harvestable` there. Returns true if
    /// the age changed.
    pub fn grow(&mut self, watered: bool) -> bool {
        if !watered {
            return false;
        }
        let before = self.age;
        self.age += self.growth_rate;
        if self.age >= self.max_age {
            self.age = self.max_age;
            self.harvestable = true;
        }
        self.age != before
    }

    /// Growth-animation frame to display.
    pub fn frame(&self) -> usize {
        self.age as usize
    }

    /// Past the seedling stage the plant stands up: it renders on the main
    /// layer and its cell blocks the player.
    pub fn is_solid(&self) -> bool {
        self.frame() > 0
    }

    /// Render depth for the current growth stage.
    pub fn z(&self) -> f32 {
        if self.is_solid() {
            Z_MAIN
        } else {
            Z_GROUND_PLANT
        }
    }
}
