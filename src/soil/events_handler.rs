//! Reactions to player actions and the day cycle.

use bevy::prelude::*;

use super::{Plant, SoilEntities, SoilGrid};
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tool use — hoe tills, watering can waters, axe has no soil effect
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<SoilGrid>,
    weather: Res<Weather>,
    mut soil_changed: EventWriter<SoilChangedEvent>,
) {
    for event in tool_events.read() {
        match event.tool {
            ToolKind::Hoe => {
                if !grid.till(event.point) {
                    // Not farmable, already tilled, or off-grid — no mutation,
                    // no visual change.
                    continue;
                }

                // Adjacency can change the variant of any tilled tile, so
                // the whole grid's sprites are regenerated.
                soil_changed.send(SoilChangedEvent);

                // While it rains, fresh soil gets watered for free — and so
                // does every other tilled cell still waiting for it.
                if weather.raining {
                    grid.water_all();
                }
            }
            ToolKind::WateringCan => {
                if let Some(cell) = grid.water(event.point) {
                    debug!("watered cell {:?}", cell);
                }
            }
            // Tree chopping lives outside the soil domain.
            ToolKind::Axe => {}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut grid: ResMut<SoilGrid>,
    mut entities: ResMut<SoilEntities>,
    mut commands: Commands,
) {
    for event in plant_events.read() {
        let Some(cell) = grid.plant(event.point) else {
            continue;
        };

        let plant = Plant::new(event.seed, cell);
        let translation = cell_to_world(cell.0, cell.1).extend(plant.z());

        // Placeholder sprite; sync_plant_sprites swaps in the atlas frame
        // once the plant textures are loaded.
        let entity = commands
            .spawn((
                Sprite {
                    color: Color::srgb(0.45, 0.75, 0.35),
                    custom_size: Some(Vec2::splat(TILE_SIZE * 0.5)),
                    ..default()
                },
                Transform::from_translation(translation),
                plant,
            ))
            .id();
        entities.plants.insert(cell, entity);

        info!("planted {:?} at {:?}", event.seed, cell);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Day end
// ─────────────────────────────────────────────────────────────────────────────

/// Overnight soil processing, in the order the day-reset has always run:
/// plants grow on the ended day's moisture, then the moisture evaporates,
/// then a rainy morning re-waters every tilled cell.
///
/// `Weather` has already been rolled for the new day by the sky domain
/// before the `DayEndEvent` is sent.
pub fn on_day_end(
    mut day_events: EventReader<DayEndEvent>,
    mut grid: ResMut<SoilGrid>,
    weather: Res<Weather>,
    mut plants: Query<&mut Plant>,
    mut solid: ResMut<SolidCells>,
) {
    for _ in day_events.read() {
        let mut grown = 0usize;
        for mut plant in plants.iter_mut() {
            let watered = grid.is_watered(plant.cell);
            if plant.grow(watered) {
                grown += 1;
            }
            if plant.is_solid() {
                solid.cells.insert(plant.cell);
            }
        }

        grid.remove_water();

        if weather.raining {
            let soaked = grid.water_all();
            info!("rainy morning — {} tilled cells watered", soaked.len());
        }

        info!("day ended: {} plants grew", grown);
    }
}
