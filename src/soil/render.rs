//! Visual sync for the soil domain.
//!
//! All three systems are state-driven: they read the grid and plant
//! components and reconcile sprite entities to match, so gameplay systems
//! never have to know about rendering.

use bevy::prelude::*;
use rand::Rng;

use super::{
    plant_atlas_base, SoilAssets, SoilEntities, SoilTileSprite, WaterOverlaySprite,
    WATER_OVERLAY_FRAMES,
};
use super::{Plant, SoilGrid};
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tilled soil tiles
// ─────────────────────────────────────────────────────────────────────────────

/// Rebuild every soil tile sprite when the tilled topology changes.
///
/// A single new tilled cell can flip the variant of any of its neighbors,
/// so the whole set is despawned and respawned with freshly computed
/// variants rather than patched in place.
pub fn rebuild_soil_tiles(
    mut soil_changed: EventReader<SoilChangedEvent>,
    grid: Res<SoilGrid>,
    assets: Res<SoilAssets>,
    mut entities: ResMut<SoilEntities>,
    mut commands: Commands,
) {
    if soil_changed.is_empty() {
        return;
    }
    soil_changed.clear();

    for (_, entity) in entities.soil_tiles.drain() {
        commands.entity(entity).despawn();
    }

    for (cell, variant) in grid.tilled_variants() {
        let translation = cell_to_world(cell.0, cell.1).extend(Z_SOIL);

        let sprite = if assets.loaded {
            Sprite::from_atlas_image(
                assets.soil_image.clone(),
                TextureAtlas {
                    layout: assets.soil_layout.clone(),
                    index: variant.atlas_index(),
                },
            )
        } else {
            Sprite {
                color: Color::srgb(0.45, 0.32, 0.20),
                custom_size: Some(Vec2::splat(TILE_SIZE)),
                ..default()
            }
        };

        let entity = commands
            .spawn((
                sprite,
                Transform::from_translation(translation),
                SoilTileSprite { cell },
            ))
            .id();
        entities.soil_tiles.insert(cell, entity);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Water overlays
// ─────────────────────────────────────────────────────────────────────────────

/// Reconcile water overlay sprites with the grid's `WATERED` cells: spawn
/// an overlay (random frame) for each newly watered cell, despawn overlays
/// whose cell dried out.
pub fn sync_water_overlays(
    grid: Res<SoilGrid>,
    assets: Res<SoilAssets>,
    mut entities: ResMut<SoilEntities>,
    mut commands: Commands,
) {
    if !grid.is_changed() {
        return;
    }

    // Dried-out cells lose their overlay.
    let stale: Vec<(usize, usize)> = entities
        .water_overlays
        .keys()
        .copied()
        .filter(|&cell| !grid.is_watered(cell))
        .collect();
    for cell in stale {
        if let Some(entity) = entities.water_overlays.remove(&cell) {
            commands.entity(entity).despawn();
        }
    }

    // Newly watered cells get one.
    let mut rng = rand::thread_rng();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = (col, row);
            if !grid.is_watered(cell) || entities.water_overlays.contains_key(&cell) {
                continue;
            }

            let translation = cell_to_world(col, row).extend(Z_SOIL_WATER);
            let sprite = if assets.loaded {
                Sprite::from_atlas_image(
                    assets.water_image.clone(),
                    TextureAtlas {
                        layout: assets.water_layout.clone(),
                        index: rng.gen_range(0..WATER_OVERLAY_FRAMES),
                    },
                )
            } else {
                Sprite {
                    color: Color::srgba(0.25, 0.35, 0.60, 0.6),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                }
            };

            let entity = commands
                .spawn((
                    sprite,
                    Transform::from_translation(translation),
                    WaterOverlaySprite { cell },
                ))
                .id();
            entities.water_overlays.insert(cell, entity);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plants
// ─────────────────────────────────────────────────────────────────────────────

/// Keep each plant sprite on the right growth frame and depth layer.
pub fn sync_plant_sprites(
    assets: Res<SoilAssets>,
    mut plants: Query<(&Plant, &mut Sprite, &mut Transform), Changed<Plant>>,
) {
    for (plant, mut sprite, mut transform) in plants.iter_mut() {
        transform.translation.z = plant.z();

        if assets.loaded {
            *sprite = Sprite::from_atlas_image(
                assets.plants_image.clone(),
                TextureAtlas {
                    layout: assets.plants_layout.clone(),
                    index: plant_atlas_base(plant.seed) + plant.frame(),
                },
            );
        } else {
            sprite.color = plant_stage_color(plant.frame(), plant.seed.stage_count());
            let grown = TILE_SIZE * (0.4 + 0.1 * plant.frame() as f32);
            sprite.custom_size = Some(Vec2::splat(grown));
        }
    }
}

/// Placeholder colour per growth stage when no atlas is loaded: pale
/// seedling green ripening towards a saturated harvest tone.
pub fn plant_stage_color(frame: usize, total_stages: usize) -> Color {
    let progress = frame as f32 / (total_stages.saturating_sub(1).max(1)) as f32;
    let r = 0.55 * (1.0 - progress) + 0.85 * progress;
    let g = 0.75 - 0.25 * progress;
    let b = 0.35 * (1.0 - progress);
    Color::srgb(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}
