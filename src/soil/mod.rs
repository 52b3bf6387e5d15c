//! Soil domain — tilling, watering, planting, crop growth.
//!
//! Communicates with other domains exclusively through crate::shared
//! events/resources. The grid itself lives in `grid.rs`; systems here and in
//! the submodules react to player actions and the day cycle.

use bevy::prelude::*;

use crate::shared::*;

pub mod grid;
pub mod plants;

pub mod events_handler;
pub mod render;

pub use events_handler::on_day_end;
pub use grid::{variant_from_adjacency, Adjacency, SoilGrid, SoilVariant};
pub use plants::Plant;

/// Tracks which soil/overlay/plant entities exist keyed by grid cell, so
/// systems can find the ECS entity for a given tile quickly.
#[derive(Resource, Default, Debug)]
pub struct SoilEntities {
    pub soil_tiles: std::collections::HashMap<(usize, usize), Entity>,
    pub water_overlays: std::collections::HashMap<(usize, usize), Entity>,
    pub plants: std::collections::HashMap<(usize, usize), Entity>,
}

/// Texture atlas handles for soil tiles, water overlays, and plant stages.
/// Loaded once on entering Playing; render systems fall back to colored
/// placeholder sprites until the handles resolve.
#[derive(Resource, Default)]
pub struct SoilAssets {
    pub loaded: bool,
    pub soil_image: Handle<Image>,
    pub soil_layout: Handle<TextureAtlasLayout>,
    pub water_image: Handle<Image>,
    pub water_layout: Handle<TextureAtlasLayout>,
    pub plants_image: Handle<Image>,
    pub plants_layout: Handle<TextureAtlasLayout>,
}

/// Marker component for tilled-soil tile sprites.
#[derive(Component, Debug, Clone)]
pub struct SoilTileSprite {
    pub cell: (usize, usize),
}

/// Marker component for water overlay sprites.
#[derive(Component, Debug, Clone)]
pub struct WaterOverlaySprite {
    pub cell: (usize, usize),
}

pub struct SoilPlugin;

impl Plugin for SoilPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoilEntities>()
            .init_resource::<SoilAssets>()
            .add_systems(OnEnter(GameState::Playing), (build_soil_grid, load_soil_atlases))
            .add_systems(
                Update,
                (
                    events_handler::handle_tool_use,
                    events_handler::handle_plant_seed,
                    events_handler::on_day_end,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Visual sync — runs after all state mutations.
            .add_systems(
                PostUpdate,
                (
                    render::rebuild_soil_tiles,
                    render::sync_water_overlays,
                    render::sync_plant_sprites,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Build the soil grid from the loaded farm map. Runs exactly once — the
/// grid survives any later state churn.
fn build_soil_grid(map: Res<FarmMap>, existing: Option<Res<SoilGrid>>, mut commands: Commands) {
    if existing.is_some() {
        return;
    }
    let grid = SoilGrid::new(map.width, map.height, map.farmable_cells());
    info!(
        "soil grid built: {}×{}, {} farmable cells",
        grid.width(),
        grid.height(),
        grid.count(CellFlags::FARMABLE)
    );
    commands.insert_resource(grid);
}

/// Loads the soil texture atlases once when the Playing state is entered.
///
/// Assets:
///   assets/tilesets/soil.png       — 20 variants × 64×64, one row
///   assets/tilesets/soil_water.png — 3 overlay frames × 64×64
///   assets/sprites/plants.png      — 64×64 stages, one row per crop
fn load_soil_atlases(
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut assets: ResMut<SoilAssets>,
) {
    if assets.loaded {
        return;
    }

    assets.soil_image = asset_server.load("tilesets/soil.png");
    assets.soil_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(64, 64),
        20,
        1,
        None,
        None,
    ));

    assets.water_image = asset_server.load("tilesets/soil_water.png");
    assets.water_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(64, 64),
        WATER_OVERLAY_FRAMES as u32,
        1,
        None,
        None,
    ));

    assets.plants_image = asset_server.load("sprites/plants.png");
    assets.plants_layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(64, 64),
        5,
        2,
        None,
        None,
    ));

    assets.loaded = true;
}

/// Number of interchangeable water-overlay frames in the tileset.
pub const WATER_OVERLAY_FRAMES: usize = 3;

/// Atlas row base per crop in plants.png.
pub fn plant_atlas_base(seed: SeedKind) -> usize {
    match seed {
        SeedKind::Corn => 0,
        SeedKind::Tomato => 5,
    }
}
