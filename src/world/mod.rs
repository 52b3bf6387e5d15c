//! World domain — the map provider.
//!
//! Loads the farm layout during `GameState::Loading`, publishes `FarmMap`
//! and `WorldBounds` for the other domains, spawns the ground, then
//! transitions into Playing.

use bevy::prelude::*;

use crate::shared::*;

/// Farm layout shipped with the game.
const FARM_MAP_RON: &str = include_str!("../../assets/data/farm_map.ron");

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_farm_map);
    }
}

/// Parse the RON farm layout (falling back to the built-in default on a
/// bad file), publish the map resources, spawn the ground sprite, and move
/// on to Playing.
fn load_farm_map(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let map: FarmMap = match ron::from_str(FARM_MAP_RON) {
        Ok(map) => map,
        Err(err) => {
            warn!("farm_map.ron failed to parse ({err}); using built-in layout");
            FarmMap::default()
        }
    };

    let bounds = WorldBounds {
        width: map.width as f32 * TILE_SIZE,
        height: map.height as f32 * TILE_SIZE,
    };

    info!(
        "farm map loaded: {}×{} tiles, {} farmable",
        map.width,
        map.height,
        map.farmable_cells().len()
    );

    // Ground image covers the whole world, centred.
    commands.spawn((
        Sprite {
            image: asset_server.load("world/ground.png"),
            custom_size: Some(Vec2::new(bounds.width, bounds.height)),
            ..default()
        },
        Transform::from_translation(Vec3::new(
            bounds.width / 2.0,
            bounds.height / 2.0,
            Z_GROUND,
        )),
    ));

    commands.insert_resource(bounds);
    commands.insert_resource(map);
    next_state.set(GameState::Playing);
}
