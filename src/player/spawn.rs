//! Player entity spawn.

use bevy::prelude::*;

use super::{Player, PlayerRig};
use crate::shared::*;

/// Spawn the player at the centre of the farm.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    bounds: Res<WorldBounds>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if re-entering Playing.
    if !existing.is_empty() {
        return;
    }

    let pos = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);

    commands.spawn((
        Player,
        PlayerRig::new(pos),
        // Placeholder sprite; animate_player swaps in the atlas once the
        // character sheet is loaded.
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(TILE_SIZE, TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(pos.extend(Z_MAIN)),
        Visibility::default(),
    ));

    info!("player spawned at {:?}", pos);
}
