//! Follow camera.

use bevy::prelude::*;

use super::PlayerRig;
use crate::shared::*;

/// Smoothly follow the player with a lerp, clamped to the map bounds so the
/// viewport never shows past the edge of the world.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&PlayerRig, Without<Camera2d>>,
    mut camera_query: Query<(&mut Transform, &OrthographicProjection), With<Camera2d>>,
    bounds: Res<WorldBounds>,
) {
    let Ok(rig) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    let lerp_speed = 5.0;
    let t = (lerp_speed * time.delta_secs()).min(1.0);
    let smooth_x = cam_tf.translation.x + (rig.pos.x - cam_tf.translation.x) * t;
    let smooth_y = cam_tf.translation.y + (rig.pos.y - cam_tf.translation.y) * t;

    let half_vw = projection.area.width() / 2.0;
    let half_vh = projection.area.height() / 2.0;

    let min_x = half_vw;
    let max_x = (bounds.width - half_vw).max(min_x);
    let min_y = half_vh;
    let max_y = (bounds.height - half_vh).max(min_y);

    cam_tf.translation.x = smooth_x.clamp(min_x, max_x);
    cam_tf.translation.y = smooth_y.clamp(min_y, max_y);
}
