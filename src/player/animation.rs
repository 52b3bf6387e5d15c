//! Frame advance for the character spritesheet.

use bevy::prelude::*;

use super::{PlayerRig, PlayerSpriteData};
use crate::shared::*;

/// Frames in every animation row of character.png.
pub const FRAMES_PER_ROW: usize = 4;

/// Atlas row for a (facing, mode) pair. Rows are grouped by mode, four
/// facings per group: idle, walk, hoe, axe, water.
pub fn anim_row(facing: Facing, mode: AnimMode) -> usize {
    let group = match mode {
        AnimMode::Idle => 0,
        AnimMode::Walk => 1,
        AnimMode::Tool(ToolKind::Hoe) => 2,
        AnimMode::Tool(ToolKind::Axe) => 3,
        AnimMode::Tool(ToolKind::WateringCan) => 4,
    };
    let facing_idx = match facing {
        Facing::Down => 0,
        Facing::Up => 1,
        Facing::Left => 2,
        Facing::Right => 3,
    };
    group * 4 + facing_idx
}

/// Step 5 of the per-frame order: advance the animation cursor at a fixed
/// rate scaled by elapsed time, wrapping at the end of the row.
pub fn animate_player(
    time: Res<Time>,
    sprites: Res<PlayerSpriteData>,
    mut query: Query<(&mut PlayerRig, &mut Sprite)>,
) {
    for (mut rig, mut sprite) in query.iter_mut() {
        rig.frame_index += ANIM_FPS * time.delta_secs();
        if rig.frame_index >= FRAMES_PER_ROW as f32 {
            rig.frame_index = 0.0;
        }

        if !sprites.loaded {
            continue;
        }
        let index = anim_row(rig.facing, rig.mode) * FRAMES_PER_ROW + rig.frame_index as usize;
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = index;
        } else {
            *sprite = Sprite::from_atlas_image(
                sprites.image.clone(),
                TextureAtlas {
                    layout: sprites.layout.clone(),
                    index,
                },
            );
        }
    }
}
