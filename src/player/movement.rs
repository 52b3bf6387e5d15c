//! Input, status, and movement — steps 2–4 of the player's per-frame order.

use bevy::prelude::*;

use super::PlayerRig;
use crate::shared::*;

/// One ordered pass: read input (unless a tool swing is in flight), derive
/// the displayed status, then integrate movement with normalized diagonals,
/// axis-separated collision, and world-bounds clamping.
pub fn player_input_and_move(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    bounds: Res<WorldBounds>,
    solid: Res<SolidCells>,
    mut query: Query<(&mut PlayerRig, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut rig, mut transform) in query.iter_mut() {
        // ── Input ────────────────────────────────────────────────────────
        // Suppressed while the tool-use timer runs; the swing finishes
        // before the player can steer again.
        if !rig.timers.tool_use.active() {
            read_movement_keys(&keyboard, &mut rig);

            // Tool use: starts the swing, roots the player, restarts the
            // animation from its first frame.
            if keyboard.pressed(KeyCode::Space) {
                rig.timers.tool_use.start();
                rig.direction = Vec2::ZERO;
                rig.frame_index = 0.0;
            }

            // Seed use: an independent action slot with the same rooting
            // side effects. It may overlap a pending tool swing by design.
            if keyboard.pressed(KeyCode::ControlLeft) {
                rig.timers.seed_use.start();
                rig.direction = Vec2::ZERO;
                rig.frame_index = 0.0;
            }

            // Catalog cycling, each gated by its own short cooldown so a
            // held key advances exactly one step per window.
            if keyboard.pressed(KeyCode::KeyQ) && !rig.timers.tool_switch.active() {
                rig.timers.tool_switch.start();
                rig.selected_tool = (rig.selected_tool + 1) % TOOL_ORDER.len();
            }
            if keyboard.pressed(KeyCode::KeyE) && !rig.timers.seed_switch.active() {
                rig.timers.seed_switch.start();
                rig.selected_seed = (rig.selected_seed + 1) % SEED_ORDER.len();
            }
        }

        // ── Status ───────────────────────────────────────────────────────
        rig.mode = if rig.direction == Vec2::ZERO {
            AnimMode::Idle
        } else {
            AnimMode::Walk
        };
        // An in-flight swing overrides idle/walk. Seed use does not change
        // the displayed mode.
        if rig.timers.tool_use.active() {
            rig.mode = AnimMode::Tool(rig.selected_tool());
        }

        // ── Movement ─────────────────────────────────────────────────────
        if rig.direction != Vec2::ZERO {
            // Unit-normalize so diagonal speed equals cardinal speed.
            let step = rig.direction.normalize() * rig.speed * dt;

            // Axis-separated so the player slides along blocked cells.
            let candidate_x = rig.pos.x + step.x;
            if !is_blocked(Vec2::new(candidate_x, rig.pos.y), rig.pos, &solid, &bounds) {
                rig.pos.x = candidate_x;
            }
            let candidate_y = rig.pos.y + step.y;
            if !is_blocked(Vec2::new(rig.pos.x, candidate_y), rig.pos, &solid, &bounds) {
                rig.pos.y = candidate_y;
            }
        }

        transform.translation.x = rig.pos.x;
        transform.translation.y = rig.pos.y;
    }
}

/// Axis input with opposing keys cancelling to zero; each axis sets its own
/// part of the direction and the facing, and neither axis affects the other.
fn read_movement_keys(keyboard: &ButtonInput<KeyCode>, rig: &mut PlayerRig) {
    let up = keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::KeyW);
    let down = keyboard.pressed(KeyCode::ArrowDown) || keyboard.pressed(KeyCode::KeyS);
    let left = keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA);
    let right = keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD);

    let vertical = (up as i8 - down as i8) as f32;
    rig.direction.y = vertical;
    if vertical > 0.0 {
        rig.facing = Facing::Up;
    } else if vertical < 0.0 {
        rig.facing = Facing::Down;
    }

    let horizontal = (right as i8 - left as i8) as f32;
    rig.direction.x = horizontal;
    if horizontal > 0.0 {
        rig.facing = Facing::Right;
    } else if horizontal < 0.0 {
        rig.facing = Facing::Left;
    }
}

/// A world position is blocked when it leaves the map or *enters* a cell a
/// grown plant occupies. The cell the player is already standing on stays
/// passable: a plant can turn solid underfoot overnight, and the player
/// must be able to walk off it.
fn is_blocked(pos: Vec2, from: Vec2, solid: &SolidCells, bounds: &WorldBounds) -> bool {
    if bounds.width > 0.0
        && (pos.x < 0.0 || pos.y < 0.0 || pos.x >= bounds.width || pos.y >= bounds.height)
    {
        return true;
    }

    let width = (bounds.width / TILE_SIZE) as usize;
    let height = (bounds.height / TILE_SIZE) as usize;
    let (width, height) = (width.max(1), height.max(1));
    match point_to_cell(pos, width, height) {
        Some(cell) => {
            solid.cells.contains(&cell)
                && point_to_cell(from, width, height).map_or(true, |occupied| occupied != cell)
        }
        None => false,
    }
}
