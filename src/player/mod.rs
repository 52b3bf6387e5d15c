//! Player domain — the timer-driven character state machine.
//!
//! Per-frame order matters and is enforced with a chained system set:
//! timers fire first, then input/status/movement, then animation.

mod animation;
mod camera;
pub mod movement;
mod spawn;
pub mod timers;

use bevy::prelude::*;

use crate::shared::*;
use timers::PlayerTimers;

pub use animation::{anim_row, FRAMES_PER_ROW};
pub use timers::{ActionTimer, TimerAction};

/// Marker component for the player entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// The player's full controller state: facing/mode pair, movement vector,
/// continuous position, animation cursor, catalog selections, and the four
/// action/cooldown timers.
#[derive(Component, Debug, Clone)]
pub struct PlayerRig {
    pub facing: Facing,
    pub mode: AnimMode,
    pub direction: Vec2,
    pub pos: Vec2,
    pub speed: f32,
    pub frame_index: f32,
    pub selected_tool: usize,
    pub selected_seed: usize,
    pub timers: PlayerTimers,
}

impl PlayerRig {
    pub fn new(pos: Vec2) -> Self {
        Self {
            facing: Facing::default(),
            mode: AnimMode::Idle,
            direction: Vec2::ZERO,
            pos,
            speed: PLAYER_SPEED,
            frame_index: 0.0,
            selected_tool: 0,
            selected_seed: 0,
            timers: PlayerTimers::default(),
        }
    }

    pub fn selected_tool(&self) -> ToolKind {
        TOOL_ORDER[self.selected_tool % TOOL_ORDER.len()]
    }

    pub fn selected_seed(&self) -> SeedKind {
        SEED_ORDER[self.selected_seed % SEED_ORDER.len()]
    }

    /// Where tool and seed actions land: one tile ahead of the player.
    pub fn target_point(&self) -> Vec2 {
        self.pos + self.facing.offset() * TILE_SIZE
    }
}

/// Character spritesheet handles, loaded once on entering Playing.
#[derive(Resource, Default)]
pub struct PlayerSpriteData {
    pub loaded: bool,
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerSpriteData>();

        app.add_systems(
            OnEnter(GameState::Playing),
            (load_player_sprites, spawn::spawn_player).chain(),
        );

        app.add_systems(
            Update,
            (
                timers::tick_player_timers,
                movement::player_input_and_move,
                animation::animate_player,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            camera::camera_follow_player.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Loads the character atlas: `FRAMES_PER_ROW` columns, one row per
/// (mode, facing) pair — see `anim_row`.
fn load_player_sprites(
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut sprites: ResMut<PlayerSpriteData>,
) {
    if sprites.loaded {
        return;
    }
    sprites.image = asset_server.load("sprites/character.png");
    sprites.layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(64, 64),
        FRAMES_PER_ROW as u32,
        20,
        None,
        None,
    ));
    sprites.loaded = true;
}
