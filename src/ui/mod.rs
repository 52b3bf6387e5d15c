//! UI domain — just the in-game HUD.

use bevy::prelude::*;

use crate::shared::*;

mod hud;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), hud::setup_hud)
            .add_systems(
                Update,
                (hud::update_day_weather_text, hud::update_selection_text)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
