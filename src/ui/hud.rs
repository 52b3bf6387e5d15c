//! In-game HUD: day, weather, and the selected tool/seed.

use bevy::prelude::*;

use crate::player::PlayerRig;
use crate::shared::*;

#[derive(Component)]
pub struct HudRoot;

/// Marker for the "Day N — weather" text.
#[derive(Component)]
pub struct HudDayText;

/// Marker for the "tool / seed" text.
#[derive(Component)]
pub struct HudSelectionText;

pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(36.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            PickingBehavior::IGNORE,
        ))
        .with_children(|bar| {
            bar.spawn((
                HudDayText,
                Text::new("Day 1 — clear"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));

            bar.spawn((
                HudSelectionText,
                Text::new("Hoe | Corn"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
                PickingBehavior::IGNORE,
            ));
        });
}

pub fn update_day_weather_text(
    day: Res<DayCounter>,
    weather: Res<Weather>,
    mut query: Query<&mut Text, With<HudDayText>>,
) {
    if !day.is_changed() && !weather.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        let sky = if weather.raining { "rain" } else { "clear" };
        **text = format!("Day {} — {}", day.day, sky);
    }
}

pub fn update_selection_text(
    player: Query<&PlayerRig, Changed<PlayerRig>>,
    mut query: Query<&mut Text, With<HudSelectionText>>,
) {
    let Ok(rig) = player.get_single() else {
        return;
    };
    let tool = match rig.selected_tool() {
        ToolKind::Hoe => "Hoe",
        ToolKind::Axe => "Axe",
        ToolKind::WateringCan => "Watering can",
    };
    let seed = match rig.selected_seed() {
        SeedKind::Corn => "Corn",
        SeedKind::Tomato => "Tomato",
    };
    for mut text in query.iter_mut() {
        **text = format!("{} | {}", tool, seed);
    }
}
