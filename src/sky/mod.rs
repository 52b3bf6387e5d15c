//! Sky domain — the day cycle and rain.
//!
//! The player ends the day by going to sleep; the new day's weather is
//! rolled *before* the `DayEndEvent` goes out, so the soil domain's
//! overnight processing can already see whether the morning is rainy.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Hard cap on live rain particles.
const MAX_RAIN_PARTICLES: usize = 400;

/// Particles spawned per frame while raining (drops + splashes).
const RAIN_SPAWN_PER_FRAME: usize = 6;

/// A falling rain drop. Despawns when its lifetime runs out or it leaves
/// the world.
#[derive(Component, Debug)]
pub struct RainDrop {
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// A stationary splash on the ground, visible for a few tenths of a second.
#[derive(Component, Debug)]
pub struct RainSplash {
    pub lifetime: f32,
}

pub struct SkyPlugin;

impl Plugin for SkyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                trigger_sleep,
                spawn_rain_particles.run_if(is_raining),
                update_rain_particles,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

fn is_raining(weather: Res<Weather>) -> bool {
    weather.raining
}

// ─────────────────────────────────────────────────────────────────────────────
// Day transition
// ─────────────────────────────────────────────────────────────────────────────

/// Pressing B ends the day: bump the counter, roll tomorrow's weather,
/// then announce the transition.
pub fn trigger_sleep(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut day: ResMut<DayCounter>,
    mut weather: ResMut<Weather>,
    mut day_end: EventWriter<DayEndEvent>,
) {
    if !keyboard.just_pressed(KeyCode::KeyB) {
        return;
    }

    day.day += 1;
    weather.raining = rand::thread_rng().gen_bool(RAIN_CHANCE);

    info!(
        "day {} begins — {}",
        day.day,
        if weather.raining { "rain" } else { "clear skies" }
    );
    day_end.send(DayEndEvent);
}

// ─────────────────────────────────────────────────────────────────────────────
// Rain particles
// ─────────────────────────────────────────────────────────────────────────────

/// Scatter fresh drops and floor splashes across the world each frame.
pub fn spawn_rain_particles(
    mut commands: Commands,
    bounds: Res<WorldBounds>,
    drops: Query<(), With<RainDrop>>,
    splashes: Query<(), With<RainSplash>>,
) {
    let existing = drops.iter().count() + splashes.iter().count();
    if existing >= MAX_RAIN_PARTICLES {
        return;
    }

    let mut rng = rand::thread_rng();
    for _ in 0..RAIN_SPAWN_PER_FRAME.min(MAX_RAIN_PARTICLES - existing) {
        let x = rng.gen_range(0.0..bounds.width.max(1.0));
        let y = rng.gen_range(0.0..bounds.height.max(1.0));

        if rng.gen_bool(0.5) {
            // Falling drop: a thin slanted streak.
            let speed = rng.gen_range(200.0..250.0);
            commands.spawn((
                Sprite {
                    color: Color::srgba(0.6, 0.7, 0.9, 0.8),
                    custom_size: Some(Vec2::new(2.0, 10.0)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(x, y, Z_RAIN_DROPS)),
                RainDrop {
                    velocity: Vec2::new(-2.0, -4.0).normalize() * speed,
                    lifetime: rng.gen_range(0.4..0.5),
                },
            ));
        } else {
            commands.spawn((
                Sprite {
                    color: Color::srgba(0.6, 0.7, 0.9, 0.5),
                    custom_size: Some(Vec2::splat(4.0)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(x, y, Z_RAIN_FLOOR)),
                RainSplash {
                    lifetime: rng.gen_range(0.4..0.5),
                },
            ));
        }
    }
}

/// Advance drops, age both particle kinds, despawn the spent ones.
pub fn update_rain_particles(
    time: Res<Time>,
    mut commands: Commands,
    mut drops: Query<(Entity, &mut Transform, &mut RainDrop)>,
    mut splashes: Query<(Entity, &mut RainSplash)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut drop) in drops.iter_mut() {
        transform.translation.x += drop.velocity.x * dt;
        transform.translation.y += drop.velocity.y * dt;
        drop.lifetime -= dt;
        if drop.lifetime <= 0.0 || transform.translation.y < 0.0 {
            commands.entity(entity).despawn();
        }
    }

    for (entity, mut splash) in splashes.iter_mut() {
        splash.lifetime -= dt;
        if splash.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
