//! Headless integration tests for Sproutvale.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI/asset loading), and verify
//! that the soil, planting, day-cycle, and player-timer loops work.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use sproutvale::player::movement::player_input_and_move;
use sproutvale::player::timers::tick_player_timers;
use sproutvale::player::PlayerRig;
use sproutvale::shared::*;
use sproutvale::sky::trigger_sleep;
use sproutvale::soil::events_handler::{handle_plant_seed, handle_tool_use};
use sproutvale::soil::render::{rebuild_soil_tiles, sync_water_overlays};
use sproutvale::soil::{
    on_day_end, Plant, SoilAssets, SoilEntities, SoilGrid, SoilTileSprite, WaterOverlaySprite,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Weather>()
        .init_resource::<DayCounter>()
        .init_resource::<SolidCells>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToolUseEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<SoilChangedEvent>();

    app
}

/// Installs a 5×5 all-farmable soil grid plus the soil-local resources the
/// event handlers need. Bypasses the world domain's asset-backed map loader.
fn install_test_grid(app: &mut App) {
    let farmable = (0..5).flat_map(|row| (0..5).map(move |col| (col, row)));
    app.insert_resource(SoilGrid::new(5, 5, farmable));
    app.init_resource::<SoilEntities>();
}

/// Registers the soil logic systems (no rendering).
fn add_soil_systems(app: &mut App) {
    app.add_systems(
        Update,
        (handle_tool_use, handle_plant_seed, on_day_end)
            .run_if(in_state(GameState::Playing)),
    );
}

/// Transitions the test app to Playing state and ticks once to process it.
fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update(); // process state transition
}

fn grid_flags(app: &App, cell: (usize, usize)) -> CellFlags {
    app.world().resource::<SoilGrid>().flags(cell.0, cell.1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Hoe tills farmable soil and triggers a visual rebuild
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hoe_tills_farmable_cell() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(2, 2),
    });
    app.update();

    let flags = grid_flags(&app, (2, 2));
    assert!(flags.contains(CellFlags::TILLED), "Hoe should till the cell");
    assert!(
        !flags.contains(CellFlags::WATERED),
        "Tilling on a clear day should not water"
    );

    let events = app.world().resource::<Events<SoilChangedEvent>>();
    assert!(
        !events.is_empty(),
        "A successful till should announce a soil change"
    );
}

#[test]
fn test_hoe_outside_the_grid_is_a_no_op() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: Vec2::new(-50.0, -50.0),
    });
    app.update();

    let events = app.world().resource::<Events<SoilChangedEvent>>();
    assert!(
        events.is_empty(),
        "An off-grid till should not announce a soil change"
    );
}

#[test]
fn test_axe_has_no_soil_effect() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Axe,
        point: cell_to_world(2, 2),
    });
    app.update();

    assert!(
        !grid_flags(&app, (2, 2)).contains(CellFlags::TILLED),
        "Axe should leave the soil untouched"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Watering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_watering_can_requires_tilled_soil() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    // Watering untilled soil does nothing.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::WateringCan,
        point: cell_to_world(1, 1),
    });
    app.update();
    assert!(
        !grid_flags(&app, (1, 1)).contains(CellFlags::WATERED),
        "Untilled soil cannot be watered"
    );

    // Till, then water.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(1, 1),
    });
    app.update();
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::WateringCan,
        point: cell_to_world(1, 1),
    });
    app.update();

    let flags = grid_flags(&app, (1, 1));
    assert!(flags.contains(CellFlags::TILLED));
    assert!(flags.contains(CellFlags::WATERED), "Tilled soil should water");
}

#[test]
fn test_tilling_in_the_rain_waters_every_tilled_cell() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    // Till one cell while the sky is clear.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(0, 0),
    });
    app.update();
    assert!(!grid_flags(&app, (0, 0)).contains(CellFlags::WATERED));

    // Now it rains; tilling a second cell soaks both.
    app.world_mut().resource_mut::<Weather>().raining = true;
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(4, 4),
    });
    app.update();

    assert!(
        grid_flags(&app, (0, 0)).contains(CellFlags::WATERED),
        "Rain-till should also water previously tilled cells"
    );
    assert!(
        grid_flags(&app, (4, 4)).contains(CellFlags::WATERED),
        "Rain-till should water the fresh cell"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Planting
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_planting_spawns_a_plant_on_tilled_soil() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    // Seeds need tilled soil first.
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        point: cell_to_world(3, 3),
    });
    app.update();
    assert_eq!(
        app.world_mut().query::<&Plant>().iter(app.world()).count(),
        0,
        "Seeds on untilled soil should not sprout"
    );

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(3, 3),
    });
    app.update();
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        point: cell_to_world(3, 3),
    });
    app.update();

    let plants: Vec<Plant> = app
        .world_mut()
        .query::<&Plant>()
        .iter(app.world())
        .cloned()
        .collect();
    assert_eq!(plants.len(), 1, "Exactly one plant should exist");
    assert_eq!(plants[0].seed, SeedKind::Corn);
    assert_eq!(plants[0].cell, (3, 3));
    assert!(
        grid_flags(&app, (3, 3)).contains(CellFlags::PLANTED),
        "The cell should carry the planted marker"
    );
    assert!(
        app.world()
            .resource::<SoilEntities>()
            .plants
            .contains_key(&(3, 3)),
        "The entity map should track the new plant"
    );

    // A second seed on the same cell is rejected.
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Tomato,
        point: cell_to_world(3, 3),
    });
    app.update();
    assert_eq!(
        app.world_mut().query::<&Plant>().iter(app.world()).count(),
        1,
        "An occupied cell should refuse a second seed"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Day-end processing — growth, evaporation, rainy re-watering
// ─────────────────────────────────────────────────────────────────────────────

/// Tills, waters, and plants a corn seed at the given cell via events.
fn plant_watered_corn(app: &mut App, cell: (usize, usize)) {
    let point = cell_to_world(cell.0, cell.1);
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point,
    });
    app.update();
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::WateringCan,
        point,
    });
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        point,
    });
    app.update();
}

#[test]
fn test_day_end_grows_watered_plants_and_dries_the_soil() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    plant_watered_corn(&mut app, (2, 2));

    app.world_mut().send_event(DayEndEvent);
    app.update();

    let plant = app
        .world_mut()
        .query::<&Plant>()
        .iter(app.world())
        .next()
        .cloned()
        .expect("plant should exist");
    assert!(
        (plant.age - 1.0).abs() < f32::EPSILON,
        "Watered corn should advance one growth tick overnight"
    );
    assert!(
        !grid_flags(&app, (2, 2)).contains(CellFlags::WATERED),
        "Moisture should evaporate overnight"
    );
}

#[test]
fn test_day_end_skips_unwatered_plants() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    // Till and plant, but never water.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(2, 2),
    });
    app.update();
    app.world_mut().send_event(PlantSeedEvent {
        seed: SeedKind::Corn,
        point: cell_to_world(2, 2),
    });
    app.update();

    app.world_mut().send_event(DayEndEvent);
    app.update();

    let plant = app
        .world_mut()
        .query::<&Plant>()
        .iter(app.world())
        .next()
        .cloned()
        .expect("plant should exist");
    assert_eq!(plant.age, 0.0, "Dry plants should not grow overnight");
}

#[test]
fn test_rainy_morning_rewaters_tilled_soil() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(1, 1),
    });
    app.update();

    // The sky domain rolls tomorrow's weather before the day-end event goes
    // out; simulate a rainy roll.
    app.world_mut().resource_mut::<Weather>().raining = true;
    app.world_mut().send_event(DayEndEvent);
    app.update();

    assert!(
        grid_flags(&app, (1, 1)).contains(CellFlags::WATERED),
        "A rainy morning should leave tilled soil watered"
    );
}

#[test]
fn test_sprouted_plant_blocks_its_cell() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    plant_watered_corn(&mut app, (0, 4));

    app.world_mut().send_event(DayEndEvent);
    app.update();

    let solid = app.world().resource::<SolidCells>();
    assert!(
        solid.cells.contains(&(0, 4)),
        "A plant past its seed stage should block walking"
    );
}

#[test]
fn test_corn_ripens_over_watered_days() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    plant_watered_corn(&mut app, (2, 0));

    // Corn has 4 stages (max age 3 at rate 1.0): three watered nights ripen it.
    for night in 1..=3 {
        // Re-water before each night; day-end clears the moisture.
        app.world_mut().send_event(ToolUseEvent {
            tool: ToolKind::WateringCan,
            point: cell_to_world(2, 0),
        });
        app.update();
        app.world_mut().send_event(DayEndEvent);
        app.update();

        let plant = app
            .world_mut()
            .query::<&Plant>()
            .iter(app.world())
            .next()
            .cloned()
            .unwrap();
        assert!(
            (plant.age - night as f32).abs() < f32::EPSILON,
            "After {} nights, corn age should be {}",
            night,
            night
        );
    }

    let plant = app
        .world_mut()
        .query::<&Plant>()
        .iter(app.world())
        .next()
        .cloned()
        .unwrap();
    assert!(plant.harvestable, "Corn at max age should be harvestable");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Render reconciliation — sprite entities mirror the grid
// ─────────────────────────────────────────────────────────────────────────────

fn count_soil_tiles(app: &mut App) -> usize {
    app.world_mut()
        .query::<&SoilTileSprite>()
        .iter(app.world())
        .count()
}

fn count_water_overlays(app: &mut App) -> usize {
    app.world_mut()
        .query::<&WaterOverlaySprite>()
        .iter(app.world())
        .count()
}

/// Soil logic in Update plus the sprite-sync systems in PostUpdate, with
/// placeholder sprites (no asset loading).
fn build_render_app() -> App {
    let mut app = build_test_app();
    app.insert_resource(SoilGrid::new(5, 5, [(1, 1), (2, 2)]));
    app.init_resource::<SoilEntities>();
    app.init_resource::<SoilAssets>();
    add_soil_systems(&mut app);
    app.add_systems(
        PostUpdate,
        (rebuild_soil_tiles, sync_water_overlays).run_if(in_state(GameState::Playing)),
    );
    app
}

#[test]
fn test_failed_till_spawns_no_tile_sprite() {
    let mut app = build_render_app();
    enter_playing_state(&mut app);

    // (0, 0) is outside the farmable fields.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(0, 0),
    });
    app.update();
    assert_eq!(
        count_soil_tiles(&mut app),
        0,
        "A rejected till must not spawn a tile sprite"
    );

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        point: cell_to_world(1, 1),
    });
    app.update();
    assert_eq!(
        count_soil_tiles(&mut app),
        1,
        "A successful till spawns exactly one tile sprite"
    );
}

#[test]
fn test_water_overlays_follow_water_all_and_remove_water() {
    let mut app = build_render_app();
    enter_playing_state(&mut app);

    for cell in [(1, 1), (2, 2)] {
        app.world_mut().send_event(ToolUseEvent {
            tool: ToolKind::Hoe,
            point: cell_to_world(cell.0, cell.1),
        });
    }
    app.update();
    assert_eq!(count_soil_tiles(&mut app), 2);
    assert_eq!(count_water_overlays(&mut app), 0);

    app.world_mut().resource_mut::<SoilGrid>().water_all();
    app.update();
    assert_eq!(
        count_water_overlays(&mut app),
        2,
        "Every watered cell gets exactly one overlay"
    );

    app.world_mut().resource_mut::<SoilGrid>().remove_water();
    app.update();
    assert_eq!(
        count_water_overlays(&mut app),
        0,
        "Clearing the water must despawn every overlay"
    );
    assert_eq!(
        count_soil_tiles(&mut app),
        2,
        "Tilled tile sprites survive the water reset"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Player action timers dispatch events through the full loop
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tool_swing_tills_the_faced_cell_after_its_timer() {
    let mut app = build_test_app();
    install_test_grid(&mut app);

    // Timers tick on fixed 100 ms frames so test timing is deterministic.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        100,
    )));

    app.add_systems(
        Update,
        (tick_player_timers, handle_tool_use)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );

    // Player stands on cell (2, 2) facing down; the swing lands on (2, 1).
    let pos = cell_to_world(2, 2);
    let mut rig = PlayerRig::new(pos);
    rig.timers.tool_use.start();
    app.world_mut()
        .spawn((rig, Transform::from_translation(pos.extend(Z_MAIN))));

    enter_playing_state(&mut app);

    // 0.35 s swing at 100 ms per frame: four frames to completion.
    for _ in 0..4 {
        app.update();
    }
    // One more frame so the tool event reaches the soil handler.
    app.update();

    assert!(
        grid_flags(&app, (2, 1)).contains(CellFlags::TILLED),
        "The completed swing should till the cell one tile ahead"
    );
    assert!(
        !grid_flags(&app, (2, 2)).contains(CellFlags::TILLED),
        "The player's own cell should stay untouched"
    );
}

#[test]
fn test_seed_timer_plants_the_selected_seed() {
    let mut app = build_test_app();
    install_test_grid(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        100,
    )));

    app.add_systems(
        Update,
        (tick_player_timers, handle_tool_use, handle_plant_seed)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );

    // Pre-till the target cell so the seed can take.
    app.world_mut()
        .resource_mut::<SoilGrid>()
        .till(cell_to_world(2, 1));

    let pos = cell_to_world(2, 2);
    let mut rig = PlayerRig::new(pos);
    rig.selected_seed = 1; // tomato
    rig.timers.seed_use.start();
    app.world_mut()
        .spawn((rig, Transform::from_translation(pos.extend(Z_MAIN))));

    enter_playing_state(&mut app);

    for _ in 0..5 {
        app.update();
    }

    let plant = app
        .world_mut()
        .query::<&Plant>()
        .iter(app.world())
        .next()
        .cloned()
        .expect("seed timer should have planted");
    assert_eq!(plant.seed, SeedKind::Tomato);
    assert_eq!(plant.cell, (2, 1));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Movement and catalog switching through the input system
// ─────────────────────────────────────────────────────────────────────────────

/// Adds the per-frame player systems plus the input and world resources
/// they read.
fn add_player_systems(app: &mut App) {
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(WorldBounds {
        width: 5.0 * TILE_SIZE,
        height: 5.0 * TILE_SIZE,
    });
    app.add_systems(
        Update,
        (tick_player_timers, player_input_and_move)
            .chain()
            .run_if(in_state(GameState::Playing)),
    );
}

#[test]
fn test_diagonal_movement_is_speed_normalized() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_player_systems(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        100,
    )));

    let pos = cell_to_world(2, 2);
    app.world_mut().spawn((
        PlayerRig::new(pos),
        Transform::from_translation(pos.extend(Z_MAIN)),
    ));

    enter_playing_state(&mut app);

    // Hold up and right, then measure one 100 ms frame.
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyD);
    }
    let before = app
        .world_mut()
        .query::<&PlayerRig>()
        .single(app.world())
        .pos;
    app.update();
    let after = app
        .world_mut()
        .query::<&PlayerRig>()
        .single(app.world())
        .pos;

    let step = after - before;
    // speed 200 over 0.1 s, split across a unit diagonal: ~14.142 per axis.
    let expected = PLAYER_SPEED * 0.1 / 2.0_f32.sqrt();
    assert!(
        (step.x - expected).abs() < 0.01 && (step.y - expected).abs() < 0.01,
        "Diagonal step should be ({expected}, {expected}), got {step:?}"
    );
    assert!(
        (step.length() - PLAYER_SPEED * 0.1).abs() < 0.01,
        "Diagonal speed should equal cardinal speed"
    );
}

#[test]
fn test_player_can_walk_off_a_cell_that_turned_solid() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_player_systems(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        16,
    )));

    // The player stands on a planted cell whose crop sprouted overnight.
    let pos = cell_to_world(2, 2);
    app.world_mut().spawn((
        PlayerRig::new(pos),
        Transform::from_translation(pos.extend(Z_MAIN)),
    ));
    app.world_mut()
        .resource_mut::<SolidCells>()
        .cells
        .insert((2, 2));

    enter_playing_state(&mut app);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyD);
    for _ in 0..300 {
        app.update();
    }

    let after = app
        .world_mut()
        .query::<&PlayerRig>()
        .single(app.world())
        .pos;
    assert_ne!(after, pos, "The player must not be trapped on its own cell");
    assert!(
        after.x > 3.0 * TILE_SIZE,
        "Five simulated seconds of walking right should leave cell (2, 2), got {after:?}"
    );
}

#[test]
fn test_held_switch_key_cycles_once_per_cooldown_window() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_player_systems(&mut app);

    // 50 ms frames against the 200 ms switch cooldown.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        50,
    )));

    let pos = cell_to_world(2, 2);
    app.world_mut().spawn((
        PlayerRig::new(pos),
        Transform::from_translation(pos.extend(Z_MAIN)),
    ));

    enter_playing_state(&mut app);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyQ);

    // Inside one cooldown window the held key advances exactly one step.
    for _ in 0..3 {
        app.update();
    }
    let selected = app
        .world_mut()
        .query::<&PlayerRig>()
        .single(app.world())
        .selected_tool;
    assert_eq!(selected, 1, "Held Q should cycle the tool exactly once");

    // Once the window expires the still-held key cycles again.
    for _ in 0..4 {
        app.update();
    }
    let selected = app
        .world_mut()
        .query::<&PlayerRig>()
        .single(app.world())
        .selected_tool;
    assert_eq!(selected, 2, "The next window should allow one more cycle");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Sleeping ends the day
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sleeping_advances_the_day() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    app.init_resource::<ButtonInput<KeyCode>>();
    app.add_systems(
        Update,
        trigger_sleep.run_if(in_state(GameState::Playing)),
    );
    enter_playing_state(&mut app);

    assert_eq!(app.world().resource::<DayCounter>().day, 1);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyB);
    app.update();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.update();

    assert_eq!(
        app.world().resource::<DayCounter>().day,
        2,
        "Sleeping once should advance to day 2"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: Boot smoke — logic systems survive a frame budget
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_smoke_ticks_without_panic() {
    let mut app = build_test_app();
    install_test_grid(&mut app);
    add_soil_systems(&mut app);
    enter_playing_state(&mut app);

    for _ in 0..120 {
        app.update();
    }

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Playing,
        "State should remain Playing after smoke ticks"
    );
}
