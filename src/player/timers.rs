//! Countdown timers driving the player's actions.
//!
//! The timers are polled once per frame from the player update; there is no
//! clock thread. Completion is a tagged action rather than a callback, so
//! the system that ticks the timers decides what the completion means.

use bevy::prelude::*;

use crate::shared::*;

/// What firing a timer means. `None`-action timers are pure cooldowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    UseTool,
    PlantSeed,
}

/// A fire-once countdown. `start()` opens (or restarts) the window;
/// `tick()` advances it and yields the completion action exactly once when
/// the duration elapses, deactivating the timer.
#[derive(Debug, Clone)]
pub struct ActionTimer {
    duration: f32,
    elapsed: f32,
    active: bool,
    action: Option<TimerAction>,
}

impl ActionTimer {
    pub fn new(duration: f32, action: Option<TimerAction>) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
            action,
        }
    }

    /// Begin the countdown. Starting while active restarts the window.
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Advance by `dt` seconds. On expiry the timer deactivates and its
    /// action (if any) is returned — once.
    pub fn tick(&mut self, dt: f32) -> Option<TimerAction> {
        if !self.active {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
            return self.action;
        }
        None
    }
}

/// The player's four timer slots. Tool use and seed use are independent
/// action slots; the switch timers are plain cooldowns gating catalog
/// cycling while the key is held.
#[derive(Debug, Clone)]
pub struct PlayerTimers {
    pub tool_use: ActionTimer,
    pub tool_switch: ActionTimer,
    pub seed_use: ActionTimer,
    pub seed_switch: ActionTimer,
}

impl Default for PlayerTimers {
    fn default() -> Self {
        Self {
            tool_use: ActionTimer::new(TOOL_USE_SECS, Some(TimerAction::UseTool)),
            tool_switch: ActionTimer::new(TOOL_SWITCH_SECS, None),
            seed_use: ActionTimer::new(SEED_USE_SECS, Some(TimerAction::PlantSeed)),
            seed_switch: ActionTimer::new(SEED_SWITCH_SECS, None),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System: tick all timers, dispatch completed actions
// ─────────────────────────────────────────────────────────────────────────────

/// First step of the player's per-frame order: advance all four timers.
/// A completed tool-use fires a `ToolUseEvent` at the faced target point;
/// a completed seed-use fires a `PlantSeedEvent` with the selected seed.
pub fn tick_player_timers(
    time: Res<Time>,
    mut query: Query<&mut super::PlayerRig>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut plant_events: EventWriter<PlantSeedEvent>,
) {
    let dt = time.delta_secs();
    for mut rig in query.iter_mut() {
        let target = rig.target_point();

        if let Some(TimerAction::UseTool) = rig.timers.tool_use.tick(dt) {
            tool_events.send(ToolUseEvent {
                tool: rig.selected_tool(),
                point: target,
            });
        }
        if let Some(TimerAction::PlantSeed) = rig.timers.seed_use.tick(dt) {
            plant_events.send(PlantSeedEvent {
                seed: rig.selected_seed(),
                point: target,
            });
        }
        rig.timers.tool_switch.tick(dt);
        rig.timers.seed_switch.tick(dt);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
