//! Platform abstraction layer
//!
//! The session only talks to its host through these capabilities:
//! - Rendering a snapshot of the arena
//! - Draining input accumulated between frames
//! - Fire-and-forget audio cues
//! - HUD text

pub mod input;

pub use input::{InputState, Key};

use crate::sim::{GameState, TickInput};

/// Draws the current arena. Owns its own mesh representation.
pub trait RenderSurface {
    fn render(&mut self, state: &GameState);
}

/// Source of per-frame input
pub trait InputSource {
    /// Held keys are copied; mouse delta and fire requests are consumed.
    fn drain(&mut self) -> TickInput;
}

/// Sound effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Shot,
    Hit,
    Pickup,
}

/// Audio cue emitter. Playback failures are the sink's problem.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Audio sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Values shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u64,
    pub kills: u32,
    /// Never negative
    pub health: i32,
    pub ammo: u32,
    pub alive: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            score: player.score,
            kills: player.kills,
            health: player.health.max(0),
            ammo: player.ammo,
            alive: player.alive,
        }
    }
}

/// Receives HUD values once per frame
pub trait HudSink {
    fn update(&mut self, hud: &HudSnapshot);
}

/// Render surface that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn render(&mut self, _state: &GameState) {}
}
