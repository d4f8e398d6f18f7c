//! Per-frame simulation tick
//!
//! Advances the arena by one variable timestep. Subsystems run in a fixed
//! order so that a seed plus an input sequence always replays identically.

use glam::Vec3;

use super::bot::step_bots;
use super::effects::{step_particles, step_powerup_timer, step_powerups};
use super::player::{respawn_player, step_player};
use super::projectile::step_bullets;
use super::state::{GameState, ScheduledAction};

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub keys: HeldKeys,
    /// Horizontal mouse movement since the last tick, in pixels
    pub mouse_dx: f32,
    /// Fire requests queued since the last tick
    pub fire: u32,
}

/// Advance the game state by `dt` seconds.
///
/// Callers clamp `dt`; the tick itself trusts it.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time += dt as f64;
    state.frame += 1;

    for action in state.take_due() {
        match action {
            ScheduledAction::RespawnPlayer => {
                if !state.player.alive {
                    respawn_player(state);
                }
            }
        }
    }

    // Wall bounds are derived from their transforms; rebuilt every tick
    state.colliders.refresh();

    step_player(state, input, dt);
    step_bots(state, dt);
    step_bullets(state, dt);
    step_particles(state, dt);
    step_powerups(state, dt);
    step_powerup_timer(state, dt);

    let tuning = &state.tuning;
    state.camera.follow(
        &state.player,
        Vec3::from_array(tuning.camera_offset),
        tuning.camera_look_height,
        tuning.camera_smoothing,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bot::spawn_bot;
    use crate::sim::projectile::damage_player;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());
        for state in [&mut state1, &mut state2] {
            for _ in 0..4 {
                spawn_bot(state, None);
            }
        }

        let inputs = [
            TickInput {
                keys: HeldKeys {
                    forward: true,
                    ..Default::default()
                },
                mouse_dx: 12.0,
                fire: 1,
            },
            TickInput::default(),
            TickInput {
                keys: HeldKeys {
                    left: true,
                    jump: true,
                    ..Default::default()
                },
                mouse_dx: -30.0,
                fire: 2,
            },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, DT);
            tick(&mut state2, input, DT);
        }

        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.player.score, state2.player.score);
        assert_eq!(state1.bots.len(), state2.bots.len());
        for (a, b) in state1.bots.iter().zip(&state2.bots) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.health, b.health);
        }
        assert_eq!(state1.bullets.len(), state2.bullets.len());
        assert_eq!(state1.powerups.len(), state2.powerups.len());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_clock_advances() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &TickInput::default(), 0.05);
        tick(&mut state, &TickInput::default(), 0.05);
        assert_eq!(state.frame, 2);
        assert!((state.time - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_respawn_after_delay() {
        let mut state = GameState::new(2, Tuning::default());
        state.player.pos = Vec3::new(8.0, 1.2, 8.0);
        damage_player(&mut state, 1000);
        assert!(!state.player.alive);

        // 1.4s at 50ms per tick: 27 ticks is still short of the delay
        for _ in 0..27 {
            tick(&mut state, &TickInput::default(), 0.05);
            assert!(!state.player.alive);
        }
        tick(&mut state, &TickInput::default(), 0.05);
        assert!(state.player.alive);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.pos.x, 0.0);
        assert_eq!(state.player.pos.z, 0.0);
        assert!(state.events().contains(&GameEvent::PlayerRespawned));
    }

    #[test]
    fn test_dead_player_cannot_fire_through_tick() {
        let mut state = GameState::new(4, Tuning::default());
        damage_player(&mut state, 1000);
        let input = TickInput {
            fire: 3,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.ammo, 30);
    }

    #[test]
    fn test_player_kills_bot_in_front() {
        let mut state = GameState::new(8, Tuning::default());
        state.tuning.drop_chance = 0.0;
        // Straight ahead (-Z), out of chase range so it keeps wandering
        spawn_bot(&mut state, Some(Vec2::new(0.0, -14.0)));
        state.bots[0].health = 18;
        state.bots[0].speed = 0.0;

        let fire = TickInput {
            fire: 1,
            ..Default::default()
        };
        tick(&mut state, &fire, DT);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(state.bots.is_empty());
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.player.score, 100);
    }

    #[test]
    fn test_camera_trails_player() {
        let mut state = GameState::new(5, Tuning::default());
        let start = state.camera.position;
        tick(&mut state, &TickInput::default(), DT);
        assert_ne!(state.camera.position, start);
        assert_eq!(state.camera.target, state.player.pos + Vec3::Y * 3.0);
    }
}
