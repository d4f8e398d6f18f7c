//! Particles and powerups

use glam::Vec3;

use super::state::{GameEvent, GameState, Particle, Powerup, PowerupKind};
use crate::consts::*;

/// Burst of sparks at an impact point
pub fn spawn_hit_particles(state: &mut GameState, pos: Vec3) {
    let cap = state.particle_cap;
    if cap == 0 {
        return;
    }
    let (life_min, life_max) = (state.tuning.particle_life_min, state.tuning.particle_life_max);
    for _ in 0..state.tuning.particle_burst {
        let vel = Vec3::new(
            (state.roll() - 0.5) * 6.0,
            state.roll() * 4.0,
            (state.roll() - 0.5) * 6.0,
        );
        let life = state.roll_range(life_min, life_max);
        state.particles.push(Particle { pos, vel, life });
    }
    // Oldest sparks go first when over the cap
    if state.particles.len() > cap {
        let excess = state.particles.len() - cap;
        state.particles.drain(..excess);
    }
}

/// Integrate sparks and drop the expired ones
pub fn step_particles(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.particle_gravity;
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y -= gravity * dt;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Place a powerup in the world
pub fn spawn_powerup(state: &mut GameState, kind: PowerupKind, pos: Vec3) -> u32 {
    let id = state.next_entity_id();
    let life = state.tuning.powerup_life;
    state.powerups.push(Powerup {
        id,
        kind,
        pos,
        life,
        spin: 0.0,
    });
    state.emit(GameEvent::PowerupSpawned { kind });
    log::debug!("Powerup {:?} spawned at ({:.1}, {:.1})", kind, pos.x, pos.z);
    id
}

/// Spin, age and collect powerups. A collected powerup is removed in the
/// same pass, so it can never be granted twice.
pub fn step_powerups(state: &mut GameState, dt: f32) {
    let powerups = std::mem::take(&mut state.powerups);
    let mut remaining = Vec::with_capacity(powerups.len());

    for mut powerup in powerups {
        powerup.life -= dt;
        powerup.spin += state.tuning.powerup_spin_rate * dt;

        if state.player.alive
            && powerup.pos.distance(state.player.pos) < state.tuning.pickup_radius
        {
            apply_pickup(state, powerup.kind);
            continue;
        }
        if powerup.life > 0.0 {
            remaining.push(powerup);
        }
    }

    remaining.append(&mut state.powerups);
    state.powerups = remaining;
}

/// Grant a pickup's effect, capped at the player's maximums
pub fn apply_pickup(state: &mut GameState, kind: PowerupKind) {
    let tuning = &state.tuning;
    let player = &mut state.player;
    match kind {
        PowerupKind::Ammo => {
            player.ammo = player
                .ammo
                .saturating_add(tuning.ammo_pickup)
                .min(tuning.player_max_ammo);
        }
        PowerupKind::Health => {
            player.health = player
                .health
                .saturating_add(tuning.health_pickup)
                .min(tuning.player_max_health);
        }
        PowerupKind::Boost => {}
    }
    state.emit(GameEvent::PowerupCollected { kind });
}

/// World timer: every interval, maybe drop a powerup somewhere in the arena.
/// The accumulator resets whenever the interval elapses, hit or miss.
pub fn step_powerup_timer(state: &mut GameState, dt: f32) {
    state.powerup_timer += dt;
    if state.powerup_timer <= state.tuning.powerup_spawn_interval {
        return;
    }
    state.powerup_timer = 0.0;

    if state.roll() < state.tuning.powerup_spawn_chance {
        let kind = if state.roll() < state.tuning.powerup_ammo_bias {
            PowerupKind::Ammo
        } else {
            PowerupKind::Health
        };
        let at = state.roll_point(SPAWN_HALF);
        spawn_powerup(state, kind, Vec3::new(at.x, POWERUP_Y, at.y));
    }
}
