//! Projectile step
//!
//! Bullets fly straight, hit the opposing side only (no friendly fire),
//! and end in exactly one of: hit, out of bounds, expired.

use glam::Vec3;

use super::effects::{spawn_hit_particles, spawn_powerup};
use super::state::{Bullet, GameEvent, GameState, Owner, PowerupKind, ScheduledAction};
use crate::consts::*;

/// How a bullet's frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOutcome {
    /// Still in flight
    Flying,
    HitBot { bot_id: u32 },
    HitPlayer,
    OutOfBounds,
    Expired,
}

impl BulletOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BulletOutcome::Flying)
    }
}

/// Advance all bullets and resolve their hits
pub fn step_bullets(state: &mut GameState, dt: f32) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut flying = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.pos += bullet.dir * bullet.speed * dt;
        bullet.life -= dt;
        if !resolve_bullet(state, &bullet).is_terminal() {
            flying.push(bullet);
        }
    }

    // Anything spawned while resolving goes after the survivors
    flying.append(&mut state.bullets);
    state.bullets = flying;
}

/// Resolve one already-advanced bullet against the world
pub fn resolve_bullet(state: &mut GameState, bullet: &Bullet) -> BulletOutcome {
    match bullet.owner {
        Owner::Player => {
            if let Some(idx) = nearest_bot_hit(state, bullet.pos) {
                return hit_bot(state, idx, bullet.pos);
            }
        }
        Owner::Bot => {
            let player = &state.player;
            if player.alive && player.pos.distance(bullet.pos) < state.tuning.hit_radius {
                let damage = state.tuning.bot_bullet_damage;
                spawn_hit_particles(state, bullet.pos);
                damage_player(state, damage);
                return BulletOutcome::HitPlayer;
            }
        }
    }

    if bullet.pos.x.abs() > ARENA_HALF || bullet.pos.z.abs() > ARENA_HALF {
        return BulletOutcome::OutOfBounds;
    }
    if bullet.life <= 0.0 {
        return BulletOutcome::Expired;
    }
    BulletOutcome::Flying
}

/// Index of the closest live bot within the hit radius
fn nearest_bot_hit(state: &GameState, pos: Vec3) -> Option<usize> {
    let radius = state.tuning.hit_radius;
    state
        .bots
        .iter()
        .enumerate()
        .filter(|(_, bot)| bot.alive)
        .map(|(idx, bot)| (idx, bot.pos.distance(pos)))
        .filter(|&(_, dist)| dist < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

fn hit_bot(state: &mut GameState, idx: usize, at: Vec3) -> BulletOutcome {
    let damage = state.tuning.player_bullet_damage;
    let bot = &mut state.bots[idx];
    bot.health -= damage;
    let bot_id = bot.id;
    let killed = bot.health <= 0;

    spawn_hit_particles(state, at);
    state.emit(GameEvent::BotHit { bot_id });

    if killed {
        let bot = state.bots.remove(idx);
        state.player.score += state.tuning.kill_score;
        state.player.kills += 1;
        state.emit(GameEvent::BotKilled { bot_id });
        log::info!(
            "Bot {} down (kills: {}, score: {})",
            bot_id,
            state.player.kills,
            state.player.score
        );

        if state.roll() < state.tuning.drop_chance {
            let kind = if state.roll() < 0.5 {
                PowerupKind::Ammo
            } else {
                PowerupKind::Health
            };
            spawn_powerup(state, kind, bot.pos);
        }
    }

    BulletOutcome::HitBot { bot_id }
}

/// Apply damage to the living player; on death schedule the respawn
pub fn damage_player(state: &mut GameState, amount: i32) {
    if !state.player.alive {
        return;
    }
    let player = &mut state.player;
    player.health = (player.health - amount).max(0);
    let dead = player.health == 0;
    state.emit(GameEvent::PlayerHit);

    if dead {
        state.player.alive = false;
        state.emit(GameEvent::PlayerDied);
        let delay = state.tuning.respawn_delay;
        state.schedule(delay, ScheduledAction::RespawnPlayer);
        log::info!("Player died at t={:.2}s, respawn in {:.1}s", state.time, delay);
    }
}
