//! Player control step
//!
//! Mouse yaw, WASD movement, jump + gravity, naive wall push-out and
//! shooting.

use glam::Vec3;

use super::collider::Aabb;
use super::state::{GameEvent, GameState, Owner};
use super::tick::TickInput;
use crate::consts::*;
use crate::{horizontal, yaw_forward, yaw_right};

/// Advance the player by one frame
pub fn step_player(state: &mut GameState, input: &TickInput, dt: f32) {
    // Mouse delta is an accumulator: consumed here, never carried over
    state.player.yaw -= input.mouse_dx * state.tuning.mouse_yaw_per_px;

    for _ in 0..input.fire {
        try_fire(state);
    }

    if !state.player.alive {
        return;
    }

    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.keys.jump {
        // Holding jump never stacks impulses
        player.velocity.y = player.velocity.y.max(tuning.jump_impulse);
    }

    let forward = yaw_forward(player.yaw);
    let right = yaw_right(player.yaw);
    let mut wish = Vec3::ZERO;
    if input.keys.forward {
        wish += forward;
    }
    if input.keys.back {
        wish -= forward;
    }
    if input.keys.left {
        wish -= right;
    }
    if input.keys.right {
        wish += right;
    }
    if wish.length_squared() > 0.0 {
        player.pos += wish.normalize() * tuning.player_speed * dt;
    }

    player.velocity.y -= tuning.gravity * dt;
    player.pos.y += player.velocity.y * dt;
    if player.pos.y < PLAYER_GROUND_Y {
        player.pos.y = PLAYER_GROUND_Y;
        player.velocity.y = 0.0;
    }

    // Push straight away from each overlapping wall's center. Not an exact
    // separation: corners can take several frames to resolve.
    let body = Aabb::from_center_size(
        player.pos + Vec3::Y * PLAYER_BOX_LIFT,
        Vec3::from_array(PLAYER_BOX_SIZE),
    );
    let pushes: Vec<Vec3> = state
        .colliders
        .overlapping(&body)
        .map(|wall| horizontal(player.pos - wall.center()).normalize_or_zero() * tuning.wall_push)
        .collect();
    for push in pushes {
        player.pos += push;
    }
}

/// Attempt a player shot. Returns `false` when dead, cooling down or empty.
pub fn try_fire(state: &mut GameState) -> bool {
    let player = &state.player;
    if !player.alive {
        return false;
    }
    if state.time - player.last_shot < state.tuning.player_shoot_cooldown as f64 {
        return false;
    }
    if player.ammo == 0 {
        return false;
    }

    let forward = player.forward();
    let origin = player.pos
        + Vec3::Y * state.tuning.player_muzzle_height
        + forward * state.tuning.player_muzzle_forward;

    state.player.last_shot = state.time;
    state.player.ammo -= 1;
    state.spawn_bullet(Owner::Player, origin, forward);
    true
}

/// Restore the player at the spawn point with full health
pub fn respawn_player(state: &mut GameState) {
    let player = &mut state.player;
    player.health = state.tuning.player_max_health;
    player.pos = Vec3::from_array(state.tuning.spawn_point);
    player.velocity = Vec3::ZERO;
    player.alive = true;
    log::info!("Player respawned at t={:.2}s", state.time);
    state.emit(GameEvent::PlayerRespawned);
}
