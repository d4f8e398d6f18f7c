//! Bot AI step
//!
//! Two-state machine per bot: wander between random points, chase the
//! player once close. Chasing bots shoot when in range and off cooldown.

use glam::{Vec2, Vec3};

use super::state::{Bot, BotState, GameState, Owner};
use crate::consts::*;
use crate::{horizontal, yaw_facing};

/// Spawn a bot at `at` (x, z), or at a random point near the center
pub fn spawn_bot(state: &mut GameState, at: Option<Vec2>) -> u32 {
    let at = at.unwrap_or_else(|| state.roll_point(SPAWN_HALF));
    let hue = state.roll();

    let tuning = state.tuning.clone();
    let span = (tuning.bot_health_max - tuning.bot_health_min) as f32;
    let health = tuning.bot_health_min + (state.roll() * span).floor() as i32;
    let speed = state.roll_range(tuning.bot_speed_min, tuning.bot_speed_max);
    let shoot_cooldown = state.roll_range(tuning.bot_cooldown_min, tuning.bot_cooldown_max);

    let id = state.next_entity_id();
    state.bots.push(Bot {
        id,
        pos: Vec3::new(at.x, BOT_Y, at.y),
        yaw: 0.0,
        health,
        speed,
        state: BotState::Wander,
        target: None,
        // Never fired: first shot is available immediately
        last_shot: f64::NEG_INFINITY,
        shoot_cooldown,
        alive: true,
        hue,
    });
    log::debug!(
        "Spawned bot {} at ({:.1}, {:.1}) hp={} speed={:.1}",
        id,
        at.x,
        at.y,
        health,
        speed
    );
    id
}

/// Advance every live bot
pub fn step_bots(state: &mut GameState, dt: f32) {
    for idx in 0..state.bots.len() {
        step_bot(state, idx, dt);
    }
}

fn step_bot(state: &mut GameState, idx: usize, dt: f32) {
    if !state.bots[idx].alive {
        return;
    }
    let player_pos = state.player.pos;

    let dist = state.bots[idx].pos.distance(player_pos);
    if dist < state.tuning.chase_range {
        state.bots[idx].state = BotState::Chase;
    } else if state.roll() < state.tuning.wander_revert_chance {
        state.bots[idx].state = BotState::Wander;
    }

    match state.bots[idx].state {
        BotState::Wander => wander(state, idx, dt),
        BotState::Chase => chase(state, idx, player_pos, dt),
    }

    let limit = (ARENA_HALF - state.tuning.arena_margin).max(0.0);
    let bot = &mut state.bots[idx];
    bot.pos.x = bot.pos.x.clamp(-limit, limit);
    bot.pos.z = bot.pos.z.clamp(-limit, limit);
}

fn wander(state: &mut GameState, idx: usize, dt: f32) {
    let retarget = state.bots[idx].target.is_none() || state.roll() < state.tuning.retarget_chance;
    if retarget {
        let p = state.roll_point(ARENA_HALF * state.tuning.wander_extent);
        state.bots[idx].target = Some(Vec3::new(p.x, 0.0, p.y));
    }

    let arrive = state.tuning.wander_arrive_distance;
    let bot = &mut state.bots[idx];
    let Some(target) = bot.target else { return };
    let dir = horizontal(target - bot.pos);
    // Close enough counts as arrived; the random retarget takes over
    if dir.length() > arrive {
        let dir = dir.normalize();
        bot.pos += dir * bot.speed * dt;
        bot.yaw = yaw_facing(dir);
    }
}

fn chase(state: &mut GameState, idx: usize, player_pos: Vec3, dt: f32) {
    let stop = state.tuning.chase_stop_distance;
    let bot = &mut state.bots[idx];
    let to_player = horizontal(player_pos - bot.pos);
    if to_player.length() > stop {
        let dir = to_player.normalize();
        bot.pos += dir * bot.speed * dt;
        bot.yaw = yaw_facing(dir);
    }

    let aim = player_pos - bot.pos;
    let ready = state.time - bot.last_shot > bot.shoot_cooldown as f64;
    if aim.length() < state.tuning.bot_fire_range && ready {
        let dir = aim.normalize_or_zero();
        let origin = bot.pos
            + Vec3::Y * state.tuning.bot_muzzle_height
            + dir * state.tuning.bot_muzzle_forward;
        bot.last_shot = state.time;
        state.spawn_bullet(Owner::Bot, origin, dir);
    }
}
