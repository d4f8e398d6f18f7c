//! Invariant properties of the simulation under arbitrary sequences.

use arena_shooter::Tuning;
use arena_shooter::sim::effects::apply_pickup;
use arena_shooter::sim::projectile::resolve_bullet;
use arena_shooter::sim::{
    Bullet, BulletOutcome, GameState, Owner, PowerupKind, damage_player, spawn_bot,
    spawn_powerup, step_bullets, step_powerups, try_fire,
};
use glam::{Vec2, Vec3};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum AmmoOp {
    Fire,
    Wait(f32),
    PickupAmmo,
    PickupHealth,
}

fn ammo_op() -> impl Strategy<Value = AmmoOp> {
    prop_oneof![
        4 => Just(AmmoOp::Fire),
        2 => (0.0f32..0.5).prop_map(AmmoOp::Wait),
        1 => Just(AmmoOp::PickupAmmo),
        1 => Just(AmmoOp::PickupHealth),
    ]
}

proptest! {
    #[test]
    fn prop_ammo_stays_in_bounds(ops in prop::collection::vec(ammo_op(), 0..200)) {
        let mut state = GameState::new(1, Tuning::default());
        let max = state.tuning.player_max_ammo;
        for op in ops {
            let before = state.player.ammo;
            match op {
                AmmoOp::Fire => {
                    let fired = try_fire(&mut state);
                    if fired {
                        prop_assert_eq!(state.player.ammo, before - 1);
                    } else {
                        prop_assert_eq!(state.player.ammo, before);
                    }
                }
                AmmoOp::Wait(dt) => state.time += dt as f64,
                AmmoOp::PickupAmmo => apply_pickup(&mut state, PowerupKind::Ammo),
                AmmoOp::PickupHealth => apply_pickup(&mut state, PowerupKind::Health),
            }
            prop_assert!(state.player.ammo <= max);
        }
    }

    #[test]
    fn prop_bot_health_is_initial_minus_hits(initial in 1i32..200) {
        let mut state = GameState::new(2, Tuning::default());
        state.tuning.drop_chance = 0.0;
        let id = spawn_bot(&mut state, Some(Vec2::new(10.0, 10.0)));
        state.bots[0].health = initial;
        let at = state.bots[0].pos;
        let damage = state.tuning.player_bullet_damage;
        let shot = Bullet { id: 0, owner: Owner::Player, pos: at, dir: Vec3::X, speed: 0.0, life: 1.0 };

        let lethal_hit = (initial + damage - 1) / damage;
        for n in 1..=lethal_hit {
            prop_assert_eq!(resolve_bullet(&mut state, &shot), BulletOutcome::HitBot { bot_id: id });
            if n < lethal_hit {
                prop_assert_eq!(state.bots[0].health, initial - n * damage);
                prop_assert_eq!(state.player.kills, 0);
            }
        }
        prop_assert!(state.bots.is_empty());
        prop_assert_eq!(state.player.kills, 1);
        prop_assert_eq!(state.player.score, state.tuning.kill_score);
    }

    #[test]
    fn prop_player_health_clamped(hits in prop::collection::vec(0i32..60, 0..30)) {
        let mut state = GameState::new(3, Tuning::default());
        for amount in hits {
            damage_player(&mut state, amount);
            prop_assert!((0..=100).contains(&state.player.health));
            prop_assert_eq!(state.player.alive, state.player.health > 0);
        }
        // At most one respawn is ever queued
        prop_assert!(state.scheduled().len() <= 1);
    }

    #[test]
    fn prop_bullet_terminates_once(
        angle in 0.0f32..std::f32::consts::TAU,
        dt in 0.005f32..0.06,
    ) {
        let mut state = GameState::new(4, Tuning::default());
        let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
        // Bot bullet from the center: there is no one for it to hit
        state.player.alive = false;
        state.spawn_bullet(Owner::Bot, Vec3::new(0.0, 1.0, 0.0), dir);

        let mut last_life = state.bullets[0].life;
        let mut steps = 0;
        while !state.bullets.is_empty() {
            step_bullets(&mut state, dt);
            steps += 1;
            if let Some(bullet) = state.bullets.first() {
                prop_assert!(bullet.life < last_life);
                prop_assert!(bullet.life > 0.0);
                prop_assert!(bullet.pos.x.abs() <= 30.0 && bullet.pos.z.abs() <= 30.0);
                last_life = bullet.life;
            }
            prop_assert!(steps < 1000);
        }
    }

    #[test]
    fn prop_powerup_never_granted_twice(frames in 1usize..20) {
        let mut state = GameState::new(5, Tuning::default());
        state.player.health = 10;
        let at = state.player.pos;
        spawn_powerup(&mut state, PowerupKind::Health, at);
        for _ in 0..frames {
            step_powerups(&mut state, 0.016);
        }
        prop_assert_eq!(state.player.health, 40);
        prop_assert!(state.powerups.is_empty());
    }
}
