//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time comes from the tick's `dt`, never the wall clock
//! - Stable iteration order (insertion order, ids increase)
//! - No rendering or platform dependencies

pub mod bot;
pub mod camera;
pub mod collider;
pub mod effects;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use bot::{spawn_bot, step_bots};
pub use camera::CameraRig;
pub use collider::{Aabb, ColliderSet, Wall};
pub use effects::{spawn_hit_particles, spawn_powerup, step_particles, step_powerups};
pub use player::{respawn_player, step_player, try_fire};
pub use projectile::{BulletOutcome, damage_player, step_bullets};
pub use state::{
    Bot, BotState, Bullet, GameEvent, GameState, Owner, Particle, Player, Powerup, PowerupKind,
    ScheduledAction, ScheduledEvent,
};
pub use tick::{HeldKeys, TickInput, tick};
