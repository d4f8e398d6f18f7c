//! Data-driven game balance
//!
//! Every gameplay number lives here so a host page can override them with
//! a JSON blob. Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ARENA_HALF;

/// Errors raised while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay balance. Times are in seconds, distances in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Frame ===
    /// Largest simulation step allowed after a stall
    pub max_dt: f32,

    // === Player ===
    pub player_speed: f32,
    pub player_max_health: i32,
    pub player_max_ammo: u32,
    pub player_shoot_cooldown: f32,
    /// Radians of yaw per pixel of mouse movement
    pub mouse_yaw_per_px: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    /// Horizontal step used to push the player out of a wall
    pub wall_push: f32,
    /// Bullet origin height above the player position
    pub player_muzzle_height: f32,
    pub player_muzzle_forward: f32,
    pub respawn_delay: f32,
    pub spawn_point: [f32; 3],

    // === Bots ===
    pub initial_bots: usize,
    pub bot_health_min: i32,
    /// Exclusive upper bound of spawn health
    pub bot_health_max: i32,
    pub bot_speed_min: f32,
    pub bot_speed_max: f32,
    pub bot_cooldown_min: f32,
    pub bot_cooldown_max: f32,
    pub chase_range: f32,
    pub chase_stop_distance: f32,
    pub bot_fire_range: f32,
    /// Per-frame probability a distant bot drops back to wandering
    pub wander_revert_chance: f32,
    /// Per-frame probability a wandering bot picks a new target
    pub retarget_chance: f32,
    /// Fraction of the arena wander targets are drawn from
    pub wander_extent: f32,
    pub wander_arrive_distance: f32,
    /// Bots stay this far inside the arena edge
    pub arena_margin: f32,
    pub bot_muzzle_height: f32,
    pub bot_muzzle_forward: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_life: f32,
    pub hit_radius: f32,
    pub player_bullet_damage: i32,
    pub bot_bullet_damage: i32,
    pub kill_score: u64,

    // === Powerups ===
    pub drop_chance: f32,
    pub powerup_life: f32,
    pub powerup_spin_rate: f32,
    pub pickup_radius: f32,
    pub ammo_pickup: u32,
    pub health_pickup: i32,
    pub powerup_spawn_interval: f32,
    pub powerup_spawn_chance: f32,
    /// Probability a timer-spawned powerup is ammo rather than health
    pub powerup_ammo_bias: f32,

    // === Particles ===
    pub particle_burst: usize,
    pub particle_life_min: f32,
    pub particle_life_max: f32,
    pub particle_gravity: f32,
    pub max_particles: usize,

    // === Camera ===
    pub camera_offset: [f32; 3],
    pub camera_look_height: f32,
    pub camera_smoothing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: 0.06,

            player_speed: 12.0,
            player_max_health: 100,
            player_max_ammo: 30,
            player_shoot_cooldown: 0.16,
            mouse_yaw_per_px: 0.002,
            jump_impulse: 8.0,
            gravity: 30.0,
            wall_push: 0.6,
            player_muzzle_height: 0.4,
            player_muzzle_forward: 1.6,
            respawn_delay: 1.4,
            spawn_point: [0.0, 1.2, 0.0],

            initial_bots: 4,
            bot_health_min: 40,
            bot_health_max: 70,
            bot_speed_min: 6.0,
            bot_speed_max: 10.0,
            bot_cooldown_min: 0.7,
            bot_cooldown_max: 1.3,
            chase_range: 12.0,
            chase_stop_distance: 1.4,
            bot_fire_range: 20.0,
            wander_revert_chance: 0.001,
            retarget_chance: 0.006,
            wander_extent: 0.7,
            wander_arrive_distance: 0.6,
            arena_margin: 2.0,
            bot_muzzle_height: 1.2,
            bot_muzzle_forward: 1.2,

            bullet_speed: 58.0,
            bullet_life: 2.5,
            hit_radius: 1.4,
            player_bullet_damage: 18,
            bot_bullet_damage: 12,
            kill_score: 100,

            drop_chance: 0.35,
            powerup_life: 18.0,
            powerup_spin_rate: 1.2,
            pickup_radius: 1.8,
            ammo_pickup: 12,
            health_pickup: 30,
            powerup_spawn_interval: 4.0,
            powerup_spawn_chance: 0.22,
            powerup_ammo_bias: 0.6,

            particle_burst: 6,
            particle_life_min: 0.6,
            particle_life_max: 1.0,
            particle_gravity: 9.8,
            max_particles: 256,

            camera_offset: [0.0, 6.0, 12.0],
            camera_look_height: 3.0,
            camera_smoothing: 0.08,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("max_dt", self.max_dt),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_life", self.bullet_life),
            ("hit_radius", self.hit_radius),
            ("pickup_radius", self.pickup_radius),
            ("powerup_life", self.powerup_life),
            ("powerup_spawn_interval", self.powerup_spawn_interval),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("player_shoot_cooldown", self.player_shoot_cooldown),
            ("jump_impulse", self.jump_impulse),
            ("gravity", self.gravity),
            ("wall_push", self.wall_push),
            ("respawn_delay", self.respawn_delay),
            ("bot_speed_min", self.bot_speed_min),
            ("bot_cooldown_min", self.bot_cooldown_min),
            ("chase_range", self.chase_range),
            ("chase_stop_distance", self.chase_stop_distance),
            ("bot_fire_range", self.bot_fire_range),
            ("wander_arrive_distance", self.wander_arrive_distance),
            ("particle_life_min", self.particle_life_min),
            ("particle_gravity", self.particle_gravity),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        // Bots are clamped to ARENA_HALF - margin; a negative limit is unusable
        if !(0.0..ARENA_HALF).contains(&self.arena_margin) {
            return Err(invalid(
                "arena_margin",
                format!("must be within [0, {ARENA_HALF}), got {}", self.arena_margin),
            ));
        }
        if self.health_pickup < 0 {
            return Err(invalid("health_pickup", "must be >= 0".to_string()));
        }

        let chances = [
            ("wander_revert_chance", self.wander_revert_chance),
            ("retarget_chance", self.retarget_chance),
            ("drop_chance", self.drop_chance),
            ("powerup_spawn_chance", self.powerup_spawn_chance),
            ("powerup_ammo_bias", self.powerup_ammo_bias),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be within [0, 1], got {value}")));
            }
        }

        if self.player_max_health <= 0 {
            return Err(invalid("player_max_health", "must be > 0".to_string()));
        }
        if self.player_max_ammo == 0 {
            return Err(invalid("player_max_ammo", "must be > 0".to_string()));
        }
        if self.bot_health_min <= 0 || self.bot_health_max <= self.bot_health_min {
            return Err(invalid(
                "bot_health_max",
                format!(
                    "range {}..{} is empty or non-positive",
                    self.bot_health_min, self.bot_health_max
                ),
            ));
        }
        if self.bot_speed_max < self.bot_speed_min {
            return Err(invalid("bot_speed_max", "is below bot_speed_min".to_string()));
        }
        if self.bot_cooldown_max < self.bot_cooldown_min {
            return Err(invalid(
                "bot_cooldown_max",
                "is below bot_cooldown_min".to_string(),
            ));
        }
        if self.particle_life_max < self.particle_life_min {
            return Err(invalid(
                "particle_life_max",
                "is below particle_life_min".to_string(),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 20.0, "initial_bots": 8 }"#)
            .expect("override should parse");
        assert_eq!(tuning.player_speed, 20.0);
        assert_eq!(tuning.initial_bots, 8);
        assert_eq!(tuning.player_max_ammo, 30);
        assert_eq!(tuning.kill_score, 100);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_bad_probability_rejected() {
        let err = Tuning::from_json(r#"{ "drop_chance": 1.5 }"#).unwrap_err();
        match err {
            TuningError::Invalid { field, .. } => assert_eq!(field, "drop_chance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inverted_cooldown_rejected() {
        let err =
            Tuning::from_json(r#"{ "bot_cooldown_min": 2.0, "bot_cooldown_max": 1.0 }"#)
                .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "bot_cooldown_max",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_speed_and_gravity_rejected() {
        let err = Tuning::from_json(r#"{ "bot_speed_min": -5.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "bot_speed_min",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "gravity": -30.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gravity", .. }));
    }

    #[test]
    fn test_arena_margin_must_leave_room() {
        for margin in ["31.0", "30.0", "-1.0"] {
            let json = format!(r#"{{ "arena_margin": {margin} }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(matches!(
                err,
                TuningError::Invalid {
                    field: "arena_margin",
                    ..
                }
            ));
        }
        assert!(Tuning::from_json(r#"{ "arena_margin": 29.0 }"#).is_ok());
    }
}
