//! Arena Shooter - a low-poly 3D arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, bots, bullets, pickups)
//! - `session`: Session controls and per-frame orchestration
//! - `platform`: Capability traits for render/input/audio/HUD hosts
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Arena geometry constants (not data-driven)
pub mod consts {
    /// Side length of the square arena floor
    pub const ARENA_SIZE: f32 = 60.0;
    /// Half extent of the arena (bullets beyond this are removed)
    pub const ARENA_HALF: f32 = ARENA_SIZE / 2.0;
    /// Boundary wall thickness
    pub const WALL_THICKNESS: f32 = 1.0;
    /// Boundary wall height
    pub const WALL_HEIGHT: f32 = 8.0;
    /// Wall centers sit 1 unit below half height (walls sink into the floor)
    pub const WALL_CENTER_Y: f32 = WALL_HEIGHT / 2.0 - 1.0;

    /// Player standing height (ground clamp)
    pub const PLAYER_GROUND_Y: f32 = 1.2;
    /// Player collision box
    pub const PLAYER_BOX_SIZE: [f32; 3] = [1.6, 2.2, 1.6];
    /// Collision box center sits this far above the player position
    pub const PLAYER_BOX_LIFT: f32 = 1.1;

    /// Bot body center height
    pub const BOT_Y: f32 = 0.9;
    /// Powerups spawned by the world timer float at this height
    pub const POWERUP_Y: f32 = 0.6;

    /// Bots spawn and powerups drop within this half extent
    pub const SPAWN_HALF: f32 = 15.0;
}

/// Forward unit vector for a yaw angle (yaw 0 looks down -Z)
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Right unit vector for a yaw angle (yaw 0 has +X to the right)
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Yaw that turns a mesh's +Z axis toward a horizontal direction
#[inline]
pub fn yaw_facing(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Drop the vertical component
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_basis_is_orthonormal() {
        for yaw in [0.0_f32, 0.7, -2.1, 3.0] {
            let f = yaw_forward(yaw);
            let r = yaw_right(yaw);
            assert!((f.length() - 1.0).abs() < 1e-5);
            assert!((r.length() - 1.0).abs() < 1e-5);
            assert!(f.dot(r).abs() < 1e-5);
        }
    }

    #[test]
    fn test_yaw_zero_looks_down_negative_z() {
        let f = yaw_forward(0.0);
        assert!((f - Vec3::NEG_Z).length() < 1e-6);
        let r = yaw_right(0.0);
        assert!((r - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_yaw_facing_matches_rotation() {
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let yaw = yaw_facing(dir);
        let rotated = glam::Quat::from_rotation_y(yaw) * Vec3::Z;
        assert!((rotated - dir).length() < 1e-5);
    }
}
