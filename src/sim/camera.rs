//! Third-person follow camera

use glam::{Quat, Vec3};

use super::state::Player;

/// Camera placement consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 8.0, 14.0),
            target: Vec3::ZERO,
        }
    }
}

impl CameraRig {
    /// Ease toward a yaw-relative offset behind the player.
    ///
    /// `smoothing` is the per-frame lerp factor (0 = frozen, 1 = snap).
    pub fn follow(&mut self, player: &Player, offset: Vec3, look_height: f32, smoothing: f32) {
        let desired = player.pos + Quat::from_rotation_y(player.yaw) * offset;
        self.position = self.position.lerp(desired, smoothing.clamp(0.0, 1.0));
        self.target = player.pos + Vec3::new(0.0, look_height, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::f32::consts::PI;

    #[test]
    fn test_follow_converges_behind_player() {
        let mut player = Player::new(&Tuning::default());
        player.yaw = PI / 2.0;
        let offset = Vec3::new(0.0, 6.0, 12.0);
        let mut rig = CameraRig::default();
        for _ in 0..400 {
            rig.follow(&player, offset, 3.0, 0.08);
        }
        // yaw 90° puts "behind" on +X
        let expected = player.pos + Vec3::new(12.0, 6.0, 0.0);
        assert!((rig.position - expected).length() < 1e-2);
        assert!((rig.target - (player.pos + Vec3::Y * 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_follow_moves_a_fraction_per_frame() {
        let player = Player::new(&Tuning::default());
        let offset = Vec3::new(0.0, 6.0, 12.0);
        let mut rig = CameraRig::default();
        let start = rig.position;
        let desired = player.pos + offset;
        rig.follow(&player, offset, 3.0, 0.08);
        let expected = start + (desired - start) * 0.08;
        assert!((rig.position - expected).length() < 1e-5);
    }
}
