//! Scene snapshot: turns the simulation state into colored boxes
//!
//! Pure and GPU free so it can be tested natively.

use glam::{Mat4, Quat, Vec3};

use super::vertex::{InstanceRaw, colors};
use crate::consts::*;
use crate::sim::{CameraRig, GameState, Owner, PowerupKind};

const FOV_Y_DEG: f32 = 60.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 2000.0;

const PLAYER_MESH: Vec3 = Vec3::new(1.8, 2.2, 1.2);
const BOT_MESH: Vec3 = Vec3::new(1.6, 1.8, 1.6);
const BULLET_MESH: Vec3 = Vec3::splat(0.32);
const POWERUP_MESH: Vec3 = Vec3::splat(0.8);
const SPARK_MESH: Vec3 = Vec3::splat(0.08);

/// One drawable box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxInstance {
    pub center: Vec3,
    pub size: Vec3,
    pub yaw: f32,
    /// Linear RGBA
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn new(center: Vec3, size: Vec3, yaw: f32, color: [f32; 4]) -> Self {
        Self {
            center,
            size,
            yaw,
            color,
        }
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let model = Mat4::from_scale_rotation_translation(
            self.size,
            Quat::from_rotation_y(self.yaw),
            self.center,
        );
        InstanceRaw {
            model: model.to_cols_array_2d(),
            color: self.color,
        }
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Drawn first, under everything else
    pub floor: Option<BoxInstance>,
    pub boxes: Vec<BoxInstance>,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        let mut boxes = Vec::with_capacity(
            5 + state.bots.len()
                + state.bullets.len()
                + state.powerups.len()
                + state.particles.len(),
        );

        for wall in state.colliders.walls() {
            boxes.push(BoxInstance::new(wall.center, wall.size, wall.yaw, srgb(colors::WALL)));
        }

        let player = &state.player;
        let player_color = if player.alive {
            colors::PLAYER
        } else {
            colors::PLAYER_DEAD
        };
        boxes.push(BoxInstance::new(player.pos, PLAYER_MESH, player.yaw, srgb(player_color)));

        for bot in state.bots.iter().filter(|b| b.alive) {
            let [r, g, b] = hsl_to_rgb(bot.hue, 0.6, 0.5);
            boxes.push(BoxInstance::new(bot.pos, BOT_MESH, bot.yaw, srgb_components(r, g, b)));
        }

        for bullet in &state.bullets {
            let color = match bullet.owner {
                Owner::Player => colors::PLAYER_BULLET,
                Owner::Bot => colors::BOT_BULLET,
            };
            boxes.push(BoxInstance::new(bullet.pos, BULLET_MESH, 0.0, srgb(color)));
        }

        for powerup in &state.powerups {
            let color = match powerup.kind {
                PowerupKind::Ammo => colors::AMMO,
                PowerupKind::Health => colors::HEALTH,
                PowerupKind::Boost => colors::BOOST,
            };
            boxes.push(BoxInstance::new(powerup.pos, POWERUP_MESH, powerup.spin, srgb(color)));
        }

        for particle in &state.particles {
            boxes.push(BoxInstance::new(particle.pos, SPARK_MESH, 0.0, srgb(colors::SPARK)));
        }

        Self {
            floor: Some(BoxInstance::new(
                Vec3::new(0.0, -0.05, 0.0),
                Vec3::new(ARENA_SIZE, 0.1, ARENA_SIZE),
                0.0,
                srgb(colors::FLOOR),
            )),
            boxes,
        }
    }

    /// Instance data in draw order: floor, then far to near from `eye`.
    /// There is no depth buffer, so order is what resolves occlusion.
    pub fn draw_order(&self, eye: Vec3) -> Vec<InstanceRaw> {
        let mut sorted = self.boxes.clone();
        sorted.sort_by(|a, b| {
            let da = a.center.distance_squared(eye);
            let db = b.center.distance_squared(eye);
            db.total_cmp(&da)
        });
        self.floor
            .iter()
            .chain(sorted.iter())
            .map(BoxInstance::to_raw)
            .collect()
    }
}

/// Perspective view-projection for the follow camera
pub fn view_proj(camera: &CameraRig, aspect: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR);
    let view = Mat4::look_at_rh(camera.position, camera.target, Vec3::Y);
    proj * view
}

/// Convert an sRGB hex color to linear RGBA
pub fn srgb(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    srgb_components(channel(16), channel(8), channel(0))
}

fn srgb_components(r: f32, g: f32, b: f32) -> [f32; 4] {
    [to_linear(r), to_linear(g), to_linear(b), 1.0]
}

fn to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// HSL (all in [0, 1]) to sRGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |mut t: f32| {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [hue(h + 1.0 / 3.0), hue(h), hue(h - 1.0 / 3.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn_bot;
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec4};

    #[test]
    fn test_scene_counts_entities() {
        let mut state = GameState::new(3, Tuning::default());
        spawn_bot(&mut state, Some(Vec2::new(5.0, 5.0)));
        state.spawn_bullet(Owner::Player, Vec3::ZERO, Vec3::X);
        let scene = Scene::from_state(&state);
        // 4 walls, player, bot, bullet
        assert_eq!(scene.boxes.len(), 7);
        assert!(scene.floor.is_some());
        assert_eq!(scene.draw_order(Vec3::new(0.0, 8.0, 14.0)).len(), 8);
    }

    #[test]
    fn test_dead_player_is_grey() {
        let mut state = GameState::new(3, Tuning::default());
        state.player.alive = false;
        let scene = Scene::from_state(&state);
        assert!(scene.boxes.iter().any(|b| b.color == srgb(colors::PLAYER_DEAD)));
    }

    #[test]
    fn test_draw_order_is_far_to_near() {
        let scene = Scene {
            floor: None,
            boxes: vec![
                BoxInstance::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ONE, 0.0, [1.0; 4]),
                BoxInstance::new(Vec3::new(0.0, 0.0, -10.0), Vec3::ONE, 0.0, [0.5; 4]),
            ],
        };
        let order = scene.draw_order(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(order[0].color, [0.5; 4]);
        assert_eq!(order[1].color, [1.0; 4]);
    }

    #[test]
    fn test_camera_target_projects_to_center() {
        let camera = CameraRig::default();
        let clip = view_proj(&camera, 16.0 / 9.0) * camera.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        let behind = view_proj(&camera, 1.0) * Vec4::new(0.0, 8.0, 30.0, 1.0);
        assert!(behind.w < 0.0);
    }

    #[test]
    fn test_color_conversions() {
        let white = srgb(0xffffff);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
        assert_eq!(srgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6 && red[2].abs() < 1e-6);
        let grey = hsl_to_rgb(0.3, 0.0, 0.5);
        assert!(grey.iter().all(|c| (c - 0.5).abs() < 1e-6));
    }
}
