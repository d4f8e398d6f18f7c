//! Game state and core simulation types
//!
//! Everything a session owns lives in `GameState`; step functions take it
//! by `&mut` so there is no ambient global state.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::CameraRig;
use super::collider::ColliderSet;
use crate::tuning::Tuning;
use crate::yaw_forward;

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Bot,
}

/// Bot behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotState {
    #[default]
    Wander,
    Chase,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Ammo,
    Health,
    /// Reserved; picked up but grants nothing yet
    Boost,
}

/// The player avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    /// Rotation about +Y (radians)
    pub yaw: f32,
    pub velocity: Vec3,
    pub health: i32,
    pub ammo: u32,
    pub alive: bool,
    pub score: u64,
    pub kills: u32,
    /// Sim time of the last accepted shot
    pub last_shot: f64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::from_array(tuning.spawn_point),
            yaw: 0.0,
            velocity: Vec3::ZERO,
            health: tuning.player_max_health,
            ammo: tuning.player_max_ammo,
            alive: true,
            score: 0,
            kills: 0,
            last_shot: f64::NEG_INFINITY,
        }
    }

    /// Forward unit vector from current yaw
    pub fn forward(&self) -> Vec3 {
        yaw_forward(self.yaw)
    }
}

/// A bot opponent
#[derive(Debug, Clone)]
pub struct Bot {
    pub id: u32,
    pub pos: Vec3,
    pub yaw: f32,
    pub health: i32,
    pub speed: f32,
    pub state: BotState,
    pub target: Option<Vec3>,
    pub last_shot: f64,
    pub shoot_cooldown: f32,
    pub alive: bool,
    /// Body hue (0-1), cosmetic
    pub hue: f32,
}

/// A projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub owner: Owner,
    pub pos: Vec3,
    /// Unit direction
    pub dir: Vec3,
    pub speed: f32,
    /// Seconds remaining
    pub life: f32,
}

/// A pickup entity
#[derive(Debug, Clone)]
pub struct Powerup {
    pub id: u32,
    pub kind: PowerupKind,
    pub pos: Vec3,
    pub life: f32,
    /// Cosmetic rotation (radians)
    pub spin: f32,
}

/// A spark from a bullet impact (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32,
}

/// Gameplay events emitted during a tick (for audio/UI feedback)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Shot { owner: Owner },
    BotHit { bot_id: u32 },
    BotKilled { bot_id: u32 },
    PlayerHit,
    PlayerDied,
    PlayerRespawned,
    PowerupSpawned { kind: PowerupKind },
    PowerupCollected { kind: PowerupKind },
}

/// Deferred actions run by the tick once their time arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    RespawnPlayer,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    /// Sim time (seconds) at which the action fires
    pub at: f64,
    pub action: ScheduledAction,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Sim clock in seconds
    pub time: f64,
    /// Ticks advanced since the session started
    pub frame: u64,
    pub player: Player,
    /// Live bots in spawn order
    pub bots: Vec<Bot>,
    pub bullets: Vec<Bullet>,
    pub powerups: Vec<Powerup>,
    pub particles: Vec<Particle>,
    pub colliders: ColliderSet,
    pub camera: CameraRig,
    /// Seconds accumulated toward the next world powerup roll
    pub powerup_timer: f32,
    /// Particle limit for this session (tuning and quality combined)
    pub particle_cap: usize,
    scheduled: Vec<ScheduledEvent>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an empty arena (no bots) with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        let particle_cap = tuning.max_particles;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            frame: 0,
            player,
            bots: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            colliders: ColliderSet::arena(),
            camera: CameraRig::default(),
            powerup_timer: 0.0,
            particle_cap,
            scheduled: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform sample in [min, max); returns `min` for an empty range
    pub fn roll_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.roll()
    }

    /// Random horizontal point within `half` of the arena center
    pub fn roll_point(&mut self, half: f32) -> Vec2 {
        let x = (self.roll() - 0.5) * 2.0 * half;
        let z = (self.roll() - 0.5) * 2.0 * half;
        Vec2::new(x, z)
    }

    /// Record a gameplay event for this tick
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue an action `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, action: ScheduledAction) {
        self.scheduled.push(ScheduledEvent {
            at: self.time + delay as f64,
            action,
        });
    }

    /// Pending deferred actions
    pub fn scheduled(&self) -> &[ScheduledEvent] {
        &self.scheduled
    }

    /// Remove and return every action due at the current time, in the
    /// order they were scheduled
    pub fn take_due(&mut self) -> Vec<ScheduledAction> {
        let now = self.time;
        let mut due = Vec::new();
        self.scheduled.retain(|ev| {
            if ev.at <= now {
                due.push(ev.action);
                false
            } else {
                true
            }
        });
        due
    }

    /// Spawn a bullet and announce the shot
    pub fn spawn_bullet(&mut self, owner: Owner, origin: Vec3, dir: Vec3) -> u32 {
        let id = self.next_entity_id();
        let speed = self.tuning.bullet_speed;
        let life = self.tuning.bullet_life;
        self.bullets.push(Bullet {
            id,
            owner,
            pos: origin,
            dir: dir.normalize_or_zero(),
            speed,
            life,
        });
        self.emit(GameEvent::Shot { owner });
        id
    }

    /// Find a live bot by id
    pub fn bot(&self, id: u32) -> Option<&Bot> {
        self.bots.iter().find(|b| b.id == id)
    }
}
