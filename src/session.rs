//! Session controls and the per-frame orchestrator
//!
//! A session owns one simulation state. The host calls [`Session::frame`]
//! from its display refresh callback and hands in its capabilities.

use crate::platform::{AudioSink, Cue, HudSink, HudSnapshot, InputSource, RenderSurface};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, spawn_bot, tick};
use crate::tuning::Tuning;

/// One run of the game from start to stop
pub struct Session {
    tuning: Tuning,
    settings: Settings,
    state: GameState,
    running: bool,
    /// Host timestamp of the previous frame, in milliseconds
    last_frame_ms: Option<f64>,
}

impl Session {
    /// Create an idle session. Nothing runs until [`Session::start`].
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let state = Self::fresh_state(&tuning, &settings, seed);
        Self {
            tuning,
            settings,
            state,
            running: false,
            last_frame_ms: None,
        }
    }

    fn fresh_state(tuning: &Tuning, settings: &Settings, seed: u64) -> GameState {
        let mut state = GameState::new(seed, tuning.clone());
        state.particle_cap = tuning.max_particles.min(settings.max_particles());
        state
    }

    /// Reset every entity and start the loop.
    ///
    /// The old state is dropped whole, so a respawn queued by the previous
    /// run can never fire into this one.
    pub fn start(&mut self, seed: u64) {
        self.state = Self::fresh_state(&self.tuning, &self.settings, seed);
        for _ in 0..self.tuning.initial_bots {
            spawn_bot(&mut self.state, None);
        }
        self.running = true;
        self.last_frame_ms = None;
        log::info!(
            "Session started (seed: {}, bots: {})",
            seed,
            self.state.bots.len()
        );
    }

    /// Halt the loop. State is kept for display until the next start.
    pub fn stop(&mut self) {
        if self.running {
            log::info!(
                "Session stopped (score: {}, kills: {})",
                self.state.player.score,
                self.state.player.kills
            );
        }
        self.running = false;
        self.last_frame_ms = None;
    }

    /// Manual bot spawn. Returns the new bot's id.
    pub fn spawn_bot(&mut self) -> u32 {
        spawn_bot(&mut self.state, None)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Swap preferences; the particle cap applies immediately
    pub fn set_settings(&mut self, settings: Settings) {
        self.state.particle_cap = self.tuning.max_particles.min(settings.max_particles());
        self.settings = settings;
    }

    /// Elapsed seconds since the previous frame, capped to avoid a huge
    /// step after a stall. The first frame after a start steps by zero.
    fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        elapsed.min(self.tuning.max_dt)
    }

    /// Run one animation frame: input, simulation, audio, render, HUD.
    ///
    /// Returns `false` without touching anything when the session is not
    /// running, so the host can stop rescheduling.
    pub fn frame(
        &mut self,
        now_ms: f64,
        input: &mut dyn InputSource,
        render: &mut dyn RenderSurface,
        hud: &mut dyn HudSink,
        audio: &mut dyn AudioSink,
    ) -> bool {
        if !self.running {
            return false;
        }

        let dt = self.frame_dt(now_ms);
        let mut tick_input = input.drain();
        tick_input.mouse_dx *= self.settings.yaw_scale();

        tick(&mut self.state, &tick_input, dt);

        for event in self.state.drain_events() {
            if let Some(cue) = cue_for(&event) {
                audio.play(cue);
            }
        }

        render.render(&self.state);
        hud.update(&HudSnapshot::from_state(&self.state));
        true
    }
}

/// Sound for a gameplay event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Shot { .. } => Some(Cue::Shot),
        GameEvent::BotHit { .. } | GameEvent::PlayerHit => Some(Cue::Hit),
        GameEvent::PowerupCollected { .. } => Some(Cue::Pickup),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{InputState, NullAudio, NullSurface};
    use crate::sim::{Owner, PowerupKind, ScheduledAction};

    #[derive(Default)]
    struct LastHud(Option<HudSnapshot>);

    impl HudSink for LastHud {
        fn update(&mut self, hud: &HudSnapshot) {
            self.0 = Some(*hud);
        }
    }

    fn session() -> Session {
        Session::new(Tuning::default(), Settings::default(), 77)
    }

    fn run_frame(session: &mut Session, now_ms: f64, input: &mut InputState) -> bool {
        session.frame(
            now_ms,
            input,
            &mut NullSurface,
            &mut LastHud::default(),
            &mut NullAudio,
        )
    }

    #[test]
    fn test_idle_session_does_nothing() {
        let mut session = session();
        let mut input = InputState::new();
        input.request_fire();
        assert!(!run_frame(&mut session, 16.0, &mut input));
        assert_eq!(session.state().frame, 0);
        assert!(session.state().bots.is_empty());
    }

    #[test]
    fn test_start_populates_bots() {
        let mut session = session();
        session.start(5);
        assert!(session.is_running());
        assert_eq!(session.state().bots.len(), 4);
        assert_eq!(session.state().player.ammo, 30);

        session.spawn_bot();
        assert_eq!(session.state().bots.len(), 5);

        session.stop();
        assert!(!session.is_running());
    }

    #[test]
    fn test_restart_discards_pending_respawn() {
        let mut session = session();
        session.start(5);
        session
            .state_mut()
            .schedule(1.4, ScheduledAction::RespawnPlayer);
        session.start(6);
        assert!(session.state().scheduled().is_empty());
        assert_eq!(session.state().seed, 6);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut session = session();
        session.start(1);
        let mut input = InputState::new();
        run_frame(&mut session, 1000.0, &mut input);
        assert_eq!(session.state().time, 0.0);

        // Tab was hidden for five seconds
        run_frame(&mut session, 6000.0, &mut input);
        assert!((session.state().time - 0.06).abs() < 1e-6);

        run_frame(&mut session, 6016.0, &mut input);
        assert!((session.state().time - 0.076).abs() < 1e-5);
    }

    #[test]
    fn test_mouse_delta_is_scaled_by_settings() {
        let settings = Settings {
            mouse_sensitivity: 2.0,
            invert_yaw: true,
            ..Default::default()
        };
        let mut session = Session::new(Tuning::default(), settings, 3);
        session.start(3);
        let mut input = InputState::new();
        input.pointer_locked = true;
        input.add_mouse_delta(50.0);
        run_frame(&mut session, 0.0, &mut input);
        // -(50 * -2) * 0.002
        assert!((session.state().player.yaw - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_settings_cap_particles() {
        let mut session = session();
        session.set_settings(Settings {
            particles: false,
            ..Default::default()
        });
        session.start(1);
        assert_eq!(session.state().particle_cap, 0);
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(
            cue_for(&GameEvent::Shot {
                owner: Owner::Bot
            }),
            Some(Cue::Shot)
        );
        assert_eq!(cue_for(&GameEvent::PlayerHit), Some(Cue::Hit));
        assert_eq!(cue_for(&GameEvent::BotHit { bot_id: 1 }), Some(Cue::Hit));
        assert_eq!(
            cue_for(&GameEvent::PowerupCollected {
                kind: PowerupKind::Ammo
            }),
            Some(Cue::Pickup)
        );
        assert_eq!(cue_for(&GameEvent::PlayerDied), None);
    }
}
