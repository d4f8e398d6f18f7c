//! Audio cues using the Web Audio API
//!
//! Each cue is a single short oscillator blip, no sample files needed.
//! If an `AudioContext` can't be created every cue becomes a no-op.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioSink, Cue};
use crate::settings::Settings;

/// Oscillator shape, pitch, peak gain and duration for a cue
fn voice(cue: Cue) -> (OscillatorType, f32, f32, f64) {
    match cue {
        Cue::Shot => (OscillatorType::Square, 800.0, 0.03, 0.08),
        Cue::Hit => (OscillatorType::Sawtooth, 1200.0, 0.05, 0.06),
        Cue::Pickup => (OscillatorType::Sine, 880.0, 0.04, 0.12),
    }
}

/// Web Audio cue emitter
pub struct WebAudio {
    ctx: Option<AudioContext>,
    /// Creation is attempted once, on the first cue
    probed: bool,
    volume: f32,
}

impl WebAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ctx: None,
            probed: false,
            volume: settings.effective_volume(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&mut self) {
        if let Some(ctx) = self.context() {
            let _ = ctx.resume();
        }
    }

    fn context(&mut self) -> Option<&AudioContext> {
        if !self.probed {
            self.probed = true;
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
        }
        self.ctx.as_ref()
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.context() else { return };

        // Browsers start the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (shape, freq, peak, duration) = voice(cue);
        let Some((osc, gain)) = Self::create_osc(ctx, freq, shape) else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(peak * vol, t).ok();
        osc.start().ok();
        osc.stop_with_when(t + duration).ok();
    }
}
