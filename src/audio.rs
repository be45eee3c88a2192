//! Step cues using Web Audio API
//!
//! Short sine blips, generated on the fly. Playing a cue never blocks: the
//! oscillator is scheduled and forgotten.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::Settings;

/// Cue player for the tutorial page
pub struct CuePlayer {
    ctx: Option<AudioContext>,
    volume: f32,
    duration_s: f64,
    enabled: bool,
}

impl CuePlayer {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - step cues disabled");
        }
        Self {
            ctx,
            volume: settings.cue_volume,
            duration_s: settings.cue_duration_s,
            enabled: settings.step_cues,
        }
    }

    /// Play a short tone at `freq` Hz
    pub fn play_tone(&self, freq: f32) {
        if !self.enabled || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + self.duration_s)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + self.duration_s).ok();
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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
