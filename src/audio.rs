//! Audio cues via Web Audio
//!
//! Procedurally generated beeps - no sample files. Everything degrades
//! to silence when the AudioContext is unavailable.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::SoundCue;

/// Audio manager for one session
pub struct AudioManager {
    ctx: Option<AudioContext>,
    enabled: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - audio disabled");
        }
        Self { ctx, enabled: true }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Resume the context (browsers suspend it until a user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play one cue
    pub fn play(&self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::PaddleHit => self.play_blip(ctx, 440.0),
            SoundCue::WallHit => self.play_blip(ctx, 220.0),
            SoundCue::Score => self.play_score(ctx),
            SoundCue::Loss => self.play_loss(ctx),
        }
    }

    /// Create an oscillator routed through a gain envelope
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

    /// Short square blip for paddle and wall hits
    fn play_blip(&self, ctx: &AudioContext, freq: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Point won - ascending C major arpeggio (C5, E5, G5)
    fn play_score(&self, ctx: &AudioContext) {
        for (i, freq) in [523.25, 659.25, 783.99].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * 0.1;

            gain.gain().set_value_at_time(0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Point conceded - low sawtooth buzz
    fn play_loss(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.4)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }
}
