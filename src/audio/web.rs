//! Web Audio playback
//!
//! Oscillator → gain envelope → stereo panner → destination. Node creation can
//! fail outside a secure context or before a user gesture; every failure just
//! skips the tone.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType, StereoPannerNode};

use super::{
    AMBIENT_FIFTH_HZ, AMBIENT_ROOT_HZ, Mix, SoundEvent, Tone, Waveform, ambient_gain, clamp_pan,
};

/// Envelopes decay toward this instead of zero (exponential ramps need > 0)
const SILENCE: f32 = 0.001;

impl From<Waveform> for OscillatorType {
    fn from(wave: Waveform) -> Self {
        match wave {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        }
    }
}

/// Running ambient drone
struct Ambient {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the portal
pub struct AudioManager {
    ctx: Option<AudioContext>,
    panner: Option<StereoPannerNode>,
    mix: Mix,
    ambient: Option<Ambient>,
    intensity: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        let panner = ctx.as_ref().and_then(|ctx| {
            let panner = ctx.create_stereo_panner().ok()?;
            panner.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(panner)
        });
        Self {
            ctx,
            panner,
            mix: Mix::default(),
            ambient: None,
            intensity: 0.5,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_mix(&mut self, mix: Mix) {
        self.mix = mix;
        self.apply_ambient_gain();
    }

    /// Move every sound in the stereo field (-1..1)
    pub fn set_spatial_position(&self, pan: f32) {
        let (Some(ctx), Some(panner)) = (&self.ctx, &self.panner) else {
            return;
        };
        // Short glide so dragging does not zipper
        panner
            .pan()
            .set_target_at_time(clamp_pan(pan), ctx.current_time(), 0.05)
            .ok();
    }

    /// Environment intensity (0..1) drives the drone level
    pub fn set_environment_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
        self.apply_ambient_gain();
    }

    /// Play a sound effect
    pub fn play(&self, event: SoundEvent) {
        let vol = self.mix.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in event.tones() {
            self.play_tone(ctx, tone, vol);
        }
    }

    /// Start the looping drone (no-op if already running)
    pub fn start_ambient(&mut self) {
        if self.ambient.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Some(gain) = ctx.create_gain().ok() else {
            return;
        };
        if self.connect_output(ctx, &gain).is_none() {
            return;
        }

        let t = ctx.current_time();
        gain.gain().set_value_at_time(SILENCE, t).ok();

        let mut oscillators = Vec::with_capacity(2);
        for freq in [AMBIENT_ROOT_HZ, AMBIENT_FIFTH_HZ] {
            let Some(osc) = ctx.create_oscillator().ok() else {
                continue;
            };
            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&gain).is_err() {
                continue;
            }
            osc.start().ok();
            oscillators.push(osc);
        }

        log::info!("Ambient loop started");
        self.ambient = Some(Ambient { oscillators, gain });
        self.apply_ambient_gain();
    }

    /// Fade out and stop the drone
    pub fn stop_ambient(&mut self) {
        let Some(ambient) = self.ambient.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        ambient
            .gain
            .gain()
            .exponential_ramp_to_value_at_time(SILENCE, t + 0.6)
            .ok();
        for osc in &ambient.oscillators {
            osc.stop_with_when(t + 0.7).ok();
        }
        log::info!("Ambient loop stopped");
    }

    fn apply_ambient_gain(&self) {
        let (Some(ctx), Some(ambient)) = (&self.ctx, &self.ambient) else {
            return;
        };
        let target = (ambient_gain(self.intensity) * self.mix.effective_volume()).max(SILENCE);
        ambient
            .gain
            .gain()
            .set_target_at_time(target, ctx.current_time(), 0.3)
            .ok();
    }

    fn connect_output(&self, ctx: &AudioContext, gain: &GainNode) -> Option<()> {
        match &self.panner {
            Some(panner) => gain.connect_with_audio_node(panner).ok()?,
            None => gain.connect_with_audio_node(&ctx.destination()).ok()?,
        };
        Some(())
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
        self.connect_output(ctx, &gain)?;

        Some((osc, gain))
    }

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.wave.into()) else {
            return;
        };
        let t = ctx.current_time() + tone.start;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(SILENCE, end).ok();

        if let Some(end_freq) = tone.end_freq {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(end_freq, end)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }
}
