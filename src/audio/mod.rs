//! Synthesized portal sounds
//!
//! Every sound is a handful of oscillator tones; the tables live here so they
//! can be inspected without a browser. `web::AudioManager` turns them into
//! Web Audio nodes.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One enveloped oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Exponential glide target, if any
    pub end_freq: Option<f32>,
    pub wave: Waveform,
    /// Peak gain before master/sfx volume
    pub gain: f32,
    /// Offset from trigger time (seconds)
    pub start: f64,
    /// Seconds until the gain has decayed
    pub duration: f64,
}

impl Tone {
    const fn new(freq: f32, wave: Waveform, gain: f32, duration: f64) -> Self {
        Self {
            freq,
            end_freq: None,
            wave,
            gain,
            start: 0.0,
            duration,
        }
    }

    const fn glide(mut self, end_freq: f32) -> Self {
        self.end_freq = Some(end_freq);
        self
    }

    const fn at(mut self, start: f64) -> Self {
        self.start = start;
        self
    }
}

/// Discrete sound triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Any button or card tap
    Click,
    /// Long press on the gateway sigil
    HeavyPress,
    /// Screen change
    ModeSwitch,
    /// Vault opened
    Unlock,
}

const CLICK: &[Tone] = &[Tone::new(880.0, Waveform::Sine, 0.2, 0.08).glide(440.0)];

const HEAVY_PRESS: &[Tone] = &[
    Tone::new(120.0, Waveform::Sine, 0.5, 0.25).glide(50.0),
    Tone::new(240.0, Waveform::Square, 0.1, 0.1),
];

const MODE_SWITCH: &[Tone] = &[
    Tone::new(300.0, Waveform::Triangle, 0.3, 0.3).glide(900.0),
    Tone::new(600.0, Waveform::Sine, 0.15, 0.25).at(0.12),
];

// C major arpeggio up to the octave
const UNLOCK: &[Tone] = &[
    Tone::new(523.25, Waveform::Triangle, 0.25, 0.4),
    Tone::new(659.25, Waveform::Triangle, 0.25, 0.4).at(0.1),
    Tone::new(783.99, Waveform::Triangle, 0.25, 0.4).at(0.2),
    Tone::new(1046.5, Waveform::Triangle, 0.3, 0.6).at(0.3),
];

impl SoundEvent {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEvent::Click => CLICK,
            SoundEvent::HeavyPress => HEAVY_PRESS,
            SoundEvent::ModeSwitch => MODE_SWITCH,
            SoundEvent::Unlock => UNLOCK,
        }
    }

    /// Time until the last tone has finished
    pub fn length(&self) -> f64 {
        self.tones()
            .iter()
            .map(|t| t.start + t.duration)
            .fold(0.0, f64::max)
    }
}

/// Ambient drone root (A1) and its fifth
pub const AMBIENT_ROOT_HZ: f32 = 55.0;
pub const AMBIENT_FIFTH_HZ: f32 = 82.5;
/// Drone gain at full environment intensity
pub const AMBIENT_MAX_GAIN: f32 = 0.12;

/// Stereo position, -1 = hard left, 1 = hard right
pub fn clamp_pan(pan: f32) -> f32 {
    if pan.is_nan() { 0.0 } else { pan.clamp(-1.0, 1.0) }
}

/// Environment intensity in 0..=1
pub fn clamp_intensity(intensity: f32) -> f32 {
    if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    }
}

/// Drone gain for an environment intensity (never fully silent while looping)
pub fn ambient_gain(intensity: f32) -> f32 {
    AMBIENT_MAX_GAIN * (0.25 + 0.75 * clamp_intensity(intensity))
}

/// Pan for an element at `x` within a viewport of `width`
pub fn pan_for_position(x: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    clamp_pan(x / width * 2.0 - 1.0)
}

/// Master/sfx/mute mix shared by every backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Mix {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mix {
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SoundEvent; 4] = [
        SoundEvent::Click,
        SoundEvent::HeavyPress,
        SoundEvent::ModeSwitch,
        SoundEvent::Unlock,
    ];

    #[test]
    fn test_tone_tables_are_playable() {
        for event in ALL {
            let tones = event.tones();
            assert!(!tones.is_empty(), "{event:?}");
            for tone in tones {
                assert!(tone.freq > 0.0);
                // Exponential ramps cannot target zero
                assert!(tone.end_freq.is_none_or(|f| f > 0.0));
                assert!(tone.gain > 0.0 && tone.gain <= 1.0);
                assert!(tone.duration > 0.0 && tone.start >= 0.0);
            }
        }
    }

    #[test]
    fn test_unlock_is_longest() {
        assert!((SoundEvent::Unlock.length() - 0.9).abs() < 1e-9);
        assert!(SoundEvent::Click.length() < SoundEvent::Unlock.length());
    }

    #[test]
    fn test_pan_and_intensity_contracts() {
        assert_eq!(clamp_pan(-3.0), -1.0);
        assert_eq!(clamp_pan(0.25), 0.25);
        assert_eq!(clamp_pan(f32::NAN), 0.0);
        assert_eq!(clamp_intensity(1.5), 1.0);
        assert_eq!(clamp_intensity(-0.5), 0.0);

        assert_eq!(pan_for_position(0.0, 800.0), -1.0);
        assert_eq!(pan_for_position(400.0, 800.0), 0.0);
        assert_eq!(pan_for_position(800.0, 800.0), 1.0);
        assert_eq!(pan_for_position(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_ambient_gain() {
        assert!((ambient_gain(0.0) - AMBIENT_MAX_GAIN * 0.25).abs() < 1e-6);
        assert!((ambient_gain(1.0) - AMBIENT_MAX_GAIN).abs() < 1e-6);
        assert!((ambient_gain(9.0) - AMBIENT_MAX_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_mix() {
        let mix = Mix::default();
        assert!((mix.effective_volume() - 0.8).abs() < 1e-6);
        let muted = Mix { muted: true, ..mix };
        assert_eq!(muted.effective_volume(), 0.0);
    }
}
