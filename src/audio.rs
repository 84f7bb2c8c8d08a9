//! Procedural sound effects
//!
//! Each effect is a short list of oscillator tones. Playback goes through the
//! Web Audio API on wasm; the tone tables themselves are plain data.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Runner leaves the ground
    Jump,
    /// Runner hits a car
    Crash,
    /// New best score
    HighScore,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator voice: an exponential pitch glide with a decaying envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain before the master volume is applied
    pub gain: f32,
    /// Seconds after the trigger
    pub delay: f64,
    pub duration: f64,
}

impl Tone {
    const fn new(waveform: Waveform, start_hz: f32, end_hz: f32, gain: f32, duration: f64) -> Self {
        Self {
            waveform,
            start_hz,
            end_hz,
            gain,
            delay: 0.0,
            duration,
        }
    }

    const fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

const JUMP: [Tone; 1] = [Tone::new(Waveform::Square, 300.0, 700.0, 0.15, 0.15)];

const CRASH: [Tone; 2] = [
    Tone::new(Waveform::Sine, 120.0, 40.0, 0.6, 0.35),
    Tone::new(Waveform::Sawtooth, 900.0, 60.0, 0.25, 0.2),
];

// Rising arpeggio, held back until the crash has mostly faded
const HIGH_SCORE: [Tone; 5] = [
    Tone::new(Waveform::Triangle, 500.0, 500.0, 0.25, 0.25).delayed(0.30),
    Tone::new(Waveform::Triangle, 600.0, 600.0, 0.25, 0.25).delayed(0.38),
    Tone::new(Waveform::Triangle, 700.0, 700.0, 0.25, 0.25).delayed(0.46),
    Tone::new(Waveform::Triangle, 800.0, 800.0, 0.25, 0.25).delayed(0.54),
    Tone::new(Waveform::Triangle, 1000.0, 1000.0, 0.25, 0.3).delayed(0.62),
];

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Crashed { .. } => Some(SoundEffect::Crash),
            GameEvent::NewHighScore(_) => Some(SoundEffect::HighScore),
            GameEvent::CarSpawned => None,
        }
    }

    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Jump => &JUMP,
            SoundEffect::Crash => &CRASH,
            SoundEffect::HighScore => &HIGH_SCORE,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, OscillatorType};

    use super::{SoundEffect, Tone, Waveform};

    /// Gain the envelope decays to (exponential ramps cannot reach zero)
    const SILENT: f32 = 0.01;

    impl From<Waveform> for OscillatorType {
        fn from(waveform: Waveform) -> Self {
            match waveform {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
                Waveform::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Plays [`SoundEffect`]s through one shared `AudioContext`
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let now = ctx.current_time();
            for tone in effect.tones() {
                if self.schedule(ctx, tone, now).is_none() {
                    log::debug!("Dropped {:?} tone", effect);
                }
            }
        }

        fn schedule(&self, ctx: &AudioContext, tone: &Tone, now: f64) -> Option<()> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;
            osc.set_type(tone.waveform.into());
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let start = now + tone.delay;
            let end = start + tone.duration;

            let envelope = gain.gain();
            envelope.set_value_at_time(tone.gain * self.volume, start).ok()?;
            envelope.exponential_ramp_to_value_at_time(SILENT, end).ok()?;

            let pitch = osc.frequency();
            pitch.set_value_at_time(tone.start_hz, start).ok()?;
            if tone.end_hz != tone.start_hz {
                pitch.exponential_ramp_to_value_at_time(tone.end_hz, end).ok()?;
            }

            osc.start_with_when(start).ok()?;
            osc.stop_with_when(end + 0.01).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SoundEffect; 3] = [SoundEffect::Jump, SoundEffect::Crash, SoundEffect::HighScore];

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Jumped), Some(SoundEffect::Jump));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed {
                score: 3,
                previous_high: 9
            }),
            Some(SoundEffect::Crash)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::NewHighScore(12)),
            Some(SoundEffect::HighScore)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::CarSpawned), None);
    }

    #[test]
    fn test_tones_are_playable() {
        for effect in ALL {
            assert!(!effect.tones().is_empty());
            for tone in effect.tones() {
                // Exponential ramps need strictly positive targets
                assert!(tone.start_hz > 0.0 && tone.end_hz > 0.0);
                assert!(tone.gain > 0.0 && tone.gain <= 1.0);
                assert!(tone.duration > 0.0 && tone.delay >= 0.0);
            }
        }
    }

    #[test]
    fn test_jump_glides_up() {
        let tone = SoundEffect::Jump.tones()[0];
        assert!(tone.end_hz > tone.start_hz);
    }

    #[test]
    fn test_high_score_arpeggio_ascends() {
        let tones = SoundEffect::HighScore.tones();
        for pair in tones.windows(2) {
            assert!(pair[1].start_hz > pair[0].start_hz);
            assert!(pair[1].delay > pair[0].delay);
        }
    }
}
