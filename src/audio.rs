//! Accept chime using the Web Audio API
//!
//! Procedurally generated, no audio files. Sound is decorative: every
//! failure is swallowed.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Chime pitch (Hz)
pub const CHIME_FREQ: f32 = 660.0;
/// Gain envelope: start level, decays to `CHIME_FLOOR`
pub const CHIME_GAIN: f32 = 0.07;
pub const CHIME_FLOOR: f32 = 0.001;
/// Envelope decay time (s)
pub const CHIME_DECAY: f64 = 0.25;
/// Oscillator stop time (s)
pub const CHIME_STOP: f64 = 0.28;

/// Short sine "ding" played once on accept
#[derive(Debug, Clone, Copy)]
pub struct Chime {
    volume: f32,
}

impl Default for Chime {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

impl Chime {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Fire and forget
    pub fn play(&self) {
        if self.volume <= 0.0 {
            return;
        }
        if self.try_play().is_none() {
            log::warn!("Chime unavailable - continuing without sound");
        }
    }

    fn try_play(&self) -> Option<()> {
        // A fresh context per chime; closed once the tone ends
        let ctx = AudioContext::new().ok()?;
        let (osc, gain) = create_osc(&ctx, CHIME_FREQ, OscillatorType::Sine)?;
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(CHIME_FREQ, t).ok()?;
        gain.gain()
            .set_value_at_time(CHIME_GAIN * self.volume, t)
            .ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(CHIME_FLOOR, t + CHIME_DECAY)
            .ok()?;

        osc.start().ok()?;
        osc.stop_with_when(t + CHIME_STOP).ok()?;

        let ended_ctx = ctx.clone();
        let onended = Closure::once_into_js(move || {
            let _ = ended_ctx.close();
        });
        osc.set_onended(Some(onended.unchecked_ref()));

        Some(())
    }
}

/// Create an oscillator routed through a gain node to the destination
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
