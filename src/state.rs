//! Sound-engine-facing state types, read once per frame.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for use on both native and web targets. Hosts fill them from
//! whatever synthesis backend they run and hand them to the mapper; the core
//! never pushes back into the engine.

use fnv::FnvHashMap;

use crate::constants::DEFAULT_DOMINANT_FREQUENCY_HZ;

/// Which effect in the synthesis chain a state entry describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Delay,
    Reverb,
    Arpeggiator,
    Glitch,
}

/// Runtime state of a single effect as reported by the sound engine.
///
/// One flat shape is shared across effect kinds; fields that do not apply to
/// a given effect stay at zero (delay reads `feedback`, reverb reads `wet`,
/// the arpeggiator reads `rate_hz`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectState {
    pub active: bool,
    pub feedback: f32,
    pub wet: f32,
    pub rate_hz: f32,
}

impl EffectState {
    pub fn delay(feedback: f32) -> Self {
        Self {
            active: true,
            feedback,
            ..Self::default()
        }
    }

    pub fn reverb(wet: f32) -> Self {
        Self {
            active: true,
            wet,
            ..Self::default()
        }
    }

    pub fn arpeggiator(rate_hz: f32) -> Self {
        Self {
            active: true,
            rate_hz,
            ..Self::default()
        }
    }
}

/// Effect-chain snapshot keyed by effect kind.
///
/// A missing entry reads as an inactive effect with zeroed parameters, so
/// hosts only report the effects they actually run.
#[derive(Clone, Debug, Default)]
pub struct EffectsSnapshot {
    states: FnvHashMap<EffectKind, EffectState>,
}

impl EffectsSnapshot {
    pub fn set(&mut self, kind: EffectKind, state: EffectState) {
        self.states.insert(kind, state);
    }

    /// Builder-style `set`, convenient when assembling a snapshot inline.
    pub fn with(mut self, kind: EffectKind, state: EffectState) -> Self {
        self.set(kind, state);
        self
    }

    pub fn get(&self, kind: EffectKind) -> EffectState {
        self.states.get(&kind).copied().unwrap_or_default()
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind).active
    }
}

/// Filter section of the synthesis snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterParams {
    pub frequency_hz: f32,
    pub resonance_q: f32,
}

/// Amplitude envelope section of the synthesis snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnvelopeParams {
    pub attack_sec: f32,
    pub release_sec: f32,
}

/// Immutable read of the sound engine's synthesis parameters, taken once per
/// frame before mapping.
#[derive(Clone, Debug, Default)]
pub struct SynthesisSnapshot {
    pub filter: FilterParams,
    pub envelope: EnvelopeParams,
    pub effects: EffectsSnapshot,
}

/// Analyser band energies and dominant pitch for the current frame.
///
/// Band values are normalized to \[0, 1\]. `dominant_frequency_hz` carries
/// the analyser's strongest bin; the default reports 440 Hz, matching an
/// analyser that has nothing to say yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioLevels {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub dominant_frequency_hz: f32,
}

impl Default for AudioLevels {
    fn default() -> Self {
        Self {
            bass: 0.0,
            mid: 0.0,
            high: 0.0,
            dominant_frequency_hz: DEFAULT_DOMINANT_FREQUENCY_HZ,
        }
    }
}
