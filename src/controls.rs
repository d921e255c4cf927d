//! Normalized control-curve conversions shared with the host UI.
//!
//! The toy's knobs travel 0..1 while the engine wants Hz and seconds.
//! Filter cutoff, attack and release ride log curves so equal knob travel
//! feels equal across the range; resonance rides a squared curve to spread
//! out the usable low-Q region. The inverses reflect engine state back onto
//! controls. These curves also pin the natural input domains the mapper
//! pre-clamps against.

use crate::constants::{
    ATTACK_MAX_SEC, ATTACK_MIN_SEC, FILTER_FREQ_MAX_HZ, FILTER_FREQ_MIN_HZ, RELEASE_MAX_SEC,
    RELEASE_MIN_SEC, RESONANCE_Q_MAX, RESONANCE_Q_MIN,
};

#[inline]
fn log_curve(t: f32, min: f32, max: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let log_min = min.log10();
    let log_max = max.log10();
    10f32.powf(log_min + t * (log_max - log_min))
}

#[inline]
fn log_curve_inverse(value: f32, min: f32, max: f32) -> f32 {
    let value = value.clamp(min, max);
    let log_min = min.log10();
    let log_max = max.log10();
    (value.log10() - log_min) / (log_max - log_min)
}

/// Filter cutoff in Hz for a normalized slider position (log curve, 20 Hz
/// to 15 kHz).
pub fn filter_frequency_hz(normalized: f32) -> f32 {
    log_curve(normalized, FILTER_FREQ_MIN_HZ, FILTER_FREQ_MAX_HZ)
}

/// Slider position showing a given filter cutoff.
pub fn filter_normalized(frequency_hz: f32) -> f32 {
    log_curve_inverse(frequency_hz, FILTER_FREQ_MIN_HZ, FILTER_FREQ_MAX_HZ)
}

/// Resonance Q for a normalized slider position (squared curve, floored at
/// the engine's minimum Q).
pub fn resonance_q(normalized: f32) -> f32 {
    let t = normalized.clamp(0.0, 1.0);
    (t * t * RESONANCE_Q_MAX).max(RESONANCE_Q_MIN)
}

/// Slider position showing a given resonance Q.
pub fn resonance_normalized(q: f32) -> f32 {
    (q.clamp(0.0, RESONANCE_Q_MAX) / RESONANCE_Q_MAX).sqrt()
}

/// Envelope attack in seconds for a normalized slider position (log curve,
/// 5 ms to 2.5 s).
pub fn attack_seconds(normalized: f32) -> f32 {
    log_curve(normalized, ATTACK_MIN_SEC, ATTACK_MAX_SEC)
}

/// Slider position showing a given attack time.
pub fn attack_normalized(seconds: f32) -> f32 {
    log_curve_inverse(seconds, ATTACK_MIN_SEC, ATTACK_MAX_SEC)
}

/// Envelope release in seconds for a normalized slider position (log curve,
/// 10 ms to 5 s).
pub fn release_seconds(normalized: f32) -> f32 {
    log_curve(normalized, RELEASE_MIN_SEC, RELEASE_MAX_SEC)
}

/// Slider position showing a given release time.
pub fn release_normalized(seconds: f32) -> f32 {
    log_curve_inverse(seconds, RELEASE_MIN_SEC, RELEASE_MAX_SEC)
}
