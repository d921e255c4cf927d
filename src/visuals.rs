//! Audio-to-visual parameter mapping.
//!
//! [`map_sound_to_visuals`] folds one frame of synthesis state and analyser
//! levels into the flat parameter set the renderer consumes. It is pure and
//! clamp-heavy: inputs are clamped to the engine's control ranges before
//! combining, outputs to their declared ranges before emitting, so the
//! renderer never sees an out-of-range value no matter what the engine
//! reports.

use crate::constants::{
    ATTACK_MAX_SEC, DEFAULT_DOMINANT_FREQUENCY_HZ, DELAY_FEEDBACK_PROJECTION_THRESHOLD,
    DIMENSION_BASE, DIMENSION_MAX, DIMENSION_MIN, DIMENSION_PER_BASS, DIMENSION_PER_RELEASE,
    DIMENSION_RELEASE_NORM_SEC, GLITCH_BASE, GLITCH_PER_HIGH, GLITCH_PER_RESONANCE,
    GLITCH_RESONANCE_NORM, GRID_BASE, GRID_DENSITY_MAX, GRID_DENSITY_MIN, GRID_PER_BASS,
    GRID_PER_MID, MORPH_ATTACK_NORM_SEC, MORPH_BASE, MORPH_PER_ATTACK, MORPH_PER_MID,
    MORPH_PER_RESONANCE, MORPH_RESONANCE_NORM, RELEASE_MAX_SEC, RESONANCE_Q_MAX,
    REVERB_WET_PROJECTION_THRESHOLD, ROTATION_BASE, ROTATION_MAX, ROTATION_PER_ARP_HZ,
    ROTATION_PER_HIGH, ROTATION_PER_MID,
};
use crate::state::{AudioLevels, EffectKind, SynthesisSnapshot};

/// Discrete rendering style selected by whichever effect dominates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    #[default]
    Orthographic,
    Perspective,
    Stereographic,
}

impl ProjectionMode {
    /// Stable index used when packing for a shader.
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            ProjectionMode::Orthographic => 0,
            ProjectionMode::Perspective => 1,
            ProjectionMode::Stereographic => 2,
        }
    }
}

/// Flat per-frame parameter set consumed by the visual renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualParameterSet {
    /// Timbral morph axis, \[0, 1\].
    pub morph_factor: f32,
    /// Glitch overlay strength, \[0, 1\]; exactly 0 while glitch is disabled.
    pub glitch_intensity: f32,
    /// Scene rotation rate, \[0, 2\].
    pub rotation_speed: f32,
    /// Projection dimension blend, \[3, 4\].
    pub dimension: f32,
    /// Lattice line density, \[5, 20\].
    pub grid_density: f32,
    pub projection: ProjectionMode,
    pub pad_active: bool,
    pub dominant_frequency_hz: f32,
}

impl VisualParameterSet {
    /// Pack for a shader uniform block.
    pub fn to_uniforms(&self) -> VisualUniforms {
        VisualUniforms {
            morph_factor: self.morph_factor,
            glitch_intensity: self.glitch_intensity,
            rotation_speed: self.rotation_speed,
            dimension: self.dimension,
            grid_density: self.grid_density,
            projection_index: self.projection.index() as f32,
            pad_active: if self.pad_active { 1.0 } else { 0.0 },
            dominant_frequency_hz: self.dominant_frequency_hz,
        }
    }
}

/// Shader-facing packing of a [`VisualParameterSet`]: eight 32-bit scalars,
/// projection as its index, the pad flag as 0.0 / 1.0.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VisualUniforms {
    pub morph_factor: f32,
    pub glitch_intensity: f32,
    pub rotation_speed: f32,
    pub dimension: f32,
    pub grid_density: f32,
    pub projection_index: f32,
    pub pad_active: f32,
    pub dominant_frequency_hz: f32,
}

/// Map the current synthesis snapshot and analyser levels to renderer
/// parameters.
///
/// `glitch_enabled` gates the glitch channel entirely; `pad_active` passes
/// through untouched. Effects the engine does not report count as inactive,
/// so an empty snapshot is valid input.
pub fn map_sound_to_visuals(
    synth: &SynthesisSnapshot,
    levels: &AudioLevels,
    glitch_enabled: bool,
    pad_active: bool,
) -> VisualParameterSet {
    let bass = levels.bass.clamp(0.0, 1.0);
    let mid = levels.mid.clamp(0.0, 1.0);
    let high = levels.high.clamp(0.0, 1.0);
    let q = synth.filter.resonance_q.clamp(0.0, RESONANCE_Q_MAX);
    let attack = synth.envelope.attack_sec.clamp(0.0, ATTACK_MAX_SEC);
    let release = synth.envelope.release_sec.clamp(0.0, RELEASE_MAX_SEC);

    let delay = synth.effects.get(EffectKind::Delay);
    let reverb = synth.effects.get(EffectKind::Reverb);
    let arp = synth.effects.get(EffectKind::Arpeggiator);

    let morph_factor = (MORPH_BASE
        + (q / MORPH_RESONANCE_NORM) * MORPH_PER_RESONANCE
        + (attack / MORPH_ATTACK_NORM_SEC) * MORPH_PER_ATTACK
        + mid * MORPH_PER_MID)
        .clamp(0.0, 1.0);

    let glitch_intensity = if glitch_enabled {
        (GLITCH_BASE + high * GLITCH_PER_HIGH + (q / GLITCH_RESONANCE_NORM) * GLITCH_PER_RESONANCE)
            .clamp(0.0, 1.0)
    } else {
        0.0
    };

    let arp_spin = if arp.active {
        arp.rate_hz.max(0.0) * ROTATION_PER_ARP_HZ
    } else {
        0.0
    };
    let rotation_speed = (ROTATION_BASE + mid * ROTATION_PER_MID + high * ROTATION_PER_HIGH
        + arp_spin)
        .clamp(0.0, ROTATION_MAX);

    let dimension = (DIMENSION_BASE
        + bass * DIMENSION_PER_BASS
        + (release / DIMENSION_RELEASE_NORM_SEC) * DIMENSION_PER_RELEASE)
        .clamp(DIMENSION_MIN, DIMENSION_MAX);

    let grid_density = (GRID_BASE + bass * GRID_PER_BASS - mid * GRID_PER_MID)
        .clamp(GRID_DENSITY_MIN, GRID_DENSITY_MAX);

    // First matching rule wins; the order is the tie-break.
    let projection = if delay.active && delay.feedback > DELAY_FEEDBACK_PROJECTION_THRESHOLD {
        ProjectionMode::Stereographic
    } else if reverb.active && reverb.wet > REVERB_WET_PROJECTION_THRESHOLD {
        ProjectionMode::Perspective
    } else if arp.active {
        ProjectionMode::Stereographic
    } else {
        ProjectionMode::Orthographic
    };

    let dominant_frequency_hz =
        if levels.dominant_frequency_hz.is_finite() && levels.dominant_frequency_hz > 0.0 {
            levels.dominant_frequency_hz
        } else {
            DEFAULT_DOMINANT_FREQUENCY_HZ
        };

    VisualParameterSet {
        morph_factor,
        glitch_intensity,
        rotation_speed,
        dimension,
        grid_density,
        projection,
        pad_active,
        dominant_frequency_hz,
    }
}
