//! Per-frame driver: pull from the sound engine, map, push to the renderer.
//!
//! This is the tick a host would otherwise hand-roll in its animation-frame
//! callback. Collaborators are injected at construction, so a driver only
//! exists once its engine and renderer are ready; there is no ambient
//! lookup and no readiness polling.

use instant::Instant;
use std::time::Duration;

use crate::particles::ParticlePool;
use crate::state::{AudioLevels, SynthesisSnapshot};
use crate::visuals::{map_sound_to_visuals, VisualParameterSet};

/// Pull interface the sound engine exposes to the core. The core never
/// pushes back into the engine.
pub trait SoundEngine {
    /// Synthesis parameters for this frame.
    fn snapshot(&self) -> SynthesisSnapshot;
    /// Analyser band energies for this frame.
    fn levels(&self) -> AudioLevels;
}

/// Push interface of the visual renderer. Failures are logged and dropped
/// by the driver; they never unwind the tick.
pub trait VisualRenderer {
    fn apply(&mut self, params: &VisualParameterSet) -> anyhow::Result<()>;
}

/// Owns one tick of the toy: engine pull, particle clock, mapping, renderer
/// push. The glitch and pad flags live here because host gestures set them
/// and the mapper consumes them every frame.
pub struct FrameDriver<S, R> {
    engine: S,
    renderer: R,
    pool: ParticlePool,
    glitch_enabled: bool,
    pad_active: bool,
    last_instant: Option<Instant>,
    clock_sec: f64,
}

impl<S: SoundEngine, R: VisualRenderer> FrameDriver<S, R> {
    pub fn new(engine: S, renderer: R, pool: ParticlePool) -> Self {
        Self {
            engine,
            renderer,
            pool,
            glitch_enabled: false,
            pad_active: false,
            last_instant: None,
            clock_sec: 0.0,
        }
    }

    /// Host gesture: toggle the glitch overlay.
    pub fn set_glitch_enabled(&mut self, enabled: bool) {
        self.glitch_enabled = enabled;
    }

    pub fn glitch_enabled(&self) -> bool {
        self.glitch_enabled
    }

    /// Host gesture: the pointer pad is being held.
    pub fn set_pad_active(&mut self, active: bool) {
        self.pad_active = active;
    }

    pub fn pad_active(&self) -> bool {
        self.pad_active
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Mutable pool access for gesture spawns (key presses, preset flips).
    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    pub fn engine(&self) -> &S {
        &self.engine
    }

    /// Seconds of frame time accumulated so far.
    pub fn clock_sec(&self) -> f64 {
        self.clock_sec
    }

    /// Run one tick on wall-clock time. The first call sees `dt == 0`.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = match self.last_instant {
            Some(last) => now - last,
            None => Duration::ZERO,
        };
        self.last_instant = Some(now);
        self.step(dt);
    }

    /// Run one tick, advancing the frame clock by `dt`. This is the
    /// deterministic core of [`FrameDriver::frame`].
    pub fn step(&mut self, dt: Duration) {
        self.clock_sec += dt.as_secs_f64();

        let snapshot = self.engine.snapshot();
        let levels = self.engine.levels();

        // The pool sees the same levels the mapper does, so accent colors
        // and visual parameters agree within a frame.
        self.pool.set_audio_levels(levels);
        self.pool.advance(self.clock_sec);

        let params = map_sound_to_visuals(&snapshot, &levels, self.glitch_enabled, self.pad_active);
        if let Err(e) = self.renderer.apply(&params) {
            log::error!("renderer error: {:?}", e);
        }
    }
}
