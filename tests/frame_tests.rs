// Host-side tests for the per-frame driver.

use glam::Vec2;
use maleficarum_core::{
    map_sound_to_visuals, AudioLevels, FrameDriver, ParticleColor, ParticlePool, SoundEngine,
    SpawnOptions, SynthesisSnapshot, VisualParameterSet, VisualRenderer,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Default)]
struct FakeEngine {
    snapshot: Rc<RefCell<SynthesisSnapshot>>,
    levels: Rc<RefCell<AudioLevels>>,
}

impl SoundEngine for FakeEngine {
    fn snapshot(&self) -> SynthesisSnapshot {
        self.snapshot.borrow().clone()
    }

    fn levels(&self) -> AudioLevels {
        *self.levels.borrow()
    }
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    frames: Rc<RefCell<Vec<VisualParameterSet>>>,
    fail: Rc<Cell<bool>>,
}

impl VisualRenderer for RecordingRenderer {
    fn apply(&mut self, params: &VisualParameterSet) -> anyhow::Result<()> {
        if self.fail.get() {
            anyhow::bail!("renderer offline");
        }
        self.frames.borrow_mut().push(*params);
        Ok(())
    }
}

fn make_driver() -> (
    FrameDriver<FakeEngine, RecordingRenderer>,
    FakeEngine,
    RecordingRenderer,
) {
    let engine = FakeEngine::default();
    let renderer = RecordingRenderer::default();
    let pool = ParticlePool::new(10, 42).expect("valid capacity");
    let driver = FrameDriver::new(engine.clone(), renderer.clone(), pool);
    (driver, engine, renderer)
}

#[test]
fn step_pushes_one_parameter_set_per_tick() {
    let (mut driver, engine, renderer) = make_driver();
    engine.snapshot.borrow_mut().filter.resonance_q = 5.0;
    engine.levels.borrow_mut().mid = 0.4;

    driver.step(Duration::ZERO);
    driver.step(Duration::from_millis(16));

    let frames = renderer.frames.borrow();
    assert_eq!(frames.len(), 2);

    let expected =
        map_sound_to_visuals(&driver.engine().snapshot(), &engine.levels(), false, false);
    assert_eq!(frames[0], expected);
    assert_eq!(frames[1], expected, "same inputs must map to the same outputs");
}

#[test]
fn gesture_flags_reach_the_mapper() {
    let (mut driver, engine, renderer) = make_driver();
    engine.levels.borrow_mut().high = 0.5;

    driver.set_glitch_enabled(true);
    driver.set_pad_active(true);
    driver.step(Duration::ZERO);

    assert!(driver.glitch_enabled());
    assert!(driver.pad_active());
    let frames = renderer.frames.borrow();
    assert!(frames[0].glitch_intensity > 0.0);
    assert!(frames[0].pad_active);
}

#[test]
fn the_pool_rides_the_frame_clock() {
    let (mut driver, _engine, _renderer) = make_driver();
    driver
        .pool_mut()
        .spawn_burst(Vec2::new(100.0, 100.0), 3)
        .unwrap();

    driver.step(Duration::ZERO);
    assert_eq!(driver.pool().len(), 1, "first burst particle fires at once");
    driver.step(Duration::from_millis(60));
    assert_eq!(driver.pool().len(), 2);
    driver.step(Duration::from_millis(60));
    assert_eq!(driver.pool().len(), 3);
}

#[test]
fn analyser_levels_reach_the_pool() {
    let (mut driver, engine, _renderer) = make_driver();
    engine.levels.borrow_mut().high = 0.9;
    driver.step(Duration::ZERO);

    let id = driver
        .pool_mut()
        .spawn(Vec2::new(0.0, 0.0), SpawnOptions::default())
        .unwrap()
        .unwrap();
    let color = driver.pool().iter().find(|p| p.id == id).unwrap().color;
    assert_eq!(color, ParticleColor::HighAccent);
}

#[test]
fn a_failing_renderer_does_not_stop_the_loop() {
    let (mut driver, _engine, renderer) = make_driver();
    renderer.fail.set(true);
    driver.step(Duration::from_millis(16));
    assert!(
        renderer.frames.borrow().is_empty(),
        "failed pushes record nothing"
    );

    renderer.fail.set(false);
    driver.step(Duration::from_millis(16));
    assert_eq!(renderer.frames.borrow().len(), 1);
    assert!(
        (driver.clock_sec() - 0.032).abs() < 1e-9,
        "the clock kept ticking through the failure"
    );
}

#[test]
fn frame_ticks_on_wall_clock_time() {
    let (mut driver, _engine, renderer) = make_driver();
    driver.frame();
    driver.frame();

    assert_eq!(renderer.frames.borrow().len(), 2);
    assert!(driver.clock_sec() >= 0.0);
    assert_eq!(driver.pool().now_sec(), driver.clock_sec());
}
