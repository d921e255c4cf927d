// Shared tuning constants for the audio-to-visual mapper, the particle pool,
// and the control curves. These are the toy's reference behavior; hosts
// treat them as fixed.

// Sound engine control ranges (also the mapper's input pre-clamp domains)
pub const FILTER_FREQ_MIN_HZ: f32 = 20.0;
pub const FILTER_FREQ_MAX_HZ: f32 = 15_000.0;
pub const RESONANCE_Q_MIN: f32 = 0.01;
pub const RESONANCE_Q_MAX: f32 = 20.0;
pub const ATTACK_MIN_SEC: f32 = 0.005;
pub const ATTACK_MAX_SEC: f32 = 2.5;
pub const RELEASE_MIN_SEC: f32 = 0.01;
pub const RELEASE_MAX_SEC: f32 = 5.0;

// Morph factor: resonance and attack fold into one timbral axis
pub const MORPH_BASE: f32 = 0.1;
pub const MORPH_PER_RESONANCE: f32 = 0.6;
pub const MORPH_RESONANCE_NORM: f32 = 15.0; // Q units per full contribution
pub const MORPH_PER_ATTACK: f32 = 0.3;
pub const MORPH_ATTACK_NORM_SEC: f32 = 2.0;
pub const MORPH_PER_MID: f32 = 0.2;

// Glitch intensity (only while the host has glitch enabled)
pub const GLITCH_BASE: f32 = 0.05;
pub const GLITCH_PER_HIGH: f32 = 0.6;
pub const GLITCH_PER_RESONANCE: f32 = 0.3;
pub const GLITCH_RESONANCE_NORM: f32 = 10.0;

// Rotation speed
pub const ROTATION_BASE: f32 = 0.1;
pub const ROTATION_PER_MID: f32 = 0.5;
pub const ROTATION_PER_HIGH: f32 = 0.3;
pub const ROTATION_PER_ARP_HZ: f32 = 0.04; // extra spin per arpeggiator step/s
pub const ROTATION_MAX: f32 = 2.0;

// Dimension blend (3 = flat lattice, 4 = full hyper projection)
pub const DIMENSION_BASE: f32 = 3.0;
pub const DIMENSION_PER_BASS: f32 = 0.8;
pub const DIMENSION_PER_RELEASE: f32 = 0.5;
pub const DIMENSION_RELEASE_NORM_SEC: f32 = 3.0;
pub const DIMENSION_MIN: f32 = 3.0;
pub const DIMENSION_MAX: f32 = 4.0;

// Grid density: bass thickens the lattice, midrange thins it
pub const GRID_BASE: f32 = 8.0;
pub const GRID_PER_BASS: f32 = 8.0;
pub const GRID_PER_MID: f32 = 2.0;
pub const GRID_DENSITY_MIN: f32 = 5.0;
pub const GRID_DENSITY_MAX: f32 = 20.0;

// Projection mode selection thresholds
pub const DELAY_FEEDBACK_PROJECTION_THRESHOLD: f32 = 0.65;
pub const REVERB_WET_PROJECTION_THRESHOLD: f32 = 0.75;

// Dominant pitch reported while the analyser has nothing better
pub const DEFAULT_DOMINANT_FREQUENCY_HZ: f32 = 440.0;

// Particle pool
pub const DEFAULT_POOL_CAPACITY: usize = 15;
pub const DEFAULT_BURST_COUNT: usize = 5;
pub const PARTICLE_SIZE_MIN_PX: f32 = 10.0;
pub const PARTICLE_SIZE_MAX_PX: f32 = 30.0;
pub const PARTICLE_LIFETIME_MIN_SEC: f32 = 1.0;
pub const PARTICLE_LIFETIME_MAX_SEC: f32 = 4.0;
pub const DRIFT_DISTANCE_MIN_PX: f32 = 50.0;
pub const DRIFT_DISTANCE_MAX_PX: f32 = 150.0;
pub const BURST_JITTER_PX: f32 = 20.0; // max offset per axis around the burst center
pub const BURST_STAGGER_SEC: f64 = 0.05;
pub const ACCENT_BAND_THRESHOLD: f32 = 0.6; // band energy that flips the accent color

// Accent palette (normalized rgba)
pub const ACCENT_DEFAULT_RGBA: [f32; 4] = [138.0 / 255.0, 127.0 / 255.0, 1.0, 0.8]; // lavender
pub const ACCENT_BASS_RGBA: [f32; 4] = [0.0, 240.0 / 255.0, 1.0, 0.8]; // cyan
pub const ACCENT_HIGH_RGBA: [f32; 4] = [1.0, 0.0, 1.0, 0.8]; // magenta
