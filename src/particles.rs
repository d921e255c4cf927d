//! Bounded particle lifecycle pool.
//!
//! Owns the logical lifecycle of the toy's cosmetic screen-space particles:
//! spawning (single and staggered bursts), strict FIFO eviction when full,
//! timed expiry, and teardown. Hosts read the live set each frame and draw
//! it however they like; the pool never touches pixels. All timing rides the
//! host's frame clock through [`ParticlePool::advance`], so runs are
//! reproducible under test and nothing scheduled survives
//! [`ParticlePool::clear`].

use glam::Vec2;
use rand::prelude::*;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::constants::{
    ACCENT_BAND_THRESHOLD, ACCENT_BASS_RGBA, ACCENT_DEFAULT_RGBA, ACCENT_HIGH_RGBA,
    BURST_JITTER_PX, BURST_STAGGER_SEC, DRIFT_DISTANCE_MAX_PX, DRIFT_DISTANCE_MIN_PX,
    PARTICLE_LIFETIME_MAX_SEC, PARTICLE_LIFETIME_MIN_SEC, PARTICLE_SIZE_MAX_PX,
    PARTICLE_SIZE_MIN_PX,
};
use crate::state::AudioLevels;

/// Arguments the pool refuses to work with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParticleError {
    #[error("pool capacity must be at least 1")]
    ZeroCapacity,
    #[error("particle position must be finite")]
    NonFinitePosition,
    #[error("spawn override `{0}` must be finite and positive")]
    InvalidOverride(&'static str),
}

/// Color choice for a spawned particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleColor {
    /// Lavender house accent.
    DefaultAccent,
    /// Cyan flash used while the bass band is hot.
    BassAccent,
    /// Magenta flash used while the high band is hot.
    HighAccent,
    Custom([f32; 4]),
}

impl ParticleColor {
    /// Normalized rgba for this token.
    pub fn rgba(self) -> [f32; 4] {
        match self {
            ParticleColor::DefaultAccent => ACCENT_DEFAULT_RGBA,
            ParticleColor::BassAccent => ACCENT_BASS_RGBA,
            ParticleColor::HighAccent => ACCENT_HIGH_RGBA,
            ParticleColor::Custom(rgba) => rgba,
        }
    }
}

/// Identifier handed back by [`ParticlePool::spawn`]. Stale once the
/// particle leaves the pool; [`ParticlePool::contains`] tells you whether it
/// is still live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(u64);

/// One transient screen-space effect. Immutable once spawned; the pool only
/// tracks membership.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub id: ParticleId,
    /// Screen-space origin in px.
    pub position: Vec2,
    pub size_px: f32,
    pub color: ParticleColor,
    /// Pool clock time at spawn.
    pub created_at_sec: f64,
    pub lifetime_sec: f32,
    /// Total displacement the host animates over the lifetime.
    pub drift: Vec2,
}

impl Particle {
    /// Fraction of the lifetime elapsed at `now_sec`, clamped to \[0, 1\].
    /// Hosts use this to place the particle along its drift and fade it out.
    pub fn progress_at(&self, now_sec: f64) -> f32 {
        if self.lifetime_sec <= 0.0 {
            return 1.0;
        }
        ((now_sec - self.created_at_sec) / self.lifetime_sec as f64).clamp(0.0, 1.0) as f32
    }

    fn expired_at(&self, now_sec: f64) -> bool {
        now_sec - self.created_at_sec >= self.lifetime_sec as f64
    }
}

/// Optional overrides for [`ParticlePool::spawn`]; unset fields randomize.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnOptions {
    pub size_px: Option<f32>,
    pub lifetime_sec: Option<f32>,
    pub color: Option<ParticleColor>,
}

#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    due_sec: f64,
    position: Vec2,
}

/// Bounded, age-ordered pool of live particles.
///
/// Membership never exceeds `capacity`: when a spawn lands on a full pool
/// the oldest member is evicted first. Eviction and expiry are the only two
/// ways out, and whichever happens first wins.
pub struct ParticlePool {
    members: VecDeque<Particle>,
    pending: SmallVec<[PendingSpawn; 8]>,
    capacity: usize,
    levels: AudioLevels,
    rng: StdRng,
    next_id: u64,
    clock_sec: f64,
    torn_down: bool,
}

impl ParticlePool {
    /// Build an empty pool. `capacity` is the hard membership ceiling and
    /// must be at least 1. `seed` drives all spawn randomization so runs can
    /// be reproduced.
    pub fn new(capacity: usize, seed: u64) -> Result<Self, ParticleError> {
        if capacity == 0 {
            return Err(ParticleError::ZeroCapacity);
        }
        Ok(Self {
            members: VecDeque::with_capacity(capacity),
            pending: SmallVec::new(),
            capacity,
            levels: AudioLevels::default(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            clock_sec: 0.0,
            torn_down: false,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    /// Live members, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.members.iter()
    }

    /// The pool's frame clock as of the last [`ParticlePool::advance`].
    pub fn now_sec(&self) -> f64 {
        self.clock_sec
    }

    /// Inject the analyser levels the accent-color rule reads. The frame
    /// driver calls this once per tick with the same levels the mapper sees.
    pub fn set_audio_levels(&mut self, levels: AudioLevels) {
        self.levels = levels;
    }

    /// Spawn one particle at `position`.
    ///
    /// Unset options randomize: size 10 to 30 px, lifetime 1 to 4 s, drift
    /// in a uniformly random direction over 50 to 150 px. Color priority:
    /// explicit override, then the high accent while the high band is over
    /// the threshold, then the bass accent, then the default.
    ///
    /// Returns `Ok(None)` once the pool has been torn down.
    pub fn spawn(
        &mut self,
        position: Vec2,
        opts: SpawnOptions,
    ) -> Result<Option<ParticleId>, ParticleError> {
        if !position.is_finite() {
            return Err(ParticleError::NonFinitePosition);
        }
        if let Some(size) = opts.size_px {
            if !size.is_finite() || size <= 0.0 {
                return Err(ParticleError::InvalidOverride("size_px"));
            }
        }
        if let Some(lifetime) = opts.lifetime_sec {
            if !lifetime.is_finite() || lifetime <= 0.0 {
                return Err(ParticleError::InvalidOverride("lifetime_sec"));
            }
        }
        if self.torn_down {
            return Ok(None);
        }
        Ok(Some(self.admit(position, opts)))
    }

    /// Schedule `count` spawns around `center`, 50 ms apart, each jittered
    /// by up to the burst jitter on each axis. They fire from
    /// [`ParticlePool::advance`] as the frame clock passes their due time;
    /// the first is due immediately.
    pub fn spawn_burst(&mut self, center: Vec2, count: usize) -> Result<(), ParticleError> {
        if !center.is_finite() {
            return Err(ParticleError::NonFinitePosition);
        }
        if self.torn_down {
            return Ok(());
        }
        for i in 0..count {
            let jitter = Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0 * BURST_JITTER_PX,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * BURST_JITTER_PX,
            );
            self.pending.push(PendingSpawn {
                due_sec: self.clock_sec + i as f64 * BURST_STAGGER_SEC,
                position: center + jitter,
            });
        }
        Ok(())
    }

    /// Advance the frame clock: fire scheduled burst spawns that have come
    /// due, then expire members whose lifetime has elapsed.
    ///
    /// `now_sec` is the host's monotonic frame clock; a value earlier than
    /// the current clock is treated as no time passing.
    pub fn advance(&mut self, now_sec: f64) {
        if self.torn_down {
            return;
        }
        if now_sec > self.clock_sec {
            self.clock_sec = now_sec;
        }
        let now = self.clock_sec;

        if !self.pending.is_empty() {
            let mut due: SmallVec<[PendingSpawn; 8]> = SmallVec::new();
            self.pending.retain(|p| {
                if p.due_sec <= now {
                    due.push(*p);
                    false
                } else {
                    true
                }
            });
            due.sort_by(|a, b| a.due_sec.total_cmp(&b.due_sec));
            for p in due {
                self.admit(p.position, SpawnOptions::default());
            }
        }

        // Expiry scans live members only, so a particle evicted earlier can
        // never be removed twice.
        self.members.retain(|p| !p.expired_at(now));
    }

    /// Tear the pool down: drop every live member and cancel all scheduled
    /// spawns. Afterwards `spawn` returns `Ok(None)` and `spawn_burst` /
    /// `advance` are no-ops.
    pub fn clear(&mut self) {
        if self.torn_down {
            return;
        }
        log::debug!(
            "particle pool cleared: dropped {} live, {} pending",
            self.members.len(),
            self.pending.len()
        );
        self.members.clear();
        self.pending.clear();
        self.torn_down = true;
    }

    fn admit(&mut self, position: Vec2, opts: SpawnOptions) -> ParticleId {
        if self.members.len() == self.capacity {
            // Oldest member leaves before the new one enters.
            self.members.pop_front();
        }
        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let size_px = match opts.size_px {
            Some(s) => s,
            None => self
                .rng
                .gen_range(PARTICLE_SIZE_MIN_PX..=PARTICLE_SIZE_MAX_PX),
        };
        let lifetime_sec = match opts.lifetime_sec {
            Some(l) => l,
            None => self
                .rng
                .gen_range(PARTICLE_LIFETIME_MIN_SEC..=PARTICLE_LIFETIME_MAX_SEC),
        };
        let angle = self.rng.gen::<f32>() * TAU;
        let distance = self
            .rng
            .gen_range(DRIFT_DISTANCE_MIN_PX..=DRIFT_DISTANCE_MAX_PX);
        let color = match opts.color {
            Some(c) => c,
            None if self.levels.high > ACCENT_BAND_THRESHOLD => ParticleColor::HighAccent,
            None if self.levels.bass > ACCENT_BAND_THRESHOLD => ParticleColor::BassAccent,
            None => ParticleColor::DefaultAccent,
        };

        self.members.push_back(Particle {
            id,
            position,
            size_px,
            color,
            created_at_sec: self.clock_sec,
            lifetime_sec,
            drift: Vec2::new(angle.cos(), angle.sin()) * distance,
        });
        id
    }
}
