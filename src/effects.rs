//! Cosmetic effects: exhaust particles and the starfield
//!
//! Particles live in a fixed-capacity arena with a liveness flag per slot.
//! Dead slots are recycled; the whole arena is swept once per frame. Nothing
//! here feeds back into the simulation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Toy;
use crate::consts::{ASCENT_PIXEL_PER_METER, STAR_COUNT, VIEW_HEIGHT, VIEW_WIDTH};
use crate::settings::Settings;
use crate::sim::{Mission, MissionEvent, MissionPhase};

/// Reference frame rate the particle tuning was done at
const TUNING_FPS: f32 = 60.0;
/// Smoke sprites in the ascent plume
pub const SMOKE_COUNT: usize = 30;
/// Smoke sprite recycle age (s)
pub const SMOKE_LIFETIME: f32 = 500.0 / TUNING_FPS;
/// Smoke sprite size (px), used for off-screen recycling
pub const SMOKE_SIZE: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Soft glowing blob
    Flame,
    /// Thin streak, drawn dimmed
    Spark,
    /// Thin streak, drawn bright
    Ember,
    /// Recycling smoke sprite
    Smoke,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    /// Position last frame (streaks are drawn from here)
    pub prev: Vec2,
    pub vel: Vec2,
    /// Emitter position at spawn; flames and sparks drift toward its x, smoke resets to it
    pub origin: Vec2,
    pub radius: f32,
    /// Remaining life before fading (tuning units)
    pub life: f32,
    pub alpha: f32,
    pub target_alpha: f32,
    pub hue: f32,
    pub lightness: f32,
    /// Sprite rotation (smoke)
    pub angle: f32,
    /// Seconds since spawn or last recycle (smoke)
    pub age: f32,
    pub alive: bool,
}

impl Particle {
    fn flame(rng: &mut Pcg32, at: Vec2) -> Self {
        let pos = Vec2::new(rng.random_range(at.x - 25.0..at.x + 25.0), rng.random_range(at.y - 5.0..at.y + 5.0));
        Self {
            kind: ParticleKind::Flame,
            pos,
            prev: pos,
            vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(1.0..3.0)),
            origin: at,
            radius: rng.random_range(30.0..40.0),
            life: rng.random_range(2.0..7.0),
            alpha: 0.0,
            target_alpha: rng.random_range(0.8..0.9),
            hue: rng.random_range(2.0f32..40.0).floor(),
            lightness: rng.random_range(80.0..100.0),
            angle: 0.0,
            age: 0.0,
            alive: true,
        }
    }

    fn spark(rng: &mut Pcg32, at: Vec2, kind: ParticleKind) -> Self {
        let pos = Vec2::new(rng.random_range(at.x - 40.0..at.x + 40.0), rng.random_range(at.y..at.y + 5.0));
        let alpha = rng.random_range(0.8..0.9);
        Self {
            kind,
            pos,
            prev: pos,
            vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(1.0..3.0)),
            origin: at,
            radius: rng.random_range(0.0..1.0),
            life: rng.random_range(4.0..8.0),
            alpha,
            target_alpha: alpha,
            hue: rng.random_range(2.0f32..40.0).floor(),
            lightness: rng.random_range(40.0..100.0),
            angle: 0.0,
            age: 0.0,
            alive: true,
        }
    }

    fn smoke(rng: &mut Pcg32, at: Vec2, index: usize) -> Self {
        Self {
            kind: ParticleKind::Smoke,
            pos: at,
            prev: at,
            vel: Vec2::new(rng.random_range(-10.0..10.0), 0.0),
            origin: at,
            radius: SMOKE_SIZE / 2.0,
            life: 0.0,
            alpha: 1.0,
            target_alpha: 1.0,
            hue: 0.0,
            lightness: 80.0,
            angle: rng.random_range(0.0..std::f32::consts::TAU),
            // Stagger so the plume is continuous from the start
            age: SMOKE_LIFETIME * index as f32 / SMOKE_COUNT as f32,
            alive: true,
        }
    }

    /// Advance one frame; `plume_speed` is the smoke's vertical screen speed (px/s)
    fn update(&mut self, dt: f32, plume_speed: f32) {
        // Flame/spark tuning is per 60 Hz frame
        let k = dt * TUNING_FPS;
        match self.kind {
            ParticleKind::Flame | ParticleKind::Spark | ParticleKind::Ember => {
                self.prev = self.pos;
                self.pos += self.vel * k;
                self.vel.y += 0.08 * k;
                self.vel.x += if self.pos.x < self.origin.x { 0.2 * k } else { -0.2 * k };

                if self.kind == ParticleKind::Flame {
                    self.radius = (self.radius - 0.3 * k).max(0.0);
                    self.life -= 0.12 * k;
                } else {
                    self.life -= 0.1 * k;
                }

                if self.life <= 0.0 {
                    self.alpha -= 0.05 * k;
                    if self.alpha <= 0.0 {
                        self.alive = false;
                    }
                } else if self.alpha < self.target_alpha {
                    self.alpha = (self.alpha + 0.08 * k).min(self.target_alpha);
                }
            }
            ParticleKind::Smoke => {
                self.age += dt;
                self.vel.y = plume_speed;
                self.prev = self.pos;
                self.pos += self.vel * dt;

                let off_x = self.pos.x >= VIEW_WIDTH as f32 + SMOKE_SIZE || self.pos.x <= -SMOKE_SIZE;
                let off_y = self.pos.y >= VIEW_HEIGHT as f32 + SMOKE_SIZE || self.pos.y <= -SMOKE_SIZE;
                if off_x || off_y {
                    self.pos = self.origin;
                }
                if self.age > SMOKE_LIFETIME {
                    self.pos = self.origin;
                    self.age = 0.0;
                }
            }
        }
    }
}

/// Fixed-capacity particle storage with slot reuse
#[derive(Debug, Clone, Default)]
pub struct ParticleArena {
    slots: Vec<Particle>,
    free: Vec<usize>,
    capacity: usize,
}

impl ParticleArena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            capacity,
        }
    }

    /// Insert a particle, reusing a dead slot if one exists. None when full.
    pub fn spawn(&mut self, particle: Particle) -> Option<usize> {
        if let Some(index) = self.free.pop() {
            self.slots[index] = particle;
            return Some(index);
        }
        if self.slots.len() >= self.capacity {
            return None;
        }
        self.slots.push(particle);
        Some(self.slots.len() - 1)
    }

    /// Update every live particle once and retire the ones that died
    pub fn sweep(&mut self, dt: f32, plume_speed: f32) {
        for (index, particle) in self.slots.iter_mut().enumerate() {
            if !particle.alive {
                continue;
            }
            particle.update(dt, plume_speed);
            if !particle.alive {
                self.free.push(index);
            }
        }
    }

    pub fn alive(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.alive)
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

/// A twinkling background star
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
    decreasing: bool,
    /// Alpha change per second
    rate: f32,
}

/// Background stars for the lander view
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(rng: &mut Pcg32, count: usize) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.random_range(0.0..VIEW_WIDTH as f32),
                y: rng.random_range(0.0..VIEW_HEIGHT as f32),
                radius: rng.random_range(0.0f32..2.0).sqrt(),
                alpha: 1.0,
                decreasing: true,
                rate: rng.random_range(0.0f32..0.005) * TUNING_FPS,
            })
            .collect();
        Self { stars }
    }

    /// Bounce each star's alpha between 0.1 and 0.95
    pub fn twinkle(&mut self, dt: f32) {
        for star in &mut self.stars {
            if star.decreasing {
                star.alpha -= star.rate * dt;
                if star.alpha < 0.1 {
                    star.decreasing = false;
                }
            } else {
                star.alpha += star.rate * dt;
                if star.alpha > 0.95 {
                    star.decreasing = true;
                }
            }
        }
    }
}

/// All cosmetic state for one toy
#[derive(Debug, Clone)]
pub struct Effects {
    toy: Toy,
    rng: Pcg32,
    seed: u64,
    exhaust: bool,
    pub particles: ParticleArena,
    pub stars: Starfield,
}

impl Effects {
    pub fn new(toy: Toy, settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = if toy == Toy::Lander && settings.starfield_enabled() {
            Starfield::generate(&mut rng, STAR_COUNT)
        } else {
            Starfield::default()
        };
        let capacity = match toy {
            Toy::Lander => settings.max_particles(),
            Toy::Ascent if settings.exhaust => SMOKE_COUNT,
            Toy::Ascent => 0,
        };
        Self {
            toy,
            rng,
            seed,
            exhaust: settings.exhaust,
            particles: ParticleArena::with_capacity(capacity),
            stars,
        }
    }

    /// React to a mission transition
    pub fn on_event(&mut self, event: MissionEvent, nozzle: Vec2) {
        match event {
            MissionEvent::Restarted => {
                self.particles.clear();
                // Fresh twinkle pattern per run, still reproducible from the seed
                self.seed = self.seed.wrapping_add(1);
                self.rng = Pcg32::seed_from_u64(self.seed);
            }
            MissionEvent::Launched if self.toy == Toy::Ascent && self.exhaust => {
                self.particles.clear();
                for i in 0..SMOKE_COUNT {
                    let smoke = Particle::smoke(&mut self.rng, nozzle, i);
                    if self.particles.spawn(smoke).is_none() {
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    /// Emit and advance effects for one frame
    pub fn update(&mut self, mission: &Mission, nozzle: Vec2, dt: f64) {
        let dt = dt as f32;
        self.stars.twinkle(dt);

        if self.toy == Toy::Lander && mission.is_burning() {
            let flame = Particle::flame(&mut self.rng, nozzle);
            let spark = Particle::spark(&mut self.rng, nozzle, ParticleKind::Spark);
            let ember = Particle::spark(&mut self.rng, nozzle, ParticleKind::Ember);
            for particle in [flame, spark, ember] {
                if self.particles.spawn(particle).is_none() {
                    break;
                }
            }
        }

        // Smoke only drifts while the rocket is in flight
        let plume_speed = (mission.vehicle.velocity * ASCENT_PIXEL_PER_METER) as f32;
        if self.toy == Toy::Ascent && mission.phase != MissionPhase::Flying {
            return;
        }
        self.particles.sweep(dt, plume_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimConfig;

    fn spark_at(x: f32) -> Particle {
        let mut rng = Pcg32::seed_from_u64(1);
        Particle::spark(&mut rng, Vec2::new(x, 0.0), ParticleKind::Spark)
    }

    #[test]
    fn test_arena_respects_capacity() {
        let mut arena = ParticleArena::with_capacity(3);
        for _ in 0..3 {
            assert!(arena.spawn(spark_at(0.0)).is_some());
        }
        assert!(arena.spawn(spark_at(0.0)).is_none());
        assert_eq!(arena.live_count(), 3);
    }

    #[test]
    fn test_arena_reuses_dead_slots() {
        let mut arena = ParticleArena::with_capacity(2);
        arena.spawn(spark_at(0.0));
        arena.spawn(spark_at(0.0));

        // Sparks live at most 8 life units at 0.1/frame plus a short fade
        for _ in 0..200 {
            arena.sweep(1.0 / 60.0, 0.0);
        }
        assert_eq!(arena.live_count(), 0);
        assert_eq!(arena.alive().count(), 0);

        let index = arena.spawn(spark_at(5.0)).expect("dead slot should be reused");
        assert!(index < 2);
        assert_eq!(arena.slots.len(), 2);
        assert_eq!(arena.live_count(), 1);
    }

    #[test]
    fn test_flame_fades_in_then_dies() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut flame = Particle::flame(&mut rng, Vec2::new(400.0, 300.0));
        assert_eq!(flame.alpha, 0.0);
        flame.update(1.0 / 60.0, 0.0);
        assert!(flame.alpha > 0.0);
        assert!(flame.pos.y > flame.prev.y - 1e-3, "flames fall away from the nozzle");

        let mut frames = 0;
        while flame.alive && frames < 1000 {
            flame.update(1.0 / 60.0, 0.0);
            frames += 1;
        }
        assert!(!flame.alive);
        assert!(flame.radius < 40.0);
    }

    #[test]
    fn test_smoke_recycles_to_origin() {
        let mut rng = Pcg32::seed_from_u64(3);
        let origin = Vec2::new(400.0, 472.0);
        let mut smoke = Particle::smoke(&mut rng, origin, 0);
        smoke.update(1.0, 5000.0);
        // Pushed far below the view, so it snaps back
        assert_eq!(smoke.pos, origin);

        smoke.age = SMOKE_LIFETIME;
        smoke.update(0.1, 0.0);
        assert_eq!(smoke.age, 0.0);
        assert!(smoke.alive);
    }

    #[test]
    fn test_starfield_twinkle_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = Starfield::generate(&mut rng, 50);
        for _ in 0..5_000 {
            field.twinkle(1.0 / 60.0);
        }
        for star in &field.stars {
            assert!(star.alpha > 0.0 && star.alpha <= 1.0, "alpha {}", star.alpha);
        }
    }

    #[test]
    fn test_lander_exhaust_only_while_burning() {
        let settings = Settings::default();
        let mut effects = Effects::new(Toy::Lander, &settings, 42);
        let mut mission = Mission::new(Toy::Lander, SimConfig::lander());
        let nozzle = Vec2::new(400.0, 300.0);

        effects.update(&mission, nozzle, 1.0 / 60.0);
        assert_eq!(effects.particles.live_count(), 0);

        mission.controls.thrusters_active = true;
        effects.update(&mission, nozzle, 1.0 / 60.0);
        assert_eq!(effects.particles.live_count(), 3);

        effects.on_event(MissionEvent::Restarted, nozzle);
        assert_eq!(effects.particles.live_count(), 0);
    }

    #[test]
    fn test_ascent_plume_spawned_on_launch() {
        let settings = Settings::default();
        let mut effects = Effects::new(Toy::Ascent, &settings, 42);
        effects.on_event(MissionEvent::Launched, Vec2::new(400.0, 472.0));
        assert_eq!(effects.particles.live_count(), SMOKE_COUNT);
        assert!(effects.stars.stars.is_empty());

        let no_exhaust = Settings { exhaust: false, ..Settings::default() };
        let mut effects = Effects::new(Toy::Ascent, &no_exhaust, 42);
        effects.on_event(MissionEvent::Launched, Vec2::new(400.0, 472.0));
        assert_eq!(effects.particles.live_count(), 0);
    }
}
