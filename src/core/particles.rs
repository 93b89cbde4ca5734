//=========================================================================
// Particles
//=========================================================================
//
// Fixed-capacity particle pool for short-lived visual effects.
//
// The pool never grows: emitting into a full pool drops the particle.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec2;
use log::trace;
use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::render::Color;

//=== Particle ============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
    pub size: f32,
    pub lifetime: f32,
    pub age: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, color: Color, size: f32, lifetime: f32) -> Self {
        Self { position, velocity, color, size, lifetime, age: 0.0 }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Linear fade from 255 at birth to 0 at expiry.
    pub fn alpha(&self) -> u8 {
        if self.lifetime <= 0.0 {
            return 0;
        }
        let remaining = (1.0 - self.age / self.lifetime).clamp(0.0, 1.0);
        (255.0 * remaining) as u8
    }
}

//=== Burst ===============================================================

/// Parameters for a radial burst.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub count: usize,
    pub speed: Range<f32>,
    pub lifetime: Range<f32>,
    pub size: Range<f32>,
    pub color: Color,
}

//=== ParticlePool ========================================================

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self { particles: Vec::with_capacity(capacity), capacity }
    }

    /// Returns false if the pool is full and the particle was dropped.
    pub fn emit(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.capacity {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Emits `burst.count` particles at uniform random angles around
    /// `origin`. Returns how many fit in the pool.
    pub fn burst<R: Rng + ?Sized>(&mut self, origin: Vec2, burst: &Burst, rng: &mut R) -> usize {
        let mut emitted = 0;
        for _ in 0..burst.count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = sample(rng, &burst.speed);
            let particle = Particle::new(
                origin,
                Vec2::from_angle(angle) * speed,
                burst.color,
                sample(rng, &burst.size),
                sample(rng, &burst.lifetime),
            );

            if !self.emit(particle) {
                break;
            }
            emitted += 1;
        }

        if emitted < burst.count {
            trace!("Particle pool full: {} of {} emitted", emitted, burst.count);
        }
        emitted
    }

    /// Moves and ages every particle, then drops the expired ones.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            p.age += dt;
        }
        self.particles.retain(|p| !p.is_expired());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

/// Uniform sample from a range; an empty range yields its start.
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
