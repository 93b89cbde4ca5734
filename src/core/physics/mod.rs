//=========================================================================
// Physics
//=========================================================================
//
// Force-accumulating rigid bodies with per-axis velocity limits, plus the
// collision primitives in [`collision`].
//
// Integration is explicit Euler at the fixed logic timestep. Mass is
// implicitly 1, so forces are accelerations.
//
//=========================================================================

//=== Module Declarations =================================================

mod collision;

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Public API ==========================================================

pub use collision::{contact_side, resolve_elastic, Aabb, Circle, Side, DEFAULT_RESTITUTION};

//=== Body ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub velocity: Vec2,
    pub force: Vec2,
    /// Downward acceleration the owner applies while airborne.
    pub gravity: f32,
    pub max_speed_x: f32,
    pub max_speed_up: f32,
    pub max_speed_down: f32,
}

impl Body {
    pub fn new(gravity: f32, max_speed_x: f32, max_speed_up: f32, max_speed_down: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            gravity,
            max_speed_x,
            max_speed_up,
            max_speed_down,
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// `v += F·dt`, clears the accumulated force, then clamps velocity.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.force * dt;
        self.force = Vec2::ZERO;

        self.velocity.x = self.velocity.x.clamp(-self.max_speed_x, self.max_speed_x);
        self.velocity.y = self.velocity.y.clamp(-self.max_speed_up, self.max_speed_down);
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.force = Vec2::ZERO;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
