//=========================================================================
// Collision
//=========================================================================
//
// Axis-aligned boxes, contact-side classification and circle colliders.
//
// Coordinates are screen-style: y grows downward, so `top` is the
// smaller y value.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Aabb ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self { min: center - half, max: center + half }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Inclusive on every edge.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self { min: self.min + offset, max: self.max + offset }
    }
}

//=== Contact Side ========================================================

/// Which face of an obstacle a mover ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Classifies an overlap by its shallowest penetration.
///
/// Ties resolve in the order left, right, top, bottom.
pub fn contact_side(mover: &Aabb, obstacle: &Aabb) -> Side {
    let candidates = [
        (Side::Left, mover.right() - obstacle.left()),
        (Side::Right, obstacle.right() - mover.left()),
        (Side::Top, mover.bottom() - obstacle.top()),
        (Side::Bottom, obstacle.bottom() - mover.top()),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

//=== Circle ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }

    /// Bounding box, for circle-vs-box tests.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center, Vec2::splat(self.radius * 2.0))
    }
}

//--- Elastic Response ----------------------------------------------------

pub const DEFAULT_RESTITUTION: f32 = 0.8;

/// Exchanges an impulse between two unit-mass bodies along the contact
/// normal. Separating bodies and coincident centres are left untouched.
///
/// The impulse is split between both bodies, so momentum is conserved and
/// kinetic energy never grows for `restitution <= 1`.
pub fn resolve_elastic(
    a: &Circle,
    va: &mut Vec2,
    b: &Circle,
    vb: &mut Vec2,
    restitution: f32,
) {
    let delta = b.center - a.center;
    let distance = delta.length();
    if distance == 0.0 {
        return;
    }

    let normal = delta / distance;
    let approach = (*va - *vb).dot(normal);
    if approach <= 0.0 {
        return;
    }

    let impulse = (1.0 + restitution) * approach / 2.0;
    *va -= normal * impulse;
    *vb += normal * impulse;
}

//=========================================================================
// Unit Tests
//=========================================================================
