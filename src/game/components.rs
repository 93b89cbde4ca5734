//=========================================================================
// Game Components
//=========================================================================
//
// Plain data attached to entities; behaviour lives in the systems in
// helicopter.rs and weapons.rs.
//
// Entity layouts:
//   helicopter  Transform, Body, Collider, Helicopter, Weapon, Sprite
//   wall        Transform, Collider, Wall, Sprite
//   pad         Transform, Collider, LandingPad, Sprite
//   projectile  Transform, Projectile
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::ecs::{Component, Entity, World};
use crate::core::physics::{Aabb, Circle};
use crate::core::render::Color;

//=== Spatial =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec2,
}

impl Transform {
    pub fn at(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y) }
    }
}

/// Axis-aligned box centred on the entity's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: Vec2,
}

impl Collider {
    pub fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width, height) }
    }

    pub fn aabb(&self, transform: &Transform) -> Aabb {
        Aabb::from_center(transform.position, self.size)
    }
}

//=== Helicopter ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightState {
    Landed,
    TakingOff,
    Flying,
}

impl FlightState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Landed => "Landed",
            Self::TakingOff => "Taking off",
            Self::Flying => "Flying",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helicopter {
    pub state: FlightState,
    pub facing: Facing,
    /// Y at the moment of the last takeoff.
    pub takeoff_origin_y: f32,
}

impl Helicopter {
    pub fn landed() -> Self {
        Self { state: FlightState::Landed, facing: Facing::Right, takeoff_origin_y: 0.0 }
    }
}

//=== Weapons =============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub cooldown: f32,
    pub since_last_shot: f32,
}

impl Weapon {
    /// A weapon that can fire immediately.
    pub fn ready(cooldown: f32) -> Self {
        Self { cooldown, since_last_shot: cooldown }
    }

    pub fn can_fire(&self) -> bool {
        self.since_last_shot >= self.cooldown
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub lifetime: f32,
    pub age: f32,
}

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    pub fn circle(&self, transform: &Transform) -> Circle {
        Circle::new(transform.position, self.radius)
    }
}

//=== Level ===============================================================

pub const WALL_MAX_HEALTH: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub health: f32,
    pub destructible: bool,
    pub base_color: Color,
    pub color: Color,
}

impl Wall {
    pub fn destructible() -> Self {
        let color = Color::rgb(200, 150, 150);
        Self { health: WALL_MAX_HEALTH, destructible: true, base_color: color, color }
    }

    pub fn indestructible() -> Self {
        let color = Color::rgb(80, 80, 80);
        Self { health: WALL_MAX_HEALTH, destructible: false, base_color: color, color }
    }

    /// Applies `damage` and tints the wall. Returns true once it breaks.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        if !self.destructible {
            return false;
        }

        self.health -= damage;
        if self.health <= 0.0 {
            return true;
        }

        self.color = self.base_color.scale(self.health / WALL_MAX_HEALTH);
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LandingPad;

/// Marks entities the play scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sprite;

//=== Queries =============================================================

/// World-space boxes of every entity carrying `M` and a collider.
pub fn boxes_of<M: Component>(world: &World) -> Vec<(Entity, Aabb)> {
    world
        .entities_with::<M>()
        .into_iter()
        .filter_map(|e| {
            let transform = world.get::<Transform>(e)?;
            let collider = world.get::<Collider>(e)?;
            Some((e, collider.aabb(transform)))
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collider_box_is_centred() {
        let aabb = Collider::new(30.0, 20.0).aabb(&Transform::at(100.0, 50.0));
        assert_eq!(aabb.min, Vec2::new(85.0, 40.0));
        assert_eq!(aabb.max, Vec2::new(115.0, 60.0));
    }

    #[test]
    fn fresh_weapon_is_ready() {
        let mut weapon = Weapon::ready(0.2);
        assert!(weapon.can_fire());

        weapon.since_last_shot = 0.1;
        assert!(!weapon.can_fire());
    }

    #[test]
    fn indestructible_walls_ignore_damage() {
        let mut wall = Wall::indestructible();
        assert!(!wall.take_damage(1000.0));
        assert_eq!(wall.health, WALL_MAX_HEALTH);
        assert_eq!(wall.color, wall.base_color);
    }

    #[test]
    fn damage_darkens_then_breaks() {
        let mut wall = Wall::destructible();

        assert!(!wall.take_damage(50.0));
        assert_eq!(wall.health, 50.0);
        assert_eq!(wall.color, Color::rgb(100, 75, 75));

        assert!(!wall.take_damage(40.0));
        assert!(wall.take_damage(10.0));
    }

    #[test]
    fn projectile_expires_at_lifetime() {
        let mut shot = Projectile { velocity: Vec2::X, radius: 3.0, damage: 10.0, lifetime: 2.0, age: 1.9 };
        assert!(!shot.is_expired());
        shot.age = 2.0;
        assert!(shot.is_expired());
    }
}
