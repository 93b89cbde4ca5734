//=========================================================================
// Weapons & Destruction
//=========================================================================
//
// Per tick:
//   advance_cooldowns()   every Weapon's shot timer
//   fire()                on request, if the cooldown allows
//   update_projectiles()  move, age, expire, then hit walls or pads
//
// A projectile dies on its first hit. Destructible walls lose health and
// darken; at zero health they are despawned.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::debug;

//=== Internal Dependencies ===============================================

use super::components::{boxes_of, Facing, LandingPad, Projectile, Transform, Wall, Weapon};
use super::events::GameEvent;
use crate::config::WeaponConfig;
use crate::core::ecs::{Entity, World};
use crate::core::message_bus::MessageBus;
use crate::core::physics::Aabb;

//=== Cooldowns ===========================================================

pub fn advance_cooldowns(world: &mut World, dt: f32) {
    if let Some(weapons) = world.storage_mut::<Weapon>() {
        for (_, weapon) in weapons.iter_mut() {
            weapon.since_last_shot += dt;
        }
    }
}

//=== Firing ==============================================================

/// Fires `shooter`'s weapon toward `facing`. `None` while it cools down.
pub fn fire(
    world: &mut World,
    shooter: Entity,
    facing: Facing,
    tuning: &WeaponConfig,
    bus: &mut MessageBus,
) -> Option<Entity> {
    let origin = world.get::<Transform>(shooter)?.position;
    let weapon = world.get_mut::<Weapon>(shooter)?;
    if !weapon.can_fire() {
        return None;
    }
    weapon.since_last_shot = 0.0;

    let direction = facing.sign();
    let muzzle = origin + Vec2::new(direction * tuning.muzzle_offset, 0.0);
    let projectile = world
        .build_entity()
        .with(Transform { position: muzzle })
        .with(Projectile {
            velocity: Vec2::new(direction * tuning.projectile_speed, 0.0),
            radius: tuning.projectile_radius,
            damage: tuning.damage,
            lifetime: tuning.projectile_lifetime,
            age: 0.0,
        })
        .build();

    bus.push(GameEvent::ShotFired { position: muzzle });
    Some(projectile)
}

//=== Projectiles =========================================================

/// Advances every projectile and resolves its hits.
///
/// Returns how many walls were destroyed.
pub fn update_projectiles(world: &mut World, bus: &mut MessageBus, dt: f32) -> u32 {
    let mut walls = boxes_of::<Wall>(world);
    let pads = boxes_of::<LandingPad>(world);
    let mut destroyed = 0;

    for shot in world.entities_with::<Projectile>() {
        let Some((bounds, damage)) = advance(world, shot, dt) else {
            world.despawn(shot);
            continue;
        };

        if let Some(index) = walls.iter().position(|(_, wall)| wall.intersects(&bounds)) {
            let (wall, wall_box) = walls[index];
            world.despawn(shot);

            if hit_wall(world, wall, damage, wall_box.center(), bus) {
                walls.swap_remove(index);
                destroyed += 1;
            }
            continue;
        }

        if pads.iter().any(|(_, pad)| pad.intersects(&bounds)) {
            world.despawn(shot);
        }
    }

    destroyed
}

/// Moves and ages one projectile, returning its bounds and damage.
/// `None` once it has expired.
fn advance(world: &mut World, shot: Entity, dt: f32) -> Option<(Aabb, f32)> {
    let projectile = world.get_mut::<Projectile>(shot)?;
    projectile.age += dt;
    let projectile = *projectile;
    if projectile.is_expired() {
        return None;
    }

    let transform = world.get_mut::<Transform>(shot)?;
    transform.position += projectile.velocity * dt;
    Some((projectile.circle(transform).bounds(), projectile.damage))
}

/// Returns true if the wall broke.
fn hit_wall(world: &mut World, wall: Entity, damage: f32, position: Vec2, bus: &mut MessageBus) -> bool {
    let Some(state) = world.get_mut::<Wall>(wall) else {
        return false;
    };
    let destructible = state.destructible;
    let broken = state.take_damage(damage);

    bus.push(GameEvent::WallHit { position, destructible });
    if broken {
        world.despawn(wall);
        bus.push(GameEvent::WallDestroyed { position });
        debug!("Wall destroyed at ({:.0}, {:.0})", position.x, position.y);
    }
    broken
}

//=========================================================================
// Unit Tests
//=========================================================================
