//=========================================================================
// Helicopter
//=========================================================================
//
// Flight control, landing and crash detection.
//
// Per tick:
//   steer()      state machine + forces from the held controls
//   integrate    Body velocity, then position (skipped while landed)
//   pad landing  Flying only, gentle descent onto a pad
//   contact      first overlapping wall or pad: rest on top or crash
//   bounds       leaving the world is a crash
//
// State machine:
//   Landed ──Up──► TakingOff ──climbed takeoff_height──► Flying
//     ▲                                                    │
//     └──────────────── safe landing ◄─────────────────────┘
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::components::{
    boxes_of, Collider, Facing, FlightState, Helicopter, LandingPad, Sprite, Transform, Wall, Weapon,
};
use super::events::GameEvent;
use super::{weapons, GameAction};
use crate::config::{GameConfig, HelicopterConfig};
use crate::core::ecs::{Entity, World};
use crate::core::globals::GlobalContext;
use crate::core::message_bus::MessageBus;
use crate::core::physics::{contact_side, Aabb, Body, Side};

/// Spawn height above the pad surface.
const SPAWN_CLEARANCE: f32 = 12.0;

//=== FlightInput =========================================================

/// Held controls for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl FlightInput {
    pub fn from_context(context: &GlobalContext) -> Self {
        Self {
            up: context.action_held(GameAction::Up),
            down: context.action_held(GameAction::Down),
            left: context.action_held(GameAction::Left),
            right: context.action_held(GameAction::Right),
            fire: context.action_held(GameAction::Fire),
        }
    }
}

//=== Spawning ============================================================

/// Spawns a landed helicopter resting above `pad`.
pub fn spawn(world: &mut World, pad: &Aabb, config: &GameConfig) -> Entity {
    let tuning = &config.helicopter;
    let position = Vec2::new(pad.center().x, pad.top() - SPAWN_CLEARANCE);

    let entity = world
        .build_entity()
        .with(Transform { position })
        .with(Body::new(tuning.gravity, tuning.max_speed_x, tuning.max_speed_up, tuning.max_speed_down))
        .with(Collider::new(tuning.width, tuning.height))
        .with(Helicopter::landed())
        .with(Weapon::ready(config.weapon.cooldown))
        .with(Sprite)
        .build();

    info!("Helicopter spawned at ({:.0}, {:.0})", position.x, position.y);
    entity
}

//=== Steering ============================================================

/// What steering asked for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Steering {
    pub took_off: bool,
    pub fire: bool,
}

/// Applies one tick of control to the flight state and body, then moves
/// `position` unless the helicopter is landed.
pub fn steer(
    heli: &mut Helicopter,
    body: &mut Body,
    position: &mut Vec2,
    input: &FlightInput,
    tuning: &HelicopterConfig,
    dt: f32,
) -> Steering {
    let mut steering = Steering::default();

    match heli.state {
        FlightState::Landed => {
            body.stop();
            if input.up {
                heli.state = FlightState::TakingOff;
                heli.takeoff_origin_y = position.y;
                body.velocity.y = -tuning.takeoff_speed;
                steering.took_off = true;
                return steering;
            }
        }
        FlightState::TakingOff => {
            body.velocity.y = -tuning.takeoff_speed;
            if position.y < heli.takeoff_origin_y - tuning.takeoff_height {
                heli.state = FlightState::Flying;
            }
        }
        FlightState::Flying => {
            body.apply_force(Vec2::new(0.0, body.gravity));
            if input.up {
                body.apply_force(Vec2::new(0.0, -tuning.lift_factor * body.gravity));
            }
            if input.down {
                body.apply_force(Vec2::new(0.0, tuning.dive_factor * tuning.base_thrust));
            }
            steering.fire = input.fire;
        }
    }

    let landed = heli.state == FlightState::Landed;
    let thrust = tuning.base_thrust
        * if landed { tuning.landed_steer_factor } else { tuning.airborne_steer_factor };

    if input.left {
        body.apply_force(Vec2::new(-thrust, 0.0));
        heli.facing = Facing::Left;
    }
    if input.right {
        body.apply_force(Vec2::new(thrust, 0.0));
        heli.facing = Facing::Right;
    }

    // Landed steering only turns the helicopter.
    if landed {
        body.force = Vec2::ZERO;
    } else {
        body.integrate(dt);
        *position += body.velocity * dt;
    }

    steering
}

//=== Landing & Contact ===================================================

/// Gentle enough to set down: descending, slow on both axes.
fn is_gentle(velocity: Vec2, tuning: &HelicopterConfig) -> bool {
    velocity.y > 0.0 && velocity.y < tuning.safe_landing_vy && velocity.x.abs() < tuning.safe_landing_vx
}

/// The pad the helicopter can settle onto, if any.
fn landing_pad(heli_box: &Aabb, velocity: Vec2, pads: &[Aabb], tuning: &HelicopterConfig) -> Option<Aabb> {
    if !is_gentle(velocity, tuning) {
        return None;
    }

    let x = heli_box.center().x;
    pads.iter().copied().find(|pad| {
        x >= pad.left() && x <= pad.right() && (heli_box.bottom() - pad.top()).abs() < tuning.pad_snap_distance
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Contact {
    /// Rest on top of the obstacle.
    Land { top: f32 },
    Crash,
}

/// Resolves the first obstacle overlapping the helicopter.
fn contact(heli_box: &Aabb, velocity: Vec2, obstacles: &[Aabb], tuning: &HelicopterConfig) -> Option<Contact> {
    let obstacle = obstacles.iter().find(|o| heli_box.intersects(o))?;

    if contact_side(heli_box, obstacle) == Side::Top && is_gentle(velocity, tuning) {
        Some(Contact::Land { top: obstacle.top() })
    } else {
        Some(Contact::Crash)
    }
}

//=== Update ==============================================================

/// Runs one tick for `entity`.
///
/// Returns the crash site if the helicopter was destroyed this tick; it has
/// then been despawned.
pub fn update(
    world: &mut World,
    entity: Entity,
    input: &FlightInput,
    config: &GameConfig,
    bounds: &Aabb,
    bus: &mut MessageBus,
    dt: f32,
) -> Option<Vec2> {
    let tuning = &config.helicopter;
    let mut heli = *world.get::<Helicopter>(entity)?;
    let mut body = *world.get::<Body>(entity)?;
    let mut position = world.get::<Transform>(entity)?.position;
    let collider = *world.get::<Collider>(entity)?;

    //--- Control ----------------------------------------------------------
    let steering = steer(&mut heli, &mut body, &mut position, input, tuning, dt);
    if steering.took_off {
        debug!("Takeoff from y={:.0}", position.y);
        bus.push(GameEvent::TookOff { position });
    }

    //--- Landing ----------------------------------------------------------
    let pads: Vec<Aabb> = boxes_of::<LandingPad>(world).into_iter().map(|(_, b)| b).collect();
    let mut heli_box = collider.aabb(&Transform { position });

    if heli.state == FlightState::Flying {
        if let Some(pad) = landing_pad(&heli_box, body.velocity, &pads, tuning) {
            settle(&mut heli, &mut body, &mut position, pad.top(), tuning);
            heli_box = collider.aabb(&Transform { position });
            info!("Landed on pad at ({:.0}, {:.0})", position.x, position.y);
            bus.push(GameEvent::Landed { position });
        }
    }

    //--- Obstacles --------------------------------------------------------
    let mut obstacles: Vec<Aabb> = boxes_of::<Wall>(world).into_iter().map(|(_, b)| b).collect();
    obstacles.extend(pads);

    let crashed = match contact(&heli_box, body.velocity, &obstacles, tuning) {
        Some(Contact::Land { top }) => {
            settle(&mut heli, &mut body, &mut position, top, tuning);
            info!("Landed on wall at ({:.0}, {:.0})", position.x, position.y);
            bus.push(GameEvent::Landed { position });
            false
        }
        Some(Contact::Crash) => true,
        None => !bounds.contains_point(position),
    };

    if crashed {
        info!("Helicopter crashed at ({:.0}, {:.0})", position.x, position.y);
        world.despawn(entity);
        bus.push(GameEvent::Crashed { position });
        return Some(position);
    }

    //--- Write back -------------------------------------------------------
    world.insert(entity, heli);
    world.insert(entity, body);
    world.insert(entity, Transform { position });

    if steering.fire {
        weapons::fire(world, entity, heli.facing, &config.weapon, bus);
    }

    None
}

fn settle(heli: &mut Helicopter, body: &mut Body, position: &mut Vec2, top: f32, tuning: &HelicopterConfig) {
    heli.state = FlightState::Landed;
    body.stop();
    position.y = top - tuning.height / 2.0;
}

//=========================================================================
// Unit Tests
//=========================================================================
