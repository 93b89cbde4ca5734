//=========================================================================
// Play Scene
//=========================================================================
//
// One round of Rotorfort: fly, shoot walls, don't crash.
//
// Update order:
//   pause check → weapon cooldowns → helicopter → camera
//     → projectiles → particles → GameEvent effects
//
// After a crash only particles run until Restart regenerates the level
// with the next seed.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use super::components::{boxes_of, Helicopter, LandingPad, Projectile, Transform, Wall};
use super::events::GameEvent;
use super::helicopter::{self, FlightInput};
use super::level::{self, Level};
use super::{draw, weapons, GameAction, GameSceneKey};
use crate::config::GameConfig;
use crate::core::camera::Camera;
use crate::core::ecs::{Entity, World};
use crate::core::globals::GlobalContext;
use crate::core::particles::{Burst, ParticlePool};
use crate::core::physics::Aabb;
use crate::core::render::{Color, RenderFrame};
use crate::core::scene::{Scene, SceneTransition};

pub const CRASH_REASON: &str = "HELICOPTER CRASHED!";

//=== Effects =============================================================

const CHIPS: Burst = Burst {
    count: 5,
    speed: 40.0..120.0,
    lifetime: 0.2..0.5,
    size: 1.0..2.5,
    color: Color::rgb(200, 150, 150),
};

const SPARKS: Burst = Burst {
    count: 4,
    speed: 60.0..140.0,
    lifetime: 0.1..0.3,
    size: 1.0..2.0,
    color: Color::rgb(255, 230, 120),
};

const RUBBLE: Burst = Burst {
    count: 20,
    speed: 60.0..200.0,
    lifetime: 0.4..1.0,
    size: 2.0..4.0,
    color: Color::rgb(200, 150, 150),
};

const FIREBALL: Burst = Burst {
    count: 40,
    speed: 80.0..260.0,
    lifetime: 0.5..1.5,
    size: 2.0..5.0,
    color: Color::ORANGE,
};

//=== PlayScene ===========================================================

pub struct PlayScene {
    config: GameConfig,
    world: World,
    level: Option<Level>,
    helicopter: Option<Entity>,
    camera: Camera,
    particles: ParticlePool,
    /// Visual randomness only; levels are seeded separately.
    effects_rng: StdRng,
    score: u32,
    game_over: Option<&'static str>,
}

impl PlayScene {
    pub fn new(config: GameConfig) -> Self {
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let bounds = Aabb::new(Vec2::ZERO, Vec2::new(config.world.width as f32, config.world.height as f32));

        Self {
            camera: Camera::new(viewport, bounds, config.camera.lerp_speed),
            particles: ParticlePool::new(config.particles.capacity),
            effects_rng: StdRng::seed_from_u64(config.world.seed),
            config,
            world: World::new(),
            level: None,
            helicopter: None,
            score: 0,
            game_over: None,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Walls destroyed this round.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seed(&self) -> Option<u64> {
        self.level.as_ref().map(|level| level.seed)
    }

    pub fn game_over(&self) -> Option<&'static str> {
        self.game_over
    }

    pub fn helicopter(&self) -> Option<&Helicopter> {
        self.helicopter.and_then(|e| self.world.get::<Helicopter>(e))
    }

    pub fn helicopter_position(&self) -> Option<Vec2> {
        self.helicopter.and_then(|e| self.world.get::<Transform>(e)).map(|t| t.position)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    //--- Rounds -----------------------------------------------------------

    fn start_round(&mut self, seed: u64) {
        self.world.clear();
        self.particles.clear();
        self.score = 0;
        self.game_over = None;

        let level = level::generate(&mut self.world, &self.config.world, seed);
        self.camera = Camera::new(self.camera.viewport, level.bounds, self.config.camera.lerp_speed);

        let pad = level
            .pads
            .first()
            .and_then(|&pad| boxes_of::<LandingPad>(&self.world).into_iter().find(|(e, _)| *e == pad))
            .map(|(_, bounds)| bounds);

        self.helicopter = pad.map(|pad| helicopter::spawn(&mut self.world, &pad, &self.config));
        match self.helicopter_position() {
            Some(position) => self.camera.snap_to(position),
            None => warn!("No landing pad available, round starts without a helicopter"),
        }

        info!("Round started (seed: {})", seed);
        self.level = Some(level);
    }

    fn restart(&mut self) {
        let seed = self.seed().map_or(self.config.world.seed, |seed| seed.wrapping_add(1));
        info!("Restarting with seed {}", seed);
        self.start_round(seed);
    }

    fn crash(&mut self) {
        self.helicopter = None;
        self.game_over = Some(CRASH_REASON);
        info!("Game over: {} (walls destroyed: {})", CRASH_REASON, self.score);
    }

    //--- Effects ----------------------------------------------------------

    fn play_effects(&mut self, events: &[GameEvent]) {
        for event in events {
            let burst = match event {
                GameEvent::WallHit { destructible: true, .. } => &CHIPS,
                GameEvent::WallHit { destructible: false, .. } => &SPARKS,
                GameEvent::WallDestroyed { .. } => &RUBBLE,
                GameEvent::Crashed { .. } => &FIREBALL,
                GameEvent::ShotFired { .. } | GameEvent::Landed { .. } | GameEvent::TookOff { .. } => continue,
            };
            self.particles.burst(event.position(), burst, &mut self.effects_rng);
        }
    }

    fn status(&self) -> &'static str {
        match (self.game_over, self.helicopter()) {
            (Some(_), _) | (None, None) => "Crashed",
            (None, Some(heli)) => heli.state.label(),
        }
    }
}

//=== Scene ===============================================================

impl Scene<GameSceneKey> for PlayScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.camera.viewport = context.viewport;
        if self.level.is_none() {
            self.start_round(self.config.world.seed);
        }
    }

    fn update(&mut self, context: &mut GlobalContext) {
        let dt = context.delta_time;

        if context.action_pressed(GameAction::Pause) {
            context.request_transition(SceneTransition::Push(GameSceneKey::Paused));
            return;
        }

        if self.game_over.is_some() {
            self.particles.update(dt);
            if context.action_pressed(GameAction::Restart) {
                self.restart();
            }
            return;
        }

        weapons::advance_cooldowns(&mut self.world, dt);

        let bounds = self.level.as_ref().map(|level| level.bounds);
        if let (Some(entity), Some(bounds)) = (self.helicopter, bounds) {
            let input = FlightInput::from_context(context);
            let crashed = helicopter::update(
                &mut self.world,
                entity,
                &input,
                &self.config,
                &bounds,
                &mut context.message_bus,
                dt,
            );

            match crashed {
                Some(_) => self.crash(),
                None => {
                    if let Some(position) = self.helicopter_position() {
                        self.camera.follow(position, dt);
                    }
                }
            }
        }

        self.score += weapons::update_projectiles(&mut self.world, &mut context.message_bus, dt);
        self.particles.update(dt);

        let events = context.message_bus.drain::<GameEvent>();
        self.play_effects(&events);
    }

    fn render(&self, frame: &mut RenderFrame) {
        frame.set_clear(draw::SKY);

        for (entity, bounds) in boxes_of::<Wall>(&self.world) {
            if let Some(wall) = self.world.get::<Wall>(entity) {
                if self.camera.aabb_in_view(&bounds) {
                    draw::wall(frame, &self.camera, &bounds, wall.color);
                }
            }
        }

        for (_, bounds) in boxes_of::<LandingPad>(&self.world) {
            if self.camera.aabb_in_view(&bounds) {
                draw::pad(frame, &self.camera, &bounds);
            }
        }

        if let Some(projectiles) = self.world.storage::<Projectile>() {
            for (entity, projectile) in projectiles.iter() {
                if let Some(transform) = self.world.get::<Transform>(entity) {
                    draw::projectile(frame, &self.camera, transform.position, projectile.radius);
                }
            }
        }

        if let (Some(heli), Some(position)) = (self.helicopter(), self.helicopter_position()) {
            draw::helicopter(frame, &self.camera, position, heli.facing);
        }

        draw::particles(frame, &self.camera, &self.particles);
        draw::hud(frame, self.status(), self.score);

        if let Some(reason) = self.game_over {
            draw::game_over(frame, self.camera.viewport, reason);
        }

        frame.set_title(format!(
            "{} | {} | Walls destroyed: {}",
            self.config.window.title,
            self.status(),
            self.score
        ));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
