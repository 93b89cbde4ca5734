//=========================================================================
// Drawing
//=========================================================================
//
// Turns game state into RenderFrame commands. World-space positions go
// through the camera; HUD and banners are in screen space.
//
// The helicopter is built from rectangles on a 64x32 sprite grid centred
// on its position. It faces right; facing left mirrors every part.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::components::Facing;
use crate::core::camera::Camera;
use crate::core::particles::ParticlePool;
use crate::core::physics::Aabb;
use crate::core::render::{Color, RenderFrame};

//=== Palette =============================================================

pub const SKY: Color = Color::rgb(135, 206, 235);
const PAD: Color = Color::rgb(0, 255, 0);
const HULL: Color = Color::rgb(50, 50, 50);
const COCKPIT: Color = Color::rgb(100, 149, 237);
const ROTOR: Color = Color::rgb(169, 169, 169);
const GEAR: Color = Color::rgb(128, 128, 128);
const SHOT_RING: Color = Color::rgb(255, 200, 0);

const WALL_OUTLINE: u32 = 2;
const WALL_OUTLINE_DARKEN: u8 = 30;

//=== Helicopter Sprite ===================================================

const SPRITE_SIZE: Vec2 = Vec2::new(64.0, 32.0);

/// (x, y, w, h, colour) on the sprite grid, facing right.
const HELICOPTER_PARTS: [(f32, f32, f32, f32, Color); 7] = [
    (16.0, 8.0, 32.0, 16.0, HULL),
    (40.0, 10.0, 8.0, 8.0, COCKPIT),
    (8.0, 4.0, 48.0, 2.0, ROTOR),
    (8.0, 12.0, 8.0, 4.0, HULL),
    (4.0, 10.0, 2.0, 8.0, ROTOR),
    (20.0, 24.0, 4.0, 4.0, GEAR),
    (40.0, 24.0, 4.0, 4.0, GEAR),
];

//=== World ===============================================================

pub fn wall(frame: &mut RenderFrame, camera: &Camera, bounds: &Aabb, color: Color) {
    let min = camera.world_to_screen(bounds.min);
    frame.fill_rect(min, bounds.size(), color);
    frame.stroke_rect(min, bounds.size(), WALL_OUTLINE, color.darken(WALL_OUTLINE_DARKEN));
}

/// Green slab with a white "H".
pub fn pad(frame: &mut RenderFrame, camera: &Camera, bounds: &Aabb) {
    let min = camera.world_to_screen(bounds.min);
    let size = bounds.size();
    frame.fill_rect(min, size, PAD);

    let stroke = (size.x * 0.1).max(2.0) as u32;
    let left = min.x + size.x * 0.2;
    let right = min.x + size.x * 0.8;
    let top = min.y + size.y * 0.2;
    let bottom = min.y + size.y * 0.8;
    let middle = min.y + size.y * 0.5;

    frame.line(Vec2::new(left, top), Vec2::new(left, bottom), stroke, Color::WHITE);
    frame.line(Vec2::new(right, top), Vec2::new(right, bottom), stroke, Color::WHITE);
    frame.line(Vec2::new(left, middle), Vec2::new(right, middle), stroke, Color::WHITE);
}

pub fn helicopter(frame: &mut RenderFrame, camera: &Camera, position: Vec2, facing: Facing) {
    let origin = camera.world_to_screen(position) - SPRITE_SIZE / 2.0;

    for (x, y, w, h, color) in HELICOPTER_PARTS {
        let x = match facing {
            Facing::Right => x,
            Facing::Left => SPRITE_SIZE.x - x - w,
        };
        frame.fill_rect(origin + Vec2::new(x, y), Vec2::new(w, h), color);
    }
}

pub fn projectile(frame: &mut RenderFrame, camera: &Camera, position: Vec2, radius: f32) {
    let center = camera.world_to_screen(position);
    frame.fill_circle(center, radius, Color::YELLOW);
    frame.stroke_circle(center, radius + 1.0, 1, SHOT_RING);
}

pub fn particles(frame: &mut RenderFrame, camera: &Camera, pool: &ParticlePool) {
    for particle in pool.iter() {
        if !camera.in_view(particle.position, particle.size) {
            continue;
        }
        let color = particle.color.with_alpha(particle.alpha());
        frame.fill_circle(camera.world_to_screen(particle.position), particle.size, color);
    }
}

//=== Screen ==============================================================

pub fn hud(frame: &mut RenderFrame, state: &str, score: u32) {
    frame.text(format!("WALLS: {}", score), Vec2::new(10.0, 10.0), 2, Color::WHITE);
    frame.text(state, Vec2::new(10.0, 30.0), 2, Color::WHITE);
}

pub fn game_over(frame: &mut RenderFrame, viewport: Vec2, reason: &str) {
    let center = viewport / 2.0;
    frame.text_centered(reason, center.x, center.y - 12.0, 3, Color::RED);
    frame.text_centered("PRESS R TO RESTART", center.x, center.y + 40.0, 2, Color::WHITE);
}

//=========================================================================
// Unit Tests
//=========================================================================
