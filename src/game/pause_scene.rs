//=========================================================================
// Pause Scene
//=========================================================================
//
// Opaque overlay pushed over Play. Play stops updating but keeps drawing
// underneath; this scene dims it and waits for Pause again.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::{GameAction, GameSceneKey};
use crate::core::globals::GlobalContext;
use crate::core::render::{Color, RenderFrame};
use crate::core::scene::{Scene, SceneTransition};

const DIM: Color = Color::rgba(0, 0, 0, 128);

//=== PauseScene ==========================================================

pub struct PauseScene {
    title: String,
    viewport: Vec2,
}

impl PauseScene {
    /// `title` prefixes the window title while paused.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), viewport: Vec2::new(800.0, 600.0) }
    }
}

impl Scene<GameSceneKey> for PauseScene {
    fn on_enter(&mut self, context: &mut GlobalContext) {
        self.viewport = context.viewport;
        log::info!("Paused");
    }

    fn on_exit(&mut self, _context: &mut GlobalContext) {
        log::info!("Resumed");
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if context.action_pressed(GameAction::Pause) {
            context.request_transition(SceneTransition::Remove(GameSceneKey::Paused));
        }
    }

    fn render(&self, frame: &mut RenderFrame) {
        frame.overlay(DIM);
        frame.text_centered("PAUSED", self.viewport.x / 2.0, self.viewport.y / 2.0 - 14.0, 4, Color::WHITE);
        frame.set_title(format!("{} | Paused", self.title));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
