//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene lifecycle and stack-based scene switching.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene<S>>>
//     └─ stack: Vec<S>
//
// Flow:
//   update()  → top scene, then downward until the first opaque scene
//   render()  → every stacked scene, bottom to top
//   process_transitions() → SceneTransition<S> messages in FIFO order
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::render::RenderFrame;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager, SceneTransition};

//=== Scene Trait =========================================================

/// Scene behaviour: lifecycle hooks, per-tick update and drawing.
///
/// Only `update()` is required:
///
/// ```rust
/// # use rotorfort::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct Title {
///     ticks: u64,
/// }
///
/// impl Scene<GameScene> for Title {
///     fn update(&mut self, _context: &mut GlobalContext) {
///         self.ticks += 1;
///     }
///
///     fn render(&self, frame: &mut RenderFrame) {
///         frame.text("ROTORFORT", Vec2::new(10.0, 10.0), 3, Color::WHITE);
///     }
/// }
/// ```
pub trait Scene<S: SceneKey>: Send {
    /// Called when the scene enters the stack.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called when the scene leaves the stack.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext);

    /// Records draw commands. Called every tick for every stacked scene,
    /// including ones whose updates are blocked.
    fn render(&self, _frame: &mut RenderFrame) {}

    /// Whether scenes below this one keep updating.
    fn is_transparent(&self) -> bool {
        false
    }
}
