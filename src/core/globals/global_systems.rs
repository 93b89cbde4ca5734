//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input, manage scenes, and coordinate
// game logic. Systems operate on GlobalContext data.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{Action, ActionEvent, InputSystem};
use crate::core::render::RenderFrame;
use crate::core::scene::{SceneKey, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// - `input`: action bindings and per-tick action events
/// - `scene_manager`: stack-based scene lifecycle
pub struct GlobalSystems<S: SceneKey, A: Action> {
    pub input: InputSystem<A>,
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey, A: Action> GlobalSystems<S, A> {
    /// Created by the engine. Configure it through [`crate::Engine::init`].
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick of engine systems.
    ///
    /// 1. **Input**: apply this tick's batches, compute action events
    /// 2. **Actions**: replace last tick's action events on the bus
    /// 3. **Scenes**: update active scenes
    /// 4. **Transitions**: apply queued scene transitions
    pub(crate) fn update(&mut self, context: &mut GlobalContext) {
        // 1. Input
        let batches = std::mem::take(&mut context.frame_input_events);
        self.input.process_frame(&mut context.input_state, &batches);
        if std::mem::take(&mut context.focus_lost) {
            self.input.release_all(&mut context.input_state);
        }

        // 2. Actions
        context.message_bus.clear::<ActionEvent<A>>();
        for event in self.input.actions() {
            context.message_bus.push(*event);
        }

        // 3. Scenes
        self.scene_manager.update(context);

        // 4. Transitions
        self.scene_manager.process_transitions(context);
    }

    /// Records this tick's frame from every stacked scene.
    pub(crate) fn render(&self, frame: &mut RenderFrame) {
        self.scene_manager.render(frame);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
