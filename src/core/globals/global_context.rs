//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - delta_time / tick: fixed-step timing
// - input_state: low-level input state (keys, mouse, modifiers)
// - message_bus: actions, scene transitions, game events
// - viewport: logical screen size in pixels
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::input::{Action, ActionEvent, ActionPhase, InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;
use crate::core::scene::{SceneKey, SceneTransition};

//=== QuitRequested =======================================================

/// Published by a scene to stop the engine at the end of the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitRequested;

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` during their lifecycle methods.
/// Engine systems live separately in [`super::GlobalSystems`].
pub struct GlobalContext {
    /// Fixed timestep in seconds (`1 / tps`).
    pub delta_time: f32,

    /// Ticks completed since the engine started.
    pub tick: u64,

    /// Raw input state for low-level queries. For bindings use the
    /// action helpers below.
    pub input_state: StateTracker,

    /// Per-type message queues shared by systems and scenes.
    pub message_bus: MessageBus,

    /// Logical viewport size in pixels.
    pub viewport: Vec2,

    /// Input batches received this tick, consumed by the InputSystem.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,

    /// Set when the window lost focus since the last tick.
    pub(crate) focus_lost: bool,
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalContext {
    pub(crate) fn new() -> Self {
        Self {
            delta_time: 1.0 / 60.0,
            tick: 0,
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            viewport: Vec2::new(800.0, 600.0),
            frame_input_events: Vec::new(),
            focus_lost: false,
        }
    }

    //--- Actions ----------------------------------------------------------

    /// A bound key for `action` went down this tick.
    pub fn action_pressed<A: Action>(&self, action: A) -> bool {
        self.has_action(action, ActionPhase::Pressed)
    }

    /// A bound key for `action` is down.
    pub fn action_held<A: Action>(&self, action: A) -> bool {
        self.has_action(action, ActionPhase::Held)
    }

    /// A bound key for `action` went up this tick.
    pub fn action_released<A: Action>(&self, action: A) -> bool {
        self.has_action(action, ActionPhase::Released)
    }

    fn has_action<A: Action>(&self, action: A, phase: ActionPhase) -> bool {
        self.message_bus
            .read::<ActionEvent<A>>()
            .contains(&ActionEvent::new(action, phase))
    }

    //--- Scene Flow -------------------------------------------------------

    /// Queues a scene transition, applied after this tick's updates.
    pub fn request_transition<S: SceneKey>(&mut self, transition: SceneTransition<S>) {
        self.message_bus.push(transition);
    }

    /// Asks the engine to stop after this tick.
    pub fn request_quit(&mut self) {
        self.message_bus.push(QuitRequested);
    }

    pub fn quit_requested(&self) -> bool {
        self.message_bus.has_messages::<QuitRequested>()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
