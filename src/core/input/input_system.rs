//=========================================================================
// Input System
//=========================================================================
//
// Turns a frame of raw input into action events.
//
// Architecture:
//   Vec<Vec<InputEvent>> → StateTracker (raw state)
//                        → ActionMapper  (bindings)
//                        → Vec<ActionEvent<A>> (Pressed / Held / Released)
//
// Pressed and Released come from real transitions seen while the batches
// are applied, so a tap inside a single frame still yields both. Held is
// read from the tracker afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, ActionEvent, ActionPhase, InputContext},
    action_mapper::ActionMapper,
    event::{InputEvent, KeyCode, Modifiers, MouseButton},
    state_tracker::StateTracker,
};

//=== InputSystem =========================================================

/// High-level input processing with action mapping.
///
/// Owned by `GlobalSystems`. Bindings are configured during
/// [`crate::Engine::init`] and resolved every tick.
pub struct InputSystem<A: Action> {
    mapper: ActionMapper<A>,
    actions: Vec<ActionEvent<A>>,
}

impl<A: Action> InputSystem<A> {
    pub(crate) fn new() -> Self {
        Self {
            mapper: ActionMapper::new(),
            actions: Vec::with_capacity(16),
        }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds an unmodified key in the primary context.
    pub fn bind_key(&mut self, key: KeyCode, action: A) {
        self.mapper.bind_key(key, Modifiers::NONE, action, InputContext::Primary);
    }

    /// Binds a key with explicit modifiers and context.
    pub fn bind_key_with(&mut self, key: KeyCode, modifiers: Modifiers, action: A, context: InputContext) {
        self.mapper.bind_key(key, modifiers, action, context);
    }

    /// Binds an unmodified mouse button in the primary context.
    pub fn bind_mouse(&mut self, button: MouseButton, action: A) {
        self.mapper.bind_mouse(button, Modifiers::NONE, action, InputContext::Primary);
    }

    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    pub fn unbind_mouse(&mut self, button: MouseButton, context: InputContext) {
        self.mapper.unbind_mouse(button, context);
    }

    /// Drops every key and mouse binding registered for `context`.
    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    pub fn set_context(&mut self, context: InputContext) {
        self.mapper.set_context(context);
    }

    pub fn current_context(&self) -> InputContext {
        self.mapper.current_context()
    }

    /// Keys bound to `action` in the active context.
    pub fn keys_for(&self, action: A) -> Vec<KeyCode> {
        self.mapper.keys_for(action)
    }

    /// Actions `key` maps to in the active context, whatever the modifiers.
    pub fn actions_for_key(&self, key: KeyCode) -> Vec<A> {
        self.mapper.actions_for_key(key)
    }

    pub fn binding_count(&self) -> usize {
        self.mapper.binding_count()
    }

    //--- Frame Processing -------------------------------------------------

    /// Applies this frame's input batches and computes action events.
    ///
    /// Results are available through [`InputSystem::actions`] until the
    /// next call.
    pub(crate) fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        self.actions.clear();
        state.clear();

        for event in batches.iter().flatten() {
            if !state.apply_event(event) {
                continue;
            }

            let Some(action) = self.mapper.map_event(event) else {
                continue;
            };

            let phase = match event {
                InputEvent::KeyDown { .. } | InputEvent::MouseButtonDown { .. } => ActionPhase::Pressed,
                _ => ActionPhase::Released,
            };
            self.actions.push(ActionEvent::new(action, phase));
        }

        state.finalize_frame();
        self.collect_held(state);

        if !self.actions.is_empty() {
            trace!("Actions this frame: {:?}", self.actions);
        }
    }

    /// Drops held state after focus loss, emitting `Released` for every
    /// action that was held.
    pub(crate) fn release_all(&mut self, state: &mut StateTracker) {
        let held: Vec<A> = self.held_actions(state).into_iter().collect();
        state.release_all();
        self.actions
            .extend(held.into_iter().map(|a| ActionEvent::new(a, ActionPhase::Released)));
    }

    /// Action events computed by the last `process_frame`.
    pub fn actions(&self) -> &[ActionEvent<A>] {
        &self.actions
    }

    //--- Internal Helpers -------------------------------------------------

    fn collect_held(&mut self, state: &StateTracker) {
        let held = self.held_actions(state);
        self.actions
            .extend(held.into_iter().map(|a| ActionEvent::new(a, ActionPhase::Held)));
    }

    fn held_actions(&self, state: &StateTracker) -> Vec<A> {
        let current = state.modifiers();
        let mut seen = HashSet::new();
        let mut held = Vec::new();

        let keys = self
            .mapper
            .active_key_bindings()
            .filter(|&(key, mods, _)| state.is_key_down(key) && modifiers_hold(mods, current))
            .map(|(_, _, action)| action);

        let buttons = self
            .mapper
            .active_mouse_bindings()
            .filter(|&(button, mods, _)| state.is_button_down(button) && modifiers_hold(mods, current))
            .map(|(_, _, action)| action);

        for action in keys.chain(buttons) {
            if seen.insert(action) {
                held.push(action);
            }
        }

        held
    }
}

/// An unmodified binding stays held whatever else is pressed; a modified
/// binding needs its exact modifiers.
fn modifiers_hold(bound: Modifiers, current: Modifiers) -> bool {
    bound.is_empty() || bound == current
}

//=========================================================================
// Unit Tests
//=========================================================================
