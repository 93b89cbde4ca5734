//=========================================================================
// Action Mapper
//=========================================================================
//
// Binding table from raw inputs to game actions.
//
// Architecture:
//   (key/button, modifiers, context) → HashMap → Action
//
// Only bindings in the active context resolve. Modifiers match exactly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::{InputEvent, KeyCode, Modifiers, MouseButton},
};

//=== ActionMapper ========================================================

pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<(KeyCode, Modifiers, InputContext), A>,
    mouse_bindings: HashMap<(MouseButton, Modifiers, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    pub(crate) fn bind_key(&mut self, key: KeyCode, modifiers: Modifiers, action: A, context: InputContext) {
        self.key_bindings.insert((key, modifiers, context), action);
    }

    pub(crate) fn bind_mouse(
        &mut self,
        button: MouseButton,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.mouse_bindings.insert((button, modifiers, context), action);
    }

    /// Removes every binding for `key` in `context`, whatever the modifiers.
    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings.retain(|&(k, _, ctx), _| !(k == key && ctx == context));
    }

    pub(crate) fn unbind_mouse(&mut self, button: MouseButton, context: InputContext) {
        self.mouse_bindings.retain(|&(b, _, ctx), _| !(b == button && ctx == context));
    }

    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, _, ctx), _| ctx != context);
        self.mouse_bindings.retain(|&(_, _, ctx), _| ctx != context);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a discrete down/up event to an action in the active context.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<A> {
        match event {
            InputEvent::KeyDown { key, modifiers } | InputEvent::KeyUp { key, modifiers } => {
                self.map_key(*key, *modifiers)
            }
            InputEvent::MouseButtonDown { button, modifiers }
            | InputEvent::MouseButtonUp { button, modifiers } => self.map_button(*button, *modifiers),
            _ => None,
        }
    }

    pub(crate) fn map_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<A> {
        self.key_bindings.get(&(key, modifiers, self.current_context)).copied()
    }

    pub(crate) fn map_button(&self, button: MouseButton, modifiers: Modifiers) -> Option<A> {
        self.mouse_bindings.get(&(button, modifiers, self.current_context)).copied()
    }

    /// Key bindings of the active context as `(key, modifiers, action)`.
    pub(crate) fn active_key_bindings(&self) -> impl Iterator<Item = (KeyCode, Modifiers, A)> + '_ {
        let context = self.current_context;
        self.key_bindings
            .iter()
            .filter(move |((_, _, ctx), _)| *ctx == context)
            .map(|(&(key, mods, _), &action)| (key, mods, action))
    }

    pub(crate) fn active_mouse_bindings(
        &self,
    ) -> impl Iterator<Item = (MouseButton, Modifiers, A)> + '_ {
        let context = self.current_context;
        self.mouse_bindings
            .iter()
            .filter(move |((_, _, ctx), _)| *ctx == context)
            .map(|(&(button, mods, _), &action)| (button, mods, action))
    }

    /// Every key bound to `action` in the active context.
    pub(crate) fn keys_for(&self, action: A) -> Vec<KeyCode> {
        self.active_key_bindings()
            .filter(|&(_, _, a)| a == action)
            .map(|(key, _, _)| key)
            .collect()
    }

    /// Every action `key` maps to in the active context, across modifiers.
    pub(crate) fn actions_for_key(&self, key: KeyCode) -> Vec<A> {
        let mut actions: Vec<A> = Vec::new();
        for (_, _, action) in self.active_key_bindings().filter(|&(k, _, _)| k == key) {
            if !actions.contains(&action) {
                actions.push(action);
            }
        }
        actions
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }

    pub(crate) fn binding_count(&self) -> usize {
        self.key_bindings.len() + self.mouse_bindings.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Fire,
        Pause,
        Quit,
    }

    impl Action for TestAction {}

    const MENU: InputContext = InputContext::custom(7);

    //=====================================================================
    // Binding
    //=====================================================================

    #[test]
    fn bound_key_maps_on_press_and_release() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Space, Modifiers::NONE, TestAction::Fire, InputContext::Primary);

        assert_eq!(mapper.map_event(&InputEvent::key_down(KeyCode::Space)), Some(TestAction::Fire));
        assert_eq!(mapper.map_event(&InputEvent::key_up(KeyCode::Space)), Some(TestAction::Fire));
        assert_eq!(mapper.map_event(&InputEvent::key_down(KeyCode::KeyQ)), None);
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyQ, Modifiers::CTRL, TestAction::Quit, InputContext::Primary);

        assert_eq!(mapper.map_key(KeyCode::KeyQ, Modifiers::NONE), None);
        assert_eq!(mapper.map_key(KeyCode::KeyQ, Modifiers::CTRL), Some(TestAction::Quit));
        assert_eq!(mapper.actions_for_key(KeyCode::KeyQ), vec![TestAction::Quit]);
    }

    #[test]
    fn several_keys_can_share_an_action() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyP, Modifiers::NONE, TestAction::Pause, InputContext::Primary);
        mapper.bind_key(KeyCode::Escape, Modifiers::NONE, TestAction::Pause, InputContext::Primary);

        let mut keys = mapper.keys_for(TestAction::Pause);
        keys.sort_by_key(|k| format!("{:?}", k));
        assert_eq!(keys, vec![KeyCode::Escape, KeyCode::KeyP]);
    }

    #[test]
    fn mouse_bindings_map_buttons() {
        let mut mapper = ActionMapper::new();
        mapper.bind_mouse(MouseButton::Left, Modifiers::NONE, TestAction::Fire, InputContext::Primary);

        let event = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::NONE };
        assert_eq!(mapper.map_event(&event), Some(TestAction::Fire));
        assert_eq!(mapper.active_mouse_bindings().count(), 1);
    }

    //=====================================================================
    // Contexts
    //=====================================================================

    #[test]
    fn only_active_context_resolves() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Space, Modifiers::NONE, TestAction::Fire, InputContext::Primary);
        mapper.bind_key(KeyCode::Space, Modifiers::NONE, TestAction::Pause, MENU);

        assert_eq!(mapper.map_key(KeyCode::Space, Modifiers::NONE), Some(TestAction::Fire));

        mapper.set_context(MENU);
        assert_eq!(mapper.current_context(), MENU);
        assert_eq!(mapper.map_key(KeyCode::Space, Modifiers::NONE), Some(TestAction::Pause));
    }

    #[test]
    fn unbind_and_clear_context() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Space, Modifiers::NONE, TestAction::Fire, InputContext::Primary);
        mapper.bind_key(KeyCode::Space, Modifiers::SHIFT, TestAction::Quit, InputContext::Primary);
        mapper.bind_key(KeyCode::Escape, Modifiers::NONE, TestAction::Pause, MENU);
        mapper.bind_mouse(MouseButton::Right, Modifiers::NONE, TestAction::Fire, MENU);

        mapper.unbind_key(KeyCode::Space, InputContext::Primary);
        assert_eq!(mapper.binding_count(), 2);

        mapper.clear_context(MENU);
        assert_eq!(mapper.binding_count(), 0);

        mapper.bind_mouse(MouseButton::Left, Modifiers::NONE, TestAction::Fire, InputContext::Primary);
        mapper.unbind_mouse(MouseButton::Left, InputContext::Primary);
        assert_eq!(mapper.binding_count(), 0);
    }
}
