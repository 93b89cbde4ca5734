//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state with per-frame deltas.
//
// Architecture:
//   InputEvent → process_events() → held sets + frame deltas → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Tracks held keys/buttons (persistent) and pressed/released (one frame).
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,

    //--- Continuous ------------------------------------------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    /// Creates a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears one-frame deltas. Held state survives.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_mouse_position = self.mouse_position;
    }

    /// Applies a batch of events in order.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.apply_event(event);
        }
    }

    /// Computes derived values (mouse delta) after all batches are applied.
    pub(crate) fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    /// Drops all held state. Used when the window loses focus so keys
    /// released elsewhere don't stay stuck down.
    pub(crate) fn release_all(&mut self) {
        self.keys_released.extend(self.keys_down.drain());
        self.buttons_released.extend(self.buttons_down.drain());
        self.modifiers = Modifiers::NONE;
    }

    /// Applies one event. Returns true if it was a real down/up transition.
    pub(crate) fn apply_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // OS key repeat arrives as repeated KeyDown; only the first counts
                let transitioned = self.keys_down.insert(*key);
                if transitioned {
                    self.keys_pressed.insert(*key);
                }
                transitioned
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                let transitioned = self.keys_down.remove(key);
                if transitioned {
                    self.keys_released.insert(*key);
                }
                transitioned
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                let transitioned = self.buttons_down.insert(*button);
                if transitioned {
                    self.buttons_pressed.insert(*button);
                }
                transitioned
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                let transitioned = self.buttons_down.remove(button);
                if transitioned {
                    self.buttons_released.insert(*button);
                }
                transitioned
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
                false
            }
            InputEvent::Unidentified => false,
        }
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// True on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// True on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Cursor movement since the previous frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Modifier state reported with the most recent discrete event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_pressed.iter()
    }

    pub fn keys_released(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_released.iter()
    }

    pub fn buttons_pressed(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_pressed.iter()
    }

    pub fn buttons_released(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_released.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::key_down(key)
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::key_up(key)
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    //=====================================================================
    // Keyboard
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::ArrowUp)]);
        assert!(tracker.is_key_pressed(KeyCode::ArrowUp));
        assert!(tracker.is_key_down(KeyCode::ArrowUp));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::ArrowUp));
        assert!(tracker.is_key_down(KeyCode::ArrowUp));

        frame(&mut tracker, &[key_up(KeyCode::ArrowUp)]);
        assert!(!tracker.is_key_down(KeyCode::ArrowUp));
        assert!(tracker.is_key_released(KeyCode::ArrowUp));
    }

    #[test]
    fn fast_tap_registers_press_and_release() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::Space), key_up(KeyCode::Space)]);
        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn repeated_key_down_does_not_retrigger_press() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyR)]);
        frame(&mut tracker, &[key_down(KeyCode::KeyR)]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyR));
        assert!(tracker.is_key_down(KeyCode::KeyR));
    }

    #[test]
    fn key_up_without_key_down_is_ignored() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::ArrowLeft), key_down(KeyCode::Space)]);

        tracker.clear();
        tracker.release_all();

        assert_eq!(tracker.keys_down().count(), 0);
        assert!(tracker.is_key_released(KeyCode::ArrowLeft));
        assert!(tracker.is_key_released(KeyCode::Space));
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn mouse_delta_tracks_movement_between_frames() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        assert_eq!(tracker.mouse_delta(), (10.0, 20.0));

        frame(&mut tracker, &[InputEvent::MouseMoved { x: 15.0, y: 18.0 }]);
        assert_eq!(tracker.mouse_position(), (15.0, 18.0));
        assert_eq!(tracker.mouse_delta(), (5.0, -2.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn mouse_buttons_follow_key_semantics() {
        let mut tracker = StateTracker::new();
        let down = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::CTRL };

        frame(&mut tracker, &[down]);
        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));
        assert_eq!(tracker.modifiers(), Modifiers::CTRL);

        let up = InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE };
        frame(&mut tracker, &[up]);
        assert!(tracker.is_button_released(MouseButton::Left));
        assert!(!tracker.is_button_down(MouseButton::Left));
    }
}
