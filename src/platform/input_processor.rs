//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into portable InputEvents.
//
// Architecture:
//   WindowEvent → InputProcessor → InputEvent → InputBuffer
//
// State kept between events:
// - the last ModifiersChanged value, stamped onto keys and buttons
// - the window → canvas scale, so cursor positions arrive in the
//   logical viewport the game draws into
//
// OS key repeat and keys the engine has no code for never leave here.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
    /// Logical canvas pixels per physical window pixel.
    cursor_scale: Vec2,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { modifiers: Modifiers::NONE, cursor_scale: Vec2::ONE }
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers::from(state);
    }

    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Recomputes the cursor mapping after a resize.
    pub(crate) fn set_surface_size(&mut self, window: Vec2, canvas: Vec2) {
        if window.x > 0.0 && window.y > 0.0 {
            self.cursor_scale = canvas / window;
        }
    }

    //--- Translation ------------------------------------------------------

    /// `None` for OS repeats and unmapped keys.
    pub(crate) fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        if event.repeat {
            return None;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        match KeyCode::from(code) {
            KeyCode::Unidentified => None,
            key => Some(self.key_transition(key, event.state)),
        }
    }

    pub(crate) fn mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    /// Cursor position converted from window to canvas pixels.
    pub(crate) fn cursor_moved(&self, x: f64, y: f64) -> InputEvent {
        let logical = Vec2::new(x as f32, y as f32) * self.cursor_scale;
        InputEvent::MouseMoved { x: logical.x, y: logical.y }
    }

    fn key_transition(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Keys without an engine counterpart become `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => Self::Digit0, W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2, W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4, W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6, W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8, W::Digit9 => Self::Digit9,

            W::KeyA => Self::KeyA, W::KeyB => Self::KeyB, W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD, W::KeyE => Self::KeyE, W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG, W::KeyH => Self::KeyH, W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ, W::KeyK => Self::KeyK, W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM, W::KeyN => Self::KeyN, W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP, W::KeyQ => Self::KeyQ, W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS, W::KeyT => Self::KeyT, W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV, W::KeyW => Self::KeyW, W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY, W::KeyZ => Self::KeyZ,

            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,

            W::Space => Self::Space,
            W::Enter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,
            W::ShiftLeft => Self::ShiftLeft,
            W::ControlLeft => Self::ControlLeft,

            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        state.set(ModifiersState::SHIFT, shift);
        state.set(ModifiersState::CONTROL, ctrl);
        state.set(ModifiersState::ALT, alt);
        state
    }

    //=====================================================================
    // Modifiers
    //=====================================================================

    #[test]
    fn starts_unmodified() {
        assert!(InputProcessor::new().modifiers().is_empty());
    }

    #[test]
    fn modifiers_stamp_every_transition() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(modifiers(true, false, false));

        let key = processor.key_transition(KeyCode::Space, ElementState::Pressed);
        let button = processor.mouse_button(WinitMouseButton::Left, ElementState::Released);

        assert_eq!(key, InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::SHIFT });
        assert_eq!(
            button,
            InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::SHIFT }
        );
    }

    //=====================================================================
    // Cursor Mapping
    //=====================================================================

    #[test]
    fn cursor_is_scaled_into_canvas_space() {
        let mut processor = InputProcessor::new();
        processor.set_surface_size(Vec2::new(1600.0, 1200.0), Vec2::new(800.0, 600.0));

        match processor.cursor_moved(400.0, 300.0) {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (200.0, 150.0)),
            other => panic!("expected MouseMoved, got {:?}", other),
        }
    }

    #[test]
    fn minimised_window_keeps_previous_scale() {
        let mut processor = InputProcessor::new();
        processor.set_surface_size(Vec2::new(1600.0, 1200.0), Vec2::new(800.0, 600.0));
        processor.set_surface_size(Vec2::ZERO, Vec2::new(800.0, 600.0));

        assert_eq!(processor.cursor_scale, Vec2::splat(0.5));
    }

    //=====================================================================
    // Conversions
    //=====================================================================

    #[test]
    fn game_keys_are_mapped() {
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyP), KeyCode::KeyP);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
    }

    #[test]
    fn exotic_keys_are_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Unidentified);
    }

    #[test]
    fn extra_mouse_buttons_collapse_to_other() {
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle), MouseButton::Middle);
    }
}
