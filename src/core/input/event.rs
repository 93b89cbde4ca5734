//=========================================================================
// Input Event Types
//
// Portable keyboard and mouse events produced by the platform layer and
// consumed by the StateTracker on the logic thread.
//
// Event Flow:
// ```text
// winit WindowEvent
//         ↓
//    InputProcessor (platform)
//         ↓
//    InputEvent (this module)  ── crossbeam ──►  StateTracker
//                                                    ↓
//                                               ActionEvent<A>
// ```
//
// `KeyCode` deserializes from its variant name so control bindings can be
// written directly in the TOML config (`fire = "Space"`).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== External Crates =====================================================

use serde::Deserialize;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier (layout independent).
///
/// Only the keys a keyboard-driven 2D game plausibly binds are listed.
/// Anything else reaching the platform layer becomes `Unidentified` and is
/// filtered before it crosses the thread boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ControlLeft,

    /// Fallback for keys the platform reports but the engine doesn't map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state attached to discrete events.
///
/// Bindings match modifiers exactly: a binding on `Space` does not fire
/// for `Shift+Space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only (Command on macOS).
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only (Option on macOS).
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Returns true if no modifier is held.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// Equality compares type, key/button and modifiers. `MouseMoved` events
/// are always equal to each other so the platform buffer can coalesce
/// them (last position wins).
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },
    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },
    Unidentified,
}

impl InputEvent {
    /// Shorthand for an unmodified key press.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key, modifiers: Modifiers::NONE }
    }

    /// Shorthand for an unmodified key release.
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp { key, modifiers: Modifiers::NONE }
    }

    /// Returns true for events whose ordering matters (keys and buttons).
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { .. }
                | Self::KeyUp { .. }
                | Self::MouseButtonDown { .. }
                | Self::MouseButtonUp { .. }
        )
    }
}

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

// Must agree with PartialEq: coordinates are never hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // Equality & Hashing
    //=====================================================================

    #[test]
    fn key_events_compare_key_and_modifiers() {
        assert_eq!(InputEvent::key_down(KeyCode::Space), InputEvent::key_down(KeyCode::Space));
        assert_ne!(InputEvent::key_down(KeyCode::Space), InputEvent::key_up(KeyCode::Space));

        let shifted = InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::SHIFT };
        assert_ne!(shifted, InputEvent::key_down(KeyCode::Space));
    }

    #[test]
    fn mouse_moves_are_equal_regardless_of_position() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn hashset_coalesces_mouse_moves() {
        let mut set = HashSet::new();
        set.insert(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        set.replace(InputEvent::MouseMoved { x: 20.0, y: 30.0 });
        assert_eq!(set.len(), 1);

        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (20.0, 30.0)),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn discrete_classification() {
        assert!(InputEvent::key_down(KeyCode::KeyA).is_discrete());
        assert!(InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE }
            .is_discrete());
        assert!(!InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_discrete());
        assert!(!InputEvent::Unidentified.is_discrete());
    }

    //=====================================================================
    // Deserialization
    //=====================================================================

    #[test]
    fn key_code_deserializes_from_variant_name() {
        #[derive(Deserialize)]
        struct Binding {
            key: KeyCode,
        }

        let parsed: Binding = toml::from_str("key = \"ArrowUp\"").unwrap();
        assert_eq!(parsed.key, KeyCode::ArrowUp);

        let bad: Result<Binding, _> = toml::from_str("key = \"NotAKey\"");
        assert!(bad.is_err());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::CTRL.is_empty());
    }
}
