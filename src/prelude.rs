//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use rotorfort::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::PlatformError;

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Action, InputContext, KeyCode, Modifiers, MouseButton};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneTransition};

// Message bus
pub use crate::core::message_bus::MessageBus;

// Rendering
pub use crate::core::render::{Color, RenderFrame};

// Math
pub use glam::Vec2;
