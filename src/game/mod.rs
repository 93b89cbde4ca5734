//=========================================================================
// Rotorfort
//=========================================================================
//
// Helicopter game built on the engine: fly through a generated fortress,
// land on pads, shoot down destructible walls.
//
// Architecture:
//   install()
//     ├─ bind_controls()   [controls] keys → GameAction
//     ├─ PlayScene         default scene, owns the ECS world
//     └─ PauseScene        opaque overlay
//
//=========================================================================

//=== Module Declarations =================================================

pub mod components;
pub mod draw;
pub mod events;
pub mod helicopter;
pub mod level;
mod pause_scene;
mod play_scene;
pub mod weapons;

//=== Internal Dependencies ===============================================

use log::info;

use crate::config::{ControlsConfig, GameConfig};
use crate::core::input::{Action, InputSystem, KeyCode};
use crate::core::scene::SceneKey;
use crate::core::GlobalSystems;

//=== Public API ==========================================================

pub use events::GameEvent;
pub use pause_scene::PauseScene;
pub use play_scene::{PlayScene, CRASH_REASON};

//=== Keys ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
    Restart,
}

impl Action for GameAction {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSceneKey {
    Play,
    Paused,
}

impl SceneKey for GameSceneKey {}

//=== Setup ===============================================================

/// Binds every configured key. A key listed twice keeps its last action.
pub fn bind_controls(input: &mut InputSystem<GameAction>, controls: &ControlsConfig) {
    let bindings: [(&[KeyCode], GameAction); 7] = [
        (&controls.up, GameAction::Up),
        (&controls.down, GameAction::Down),
        (&controls.left, GameAction::Left),
        (&controls.right, GameAction::Right),
        (&controls.fire, GameAction::Fire),
        (&controls.pause, GameAction::Pause),
        (&controls.restart, GameAction::Restart),
    ];

    for (keys, action) in bindings {
        for &key in keys {
            input.bind_key(key, action);
        }
    }
}

/// Binds controls and registers both scenes, Play first.
pub fn install(systems: &mut GlobalSystems<GameSceneKey, GameAction>, config: &GameConfig) {
    bind_controls(&mut systems.input, &config.controls);

    systems
        .scene_manager
        .register_default(GameSceneKey::Play, PlayScene::new(config.clone()));
    systems
        .scene_manager
        .register_scene(GameSceneKey::Paused, PauseScene::new(config.window.title.clone()));

    info!("Installed {} key bindings", systems.input.binding_count());
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_controls_bind_eight_keys() {
        let mut input = InputSystem::<GameAction>::new();
        bind_controls(&mut input, &ControlsConfig::default());

        assert_eq!(input.binding_count(), 8);
        assert_eq!(input.actions_for_key(KeyCode::Escape), vec![GameAction::Pause]);
        assert_eq!(input.actions_for_key(KeyCode::Space), vec![GameAction::Fire]);
    }

    #[test]
    fn custom_controls_replace_defaults() {
        let controls = ControlsConfig {
            up: vec![KeyCode::KeyW],
            fire: vec![KeyCode::ControlLeft, KeyCode::KeyJ],
            ..ControlsConfig::default()
        };
        let mut input = InputSystem::<GameAction>::new();
        bind_controls(&mut input, &controls);

        assert_eq!(input.actions_for_key(KeyCode::KeyW), vec![GameAction::Up]);
        assert!(input.actions_for_key(KeyCode::ArrowUp).is_empty());
        assert_eq!(input.keys_for(GameAction::Fire).len(), 2);
    }

    #[test]
    fn install_registers_both_scenes() {
        let mut systems = GlobalSystems::<GameSceneKey, GameAction>::new();
        install(&mut systems, &GameConfig::default());

        assert!(systems.scene_manager.is_registered(GameSceneKey::Play));
        assert!(systems.scene_manager.is_registered(GameSceneKey::Paused));
        assert!(systems.input.binding_count() > 0);
    }
}
