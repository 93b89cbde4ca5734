//=========================================================================
// Rotorfort: Library Root
//
// A small multithreaded game engine and the helicopter game built on it.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Keep the winit/softbuffer platform layer private
// - Ship the game itself (`game`) and its TOML configuration (`config`)
//
// Typical usage:
// ```no_run
// use rotorfort::config::GameConfig;
// use rotorfort::game::{self, GameAction, GameSceneKey};
// use rotorfort::EngineBuilder;
//
// let config = GameConfig::default();
// EngineBuilder::<GameSceneKey, GameAction>::new()
//     .build()
//     .init(|systems, _ctx| game::install(systems, &config))
//     .run()
//     .unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine systems (input, scenes, ECS, physics, render).
// `game` is Rotorfort itself; `config` loads its settings.
//
pub mod config;
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window, the winit event loop and presentation.
// `engine` wires the platform and the logic thread together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
