//=========================================================================
// ECS
//=========================================================================
//
// Minimal entity-component system.
//
// Components are plain data stored per type in sparse sets. Systems are
// free functions taking `&mut World`; there is no scheduler.
//
//=========================================================================

//=== Module Declarations =================================================

mod entity;
mod storage;
mod world;

//=== Public API ==========================================================

pub use entity::Entity;
pub use storage::{Component, Storage};
pub use world::{EntityBuilder, World};
