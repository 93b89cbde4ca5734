//=========================================================================
// Input
//=========================================================================
//
// Portable input types, raw state tracking and action mapping.
//
// Architecture:
//   platform → InputEvent batches → InputSystem::process_frame()
//                                     ├─ StateTracker (raw queries)
//                                     └─ ActionMapper → ActionEvent<A>
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
pub mod event;
mod input_system;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, ActionEvent, ActionPhase, InputContext};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_system::InputSystem;
pub use state_tracker::StateTracker;
