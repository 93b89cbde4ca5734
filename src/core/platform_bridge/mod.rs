//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with core systems.
//
// Components:
// - `interface`: event types and error definitions (the contract)
// - `event_collector`: core-side event collection and buffering
//
// Frames travel the other way as plain `RenderFrame` values.
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub use interface::PlatformError;
pub(crate) use interface::PlatformEvent;
