//=========================================================================
// Engine
//=========================================================================
//
// Builder and runtime entry point.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                                                │
//         ├─ with_tps()                                    ├─ spawns the core thread
//         ├─ with_channel_capacity()                       ├─ runs the platform loop
//         └─ with_window()                                 └─ joins on exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use crossbeam_channel::bounded;
use glam::Vec2;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;
use crate::core::render::RenderFrame;
use crate::core::{Action, CoreSystemsOrchestrator, GlobalContext, GlobalSystems, SceneKey};
use crate::platform::{Platform, WindowSettings};

/// Frames in flight between the core thread and the platform.
const FRAME_QUEUE_DEPTH: usize = 2;

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 platform events
/// - **Window**: "Rotorfort", 800x600 logical pixels
///
/// # Examples
///
/// ```no_run
/// use rotorfort::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Main }
/// impl SceneKey for Screen {}
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Control { Jump }
/// impl Action for Control {}
///
/// let result = EngineBuilder::<Screen, Control>::new()
///     .with_tps(120.0)
///     .with_window("Demo", 640, 480)
///     .build()
///     .init(|systems, _ctx| {
///         systems.input.bind_key(KeyCode::Space, Control::Jump);
///     })
///     .run();
/// ```
pub struct EngineBuilder<S: SceneKey, A: Action> {
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
    _phantom: PhantomData<(S, A)>,
}

impl<S: SceneKey, A: Action> EngineBuilder<S, A> {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowSettings { title: "Rotorfort".to_string(), width: 800, height: 600 },
            _phantom: PhantomData,
        }
    }

    /// Sets the logic rate. The timestep is `1 / tps`.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the platform → core queue size.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the window title and the logical canvas size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window dimensions must be positive, got {}x{}", width, height);
        self.window = WindowSettings { title: title.into(), width, height };
        self
    }

    pub fn build(self) -> Engine<S, A> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        let viewport = Vec2::new(self.window.width as f32, self.window.height as f32);
        Engine {
            orchestrator: CoreSystemsOrchestrator::new(viewport),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<S: SceneKey, A: Action> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, SceneManager, scenes
///   │
///   └─► Platform (Event Loop)
///         └─► Window, input polling, presentation
///
/// Platform → Core: bounded(channel_capacity) PlatformEvent
/// Core → Platform: bounded(2) RenderFrame
/// ```
pub struct Engine<S: SceneKey, A: Action> {
    orchestrator: CoreSystemsOrchestrator<S, A>,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl<S: SceneKey, A: Action> Engine<S, A> {
    //--- Initialization ---------------------------------------------------

    /// Configures bindings, scenes and context state before running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<S, A>, &mut GlobalContext),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        info!("Engine initialization complete");
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the game stops itself.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the input and frame channels
    /// 2. Spawns the logic thread
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the logic thread
    ///
    /// # Errors
    ///
    /// Returns the platform's error if the event loop or the window surface
    /// fails. The logic thread is still joined first.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Channels --------------------------------------------------
        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (frame_tx, frame_rx) = bounded::<RenderFrame>(FRAME_QUEUE_DEPTH);

        //--- 2. Logic thread ----------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(event_rx, frame_tx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Platform --------------------------------------------------
        let platform = Platform::new(self.window, event_tx, frame_rx);
        let result = platform.run();
        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Join ------------------------------------------------------
        // The platform dropped its sender, so the core thread sees a
        // disconnect even if it missed WindowClosed.
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
    }

    impl Action for TestAction {}

    type Builder = EngineBuilder<TestScene, TestAction>;

    //=====================================================================
    // EngineBuilder
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = Builder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window.title, "Rotorfort");
        assert_eq!((builder.window.width, builder.window.height), (800, 600));
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn zero_tps_panics() {
        Builder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn negative_tps_panics() {
        Builder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn zero_channel_capacity_panics() {
        Builder::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window dimensions must be positive")]
    fn zero_window_height_panics() {
        Builder::new().with_window("x", 640, 0);
    }

    #[test]
    fn fluent_configuration_reaches_engine() {
        let engine = Builder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_window("Test", 320, 200)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.title, "Test");
    }

    //=====================================================================
    // Engine
    //=====================================================================

    #[test]
    fn init_runs_before_start() {
        let mut seen = false;
        let _engine = Builder::new().build().init(|systems, ctx| {
            systems.input.bind_key(KeyCode::Space, TestAction::Jump);
            seen = ctx.viewport == Vec2::new(800.0, 600.0);
        });
        assert!(seen);
    }
}
