//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for the logic thread.
//
// Responsibilities:
// - Own GlobalSystems and GlobalContext for the lifetime of the run
// - Receive platform events through a crossbeam channel
// - Tick at a fixed rate (TPS) and publish one RenderFrame per tick
//
// Architecture:
// ```text
//   Receiver<PlatformEvent> → EventCollector
//                                  ↓
//   GlobalContext ← GlobalSystems::update (input → actions → scenes)
//                                  ↓
//   GlobalSystems::render → RenderFrame → Sender<RenderFrame> (try_send)
// ```
//
// The platform never blocks on the logic thread and vice versa: input
// goes through a bounded queue and frames that do not fit are dropped.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod ecs;
pub mod globals;
pub mod input;
pub mod message_bus;
pub mod particles;
pub mod physics;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use glam::Vec2;
use log::{debug, info, trace};

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems, QuitRequested};
pub use input::Action;
pub use render::RenderFrame;
pub use scene::SceneKey;

//=== Internal Dependencies ===============================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

/// Owns every logic-side system and drives them on a dedicated thread.
pub(crate) struct CoreSystemsOrchestrator<S: SceneKey, A: Action> {
    systems: GlobalSystems<S, A>,
    context: GlobalContext,
}

impl<S: SceneKey, A: Action> CoreSystemsOrchestrator<S, A> {
    pub(crate) fn new(viewport: Vec2) -> Self {
        let mut context = GlobalContext::new();
        context.viewport = viewport;

        Self { systems: GlobalSystems::new(), context }
    }

    /// Runs user setup (bindings, scene registration) before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S, A>, &mut GlobalContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collect platform events (exit on close or disconnect)
    //  2. Update systems at the fixed timestep
    //  3. Render and offer the frame to the platform
    //  4. Exit on an empty scene stack or a quit request
    //  5. Sleep out the rest of the tick
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<RenderFrame>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let Self { mut systems, mut context } = self;
            let mut collector = EventCollector::new(receiver);

            context.delta_time = tick_duration.as_secs_f32();
            systems.scene_manager.start(&mut context);
            info!("Core thread started ({} TPS)", tps);

            loop {
                let tick_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    info!("Core thread exiting: platform closed");
                    break;
                }
                context.frame_input_events = collector.take_batches();
                context.focus_lost = collector.focus_lost();

                //--- Step 2: Update systems --------------------------------
                systems.update(&mut context);
                context.tick += 1;

                //--- Step 3: Render ----------------------------------------
                let mut frame = RenderFrame::default();
                systems.render(&mut frame);
                match frames.try_send(frame) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        trace!("Frame queue full, dropping tick {}", context.tick);
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        info!("Core thread exiting: frame receiver gone");
                        break;
                    }
                }

                //--- Step 4: Shutdown conditions --------------------------
                if systems.scene_manager.is_empty() {
                    info!("Core thread exiting: scene stack empty");
                    break;
                }
                if context.quit_requested() {
                    context.message_bus.clear::<QuitRequested>();
                    info!("Core thread exiting: quit requested");
                    break;
                }

                //--- Step 5: Maintain fixed pacing -------------------------
                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                } else {
                    debug!("Tick {} overran by {:?}", context.tick, elapsed - tick_duration);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::render::Color;
    use crate::core::scene::{Scene, SceneTransition};
    use crossbeam_channel::{bounded, unbounded};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Quit,
    }

    impl Action for TestAction {}

    /// Quits on the bound action, otherwise draws one rect per tick.
    struct QuitOnAction;

    impl Scene<TestScene> for QuitOnAction {
        fn on_enter(&mut self, _ctx: &mut GlobalContext) {}
        fn on_exit(&mut self, _ctx: &mut GlobalContext) {}

        fn update(&mut self, ctx: &mut GlobalContext) {
            if ctx.action_pressed(TestAction::Quit) {
                ctx.request_quit();
            }
        }

        fn render(&self, frame: &mut RenderFrame) {
            frame.fill_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        }
    }

    /// Removes itself on the first tick.
    struct OneShot;

    impl Scene<TestScene> for OneShot {
        fn on_enter(&mut self, _ctx: &mut GlobalContext) {}
        fn on_exit(&mut self, _ctx: &mut GlobalContext) {}

        fn update(&mut self, ctx: &mut GlobalContext) {
            ctx.request_transition(SceneTransition::Remove(TestScene::Main));
        }
    }

    fn orchestrator() -> CoreSystemsOrchestrator<TestScene, TestAction> {
        CoreSystemsOrchestrator::new(Vec2::new(320.0, 240.0))
    }

    //=====================================================================
    // Initialization
    //=====================================================================

    #[test]
    fn new_sets_viewport() {
        let orch = orchestrator();
        assert_eq!(orch.context.viewport, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn init_systems_configures_bindings() {
        let mut orch = orchestrator();
        orch.init_systems(|systems, _ctx| {
            systems.input.bind_key(KeyCode::KeyQ, TestAction::Quit);
        });
        assert_eq!(orch.systems.input.binding_count(), 1);
    }

    //=====================================================================
    // Thread Lifecycle
    //=====================================================================

    #[test]
    fn thread_exits_when_platform_sends_close() {
        let (tx, rx) = unbounded();
        let (frame_tx, _frame_rx) = bounded(2);

        let mut orch = orchestrator();
        orch.init_systems(|systems, _| {
            systems.scene_manager.register_default(TestScene::Main, QuitOnAction);
        });

        let handle = orch.spawn_core_thread(rx, frame_tx, 240.0);
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(handle.join().is_ok());
    }

    #[test]
    fn thread_exits_when_stack_empties() {
        let (_tx, rx) = unbounded();
        let (frame_tx, _frame_rx) = bounded(2);

        let mut orch = orchestrator();
        orch.init_systems(|systems, _| {
            systems.scene_manager.register_default(TestScene::Main, OneShot);
        });

        assert!(orch.spawn_core_thread(rx, frame_tx, 240.0).join().is_ok());
    }

    #[test]
    fn quit_action_stops_thread_and_frames_are_published() {
        let (tx, rx) = unbounded();
        let (frame_tx, frame_rx) = unbounded();

        let mut orch = orchestrator();
        orch.init_systems(|systems, _| {
            systems.input.bind_key(KeyCode::KeyQ, TestAction::Quit);
            systems.scene_manager.register_default(TestScene::Main, QuitOnAction);
        });

        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key: KeyCode::KeyQ, modifiers: Modifiers::NONE }],
            continuous: Vec::new(),
        })
        .unwrap();

        let handle = orch.spawn_core_thread(rx, frame_tx, 240.0);
        assert!(handle.join().is_ok());

        let frame = frame_rx.try_recv().unwrap();
        assert_eq!(frame.len(), 1);
    }
}
