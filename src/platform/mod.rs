//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Main-thread side of the engine: owns the winit window, forwards input
// to the core thread and presents the frames it sends back.
//
// Architecture:
// ```text
//  Main Thread:                          Logic Thread:
//  ┌───────────────────────────────┐    ┌──────────────────────┐
//  │  winit event loop             │    │  CoreSystems         │
//  │   ↓                           │    │  Orchestrator        │
//  │  InputProcessor → InputBuffer │    │                      │
//  │   ↓ RedrawRequested (flush)   │    │                      │
//  │  Sender<PlatformEvent> ───────┼───→│  EventCollector      │
//  │                               │    │   ↓                  │
//  │  Receiver<RenderFrame> ←──────┼────│  scenes → frame      │
//  │   ↓ latest frame wins         │    └──────────────────────┘
//  │  Presenter (Canvas → surface) │
//  └───────────────────────────────┘
// ```
//
// Shutdown:
// - CloseRequested: send WindowClosed, exit the loop
// - frame channel disconnected: the core thread is done, exit the loop
//
// winit requires the main thread on macOS, so this runs on the thread
// that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;
mod presenter;

//=== External Dependencies ===============================================

use std::rc::Rc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use glam::Vec2;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::render::RenderFrame;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;
use presenter::Presenter;

//=== WindowSettings ======================================================

/// Initial window title and logical canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner, input aggregator and frame presenter.
///
/// Not `Send`: it stays on the main thread and talks to the core thread
/// only through the two channels.
pub(crate) struct Platform {
    settings: WindowSettings,

    /// Created in `resumed()`.
    window: Option<Rc<Window>>,
    presenter: Option<Presenter>,

    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,

    frame_receiver: Receiver<RenderFrame>,
    latest_frame: Option<RenderFrame>,
    current_title: String,

    /// First unrecoverable error, returned from `run()`.
    fatal: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        settings: WindowSettings,
        event_sender: Sender<PlatformEvent>,
        frame_receiver: Receiver<RenderFrame>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            current_title: settings.title.clone(),
            settings,
            window: None,
            presenter: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            frame_receiver,
            latest_frame: None,
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the core
    /// thread stops producing frames.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Input ------------------------------------------------------------

    /// Sends buffered input as one `Inputs` message. Empty buffers are not
    /// sent; a disconnected core drops the events with a warning.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let (discrete_count, continuous_count) = (discrete.len(), continuous.len());
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self.event_sender.send(PlatformEvent::Inputs { discrete, continuous }).is_err() {
            warn!(
                target: "platform::input",
                "Core channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }

    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            debug!(target: "platform", "Core channel already closed");
        }
    }

    //--- Frames -----------------------------------------------------------

    /// Keeps the newest queued frame. Returns false once the core thread
    /// has hung up and every frame has been consumed.
    fn receive_frames(&mut self) -> bool {
        loop {
            match self.frame_receiver.try_recv() {
                Ok(frame) => self.latest_frame = Some(frame),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn present_latest(&mut self) {
        let (Some(window), Some(presenter), Some(frame)) =
            (&self.window, &mut self.presenter, &self.latest_frame)
        else {
            return;
        };

        if let Some(title) = &frame.title {
            if *title != self.current_title {
                window.set_title(title);
                self.current_title.clone_from(title);
            }
        }

        if let Err(e) = presenter.present(frame) {
            error!(target: "platform::present", "Present failed: {}", e);
            self.fatal = Some(e);
        }
    }

    fn update_cursor_mapping(&mut self) {
        if let Some(window) = &self.window {
            let size = window.inner_size();
            self.input_processor.set_surface_size(
                Vec2::new(size.width as f32, size.height as f32),
                Vec2::new(self.settings.width as f32, self.settings.height as f32),
            );
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        let window = event_loop
            .create_window(attrs)
            .map(Rc::new)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        let presenter = Presenter::new(window.clone(), self.settings.width, self.settings.height)?;
        window.request_redraw();

        self.window = Some(window);
        self.presenter = Some(presenter);
        self.update_cursor_mapping();
        Ok(())
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Resumed with an existing window");
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            error!(target: "platform", "Window setup failed: {}", e);
            self.fatal = Some(e);
            self.shut_down(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shut_down(event_loop);
            }

            WindowEvent::Focused(false) => {
                // Pending input first, so releases are applied after it.
                debug!(target: "platform::input", "Focus lost");
                self.flush_input_buffer();
                self.send(PlatformEvent::FocusLost);
            }

            WindowEvent::Resized(size) => {
                trace!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.update_cursor_mapping();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.cursor_moved(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.key(&key_event) {
                    self.buffer.push_discrete(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                // Frame boundary.
                self.flush_input_buffer();

                if !self.receive_frames() {
                    info!(target: "platform", "Core thread finished, closing window");
                    event_loop.exit();
                    return;
                }

                self.present_latest();
                if self.fatal.is_some() {
                    self.shut_down(event_loop);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
