//=========================================================================
// Presenter
//=========================================================================
//
// Rasterises RenderFrames on the CPU and copies them to the window.
//
// Architecture:
//   RenderFrame → Canvas (logical size) → blit_scaled → softbuffer surface
//
// The canvas keeps the logical resolution fixed; the window may be any
// size and the image is stretched nearest-neighbour to fill it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::num::NonZeroU32;
use std::rc::Rc;

use log::{debug, trace};
use softbuffer::{Context, Surface};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;
use crate::core::render::{Canvas, RenderFrame};

//=== Presenter ===========================================================

pub(crate) struct Presenter {
    window: Rc<Window>,
    // Held for the surface's lifetime.
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    canvas: Canvas,
    surface_size: (u32, u32),
}

impl Presenter {
    pub(crate) fn new(window: Rc<Window>, width: u32, height: u32) -> Result<Self, PlatformError> {
        let context = Context::new(window.clone())
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        debug!(target: "platform::present", "Surface created, canvas {}x{}", width, height);

        Ok(Self {
            window,
            _context: context,
            surface,
            canvas: Canvas::new(width as usize, height as usize),
            surface_size: (0, 0),
        })
    }

    /// Draws `frame` and presents it. A minimised window is skipped.
    pub(crate) fn present(&mut self, frame: &RenderFrame) -> Result<(), PlatformError> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            trace!(target: "platform::present", "Zero-sized window, skipping present");
            return Ok(());
        };

        if self.surface_size != (size.width, size.height) {
            self.surface
                .resize(width, height)
                .map_err(|e| PlatformError::Surface(e.to_string()))?;
            self.surface_size = (size.width, size.height);
        }

        self.canvas.execute(frame);

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| PlatformError::Surface(e.to_string()))?;
        self.canvas
            .blit_scaled(&mut buffer, size.width as usize, size.height as usize);
        buffer
            .present()
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }
}
