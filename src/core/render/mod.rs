//=========================================================================
// Render
//=========================================================================
//
// Backend-neutral draw commands produced on the logic thread and
// rasterised by the platform.
//
// Architecture:
// ```text
//   Scene::render(&self, &mut RenderFrame)     (logic thread)
//          ↓ crossbeam (bounded, latest wins)
//   Canvas::execute(&RenderFrame)              (main thread)
//          ↓
//   Canvas::blit_scaled → window surface
// ```
//
// All coordinates are screen pixels in the logical viewport, top-left
// origin. World-to-screen conversion happens in the scene (via Camera)
// before commands are recorded.
//
//=========================================================================

//=== Module Declarations =================================================

mod canvas;
pub mod font;

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Public API ==========================================================

pub use canvas::Canvas;

//=== Color ===============================================================

/// 8-bit RGBA colour. Alpha 255 is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const ORANGE: Self = Self::rgb(255, 165, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Subtracts `amount` from every channel, saturating at 0.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Multiplies every channel by `factor`, clamped to 0..=255.
    pub fn scale(self, factor: f32) -> Self {
        let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self { r: channel(self.r), g: channel(self.g), b: channel(self.b), a: self.a }
    }

    /// Packs as `0x00RRGGBB`, the softbuffer pixel layout.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

//=== DrawCommand =========================================================

/// One drawing operation in screen space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { min: Vec2, size: Vec2, color: Color },
    RectOutline { min: Vec2, size: Vec2, thickness: u32, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    CircleOutline { center: Vec2, radius: f32, thickness: u32, color: Color },
    Line { from: Vec2, to: Vec2, thickness: u32, color: Color },
    Text { text: String, position: Vec2, scale: u32, color: Color },
    /// Fills the whole canvas, usually with a translucent colour.
    Overlay { color: Color },
}

//=== RenderFrame =========================================================

/// Everything needed to draw one tick: clear colour, ordered commands
/// and an optional window title.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub clear: Color,
    pub commands: Vec<DrawCommand>,
    pub title: Option<String>,
}

impl Default for RenderFrame {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl RenderFrame {
    pub fn new(clear: Color) -> Self {
        Self { clear, commands: Vec::with_capacity(256), title: None }
    }

    pub fn set_clear(&mut self, color: Color) {
        self.clear = color;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    //--- Recording Helpers ------------------------------------------------

    pub fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.push(DrawCommand::Rect { min, size, color });
    }

    pub fn stroke_rect(&mut self, min: Vec2, size: Vec2, thickness: u32, color: Color) {
        self.push(DrawCommand::RectOutline { min, size, thickness, color });
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::Circle { center, radius, color });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: u32, color: Color) {
        self.push(DrawCommand::CircleOutline { center, radius, thickness, color });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: u32, color: Color) {
        self.push(DrawCommand::Line { from, to, thickness, color });
    }

    pub fn text(&mut self, text: impl Into<String>, position: Vec2, scale: u32, color: Color) {
        self.push(DrawCommand::Text { text: text.into(), position, scale, color });
    }

    /// Text horizontally centred on `center_x`.
    pub fn text_centered(&mut self, text: &str, center_x: f32, y: f32, scale: u32, color: Color) {
        let width = font::text_width(text, scale) as f32;
        self.text(text, Vec2::new(center_x - width / 2.0, y), scale, color);
    }

    pub fn overlay(&mut self, color: Color) {
        self.push(DrawCommand::Overlay { color });
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Color
    //=====================================================================

    #[test]
    fn darken_saturates_at_zero() {
        let c = Color::rgb(200, 20, 30).darken(30);
        assert_eq!(c, Color::rgb(170, 0, 0));
    }

    #[test]
    fn scale_multiplies_channels_and_keeps_alpha() {
        let c = Color::rgba(200, 150, 150, 128).scale(0.5);
        assert_eq!(c, Color::rgba(100, 75, 75, 128));
        assert_eq!(Color::rgb(200, 200, 200).scale(2.0), Color::WHITE);
    }

    #[test]
    fn packs_as_zero_rgb() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
        assert_eq!(Color::rgba(0x12, 0x34, 0x56, 0).to_u32(), 0x0012_3456);
    }

    //=====================================================================
    // RenderFrame
    //=====================================================================

    #[test]
    fn commands_keep_recording_order() {
        let mut frame = RenderFrame::new(Color::rgb(135, 206, 235));
        frame.fill_rect(Vec2::ZERO, Vec2::splat(10.0), Color::RED);
        frame.overlay(Color::rgba(0, 0, 0, 128));

        assert_eq!(frame.len(), 2);
        assert!(matches!(frame.commands[0], DrawCommand::Rect { .. }));
        assert!(matches!(frame.commands[1], DrawCommand::Overlay { .. }));
    }

    #[test]
    fn centred_text_is_offset_by_half_its_width() {
        let mut frame = RenderFrame::default();
        frame.text_centered("AB", 100.0, 50.0, 2, Color::WHITE);

        match &frame.commands[0] {
            DrawCommand::Text { position, .. } => assert_eq!(*position, Vec2::new(89.0, 50.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn title_is_optional() {
        let mut frame = RenderFrame::default();
        assert!(frame.title.is_none());
        frame.set_title("Rotorfort");
        assert_eq!(frame.title.as_deref(), Some("Rotorfort"));
    }
}
