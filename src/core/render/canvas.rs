//=========================================================================
// Canvas
//=========================================================================
//
// CPU framebuffer rasteriser for `RenderFrame` commands.
//
// Pixels are `0x00RRGGBB` u32s, row-major, matching softbuffer. Every
// primitive clips to the canvas. Colours with alpha < 255 blend over
// what is already there; alpha 0 draws nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::font::{self, GLYPH_ADVANCE, GLYPH_WIDTH};
use super::{Color, DrawCommand, RenderFrame};

//=== Canvas ==============================================================

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    //=====================================================================
    // Frame Execution
    //=====================================================================

    /// Clears to `frame.clear` and runs every command in order.
    pub fn execute(&mut self, frame: &RenderFrame) {
        self.clear(frame.clear);
        for command in &frame.commands {
            self.draw(command);
        }
    }

    pub fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rect { min, size, color } => {
                let (x, y, w, h) = rect_pixels(*min, *size);
                self.fill_rect(x, y, w, h, *color);
            }
            DrawCommand::RectOutline { min, size, thickness, color } => {
                let (x, y, w, h) = rect_pixels(*min, *size);
                self.stroke_rect(x, y, w, h, *thickness as i32, *color);
            }
            DrawCommand::Circle { center, radius, color } => {
                self.fill_circle(round(center.x), round(center.y), radius.round() as i32, *color);
            }
            DrawCommand::CircleOutline { center, radius, thickness, color } => {
                self.stroke_circle(
                    round(center.x),
                    round(center.y),
                    radius.round() as i32,
                    *thickness as i32,
                    *color,
                );
            }
            DrawCommand::Line { from, to, thickness, color } => {
                self.draw_line(
                    round(from.x),
                    round(from.y),
                    round(to.x),
                    round(to.y),
                    *thickness as i32,
                    *color,
                );
            }
            DrawCommand::Text { text, position, scale, color } => {
                self.draw_text(text, round(position.x), round(position.y), *scale as i32, *color);
            }
            DrawCommand::Overlay { color } => {
                self.fill_rect(0, 0, self.width as i32, self.height as i32, *color);
            }
        }
    }

    //=====================================================================
    // Primitives
    //=====================================================================

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    /// Writes or blends one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;

        match color.a {
            0 => {}
            255 => self.pixels[idx] = color.to_u32(),
            alpha => self.pixels[idx] = blend(self.pixels[idx], color, alpha),
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);

        if x0 >= x1 || y0 >= y1 {
            return;
        }

        if color.is_opaque() {
            let packed = color.to_u32();
            for row in y0..y1 {
                let start = row as usize * self.width;
                self.pixels[start + x0 as usize..start + x1 as usize].fill(packed);
            }
        } else {
            for row in y0..y1 {
                for col in x0..x1 {
                    self.set_pixel(col, row, color);
                }
            }
        }
    }

    /// Border drawn inside the rectangle, `thickness` pixels wide.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: Color) {
        if w <= 0 || h <= 0 || thickness <= 0 {
            return;
        }
        let t = thickness.min(w / 2 + 1).min(h / 2 + 1);

        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y + t, t, h - 2 * t, color);
        self.fill_rect(x + w - t, y + t, t, h - 2 * t, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        let r_sq = radius * radius;
        for y in (cy - radius).max(0)..=(cy + radius).min(self.height as i32 - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width as i32 - 1) {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Ring of the given thickness, inside the radius.
    pub fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, thickness: i32, color: Color) {
        if radius <= 0 || thickness <= 0 {
            return;
        }
        let outer = radius * radius;
        let inner_r = (radius - thickness).max(0);
        let inner = inner_r * inner_r;

        for y in (cy - radius).max(0)..=(cy + radius).min(self.height as i32 - 1) {
            for x in (cx - radius).max(0)..=(cx + radius).min(self.width as i32 - 1) {
                let dx = x - cx;
                let dy = y - cy;
                let d = dx * dx + dy * dy;
                if d <= outer && (inner_r == 0 || d > inner) {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham line. Thickness > 1 stamps a square brush at each step.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        let brush = thickness.max(1);
        let offset = (brush - 1) / 2;

        loop {
            if brush == 1 {
                self.set_pixel(x, y, color);
            } else {
                self.fill_rect(x - offset, y - offset, brush, brush, color);
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: Color) {
        let scale = scale.max(1);
        let mut pen_x = x;

        for c in text.chars() {
            let rows = font::glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH as i32 {
                    if bits & (0x10 >> col) != 0 {
                        self.fill_rect(
                            pen_x + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            pen_x += GLYPH_ADVANCE as i32 * scale;
        }
    }

    //=====================================================================
    // Presentation
    //=====================================================================

    /// Nearest-neighbour stretch into `dst` (`dst_width` x `dst_height`).
    ///
    /// Does nothing if `dst` is smaller than the stated dimensions.
    pub fn blit_scaled(&self, dst: &mut [u32], dst_width: usize, dst_height: usize) {
        if dst_width == 0 || dst_height == 0 || dst.len() < dst_width * dst_height {
            return;
        }
        if self.width == 0 || self.height == 0 {
            dst[..dst_width * dst_height].fill(0);
            return;
        }

        for dy in 0..dst_height {
            let sy = dy * self.height / dst_height;
            let src_row = &self.pixels[sy * self.width..(sy + 1) * self.width];
            let dst_row = &mut dst[dy * dst_width..(dy + 1) * dst_width];

            for (dx, out) in dst_row.iter_mut().enumerate() {
                *out = src_row[dx * self.width / dst_width];
            }
        }
    }
}

//=== Helpers =============================================================

#[inline]
fn round(v: f32) -> i32 {
    v.round() as i32
}

fn rect_pixels(min: Vec2, size: Vec2) -> (i32, i32, i32, i32) {
    (round(min.x), round(min.y), round(size.x), round(size.y))
}

/// `front * alpha + back * (1 - alpha)` per channel.
#[inline]
fn blend(back: u32, front: Color, alpha: u8) -> u32 {
    let a = alpha as u32;
    let inv_a = 255 - a;
    let mix = |f: u8, b: u32| (f as u32 * a + b * inv_a) / 255;

    let r = mix(front.r, (back >> 16) & 0xFF);
    let g = mix(front.g, (back >> 8) & 0xFF);
    let b = mix(front.b, back & 0xFF);
    (r << 16) | (g << 8) | b
}

//=========================================================================
// Unit Tests
//=========================================================================
