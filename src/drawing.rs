/*
drawing.rs

Copyright 2026 The Magic Farm contributors

This file is part of Magic Farm.

Magic Farm is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Magic Farm is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Magic Farm. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Drawing canvas for painting characters by hand.
//!
//! The canvas is a square raster with a white background. The visual layer displays it at any
//! size, and reports the pointer positions in display coordinates. The positions are scaled
//! to the canvas before painting.
//!
//! Strokes are round: every segment of a stroke is painted as a series of discs, which also
//! gives the rounded ends and joins. The eraser paints with the background color.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;
use std::error::Error;
use std::fmt;
use std::io::Cursor;
use strum_macros::FromRepr;

use crate::prompts;

pub const MIN_BRUSH_SIZE: u32 = 2;
pub const MAX_BRUSH_SIZE: u32 = 30;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum DrawingError {
    /// The color is not a `#rrggbb` string.
    InvalidColor(String),

    /// The canvas cannot be encoded as PNG.
    Encode(String),
}

impl fmt::Display for DrawingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DrawingError::InvalidColor(c) => write!(f, "invalid color: {c:?}"),
            DrawingError::Encode(msg) => write!(f, "cannot encode the drawing: {msg}"),
        }
    }
}

impl Error for DrawingError {}

/// Colors offered to the player.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u8)]
pub enum PaletteColor {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    White,
    Gray,
}

impl PaletteColor {
    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Black => "#000000",
            PaletteColor::Brown => "#5d4037",
            PaletteColor::Red => "#ef4444",
            PaletteColor::Orange => "#f97316",
            PaletteColor::Yellow => "#facc15",
            PaletteColor::Green => "#4ade80",
            PaletteColor::Cyan => "#22d3ee",
            PaletteColor::Blue => "#3b82f6",
            PaletteColor::Purple => "#a855f7",
            PaletteColor::Pink => "#ec4899",
            PaletteColor::White => "#ffffff",
            PaletteColor::Gray => "#94a3b8",
        }
    }

    /// Return the colors in display order.
    pub fn all() -> Vec<PaletteColor> {
        (0..).map_while(PaletteColor::from_repr).collect()
    }
}

/// Parse a `#rrggbb` color.
pub fn parse_color(hex: &str) -> Result<Rgba<u8>, DrawingError> {
    let invalid = || DrawingError::InvalidColor(hex.to_string());
    let digits: &str = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// Position on the canvas, in canvas pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Drawing canvas object.
pub struct DrawingSurface {
    canvas: RgbaImage,
    color: Rgba<u8>,
    tool: Tool,
    brush_size: u32,

    /// Size at which the visual layer displays the canvas.
    view: (f32, f32),

    /// Last position of the stroke in progress.
    last: Option<Point>,
}

impl DrawingSurface {
    /// Create a white square canvas. The canvas is displayed at its own size until
    /// [`DrawingSurface::set_view_size`] is called.
    pub fn new(size: u32) -> Self {
        let size: u32 = size.max(1);
        Self {
            canvas: RgbaImage::from_pixel(size, size, BACKGROUND),
            color: Rgba([0, 0, 0, 255]),
            tool: Tool::default(),
            brush_size: DEFAULT_BRUSH_SIZE,
            view: (size as f32, size as f32),
            last: None,
        }
    }

    pub fn size(&self) -> u32 {
        self.canvas.width()
    }

    /// Select the brush color. Selecting a color also selects the brush.
    pub fn set_color(&mut self, hex: &str) -> Result<(), DrawingError> {
        self.color = parse_color(hex)?;
        self.tool = Tool::Brush;
        Ok(())
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    /// Select the tool, and return the phrase that confirms the choice.
    pub fn set_tool(&mut self, tool: Tool) -> &'static str {
        self.tool = tool;
        match tool {
            Tool::Brush => prompts::PAINTER_BRUSH,
            Tool::Eraser => prompts::PAINTER_ERASER,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Set the width of the strokes, clamped to the allowed range, and return the new width.
    pub fn set_brush_size(&mut self, size: u32) -> u32 {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        self.brush_size
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Record the size at which the canvas is displayed.
    pub fn set_view_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.view = (width, height);
        }
    }

    /// Convert a position in display coordinates into canvas coordinates.
    pub fn to_canvas(&self, x: f32, y: f32) -> Point {
        let size: f32 = self.size() as f32;
        Point {
            x: x * size / self.view.0,
            y: y * size / self.view.1,
        }
    }

    /// Start a stroke at the given display position. Nothing is painted until the pointer
    /// moves.
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.last = Some(self.to_canvas(x, y));
    }

    /// Extend the stroke in progress to the given display position.
    ///
    /// Ignored when no stroke is in progress.
    pub fn stroke_to(&mut self, x: f32, y: f32) {
        let Some(from) = self.last else {
            return;
        };
        let to: Point = self.to_canvas(x, y);
        self.paint_segment(from, to);
        self.last = Some(to);
    }

    pub fn end_stroke(&mut self) {
        self.last = None;
    }

    pub fn is_drawing(&self) -> bool {
        self.last.is_some()
    }

    /// Fill the canvas with the background color, and return the phrase read aloud.
    pub fn clear(&mut self) -> &'static str {
        debug!("Clearing the drawing canvas");
        for pixel in self.canvas.pixels_mut() {
            *pixel = BACKGROUND;
        }
        self.last = None;
        prompts::PAINTER_CLEARED
    }

    /// Return the color of the given canvas pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.canvas.get_pixel_checked(x, y).copied()
    }

    fn paint_segment(&mut self, from: Point, to: Point) {
        let ink: Rgba<u8> = match self.tool {
            Tool::Brush => self.color,
            Tool::Eraser => BACKGROUND,
        };
        let radius: f32 = self.brush_size as f32 / 2.0;
        let size: f32 = self.size() as f32;

        // Only the part of the segment where the discs can touch the canvas is painted
        let Some((t_start, t_end)) = clip_segment(from, to, -radius, size + radius) else {
            return;
        };
        let length: f32 = (to.x - from.x).hypot(to.y - from.y) * (t_end - t_start);
        let steps: u32 = (length.ceil() as u32).max(1);

        for step in 0..=steps {
            let t: f32 = t_start + (t_end - t_start) * step as f32 / steps as f32;
            let center = Point {
                x: from.x + (to.x - from.x) * t,
                y: from.y + (to.y - from.y) * t,
            };
            self.paint_disc(center, radius, ink);
        }
    }

    fn paint_disc(&mut self, center: Point, radius: f32, ink: Rgba<u8>) {
        let size: f32 = self.size() as f32;
        let x_min: f32 = (center.x - radius).floor().max(0.0);
        let x_max: f32 = (center.x + radius).ceil().min(size - 1.0);
        let y_min: f32 = (center.y - radius).floor().max(0.0);
        let y_max: f32 = (center.y + radius).ceil().min(size - 1.0);
        if x_min > x_max || y_min > y_max {
            return;
        }

        let r2: f32 = radius * radius;
        for y in y_min as u32..=y_max as u32 {
            for x in x_min as u32..=x_max as u32 {
                let dx: f32 = x as f32 + 0.5 - center.x;
                let dy: f32 = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.canvas.put_pixel(x, y, ink);
                }
            }
        }
    }

    /// Encode the canvas as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, DrawingError> {
        let mut bytes: Vec<u8> = Vec::new();
        self.canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| DrawingError::Encode(e.to_string()))?;
        debug!("Drawing exported: {} PNG bytes", bytes.len());
        Ok(bytes)
    }

    /// Encode the canvas as a PNG `data:` URI.
    pub fn export_data_uri(&self) -> Result<String, DrawingError> {
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64.encode(self.export_png()?)
        ))
    }
}

/// Return the range of the segment parameter, between 0 and 1, for which the segment is inside
/// the square between `min` and `max` on both axes.
fn clip_segment(from: Point, to: Point, min: f32, max: f32) -> Option<(f32, f32)> {
    let mut t_start: f32 = 0.0;
    let mut t_end: f32 = 1.0;
    for (origin, delta) in [(from.x, to.x - from.x), (from.y, to.y - from.y)] {
        if delta == 0.0 {
            if origin < min || origin > max {
                return None;
            }
            continue;
        }
        let a: f32 = (min - origin) / delta;
        let b: f32 = (max - origin) / delta;
        t_start = t_start.max(a.min(b));
        t_end = t_end.min(a.max(b));
    }
    if t_start > t_end {
        return None;
    }
    Some((t_start, t_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([0xef, 0x44, 0x44, 255]);

    #[test]
    fn colors() {
        assert_eq!(parse_color("#ef4444"), Ok(RED));
        assert_eq!(parse_color("#FFFFFF"), Ok(WHITE));
        for bad in ["ef4444", "#ef44", "#gg0000", "#ef44445", "#éf444"] {
            assert_eq!(
                parse_color(bad),
                Err(DrawingError::InvalidColor(bad.to_string()))
            );
        }
    }

    #[test]
    fn palette() {
        let palette = PaletteColor::all();
        assert_eq!(palette.len(), 12);
        assert_eq!(palette[0].hex(), "#000000");
        assert_eq!(palette[11], PaletteColor::Gray);
        for color in palette {
            assert!(parse_color(color.hex()).is_ok());
        }
    }

    #[test]
    fn new_canvas_is_white() {
        let surface = DrawingSurface::new(20);
        assert_eq!(surface.size(), 20);
        assert_eq!(surface.brush_size(), DEFAULT_BRUSH_SIZE);
        assert_eq!(surface.pixel(0, 0), Some(WHITE));
        assert_eq!(surface.pixel(19, 19), Some(WHITE));
        assert_eq!(surface.pixel(20, 0), None);
    }

    #[test]
    fn brush_size_is_clamped() {
        let mut surface = DrawingSurface::new(20);
        assert_eq!(surface.set_brush_size(1), MIN_BRUSH_SIZE);
        assert_eq!(surface.set_brush_size(100), MAX_BRUSH_SIZE);
        assert_eq!(surface.set_brush_size(12), 12);
    }

    #[test]
    fn strokes_paint_with_the_color() {
        let mut surface = DrawingSurface::new(50);
        surface.set_color("#ef4444").expect("valid color");

        // Pressing without moving paints nothing
        surface.begin_stroke(10.0, 25.0);
        assert_eq!(surface.pixel(10, 25), Some(WHITE));

        surface.stroke_to(40.0, 25.0);
        surface.end_stroke();
        for x in 10..40 {
            assert_eq!(surface.pixel(x, 25), Some(RED), "pixel {x}");
        }
        assert_eq!(surface.pixel(25, 10), Some(WHITE));

        // Moving without pressing paints nothing
        surface.stroke_to(25.0, 5.0);
        assert_eq!(surface.pixel(25, 5), Some(WHITE));
    }

    #[test]
    fn eraser_paints_the_background() {
        let mut surface = DrawingSurface::new(50);
        surface.set_brush_size(10);
        surface.begin_stroke(5.0, 25.0);
        surface.stroke_to(45.0, 25.0);
        assert_eq!(surface.pixel(25, 25), Some(Rgba([0, 0, 0, 255])));

        assert_eq!(surface.set_tool(Tool::Eraser), prompts::PAINTER_ERASER);
        surface.begin_stroke(25.0, 10.0);
        surface.stroke_to(25.0, 40.0);
        surface.end_stroke();
        assert_eq!(surface.pixel(25, 25), Some(WHITE));
        assert_eq!(surface.pixel(10, 25), Some(Rgba([0, 0, 0, 255])));

        // Picking a color gets the brush back
        surface.set_color("#000000").expect("valid color");
        assert_eq!(surface.tool(), Tool::Brush);
        assert_eq!(surface.set_tool(Tool::Brush), prompts::PAINTER_BRUSH);
    }

    #[test]
    fn display_positions_are_scaled() {
        let mut surface = DrawingSurface::new(500);
        surface.set_view_size(250.0, 250.0);
        assert_eq!(surface.to_canvas(100.0, 50.0), Point { x: 200.0, y: 100.0 });

        surface.begin_stroke(100.0, 50.0);
        surface.stroke_to(110.0, 50.0);
        assert_eq!(surface.pixel(210, 100), Some(Rgba([0, 0, 0, 255])));
        assert_eq!(surface.pixel(110, 50), Some(WHITE));
    }

    #[test]
    fn clear_resets_the_canvas() {
        let mut surface = DrawingSurface::new(20);
        surface.begin_stroke(0.0, 0.0);
        surface.stroke_to(19.0, 19.0);
        assert_eq!(surface.clear(), prompts::PAINTER_CLEARED);
        assert!(!surface.is_drawing());
        for y in 0..20 {
            for x in 0..20 {
                assert_eq!(surface.pixel(x, y), Some(WHITE));
            }
        }
    }

    #[test]
    fn export_is_a_png() {
        let mut surface = DrawingSurface::new(30);
        surface.begin_stroke(0.0, 0.0);
        surface.stroke_to(29.0, 29.0);
        let png = surface.export_png().expect("encoded");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).expect("decoded").to_rgba8();
        assert_eq!(decoded.dimensions(), (30, 30));
        assert_eq!(decoded.get_pixel(15, 15), &Rgba([0, 0, 0, 255]));

        let uri = surface.export_data_uri().expect("encoded");
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn far_positions_are_clipped() {
        let mut surface = DrawingSurface::new(20);
        surface.set_view_size(1.0, 1.0);
        surface.begin_stroke(0.5, 0.5);
        surface.stroke_to(1_000_000.0, 0.5);
        surface.end_stroke();
        for x in 10..20 {
            assert_eq!(surface.pixel(x, 10), Some(Rgba([0, 0, 0, 255])), "pixel {x}");
        }

        // The painted part of a 20,000,000 pixels segment stays within the canvas
        let (t_start, t_end) = clip_segment(
            Point { x: 10.0, y: 10.0 },
            Point { x: 20_000_000.0, y: 10.0 },
            -2.5,
            22.5,
        )
        .expect("starts on the canvas");
        assert_eq!(t_start, 0.0);
        assert!(t_end * 20_000_000.0 < 20.0);

        // Segments that never reach the canvas are not painted
        assert_eq!(
            clip_segment(Point { x: -50.0, y: 5.0 }, Point { x: -10.0, y: 8.0 }, -2.5, 22.5),
            None
        );
    }
}
