//! Rendered frames and the rectangle/text primitives drawn onto them.
//!
//! A [`Frame`] is a value: cloning it captures everything visible, which is
//! what makes it usable as an undo snapshot. Rectangles are burned into the
//! pixel buffer; text is kept as positioned marks and painted on top by the
//! window, scaled together with the image.

use image::{Rgb, RgbImage};

use crate::event::Point;

/// An RGB color.
pub type Color = [u8; 3];

/// A piece of text anchored at its bottom-left corner, in image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark {
    pub text: String,
    pub origin: Point,
    pub color: Color,
    /// Glyph height in image pixels.
    pub size: f32,
}

/// A rendered image plus the text drawn over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: RgbImage,
    marks: Vec<TextMark>,
}

impl Frame {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels,
            marks: Vec::new(),
        }
    }

    /// A uniformly filled frame.
    pub fn blank(width: u32, height: u32, color: Color) -> Self {
        Self::new(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn marks(&self) -> &[TextMark] {
        &self.marks
    }

    /// Stroke the outline of the rectangle spanned by two corners.
    ///
    /// Corners may be given in any order and may lie outside the image;
    /// the stroke grows inward from the outline and is clipped to the image.
    pub fn draw_rect(&mut self, a: Point, b: Point, color: Color, thickness: u32) {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        let t = thickness.max(1) as i32;

        for i in 0..t {
            let (l, r, top, bottom) = (x0 + i, x1 - i, y0 + i, y1 - i);
            if l > r || top > bottom {
                break;
            }
            for x in l..=r {
                self.put_pixel(x, top, color);
                self.put_pixel(x, bottom, color);
            }
            for y in top..=bottom {
                self.put_pixel(l, y, color);
                self.put_pixel(r, y, color);
            }
        }
    }

    /// Place text with its bottom-left corner at `origin`.
    pub fn put_text(&mut self, text: impl Into<String>, origin: Point, color: Color, size: f32) {
        self.marks.push(TextMark {
            text: text.into(),
            origin,
            color,
            size,
        });
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.pixels.width() && y < self.pixels.height() {
            self.pixels.put_pixel(x, y, Rgb(color));
        }
    }
}
