//! Text layout and rendering
//!
//! [`TextCursor`] is the per-surface text state: cursor, line start, font,
//! scale, wrap flag and colors. Characters are laid out left to right from
//! the cursor; the cursor's y is the top of the current line box and each
//! glyph's offsets are relative to it.
//!
//! ```text
//! write_char('\n')  x = line start, y += line height × size
//! write_char('\r')  ignored
//! write_char(c)     wrap if needed, draw, x += advance × size
//! ```

// Cursor arithmetic saturates; the remaining expressions combine glyph
// metrics (u8/i8) with a u8 scale and cannot overflow i32.
#![allow(clippy::arithmetic_side_effects)]

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::font::{FinalAdvance, Font, Glyph};
use crate::fonts;
use crate::raster::set_bits;
use crate::surface::Surface;

/// Horizontal anchoring for [`TextCursor::draw_aligned_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Text starts at x
    #[default]
    Left,
    /// Text is centred on x
    Center,
    /// Text ends at x
    Right,
}

impl Align {
    /// Left edge of a line `width` pixels wide anchored at `x`.
    fn start(self, x: i16, width: i32) -> i32 {
        let x = i32::from(x);
        match self {
            Self::Left => x,
            Self::Center => x.saturating_sub(width / 2),
            Self::Right => x.saturating_sub(width),
        }
    }
}

/// Text state for one surface.
#[derive(Debug, Clone, Copy)]
pub struct TextCursor<C> {
    x: i32,
    y: i32,
    line_start: i32,
    font: Font,
    size: u8,
    wrap: bool,
    fg: C,
    bg: Option<C>,
}

impl<C: Copy> TextCursor<C> {
    /// Cursor at the origin, [`fonts::MINI5`], size 1, wrapping on,
    /// transparent background.
    pub fn new(fg: C) -> Self {
        Self {
            x: 0,
            y: 0,
            line_start: 0,
            font: fonts::MINI5,
            size: 1,
            wrap: true,
            fg,
            bg: None,
        }
    }

    /// Move the cursor; `x` also becomes the line start for `'\n'`.
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.x = x.into();
        self.y = y.into();
        self.line_start = x.into();
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Glyph color, and the cell background if any.
    ///
    /// With a background set, each character first fills its whole advance
    /// cell (advance × line height) so text can overwrite older text.
    pub fn set_color(&mut self, fg: C, bg: Option<C>) {
        self.fg = fg;
        self.bg = bg;
    }

    /// Integer scale factor. 0 behaves as 1.
    pub fn set_size(&mut self, size: u8) {
        self.size = size.max(1);
    }

    /// Current scale factor.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Wrap to the next line when a glyph would cross the right edge.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Switch fonts.
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Active font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    fn scale(&self) -> i32 {
        i32::from(self.size.max(1))
    }

    fn line_height(&self) -> i32 {
        i32::from(self.font.y_advance) * self.scale()
    }

    fn newline(&mut self) {
        self.x = self.line_start;
        self.y = self.y.saturating_add(self.line_height());
    }

    fn needs_wrap(&self, glyph: &Glyph, width: usize) -> bool {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        self.wrap && self.x.saturating_add(glyph.ink_extent() * self.scale()) > width
    }

    /// Lay out and draw one character.
    ///
    /// Characters the font does not cover are dropped without moving the
    /// cursor.
    pub fn write_char<S>(&mut self, surface: &mut S, c: char) -> Result<(), S::Error>
    where
        S: Surface<Color = C>,
    {
        match c {
            '\n' => {
                self.newline();
                Ok(())
            }
            '\r' => Ok(()),
            _ => {
                let Some(glyph) = self.font.glyph(c).copied() else {
                    return Ok(());
                };
                if self.needs_wrap(&glyph, S::WIDTH) {
                    self.newline();
                }
                self.render(surface, &glyph)?;
                let advance = i32::from(glyph.x_advance) * self.scale();
                self.x = self.x.saturating_add(advance);
                Ok(())
            }
        }
    }

    /// Write every character of `text`.
    pub fn write_str<S>(&mut self, surface: &mut S, text: &str) -> Result<(), S::Error>
    where
        S: Surface<Color = C>,
    {
        text.chars().try_for_each(|c| self.write_char(surface, c))
    }

    fn render<S>(&self, surface: &mut S, glyph: &Glyph) -> Result<(), S::Error>
    where
        S: Surface<Color = C>,
    {
        let size = self.scale();
        if let Some(bg) = self.bg {
            let w = i32::from(glyph.x_advance) * size;
            surface.fill_region(self.x, self.y, w, self.line_height(), bg)?;
        }

        let ox = self.x.saturating_add(i32::from(glyph.x_offset) * size);
        let oy = self.y.saturating_add(i32::from(glyph.y_offset) * size);
        let bitmap = self.font.bitmap_of(glyph);
        for (i, j) in set_bits(bitmap, glyph.width.into(), glyph.height.into()) {
            if size == 1 {
                surface.set_pixel(ox.saturating_add(i), oy.saturating_add(j), self.fg)?;
            } else {
                let px = ox.saturating_add(i * size);
                let py = oy.saturating_add(j * size);
                surface.fill_region(px, py, size, size, self.fg)?;
            }
        }
        Ok(())
    }

    /// Box `text` would occupy if written from `(x, y)` on a surface `width`
    /// pixels wide, without drawing anything.
    ///
    /// The width is that of the widest line measured by advances; if the
    /// font declares [`FinalAdvance::InkOnly`], the last character counts
    /// only its ink. The height is the number of lines times the line
    /// height. Wrapping follows the current wrap setting.
    pub fn text_bounds(&self, text: &str, x: i16, y: i16, width: usize) -> Rectangle {
        let origin = Point::new(x.into(), y.into());
        if text.is_empty() {
            return Rectangle::new(origin, Size::zero());
        }

        let mut probe = *self;
        probe.set_cursor(x, y);
        let mut right = probe.x;
        let mut lines: i32 = 1;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\n' => {
                    probe.newline();
                    lines += 1;
                }
                '\r' => {}
                _ => {
                    let Some(glyph) = probe.font.glyph(c).copied() else {
                        continue;
                    };
                    if probe.needs_wrap(&glyph, width) {
                        probe.newline();
                        lines += 1;
                    }
                    let is_final = chars.peek().is_none();
                    let span = match probe.font.final_advance {
                        FinalAdvance::InkOnly if is_final => glyph.ink_extent(),
                        _ => i32::from(glyph.x_advance),
                    };
                    right = right.max(probe.x.saturating_add(span * probe.scale()));
                    probe.x = probe
                        .x
                        .saturating_add(i32::from(glyph.x_advance) * probe.scale());
                }
            }
        }

        let w = right.saturating_sub(origin.x).max(0);
        let h = lines.saturating_mul(probe.line_height());
        Rectangle::new(
            origin,
            Size::new(w.unsigned_abs(), h.unsigned_abs()),
        )
    }

    /// Draw `text` anchored at `(x, y)` without disturbing the cursor.
    ///
    /// The text is measured with wrapping off, shifted according to
    /// `align`, and replayed through [`Self::write_char`]. Cursor, line
    /// start and wrap flag are restored afterwards, also when the transport
    /// fails part-way.
    pub fn draw_aligned_text<S>(
        &mut self,
        surface: &mut S,
        text: &str,
        x: i16,
        y: i16,
        align: Align,
    ) -> Result<(), S::Error>
    where
        S: Surface<Color = C>,
    {
        let saved = (self.x, self.y, self.line_start, self.wrap);
        self.wrap = false;

        let bounds = self.text_bounds(text, x, y, S::WIDTH);
        let w = i32::try_from(bounds.size.width).unwrap_or(i32::MAX);
        let start = align.start(x, w);
        self.x = start;
        self.y = y.into();
        self.line_start = start;

        let result = self.write_str(surface, text);
        (self.x, self.y, self.line_start, self.wrap) = saved;
        result
    }
}
