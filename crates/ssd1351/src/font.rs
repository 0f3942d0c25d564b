//! Variable-width bitmap fonts
//!
//! A [`Font`] is a contiguous range of code points `first..=last`, one
//! [`Glyph`] per code point, and a shared bitmap pool. Each glyph's bitmap is
//! 1 bit per pixel, row-major, rows padded to whole bytes, MSB leftmost:
//! the same layout [`Canvas::draw_bitmap`](crate::raster::Canvas::draw_bitmap)
//! takes.

/// Placement and metrics of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Index of the first bitmap byte in [`Font::bitmap`]
    pub bitmap_offset: u16,
    /// Ink width in pixels
    pub width: u8,
    /// Ink height in pixels
    pub height: u8,
    /// Horizontal cursor advance
    pub x_advance: u8,
    /// Ink offset from the cursor, x
    pub x_offset: i8,
    /// Ink offset from the top of the line box, y
    pub y_offset: i8,
}

impl Glyph {
    /// Bytes per bitmap row.
    pub fn stride(&self) -> usize {
        usize::from(self.width).div_ceil(8)
    }

    /// Rightmost ink column relative to the cursor, exclusive.
    pub fn ink_extent(&self) -> i32 {
        i32::from(self.x_offset).saturating_add(i32::from(self.width))
    }
}

/// How the last character of a measured string contributes to its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalAdvance {
    /// Every character contributes its full advance.
    Full,
    /// The final character contributes only its ink extent, dropping the
    /// trailing spacing column from the measurement.
    InkOnly,
}

/// A bitmap font asset.
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Bitmap pool shared by all glyphs
    pub bitmap: &'static [u8],
    /// Glyphs for `first..=last`, in order
    pub glyphs: &'static [Glyph],
    /// First code point covered
    pub first: u8,
    /// Last code point covered
    pub last: u8,
    /// Line height
    pub y_advance: u8,
    /// Measurement rule for the final character of a string
    pub final_advance: FinalAdvance,
}

impl Font {
    /// Glyph for `c`, or `None` outside `first..=last`.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let code = u8::try_from(u32::from(c)).ok()?;
        if code < self.first || code > self.last {
            return None;
        }
        self.glyphs.get(usize::from(code.wrapping_sub(self.first)))
    }

    /// Bitmap bytes of `glyph`. Truncated if the pool is shorter than the
    /// glyph claims.
    pub fn bitmap_of(&self, glyph: &Glyph) -> &'static [u8] {
        let start = usize::from(glyph.bitmap_offset);
        let len = glyph.stride().saturating_mul(usize::from(glyph.height));
        let end = start.saturating_add(len).min(self.bitmap.len());
        self.bitmap.get(start..end).unwrap_or(&[])
    }
}
