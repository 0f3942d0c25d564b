//! Drawing surfaces
//!
//! A [`Surface`] is the primitive contract every shape and glyph is built
//! on: set one pixel, fill a row, fill a column, fill a rectangle, flush.
//! Two strategies implement it:
//!
//! - [`Direct`]: every primitive is streamed to controller RAM immediately.
//! - [`Buffered`]: primitives mutate an owned `W×H` array; [`Surface::flush`]
//!   streams the whole array.
//!
//! Both clip to `[0, W) × [0, H)` before touching the bus or the buffer.
//! Out-of-range geometry is dropped silently; it is never an error.

// Coordinates are widened to i64 before any arithmetic and narrowed back only
// after clipping to the panel, which is at most 128×128.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects,
)]

mod buffered;
mod direct;

pub use buffered::Buffered;
pub use direct::Direct;

use platform::{Boundary, Transport};

use crate::color::PixelFormat;
use crate::command::Command;

/// Largest panel dimension the controller can address.
pub const MAX_DIMENSION: usize = 128;

/// Primitive drawing contract shared by [`Direct`] and [`Buffered`].
///
/// Coordinates are signed and may lie anywhere; implementations clip.
/// Errors only ever come from the transport.
pub trait Surface {
    /// Pixel encoding of this surface
    type Color: PixelFormat;

    /// Channel to the controller
    type Bus: Transport<Error = Self::Error>;

    /// Transport error
    type Error: core::fmt::Debug;

    /// Width in pixels
    const WIDTH: usize;

    /// Height in pixels
    const HEIGHT: usize;

    /// Whether line drawing should batch runs of pixels into row/column
    /// fills. Worth it when every primitive costs a bus transaction.
    const COALESCE_RUNS: bool;

    /// Draw one pixel.
    fn set_pixel(&mut self, x: i32, y: i32, color: Self::Color) -> Result<(), Self::Error>;

    /// Draw `len` pixels from `(x, y)` to the right.
    fn fill_row(&mut self, x: i32, y: i32, len: i32, color: Self::Color)
        -> Result<(), Self::Error>;

    /// Draw `len` pixels from `(x, y)` downwards.
    fn fill_column(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Fill a `w×h` rectangle with its top-left corner at `(x, y)`.
    fn fill_region(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Self::Color,
    ) -> Result<(), Self::Error>;

    /// Fill the whole surface.
    fn fill_all(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_region(0, 0, Self::WIDTH as i32, Self::HEIGHT as i32, color)
    }

    /// Push pending pixels to the panel.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// The transport, for controller commands that are not drawing.
    fn transport(&mut self) -> &mut Self::Bus;
}

// ---------------------------------------------------------------------------
// Clipping
// ---------------------------------------------------------------------------

/// A rectangle already clipped to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Region {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Region {
    /// Clip `(x, y, w, h)` against `[0, width) × [0, height)`.
    ///
    /// Each axis is handled independently: a negative origin shrinks the
    /// extent by the overhang, an extent past the far edge is cut back.
    /// Returns `None` when nothing is left.
    pub fn clip(x: i32, y: i32, w: i32, h: i32, width: usize, height: usize) -> Option<Self> {
        let (x, w) = clip_axis(x, w, width)?;
        let (y, h) = clip_axis(y, h, height)?;
        Some(Self { x, y, w, h })
    }

    /// Last column, inclusive.
    pub fn right(&self) -> usize {
        self.x + self.w - 1
    }

    /// Last row, inclusive.
    pub fn bottom(&self) -> usize {
        self.y + self.h - 1
    }
}

fn clip_axis(origin: i32, extent: i32, limit: usize) -> Option<(usize, usize)> {
    if extent <= 0 {
        return None;
    }
    let start = i64::from(origin).max(0);
    let end = (i64::from(origin) + i64::from(extent)).min(limit as i64);
    if start >= end {
        return None;
    }
    Some((start as usize, (end - start) as usize))
}

// ---------------------------------------------------------------------------
// Controller RAM access
// ---------------------------------------------------------------------------

/// Point the controller's address window at `region` and start a RAM write.
///
/// Must be called inside an open transaction.
pub(crate) fn open_window<T: Transport>(t: &mut T, region: &Region) -> Result<(), T::Error> {
    let x0 = region.x as u8;
    let x1 = region.right() as u8;
    let y0 = region.y as u8;
    let y1 = region.bottom() as u8;

    t.send_command(Command::ColumnAddress.opcode(), Boundary::Continue)?;
    t.send_data(&[x0], Boundary::Continue)?;
    t.send_data(&[x1], Boundary::Continue)?;
    t.send_command(Command::RowAddress.opcode(), Boundary::Continue)?;
    t.send_data(&[y0], Boundary::Continue)?;
    t.send_data(&[y1], Boundary::Continue)?;
    t.send_command(Command::WriteRam.opcode(), Boundary::Continue)
}

/// Stream pixels into the open window; the last one ends the transaction.
pub(crate) fn stream<T, C, I>(t: &mut T, pixels: I) -> Result<(), T::Error>
where
    T: Transport,
    C: PixelFormat,
    I: IntoIterator<Item = C>,
{
    let mut pixels = pixels.into_iter().peekable();
    while let Some(pixel) = pixels.next() {
        let boundary = Boundary::closing_if(pixels.peek().is_none());
        t.send_data(pixel.encode().as_bytes(), boundary)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn clip_inside_is_identity() {
        assert_eq!(
            Region::clip(2, 3, 4, 5, 16, 16),
            Some(Region { x: 2, y: 3, w: 4, h: 5 })
        );
    }

    #[test]
    fn clip_far_edge_shrinks_extent() {
        assert_eq!(
            Region::clip(14, 15, 10, 10, 16, 16),
            Some(Region { x: 14, y: 15, w: 2, h: 1 })
        );
    }

    #[test]
    fn clip_negative_origin_per_axis() {
        assert_eq!(
            Region::clip(-3, 2, 5, 4, 16, 16),
            Some(Region { x: 0, y: 2, w: 2, h: 4 })
        );
        assert_eq!(
            Region::clip(2, -1, 3, 3, 16, 16),
            Some(Region { x: 2, y: 0, w: 3, h: 2 })
        );
    }

    #[test]
    fn clip_rejects_empty_and_outside() {
        assert_eq!(Region::clip(0, 0, 0, 4, 16, 16), None);
        assert_eq!(Region::clip(0, 0, 4, -2, 16, 16), None);
        assert_eq!(Region::clip(16, 0, 4, 4, 16, 16), None);
        assert_eq!(Region::clip(0, 16, 4, 4, 16, 16), None);
        assert_eq!(Region::clip(-5, 0, 5, 4, 16, 16), None);
    }

    #[test]
    fn clip_survives_extreme_coordinates() {
        assert_eq!(Region::clip(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 16, 16), None);
        assert_eq!(
            Region::clip(i32::MIN, 0, i32::MAX, 1, 16, 16),
            None,
            "MIN + MAX = -1, still left of the panel"
        );
    }
}
