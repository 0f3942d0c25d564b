//! Framebuffered surface
//!
//! Drawing only touches an owned `[[C; W]; H]` array. [`Surface::flush`]
//! streams the array to the panel row by row and leaves it intact, so the
//! buffer behaves as the persistent scene rather than a back buffer.
//!
//! Cells are combined with [`PixelFormat::store`]: overwrite for
//! [`Packed16`](crate::color::Packed16) and
//! [`Indexed8`](crate::color::Indexed8), composite-over for
//! [`HighColor`](crate::color::HighColor).
//!
//! A 128×128 [`HighColor`](crate::color::HighColor) buffer is 64 KiB. On
//! small targets keep the surface in a `static` rather than on the stack.

// Indices come out of `Region::clip` and are in range for the array; their
// sums never exceed 128.
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use platform::Transport;

use super::{open_window, stream, Region, Surface, MAX_DIMENSION};
use crate::color::PixelFormat;

/// Surface backed by an in-memory pixel array.
pub struct Buffered<T, C, const W: usize, const H: usize> {
    transport: T,
    cells: [[C; W]; H],
}

impl<T, C, const W: usize, const H: usize> Buffered<T, C, W, H>
where
    T: Transport,
    C: PixelFormat,
{
    const GEOMETRY: () = assert!(
        W > 0 && H > 0 && W <= MAX_DIMENSION && H <= MAX_DIMENSION,
        "panel dimensions must be in 1..=128"
    );

    /// Take ownership of the transport with a zeroed buffer.
    pub fn new(transport: T) -> Self {
        let () = Self::GEOMETRY;
        Self {
            transport,
            cells: [[C::default(); W]; H],
        }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Read back one cell; `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<C> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.cells.get(y)?.get(x).copied()
    }

    /// The whole buffer, row-major.
    pub fn buffer(&self) -> &[[C; W]; H] {
        &self.cells
    }

    /// Reset every cell to the zero pixel without touching the panel.
    pub fn clear(&mut self) {
        self.cells = [[C::default(); W]; H];
    }

    fn paint(&mut self, region: &Region, color: C) {
        for row in &mut self.cells[region.y..region.y + region.h] {
            for cell in &mut row[region.x..region.x + region.w] {
                *cell = C::store(*cell, color);
            }
        }
    }
}

impl<T, C, const W: usize, const H: usize> Surface for Buffered<T, C, W, H>
where
    T: Transport,
    C: PixelFormat,
{
    type Color = C;
    type Bus = T;
    type Error = T::Error;

    const WIDTH: usize = W;
    const HEIGHT: usize = H;
    const COALESCE_RUNS: bool = false;

    fn set_pixel(&mut self, x: i32, y: i32, color: C) -> Result<(), Self::Error> {
        if let Some(region) = Region::clip(x, y, 1, 1, W, H) {
            self.paint(&region, color);
        }
        Ok(())
    }

    fn fill_row(&mut self, x: i32, y: i32, len: i32, color: C) -> Result<(), Self::Error> {
        self.fill_region(x, y, len, 1, color)
    }

    fn fill_column(&mut self, x: i32, y: i32, len: i32, color: C) -> Result<(), Self::Error> {
        self.fill_region(x, y, 1, len, color)
    }

    fn fill_region(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: C,
    ) -> Result<(), Self::Error> {
        if let Some(region) = Region::clip(x, y, w, h, W, H) {
            self.paint(&region, color);
        }
        Ok(())
    }

    /// Clearing the screen replaces cells outright, even for formats that
    /// composite.
    fn fill_all(&mut self, color: C) -> Result<(), Self::Error> {
        for row in &mut self.cells {
            row.fill(color);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("flush {=usize}x{=usize}", W, H);

        let full = Region {
            x: 0,
            y: 0,
            w: W,
            h: H,
        };
        let mut rows = self.cells.iter();
        let Some(first) = rows.next() else {
            return Ok(());
        };
        self.transport.transaction(|t| {
            open_window(t, &full)?;
            stream(t, first.iter().copied())
        })?;
        for row in rows {
            self.transport.transaction(|t| stream(t, row.iter().copied()))?;
        }
        Ok(())
    }

    fn transport(&mut self) -> &mut T {
        &mut self.transport
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::color::{HighColor, Packed16};
    use platform::mocks::RecordingTransport;

    type Panel = Buffered<RecordingTransport, Packed16, 8, 4>;

    #[test]
    fn starts_zeroed() {
        let p: Panel = Buffered::new(RecordingTransport::new());
        assert!(p.buffer().iter().flatten().all(|c| *c == Packed16(0)));
    }

    #[test]
    fn drawing_never_touches_the_bus() {
        let mut p: Panel = Buffered::new(RecordingTransport::new());
        p.set_pixel(1, 1, Packed16(7)).unwrap();
        p.fill_region(0, 0, 8, 4, Packed16(9)).unwrap();
        assert!(p.release().events().is_empty());
    }

    #[test]
    fn negative_origin_is_clipped_per_axis() {
        let mut p: Panel = Buffered::new(RecordingTransport::new());
        p.fill_region(-2, 1, 4, 10, Packed16(5)).unwrap();

        for y in 0..4 {
            for x in 0..8 {
                let expected = if x < 2 && y >= 1 { 5 } else { 0 };
                assert_eq!(p.pixel(x, y), Some(Packed16(expected)), "({x},{y})");
            }
        }
    }

    #[test]
    fn read_back_outside_is_none() {
        let p: Panel = Buffered::new(RecordingTransport::new());
        assert_eq!(p.pixel(-1, 0), None);
        assert_eq!(p.pixel(8, 0), None);
        assert_eq!(p.pixel(0, 4), None);
    }

    #[test]
    fn flush_is_one_transaction_per_row_and_keeps_buffer() {
        let mut p: Panel = Buffered::new(RecordingTransport::new());
        p.set_pixel(7, 3, Packed16(0xFFFF)).unwrap();
        p.flush().unwrap();

        assert_eq!(p.pixel(7, 3), Some(Packed16(0xFFFF)));

        let t = p.release();
        assert_eq!(t.transaction_count(), 4);
        assert!(t.is_balanced());

        let bytes: Vec<u8> = t.data_bytes().collect();
        assert_eq!(&bytes[..4], &[0, 7, 0, 3]);
        assert_eq!(bytes.len(), 4 + 8 * 4 * 2);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xFF]);
    }

    #[test]
    fn high_color_composites_overlapping_fills() {
        let mut p: Buffered<RecordingTransport, HighColor, 4, 4> =
            Buffered::new(RecordingTransport::new());
        let red = HighColor::opaque(63, 0, 0);
        let clear = HighColor::new(0, 0, 63, 0);

        p.fill_region(0, 0, 2, 2, red).unwrap();
        p.fill_region(1, 1, 2, 2, clear).unwrap();

        assert_eq!(p.pixel(1, 1), Some(red), "transparent draw leaves cell");
        assert_eq!(p.pixel(2, 2), Some(HighColor::default()));
    }

    #[test]
    fn fill_all_overwrites_even_when_compositing() {
        let mut p: Buffered<RecordingTransport, HighColor, 4, 4> =
            Buffered::new(RecordingTransport::new());
        let ghost = HighColor::new(10, 20, 30, 0);
        p.fill_all(ghost).unwrap();
        assert_eq!(p.pixel(3, 3), Some(ghost));
    }
}
