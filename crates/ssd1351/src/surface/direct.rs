//! Unbuffered surface: every primitive goes straight to controller RAM.

// Pixel counts are products of clipped extents, at most 128×128.
#![allow(clippy::arithmetic_side_effects)]

use core::marker::PhantomData;

use platform::Transport;

use super::{open_window, stream, Region, Surface, MAX_DIMENSION};
use crate::color::PixelFormat;

/// Surface with no backing store.
///
/// Writing a pixel is transmitting it; nothing can be read back and
/// [`Surface::flush`] does nothing. Each primitive addresses a window sized
/// exactly to the clipped pixels it writes.
///
/// Rectangles wider than one row release the bus after every row so other
/// devices sharing it get a turn.
pub struct Direct<T, C, const W: usize, const H: usize> {
    transport: T,
    _color: PhantomData<C>,
}

impl<T, C, const W: usize, const H: usize> Direct<T, C, W, H>
where
    T: Transport,
    C: PixelFormat,
{
    const GEOMETRY: () = assert!(
        W > 0 && H > 0 && W <= MAX_DIMENSION && H <= MAX_DIMENSION,
        "panel dimensions must be in 1..=128"
    );

    /// Take ownership of the transport.
    pub fn new(transport: T) -> Self {
        let () = Self::GEOMETRY;
        Self {
            transport,
            _color: PhantomData,
        }
    }

    /// Give back the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// One transaction covering the whole region.
    fn write_block(&mut self, region: &Region, color: C) -> Result<(), T::Error> {
        self.transport.transaction(|t| {
            open_window(t, region)?;
            stream(t, core::iter::repeat(color).take(region.w * region.h))
        })
    }
}

impl<T, C, const W: usize, const H: usize> Surface for Direct<T, C, W, H>
where
    T: Transport,
    C: PixelFormat,
{
    type Color = C;
    type Bus = T;
    type Error = T::Error;

    const WIDTH: usize = W;
    const HEIGHT: usize = H;
    const COALESCE_RUNS: bool = true;

    fn set_pixel(&mut self, x: i32, y: i32, color: C) -> Result<(), Self::Error> {
        match Region::clip(x, y, 1, 1, W, H) {
            Some(region) => self.write_block(&region, color),
            None => Ok(()),
        }
    }

    fn fill_row(&mut self, x: i32, y: i32, len: i32, color: C) -> Result<(), Self::Error> {
        match Region::clip(x, y, len, 1, W, H) {
            Some(region) => self.write_block(&region, color),
            None => Ok(()),
        }
    }

    fn fill_column(&mut self, x: i32, y: i32, len: i32, color: C) -> Result<(), Self::Error> {
        // A one-column window auto-advances downwards, so the whole run is a
        // single burst.
        match Region::clip(x, y, 1, len, W, H) {
            Some(region) => self.write_block(&region, color),
            None => Ok(()),
        }
    }

    fn fill_region(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: C,
    ) -> Result<(), Self::Error> {
        let Some(region) = Region::clip(x, y, w, h, W, H) else {
            return Ok(());
        };

        let row = || core::iter::repeat(color).take(region.w);
        self.transport.transaction(|t| {
            open_window(t, &region)?;
            stream(t, row())
        })?;
        for _ in 1..region.h {
            self.transport.transaction(|t| stream(t, row()))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transport(&mut self) -> &mut T {
        &mut self.transport
    }
}
