//! Display abstraction layer

use embedded_graphics::prelude::*;

/// Display driver trait for SPI color displays
pub trait DisplayDriver: DrawTarget {
    /// Error type for display operations
    type DriverError: core::fmt::Debug;

    /// Push any pending drawing to the panel.
    ///
    /// Drivers that write straight to controller RAM treat this as a no-op.
    fn flush(&mut self) -> Result<(), Self::DriverError>;

    /// Enter sleep mode (panel dark, RAM retained)
    fn sleep(&mut self) -> Result<(), Self::DriverError>;

    /// Wake from sleep mode
    fn wake(&mut self) -> Result<(), Self::DriverError>;

    /// Get display dimensions
    fn dimensions(&self) -> Size {
        self.bounding_box().size
    }
}

/// Controller pixel depth as selected at bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorDepth {
    /// 65k colors, two bytes per pixel
    Colors65k,
    /// 262k colors, three bytes per pixel (low 6 bits significant)
    Colors262k,
}

impl ColorDepth {
    /// Bytes the controller expects per pixel in this depth.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Colors65k => 2,
            Self::Colors262k => 3,
        }
    }
}

/// Static description of a display panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel depth on the wire
    pub depth: ColorDepth,
}
