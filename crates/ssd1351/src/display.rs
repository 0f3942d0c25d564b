//! SSD1351 display
//!
//! [`Ssd1351`] owns a [`Surface`] and the text state for it, and adds the
//! controller-level operations that are not drawing: bring-up, sleep and
//! the embedded-graphics integration.
//!
//! # Bring-up
//!
//! ```text
//! hardware_reset(rst, delay)   RST HIGH 5 ms → LOW 20 ms → HIGH 150 ms
//! init()                       unlock, sleep, clock, remap, start line,
//!                              offset, VDD, normal mode, wake
//! ```
//!
//! The reset pulse is optional; boards that tie RST high skip it.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use platform::{
    Boundary, ConfigError, DisplayConfig, DisplayDriver, DisplayInfo, Transport, TransportError,
};

use crate::color::{PixelFormat, Rgba};
use crate::command::{self, Command};
use crate::font::Font;
use crate::raster::Canvas;
use crate::surface::Surface;
use crate::text::{Align, TextCursor};

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Pulse the reset line.
///
/// RST HIGH 5 ms → LOW 20 ms → HIGH 150 ms.
pub fn hardware_reset<RST, D>(rst: &mut RST, delay: &mut D) -> Result<(), TransportError>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_high().map_err(|_| TransportError::Gpio)?;
    delay.delay_ms(command::RESET_SETTLE_MS);
    rst.set_low().map_err(|_| TransportError::Gpio)?;
    delay.delay_ms(command::RESET_PULSE_MS);
    rst.set_high().map_err(|_| TransportError::Gpio)?;
    delay.delay_ms(command::RESET_RECOVERY_MS);
    Ok(())
}

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// SSD1351 display on top of a drawing surface.
///
/// The surface decides whether drawing is streamed
/// ([`Direct`](crate::surface::Direct)) or buffered
/// ([`Buffered`](crate::surface::Buffered)); this type is the same for both.
pub struct Ssd1351<S: Surface> {
    surface: S,
    text: TextCursor<S::Color>,
}

impl<S: Surface> Ssd1351<S> {
    /// Wrap a surface. Text defaults to white [`fonts::MINI5`](crate::fonts::MINI5).
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            text: TextCursor::new(S::Color::from(Rgba::WHITE)),
        }
    }

    /// Wrap a surface after checking `config` against it.
    ///
    /// Fails if the configuration is invalid or describes a panel of a
    /// different size than the surface.
    pub fn with_config(config: &DisplayConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;
        if usize::from(config.width) != S::WIDTH || usize::from(config.height) != S::HEIGHT {
            return Err(ConfigError::GeometryMismatch);
        }
        Ok(Self::new(surface))
    }

    /// Panel geometry and color depth.
    pub fn info(&self) -> DisplayInfo {
        DisplayInfo {
            width: u32::try_from(S::WIDTH).unwrap_or(u32::MAX),
            height: u32::try_from(S::HEIGHT).unwrap_or(u32::MAX),
            depth: <S::Color as PixelFormat>::DEPTH,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        S::WIDTH
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        S::HEIGHT
    }

    /// The underlying surface.
    pub fn surface(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give back the surface.
    pub fn release(self) -> S {
        self.surface
    }

    // -----------------------------------------------------------------------
    // Controller commands
    // -----------------------------------------------------------------------

    /// Run the bring-up script in one transaction.
    ///
    /// The remap parameter selects the color depth of the surface's pixel
    /// format; the start line follows the panel height.
    pub fn init(&mut self) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        {
            let info = self.info();
            defmt::debug!("ssd1351: init {=u32}x{=u32} {}", info.width, info.height, info.depth);
        }

        let script = command::init_script(<S::Color as PixelFormat>::REMAP, S::HEIGHT);
        self.surface.transport().transaction(|t| {
            let mut steps = script.iter().peekable();
            while let Some(step) = steps.next() {
                let last = steps.peek().is_none();
                match step.param {
                    Some(param) => {
                        t.send_command(step.command.opcode(), Boundary::Continue)?;
                        t.send_data(&[param], Boundary::closing_if(last))?;
                    }
                    None => t.send_command(step.command.opcode(), Boundary::closing_if(last))?,
                }
            }
            Ok(())
        })
    }

    /// Blank the panel (`true`) or show it again (`false`). RAM is kept.
    pub fn sleep(&mut self, asleep: bool) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ssd1351: sleep={=bool}", asleep);

        let command = if asleep {
            Command::DisplaySleep
        } else {
            Command::DisplayWake
        };
        self.surface
            .transport()
            .transaction(|t| t.send_command(command.opcode(), Boundary::End))
    }

    /// Push buffered drawing to the panel. Does nothing on a direct surface.
    pub fn flush(&mut self) -> Result<(), S::Error> {
        self.surface.flush()
    }

    // -----------------------------------------------------------------------
    // Shapes
    // -----------------------------------------------------------------------

    /// Draw one pixel.
    pub fn set_pixel(&mut self, x: i16, y: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_pixel(x, y, color)
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.fill_rect(x, y, w, h, color)
    }

    /// Fill the whole panel.
    pub fn fill_screen(&mut self, color: S::Color) -> Result<(), S::Error> {
        self.surface.fill_screen(color)
    }

    /// Horizontal line.
    pub fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_fast_hline(x, y, w, color)
    }

    /// Vertical line.
    pub fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_fast_vline(x, y, h, color)
    }

    /// Line between two inclusive endpoints.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_line(x0, y0, x1, y1, color)
    }

    /// Rectangle outline.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_rect(x, y, w, h, color)
    }

    /// Circle outline.
    pub fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.draw_circle(x0, y0, r, color)
    }

    /// Filled circle.
    pub fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: S::Color) -> Result<(), S::Error> {
        self.surface.fill_circle(x0, y0, r, color)
    }

    /// Triangle outline.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: S::Color,
    ) -> Result<(), S::Error> {
        self.surface.draw_triangle(x0, y0, x1, y1, x2, y2, color)
    }

    /// Filled triangle.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: S::Color,
    ) -> Result<(), S::Error> {
        self.surface.fill_triangle(x0, y0, x1, y1, x2, y2, color)
    }

    /// Rounded rectangle outline.
    pub fn draw_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: S::Color,
    ) -> Result<(), S::Error> {
        self.surface.draw_round_rect(x, y, w, h, r, color)
    }

    /// Filled rounded rectangle.
    pub fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: S::Color,
    ) -> Result<(), S::Error> {
        self.surface.fill_round_rect(x, y, w, h, r, color)
    }

    /// 1-bit bitmap, rows padded to whole bytes, MSB leftmost.
    pub fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bitmap: &[u8],
        w: i16,
        h: i16,
        color: S::Color,
    ) -> Result<(), S::Error> {
        self.surface.draw_bitmap(x, y, bitmap, w, h, color)
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Text state.
    pub fn text(&mut self) -> &mut TextCursor<S::Color> {
        &mut self.text
    }

    /// Move the text cursor; `x` becomes the line start.
    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.text.set_cursor(x, y);
    }

    /// Text color and optional cell background.
    pub fn set_text_color(&mut self, fg: S::Color, bg: Option<S::Color>) {
        self.text.set_color(fg, bg);
    }

    /// Text scale factor.
    pub fn set_text_size(&mut self, size: u8) {
        self.text.set_size(size);
    }

    /// Wrap text at the right edge.
    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.text.set_wrap(wrap);
    }

    /// Text font.
    pub fn set_font(&mut self, font: Font) {
        self.text.set_font(font);
    }

    /// Write one character at the cursor.
    pub fn write_char(&mut self, c: char) -> Result<(), S::Error> {
        self.text.write_char(&mut self.surface, c)
    }

    /// Write a string at the cursor.
    pub fn print(&mut self, text: &str) -> Result<(), S::Error> {
        self.text.write_str(&mut self.surface, text)
    }

    /// Bounding box of `text` written from `(x, y)`.
    pub fn text_bounds(&self, text: &str, x: i16, y: i16) -> Rectangle {
        self.text.text_bounds(text, x, y, S::WIDTH)
    }

    /// Draw `text` anchored at `(x, y)`, leaving the cursor where it was.
    pub fn draw_aligned_text(&mut self, text: &str, x: i16, y: i16, align: Align) -> Result<(), S::Error> {
        self.text
            .draw_aligned_text(&mut self.surface, text, x, y, align)
    }
}

/// `write!` support. Transport errors surface as [`core::fmt::Error`].
impl<S: Surface> core::fmt::Write for Ssd1351<S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s).map_err(|_| core::fmt::Error)
    }
}

// ---------------------------------------------------------------------------
// embedded-graphics
// ---------------------------------------------------------------------------

impl<S: Surface> OriginDimensions for Ssd1351<S> {
    fn size(&self) -> Size {
        let info = self.info();
        Size::new(info.width, info.height)
    }
}

impl<S: Surface> DrawTarget for Ssd1351<S> {
    type Color = Rgb888;
    type Error = S::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let color = S::Color::from(Rgba::from(color));
            self.surface.set_pixel(point.x, point.y, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let w = i32::try_from(area.size.width).unwrap_or(i32::MAX);
        let h = i32::try_from(area.size.height).unwrap_or(i32::MAX);
        let color = S::Color::from(Rgba::from(color));
        self.surface
            .fill_region(area.top_left.x, area.top_left.y, w, h, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.surface.fill_all(S::Color::from(Rgba::from(color)))
    }
}

// ---------------------------------------------------------------------------
// platform::DisplayDriver implementation
// ---------------------------------------------------------------------------

impl<S: Surface> DisplayDriver for Ssd1351<S> {
    type DriverError = S::Error;

    fn flush(&mut self) -> Result<(), Self::DriverError> {
        self.surface.flush()
    }

    fn sleep(&mut self) -> Result<(), Self::DriverError> {
        Ssd1351::sleep(self, true)
    }

    fn wake(&mut self) -> Result<(), Self::DriverError> {
        Ssd1351::sleep(self, false)
    }
}
