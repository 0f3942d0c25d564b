//! SSD1351 controller emulator
//!
//! A headless model of the controller side of the bus. [`Controller`]
//! implements [`platform::Transport`], so any surface or display from the
//! `ssd1351` crate can be pointed at it instead of real SPI hardware.
//!
//! The model decodes the subset of the command set the driver uses:
//!
//! | Opcode | Effect |
//! |--------|--------|
//! | `0x15` | column window, 2 params |
//! | `0x75` | row window, 2 params |
//! | `0x5C` | following data is pixel data |
//! | `0xA0` | remap; bits 7..6 select 65k or 262k color |
//! | `0xA1` | start line |
//! | `0xAE` / `0xAF` | sleep / wake |
//!
//! Everything else is accepted and ignored. Pixel data auto-advances
//! through the current window, wrapping from the last column to the next
//! row and from the last row back to the first, like GDDRAM does.
//!
//! # Example
//!
//! ```
//! use platform::{Boundary, Transport};
//! use ssd1351_emulator::Controller;
//!
//! let mut oled = Controller::new(128, 128);
//! oled.begin_transaction().unwrap();
//! oled.send_command(0x15, Boundary::Continue).unwrap();
//! oled.send_data(&[2, 2], Boundary::Continue).unwrap();
//! oled.send_command(0x75, Boundary::Continue).unwrap();
//! oled.send_data(&[3, 3], Boundary::Continue).unwrap();
//! oled.send_command(0x5C, Boundary::Continue).unwrap();
//! oled.send_data(&[0xF8, 0x00], Boundary::End).unwrap();
//! oled.end_transaction().unwrap();
//!
//! assert_eq!(oled.pixel(2, 3), Some([255, 0, 0]));
//! ```

// Desktop-only test fixture: GRAM indices are bounded by the 128×128 array
// and every window coordinate is masked to 7 bits before use.
#![allow(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use std::path::Path;

use platform::{Boundary, ColorDepth, Transport};

/// GDDRAM columns
pub const GRAM_WIDTH: usize = 128;
/// GDDRAM rows
pub const GRAM_HEIGHT: usize = 128;

const SET_COLUMN: u8 = 0x15;
const SET_ROW: u8 = 0x75;
const WRITE_RAM: u8 = 0x5C;
const SET_REMAP: u8 = 0xA0;
const START_LINE: u8 = 0xA1;
const DISPLAY_SLEEP: u8 = 0xAE;
const DISPLAY_WAKE: u8 = 0xAF;

/// Bus misuse detected by the emulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// `begin_transaction` while a transaction was already open
    NestedTransaction,
    /// Command or data sent with no transaction open
    OutsideTransaction,
    /// `end_transaction` with no transaction open
    UnbalancedEnd,
}

impl std::error::Error for ProtocolError {}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NestedTransaction => write!(f, "Transaction begun while one is open"),
            Self::OutsideTransaction => write!(f, "Bytes sent outside a transaction"),
            Self::UnbalancedEnd => write!(f, "Transaction ended without being begun"),
        }
    }
}

/// Inclusive GDDRAM address window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First column
    pub x0: u8,
    /// Last column
    pub x1: u8,
    /// First row
    pub y0: u8,
    /// Last row
    pub y1: u8,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            x0: 0,
            x1: (GRAM_WIDTH - 1) as u8,
            y0: 0,
            y1: (GRAM_HEIGHT - 1) as u8,
        }
    }
}

/// Emulated SSD1351
pub struct Controller {
    width: u32,
    height: u32,
    gram: Vec<[u8; 3]>,
    depth: ColorDepth,
    window: Window,
    column: u8,
    row: u8,
    command: Option<u8>,
    params: Vec<u8>,
    partial: Vec<u8>,
    awake: bool,
    start_line: u8,
    open: bool,
    last_boundary: Option<Boundary>,
    transactions: usize,
    unterminated: usize,
    pixels_written: usize,
}

impl Controller {
    /// Controller behind a `width`×`height` panel, straight out of reset:
    /// GDDRAM black, 65k color, full window, display asleep.
    pub fn new(width: u32, height: u32) -> Self {
        tracing::debug!(width, height, "Creating SSD1351 emulator");
        Self {
            width: width.min(GRAM_WIDTH as u32),
            height: height.min(GRAM_HEIGHT as u32),
            gram: vec![[0; 3]; GRAM_WIDTH * GRAM_HEIGHT],
            depth: ColorDepth::Colors65k,
            window: Window::default(),
            column: 0,
            row: 0,
            command: None,
            params: Vec::new(),
            partial: Vec::new(),
            awake: false,
            start_line: 0,
            open: false,
            last_boundary: None,
            transactions: 0,
            unterminated: 0,
            pixels_written: 0,
        }
    }

    /// GDDRAM content at `(x, y)` as 8-bit RGB, or `None` outside GDDRAM.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= GRAM_WIDTH || y >= GRAM_HEIGHT {
            return None;
        }
        self.gram.get(y * GRAM_WIDTH + x).copied()
    }

    /// Coordinates of every visible pixel that is not black, row-major.
    pub fn lit_pixels(&self) -> Vec<(usize, usize)> {
        let (w, h) = (self.width as usize, self.height as usize);
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y).is_some_and(|p| p != [0, 0, 0]))
            .collect()
    }

    /// Color depth selected by the last remap command.
    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Current address window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// True after a wake command, false after sleep or reset.
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Start line register.
    pub fn start_line(&self) -> u8 {
        self.start_line
    }

    /// Completed transactions since creation.
    pub fn transaction_count(&self) -> usize {
        self.transactions
    }

    /// Completed transactions whose last byte was not sent with
    /// [`Boundary::End`].
    pub fn unterminated_count(&self) -> usize {
        self.unterminated
    }

    /// Pixels written to GDDRAM since creation.
    pub fn pixels_written(&self) -> usize {
        self.pixels_written
    }

    /// Forget traffic counters, keeping GDDRAM and registers.
    pub fn reset_counters(&mut self) {
        self.transactions = 0;
        self.unterminated = 0;
        self.pixels_written = 0;
    }

    /// Visible panel area as an image. A sleeping panel is dark.
    ///
    /// Image row `y` is GDDRAM row `y`, whatever the start line register
    /// holds. The driver pairs the start line with the remap's COM scan
    /// direction so the rows it addresses are the ones on the glass; the
    /// image shows that addressed area rather than modelling the scan.
    pub fn to_image(&self) -> image::RgbImage {
        let mut img = image::RgbImage::new(self.width, self.height);
        if !self.awake {
            return img;
        }
        for (x, y, px) in img.enumerate_pixels_mut() {
            if let Some(rgb) = self.pixel(x as usize, y as usize) {
                *px = image::Rgb(rgb);
            }
        }
        img
    }

    /// Save the visible panel to PNG (for testing and documentation).
    pub fn screenshot(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        self.to_image().save(path)?;
        Ok(())
    }

    fn execute(&mut self, opcode: u8) {
        tracing::trace!("command {opcode:#04X}");
        self.command = Some(opcode);
        self.params.clear();
        self.partial.clear();
        match opcode {
            DISPLAY_SLEEP => {
                tracing::debug!("Emulator: entering sleep mode");
                self.awake = false;
            }
            DISPLAY_WAKE => {
                tracing::debug!("Emulator: waking from sleep");
                self.awake = true;
            }
            WRITE_RAM => {
                self.column = self.window.x0;
                self.row = self.window.y0;
            }
            _ => {}
        }
    }

    fn parameter(&mut self, opcode: u8, byte: u8) {
        self.params.push(byte);
        match (opcode, self.params.as_slice()) {
            (SET_COLUMN, &[start, end]) => {
                self.window.x0 = start & 0x7F;
                self.window.x1 = end & 0x7F;
                self.column = self.window.x0;
                tracing::trace!(start, end, "column window");
            }
            (SET_ROW, &[start, end]) => {
                self.window.y0 = start & 0x7F;
                self.window.y1 = end & 0x7F;
                self.row = self.window.y0;
                tracing::trace!(start, end, "row window");
            }
            (SET_REMAP, &[remap]) => {
                self.depth = match remap >> 6 {
                    0b10 | 0b11 => ColorDepth::Colors262k,
                    _ => ColorDepth::Colors65k,
                };
                tracing::debug!(depth = ?self.depth, "Emulator: remap");
            }
            (START_LINE, &[line]) => self.start_line = line & 0x7F,
            _ => {}
        }
    }

    fn pixel_byte(&mut self, byte: u8) {
        self.partial.push(byte);
        if self.partial.len() < self.depth.bytes_per_pixel() {
            return;
        }
        let rgb = decode(self.depth, &self.partial);
        self.partial.clear();

        let index = usize::from(self.row) * GRAM_WIDTH + usize::from(self.column);
        if let Some(cell) = self.gram.get_mut(index) {
            *cell = rgb;
        }
        self.pixels_written += 1;
        self.advance();
    }

    fn advance(&mut self) {
        let w = self.window;
        if self.column >= w.x1 {
            self.column = w.x0;
            self.row = if self.row >= w.y1 { w.y0 } else { self.row + 1 };
        } else {
            self.column += 1;
        }
    }

    fn check_open(&self) -> Result<(), ProtocolError> {
        if self.open {
            Ok(())
        } else {
            tracing::debug!("Emulator: bytes outside a transaction");
            Err(ProtocolError::OutsideTransaction)
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(GRAM_WIDTH as u32, GRAM_HEIGHT as u32)
    }
}

/// Expand a wire pixel to 8-bit RGB, replicating high bits into the low ones.
fn decode(depth: ColorDepth, bytes: &[u8]) -> [u8; 3] {
    match (depth, bytes) {
        (ColorDepth::Colors65k, &[hi, lo]) => {
            let v = u16::from_be_bytes([hi, lo]);
            let r = (v >> 11) as u8;
            let g = ((v >> 5) & 0x3F) as u8;
            let b = (v & 0x1F) as u8;
            [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
        }
        (ColorDepth::Colors262k, &[r, g, b]) => [six_to_eight(r), six_to_eight(g), six_to_eight(b)],
        _ => [0; 3],
    }
}

fn six_to_eight(c: u8) -> u8 {
    let c = c & 0x3F;
    (c << 2) | (c >> 4)
}

impl Transport for Controller {
    type Error = ProtocolError;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        if self.open {
            tracing::debug!("Emulator: nested transaction");
            return Err(ProtocolError::NestedTransaction);
        }
        self.open = true;
        self.last_boundary = None;
        Ok(())
    }

    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error> {
        self.check_open()?;
        self.last_boundary = Some(boundary);
        self.execute(command);
        Ok(())
    }

    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error> {
        self.check_open()?;
        self.last_boundary = Some(boundary);
        let Some(opcode) = self.command else {
            return Ok(());
        };
        for &byte in data {
            if opcode == WRITE_RAM {
                self.pixel_byte(byte);
            } else {
                self.parameter(opcode, byte);
            }
        }
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        if !self.open {
            tracing::debug!("Emulator: unbalanced end");
            return Err(ProtocolError::UnbalancedEnd);
        }
        self.open = false;
        self.transactions += 1;
        if matches!(self.last_boundary, Some(Boundary::Continue)) {
            self.unterminated += 1;
        }
        Ok(())
    }
}
