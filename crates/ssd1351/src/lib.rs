//! SSD1351 color OLED driver
//!
//! Drives an SSD1351 controller over a shared SPI bus in one of three pixel
//! formats, through one of two drawing strategies.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ Ssd1351<S>  (bring-up, sleep, text state, DrawTarget) │
//! └───────────────┬───────────────────────┬───────────────┘
//!                 │                       │
//!     raster::Canvas (shapes)     text::TextCursor (glyphs)
//!                 │                       │
//!                 └───────────┬───────────┘
//!                             ↓
//!            surface::Surface  ─ Direct  (writes through)
//!                              ─ Buffered (RAM copy + flush)
//!                             ↓
//!                  platform::Transport  ─ SpiInterface (embedded-hal)
//!                                       ─ emulator / recorder (tests)
//! ```
//!
//! Pixel format and panel geometry are fixed at compile time: a
//! `Direct<_, Packed16, 128, 96>` and a `Buffered<_, HighColor, 128, 128>`
//! are distinct types and nothing on the drawing path branches on either.
//!
//! # Features
//!
//! - `std`: standard library support (`std::error::Error` impls)
//! - `defmt`: defmt logging on hardware targets
//!
//! # Example
//!
//! ```
//! use platform::mocks::RecordingTransport;
//! use ssd1351::{Direct, Packed16, Ssd1351};
//!
//! let surface: Direct<RecordingTransport, Packed16, 128, 128> =
//!     Direct::new(RecordingTransport::new());
//! let mut display = Ssd1351::new(surface);
//! display.init().ok();
//! display.fill_rect(10, 10, 20, 20, Packed16(0xF800)).ok();
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::doc_markdown)] // hex opcodes and register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // every error is the transport's
#![allow(clippy::too_many_arguments)] // drawing calls mirror the classic GFX signatures
#![allow(clippy::similar_names)] // x0/y0/x1/y1

pub mod color;
pub mod command;
pub mod display;
pub mod font;
pub mod fonts;
pub mod interface;
pub mod raster;
pub mod surface;
pub mod text;

// Re-export the driver front-end
pub use display::{hardware_reset, Ssd1351};

// Re-export drawing strategies and primitives
pub use raster::Canvas;
pub use surface::{Buffered, Direct, Surface};

// Re-export pixel formats
pub use color::{over, HighColor, Indexed8, Packed16, PixelFormat, Rgba};

// Re-export text
pub use font::{FinalAdvance, Font, Glyph};
pub use text::{Align, TextCursor};

// Re-export the hardware transport
pub use interface::SpiInterface;
