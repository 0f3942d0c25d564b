//! Hardware Abstraction Layer for small SPI color displays
//!
//! This crate provides the trait-based seams the SSD1351 driver is written
//! against, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Drawing API (ssd1351 crate: raster, text)
//!         ↓
//! Surface strategies (direct / buffered)
//!         ↓
//! Platform HAL (this crate - Transport, DisplayDriver, config)
//!         ↓
//! embedded-hal SPI bus + GPIO, or the desktop emulator
//! ```
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```
//! use platform::{Boundary, Transport};
//!
//! fn wake<T: Transport>(bus: &mut T) -> Result<(), T::Error> {
//!     bus.transaction(|t| t.send_command(0xAF, Boundary::End))
//! }
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
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // hex opcodes and register names in doc comments
#![allow(clippy::must_use_candidate)] // callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod display;
pub mod mocks;
pub mod transport;

// Re-export main high-level traits
pub use display::{ColorDepth, DisplayDriver, DisplayInfo};
pub use transport::{Boundary, Transport, TransportError};

// Re-export configuration types
pub use config::{BitOrder, ConfigError, DisplayConfig, PinAssignment, SpiConfig, SpiMode};
