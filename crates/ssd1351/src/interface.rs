//! 4-wire SPI transport
//!
//! | Signal | Direction | Role |
//! |--------|-----------|------|
//! | SCK, MOSI | Host → Display | owned by the [`SpiBus`] |
//! | CS  | Host → Display | LOW for the duration of a transaction |
//! | DC  | Host → Display | LOW = command byte, HIGH = parameter/pixel bytes |
//!
//! Chip-select is driven by hand rather than through `SpiDevice` because a
//! single transaction interleaves command and data bytes, toggling DC in
//! between, and `SpiDevice` cannot hold CS across a GPIO change.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use platform::{Boundary, Transport, TransportError};

/// SSD1351 attached to an SPI bus with dedicated CS and DC lines.
pub struct SpiInterface<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Wrap a configured bus and the two control pins.
    ///
    /// The bus must already run in mode 0, MSB first (see
    /// [`platform::DisplayConfig::validate`]).
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self { spi, dc, cs }
    }

    /// Give back the bus and pins.
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    fn write(&mut self, bytes: &[u8], boundary: Boundary) -> Result<(), TransportError> {
        self.spi
            .write(bytes)
            .map_err(|_| TransportError::Communication)?;
        if boundary == Boundary::End {
            // Block until the last byte has left the shift register.
            self.spi.flush().map_err(|_| TransportError::Communication)?;
        }
        Ok(())
    }
}

impl<SPI, DC, CS> Transport for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = TransportError;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(|_| TransportError::Gpio)
    }

    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(|_| TransportError::Gpio)?;
        self.write(&[command], boundary)
    }

    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| TransportError::Gpio)?;
        self.write(data, boundary)
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high().map_err(|_| TransportError::Gpio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
