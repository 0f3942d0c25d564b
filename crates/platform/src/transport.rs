//! Transaction-scoped command/data channel to a display controller
//!
//! A display controller on a shared SPI bus is addressed in *transactions*:
//! chip-select is asserted, a run of command and data bytes is clocked out,
//! and the bus is released so other devices on the same bus get a turn.
//!
//! ```text
//! begin_transaction()
//!   send_command(0x15, Continue)   DC low
//!   send_data(&[x0], Continue)     DC high
//!   ...
//!   send_data(&[px], End)          wait for the last byte to leave the wire
//! end_transaction()                release the bus
//! ```
//!
//! Transactions never nest: every `begin_transaction` is matched by exactly
//! one `end_transaction` before the next `begin_transaction`. Drivers open
//! them through [`Transport::transaction`], which closes the transaction
//! even when a byte in the middle fails to go out.

/// How a byte run relates to the enclosing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Boundary {
    /// Keep the transaction open; more bytes follow immediately.
    Continue,
    /// Final bytes of the transaction; block until they are on the wire.
    End,
}

impl Boundary {
    /// `End` when `last` is true, otherwise `Continue`.
    #[inline]
    pub const fn closing_if(last: bool) -> Self {
        if last {
            Self::End
        } else {
            Self::Continue
        }
    }
}

/// Blocking command/data channel to a display controller.
///
/// The channel is not reentrant. Implementations only have to be correct
/// when driven by a single logical caller at a time.
pub trait Transport {
    /// Error type
    type Error: core::fmt::Debug;

    /// Claim the bus and select the controller.
    fn begin_transaction(&mut self) -> Result<(), Self::Error>;

    /// Send one command byte.
    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error>;

    /// Send parameter or pixel bytes.
    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error>;

    /// Deselect the controller and release the bus.
    fn end_transaction(&mut self) -> Result<(), Self::Error>;

    /// Run `body` inside one transaction.
    ///
    /// The bus is released whether or not `body` succeeds. When both the
    /// body and the release fail, the body's error is returned.
    fn transaction<R, F>(&mut self, body: F) -> Result<R, Self::Error>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<R, Self::Error>,
    {
        self.begin_transaction()?;
        let result = body(self);
        let released = self.end_transaction();
        let value = result?;
        released?;
        Ok(value)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    #[inline]
    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        T::begin_transaction(self)
    }

    #[inline]
    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error> {
        T::send_command(self, command, boundary)
    }

    #[inline]
    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error> {
        T::send_data(self, data, boundary)
    }

    #[inline]
    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        T::end_transaction(self)
    }
}

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// SPI bus error
    Communication,
    /// Chip-select or data/command pin error
    Gpio,
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "SPI communication error"),
            Self::Gpio => write!(f, "GPIO error"),
        }
    }
}
