//! Display wiring and bus configuration
//!
//! Configuration is validated once, at setup, by [`DisplayConfig::validate`].
//! Nothing on the drawing path re-checks it.

/// Largest panel dimension the SSD1351 GDDRAM can address.
pub const MAX_PANEL_DIMENSION: u16 = 128;

/// Fastest SPI clock the controller is specified for.
pub const MAX_SPI_FREQUENCY_HZ: u32 = 30_000_000;

/// SPI modes (CPOL, CPHA)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

/// Bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// SPI mode (CPOL, CPHA)
    pub mode: SpiMode,
    /// Bit order
    pub bit_order: BitOrder,
}

impl SpiConfig {
    /// Mode 0, MSB first, at the controller's maximum clock.
    pub const fn ssd1351() -> Self {
        Self {
            frequency: MAX_SPI_FREQUENCY_HZ,
            mode: SpiMode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// Pin numbers used to wire the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Chip select
    pub cs: u8,
    /// Data / command select
    pub dc: u8,
    /// Reset line, if wired
    pub reset: Option<u8>,
    /// Serial data out
    pub mosi: u8,
    /// Serial clock
    pub sclk: u8,
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Pin wiring
    pub pins: PinAssignment,
    /// Bus settings
    pub spi: SpiConfig,
}

impl DisplayConfig {
    /// A 128×128 panel on the default wiring (CS 10, DC 15, RST 14, MOSI 11, SCK 13).
    pub const fn ssd1351_128x128() -> Self {
        Self {
            width: 128,
            height: 128,
            pins: PinAssignment {
                cs: 10,
                dc: 15,
                reset: Some(14),
                mosi: 11,
                sclk: 13,
            },
            spi: SpiConfig::ssd1351(),
        }
    }

    /// A 128×96 panel on the default wiring.
    pub const fn ssd1351_128x96() -> Self {
        let mut config = Self::ssd1351_128x128();
        config.height = 96;
        config
    }

    /// Check the configuration once, before the first bus transaction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_PANEL_DIMENSION {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if self.height == 0 || self.height > MAX_PANEL_DIMENSION {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        if self.spi.frequency == 0 || self.spi.frequency > MAX_SPI_FREQUENCY_HZ {
            return Err(ConfigError::InvalidFrequency(self.spi.frequency));
        }
        if self.spi.mode != SpiMode::Mode0 || self.spi.bit_order != BitOrder::MsbFirst {
            return Err(ConfigError::UnsupportedSpiMode);
        }

        let p = &self.pins;
        let mut used: heapless::Vec<u8, 5> = heapless::Vec::new();
        for pin in [Some(p.cs), Some(p.dc), p.reset, Some(p.mosi), Some(p.sclk)]
            .into_iter()
            .flatten()
        {
            if used.contains(&pin) {
                return Err(ConfigError::PinConflict(pin));
            }
            // At most five pins are pushed into a capacity-5 vector.
            let _ = used.push(pin);
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::ssd1351_128x128()
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width is zero or larger than the controller can address
    InvalidWidth(u16),
    /// Height is zero or larger than the controller can address
    InvalidHeight(u16),
    /// SPI clock is zero or faster than the controller supports
    InvalidFrequency(u32),
    /// The controller only speaks SPI mode 0, MSB first
    UnsupportedSpiMode,
    /// The same pin is assigned to two signals
    PinConflict(u8),
    /// Configured geometry does not match the surface it is applied to
    GeometryMismatch,
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidWidth(w) => write!(f, "Invalid panel width {w}"),
            Self::InvalidHeight(h) => write!(f, "Invalid panel height {h}"),
            Self::InvalidFrequency(hz) => write!(f, "Invalid SPI frequency {hz} Hz"),
            Self::UnsupportedSpiMode => write!(f, "SPI must be mode 0, MSB first"),
            Self::PinConflict(pin) => write!(f, "Pin {pin} is assigned twice"),
            Self::GeometryMismatch => write!(f, "Configured geometry does not match surface"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DisplayConfig::default().validate(), Ok(()));
        assert_eq!(DisplayConfig::ssd1351_128x96().validate(), Ok(()));
    }

    #[test]
    fn rejects_oversized_panel() {
        let mut config = DisplayConfig::default();
        config.width = 129;
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(129)));

        let mut config = DisplayConfig::default();
        config.height = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHeight(0)));
    }

    #[test]
    fn rejects_clock_out_of_range() {
        let mut config = DisplayConfig::default();
        config.spi.frequency = MAX_SPI_FREQUENCY_HZ + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFrequency(MAX_SPI_FREQUENCY_HZ + 1))
        );
    }

    #[test]
    fn rejects_wrong_spi_mode() {
        let mut config = DisplayConfig::default();
        config.spi.mode = SpiMode::Mode3;
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedSpiMode));
    }

    #[test]
    fn rejects_shared_cs_and_dc() {
        let mut config = DisplayConfig::default();
        config.pins.dc = config.pins.cs;
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(10)));
    }

    #[test]
    fn reset_pin_is_optional() {
        let mut config = DisplayConfig::default();
        config.pins.reset = None;
        assert_eq!(config.validate(), Ok(()));
    }
}
