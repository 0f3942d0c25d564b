//! Property-based tests for display configuration validation.
//! Every geometry and clock in range is accepted; everything else is rejected
//! with the matching error, never a panic.
#![allow(clippy::arithmetic_side_effects)]

use platform::config::{MAX_PANEL_DIMENSION, MAX_SPI_FREQUENCY_HZ};
use platform::{ConfigError, DisplayConfig};

proptest::proptest! {
    /// Any geometry within 1..=128 on both axes validates.
    #[test]
    fn in_range_geometry_is_accepted(w in 1u16..=MAX_PANEL_DIMENSION, h in 1u16..=MAX_PANEL_DIMENSION) {
        let mut config = DisplayConfig::default();
        config.width = w;
        config.height = h;
        assert_eq!(config.validate(), Ok(()));
    }

    /// Widths the controller cannot address are reported as such.
    #[test]
    fn oversized_width_is_rejected(w in (MAX_PANEL_DIMENSION + 1)..=u16::MAX) {
        let mut config = DisplayConfig::default();
        config.width = w;
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(w)));
    }

    /// Heights the controller cannot address are reported as such.
    #[test]
    fn oversized_height_is_rejected(h in (MAX_PANEL_DIMENSION + 1)..=u16::MAX) {
        let mut config = DisplayConfig::default();
        config.height = h;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHeight(h)));
    }

    /// The SPI clock is accepted exactly on 1 Hz..=30 MHz.
    #[test]
    fn clock_range_is_enforced(hz in 0u32..=u32::MAX) {
        let mut config = DisplayConfig::default();
        config.spi.frequency = hz;
        let ok = hz != 0 && hz <= MAX_SPI_FREQUENCY_HZ;
        if ok {
            assert_eq!(config.validate(), Ok(()));
        } else {
            assert_eq!(config.validate(), Err(ConfigError::InvalidFrequency(hz)));
        }
    }

    /// Wiring CS and DC to the same pin is always a conflict.
    #[test]
    fn shared_cs_dc_is_a_conflict(pin in 0u8..=u8::MAX) {
        let mut config = DisplayConfig::default();
        config.pins.cs = pin;
        config.pins.dc = pin;
        config.pins.reset = None;
        // Keep the bus pins clear of the shared one.
        config.pins.mosi = pin.wrapping_add(1);
        config.pins.sclk = pin.wrapping_add(2);
        assert_eq!(config.validate(), Err(ConfigError::PinConflict(pin)));
    }
}
