//! SSD1351 command set and bring-up script
//!
//! Only the opcodes the driver actually issues are listed. Each command byte
//! is sent with DC low; its parameters follow with DC high.

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// SSD1351 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set column start/end address, 2 data bytes.
    ColumnAddress = 0x15,
    /// Begin writing pixel data into the active window.
    WriteRam = 0x5C,
    /// Set row start/end address, 2 data bytes.
    RowAddress = 0x75,
    /// Remap / color depth, 1 data byte.
    Remap = 0xA0,
    /// Display start line, 1 data byte.
    StartLine = 0xA1,
    /// Display offset, 1 data byte.
    DisplayOffset = 0xA2,
    /// Normal display mode (show GDDRAM contents).
    NormalMode = 0xA6,
    /// Function selection (internal VDD regulator), 1 data byte.
    FunctionSelection = 0xAB,
    /// Display off (sleep).
    DisplaySleep = 0xAE,
    /// Display on (wake).
    DisplayWake = 0xAF,
    /// Front clock divider / oscillator frequency, 1 data byte.
    ClockDivider = 0xB3,
    /// MCU protection lock, 1 data byte.
    CommandLock = 0xFD,
}

impl Command {
    /// The opcode as sent on the wire.
    #[inline]
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Parameter constants
// ---------------------------------------------------------------------------

/// Unlock the MCU interface.
pub const COMMAND_LOCK_UNLOCK: u8 = 0x12;
/// Make commands A2, B1, B3, BB, BE accessible.
pub const COMMAND_LOCK_ACCESSIBLE: u8 = 0xB1;
/// Highest oscillator frequency, divide-by-2 clock.
pub const CLOCK_DIVIDER_DEFAULT: u8 = 0xF1;
/// Remap for 65k colors: horizontal increment, C→B→A, COM split, scan down.
pub const REMAP_65K: u8 = 0x74;
/// Remap for 262k colors, otherwise identical to [`REMAP_65K`].
pub const REMAP_262K: u8 = 0xB4;
/// Select the internal VDD regulator.
pub const INTERNAL_VREG: u8 = 0x01;

/// Start line for a panel of `height` rows.
///
/// 128-row panels start at 0; 96-row panels at 96.
pub const fn start_line(height: usize) -> u8 {
    if height == 128 {
        0
    } else {
        96
    }
}

// ---------------------------------------------------------------------------
// Reset timing
// ---------------------------------------------------------------------------

/// RST high before the pulse, in milliseconds.
pub const RESET_SETTLE_MS: u32 = 5;
/// RST low pulse width, in milliseconds.
pub const RESET_PULSE_MS: u32 = 20;
/// Wait after RST returns high, in milliseconds.
pub const RESET_RECOVERY_MS: u32 = 150;

// ---------------------------------------------------------------------------
// Bring-up script
// ---------------------------------------------------------------------------

/// One step of the bring-up script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Command to issue
    pub command: Command,
    /// Single parameter byte, if the command takes one
    pub param: Option<u8>,
}

const fn step(command: Command, param: Option<u8>) -> Step {
    Step { command, param }
}

/// Bring-up sequence for a panel of `height` rows using remap `remap`.
///
/// The final step (wake) closes the transaction.
pub const fn init_script(remap: u8, height: usize) -> [Step; 10] {
    [
        step(Command::CommandLock, Some(COMMAND_LOCK_UNLOCK)),
        step(Command::CommandLock, Some(COMMAND_LOCK_ACCESSIBLE)),
        step(Command::DisplaySleep, None),
        step(Command::ClockDivider, Some(CLOCK_DIVIDER_DEFAULT)),
        step(Command::Remap, Some(remap)),
        step(Command::StartLine, Some(start_line(height))),
        step(Command::DisplayOffset, Some(0)),
        step(Command::FunctionSelection, Some(INTERNAL_VREG)),
        step(Command::NormalMode, None),
        step(Command::DisplayWake, None),
    ]
}
