//! Pixel encodings understood by the SSD1351
//!
//! | Type | Layout | Bytes on the wire | Buffered store rule |
//! |------|--------|-------------------|---------------------|
//! | [`Packed16`]  | `RRRRRGGG GGGBBBBB` | 2, big-endian | overwrite |
//! | [`HighColor`] | 6-bit R, G, B, A    | 3, one per channel | [`over`] |
//! | [`Indexed8`]  | `RRRGGGBB`          | 3, one per channel | overwrite |
//!
//! [`Rgba`] is the 8-bit-per-channel form used on the public API. All
//! conversions are plain bit truncation or expansion.

// Every shift and mask in this module operates on values already narrowed to
// their channel width, so none of the arithmetic can overflow its type.
#![allow(
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
)]

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use platform::ColorDepth;

use crate::command;

/// Largest 6-bit channel / alpha value.
pub const MAX_ALPHA: u8 = 63;

// ---------------------------------------------------------------------------
// Rgba
// ---------------------------------------------------------------------------

/// 8-bit-per-channel color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha, 255 = opaque
    pub a: u8,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a color from components, clamping each one to `0..=255`.
    pub const fn new(r: i16, g: i16, b: i16, a: i16) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Opaque color from 8-bit components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

const fn clamp_channel(v: i16) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

impl From<Rgb888> for Rgba {
    fn from(c: Rgb888) -> Self {
        Self::rgb(c.r(), c.g(), c.b())
    }
}

impl From<Rgba> for Rgb888 {
    fn from(c: Rgba) -> Self {
        Rgb888::new(c.r, c.g, c.b)
    }
}

// ---------------------------------------------------------------------------
// Wire encoding
// ---------------------------------------------------------------------------

/// One pixel as the controller expects it on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; 3],
    len: usize,
}

impl Encoded {
    const fn two(hi: u8, lo: u8) -> Self {
        Self {
            bytes: [hi, lo, 0],
            len: 2,
        }
    }

    const fn three(a: u8, b: u8, c: u8) -> Self {
        Self {
            bytes: [a, b, c],
            len: 3,
        }
    }

    /// The bytes to transmit.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&self.bytes)
    }
}

/// A pixel encoding a surface can be specialised on.
///
/// Every method is resolved at compile time; surfaces never branch on the
/// color mode per pixel.
pub trait PixelFormat: Copy + Default + PartialEq + From<Rgba> + Into<Rgba> {
    /// Controller depth this encoding requires.
    const DEPTH: ColorDepth;

    /// Parameter for the remap command that selects [`Self::DEPTH`].
    const REMAP: u8;

    /// Encode for transmission.
    fn encode(self) -> Encoded;

    /// Combine an incoming pixel with the value already in a buffer cell.
    ///
    /// Encodings without alpha overwrite.
    #[inline]
    fn store(_existing: Self, incoming: Self) -> Self {
        incoming
    }
}

// ---------------------------------------------------------------------------
// Packed16
// ---------------------------------------------------------------------------

/// 5/6/5-bit RGB packed into a `u16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packed16(pub u16);

impl From<Rgba> for Packed16 {
    fn from(c: Rgba) -> Self {
        Self(
            (u16::from(c.r & 0xF8) << 8)
                | (u16::from(c.g & 0xFC) << 3)
                | (u16::from(c.b & 0xF8) >> 3),
        )
    }
}

impl From<Packed16> for Rgba {
    fn from(p: Packed16) -> Self {
        Rgba::rgb(
            ((p.0 & 0xF800) >> 8) as u8,
            ((p.0 & 0x07E0) >> 3) as u8,
            ((p.0 & 0x001F) << 3) as u8,
        )
    }
}

impl PixelFormat for Packed16 {
    const DEPTH: ColorDepth = ColorDepth::Colors65k;
    const REMAP: u8 = command::REMAP_65K;

    #[inline]
    fn encode(self) -> Encoded {
        let [hi, lo] = self.0.to_be_bytes();
        Encoded::two(hi, lo)
    }
}

// ---------------------------------------------------------------------------
// HighColor
// ---------------------------------------------------------------------------

/// 6-bit-per-channel RGB with 6-bit alpha.
///
/// `Default` is all zero: black, fully transparent. A zeroed buffer cell
/// therefore takes on the color of the first pixel composited over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HighColor {
    /// Red, 0–63
    pub r: u8,
    /// Green, 0–63
    pub g: u8,
    /// Blue, 0–63
    pub b: u8,
    /// Alpha, 0–63 (63 = opaque)
    pub a: u8,
}

impl HighColor {
    /// Build from 6-bit components; higher bits are discarded.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r & MAX_ALPHA,
            g: g & MAX_ALPHA,
            b: b & MAX_ALPHA,
            a: a & MAX_ALPHA,
        }
    }

    /// Opaque color from 6-bit components.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, MAX_ALPHA)
    }

    /// Composite `self` over `background`. See [`over`].
    #[inline]
    pub fn over(self, background: Self) -> Self {
        over(self, background)
    }
}

/// Alpha-composite `fg` over `bg` in 6-bit fixed point.
///
/// ```text
/// fg.a == 63      → fg
/// na = 63 − (63 − bg.a)(63 − fg.a) / 63
/// na == 0         → bg
/// c  = fg.c·fg.a / na + (bg.c·bg.a·(63 − fg.a) / 63) / na
/// ```
///
/// All divisions truncate.
pub fn over(fg: HighColor, bg: HighColor) -> HighColor {
    if fg.a == MAX_ALPHA {
        return fg;
    }

    let max = u32::from(MAX_ALPHA);
    let fa = u32::from(fg.a);
    let ba = u32::from(bg.a);
    let new_alpha = max - (max - ba) * (max - fa) / max;
    if new_alpha == 0 {
        return bg;
    }

    let channel = |f: u8, b: u8| -> u8 {
        let fg_part = u32::from(f) * fa / new_alpha;
        let bg_part = u32::from(b) * ba * (max - fa) / max / new_alpha;
        (fg_part + bg_part).min(max) as u8
    };

    HighColor {
        r: channel(fg.r, bg.r),
        g: channel(fg.g, bg.g),
        b: channel(fg.b, bg.b),
        a: new_alpha as u8,
    }
}

impl From<Rgba> for HighColor {
    fn from(c: Rgba) -> Self {
        Self {
            r: c.r >> 2,
            g: c.g >> 2,
            b: c.b >> 2,
            a: c.a >> 2,
        }
    }
}

impl From<HighColor> for Rgba {
    fn from(c: HighColor) -> Self {
        Rgba {
            r: (c.r & MAX_ALPHA) << 2,
            g: (c.g & MAX_ALPHA) << 2,
            b: (c.b & MAX_ALPHA) << 2,
            a: (c.a & MAX_ALPHA) << 2,
        }
    }
}

impl PixelFormat for HighColor {
    const DEPTH: ColorDepth = ColorDepth::Colors262k;
    const REMAP: u8 = command::REMAP_262K;

    #[inline]
    fn encode(self) -> Encoded {
        Encoded::three(self.r & MAX_ALPHA, self.g & MAX_ALPHA, self.b & MAX_ALPHA)
    }

    #[inline]
    fn store(existing: Self, incoming: Self) -> Self {
        over(incoming, existing)
    }
}

// ---------------------------------------------------------------------------
// Indexed8
// ---------------------------------------------------------------------------

/// 3/3/2-bit RGB in one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indexed8(pub u8);

impl From<Rgba> for Indexed8 {
    fn from(c: Rgba) -> Self {
        Self((c.r & 0xE0) | ((c.g & 0xE0) >> 3) | (c.b >> 6))
    }
}

impl From<Indexed8> for Rgba {
    fn from(c: Indexed8) -> Self {
        Rgba::rgb(c.0 & 0xE0, (c.0 & 0x1C) << 3, (c.0 & 0x03) << 6)
    }
}

impl PixelFormat for Indexed8 {
    // Sent as 18-bit color so any palette entry is reachable.
    const DEPTH: ColorDepth = ColorDepth::Colors262k;
    const REMAP: u8 = command::REMAP_262K;

    #[inline]
    fn encode(self) -> Encoded {
        Encoded::three(
            (self.0 & 0xE0) >> 2,
            (self.0 & 0x1C) << 1,
            (self.0 & 0x03) << 4,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn rgba_new_clamps_components() {
        let c = Rgba::new(-20, 300, 128, 1000);
        assert_eq!(c, Rgba { r: 0, g: 255, b: 128, a: 255 });
    }

    #[test]
    fn packed16_bit_layout() {
        assert_eq!(Packed16::from(Rgba::rgb(0xFF, 0, 0)).0, 0xF800);
        assert_eq!(Packed16::from(Rgba::rgb(0, 0xFF, 0)).0, 0x07E0);
        assert_eq!(Packed16::from(Rgba::rgb(0, 0, 0xFF)).0, 0x001F);
        assert_eq!(Packed16::from(Rgba::WHITE).0, 0xFFFF);
    }

    #[test]
    fn packed16_decodes_opaque() {
        let c = Rgba::from(Packed16(0xF81F));
        assert_eq!(c, Rgba::rgb(0xF8, 0, 0xF8));
    }

    #[test]
    fn packed16_encodes_big_endian() {
        assert_eq!(Packed16(0x1234).encode().as_bytes(), &[0x12, 0x34]);
    }

    #[test]
    fn highcolor_truncates_each_channel() {
        let c = HighColor::from(Rgba::new(255, 128, 7, 255));
        assert_eq!(c, HighColor::new(63, 32, 1, 63));
        assert_eq!(Rgba::from(c), Rgba::new(252, 128, 4, 252));
    }

    #[test]
    fn highcolor_encodes_three_six_bit_bytes() {
        assert_eq!(
            HighColor::opaque(63, 1, 32).encode().as_bytes(),
            &[63, 1, 32]
        );
    }

    #[test]
    fn indexed8_bit_layout() {
        assert_eq!(Indexed8::from(Rgba::WHITE).0, 0xFF);
        assert_eq!(Indexed8::from(Rgba::rgb(0xE0, 0, 0)).0, 0xE0);
        assert_eq!(Indexed8::from(Rgba::rgb(0, 0xE0, 0)).0, 0x1C);
        assert_eq!(Indexed8::from(Rgba::rgb(0, 0, 0xC0)).0, 0x03);
    }

    #[test]
    fn indexed8_encodes_each_field_in_low_six_bits() {
        assert_eq!(Indexed8(0xE0).encode().as_bytes(), &[0x38, 0x00, 0x00]);
        assert_eq!(Indexed8(0x1C).encode().as_bytes(), &[0x00, 0x38, 0x00]);
        assert_eq!(Indexed8(0x03).encode().as_bytes(), &[0x00, 0x00, 0x30]);
    }

    #[test]
    fn over_opaque_foreground_replaces_background() {
        let fg = HighColor::opaque(10, 20, 30);
        let bg = HighColor::new(63, 63, 63, 40);
        assert_eq!(over(fg, bg), fg);
    }

    #[test]
    fn over_transparent_foreground_keeps_background() {
        let bg = HighColor::new(12, 34, 56, 40);
        assert_eq!(over(HighColor::new(63, 0, 0, 0), bg), bg);
    }

    #[test]
    fn over_onto_empty_cell_takes_foreground() {
        let fg = HighColor::new(40, 20, 10, 32);
        assert_eq!(over(fg, HighColor::default()), fg);
    }

    #[test]
    fn over_both_transparent_returns_background() {
        let bg = HighColor::new(5, 5, 5, 0);
        assert_eq!(over(HighColor::new(9, 9, 9, 0), bg), bg);
    }

    #[test]
    fn over_half_alpha_on_opaque_white() {
        // na = 63 − 0·31/63 = 63
        // c  = 0·32/63 + (63·63·31/63)/63 = 0 + 1953/63 = 31
        let fg = HighColor::new(0, 0, 0, 32);
        let bg = HighColor::opaque(63, 63, 63);
        assert_eq!(over(fg, bg), HighColor::new(31, 31, 31, 63));
    }

    #[test]
    fn store_rule_per_encoding() {
        assert_eq!(Packed16::store(Packed16(1), Packed16(2)), Packed16(2));
        assert_eq!(Indexed8::store(Indexed8(1), Indexed8(2)), Indexed8(2));
        let bg = HighColor::opaque(63, 0, 0);
        let fg = HighColor::new(0, 63, 0, 0);
        assert_eq!(HighColor::store(bg, fg), bg);
    }

    #[test]
    fn depth_and_remap_match_controller_modes() {
        assert_eq!(Packed16::REMAP, 0x74);
        assert_eq!(HighColor::REMAP, 0xB4);
        assert_eq!(Indexed8::REMAP, 0xB4);
        assert_eq!(Packed16::DEPTH.bytes_per_pixel(), 2);
        assert_eq!(HighColor::DEPTH.bytes_per_pixel(), 3);
    }
}
