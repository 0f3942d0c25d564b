//! Property-based tests for the pixel encodings and the over operator.
//! Verifies the laws hold for every color, not just hand-picked ones.
#![allow(clippy::arithmetic_side_effects)]

use proptest::prelude::*;
use ssd1351::{over, HighColor, Indexed8, Packed16, PixelFormat, Rgba};

fn high_color() -> impl Strategy<Value = HighColor> {
    (0u8..64, 0u8..64, 0u8..64, 0u8..64).prop_map(|(r, g, b, a)| HighColor::new(r, g, b, a))
}

proptest! {
    /// Packed16 → Rgba → Packed16 is the identity for every bit pattern.
    #[test]
    fn packed16_round_trips_through_rgba(bits in any::<u16>()) {
        let p = Packed16(bits);
        prop_assert_eq!(Packed16::from(Rgba::from(p)), p);
    }

    /// Once quantised, Rgba → Packed16 → Rgba is stable.
    #[test]
    fn packed16_quantisation_is_idempotent(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let once = Rgba::from(Packed16::from(Rgba::rgb(r, g, b)));
        let twice = Rgba::from(Packed16::from(once));
        prop_assert_eq!(once, twice);
    }

    /// Indexed8 survives a trip through Rgba.
    #[test]
    fn indexed8_round_trips_through_rgba(bits in any::<u8>()) {
        prop_assert_eq!(Indexed8::from(Rgba::from(Indexed8(bits))), Indexed8(bits));
    }

    /// Every encoding keeps channel bytes inside the controller's 6-bit range.
    #[test]
    fn three_byte_encodings_use_low_six_bits(bits in any::<u8>(), c in high_color()) {
        for byte in Indexed8(bits).encode().as_bytes() {
            prop_assert!(*byte <= 0x3F);
        }
        for byte in c.encode().as_bytes() {
            prop_assert!(*byte <= 0x3F);
        }
        prop_assert_eq!(Packed16(u16::from(bits)).encode().as_bytes().len(), 2);
    }

    /// An opaque foreground replaces whatever is underneath.
    #[test]
    fn opaque_foreground_wins(fg in high_color(), bg in high_color()) {
        let fg = HighColor::new(fg.r, fg.g, fg.b, 63);
        prop_assert_eq!(over(fg, bg), fg);
    }

    /// Compositing nothing over nothing leaves the background untouched.
    #[test]
    fn fully_transparent_pair_keeps_background(fg in high_color(), bg in high_color()) {
        let fg = HighColor::new(fg.r, fg.g, fg.b, 0);
        let bg = HighColor::new(bg.r, bg.g, bg.b, 0);
        prop_assert_eq!(over(fg, bg), bg);
    }

    /// A transparent foreground never changes an opaque background.
    #[test]
    fn transparent_over_opaque_is_background(fg in high_color(), bg in high_color()) {
        let fg = HighColor::new(fg.r, fg.g, fg.b, 0);
        let bg = HighColor::new(bg.r, bg.g, bg.b, 63);
        prop_assert_eq!(over(fg, bg), bg);
    }

    /// The result stays in range and is never more transparent than either input.
    #[test]
    fn composite_alpha_is_monotone(fg in high_color(), bg in high_color()) {
        let out = over(fg, bg);
        prop_assert!(out.r <= 63 && out.g <= 63 && out.b <= 63 && out.a <= 63);
        prop_assert!(out.a >= fg.a.max(bg.a));
    }

    /// Buffered storage of a HighColor is exactly the over operator.
    #[test]
    fn store_is_over(existing in high_color(), incoming in high_color()) {
        prop_assert_eq!(HighColor::store(existing, incoming), over(incoming, existing));
    }
}
