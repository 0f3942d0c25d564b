//! `MINI5`: 5-pixel capitals, digits and punctuation.
//!
//! Covers ASCII `0x20..=0x5A` (space through `Z`); lowercase is not
//! included. Every glyph sits one pixel below the top of a 7-pixel line
//! box and advances one column past its ink.
//!
//! Measurement quirk: this font is tuned for centred labels, so the final
//! character of a measured string counts only its ink, not the spacing
//! column after it ([`FinalAdvance::InkOnly`]). Rendering still advances
//! the cursor by the full amount.

use crate::font::{FinalAdvance, Font, Glyph};

/// The font asset.
pub const MINI5: Font = Font {
    bitmap: &BITMAP,
    glyphs: &GLYPHS,
    first: 0x20,
    last: 0x5A,
    y_advance: 7,
    final_advance: FinalAdvance::InkOnly,
};

#[rustfmt::skip]
const BITMAP: [u8; 290] = [
    0x80, 0x80, 0x80, 0x00, 0x80, // '!'
    0xA0, 0xA0, 0x00, 0x00, 0x00, // '"'
    0x50, 0xF8, 0x50, 0xF8, 0x50, // '#'
    0x70, 0xA0, 0x60, 0x50, 0xE0, // '$'
    0x90, 0x20, 0x40, 0x80, 0x90, // '%'
    0x40, 0xA0, 0x40, 0xA0, 0x50, // '&'
    0x80, 0x80, 0x00, 0x00, 0x00, // "'"
    0x40, 0x80, 0x80, 0x80, 0x40, // '('
    0x80, 0x40, 0x40, 0x40, 0x80, // ')'
    0xA0, 0x40, 0xA0, 0x00, 0x00, // '*'
    0x00, 0x40, 0xE0, 0x40, 0x00, // '+'
    0x00, 0x00, 0x00, 0x40, 0x80, // ','
    0x00, 0x00, 0xE0, 0x00, 0x00, // '-'
    0x00, 0x00, 0x00, 0x00, 0x80, // '.'
    0x20, 0x20, 0x40, 0x80, 0x80, // '/'
    0xE0, 0xA0, 0xA0, 0xA0, 0xE0, // '0'
    0x40, 0xC0, 0x40, 0x40, 0x40, // '1'
    0xE0, 0x20, 0xE0, 0x80, 0xE0, // '2'
    0xE0, 0x20, 0x60, 0x20, 0xE0, // '3'
    0xA0, 0xA0, 0xE0, 0x20, 0x20, // '4'
    0xE0, 0x80, 0xE0, 0x20, 0xE0, // '5'
    0xE0, 0x80, 0xE0, 0xA0, 0xE0, // '6'
    0xE0, 0x20, 0x40, 0x40, 0x40, // '7'
    0xE0, 0xA0, 0xE0, 0xA0, 0xE0, // '8'
    0xE0, 0xA0, 0xE0, 0x20, 0xE0, // '9'
    0x00, 0x80, 0x00, 0x80, 0x00, // ':'
    0x00, 0x40, 0x00, 0x40, 0x80, // ';'
    0x20, 0x40, 0x80, 0x40, 0x20, // '<'
    0x00, 0xE0, 0x00, 0xE0, 0x00, // '='
    0x80, 0x40, 0x20, 0x40, 0x80, // '>'
    0xE0, 0x20, 0x40, 0x00, 0x40, // '?'
    0x60, 0x90, 0xB0, 0x80, 0x60, // '@'
    0x40, 0xA0, 0xE0, 0xA0, 0xA0, // 'A'
    0xC0, 0xA0, 0xC0, 0xA0, 0xC0, // 'B'
    0x60, 0x80, 0x80, 0x80, 0x60, // 'C'
    0xC0, 0xA0, 0xA0, 0xA0, 0xC0, // 'D'
    0xE0, 0x80, 0xC0, 0x80, 0xE0, // 'E'
    0xE0, 0x80, 0xC0, 0x80, 0x80, // 'F'
    0x60, 0x80, 0xA0, 0xA0, 0x60, // 'G'
    0xA0, 0xA0, 0xE0, 0xA0, 0xA0, // 'H'
    0xE0, 0x40, 0x40, 0x40, 0xE0, // 'I'
    0x20, 0x20, 0x20, 0xA0, 0x40, // 'J'
    0xA0, 0xA0, 0xC0, 0xA0, 0xA0, // 'K'
    0x80, 0x80, 0x80, 0x80, 0xE0, // 'L'
    0x88, 0xD8, 0xA8, 0x88, 0x88, // 'M'
    0x90, 0xD0, 0xB0, 0x90, 0x90, // 'N'
    0x40, 0xA0, 0xA0, 0xA0, 0x40, // 'O'
    0xC0, 0xA0, 0xC0, 0x80, 0x80, // 'P'
    0x40, 0xA0, 0xA0, 0xA0, 0x60, // 'Q'
    0xC0, 0xA0, 0xC0, 0xA0, 0xA0, // 'R'
    0x60, 0x80, 0x40, 0x20, 0xC0, // 'S'
    0xE0, 0x40, 0x40, 0x40, 0x40, // 'T'
    0xA0, 0xA0, 0xA0, 0xA0, 0xE0, // 'U'
    0xA0, 0xA0, 0xA0, 0xA0, 0x40, // 'V'
    0x88, 0x88, 0xA8, 0xD8, 0x88, // 'W'
    0xA0, 0xA0, 0x40, 0xA0, 0xA0, // 'X'
    0xA0, 0xA0, 0x40, 0x40, 0x40, // 'Y'
    0xE0, 0x20, 0x40, 0x80, 0xE0, // 'Z'
];

#[rustfmt::skip]
const GLYPHS: [Glyph; 59] = [
    g(  0, 0, 0, 3), // ' '
    g(  0, 1, 5, 2), // '!'
    g(  5, 3, 5, 4), // '"'
    g( 10, 5, 5, 6), // '#'
    g( 15, 4, 5, 5), // '$'
    g( 20, 4, 5, 5), // '%'
    g( 25, 4, 5, 5), // '&'
    g( 30, 1, 5, 2), // "'"
    g( 35, 2, 5, 3), // '('
    g( 40, 2, 5, 3), // ')'
    g( 45, 3, 5, 4), // '*'
    g( 50, 3, 5, 4), // '+'
    g( 55, 2, 5, 3), // ','
    g( 60, 3, 5, 4), // '-'
    g( 65, 1, 5, 2), // '.'
    g( 70, 3, 5, 4), // '/'
    g( 75, 3, 5, 4), // '0'
    g( 80, 2, 5, 3), // '1'
    g( 85, 3, 5, 4), // '2'
    g( 90, 3, 5, 4), // '3'
    g( 95, 3, 5, 4), // '4'
    g(100, 3, 5, 4), // '5'
    g(105, 3, 5, 4), // '6'
    g(110, 3, 5, 4), // '7'
    g(115, 3, 5, 4), // '8'
    g(120, 3, 5, 4), // '9'
    g(125, 1, 5, 2), // ':'
    g(130, 2, 5, 3), // ';'
    g(135, 3, 5, 4), // '<'
    g(140, 3, 5, 4), // '='
    g(145, 3, 5, 4), // '>'
    g(150, 3, 5, 4), // '?'
    g(155, 4, 5, 5), // '@'
    g(160, 3, 5, 4), // 'A'
    g(165, 3, 5, 4), // 'B'
    g(170, 3, 5, 4), // 'C'
    g(175, 3, 5, 4), // 'D'
    g(180, 3, 5, 4), // 'E'
    g(185, 3, 5, 4), // 'F'
    g(190, 3, 5, 4), // 'G'
    g(195, 3, 5, 4), // 'H'
    g(200, 3, 5, 4), // 'I'
    g(205, 3, 5, 4), // 'J'
    g(210, 3, 5, 4), // 'K'
    g(215, 3, 5, 4), // 'L'
    g(220, 5, 5, 6), // 'M'
    g(225, 4, 5, 5), // 'N'
    g(230, 3, 5, 4), // 'O'
    g(235, 3, 5, 4), // 'P'
    g(240, 3, 5, 4), // 'Q'
    g(245, 3, 5, 4), // 'R'
    g(250, 3, 5, 4), // 'S'
    g(255, 3, 5, 4), // 'T'
    g(260, 3, 5, 4), // 'U'
    g(265, 3, 5, 4), // 'V'
    g(270, 5, 5, 6), // 'W'
    g(275, 3, 5, 4), // 'X'
    g(280, 3, 5, 4), // 'Y'
    g(285, 3, 5, 4), // 'Z'
];

const fn g(bitmap_offset: u16, width: u8, height: u8, x_advance: u8) -> Glyph {
    Glyph {
        bitmap_offset,
        width,
        height,
        x_advance,
        x_offset: 0,
        y_offset: if height == 0 { 0 } else { 1 },
    }
}
