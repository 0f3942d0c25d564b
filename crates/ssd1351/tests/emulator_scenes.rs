//! End-to-end drawing through the controller emulator.
//!
//! Every scene here goes surface → transport → decoded GDDRAM, so the
//! assertions are about what the panel would actually show.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::large_stack_arrays
)]

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use embedded_graphics::text::Text;

use platform::{Boundary, ColorDepth, Transport};
use ssd1351::{Align, Buffered, Canvas, Direct, HighColor, Packed16, Ssd1351, Surface};
use ssd1351_emulator::{Controller, ProtocolError};

const W: usize = 64;
const H: usize = 64;
const WHITE: Packed16 = Packed16(0xFFFF);

type DirectPanel = Direct<Controller, Packed16, W, H>;
type BufferedPanel = Buffered<Controller, Packed16, W, H>;

fn direct() -> DirectPanel {
    Direct::new(Controller::new(W as u32, H as u32))
}

fn buffered() -> BufferedPanel {
    Buffered::new(Controller::new(W as u32, H as u32))
}

/// Run the same drawing on both strategies and return what each lit.
macro_rules! on_both {
    (|$s:ident| $body:block) => {{
        let mut d = direct();
        {
            let $s = &mut d;
            $body
        }
        let mut b = buffered();
        {
            let $s = &mut b;
            $body
        }
        b.flush().unwrap();
        (d.release().lit_pixels(), b.release().lit_pixels())
    }};
}

#[test]
fn direct_and_buffered_light_the_same_lines() {
    let (d, b) = on_both!(|s| {
        s.draw_line(0, 0, 63, 63, WHITE).unwrap();
        s.draw_line(5, 40, 60, 2, WHITE).unwrap();
        s.draw_line(-10, 30, 80, 33, WHITE).unwrap();
        s.draw_line(20, -5, 22, 70, WHITE).unwrap();
        s.draw_line(3, 3, 3, 3, WHITE).unwrap();
    });
    assert!(!d.is_empty());
    assert_eq!(d, b);
}

#[test]
fn direct_and_buffered_agree_on_shapes() {
    let (d, b) = on_both!(|s| {
        s.draw_circle(10, 10, 8, WHITE).unwrap();
        s.fill_circle(60, 60, 9, WHITE).unwrap();
        s.fill_triangle(30, 5, 50, 25, 12, 40, WHITE).unwrap();
        s.draw_triangle(-5, 50, 20, 63, 40, 45, WHITE).unwrap();
        s.draw_round_rect(2, 44, 20, 15, 4, WHITE).unwrap();
        s.fill_round_rect(40, -4, 30, 12, 5, WHITE).unwrap();
        s.draw_rect(-2, -2, 8, 8, WHITE).unwrap();
    });
    assert_eq!(d, b);
}

#[test]
fn horizontal_line_lights_exactly_its_endpoints_span() {
    let mut d = direct();
    d.draw_line(0, 0, 5, 0, WHITE).unwrap();
    let lit = d.release().lit_pixels();
    assert_eq!(lit, (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
}

#[test]
fn off_screen_pixels_never_reach_the_controller() {
    let mut d = direct();
    d.draw_pixel(-1, -1, WHITE).unwrap();
    d.draw_pixel(W as i16, H as i16, WHITE).unwrap();
    d.fill_rect(100, 100, 10, 10, WHITE).unwrap();
    d.draw_fast_hline(0, -3, 20, WHITE).unwrap();
    d.draw_circle(-50, -50, 10, WHITE).unwrap();

    let c = d.release();
    assert_eq!(c.transaction_count(), 0);
    assert!(c.lit_pixels().is_empty());
}

#[test]
fn direct_fill_releases_the_bus_after_every_row() {
    let mut d = direct();
    d.fill_rect(4, 4, 10, 5, WHITE).unwrap();
    let c = d.release();

    assert_eq!(c.transaction_count(), 5);
    assert_eq!(c.unterminated_count(), 0);
    assert_eq!(c.pixels_written(), 50);
    assert_eq!(c.lit_pixels().len(), 50);
}

#[test]
fn buffered_flush_streams_every_cell_once() {
    let mut b = buffered();
    b.fill_rect(0, 0, 3, 3, WHITE).unwrap();
    assert_eq!(
        b.transport().transaction_count(),
        0,
        "drawing into the buffer is silent"
    );

    b.flush().unwrap();
    let c = b.release();
    assert_eq!(c.transaction_count(), H);
    assert_eq!(c.unterminated_count(), 0);
    assert_eq!(c.pixels_written(), W * H);
    assert_eq!(c.lit_pixels().len(), 9);
}

#[test]
fn buffered_fill_rect_matches_pixel_by_pixel() {
    let mut filled = buffered();
    filled.fill_rect(-3, 50, 10, 20, WHITE).unwrap();

    let mut plotted = buffered();
    for y in 50..70 {
        for x in -3..7 {
            plotted.draw_pixel(x, y, WHITE).unwrap();
        }
    }
    assert_eq!(filled.buffer(), plotted.buffer());
}

#[test]
fn init_then_draw_on_a_96_row_panel() {
    let red = HighColor::opaque(63, 0, 0);
    let mut d: Ssd1351<Direct<Controller, HighColor, 128, 96>> =
        Ssd1351::new(Direct::new(Controller::new(128, 96)));

    d.init().unwrap();
    d.fill_screen(HighColor::opaque(0, 0, 0)).unwrap();
    d.fill_circle(64, 48, 10, red).unwrap();
    d.draw_aligned_text("OK", 64, 80, Align::Center).unwrap();

    let c = d.release().release();
    assert!(c.is_awake());
    assert_eq!(c.depth(), ColorDepth::Colors262k);
    assert_eq!(c.start_line(), 96);
    assert_eq!(c.unterminated_count(), 0);
    assert_eq!(c.pixel(64, 48), Some([255, 0, 0]));
    assert_eq!(c.pixel(0, 0), Some([0, 0, 0]));
    assert!(
        c.lit_pixels().iter().any(|&(_, y)| (80..87).contains(&y)),
        "label drawn below the circle"
    );
}

#[test]
fn sleep_blanks_and_wake_restores() {
    let mut d: Ssd1351<DirectPanel> = Ssd1351::new(direct());
    d.init().unwrap();
    d.sleep(true).unwrap();
    assert!(!d.surface().transport().is_awake());
    d.sleep(false).unwrap();
    assert!(d.surface().transport().is_awake());
}

#[test]
fn printed_text_stays_inside_its_bounds() {
    let mut d: Ssd1351<BufferedPanel> = Ssd1351::new(buffered());
    let bounds = d.text_bounds("AB", 0, 0);
    assert_eq!(bounds, Rectangle::new(Point::zero(), Size::new(7, 7)));

    d.print("AB").unwrap();
    d.flush().unwrap();
    let c = d.release().release();

    let lit = c.lit_pixels();
    assert!(!lit.is_empty());
    for (x, y) in lit {
        assert!(
            bounds.contains(Point::new(x as i32, y as i32)),
            "({x}, {y}) outside {bounds:?}"
        );
    }
    // Apex of the 'A', one row below the line top.
    assert_eq!(c.pixel(1, 1), Some([255, 255, 255]));
    assert_eq!(c.pixel(1, 0), Some([0, 0, 0]));
}

#[test]
fn embedded_graphics_text_renders_through_draw_target() {
    let mut d: Ssd1351<DirectPanel> = Ssd1351::new(direct());
    let text = Text::new(
        "Hi",
        Point::new(2, 10),
        MonoTextStyle::new(&FONT_6X10, Rgb888::WHITE),
    );
    let area = text.bounding_box();
    text.draw(&mut d).unwrap();

    let c = d.release().release();
    let lit = c.lit_pixels();
    assert!(!lit.is_empty());
    assert!(lit
        .iter()
        .all(|&(x, y)| area.contains(Point::new(x as i32, y as i32))));
}

/// Error from [`Flaky`]
#[derive(Debug, PartialEq, Eq)]
enum BusFault {
    Injected,
    Protocol(ProtocolError),
}

impl From<ProtocolError> for BusFault {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

/// Controller behind a bus that drops one chosen `send_data` call.
struct Flaky {
    oled: Controller,
    fail_in: Option<usize>,
}

impl Flaky {
    fn new(w: u32, h: u32) -> Self {
        Self {
            oled: Controller::new(w, h),
            fail_in: None,
        }
    }

    /// Fail the `n`th data write from now (0 = the next one).
    fn fail_data_write(&mut self, n: usize) {
        self.fail_in = Some(n);
    }
}

impl Transport for Flaky {
    type Error = BusFault;

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        Ok(self.oled.begin_transaction()?)
    }

    fn send_command(&mut self, command: u8, boundary: Boundary) -> Result<(), Self::Error> {
        Ok(self.oled.send_command(command, boundary)?)
    }

    fn send_data(&mut self, data: &[u8], boundary: Boundary) -> Result<(), Self::Error> {
        match self.fail_in {
            Some(0) => {
                self.fail_in = None;
                Err(BusFault::Injected)
            }
            Some(n) => {
                self.fail_in = Some(n - 1);
                Ok(self.oled.send_data(data, boundary)?)
            }
            None => Ok(self.oled.send_data(data, boundary)?),
        }
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        Ok(self.oled.end_transaction()?)
    }
}

#[test]
fn direct_recovers_after_a_failed_write() {
    let mut d: Direct<Flaky, Packed16, 16, 16> = Direct::new(Flaky::new(16, 16));

    // Window parameters go out first; fail the first pixel.
    d.transport().fail_data_write(4);
    assert_eq!(d.fill_rect(0, 0, 4, 4, WHITE), Err(BusFault::Injected));
    assert_eq!(
        d.transport().oled.transaction_count(),
        1,
        "the failed transaction was still closed"
    );

    d.draw_pixel(2, 2, WHITE).unwrap();
    let oled = d.release().oled;
    assert_eq!(oled.transaction_count(), 2);
    assert_eq!(oled.pixel(2, 2), Some([255, 255, 255]));
}

#[test]
fn buffered_flush_can_be_retried_after_a_failure() {
    let mut b: Buffered<Flaky, Packed16, 16, 16> = Buffered::new(Flaky::new(16, 16));
    b.fill_rect(0, 0, 16, 16, WHITE).unwrap();

    // Fail partway through the third row.
    b.transport().fail_data_write(4 + 2 * 16 + 5);
    assert_eq!(b.flush(), Err(BusFault::Injected));
    assert_eq!(b.transport().oled.transaction_count(), 3);

    b.transport().oled.reset_counters();
    b.flush().unwrap();
    let oled = b.release().oled;
    assert_eq!(oled.transaction_count(), 16);
    assert_eq!(oled.unterminated_count(), 0);
    assert_eq!(oled.lit_pixels().len(), 16 * 16);
}

#[test]
fn init_can_be_retried_after_a_failure() {
    let mut d: Ssd1351<Direct<Flaky, Packed16, 16, 16>> =
        Ssd1351::new(Direct::new(Flaky::new(16, 16)));

    d.surface().transport().fail_data_write(0);
    assert_eq!(d.init(), Err(BusFault::Injected));

    d.init().unwrap();
    d.sleep(true).unwrap();
    let oled = d.release().release().oled;
    assert!(!oled.is_awake());
    assert_eq!(oled.transaction_count(), 3);
}
