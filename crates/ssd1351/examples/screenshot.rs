//! Render a test card through the emulator and save it as PNG.
//!
//! Run with: cargo run -p ssd1351 --example screenshot [-- out.png]
//! Set RUST_LOG=ssd1351_emulator=trace to watch the bus traffic.

use embedded_graphics::mono_font::{ascii::FONT_6X10, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use ssd1351::{fonts, Align, Buffered, HighColor, Ssd1351};
use ssd1351_emulator::Controller;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "ssd1351.png".into());

    let surface: Buffered<Controller, HighColor, 128, 128> =
        Buffered::new(Controller::new(128, 128));
    let mut display = Ssd1351::new(surface);
    display.init()?;

    let black = HighColor::opaque(0, 0, 0);
    let red = HighColor::opaque(63, 0, 0);
    let green = HighColor::opaque(0, 63, 0);
    let blue = HighColor::opaque(0, 0, 63);
    let white = HighColor::opaque(63, 63, 63);

    display.fill_screen(black)?;
    display.fill_circle(40, 50, 24, red)?;
    // Half-transparent shapes composite over what is already buffered.
    display.fill_circle(64, 50, 24, HighColor::new(0, 63, 0, 32))?;
    display.fill_circle(88, 50, 24, HighColor::new(0, 0, 63, 32))?;
    display.draw_round_rect(2, 2, 124, 124, 8, white)?;
    display.fill_triangle(10, 120, 30, 90, 50, 120, green)?;
    display.draw_line(60, 90, 120, 120, blue)?;

    display.set_font(fonts::MINI5);
    display.set_text_color(white, None);
    display.draw_aligned_text("SSD1351", 64, 8, Align::Center)?;

    Text::new(
        "emulator",
        Point::new(62, 112),
        MonoTextStyle::new(&FONT_6X10, Rgb888::YELLOW),
    )
    .draw(&mut display)?;

    display.flush()?;

    let controller = display.release().release();
    controller.screenshot(&path)?;
    println!(
        "Wrote {path} ({} transactions, {} pixels)",
        controller.transaction_count(),
        controller.pixels_written()
    );
    Ok(())
}
