//! Shape rasterization
//!
//! Every algorithm here reduces to the four [`Surface`] primitives and never
//! clips on its own: coordinates may be negative or past the far edge, and
//! the primitives drop whatever falls outside.
//!
//! Coordinates are `i16`, wide enough for anything the controller can show
//! plus generous off-screen margins. Internally everything is widened to
//! `i32` (`i64` for the filled-triangle slope accumulators) so no expression
//! can overflow.

#![allow(clippy::arithmetic_side_effects)]

use crate::surface::Surface;

// ---------------------------------------------------------------------------
// Corner masks
// ---------------------------------------------------------------------------

/// Quarter-arc selector for [`Canvas::draw_circle_quadrants`].
///
/// Bits may be combined.
pub mod corner {
    /// Upper-left quarter
    pub const TOP_LEFT: u8 = 0x1;
    /// Upper-right quarter
    pub const TOP_RIGHT: u8 = 0x2;
    /// Lower-right quarter
    pub const BOTTOM_RIGHT: u8 = 0x4;
    /// Lower-left quarter
    pub const BOTTOM_LEFT: u8 = 0x8;
}

/// Half selector for [`Canvas::fill_circle_halves`].
pub mod half {
    /// Columns right of the centre
    pub const RIGHT: u8 = 0x1;
    /// Columns left of the centre
    pub const LEFT: u8 = 0x2;
    /// Both halves
    pub const BOTH: u8 = RIGHT | LEFT;
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Shape drawing on top of any [`Surface`].
///
/// Blanket-implemented; bring the trait into scope and call it on a
/// [`Direct`](crate::surface::Direct) or [`Buffered`](crate::surface::Buffered)
/// surface.
pub trait Canvas: Surface {
    /// Plot a single pixel.
    fn draw_pixel(&mut self, x: i16, y: i16, color: Self::Color) -> Result<(), Self::Error> {
        self.set_pixel(x.into(), y.into(), color)
    }

    /// Fill a `w×h` rectangle.
    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.fill_region(x.into(), y.into(), w.into(), h.into(), color)
    }

    /// Fill the whole surface.
    fn fill_screen(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_all(color)
    }

    /// Horizontal line of `w` pixels starting at `(x, y)`.
    fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_row(x.into(), y.into(), w.into(), color)
    }

    /// Vertical line of `h` pixels starting at `(x, y)`.
    fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_column(x.into(), y.into(), h.into(), color)
    }

    /// Line between two endpoints, both inclusive.
    ///
    /// Surfaces with [`Surface::COALESCE_RUNS`] receive each straight run as
    /// one row or column fill instead of single pixels. The lit pixels are
    /// the same either way.
    fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        line(self, x0.into(), y0.into(), x1.into(), y1.into(), color)
    }

    /// Rectangle outline.
    fn draw_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let (x, y, w, h) = (i32::from(x), i32::from(y), i32::from(w), i32::from(h));
        self.fill_row(x, y, w, color)?;
        self.fill_row(x, y + h - 1, w, color)?;
        self.fill_column(x, y, h, color)?;
        self.fill_column(x + w - 1, y, h, color)
    }

    /// Circle outline of radius `r` centred on `(x0, y0)`.
    ///
    /// Negative radii draw nothing.
    fn draw_circle(&mut self, x0: i16, y0: i16, r: i16, color: Self::Color) -> Result<(), Self::Error> {
        if r < 0 {
            return Ok(());
        }
        let (x0, y0, r) = (i32::from(x0), i32::from(y0), i32::from(r));

        self.set_pixel(x0, y0 + r, color)?;
        self.set_pixel(x0, y0 - r, color)?;
        self.set_pixel(x0 + r, y0, color)?;
        self.set_pixel(x0 - r, y0, color)?;

        for (x, y) in Midpoint::new(r) {
            self.set_pixel(x0 + x, y0 + y, color)?;
            self.set_pixel(x0 - x, y0 + y, color)?;
            self.set_pixel(x0 + x, y0 - y, color)?;
            self.set_pixel(x0 - x, y0 - y, color)?;
            self.set_pixel(x0 + y, y0 + x, color)?;
            self.set_pixel(x0 - y, y0 + x, color)?;
            self.set_pixel(x0 + y, y0 - x, color)?;
            self.set_pixel(x0 - y, y0 - x, color)?;
        }
        Ok(())
    }

    /// Quarter arcs of a circle, selected by [`corner`] bits.
    ///
    /// The four axis-extreme points are not drawn; rounded rectangles supply
    /// them with their straight edges.
    fn draw_circle_quadrants(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        corners: u8,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let (x0, y0) = (i32::from(x0), i32::from(y0));
        for (x, y) in Midpoint::new(r.into()) {
            if corners & corner::BOTTOM_RIGHT != 0 {
                self.set_pixel(x0 + x, y0 + y, color)?;
                self.set_pixel(x0 + y, y0 + x, color)?;
            }
            if corners & corner::TOP_RIGHT != 0 {
                self.set_pixel(x0 + x, y0 - y, color)?;
                self.set_pixel(x0 + y, y0 - x, color)?;
            }
            if corners & corner::BOTTOM_LEFT != 0 {
                self.set_pixel(x0 - y, y0 + x, color)?;
                self.set_pixel(x0 - x, y0 + y, color)?;
            }
            if corners & corner::TOP_LEFT != 0 {
                self.set_pixel(x0 - y, y0 - x, color)?;
                self.set_pixel(x0 - x, y0 - y, color)?;
            }
        }
        Ok(())
    }

    /// Filled circle.
    fn fill_circle(&mut self, x0: i16, y0: i16, r: i16, color: Self::Color) -> Result<(), Self::Error> {
        if r < 0 {
            return Ok(());
        }
        let (cx, cy, rr) = (i32::from(x0), i32::from(y0), i32::from(r));
        self.fill_column(cx, cy - rr, 2 * rr + 1, color)?;
        self.fill_circle_halves(x0, y0, r, half::BOTH, 0, color)
    }

    /// Vertical spans filling the left and/or right half of a circle,
    /// excluding the centre column.
    ///
    /// Every span is stretched downwards by `delta` pixels, which turns two
    /// half-discs into the rounded ends of a filled rounded rectangle.
    fn fill_circle_halves(
        &mut self,
        x0: i16,
        y0: i16,
        r: i16,
        halves: u8,
        delta: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let (x0, y0, delta) = (i32::from(x0), i32::from(y0), i32::from(delta));
        for (x, y) in Midpoint::new(r.into()) {
            if halves & half::RIGHT != 0 {
                self.fill_column(x0 + x, y0 - y, 2 * y + 1 + delta, color)?;
                self.fill_column(x0 + y, y0 - x, 2 * x + 1 + delta, color)?;
            }
            if halves & half::LEFT != 0 {
                self.fill_column(x0 - x, y0 - y, 2 * y + 1 + delta, color)?;
                self.fill_column(x0 - y, y0 - x, 2 * x + 1 + delta, color)?;
            }
        }
        Ok(())
    }

    /// Triangle outline.
    #[allow(clippy::too_many_arguments)]
    fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.draw_line(x0, y0, x1, y1, color)?;
        self.draw_line(x1, y1, x2, y2, color)?;
        self.draw_line(x2, y2, x0, y0, color)
    }

    /// Filled triangle, one horizontal span per scanline.
    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        fill_triangle(
            self,
            [(x0.into(), y0.into()), (x1.into(), y1.into()), (x2.into(), y2.into())],
            color,
        )
    }

    /// Rectangle outline with corners of radius `r`.
    ///
    /// `r` is limited to half the shorter side.
    fn draw_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let r = corner_radius(w, h, r);
        let (xi, yi, wi, hi, ri) = (
            i32::from(x),
            i32::from(y),
            i32::from(w),
            i32::from(h),
            i32::from(r),
        );
        self.fill_row(xi + ri, yi, wi - 2 * ri, color)?;
        self.fill_row(xi + ri, yi + hi - 1, wi - 2 * ri, color)?;
        self.fill_column(xi, yi + ri, hi - 2 * ri, color)?;
        self.fill_column(xi + wi - 1, yi + ri, hi - 2 * ri, color)?;

        let left = narrow(xi + ri);
        let right = narrow(xi + wi - ri - 1);
        let top = narrow(yi + ri);
        let bottom = narrow(yi + hi - ri - 1);
        self.draw_circle_quadrants(left, top, r, corner::TOP_LEFT, color)?;
        self.draw_circle_quadrants(right, top, r, corner::TOP_RIGHT, color)?;
        self.draw_circle_quadrants(right, bottom, r, corner::BOTTOM_RIGHT, color)?;
        self.draw_circle_quadrants(left, bottom, r, corner::BOTTOM_LEFT, color)
    }

    /// Filled rectangle with corners of radius `r`.
    fn fill_round_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        r: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let r = corner_radius(w, h, r);
        let (xi, yi, wi, hi, ri) = (
            i32::from(x),
            i32::from(y),
            i32::from(w),
            i32::from(h),
            i32::from(r),
        );
        self.fill_region(xi + ri, yi, wi - 2 * ri, hi, color)?;

        let delta = narrow(hi - 2 * ri - 1);
        let top = narrow(yi + ri);
        self.fill_circle_halves(narrow(xi + wi - ri - 1), top, r, half::RIGHT, delta, color)?;
        self.fill_circle_halves(narrow(xi + ri), top, r, half::LEFT, delta, color)
    }

    /// Blit a 1-bit bitmap; set bits are drawn in `color`, clear bits are
    /// left alone.
    ///
    /// Rows are `ceil(w / 8)` bytes, most significant bit leftmost. Bytes
    /// missing from a short `bitmap` read as zero.
    #[allow(clippy::too_many_arguments)]
    fn draw_bitmap(
        &mut self,
        x: i16,
        y: i16,
        bitmap: &[u8],
        w: i16,
        h: i16,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let (x, y) = (i32::from(x), i32::from(y));
        for (i, j) in set_bits(bitmap, w.into(), h.into()) {
            self.set_pixel(x + i, y + j, color)?;
        }
        Ok(())
    }
}

impl<S: Surface + ?Sized> Canvas for S {}

// ---------------------------------------------------------------------------
// Algorithms
// ---------------------------------------------------------------------------

/// Bresenham line, walking the major axis.
fn line<S: Surface + ?Sized>(
    s: &mut S,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: S::Color,
) -> Result<(), S::Error> {
    if y0 == y1 {
        let (a, b) = (x0.min(x1), x0.max(x1));
        return s.fill_row(a, y0, b - a + 1, color);
    }
    if x0 == x1 {
        let (a, b) = (y0.min(y1), y0.max(y1));
        return s.fill_column(x0, a, b - a + 1, color);
    }

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut x0, mut y0, mut x1, mut y1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };
    if x0 > x1 {
        core::mem::swap(&mut x0, &mut x1);
        core::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut y = y0;
    let mut run_start = x0;

    for x in x0..=x1 {
        if !S::COALESCE_RUNS {
            plot(s, steep, x, y, color)?;
        }
        err -= dy;
        let stepping = err < 0;
        if S::COALESCE_RUNS && (stepping || x == x1) {
            run(s, steep, run_start, x, y, color)?;
            run_start = x + 1;
        }
        if stepping {
            y += ystep;
            err += dx;
        }
    }
    Ok(())
}

/// One pixel in major/minor axis coordinates.
fn plot<S: Surface + ?Sized>(s: &mut S, steep: bool, major: i32, minor: i32, color: S::Color) -> Result<(), S::Error> {
    if steep {
        s.set_pixel(minor, major, color)
    } else {
        s.set_pixel(major, minor, color)
    }
}

/// Major-axis run `from..=to` at a fixed minor coordinate.
fn run<S: Surface + ?Sized>(
    s: &mut S,
    steep: bool,
    from: i32,
    to: i32,
    minor: i32,
    color: S::Color,
) -> Result<(), S::Error> {
    let len = to - from + 1;
    if len == 1 {
        plot(s, steep, from, minor, color)
    } else if steep {
        s.fill_column(minor, from, len, color)
    } else {
        s.fill_row(from, minor, len, color)
    }
}

#[allow(clippy::indexing_slicing)]
fn fill_triangle<S: Surface + ?Sized>(
    s: &mut S,
    mut v: [(i32, i32); 3],
    color: S::Color,
) -> Result<(), S::Error> {
    // Order by y; ties keep their original order.
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    if v[1].1 > v[2].1 {
        v.swap(1, 2);
    }
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    let [(x0, y0), (x1, y1), (x2, y2)] = v;

    if y0 == y2 {
        let a = x0.min(x1).min(x2);
        let b = x0.max(x1).max(x2);
        return s.fill_row(a, y0, b - a + 1, color);
    }

    let dx01 = i64::from(x1 - x0);
    let dy01 = i64::from(y1 - y0);
    let dx02 = i64::from(x2 - x0);
    let dy02 = i64::from(y2 - y0);
    let dx12 = i64::from(x2 - x1);
    let dy12 = i64::from(y2 - y1);

    // A flat-bottomed triangle takes its last scanline in the upper half so
    // the lower half (and its zero-height edge) is skipped entirely.
    let last = if y1 == y2 { y1 } else { y1 - 1 };

    let mut sa: i64 = 0;
    let mut sb: i64 = 0;
    let mut y = y0;
    while y <= last {
        let a = x0 + narrow_i64(ratio(sa, dy01));
        let b = x0 + narrow_i64(ratio(sb, dy02));
        sa += dx01;
        sb += dx02;
        span(s, a, b, y, color)?;
        y += 1;
    }

    sa = dx12 * i64::from(y - y1);
    sb = dx02 * i64::from(y - y0);
    while y <= y2 {
        let a = x1 + narrow_i64(ratio(sa, dy12));
        let b = x0 + narrow_i64(ratio(sb, dy02));
        sa += dx12;
        sb += dx02;
        span(s, a, b, y, color)?;
        y += 1;
    }
    Ok(())
}

fn span<S: Surface + ?Sized>(s: &mut S, a: i32, b: i32, y: i32, color: S::Color) -> Result<(), S::Error> {
    let (a, b) = (a.min(b), a.max(b));
    s.fill_row(a, y, b - a + 1, color)
}

/// Truncating division; a zero denominator yields zero.
fn ratio(num: i64, den: i64) -> i64 {
    num.checked_div(den).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Midpoint circle walk over one octant.
///
/// Yields `(x, y)` offsets with `0 < x ≤ y`, starting next to `(0, r)`.
struct Midpoint {
    f: i32,
    ddf_x: i32,
    ddf_y: i32,
    x: i32,
    y: i32,
}

impl Midpoint {
    fn new(r: i32) -> Self {
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for Midpoint {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

/// Coordinates `(column, row)` of every set bit in a 1bpp bitmap.
pub(crate) fn set_bits(bitmap: &[u8], w: i32, h: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    let w = w.max(0);
    let h = h.max(0);
    let stride = (w + 7) / 8;
    (0..h).flat_map(move |j| {
        (0..w).filter_map(move |i| {
            let index = usize::try_from(j * stride + i / 8).ok()?;
            let byte = bitmap.get(index).copied().unwrap_or(0);
            (byte & (0x80 >> (i & 7)) != 0).then_some((i, j))
        })
    })
}

fn corner_radius(w: i16, h: i16, r: i16) -> i16 {
    r.min(w / 2).min(h / 2).max(0)
}

/// Saturating narrow to the public coordinate type.
#[allow(clippy::cast_possible_truncation)]
fn narrow(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

#[allow(clippy::cast_possible_truncation)]
fn narrow_i64(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
