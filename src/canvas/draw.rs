//! Integer rasterization primitives.
//!
//! Every primitive validates all coordinates it is about to touch before the
//! first write, so a failing call leaves the buffer unchanged. Nothing is
//! clipped: a shape that pokes outside the buffer is an error.

use super::PixelBuffer;
use crate::color::Pixel;
use crate::error::{Error, Result};

impl PixelBuffer {
    // ========================================================================
    // Spans (callers validate)
    // ========================================================================

    /// Horizontal span between two in-bounds x positions, inclusive
    fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Pixel) {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = self.index_of(x1, y);
        let end = self.index_of(x2, y);
        self.pixels_mut()[start..=end].fill(color);
    }

    /// Vertical span between two in-bounds y positions, inclusive
    fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Pixel) {
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in y1..=y2 {
            self.put(x, y, color);
        }
    }

    fn check_all(&self, operation: &'static str, points: &[(i32, i32)]) -> Result<()> {
        points
            .iter()
            .try_for_each(|&(x, y)| self.check(operation, x, y))
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a line using Bresenham's algorithm, both endpoints inclusive
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Pixel) -> Result<()> {
        self.check_all("draw_line", &[(x1, y1), (x2, y2)])?;
        self.bresenham(x1, y1, x2, y2, color);
        Ok(())
    }

    fn bresenham(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Pixel) {
        let dx = (x2 - x1).abs();
        let dy = -((y2 - y1).abs());
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.put(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > dy {
                err += dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Corners of a `w x h` rectangle, validated
    fn rect_corners(
        &self,
        operation: &'static str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<(i32, i32)> {
        if w <= 0 || h <= 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        let far = (x.saturating_add(w - 1), y.saturating_add(h - 1));
        self.check_all(operation, &[(x, y), far])?;
        Ok(far)
    }

    /// Fill `[x, x + w) x [y, y + h)`
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Pixel) -> Result<()> {
        let (x2, y2) = self.rect_corners("fill_rect", x, y, w, h)?;
        for row in y..=y2 {
            self.hline(x, x2, row, color);
        }
        Ok(())
    }

    /// Outline of `[x, x + w) x [y, y + h)`
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Pixel) -> Result<()> {
        let (x2, y2) = self.rect_corners("draw_rect", x, y, w, h)?;
        self.hline(x, x2, y, color);
        self.hline(x, x2, y2, color);
        self.vline(x, y, y2, color);
        self.vline(x2, y, y2, color);
        Ok(())
    }

    // ========================================================================
    // Triangles
    // ========================================================================

    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Pixel,
    ) -> Result<()> {
        self.check_all("draw_triangle", &[(x1, y1), (x2, y2), (x3, y3)])?;
        self.bresenham(x1, y1, x2, y2, color);
        self.bresenham(x2, y2, x3, y3, color);
        self.bresenham(x3, y3, x1, y1, color);
        Ok(())
    }

    /// Scanline triangle fill.
    ///
    /// Vertices are sorted by y. Rows from the apex down to the middle vertex
    /// are bounded by the long edge and the upper short edge; the remaining
    /// rows by the long edge and the lower short edge. Collinear input fills
    /// whatever spans the edges cover.
    pub fn fill_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Pixel,
    ) -> Result<()> {
        self.check_all("fill_triangle", &[(x1, y1), (x2, y2), (x3, y3)])?;

        let mut v = [(x1, y1), (x2, y2), (x3, y3)];
        v.sort_by_key(|&(_, y)| y);
        let [top, mid, bottom] = v;

        for y in top.1..=mid.1 {
            let (a0, a1) = edge_span(top, bottom, y);
            let (b0, b1) = edge_span(top, mid, y);
            self.hline(a0.min(b0), a1.max(b1), y, color);
        }
        for y in mid.1 + 1..=bottom.1 {
            let (a0, a1) = edge_span(top, bottom, y);
            let (b0, b1) = edge_span(mid, bottom, y);
            self.hline(a0.min(b0), a1.max(b1), y, color);
        }
        Ok(())
    }

    // ========================================================================
    // Circles
    // ========================================================================

    fn check_circle(&self, operation: &'static str, cx: i32, cy: i32, radius: i32) -> Result<()> {
        if radius < 0 {
            return Err(Error::InvalidDimension {
                width: radius,
                height: radius,
            });
        }
        let corner = |dx: i32, dy: i32| (cx.saturating_add(dx), cy.saturating_add(dy));
        self.check_all(operation, &[corner(-radius, -radius), corner(radius, radius)])
    }

    /// Circle outline using the midpoint algorithm
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Pixel) -> Result<()> {
        self.check_circle("draw_circle", cx, cy, radius)?;
        for (x, y) in MidpointCircle::new(radius) {
            self.put(cx + x, cy + y, color);
            self.put(cx + y, cy + x, color);
            self.put(cx - y, cy + x, color);
            self.put(cx - x, cy + y, color);
            self.put(cx - x, cy - y, color);
            self.put(cx - y, cy - x, color);
            self.put(cx + y, cy - x, color);
            self.put(cx + x, cy - y, color);
        }
        Ok(())
    }

    /// Filled circle drawn as horizontal spans between octant pairs
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Pixel) -> Result<()> {
        self.check_circle("fill_circle", cx, cy, radius)?;
        for (x, y) in MidpointCircle::new(radius) {
            self.hline(cx - x, cx + x, cy + y, color);
            self.hline(cx - x, cx + x, cy - y, color);
            self.hline(cx - y, cx + y, cy + x, color);
            self.hline(cx - y, cx + y, cy - x, color);
        }
        Ok(())
    }
}

/// X range covered by the edge `a -> b` on row `y`.
///
/// Horizontal edges cover both endpoints; others are interpolated with
/// integer division, which keeps the result between the edge's endpoints.
fn edge_span(a: (i32, i32), b: (i32, i32), y: i32) -> (i32, i32) {
    let ((xa, ya), (xb, yb)) = (a, b);
    if ya == yb {
        return (xa.min(xb), xa.max(xb));
    }
    let x = i64::from(xa)
        + (i64::from(xb) - i64::from(xa)) * (i64::from(y) - i64::from(ya))
            / (i64::from(yb) - i64::from(ya));
    let x = x as i32;
    (x, x)
}

/// First-octant points `(x, y)` of a midpoint circle, `x >= y`
struct MidpointCircle {
    x: i32,
    y: i32,
    err: i32,
}

impl MidpointCircle {
    fn new(radius: i32) -> Self {
        Self {
            x: radius,
            y: 0,
            err: 0,
        }
    }
}

impl Iterator for MidpointCircle {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.x < self.y {
            return None;
        }
        let point = (self.x, self.y);
        if self.err <= 0 {
            self.y += 1;
            self.err += 2 * self.y + 1;
        }
        if self.err > 0 {
            self.x -= 1;
            self.err -= 2 * self.x + 1;
        }
        Some(point)
    }
}
