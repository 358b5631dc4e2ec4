//! Depth-buffered ASCII rasterizer for projected plot scenes.

use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use plot3d_core::{Color, Prim2d, Scene2d, ScreenPoint};
use std::io::Write;

/// Character luminosity ramp for shaded faces (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Cells of empty margin kept around the mapped scene.
const MARGIN: usize = 1;

/// Maps scene coordinates into canvas cells, flipping y so scene-up is
/// screen-up.
struct Viewport {
    xmin: f64,
    ymax: f64,
    sx: f64,
    sy: f64,
}

impl Viewport {
    fn fit(bounds: (f64, f64, f64, f64), width: usize, height: usize) -> Self {
        let (mut x0, mut x1, mut y0, mut y1) = bounds;
        if x0 == x1 {
            x0 -= 0.5;
            x1 += 0.5;
        }
        if y0 == y1 {
            y0 -= 0.5;
            y1 += 0.5;
        }
        let usable_w = width.saturating_sub(2 * MARGIN + 1).max(1);
        let usable_h = height.saturating_sub(2 * MARGIN + 1).max(1);
        Self {
            xmin: x0,
            ymax: y1,
            sx: usable_w as f64 / (x1 - x0),
            sy: usable_h as f64 / (y1 - y0),
        }
    }

    /// (column, row, depth) in canvas space.
    fn map(&self, p: &ScreenPoint) -> (f64, f64, f64) {
        let col = MARGIN as f64 + (p.x - self.xmin) * self.sx;
        let row = MARGIN as f64 + (self.ymax - p.y) * self.sy;
        (col, row, p.depth)
    }
}

/// ASCII canvas that rasterizes scene primitives with a depth buffer.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::WHITE; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f64::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::WHITE;
        }
    }

    /// Rasterize a projected scene into the buffers.
    pub fn render_scene(&mut self, scene: &Scene2d) {
        let Some(bounds) = scene.bounds() else {
            return;
        };
        let vp = Viewport::fit(bounds, self.width, self.height);

        for prim in &scene.prims {
            match prim {
                Prim2d::Polygon {
                    points,
                    facecolor,
                    edgecolor,
                    brightness,
                } => {
                    let pts: Vec<(f64, f64, f64)> = points.iter().map(|p| vp.map(p)).collect();
                    let ch = ramp_char(*brightness);
                    let color = facecolor.dim(0.5 + 0.5 * brightness);
                    for i in 1..pts.len().saturating_sub(1) {
                        self.fill_triangle(pts[0], pts[i], pts[i + 1], ch, color);
                    }
                    if let Some(edge) = edgecolor {
                        self.stroke_ring(&pts, *edge);
                    }
                }
                Prim2d::Polyline { points, color } => {
                    let pts: Vec<(f64, f64, f64)> = points.iter().map(|p| vp.map(p)).collect();
                    for pair in pts.windows(2) {
                        self.draw_line(pair[0], pair[1], *color);
                    }
                }
                Prim2d::Marker {
                    point,
                    color,
                    symbol,
                } => {
                    let (col, row, depth) = vp.map(point);
                    self.plot_overlay(col.round(), row.round(), depth, *symbol, *color);
                }
                Prim2d::Label {
                    anchor,
                    text,
                    color,
                    ..
                } => {
                    // Terminal cells cannot rotate; labels run along the row.
                    let (col, row, depth) = vp.map(anchor);
                    for (i, ch) in text.chars().enumerate() {
                        self.plot_overlay(col.round() + i as f64, row.round(), depth, ch, *color);
                    }
                }
            }
        }
    }

    /// Depth-tested write for faces: strictly nearer samples win.
    fn plot_face(&mut self, col: f64, row: f64, depth: f64, ch: char, color: Color) {
        let Some(idx) = self.cell_index(col, row, depth) else {
            return;
        };
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = ch;
            self.color_buffer[idx] = color;
        }
    }

    /// Depth-tested write for strokes, markers and labels: ties go to
    /// the overlay so edges sit on their own faces.
    fn plot_overlay(&mut self, col: f64, row: f64, depth: f64, ch: char, color: Color) {
        let Some(idx) = self.cell_index(col, row, depth) else {
            return;
        };
        if depth <= self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = ch;
            self.color_buffer[idx] = color;
        }
    }

    fn cell_index(&self, col: f64, row: f64, depth: f64) -> Option<usize> {
        if !col.is_finite() || !row.is_finite() || !depth.is_finite() {
            return None;
        }
        let (c, r) = (col.round(), row.round());
        if c < 0.0 || r < 0.0 || c >= self.width as f64 || r >= self.height as f64 {
            return None;
        }
        Some(r as usize * self.width + c as usize)
    }

    fn draw_line(&mut self, a: (f64, f64, f64), b: (f64, f64, f64), color: Color) {
        let all = [a.0, a.1, a.2, b.0, b.1, b.2];
        if !all.iter().all(|v| v.is_finite()) {
            return;
        }
        let (dc, dr) = (b.0 - a.0, b.1 - a.1);
        let ch = line_char(dc, dr);
        let steps = dc.abs().max(dr.abs()).ceil().max(1.0);
        for s in 0..=steps as usize {
            let t = s as f64 / steps;
            self.plot_overlay(
                a.0 + dc * t,
                a.1 + dr * t,
                a.2 + (b.2 - a.2) * t,
                ch,
                color,
            );
        }
    }

    fn stroke_ring(&mut self, pts: &[(f64, f64, f64)], color: Color) {
        if pts.len() < 2 {
            return;
        }
        for pair in pts.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
        self.draw_line(pts[pts.len() - 1], pts[0], color);
    }

    /// Fill one triangle, interpolating depth across the face.
    fn fill_triangle(
        &mut self,
        v0: (f64, f64, f64),
        v1: (f64, f64, f64),
        v2: (f64, f64, f64),
        ch: char,
        color: Color,
    ) {
        let all = [v0.0, v0.1, v1.0, v1.1, v2.0, v2.1];
        if !all.iter().all(|v| v.is_finite()) {
            return;
        }

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64;
                let py = y as f64;
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot_face(px, py, depth, ch, color);
                    }
                }
            }
        }
    }

    /// Plain-text frame, one row per line.
    pub fn frame(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.char_buffer[y * self.width + x]);
            }
            out.push('\n');
        }
        out
    }

    /// Queue the styled frame onto a terminal writer.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.color_buffer[idx];
                writer.queue(SetForegroundColor(TermColor::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                }))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Shading intensity in [0, 1] mapped onto the luminosity ramp.
fn ramp_char(brightness: f64) -> char {
    let idx = (brightness.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[idx.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Stroke character by dominant direction. Rows grow downward, so a
/// positive (dc, dr) pair runs right and down.
fn line_char(dc: f64, dr: f64) -> char {
    if dc.abs() > 2.0 * dr.abs() {
        '-'
    } else if dr.abs() > 2.0 * dc.abs() {
        '|'
    } else if (dc > 0.0) == (dr > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
