/// ASCII rasterizer for wireframes and their planar projections
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Point2, Point3};
use std::io::Write;
use xf3d_core::{Bounds2, Camera, Edge};

/// Marker drawn at every vertex
const VERTEX_GLYPH: char = 'o';

/// Vertices are pulled this far toward the viewer so they sit on top of
/// the edges meeting there
const VERTEX_BIAS: f64 = 1e-3;

/// Background mark for projection grid lines
const GRID_GLYPH: char = '.';

/// Closest two grid lines may be, in cells
const MIN_GRID_SPACING: f64 = 4.0;

/// Character canvas with a depth buffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, or `None` outside the canvas
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Draw a posed wireframe as seen by `camera`
    pub fn render_wireframe(&mut self, vertices: &[Point3<f64>], edges: &[Edge], camera: &Camera) {
        let screen: Vec<Option<(f64, f64, f64)>> = vertices
            .iter()
            .map(|v| camera.project_to_screen(v, self.width, self.height))
            .collect();

        for &(a, b) in edges {
            // Edges with an off-screen end are skipped
            if let (Some(Some(p0)), Some(Some(p1))) = (screen.get(a), screen.get(b)) {
                self.rasterize_line(*p0, *p1, Color::White);
            }
        }

        for (x, y, depth) in screen.into_iter().flatten() {
            self.plot(x, y, depth - VERTEX_BIAS, VERTEX_GLYPH, Color::Red);
        }
    }

    /// Draw 2D points and edges scaled to fill the canvas, over a grid at
    /// integer coordinates (multiples of a power of two when space is short)
    pub fn render_projection(
        &mut self,
        points: &[Point2<f64>],
        edges: &[Edge],
        bounds: &Bounds2,
    ) {
        if self.width < 2 || self.height < 2 {
            return;
        }

        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let to_cell = |p: &Point2<f64>| {
            let x = (p.x - bounds.min.x) / bounds.width() * max_x;
            let y = max_y - (p.y - bounds.min.y) / bounds.height() * max_y;
            (x + 0.5, y + 0.5, 0.0)
        };
        let cells: Vec<(f64, f64, f64)> = points.iter().map(to_cell).collect();

        // Grid lines sit at infinite depth so every edge and vertex covers them
        let cells_per_unit_x = max_x / bounds.width();
        for x in grid_lines(bounds.min.x, bounds.max.x, cells_per_unit_x) {
            let column = to_cell(&Point2::new(x, bounds.min.y)).0;
            for row in 0..self.height {
                self.plot(column, row as f64, f64::INFINITY, GRID_GLYPH, Color::DarkGrey);
            }
        }
        let cells_per_unit_y = max_y / bounds.height();
        for y in grid_lines(bounds.min.y, bounds.max.y, cells_per_unit_y) {
            let row = to_cell(&Point2::new(bounds.min.x, y)).1;
            for column in 0..self.width {
                self.plot(column as f64, row, f64::INFINITY, GRID_GLYPH, Color::DarkGrey);
            }
        }

        for &(a, b) in edges {
            if let (Some(&p0), Some(&p1)) = (cells.get(a), cells.get(b)) {
                self.rasterize_line(p0, p1, Color::White);
            }
        }

        for &(x, y, depth) in &cells {
            self.plot(x, y, depth - VERTEX_BIAS, VERTEX_GLYPH, Color::Red);
        }
    }

    /// Step along the segment one cell at a time, interpolating depth
    fn rasterize_line(&mut self, p0: (f64, f64, f64), p1: (f64, f64, f64), color: Color) {
        let (dx, dy, dz) = (p1.0 - p0.0, p1.1 - p0.1, p1.2 - p0.2);
        let glyph = line_glyph(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(p0.0 + t * dx, p0.1 + t * dy, p0.2 + t * dz, glyph, color);
        }
    }

    fn plot(&mut self, x: f64, y: f64, depth: f64, character: char, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if depth <= self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    /// Queue the canvas with its top-left corner at (`column`, `row`)
    pub fn draw<W: Write>(&self, writer: &mut W, column: u16, row: u16) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(column, row + y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Grid coordinates within `[min, max]`, spaced at least `MIN_GRID_SPACING`
/// cells apart
fn grid_lines(min: f64, max: f64, cells_per_unit: f64) -> Vec<f64> {
    if !(cells_per_unit.is_finite() && cells_per_unit > 0.0) {
        return Vec::new();
    }

    let mut step = 1.0;
    while step * cells_per_unit < MIN_GRID_SPACING {
        step *= 2.0;
    }

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Pick the glyph closest to a segment's direction (rows grow downward)
fn line_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}
