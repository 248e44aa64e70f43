/// ASCII line canvas for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::Write;
use wire3d_core::Polyline;

/// Glyph for an edge, picked from its slope
fn edge_glyph(from: Point2<f64>, to: Point2<f64>) -> char {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dy.abs() * 2.0 < dx.abs() {
        '-'
    } else if dx.abs() * 2.0 < dy.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

const VERTEX_GLYPH: char = '+';

/// Character grid that polylines are stroked onto
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Character at cell (`x`, `y`), if on the canvas
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Stroke every polyline as a closed loop
    pub fn stroke_all(&mut self, polylines: &[Polyline]) {
        for polyline in polylines {
            self.stroke_polyline(polyline);
        }
    }

    pub fn stroke_polyline(&mut self, polyline: &Polyline) {
        for (from, to) in polyline.edges() {
            self.draw_line(from, to);
        }
        for point in &polyline.points {
            self.plot(point.x, point.y, VERTEX_GLYPH);
        }
    }

    /// DDA line between two screen points; cells off the canvas are skipped
    pub fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>) {
        let glyph = edge_glyph(from, to);
        let dx = to.x - from.x;
        let dy = to.y - from.y;

        // Unclipped vertices can sit millions of cells off the canvas
        let limit = 4.0 * (self.width + self.height) as f64;
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, limit) as usize;

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot(from.x + dx * t, from.y + dy * t, glyph);
        }
    }

    fn plot(&mut self, x: f64, y: f64, glyph: char) {
        if !(x >= 0.0 && y >= 0.0) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.char_buffer[y * self.width + x] = glyph;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    VERTEX_GLYPH => Color::Yellow,
                    ' ' => Color::DarkGrey,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
