//! A [`DrawSurface`] made of terminal cells.
//!
//! Every cell shows two vertically stacked pixels through the upper half
//! block (`▀`): the top pixel is the foreground, the bottom one the
//! background. Text cannot be scaled in a terminal, so labels are stamped
//! as plain characters on top of the pixels and the font size is ignored.

use super::sprites;
use crate::render::{DrawSurface, Font, Rgb, Sprite};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

const UPPER_HALF: char = '\u{2580}';
const LOWER_HALF: char = '\u{2584}';

/// One rendered terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

#[derive(Debug, Clone)]
struct Label {
    col: usize,
    row: usize,
    text: String,
    color: Rgb,
}

#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Option<Rgb>>,
    labels: Vec<Label>,
}

impl PixelCanvas {
    /// A transparent canvas of `width × height` pixels. The height is rounded
    /// up to a whole number of cells.
    pub fn new(width: usize, height: usize) -> Self {
        let height = height + height % 2;
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            labels: Vec::new(),
        }
    }

    /// Canvas sized for a simulation surface of `width × height` units.
    pub fn for_surface((width, height): (f64, f64)) -> Self {
        Self::new(width.ceil().max(0.0) as usize, height.ceil().max(0.0) as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cols(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height / 2
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    /// Set a pixel, ignoring anything outside the canvas.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = Some(color);
    }

    /// The cell at `(col, row)` after labels are applied.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        for label in self.labels.iter().rev() {
            if label.row == row && col >= label.col {
                if let Some(ch) = label.text.chars().nth(col - label.col) {
                    return Cell {
                        ch,
                        fg: to_color(label.color),
                        bg: Color::Reset,
                    };
                }
            }
        }

        let top = self.pixel(col, row * 2);
        let bottom = self.pixel(col, row * 2 + 1);
        match (top, bottom) {
            (None, None) => Cell::default(),
            (Some(top), None) => Cell {
                ch: UPPER_HALF,
                fg: to_color(top),
                bg: Color::Reset,
            },
            (None, Some(bottom)) => Cell {
                ch: LOWER_HALF,
                fg: to_color(bottom),
                bg: Color::Reset,
            },
            (Some(top), Some(bottom)) => Cell {
                ch: UPPER_HALF,
                fg: to_color(top),
                bg: to_color(bottom),
            },
        }
    }

    /// The canvas as styled terminal lines, adjacent equal styles merged.
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.rows())
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut current = Cell::default();
                let mut text = String::new();

                for col in 0..self.cols() {
                    let cell = self.cell(col, row);
                    if (cell.fg != current.fg || cell.bg != current.bg) && !text.is_empty() {
                        spans.push(Span::styled(
                            std::mem::take(&mut text),
                            Style::default().fg(current.fg).bg(current.bg),
                        ));
                    }
                    current = cell;
                    text.push(cell.ch);
                }
                if !text.is_empty() {
                    spans.push(Span::styled(
                        text,
                        Style::default().fg(current.fg).bg(current.bg),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl DrawSurface for PixelCanvas {
    fn clear(&mut self) {
        self.pixels.fill(None);
        self.labels.clear();
    }

    fn draw_image(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64) {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return;
        }
        let bitmap = sprites::bitmap(sprite);
        let (src_w, src_h) = (bitmap.width(), bitmap.height());
        let dst_w = width.round().max(1.0) as usize;
        let dst_h = height.round().max(1.0) as usize;
        let (x0, y0) = (x.round() as i64, y.round() as i64);

        for dy in 0..dst_h {
            let sy = dy * src_h / dst_h;
            for dx in 0..dst_w {
                let sx = dx * src_w / dst_w;
                if let Some(color) = bitmap.color_at(sx, sy) {
                    self.set_pixel(x0 + dx as i64, y0 + dy as i64, color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, _font: &Font, color: Rgb) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        // Baseline y sits just under the glyphs.
        let row = ((y - 1.0).max(0.0) / 2.0).floor() as usize;
        self.labels.push(Label {
            col: x.round().max(0.0) as usize,
            row: row.min(self.rows().saturating_sub(1)),
            text: text.to_string(),
            color,
        });
    }
}
