use crossterm::{
    cursor, queue,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
};
use matcha::{FieldView, Palette, Rgb};
use std::io::{self, Write};

const UPPER_HALF: char = '\u{2580}';

/// One terminal cell: the upper pixel is drawn in `fg`, the lower in `bg`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell {
    fg: Color,
    bg: Color,
}

impl Cell {
    fn blank() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Terminal area showing the field, two grid rows per text row, starting at
/// screen row `top`. Only cells that changed since the last draw are sent.
pub(crate) struct Canvas {
    cols: usize,
    rows: usize,
    top: u16,
    last_frame: Vec<Cell>,
}

impl Canvas {
    pub(crate) fn new(cols: usize, rows: usize, top: u16) -> Self {
        Self {
            cols,
            rows,
            top,
            last_frame: vec![Cell::blank(); cols * rows],
        }
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub(crate) fn invalidate(&mut self) {
        self.last_frame.fill(Cell::blank());
    }

    /// Screen position to grid coordinates, if it lies on the canvas.
    pub(crate) fn to_grid(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let row = row.checked_sub(self.top)? as usize;
        let col = column as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some((col, row * 2))
    }

    fn pixel(view: &FieldView<'_>, palette: &Palette, x: usize, y: usize) -> Color {
        match view.value(x, y) {
            Ok(v) => to_color(palette.color(v)),
            Err(_) => Color::Reset,
        }
    }

    pub(crate) fn draw<W: Write>(
        &mut self,
        out: &mut W,
        view: &FieldView<'_>,
        palette: &Palette,
    ) -> io::Result<()> {
        let mut cur: Option<Cell> = None;

        for ty in 0..self.rows {
            for tx in 0..self.cols {
                let cell = Cell {
                    fg: Self::pixel(view, palette, tx, ty * 2),
                    bg: Self::pixel(view, palette, tx, ty * 2 + 1),
                };

                let fi = ty * self.cols + tx;
                if self.last_frame[fi] == cell {
                    continue;
                }

                queue!(out, cursor::MoveTo(tx as u16, ty as u16 + self.top))?;
                if cur.map_or(true, |c| c.fg != cell.fg) {
                    queue!(out, SetForegroundColor(cell.fg))?;
                }
                if cur.map_or(true, |c| c.bg != cell.bg) {
                    queue!(out, SetBackgroundColor(cell.bg))?;
                }
                cur = Some(cell);
                queue!(out, Print(UPPER_HALF))?;
                self.last_frame[fi] = cell;
            }
        }
        Ok(())
    }
}
