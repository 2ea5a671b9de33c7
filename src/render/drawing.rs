use crate::router::geom::{Direction, Point};

/// Which line arms leave a character cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Arms(u8);

impl Arms {
    fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 4,
            Direction::Right => 8,
        }
    }

    fn add(&mut self, dir: Direction) {
        self.0 |= Arms::bit(dir);
    }

    fn has(self, dir: Direction) -> bool {
        self.0 & Arms::bit(dir) != 0
    }

    fn glyph(self, use_ascii: bool) -> char {
        let vertical = self.has(Direction::Up) || self.has(Direction::Down);
        let horizontal = self.has(Direction::Left) || self.has(Direction::Right);
        if use_ascii {
            return match (vertical, horizontal) {
                (false, false) => ' ',
                (true, false) => '|',
                (false, true) => '-',
                (true, true) => '+',
            };
        }
        let (up, down, left, right) = (
            self.has(Direction::Up),
            self.has(Direction::Down),
            self.has(Direction::Left),
            self.has(Direction::Right),
        );
        match (up, down, left, right) {
            (false, false, false, false) => ' ',
            (_, _, false, false) => '│',
            (false, false, _, _) => '─',
            (false, true, false, true) => '┌',
            (false, true, true, false) => '┐',
            (true, false, false, true) => '└',
            (true, false, true, false) => '┘',
            (true, true, false, true) => '├',
            (true, true, true, false) => '┤',
            (false, true, true, true) => '┬',
            (true, false, true, true) => '┴',
            _ => '┼',
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Cell {
    arms: Arms,
    endpoint: bool,
}

/// Rows allowed per column, so very tall canvases stay a bounded raster.
const MAX_ROWS_PER_COLUMN: usize = 4;

/// Character raster of a canvas. Real coordinates are scaled onto
/// `columns` cells horizontally; rows are scaled at half that density to
/// make up for the tall terminal cells.
#[derive(Clone, Debug)]
pub struct Drawing {
    width: f64,
    height: f64,
    cells: Vec<Vec<Cell>>,
}

impl Drawing {
    pub fn new(width: f64, height: f64, columns: usize) -> Drawing {
        let columns = columns.max(2);
        let max_rows = (columns * MAX_ROWS_PER_COLUMN) as f64;
        let rows = ((columns as f64) * height / width / 2.0)
            .round()
            .clamp(2.0, max_rows) as usize;
        Drawing {
            width,
            height,
            cells: vec![vec![Cell::default(); rows]; columns],
        }
    }

    /// (columns, rows)
    pub fn size(&self) -> (usize, usize) {
        (self.cells.len(), self.cells[0].len())
    }

    fn cell_of(&self, point: Point) -> (usize, usize) {
        let (columns, rows) = self.size();
        let scale = |value: f64, extent: f64, cells: usize| -> usize {
            let scaled = (value / extent * (cells - 1) as f64).round();
            (scaled.max(0.0) as usize).min(cells - 1)
        };
        (
            scale(point.x, self.width, columns),
            scale(point.y, self.height, rows),
        )
    }

    pub fn draw_polyline(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            let from = self.cell_of(pair[0]);
            let to = self.cell_of(pair[1]);
            self.draw_line(from, to);
        }
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            for point in [*first, *last] {
                let (x, y) = self.cell_of(point);
                self.cells[x][y].endpoint = true;
            }
        }
    }

    // Both ends share a row or a column; anything else is drawn as an L
    // through the corner at (from.x, to.y).
    fn draw_line(&mut self, from: (usize, usize), to: (usize, usize)) {
        if from.1 != to.1 {
            let x = from.0;
            let (lo, hi) = (from.1.min(to.1), from.1.max(to.1));
            for y in lo..=hi {
                if y > lo {
                    self.cells[x][y].arms.add(Direction::Up);
                }
                if y < hi {
                    self.cells[x][y].arms.add(Direction::Down);
                }
            }
        }
        if from.0 != to.0 {
            let y = to.1;
            let (lo, hi) = (from.0.min(to.0), from.0.max(to.0));
            for x in lo..=hi {
                if x > lo {
                    self.cells[x][y].arms.add(Direction::Left);
                }
                if x < hi {
                    self.cells[x][y].arms.add(Direction::Right);
                }
            }
        }
    }

    pub fn to_text(&self, use_ascii: bool) -> String {
        let (columns, rows) = self.size();
        let mut lines = Vec::with_capacity(rows);
        for y in 0..rows {
            let mut line = String::with_capacity(columns);
            for x in 0..columns {
                let cell = self.cells[x][y];
                line.push(if cell.endpoint {
                    'o'
                } else {
                    cell.arms.glyph(use_ascii)
                });
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}
