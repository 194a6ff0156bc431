use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::ops::{Index, IndexMut};

use super::{Position, Selection};

/// A mutable 2D grid of symbols representing a map layout
///
/// Cells are addressed by signed `(x, y)` coordinates with `(0, 0)` in the top
/// left. Reads outside the grid return [`MapGrid::EMPTY`] and writes outside
/// the grid are silently dropped, so callers never need to range-check before
/// touching a cell.
#[derive(Clone, PartialEq)]
pub struct MapGrid {
    width: i32,
    height: i32,
    cells: Vec<Vec<char>>,
}

impl Index<usize> for MapGrid {
    type Output = [char];

    fn index(&self, index: usize) -> &Self::Output {
        self.cells.index(index)
    }
}

impl IndexMut<usize> for MapGrid {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.cells.index_mut(index)
    }
}

impl MapGrid {
    /// The sentinel value of a cell that has not been written to, and the
    /// value returned when reading outside the grid.
    pub const EMPTY: char = ' ';

    /// Create a new grid with the given dimensions, filled with [`MapGrid::EMPTY`]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Cannot create a grid with zero or negative dimensions"
        );
        MapGrid {
            width,
            height,
            cells: vec![vec![Self::EMPTY; width as usize]; height as usize],
        }
    }

    /// Create a grid from rows of symbols. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        assert!(
            !rows.is_empty() && !rows[0].is_empty(),
            "Cannot create a grid with zero rows or zero columns"
        );
        let width = rows[0].len();
        assert!(
            rows.iter().all(|row| row.len() == width),
            "Cannot create a grid from rows of unequal length"
        );

        MapGrid {
            width: width as i32,
            height: rows.len() as i32,
            cells: rows,
        }
    }

    /// Create a grid from strings, one symbol per character
    pub fn from_strings(rows: &[&str]) -> Self {
        Self::from_rows(rows.iter().map(|row| row.chars().collect()).collect())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the total number of cells in the grid
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Returns the smaller of the grid's width and height
    pub fn minimum_dimension(&self) -> i32 {
        self.width.min(self.height)
    }

    /// Returns the position of the center cell of the grid
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Returns the symbol at the given position, or [`MapGrid::EMPTY`] if the
    /// position is outside the grid
    pub fn get(&self, x: i32, y: i32) -> char {
        if !self.in_bounds(x, y) {
            return Self::EMPTY;
        }
        self.cells[y as usize][x as usize]
    }

    /// Writes the symbol at the given position. Writes outside the grid are
    /// silently dropped.
    pub fn set(&mut self, x: i32, y: i32, symbol: char) {
        if !self.in_bounds(x, y) {
            return;
        }
        self.cells[y as usize][x as usize] = symbol;
    }

    /// Returns an iterator over each row of cells
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// Draws a line of `symbol` from `(x1, y1)` to `(x2, y2)` inclusive.
    ///
    /// The line steps one cell at a time along the dominant axis, accumulating
    /// the minor-axis slope and rounding to the nearest cell. `thickness`
    /// stamps a `thickness x thickness` block centered on each stepped cell.
    /// With `stagger`, each step additionally stamps the previous major-axis
    /// cell at the advanced minor coordinate, so a 1-thick diagonal line stays
    /// traversable by movement restricted to the 4 cardinal directions.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        symbol: char,
        thickness: i32,
        stagger: bool,
    ) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let x_axis = dy <= dx;

        let (major, minor) = if x_axis { (dx, dy) } else { (dy, dx) };
        let slope = if major != 0 {
            minor as f32 / major as f32
        } else {
            0.0
        };

        let mut sx = x1 as f32;
        let mut sy = y1 as f32;

        for _ in 0..=major {
            self.stamp(sx.round() as i32, sy.round() as i32, symbol, thickness);

            let mx = sx.round() as i32;

            if x_axis {
                sx += if x2 > x1 { 1.0 } else { -1.0 };
                sy += if y2 > y1 { slope } else { -slope };
            } else {
                sy += if y2 > y1 { 1.0 } else { -1.0 };
                sx += if x2 > x1 { slope } else { -slope };
            }

            if stagger {
                self.stamp(mx, sy.round() as i32, symbol, thickness);
            }
        }
    }

    /// Stamps a `thickness x thickness` block of `symbol` centered (with a
    /// floor offset) on the given cell
    fn stamp(&mut self, x: i32, y: i32, symbol: char, thickness: i32) {
        for fx in 0..thickness {
            for fy in 0..thickness {
                self.set(x + fx - thickness / 2, y + fy - thickness / 2, symbol);
            }
        }
    }

    /// Resizes the grid to the given dimensions. Cells inside the overlap of
    /// the old and new bounds keep their values; new cells are
    /// [`MapGrid::EMPTY`]. Shrinking discards the cells outside the new bounds.
    pub fn resize(&mut self, width: i32, height: i32) {
        assert!(
            width > 0 && height > 0,
            "Cannot resize a grid to zero or negative dimensions"
        );

        let mut cells = vec![vec![Self::EMPTY; width as usize]; height as usize];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[y as usize][x as usize] = self.cells[y as usize][x as usize];
            }
        }

        self.cells = cells;
        self.width = width;
        self.height = height;
    }

    /// Rotates the entire grid 90 degrees clockwise, swapping its dimensions
    pub fn rotate(&mut self) {
        let old_w = self.width as usize;
        let old_h = self.height as usize;

        let mut cells = vec![vec![Self::EMPTY; old_h]; old_w];
        for y in 0..old_w {
            for x in 0..old_h {
                cells[y][x] = self.cells[old_h - 1 - x][y];
            }
        }

        self.cells = cells;
        self.width = old_h as i32;
        self.height = old_w as i32;
    }

    /// Copies the other grid's cells into this grid, with the other grid's
    /// top left corner placed at `(offset_x, offset_y)`. Cells that fall
    /// outside either grid are silently cropped.
    pub fn copy_from(&mut self, other: &MapGrid, offset_x: i32, offset_y: i32) {
        for cy in 0..other.height {
            for cx in 0..other.width {
                self.set(cx + offset_x, cy + offset_y, other.get(cx, cy));
            }
        }
    }

    /// Returns the position of the cell with the given symbol closest
    /// (by Euclidean distance) to `(x, y)`, or `None` if the symbol does not
    /// appear in the grid. Ties go to the first match in row-major scan order.
    pub fn closest_symbol(&self, x: i32, y: i32, symbol: char) -> Option<Position> {
        let mut best: Option<(Position, i64)> = None;

        for cy in 0..self.height {
            for cx in 0..self.width {
                if self.cells[cy as usize][cx as usize] != symbol {
                    continue;
                }
                let dx = (cx - x) as i64;
                let dy = (cy - y) as i64;
                let dist = dx * dx + dy * dy;
                if best.map_or(true, |(_, b)| dist < b) {
                    best = Some((Position::new(cx, cy), dist));
                }
            }
        }

        best.map(|(pos, _)| pos)
    }

    /// Returns a selection containing every cell of the grid
    pub fn select_all(&self) -> Selection {
        Selection::all(self)
    }

    /// Returns a selection of all cells contiguous to `(x, y)` that share its
    /// symbol, spreading in the 4 cardinal directions (8 with `diagonal`).
    /// An out-of-bounds starting position yields an empty selection.
    pub fn select_contiguous(&self, x: i32, y: i32, diagonal: bool) -> Selection {
        let mut selection = Selection::empty(self);
        if !self.in_bounds(x, y) {
            return selection;
        }

        let start_symbol = self.get(x, y);
        let start = Position::new(x, y);

        let mut seen = HashSet::new();
        seen.insert(start);
        let mut open = VecDeque::new();
        open.push_back(start);

        while let Some(pos) = open.pop_front() {
            selection.insert(pos.x, pos.y);

            let mut sides = vec![
                Position::new(pos.x - 1, pos.y),
                Position::new(pos.x + 1, pos.y),
                Position::new(pos.x, pos.y - 1),
                Position::new(pos.x, pos.y + 1),
            ];
            if diagonal {
                sides.extend_from_slice(&[
                    Position::new(pos.x - 1, pos.y - 1),
                    Position::new(pos.x + 1, pos.y - 1),
                    Position::new(pos.x - 1, pos.y + 1),
                    Position::new(pos.x + 1, pos.y + 1),
                ]);
            }

            for side in sides {
                // The flood must not spread through the out-of-bounds sentinel
                if self.in_bounds(side.x, side.y)
                    && self.get(side.x, side.y) == start_symbol
                    && !seen.contains(&side)
                {
                    seen.insert(side);
                    open.push_back(side);
                }
            }
        }

        selection
    }
}

/// Human-readable dump of the grid with row/column index gutters. Meant for
/// debugging and logging, not as a persisted format.
impl fmt::Display for MapGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "  W:{} H:{}\n\n       ", self.width, self.height)?;

        // Column indices are staggered over two lines so they stay readable
        for x in (1..self.width).step_by(2) {
            write!(f, "{:2}  ", x)?;
        }
        write!(f, "\n     ")?;
        for x in (0..self.width).step_by(2) {
            write!(f, "{:2}  ", x)?;
        }
        writeln!(f)?;

        for (y, row) in self.cells.iter().enumerate() {
            write!(f, "{:3}  |", y)?;
            for &cell in row {
                write!(f, "{} ", cell)?;
            }
            writeln!(f, "|")?;
        }

        Ok(())
    }
}

impl fmt::Debug for MapGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use colored::*;

        for row in &self.cells {
            for &cell in row {
                let text = cell.to_string();
                let colored = if cell == Self::EMPTY {
                    text.on_black()
                } else {
                    // Stable background color per symbol value
                    match (cell as u32) % 5 {
                        0 => text.on_blue(),
                        1 => text.on_green(),
                        2 => text.on_red(),
                        3 => text.on_yellow(),
                        _ => text.on_magenta(),
                    }
                };
                write!(f, "{}", colored)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
