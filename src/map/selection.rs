use std::collections::HashSet;

use rand::Rng;

use super::{MapGrid, Position};

/// A set of cell positions scoped to one grid, refined through chained filters
///
/// Selections own their cells and capture the grid's bounds when created;
/// every transforming operation returns a new `Selection`, leaving the
/// original intact and reusable. Filters that inspect cell values borrow the
/// grid immutably; [`Selection::fill`] (and the helpers built on it) are the
/// only operations that write to the grid, and take it `&mut`.
///
/// Positions outside the grid's bounds are never stored: [`Selection::insert`]
/// silently drops them.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    width: i32,
    height: i32,
    cells: HashSet<Position>,
}

impl Selection {
    /// Returns a selection containing every cell of the grid
    pub fn all(grid: &MapGrid) -> Self {
        let mut cells = HashSet::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                cells.insert(Position::new(x, y));
            }
        }
        Selection {
            width: grid.width(),
            height: grid.height(),
            cells,
        }
    }

    /// Returns a selection of the grid with no cells selected
    pub fn empty(grid: &MapGrid) -> Self {
        Selection {
            width: grid.width(),
            height: grid.height(),
            cells: HashSet::new(),
        }
    }

    /// Retains only the cells satisfying the predicate. All of the higher
    /// level filters are built on this.
    pub fn filter<F>(&self, mut predicate: F) -> Selection
    where
        F: FnMut(i32, i32) -> bool,
    {
        Selection {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .copied()
                .filter(|pos| predicate(pos.x, pos.y))
                .collect(),
        }
    }

    /// Retains only the cells whose grid value equals `symbol`
    pub fn filter_by_symbol(&self, grid: &MapGrid, symbol: char) -> Selection {
        self.filter(|x, y| grid.get(x, y) == symbol)
    }

    /// Crops the selection to the rectangle from `(x, y)` to
    /// `(x + w - 1, y + h - 1)`, inclusive
    pub fn filter_by_area(&self, x: i32, y: i32, w: i32, h: i32) -> Selection {
        self.filter(|cx, cy| cx >= x && cy >= y && cx <= x + w - 1 && cy <= y + h - 1)
    }

    /// Independently retains each cell with probability `percentage` (0 to 1).
    /// This is a Bernoulli thinning, not a fixed-count sample.
    pub fn filter_by_percentage<R: Rng>(&self, percentage: f32, rng: &mut R) -> Selection {
        let mut cells = HashSet::new();
        // Visit members in scan order so equal seeds give equal results
        for pos in self.sorted_positions() {
            if rng.gen::<f32>() <= percentage {
                cells.insert(pos);
            }
        }
        Selection {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Retains only the cells with at least `count` neighbors whose value
    /// equals `symbol` (at most `count` when `at_most` is set). Counts the 4
    /// cardinal neighbors, or all 8 with `diagonals`.
    pub fn filter_by_neighbors(
        &self,
        grid: &MapGrid,
        symbol: char,
        count: usize,
        diagonals: bool,
        at_most: bool,
    ) -> Selection {
        self.filter(|x, y| {
            let mut offsets: Vec<(i32, i32)> = vec![(-1, 0), (1, 0), (0, -1), (0, 1)];
            if diagonals {
                offsets.extend_from_slice(&[(-1, -1), (1, -1), (-1, 1), (1, 1)]);
            }
            let n = offsets
                .into_iter()
                .filter(|&(ox, oy)| grid.get(x + ox, y + oy) == symbol)
                .count();

            if at_most {
                n <= count
            } else {
                n >= count
            }
        })
    }

    /// Returns a new selection with the cells of both selections
    pub fn union(&self, other: &Selection) -> Selection {
        let mut new = self.clone();
        for &pos in &other.cells {
            new.insert(pos.x, pos.y);
        }
        new
    }

    /// Returns a new selection without the cells of the other selection
    pub fn difference(&self, other: &Selection) -> Selection {
        Selection {
            width: self.width,
            height: self.height,
            cells: self.cells.difference(&other.cells).copied().collect(),
        }
    }

    /// Selects all cells of the grid that are not in this selection
    pub fn invert(&self) -> Selection {
        let mut cells = HashSet::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                if !self.cells.contains(&pos) {
                    cells.insert(pos);
                }
            }
        }
        Selection {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Morphologically dilates the selection by `distance` steps. Each step
    /// adds the 4 cardinal (8 with `diagonal`) neighbors of every member
    /// cell, clipped to the grid's bounds. A negative distance erodes
    /// instead: a member survives an erosion step only if all of its 4 (or 8)
    /// neighbors are also members.
    pub fn expand(&self, distance: i32, diagonal: bool) -> Selection {
        let mut new = self.clone();
        if distance == 0 {
            return new;
        }

        let eroding = distance < 0;

        for _ in 0..distance.abs() {
            if eroding {
                new.cells = new
                    .cells
                    .iter()
                    .copied()
                    .filter(|pos| {
                        let mut offsets: Vec<(i32, i32)> = vec![(-1, 0), (1, 0), (0, -1), (0, 1)];
                        if diagonal {
                            offsets.extend_from_slice(&[(-1, -1), (1, -1), (-1, 1), (1, 1)]);
                        }
                        offsets
                            .into_iter()
                            .all(|(ox, oy)| new.contains(pos.x + ox, pos.y + oy))
                    })
                    .collect();
            } else {
                let members: Vec<Position> = new.cells.iter().copied().collect();
                for pos in members {
                    new.insert(pos.x - 1, pos.y);
                    new.insert(pos.x + 1, pos.y);
                    new.insert(pos.x, pos.y - 1);
                    new.insert(pos.x, pos.y + 1);
                    if diagonal {
                        new.insert(pos.x - 1, pos.y - 1);
                        new.insert(pos.x + 1, pos.y - 1);
                        new.insert(pos.x - 1, pos.y + 1);
                        new.insert(pos.x + 1, pos.y + 1);
                    }
                }
            }
        }

        new
    }

    /// Morphologically erodes the selection by `distance` steps.
    /// `shrink(d, diagonal)` is equivalent to `expand(-d, diagonal)`.
    pub fn shrink(&self, distance: i32, diagonal: bool) -> Selection {
        self.expand(-distance, diagonal)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&Position::new(x, y))
    }

    /// Adds a position to the selection. Positions outside the grid's bounds
    /// are silently dropped, never stored.
    pub fn insert(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.cells.insert(Position::new(x, y));
    }

    pub fn remove(&mut self, x: i32, y: i32) {
        self.cells.remove(&Position::new(x, y));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns an iterator over the positions in the selection, in no
    /// particular order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Writes `symbol` into the grid at every member cell. This is the sole
    /// operation with grid side effects; the selection itself is unchanged.
    pub fn fill(&self, grid: &mut MapGrid, symbol: char) -> &Self {
        for &pos in &self.cells {
            grid.set(pos.x, pos.y, symbol);
        }
        self
    }

    /// Rewrites every member cell whose value is `from` to `to`
    pub fn remap(&self, grid: &mut MapGrid, from: char, to: char) -> &Self {
        for &pos in &self.cells {
            if grid.get(pos.x, pos.y) == from {
                grid.set(pos.x, pos.y, to);
            }
        }
        self
    }

    /// Randomly decays member cells with value `from` into `to`: each
    /// matching cardinal neighbor already holding `to` adds a 2.5% chance of
    /// decay. Repeated passes eat away at the edges of `from` regions.
    pub fn degrade<R: Rng>(&self, grid: &mut MapGrid, rng: &mut R, from: char, to: char) -> &Self {
        // Visit members in scan order so equal seeds give equal results
        for pos in self.sorted_positions() {
            if grid.get(pos.x, pos.y) != from {
                continue;
            }
            let neighbors = [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .filter(|&&(ox, oy)| grid.get(pos.x + ox, pos.y + oy) == to)
                .count();
            if neighbors > 0 && rng.gen::<f32>() <= neighbors as f32 * 0.025 {
                grid.set(pos.x, pos.y, to);
            }
        }
        self
    }

    fn sorted_positions(&self) -> Vec<Position> {
        let mut positions: Vec<Position> = self.cells.iter().copied().collect();
        positions.sort_unstable();
        positions
    }
}
