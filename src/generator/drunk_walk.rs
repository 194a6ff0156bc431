use rand::rngs::StdRng;
use rand::Rng;

use crate::map::{MapGrid, Selection};
use crate::map_key::MapKey;

/// Configuration for drunk walk generation
///
/// The grid is filled with walls, then a single walker wanders from a random
/// starting cell carving floor as it goes until the requested share of the
/// grid is open. The result is a single connected cave.
#[derive(Debug, Clone, PartialEq)]
pub struct DrunkWalkOptions {
    pub floor_symbol: char,
    pub wall_symbol: char,
    /// The fraction of grid cells to carve into floor, in `0.0..=1.0`.
    /// Values above 1.0 behave like 1.0.
    pub fill_percentage: f32,
}

impl Default for DrunkWalkOptions {
    fn default() -> Self {
        DrunkWalkOptions {
            floor_symbol: ' ',
            wall_symbol: 'x',
            fill_percentage: 0.5,
        }
    }
}

impl DrunkWalkOptions {
    /// Generates a layout from a freshly generated random key and returns the
    /// key so the layout can be regenerated later
    pub fn generate(&self, grid: &mut MapGrid) -> MapKey {
        let key = rand::random();
        self.generate_with_key(grid, key);
        key
    }

    /// Generates the layout that corresponds to the given key
    pub fn generate_with_key(&self, grid: &mut MapGrid, key: MapKey) {
        let mut rng = key.to_rng();
        self.generate_with_rng(grid, &mut rng);
    }

    pub fn generate_with_rng(&self, grid: &mut MapGrid, rng: &mut StdRng) {
        Selection::all(grid).fill(grid, self.wall_symbol);

        let target = self.fill_percentage.min(1.0);
        let total = grid.area();

        let mut x = rng.gen_range(0, grid.width());
        let mut y = rng.gen_range(0, grid.height());
        let mut carved = 0;

        loop {
            if grid.get(x, y) != self.floor_symbol {
                grid.set(x, y, self.floor_symbol);
                carved += 1;
            }

            if carved as f32 / total as f32 >= target {
                break;
            }

            match rng.gen_range(0, 4) {
                0 => x += 1,
                1 => x -= 1,
                2 => y += 1,
                _ => y -= 1,
            }
            x = x.max(0).min(grid.width() - 1);
            y = y.max(0).min(grid.height() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carves_at_least_the_requested_share() {
        let mut grid = MapGrid::new(20, 20);
        let options = DrunkWalkOptions {
            floor_symbol: '.',
            wall_symbol: '#',
            fill_percentage: 0.35,
        };
        options.generate(&mut grid);

        let mut floor = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = grid.get(x, y);
                assert!(cell == '.' || cell == '#');
                if cell == '.' {
                    floor += 1;
                }
            }
        }
        // 35% of 400 cells
        assert!(floor >= 140);
    }

    #[test]
    fn carved_floor_is_one_connected_region() {
        let mut grid = MapGrid::new(25, 25);
        let options = DrunkWalkOptions {
            floor_symbol: '.',
            wall_symbol: '#',
            fill_percentage: 0.4,
        };
        options.generate(&mut grid);

        let start = grid.closest_symbol(0, 0, '.').unwrap();
        let region = grid.select_contiguous(start.x, start.y, false);
        let all_floor = Selection::all(&grid).filter_by_symbol(&grid, '.');
        assert_eq!(region.len(), all_floor.len());
    }

    #[test]
    fn same_key_reproduces_the_same_layout() {
        let key: MapKey = rand::random();
        let options = DrunkWalkOptions::default();

        let mut first = MapGrid::new(30, 20);
        options.generate_with_key(&mut first, key);
        let mut second = MapGrid::new(30, 20);
        options.generate_with_key(&mut second, key);

        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn excessive_percentage_fills_the_whole_grid() {
        let mut grid = MapGrid::new(5, 5);
        let options = DrunkWalkOptions {
            floor_symbol: '.',
            wall_symbol: '#',
            fill_percentage: 2.0,
        };
        options.generate(&mut grid);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                assert_eq!(grid.get(x, y), '.');
            }
        }
    }
}
