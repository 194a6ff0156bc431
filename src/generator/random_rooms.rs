use rand::rngs::StdRng;
use rand::Rng;

use super::Bounds;
use crate::map::{MapGrid, Position, Selection};
use crate::map_key::MapKey;

/// Configuration for scattered room generation
///
/// Rooms are stamped at random centers, clipped to the grid, and optionally
/// chained together with corridors drawn between consecutive centers.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomRoomsOptions {
    pub floor_symbol: char,
    pub wall_symbol: char,
    /// The number of rooms to place. Rooms may overlap.
    pub room_count: usize,
    /// Half-extents of each room: a room with half-width `w` spans `2w - 1`
    /// columns around its center before clipping, and likewise for height.
    pub room_width: Bounds<i32>,
    pub room_height: Bounds<i32>,
    /// Draws a corridor between each room center and the next one placed
    pub connect_rooms: bool,
}

impl Default for RandomRoomsOptions {
    fn default() -> Self {
        RandomRoomsOptions {
            floor_symbol: ' ',
            wall_symbol: 'x',
            room_count: 10,
            room_width: (2, 4).into(),
            room_height: (2, 4).into(),
            connect_rooms: true,
        }
    }
}

impl RandomRoomsOptions {
    /// Generates a layout from a freshly generated random key and returns the
    /// key along with the placed room centers
    pub fn generate(&self, grid: &mut MapGrid) -> (MapKey, Vec<Position>) {
        let key = rand::random();
        let centers = self.generate_with_key(grid, key);
        (key, centers)
    }

    /// Generates the layout that corresponds to the given key
    pub fn generate_with_key(&self, grid: &mut MapGrid, key: MapKey) -> Vec<Position> {
        let mut rng = key.to_rng();
        self.generate_with_rng(grid, &mut rng)
    }

    pub fn generate_with_rng(&self, grid: &mut MapGrid, rng: &mut StdRng) -> Vec<Position> {
        Selection::all(grid).fill(grid, self.wall_symbol);

        let mut centers = Vec::with_capacity(self.room_count);
        for _ in 0..self.room_count {
            let cx = rng.gen_range(0, grid.width());
            let cy = rng.gen_range(0, grid.height());
            let w = self.room_width.gen(rng);
            let h = self.room_height.gen(rng);

            // Cells outside the grid are silently dropped, so rooms near the
            // edges are clipped rather than shifted
            for y in (cy - h + 1)..(cy + h) {
                for x in (cx - w + 1)..(cx + w) {
                    grid.set(x, y, self.floor_symbol);
                }
            }
            centers.push(Position::new(cx, cy));
        }

        if self.connect_rooms {
            for pair in centers.windows(2) {
                grid.draw_line(
                    pair[0].x,
                    pair[0].y,
                    pair[1].x,
                    pair[1].y,
                    self.floor_symbol,
                    1,
                    true,
                );
            }
        }

        centers
    }
}
