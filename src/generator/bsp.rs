use rand::rngs::StdRng;
use rand::Rng;

use crate::map::{MapGrid, Room, RoomGraph, Selection};
use crate::map_key::MapKey;

/// Configuration for binary space partitioning generation
///
/// The grid is recursively split by wall lines into rectangular rooms, then
/// doorways are carved so neighboring rooms connect. All randomness comes
/// from the provided key/RNG, so the same configuration and key always
/// produce the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct BspOptions {
    /// The symbol drawn along each splitting wall
    pub wall_symbol: char,
    /// The symbol carved into walls to connect rooms. With `None`, walls are
    /// drawn but no doorways are carved and no rooms are connected.
    pub door_symbol: Option<char>,
    /// The number of successful splits to perform. The layout ends up with at
    /// most `split_count + 1` rooms.
    pub split_count: usize,
    /// Rooms whose smaller dimension would not exceed this are never created
    pub minimum_room_size: i32,
}

impl Default for BspOptions {
    fn default() -> Self {
        BspOptions {
            wall_symbol: 'x',
            door_symbol: Some('#'),
            split_count: 10,
            minimum_room_size: 4,
        }
    }
}

impl BspOptions {
    /// Generates a layout from a freshly generated random key and returns the
    /// key so the layout can be regenerated later
    pub fn generate(&self, grid: &mut MapGrid) -> (MapKey, RoomGraph) {
        let key = rand::random();
        let rooms = self.generate_with_key(grid, key);
        (key, rooms)
    }

    /// Generates the layout that corresponds to the given key
    pub fn generate_with_key(&self, grid: &mut MapGrid, key: MapKey) -> RoomGraph {
        let mut rng = key.to_rng();
        self.generate_with_rng(grid, &mut rng)
    }

    pub fn generate_with_rng(&self, grid: &mut MapGrid, rng: &mut StdRng) -> RoomGraph {
        Selection::all(grid).fill(grid, MapGrid::EMPTY);

        let mut partitions = vec![Room::new(0, 0, grid.width(), grid.height())];

        // Splits can fail (too small, or the wall would land on a door), so
        // we keep trying until enough succeed, with a cap so a grid that
        // cannot fit any more rooms does not loop forever.
        let mut splits = 0;
        let mut attempts = 0;
        while splits < self.split_count && attempts < self.split_count * 10 {
            attempts += 1;

            // Prefer splitting the largest partition so room sizes stay
            // roughly even, but occasionally pick at random for variety.
            partitions.sort_by(|a, b| b.min_size().cmp(&a.min_size()));
            let index = if rng.gen::<f32>() >= 0.2 {
                0
            } else {
                rng.gen_range(0, partitions.len())
            };

            if let Some((first, second)) = self.try_split(grid, rng, &partitions[index]) {
                partitions.swap_remove(index);
                partitions.push(first);
                partitions.push(second);
                splits += 1;
            }
        }

        let mut rooms = RoomGraph::new();
        for partition in partitions {
            rooms.add_room(partition);
        }

        self.carve_doorways(grid, rng, &mut rooms);
        rooms
    }

    /// Attempts to split a partition in two with a wall line. Returns `None`
    /// if either half would be too small or the wall would cut through an
    /// existing doorway.
    fn try_split(&self, grid: &mut MapGrid, rng: &mut StdRng, parent: &Room) -> Option<(Room, Room)> {
        let mut vertical = rng.gen::<f32>() >= 0.5;
        // Long partitions always split across their long axis
        if parent.w > parent.h * 2 {
            vertical = true;
        } else if parent.h > parent.w * 2 {
            vertical = false;
        }

        // Keep the split away from the edges so neither half is a sliver
        let percentage = 0.2 + rng.gen::<f32>() * 0.6;

        if vertical {
            let cx = (parent.w as f32 * percentage) as i32;
            // Check the child dimensions before constructing any rooms: a
            // degenerate split can produce a zero-width child
            if cx <= 0
                || cx.min(parent.h) <= self.minimum_room_size
                || (parent.w - cx).min(parent.h) <= self.minimum_room_size
            {
                return None;
            }
            if let Some(door) = self.door_symbol {
                // A wall starting or ending on a doorway would seal it off.
                // The cell one past the bottom is checked as well because a
                // later horizontal wall can carve its door there.
                if grid.get(parent.x + cx, parent.y) == door
                    || grid.get(parent.x + cx, parent.y + parent.h) == door
                {
                    return None;
                }
            }
            grid.draw_line(
                parent.x + cx,
                parent.y,
                parent.x + cx,
                parent.y + parent.h - 1,
                self.wall_symbol,
                1,
                false,
            );
            let first = Room::new(parent.x, parent.y, cx, parent.h);
            let second = Room::new(parent.x + cx, parent.y, parent.w - cx, parent.h);
            Some((first, second))
        } else {
            let cy = (parent.h as f32 * percentage) as i32;
            if cy <= 0
                || cy.min(parent.w) <= self.minimum_room_size
                || (parent.h - cy).min(parent.w) <= self.minimum_room_size
            {
                return None;
            }
            if let Some(door) = self.door_symbol {
                if grid.get(parent.x, parent.y + cy) == door
                    || grid.get(parent.x + parent.w, parent.y + cy) == door
                {
                    return None;
                }
            }
            grid.draw_line(
                parent.x,
                parent.y + cy,
                parent.x + parent.w - 1,
                parent.y + cy,
                self.wall_symbol,
                1,
                false,
            );
            let first = Room::new(parent.x, parent.y, parent.w, cy);
            let second = Room::new(parent.x, parent.y + cy, parent.w, parent.h - cy);
            Some((first, second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tile_the_grid_exactly() {
        let mut grid = MapGrid::new(50, 40);
        let options = BspOptions::default();
        let rooms = options.generate_with_key(&mut grid, "A".repeat(43).parse().unwrap());

        assert!(rooms.len() >= 1);
        assert!(rooms.len() <= options.split_count + 1);

        // Every partition respects the size floor, and together they cover
        // the grid without overlap
        let mut total_area = 0;
        for (_, room) in rooms.rooms() {
            assert!(room.min_size() > options.minimum_room_size);
            total_area += room.area();
        }
        assert_eq!(total_area, grid.area());
    }

    #[test]
    fn single_split_yields_two_rooms_and_one_door() {
        let mut grid = MapGrid::new(10, 10);
        let options = BspOptions {
            split_count: 1,
            minimum_room_size: 2,
            ..BspOptions::default()
        };
        let (_, rooms) = options.generate(&mut grid);

        assert_eq!(rooms.len(), 2);

        let doors = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.get(x, y) == '#')
            .count();
        assert_eq!(doors, 1);

        let ids: Vec<_> = rooms.ids().collect();
        assert_eq!(rooms.count_hops(ids[0], ids[1]), Some(1));
        assert_eq!(rooms.count_hops(ids[1], ids[0]), Some(1));
    }

    #[test]
    fn same_key_reproduces_the_same_layout() {
        let key: MapKey = rand::random();
        let options = BspOptions::default();

        let mut first = MapGrid::new(40, 30);
        let first_rooms = options.generate_with_key(&mut first, key);
        let mut second = MapGrid::new(40, 30);
        let second_rooms = options.generate_with_key(&mut second, key);

        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(first_rooms.len(), second_rooms.len());
        for (a, b) in first_rooms.rooms().zip(second_rooms.rooms()) {
            assert_eq!(a.1, b.1);
        }
    }

    #[test]
    fn connected_rooms_share_a_doorway() {
        let mut grid = MapGrid::new(60, 40);
        let options = BspOptions::default();
        let (_, rooms) = options.generate(&mut grid);

        for (id, room) in rooms.rooms() {
            for &other in room.connected() {
                // Connections are always mirrored
                assert!(rooms.room(other).connected().contains(&id));
            }
        }

        // Every room with a connection can reach its neighbors in one hop
        for (id, room) in rooms.rooms() {
            for &other in room.connected() {
                assert_eq!(rooms.count_hops(id, other), Some(1));
            }
        }
    }

    #[test]
    fn no_door_symbol_means_no_doorways() {
        let mut grid = MapGrid::new(50, 40);
        let options = BspOptions {
            door_symbol: None,
            ..BspOptions::default()
        };
        let (_, rooms) = options.generate(&mut grid);

        assert!(rooms.len() > 1);
        for (_, room) in rooms.rooms() {
            assert!(room.connected().is_empty());
        }
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = grid.get(x, y);
                assert!(cell == MapGrid::EMPTY || cell == options.wall_symbol);
            }
        }
    }

    #[test]
    fn generation_clears_previous_contents() {
        let mut grid = MapGrid::new(30, 20);
        Selection::all(&grid).fill(&mut grid, '@');

        let options = BspOptions::default();
        options.generate(&mut grid);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                assert_ne!(grid.get(x, y), '@');
            }
        }
    }

    #[test]
    fn tiny_grids_stay_a_single_room() {
        // Nothing can split without violating the size floor
        let mut grid = MapGrid::new(8, 8);
        let options = BspOptions::default();
        let (_, rooms) = options.generate(&mut grid);

        assert_eq!(rooms.len(), 1);
        let (_, room) = rooms.rooms().next().unwrap();
        assert_eq!((room.x, room.y, room.w, room.h), (0, 0, 8, 8));
    }
}
