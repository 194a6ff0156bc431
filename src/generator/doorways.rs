use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::BspOptions;
use crate::map::{MapGrid, Position, RoomGraph, RoomId};

impl BspOptions {
    /// Carves doorways into the walls separating rooms and records each
    /// carved doorway as a connection in the graph.
    ///
    /// Each room gets up to two doorways, one on its left wall and one on its
    /// top wall. A doorway candidate is a wall cell with open space on both
    /// sides, so carving it always joins two rooms. Rooms flush against the
    /// grid's left or top edge only have one usable wall, so they always try
    /// both.
    pub(in crate::generator) fn carve_doorways(
        &self,
        grid: &mut MapGrid,
        rng: &mut StdRng,
        rooms: &mut RoomGraph,
    ) {
        let door = match self.door_symbol {
            Some(door) => door,
            None => return,
        };

        let ids: Vec<RoomId> = rooms.ids().collect();
        for &id in &ids {
            let room = rooms.room(id).clone();

            // 0 = left wall, 1 = top wall, 2 = both
            let mut edges = rng.gen_range(0, 3);
            if room.x == 0 || room.y == 0 {
                edges = 2;
            }

            if (edges == 1 || edges == 2) && room.y > 0 {
                let candidates: Vec<Position> = (room.x..room.x + room.w)
                    .filter(|&x| {
                        grid.get(x, room.y - 1) == MapGrid::EMPTY
                            && grid.get(x, room.y + 1) == MapGrid::EMPTY
                    })
                    .map(|x| Position::new(x, room.y))
                    .collect();
                // A fully walled-in edge has no candidates; skip the doorway
                if let Some(&doorway) = candidates.choose(rng) {
                    grid.set(doorway.x, doorway.y, door);
                    if let Some(other) = room_at(rooms, &ids, id, doorway.x, doorway.y - 1) {
                        rooms.connect(id, other);
                    }
                }
            }

            if (edges == 0 || edges == 2) && room.x > 0 {
                let candidates: Vec<Position> = (room.y..room.y + room.h)
                    .filter(|&y| {
                        grid.get(room.x - 1, y) == MapGrid::EMPTY
                            && grid.get(room.x + 1, y) == MapGrid::EMPTY
                    })
                    .map(|y| Position::new(room.x, y))
                    .collect();
                if let Some(&doorway) = candidates.choose(rng) {
                    grid.set(doorway.x, doorway.y, door);
                    if let Some(other) = room_at(rooms, &ids, id, doorway.x - 1, doorway.y) {
                        rooms.connect(id, other);
                    }
                }
            }
        }
    }
}

/// Finds the room other than `id` that contains the cell just beyond a
/// doorway, i.e. the room the doorway opens into
fn room_at(rooms: &RoomGraph, ids: &[RoomId], id: RoomId, x: i32, y: i32) -> Option<RoomId> {
    ids.iter()
        .copied()
        .find(|&other| other != id && rooms.room(other).contains(x, y))
}
