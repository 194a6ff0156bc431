use std::collections::{HashMap, VecDeque};
use std::fmt;

use super::Position;

/// Identifies a room within a [`RoomGraph`]. Ids are stable: rooms are never
/// removed from the graph, only disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub(crate) usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rectangular partition of the grid produced by BSP generation
///
/// The rectangle is fixed at creation; connections to other rooms are added
/// while doorways are carved and can later be severed with
/// [`RoomGraph::disconnect`].
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    connected: Vec<RoomId>,
}

impl Room {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        assert!(w > 0 && h > 0, "Cannot create a room with zero or negative dimensions");
        Room {
            x,
            y,
            w,
            h,
            connected: Vec::new(),
        }
    }

    /// Returns the area of the room (width * height)
    pub fn area(&self) -> i32 {
        self.w * self.h
    }

    /// Returns the smaller of the room's width and height
    pub fn min_size(&self) -> i32 {
        self.w.min(self.h)
    }

    /// Returns the position of the center cell of the room
    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Returns true if the given cell lies within the room's rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// The ids of the rooms this room is connected to by a doorway
    pub fn connected(&self) -> &[RoomId] {
        &self.connected
    }
}

/// The rooms generated by a BSP run, together with their doorway connections
///
/// Rooms are stored in an arena and addressed by [`RoomId`]; connections are
/// always symmetric (if a connects to b then b connects to a).
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    pub fn new() -> Self {
        RoomGraph { rooms: Vec::new() }
    }

    /// Adds a room to the graph and returns its id
    pub fn add_room(&mut self, room: Room) -> RoomId {
        self.rooms.push(room);
        RoomId(self.rooms.len() - 1)
    }

    /// Connects two rooms symmetrically. Self-loops and duplicate edges are
    /// ignored.
    pub fn connect(&mut self, a: RoomId, b: RoomId) {
        if a == b || self.rooms[a.0].connected.contains(&b) {
            return;
        }
        self.rooms[a.0].connected.push(b);
        self.rooms[b.0].connected.push(a);
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    /// Returns an iterator over all rooms and their ids
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, room)| (RoomId(i), room))
    }

    /// Returns an iterator over all room ids
    pub fn ids(&self) -> impl Iterator<Item = RoomId> {
        (0..self.rooms.len()).map(RoomId)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns the minimum number of doorway hops from one room to another,
    /// or `None` if no path connects them. A room's distance to itself is
    /// `Some(0)`.
    pub fn count_hops(&self, from: RoomId, to: RoomId) -> Option<usize> {
        self.count_hops_excluding(from, to, None)
    }

    /// Hop search with one room barred from traversal. The excluded room can
    /// still be the target of the search, but no path may pass through it.
    pub fn count_hops_excluding(
        &self,
        from: RoomId,
        to: RoomId,
        excluded: Option<RoomId>,
    ) -> Option<usize> {
        let mut hops = HashMap::new();
        hops.insert(from, 0);
        let mut open = VecDeque::new();
        open.push_back(from);

        // Breadth-first, so the first time we reach the target is also the
        // minimum hop count. The graph is cyclic; the hops map doubles as the
        // visited set.
        while let Some(next) = open.pop_front() {
            let count = hops[&next];
            if next == to {
                return Some(count);
            }

            if excluded == Some(next) {
                continue;
            }

            for &neighbor in self.rooms[next.0].connected() {
                if !hops.contains_key(&neighbor) {
                    hops.insert(neighbor, count + 1);
                    open.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Returns true if removing this room would disconnect any pair of its
    /// neighbors, i.e. the room is an articulation point of the graph. Rooms
    /// with at most one connection are always necessary.
    pub fn is_necessary(&self, id: RoomId) -> bool {
        let connected = self.room(id).connected();
        if connected.len() <= 1 {
            return true;
        }

        for &neighbor in connected {
            // A neighbor connected only to this room would be stranded
            if self.room(neighbor).connected().len() <= 1 {
                return true;
            }

            for &other in connected {
                if other == neighbor {
                    continue;
                }
                if self.count_hops_excluding(neighbor, other, Some(id)).is_none() {
                    return true;
                }
            }
        }

        false
    }

    /// Removes the room from all of its neighbors' connection lists and
    /// clears its own, leaving it isolated. The room itself (and its
    /// rectangle on the grid) remains; callers erase it separately if they
    /// want to.
    pub fn disconnect(&mut self, id: RoomId) {
        let neighbors = std::mem::take(&mut self.rooms[id.0].connected);
        for neighbor in neighbors {
            self.rooms[neighbor.0].connected.retain(|&other| other != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(count: usize) -> (RoomGraph, Vec<RoomId>) {
        let mut graph = RoomGraph::new();
        let ids = (0..count)
            .map(|i| graph.add_room(Room::new(i as i32 * 10, 0, 10, 10)))
            .collect();
        (graph, ids)
    }

    #[test]
    fn connections_are_symmetric_and_deduplicated() {
        let (mut graph, ids) = graph_of(3);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[1], ids[0]);
        graph.connect(ids[0], ids[0]);

        assert_eq!(graph.room(ids[0]).connected(), &[ids[1]]);
        assert_eq!(graph.room(ids[1]).connected(), &[ids[0]]);
        assert!(graph.room(ids[2]).connected().is_empty());
    }

    #[test]
    fn hops_to_self_is_zero() {
        let (mut graph, ids) = graph_of(2);
        graph.connect(ids[0], ids[1]);
        assert_eq!(graph.count_hops(ids[0], ids[0]), Some(0));
        // Even when the room is excluded from traversal
        assert_eq!(graph.count_hops_excluding(ids[0], ids[0], Some(ids[0])), Some(0));
    }

    #[test]
    fn hops_find_the_shortest_path_in_a_cycle() {
        // 0-1-2-3-4-0 ring: going the short way round must win
        let (mut graph, ids) = graph_of(5);
        for i in 0..5 {
            graph.connect(ids[i], ids[(i + 1) % 5]);
        }

        assert_eq!(graph.count_hops(ids[0], ids[1]), Some(1));
        assert_eq!(graph.count_hops(ids[0], ids[2]), Some(2));
        assert_eq!(graph.count_hops(ids[0], ids[4]), Some(1));
        assert_eq!(graph.count_hops(ids[0], ids[3]), Some(2));

        // Symmetric both ways
        for &a in &ids {
            for &b in &ids {
                assert_eq!(graph.count_hops(a, b), graph.count_hops(b, a));
            }
        }
    }

    #[test]
    fn unreachable_rooms_return_none() {
        let (mut graph, ids) = graph_of(4);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[2], ids[3]);

        assert_eq!(graph.count_hops(ids[0], ids[2]), None);
        assert_eq!(graph.count_hops(ids[3], ids[1]), None);
    }

    #[test]
    fn exclusion_bars_traversal_but_not_arrival() {
        // 0-1-2 path: excluding the middle room cuts 0 off from 2, but the
        // excluded room itself is still reachable as a target
        let (mut graph, ids) = graph_of(3);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[1], ids[2]);

        assert_eq!(graph.count_hops(ids[0], ids[2]), Some(2));
        assert_eq!(graph.count_hops_excluding(ids[0], ids[2], Some(ids[1])), None);
        assert_eq!(graph.count_hops_excluding(ids[0], ids[1], Some(ids[1])), Some(1));
    }

    #[test]
    fn single_connection_rooms_are_necessary() {
        let (mut graph, ids) = graph_of(2);
        graph.connect(ids[0], ids[1]);
        assert!(graph.is_necessary(ids[0]));
        assert!(graph.is_necessary(ids[1]));
    }

    #[test]
    fn path_middle_is_necessary_cycle_rooms_are_not() {
        // 0-1-2 path: the middle is an articulation point
        let (mut graph, ids) = graph_of(3);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[1], ids[2]);
        assert!(graph.is_necessary(ids[1]));

        // Close the ring and no room is necessary any more
        graph.connect(ids[2], ids[0]);
        for &id in &ids {
            assert!(!graph.is_necessary(id));
        }
    }

    #[test]
    fn necessity_check_leaves_the_graph_untouched() {
        let (mut graph, ids) = graph_of(4);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[1], ids[2]);
        graph.connect(ids[2], ids[3]);
        graph.connect(ids[3], ids[0]);

        let before = graph.clone();
        let _ = graph.is_necessary(ids[0]);
        let _ = graph.is_necessary(ids[2]);
        for &id in &ids {
            assert_eq!(graph.room(id), before.room(id));
        }
    }

    #[test]
    fn disconnect_removes_symmetric_edges() {
        let (mut graph, ids) = graph_of(3);
        graph.connect(ids[0], ids[1]);
        graph.connect(ids[1], ids[2]);

        graph.disconnect(ids[1]);
        assert!(graph.room(ids[1]).connected().is_empty());
        assert!(graph.room(ids[0]).connected().is_empty());
        assert!(graph.room(ids[2]).connected().is_empty());
        // Rooms still exist, only the edges are gone
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.count_hops(ids[0], ids[2]), None);
    }

    #[test]
    fn room_geometry_queries() {
        let room = Room::new(2, 3, 4, 6);
        assert_eq!(room.area(), 24);
        assert_eq!(room.min_size(), 4);
        assert_eq!(room.center(), Position::new(4, 6));
        assert!(room.contains(2, 3));
        assert!(room.contains(5, 8));
        assert!(!room.contains(6, 3));
        assert!(!room.contains(2, 9));
    }
}
