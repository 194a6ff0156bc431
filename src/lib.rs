//! Procedural 2D grid-layout generation.
//!
//! The crate is built around three pieces:
//!
//! * [`MapGrid`] — a mutable 2D grid of `char` symbols with bounds-absorbed
//!   reads/writes, line drawing, and a human-readable dump.
//! * [`Selection`] — an owned set of grid positions with a filter/combinator
//!   algebra for post-processing a generated layout. Every transforming
//!   operation returns a new `Selection`; [`Selection::fill`] is the only
//!   operation that writes back into the grid.
//! * Generators — [`BspOptions`] (partition walls, doorways, and a [`RoomGraph`]
//!   of connected rooms), [`DrunkWalkOptions`], and [`RandomRoomsOptions`].
//!
//! Generation is deterministic: every generator can be driven by a [`MapKey`],
//! and the same key always reproduces the same layout.
//!
//! ```no_run
//! use rand::random;
//! use warren::{BspOptions, MapGrid, MapKey, Selection};
//!
//! let mut grid = MapGrid::new(40, 23);
//! let key: MapKey = random();
//! let rooms = BspOptions::default().generate_with_key(&mut grid, key);
//!
//! // Sprinkle an alternate floor symbol over 10% of the open cells.
//! let mut rng = key.to_rng();
//! Selection::all(&grid)
//!     .filter_by_symbol(&grid, MapGrid::EMPTY)
//!     .filter_by_percentage(0.1, &mut rng)
//!     .fill(&mut grid, '.');
//!
//! for (id, room) in rooms.rooms() {
//!     println!("room {}: {}x{} at ({}, {})", id, room.w, room.h, room.x, room.y);
//! }
//! println!("{}", grid);
//! ```

#![deny(unused_must_use)]

#[macro_use]
extern crate lazy_static;

mod generator;
mod map;
mod map_key;

pub use crate::generator::*;
pub use crate::map::*;
pub use crate::map_key::*;
