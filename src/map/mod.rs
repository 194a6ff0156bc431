mod grid;
mod position;
mod room;
mod selection;

pub use self::grid::*;
pub use self::position::*;
pub use self::room::*;
pub use self::selection::*;
