// Each generation algorithm lives in its own module, and the BSP generator is
// further split by phase (partition splitting, then doorway carving). The
// phases share their configuration through &self on the options struct, so
// they stay separate files without having to pass a bag of parameters around.
mod bounds;
mod bsp;
mod doorways;
mod drunk_walk;
mod random_rooms;

pub use self::bounds::*;
pub use self::bsp::*;
pub use self::drunk_walk::*;
pub use self::random_rooms::*;

use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::map_key::MapKey;

/// Runs one independent seeded generation per key, in parallel.
///
/// Each job gets its own RNG built from its key, so the output for a given
/// key is identical to what a sequential `generate_with_key` call would
/// produce, and the results come back in key order.
pub fn generate_batch<T, F>(keys: &[MapKey], generate: F) -> Vec<T>
where
    T: Send,
    F: Fn(MapKey, &mut StdRng) -> T + Sync,
{
    keys.par_iter()
        .map(|&key| {
            let mut rng = key.to_rng();
            generate(key, &mut rng)
        })
        .collect()
}
