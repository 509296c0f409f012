//! Aisle chain building: joining anchor-pair measurements into
//! continuous corridors and generating their polygons.

mod builder;
mod ribbon;
mod types;

pub use builder::find_aisle_chains;
pub use ribbon::generate_chained_aisle_zone;
pub use types::AisleChain;
