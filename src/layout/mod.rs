/// Absolute placements of resolved trees in draw order
pub mod placement;
/// Serializable output trees for rasterizers and other consumers
pub mod wire;

pub use placement::{Bounds, Placement, bounds, layout};
pub use wire::{WireNode, WireResponse};
