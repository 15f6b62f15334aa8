/// Anchor points in normalized part coordinates
pub mod anchor;
/// Mirrored variants of parts
pub mod flip;
/// Part nodes and their attached children
pub mod part;

pub use anchor::Anchor;
pub use flip::FlipAxis;
pub use part::{AnchoredPart, PartData};
