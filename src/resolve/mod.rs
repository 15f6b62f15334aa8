/// Memoized variant counting over shared sub-patterns
pub mod cache;
/// Composition of concrete part trees from patterns
pub mod resolver;
/// Selections and seeded random selection policies
pub mod selection;
/// Lazy enumeration of all variants of a pattern
pub mod variants;

pub use resolver::resolve;
pub use selection::{Pick, RandomSelector, Selection};
pub use variants::{Variant, Variants, variants};
