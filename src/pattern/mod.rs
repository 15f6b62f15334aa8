/// Choice points and the options they offer
pub mod choice;
/// Named pattern libraries with reference cycle detection
pub mod library;
/// Patterns: base parts with registered choice points
pub mod template;

pub use choice::{AnchoredPattern, ChoiceResult, ChoiceSelection};
pub use library::PatternLibrary;
pub use template::Pattern;
