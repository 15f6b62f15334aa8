/// Command-line parsing and command execution
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// JSON pattern library documents
pub mod document;
/// Error types shared by the whole crate
pub mod error;
/// PNG previews of laid out parts
pub mod image;
/// Progress display for long enumerations
pub mod progress;
