//! Composition of 2D sprites from reusable parts attached at anchor points
//!
//! Parts are placed on one another at normalized anchors, can be mirrored,
//! and are combined through patterns: a base part plus independent choice
//! points, each offering alternative sub-assemblies. A pattern resolves to a
//! concrete part tree for one selection, or enumerates all of them lazily.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Absolute placement and serializable output of resolved trees
pub mod layout;
/// Anchors, parts and mirrored variants
pub mod model;
/// Patterns, choice points and named pattern libraries
pub mod pattern;
/// Selection, resolution and variant enumeration
pub mod resolve;

pub use io::error::{ComposeError, Result};
