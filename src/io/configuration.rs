//! Composition constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible random selection
pub const DEFAULT_SEED: u64 = 42;

/// Name of the pattern resolved when none is given
pub const DEFAULT_PATTERN: &str = "root";

/// Upper bound on variants written by exhaustive enumeration
pub const DEFAULT_ENUMERATION_LIMIT: u64 = 10_000;

// Geometry settings
/// Pixels per part unit when laying out and previewing
pub const PREVIEW_SCALE: u32 = 4;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed preview dimension in pixels
pub const MAX_PREVIEW_DIMENSION: u32 = 8_192;

// Preview rendering settings
/// Half-width of the square drawn at each socket
pub const SOCKET_MARKER_RADIUS: u32 = 2;
/// Color of socket markers
pub const SOCKET_MARKER_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Outline color for parts attached in front of their parent
pub const FRONT_OUTLINE_COLOR: [u8; 4] = [40, 40, 40, 255];
/// Outline color for parts attached behind their parent
pub const BACK_OUTLINE_COLOR: [u8; 4] = [140, 140, 200, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Extension of per-variant output files
pub const VARIANT_EXTENSION: &str = "json";
/// Prefix of per-variant output files
pub const VARIANT_PREFIX: &str = "variant_";
