use serde::{Deserialize, Serialize};

/// Attachment point in a part's local coordinate space
///
/// Coordinates are normalized fractions of the owning part's width and
/// height, so `(0.5, 0.5)` is the center regardless of pixel size. Values
/// outside `0.0..=1.0` are allowed and place the point beyond the part's
/// edge. `z_delta` orders attached parts relative to their parent: negative
/// values draw behind it, zero and positive values in front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Horizontal position as a fraction of width
    pub x: f64,
    /// Vertical position as a fraction of height
    pub y: f64,
    /// Depth offset relative to the parent
    #[serde(default, rename = "z")]
    pub z_delta: i32,
}

impl Anchor {
    /// The top-left corner at the parent's depth
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0);

    /// The center at the parent's depth
    pub const CENTER: Self = Self::new(0.5, 0.5, 0);

    /// Create an anchor
    pub const fn new(x: f64, y: f64, z_delta: i32) -> Self {
        Self { x, y, z_delta }
    }

    /// Whether parts attached here are drawn behind the parent
    pub const fn is_behind(&self) -> bool {
        self.z_delta < 0
    }

    /// Convert to whole pixels for a part of the given size
    ///
    /// Truncates toward negative infinity so that fractional pixels never
    /// shift a part right or down.
    pub fn to_pixels(&self, width: u32, height: u32) -> [i64; 2] {
        [
            (self.x * f64::from(width)).floor() as i64,
            (self.y * f64::from(height)).floor() as i64,
        ]
    }
}
