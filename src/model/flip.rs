use crate::model::part::PartData;
use serde::{Deserialize, Serialize};

/// Axis across which a part is mirrored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left to right
    Horizontal,
    /// Mirror top to bottom
    Vertical,
}

impl FlipAxis {
    /// Reflect a normalized coordinate around the middle of `0.0..=1.0`
    pub fn mirror(coordinate: f64) -> f64 {
        1.0 - coordinate
    }

    /// Shallow clone of `part` with its own socket mirrored and flag toggled
    ///
    /// Subpart anchors and descendant flags are left as they are: flipping
    /// changes how the part hangs from its parent, not how its children hang
    /// from it. Callers wanting mirrored children flip each subtree.
    #[must_use]
    pub fn apply(self, part: &PartData) -> PartData {
        let mut flipped = part.clone();

        let socket = flipped.socket_mut();
        match self {
            Self::Horizontal => socket.x = Self::mirror(socket.x),
            Self::Vertical => socket.y = Self::mirror(socket.y),
        }

        let flag = flipped.flip_flag_mut(self);
        *flag = !*flag;

        flipped
    }
}
