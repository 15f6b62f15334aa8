use crate::model::{Anchor, PartData};
use crate::resolve::Selection;
use serde::Serialize;

/// Serializable view of a resolved tree
///
/// Children appear in attachment order with both their parent-relative
/// anchor and their absolute top-left corner, so a rasterizer can composite
/// bitmaps without knowing about patterns or choices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WireNode {
    /// Image path; empty for grouping nodes
    pub image: String,
    /// Width in part units
    pub width: u32,
    /// Height in part units
    pub height: u32,
    /// Socket on this part, normalized
    pub socket: Anchor,
    /// Anchor on the parent, normalized; absent for the root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    /// Absolute left edge in pixels
    pub x: i64,
    /// Absolute top edge in pixels
    pub y: i64,
    /// Whether the image is mirrored left to right
    pub flip_x: bool,
    /// Whether the image is mirrored top to bottom
    pub flip_y: bool,
    /// Attached children in attachment order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WireNode>,
}

impl WireNode {
    /// Build the wire tree with the root's socket at the pixel origin
    pub fn from_part(part: &PartData, scale: u32) -> Self {
        Self::build(part, None, [0, 0], scale)
    }

    fn build(part: &PartData, anchor: Option<Anchor>, attach: [i64; 2], scale: u32) -> Self {
        let origin = part.origin_at(attach, scale);
        let [x, y] = origin;

        let children = part
            .subparts()
            .iter()
            .map(|child| {
                let child_attach = part.anchor_at(origin, &child.anchor, scale);
                Self::build(&child.part, Some(child.anchor), child_attach, scale)
            })
            .collect();

        Self {
            image: part.image_path().to_string(),
            width: part.width(),
            height: part.height(),
            socket: part.socket(),
            anchor,
            x,
            y,
            flip_x: part.flip_x(),
            flip_y: part.flip_y(),
            children,
        }
    }
}

/// One generated result as written by the command-line tool
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WireResponse {
    /// Name of the resolved pattern
    pub pattern: String,
    /// Enumeration index, for exhaustive runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Seed used for random selection, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pixels per part unit used for positions
    pub scale: u32,
    /// Selection that reproduces the tree
    pub selection: Selection,
    /// The resolved tree
    pub tree: WireNode,
}
