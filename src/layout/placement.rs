use crate::model::{Anchor, PartData};
use serde::Serialize;

/// Absolute position of one node of a resolved tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Image to draw; empty for grouping nodes
    pub image_path: String,
    /// Left edge in pixels
    pub x: i64,
    /// Top edge in pixels
    pub y: i64,
    /// Drawn width in pixels
    pub width: u32,
    /// Drawn height in pixels
    pub height: u32,
    /// Point where the node's socket meets its parent's anchor
    pub socket: [i64; 2],
    /// Whether the image is mirrored left to right
    pub flip_x: bool,
    /// Whether the image is mirrored top to bottom
    pub flip_y: bool,
    /// Distance from the root, which is level zero
    pub level: usize,
    /// Whether the node was attached behind its parent
    pub behind: bool,
}

impl Placement {
    /// Whether this node has an image to draw
    pub fn is_drawable(&self) -> bool {
        !self.image_path.is_empty()
    }

    /// Right edge in pixels, exclusive
    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Bottom edge in pixels, exclusive
    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }
}

/// Pixel rectangle enclosing a set of placements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Leftmost column, inclusive
    pub min_x: i64,
    /// Topmost row, inclusive
    pub min_y: i64,
    /// Rightmost column, exclusive
    pub max_x: i64,
    /// Bottom row, exclusive
    pub max_y: i64,
}

impl Bounds {
    /// Width in pixels
    pub const fn width(&self) -> i64 {
        self.max_x - self.min_x
    }

    /// Height in pixels
    pub const fn height(&self) -> i64 {
        self.max_y - self.min_y
    }
}

/// Lay out a resolved tree in draw order
///
/// The root's socket is placed at `origin`. Each node is visited as: its
/// children attached behind it (`z_delta < 0`), then the node itself, then
/// the remaining children, each group in attachment order. Grouping nodes
/// are included so callers can see their sockets; check
/// [`Placement::is_drawable`] before drawing. Anchor and socket fractions are
/// floored to whole part units before scaling.
pub fn layout(part: &PartData, origin: [i64; 2], scale: u32) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(part.node_count());
    place(part, origin, scale, 0, false, &mut placements);
    placements
}

fn place(
    part: &PartData,
    attach: [i64; 2],
    scale: u32,
    level: usize,
    behind: bool,
    placements: &mut Vec<Placement>,
) {
    let origin = part.origin_at(attach, scale);
    let [x, y] = origin;
    let child_attach = |anchor: &Anchor| part.anchor_at(origin, anchor, scale);

    for child in part.subparts().iter().filter(|child| child.anchor.is_behind()) {
        place(
            &child.part,
            child_attach(&child.anchor),
            scale,
            level + 1,
            true,
            placements,
        );
    }

    placements.push(Placement {
        image_path: part.image_path().to_string(),
        x,
        y,
        width: part.width().saturating_mul(scale),
        height: part.height().saturating_mul(scale),
        socket: attach,
        flip_x: part.flip_x(),
        flip_y: part.flip_y(),
        level,
        behind,
    });

    for child in part.subparts().iter().filter(|child| !child.anchor.is_behind()) {
        place(
            &child.part,
            child_attach(&child.anchor),
            scale,
            level + 1,
            false,
            placements,
        );
    }
}

/// Smallest rectangle containing every drawable placement
///
/// Returns `None` when nothing is drawable.
pub fn bounds(placements: &[Placement]) -> Option<Bounds> {
    placements
        .iter()
        .filter(|placement| placement.is_drawable())
        .fold(None, |acc: Option<Bounds>, placement| {
            let bounds = acc.map_or(
                Bounds {
                    min_x: placement.x,
                    min_y: placement.y,
                    max_x: placement.right(),
                    max_y: placement.bottom(),
                },
                |bounds| Bounds {
                    min_x: bounds.min_x.min(placement.x),
                    min_y: bounds.min_y.min(placement.y),
                    max_x: bounds.max_x.max(placement.right()),
                    max_y: bounds.max_y.max(placement.bottom()),
                },
            );
            Some(bounds)
        })
}
